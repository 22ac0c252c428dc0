//! PARAMTREE CLI
//!
//! Converts a tool description (JSON or YAML) into a CTD or CWL document.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod format;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use format::InputFormat;
use paramtree_core::ToolInfo;
use paramtree_cwl::CwlOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "paramtree")]
#[command(about = "Export tool parameter descriptions to CTD or CWL", long_about = None)]
struct Cli {
    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a CTD (Common Tool Descriptor) XML document
    Ctd(ExportArgs),
    /// Write a CWL v1.2 CommandLineTool document
    Cwl(ExportArgs),
}

#[derive(Args)]
struct ExportArgs {
    /// Tool description file
    #[arg(short, long)]
    input: PathBuf,
    /// Destination file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Description format; guessed from the input extension when omitted
    #[arg(short, long, value_enum)]
    format: Option<InputFormat>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Ctd(args) => {
            let tool = load(&args)?;
            match &args.output {
                Some(path) => paramtree_ctd::write_ctd_file(&tool, path)
                    .wrap_err_with(|| format!("writing {}", path.display()))?,
                None => {
                    let mut out = std::io::stdout().lock();
                    paramtree_ctd::write_ctd(&tool, &mut out)?;
                    out.flush()?;
                }
            }
        }
        Commands::Cwl(args) => {
            let tool = load(&args)?;
            let options = CwlOptions::default();
            match &args.output {
                Some(path) => paramtree_cwl::write_cwl_file(&tool, &options, path)
                    .wrap_err_with(|| format!("writing {}", path.display()))?,
                None => {
                    let mut out = std::io::stdout().lock();
                    paramtree_cwl::write_cwl(&tool, &options, &mut out)?;
                    out.flush()?;
                }
            }
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(args: &ExportArgs) -> Result<ToolInfo> {
    tracing::debug!("Loading {} ({:?})", args.input.display(), args.format);
    let loaded = match args.format {
        Some(format) => read_description(&args.input, format),
        None => ToolInfo::load(&args.input).map_err(Into::into),
    };
    loaded.wrap_err_with(|| format!("loading tool description {}", args.input.display()))
}

fn read_description(path: &Path, format: InputFormat) -> Result<ToolInfo> {
    let text = std::fs::read_to_string(path)?;
    let tool = match format {
        InputFormat::Json => ToolInfo::from_json(&text)?,
        InputFormat::Yaml => ToolInfo::from_yaml(&text)?,
    };
    Ok(tool)
}
