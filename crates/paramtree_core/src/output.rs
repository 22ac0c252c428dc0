//! Writing rendered documents to files.

use crate::error::{ExportError, ExportResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Create `path` and hand a buffered writer to `write`.
///
/// The file is flushed and closed when this returns, on success and on
/// error alike.
///
/// # Errors
///
/// Returns [`ExportError::CannotCreateOutput`] if the file cannot be created
/// and [`ExportError::Write`] if writing or flushing fails
pub fn write_file<F>(path: &Path, write: F) -> ExportResult<()>
where
    F: FnOnce(&mut dyn Write) -> ExportResult<()>,
{
    let file = File::create(path).map_err(|source| ExportError::CannotCreateOutput {
        path: path.to_path_buf(),
        source,
    })?;
    let mut out = BufWriter::new(file);
    write(&mut out)?;
    out.flush()?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}
