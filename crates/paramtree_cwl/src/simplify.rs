//! Folding of verbose CWL type expressions into shorthand.
//!
//! | verbose                                | shorthand |
//! |----------------------------------------|-----------|
//! | `[null, X]`                            | `X?`      |
//! | `{type: array, items: X}`              | `X[]`     |
//! | `[null, {type: array, items: X}]`      | `X[]?`    |
//!
//! Only values stored under a `type` key are rewritten, and only when `X` is
//! a plain type name. Anything else (records, unions of several types) is
//! left in verbose form. The pass is idempotent.

use serde_yaml_ng::Value;

/// Rewrite every `type` entry of `doc` into shorthand where possible.
pub fn simplify_types(doc: &mut Value) {
    match doc {
        Value::Mapping(map) => {
            for (key, value) in map.iter_mut() {
                simplify_types(value);
                if key.as_str() == Some("type") {
                    if let Some(short) = shorthand(value) {
                        *value = Value::String(short);
                    }
                }
            }
        }
        Value::Sequence(seq) => seq.iter_mut().for_each(simplify_types),
        _ => {}
    }
}

/// Shorthand for one type expression, `None` if it has none.
#[must_use]
pub fn shorthand(ty: &Value) -> Option<String> {
    match ty {
        Value::Sequence(seq) => match seq.as_slice() {
            [null, inner] if is_null_type(null) => match inner {
                Value::String(name) => Some(format!("{}?", name)),
                Value::Mapping(_) => array_shorthand(inner).map(|s| s + "?"),
                _ => None,
            },
            _ => None,
        },
        Value::Mapping(_) => array_shorthand(ty),
        _ => None,
    }
}

fn array_shorthand(ty: &Value) -> Option<String> {
    let map = ty.as_mapping()?;
    if map.len() != 2 || map.get("type")?.as_str()? != "array" {
        return None;
    }
    let items = map.get("items")?.as_str()?;
    Some(format!("{}[]", items))
}

/// CWL spells the null type as the string `"null"`; a YAML null is
/// accepted too.
fn is_null_type(v: &Value) -> bool {
    v.is_null() || v.as_str() == Some("null")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn yaml(s: &str) -> Value {
        serde_yaml_ng::from_str(s).unwrap()
    }

    fn simplified(s: &str) -> Value {
        let mut v = yaml(s);
        simplify_types(&mut v);
        v
    }

    #[test]
    fn test_optional_scalar() {
        assert_eq!(simplified("type: [\"null\", string]"), yaml("type: string?"));
        assert_eq!(simplified("type: [null, long]"), yaml("type: long?"));
    }

    #[test]
    fn test_array() {
        assert_eq!(
            simplified("type: {type: array, items: double}"),
            yaml("type: double[]")
        );
    }

    #[test]
    fn test_optional_array() {
        assert_eq!(
            simplified("type: [\"null\", {type: array, items: File}]"),
            yaml("type: File[]?")
        );
    }

    #[test]
    fn test_nested_documents() {
        let doc = simplified(
            r#"
inputs:
  grp:
    type:
      - "null"
      - type: record
        fields:
          depth:
            type: ["null", long]
outputs:
  out:
    type: {type: array, items: File}
"#,
        );
        let expected = yaml(
            r#"
inputs:
  grp:
    type:
      - "null"
      - type: record
        fields:
          depth:
            type: long?
outputs:
  out:
    type: File[]
"#,
        );
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_untouched_forms() {
        // Unions of more than one concrete type have no shorthand
        let src = "type: [\"null\", string, long]";
        assert_eq!(simplified(src), yaml(src));

        // Arrays of records stay verbose
        let src = "type: {type: array, items: {type: record, fields: {}}}";
        assert_eq!(simplified(src), yaml(src));

        // Only `type` keys are rewritten
        let src = "default: [\"null\", string]";
        assert_eq!(simplified(src), yaml(src));
    }

    #[test]
    fn test_idempotent_on_example() {
        let once = simplified("type: [\"null\", {type: array, items: File}]");
        let mut twice = once.clone();
        simplify_types(&mut twice);
        assert_eq!(once, twice);
    }

    fn type_expr() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just("string"),
            Just("long"),
            Just("double"),
            Just("boolean"),
            Just("File"),
            Just("Directory"),
        ]
        .prop_map(|s| Value::String(s.to_string()));
        leaf.prop_recursive(3, 8, 2, |inner| {
            prop_oneof![
                inner
                    .clone()
                    .prop_map(|t| yaml_pair("null", t)),
                inner.prop_map(|t| {
                    let mut m = serde_yaml_ng::Mapping::new();
                    m.insert(Value::from("type"), Value::from("array"));
                    m.insert(Value::from("items"), t);
                    Value::Mapping(m)
                }),
            ]
        })
    }

    fn yaml_pair(first: &str, second: Value) -> Value {
        Value::Sequence(vec![Value::from(first), second])
    }

    proptest! {
        #[test]
        fn prop_simplify_idempotent(ty in type_expr()) {
            let mut doc = serde_yaml_ng::Mapping::new();
            doc.insert(Value::from("type"), ty);
            let mut once = Value::Mapping(doc);
            simplify_types(&mut once);
            let mut twice = once.clone();
            simplify_types(&mut twice);
            prop_assert_eq!(once, twice);
        }
    }
}
