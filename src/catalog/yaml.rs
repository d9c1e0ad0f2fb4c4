//! YAML message files: a flat mapping of source string to translation

use super::HEADER_LINES;
use crate::types::Catalog;
use serde_yaml::{Mapping, Value};

/// Parse a flat YAML mapping into entries in file order
pub fn parse(content: &str) -> Result<Vec<(String, String)>, String> {
    let yaml: Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;

    let map = match yaml {
        Value::Null => return Ok(Vec::new()),
        Value::Mapping(map) => map,
        _ => return Err("Expected a mapping of source strings to translations".to_string()),
    };

    let mut entries = Vec::with_capacity(map.len());
    for (key, value) in map {
        let source = scalar_to_string(&key)
            .ok_or_else(|| format!("Invalid message key: {:?}", key))?;
        let translation = scalar_to_string(&value)
            .ok_or_else(|| format!("Invalid translation for '{}'", source))?;
        entries.push((source, translation));
    }
    Ok(entries)
}

/// Render a catalog as YAML with the header as a `#` comment block
pub fn render(catalog: &Catalog) -> Result<String, serde_yaml::Error> {
    let mut out = String::new();
    for line in HEADER_LINES {
        if line.is_empty() {
            out.push_str("#\n");
        } else {
            out.push_str("# ");
            out.push_str(line);
            out.push('\n');
        }
    }

    let mut map = Mapping::new();
    for (source, translation) in catalog.iter() {
        map.insert(
            Value::String(source.to_string()),
            Value::String(translation.to_string()),
        );
    }
    out.push_str(&serde_yaml::to_string(&Value::Mapping(map))?);
    Ok(out)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => Some(String::new()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_flat_mapping() {
        let content = "Zebra: ''\nApple: Apfel\nEmpty: ~\n42: Answer\n";
        assert_eq!(
            parse(content).unwrap(),
            vec![
                ("Zebra".to_string(), String::new()),
                ("Apple".to_string(), "Apfel".to_string()),
                ("Empty".to_string(), String::new()),
                ("42".to_string(), "Answer".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_empty_document() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("# only a comment\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_nested() {
        assert!(parse("- a\n- b\n").is_err());
        assert!(parse("a:\n  b: c\n").is_err());
    }

    #[test]
    fn test_render_keeps_order_and_header() {
        let catalog = Catalog::from_entries([("b", ""), ("a: colon", "x")]);
        let rendered = render(&catalog).unwrap();

        assert!(rendered.starts_with("# Message translations.\n"));
        let parsed = parse(&rendered).unwrap();
        assert_eq!(Catalog::from_entries(parsed), catalog);
    }
}
