//! Key classification command.

use super::OutputFormat;
use glean::{GleanResult, JsonError, MediaKind, is_sidecar};
use serde_json::json;

/// Print the media kind of every key.
pub fn classify_keys(keys: &[String], format: OutputFormat) -> GleanResult<()> {
    println!("{}", render(keys, format)?);
    Ok(())
}

fn label(key: &str) -> &'static str {
    if is_sidecar(key) {
        "sidecar"
    } else {
        MediaKind::classify(key).as_str()
    }
}

fn render(keys: &[String], format: OutputFormat) -> GleanResult<String> {
    match format {
        OutputFormat::Human => Ok(keys
            .iter()
            .map(|key| format!("{}\t{}", label(key), key))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => {
            let entries: Vec<_> = keys
                .iter()
                .map(|key| json!({"key": key, "kind": label(key)}))
                .collect();
            serde_json::to_string_pretty(&entries)
                .map_err(|e| JsonError::new("classification", e).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_human_listing() {
        let out = render(
            &keys(&["a.JPG", "b.pdf", "c.mp4", "README", "a.JPG.metadata.json"]),
            OutputFormat::Human,
        )
        .unwrap();
        assert_eq!(
            out,
            "image\ta.JPG\npdf\tb.pdf\nvideo\tc.mp4\nunsupported\tREADME\nsidecar\ta.JPG.metadata.json"
        );
    }

    #[test]
    fn test_json_listing() {
        let out = render(&keys(&["x.png"]), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["key"], "x.png");
        assert_eq!(value[0]["kind"], "image");
    }
}
