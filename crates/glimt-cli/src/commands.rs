//! Subcommand implementations.

use std::io::Read;
use std::path::Path;

use clap::ValueEnum;
use glimt_core::{Error, Result};
use glimt_iiif::{map_snippets, render_v1, render_v2, MapRequest};
use glimt_solr::{build_fragment, wrap_join, FragmentRequest};
use serde::de::DeserializeOwned;

/// Output format for the `map` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The full `MapOutcome` record.
    Raw,
    /// IIIF Content Search API v1 annotations.
    V1,
    /// IIIF Content Search API v2 annotations.
    V2,
}

/// Loads a JSON request document from a file, or stdin for `-`.
fn load_request<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&text)?)
}

/// Runs the fragment builder against a request document.
pub fn run_fragment(path: &Path, raw: bool, join: Option<&str>) -> Result<String> {
    let request: FragmentRequest = load_request(path)?;
    let fragment = build_fragment(&request)?;

    if !fragment.skipped.is_empty() {
        tracing::warn!(skipped = fragment.skipped.count(), "fields skipped");
    }

    if let Some(spec) = join {
        let (from, to) = spec.split_once(',').ok_or_else(|| {
            Error::validation_field("join", format!("expected \"from,to\", got {spec:?}"))
        })?;
        return Ok(wrap_join(&fragment, from.trim(), to.trim()));
    }

    if raw {
        Ok(fragment.query)
    } else {
        Ok(serde_json::to_string_pretty(&fragment)?)
    }
}

/// Runs the snippet mapper against a request document.
pub fn run_map(path: &Path, format: OutputFormat, base_id: &str) -> Result<String> {
    let request: MapRequest = load_request(path)?;
    let outcome = map_snippets(&request)?;

    if !outcome.skipped.is_empty() {
        tracing::warn!(skipped = outcome.skipped.count(), "snippets skipped");
    }

    let json = match format {
        OutputFormat::Raw => serde_json::to_string_pretty(&outcome)?,
        OutputFormat::V1 => {
            serde_json::to_string_pretty(&render_v1(&outcome, &request.table, base_id))?
        }
        OutputFormat::V2 => {
            serde_json::to_string_pretty(&render_v2(&outcome, &request.table, base_id))?
        }
    };
    Ok(json)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_request(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    const FRAGMENT_REQUEST: &str = r#"{
        "fields": ["fulltext"],
        "table": {"fulltext": {"variants": [{"name": "tm_fulltext", "boost": 2.5}]}},
        "terms": {"terms": [{"value": "lighthouse"}]}
    }"#;

    #[test]
    fn test_run_fragment_raw() {
        let file = write_request(FRAGMENT_REQUEST);
        let out = run_fragment(file.path(), true, None).unwrap();
        assert_eq!(out, "{!edismax qf='tm_fulltext^2.5'}lighthouse");
    }

    #[test]
    fn test_run_fragment_json_includes_audit_fields() {
        let file = write_request(FRAGMENT_REQUEST);
        let out = run_fragment(file.path(), false, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["negation_removed"], false);
        assert_eq!(value["skipped"]["count"], 0);
    }

    #[test]
    fn test_run_fragment_join_wrapper() {
        let file = write_request(FRAGMENT_REQUEST);
        let out = run_fragment(file.path(), false, Some("its_parent_id,its_nid")).unwrap();
        assert!(out.starts_with("{!join from=its_parent_id to=its_nid v='"));
    }

    #[test]
    fn test_run_fragment_bad_join_spec() {
        let file = write_request(FRAGMENT_REQUEST);
        let err = run_fragment(file.path(), false, Some("nocomma")).unwrap_err();
        assert!(err.is_config());
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_run_fragment_empty_table_fails() {
        let file = write_request(r#"{"fields": [], "table": {}, "terms": {"terms": []}}"#);
        let err = run_fragment(file.path(), true, None).unwrap_err();
        assert!(err.is_config());
    }

    const MAP_REQUEST: &str = r#"{
        "snippets": [{
            "image_uri": "s3://b/p1.tiff",
            "text": "a <em>x</em> b",
            "hits": [{
                "text": "x",
                "coords": {
                    "system": "absolute",
                    "bbox": {"left": 100.0, "top": 50.0, "right": 700.0, "bottom": 550.0},
                    "page_width": 800,
                    "page_height": 600
                }
            }]
        }],
        "table": {
            "canvases": [{"id": "c1", "width": 800, "height": 600}],
            "images": [{"image": "s3://b/p1.tiff", "canvases": ["c1"]}]
        }
    }"#;

    #[test]
    fn test_run_map_raw() {
        let file = write_request(MAP_REQUEST);
        let out = run_map(file.path(), OutputFormat::Raw, "base").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["hits"][0]["bbox"]["left"], 0.125);
        assert_eq!(value["hits"][0]["page"], 1);
    }

    #[test]
    fn test_run_map_v2_annotations() {
        let file = write_request(MAP_REQUEST);
        let out = run_map(file.path(), OutputFormat::V2, "base").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["type"], "Annotation");
        assert_eq!(value[0]["target"], "c1#xywh=100,50,600,500");
    }

    #[test]
    fn test_missing_request_file_is_io_error() {
        let err = run_fragment(Path::new("/nonexistent/req.json"), true, None).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
