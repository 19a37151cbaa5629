#![deny(missing_docs)]

//! # Export Command
//!
//! Compiles the API and writes the collection as one JSON document, the form
//! Bruno's "Import Collection" dialog accepts.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use wpc_core::{AppError, AppResult, CollectionDocument};

use crate::source::{build_collection, SourceArgs};

/// Output path meaning standard output.
pub const STDOUT_PATH: &str = "-";

/// Arguments for the export command.
#[derive(clap::Args, Debug, Clone)]
pub struct ExportArgs {
    /// Discovery options.
    #[clap(flatten)]
    pub source: SourceArgs,

    /// Output file, or `-` for stdout.
    #[clap(long, short, default_value = STDOUT_PATH)]
    pub output: PathBuf,
}

/// Executes the export.
pub fn execute(args: &ExportArgs) -> AppResult<()> {
    let document = build_collection(&args.source)?;
    let json = to_json(&document)?;

    if args.output.as_os_str() == STDOUT_PATH {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(json.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::General(format!("Failed to create output dir: {}", e)))?;
    }
    fs::write(&args.output, json)
        .map_err(|e| AppError::General(format!("Failed to write collection: {}", e)))?;

    tracing::info!(path = ?args.output, "exported collection");
    println!("Exported collection '{}' to {:?}", document.name, args.output);
    Ok(())
}

/// Pretty JSON with a trailing newline.
pub fn to_json(document: &CollectionDocument) -> AppResult<String> {
    let mut json = serde_json::to_string_pretty(document)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn test_execute_export() {
        let dir = tempdir().unwrap();
        let index = dir.path().join("index.json");
        fs::write(
            &index,
            r#"{"name": "Demo", "url": "https://demo.test", "routes": {
                "/wp/v2/tags": {"namespace": "wp/v2", "endpoints": [{"methods": ["GET"], "args": {}}]}
            }}"#,
        )
        .unwrap();

        let args = ExportArgs {
            source: SourceArgs {
                url: None,
                index_file: Some(index),
                name: Some("Tags".into()),
                username: None,
                password: None,
            },
            output: dir.path().join("nested").join("collection.json"),
        };
        execute(&args).unwrap();

        let value: Value =
            serde_json::from_str(&fs::read_to_string(&args.output).unwrap()).unwrap();
        assert_eq!(value["name"], "Tags");
        assert_eq!(value["version"], "1");
        assert_eq!(value["items"][0]["items"][0]["name"], "tags");
        assert_eq!(
            value["items"][0]["items"][0]["items"][0]["request"]["url"],
            "{{baseUrl}}/wp/v2/tags"
        );
        assert_eq!(value["environments"][0]["variables"][2]["secret"], true);
    }
}
