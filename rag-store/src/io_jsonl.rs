//! JSONL reader for document corpora.
//!
//! One JSON object per line with at least a `text` field:
//! `{"id": "doc-1", "text": "...", "source": "manuals/pumps.md"}`.
//! Empty lines are ignored.

use std::io::{BufRead, BufReader};
use std::{fs::File, path::Path};

use tracing::{debug, info};

use crate::errors::RagError;
use crate::record::DocRecord;

/// Reads all documents from a JSONL file.
///
/// Rows without `id` get `line-<n>` (1-based) so logs can point at them.
///
/// # Errors
/// - [`RagError::Io`] if the file cannot be read.
/// - [`RagError::Parse`] if any non-empty line is not a valid document row.
pub fn read_documents(jsonl_path: impl AsRef<Path>) -> Result<Vec<DocRecord>, RagError> {
    info!("Reading document JSONL: {:?}", jsonl_path.as_ref());

    let file = File::open(jsonl_path.as_ref())?;
    let reader = BufReader::new(file);

    let mut out = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let mut doc: DocRecord = serde_json::from_str(&line)
            .map_err(|e| RagError::Parse(format!("line {} parse error: {}", i + 1, e)))?;
        if doc.id.is_none() {
            doc.id = Some(format!("line-{}", i + 1));
        }
        out.push(doc);
    }

    debug!("Loaded {} documents", out.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_rows_and_skips_blank_lines() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, r#"{{"id":"a","text":"Pump manual","source":"pumps.md"}}"#).unwrap();
        writeln!(f).unwrap();
        writeln!(f, r#"{{"text":"Valve guide"}}"#).unwrap();

        let docs = read_documents(f.path()).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id.as_deref(), Some("a"));
        assert_eq!(docs[0].source.as_deref(), Some("pumps.md"));
        assert_eq!(docs[1].id.as_deref(), Some("line-3"));
        assert_eq!(docs[1].text, "Valve guide");
    }

    #[test]
    fn malformed_row_reports_line_number() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, r#"{{"text":"ok"}}"#).unwrap();
        writeln!(f, r#"{{"title":"no text"}}"#).unwrap();

        let err = read_documents(f.path()).unwrap_err();
        match err {
            RagError::Parse(msg) => assert!(msg.starts_with("line 2")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_documents("/definitely/not/here.jsonl").unwrap_err();
        assert!(matches!(err, RagError::Io(_)));
    }
}
