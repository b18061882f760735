// ============================================================
// UPLOAD ANSWER EXTRACTOR
// ============================================================
// Pull the authoritative answer out of an uploaded CSV or
// ZIP-of-CSV: first data row, column named "answer".

use crate::domain::error::{AppError, Result};
use csv::ReaderBuilder;
use std::io::{Cursor, Read};
use tracing::{debug, warn};
use zip::ZipArchive;

const ANSWER_COLUMN: &str = "answer";

/// Extract the answer field from an uploaded file. Every failure mode
/// (corrupt archive, malformed CSV, missing column, empty file) maps to
/// `None`; nothing here is allowed to reach the HTTP layer as an error.
pub fn extract_answer(content: &[u8], filename: &str) -> Option<String> {
    let csv_bytes = if has_extension(filename, ".zip") {
        match first_csv_in_archive(content) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(filename, "No CSV entry found in uploaded archive");
                return None;
            }
            Err(err) => {
                warn!(filename, error = %err, "Failed to read uploaded archive");
                return None;
            }
        }
    } else {
        content.to_vec()
    };

    match first_answer_field(&csv_bytes) {
        Ok(answer) => answer,
        Err(err) => {
            warn!(filename, error = %err, "Failed to parse uploaded CSV");
            None
        }
    }
}

fn has_extension(filename: &str, extension: &str) -> bool {
    filename.to_ascii_lowercase().ends_with(extension)
}

/// Scan archive entries in order and return the content of the first one
/// whose name ends with ".csv".
fn first_csv_in_archive(content: &[u8]) -> Result<Option<Vec<u8>>> {
    let mut archive = ZipArchive::new(Cursor::new(content))
        .map_err(|e| AppError::ParseError(format!("Failed to open archive: {}", e)))?;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| AppError::ParseError(format!("Failed to read archive entry: {}", e)))?;

        if !has_extension(entry.name(), ".csv") {
            continue;
        }

        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| AppError::ParseError(format!("Failed to decompress archive entry: {}", e)))?;
        return Ok(Some(bytes));
    }

    Ok(None)
}

/// Read the "answer" field of the first data row of a header-driven CSV.
/// `Ok(None)` when the column or the row is absent.
fn first_answer_field(content: &[u8]) -> Result<Option<String>> {
    let text = String::from_utf8_lossy(content);

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
        .clone();

    let answer_index = match headers.iter().position(|h| h == ANSWER_COLUMN) {
        Some(index) => index,
        None => return Ok(None),
    };

    let first_row = match reader.records().next() {
        Some(row) => row.map_err(|e| AppError::ParseError(format!("Failed to parse CSV row: {}", e)))?,
        None => return Ok(None),
    };

    Ok(first_row.get(answer_index).map(|value| value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer
                .start_file(name.to_string(), SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_bare_csv_first_row_answer() {
        let csv = b"answer\n7\n8\n";
        assert_eq!(extract_answer(csv, "data.csv"), Some("7".to_string()));
    }

    #[test]
    fn test_csv_with_multiple_columns() {
        let csv = b"id,answer\n1,99\n2,100\n";
        assert_eq!(extract_answer(csv, "data.csv"), Some("99".to_string()));
    }

    #[test]
    fn test_csv_missing_answer_column() {
        let csv = b"id,value\n1,99\n";
        assert_eq!(extract_answer(csv, "data.csv"), None);
    }

    #[test]
    fn test_csv_with_header_only() {
        let csv = b"id,answer\n";
        assert_eq!(extract_answer(csv, "data.csv"), None);
    }

    #[test]
    fn test_empty_file() {
        assert_eq!(extract_answer(b"", "data.csv"), None);
    }

    #[test]
    fn test_zip_with_csv_entry() {
        let archive = build_zip(&[("data.csv", b"id,answer\n1,99\n")]);
        assert_eq!(extract_answer(&archive, "upload.zip"), Some("99".to_string()));
    }

    #[test]
    fn test_zip_takes_first_csv_entry_in_order() {
        let archive = build_zip(&[
            ("readme.txt", b"not a csv"),
            ("first.csv", b"answer\nalpha\n"),
            ("second.csv", b"answer\nbeta\n"),
        ]);
        assert_eq!(extract_answer(&archive, "upload.zip"), Some("alpha".to_string()));
    }

    #[test]
    fn test_zip_without_csv_entry() {
        let archive = build_zip(&[("readme.txt", b"nothing to see")]);
        assert_eq!(extract_answer(&archive, "upload.zip"), None);
    }

    #[test]
    fn test_corrupt_zip() {
        assert_eq!(extract_answer(b"definitely not a zip", "upload.zip"), None);
    }

    #[test]
    fn test_zip_extension_is_case_insensitive() {
        let archive = build_zip(&[("data.csv", b"answer\n5\n")]);
        assert_eq!(extract_answer(&archive, "UPLOAD.ZIP"), Some("5".to_string()));
    }
}
