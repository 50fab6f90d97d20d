//! Tab-separated review dataset parsing.

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use crate::domain::entities::{LoadReport, ReviewCorpus};
use crate::domain::error::LoadError;

/// Header name (case-insensitive) of the column holding review bodies.
pub const TEXT_COLUMN: &str = "text";

const BOM: char = '\u{feff}';

/// Parse tab-separated text with a header row into a corpus.
///
/// Rows whose field count differs from the header are malformed: they are
/// logged and counted, and their text field is still used when present. A
/// missing text field counts as blank.
pub fn parse_tsv(text: &str) -> Result<(ReviewCorpus, LoadReport), LoadError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| LoadError::MissingColumn {
            headers: format!("<unreadable header: {e}>"),
        })?
        .clone();

    let column = find_text_column(&headers).ok_or_else(|| LoadError::MissingColumn {
        headers: headers.iter().collect::<Vec<_>>().join(", "),
    })?;
    debug!("parse_tsv: text column at index {}", column);

    let mut report = LoadReport::default();
    let mut reviews = Vec::new();

    for (line, record) in reader.records().enumerate() {
        let row = line + 2;
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                warn!("skipping unreadable row {}: {}", row, e);
                report.malformed += 1;
                continue;
            }
        };
        report.rows += 1;

        if record.len() != headers.len() {
            warn!(
                "malformed row {}: {} fields, header has {}",
                row,
                record.len(),
                headers.len()
            );
            report.malformed += 1;
        }

        let value = record.get(column).unwrap_or_default();
        if value.trim().is_empty() {
            report.blank += 1;
            continue;
        }
        reviews.push(value.to_string());
    }

    if reviews.is_empty() {
        return Err(LoadError::Empty);
    }
    report.kept = reviews.len();

    Ok((ReviewCorpus::new(reviews), report))
}

fn find_text_column(headers: &StringRecord) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches(BOM).trim().eq_ignore_ascii_case(TEXT_COLUMN))
}
