use std::fs;
use std::path::Path;

use crate::clean::clean_text;
use crate::PrepError;

/// Recognized subject column names, in priority order.
pub const SUBJECT_CANDIDATES: [&str; 4] = ["subject", "title", "title_text", "ticket_subject"];
/// Recognized body column names, in priority order.
pub const BODY_CANDIDATES: [&str; 4] = ["text", "body", "description", "ticket_body"];
/// Category assigned when the export carries no category or label column.
pub const UNLABELED_CATEGORY: &str = "unlabeled";

/// What `prepare_corpus` detected and produced, for operator output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepSummary {
    pub rows: usize,
    pub subject_column: Option<String>,
    pub body_column: Option<String>,
    pub category_column: Option<String>,
}

fn find_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|c| headers.iter().position(|h| h == c))
}

/// Decode a raw export with an optional explicit encoding.
/// Supported: "utf-8" (default), "shift_jis" (aliases: "sjis", "cp932",
/// "windows-31j"), "windows-1252", "utf-16le", "utf-16be". Unknown values
/// fall back to UTF-8 (lossy).
fn decode_bytes(bytes: &[u8], encoding: Option<&str>) -> String {
    let lower = encoding.unwrap_or("").to_ascii_lowercase();
    match lower.as_str() {
        "utf-8" | "utf8" | "" => String::from_utf8_lossy(bytes).to_string(),
        "shift_jis" | "sjis" | "cp932" | "windows-31j" => {
            let (cow, _enc_used, _had_errors) = encoding_rs::SHIFT_JIS.decode(bytes);
            cow.into_owned()
        }
        "windows-1252" | "cp1252" => {
            let (cow, _enc_used, _had_errors) = encoding_rs::WINDOWS_1252.decode(bytes);
            cow.into_owned()
        }
        "utf-16le" => {
            let (cow, _enc_used, _had_errors) = encoding_rs::UTF_16LE.decode(bytes);
            cow.into_owned()
        }
        "utf-16be" => {
            let (cow, _enc_used, _had_errors) = encoding_rs::UTF_16BE.decode(bytes);
            cow.into_owned()
        }
        _ => String::from_utf8_lossy(bytes).to_string(),
    }
}

fn get_field<'r>(row: &'r csv::StringRecord, idx: Option<usize>) -> Option<&'r str> {
    idx.and_then(|i| row.get(i))
}

fn ensure_column(headers: &mut Vec<String>, name: &str) -> usize {
    match headers.iter().position(|h| h == name) {
        Some(i) => i,
        None => {
            headers.push(name.to_string());
            headers.len() - 1
        }
    }
}

/// Turn a raw ticket export into the processed corpus CSV the indexer
/// consumes: the original columns plus `text` (subject + body synthesis),
/// `text_clean`, and `Category`.
pub fn prepare_corpus<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    encoding: Option<&str>,
) -> Result<PrepSummary, PrepError> {
    let bytes = fs::read(input.as_ref()).map_err(|e| PrepError::Io(e.to_string()))?;
    let decoded = decode_bytes(&bytes, encoding);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(decoded.as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| PrepError::Csv(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let subject_idx = find_column(&headers, &SUBJECT_CANDIDATES);
    let body_idx = find_column(&headers, &BODY_CANDIDATES);
    let category_idx = headers
        .iter()
        .position(|h| h == "category")
        .or_else(|| headers.iter().position(|h| h == "label"));

    let mut out_headers = headers.clone();
    let text_out = ensure_column(&mut out_headers, "text");
    let clean_out = ensure_column(&mut out_headers, "text_clean");
    let category_out = ensure_column(&mut out_headers, "Category");

    let mut writer = csv::WriterBuilder::new()
        .from_path(output.as_ref())
        .map_err(|e| PrepError::Csv(e.to_string()))?;
    writer
        .write_record(&out_headers)
        .map_err(|e| PrepError::Csv(e.to_string()))?;

    let mut rows = 0usize;
    for row in reader.records() {
        let row = row.map_err(|e| PrepError::Csv(e.to_string()))?;
        let mut values: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        values.resize(out_headers.len(), String::new());

        let text = match (get_field(&row, subject_idx), get_field(&row, body_idx)) {
            (Some(subject), Some(body)) => format!("{subject} {body}"),
            (None, Some(body)) => body.to_string(),
            _ => row.iter().collect::<Vec<_>>().join(" "),
        };
        let category = get_field(&row, category_idx)
            .map(str::to_string)
            .unwrap_or_else(|| UNLABELED_CATEGORY.to_string());

        values[clean_out] = clean_text(&text);
        values[text_out] = text;
        values[category_out] = category;
        writer
            .write_record(&values)
            .map_err(|e| PrepError::Csv(e.to_string()))?;
        rows += 1;
    }
    writer.flush().map_err(|e| PrepError::Io(e.to_string()))?;

    Ok(PrepSummary {
        rows,
        subject_column: subject_idx.map(|i| headers[i].clone()),
        body_column: body_idx.map(|i| headers[i].clone()),
        category_column: category_idx.map(|i| headers[i].clone()),
    })
}
