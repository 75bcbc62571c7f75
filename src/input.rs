//! Reads the list of landing pages to analyse from a CSV file.

use crate::error::{ExtractError, Result};
use crate::results::FeatureValue;
use crate::utils::normalize_input_url;
use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::path::Path;

/// Header names accepted for the URL column, after [`normalize_header`]
pub const URL_HEADERS: [&str; 6] = ["url", "landing_page", "page_url", "landingpage", "lp", "lp_url"];

/// Target columns carried into the record: (record key, accepted headers)
pub const TARGET_HEADERS: [(&str, &[&str]); 3] = [
    ("vcvr", &["vcvr", "conversion_rate", "cvr", "conv_rate"]),
    ("rank", &["rank", "semrush_rank", "domain_rank"]),
    ("clicks", &["clicks"]),
];

/// One page to analyse
#[derive(Debug, Clone, PartialEq)]
pub struct InputRow {
    pub url: String,
    /// Known target variables from the input, keyed by record key
    pub targets: BTreeMap<String, FeatureValue>,
}

impl InputRow {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            targets: BTreeMap::new(),
        }
    }
}

/// Lowercase, trimmed, with spaces and dashes turned into underscores
pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .trim_start_matches('\u{feff}')
        .to_lowercase()
        .replace([' ', '-'], "_")
}

/// Reads input rows from a CSV file
pub fn read_input<P: AsRef<Path>>(path: P) -> Result<Vec<InputRow>> {
    let file = std::fs::File::open(path)?;
    read_from(file)
}

/// Reads input rows from any CSV source; duplicate URLs are dropped
pub fn read_from<R: Read>(reader: R) -> Result<Vec<InputRow>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = csv_reader.headers()?.iter().map(normalize_header).collect();

    let url_column = headers
        .iter()
        .position(|h| URL_HEADERS.contains(&h.as_str()))
        .ok_or_else(|| ExtractError::MissingUrlColumn(URL_HEADERS.join(", ")))?;

    let target_columns: Vec<(&str, usize)> = TARGET_HEADERS
        .iter()
        .filter_map(|(key, aliases)| {
            headers
                .iter()
                .position(|h| aliases.contains(&h.as_str()))
                .map(|idx| (*key, idx))
        })
        .collect();

    let mut rows = Vec::new();
    let mut seen = HashSet::new();
    for (line, record) in csv_reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                ::log::warn!("Skipping unreadable input row {}: {}", line + 2, e);
                continue;
            }
        };
        let Some(url) = record.get(url_column).and_then(normalize_input_url) else {
            ::log::warn!("Skipping input row {} without a URL", line + 2);
            continue;
        };
        if !seen.insert(url.clone()) {
            ::log::debug!("Skipping duplicate input URL {}", url);
            continue;
        }

        let mut row = InputRow::new(&url);
        for (key, idx) in &target_columns {
            if let Some(value) = record.get(*idx).and_then(parse_target) {
                row.targets.insert((*key).to_string(), value);
            }
        }
        rows.push(row);
    }

    ::log::info!("Read {} URLs from input", rows.len());
    Ok(rows)
}

fn parse_target(raw: &str) -> Option<FeatureValue> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(v) = raw.parse::<i64>() {
        return Some(FeatureValue::Int(v));
    }
    match raw.replace(',', ".").trim_end_matches('%').parse::<f64>() {
        Ok(v) => Some(FeatureValue::Float(v)),
        Err(_) => Some(FeatureValue::Text(raw.to_string())),
    }
}
