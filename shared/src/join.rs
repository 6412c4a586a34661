use serde::{Deserialize, Serialize};

use crate::dataset::{CaseDocument, IsoLookup, RawCount};

/// One country's count for one date, after the ISO join.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseRecord {
    pub country_code: String,
    pub date: String,
    pub cases: i64,
    /// Canonical feature id; `None` when the code is missing from the lookup.
    pub id: Option<String>,
}

/// Parse a textual count the way integer-prefix parsing does: optional leading
/// whitespace and sign, then as many digits as are present. Anything without
/// a leading integer is 0.
pub fn parse_case_count(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return 0;
    }

    let magnitude = rest[..digits_end]
        .bytes()
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add(i64::from(b - b'0')));
    if negative { -magnitude } else { magnitude }
}

fn normalize_count(raw: Option<&RawCount>) -> Option<i64> {
    match raw? {
        RawCount::Text(text) => {
            let trimmed = text.trim_start();
            let starts_numeric = trimmed
                .trim_start_matches(['+', '-'])
                .starts_with(|c: char| c.is_ascii_digit());
            starts_numeric.then(|| parse_case_count(trimmed))
        }
        RawCount::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|v| v.is_finite()).map(|v| v.trunc() as i64)),
        RawCount::Other(_) => None,
    }
}

/// Resolve canonical ids and normalize counts for every raw record.
pub fn join_records(doc: &CaseDocument, iso: &IsoLookup) -> Vec<CaseRecord> {
    let mut unmatched = 0usize;
    let mut malformed = 0usize;

    let records: Vec<CaseRecord> = doc
        .data
        .iter()
        .map(|raw| {
            let id = iso.get(&raw.countrycode).cloned();
            if id.is_none() {
                unmatched += 1;
            }
            let cases = normalize_count(raw.cases.as_ref()).unwrap_or_else(|| {
                malformed += 1;
                0
            });
            CaseRecord {
                country_code: raw.countrycode.clone(),
                date: raw.date.clone(),
                cases,
                id,
            }
        })
        .collect();

    if unmatched > 0 {
        tracing::debug!(unmatched, "case records without an iso lookup entry");
    }
    if malformed > 0 {
        tracing::warn!(malformed, "case counts without a numeric value were read as 0");
    }
    tracing::info!(records = records.len(), "joined case records");

    records
}
