use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::join::CaseRecord;

const YEAR_FIRST_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
// Two-digit years first: `%Y` would happily read "20" as year 20.
const MONTH_FIRST_FORMATS: &[&str] = &["%m/%d/%y", "%m/%d/%Y"];

/// Parse a date string in any of the forms the case feeds are known to use.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let year_first = raw
        .split(['-', '/'])
        .next()
        .is_some_and(|head| head.len() == 4);
    let formats = if year_first {
        YEAR_FIRST_FORMATS
    } else {
        MONTH_FIRST_FORMATS
    };
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Distinct dates of the joined dataset in calendar order.
///
/// Two spellings of the same calendar day ("2020-03-01", "3/1/2020") share
/// one slot, named by the first spelling seen. Strings that do not parse
/// are distinct by their raw text and sort after every real date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateIndex {
    dates: Vec<String>,
}

impl DateIndex {
    pub fn from_records(records: &[CaseRecord]) -> Self {
        let mut seen_days = HashSet::new();
        let mut seen_raw = HashSet::new();
        let mut keyed: Vec<(Option<NaiveDate>, &str)> = records
            .iter()
            .filter_map(|r| {
                let day = parse_calendar_date(&r.date);
                let fresh = match day {
                    Some(day) => seen_days.insert(day),
                    None => seen_raw.insert(r.date.as_str()),
                };
                fresh.then_some((day, r.date.as_str()))
            })
            .collect();

        let unparsed = keyed.iter().filter(|(date, _)| date.is_none()).count();
        if unparsed > 0 {
            tracing::warn!(unparsed, "dates that are not calendar dates sort last");
        }

        keyed.sort_by(|(a, raw_a), (b, raw_b)| {
            a.is_none()
                .cmp(&b.is_none())
                .then(a.cmp(b))
                .then(raw_a.cmp(raw_b))
        });

        Self {
            dates: keyed.into_iter().map(|(_, raw)| raw.to_string()).collect(),
        }
    }

    /// Rewrite each record's date to the spelling this index uses for that
    /// day, so string matching against a selected date sees every record.
    pub fn canonicalize(&self, records: &mut [CaseRecord]) {
        let by_day: HashMap<NaiveDate, &str> = self
            .dates
            .iter()
            .filter_map(|d| parse_calendar_date(d).map(|day| (day, d.as_str())))
            .collect();
        let mut rewritten = 0usize;
        for record in records.iter_mut() {
            let Some(canonical) = parse_calendar_date(&record.date).and_then(|day| by_day.get(&day)) else {
                continue;
            };
            if record.date != *canonical {
                record.date = canonical.to_string();
                rewritten += 1;
            }
        }
        if rewritten > 0 {
            tracing::debug!(rewritten, "case records re-keyed to a shared date spelling");
        }
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.dates.get(index).map(String::as_str)
    }

    /// Earliest date; the selection starts here.
    pub fn initial(&self) -> Option<&str> {
        self.get(0)
    }

    pub fn last_index(&self) -> Option<usize> {
        self.dates.len().checked_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{DateIndex, parse_calendar_date};
    use crate::join::CaseRecord;

    fn records(dates: &[&str]) -> Vec<CaseRecord> {
        dates
            .iter()
            .map(|date| CaseRecord {
                country_code: "A".to_string(),
                date: date.to_string(),
                cases: 1,
                id: Some("AAA".to_string()),
            })
            .collect()
    }

    #[test]
    fn parses_supported_forms() {
        let expected = NaiveDate::from_ymd_opt(2020, 3, 1);
        assert_eq!(parse_calendar_date("2020-03-01"), expected);
        assert_eq!(parse_calendar_date("2020/03/01"), expected);
        assert_eq!(parse_calendar_date("3/1/2020"), expected);
        assert_eq!(parse_calendar_date("3/1/20"), expected);
        assert_eq!(parse_calendar_date("2020-03-01T12:00:00Z"), expected);
        assert_eq!(parse_calendar_date("2020-03-01T12:00:00"), expected);
        assert_eq!(parse_calendar_date("yesterday"), None);
    }

    #[test]
    fn sorts_by_calendar_not_by_string() {
        let index = DateIndex::from_records(&records(&["3/10/2020", "3/9/2020", "12/1/2019"]));
        assert_eq!(index.dates(), &["12/1/2019", "3/9/2020", "3/10/2020"]);
    }

    #[test]
    fn strictly_ascending_without_duplicates() {
        let index = DateIndex::from_records(&records(&[
            "2020-03-03",
            "2020-03-01",
            "2020-03-03",
            "2020-03-02",
            "2020-03-01",
        ]));
        assert_eq!(index.len(), 3);
        let parsed: Vec<NaiveDate> = index
            .dates()
            .iter()
            .filter_map(|d| parse_calendar_date(d))
            .collect();
        assert!(parsed.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(index.initial(), Some("2020-03-01"));
    }

    #[test]
    fn unparseable_dates_go_last() {
        let index = DateIndex::from_records(&records(&["zzz", "2020-01-02", "aaa", "2020-01-01"]));
        assert_eq!(index.dates(), &["2020-01-01", "2020-01-02", "aaa", "zzz"]);
    }

    #[test]
    fn empty_index_has_no_initial_selection() {
        let index = DateIndex::from_records(&[]);
        assert!(index.is_empty());
        assert_eq!(index.initial(), None);
        assert_eq!(index.last_index(), None);
    }

    #[test]
    fn lookups_by_position() {
        let index = DateIndex::from_records(&records(&["2020-01-02", "2020-01-01"]));
        assert_eq!(index.get(1), Some("2020-01-02"));
        assert_eq!(index.get(2), None);
        assert_eq!(index.last_index(), Some(1));
    }

    #[test]
    fn spellings_of_one_day_share_a_slot() {
        let index = DateIndex::from_records(&records(&["2020-03-01", "3/1/2020", "3/2/20"]));
        assert_eq!(index.dates(), &["2020-03-01", "3/2/20"]);
    }

    #[test]
    fn canonicalize_rekeys_records_to_the_index_spelling() {
        let mut recs = records(&["2020-03-01", "3/1/2020", "zzz"]);
        let index = DateIndex::from_records(&recs);
        index.canonicalize(&mut recs);
        let dates: Vec<&str> = recs.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2020-03-01", "2020-03-01", "zzz"]);
    }
}
