use crate::join::CaseRecord;

/// Sequential blues, lightest to darkest.
pub const PALETTE: [&str; 10] = [
    "rgb(247,251,255)",
    "rgb(222,235,247)",
    "rgb(198,219,239)",
    "rgb(158,202,225)",
    "rgb(107,174,214)",
    "rgb(66,146,198)",
    "rgb(33,113,181)",
    "rgb(8,81,156)",
    "rgb(8,48,107)",
    "rgb(3,19,43)",
];

/// Fill for features with no record on the selected date.
pub const NO_DATA_FILL: &str = "#eee";

pub const BUCKETS: usize = PALETTE.len();

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub color: &'static str,
    pub lower_bound: f64,
}

/// Threshold scale over the global case-count range.
///
/// Thresholds are `min, min + step, .., min + 8 * step, max` with
/// `step = (max - min) / 9`. A value lands in bucket `k` when exactly `k + 1`
/// thresholds are at or below it, so everything under `min + step` is the
/// lightest color and everything at or above `max` is the darkest.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    min: i64,
    max: i64,
    thresholds: [f64; BUCKETS],
}

impl ColorScale {
    pub fn new(min: i64, max: i64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let step = (max as f64 - min as f64) / 9.0;
        let mut thresholds = [0.0; BUCKETS];
        for (k, t) in thresholds.iter_mut().enumerate().take(BUCKETS - 1) {
            *t = min as f64 + step * k as f64;
        }
        thresholds[BUCKETS - 1] = max as f64;
        Self {
            min,
            max,
            thresholds,
        }
    }

    /// Scale over every record of every date, so colors stay comparable across dates.
    pub fn from_records(records: &[CaseRecord]) -> Self {
        let mut counts = records.iter().map(|r| r.cases);
        let Some(first) = counts.next() else {
            tracing::warn!("no case records; color scale collapses to a single color");
            return Self::new(0, 0);
        };
        let (min, max) = counts.fold((first, first), |(lo, hi), c| (lo.min(c), hi.max(c)));
        tracing::debug!(min, max, "built color scale");
        Self::new(min, max)
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// All counts are identical; every value gets the darkest color.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    pub fn bucket(&self, cases: i64) -> usize {
        if self.is_degenerate() {
            return BUCKETS - 1;
        }
        let value = cases as f64;
        let at_or_below = self.thresholds.iter().filter(|t| **t <= value).count();
        at_or_below.saturating_sub(1).min(BUCKETS - 1)
    }

    pub fn color(&self, cases: i64) -> &'static str {
        PALETTE[self.bucket(cases)]
    }

    pub fn legend(&self) -> Vec<LegendEntry> {
        if self.is_degenerate() {
            return vec![LegendEntry {
                color: PALETTE[BUCKETS - 1],
                lower_bound: self.min as f64,
            }];
        }
        PALETTE
            .iter()
            .zip(self.thresholds.iter())
            .map(|(color, lower)| LegendEntry {
                color: *color,
                lower_bound: *lower,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{BUCKETS, ColorScale, NO_DATA_FILL, PALETTE};
    use crate::join::CaseRecord;

    fn record(id: &str, date: &str, cases: i64) -> CaseRecord {
        CaseRecord {
            country_code: id.to_string(),
            date: date.to_string(),
            cases,
            id: Some(id.to_string()),
        }
    }

    #[test]
    fn palette_is_fixed() {
        assert_eq!(PALETTE[0], "rgb(247,251,255)");
        assert_eq!(PALETTE[9], "rgb(3,19,43)");
        assert_eq!(NO_DATA_FILL, "#eee");
    }

    #[test]
    fn endpoints_map_to_lightest_and_darkest() {
        let scale = ColorScale::new(0, 100);
        assert_eq!(scale.color(0), PALETTE[0]);
        assert_eq!(scale.color(100), PALETTE[9]);
        assert_eq!(scale.color(250), PALETTE[9]);
        assert_eq!(scale.color(-5), PALETTE[0]);
    }

    #[test]
    fn buckets_are_monotonic() {
        let scale = ColorScale::new(3, 977);
        let mut last = 0;
        for cases in -10..1_100 {
            let bucket = scale.bucket(cases);
            assert!(bucket >= last, "bucket dropped at {cases}");
            assert!(bucket < BUCKETS);
            last = bucket;
        }
        assert_eq!(last, BUCKETS - 1);
    }

    #[test]
    fn first_bucket_covers_up_to_one_step() {
        let scale = ColorScale::new(0, 90);
        assert_eq!(scale.bucket(9), 0);
        assert_eq!(scale.bucket(10), 1);
        assert_eq!(scale.bucket(50), 5);
        assert_eq!(scale.bucket(89), 8);
        assert_eq!(scale.bucket(90), 9);
    }

    #[test]
    fn range_comes_from_every_date() {
        let records = vec![
            record("A", "2020-03-01", 5),
            record("B", "2020-03-02", 400),
            record("A", "2020-03-03", -2),
        ];
        let scale = ColorScale::from_records(&records);
        assert_eq!((scale.min(), scale.max()), (-2, 400));
    }

    #[test]
    fn equal_min_and_max_collapse_to_one_color() {
        let records = vec![record("A", "2020-03-01", 7), record("B", "2020-03-01", 7)];
        let scale = ColorScale::from_records(&records);
        assert!(scale.is_degenerate());
        for cases in [-1, 0, 7, 8] {
            assert_eq!(scale.color(cases), PALETTE[9]);
        }
        assert!(scale.thresholds.iter().all(|t| t.is_finite()));
        assert_eq!(scale.legend().len(), 1);
    }

    #[test]
    fn empty_records_do_not_panic() {
        let scale = ColorScale::from_records(&[]);
        assert!(scale.is_degenerate());
        assert_eq!(scale.color(0), PALETTE[9]);
    }

    #[test]
    fn legend_lists_every_bucket() {
        let legend = ColorScale::new(0, 90).legend();
        assert_eq!(legend.len(), BUCKETS);
        assert_eq!(legend[0].color, PALETTE[0]);
        assert_eq!(legend[1].lower_bound, 10.0);
        assert_eq!(legend[9].lower_bound, 90.0);
    }
}
