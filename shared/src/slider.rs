use std::ops::RangeInclusive;

use crate::config::TICK_LABEL_EVERY;
use crate::date_index::DateIndex;

/// Index range the date slider can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderDomain {
    pub min: usize,
    pub max: usize,
}

impl SliderDomain {
    /// `None` when there are no dates to scrub through.
    pub fn for_dates(dates: &DateIndex) -> Option<Self> {
        dates.last_index().map(|max| Self { min: 0, max })
    }

    pub fn ticks(&self) -> RangeInclusive<usize> {
        self.min..=self.max
    }
}

/// Label for the tick at `index`: only every tenth tick (by 1-based
/// position) is labeled, so the axis does not turn into a smear of dates.
pub fn tick_label(dates: &DateIndex, index: usize) -> Option<&str> {
    if (index + 1) % TICK_LABEL_EVERY != 0 {
        return None;
    }
    dates.get(index)
}

/// Full date shown next to the slider handle.
pub fn display_label(dates: &DateIndex, index: usize) -> &str {
    dates.get(index).unwrap_or_default()
}
