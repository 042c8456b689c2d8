use chrono::{NaiveTime, Weekday};

/// A prison's configured AM/PM/Evening period boundaries
///
/// A prison may carry several regime rows, each applying to a grouping of
/// days of the week. Gaps between one period's finish and the next period's
/// start are legal and expected; the time-slot resolver absorbs them when a
/// contiguous day coverage is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrisonRegime {
    pub prison_code: String,
    pub am_start: NaiveTime,
    pub am_finish: NaiveTime,
    pub pm_start: NaiveTime,
    pub pm_finish: NaiveTime,
    pub ed_start: NaiveTime,
    pub ed_finish: NaiveTime,
    pub days_of_week: Vec<Weekday>,
    /// Days an auto-suspended allocation may sit before it is considered expired
    pub max_days_to_expiry: u32,
}

impl PrisonRegime {
    pub fn applies_to(&self, day: Weekday) -> bool {
        self.days_of_week.contains(&day)
    }
}
