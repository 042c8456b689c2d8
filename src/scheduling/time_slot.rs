//! # Time-Slot Resolution
//!
//! Maps clock times onto the canonical AM/PM/ED periods. Two classification
//! paths exist: a fixed, prison-independent hour rule used when no regime is
//! available, and a regime-aware rule that honours a prison's configured
//! period boundaries per day-of-week grouping.
//!
//! When a contiguous time range is needed for filtering, the dead gaps a
//! regime leaves between one period's finish and the next period's start are
//! absorbed into the previous period's range, giving non-overlapping
//! coverage of the whole day. This is deliberate: regimes with gaps are
//! valid configuration, not errors.

use std::fmt;
use std::sync::Arc;

use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{ActivitiesError, Result};
use crate::models::PrisonRegime;
use crate::repository::PrisonRegimeRepository;

/// Coarse period-of-day classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeSlot {
    Am,
    Pm,
    Ed,
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Am => write!(f, "AM"),
            Self::Pm => write!(f, "PM"),
            Self::Ed => write!(f, "ED"),
        }
    }
}

impl std::str::FromStr for TimeSlot {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "AM" => Ok(Self::Am),
            "PM" => Ok(Self::Pm),
            "ED" => Ok(Self::Ed),
            _ => Err(format!("Invalid time slot: {s}")),
        }
    }
}

/// Fixed, prison-independent classification used when no regime is available
///
/// Hours 0-11 are AM, 12-16 PM, 17-23 ED.
pub fn classify(time: NaiveTime) -> TimeSlot {
    match time.hour() {
        0..=11 => TimeSlot::Am,
        12..=16 => TimeSlot::Pm,
        _ => TimeSlot::Ed,
    }
}

// One minute before midnight; the upper bound of the ED range
fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).expect("23:59 is a valid time")
}

/// Regime-aware slot resolution for a prison
pub struct TimeSlotResolver {
    regimes: Arc<dyn PrisonRegimeRepository>,
}

impl TimeSlotResolver {
    pub fn new(regimes: Arc<dyn PrisonRegimeRepository>) -> Self {
        Self { regimes }
    }

    /// Contiguous time range covered by a slot under the prison's regime
    ///
    /// AM runs from midnight to PM start, PM from PM start to ED start, and
    /// ED from ED start to one minute before midnight, absorbing any
    /// configured gaps into the previous slot. Prisons whose regimes vary by
    /// day-of-week use the first configured row for range computation;
    /// day-sensitive classification goes through [`Self::slot_for_day_and_time`].
    pub async fn slot_time_range(
        &self,
        prison_code: &str,
        slot: TimeSlot,
    ) -> Result<(NaiveTime, NaiveTime)> {
        let regimes = self.regimes.find_by_prison_code(prison_code).await?;
        let regime = regimes
            .first()
            .ok_or_else(|| ActivitiesError::regime_not_found(prison_code))?;

        Ok(Self::range_for(regime, slot))
    }

    /// Classify a time against the regime applicable to the given day
    pub async fn slot_for_day_and_time(
        &self,
        prison_code: &str,
        day_of_week: Weekday,
        time: NaiveTime,
    ) -> Result<TimeSlot> {
        let regimes = self.regimes.find_by_prison_code(prison_code).await?;
        let regime = regimes
            .iter()
            .find(|r| r.applies_to(day_of_week))
            .ok_or_else(|| ActivitiesError::regime_not_found(prison_code))?;

        Ok(if time < regime.pm_start {
            TimeSlot::Am
        } else if time < regime.ed_start {
            TimeSlot::Pm
        } else {
            TimeSlot::Ed
        })
    }

    fn range_for(regime: &PrisonRegime, slot: TimeSlot) -> (NaiveTime, NaiveTime) {
        match slot {
            TimeSlot::Am => (NaiveTime::MIN, regime.pm_start),
            TimeSlot::Pm => (regime.pm_start, regime.ed_start),
            TimeSlot::Ed => (regime.ed_start, end_of_day()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::InMemoryPrisonRegimeRepository;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn regime(days: Vec<Weekday>, pm_start: NaiveTime, ed_start: NaiveTime) -> PrisonRegime {
        PrisonRegime {
            prison_code: "MDI".to_string(),
            am_start: time(9, 0),
            am_finish: time(11, 30),
            pm_start,
            pm_finish: time(16, 45),
            ed_start,
            ed_finish: time(19, 15),
            days_of_week: days,
            max_days_to_expiry: 21,
        }
    }

    #[test]
    fn test_fixed_classification_boundaries() {
        assert_eq!(classify(time(11, 59)), TimeSlot::Am);
        assert_eq!(classify(time(12, 0)), TimeSlot::Pm);
        assert_eq!(classify(time(16, 59)), TimeSlot::Pm);
        assert_eq!(classify(time(17, 0)), TimeSlot::Ed);
        assert_eq!(classify(time(0, 0)), TimeSlot::Am);
        assert_eq!(classify(time(23, 59)), TimeSlot::Ed);
    }

    #[tokio::test]
    async fn test_slot_ranges_absorb_regime_gaps() {
        let repository = Arc::new(InMemoryPrisonRegimeRepository::new(vec![regime(
            vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun,
            ],
            time(13, 45),
            time(17, 30),
        )]));
        let resolver = TimeSlotResolver::new(repository);

        // The 11:30-13:45 dead gap lands inside AM, the 16:45-17:30 gap inside PM
        assert_eq!(
            resolver.slot_time_range("MDI", TimeSlot::Am).await.unwrap(),
            (NaiveTime::MIN, time(13, 45))
        );
        assert_eq!(
            resolver.slot_time_range("MDI", TimeSlot::Pm).await.unwrap(),
            (time(13, 45), time(17, 30))
        );
        assert_eq!(
            resolver.slot_time_range("MDI", TimeSlot::Ed).await.unwrap(),
            (time(17, 30), time(23, 59))
        );
    }

    #[tokio::test]
    async fn test_regime_aware_classification_uses_actual_boundaries() {
        let weekday_regime = regime(
            vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            time(13, 45),
            time(17, 30),
        );
        let weekend_regime = regime(vec![Weekday::Sat, Weekday::Sun], time(14, 30), time(18, 0));

        let repository = Arc::new(InMemoryPrisonRegimeRepository::new(vec![
            weekday_regime,
            weekend_regime,
        ]));
        let resolver = TimeSlotResolver::new(repository);

        // 14:00 is PM on a weekday but still AM on the weekend regime
        assert_eq!(
            resolver
                .slot_for_day_and_time("MDI", Weekday::Wed, time(14, 0))
                .await
                .unwrap(),
            TimeSlot::Pm
        );
        assert_eq!(
            resolver
                .slot_for_day_and_time("MDI", Weekday::Sat, time(14, 0))
                .await
                .unwrap(),
            TimeSlot::Am
        );
        assert_eq!(
            resolver
                .slot_for_day_and_time("MDI", Weekday::Sat, time(18, 0))
                .await
                .unwrap(),
            TimeSlot::Ed
        );
    }

    #[tokio::test]
    async fn test_missing_regime_is_an_error() {
        let repository = Arc::new(InMemoryPrisonRegimeRepository::new(vec![]));
        let resolver = TimeSlotResolver::new(repository);

        assert!(matches!(
            resolver.slot_time_range("XXX", TimeSlot::Am).await,
            Err(ActivitiesError::RegimeNotFound { .. })
        ));
    }

    #[test]
    fn test_slot_string_conversion() {
        assert_eq!(TimeSlot::Ed.to_string(), "ED");
        assert_eq!("PM".parse::<TimeSlot>().unwrap(), TimeSlot::Pm);
        assert!("EVENING".parse::<TimeSlot>().is_err());
    }
}
