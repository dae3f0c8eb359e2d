//! Trip phase and countdown for a given day.
//!
//! Four contiguous intervals cover every calendar date:
//!
//! ```text
//!   pretrip  | first leg (incl.) | second leg (incl.) | posttrip
//! ----------[first.start   first.end][second.start  second.end]---------->
//! ```
//!
//! `TripCalendar::new` refuses calendars with gaps or overlaps, so `stage`
//! has no fallback branch.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoyageError};

/// One contiguous stay at a single destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Leg {
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Lower-case, dash-separated form of the leg name (`"Mykonos"` -> `"mykonos"`).
    pub fn slug(&self) -> String {
        self.name
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// The fixed milestones of the trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripCalendar {
    first_leg: Leg,
    second_leg: Leg,
    homecoming: NaiveDate,
}

impl TripCalendar {
    /// Build a calendar, checking that the legs are ordered and contiguous.
    ///
    /// # Errors
    ///
    /// Returns `VoyageError::Config` if a leg ends before it starts, the
    /// second leg does not begin the day after the first ends, or homecoming
    /// is not after the second leg.
    pub fn new(first_leg: Leg, second_leg: Leg, homecoming: NaiveDate) -> Result<Self> {
        for leg in [&first_leg, &second_leg] {
            if leg.end < leg.start {
                return Err(VoyageError::Config(format!(
                    "Leg {} ends ({}) before it starts ({})",
                    leg.name, leg.end, leg.start
                )));
            }
        }
        if first_leg.end.succ_opt() != Some(second_leg.start) {
            return Err(VoyageError::Config(format!(
                "Second leg must start the day after the first ends ({} then {})",
                first_leg.end, second_leg.start
            )));
        }
        if homecoming <= second_leg.end {
            return Err(VoyageError::Config(format!(
                "Homecoming ({}) must be after the second leg ends ({})",
                homecoming, second_leg.end
            )));
        }
        Ok(Self {
            first_leg,
            second_leg,
            homecoming,
        })
    }

    pub fn first_leg(&self) -> &Leg {
        &self.first_leg
    }

    pub fn second_leg(&self) -> &Leg {
        &self.second_leg
    }

    pub fn homecoming(&self) -> NaiveDate {
        self.homecoming
    }
}

impl Default for TripCalendar {
    /// Mykonos then Marrakech, May 2026.
    fn default() -> Self {
        let date = |day| NaiveDate::from_ymd_opt(2026, 5, day).unwrap_or_default();
        Self {
            first_leg: Leg::new("Mykonos", date(14), date(20)),
            second_leg: Leg::new("Marrakech", date(21), date(27)),
            homecoming: date(28),
        }
    }
}

/// Coarse trip phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StageTag {
    Pretrip,
    FirstLeg,
    SecondLeg,
    Posttrip,
}

impl StageTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pretrip => "pretrip",
            Self::FirstLeg => "firstLeg",
            Self::SecondLeg => "secondLeg",
            Self::Posttrip => "posttrip",
        }
    }

    /// Visual theme name for this stage.
    pub fn theme(&self, calendar: &TripCalendar) -> String {
        match self {
            Self::Pretrip => "pretrip".to_string(),
            Self::FirstLeg => calendar.first_leg.slug(),
            Self::SecondLeg => calendar.second_leg.slug(),
            Self::Posttrip => "posttrip".to_string(),
        }
    }
}

/// What the home view shows for a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageView {
    pub kicker: String,
    pub countdown_days: i64,
    pub tag: StageTag,
}

/// Resolve the trip phase for `today`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use voyage_core::stage::{stage, StageTag, TripCalendar};
///
/// let today = NaiveDate::from_ymd_opt(2026, 5, 10).unwrap();
/// let view = stage(today, &TripCalendar::default());
/// assert_eq!(view.tag, StageTag::Pretrip);
/// assert_eq!(view.countdown_days, 4);
/// ```
pub fn stage(today: NaiveDate, calendar: &TripCalendar) -> StageView {
    let first = &calendar.first_leg;
    let second = &calendar.second_leg;

    let (kicker, target, tag) = if today < first.start {
        (
            format!("Countdown to {}", first.name),
            Some(first.start),
            StageTag::Pretrip,
        )
    } else if first.contains(today) {
        (
            format!("Countdown to {}", second.name),
            Some(second.start),
            StageTag::FirstLeg,
        )
    } else if second.contains(today) {
        (
            "Countdown to Home".to_string(),
            Some(calendar.homecoming),
            StageTag::SecondLeg,
        )
    } else {
        // today > second.end; the calendar has no gaps
        ("Welcome Home".to_string(), None, StageTag::Posttrip)
    };

    StageView {
        kicker,
        countdown_days: target.map_or(0, |target| days_until(target, today)),
        tag,
    }
}

/// Whole days from `from` to `target`. Dates carry no time of day, so this is
/// already the ceiling.
fn days_until(target: NaiveDate, from: NaiveDate) -> i64 {
    target.signed_duration_since(from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, month, day).unwrap()
    }

    #[test]
    fn test_reference_dates() {
        let calendar = TripCalendar::default();

        let view = stage(day(5, 10), &calendar);
        assert_eq!((view.tag, view.countdown_days), (StageTag::Pretrip, 4));
        assert_eq!(view.kicker, "Countdown to Mykonos");

        let view = stage(day(5, 14), &calendar);
        assert_eq!((view.tag, view.countdown_days), (StageTag::FirstLeg, 7));
        assert_eq!(view.kicker, "Countdown to Marrakech");

        let view = stage(day(5, 27), &calendar);
        assert_eq!((view.tag, view.countdown_days), (StageTag::SecondLeg, 1));
        assert_eq!(view.kicker, "Countdown to Home");

        let view = stage(day(5, 29), &calendar);
        assert_eq!((view.tag, view.countdown_days), (StageTag::Posttrip, 0));
        assert_eq!(view.kicker, "Welcome Home");
    }

    #[test]
    fn test_inclusive_boundaries() {
        let calendar = TripCalendar::default();
        assert_eq!(stage(day(5, 13), &calendar).tag, StageTag::Pretrip);
        assert_eq!(stage(day(5, 14), &calendar).tag, StageTag::FirstLeg);
        assert_eq!(stage(day(5, 20), &calendar).tag, StageTag::FirstLeg);
        assert_eq!(stage(day(5, 21), &calendar).tag, StageTag::SecondLeg);
        assert_eq!(stage(day(5, 27), &calendar).tag, StageTag::SecondLeg);
        assert_eq!(stage(day(5, 28), &calendar).tag, StageTag::Posttrip);
    }

    #[test]
    fn test_last_day_of_first_leg_counts_one() {
        let view = stage(day(5, 20), &TripCalendar::default());
        assert_eq!(view.countdown_days, 1);
    }

    #[test]
    fn test_every_day_of_year_has_one_stage() {
        let calendar = TripCalendar::default();
        let mut current = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2027, 1, 31).unwrap();
        let mut seen = Vec::new();
        while current <= end {
            let view = stage(current, &calendar);
            assert!(view.countdown_days >= 0);
            if seen.last() != Some(&view.tag) {
                seen.push(view.tag);
            }
            current = current.succ_opt().unwrap();
        }
        assert_eq!(
            seen,
            vec![
                StageTag::Pretrip,
                StageTag::FirstLeg,
                StageTag::SecondLeg,
                StageTag::Posttrip
            ]
        );
    }

    #[test]
    fn test_far_pretrip_countdown_crosses_year() {
        let view = stage(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(), &TripCalendar::default());
        assert_eq!(view.countdown_days, 134);
    }

    #[test]
    fn test_calendar_rejects_gap() {
        let result = TripCalendar::new(
            Leg::new("A", day(5, 1), day(5, 5)),
            Leg::new("B", day(5, 7), day(5, 9)),
            day(5, 10),
        );
        assert!(matches!(result, Err(VoyageError::Config(_))));
    }

    #[test]
    fn test_calendar_rejects_overlap_and_reversed_leg() {
        assert!(TripCalendar::new(
            Leg::new("A", day(5, 1), day(5, 5)),
            Leg::new("B", day(5, 5), day(5, 9)),
            day(5, 10),
        )
        .is_err());
        assert!(TripCalendar::new(
            Leg::new("A", day(5, 5), day(5, 1)),
            Leg::new("B", day(5, 2), day(5, 9)),
            day(5, 10),
        )
        .is_err());
    }

    #[test]
    fn test_calendar_rejects_early_homecoming() {
        let result = TripCalendar::new(
            Leg::new("A", day(5, 1), day(5, 5)),
            Leg::new("B", day(5, 6), day(5, 9)),
            day(5, 9),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_default_calendar_is_valid() {
        let calendar = TripCalendar::default();
        let rebuilt = TripCalendar::new(
            calendar.first_leg().clone(),
            calendar.second_leg().clone(),
            calendar.homecoming(),
        )
        .unwrap();
        assert_eq!(rebuilt, calendar);
    }

    #[test]
    fn test_theme_names() {
        let calendar = TripCalendar::default();
        assert_eq!(StageTag::Pretrip.theme(&calendar), "pretrip");
        assert_eq!(StageTag::FirstLeg.theme(&calendar), "mykonos");
        assert_eq!(StageTag::SecondLeg.theme(&calendar), "marrakech");
        assert_eq!(StageTag::Posttrip.theme(&calendar), "posttrip");
    }

    #[test]
    fn test_tag_serializes_camel_case() {
        assert_eq!(
            serde_json::to_string(&StageTag::FirstLeg).unwrap(),
            "\"firstLeg\""
        );
    }
}
