//! Canonical day list for display.
//!
//! Documents carry either explicit `itineraryDays` or the older flat
//! `itinerary`, which has locations but no dates. Legacy days get synthetic
//! dates from the trip calendar. The migration is lossy: anything that does
//! not name a leg lands on the first leg's start date.

use std::cmp::Ordering;

use chrono::{Duration, NaiveDate};

use crate::model::{DayPlan, Entry, LegacyDay, TripDocument};
use crate::stage::TripCalendar;

/// Entry type given to migrated legacy items.
const LEGACY_ENTRY_TYPE: &str = "plan";

/// Title for a legacy day without a location.
const LEGACY_FALLBACK_TITLE: &str = "Trip";

/// Return the document's days sorted by date.
///
/// Explicit days win when present and non-empty; otherwise legacy days are
/// migrated. Days with unparseable dates are kept and ordered last.
pub fn normalize(document: &TripDocument, calendar: &TripCalendar) -> Vec<DayPlan> {
    let mut days = match document.itinerary_days.as_deref() {
        Some(days) if !days.is_empty() => days.to_vec(),
        _ => migrate_legacy(document.itinerary.as_deref().unwrap_or_default(), calendar),
    };
    sort_by_date(&mut days);
    days
}

/// Parse a day's `YYYY-MM-DD` date.
pub fn parse_day_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

fn migrate_legacy(legacy: &[LegacyDay], calendar: &TripCalendar) -> Vec<DayPlan> {
    let first = calendar.first_leg();
    let second = calendar.second_leg();
    let first_place = first.name.to_lowercase();
    let second_place = second.name.to_lowercase();

    let mut first_count: i64 = 0;
    let mut second_count: i64 = 0;

    legacy
        .iter()
        .map(|day| {
            let location = day.location.as_deref().unwrap_or_default();
            let lowered = location.to_lowercase();

            let date = if lowered.contains(&first_place) {
                first_count += 1;
                first.start + Duration::days(first_count)
            } else if lowered.contains(&second_place) {
                let date = second.start + Duration::days(second_count);
                second_count += 1;
                date
            } else {
                first.start
            };

            let title = if location.is_empty() {
                LEGACY_FALLBACK_TITLE
            } else {
                location
            };

            DayPlan {
                date: date.format("%Y-%m-%d").to_string(),
                title: Some(title.to_string()),
                entries: day
                    .items
                    .iter()
                    .map(|item| Entry {
                        kind: Some(LEGACY_ENTRY_TYPE.to_string()),
                        title: item.title.clone(),
                        time: item.time.clone(),
                        details: Some(vec![item.detail.clone().unwrap_or_default()]),
                        ..Default::default()
                    })
                    .collect(),
                ..Default::default()
            }
        })
        .collect()
}

/// Stable sort: parseable dates ascending, then unparseable ones in input order.
fn sort_by_date(days: &mut [DayPlan]) {
    days.sort_by(|a, b| {
        match (parse_day_date(&a.date), parse_day_date(&b.date)) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}
