//! JSON output for trip views.

use chrono::NaiveDate;
use serde_json::{json, Value};
use voyage_core::{DayPlan, StageView, TripCalendar, TripDocument};

/// Home view: trip header plus today's stage.
pub fn home_json(
    document: &TripDocument,
    view: &StageView,
    calendar: &TripCalendar,
    today: NaiveDate,
) -> anyhow::Result<Value> {
    Ok(json!({
        "tripTitle": document.trip_title,
        "tripDateRange": document.trip_date_range,
        "today": today.format("%Y-%m-%d").to_string(),
        "stage": serde_json::to_value(view)?,
        "theme": view.tag.theme(calendar),
    }))
}

/// Itinerary view: the normalized days, in order.
pub fn itinerary_json(document: &TripDocument, days: &[DayPlan]) -> anyhow::Result<Value> {
    Ok(json!({
        "tripTitle": document.trip_title,
        "days": serde_json::to_value(days)?,
    }))
}
