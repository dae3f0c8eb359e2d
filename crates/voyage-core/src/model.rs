//! Trip document types.
//!
//! These mirror the JSON the publisher encrypts. Field names stay camelCase
//! on the wire; unknown fields are carried through so a cached document
//! re-serializes without loss.
//!
//! Display fields are read leniently: `null` counts as absent, numbers and
//! booleans become their text, and list or record shapes that do not fit
//! are dropped. Only plaintext that is not a JSON object fails to parse.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A decrypted trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDocument {
    #[serde(default, deserialize_with = "lenient::text")]
    pub trip_title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub trip_date_range: String,
    /// Explicitly dated days. Authoritative when non-empty.
    #[serde(
        default,
        deserialize_with = "lenient::optional_records",
        skip_serializing_if = "Option::is_none"
    )]
    pub itinerary_days: Option<Vec<DayPlan>>,
    /// Legacy flat itinerary without dates.
    #[serde(
        default,
        deserialize_with = "lenient::optional_records",
        skip_serializing_if = "Option::is_none"
    )]
    pub itinerary: Option<Vec<LegacyDay>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TripDocument {
    /// Whether either itinerary shape carries at least one day.
    pub fn has_days(&self) -> bool {
        self.itinerary_days.as_ref().is_some_and(|days| !days.is_empty())
            || self.itinerary.as_ref().is_some_and(|days| !days.is_empty())
    }
}

/// One calendar day of the trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// ISO date (`YYYY-MM-DD`); may be unparseable in hand-written documents.
    #[serde(default, deserialize_with = "lenient::text")]
    pub date: String,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub subtitle: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub entries: Vec<Entry>,
}

impl DayPlan {
    /// Heading for the day: title, then location, then a generic label.
    pub fn heading(&self) -> &str {
        non_empty(self.title.as_deref())
            .or_else(|| non_empty(self.location.as_deref()))
            .unwrap_or("Day Plan")
    }
}

/// A day in the legacy flat itinerary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyDay {
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub items: Vec<LegacyItem>,
}

/// A single legacy itinerary line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyItem {
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub detail: Option<String>,
}

/// A reservation or plan within a day.
///
/// Which optional fields are present decides which rows are shown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub type_label: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub confirmation_code: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub provider: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub pickup: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub dropoff: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub driver: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub car_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub cabin: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub segments: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "lenient::text_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub layovers: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "lenient::text_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub details: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A titled list shown under an entry (segments, layovers, details).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryList<'a> {
    pub title: &'static str,
    pub items: &'a [String],
}

impl Entry {
    /// Badge text: explicit label, else upper-cased type, else `PLAN`.
    pub fn pill_label(&self) -> String {
        if let Some(label) = non_empty(self.type_label.as_deref()) {
            return label.to_string();
        }
        non_empty(self.kind.as_deref())
            .map(|kind| kind.to_uppercase())
            .unwrap_or_else(|| "PLAN".to_string())
    }

    pub fn time_label(&self) -> &str {
        non_empty(self.time.as_deref()).unwrap_or("Time TBD")
    }

    pub fn title_label(&self) -> &str {
        non_empty(self.title.as_deref()).unwrap_or("Reservation")
    }

    /// Labelled detail rows in display order, skipping empty values.
    pub fn meta_rows(&self) -> Vec<(&'static str, &str)> {
        [
            ("Provider", &self.provider),
            ("Location", &self.location),
            ("Address", &self.address),
            ("Pickup", &self.pickup),
            ("Drop-off", &self.dropoff),
            ("Driver", &self.driver),
            ("Car", &self.car_type),
            ("Duration", &self.duration),
            ("Cabin", &self.cabin),
        ]
        .into_iter()
        .filter_map(|(label, value)| non_empty(value.as_deref()).map(|value| (label, value)))
        .collect()
    }

    /// Non-empty list blocks in display order.
    pub fn lists(&self) -> Vec<EntryList<'_>> {
        [
            ("Segments", &self.segments),
            ("Layovers", &self.layovers),
            ("Details", &self.details),
        ]
        .into_iter()
        .filter_map(|(title, items)| match items.as_deref() {
            Some(items) if !items.is_empty() => Some(EntryList { title, items }),
            _ => None,
        })
        .collect()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn display(value: Value) -> Option<String> {
        match value {
            Value::String(text) => Some(text),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn collect<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
        items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(display(Value::deserialize(deserializer)?).unwrap_or_default())
    }

    pub fn optional_text<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(display(Value::deserialize(deserializer)?))
    }

    /// A list of display strings; a lone scalar becomes a one-item list.
    pub fn text_list<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<String>>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => Some(items.into_iter().filter_map(display).collect()),
            other => display(other).map(|text| vec![text]),
        })
    }

    /// Object elements of an array; anything else is empty.
    pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => collect(items),
            _ => Vec::new(),
        })
    }

    pub fn optional_records<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => Some(collect(items)),
            _ => None,
        })
    }
}
