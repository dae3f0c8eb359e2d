//! Output formatting for the home and itinerary views.
//!
//! JSON shapes live in `json`; plain and pretty text in `text`.

mod json;
mod text;

pub use json::{home_json, itinerary_json};
pub use text::{day_block, home_block, itinerary_overview, EMPTY_DAY, EMPTY_ITINERARY};
