//! Plain and pretty text output for trip views.

use voyage_core::{DayPlan, Entry, StageView, TripCalendar, TripDocument};

use crate::ui::format::{long_date, short_date, truncate, wrap};
use crate::ui::theme::{stage_style, styled, styles};
use crate::ui::{kv, simple_table, Column, UiContext};

pub const EMPTY_ITINERARY: &str = "No itinerary details available yet.";
pub const EMPTY_DAY: &str = "No reservations for this day yet.";

/// Trip header and countdown.
pub fn home_block(
    ctx: &UiContext,
    document: &TripDocument,
    view: &StageView,
    calendar: &TripCalendar,
) -> String {
    let theme = view.tag.theme(calendar);
    if !ctx.mode.is_pretty() {
        return [
            kv(ctx, "Trip Title", &document.trip_title),
            kv(ctx, "Trip Date Range", &document.trip_date_range),
            kv(ctx, "Stage", view.tag.as_str()),
            kv(ctx, "Theme", &theme),
            kv(ctx, "Kicker", &view.kicker),
            kv(ctx, "Countdown Days", &view.countdown_days.to_string()),
        ]
        .join("\n");
    }

    let mut lines = Vec::new();
    if !document.trip_title.is_empty() {
        lines.push(styled(&document.trip_title, styles::bold(), ctx.color));
    }
    if !document.trip_date_range.is_empty() {
        lines.push(styled(&document.trip_date_range, styles::dim(), ctx.color));
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(styled(&view.kicker, stage_style(view.tag), ctx.color));
    lines.push(format!("{} days", view.countdown_days));
    lines.push(kv(ctx, "Theme", &theme));
    lines.join("\n")
}

/// Table of days with short dates, shown above the day blocks.
pub fn itinerary_overview(ctx: &UiContext, days: &[DayPlan]) -> String {
    let columns = [Column::new("Date"), Column::new("Day")];
    let title_width = ctx.width.saturating_sub(16).max(12);
    let rows: Vec<Vec<String>> = days
        .iter()
        .map(|day| {
            let title = if ctx.mode.is_pretty() {
                truncate(day.heading(), title_width)
            } else {
                day.heading().to_string()
            };
            vec![short_date(&day.date), title]
        })
        .collect();
    simple_table(ctx, &columns, &rows)
}

/// One day: heading, long date, subtitle, then each entry.
pub fn day_block(ctx: &UiContext, day: &DayPlan) -> String {
    let mut lines = Vec::new();

    if ctx.mode.is_pretty() {
        lines.push(styled(day.heading(), styles::bold(), ctx.color));
        lines.push(styled(&long_date(&day.date), styles::dim(), ctx.color));
        if let Some(subtitle) = day.subtitle.as_deref().filter(|s| !s.is_empty()) {
            lines.push(subtitle.to_string());
        }
    } else {
        lines.push(kv(ctx, "Day", &day.date));
        lines.push(kv(ctx, "Title", day.heading()));
        lines.push(kv(ctx, "Date", &long_date(&day.date)));
        if let Some(subtitle) = day.subtitle.as_deref().filter(|s| !s.is_empty()) {
            lines.push(kv(ctx, "Subtitle", subtitle));
        }
    }

    if day.entries.is_empty() {
        lines.push(indent(ctx, 1, EMPTY_DAY));
    }
    for entry in &day.entries {
        lines.extend(entry_lines(ctx, entry));
    }

    lines.join("\n")
}

fn entry_lines(ctx: &UiContext, entry: &Entry) -> Vec<String> {
    let mut lines = Vec::new();
    let pill = entry.pill_label();

    if ctx.mode.is_pretty() {
        let pill = styled(&format!("[{}]", pill), styles::bold(), ctx.color);
        lines.push(format!(
            "  {} {}  {}",
            pill,
            entry.time_label(),
            entry.title_label()
        ));
    } else {
        lines.push(kv(
            ctx,
            "Entry",
            &format!("{}|{}|{}", pill, entry.time_label(), entry.title_label()),
        ));
    }

    if let Some(code) = entry.confirmation_code.as_deref().filter(|c| !c.is_empty()) {
        let line = if ctx.mode.is_pretty() {
            format!("Code {}", code)
        } else {
            kv(ctx, "Code", code)
        };
        lines.push(indent(ctx, 2, &line));
    }

    for (label, value) in entry.meta_rows() {
        lines.push(indent(ctx, 2, &kv(ctx, label, value)));
    }

    for list in entry.lists() {
        if ctx.mode.is_pretty() {
            lines.push(indent(
                ctx,
                2,
                &styled(&format!("{}:", list.title), styles::dim(), ctx.color),
            ));
            let bullet = if ctx.unicode { "\u{2022}" } else { "-" };
            let width = ctx.width.saturating_sub(10).max(20);
            for item in list.items {
                for (i, part) in wrap(item, width).into_iter().enumerate() {
                    let prefix = if i == 0 { bullet } else { " " };
                    lines.push(indent(ctx, 3, &format!("{} {}", prefix, part)));
                }
            }
        } else {
            for item in list.items {
                lines.push(kv(ctx, list.title, item));
            }
        }
    }

    lines
}

fn indent(ctx: &UiContext, level: usize, text: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("{}{}", "  ".repeat(level), text)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::render::tests::{plain_ctx, pretty_ctx};
    use chrono::NaiveDate;
    use voyage_core::stage;

    fn flight() -> Entry {
        Entry {
            kind: Some("flight".to_string()),
            title: Some("Athens to Mykonos".to_string()),
            time: Some("10:30".to_string()),
            confirmation_code: Some("QX7Z2P".to_string()),
            provider: Some("Aegean".to_string()),
            dropoff: Some("Hotel".to_string()),
            segments: Some(vec!["ATH - JMK".to_string()]),
            ..Default::default()
        }
    }

    fn sample_day() -> DayPlan {
        DayPlan {
            date: "2026-05-14".to_string(),
            title: Some("Arrive in Mykonos".to_string()),
            subtitle: Some("Sunset at Little Venice".to_string()),
            entries: vec![flight()],
            ..Default::default()
        }
    }

    #[test]
    fn test_home_block_plain() {
        let calendar = TripCalendar::default();
        let view = stage(NaiveDate::from_ymd_opt(2026, 5, 10).unwrap(), &calendar);
        let document = TripDocument {
            trip_title: "Honeymoon".to_string(),
            trip_date_range: "May 14 - May 28, 2026".to_string(),
            ..Default::default()
        };

        let block = home_block(&plain_ctx(), &document, &view, &calendar);

        assert_eq!(
            block,
            "trip_title=Honeymoon\n\
             trip_date_range=May 14 - May 28, 2026\n\
             stage=pretrip\n\
             theme=pretrip\n\
             kicker=Countdown to Mykonos\n\
             countdown_days=4"
        );
    }

    #[test]
    fn test_home_block_pretty_posttrip() {
        let calendar = TripCalendar::default();
        let view = stage(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(), &calendar);
        let block = home_block(&pretty_ctx(), &TripDocument::default(), &view, &calendar);
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines[0], "Welcome Home");
        assert_eq!(lines[1], "0 days");
    }

    #[test]
    fn test_day_block_plain() {
        let block = day_block(&plain_ctx(), &sample_day());
        assert_eq!(
            block,
            "day=2026-05-14\n\
             title=Arrive in Mykonos\n\
             date=Thursday, May 14, 2026\n\
             subtitle=Sunset at Little Venice\n\
             entry=FLIGHT|10:30|Athens to Mykonos\n\
             code=QX7Z2P\n\
             provider=Aegean\n\
             drop_off=Hotel\n\
             segments=ATH - JMK"
        );
    }

    #[test]
    fn test_day_block_pretty() {
        let block = day_block(&pretty_ctx(), &sample_day());
        assert!(block.starts_with("Arrive in Mykonos\nThursday, May 14, 2026\n"));
        assert!(block.contains("  [FLIGHT] 10:30  Athens to Mykonos"));
        assert!(block.contains("    Code QX7Z2P"));
        assert!(block.contains("    Provider: Aegean"));
        assert!(block.contains("      \u{2022} ATH - JMK"));
    }

    #[test]
    fn test_day_without_entries() {
        let day = DayPlan {
            date: "2026-05-21".to_string(),
            location: Some("Marrakech".to_string()),
            ..Default::default()
        };
        let block = day_block(&pretty_ctx(), &day);
        assert!(block.starts_with("Marrakech\n"));
        assert!(block.ends_with(EMPTY_DAY));
    }

    #[test]
    fn test_entry_fallbacks() {
        let day = DayPlan {
            date: "2026-05-22".to_string(),
            entries: vec![Entry::default()],
            ..Default::default()
        };
        let block = day_block(&plain_ctx(), &day);
        assert!(block.contains("title=Day Plan"));
        assert!(block.contains("entry=PLAN|Time TBD|Reservation"));
    }

    #[test]
    fn test_overview_plain() {
        let out = itinerary_overview(&plain_ctx(), &[sample_day()]);
        assert_eq!(out, "Thu, May 14\tArrive in Mykonos");
    }
}
