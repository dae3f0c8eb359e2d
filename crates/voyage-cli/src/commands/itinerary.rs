use chrono::NaiveDate;
use voyage_core::itinerary::parse_day_date;
use voyage_core::DayPlan;

use crate::app::{open_trip, AppContext, OpenMode};
use crate::cli::ItineraryArgs;
use crate::errors::CliError;
use crate::helpers::{parse_date, parse_output_format};
use crate::output::{day_block, itinerary_json, itinerary_overview, EMPTY_ITINERARY};
use crate::ui::{blank_line, divider, header, print};

pub async fn handle_itinerary(ctx: &AppContext<'_>, args: &ItineraryArgs) -> anyhow::Result<()> {
    let format = parse_output_format(args.format.as_deref())
        .map_err(|e| CliError::invalid_input(e.to_string()))?;
    let ui = ctx.ui_context(args.json, format);
    let wanted = args
        .day
        .as_deref()
        .map(parse_date)
        .transpose()
        .map_err(|e| CliError::invalid_input(e.to_string()))?;

    let (document, days) = open_trip(ctx, &ui, OpenMode::Resume, false, args.no_input).await?;

    let days: Vec<DayPlan> = match wanted {
        Some(date) => {
            let matching = days_on(days, date);
            if matching.is_empty() {
                return Err(CliError::not_found(
                    format!("No itinerary day on {}", date.format("%Y-%m-%d")),
                    "Hint: Run `voyage itinerary` to see every day.",
                )
                .into());
            }
            matching
        }
        None => days,
    };

    if ui.mode.is_json() {
        let value = itinerary_json(&document, &days)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let context = format!("{} day{}", days.len(), if days.len() == 1 { "" } else { "s" });
    print(&ui, &header(&ui, "itinerary", Some(&context)));
    blank_line(&ui);

    if days.is_empty() {
        print(&ui, EMPTY_ITINERARY);
        return Ok(());
    }

    if ui.mode.is_pretty() && days.len() > 1 {
        print(&ui, &itinerary_overview(&ui, &days));
        blank_line(&ui);
    }

    for (index, day) in days.iter().enumerate() {
        if index > 0 {
            print(&ui, &divider(&ui));
        }
        print(&ui, &day_block(&ui, day));
    }
    Ok(())
}

fn days_on(days: Vec<DayPlan>, date: NaiveDate) -> Vec<DayPlan> {
    days.into_iter()
        .filter(|day| parse_day_date(&day.date) == Some(date))
        .collect()
}
