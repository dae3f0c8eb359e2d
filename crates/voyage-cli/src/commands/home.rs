use chrono::NaiveDate;
use voyage_core::{stage, TripCalendar, TripDocument};

use crate::app::{open_trip, AppContext, OpenMode};
use crate::cli::HomeArgs;
use crate::errors::CliError;
use crate::helpers::parse_date;
use crate::output::{home_block, home_json};
use crate::ui::{blank_line, header, print, UiContext};

pub async fn handle_home(ctx: &AppContext<'_>, args: &HomeArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(args.json, None);
    let today = match args.today.as_deref() {
        Some(value) => parse_date(value).map_err(|e| CliError::invalid_input(e.to_string()))?,
        None => ctx.today()?,
    };

    let (document, _days) = open_trip(ctx, &ui, OpenMode::Resume, false, args.no_input).await?;
    render_home(&ui, &document, &ctx.calendar()?, today)
}

/// Print the countdown for `today`.
pub fn render_home(
    ui: &UiContext,
    document: &TripDocument,
    calendar: &TripCalendar,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let view = stage(today, calendar);

    if ui.mode.is_json() {
        let value = home_json(document, &view, calendar, today)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print(ui, &header(ui, "home", None));
    blank_line(ui);
    print(ui, &home_block(ui, document, &view, calendar));
    Ok(())
}
