use chrono::{DateTime, Utc};

use crate::app::{open_trip, AppContext, OpenMode};
use crate::cli::UnlockArgs;
use crate::ui::{blank_line, print, receipt};

use super::home::render_home;

/// Fetch and decrypt the envelope, then show the home view.
///
/// Unlike `home` and `itinerary`, this always asks for the passphrase so the
/// cache is refreshed from the source.
pub async fn handle_unlock(ctx: &AppContext<'_>, args: &UnlockArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);
    let (document, days) =
        open_trip(ctx, &ui, OpenMode::Fetch, args.remember, args.no_input).await?;

    if !ctx.quiet() {
        let day_count = days.len().to_string();
        let remembered = match ctx.session()?.expires_at() {
            Some(millis) => format_expiry(millis),
            None => "no".to_string(),
        };
        print(
            &ui,
            &receipt(
                &ui,
                "Unlocked",
                &[("Days", day_count.as_str()), ("Remembered Until", remembered.as_str())],
            ),
        );
        blank_line(&ui);
    }

    render_home(&ui, &document, &ctx.calendar()?, ctx.today()?)
}

fn format_expiry(millis: f64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis as i64)
        .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "yes".to_string())
}
