use chrono::Utc;

use crate::app::AppContext;
use crate::cli::ForgetArgs;
use crate::ui::{print, receipt};

/// Drop the remember-me flag, and with `--purge` the cached trip too.
pub fn handle_forget(ctx: &AppContext<'_>, args: &ForgetArgs) -> anyhow::Result<()> {
    let session = ctx.session()?;
    session.set_remembered(false, Utc::now())?;
    if args.purge {
        session.clear_cache()?;
    }

    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        let cache = if args.purge { "removed" } else { "kept" };
        print(
            &ui,
            &receipt(&ui, "Session forgotten", &[("Cached Trip", cache)]),
        );
    }
    Ok(())
}
