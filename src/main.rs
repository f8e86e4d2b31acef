use anyhow::{Context, Result};
use rofi_tracker::adapter::{Adapter, Invocation};
use rofi_tracker::index::TrackerEndpoint;
use rofi_tracker::output;
use rofi_tracker::resolver::DesktopOpener;
use rofi_tracker::settings::{self, Settings};
use rofi_tracker::utils;
use std::io;

/// Run as `rofi -modi tracker:rofi-tracker -show tracker`; every argument
/// is query text, settings come from `ROFI_TRACKER_*` variables
fn main() -> Result<()> {
    let parsed = Settings::from_env();
    utils::logging::init(parsed.as_ref().is_ok_and(|s| s.verbose));

    let settings = parsed.unwrap_or_else(|e| {
        tracing::warn!(error = %e.to_string().trim(), "ignoring invalid settings");
        Settings::default()
    });
    let config = settings.app_config();

    let query = settings::query_args(std::env::args_os().skip(1));
    let invocation = Invocation::from_env(&query);
    tracing::debug!(
        retv = ?std::env::var("ROFI_RETV").ok(),
        query = %invocation.query_text,
        context = ?invocation.prior_context,
        "invoked"
    );

    let index = TrackerEndpoint::new(config.bus_name.clone(), config.dbus_timeout());
    let adapter = Adapter::new(&index, DesktopOpener, &config);
    let outcome = adapter.run(&invocation.query_text, invocation.prior_context.as_deref());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::write_outcome(&mut out, &outcome).context("write")?;

    Ok(())
}
