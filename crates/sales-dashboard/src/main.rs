mod bootstrap;

use anyhow::Result;
use dashboard_core::error::DashboardError;
use dashboard_core::settings::Settings;
use dashboard_data::analysis::build_snapshot;
use dashboard_runtime::data_manager::OrderCache;
use dashboard_runtime::session::DashboardSession;
use dashboard_ui::app::App;
use dashboard_ui::report::{render_json, render_report};

/// Log `err`, print it for the user and exit with a non-zero status.
fn abort(err: DashboardError) -> ! {
    tracing::error!("{err}");
    eprintln!("Error: {err}");
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Sales Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data: {}, View: {}, Theme: {}",
        settings.data_file.display(),
        settings.view,
        settings.theme
    );

    let orders = OrderCache::global(&settings.data_file)
        .get()
        .unwrap_or_else(|err| abort(err));
    let selection = settings
        .initial_selection(&orders)
        .unwrap_or_else(|err| abort(err));

    match settings.view.as_str() {
        "dashboard" => {
            tracing::info!("Starting interactive dashboard...");

            let app = App::new(DashboardSession::new(orders, selection), &settings.theme);

            // Raw mode delivers Ctrl+C as a key event, so the TUI's own key
            // map is the only shutdown path while it runs.
            app.run().await?;
            tracing::info!("Dashboard closed");
        }

        "report" => {
            let snapshot = build_snapshot(&orders, &selection);
            print!("{}", render_report(&snapshot));
        }

        "json" => {
            let snapshot = build_snapshot(&orders, &selection);
            println!("{}", render_json(&snapshot).unwrap_or_else(|err| abort(err)));
        }

        unknown => {
            eprintln!("Unknown view mode: {}", unknown);
        }
    }

    Ok(())
}
