use anyhow::{Context, Result};
use carteira_api::DashboardLoader;
use carteira_core::MonthWindow;
use tracing::debug;

use crate::auth::authed_client;
use crate::config::Config;
use crate::render::render_dashboard;

/// `carteira dashboard [--month YYYY-MM] [--json]`
pub async fn run(cfg: &Config, month: Option<MonthWindow>, json: bool) -> Result<()> {
    let window = month.unwrap_or_else(MonthWindow::current);
    let loader = DashboardLoader::new(authed_client(cfg)?);

    let Some(dashboard) = loader
        .load(window)
        .await
        .with_context(|| format!("loading dashboard for {}", window))?
    else {
        // Only one load is in flight from the CLI, so nothing can supersede it.
        return Ok(());
    };

    debug!(
        %window,
        groups = dashboard.by_category.len(),
        orphaned = dashboard.orphaned_expenses,
        "dashboard ready"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
    } else {
        print!("{}", render_dashboard(&dashboard, cfg.display.bar_width));
    }
    Ok(())
}
