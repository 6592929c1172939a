//! # Tally Back-Office Library
//!
//! Application layer over the tally crates: configuration, logging, the
//! state objects and the permission-checked commands a front-end calls.
//!
//! ## Module Organization
//! ```text
//! tally_backoffice/
//! ├── lib.rs          ◄─── You are here (startup & dashboard log)
//! ├── config.rs       ◄─── backoffice.toml + TALLY_* overrides
//! ├── error.rs        ◄─── ApiError { code, message }
//! ├── state/
//! │   ├── store.rs    ◄─── Shared store, permission checks
//! │   ├── config.rs   ◄─── Loaded configuration
//! │   └── insights.rs ◄─── Insights proxy client
//! └── commands/       ◄─── One file per area
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing         RUST_LOG or "info,tally=debug"                 │
//! │  2. load config          defaults → file → TALLY_* → validate           │
//! │  3. build state          StoreState (demo seed), ConfigState,           │
//! │                          InsightsState                                  │
//! │  4. demo session         sign in as the seeded administrator            │
//! │  5. dashboard            computed once and written to the log           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tally_core::EntityId;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use commands::reports::Dashboard;
use config::BackofficeConfig;
use error::ApiError;
use state::{ConfigState, InsightsState, StoreState};

/// User the demo binary signs in as.
pub const DEMO_USER_ID: &str = "user-admin";

/// Initializes the tracing subscriber for structured logging.
///
/// - `RUST_LOG=debug` shows everything at debug
/// - `RUST_LOG=tally_store=trace` narrows to one crate
/// - Default: `info,tally=debug`
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tally=debug"));

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// The three state objects commands draw on.
pub fn build_states(
    config: BackofficeConfig,
    now: DateTime<Utc>,
) -> Result<(StoreState, ConfigState, InsightsState), ApiError> {
    let store = StoreState::from_settings(&config.store, now);
    let insights = InsightsState::new(&config.insights)?;
    Ok((store, ConfigState::new(config), insights))
}

/// Runs the demo: load, seed, sign in, log the dashboard.
pub async fn run(config_path: Option<PathBuf>) -> Result<Option<Dashboard>, ApiError> {
    init_tracing();
    info!("Starting Tally back-office");

    let config = BackofficeConfig::load_or_default(config_path);
    info!(
        store = %config.store.name,
        currency = %config.store.currency_code,
        insights = %config.insights.base_url,
        "Configuration loaded"
    );

    let (store, config, _insights) = build_states(config, Utc::now())?;

    if !config.config().store.seed_demo_data {
        warn!("Demo data disabled; nothing to sign in as, skipping dashboard");
        return Ok(None);
    }

    let user = store.session(|s| s.sign_in_as(&EntityId::from(DEMO_USER_ID)))?;
    info!(user = %user.name, "Demo session started");

    let dashboard = commands::reports::dashboard(&store, &config, None)?;
    log_dashboard(&config, &dashboard);
    Ok(Some(dashboard))
}

fn log_dashboard(config: &ConfigState, dashboard: &Dashboard) {
    let sales = &dashboard.sales;
    info!(
        store = %dashboard.store_name,
        revenue = %config.format_money(sales.total_revenue),
        sales = sales.sale_count,
        average = %config.format_money(sales.average_sale),
        items = sales.items_sold,
        "Sales"
    );
    if let Some(top) = sales.top_by_quantity.first() {
        info!(sku = %top.sku, name = %top.name, quantity = top.quantity, "Best seller");
    }

    let summary = &dashboard.summary;
    info!(
        net_sales = %config.format_money(summary.net_sales),
        net_purchases = %config.format_money(summary.net_purchases),
        "Purchases and sales"
    );
    info!(
        output = %config.format_money(dashboard.tax.output_tax),
        input = %config.format_money(dashboard.tax.input_tax),
        payable = %config.format_money(dashboard.tax.net_payable),
        "Tax"
    );
    info!(
        total = %config.format_money(dashboard.expenses.total),
        count = dashboard.expenses.count,
        "Expenses"
    );
    for row in &dashboard.restock {
        warn!(sku = %row.sku, stock = row.stock, status = ?row.status, "Needs restocking");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tally_core::Product;
    use tally_store::{DraftLine, SaleDraft};

    #[test]
    fn test_states_from_default_config() {
        let (store, config, _insights) =
            build_states(BackofficeConfig::default(), Utc::now()).unwrap();
        assert_eq!(config.store_name(), "Tally Demo Store");
        assert!(store.shared().with_store(|s| !s.list::<Product>().is_empty()));
    }

    #[test]
    fn test_bad_insights_url_fails_startup() {
        let mut config = BackofficeConfig::default();
        config.insights.base_url = "ftp://proxy".into();
        let err = build_states(config, Utc::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::Internal);
    }

    #[test]
    fn test_sale_shows_up_on_dashboard() {
        let (store, config, _) = build_states(BackofficeConfig::default(), Utc::now()).unwrap();
        store.session(|s| s.sign_in_as(&EntityId::from(DEMO_USER_ID))).unwrap();
        let before = commands::reports::dashboard(&store, &config, None).unwrap();

        let sale = commands::sales::create_sale(
            &store,
            SaleDraft {
                customer_id: EntityId::from("cust-walk-in"),
                business_location_id: EntityId::from("loc-main"),
                lines: vec![DraftLine::new("p-soap", 2)],
                payments: vec![],
                discount: None,
                note: None,
            },
        )
        .unwrap();

        let after = commands::reports::dashboard(&store, &config, None).unwrap();
        assert_eq!(after.sales.sale_count, before.sales.sale_count + 1);
        assert_eq!(
            after.sales.total_revenue,
            before.sales.total_revenue + sale.totals.total
        );
        assert_eq!(after.sales.items_sold, before.sales.items_sold + 2);
    }
}
