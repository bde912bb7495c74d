use dotenvy::dotenv;
use invoicer_admin::config::settings::load_default_settings;
use invoicer_admin::core::numeric::format_minor_units;
use invoicer_admin::errors::Result;
use invoicer_admin::ui::{AppContext, Route};
use std::env;
use std::panic;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load settings file and environment overrides
    let settings = load_default_settings()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;

    // 4. Wire controllers to the REST service
    let app = AppContext::new(&settings)
        .inspect_err(|e| error!("Failed to build the API client: {}", e))?;

    // 5. Route panics through the unexpected error reporter, then the default hook
    let reporter = Arc::clone(&app.reporter);
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        reporter.report(info);
        default_hook(info);
    }));

    // 6. Navigate to the requested path and render the resulting page to the log
    let path = env::args().nth(1).unwrap_or_else(|| "/".to_string());
    let navigation = app.router.before_each(None, &path).await;
    info!("Navigation to {}: {:?}", path, navigation);

    let route = navigation.route();
    let form = app.open(route).await;
    match route {
        Route::Clients => {
            let state = app.clients.snapshot();
            if let Some(message) = &state.error {
                warn!("{}", message);
            }
            for client in &state.items {
                let marker = if client.favourite { "*" } else { " " };
                info!(
                    "{} {} ({}, {}) via {}: {}",
                    marker,
                    client.name,
                    client.city,
                    client.country,
                    client.main_contact_method,
                    client.main_contact
                );
            }
            if state.items.is_empty() && state.error.is_none() {
                info!("{}", app.messages.t("clients.page.empty", &[]));
            }
        }
        Route::Catalog => {
            let state = app.catalog.snapshot();
            if let Some(message) = &state.error {
                warn!("{}", message);
            }
            for item in &state.items {
                let price = format_minor_units(item.unit_price);
                let price_line = app
                    .messages
                    .t("catalog.page.priceLine", &[("price", &price), ("unit", &item.unit)]);
                match item.tax_rate {
                    Some(rate) => info!(
                        "{}: {}, {}",
                        item.name,
                        price_line,
                        app.messages
                            .t("catalog.page.taxLine", &[("rate", &rate.to_string())])
                    ),
                    None => info!("{}: {}", item.name, price_line),
                }
            }
            if state.items.is_empty() && state.error.is_none() {
                info!("{}", app.messages.t("catalog.page.empty", &[]));
            }
        }
        Route::Setup => {
            info!("{}", app.messages.t("users.modal.allRequired", &[]));
            if let Some(message) = &app.profile.snapshot().error {
                warn!("{}", message);
            }
            for (field, value) in form.iter().flatten() {
                if value.is_empty() {
                    warn!("{}: <missing>", field);
                } else {
                    info!("{}: {}", field, value);
                }
            }
        }
    }

    for toast in app.toasts.snapshot() {
        info!("[{:?}] {}", toast.variant, toast.message);
    }

    Ok(())
}
