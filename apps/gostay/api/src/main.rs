use axum_helpers::JwtAuth;
use axum_helpers::server::{
    CleanupCoordinator, close_postgres, create_production_app, health_router,
};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_bookings::{BookingNotifier, EmailBookingNotifier};
use domain_payments::{CheckoutProvider, StripeCheckoutProvider};
use email::{EmailProvider, MockEmailProvider, SmtpProvider, TemplateEngine};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::{Config, EmailBackend};
use state::AppState;

fn email_provider(backend: &EmailBackend) -> eyre::Result<Arc<dyn EmailProvider>> {
    Ok(match backend {
        EmailBackend::Smtp(smtp) => Arc::new(SmtpProvider::new(smtp.clone())?),
        EmailBackend::Mock => {
            tracing::warn!("EMAIL_PROVIDER=mock: confirmations are captured, not delivered");
            Arc::new(MockEmailProvider::new())
        }
    })
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    database::postgres::run_migrations::<migration::Migrator>(&db, config.app.name).await?;

    let provider = email_provider(&config.email)?;
    let notifier: Arc<dyn BookingNotifier> = Arc::new(EmailBookingNotifier::new(
        provider,
        Arc::new(TemplateEngine::new()?),
        config.notifications.clone(),
    ));
    let checkout: Arc<dyn CheckoutProvider> =
        Arc::new(StripeCheckoutProvider::new(config.stripe.clone())?);

    let state = AppState {
        jwt_auth: JwtAuth::new(&config.jwt),
        config,
        db,
        notifier,
        checkout,
    };

    // Build router with API routes (pass reference, not ownership!)
    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    // - /health: liveness check with app name/version
    // - /ready: readiness check against the database
    let app = router
        .merge(health_router(state.config.app.clone()))
        .merge(api::ready_router(state.clone()));

    info!("Starting GoStay API with production-ready shutdown (30s timeout)");

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing database connections");
            let mut cleanup = CleanupCoordinator::new();
            cleanup.add_task("postgres", close_postgres(state.db, "bookings"));
            cleanup.run().await;
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("GoStay API shutdown complete");
    Ok(())
}
