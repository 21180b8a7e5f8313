use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use doctor_core::{CoreConfig, DoctorService, StoreLocation};

/// Main entry point for the doctor directory server
///
/// Resolves configuration once, opens the record store and serves the REST API until the
/// process is stopped.
///
/// # Environment Variables
/// - `DATABASE_URL`: record store location, `memory:` or `file:<dir>` (default: "file:doctor_data")
/// - `DOCTORS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `RUST_LOG`: log filter (default directive: "info")
///
/// A `.env` file in the working directory is loaded first if present.
///
/// # Errors
/// Returns an error if:
/// - the logging filter cannot be parsed,
/// - `DATABASE_URL` is invalid or the store cannot be opened,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = CoreConfig::from_database_url(std::env::var("DATABASE_URL").ok())?;
    let rest_addr = std::env::var("DOCTORS_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    match cfg.store() {
        StoreLocation::Memory => {
            tracing::warn!("++ Using in-memory store; records are lost on exit")
        }
        StoreLocation::File(root) => tracing::info!("++ Using file store at {}", root.display()),
    }

    let store = cfg.store().open()?;
    let doctor_service = DoctorService::new(store);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    tracing::info!("++ Starting doctor directory REST on {}", rest_addr);
    api_rest::serve(listener, doctor_service).await?;

    Ok(())
}
