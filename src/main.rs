use std::sync::Arc;

use anyhow::Context;

use mutual_aid::config::ServiceConfig;
use mutual_aid::server::{Services, app_routes};
use mutual_aid::store::{KeyValueStore, LibSqlBackend, MemoryStore};
use mutual_aid::testimonials::spawn_rotation_ticker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServiceConfig::from_env()?;

    eprintln!("🤝 Mutual Aid v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://0.0.0.0:{}/api", config.port);

    // ── Store ────────────────────────────────────────────────────────────
    let store: Arc<dyn KeyValueStore> = if config.in_memory {
        eprintln!("   Store: in-memory");
        Arc::new(MemoryStore::new())
    } else {
        let backend = LibSqlBackend::new_local(&config.db_path)
            .await
            .with_context(|| format!("opening database at {}", config.db_path.display()))?;
        eprintln!("   Store: {}", config.db_path.display());
        Arc::new(backend)
    };

    // ── Services ─────────────────────────────────────────────────────────
    let services = Services::new(store)?;

    // Held for the lifetime of the server; dropping it stops the carousel.
    let _ticker = spawn_rotation_ticker(
        Arc::clone(&services.testimonials.rotator),
        config.rotation_interval,
    )?;
    eprintln!(
        "   Testimonials: rotating every {}s\n",
        config.rotation_interval.as_secs()
    );

    let app = app_routes(&services);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("binding port {}", config.port))?;
    tracing::info!(port = config.port, "Server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}
