use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use sns_service::{db, handlers, Config, SERVICE_NAME};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into());
    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var("LOG_FORMAT").map(|f| f == "json").unwrap_or(false) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn build_cors(allowed_origins: Option<&[&str]>) -> Cors {
    let mut cors = Cors::default();
    match allowed_origins {
        Some(origins) => {
            for origin in origins {
                cors = cors.allowed_origin(origin);
            }
        }
        None => cors = cors.allow_any_origin(),
    }
    cors.allow_any_method().allow_any_header().max_age(3600)
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// SNS Service
///
/// Serves posts, comments and likes under `/api`, plus `/`, `/health`,
/// `/health/ready`, `/openapi.json` and `/metrics`.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting {} v{}", SERVICE_NAME, env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let pool = db::init_store(config.database.clone()).await?;
    let pool_http = pool.clone();

    let bind_address = config.bind_address();
    let workers = config.app.workers;
    let cors_config = config.cors.clone();

    let mut server = HttpServer::new(move || {
        let origins = cors_config.origins();

        App::new()
            .app_data(web::Data::new(pool_http.clone()))
            .wrap(build_cors(origins.as_deref()))
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure_routes)
    });

    if let Some(workers) = workers {
        server = server.workers(workers);
    }

    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind HTTP server to {}", bind_address))?
        .disable_signals()
        .run();

    tracing::info!("HTTP server listening on {}", bind_address);

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    tokio::select! {
        result = server_task => {
            match result {
                Ok(Ok(())) => tracing::info!("HTTP server stopped"),
                Ok(Err(e)) => tracing::error!("HTTP server error: {}", e),
                Err(e) => tracing::error!("HTTP server task failed: {}", e),
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received, stopping HTTP server");
            server_handle.stop(true).await;
        }
    }

    pool.close().await;
    tracing::info!("{} shut down", SERVICE_NAME);

    Ok(())
}
