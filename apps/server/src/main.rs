use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};

use discord_relay::config;
use discord_relay::routes;
use discord_relay::services::{DiscordClient, WebhookDelivery};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = config::Config::from_env().map_err(|e| {
        log::error!("Configuration error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    if config.discord.webhook_url.is_none() {
        log::warn!("DISCORD_WEBHOOK_URL not set, /incident requests will fail");
    }

    let client = DiscordClient::new(config.discord.timeout).map_err(|e| {
        log::error!("HTTP client error: {}", e);
        std::io::Error::other(e.to_string())
    })?;
    let delivery: web::Data<dyn WebhookDelivery> =
        web::Data::from(Arc::new(client) as Arc<dyn WebhookDelivery>);

    log::info!(
        "Starting Discord relay on {}:{}",
        config.host,
        config.port
    );

    let host = config.host.clone();
    let port = config.port;
    let config = web::Data::new(config);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(config.clone())
            .app_data(delivery.clone())
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .shutdown_timeout(30)
    .run();

    let server_handle = server.handle();
    tokio::spawn(async move {
        let signal = shutdown_signal().await;
        log::info!("Received {}, draining in-flight relays", signal);
        server_handle.stop(true).await;
    });

    server.await
}

/// Resolves with the name of the first termination signal delivered.
/// A listener that cannot be installed never resolves, leaving the other one armed.
async fn shutdown_signal() -> &'static str {
    let interrupt = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => "SIGINT",
            Err(e) => {
                log::error!("Cannot listen for Ctrl+C: {}", e);
                std::future::pending().await
            }
        }
    };

    tokio::select! {
        name = interrupt => name,
        name = terminate() => name,
    }
}

#[cfg(unix)]
async fn terminate() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let Ok(mut sigterm) = signal(SignalKind::terminate())
        .inspect_err(|e| log::error!("Cannot listen for SIGTERM: {}", e))
    else {
        return std::future::pending().await;
    };
    sigterm.recv().await;
    "SIGTERM"
}

#[cfg(not(unix))]
async fn terminate() -> &'static str {
    std::future::pending().await
}
