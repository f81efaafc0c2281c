#![deny(unused_crate_dependencies)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod clock;
mod config;
mod error;
mod fetch;
mod holiday;
mod menu;
mod notify;
mod parse;
mod server;
mod vendor;

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::{
    clock::LocalClock,
    config::Config,
    fetch::{make_client, Fetch, HttpFetch},
    holiday::Holidays,
    notify::Notifier,
    server::App,
};

pub use error::Result;

#[cfg(all(target_env = "musl", target_pointer_width = "64"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("shutting down");
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> core::result::Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let config = Config::from_env().map_err(error::Error::from)?;
    log::debug!("{config:?}");

    let client = make_client();
    let fetch: Arc<dyn Fetch> = Arc::new(HttpFetch::new(client.clone()));
    let app = App {
        holidays: Holidays::new(
            config.holidays.as_str(),
            fetch::for_location(&config.holidays, &fetch),
            LocalClock,
        ),
        notifier: Notifier::new(client, config.webhook),
        vendors: vendor::registry(&config.vendors, &fetch, LocalClock)?,
    };
    for vendor in &app.vendors {
        log::info!("notifying about {} from {}", vendor.name(), vendor.location());
    }

    let listener = TcpListener::bind(config.addr)
        .await
        .unwrap_or_else(|e| panic!("failed to listen on {}: {e}", config.addr));
    log::info!("listening on http://{}", config.addr);
    axum::serve(listener, server::router(Arc::new(app)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
