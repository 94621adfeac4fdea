mod app;
mod config;
mod error;
mod image_loader;
mod index;
mod models;
mod presenter;
mod thumbnails;
mod ui;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::GalleryApp;
use config::GalleryConfig;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("thumbgrid=info")),
        )
        .init();

    let config = GalleryConfig::from_env().context("Invalid gallery configuration")?;
    info!(?config, "Starting gallery");

    let app = GalleryApp::new(config);
    std::process::exit(app.run());
}
