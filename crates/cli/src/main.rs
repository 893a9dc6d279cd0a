use std::sync::Arc;

use clap::Parser;
use mortydex_catalog::CatalogApi;
use mortydex_cli::cli::{Cli, Command};
use mortydex_cli::commands;
use mortydex_cli::config::AppConfig;
use mortydex_cli::shell::Shell;
use mortydex_store::{FavoritesStore, FileStore};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mortydex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?.with_overrides(
        cli.api_url,
        cli.favorites_path,
        cli.timeout_secs,
    );

    tracing::info!(
        api_url = %config.api_url,
        favorites_path = %config.favorites_path.display(),
        "Starting mortydex"
    );

    let catalog = Arc::new(match config.request_timeout() {
        Some(timeout) => CatalogApi::with_timeout(&config.api_url, timeout)?,
        None => CatalogApi::new(&config.api_url),
    });
    let store = Arc::new(FavoritesStore::new(FileStore::new(config.favorites_path.clone())));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            let mut shell = Shell::new(catalog, store);
            shell.run(BufReader::new(tokio::io::stdin()), &mut out).await?;
        }
        Command::Page { number } => commands::page(&*catalog, &*store, number, &mut out).await?,
        Command::Search { name } => commands::search(catalog, store, &name, &mut out).await?,
        Command::Show { id } => commands::show(&*catalog, &*store, id, &mut out).await?,
        Command::Like { id } => commands::like(&*catalog, &*store, id, &mut out).await?,
        Command::Favorites => commands::favorites(catalog, store, &mut out).await?,
    }

    Ok(())
}
