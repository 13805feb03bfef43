//! Dashboard entry-point: resolves settings, wires adapters, and runs one
//! command.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use dashboard::DashboardSettings;
use dashboard::domain::Theme;
use dashboard::domain::ports::FixtureAuthService;
use dashboard::inbound::cli::{Cli, Services, run};
use dashboard::outbound::reqres::ReqresUserDirectory;
use dashboard::outbound::storage::JsonFileKeyValueStore;

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let settings = DashboardSettings::load_from_iter([OsString::from("dashboard")])
        .map_err(|error| eyre!("failed to load dashboard settings: {error}"))?;
    let services = build_services(&settings)?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build dashboard runtime")?;
    let mut stdout = io::stdout().lock();
    runtime.block_on(run(cli.command, &services, &mut stdout))?;
    Ok(())
}

fn build_services(settings: &DashboardSettings) -> Result<Services> {
    let base_url = settings
        .api_base_url()
        .wrap_err("invalid DASHBOARD_API_BASE_URL")?;
    let directory = ReqresUserDirectory::new(base_url, settings.api_key(), settings.request_timeout())
        .wrap_err("failed to build user directory client")?;
    let storage_path = settings.storage_path();
    let storage = JsonFileKeyValueStore::open(&storage_path)
        .wrap_err_with(|| format!("failed to open state file {storage_path}"))?;

    Ok(Services {
        directory: Arc::new(directory),
        auth: Arc::new(FixtureAuthService),
        storage: Arc::new(storage),
        page_size: settings.page_size(),
        system_theme: if settings.prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        },
    })
}
