// app/src/main.rs

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use app::shell::Shell;
use app::toast::ToastQueue;
use client::{ClientConfig, HttpClinicApi};
use security::{SessionStore, TokenStorage};

#[derive(Parser, Debug)]
#[command(name = "clinic")]
#[command(version)]
#[command(about = "Cliente de gestión de clínica")]
struct Args {
    /// Archivo de configuración (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// URL base del backend; tiene prioridad sobre la configuración
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Salida detallada (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

// The UI is one logical thread; network calls are the only suspension
// points, so a current-thread runtime is all it needs.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = ClientConfig::load(args.config.as_deref())?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }

    let session = Arc::new(SessionStore::new(TokenStorage::default_location("clinic")));
    session.init();

    let api = Arc::new(HttpClinicApi::new(config, session.clone())?);
    let toasts = Arc::new(ToastQueue::new());

    Shell::new(api, session, toasts).run().await
}
