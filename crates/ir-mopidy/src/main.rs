//! ir-mopidy daemon entry point.
//!
//! Wires together the key source, the Mopidy JSON-RPC client, the action set
//! and the event translator, then runs the translator until the device goes
//! away or the process is asked to stop.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()              -- TOML file, CLI overrides applied on top
//!  └─ DaemonConfig::build_keymap() -- resolves every action name up front
//!  └─ open_device_source()       -- /dev/input/eventN
//!  └─ EventTranslator::run()     -- one event at a time
//!       └─ ActionSet::run()       -> MopidyRpcClient::call()
//! ```
//!
//! # Startup failures (for beginners)
//!
//! Everything that can be wrong with the setup (missing config file, bad TOML,
//! a misspelt action name, an unreadable device) is detected before the first
//! key event is read, and the process exits non-zero with a message.  Once the
//! loop is running, only the device disappearing can stop it; Mopidy being
//! down merely makes individual actions fail.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ir_mopidy::application::actions::ActionSet;
use ir_mopidy::application::translate_events::EventTranslator;
use ir_mopidy::infrastructure::key_source::open_device_source;
use ir_mopidy::infrastructure::rpc::MopidyRpcClient;
use ir_mopidy::infrastructure::storage::config::{default_config_path, load_config, DaemonConfig};
use ir_mopidy_core::KeyMapTable;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Infrared remote control for Mopidy.
///
/// Reads key events from an evdev input device and calls the Mopidy
/// JSON-RPC API according to the bindings in the configuration file.
#[derive(Debug, Parser)]
#[command(
    name = "ir-mopidy",
    about = "Control Mopidy with an infrared remote",
    version
)]
struct Cli {
    /// Path of the TOML configuration file.
    ///
    /// Defaults to `$XDG_CONFIG_HOME/ir-mopidy/config.toml`.
    #[arg(short, long, env = "IR_MOPIDY_CONFIG")]
    config: Option<PathBuf>,

    /// Input device to read, overriding `device` from the config file.
    #[arg(long)]
    device: Option<PathBuf>,

    /// Mopidy JSON-RPC endpoint, overriding `mopidy.url` from the config file.
    #[arg(long)]
    mopidy_url: Option<String>,

    /// Validate the configuration, print a summary and exit.
    #[arg(long)]
    check: bool,
}

impl Cli {
    fn config_path(&self) -> anyhow::Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => default_config_path().context("no --config given"),
        }
    }

    /// Applies command-line overrides on top of the file contents.
    fn apply_overrides(&self, config: &mut DaemonConfig) {
        if let Some(device) = &self.device {
            config.device = device.clone();
        }
        if let Some(url) = &self.mopidy_url {
            config.mopidy.url = url.clone();
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config_path()?;
    let mut config = load_config(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    cli.apply_overrides(&mut config);

    init_logging(&config.log_level);
    info!("ir-mopidy starting with {}", config_path.display());

    let table = config
        .build_keymap()
        .context("invalid key binding in configuration")?;
    info!("{} key bindings loaded", table.len());

    if cli.check {
        print_summary(&config, &table);
        return Ok(());
    }

    let mut source = open_device_source(&config.device)
        .with_context(|| format!("cannot read key events from {}", config.device.display()))?;

    let rpc = Arc::new(MopidyRpcClient::new(
        config.mopidy.url.clone(),
        config.mopidy.timeout(),
    ));
    let actions = Arc::new(ActionSet::new(rpc.clone(), config.command_settings()));
    let mut translator = EventTranslator::new(table, actions);

    info!(
        "listening on {} for Mopidy at {}",
        config.device.display(),
        config.mopidy.url
    );

    let result = tokio::select! {
        result = translator.run(source.as_mut()) => result.map_err(anyhow::Error::from),
        _ = shutdown_signal() => {
            info!("shutdown signal received");
            Ok(())
        }
    };

    rpc.close().await;

    match result {
        Ok(()) => {
            info!("ir-mopidy stopped");
            Ok(())
        }
        Err(e) => {
            error!("event loop terminated: {e:#}");
            Err(e)
        }
    }
}

/// `RUST_LOG` wins; otherwise the config's `log_level`; otherwise `info`.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_summary(config: &DaemonConfig, table: &KeyMapTable) {
    println!("device:   {}", config.device.display());
    println!("mopidy:   {} (timeout {}ms)", config.mopidy.url, config.mopidy.timeout_ms);
    println!("bindings: {}", table.len());

    let mut lines: Vec<String> = table
        .iter()
        .map(|(press, binding)| {
            let action = binding.action.map_or("(unmapped)", |a| a.name());
            match &binding.suppress_next {
                Some(next) => format!("  {press} -> {action}, then skip {next}"),
                None => format!("  {press} -> {action}"),
            }
        })
        .collect();
    lines.sort();
    for line in lines {
        println!("{line}");
    }
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
