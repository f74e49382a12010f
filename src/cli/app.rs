//! Supervisor: starts the mirror loop, waits for a signal or the wrapped
//! command, then shuts the loop down

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::timeout;

use crate::application::ports::ConfigStore;
use crate::application::{MirrorConfig, MirrorError, MirrorUseCase, StopSignal};
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::interval::Interval;
use crate::domain::sync_mode::SyncMode;
use crate::infrastructure::{
    first_missing_tool, ClipnotifyWatcher, WaylandClipboard, XclipSource, XdgConfigStore,
    SHUTDOWN_TIMEOUT,
};

use super::args::SyncOptions;
use super::child::run_wrapped_command;
use super::presenter::Presenter;
use super::signals::SignalListener;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;
pub const EXIT_CANNOT_EXECUTE: u8 = 126;
pub const EXIT_COMMAND_NOT_FOUND: u8 = 127;

/// Environment variable holding the default interval
pub const INTERVAL_ENV: &str = "CLIPSYNC_INTERVAL";

/// Binaries that must be on PATH for a mode
pub fn required_tools(mode: SyncMode) -> &'static [&'static str] {
    match mode {
        SyncMode::Events => &["xclip", "wl-copy", "clipnotify"],
        SyncMode::Poll => &["xclip", "wl-copy"],
    }
}

/// How long the supervisor waits for the mirror task after stopping it.
/// Events mode adds the time the notifier workers need to tear down.
pub fn mirror_join_bound(mode: SyncMode, interval: Interval) -> Duration {
    match mode {
        SyncMode::Events => interval.times(2) + SHUTDOWN_TIMEOUT,
        SyncMode::Poll => interval.times(2),
    }
}

/// Run the mirror until interrupted or until the wrapped command exits
pub async fn run_sync(options: SyncOptions) -> ExitCode {
    let presenter = Presenter::new(options.debug);

    if let Some(tool) = first_missing_tool(required_tools(options.mode)).await {
        presenter.error(&format!("{} not found in PATH", tool));
        return ExitCode::from(EXIT_ERROR);
    }

    let Some(display) = options.display.clone() else {
        presenter.error("--display was not provided and $DISPLAY is unset");
        return ExitCode::from(EXIT_ERROR);
    };

    let mut signals = match SignalListener::new() {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    presenter.debug(&format!(
        "mirroring {} from display {} ({} mode, interval {})",
        options
            .selections
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        display,
        options.mode,
        options.interval
    ));

    let stop = StopSignal::new();
    let mirror = spawn_mirror(&options, display, presenter.clone(), stop.clone());

    let exit_code = if options.command.is_empty() {
        wait_for_shutdown(&mut signals, &stop, &presenter).await
    } else {
        run_wrapped_command(&options.command, &mut signals, &presenter).await
    };

    stop.stop();
    match timeout(mirror_join_bound(options.mode, options.interval), mirror).await {
        Ok(Ok(Ok(()))) => {}
        // The failing worker already reported why
        Ok(Ok(Err(MirrorError::NotifierFailed(e)))) => {
            presenter.debug(&format!("mirror loop ended: {}", e));
        }
        Ok(Err(e)) => presenter.error(&format!("mirror loop panicked: {}", e)),
        Err(_) => presenter.debug("mirror loop did not exit in time"),
    }

    ExitCode::from(exit_code)
}

/// Start the mirror loop as a background task
fn spawn_mirror(
    options: &SyncOptions,
    display: String,
    presenter: Presenter,
    stop: StopSignal,
) -> JoinHandle<Result<(), MirrorError>> {
    let config = MirrorConfig {
        selections: options.selections.clone(),
        interval: options.interval,
    };
    let mode = options.mode;
    let mut use_case = MirrorUseCase::new(
        XclipSource::new(display.clone()),
        WaylandClipboard::new(),
        presenter,
        config,
    );

    tokio::spawn(async move {
        match mode {
            SyncMode::Events => {
                use_case
                    .run_events(ClipnotifyWatcher::new(display), &stop)
                    .await
            }
            SyncMode::Poll => use_case.run_polling(&stop).await,
        }
    })
}

/// Wait for SIGINT/SIGTERM, or for the mirror loop to stop on its own
async fn wait_for_shutdown(
    signals: &mut SignalListener,
    stop: &StopSignal,
    presenter: &Presenter,
) -> u8 {
    tokio::select! {
        sig = signals.recv() => {
            presenter.info("Interrupted, exiting...");
            sig.exit_code()
        }
        // A dead notifier ends the mirror; report it as a failure
        _ = stop.stopped() => EXIT_ERROR,
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(
    cli_config: AppConfig,
    config_path: Option<PathBuf>,
    presenter: &Presenter,
) -> AppConfig {
    let store = config_path
        .map(|path| XdgConfigStore::with_path(path))
        .unwrap_or_default();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            presenter.warn(&format!(
                "{} ({}); ignoring it",
                e,
                store.path().display()
            ));
            AppConfig::empty()
        }
    };

    // Build env config
    let env_config = AppConfig {
        interval: env::var(INTERVAL_ENV).ok().filter(|s| !s.is_empty()),
        display: env::var("DISPLAY").ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

/// Turn merged configuration into typed options
pub fn resolve_options(config: &AppConfig, command: Vec<String>) -> Result<SyncOptions, ConfigError> {
    Ok(SyncOptions {
        interval: config.interval()?,
        display: config.display().map(str::to_string),
        debug: config.debug_or_default(),
        mode: config.mode()?,
        selections: config.selections()?,
        command,
    })
}
