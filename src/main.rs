//! CS:GO Patcher - command-line entry point.
//!
//! Finds the local CS:GO installation and copies the client version from
//! `game/csgo/steam.inf` into `csgo/steam.inf` so the legacy branch starts.
//!
//! # Execution Flow
//!
//! 1. Parse arguments (`-h`/`--help` prints usage and exits, `-v` lowers verbosity)
//! 2. Load `csgo-patcher.yaml` and `CSGO_PATCHER_*` overrides
//! 3. Initialize diagnostic logging
//! 4. Locate the game for the host platform and patch it
//! 5. Wait for the user before closing the console window
//!
//! Failures are reported on the console and the process still exits with status 0.

use anyhow::Result;
use csgo_patcher::logging::{self, LogOptions};
use csgo_patcher::{
    APP_NAME, Cli, ConfigManager, Console, Level, Locator, PatcherSettings, Platform, VERSION, run,
};
use std::io::{self, Write};
use std::process::Command;

fn main() -> Result<()> {
    let cli = Cli::from_env();

    #[cfg(windows)]
    let _ = colored::control::set_virtual_terminal(true);

    let (settings, settings_error) = match ConfigManager::new(".").load_settings() {
        Ok(settings) => (settings, None),
        Err(err) => (PatcherSettings::default(), Some(err)),
    };

    let console = Console::new(settings.console_verbose(cli.quiet));

    let log_dir = settings.log_dir.as_deref().map(camino::Utf8Path::new);
    let _guard = match logging::setup_logging(&LogOptions {
        log_dir,
        log_prefix: APP_NAME,
        debug_mode: settings.debug,
    }) {
        Ok(guard) => guard,
        Err(err) => {
            console.warning(format!("diagnostic logging disabled: {err:#}"));
            None
        }
    };

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    if let Some(err) = settings_error {
        console.warning(format!("ignoring settings: {err:#}"));
    }

    let platform = Platform::current();
    tracing::info!("Detected platform: {}", platform);

    let locator = Locator::for_platform(&platform, &settings);
    let outcome = run(&locator, &platform, &console);
    tracing::info!("Run finished: {:?}", outcome);

    console.report(Level::Ok, "Done.");

    if settings.pause_on_exit {
        if let Err(err) = pause(&platform) {
            tracing::warn!("Exit prompt failed: {}", err);
        }
    }

    Ok(())
}

/// Keeps the console window open until the user acknowledges it.
fn pause(platform: &Platform) -> io::Result<()> {
    match platform {
        Platform::Windows => {
            Command::new("cmd").args(["/C", "pause"]).status()?;
        }
        _ => {
            print!("press enter to continue...");
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin().read_line(&mut line)?;
            println!();
        }
    }
    Ok(())
}
