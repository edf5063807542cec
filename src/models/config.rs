use serde::Deserialize;

/// User settings from `csgo-patcher.yaml` and `CSGO_PATCHER_*` environment variables
///
/// Every field is optional in the file; missing fields fall back to [`Default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PatcherSettings {
    /// Show informational console messages. The `-v` flag forces this off.
    pub verbose: bool,

    /// Wait for the user before exiting so a double-clicked console stays open.
    pub pause_on_exit: bool,

    /// Steam installation directory to use instead of probing the registry or
    /// searching the home directory.
    pub steam_path: Option<String>,

    /// Directory for the rotating diagnostic log. File logging is off when unset.
    pub log_dir: Option<String>,

    /// Emit debug-level diagnostics on stderr.
    pub debug: bool,
}

impl Default for PatcherSettings {
    fn default() -> Self {
        Self {
            verbose: true,
            pause_on_exit: true,
            steam_path: None,
            log_dir: None,
            debug: false,
        }
    }
}

impl PatcherSettings {
    /// Effective console verbosity once the command line has been considered
    pub fn console_verbose(&self, quiet_flag: bool) -> bool {
        self.verbose && !quiet_flag
    }
}
