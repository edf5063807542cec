//! CS:GO installation discovery.
//!
//! Locating the game is a two step process:
//!
//! 1. A platform specific [`StoreProbe`] finds the Steam installation directory
//!    (registry on Windows, home directory search on Linux).
//! 2. `<steam>/steamapps/libraryfolders.vdf` is parsed and the first library that
//!    has app `730` installed yields `<library>/steamapps/common/Counter-Strike Global Offensive`.
//!
//! Every step reports failure as a [`LocateError`]. [`Locator::resolve`] logs the
//! error and collapses it to `None`, which is all the caller needs to decide
//! whether to patch.

use crate::console::Console;
use crate::models::{PatcherSettings, Platform};
use crate::services::library::{LibraryManifest, ManifestError};
use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use walkdir::WalkDir;

/// Directory name searched for under the home directory
pub const STEAM_DIR_NAME: &str = "Steam";

/// Steam app ID of Counter-Strike: Global Offensive
pub const CSGO_APP_ID: &str = "730";

/// Install directory name below `steamapps/common`
pub const CSGO_DIR_NAME: &str = "Counter-Strike Global Offensive";

/// Executable that must exist in a Windows install
pub const CSGO_EXECUTABLE: &str = "csgo.exe";

/// Registry key (under `HKEY_LOCAL_MACHINE`) holding the Steam install path
pub const STEAM_REGISTRY_KEY: &str = r"SOFTWARE\WOW6432Node\Valve\Steam";

/// Registry value holding the Steam install path
pub const STEAM_REGISTRY_VALUE: &str = "InstallPath";

static REPEATED_SLASHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/{2,}").expect("Invalid separator regex"));

static REPEATED_BACKSLASHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\{2,}").expect("Invalid separator regex"));

/// Reasons the game could not be located
#[derive(Error, Debug)]
pub enum LocateError {
    #[error("home environment variable is unset")]
    EnvironmentMissing,

    #[error("steam installation not detected")]
    StoreNotFound,

    #[error("could not find steam library: {0}")]
    ManifestUnreadable(#[from] ManifestError),

    #[error("no steam library has app {0} installed")]
    ManifestEntryNotFound(String),

    #[error("CS:GO installation missing at '{0}'")]
    InstallPathMissing(Utf8PathBuf),

    #[error("CS:GO patching is not yet implemented on {0}")]
    NotImplemented(Platform),

    #[error("unsupported OS '{0}'")]
    UnsupportedPlatform(String),
}

impl LocateError {
    /// Whether the failure is followed by an "aborting..." notice
    fn aborts(&self) -> bool {
        matches!(
            self,
            Self::EnvironmentMissing
                | Self::StoreNotFound
                | Self::NotImplemented(_)
                | Self::UnsupportedPlatform(_)
        )
    }
}

/// Platform specific way of finding the Steam installation directory.
#[cfg_attr(test, mockall::automock)]
pub trait StoreProbe {
    /// Finds the Steam installation directory.
    fn resolve_base(&self) -> Result<Utf8PathBuf, LocateError>;

    /// Checks that a computed game directory is a usable install.
    fn verify_install(&self, install_dir: &Utf8Path) -> bool {
        install_dir.exists()
    }

    /// Path separator used in this platform's library manifest paths.
    fn separator(&self) -> char {
        '/'
    }
}

/// Searches the home directory tree for a directory named `Steam`.
///
/// The walk is top-down and sorted by file name: a directory's own `Steam` child is
/// found before anything deeper in its subtree. Unreadable directories are skipped
/// and symlinked directories below the home directory are not descended into.
#[derive(Debug, Clone)]
pub struct HomeSearchProbe {
    home: Option<Utf8PathBuf>,
}

impl HomeSearchProbe {
    pub fn new(home: Option<Utf8PathBuf>) -> Self {
        Self { home }
    }

    /// Uses `$HOME`; an unset, empty or non UTF-8 value counts as missing.
    pub fn from_env() -> Self {
        let home = std::env::var("HOME")
            .ok()
            .filter(|home| !home.is_empty())
            .map(Utf8PathBuf::from);
        Self::new(home)
    }
}

impl StoreProbe for HomeSearchProbe {
    fn resolve_base(&self) -> Result<Utf8PathBuf, LocateError> {
        let home = self.home.as_deref().ok_or(LocateError::EnvironmentMissing)?;
        find_store_dir(home).ok_or(LocateError::StoreNotFound)
    }
}

fn find_store_dir(root: &Utf8Path) -> Option<Utf8PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!("Skipping unreadable entry: {}", err);
                None
            }
        })
        // A symlinked root reports a symlink file type but is still walked
        .filter(|entry| {
            entry.file_type().is_dir() || (entry.depth() == 0 && entry.path().is_dir())
        })
        .find_map(|entry| {
            let candidate = entry.path().join(STEAM_DIR_NAME);
            candidate.is_dir().then_some(candidate)
        })
        .and_then(|found| match Utf8PathBuf::from_path_buf(found) {
            Ok(found) => Some(found),
            Err(found) => {
                tracing::warn!("Ignoring non UTF-8 Steam path: {}", found.display());
                None
            }
        })
}

/// Reads the Steam install path from the Windows registry.
///
/// A Windows install only counts when `csgo.exe` is present.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryProbe;

impl StoreProbe for RegistryProbe {
    fn resolve_base(&self) -> Result<Utf8PathBuf, LocateError> {
        read_registry_install_path().map_err(|err| {
            tracing::debug!(
                "Registry lookup of HKLM\\{}\\{} failed: {}",
                STEAM_REGISTRY_KEY,
                STEAM_REGISTRY_VALUE,
                err
            );
            LocateError::StoreNotFound
        })
    }

    fn verify_install(&self, install_dir: &Utf8Path) -> bool {
        install_dir.join(CSGO_EXECUTABLE).exists()
    }

    fn separator(&self) -> char {
        '\\'
    }
}

#[cfg(windows)]
fn read_registry_install_path() -> std::io::Result<Utf8PathBuf> {
    use winreg::RegKey;
    use winreg::enums::HKEY_LOCAL_MACHINE;

    let key = RegKey::predef(HKEY_LOCAL_MACHINE).open_subkey(STEAM_REGISTRY_KEY)?;
    let install_path: String = key.get_value(STEAM_REGISTRY_VALUE)?;
    Ok(Utf8PathBuf::from(install_path))
}

#[cfg(not(windows))]
fn read_registry_install_path() -> std::io::Result<Utf8PathBuf> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "the Windows registry is not available on this host",
    ))
}

/// Uses a configured Steam directory instead of probing for one.
///
/// Install verification is delegated to the platform probe.
pub struct OverrideProbe {
    base: Utf8PathBuf,
    inner: Box<dyn StoreProbe>,
}

impl OverrideProbe {
    pub fn new(base: Utf8PathBuf, inner: Box<dyn StoreProbe>) -> Self {
        Self { base, inner }
    }
}

impl StoreProbe for OverrideProbe {
    fn resolve_base(&self) -> Result<Utf8PathBuf, LocateError> {
        if self.base.is_dir() {
            Ok(self.base.clone())
        } else {
            tracing::debug!("Configured Steam path {} is not a directory", self.base);
            Err(LocateError::StoreNotFound)
        }
    }

    fn verify_install(&self, install_dir: &Utf8Path) -> bool {
        self.inner.verify_install(install_dir)
    }

    fn separator(&self) -> char {
        self.inner.separator()
    }
}

/// Probe for platforms where locating the game is not possible.
#[derive(Debug, Clone)]
pub struct UnavailableProbe {
    platform: Platform,
}

impl UnavailableProbe {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

impl StoreProbe for UnavailableProbe {
    fn resolve_base(&self) -> Result<Utf8PathBuf, LocateError> {
        Err(match &self.platform {
            Platform::Unsupported(name) => LocateError::UnsupportedPlatform(name.clone()),
            other => LocateError::NotImplemented(other.clone()),
        })
    }
}

/// Collapses runs of `separator` into a single one.
///
/// Only `/` and `\` are separators; any other character leaves `raw` untouched.
/// Backslashes are ordinary file name characters on Linux, so they are only
/// collapsed for Windows paths.
///
/// ```
/// use csgo_patcher::services::locator::normalize_separators;
///
/// assert_eq!(normalize_separators("/mnt//games///Steam", '/'), "/mnt/games/Steam");
/// assert_eq!(normalize_separators(r"D:\\SteamLibrary", '\\'), r"D:\SteamLibrary");
/// assert_eq!(normalize_separators(r"/mnt/odd\\name", '/'), r"/mnt/odd\\name");
/// ```
pub fn normalize_separators(raw: &str, separator: char) -> String {
    let repeated = match separator {
        '/' => &REPEATED_SLASHES,
        '\\' => &REPEATED_BACKSLASHES,
        _ => return raw.to_string(),
    };
    repeated
        .replace_all(raw, regex::NoExpand(separator.encode_utf8(&mut [0; 4])))
        .into_owned()
}

/// Game directory inside a Steam library whose manifest path is `library_path`
pub fn install_dir_for(library_path: &str, separator: char) -> Utf8PathBuf {
    Utf8PathBuf::from(normalize_separators(library_path, separator))
        .join("steamapps")
        .join("common")
        .join(CSGO_DIR_NAME)
}

/// Finds the CS:GO installation using a [`StoreProbe`].
pub struct Locator {
    probe: Box<dyn StoreProbe>,
}

impl Locator {
    pub fn new(probe: Box<dyn StoreProbe>) -> Self {
        Self { probe }
    }

    /// Locator for `platform`, honouring a configured Steam path on supported platforms.
    pub fn for_platform(platform: &Platform, settings: &PatcherSettings) -> Self {
        let probe: Box<dyn StoreProbe> = match platform {
            Platform::Windows => Box::new(RegistryProbe),
            Platform::Linux => Box::new(HomeSearchProbe::from_env()),
            other => return Self::new(Box::new(UnavailableProbe::new(other.clone()))),
        };

        match &settings.steam_path {
            Some(steam_path) => {
                tracing::info!("Using configured Steam path {}", steam_path);
                Self::new(Box::new(OverrideProbe::new(
                    Utf8PathBuf::from(steam_path),
                    probe,
                )))
            }
            None => Self::new(probe),
        }
    }

    /// Locates the game, reporting exactly why it could not be found.
    pub fn try_resolve(&self, console: &Console) -> Result<Utf8PathBuf, LocateError> {
        let steam_dir = self.probe.resolve_base()?;
        console.info(format!("steam installation detected at '{steam_dir}'"));

        let manifest_path = steam_dir.join("steamapps").join("libraryfolders.vdf");
        let manifest = LibraryManifest::load(&manifest_path)?;

        let library = manifest
            .find_app(CSGO_APP_ID)
            .ok_or_else(|| LocateError::ManifestEntryNotFound(CSGO_APP_ID.to_string()))?;
        tracing::debug!("App {} found in library {}", CSGO_APP_ID, library.id);

        let install_dir = install_dir_for(&library.path, self.probe.separator());
        if !self.probe.verify_install(&install_dir) {
            return Err(LocateError::InstallPathMissing(install_dir));
        }

        Ok(install_dir)
    }

    /// Locates the game; every failure is logged and becomes `None`.
    pub fn resolve(&self, console: &Console) -> Option<Utf8PathBuf> {
        match self.try_resolve(console) {
            Ok(install_dir) => Some(install_dir),
            Err(err) => {
                tracing::warn!("CS:GO lookup failed: {:?}", err);
                console.error(err.to_string());
                if err.aborts() {
                    console.error("aborting...");
                }
                None
            }
        }
    }
}
