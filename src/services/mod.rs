//! Services module - locating CS:GO and patching its version marker.
//!
//! The services carry no global state: everything they need (platform, settings,
//! console) is passed in, which keeps them usable from tests with temporary
//! directories standing in for a real Steam install.
//!
//! # Components
//!
//! - [`LibraryManifest`]: Steam's `libraryfolders.vdf`, reduced to library paths and
//!   the app IDs installed in each.
//! - [`Locator`]: Finds the game directory. Uses a [`StoreProbe`] per platform:
//!   - [`RegistryProbe`]: Windows, `HKLM\SOFTWARE\WOW6432Node\Valve\Steam\InstallPath`
//!   - [`HomeSearchProbe`]: Linux, first directory named `Steam` under `$HOME`
//!   - [`UnavailableProbe`]: macOS and unknown systems, always fails
//!   - [`OverrideProbe`]: a Steam directory set in the settings file
//! - [`Patcher`]: Copies the first line of `game/csgo/steam.inf` over the first line of
//!   `csgo/steam.inf`, writing only when they differ.
//! - [`run`]: The whole run as the binary performs it, returning a [`RunOutcome`].
//!
//! # Usage Example
//!
//! ```ignore
//! use csgo_patcher::services::{run, Locator};
//! use csgo_patcher::{Console, PatcherSettings, Platform};
//!
//! let platform = Platform::current();
//! let locator = Locator::for_platform(&platform, &PatcherSettings::default());
//! let outcome = run(&locator, &platform, &Console::new(true));
//! ```

pub mod library;
pub mod locator;
pub mod patcher;
pub mod workflow;

pub use library::{LibraryFolder, LibraryManifest, ManifestError};
pub use locator::{
    HomeSearchProbe, LocateError, Locator, OverrideProbe, RegistryProbe, StoreProbe,
    UnavailableProbe,
};
pub use patcher::{PatchError, PatchOutcome, PatchStep, Patcher};
pub use workflow::{RunOutcome, run};
