//! Version marker patching.
//!
//! The legacy CS:GO branch ships two `steam.inf` files. The one under `game/csgo`
//! carries the client version Steam expects; the one under `csgo` is what the
//! legacy client reports. Patching copies the first line of the former over the
//! first line of the latter and leaves every other line alone.

use crate::console::{Console, Level};
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use thiserror::Error;

/// Result of a successful patch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The target marker was rewritten
    Patched,
    /// The target marker already matched; nothing was written
    AlreadyPatched,
}

/// File operation that failed while patching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchStep {
    ReadSource,
    ReadTarget,
    WriteTarget,
}

impl fmt::Display for PatchStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ReadSource => "read patch",
            Self::ReadTarget => "read target",
            Self::WriteTarget => "write target",
        })
    }
}

/// I/O failure while reading or writing a marker file
#[derive(Error, Debug)]
#[error("failed to {step} {path}: {source}")]
pub struct PatchError {
    pub step: PatchStep,
    pub path: Utf8PathBuf,
    #[source]
    pub source: io::Error,
}

/// Copies the client version marker into the legacy marker file.
#[derive(Debug, Clone)]
pub struct Patcher {
    source: Utf8PathBuf,
    target: Utf8PathBuf,
}

impl Patcher {
    /// Patcher for the game installed at `install_dir`
    pub fn new(install_dir: &Utf8Path) -> Self {
        Self {
            source: install_dir.join("game").join("csgo").join("steam.inf"),
            target: install_dir.join("csgo").join("steam.inf"),
        }
    }

    /// Marker file the version is read from
    pub fn source_path(&self) -> &Utf8Path {
        &self.source
    }

    /// Marker file that gets rewritten
    pub fn target_path(&self) -> &Utf8Path {
        &self.target
    }

    /// Applies the patch.
    ///
    /// The target is only written when its first line differs from the source
    /// marker, so running this repeatedly is safe. The write replaces the whole
    /// file in place.
    ///
    /// # Errors
    ///
    /// Returns a [`PatchError`] if either marker file cannot be read or the target
    /// cannot be written.
    pub fn apply(&self, console: &Console) -> Result<PatchOutcome, PatchError> {
        console.info("applying patch...");

        let marker = read_first_line(&self.source).map_err(|source| PatchError {
            step: PatchStep::ReadSource,
            path: self.source.clone(),
            source,
        })?;
        console.ok("read patch");

        let target = fs::read_to_string(&self.target).map_err(|source| PatchError {
            step: PatchStep::ReadTarget,
            path: self.target.clone(),
            source,
        })?;
        console.ok("read target");

        let Some(patched) = patch_content(&marker, &target) else {
            console.warning("CS:GO is already patched");
            console.warning("aborting...");
            return Ok(PatchOutcome::AlreadyPatched);
        };

        fs::write(&self.target, patched).map_err(|source| PatchError {
            step: PatchStep::WriteTarget,
            path: self.target.clone(),
            source,
        })?;
        tracing::info!("Rewrote {} with marker {:?}", self.target, marker.trim_end());

        console.report(Level::Ok, "successfully patched CS:GO");
        Ok(PatchOutcome::Patched)
    }
}

/// First line of `path` including its terminator; empty for an empty file.
fn read_first_line(path: &Utf8Path) -> io::Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line)
}

/// Replaces the first line of `target` with `marker`.
///
/// Returns `None` when the first line already equals the replacement. A marker
/// without a line terminator borrows the terminator of the line it replaces, so
/// the following lines stay on their own lines. An empty target becomes the
/// marker alone.
///
/// # Examples
///
/// ```
/// use csgo_patcher::services::patcher::patch_content;
///
/// assert_eq!(
///     patch_content("2.1.0.0\n", "1.0.0.0\nextra\n").as_deref(),
///     Some("2.1.0.0\nextra\n")
/// );
/// assert_eq!(patch_content("2.1.0.0\n", "2.1.0.0\nextra\n"), None);
/// ```
pub fn patch_content(marker: &str, target: &str) -> Option<String> {
    let first = target.split_inclusive('\n').next();

    let replacement = match first {
        Some(line) if !marker.ends_with('\n') => format!("{marker}{}", line_terminator(line)),
        _ => marker.to_string(),
    };

    if first == Some(replacement.as_str()) {
        return None;
    }

    let rest = first.map_or("", |line| &target[line.len()..]);
    Some(replacement + rest)
}

fn line_terminator(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}
