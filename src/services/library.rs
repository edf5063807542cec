//! Steam library manifest (`steamapps/libraryfolders.vdf`).
//!
//! The manifest lists every Steam library folder together with the app IDs
//! installed in it. Only the parts needed to find a game are kept.

use camino::{Utf8Path, Utf8PathBuf};
use keyvalues_parser::{Value, Vdf};
use std::fs;
use thiserror::Error;

/// Root block of the manifest
pub const LIBRARY_FOLDERS_KEY: &str = "libraryfolders";

/// Deepest block nesting accepted before parsing; real manifests use three levels
pub const MAX_NESTING: usize = 32;

/// Errors raised while loading a library manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed library manifest: {0}")]
    Parse(String),

    #[error("library manifest nests blocks deeper than {MAX_NESTING} levels")]
    TooDeep,

    #[error("library manifest has no 'libraryfolders' block")]
    MissingRoot,
}

/// A single Steam library folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryFolder {
    /// Key of the entry in the manifest ("0", "1", ...)
    pub id: String,
    /// Library base path exactly as written in the manifest
    pub path: String,
    /// App IDs installed in this library
    pub apps: Vec<String>,
}

impl LibraryFolder {
    pub fn contains_app(&self, app_id: &str) -> bool {
        self.apps.iter().any(|app| app == app_id)
    }
}

/// Parsed library manifest, folders in manifest order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryManifest {
    folders: Vec<LibraryFolder>,
}

impl LibraryManifest {
    /// Parses manifest text.
    ///
    /// Library entries are keyed by their index ("0", "1", ...) and kept in index
    /// order. Other keys, entries that are not blocks, and entries lacking a `path`
    /// value or an `apps` block cannot hold the game and are skipped.
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        let text = text.trim_start_matches('\u{feff}');
        if nesting_depth(text) > MAX_NESTING {
            return Err(ManifestError::TooDeep);
        }

        let document = Vdf::parse(text).map_err(|err| ManifestError::Parse(err.to_string()))?;
        if document.key != LIBRARY_FOLDERS_KEY {
            return Err(ManifestError::MissingRoot);
        }
        let root = document.value.get_obj().ok_or(ManifestError::MissingRoot)?;

        let mut entries: Vec<(u32, &str, &Value)> = root
            .iter()
            .filter_map(|(id, values)| {
                let index = id.parse::<u32>().ok()?;
                Some((index, &**id, values.first()?))
            })
            .collect();
        entries.sort_by_key(|(index, _, _)| *index);

        let folders = entries
            .into_iter()
            .filter_map(|(_, id, entry)| {
                let entry = entry.get_obj()?;
                let path = entry.get("path")?.first()?.get_str()?;
                let apps = entry.get("apps")?.first()?.get_obj()?;
                Some(LibraryFolder {
                    id: id.to_string(),
                    path: path.to_string(),
                    apps: apps.keys().map(|app| app.to_string()).collect(),
                })
            })
            .collect();

        Ok(Self { folders })
    }

    /// Reads and parses the manifest at `path`.
    pub fn load(path: &Utf8Path) -> Result<Self, ManifestError> {
        let text = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = Self::parse(&text)?;

        tracing::debug!(
            "Loaded library manifest {} with {} folder(s)",
            path,
            manifest.folders.len()
        );
        Ok(manifest)
    }

    pub fn folders(&self) -> &[LibraryFolder] {
        &self.folders
    }

    /// First library folder that has `app_id` installed.
    ///
    /// When several folders claim the same app, the lowest index wins.
    pub fn find_app(&self, app_id: &str) -> Option<&LibraryFolder> {
        self.folders.iter().find(|folder| folder.contains_app(app_id))
    }
}

/// Deepest `{` nesting outside quoted strings
fn nesting_depth(text: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for c in text.chars() {
        if in_quotes {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_quotes = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            '{' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}
