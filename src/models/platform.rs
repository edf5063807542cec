use std::fmt;

/// Operating system classification used to pick a Steam discovery strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    /// Steam location comes from the registry.
    Windows,
    /// Steam location comes from a search of the home directory.
    Linux,
    /// Recognised but not patchable: the game files needed are not shipped there.
    MacOs,
    /// Anything else, carrying the name it was detected as.
    Unsupported(String),
}

impl Platform {
    /// Classifies an OS name.
    ///
    /// Accepts both the conventional system names (`Windows`, `Linux`, `Darwin`)
    /// and Rust target names (`windows`, `linux`, `macos`).
    ///
    /// # Examples
    ///
    /// ```
    /// use csgo_patcher::Platform;
    ///
    /// assert_eq!(Platform::from_os_name("Darwin"), Platform::MacOs);
    /// assert_eq!(Platform::from_os_name("linux"), Platform::Linux);
    /// assert_eq!(
    ///     Platform::from_os_name("freebsd"),
    ///     Platform::Unsupported("freebsd".to_string())
    /// );
    /// ```
    pub fn from_os_name(name: &str) -> Self {
        match name {
            "Windows" | "windows" => Self::Windows,
            "Linux" | "linux" => Self::Linux,
            "Darwin" | "macos" => Self::MacOs,
            other => Self::Unsupported(other.to_string()),
        }
    }

    /// Platform of the running host
    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Whether the patcher knows how to locate the game on this platform
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Windows | Self::Linux)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => f.write_str("Windows"),
            Self::Linux => f.write_str("Linux"),
            Self::MacOs => f.write_str("macOS"),
            Self::Unsupported(name) => f.write_str(name),
        }
    }
}
