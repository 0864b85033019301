//! Host platform identification.

use std::fmt;

use serde::Serialize;

/// Operating system family of the host running the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostOs {
    Windows,
    Linux,
    MacOs,
    Other(String),
}

impl HostOs {
    /// The OS this binary is running on.
    pub fn current() -> Self {
        HostOs::from_os_str(std::env::consts::OS)
    }

    /// Map an OS identifier as found in `std::env::consts::OS`.
    pub fn from_os_str(os: &str) -> Self {
        match os {
            "windows" => HostOs::Windows,
            "linux" => HostOs::Linux,
            "macos" => HostOs::MacOs,
            other => HostOs::Other(other.to_string()),
        }
    }

    /// Whether this is the Windows family.
    pub fn is_windows(&self) -> bool {
        matches!(self, HostOs::Windows)
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostOs::Windows => write!(f, "windows"),
            HostOs::Linux => write!(f, "linux"),
            HostOs::MacOs => write!(f, "macos"),
            HostOs::Other(os) => write!(f, "{}", os),
        }
    }
}
