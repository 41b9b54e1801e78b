//! Platform and architecture inference from asset filenames.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
    Other,
}

impl Platform {
    /// Infers the platform from substring matches on the asset filename.
    pub fn infer(asset_name: &str) -> Self {
        let name = asset_name.to_lowercase();
        if name.contains("linux") {
            Platform::Linux
        } else if name.contains("darwin") || name.contains("macos") {
            Platform::MacOs
        } else if name.contains("windows") || name.contains(".exe") {
            Platform::Windows
        } else {
            Platform::Other
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Platform::Linux => "Linux",
            Platform::MacOs => "macOS",
            Platform::Windows => "Windows",
            Platform::Other => "Other",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    Arm64,
    X86_64,
    Unknown,
}

impl Arch {
    /// Infers the architecture from substring matches on the asset filename.
    pub fn infer(asset_name: &str) -> Self {
        let name = asset_name.to_lowercase();
        if name.contains("aarch64") || name.contains("arm64") {
            Arch::Arm64
        } else if name.contains("x86_64") {
            Arch::X86_64
        } else {
            Arch::Unknown
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Arch::Arm64 => "ARM64",
            Arch::X86_64 => "x86_64",
            Arch::Unknown => "Unknown",
        };
        write!(f, "{}", s)
    }
}

/// Combined "Platform Arch" label used to group pie chart slices.
pub fn platform_arch_label(asset_name: &str) -> String {
    format!(
        "{} {}",
        Platform::infer(asset_name),
        Arch::infer(asset_name)
    )
}
