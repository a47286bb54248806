//! Target platform identifiers and packaging families.
//!
//! The platform set is closed. Adding a platform means adding a variant
//! and answering the `Family` question for it, not editing a chain of
//! string comparisons. An unrecognized identifier is rejected up front
//! rather than silently packaging nothing.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// A supported target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Win32,
    Win64,
    Mac,
    Linux,
    XboxOne,
    Ps4,
}

/// Packaging family: platforms in the same family share staging fix-ups
/// and package-assembly semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// Win32/Win64/Mac/Linux: the staged tree is the package.
    Desktop,
    /// Packaged with MakePkg from the Durango XDK.
    XboxOne,
    /// Packaged with orbis-pub-cmd from the SCE SDK.
    Ps4,
}

impl Platform {
    pub const ALL: [Platform; 6] = [
        Platform::Win32,
        Platform::Win64,
        Platform::Mac,
        Platform::Linux,
        Platform::XboxOne,
        Platform::Ps4,
    ];

    /// Canonical platform identifier, as passed to engine tools.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Win32 => "Win32",
            Platform::Win64 => "Win64",
            Platform::Mac => "Mac",
            Platform::Linux => "Linux",
            Platform::XboxOne => "XboxOne",
            Platform::Ps4 => "PS4",
        }
    }

    /// Directory token used under `Saved/StagedBuilds` and `Saved/Packages`.
    ///
    /// The editor stages Win64 client builds as `WindowsNoEditor`; every
    /// other platform stages under its canonical name.
    pub fn staged_name(&self) -> &'static str {
        match self {
            Platform::Win64 => "WindowsNoEditor",
            other => other.name(),
        }
    }

    pub fn family(&self) -> Family {
        match self {
            Platform::Win32 | Platform::Win64 | Platform::Mac | Platform::Linux => Family::Desktop,
            Platform::XboxOne => Family::XboxOne,
            Platform::Ps4 => Family::Ps4,
        }
    }

    /// Extension of the console layout file staged next to the build.
    pub fn layout_extension(&self) -> &'static str {
        match self {
            Platform::Ps4 => "gp4",
            _ => "xml",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::Config(format!(
                    "unsupported platform '{}'; expected one of: {}",
                    s,
                    Platform::ALL.map(|p| p.name()).join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_known_platforms() {
        assert_eq!("Win64".parse::<Platform>().unwrap(), Platform::Win64);
        assert_eq!("ps4".parse::<Platform>().unwrap(), Platform::Ps4);
        assert_eq!("xboxone".parse::<Platform>().unwrap(), Platform::XboxOne);
    }

    #[test]
    fn parse_rejects_unknown_platform() {
        let err = "Switch".parse::<Platform>().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("Switch"));
    }

    #[test]
    fn win64_stages_as_windows_no_editor() {
        assert_eq!(Platform::Win64.staged_name(), "WindowsNoEditor");
        assert_eq!(Platform::Win32.staged_name(), "Win32");
        assert_eq!(Platform::Ps4.staged_name(), "PS4");
    }

    #[test]
    fn families_cover_all_platforms() {
        assert_eq!(Platform::Linux.family(), Family::Desktop);
        assert_eq!(Platform::Mac.family(), Family::Desktop);
        assert_eq!(Platform::XboxOne.family(), Family::XboxOne);
        assert_eq!(Platform::Ps4.family(), Family::Ps4);
    }

    #[test]
    fn layout_extension_per_platform() {
        assert_eq!(Platform::Ps4.layout_extension(), "gp4");
        assert_eq!(Platform::XboxOne.layout_extension(), "xml");
    }
}
