use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How `@Json(name = ...)` markers whose name disagrees with the property are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MigrationMode {
    /// Report mismatches as errors and leave the file untouched
    #[default]
    Strict,
    /// Rewrite mismatching markers to `@SerialName`
    FixMismatches,
    /// Rewrite every named marker to `@SerialName` without validating
    FixAll,
}

impl MigrationMode {
    /// Resolve the mode from the two mutually exclusive CLI switches
    pub fn from_flags(fix_names: bool, fix_all_names: bool) -> Result<Self, MigrationModeError> {
        match (fix_names, fix_all_names) {
            (false, false) => Ok(MigrationMode::Strict),
            (true, false) => Ok(MigrationMode::FixMismatches),
            (false, true) => Ok(MigrationMode::FixAll),
            (true, true) => Err(MigrationModeError::ConflictingFlags),
        }
    }

    pub fn validates_declarations(&self) -> bool {
        !matches!(self, MigrationMode::FixAll)
    }
}

impl fmt::Display for MigrationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MigrationMode::Strict => "strict",
            MigrationMode::FixMismatches => "fix-mismatches",
            MigrationMode::FixAll => "fix-all",
        };
        f.write_str(name)
    }
}

impl FromStr for MigrationMode {
    type Err = MigrationModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(MigrationMode::Strict),
            "fix-mismatches" => Ok(MigrationMode::FixMismatches),
            "fix-all" => Ok(MigrationMode::FixAll),
            _ => Err(MigrationModeError::Unknown(s.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MigrationModeError {
    #[error("Unknown migration mode: {0}")]
    Unknown(String),

    #[error("--fix-names and --fix-all-names cannot be combined")]
    ConflictingFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict() {
        assert_eq!(MigrationMode::default(), MigrationMode::Strict);
    }

    #[test]
    fn test_from_flags() {
        assert_eq!(MigrationMode::from_flags(false, false), Ok(MigrationMode::Strict));
        assert_eq!(MigrationMode::from_flags(true, false), Ok(MigrationMode::FixMismatches));
        assert_eq!(MigrationMode::from_flags(false, true), Ok(MigrationMode::FixAll));
        assert_eq!(
            MigrationMode::from_flags(true, true),
            Err(MigrationModeError::ConflictingFlags)
        );
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for mode in [MigrationMode::Strict, MigrationMode::FixMismatches, MigrationMode::FixAll] {
            assert_eq!(mode.to_string().parse::<MigrationMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_invalid_mode() {
        assert!("lenient".parse::<MigrationMode>().is_err());
        assert!("fix-names".parse::<MigrationMode>().is_err());
    }

    #[test]
    fn test_fix_all_skips_validation() {
        assert!(MigrationMode::Strict.validates_declarations());
        assert!(!MigrationMode::FixAll.validates_declarations());
    }
}
