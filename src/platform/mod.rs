//! Platform abstraction layer
//!
//! This module provides platform-specific implementations for:
//! - Finding the application data directory (settings file)
//! - Detecting whether the AppleScript bridge can be used at all

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(not(target_os = "macos"))]
pub mod other;

use anyhow::Result;
use std::path::PathBuf;

/// Platform-specific operations
pub trait Platform {
    /// Directory holding the settings file
    fn data_dir() -> Result<PathBuf>;

    /// Check if `osascript` is available
    fn scripting_available() -> bool;

    /// Get the platform name for logging
    fn name() -> &'static str;
}

/// Get the current platform implementation
#[cfg(target_os = "macos")]
pub use macos::MacOSPlatform as CurrentPlatform;

#[cfg(not(target_os = "macos"))]
pub use other::OtherPlatform as CurrentPlatform;

/// Get the data directory for the current platform
pub fn data_dir() -> Result<PathBuf> {
    CurrentPlatform::data_dir()
}

/// Check if the scripting bridge is usable on the current platform
pub fn scripting_available() -> bool {
    CurrentPlatform::scripting_available()
}

/// Name of the current platform
pub fn name() -> &'static str {
    CurrentPlatform::name()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_is_app_specific() {
        if let Ok(dir) = data_dir() {
            assert!(dir.ends_with(crate::APP_NAME));
        }
    }

    #[test]
    fn test_name() {
        assert!(!name().is_empty());
    }
}
