//! macOS platform implementation

use super::Platform;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::APP_NAME;

const OSASCRIPT: &str = "/usr/bin/osascript";

/// macOS platform implementation
pub struct MacOSPlatform;

impl Platform for MacOSPlatform {
    fn data_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home
            .join("Library")
            .join("Application Support")
            .join(APP_NAME))
    }

    fn scripting_available() -> bool {
        Path::new(OSASCRIPT).exists()
    }

    fn name() -> &'static str {
        "macOS"
    }
}
