//! Fallback for platforms without AppleScript
//!
//! The settings file still has a home so the debug binary and tests work,
//! but Spotify cannot be reached.

use super::Platform;
use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::APP_NAME;

pub struct OtherPlatform;

impl Platform for OtherPlatform {
    fn data_dir() -> Result<PathBuf> {
        let base = dirs::data_dir().context("Could not find data directory")?;
        Ok(base.join(APP_NAME))
    }

    fn scripting_available() -> bool {
        false
    }

    fn name() -> &'static str {
        std::env::consts::OS
    }
}
