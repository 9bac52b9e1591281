//! Spotify menu bar controller
//!
//! This crate keeps a menu bar title in sync with what Spotify is playing and
//! forwards transport, shuffle/repeat and volume commands back to the player.
//! All communication with Spotify goes through AppleScript (`osascript`).
//!
//! Data flows one way per tick: [`spotify::Spotify`] fetches every known
//! property in one round trip, [`source::PropertySource`] normalizes and
//! caches the result, and [`presenter::Presenter`] renders it into a
//! [`presenter::MenuState`] that the tray front end displays.

use std::time::Duration;

pub mod applescript;
pub mod cache;
pub mod format;
pub mod menu;
pub mod platform;
pub mod presenter;
pub mod property;
pub mod settings;
pub mod snapshot;
pub mod source;
pub mod spotify;
#[cfg(target_os = "macos")]
pub mod tray;
pub mod util;

#[cfg(test)]
pub(crate) mod testing;

pub use format::FormatTemplate;
pub use presenter::{MenuState, Presenter, PresenterState};
pub use property::Property;
pub use snapshot::PropertySnapshot;
pub use spotify::{PlayerCommand, Spotify};

/// Name used for the data directory and log messages
pub const APP_NAME: &str = "spotify-menubar";

/// Application controlled through the scripting bridge
pub const TARGET_APP: &str = "Spotify";

/// How often the menu bar refreshes
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// How long a fetched snapshot is reused before asking Spotify again
pub const CACHE_TTL: Duration = Duration::from_millis(500);

/// Upper bound on a single `osascript` round trip
pub const SCRIPT_TIMEOUT: Duration = Duration::from_secs(3);

/// Upper bound on a dialog waiting for the user
pub const DIALOG_TIMEOUT: Duration = Duration::from_secs(300);
