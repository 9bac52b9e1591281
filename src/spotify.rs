//! Spotify property fetcher and transport commands

use anyhow::Result;
use log::{debug, warn};
use std::collections::BTreeMap;

use crate::applescript::{self, ScriptRunner};
use crate::property::Property;
use crate::snapshot::PropertySnapshot;
use crate::TARGET_APP;

/// Commands Spotify accepts without returning anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Play,
    Pause,
    PlayPause,
    NextTrack,
    PreviousTrack,
    /// Launch or bring Spotify to the front
    Activate,
    Quit,
    SetShuffling(bool),
    SetRepeating(bool),
    /// Sound volume in percent, clamped to 100
    SetVolume(u8),
}

impl PlayerCommand {
    /// AppleScript command text, without the `tell`
    pub fn script(self) -> String {
        match self {
            PlayerCommand::Play => "play".to_string(),
            PlayerCommand::Pause => "pause".to_string(),
            PlayerCommand::PlayPause => "playpause".to_string(),
            PlayerCommand::NextTrack => "next track".to_string(),
            PlayerCommand::PreviousTrack => "previous track".to_string(),
            PlayerCommand::Activate => "activate".to_string(),
            PlayerCommand::Quit => "quit".to_string(),
            PlayerCommand::SetShuffling(on) => format!("set shuffling to {on}"),
            PlayerCommand::SetRepeating(on) => format!("set repeating to {on}"),
            PlayerCommand::SetVolume(volume) => format!("set sound volume to {}", volume.min(100)),
        }
    }
}

/// Spotify as seen through the scripting bridge
pub struct Spotify<R> {
    runner: R,
    query: String,
}

impl<R: ScriptRunner> Spotify<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            query: applescript::build_query(TARGET_APP, &Property::ALL),
        }
    }

    /// Fetch every property in one round trip.
    ///
    /// Returns `Ok(None)` when Spotify is not running.
    pub fn fetch(&self) -> Result<Option<PropertySnapshot>> {
        let output = self.runner.run(&self.query)?;
        let Some(raw) = applescript::parse_response(&output)? else {
            debug!("{TARGET_APP} is not running");
            return Ok(None);
        };

        let mut values = BTreeMap::new();
        for (key, value) in raw {
            match Property::from_key(&key) {
                Some(property) => {
                    values.insert(property, value);
                }
                None => warn!("Ignoring unexpected property '{key}'"),
            }
        }

        PropertySnapshot::from_values(values).map(Some)
    }

    /// Send a command, ignoring its output
    pub fn send(&self, command: PlayerCommand) -> Result<()> {
        let script = match command {
            // Unguarded so it can start Spotify
            PlayerCommand::Activate => format!(r#"tell application "{TARGET_APP}" to activate"#),
            _ => applescript::guarded(TARGET_APP, &command.script()),
        };
        debug!("Sending '{}'", command.script());
        self.runner.run(&script)?;
        Ok(())
    }
}
