//! Menu bar presenter
//!
//! Owns everything the menu shows as a plain [`MenuState`], updated once per
//! tick from the cached snapshot, and turns user actions into player
//! commands or format string edits.
//!
//! The presenter has two states. It starts [`PresenterState::Idle`], becomes
//! [`PresenterState::Live`] on the first snapshot and drops back to `Idle`
//! whenever Spotify is unavailable. Going `Idle` never clears what is on
//! screen; the previous title stays until a new snapshot arrives.

use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

use crate::applescript::ScriptRunner;
use crate::format::FormatTemplate;
use crate::property::Property;
use crate::settings::{Options, Settings, SettingsStore};
use crate::snapshot::PropertySnapshot;
use crate::source::PropertySource;
use crate::spotify::PlayerCommand;
use crate::util;

/// Longest property value shown in a menu line
const MENU_VALUE_CHARS: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterState {
    /// No snapshot yet, or Spotify is not running
    Idle,
    /// The last fetch succeeded
    Live,
}

/// Everything the menu displays
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuState {
    /// Menu bar title, `None` until the first snapshot
    pub title: Option<String>,
    pub version: Option<String>,
    pub player_lines: Vec<(Property, String)>,
    pub track_lines: Vec<(Property, String)>,
    pub shuffle: bool,
    pub repeat: bool,
    pub volume: u8,
}

pub struct Presenter<R> {
    source: PropertySource<R>,
    settings: SettingsStore,
    template: FormatTemplate,
    state: PresenterState,
    menu: MenuState,
    last: Option<PropertySnapshot>,
}

impl<R: ScriptRunner> Presenter<R> {
    /// Create a presenter using the format string stored in `settings`
    pub fn new(source: PropertySource<R>, settings: SettingsStore) -> Self {
        let template = settings.load().template();
        info!("Using format string '{template}'");
        Self {
            source,
            settings,
            template,
            state: PresenterState::Idle,
            menu: MenuState::default(),
            last: None,
        }
    }

    pub fn state(&self) -> PresenterState {
        self.state
    }

    pub fn menu(&self) -> &MenuState {
        &self.menu
    }

    pub fn template(&self) -> &FormatTemplate {
        &self.template
    }

    /// Refresh the menu from Spotify.
    ///
    /// Returns whether the menu state was updated.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(snapshot) = self.source.snapshot(now) else {
            if self.state == PresenterState::Live {
                info!("Spotify unavailable, keeping last title");
            }
            self.state = PresenterState::Idle;
            return false;
        };

        if self.state == PresenterState::Idle {
            info!("Spotify available");
        }
        self.state = PresenterState::Live;

        self.menu = MenuState {
            title: Some(self.template.render(&snapshot)),
            version: Some(snapshot.get(Property::Version).to_string()),
            player_lines: lines(&snapshot, &Property::PLAYER),
            track_lines: lines(&snapshot, &Property::TRACK),
            shuffle: snapshot.flag(Property::Shuffling),
            repeat: snapshot.flag(Property::Repeating),
            volume: snapshot.volume(),
        };
        self.last = Some(snapshot);
        true
    }

    /// Forward a transport command
    pub fn send(&self, command: PlayerCommand) -> Result<()> {
        self.source.spotify().send(command)
    }

    /// Flip shuffle, showing the new state before Spotify confirms it
    pub fn toggle_shuffle(&mut self) -> Result<bool> {
        let on = !self.menu.shuffle;
        self.menu.shuffle = on;
        self.send(PlayerCommand::SetShuffling(on))?;
        Ok(on)
    }

    /// Flip repeat, showing the new state before Spotify confirms it
    pub fn toggle_repeat(&mut self) -> Result<bool> {
        let on = !self.menu.repeat;
        self.menu.repeat = on;
        self.send(PlayerCommand::SetRepeating(on))?;
        Ok(on)
    }

    pub fn set_volume(&mut self, volume: u8) -> Result<()> {
        let volume = volume.min(100);
        self.menu.volume = volume;
        self.send(PlayerCommand::SetVolume(volume))
    }

    /// Replace the format string and persist it.
    ///
    /// Invalid format strings are rejected and leave everything unchanged.
    pub fn set_format_string(&mut self, text: &str) -> Result<()> {
        let template = FormatTemplate::parse(text.trim())?;
        debug!("Format string set to '{template}'");

        if let Some(snapshot) = &self.last {
            self.menu.title = Some(template.render(snapshot));
        }
        self.template = template;

        let settings = Settings {
            options: Options {
                format_string: self.template.source().to_string(),
            },
        };
        self.settings
            .save(&settings)
            .with_context(|| format!("Failed to save {}", self.settings.path().display()))
    }

    /// Help text for the format string dialog, with current values
    pub fn format_help(&self) -> String {
        let value = |property: Property| self.last.as_ref().map_or("", |s| s.get(property));
        let tokens = |properties: &[Property]| {
            properties
                .iter()
                .map(|p| format!("{{{}}} - {}", p.key(), util::truncate(value(*p), MENU_VALUE_CHARS)))
                .collect::<Vec<_>>()
                .join("\n")
        };

        format!(
            "Enter any text you'd like displayed in the menu bar.\n\n\
             The following tokens are replaced with the listed values. \
             Use {{name:.20}} to keep at most 20 characters, {{{{ and }}}} for literal braces.\n\n\
             TRACK PROPERTIES:\n{}\n\n\
             PLAYER PROPERTIES:\n{}",
            tokens(&Property::TRACK),
            tokens(&Property::PLAYER),
        )
    }
}

fn lines(snapshot: &PropertySnapshot, properties: &[Property]) -> Vec<(Property, String)> {
    properties
        .iter()
        .map(|p| (*p, format!("{p}: {}", util::truncate(snapshot.get(*p), MENU_VALUE_CHARS))))
        .collect()
}
