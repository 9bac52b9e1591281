//! Menu layout and menu item identifiers
//!
//! Kept free of any GUI types so that the mapping from clicks to actions can
//! be tested on every platform.

use crate::spotify::PlayerCommand;

pub const MENU_ID_LAUNCH: &str = "launch";
pub const MENU_ID_QUIT_PLAYER: &str = "quit-spotify";
pub const MENU_ID_VERSION: &str = "version";
pub const MENU_ID_FORMAT_STRING: &str = "format-string";
pub const MENU_ID_SHUFFLE: &str = "shuffle";
pub const MENU_ID_REPEAT: &str = "repeat";
pub const MENU_ID_QUIT: &str = "quit";
const MENU_ID_VOLUME_PREFIX: &str = "volume-";
const MENU_ID_PROPERTY_PREFIX: &str = "property-";

/// Selectable volume levels, loudest first
pub const VOLUME_STEPS: [u8; 11] = [100, 90, 80, 70, 60, 50, 40, 30, 20, 10, 0];

/// Transport items in menu order
pub const TRANSPORT: [(&str, &str, PlayerCommand); 5] = [
    ("play", "Play", PlayerCommand::Play),
    ("pause", "Pause", PlayerCommand::Pause),
    ("playpause", "Play / Pause", PlayerCommand::PlayPause),
    ("next", "Next track", PlayerCommand::NextTrack),
    ("previous", "Previous track", PlayerCommand::PreviousTrack),
];

/// Something the user asked for from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Player(PlayerCommand),
    EditFormatString,
    ToggleShuffle,
    ToggleRepeat,
    SetVolume(u8),
    /// Quit this application (not Spotify)
    Quit,
}

impl MenuAction {
    /// Action for a clicked menu item; informational items have none
    pub fn from_id(id: &str) -> Option<MenuAction> {
        if let Some((_, _, command)) = TRANSPORT.iter().find(|(item, _, _)| *item == id) {
            return Some(MenuAction::Player(*command));
        }
        if let Some(level) = id.strip_prefix(MENU_ID_VOLUME_PREFIX) {
            return level
                .parse::<u8>()
                .ok()
                .filter(|v| VOLUME_STEPS.contains(v))
                .map(MenuAction::SetVolume);
        }
        match id {
            MENU_ID_LAUNCH => Some(MenuAction::Player(PlayerCommand::Activate)),
            MENU_ID_QUIT_PLAYER => Some(MenuAction::Player(PlayerCommand::Quit)),
            MENU_ID_FORMAT_STRING => Some(MenuAction::EditFormatString),
            MENU_ID_SHUFFLE => Some(MenuAction::ToggleShuffle),
            MENU_ID_REPEAT => Some(MenuAction::ToggleRepeat),
            MENU_ID_QUIT => Some(MenuAction::Quit),
            _ => None,
        }
    }
}

/// Menu id of a volume level item
pub fn volume_id(level: u8) -> String {
    format!("{MENU_ID_VOLUME_PREFIX}{level}")
}

/// Menu id of a read-only property line
pub fn property_id(key: &str) -> String {
    format!("{MENU_ID_PROPERTY_PREFIX}{}", key.replace(' ', "-"))
}

/// Volume step closest to `volume`
pub fn nearest_volume_step(volume: u8) -> u8 {
    let rounded = (u16::from(volume.min(100)) + 5) / 10 * 10;
    u8::try_from(rounded).unwrap_or(100)
}
