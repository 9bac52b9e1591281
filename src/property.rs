//! The closed set of Spotify properties
//!
//! Every property the application reads is listed here. The key of a
//! property is at the same time its AppleScript accessor, the key in the
//! fetch response and the placeholder name in format strings.

use std::fmt;

/// Where an accessor lives in Spotify's scripting dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Property of the application itself
    Player,
    /// Property of `current track`
    Track,
}

/// A single known player or track property
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Property {
    Repeating,
    SoundVolume,
    Shuffling,
    PlayerState,
    PlayerPosition,
    ShufflingEnabled,
    Version,
    Name,
    Artist,
    Album,
    AlbumArtist,
    Duration,
    DiscNumber,
    PlayedCount,
    TrackNumber,
    Popularity,
    SpotifyUrl,
    Id,
    ArtworkUrl,
}

impl Property {
    /// Every property, in query order
    pub const ALL: [Property; 19] = [
        Property::Repeating,
        Property::SoundVolume,
        Property::Shuffling,
        Property::PlayerState,
        Property::PlayerPosition,
        Property::ShufflingEnabled,
        Property::Version,
        Property::Name,
        Property::Artist,
        Property::Album,
        Property::AlbumArtist,
        Property::Duration,
        Property::DiscNumber,
        Property::PlayedCount,
        Property::TrackNumber,
        Property::Popularity,
        Property::SpotifyUrl,
        Property::Id,
        Property::ArtworkUrl,
    ];

    /// Player properties listed in the Spotify submenu
    pub const PLAYER: [Property; 6] = [
        Property::Repeating,
        Property::SoundVolume,
        Property::Shuffling,
        Property::PlayerState,
        Property::PlayerPosition,
        Property::ShufflingEnabled,
    ];

    /// Track properties listed in the Current track submenu
    pub const TRACK: [Property; 12] = [
        Property::Name,
        Property::Artist,
        Property::Album,
        Property::AlbumArtist,
        Property::Duration,
        Property::DiscNumber,
        Property::PlayedCount,
        Property::TrackNumber,
        Property::Popularity,
        Property::SpotifyUrl,
        Property::Id,
        Property::ArtworkUrl,
    ];

    /// AppleScript accessor name, response key and placeholder name
    pub fn key(self) -> &'static str {
        match self {
            Property::Repeating => "repeating",
            Property::SoundVolume => "sound volume",
            Property::Shuffling => "shuffling",
            Property::PlayerState => "player state",
            Property::PlayerPosition => "player position",
            Property::ShufflingEnabled => "shuffling enabled",
            Property::Version => "version",
            Property::Name => "name",
            Property::Artist => "artist",
            Property::Album => "album",
            Property::AlbumArtist => "album artist",
            Property::Duration => "duration",
            Property::DiscNumber => "disc number",
            Property::PlayedCount => "played count",
            Property::TrackNumber => "track number",
            Property::Popularity => "popularity",
            Property::SpotifyUrl => "spotify url",
            Property::Id => "id",
            Property::ArtworkUrl => "artwork url",
        }
    }

    pub fn scope(self) -> Scope {
        match self {
            Property::Repeating
            | Property::SoundVolume
            | Property::Shuffling
            | Property::PlayerState
            | Property::PlayerPosition
            | Property::ShufflingEnabled
            | Property::Version => Scope::Player,
            _ => Scope::Track,
        }
    }

    /// AppleScript expression reading this property
    pub fn accessor(self) -> String {
        match self.scope() {
            Scope::Player => self.key().to_string(),
            Scope::Track => format!("{} of current track", self.key()),
        }
    }

    /// Look up a property by its key
    pub fn from_key(key: &str) -> Option<Property> {
        Property::ALL.into_iter().find(|p| p.key() == key)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip() {
        for property in Property::ALL {
            assert_eq!(Property::from_key(property.key()), Some(property));
        }
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(Property::from_key("starred"), None);
        assert_eq!(Property::from_key("Name"), None);
    }

    #[test]
    fn test_accessor_scope() {
        assert_eq!(Property::SoundVolume.accessor(), "sound volume");
        assert_eq!(Property::AlbumArtist.accessor(), "album artist of current track");
    }

    #[test]
    fn test_menu_groups_cover_all_but_version() {
        let mut grouped: Vec<Property> = Property::PLAYER.into_iter().chain(Property::TRACK).collect();
        grouped.push(Property::Version);
        grouped.sort();
        let mut all = Property::ALL.to_vec();
        all.sort();
        assert_eq!(grouped, all);
    }
}
