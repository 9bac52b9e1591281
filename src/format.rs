//! Display formatting
//!
//! Turns raw Spotify values into what the menu shows, and renders the
//! user's format string into the menu bar title.
//!
//! # Format strings
//!
//! A format string is free text with placeholders naming properties by key:
//!
//! ```text
//! {name:.50} - {album:.50} ({player position} / {duration})
//! ```
//!
//! `{key:.N}` keeps at most N characters of the value. `{{` and `}}` produce
//! literal braces.

use anyhow::{bail, Result};
use log::debug;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::property::Property;
use crate::snapshot::PropertySnapshot;

/// Format string used until the user sets one
pub const DEFAULT_FORMAT_STRING: &str = "{name:.50} - {album:.50} ({player position} / {duration})";

/// Album shown in place of an advertisement's click-through URL
pub const AD_ALBUM: &str = "Spotify Ad";

/// Album prefixes Spotify uses while an ad is playing
const AD_PREFIXES: [&str; 3] = ["http://", "https://", "spotify:"];

/// Escaped braces or one placeholder
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{|\}\}|\{([^{}]*)\}").unwrap());

/// Precision spec after the colon, e.g. `.50`
static PRECISION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\.(\d+)$").unwrap());

/// Format seconds as `M:SS`.
///
/// Minutes are not wrapped at the hour; negative or non-finite input gives `0:00`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Parse a number as printed by AppleScript, which may use a decimal comma
pub fn parse_seconds(text: &str) -> Option<f64> {
    text.trim().replace(',', ".").parse().ok()
}

/// Whether an album value is an ad click-through link
pub fn is_ad(album: &str) -> bool {
    AD_PREFIXES.iter().any(|prefix| album.starts_with(prefix))
}

/// Normalize a raw snapshot for display.
///
/// `duration` arrives in milliseconds and `player position` in seconds;
/// both become `M:SS`. Ad albums are replaced with [`AD_ALBUM`].
pub fn display_snapshot(raw: &PropertySnapshot) -> PropertySnapshot {
    raw.map_values(|property, value| match property {
        Property::Duration => time_or_raw(property, value, 1000.0),
        Property::PlayerPosition => time_or_raw(property, value, 1.0),
        Property::Album if is_ad(value) => AD_ALBUM.to_string(),
        _ => value.to_string(),
    })
}

fn time_or_raw(property: Property, value: &str, per_second: f64) -> String {
    match parse_seconds(value) {
        Some(n) => format_time(n / per_second),
        None => {
            debug!("Leaving unparseable {property} '{value}' as is");
            value.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field {
        property: Property,
        precision: Option<usize>,
    },
}

/// A parsed, validated format string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl FormatTemplate {
    /// Parse a format string.
    ///
    /// Fails on unknown property keys, format specs other than `.N` and
    /// unmatched braces, so that rendering a complete snapshot cannot fail.
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut last = 0;

        for caps in TOKEN_RE.captures_iter(source) {
            let Some(token) = caps.get(0) else { continue };
            push_literal(&mut literal, &source[last..token.start()])?;
            last = token.end();

            match (token.as_str(), caps.get(1)) {
                ("{{", _) => literal.push('{'),
                ("}}", _) => literal.push('}'),
                (_, Some(field)) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(parse_field(field.as_str())?);
                }
                _ => unreachable!("token regex only matches braces or fields"),
            }
        }
        push_literal(&mut literal, &source[last..])?;
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The text this template was parsed from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Properties referenced by the template, in order of appearance
    pub fn placeholders(&self) -> impl Iterator<Item = Property> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Field { property, .. } => Some(*property),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute every placeholder with its value from `snapshot`
    pub fn render(&self, snapshot: &PropertySnapshot) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field { property, precision } => {
                    let value = snapshot.get(*property);
                    match precision {
                        Some(n) => out.extend(value.chars().take(*n)),
                        None => out.push_str(value),
                    }
                }
            }
        }
        out
    }
}

impl Default for FormatTemplate {
    fn default() -> Self {
        Self::parse(DEFAULT_FORMAT_STRING).unwrap_or_else(|_| unreachable!("default format string parses"))
    }
}

impl fmt::Display for FormatTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Literal text between tokens may not contain a lone brace
fn push_literal(literal: &mut String, text: &str) -> Result<()> {
    if let Some(brace) = text.chars().find(|c| *c == '{' || *c == '}') {
        bail!("Unmatched '{brace}' in format string (use '{brace}{brace}' for a literal brace)");
    }
    literal.push_str(text);
    Ok(())
}

fn parse_field(field: &str) -> Result<Segment> {
    let (key, spec) = match field.split_once(':') {
        Some((key, spec)) => (key, Some(spec)),
        None => (field, None),
    };

    let Some(property) = Property::from_key(key) else {
        bail!("Unknown placeholder '{{{key}}}'");
    };

    let precision = match spec {
        None => None,
        Some(spec) => {
            let Some(caps) = PRECISION_RE.captures(spec) else {
                bail!("Unsupported format spec '{spec}' for '{key}' (only '.N' is allowed)");
            };
            Some(caps[1].parse()?)
        }
    };

    Ok(Segment::Field { property, precision })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::testing::raw_values;
    use proptest::prelude::*;

    fn raw() -> PropertySnapshot {
        let values = raw_values().into_iter().map(|(p, v)| (p, v.to_string())).collect();
        PropertySnapshot::from_values(values).unwrap()
    }

    proptest! {
        #[test]
        fn prop_format_time_minutes_seconds(n in 0u64..1_000_000) {
            #[allow(clippy::cast_precision_loss)]
            let formatted = format_time(n as f64);
            prop_assert_eq!(formatted, format!("{}:{:02}", n / 60, n % 60));
        }

        #[test]
        fn prop_ad_albums_replaced(prefix in prop::sample::select(AD_PREFIXES.to_vec()), rest in ".{0,40}") {
            let album = format!("{prefix}{rest}");
            let display = display_snapshot(&raw().map_values(|p, v| {
                if p == Property::Album { album.clone() } else { v.to_string() }
            }));
            prop_assert_eq!(display.get(Property::Album), AD_ALBUM);
        }

        #[test]
        fn prop_other_albums_pass_through(album in "[A-Za-z0-9 ]{0,40}") {
            let display = display_snapshot(&raw().map_values(|p, v| {
                if p == Property::Album { album.clone() } else { v.to_string() }
            }));
            prop_assert_eq!(display.get(Property::Album), album.as_str());
        }

        #[test]
        fn prop_render_substitutes_every_placeholder(
            picks in prop::collection::vec(prop::sample::select(Property::ALL.to_vec()), 0..8),
            sep in "[a-z /()-]{0,3}",
        ) {
            let source = picks
                .iter()
                .map(|p| format!("{{{}}}", p.key()))
                .collect::<Vec<_>>()
                .join(&sep);
            let template = FormatTemplate::parse(&source).unwrap();
            let snapshot = raw();
            let expected = picks
                .iter()
                .map(|p| snapshot.get(*p).to_string())
                .collect::<Vec<_>>()
                .join(&sep);
            prop_assert_eq!(template.render(&snapshot), expected);
        }
    }
}
