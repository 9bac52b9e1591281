//! Test doubles shared by the unit tests

use anyhow::Result;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::applescript::{ScriptError, ScriptRunner};
use crate::property::Property;

#[derive(Default)]
struct Inner {
    responses: VecDeque<Result<String, ScriptError>>,
    scripts: Vec<String>,
}

/// Records every script and replays queued responses.
///
/// Clones share state, so a test can keep a handle after moving a clone
/// into the code under test. With an empty queue every script succeeds with
/// no output.
#[derive(Clone, Default)]
pub struct FakeRunner {
    inner: Rc<RefCell<Inner>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, output: &str) {
        self.inner.borrow_mut().responses.push_back(Ok(output.to_string()));
    }

    pub fn push_err(&self, error: ScriptError) {
        self.inner.borrow_mut().responses.push_back(Err(error));
    }

    pub fn scripts(&self) -> Vec<String> {
        self.inner.borrow().scripts.clone()
    }

    pub fn clear_scripts(&self) {
        self.inner.borrow_mut().scripts.clear();
    }
}

impl ScriptRunner for FakeRunner {
    fn run(&self, script: &str) -> Result<String> {
        let mut inner = self.inner.borrow_mut();
        inner.scripts.push(script.to_string());
        match inner.responses.pop_front() {
            Some(Ok(output)) => Ok(output),
            Some(Err(e)) => Err(e.into()),
            None => Ok(String::new()),
        }
    }
}

/// Raw values for a track that is currently playing
pub fn raw_values() -> Vec<(Property, &'static str)> {
    vec![
        (Property::Repeating, "false"),
        (Property::SoundVolume, "64"),
        (Property::Shuffling, "true"),
        (Property::PlayerState, "playing"),
        (Property::PlayerPosition, "65.123"),
        (Property::ShufflingEnabled, "true"),
        (Property::Version, "1.2.3"),
        (Property::Name, "Don't Stop"),
        (Property::Artist, "Fleetwood Mac"),
        (Property::Album, "Rumours"),
        (Property::AlbumArtist, "Fleetwood Mac"),
        (Property::Duration, "193000"),
        (Property::DiscNumber, "1"),
        (Property::PlayedCount, "0"),
        (Property::TrackNumber, "4"),
        (Property::Popularity, "77"),
        (Property::SpotifyUrl, "spotify:track:4ZzTFkx0Ki1mVsb3BqLsW0"),
        (Property::Id, "spotify:track:4ZzTFkx0Ki1mVsb3BqLsW0"),
        (Property::ArtworkUrl, "https://i.scdn.co/image/ab67616d0000b273"),
    ]
}

/// A property response as `osascript` would print it
pub fn response(values: &[(Property, &str)]) -> String {
    let quote = |s: &str| format!("'{}'", s.replace('\'', r"'\''"));
    let body = values
        .iter()
        .map(|(p, v)| format!("{}: {}", quote(p.key()), quote(v)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{body}}}")
}
