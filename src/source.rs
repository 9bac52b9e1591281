//! Display-ready, cached property snapshots
//!
//! [`PropertySource`] is the fetch boundary: it asks Spotify for properties,
//! normalizes them for display and keeps the result for a short time so
//! several readers within one tick see the same snapshot. Fetch errors stop
//! here and become "unavailable".

use log::debug;
use std::time::{Duration, Instant};

use crate::applescript::ScriptRunner;
use crate::cache::TtlCache;
use crate::format::display_snapshot;
use crate::snapshot::PropertySnapshot;
use crate::spotify::Spotify;

pub struct PropertySource<R> {
    spotify: Spotify<R>,
    cache: TtlCache<Option<PropertySnapshot>>,
}

impl<R: ScriptRunner> PropertySource<R> {
    pub fn new(spotify: Spotify<R>, ttl: Duration) -> Self {
        Self {
            spotify,
            cache: TtlCache::new(ttl),
        }
    }

    pub fn spotify(&self) -> &Spotify<R> {
        &self.spotify
    }

    /// Display-ready snapshot, or `None` when Spotify is unavailable
    pub fn snapshot(&mut self, now: Instant) -> Option<PropertySnapshot> {
        let spotify = &self.spotify;
        self.cache
            .get_or_insert_with(now, || match spotify.fetch() {
                Ok(raw) => raw.as_ref().map(display_snapshot),
                Err(e) => {
                    debug!("Failed to read Spotify properties: {e:#}");
                    None
                }
            })
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applescript::ScriptError;
    use crate::property::Property;
    use crate::testing::{raw_values, response, FakeRunner};

    const TTL: Duration = Duration::from_millis(500);

    fn source(runner: &FakeRunner) -> PropertySource<FakeRunner> {
        PropertySource::new(Spotify::new(runner.clone()), TTL)
    }

    #[test]
    fn test_snapshot_is_display_ready() {
        let runner = FakeRunner::new();
        runner.push_ok(&response(&raw_values()));
        let snapshot = source(&runner).snapshot(Instant::now()).unwrap();
        assert_eq!(snapshot.get(Property::Duration), "3:13");
        assert_eq!(snapshot.get(Property::PlayerPosition), "1:05");
    }

    #[test]
    fn test_reads_within_ttl_share_one_fetch() {
        let runner = FakeRunner::new();
        runner.push_ok(&response(&raw_values()));
        let mut source = source(&runner);
        let start = Instant::now();

        let first = source.snapshot(start);
        let second = source.snapshot(start + Duration::from_millis(200));
        assert_eq!(first, second);
        assert_eq!(runner.scripts().len(), 1);

        source.snapshot(start + Duration::from_millis(700));
        assert_eq!(runner.scripts().len(), 2);
    }

    #[test]
    fn test_errors_become_unavailable() {
        let runner = FakeRunner::new();
        runner.push_err(ScriptError {
            code: Some(1),
            stderr: "boom".to_string(),
        });
        assert!(source(&runner).snapshot(Instant::now()).is_none());
    }

    #[test]
    fn test_malformed_response_becomes_unavailable() {
        let runner = FakeRunner::new();
        runner.push_ok("{'name': 'x'");
        assert!(source(&runner).snapshot(Instant::now()).is_none());
    }
}
