//! Time-bounded cache for a single value

use std::time::{Duration, Instant};

/// Holds one value together with the time it was stored.
///
/// The value expires purely by elapsed time; callers pass `now` explicitly.
#[derive(Debug, Clone)]
pub struct TtlCache<T> {
    ttl: Duration,
    entry: Option<(T, Instant)>,
}

impl<T> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached value, if it was stored less than `ttl` before `now`
    pub fn get(&self, now: Instant) -> Option<&T> {
        self.entry
            .as_ref()
            .filter(|(_, stored)| now.saturating_duration_since(*stored) < self.ttl)
            .map(|(value, _)| value)
    }

    pub fn insert(&mut self, value: T, now: Instant) {
        self.entry = Some((value, now));
    }

    /// The cached value, refreshed with `f` when missing or expired
    pub fn get_or_insert_with(&mut self, now: Instant, f: impl FnOnce() -> T) -> &T {
        if self.get(now).is_none() {
            self.insert(f(), now);
        }
        match &self.entry {
            Some((value, _)) => value,
            None => unreachable!("entry was just inserted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_millis(500);

    #[test]
    fn test_empty() {
        let cache: TtlCache<u32> = TtlCache::new(TTL);
        assert_eq!(cache.get(Instant::now()), None);
    }

    #[test]
    fn test_fresh_then_expired() {
        let start = Instant::now();
        let mut cache = TtlCache::new(TTL);
        cache.insert(7, start);
        assert_eq!(cache.get(start), Some(&7));
        assert_eq!(cache.get(start + Duration::from_millis(499)), Some(&7));
        assert_eq!(cache.get(start + TTL), None);
    }

    #[test]
    fn test_get_or_insert_with_reuses_fresh_value() {
        let start = Instant::now();
        let mut cache = TtlCache::new(TTL);
        let mut calls = 0;
        let mut next = || {
            calls += 1;
            calls
        };

        assert_eq!(*cache.get_or_insert_with(start, &mut next), 1);
        assert_eq!(*cache.get_or_insert_with(start + Duration::from_millis(100), &mut next), 1);
        assert_eq!(*cache.get_or_insert_with(start + Duration::from_millis(600), &mut next), 2);
    }

    #[test]
    fn test_clock_before_insert_counts_as_fresh() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut cache = TtlCache::new(TTL);
        cache.insert("x", start);
        assert_eq!(cache.get(start - Duration::from_millis(10)), Some(&"x"));
    }
}
