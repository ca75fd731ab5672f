//! Cached, failure-tolerant holiday lookup.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use tracing::{debug, warn};

use super::fallback::fallback_holidays;
use super::source::HolidaySource;

/// Wall-clock abstraction so cache expiry is testable without real elapsed
/// time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// [`Clock`] backed by the system clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

struct CacheEntry {
    holidays: HashSet<NaiveDate>,
    fetched_at: DateTime<Utc>,
}

/// Holiday lookup with a per-year cache and silent fallback.
///
/// A fetched year is served from cache for 24 hours. When the source fails
/// (transport error, non-2xx, malformed payload) the static fallback table is
/// returned instead; failures are never cached and never propagate to the
/// caller.
pub struct HolidayCalendar<S: HolidaySource> {
    source: S,
    clock: Arc<dyn Clock>,
    cache: Mutex<HashMap<i32, CacheEntry>>,
    ttl: TimeDelta,
}

impl<S: HolidaySource> HolidayCalendar<S> {
    pub fn new(source: S) -> Self {
        Self::with_clock(source, Arc::new(SystemClock))
    }

    pub fn with_clock(source: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            clock,
            cache: Mutex::new(HashMap::new()),
            ttl: TimeDelta::hours(24),
        }
    }

    /// Resolves the holiday set for `year`. Infallible by contract.
    pub async fn holidays_for(&self, year: i32) -> HashSet<NaiveDate> {
        let now = self.clock.now();

        // Lock is released before the fetch; the cache is read-mostly and
        // staleness, not races, is its only concern.
        {
            let cache = self.cache.lock().unwrap();
            if let Some(entry) = cache.get(&year) {
                if now - entry.fetched_at < self.ttl {
                    debug!(year, count = entry.holidays.len(), "Holiday cache hit");
                    return entry.holidays.clone();
                }
            }
        }

        match self.source.fetch_year(year).await {
            Ok(holidays) => {
                debug!(year, count = holidays.len(), "Holiday source fetched");
                let mut cache = self.cache.lock().unwrap();
                cache.insert(
                    year,
                    CacheEntry {
                        holidays: holidays.clone(),
                        fetched_at: now,
                    },
                );
                holidays
            }
            Err(e) => {
                warn!(year, error = %e, "Holiday source failed, using fallback table");
                fallback_holidays(year)
            }
        }
    }
}
