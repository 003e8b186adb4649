// Bookshelf
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Collection of clock implementations.

use time::OffsetDateTime;

/// Generic definition of a clock.
pub trait Clock {
    /// Returns the current UTC time.
    fn now_utc(&self) -> OffsetDateTime;
}

/// Clock implementation that uses the system clock.
#[derive(Clone, Default)]
pub struct SystemClock {}

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        let now = OffsetDateTime::now_utc();

        // Truncate the timestamp to microsecond resolution as this is the resolution supported by
        // timestamps in the PostgreSQL database.  Otherwise a book we just stored would not
        // compare equal to the same book read back from the database.
        let nanos = now.nanosecond();
        now.replace_nanosecond(nanos / 1000 * 1000).unwrap_or(now)
    }
}

/// Test utilities.
#[cfg(any(test, feature = "testutils"))]
pub mod testutils {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::Duration;
    use time::{Date, Month, Time};

    /// Creates a new UTC timestamp from its components.  All inputs must be valid.
    pub fn utc_datetime(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> OffsetDateTime {
        let month = Month::try_from(month).expect("Month must be valid");
        let date = Date::from_calendar_date(year, month, day).expect("Date must be valid");
        let time = Time::from_hms(hour, minute, second).expect("Time must be valid");
        date.with_time(time).assume_utc()
    }

    /// Converts `us` microseconds since the epoch to a timestamp.
    fn from_micros(us: u64) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(us) * 1000)
            .expect("Test timestamps must be in range")
    }

    /// A clock that returns a preconfigured instant and that can be advanced at will.
    ///
    /// Only supports microsecond-level precision.
    pub struct SettableClock {
        /// Current fake time in microseconds.
        now_us: AtomicU64,
    }

    impl SettableClock {
        /// Creates a new clock that returns `now` until advanced.
        pub fn new(now: OffsetDateTime) -> Self {
            let now_ns = now.unix_timestamp_nanos();
            assert!(now_ns % 1000 == 0, "Nanosecond precision not supported");
            let now_us = u64::try_from(now_ns / 1000).unwrap();
            Self { now_us: AtomicU64::new(now_us) }
        }

        /// Advances the current time by `delta`.
        pub fn advance(&self, delta: Duration) {
            let delta_us = u64::try_from(delta.as_micros()).unwrap();
            assert!(delta.subsec_nanos() % 1000 == 0, "Nanosecond precision not supported");
            self.now_us.fetch_add(delta_us, Ordering::SeqCst);
        }
    }

    impl Clock for SettableClock {
        fn now_utc(&self) -> OffsetDateTime {
            from_micros(self.now_us.load(Ordering::SeqCst))
        }
    }

    /// A clock that moves forward by one second every time it is queried.
    pub struct MonotonicClock {
        /// Seconds since the epoch to return on the next query.
        next_secs: AtomicU64,
    }

    impl MonotonicClock {
        /// Creates a new clock whose first query returns `start_secs` since the epoch.
        pub fn new(start_secs: u64) -> Self {
            Self { next_secs: AtomicU64::new(start_secs) }
        }
    }

    impl Clock for MonotonicClock {
        fn now_utc(&self) -> OffsetDateTime {
            let secs = self.next_secs.fetch_add(1, Ordering::SeqCst);
            from_micros(secs * 1_000_000)
        }
    }

}
