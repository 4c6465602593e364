//! Shared helpers for in-memory integration tests.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use pensum::identity::domain::UserId;

/// Clock pinned to a fixed instant for deterministic status derivation.
#[derive(Debug, Clone)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A reference instant used across the suites.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// A user identifier for test ownership.
pub fn owner() -> UserId {
    UserId::new("user-alice").expect("valid user id")
}

/// A second user identifier for foreign-ownership cases.
pub fn stranger() -> UserId {
    UserId::new("user-mallory").expect("valid user id")
}
