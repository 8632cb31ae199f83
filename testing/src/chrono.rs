//! A clock for tests; the time stands still at the timestamp set for
//! the current thread.

use chrono::{
    DateTime,
    TimeZone,
};
use std::cell::Cell;

pub const DEFAULT_TIMESTAMP: i64 = 1234567890;

thread_local! {
    static TIMESTAMP: Cell<i64> = const { Cell::new(DEFAULT_TIMESTAMP) };
}

pub struct Utc;

impl Utc {
    pub fn now() -> DateTime<chrono::Utc> {
        chrono::Utc.timestamp_opt(TIMESTAMP.with(Cell::get), 0)
            .single()
            .expect("timestamp out of range")
    }
}

pub fn set_timestamp(timestamp: i64) {
    TIMESTAMP.with(|cell| cell.set(timestamp));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock() {
        assert_eq!(Utc::now().timestamp(), DEFAULT_TIMESTAMP);
        set_timestamp(42);
        assert_eq!(Utc::now().timestamp(), 42);
        assert_eq!(Utc::now().timestamp(), 42);
    }
}
