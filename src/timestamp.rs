use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// A serializable wall-clock timestamp
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
pub struct TimeStamp {
    /// Seconds since Unix epoch
    pub seconds: u64,
    /// Nanoseconds part
    pub nanos: u32,
}

impl TimeStamp {
    /// Create a new timestamp from the current system time
    ///
    /// A clock set before the Unix epoch yields the zero timestamp.
    #[must_use]
    pub fn now() -> Self {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| Self { seconds: duration.as_secs(), nanos: duration.subsec_nanos() })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_after_epoch() {
        let first = TimeStamp::now();
        let second = TimeStamp::now();
        assert!(first.seconds > 0);
        assert!(second >= first);
    }
}
