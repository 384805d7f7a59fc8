use chrono::{DateTime, Utc};

/// Clock port - the single source of "now" for the domain.
///
/// Timestamps (`pub_date`, cache expiry) always come from an injected
/// clock so time-dependent behavior is deterministic under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
