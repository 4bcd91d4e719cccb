use std::time::Duration;

use rand::Rng;

/// A Recreation.gov campground tracked by the watcher.
#[derive(Debug, Clone)]
pub struct Campground {
    /// Recreation.gov facility id.
    pub id: u32,
    /// Display name used in logs and notifications.
    pub name: String,
}

impl Campground {
    /// Create a campground entry from an id and display name.
    pub fn new(id: u32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

/// Delay between poll cycles.
#[derive(Debug, Clone)]
pub enum PollInterval {
    /// Sleep the same duration after every cycle.
    Fixed(Duration),
    /// Sleep a duration drawn uniformly from `[min, max]` after every cycle.
    /// `min` must not exceed `max`.
    Uniform {
        /// Shortest possible delay.
        min: Duration,
        /// Longest possible delay.
        max: Duration,
    },
}

impl PollInterval {
    /// Duration to sleep before the next poll cycle.
    pub fn next_delay(&self) -> Duration {
        match self {
            PollInterval::Fixed(delay) => *delay,
            PollInterval::Uniform { min, max } => rand::rng().random_range(*min..=*max),
        }
    }
}

/// Immutable watcher configuration, fixed for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Year of the month being watched.
    pub year: i32,

    /// Month being watched (1-12).
    pub month: u32,

    /// First day of the check-in window.
    pub checkin_day: u32,

    /// Day the window ends, exclusive.
    pub checkout_day: u32,

    /// Delay between poll cycles.
    pub poll_interval: PollInterval,

    /// Campgrounds polled each cycle, in order.
    pub campgrounds: Vec<Campground>,

    /// Send a push notification once at startup, before the first cycle.
    pub startup_ping: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            year: 2025,
            month: 8,
            checkin_day: 9,
            checkout_day: 11,
            poll_interval: PollInterval::Fixed(Duration::from_secs(60)),
            campgrounds: vec![
                Campground::new(232447, "Kalaloch"),
                Campground::new(232450, "Mora"),
                Campground::new(247592, "Hoh Rainforest"),
                Campground::new(234052, "Sol Duc"),
                Campground::new(233105, "Fairholme"),
            ],
            startup_ping: false,
        }
    }
}

/// Errors raised while polling for availability.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// Transport failure while talking to the availability API.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success response or undecodable payload from the availability API.
    #[error("API error: {0}")]
    ApiError(String),

    /// Malformed data encountered while building a request.
    #[error("Data format error: {0}")]
    DataFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_interval_returns_configured_delay() {
        let interval = PollInterval::Fixed(Duration::from_secs(60));
        assert_eq!(interval.next_delay(), Duration::from_secs(60));
    }

    #[test]
    fn uniform_interval_stays_in_range() {
        let interval = PollInterval::Uniform {
            min: Duration::from_secs(30),
            max: Duration::from_secs(90),
        };

        for _ in 0..100 {
            let delay = interval.next_delay();
            assert!(delay >= Duration::from_secs(30));
            assert!(delay <= Duration::from_secs(90));
        }
    }
}
