use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use ntfy_notify::Notifier;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::availability::{AvailabilityResult, find_available_dates, format_availability_message};
use crate::rec_gov_client::MonthAvailabilityResponse;
use crate::watch_types::{Campground, WatchConfig, WatchError};

/// Source of monthly campground availability payloads.
#[async_trait]
pub trait AvailabilitySource: Send + Sync {
    /// Fetch the availability payload for one campground and month.
    async fn fetch_month(
        &self,
        campground_id: u32,
        year: i32,
        month: u32,
    ) -> Result<MonthAvailabilityResponse, WatchError>;
}

/// Polling loop that watches campgrounds and reports new availability.
pub struct WatchExecutor {
    source: Arc<dyn AvailabilitySource>,
    notifier: Arc<dyn Notifier>,
    config: WatchConfig,

    /// Last reported availability per campground id.
    seen: HashMap<u32, AvailabilityResult>,
}

impl WatchExecutor {
    /// Create an executor over the given availability source and notifier.
    pub fn new(
        source: Arc<dyn AvailabilitySource>,
        notifier: Arc<dyn Notifier>,
        config: WatchConfig,
    ) -> Self {
        Self {
            source,
            notifier,
            config,
            seen: HashMap::new(),
        }
    }

    /// Run the polling loop until the process is terminated.
    pub async fn start(&mut self) -> Result<(), WatchError> {
        info!(
            "Starting availability watch for {} campgrounds",
            self.config.campgrounds.len()
        );

        if self.config.startup_ping {
            let ping = format!(
                "🏕️ Campsite watcher started. Monitoring {} campgrounds.",
                self.config.campgrounds.len()
            );
            if let Err(e) = self.notifier.notify(&ping).await {
                error!("Startup notification failed: {}", e);
            }
        }

        loop {
            self.run_cycle().await;

            let delay = self.config.poll_interval.next_delay();
            debug!("Cycle complete, sleeping {:?}", delay);
            sleep(delay).await;
        }
    }

    /// Poll every campground once, in order.
    ///
    /// A failure for one campground is logged and the cycle moves on to the
    /// next; it never aborts the cycle or the process.
    async fn run_cycle(&mut self) {
        let campgrounds = self.config.campgrounds.clone();

        for campground in &campgrounds {
            if let Err(e) = self.poll_campground(campground).await {
                error!("Failed to poll campground {}: {}", campground.name, e);
            }
        }
    }

    async fn poll_campground(&mut self, campground: &Campground) -> Result<(), WatchError> {
        let payload = self
            .source
            .fetch_month(campground.id, self.config.year, self.config.month)
            .await?;

        let current =
            find_available_dates(&payload, self.config.checkin_day, self.config.checkout_day);
        let new_availability = find_new_availability(self.seen.get(&campground.id), &current);

        if new_availability.is_empty() {
            debug!("No new availability at {}", campground.name);
            return Ok(());
        }

        info!(
            "Found new availability at {} for {} campsites",
            campground.name,
            new_availability.len()
        );

        let message = format_availability_message(&campground.name, &new_availability);
        if let Err(e) = self.notifier.notify(&message).await {
            error!("Failed to send notification for {}: {}", campground.name, e);
        }

        // Seen state always holds the full last-reported result, not the delta.
        self.seen.insert(campground.id, current);
        Ok(())
    }
}

/// Compare the current extraction against the previously reported result,
/// returning only campsites that are new or whose date set changed.
///
/// A campground polled for the first time has no previous result, so
/// everything currently available counts as new.
pub fn find_new_availability(
    previous: Option<&AvailabilityResult>,
    current: &AvailabilityResult,
) -> AvailabilityResult {
    let mut changed = AvailabilityResult::new();

    for (campsite_id, dates) in current {
        let is_new = match previous.and_then(|prev| prev.get(campsite_id)) {
            Some(prev_dates) => {
                let prev_set: HashSet<&str> = prev_dates.iter().map(String::as_str).collect();
                let current_set: HashSet<&str> = dates.iter().map(String::as_str).collect();
                prev_set != current_set
            }
            None => true,
        };

        if is_new {
            changed.insert(campsite_id.clone(), dates.clone());
        }
    }

    changed
}
