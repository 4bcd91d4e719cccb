use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use tracing::warn;

use crate::rec_gov_client::MonthAvailabilityResponse;

/// Status string recreation.gov reports for bookable dates.
pub const STATUS_AVAILABLE: &str = "Available";

/// Map from campsite id to the dates on which it is available.
pub type AvailabilityResult = HashMap<String, Vec<String>>;

/// Scan a monthly payload for campsites with bookable dates inside the
/// half-open `[checkin_day, checkout_day)` day-of-month window.
///
/// Malformed date strings are logged and skipped; the rest of the payload
/// is still scanned. Date order within a campsite is not guaranteed here,
/// only at formatting time.
pub fn find_available_dates(
    payload: &MonthAvailabilityResponse,
    checkin_day: u32,
    checkout_day: u32,
) -> AvailabilityResult {
    let mut results = AvailabilityResult::new();

    for unit in payload.campsites.values() {
        for (date_str, status) in &unit.availabilities {
            let day = match parse_day(date_str) {
                Some(day) => day,
                None => {
                    warn!("Failed to parse date: {}", date_str);
                    continue;
                }
            };

            if day >= checkin_day && day < checkout_day && status == STATUS_AVAILABLE {
                results
                    .entry(unit.campsite_id.clone())
                    .or_default()
                    .push(date_str.clone());
            }
        }
    }

    results
}

/// Parse the calendar day out of a `2025-08-09T00:00:00Z` style date string.
fn parse_day(date_str: &str) -> Option<u32> {
    let date_part = date_str.split('T').next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()
        .map(|date| date.day())
}

/// Render the push message body for newly available campsites.
///
/// Campsites and dates are sorted so that repeated runs over the same data
/// produce an identical message.
pub fn format_availability_message(campground_name: &str, new_availability: &AvailabilityResult) -> String {
    let mut ordered: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (campsite_id, dates) in new_availability {
        let mut dates: Vec<&str> = dates.iter().map(String::as_str).collect();
        dates.sort_unstable();
        ordered.insert(campsite_id.as_str(), dates);
    }

    let body = serde_json::to_string_pretty(&ordered).unwrap_or_else(|_| format!("{:?}", ordered));
    format!("🏕️ New availability at {}:\n{}", campground_name, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rec_gov_client::CampsiteMonth;

    fn payload(entries: &[(&str, &[(&str, &str)])]) -> MonthAvailabilityResponse {
        let mut campsites = HashMap::new();
        for (campsite_id, availabilities) in entries {
            campsites.insert(
                (*campsite_id).to_string(),
                CampsiteMonth {
                    campsite_id: (*campsite_id).to_string(),
                    availabilities: availabilities
                        .iter()
                        .map(|(date, status)| (date.to_string(), status.to_string()))
                        .collect(),
                },
            );
        }
        MonthAvailabilityResponse { campsites }
    }

    #[test]
    fn filters_by_day_window_and_status() {
        let payload = payload(&[(
            "101",
            &[
                ("2025-08-09T00:00:00Z", "Available"),
                ("2025-08-12T00:00:00Z", "Available"),
                ("2025-08-10T00:00:00Z", "Reserved"),
            ],
        )]);

        let result = find_available_dates(&payload, 9, 11);

        assert_eq!(result.len(), 1);
        assert_eq!(result["101"], vec!["2025-08-09T00:00:00Z".to_string()]);
    }

    #[test]
    fn window_end_is_exclusive() {
        let payload = payload(&[(
            "7",
            &[
                ("2025-08-10T00:00:00Z", "Available"),
                ("2025-08-11T00:00:00Z", "Available"),
            ],
        )]);

        let result = find_available_dates(&payload, 9, 11);

        assert_eq!(result["7"], vec!["2025-08-10T00:00:00Z".to_string()]);
    }

    #[test]
    fn skips_malformed_dates_and_keeps_valid_siblings() {
        let payload = payload(&[(
            "42",
            &[
                ("not-a-date", "Available"),
                ("2025-08-32T00:00:00Z", "Available"),
                ("2025-08-09T00:00:00Z", "Available"),
            ],
        )]);

        let result = find_available_dates(&payload, 9, 11);

        assert_eq!(result["42"], vec!["2025-08-09T00:00:00Z".to_string()]);
    }

    #[test]
    fn empty_when_nothing_available_in_window() {
        let payload = payload(&[(
            "8",
            &[
                ("2025-08-01T00:00:00Z", "Available"),
                ("2025-08-09T00:00:00Z", "Not Reservable"),
            ],
        )]);

        let result = find_available_dates(&payload, 9, 11);

        assert!(result.is_empty());
    }

    #[test]
    fn message_sorts_campsites_and_dates() {
        let mut new_availability = AvailabilityResult::new();
        new_availability.insert(
            "202".to_string(),
            vec![
                "2025-08-10T00:00:00Z".to_string(),
                "2025-08-09T00:00:00Z".to_string(),
            ],
        );
        new_availability.insert("101".to_string(), vec!["2025-08-09T00:00:00Z".to_string()]);

        let message = format_availability_message("Kalaloch", &new_availability);

        assert!(message.starts_with("🏕️ New availability at Kalaloch:\n"));
        let site_101 = message.find("\"101\"").unwrap();
        let site_202 = message.find("\"202\"").unwrap();
        assert!(site_101 < site_202);
        let day_09 = message.rfind("2025-08-09").unwrap();
        let day_10 = message.rfind("2025-08-10").unwrap();
        assert!(day_09 < day_10);
    }
}
