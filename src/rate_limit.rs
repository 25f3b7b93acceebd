use std::collections::HashMap;
use std::sync::Mutex;

use chrono::NaiveDate;

/// Per-IP daily request quota.
///
/// Entries are keyed by client IP and scoped to a UTC calendar day; the
/// first request of a new day resets the count. State is process-local
/// and cleared on restart.
pub struct DailyQuota {
    max_per_day: u32,
    entries: Mutex<HashMap<String, DayCount>>,
}

struct DayCount {
    day: NaiveDate,
    count: u32,
}

impl DailyQuota {
    pub fn new(max_per_day: u32) -> Self {
        Self {
            max_per_day,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Counts one request against `ip`'s quota for `today` and reports
    /// whether it is allowed. A denied request leaves the counter
    /// unchanged, so denials never consume quota.
    pub fn try_acquire(&self, ip: &str, today: NaiveDate) -> bool {
        let mut entries = self.entries.lock().expect("rate limit mutex poisoned");
        match entries.get_mut(ip) {
            Some(entry) if entry.day == today => {
                if entry.count >= self.max_per_day {
                    false
                } else {
                    entry.count += 1;
                    true
                }
            }
            _ => {
                entries.insert(
                    ip.to_string(),
                    DayCount {
                        day: today,
                        count: 1,
                    },
                );
                true
            }
        }
    }
}
