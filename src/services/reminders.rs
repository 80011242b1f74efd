//! Synthetic weigh-in reminders derived on the client.

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, Utc};

use crate::models::{Notification, NotificationKind, ProgressEntry};

/// Text every weigh-in reminder title contains
pub const WEIGHT_REMINDER_MARKER: &str = "Log Your Weight";
pub const WEIGHT_REMINDER_TITLE: &str = "📊 Time to Log Your Weight!";

const MS_PER_DAY: i64 = 86_400_000;

/// Parse a weigh-in date: RFC 3339, a naive timestamp or a bare date (midnight UTC)
pub fn parse_entry_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(date.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
}

/// Whole days elapsed, rounded down
pub fn days_since(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - then).num_milliseconds().div_euclid(MS_PER_DAY)
}

/// Whether the user already has an unread weigh-in reminder. Read reminders do not count.
pub fn has_unread_reminder(user_id: &str, notifications: &[Notification]) -> bool {
    notifications.iter().any(|n| {
        n.user_id == user_id
            && n.kind == NotificationKind::Alert
            && n.title.contains(WEIGHT_REMINDER_MARKER)
            && !n.read
    })
}

#[derive(Debug, Clone, Copy)]
pub struct ReminderPolicy {
    pub threshold_days: i64,
}

impl Default for ReminderPolicy {
    fn default() -> Self {
        Self { threshold_days: 30 }
    }
}

impl ReminderPolicy {
    pub fn new(threshold_days: i64) -> Self {
        Self { threshold_days }
    }

    /// Reminder for a student whose latest weigh-in is at least `threshold_days` old
    pub fn weight_reminder(
        &self,
        progress: &ProgressEntry,
        existing: &[Notification],
        now: DateTime<Utc>,
    ) -> Option<Notification> {
        let latest = progress.latest_weight()?;
        let Some(date) = parse_entry_date(&latest.date) else {
            tracing::warn!(
                "Skipping reminder for {}: unreadable weigh-in date {:?}",
                progress.user_id,
                latest.date
            );
            return None;
        };

        let days = days_since(date, now);
        if days < self.threshold_days || has_unread_reminder(&progress.user_id, existing) {
            return None;
        }

        tracing::debug!("{} last weighed in {} days ago", progress.user_id, days);

        let reminder = Notification::unread(
            &format!("weight-reminder-{}", progress.user_id),
            progress.user_id.clone(),
            NotificationKind::Alert,
            WEIGHT_REMINDER_TITLE,
            format!(
                "It has been {} days since your last weigh-in. Update your progress to keep track of your evolution!",
                days
            ),
        )
        .with_date(now);
        Some(reminder)
    }
}

/// Reminder dated one calendar month after a weigh-in. End-of-month dates clamp
/// to the last day of the next month.
pub fn monthly_follow_up(user_id: &str, entry_date: &str) -> Option<Notification> {
    let due = parse_entry_date(entry_date)?.checked_add_months(Months::new(1))?;

    let reminder = Notification::unread(
        "weight-reminder",
        user_id,
        NotificationKind::Alert,
        WEIGHT_REMINDER_TITLE,
        "It has been a month since your last weigh-in. Update your monthly progress to keep track of your evolution!",
    )
    .with_date(due);
    Some(reminder)
}
