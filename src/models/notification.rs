use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    #[serde(alias = "treino")]
    Workout,
    #[serde(alias = "parabens")]
    Congrats,
    #[serde(alias = "alerta")]
    Alert,
    FeedLike,
    FeedComment,
}

/// In-app notification. `read` only ever flips from false to true.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: String,
    #[serde(rename = "id_user")]
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
    #[serde(rename = "postId", default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
}

impl Notification {
    /// Unread notification with a generated id, dated now
    pub fn unread(
        prefix: &str,
        user_id: impl Into<String>,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("{}-{}", prefix, Uuid::new_v4()),
            user_id: user_id.into(),
            kind,
            title: title.into(),
            message: message.into(),
            date: Utc::now(),
            read: false,
            post_id: None,
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn with_post(mut self, post_id: impl Into<String>) -> Self {
        self.post_id = Some(post_id.into());
        self
    }
}

/// Caller-supplied notification fields. `id` and `date` are generated when absent;
/// new notifications always start unread.
#[derive(Debug, Clone, Default)]
pub struct NewNotification {
    pub id: Option<String>,
    pub user_id: String,
    pub kind: Option<NotificationKind>,
    pub title: String,
    pub message: String,
    pub date: Option<DateTime<Utc>>,
    pub post_id: Option<String>,
}

impl NewNotification {
    pub fn into_notification(self) -> Notification {
        Notification {
            id: self
                .id
                .unwrap_or_else(|| format!("notif-{}", Uuid::new_v4())),
            user_id: self.user_id,
            kind: self.kind.unwrap_or(NotificationKind::Alert),
            title: self.title,
            message: self.message,
            date: self.date.unwrap_or_else(Utc::now),
            read: false,
            post_id: self.post_id,
        }
    }
}
