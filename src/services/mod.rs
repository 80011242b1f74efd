// Client-side business logic

pub mod accounts;
pub mod app_data;
pub mod errors;
pub mod reminders;

pub use accounts::StudentCredentials;
pub use app_data::{AppData, AppDataState, DashboardSummary, FeedReaction, NewStudent};
pub use errors::AppDataError;
pub use reminders::ReminderPolicy;
