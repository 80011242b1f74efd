pub mod agenda;
pub mod chat;
pub mod notification;
pub mod progress;
pub mod student;
pub mod user;
pub mod workout;

pub use agenda::{AgendaEvent, AgendaKind, MealPlan, MealSection};
pub use chat::{ChatMessage, NewMessage};
pub use notification::{NewNotification, Notification, NotificationKind};
pub use progress::{Measurement, ProgressEntry, ProgressPhoto, WeightEntry};
pub use student::{StudentProfile, StudentStatus, UpcomingWorkout};
pub use user::{NewUser, User, UserRole};
pub use workout::{Exercise, ExerciseStatus, Workout, WorkoutStatus};
