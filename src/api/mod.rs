//! Mock data layer: static per-entity JSON collections, loaded once per
//! process and filtered client-side by foreign key.

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{
    AgendaEvent, ChatMessage, Exercise, MealPlan, Notification, ProgressEntry, StudentProfile,
    User, Workout,
};

mod error;
mod source;

pub use error::FetchError;
pub use source::{CollectionSource, DirectorySource, FixtureSource, HttpSource};

#[cfg(test)]
pub use source::MockCollectionSource;

/// Mock endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Students,
    Workouts,
    Exercises,
    Progress,
    Chat,
    Agenda,
    Notifications,
    MealPlans,
}

impl Collection {
    pub const ALL: [Collection; 9] = [
        Collection::Users,
        Collection::Students,
        Collection::Workouts,
        Collection::Exercises,
        Collection::Progress,
        Collection::Chat,
        Collection::Agenda,
        Collection::Notifications,
        Collection::MealPlans,
    ];

    pub fn resource_name(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Students => "students",
            Collection::Workouts => "workouts",
            Collection::Exercises => "exercises",
            Collection::Progress => "progress",
            Collection::Chat => "chat",
            Collection::Agenda => "agenda",
            Collection::Notifications => "notifications",
            Collection::MealPlans => "mealPlans",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.resource_name())
    }
}

/// Typed, memoizing access to the mock collections.
///
/// Each collection is loaded from the source at most once and kept until
/// [`MockApi::clear_cache`]. Failed loads are not cached. Two concurrent
/// first loads of the same collection may both reach the source.
pub struct MockApi {
    source: Arc<dyn CollectionSource>,
    cache: Mutex<HashMap<Collection, Value>>,
}

impl MockApi {
    pub fn new(source: Arc<dyn CollectionSource>) -> Self {
        Self {
            source,
            cache: Mutex::new(HashMap::new()),
        }
    }

    async fn raw(&self, collection: Collection) -> Result<Value, FetchError> {
        let cached = self.cache.lock().get(&collection).cloned();
        if let Some(value) = cached {
            tracing::debug!("Cache hit for {}", collection);
            return Ok(value);
        }

        let value = self.source.load(collection).await?;
        self.cache.lock().insert(collection, value.clone());
        tracing::debug!("Loaded {}", collection);
        Ok(value)
    }

    /// Load and decode a whole collection
    pub async fn fetch_collection<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, FetchError> {
        let value = self.raw(collection).await?;
        serde_json::from_value(value).map_err(|e| FetchError::decode(collection.resource_name(), e))
    }

    /// Forget every loaded collection
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }

    pub async fn users(&self) -> Result<Vec<User>, FetchError> {
        self.fetch_collection(Collection::Users).await
    }

    /// Students owned by a trainer
    pub async fn students_of(&self, trainer_id: &str) -> Result<Vec<StudentProfile>, FetchError> {
        let students: Vec<StudentProfile> = self.fetch_collection(Collection::Students).await?;
        Ok(students
            .into_iter()
            .filter(|s| s.trainer_id == trainer_id)
            .collect())
    }

    pub async fn student_profile(
        &self,
        student_id: &str,
    ) -> Result<Option<StudentProfile>, FetchError> {
        let students: Vec<StudentProfile> = self.fetch_collection(Collection::Students).await?;
        Ok(students.into_iter().find(|s| s.user_id == student_id))
    }

    pub async fn workouts_of(&self, student_id: &str) -> Result<Vec<Workout>, FetchError> {
        let workouts: Vec<Workout> = self.fetch_collection(Collection::Workouts).await?;
        Ok(workouts
            .into_iter()
            .filter(|w| w.student_id == student_id)
            .collect())
    }

    pub async fn exercises_of(&self, workout_id: &str) -> Result<Vec<Exercise>, FetchError> {
        let exercises: Vec<Exercise> = self.fetch_collection(Collection::Exercises).await?;
        Ok(exercises
            .into_iter()
            .filter(|e| e.workout_id == workout_id)
            .collect())
    }

    pub async fn progress_of(&self, student_id: &str) -> Result<Option<ProgressEntry>, FetchError> {
        let progress: Vec<ProgressEntry> = self.fetch_collection(Collection::Progress).await?;
        Ok(progress.into_iter().find(|p| p.user_id == student_id))
    }

    /// Messages sent or received by a user
    pub async fn chat_of(&self, user_id: &str) -> Result<Vec<ChatMessage>, FetchError> {
        let messages: Vec<ChatMessage> = self.fetch_collection(Collection::Chat).await?;
        Ok(messages
            .into_iter()
            .filter(|m| m.from == user_id || m.to == user_id)
            .collect())
    }

    pub async fn agenda_of(&self, user_id: &str) -> Result<Vec<AgendaEvent>, FetchError> {
        let agenda: Vec<AgendaEvent> = self.fetch_collection(Collection::Agenda).await?;
        Ok(agenda.into_iter().filter(|e| e.user_id == user_id).collect())
    }

    pub async fn notifications_of(&self, user_id: &str) -> Result<Vec<Notification>, FetchError> {
        let notifications: Vec<Notification> =
            self.fetch_collection(Collection::Notifications).await?;
        Ok(notifications
            .into_iter()
            .filter(|n| n.user_id == user_id)
            .collect())
    }

    pub async fn meal_plan_of(&self, user_id: &str) -> Result<Option<MealPlan>, FetchError> {
        let plans: Vec<MealPlan> = self.fetch_collection(Collection::MealPlans).await?;
        Ok(plans.into_iter().find(|p| p.user_id == user_id))
    }
}
