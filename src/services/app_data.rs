//! Per-role data aggregation for the signed-in user.
//!
//! `refresh` composes a fresh snapshot from the mock collections and commits
//! it in one step. Every other operation mutates the in-memory snapshot only.
//!
//! Durability: `add_student` writes the generated student account to the
//! credential store, so that student can log in after a restart. Workout and
//! exercise completion, notification changes, chat messages, weigh-ins and
//! the new student's profile itself live only as long as this process and are
//! replaced by the next `refresh`.

use chrono::Utc;
use futures::future::try_join_all;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{FetchError, MockApi};
use crate::auth::AuthService;
use crate::models::{
    AgendaEvent, ChatMessage, Exercise, ExerciseStatus, MealPlan, NewMessage, NewNotification,
    Notification, NotificationKind, ProgressEntry, StudentProfile, StudentStatus, User, UserRole,
    WeightEntry, Workout, WorkoutStatus,
};
use crate::services::accounts::StudentCredentials;
use crate::services::reminders::{monthly_follow_up, ReminderPolicy};
use crate::services::AppDataError;
use crate::storage::{CredentialStore, StoredAccount};

/// Snapshot of everything the signed-in user can see
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppDataState {
    pub students: Vec<StudentProfile>,
    /// Workouts by student id
    pub workouts: HashMap<String, Vec<Workout>>,
    /// Exercises by workout id
    pub exercises: HashMap<String, Vec<Exercise>>,
    /// Progress by student id
    pub progress: HashMap<String, ProgressEntry>,
    pub agenda: Vec<AgendaEvent>,
    pub notifications: Vec<Notification>,
    pub meal_plan: Option<MealPlan>,
    pub chat: Vec<ChatMessage>,
}

/// Headline numbers for the dashboards
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub students: usize,
    pub pending_workouts: usize,
    pub completed_workouts: usize,
    pub unread_notifications: usize,
}

impl AppDataState {
    pub fn summary(&self) -> DashboardSummary {
        let (completed, pending): (Vec<&Workout>, Vec<&Workout>) =
            self.workouts.values().flatten().partition(|w| w.is_done());

        DashboardSummary {
            students: self.students.len(),
            pending_workouts: pending.len(),
            completed_workouts: completed.len(),
            unread_notifications: self.notifications.iter().filter(|n| !n.read).count(),
        }
    }

    pub fn latest_weight(&self, student_id: &str) -> Option<f64> {
        self.progress
            .get(student_id)
            .and_then(|p| p.latest_weight())
            .map(|w| w.value)
    }

    fn find_workout(&self, workout_id: &str) -> Option<&Workout> {
        self.workouts
            .values()
            .flatten()
            .find(|w| w.id == workout_id)
    }
}

/// Reaction on a post-workout photo in the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedReaction {
    Like,
    Comment,
}

/// Student details entered by a trainer
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    pub phone: String,
    pub goal: String,
}

/// Workouts, exercises and progress of one student
struct StudentBundle {
    student_id: String,
    workouts: Vec<Workout>,
    exercises: HashMap<String, Vec<Exercise>>,
    progress: Option<ProgressEntry>,
}

/// Clears the loading flag however the refresh ends
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn start(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Data aggregator for the signed-in user.
///
/// Overlapping refreshes are not cancelled: whichever settles last commits
/// last and wins.
pub struct AppData {
    api: Arc<MockApi>,
    auth: Arc<AuthService>,
    credentials: Arc<CredentialStore>,
    policy: ReminderPolicy,
    state: RwLock<AppDataState>,
    loading: AtomicBool,
}

impl AppData {
    pub fn new(
        api: Arc<MockApi>,
        auth: Arc<AuthService>,
        credentials: Arc<CredentialStore>,
        policy: ReminderPolicy,
    ) -> Self {
        Self {
            api,
            auth,
            credentials,
            policy,
            state: RwLock::new(AppDataState::default()),
            loading: AtomicBool::new(false),
        }
    }

    pub fn snapshot(&self) -> AppDataState {
        self.state.read().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Rebuild the snapshot for the signed-in user.
    ///
    /// On failure the previous snapshot is kept.
    pub async fn refresh(&self) -> Result<(), AppDataError> {
        let Some(user) = self.auth.current_user() else {
            *self.state.write() = AppDataState::default();
            return Ok(());
        };

        let _loading = LoadingGuard::start(&self.loading);

        let next = match user.role {
            UserRole::Trainer => self.load_trainer_view(&user).await?,
            UserRole::Student => self.load_student_view(&user).await?,
        };

        tracing::info!(
            "Refreshed {} view for {}: {} students, {} notifications",
            user.role,
            user.email,
            next.students.len(),
            next.notifications.len()
        );
        *self.state.write() = next;
        Ok(())
    }

    async fn load_exercises(
        &self,
        workouts: &[Workout],
    ) -> Result<HashMap<String, Vec<Exercise>>, FetchError> {
        let lists = try_join_all(workouts.iter().map(|workout| async move {
            let exercises = self.api.exercises_of(&workout.id).await?;
            Ok::<_, FetchError>((workout.id.clone(), exercises))
        }))
        .await?;

        Ok(lists.into_iter().collect())
    }

    async fn load_student_bundle(&self, student_id: &str) -> Result<StudentBundle, FetchError> {
        let with_exercises = async {
            let workouts = self.api.workouts_of(student_id).await?;
            let exercises = self.load_exercises(&workouts).await?;
            Ok::<_, FetchError>((workouts, exercises))
        };

        let ((workouts, exercises), progress) =
            tokio::try_join!(with_exercises, self.api.progress_of(student_id))?;

        Ok(StudentBundle {
            student_id: student_id.to_string(),
            workouts,
            exercises,
            progress,
        })
    }

    async fn load_trainer_view(&self, trainer: &User) -> Result<AppDataState, FetchError> {
        let students = self.api.students_of(&trainer.id).await?;

        let bundles = try_join_all(
            students
                .iter()
                .map(|student| self.load_student_bundle(&student.user_id)),
        )
        .await?;

        let (notifications, chat) = tokio::try_join!(
            self.api.notifications_of(&trainer.id),
            self.api.chat_of(&trainer.id)
        )?;

        let mut state = AppDataState {
            students,
            chat,
            ..Default::default()
        };
        for bundle in bundles {
            state.exercises.extend(bundle.exercises);
            if let Some(progress) = bundle.progress {
                state.progress.insert(bundle.student_id.clone(), progress);
            }
            state.workouts.insert(bundle.student_id, bundle.workouts);
        }

        let now = Utc::now();
        let reminders: Vec<Notification> = state
            .students
            .iter()
            .filter_map(|s| state.progress.get(&s.user_id))
            .filter_map(|p| self.policy.weight_reminder(p, &notifications, now))
            .collect();

        state.notifications = notifications;
        state.notifications.extend(reminders);
        Ok(state)
    }

    async fn load_student_view(&self, student: &User) -> Result<AppDataState, FetchError> {
        let id = student.id.as_str();

        let (profile, workouts, progress, agenda, notifications, chat, meal_plan) = tokio::try_join!(
            self.api.student_profile(id),
            self.api.workouts_of(id),
            self.api.progress_of(id),
            self.api.agenda_of(id),
            self.api.notifications_of(id),
            self.api.chat_of(id),
            self.api.meal_plan_of(id)
        )?;

        let exercises = self.load_exercises(&workouts).await?;

        let mut notifications = notifications;
        if let Some(ref progress) = progress {
            if let Some(reminder) = self
                .policy
                .weight_reminder(progress, &notifications, Utc::now())
            {
                notifications.push(reminder);
            }
        }

        Ok(AppDataState {
            students: profile.into_iter().collect(),
            workouts: HashMap::from([(id.to_string(), workouts)]),
            exercises,
            progress: progress
                .map(|p| HashMap::from([(id.to_string(), p)]))
                .unwrap_or_default(),
            agenda,
            notifications,
            meal_plan,
            chat,
        })
    }

    /// Mark a student's workout as done. Exercises are left untouched.
    pub fn mark_workout_completed(&self, student_id: &str, workout_id: &str) {
        let mut state = self.state.write();
        let workout = state
            .workouts
            .get_mut(student_id)
            .and_then(|list| list.iter_mut().find(|w| w.id == workout_id));

        match workout {
            Some(workout) => {
                workout.status = WorkoutStatus::Done;
                tracing::debug!("Workout {} marked done", workout_id);
            }
            None => tracing::debug!("No workout {} for student {}", workout_id, student_id),
        }
    }

    /// Set the read flag of a notification. Read notifications stay read.
    pub fn toggle_notification(&self, notification_id: &str, value: bool) {
        let mut state = self.state.write();
        if let Some(notification) = state
            .notifications
            .iter_mut()
            .find(|n| n.id == notification_id)
        {
            notification.read = notification.read || value;
        }
    }

    /// Append a chat message. It is not sent anywhere.
    pub fn send_message(&self, message: NewMessage) -> ChatMessage {
        let message = ChatMessage {
            id: format!("local-{}", Uuid::new_v4()),
            from: message.from,
            to: message.to,
            message: message.message,
            date: Utc::now(),
        };

        self.state.write().chat.push(message.clone());
        tracing::debug!("Queued local message {}", message.id);
        message
    }

    /// Record a weigh-in and schedule the follow-up reminder one month later.
    ///
    /// Returns the scheduled reminder; none is scheduled when the date cannot be parsed.
    pub fn log_progress(&self, student_id: &str, entry: WeightEntry) -> Option<Notification> {
        let reminder = monthly_follow_up(student_id, &entry.date);
        if reminder.is_none() {
            tracing::warn!("No follow-up reminder for unreadable date {:?}", entry.date);
        }

        let mut state = self.state.write();
        state
            .progress
            .entry(student_id.to_string())
            .or_insert_with(|| ProgressEntry::new(student_id))
            .record_weight(entry);

        if let Some(ref reminder) = reminder {
            state.notifications.push(reminder.clone());
        }
        reminder
    }

    /// Put a like or comment notification at the front of the list
    pub fn add_feed_notification(
        &self,
        user_id: &str,
        reaction: FeedReaction,
        post_id: &str,
        from_user: &str,
    ) -> Notification {
        let (kind, title, message) = match reaction {
            FeedReaction::Like => (
                NotificationKind::FeedLike,
                "New like on your post",
                format!("{} liked your post-workout photo!", from_user),
            ),
            FeedReaction::Comment => (
                NotificationKind::FeedComment,
                "New comment on your post",
                format!("{} commented on your post-workout photo!", from_user),
            ),
        };

        let notification = Notification::unread("feed", user_id, kind, title, message).with_post(post_id);
        self.state.write().notifications.insert(0, notification.clone());
        notification
    }

    /// Replace the whole exercises map
    pub fn set_exercises(&self, exercises: HashMap<String, Vec<Exercise>>) {
        self.state.write().exercises = exercises;
    }

    /// Put a notification at the front of the list
    pub fn add_notification(&self, notification: NewNotification) -> Notification {
        let notification = notification.into_notification();
        self.state.write().notifications.insert(0, notification.clone());
        notification
    }

    /// Mark one exercise done and notify the people involved.
    ///
    /// The acting user gets a congratulation; the workout's student gets an
    /// alert when someone else completed it. Returns false when the exercise
    /// is unknown.
    pub fn complete_exercise(&self, workout_id: &str, exercise_id: &str) -> bool {
        let actor = self.auth.current_user();
        let mut state = self.state.write();

        let Some(exercise) = state
            .exercises
            .get_mut(workout_id)
            .and_then(|list| list.iter_mut().find(|e| e.id == exercise_id))
        else {
            return false;
        };
        exercise.status = Some(ExerciseStatus::Done);
        let exercise_name = exercise.name.clone();

        let owner = state.find_workout(workout_id).map(|w| w.student_id.clone());

        if let Some(ref actor) = actor {
            let congrats = Notification::unread(
                "notif",
                actor.id.clone(),
                NotificationKind::Congrats,
                "Congratulations! Exercise completed",
                format!("You completed the exercise: {}", exercise_name),
            )
            .with_post(workout_id);
            state.notifications.insert(0, congrats);
        }

        if let Some(owner) = owner {
            if actor.as_ref().map(|a| a.id.as_str()) != Some(owner.as_str()) {
                let actor_name = actor.as_ref().map(|a| a.name.as_str()).unwrap_or("Someone");
                let alert = Notification::unread(
                    "notif",
                    owner,
                    NotificationKind::Alert,
                    "Student completed an exercise",
                    format!("{} completed the exercise: {}", actor_name, exercise_name),
                )
                .with_post(workout_id);
                state.notifications.insert(0, alert);
            }
        }

        tracing::debug!("Exercise {} of workout {} marked done", exercise_id, workout_id);
        true
    }

    /// Add a student for the signed-in trainer.
    ///
    /// Generates the student's login and password, persists the account so
    /// the student can log in, and leaves the credentials in a notification
    /// for the trainer to pass on.
    pub fn add_student(&self, student: NewStudent) -> Result<StudentCredentials, AppDataError> {
        let trainer = self.auth.current_user().ok_or(AppDataError::NotSignedIn)?;
        let credentials = StudentCredentials::generate(&student.name, &student.phone);
        let now = Utc::now();

        self.credentials.add_student_account(StoredAccount {
            id: Some(credentials.student_id.clone()),
            role: UserRole::Student,
            name: student.name.clone(),
            email: credentials.email.clone(),
            password: credentials.password.clone(),
            phone: Some(student.phone.clone()),
            photo: None,
            created_at: Some(now.to_rfc3339()),
        })?;

        let profile = StudentProfile {
            user_id: credentials.student_id.clone(),
            trainer_id: trainer.id.clone(),
            goal: student.goal,
            upcoming_workouts: Vec::new(),
            status: StudentStatus::Active,
        };

        let notice = Notification::unread(
            "credentials",
            trainer.id,
            NotificationKind::Alert,
            "✅ New Student Added!",
            format!(
                "{} was added successfully!\n\nAccess credentials:\nPhone: {}\nLogin: {}\nPassword: {}\n\nShare these details with the student.",
                student.name, student.phone, credentials.login, credentials.password
            ),
        );

        let mut state = self.state.write();
        state.students.push(profile);
        state.notifications.insert(0, notice);

        tracing::info!("Added student {} ({})", student.name, credentials.login);
        Ok(credentials)
    }
}
