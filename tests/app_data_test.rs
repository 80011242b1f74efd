mod common;

use anyhow::Result;
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use trainer_link::api::{Collection, CollectionSource, FetchError, FixtureSource};
use trainer_link::auth::LoginRequest;
use trainer_link::config::Config;
use trainer_link::models::{NotificationKind, WorkoutStatus};
use trainer_link::services::reminders::WEIGHT_REMINDER_MARKER;
use trainer_link::services::{AppDataError, AppDataState, NewStudent};
use trainer_link::storage::MemoryStore;
use trainer_link::AppContext;

use common::{context, dataset, days_ago};

fn carla() -> LoginRequest {
    LoginRequest::new("carla@app.com", "carla123")
}

fn ana() -> LoginRequest {
    LoginRequest::new("ana@app.com", "ana123")
}

fn keys<V>(map: &std::collections::HashMap<String, V>) -> HashSet<&str> {
    map.keys().map(String::as_str).collect()
}

fn reminders(state: &AppDataState) -> Vec<&trainer_link::models::Notification> {
    state
        .notifications
        .iter()
        .filter(|n| n.title.contains(WEIGHT_REMINDER_MARKER))
        .collect()
}

#[tokio::test]
async fn test_trainer_refresh_composes_owned_students() -> Result<()> {
    let (_, ctx) = context(dataset());
    ctx.auth.login(&carla()).await?;
    ctx.data.refresh().await?;

    let state = ctx.data.snapshot();
    let students: Vec<&str> = state.students.iter().map(|s| s.user_id.as_str()).collect();
    assert_eq!(students, vec!["s1", "s2"]);
    assert_eq!(keys(&state.workouts), HashSet::from(["s1", "s2"]));
    assert_eq!(keys(&state.exercises), HashSet::from(["w1", "w2", "w3"]));
    assert_eq!(state.exercises["w1"].len(), 2);
    assert!(state.exercises["w2"].is_empty());
    assert_eq!(keys(&state.progress), HashSet::from(["s1", "s2"]));
    assert!(state.agenda.is_empty());
    assert!(state.meal_plan.is_none());

    let chat: Vec<&str> = state.chat.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(chat, vec!["c1", "c2"]);

    assert_eq!(state.notifications[0].id, "n1");
    let reminders = reminders(&state);
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].user_id, "s1");
    assert_eq!(reminders[0].kind, NotificationKind::Alert);
    assert!(!reminders[0].read);
    assert!(reminders[0].message.contains("45 days"));
    assert_eq!(state.notifications.last(), Some(reminders[0]));

    assert!(!ctx.data.is_loading());
    Ok(())
}

#[tokio::test]
async fn test_student_refresh_composes_own_view() -> Result<()> {
    let (_, ctx) = context(dataset());
    ctx.auth.login(&ana()).await?;
    ctx.data.refresh().await?;

    let state = ctx.data.snapshot();
    assert_eq!(state.students.len(), 1);
    assert_eq!(state.students[0].trainer_id, "t1");
    assert_eq!(keys(&state.workouts), HashSet::from(["s1"]));
    assert_eq!(state.workouts["s1"][1].status, WorkoutStatus::Done);
    assert_eq!(keys(&state.exercises), HashSet::from(["w1", "w2"]));
    assert_eq!(state.agenda.len(), 1);
    assert_eq!(state.meal_plan.as_ref().map(|p| p.title.as_str()), Some("Cutting"));
    assert_eq!(state.chat.len(), 2);

    let summary = state.summary();
    assert_eq!(summary.pending_workouts, 1);
    assert_eq!(summary.completed_workouts, 1);
    assert_eq!(summary.unread_notifications, 1);
    assert_eq!(reminders(&state).len(), 1);
    assert_eq!(state.latest_weight("s1"), Some(68.5));
    Ok(())
}

fn with_existing_reminder(read: bool) -> FixtureSource {
    dataset().with(
        Collection::Notifications,
        json!([{
            "id": "old-reminder",
            "id_user": "s1",
            "type": "alert",
            "title": format!("📊 Time to {}!", WEIGHT_REMINDER_MARKER),
            "message": "Weigh in",
            "date": "2024-05-01T10:00:00Z",
            "read": read
        }]),
    )
}

#[tokio::test]
async fn test_unread_reminder_suppresses_new_one() -> Result<()> {
    let (_, ctx) = context(with_existing_reminder(false));
    ctx.auth.login(&ana()).await?;
    ctx.data.refresh().await?;

    let state = ctx.data.snapshot();
    assert_eq!(state.notifications.len(), 1);
    assert_eq!(state.notifications[0].id, "old-reminder");
    Ok(())
}

#[tokio::test]
async fn test_read_reminder_does_not_suppress_new_one() -> Result<()> {
    let (_, ctx) = context(with_existing_reminder(true));
    ctx.auth.login(&ana()).await?;
    ctx.data.refresh().await?;

    let state = ctx.data.snapshot();
    assert_eq!(reminders(&state).len(), 2);
    assert_eq!(state.notifications[1].user_id, "s1");
    assert!(!state.notifications[1].read);
    Ok(())
}

#[tokio::test]
async fn test_recent_weigh_in_needs_no_reminder() -> Result<()> {
    let source = dataset().with(
        Collection::Progress,
        json!([{"id_usuario": "s1", "weight": [{"date": days_ago(29), "value": 68.0}]}]),
    );
    let (_, ctx) = context(source);
    ctx.auth.login(&ana()).await?;
    ctx.data.refresh().await?;

    assert!(reminders(&ctx.data.snapshot()).is_empty());
    Ok(())
}

#[tokio::test]
async fn test_repeated_refresh_is_memoized_and_stable() -> Result<()> {
    let (source, ctx) = context(dataset());
    ctx.auth.login(&carla()).await?;

    ctx.data.refresh().await?;
    let loads = source.load_count();
    let first = ctx.data.snapshot();

    ctx.data.refresh().await?;
    assert_eq!(source.load_count(), loads);
    assert_eq!(reminders(&ctx.data.snapshot()).len(), 1);
    assert_eq!(ctx.data.snapshot().students, first.students);
    Ok(())
}

#[tokio::test]
async fn test_fetch_failure_rejects_and_keeps_previous_state() -> Result<()> {
    let (_, ctx) = context(dataset().without(Collection::Exercises));
    ctx.auth.login(&carla()).await?;

    let result = ctx.data.refresh().await;
    match result {
        Err(AppDataError::Fetch(FetchError::NotFound(resource))) => assert_eq!(resource, "exercises"),
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(ctx.data.snapshot(), AppDataState::default());
    assert!(!ctx.data.is_loading());
    Ok(())
}

#[tokio::test]
async fn test_logout_then_refresh_resets_state() -> Result<()> {
    let (_, ctx) = context(dataset());
    ctx.auth.login(&carla()).await?;
    ctx.data.refresh().await?;
    assert!(!ctx.data.snapshot().students.is_empty());

    ctx.auth.logout()?;
    ctx.data.refresh().await?;
    assert_eq!(ctx.data.snapshot(), AppDataState::default());
    Ok(())
}

#[tokio::test]
async fn test_local_mutations_do_not_survive_refresh() -> Result<()> {
    let (_, ctx) = context(dataset());
    ctx.auth.login(&carla()).await?;
    ctx.data.refresh().await?;

    ctx.data.mark_workout_completed("s2", "w3");
    assert_eq!(ctx.data.snapshot().workouts["s2"][0].status, WorkoutStatus::Done);

    ctx.data.refresh().await?;
    assert_eq!(ctx.data.snapshot().workouts["s2"][0].status, WorkoutStatus::Pending);
    Ok(())
}

#[tokio::test]
async fn test_added_student_can_log_in() -> Result<()> {
    let (_, ctx) = context(dataset());
    ctx.auth.login(&carla()).await?;
    ctx.data.refresh().await?;

    let credentials = ctx.data.add_student(NewStudent {
        name: "Ana Paula".to_string(),
        phone: "(11) 98765-4321".to_string(),
        goal: "Strength".to_string(),
    })?;
    assert_eq!(credentials.login, "anapaula");
    assert_eq!(credentials.password, "anapaula4321");

    let state = ctx.data.snapshot();
    assert_eq!(state.students.len(), 3);
    let added = state.students.last().unwrap();
    assert_eq!(added.trainer_id, "t1");
    assert!(added.upcoming_workouts.is_empty());
    assert_eq!(state.notifications[0].user_id, "t1");
    assert!(state.notifications[0].message.contains("anapaula4321"));

    ctx.auth.logout()?;
    let session = ctx
        .auth
        .login(&LoginRequest::new("anapaula@app.com", "anapaula4321"))
        .await?;
    assert_eq!(session.user.id, credentials.student_id);
    assert_eq!(session.user.name, "Ana Paula");
    Ok(())
}

/// Holds the first `students` load until released
struct GatedSource {
    inner: FixtureSource,
    gated: AtomicBool,
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl CollectionSource for GatedSource {
    async fn load(&self, collection: Collection) -> Result<Value, FetchError> {
        if collection == Collection::Students && !self.gated.swap(true, Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        self.inner.load(collection).await
    }
}

#[tokio::test]
async fn test_last_settled_refresh_wins() -> Result<()> {
    let source = Arc::new(GatedSource {
        inner: dataset(),
        gated: AtomicBool::new(false),
        entered: Notify::new(),
        release: Notify::new(),
    });
    let ctx = AppContext::assemble(
        Config::default(),
        source.clone(),
        Arc::new(MemoryStore::new()),
    );

    ctx.auth.login(&carla()).await?;
    let data = ctx.data.clone();
    let trainer_refresh = tokio::spawn(async move { data.refresh().await });

    source.entered.notified().await;
    assert!(ctx.data.is_loading());

    // Started later, settles first
    ctx.auth.login(&ana()).await?;
    ctx.data.refresh().await?;
    assert_eq!(ctx.data.snapshot().students.len(), 1);

    source.release.notify_one();
    trainer_refresh.await??;

    let state = ctx.data.snapshot();
    let students: Vec<&str> = state.students.iter().map(|s| s.user_id.as_str()).collect();
    assert_eq!(students, vec!["s1", "s2"]);
    assert!(state.meal_plan.is_none());
    Ok(())
}
