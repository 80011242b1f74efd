#![allow(dead_code)]

use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::sync::Arc;

use trainer_link::api::{Collection, CollectionSource, FixtureSource};
use trainer_link::config::Config;
use trainer_link::storage::{KeyValueStore, MemoryStore};
use trainer_link::AppContext;

/// Calendar date `days` days before today, as stored in weigh-ins
pub fn days_ago(days: i64) -> String {
    (Utc::now() - Duration::days(days)).format("%Y-%m-%d").to_string()
}

pub fn user(id: &str, role: &str, email: &str, password: &str) -> Value {
    json!({
        "id": id,
        "type": role,
        "name": format!("User {}", id),
        "email": email,
        "password": password,
        "photo": "",
        "createdAt": "2024-01-01T00:00:00Z"
    })
}

/// Two trainers and three students.
///
/// `t1` owns `s1` (last weigh-in 45 days ago) and `s2` (3 days ago);
/// `t2` owns `s3`, who has no progress record.
pub fn dataset() -> FixtureSource {
    FixtureSource::new()
        .with(
            Collection::Users,
            json!([
                user("t1", "trainer", "carla@app.com", "carla123"),
                user("t2", "personal", "rafa@app.com", "rafa123"),
                user("s1", "student", "ana@app.com", "ana123"),
                user("s2", "aluno", "bruno@app.com", "bruno123"),
                user("s3", "student", "julia@app.com", "julia123")
            ]),
        )
        .with(
            Collection::Students,
            json!([
                {"id_user": "s1", "id_personal": "t1", "goal": "Cut", "status": "active"},
                {"id_user": "s2", "id_personal": "t1", "goal": "Bulk", "status": "ativo"},
                {"id_user": "s3", "id_personal": "t2", "goal": "Run", "status": "paused"}
            ]),
        )
        .with(
            Collection::Workouts,
            json!([
                {"id": "w1", "id_aluno": "s1", "name": "Legs", "weekDays": ["mon"], "status": "pending"},
                {"id": "w2", "id_aluno": "s1", "name": "Back", "date": "2024-06-01", "status": "concluido"},
                {"id": "w3", "id_aluno": "s2", "name": "Push", "status": "pendente"},
                {"id": "w4", "id_aluno": "s3", "name": "Run", "status": "pending"}
            ]),
        )
        .with(
            Collection::Exercises,
            json!([
                {"id": "e1", "id_treino": "w1", "name": "Squat", "video_url": "", "series": 4,
                 "repeticoes": "10", "carga": "40kg", "descanso_segundos": 90},
                {"id": "e2", "id_treino": "w1", "name": "Lunge", "video_url": "", "series": 3,
                 "repeticoes": "12", "carga": "10kg", "descanso_segundos": 60},
                {"id": "e3", "id_treino": "w3", "name": "Bench", "video_url": "", "series": 5,
                 "repeticoes": "5", "carga": "60kg", "descanso_segundos": 120}
            ]),
        )
        .with(
            Collection::Progress,
            json!([
                {"id_usuario": "s1", "weight": [
                    {"date": days_ago(75), "value": 70.0},
                    {"date": days_ago(45), "value": 68.5}
                ], "measurements": [], "photos": []},
                {"id_usuario": "s2", "weight": [
                    {"date": days_ago(3), "value": 82.0}
                ], "measurements": [], "photos": []}
            ]),
        )
        .with(
            Collection::Chat,
            json!([
                {"id": "c1", "from": "t1", "to": "s1", "message": "Ready?", "date": "2024-05-01T10:00:00Z"},
                {"id": "c2", "from": "s1", "to": "t1", "message": "Yes", "date": "2024-05-01T10:05:00Z"},
                {"id": "c3", "from": "t2", "to": "s3", "message": "Go", "date": "2024-05-01T11:00:00Z"}
            ]),
        )
        .with(
            Collection::Agenda,
            json!([
                {"id": "a1", "id_user": "s1", "type": "avaliacao", "title": "Assessment",
                 "date": "2024-06-10T08:00:00Z", "location": "Studio"}
            ]),
        )
        .with(
            Collection::Notifications,
            json!([
                {"id": "n1", "id_user": "t1", "type": "alert", "title": "Bruno missed a workout",
                 "message": "Push day", "date": "2024-05-01T10:00:00Z", "read": false},
                {"id": "n2", "id_user": "s1", "type": "treino", "title": "New workout",
                 "message": "Legs", "date": "2024-05-01T10:00:00Z", "read": true}
            ]),
        )
        .with(
            Collection::MealPlans,
            json!([
                {"id_usuario": "s1", "title": "Cutting", "sections": [{"meal": "Lunch", "items": ["Rice"]}]}
            ]),
        )
}

/// Context over an in-memory store
pub fn context(source: FixtureSource) -> (Arc<FixtureSource>, AppContext) {
    context_with_store(source, Arc::new(MemoryStore::new()))
}

pub fn context_with_store(
    source: FixtureSource,
    store: Arc<dyn KeyValueStore>,
) -> (Arc<FixtureSource>, AppContext) {
    let source = Arc::new(source);
    let ctx = AppContext::assemble(
        Config::default(),
        source.clone() as Arc<dyn CollectionSource>,
        store,
    );
    (source, ctx)
}
