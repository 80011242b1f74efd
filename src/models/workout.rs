use serde::{Deserialize, Serialize};

/// Workout lifecycle; only ever moves from `Pending` to `Done`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutStatus {
    #[serde(alias = "pendente")]
    Pending,
    #[serde(alias = "concluido", alias = "concluído")]
    Done,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseStatus {
    #[serde(alias = "pendente")]
    Pending,
    #[serde(alias = "concluido", alias = "concluído")]
    Done,
}

/// Workout assigned to a student, either on a fixed date or on recurring week days
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: String,
    #[serde(rename = "id_aluno")]
    pub student_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "weekDays", default, skip_serializing_if = "Option::is_none")]
    pub week_days: Option<Vec<String>>,
    pub status: WorkoutStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(rename = "videoBrief", default)]
    pub video_brief: String,
}

impl Workout {
    pub fn is_done(&self) -> bool {
        self.status == WorkoutStatus::Done
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: String,
    #[serde(rename = "id_treino")]
    pub workout_id: String,
    pub name: String,
    #[serde(default)]
    pub video_url: String,
    pub series: u32,
    #[serde(rename = "repeticoes")]
    pub repetitions: String,
    #[serde(rename = "carga")]
    pub load: String,
    #[serde(rename = "descanso_segundos")]
    pub rest_seconds: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ExerciseStatus>,
}

impl Exercise {
    pub fn is_done(&self) -> bool {
        self.status == Some(ExerciseStatus::Done)
    }
}
