use serde::{Deserialize, Serialize};

use super::WorkoutStatus;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    #[serde(alias = "ativo")]
    Active,
    #[serde(alias = "pausado")]
    Paused,
}

/// Workout preview shown on a student's card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpcomingWorkout {
    pub id: String,
    pub name: String,
    pub date: String,
    pub status: WorkoutStatus,
}

/// A student as seen by the trainer that owns it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentProfile {
    #[serde(rename = "id_user")]
    pub user_id: String,
    #[serde(rename = "id_personal")]
    pub trainer_id: String,
    pub goal: String,
    #[serde(rename = "upcomingWorkouts", default)]
    pub upcoming_workouts: Vec<UpcomingWorkout>,
    pub status: StudentStatus,
}
