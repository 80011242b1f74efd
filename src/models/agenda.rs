use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AgendaKind {
    #[serde(alias = "treino")]
    Workout,
    #[serde(alias = "consulta")]
    Appointment,
    #[serde(alias = "avaliacao")]
    Assessment,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgendaEvent {
    pub id: String,
    #[serde(rename = "id_user")]
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: AgendaKind,
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealSection {
    pub meal: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealPlan {
    #[serde(rename = "id_usuario")]
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub sections: Vec<MealSection>,
}
