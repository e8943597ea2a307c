//! Cultivation plans and everything hanging off them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::status::{TaskState, TaskStatus};

/// A cultivation plan (plan de cultivo) as returned by `/obtenerPlanCultivos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CultivationPlan {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    /// Owning client (farmer) id.
    #[serde(rename = "id_cliente")]
    pub owner_id: i64,
    #[serde(rename = "cliente", default)]
    pub owner_name: Option<String>,
    /// Crop ids, resolved against the crop catalog.
    #[serde(rename = "cultivos", default)]
    pub crops: Vec<i64>,
    #[serde(rename = "id_tipo_terreno", default)]
    pub soil_type_id: Option<i64>,
    #[serde(rename = "hectareas", default)]
    pub hectares: Option<f64>,
    #[serde(rename = "fecha_inicio", default, with = "crate::dates::optional")]
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    #[serde(rename = "id_plan")]
    pub plan_id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "fecha_vencimiento", default, with = "crate::dates::optional")]
    pub due_date: Option<NaiveDate>,
    #[serde(rename = "estado")]
    pub status: TaskStatus,
}

impl Task {
    pub fn state(&self, today: NaiveDate) -> TaskState {
        TaskState::classify(self.status, self.due_date, today)
    }
}

/// Body of `POST /tarea` and `PUT /tarea/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInput {
    #[serde(rename = "id_plan")]
    pub plan_id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "fecha_vencimiento", default, with = "crate::dates::optional")]
    pub due_date: Option<NaiveDate>,
    #[serde(rename = "estado")]
    pub status: TaskStatus,
}

impl From<&Task> for TaskInput {
    fn from(task: &Task) -> Self {
        Self {
            plan_id: task.plan_id,
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date,
            status: task.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PestReport {
    pub id: i64,
    #[serde(rename = "id_plan")]
    pub plan_id: i64,
    #[serde(rename = "plaga")]
    pub pest: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "fecha", default, with = "crate::dates::optional")]
    pub reported_on: Option<NaiveDate>,
}

/// Body of `POST /reporteplaga`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PestReportInput {
    #[serde(rename = "id_plan")]
    pub plan_id: i64,
    #[serde(rename = "plaga")]
    pub pest: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Aggregates from `/obtenerReporteDesempeno/{idPlan}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    #[serde(rename = "id_plan")]
    pub plan_id: i64,
    #[serde(rename = "total_tareas", default)]
    pub total_tasks: u32,
    #[serde(rename = "tareas_completadas", default)]
    pub completed_tasks: u32,
    #[serde(rename = "reportes_plaga", default)]
    pub pest_reports: u32,
    #[serde(rename = "rendimiento_estimado", default)]
    pub expected_yield: Option<f64>,
    #[serde(rename = "rendimiento_real", default)]
    pub actual_yield: Option<f64>,
}

impl PerformanceReport {
    /// Share of completed tasks in percent, `None` for a plan without tasks.
    pub fn completion_percent(&self) -> Option<u32> {
        if self.total_tasks == 0 {
            return None;
        }
        let completed = u64::from(self.completed_tasks.min(self.total_tasks));
        Some((completed * 100 / u64::from(self.total_tasks)) as u32)
    }
}
