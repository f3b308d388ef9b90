// src/models/tarefa.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tarefa_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TarefaStatus {
    Pendente,
    EmAndamento,
    Concluida,
    Cancelada,
}

// Tarefa operacional vinculada a uma reserva (limpeza, check-in, manutenção).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tarefa {
    pub id: Uuid,
    pub reserva_id: Uuid,
    pub tipo: String,
    pub status: TarefaStatus,
    pub data_prevista: DateTime<Utc>,
    pub data_conclusao: Option<DateTime<Utc>>,
    pub responsavel: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Projeção usada dentro do detalhe da reserva.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TarefaResumo {
    pub id: Uuid,
    pub tipo: String,
    pub status: TarefaStatus,
    pub data_prevista: DateTime<Utc>,
    pub data_conclusao: Option<DateTime<Utc>>,
    pub responsavel: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTarefaPayload {
    #[validate(length(min = 1, max = 50, message = "O tipo da tarefa é obrigatório"))]
    pub tipo: String,
    pub data_prevista: DateTime<Utc>,
    pub responsavel: Option<String>,
}
