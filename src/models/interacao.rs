// src/models/interacao.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_interacao", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoInteracao {
    Email,
    Telefone,
    Whatsapp,
    Presencial,
    Nota,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "categoria_interacao", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoriaInteracao {
    Duvida,
    Reclamacao,
    Elogio,
    Suporte,
    Comercial,
}

// Registro de contato com o cliente (e-mail, ligação, nota interna).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Interacao {
    pub id: Uuid,
    pub cliente_id: Uuid,
    pub contrato_id: Option<Uuid>,
    pub tipo: TipoInteracao,
    pub categoria: CategoriaInteracao,
    pub descricao: String,
    pub registrado_por: String,
    pub anexos: Vec<String>,
    pub data_hora: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInteracaoPayload {
    pub cliente_id: Uuid,
    pub contrato_id: Option<Uuid>,
    pub tipo: TipoInteracao,
    pub categoria: CategoriaInteracao,
    #[validate(length(min = 1, max = 2000, message = "A descrição é obrigatória"))]
    pub descricao: String,
    #[validate(length(min = 1, message = "O campo registradoPor é obrigatório"))]
    pub registrado_por: String,
    pub anexos: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInteracaoPayload {
    pub contrato_id: Option<Uuid>,
    pub tipo: Option<TipoInteracao>,
    pub categoria: Option<CategoriaInteracao>,
    #[validate(length(min = 1, max = 2000, message = "A descrição é obrigatória"))]
    pub descricao: Option<String>,
    pub anexos: Option<Vec<String>>,
}
