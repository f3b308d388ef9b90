// src/models/reserva.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::tarefa::TarefaResumo;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "reserva_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservaStatus {
    Lead,
    Orcamento,
    AguardandoPagamento,
    Confirmado,
    CheckinAgendado,
    Ativo,
    Checkout,
    Concluido,
    Cancelado,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pendente,
    Pago,
    Parcial,
    Atrasado,
    Estornado,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "booking_source", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingSource {
    Airbnb,
    Booking,
    Direto,
    Expedia,
    Outro,
}

// --- RESERVA ---

// Linha plana da tabela. As respostas da API usam ReservaResumo, que embute
// os dados do imóvel e do cliente como no frontend original.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reserva {
    pub id: Uuid,
    pub stays_reserva_id: Option<String>,

    pub imovel_id: Uuid,
    pub cliente_id: Uuid,

    pub status: ReservaStatus,
    pub payment_status: PaymentStatus,
    pub origem: BookingSource,
    pub canal: Option<String>,

    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub total_hospedes: i32,

    #[schema(example = "1500.00")]
    pub valor_total: Option<Decimal>,
    #[schema(example = "500.00")]
    pub sinal: Option<Decimal>,

    // Campos de propriedade exclusiva do CRM
    pub observacoes: Option<String>,
    pub notas_internas: Option<String>,
    pub pipeline_posicao: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservaImovelInfo {
    pub id: Uuid,
    pub nome: String,
    pub tipo: String,
    pub endereco: String,
    pub responsavel_local: Option<String>,
    pub responsavel_contato: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservaClienteInfo {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub telefone: Option<String>,
    pub origem: Option<String>,
    pub tags: Vec<String>,
}

// Forma retornada pelas listagens e pelo detalhe (equivale ao SELECT com
// joins do CRM original).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservaResumo {
    pub id: Uuid,
    pub stays_reserva_id: Option<String>,
    pub status: ReservaStatus,
    pub payment_status: PaymentStatus,
    pub origem: BookingSource,
    pub canal: Option<String>,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub total_hospedes: i32,
    pub valor_total: Option<Decimal>,
    pub sinal: Option<Decimal>,
    pub observacoes: Option<String>,
    pub notas_internas: Option<String>,
    pub pipeline_posicao: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub imovel: ReservaImovelInfo,
    pub cliente: ReservaClienteInfo,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservaDetalhe {
    #[serde(flatten)]
    pub reserva: ReservaResumo,
    pub tarefas: Vec<TarefaResumo>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservasMeta {
    pub skip: i64,
    pub take: i64,
    pub total: i64,
    pub has_more: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReservasResponse {
    pub data: Vec<ReservaResumo>,
    pub meta: ReservasMeta,
}

// Filtros aceitos pela listagem, já convertidos para os tipos do domínio.
#[derive(Debug, Clone, Default)]
pub struct ReservaFiltros {
    pub status: Option<ReservaStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub origem: Option<BookingSource>,
    pub imovel_id: Option<Uuid>,
    pub cliente_id: Option<Uuid>,
    pub check_in_from: Option<DateTime<Utc>>,
    pub check_in_to: Option<DateTime<Utc>>,
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = validar_periodo))]
pub struct CreateReservaPayload {
    pub stays_reserva_id: Option<String>,

    pub imovel_id: Uuid,
    pub cliente_id: Uuid,

    pub status: Option<ReservaStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub origem: Option<BookingSource>,
    pub canal: Option<String>,

    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,

    #[validate(range(min = 1, message = "A reserva precisa de pelo menos um hóspede"))]
    pub total_hospedes: i32,

    pub valor_total: Option<Decimal>,
    pub sinal: Option<Decimal>,

    pub observacoes: Option<String>,
    pub notas_internas: Option<String>,
    pub pipeline_posicao: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservaPayload {
    pub stays_reserva_id: Option<String>,

    pub imovel_id: Option<Uuid>,
    pub cliente_id: Option<Uuid>,

    pub status: Option<ReservaStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub origem: Option<BookingSource>,
    pub canal: Option<String>,

    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,

    #[validate(range(min = 1, message = "A reserva precisa de pelo menos um hóspede"))]
    pub total_hospedes: Option<i32>,

    pub valor_total: Option<Decimal>,
    pub sinal: Option<Decimal>,

    pub observacoes: Option<String>,
    pub notas_internas: Option<String>,
    pub pipeline_posicao: Option<i32>,
}

fn validar_periodo(payload: &CreateReservaPayload) -> Result<(), ValidationError> {
    if payload.check_out <= payload.check_in {
        return Err(ValidationError::new("periodo_invalido")
            .with_message("O check-out deve ser depois do check-in".into()));
    }
    Ok(())
}
