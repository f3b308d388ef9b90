// src/models/imovel.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "imovel_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImovelStatus {
    Disponivel,
    Ocupado,
    Manutencao,
    Inativo,
}

// --- IMÓVEL ---

// O sync da Stays escreve apenas nome, endereco, tipo e capacidade (além do
// staysImovelId). Todo o restante é operacional e pertence ao CRM: o sync
// reapresenta os valores existentes a cada atualização, nunca os limpa.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Imovel {
    pub id: Uuid,
    pub stays_imovel_id: Option<String>,

    pub nome: String,
    pub endereco: String,
    pub tipo: String,
    pub capacidade: i32,

    // Endereço estruturado (preenchido manualmente no cadastro)
    pub rua: Option<String>,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub cep: Option<String>,
    pub apartamento: Option<String>,

    // Registro do imóvel
    pub matricula: Option<String>,
    pub cartorio: Option<String>,
    pub inscricao_municipal: Option<String>,

    #[schema(example = "350.00")]
    pub valor_minimo_diaria: Option<Decimal>,

    pub status: ImovelStatus,
    pub responsavel_local: Option<String>,
    pub responsavel_contato: Option<String>,

    pub comodidades: Vec<String>,
    pub fotos: Vec<String>,
    pub instrucoes: Option<Value>,

    // Listas JSONB de eventos operacionais (append-only via CRUD)
    pub historico_manutencao: Value,
    pub custos_operacionais: Value,

    pub documentacao: Vec<String>,
    pub observacoes: Option<String>,

    pub ultima_vistoria: Option<DateTime<Utc>>,
    pub proxima_manutencao: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateImovelPayload {
    pub stays_imovel_id: Option<String>,

    #[validate(length(min = 1, message = "O nome é obrigatório"))]
    #[schema(example = "Casa Margarida")]
    pub nome: String,

    #[validate(length(min = 1, message = "O endereço é obrigatório"))]
    #[schema(example = "Rua das Flores, 100, Copacabana, Rio de Janeiro")]
    pub endereco: String,

    #[schema(example = "Casa")]
    pub tipo: String,

    #[validate(range(min = 0, message = "A capacidade não pode ser negativa"))]
    pub capacidade: i32,

    pub rua: Option<String>,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub cep: Option<String>,
    pub apartamento: Option<String>,

    pub matricula: Option<String>,
    pub cartorio: Option<String>,
    pub inscricao_municipal: Option<String>,

    pub valor_minimo_diaria: Option<Decimal>,

    pub status: Option<ImovelStatus>,
    pub responsavel_local: Option<String>,
    pub responsavel_contato: Option<String>,

    pub comodidades: Option<Vec<String>>,
    pub fotos: Option<Vec<String>>,
    pub instrucoes: Option<Value>,

    pub historico_manutencao: Option<Value>,
    pub custos_operacionais: Option<Value>,

    pub documentacao: Option<Vec<String>>,
    pub observacoes: Option<String>,

    pub ultima_vistoria: Option<DateTime<Utc>>,
    pub proxima_manutencao: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateImovelPayload {
    #[validate(length(min = 1, message = "O nome não pode ficar vazio"))]
    pub nome: Option<String>,

    #[validate(length(min = 1, message = "O endereço não pode ficar vazio"))]
    pub endereco: Option<String>,

    pub tipo: Option<String>,

    #[validate(range(min = 0, message = "A capacidade não pode ser negativa"))]
    pub capacidade: Option<i32>,

    pub rua: Option<String>,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub cep: Option<String>,
    pub apartamento: Option<String>,

    pub matricula: Option<String>,
    pub cartorio: Option<String>,
    pub inscricao_municipal: Option<String>,

    pub valor_minimo_diaria: Option<Decimal>,

    pub status: Option<ImovelStatus>,
    pub responsavel_local: Option<String>,
    pub responsavel_contato: Option<String>,

    pub comodidades: Option<Vec<String>>,
    pub fotos: Option<Vec<String>>,
    pub instrucoes: Option<Value>,

    pub historico_manutencao: Option<Value>,
    pub custos_operacionais: Option<Value>,

    pub documentacao: Option<Vec<String>>,
    pub observacoes: Option<String>,

    pub ultima_vistoria: Option<DateTime<Utc>>,
    pub proxima_manutencao: Option<DateTime<Utc>>,
}
