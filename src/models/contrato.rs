// src/models/contrato.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_contrato", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoContrato {
    AdministracaoImovel,
    LocacaoTemporada,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_contrato", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusContrato {
    Rascunho,
    Gerado,
    Assinado,
    Cancelado,
}

impl std::fmt::Display for StatusContrato {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StatusContrato::Rascunho => "RASCUNHO",
            StatusContrato::Gerado => "GERADO",
            StatusContrato::Assinado => "ASSINADO",
            StatusContrato::Cancelado => "CANCELADO",
        };
        write!(f, "{}", s)
    }
}

/// Regras de transição do ciclo de vida do contrato.
///
/// RASCUNHO pode ser gerado ou cancelado; GERADO pode ser regenerado (nova
/// versão), assinado ou cancelado; ASSINADO e CANCELADO são terminais.
pub fn transicao_permitida(de: StatusContrato, para: StatusContrato) -> bool {
    use StatusContrato::*;
    matches!(
        (de, para),
        (Rascunho, Gerado) | (Rascunho, Cancelado) | (Gerado, Gerado) | (Gerado, Assinado) | (Gerado, Cancelado)
    )
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contrato {
    pub id: Uuid,
    pub cliente_id: Uuid,
    pub stays_reserva_id: Option<String>,
    pub tipo: TipoContrato,
    pub status: StatusContrato,
    pub versao: i32,
    /// Cláusulas e dados variáveis usados na renderização do PDF.
    pub dados_contrato: serde_json::Value,
    pub pdf_url: Option<String>,
    pub gerado_por: String,
    pub gerado_em: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContratoPayload {
    pub tipo: TipoContrato,
    pub cliente_id: Uuid,
    pub stays_reserva_id: Option<String>,
    pub dados_contrato: serde_json::Value,
    pub pdf_url: Option<String>,
    #[validate(length(min = 1, message = "O campo geradoPor é obrigatório"))]
    pub gerado_por: String,
    #[validate(range(min = 1))]
    pub versao: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContratoPayload {
    pub tipo: Option<TipoContrato>,
    pub status: Option<StatusContrato>,
    pub dados_contrato: Option<serde_json::Value>,
    pub pdf_url: Option<String>,
    pub gerado_por: Option<String>,
    #[validate(range(min = 1))]
    pub versao: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use StatusContrato::*;

    #[test]
    fn rascunho_pode_ser_gerado_ou_cancelado() {
        assert!(transicao_permitida(Rascunho, Gerado));
        assert!(transicao_permitida(Rascunho, Cancelado));
        assert!(!transicao_permitida(Rascunho, Assinado));
    }

    #[test]
    fn gerado_pode_ser_regenerado_assinado_ou_cancelado() {
        assert!(transicao_permitida(Gerado, Gerado));
        assert!(transicao_permitida(Gerado, Assinado));
        assert!(transicao_permitida(Gerado, Cancelado));
        assert!(!transicao_permitida(Gerado, Rascunho));
    }

    #[test]
    fn assinado_e_cancelado_sao_terminais() {
        for para in [Rascunho, Gerado, Assinado, Cancelado] {
            assert!(!transicao_permitida(Assinado, para));
            assert!(!transicao_permitida(Cancelado, para));
        }
    }
}
