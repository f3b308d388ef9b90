// src/models/sync.rs

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::stays::types::TipoDataReserva;

/// Resumo de uma execução de sincronização com a Stays.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncResumo {
    pub total_fetched: u32,
    pub created: u32,
    pub updated: u32,
    pub skipped: u32,
    /// Contagem por motivo: invalid_id, invalid_document, missing_email,
    /// invalid_dates, property_not_found, client_not_found, error.
    pub skipped_reasons: BTreeMap<String, u32>,
}

impl SyncResumo {
    pub fn pular(&mut self, motivo: &str) {
        self.skipped += 1;
        *self.skipped_reasons.entry(motivo.to_string()).or_insert(0) += 1;
    }
}

/// Resumo da sincronização de reservas, acrescido dos parâmetros efetivos da
/// janela consultada e dos clientes que não foram localizados no CRM.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncReservasResumo {
    pub total_fetched: u32,
    pub created: u32,
    pub updated: u32,
    pub skipped: u32,
    pub skipped_reasons: BTreeMap<String, u32>,
    pub from: String,
    pub to: String,
    pub date_type: String,
    pub limit: u32,
    pub clientes_nao_encontrados: Vec<String>,
}

impl SyncReservasResumo {
    pub fn montar(
        base: SyncResumo,
        from: String,
        to: String,
        date_type: String,
        limit: u32,
        clientes_nao_encontrados: Vec<String>,
    ) -> Self {
        Self {
            total_fetched: base.total_fetched,
            created: base.created,
            updated: base.updated,
            skipped: base.skipped,
            skipped_reasons: base.skipped_reasons,
            from,
            to,
            date_type,
            limit,
            clientes_nao_encontrados,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SyncClientesPayload {
    /// Tamanho de página usado na busca (1 a 500, padrão 100).
    pub limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SyncImoveisPayload {
    pub limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncReservasPayload {
    /// Início da janela (padrão: hoje - 30 dias).
    pub from: Option<NaiveDate>,
    /// Fim da janela (padrão: hoje + 180 dias).
    pub to: Option<NaiveDate>,
    pub date_type: Option<TipoDataReserva>,
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pular_acumula_por_motivo() {
        let mut resumo = SyncResumo::default();
        resumo.pular("invalid_document");
        resumo.pular("invalid_document");
        resumo.pular("missing_email");

        assert_eq!(resumo.skipped, 3);
        assert_eq!(resumo.skipped_reasons.get("invalid_document"), Some(&2));
        assert_eq!(resumo.skipped_reasons.get("missing_email"), Some(&1));
    }
}
