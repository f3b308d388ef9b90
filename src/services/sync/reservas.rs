// src/services/sync/reservas.rs

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::common::error::AppError;
use crate::models::sync::{SyncReservasPayload, SyncReservasResumo, SyncResumo};
use crate::stays::types::{StaysReserva, StaysReservasFiltros};

use super::campos::{
    canal_bruto, compor_data_hora, decimal_de, derivar_payment_status, derivar_status_reserva,
    inferir_origem, resolver_total_hospedes, resolver_valor_pago, resolver_valor_total,
};
use super::identidade::MapaIdentidade;
use super::{
    limite_efetivo, CamposLocaisReserva, ClienteSyncStore, ImovelSyncStore, ReservaSync,
    ReservaSyncStore, ResultadoRegistro, StaysGateway, MAX_PAGINAS,
};

/// Motor de sincronização de reservas. É a etapa final: imóveis e clientes
/// precisam já existir no CRM, reserva com referência não resolvida é pulada.
#[derive(Clone)]
pub struct SyncReservas {
    stays: Arc<dyn StaysGateway>,
    reservas: Arc<dyn ReservaSyncStore>,
    imoveis: Arc<dyn ImovelSyncStore>,
    clientes: Arc<dyn ClienteSyncStore>,
}

impl SyncReservas {
    pub fn new(
        stays: Arc<dyn StaysGateway>,
        reservas: Arc<dyn ReservaSyncStore>,
        imoveis: Arc<dyn ImovelSyncStore>,
        clientes: Arc<dyn ClienteSyncStore>,
    ) -> Self {
        Self {
            stays,
            reservas,
            imoveis,
            clientes,
        }
    }

    pub async fn executar(
        &self,
        params: SyncReservasPayload,
    ) -> Result<SyncReservasResumo, AppError> {
        let hoje = Utc::now().date_naive();
        let from = params.from.unwrap_or_else(|| hoje - Duration::days(30));
        let to = params.to.unwrap_or_else(|| hoje + Duration::days(180));
        let date_type = params.date_type.unwrap_or_default();
        let limite = limite_efetivo(params.limit);

        let mut filtros = StaysReservasFiltros {
            from: from.format("%Y-%m-%d").to_string(),
            to: to.format("%Y-%m-%d").to_string(),
            date_type,
            skip: Some(0),
            limit: Some(limite),
            ..Default::default()
        };

        tracing::info!(
            "Iniciando sincronização de reservas da Stays ({} a {}, dateType={}, limit={})",
            filtros.from,
            filtros.to,
            date_type.como_str(),
            limite
        );

        let mut resumo = SyncResumo::default();
        // Um mapa por execução: cada id distinto custa uma ida ao banco.
        let mut mapa_imoveis = MapaIdentidade::new();
        let mut mapa_clientes = MapaIdentidade::new();
        let mut clientes_nao_encontrados: Vec<String> = Vec::new();

        for _ in 0..MAX_PAGINAS {
            let pagina = self.stays.listar_reservas(&filtros).await?;
            if pagina.is_empty() {
                tracing::info!(
                    "✅ Sincronização de reservas concluída: {} criadas, {} atualizadas, {} puladas",
                    resumo.created,
                    resumo.updated,
                    resumo.skipped
                );
                return Ok(SyncReservasResumo::montar(
                    resumo,
                    filtros.from,
                    filtros.to,
                    date_type.como_str().to_string(),
                    limite,
                    clientes_nao_encontrados,
                ));
            }

            let recebidos = pagina.len() as u32;
            for registro in &pagina {
                resumo.total_fetched += 1;
                let desfecho = self
                    .processar(
                        registro,
                        &mut mapa_imoveis,
                        &mut mapa_clientes,
                        &mut clientes_nao_encontrados,
                    )
                    .await;

                match desfecho {
                    Ok(ResultadoRegistro::Criado) => resumo.created += 1,
                    Ok(ResultadoRegistro::Atualizado) => resumo.updated += 1,
                    Ok(ResultadoRegistro::Pulado(motivo)) => resumo.pular(motivo),
                    Err(e) => {
                        tracing::warn!("Falha ao sincronizar reserva {}: {}", registro.id, e);
                        resumo.pular("error");
                    }
                }
            }

            filtros.skip = Some(filtros.skip.unwrap_or(0) + recebidos);
        }

        Err(AppError::StaysPayloadInvalido(format!(
            "A paginação de reservas da Stays não terminou após {} páginas",
            MAX_PAGINAS
        )))
    }

    async fn processar(
        &self,
        registro: &StaysReserva,
        mapa_imoveis: &mut MapaIdentidade,
        mapa_clientes: &mut MapaIdentidade,
        clientes_nao_encontrados: &mut Vec<String>,
    ) -> Result<ResultadoRegistro, AppError> {
        let stays_id = registro.id.trim();
        if stays_id.is_empty() {
            return Ok(ResultadoRegistro::Pulado("invalid_id"));
        }

        let check_in = compor_data_hora(
            registro.check_in_date.as_deref(),
            registro.check_in_time.as_deref(),
        );
        let check_out = compor_data_hora(
            registro.check_out_date.as_deref(),
            registro.check_out_time.as_deref(),
        );
        let (Some(check_in), Some(check_out)) = (check_in, check_out) else {
            return Ok(ResultadoRegistro::Pulado("invalid_dates"));
        };

        let Some(idlisting) = registro
            .idlisting
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        else {
            return Ok(ResultadoRegistro::Pulado("property_not_found"));
        };

        let store_imoveis = Arc::clone(&self.imoveis);
        let imovel_id = mapa_imoveis
            .resolver(idlisting, move |id| async move {
                Ok(store_imoveis.buscar_por_stays_id(&id).await?.map(|i| i.id))
            })
            .await?;
        let Some(imovel_id) = imovel_id else {
            return Ok(ResultadoRegistro::Pulado("property_not_found"));
        };

        let Some(idclient) = registro
            .idclient
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        else {
            return Ok(ResultadoRegistro::Pulado("client_not_found"));
        };

        let store_clientes = Arc::clone(&self.clientes);
        let cliente_id = mapa_clientes
            .resolver(idclient, move |id| async move {
                Ok(store_clientes.buscar_por_stays_id(&id).await?.map(|c| c.id))
            })
            .await?;
        let Some(cliente_id) = cliente_id else {
            if !clientes_nao_encontrados.iter().any(|c| c == idclient) {
                clientes_nao_encontrados.push(idclient.to_string());
            }
            return Ok(ResultadoRegistro::Pulado("client_not_found"));
        };

        let valor_total = resolver_valor_total(registro);
        let valor_pago = resolver_valor_pago(registro);

        let dados = ReservaSync {
            stays_reserva_id: stays_id.to_string(),
            imovel_id,
            cliente_id,
            status: derivar_status_reserva(Utc::now(), check_in, check_out),
            payment_status: derivar_payment_status(valor_total, valor_pago),
            origem: inferir_origem(registro),
            canal: canal_bruto(registro),
            check_in,
            check_out,
            total_hospedes: resolver_total_hospedes(registro),
            valor_total: decimal_de(valor_total),
            sinal: decimal_de(valor_pago),
        };

        match self.reservas.buscar_por_stays_id(stays_id).await? {
            Some(reserva) => {
                let locais = CamposLocaisReserva::de_reserva(&reserva);
                self.reservas.atualizar(reserva.id, &dados, &locais).await?;
                Ok(ResultadoRegistro::Atualizado)
            }
            None => {
                self.reservas
                    .criar(&dados, &CamposLocaisReserva::default())
                    .await?;
                Ok(ResultadoRegistro::Criado)
            }
        }
    }
}
