// src/services/sync/imoveis.rs

use std::collections::HashMap;
use std::sync::Arc;

use crate::common::error::AppError;
use crate::models::sync::SyncResumo;
use crate::stays::types::{StaysImovel, StaysProperty};

use super::campos::{precisa_complemento, resolver_campos_imovel};
use super::{
    limite_efetivo, CamposLocaisImovel, ImovelSync, ImovelSyncStore, ResultadoRegistro,
    StaysGateway, MAX_PAGINAS,
};

/// Motor de sincronização de imóveis: percorre `/content/listings` e completa
/// registros magros com os detalhes de conteúdo, de booking e da
/// propriedade-mãe antes do upsert.
#[derive(Clone)]
pub struct SyncImoveis {
    stays: Arc<dyn StaysGateway>,
    store: Arc<dyn ImovelSyncStore>,
}

impl SyncImoveis {
    pub fn new(stays: Arc<dyn StaysGateway>, store: Arc<dyn ImovelSyncStore>) -> Self {
        Self { stays, store }
    }

    pub async fn executar(&self, limit: Option<u32>) -> Result<SyncResumo, AppError> {
        let limite = limite_efetivo(limit);
        let mut resumo = SyncResumo::default();
        let mut skip: u32 = 0;
        // Anúncios do mesmo prédio apontam para a mesma propriedade-mãe; o
        // cache vale pela execução inteira, ausências incluídas.
        let mut properties: HashMap<String, Option<StaysProperty>> = HashMap::new();

        tracing::info!("Iniciando sincronização de imóveis da Stays (limit={})", limite);

        for _ in 0..MAX_PAGINAS {
            let pagina = self.stays.listar_imoveis(skip, limite).await?;
            if pagina.data.is_empty() {
                tracing::info!(
                    "✅ Sincronização de imóveis concluída: {} criados, {} atualizados, {} pulados",
                    resumo.created,
                    resumo.updated,
                    resumo.skipped
                );
                return Ok(resumo);
            }

            let recebidos = pagina.data.len() as u32;
            for registro in &pagina.data {
                resumo.total_fetched += 1;
                match self.processar(registro, &mut properties).await {
                    Ok(ResultadoRegistro::Criado) => resumo.created += 1,
                    Ok(ResultadoRegistro::Atualizado) => resumo.updated += 1,
                    Ok(ResultadoRegistro::Pulado(motivo)) => resumo.pular(motivo),
                    Err(e) => {
                        tracing::warn!("Falha ao sincronizar imóvel {}: {}", registro.id, e);
                        resumo.pular("error");
                    }
                }
            }

            skip += recebidos;
        }

        Err(AppError::StaysPayloadInvalido(format!(
            "A paginação de imóveis da Stays não terminou após {} páginas",
            MAX_PAGINAS
        )))
    }

    async fn processar(
        &self,
        registro: &StaysImovel,
        properties: &mut HashMap<String, Option<StaysProperty>>,
    ) -> Result<ResultadoRegistro, AppError> {
        let stays_id = registro.id.trim();
        if stays_id.is_empty() {
            return Ok(ResultadoRegistro::Pulado("invalid_id"));
        }

        // Complementos só quando a listagem não basta. Os dois detalhes saem
        // em paralelo e cada ramo falha sozinho: erro vira "sem dados".
        let incompleto = precisa_complemento(registro);
        let (detalhe, booking) = if incompleto {
            let (detalhe, booking) = tokio::join!(
                self.stays.buscar_imovel(stays_id),
                self.stays.buscar_imovel_booking(stays_id),
            );
            (
                sem_dados(detalhe, &format!("Falha ao buscar detalhe do imóvel {}", stays_id)),
                sem_dados(booking, &format!("Falha ao buscar booking do imóvel {}", stays_id)),
            )
        } else {
            (None, None)
        };

        let idproperty = registro
            .idproperty
            .as_deref()
            .or_else(|| detalhe.as_ref().and_then(|d| d.idproperty.as_deref()))
            .map(str::trim)
            .filter(|p| !p.is_empty());

        let property = match idproperty {
            Some(pid) if incompleto => {
                if !properties.contains_key(pid) {
                    let buscada = sem_dados(
                        self.stays.buscar_property(pid).await,
                        &format!("Falha ao buscar propriedade {}", pid),
                    );
                    properties.insert(pid.to_string(), buscada);
                }
                properties.get(pid).and_then(|p| p.as_ref())
            }
            _ => None,
        };

        let existente = self.store.buscar_por_stays_id(stays_id).await?;
        let campos = resolver_campos_imovel(
            stays_id,
            registro,
            detalhe.as_ref(),
            booking.as_ref(),
            property,
            existente.as_ref(),
        );

        let dados = ImovelSync {
            stays_imovel_id: stays_id.to_string(),
            nome: campos.nome,
            endereco: campos.endereco,
            tipo: campos.tipo,
            capacidade: campos.capacidade,
        };

        match existente {
            Some(imovel) => {
                let locais = CamposLocaisImovel::de_imovel(&imovel);
                self.store.atualizar(imovel.id, &dados, &locais).await?;
                Ok(ResultadoRegistro::Atualizado)
            }
            None => {
                self.store.criar(&dados, &CamposLocaisImovel::default()).await?;
                Ok(ResultadoRegistro::Criado)
            }
        }
    }
}

fn sem_dados<T>(resultado: Result<Option<T>, AppError>, contexto: &str) -> Option<T> {
    match resultado {
        Ok(valor) => valor,
        Err(e) => {
            tracing::warn!("{}: {}", contexto, e);
            None
        }
    }
}
