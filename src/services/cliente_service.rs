// src/services/cliente_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::common::error::AppError;
use crate::db::{ClienteRepository, ContratoRepository, InteracaoRepository};
use crate::models::cliente::{
    Cliente, ClienteDetalhe, CreateClientePayload, UpdateClientePayload,
};
use crate::stays::client::StaysClient;
use crate::stays::types::{
    StaysCliente, StaysClienteDetalhado, StaysClientesFiltros, StaysPagina,
};

const INTERACOES_NO_DETALHE: i64 = 10;

#[derive(Clone)]
pub struct ClienteService {
    repo: ClienteRepository,
    contratos: ContratoRepository,
    interacoes: InteracaoRepository,
    stays: Arc<StaysClient>,
}

impl ClienteService {
    pub fn new(
        repo: ClienteRepository,
        contratos: ContratoRepository,
        interacoes: InteracaoRepository,
        stays: Arc<StaysClient>,
    ) -> Self {
        Self {
            repo,
            contratos,
            interacoes,
            stays,
        }
    }

    pub async fn criar(&self, payload: &CreateClientePayload) -> Result<Cliente, AppError> {
        self.repo.criar(payload).await
    }

    pub async fn listar(
        &self,
        tag: Option<&str>,
        origem: Option<&str>,
        skip: Option<i64>,
        take: Option<i64>,
    ) -> Result<Vec<Cliente>, AppError> {
        let skip = skip.unwrap_or(0).max(0);
        let take = take.unwrap_or(50).clamp(1, 100);
        self.repo.listar(tag, origem, skip, take).await
    }

    pub async fn buscar(&self, id: Uuid) -> Result<Cliente, AppError> {
        self.repo
            .buscar_por_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Cliente {} não encontrado", id)))
    }

    // O detalhe agrega os contratos do cliente e as interações mais recentes.
    pub async fn detalhe(&self, id: Uuid) -> Result<ClienteDetalhe, AppError> {
        let cliente = self.buscar(id).await?;
        let contratos = self.contratos.listar_por_cliente(id).await?;
        let interacoes = self
            .interacoes
            .listar_por_cliente(id, INTERACOES_NO_DETALHE)
            .await?;
        Ok(ClienteDetalhe {
            cliente,
            contratos,
            interacoes,
        })
    }

    pub async fn atualizar(
        &self,
        id: Uuid,
        payload: &UpdateClientePayload,
    ) -> Result<Cliente, AppError> {
        self.repo
            .atualizar(id, payload)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Cliente {} não encontrado", id)))
    }

    pub async fn deletar(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.deletar(id).await? {
            return Err(AppError::NotFound(format!(
                "Cliente {} não encontrado",
                id
            )));
        }
        Ok(())
    }

    // --- PASSTHROUGH STAYS ---

    // Consulta direta à Stays para o frontend, sem tocar o banco local.
    // A API da Stays pagina por skip/limit; aqui expomos page/limit.
    pub async fn listar_da_stays(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
        filtros: &StaysClientesFiltros,
    ) -> Result<StaysPagina<StaysCliente>, AppError> {
        let limit = limit.unwrap_or(20).clamp(1, 100);
        let page = page.unwrap_or(1).max(1);
        let skip = (page - 1) * limit;
        self.stays
            .listar_clientes_com_filtros(skip, limit, filtros)
            .await
    }

    pub async fn buscar_na_stays(&self, id: &str) -> Result<StaysClienteDetalhado, AppError> {
        self.stays
            .buscar_cliente(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Cliente {} não encontrado na Stays", id)))
    }
}
