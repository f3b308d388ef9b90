// src/services/interacao_service.rs

use uuid::Uuid;

use crate::common::error::AppError;
use crate::db::{ClienteRepository, InteracaoRepository};
use crate::models::interacao::{
    CategoriaInteracao, CreateInteracaoPayload, Interacao, TipoInteracao, UpdateInteracaoPayload,
};

#[derive(Clone)]
pub struct InteracaoService {
    repo: InteracaoRepository,
    clientes: ClienteRepository,
}

impl InteracaoService {
    pub fn new(repo: InteracaoRepository, clientes: ClienteRepository) -> Self {
        Self { repo, clientes }
    }

    pub async fn criar(&self, payload: &CreateInteracaoPayload) -> Result<Interacao, AppError> {
        if self
            .clientes
            .buscar_por_id(payload.cliente_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!(
                "Cliente {} não encontrado",
                payload.cliente_id
            )));
        }
        self.repo.criar(payload).await
    }

    pub async fn listar(
        &self,
        tipo: Option<TipoInteracao>,
        categoria: Option<CategoriaInteracao>,
        cliente_id: Option<Uuid>,
    ) -> Result<Vec<Interacao>, AppError> {
        self.repo.listar(tipo, categoria, cliente_id).await
    }

    pub async fn buscar(&self, id: Uuid) -> Result<Interacao, AppError> {
        self.repo
            .buscar_por_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Interação {} não encontrada", id)))
    }

    pub async fn atualizar(
        &self,
        id: Uuid,
        payload: &UpdateInteracaoPayload,
    ) -> Result<Interacao, AppError> {
        self.repo
            .atualizar(id, payload)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Interação {} não encontrada", id)))
    }

    pub async fn deletar(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.deletar(id).await? {
            return Err(AppError::NotFound(format!(
                "Interação {} não encontrada",
                id
            )));
        }
        Ok(())
    }
}
