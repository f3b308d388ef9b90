// src/services/imovel_service.rs

use uuid::Uuid;

use crate::common::error::AppError;
use crate::db::ImovelRepository;
use crate::models::imovel::{CreateImovelPayload, Imovel, UpdateImovelPayload};

#[derive(Clone)]
pub struct ImovelService {
    repo: ImovelRepository,
}

impl ImovelService {
    pub fn new(repo: ImovelRepository) -> Self {
        Self { repo }
    }

    pub async fn criar(&self, payload: &CreateImovelPayload) -> Result<Imovel, AppError> {
        self.repo.criar(payload).await
    }

    pub async fn listar(
        &self,
        tipo: Option<&str>,
        skip: Option<i64>,
        take: Option<i64>,
    ) -> Result<Vec<Imovel>, AppError> {
        let skip = skip.unwrap_or(0).max(0);
        let take = take.unwrap_or(50).clamp(1, 100);
        self.repo.listar(tipo, skip, take).await
    }

    pub async fn buscar(&self, id: Uuid) -> Result<Imovel, AppError> {
        self.repo
            .buscar_por_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Imóvel {} não encontrado", id)))
    }

    pub async fn atualizar(
        &self,
        id: Uuid,
        payload: &UpdateImovelPayload,
    ) -> Result<Imovel, AppError> {
        self.repo
            .atualizar(id, payload)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Imóvel {} não encontrado", id)))
    }

    pub async fn deletar(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.deletar(id).await? {
            return Err(AppError::NotFound(format!("Imóvel {} não encontrado", id)));
        }
        Ok(())
    }
}
