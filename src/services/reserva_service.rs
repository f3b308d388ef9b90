// src/services/reserva_service.rs

use uuid::Uuid;

use crate::common::error::AppError;
use crate::db::ReservaRepository;
use crate::models::reserva::{
    CreateReservaPayload, Reserva, ReservaDetalhe, ReservaFiltros, ReservasMeta,
    ReservasResponse, UpdateReservaPayload,
};
use crate::models::tarefa::{CreateTarefaPayload, Tarefa};

#[derive(Clone)]
pub struct ReservaService {
    repo: ReservaRepository,
}

impl ReservaService {
    pub fn new(repo: ReservaRepository) -> Self {
        Self { repo }
    }

    pub async fn criar(&self, payload: &CreateReservaPayload) -> Result<Reserva, AppError> {
        self.repo.criar(payload).await
    }

    // A listagem devolve os dados e os metadados de paginação juntos para o
    // pipeline do frontend ('hasMore' evita uma chamada extra de contagem).
    pub async fn listar(
        &self,
        filtros: &ReservaFiltros,
        skip: Option<i64>,
        take: Option<i64>,
    ) -> Result<ReservasResponse, AppError> {
        let skip = skip.unwrap_or(0).max(0);
        let take = take.unwrap_or(50).clamp(1, 100);

        let data = self.repo.listar(filtros, skip, take).await?;
        let total = self.repo.contar(filtros).await?;
        let has_more = skip + (data.len() as i64) < total;

        Ok(ReservasResponse {
            data,
            meta: ReservasMeta {
                skip,
                take,
                total,
                has_more,
            },
        })
    }

    pub async fn buscar(&self, id: Uuid) -> Result<Reserva, AppError> {
        self.repo
            .buscar_por_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reserva {} não encontrada", id)))
    }

    pub async fn detalhe(&self, id: Uuid) -> Result<ReservaDetalhe, AppError> {
        let reserva = self
            .repo
            .buscar_resumo_por_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reserva {} não encontrada", id)))?;
        let tarefas = self.repo.listar_tarefas_resumo(id).await?;
        Ok(ReservaDetalhe { reserva, tarefas })
    }

    pub async fn atualizar(
        &self,
        id: Uuid,
        payload: &UpdateReservaPayload,
    ) -> Result<Reserva, AppError> {
        // O payload parcial não consegue validar o período sozinho; quando as
        // duas datas vêm juntas, o serviço confere a ordem.
        if let (Some(check_in), Some(check_out)) = (payload.check_in, payload.check_out) {
            if check_out <= check_in {
                return Err(AppError::BadRequest(
                    "O check-out deve ser posterior ao check-in".to_string(),
                ));
            }
        }

        self.repo
            .atualizar(id, payload)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reserva {} não encontrada", id)))
    }

    pub async fn deletar(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.deletar(id).await? {
            return Err(AppError::NotFound(format!(
                "Reserva {} não encontrada",
                id
            )));
        }
        Ok(())
    }

    // --- TAREFAS ---

    pub async fn criar_tarefa(
        &self,
        reserva_id: Uuid,
        payload: &CreateTarefaPayload,
    ) -> Result<Tarefa, AppError> {
        self.buscar(reserva_id).await?;
        self.repo.criar_tarefa(reserva_id, payload).await
    }

    pub async fn listar_tarefas(&self, reserva_id: Uuid) -> Result<Vec<Tarefa>, AppError> {
        self.buscar(reserva_id).await?;
        self.repo.listar_tarefas(reserva_id).await
    }

    pub async fn concluir_tarefa(&self, tarefa_id: Uuid) -> Result<Tarefa, AppError> {
        self.repo
            .concluir_tarefa(tarefa_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tarefa {} não encontrada", tarefa_id)))
    }
}
