// src/handlers/reservas.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::reserva::{
        BookingSource, CreateReservaPayload, PaymentStatus, Reserva, ReservaDetalhe,
        ReservaFiltros, ReservaStatus, ReservasResponse, UpdateReservaPayload,
    },
    models::sync::{SyncReservasPayload, SyncReservasResumo},
    models::tarefa::{CreateTarefaPayload, Tarefa},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListarReservasQuery {
    pub status: Option<ReservaStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub origem: Option<BookingSource>,
    pub imovel_id: Option<Uuid>,
    pub cliente_id: Option<Uuid>,
    pub check_in_from: Option<DateTime<Utc>>,
    pub check_in_to: Option<DateTime<Utc>>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
}

// POST /api/reservas
#[utoipa::path(
    post,
    path = "/api/reservas",
    tag = "Reservas",
    request_body = CreateReservaPayload,
    responses(
        (status = 201, description = "Reserva criada", body = Reserva),
        (status = 400, description = "Dados inválidos ou referência inexistente"),
        (status = 409, description = "Já existe uma reserva com este identificador")
    )
)]
pub async fn criar_reserva(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateReservaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let reserva = app_state.reserva_service.criar(&payload).await?;
    Ok((StatusCode::CREATED, Json(reserva)))
}

// GET /api/reservas
#[utoipa::path(
    get,
    path = "/api/reservas",
    tag = "Reservas",
    params(
        ("status" = Option<ReservaStatus>, Query, description = "Filtra pelo status do pipeline"),
        ("paymentStatus" = Option<PaymentStatus>, Query, description = "Filtra pelo status de pagamento"),
        ("origem" = Option<BookingSource>, Query, description = "Filtra pelo canal de origem"),
        ("imovelId" = Option<Uuid>, Query, description = "Filtra pelo imóvel"),
        ("clienteId" = Option<Uuid>, Query, description = "Filtra pelo cliente"),
        ("checkInFrom" = Option<DateTime<Utc>>, Query, description = "Check-in a partir de"),
        ("checkInTo" = Option<DateTime<Utc>>, Query, description = "Check-in até"),
        ("skip" = Option<i64>, Query, description = "Deslocamento da paginação"),
        ("take" = Option<i64>, Query, description = "Tamanho da página (1 a 100, padrão 50)")
    ),
    responses(
        (status = 200, description = "Reservas com dados de imóvel e cliente", body = ReservasResponse)
    )
)]
pub async fn listar_reservas(
    State(app_state): State<AppState>,
    Query(query): Query<ListarReservasQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filtros = ReservaFiltros {
        status: query.status,
        payment_status: query.payment_status,
        origem: query.origem,
        imovel_id: query.imovel_id,
        cliente_id: query.cliente_id,
        check_in_from: query.check_in_from,
        check_in_to: query.check_in_to,
    };

    let resposta = app_state
        .reserva_service
        .listar(&filtros, query.skip, query.take)
        .await?;
    Ok(Json(resposta))
}

// GET /api/reservas/{id}
#[utoipa::path(
    get,
    path = "/api/reservas/{id}",
    tag = "Reservas",
    params(
        ("id" = Uuid, Path, description = "ID da reserva")
    ),
    responses(
        (status = 200, description = "Reserva com imóvel, cliente e tarefas", body = ReservaDetalhe),
        (status = 404, description = "Reserva não encontrada")
    )
)]
pub async fn detalhe_reserva(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detalhe = app_state.reserva_service.detalhe(id).await?;
    Ok(Json(detalhe))
}

// PATCH /api/reservas/{id}
#[utoipa::path(
    patch,
    path = "/api/reservas/{id}",
    tag = "Reservas",
    request_body = UpdateReservaPayload,
    params(
        ("id" = Uuid, Path, description = "ID da reserva")
    ),
    responses(
        (status = 200, description = "Reserva atualizada", body = Reserva),
        (status = 400, description = "Período inválido"),
        (status = 404, description = "Reserva não encontrada")
    )
)]
pub async fn atualizar_reserva(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateReservaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let reserva = app_state.reserva_service.atualizar(id, &payload).await?;
    Ok(Json(reserva))
}

// DELETE /api/reservas/{id}
#[utoipa::path(
    delete,
    path = "/api/reservas/{id}",
    tag = "Reservas",
    params(
        ("id" = Uuid, Path, description = "ID da reserva")
    ),
    responses(
        (status = 204, description = "Reserva removida"),
        (status = 404, description = "Reserva não encontrada")
    )
)]
pub async fn deletar_reserva(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.reserva_service.deletar(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/reservas/sync
#[utoipa::path(
    post,
    path = "/api/reservas/sync",
    tag = "Reservas",
    request_body = SyncReservasPayload,
    responses(
        (status = 200, description = "Resumo da sincronização com a janela efetiva", body = SyncReservasResumo),
        (status = 502, description = "Resposta inválida da Stays")
    )
)]
pub async fn sincronizar_reservas(
    State(app_state): State<AppState>,
    payload: Option<Json<SyncReservasPayload>>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let resumo = app_state.sync_reservas.executar(payload).await?;
    Ok(Json(resumo))
}

// --- TAREFAS ---

// POST /api/reservas/{id}/tarefas
#[utoipa::path(
    post,
    path = "/api/reservas/{id}/tarefas",
    tag = "Reservas",
    request_body = CreateTarefaPayload,
    params(
        ("id" = Uuid, Path, description = "ID da reserva")
    ),
    responses(
        (status = 201, description = "Tarefa criada", body = Tarefa),
        (status = 404, description = "Reserva não encontrada")
    )
)]
pub async fn criar_tarefa(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateTarefaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let tarefa = app_state.reserva_service.criar_tarefa(id, &payload).await?;
    Ok((StatusCode::CREATED, Json(tarefa)))
}

// GET /api/reservas/{id}/tarefas
#[utoipa::path(
    get,
    path = "/api/reservas/{id}/tarefas",
    tag = "Reservas",
    params(
        ("id" = Uuid, Path, description = "ID da reserva")
    ),
    responses(
        (status = 200, description = "Tarefas da reserva", body = Vec<Tarefa>),
        (status = 404, description = "Reserva não encontrada")
    )
)]
pub async fn listar_tarefas(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tarefas = app_state.reserva_service.listar_tarefas(id).await?;
    Ok(Json(tarefas))
}

// PATCH /api/reservas/tarefas/{id}/concluir
#[utoipa::path(
    patch,
    path = "/api/reservas/tarefas/{id}/concluir",
    tag = "Reservas",
    params(
        ("id" = Uuid, Path, description = "ID da tarefa")
    ),
    responses(
        (status = 200, description = "Tarefa concluída", body = Tarefa),
        (status = 404, description = "Tarefa não encontrada")
    )
)]
pub async fn concluir_tarefa(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tarefa = app_state.reserva_service.concluir_tarefa(id).await?;
    Ok(Json(tarefa))
}
