// src/handlers/interacoes.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::interacao::{
        CategoriaInteracao, CreateInteracaoPayload, Interacao, TipoInteracao,
        UpdateInteracaoPayload,
    },
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListarInteracoesQuery {
    pub tipo: Option<TipoInteracao>,
    pub categoria: Option<CategoriaInteracao>,
    pub cliente_id: Option<Uuid>,
}

// POST /api/interacoes
#[utoipa::path(
    post,
    path = "/api/interacoes",
    tag = "Interações",
    request_body = CreateInteracaoPayload,
    responses(
        (status = 201, description = "Interação registrada", body = Interacao),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn criar_interacao(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateInteracaoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let interacao = app_state.interacao_service.criar(&payload).await?;
    Ok((StatusCode::CREATED, Json(interacao)))
}

// GET /api/interacoes
#[utoipa::path(
    get,
    path = "/api/interacoes",
    tag = "Interações",
    params(
        ("tipo" = Option<TipoInteracao>, Query, description = "Filtra pelo tipo da interação"),
        ("categoria" = Option<CategoriaInteracao>, Query, description = "Filtra pela categoria"),
        ("clienteId" = Option<Uuid>, Query, description = "Filtra pelo cliente")
    ),
    responses(
        (status = 200, description = "Lista de interações", body = Vec<Interacao>)
    )
)]
pub async fn listar_interacoes(
    State(app_state): State<AppState>,
    Query(query): Query<ListarInteracoesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let interacoes = app_state
        .interacao_service
        .listar(query.tipo, query.categoria, query.cliente_id)
        .await?;
    Ok(Json(interacoes))
}

// GET /api/interacoes/{id}
#[utoipa::path(
    get,
    path = "/api/interacoes/{id}",
    tag = "Interações",
    params(
        ("id" = Uuid, Path, description = "ID da interação")
    ),
    responses(
        (status = 200, description = "Interação encontrada", body = Interacao),
        (status = 404, description = "Interação não encontrada")
    )
)]
pub async fn buscar_interacao(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let interacao = app_state.interacao_service.buscar(id).await?;
    Ok(Json(interacao))
}

// PATCH /api/interacoes/{id}
#[utoipa::path(
    patch,
    path = "/api/interacoes/{id}",
    tag = "Interações",
    request_body = UpdateInteracaoPayload,
    params(
        ("id" = Uuid, Path, description = "ID da interação")
    ),
    responses(
        (status = 200, description = "Interação atualizada", body = Interacao),
        (status = 404, description = "Interação não encontrada")
    )
)]
pub async fn atualizar_interacao(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateInteracaoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let interacao = app_state.interacao_service.atualizar(id, &payload).await?;
    Ok(Json(interacao))
}

// DELETE /api/interacoes/{id}
#[utoipa::path(
    delete,
    path = "/api/interacoes/{id}",
    tag = "Interações",
    params(
        ("id" = Uuid, Path, description = "ID da interação")
    ),
    responses(
        (status = 204, description = "Interação removida"),
        (status = 404, description = "Interação não encontrada")
    )
)]
pub async fn deletar_interacao(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.interacao_service.deletar(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
