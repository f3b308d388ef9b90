// src/handlers/imoveis.rs

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
    models::imovel::{CreateImovelPayload, Imovel, UpdateImovelPayload},
    models::sync::{SyncImoveisPayload, SyncResumo},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListarImoveisQuery {
    pub tipo: Option<String>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
}

// POST /api/imoveis
#[utoipa::path(
    post,
    path = "/api/imoveis",
    tag = "Imóveis",
    request_body = CreateImovelPayload,
    responses(
        (status = 201, description = "Imóvel criado", body = Imovel),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Já existe um imóvel com este identificador")
    )
)]
pub async fn criar_imovel(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateImovelPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let imovel = app_state.imovel_service.criar(&payload).await?;
    Ok((StatusCode::CREATED, Json(imovel)))
}

// GET /api/imoveis
#[utoipa::path(
    get,
    path = "/api/imoveis",
    tag = "Imóveis",
    params(
        ("tipo" = Option<String>, Query, description = "Filtra pelo tipo do imóvel"),
        ("skip" = Option<i64>, Query, description = "Deslocamento da paginação"),
        ("take" = Option<i64>, Query, description = "Tamanho da página (1 a 100, padrão 50)")
    ),
    responses(
        (status = 200, description = "Lista de imóveis", body = Vec<Imovel>)
    )
)]
pub async fn listar_imoveis(
    State(app_state): State<AppState>,
    Query(query): Query<ListarImoveisQuery>,
) -> Result<impl IntoResponse, AppError> {
    let imoveis = app_state
        .imovel_service
        .listar(query.tipo.as_deref(), query.skip, query.take)
        .await?;
    Ok(Json(imoveis))
}

// GET /api/imoveis/{id}
#[utoipa::path(
    get,
    path = "/api/imoveis/{id}",
    tag = "Imóveis",
    params(
        ("id" = Uuid, Path, description = "ID do imóvel")
    ),
    responses(
        (status = 200, description = "Imóvel encontrado", body = Imovel),
        (status = 404, description = "Imóvel não encontrado")
    )
)]
pub async fn buscar_imovel(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let imovel = app_state.imovel_service.buscar(id).await?;
    Ok(Json(imovel))
}

// PATCH /api/imoveis/{id}
#[utoipa::path(
    patch,
    path = "/api/imoveis/{id}",
    tag = "Imóveis",
    request_body = UpdateImovelPayload,
    params(
        ("id" = Uuid, Path, description = "ID do imóvel")
    ),
    responses(
        (status = 200, description = "Imóvel atualizado", body = Imovel),
        (status = 404, description = "Imóvel não encontrado")
    )
)]
pub async fn atualizar_imovel(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateImovelPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let imovel = app_state.imovel_service.atualizar(id, &payload).await?;
    Ok(Json(imovel))
}

// DELETE /api/imoveis/{id}
#[utoipa::path(
    delete,
    path = "/api/imoveis/{id}",
    tag = "Imóveis",
    params(
        ("id" = Uuid, Path, description = "ID do imóvel")
    ),
    responses(
        (status = 204, description = "Imóvel removido"),
        (status = 400, description = "Imóvel possui reservas vinculadas"),
        (status = 404, description = "Imóvel não encontrado")
    )
)]
pub async fn deletar_imovel(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.imovel_service.deletar(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/imoveis/sync
#[utoipa::path(
    post,
    path = "/api/imoveis/sync",
    tag = "Imóveis",
    request_body = SyncImoveisPayload,
    responses(
        (status = 200, description = "Resumo da sincronização", body = SyncResumo),
        (status = 502, description = "Resposta inválida da Stays")
    )
)]
pub async fn sincronizar_imoveis(
    State(app_state): State<AppState>,
    payload: Option<Json<SyncImoveisPayload>>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let resumo = app_state.sync_imoveis.executar(payload.limit).await?;
    Ok(Json(resumo))
}
