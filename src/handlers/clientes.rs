// src/handlers/clientes.rs

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
    models::cliente::{Cliente, ClienteDetalhe, CreateClientePayload, UpdateClientePayload},
    models::sync::{SyncClientesPayload, SyncResumo},
    stays::types::StaysClientesFiltros,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListarClientesQuery {
    pub tag: Option<String>,
    pub origem: Option<String>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
}

// Filtros repassados ao endpoint de clientes da Stays.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListarClientesStaysQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub has_reservations: Option<bool>,
    pub reservation_filter: Option<String>,
    pub reservation_from: Option<String>,
    pub reservation_to: Option<String>,
}

// POST /api/clientes
#[utoipa::path(
    post,
    path = "/api/clientes",
    tag = "Clientes",
    request_body = CreateClientePayload,
    responses(
        (status = 201, description = "Cliente criado", body = Cliente),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Já existe um cliente com este identificador")
    )
)]
pub async fn criar_cliente(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateClientePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let cliente = app_state.cliente_service.criar(&payload).await?;
    Ok((StatusCode::CREATED, Json(cliente)))
}

// GET /api/clientes
#[utoipa::path(
    get,
    path = "/api/clientes",
    tag = "Clientes",
    params(
        ("tag" = Option<String>, Query, description = "Filtra por tag"),
        ("origem" = Option<String>, Query, description = "Filtra pela origem do cadastro"),
        ("skip" = Option<i64>, Query, description = "Deslocamento da paginação"),
        ("take" = Option<i64>, Query, description = "Tamanho da página (1 a 100, padrão 50)")
    ),
    responses(
        (status = 200, description = "Lista de clientes", body = Vec<Cliente>)
    )
)]
pub async fn listar_clientes(
    State(app_state): State<AppState>,
    Query(query): Query<ListarClientesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let clientes = app_state
        .cliente_service
        .listar(
            query.tag.as_deref(),
            query.origem.as_deref(),
            query.skip,
            query.take,
        )
        .await?;
    Ok(Json(clientes))
}

// GET /api/clientes/stays
#[utoipa::path(
    get,
    path = "/api/clientes/stays",
    tag = "Clientes",
    params(
        ("page" = Option<u32>, Query, description = "Página (padrão 1)"),
        ("limit" = Option<u32>, Query, description = "Tamanho da página (1 a 100, padrão 20)"),
        ("hasReservations" = Option<bool>, Query, description = "Apenas clientes com reservas"),
        ("reservationFilter" = Option<String>, Query, description = "Filtro de reservas da Stays"),
        ("reservationFrom" = Option<String>, Query, description = "Início da janela de reservas (yyyy-mm-dd)"),
        ("reservationTo" = Option<String>, Query, description = "Fim da janela de reservas (yyyy-mm-dd)")
    ),
    responses(
        (status = 200, description = "Página de clientes vinda direto da Stays"),
        (status = 502, description = "Resposta inválida da Stays")
    )
)]
pub async fn listar_clientes_stays(
    State(app_state): State<AppState>,
    Query(query): Query<ListarClientesStaysQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filtros = StaysClientesFiltros {
        has_reservations: query.has_reservations,
        reservation_filter: query.reservation_filter,
        reservation_from: query.reservation_from,
        reservation_to: query.reservation_to,
    };

    let pagina = app_state
        .cliente_service
        .listar_da_stays(query.page, query.limit, &filtros)
        .await?;
    Ok(Json(pagina))
}

// GET /api/clientes/stays/{id}
#[utoipa::path(
    get,
    path = "/api/clientes/stays/{id}",
    tag = "Clientes",
    params(
        ("id" = String, Path, description = "Identificador do cliente na Stays")
    ),
    responses(
        (status = 200, description = "Detalhe do cliente na Stays"),
        (status = 404, description = "Cliente não encontrado na Stays")
    )
)]
pub async fn detalhe_cliente_stays(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let cliente = app_state.cliente_service.buscar_na_stays(&id).await?;
    Ok(Json(cliente))
}

// GET /api/clientes/{id}
#[utoipa::path(
    get,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    params(
        ("id" = Uuid, Path, description = "ID do cliente")
    ),
    responses(
        (status = 200, description = "Cliente com contratos e últimas interações", body = ClienteDetalhe),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn detalhe_cliente(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detalhe = app_state.cliente_service.detalhe(id).await?;
    Ok(Json(detalhe))
}

// PATCH /api/clientes/{id}
#[utoipa::path(
    patch,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    request_body = UpdateClientePayload,
    params(
        ("id" = Uuid, Path, description = "ID do cliente")
    ),
    responses(
        (status = 200, description = "Cliente atualizado", body = Cliente),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn atualizar_cliente(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClientePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let cliente = app_state.cliente_service.atualizar(id, &payload).await?;
    Ok(Json(cliente))
}

// DELETE /api/clientes/{id}
#[utoipa::path(
    delete,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    params(
        ("id" = Uuid, Path, description = "ID do cliente")
    ),
    responses(
        (status = 204, description = "Cliente removido"),
        (status = 400, description = "Cliente possui registros vinculados"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn deletar_cliente(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.cliente_service.deletar(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/clientes/sync
#[utoipa::path(
    post,
    path = "/api/clientes/sync",
    tag = "Clientes",
    request_body = SyncClientesPayload,
    responses(
        (status = 200, description = "Resumo da sincronização", body = SyncResumo),
        (status = 502, description = "Resposta inválida da Stays")
    )
)]
pub async fn sincronizar_clientes(
    State(app_state): State<AppState>,
    payload: Option<Json<SyncClientesPayload>>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let resumo = app_state.sync_clientes.executar(payload.limit).await?;
    Ok(Json(resumo))
}
