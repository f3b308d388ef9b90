// src/db/interacao_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::interacao::{
    CategoriaInteracao, CreateInteracaoPayload, Interacao, TipoInteracao, UpdateInteracaoPayload,
};

// O repositório da linha do tempo de interações dos clientes.
#[derive(Clone)]
pub struct InteracaoRepository {
    pool: PgPool,
}

impl InteracaoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn criar(&self, payload: &CreateInteracaoPayload) -> Result<Interacao, AppError> {
        sqlx::query_as::<_, Interacao>(
            r#"
            INSERT INTO interacoes (
                cliente_id, contrato_id, tipo, categoria, descricao,
                registrado_por, anexos
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(payload.cliente_id)
        .bind(payload.contrato_id)
        .bind(payload.tipo)
        .bind(payload.categoria)
        .bind(&payload.descricao)
        .bind(&payload.registrado_por)
        .bind(payload.anexos.clone().unwrap_or_default())
        .fetch_one(&self.pool)
        .await
        .map_err(trata_referencias)
    }

    pub async fn listar(
        &self,
        tipo: Option<TipoInteracao>,
        categoria: Option<CategoriaInteracao>,
        cliente_id: Option<Uuid>,
    ) -> Result<Vec<Interacao>, AppError> {
        let mut query = String::from("SELECT * FROM interacoes");
        let mut condicoes: Vec<String> = Vec::new();
        let mut param = 0;

        if tipo.is_some() {
            param += 1;
            condicoes.push(format!("tipo = ${}", param));
        }
        if categoria.is_some() {
            param += 1;
            condicoes.push(format!("categoria = ${}", param));
        }
        if cliente_id.is_some() {
            param += 1;
            condicoes.push(format!("cliente_id = ${}", param));
        }
        if !condicoes.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&condicoes.join(" AND "));
        }
        query.push_str(" ORDER BY data_hora DESC");

        let mut q = sqlx::query_as::<_, Interacao>(&query);
        if let Some(tipo) = tipo {
            q = q.bind(tipo);
        }
        if let Some(categoria) = categoria {
            q = q.bind(categoria);
        }
        if let Some(cliente_id) = cliente_id {
            q = q.bind(cliente_id);
        }

        Ok(q.fetch_all(&self.pool).await?)
    }

    // As interações mais recentes de um cliente, para a visão de detalhe.
    pub async fn listar_por_cliente(
        &self,
        cliente_id: Uuid,
        limite: i64,
    ) -> Result<Vec<Interacao>, AppError> {
        let interacoes = sqlx::query_as::<_, Interacao>(
            "SELECT * FROM interacoes WHERE cliente_id = $1 ORDER BY data_hora DESC LIMIT $2",
        )
        .bind(cliente_id)
        .bind(limite)
        .fetch_all(&self.pool)
        .await?;
        Ok(interacoes)
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<Interacao>, AppError> {
        let interacao = sqlx::query_as::<_, Interacao>("SELECT * FROM interacoes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(interacao)
    }

    pub async fn atualizar(
        &self,
        id: Uuid,
        payload: &UpdateInteracaoPayload,
    ) -> Result<Option<Interacao>, AppError> {
        sqlx::query_as::<_, Interacao>(
            r#"
            UPDATE interacoes SET
                contrato_id = COALESCE($2, contrato_id),
                tipo = COALESCE($3, tipo),
                categoria = COALESCE($4, categoria),
                descricao = COALESCE($5, descricao),
                anexos = COALESCE($6, anexos),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.contrato_id)
        .bind(payload.tipo)
        .bind(payload.categoria)
        .bind(&payload.descricao)
        .bind(payload.anexos.clone())
        .fetch_optional(&self.pool)
        .await
        .map_err(trata_referencias)
    }

    pub async fn deletar(&self, id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM interacoes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }
}

fn trata_referencias(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return AppError::BadRequest(
                "O cliente ou o contrato informado não existe".to_string(),
            );
        }
    }
    e.into()
}
