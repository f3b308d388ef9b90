// src/db/contrato_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::contrato::{
    Contrato, CreateContratoPayload, StatusContrato, TipoContrato, UpdateContratoPayload,
};

// O repositório de contratos, responsável por todas as interações com a
// tabela 'contratos'.
#[derive(Clone)]
pub struct ContratoRepository {
    pool: PgPool,
}

impl ContratoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Todo contrato nasce como rascunho; a versão só é configurável quando o
    // chamador está importando um contrato já existente.
    pub async fn criar(&self, payload: &CreateContratoPayload) -> Result<Contrato, AppError> {
        sqlx::query_as::<_, Contrato>(
            r#"
            INSERT INTO contratos (
                cliente_id, stays_reserva_id, tipo, status, versao,
                dados_contrato, pdf_url, gerado_por
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(payload.cliente_id)
        .bind(&payload.stays_reserva_id)
        .bind(payload.tipo)
        .bind(StatusContrato::Rascunho)
        .bind(payload.versao.unwrap_or(1))
        .bind(&payload.dados_contrato)
        .bind(&payload.pdf_url)
        .bind(&payload.gerado_por)
        .fetch_one(&self.pool)
        .await
        .map_err(trata_referencias)
    }

    pub async fn listar(
        &self,
        tipo: Option<TipoContrato>,
        status: Option<StatusContrato>,
    ) -> Result<Vec<Contrato>, AppError> {
        let mut query = String::from("SELECT * FROM contratos");
        let mut condicoes: Vec<String> = Vec::new();
        let mut param = 0;

        if tipo.is_some() {
            param += 1;
            condicoes.push(format!("tipo = ${}", param));
        }
        if status.is_some() {
            param += 1;
            condicoes.push(format!("status = ${}", param));
        }
        if !condicoes.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&condicoes.join(" AND "));
        }
        query.push_str(" ORDER BY gerado_em DESC");

        let mut q = sqlx::query_as::<_, Contrato>(&query);
        if let Some(tipo) = tipo {
            q = q.bind(tipo);
        }
        if let Some(status) = status {
            q = q.bind(status);
        }

        Ok(q.fetch_all(&self.pool).await?)
    }

    pub async fn listar_por_cliente(&self, cliente_id: Uuid) -> Result<Vec<Contrato>, AppError> {
        let contratos = sqlx::query_as::<_, Contrato>(
            "SELECT * FROM contratos WHERE cliente_id = $1 ORDER BY gerado_em DESC",
        )
        .bind(cliente_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(contratos)
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<Contrato>, AppError> {
        let contrato = sqlx::query_as::<_, Contrato>("SELECT * FROM contratos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(contrato)
    }

    // `versao_forcada` sobrepõe a versão do payload; é usada pelo serviço
    // quando uma regeneração (GERADO -> GERADO) incrementa a versão.
    pub async fn atualizar(
        &self,
        id: Uuid,
        payload: &UpdateContratoPayload,
        versao_forcada: Option<i32>,
    ) -> Result<Option<Contrato>, AppError> {
        sqlx::query_as::<_, Contrato>(
            r#"
            UPDATE contratos SET
                tipo = COALESCE($2, tipo),
                status = COALESCE($3, status),
                dados_contrato = COALESCE($4, dados_contrato),
                pdf_url = COALESCE($5, pdf_url),
                gerado_por = COALESCE($6, gerado_por),
                versao = COALESCE($7, versao),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.tipo)
        .bind(payload.status)
        .bind(&payload.dados_contrato)
        .bind(&payload.pdf_url)
        .bind(&payload.gerado_por)
        .bind(versao_forcada.or(payload.versao))
        .fetch_optional(&self.pool)
        .await
        .map_err(trata_referencias)
    }

    pub async fn deletar(&self, id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM contratos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }
}

fn trata_referencias(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return AppError::BadRequest("O cliente informado não existe".to_string());
        }
    }
    e.into()
}
