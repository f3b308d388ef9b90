// src/db/cliente_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::cliente::{Cliente, CreateClientePayload, UpdateClientePayload};
use crate::services::sync::{CamposLocaisCliente, ClienteSync, ClienteSyncStore};

// O repositório de clientes, responsável por todas as interações com a
// tabela 'clientes'.
#[derive(Clone)]
pub struct ClienteRepository {
    pool: PgPool,
}

impl ClienteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn criar(&self, payload: &CreateClientePayload) -> Result<Cliente, AppError> {
        sqlx::query_as::<_, Cliente>(
            r#"
            INSERT INTO clientes (
                stays_cliente_id, nome, cpf, email, telefone,
                emails, telefones, tags, score, preferencias, observacoes, origem
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(&payload.stays_cliente_id)
        .bind(&payload.nome)
        .bind(&payload.cpf)
        .bind(&payload.email)
        .bind(&payload.telefone)
        .bind(vec![payload.email.clone()])
        .bind(vec![payload.telefone.clone()])
        .bind(payload.tags.clone().unwrap_or_default())
        .bind(payload.score.unwrap_or(0))
        .bind(&payload.preferencias)
        .bind(&payload.observacoes)
        .bind(&payload.origem)
        .fetch_one(&self.pool)
        .await
        .map_err(trata_duplicado)
    }

    /// Listagem paginada com filtros opcionais por tag e origem.
    pub async fn listar(
        &self,
        tag: Option<&str>,
        origem: Option<&str>,
        skip: i64,
        take: i64,
    ) -> Result<Vec<Cliente>, AppError> {
        let mut query = String::from("SELECT * FROM clientes");
        let mut condicoes: Vec<String> = Vec::new();
        let mut param = 0;

        if tag.is_some() {
            param += 1;
            condicoes.push(format!("${} = ANY(tags)", param));
        }
        if origem.is_some() {
            param += 1;
            condicoes.push(format!("origem = ${}", param));
        }
        if !condicoes.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&condicoes.join(" AND "));
        }
        query.push_str(&format!(
            " ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
            param + 1,
            param + 2
        ));

        let mut q = sqlx::query_as::<_, Cliente>(&query);
        if let Some(tag) = tag {
            q = q.bind(tag);
        }
        if let Some(origem) = origem {
            q = q.bind(origem);
        }

        Ok(q.bind(take).bind(skip).fetch_all(&self.pool).await?)
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<Cliente>, AppError> {
        let cliente = sqlx::query_as::<_, Cliente>("SELECT * FROM clientes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(cliente)
    }

    pub async fn buscar_por_stays_id(&self, stays_id: &str) -> Result<Option<Cliente>, AppError> {
        let cliente =
            sqlx::query_as::<_, Cliente>("SELECT * FROM clientes WHERE stays_cliente_id = $1")
                .bind(stays_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(cliente)
    }

    // Atualização parcial: campo ausente no payload mantém o valor atual.
    pub async fn atualizar(
        &self,
        id: Uuid,
        payload: &UpdateClientePayload,
    ) -> Result<Option<Cliente>, AppError> {
        sqlx::query_as::<_, Cliente>(
            r#"
            UPDATE clientes SET
                nome = COALESCE($2, nome),
                cpf = COALESCE($3, cpf),
                email = COALESCE($4, email),
                telefone = COALESCE($5, telefone),
                tags = COALESCE($6, tags),
                score = COALESCE($7, score),
                preferencias = COALESCE($8, preferencias),
                observacoes = COALESCE($9, observacoes),
                origem = COALESCE($10, origem),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.nome)
        .bind(&payload.cpf)
        .bind(&payload.email)
        .bind(&payload.telefone)
        .bind(&payload.tags)
        .bind(payload.score)
        .bind(&payload.preferencias)
        .bind(&payload.observacoes)
        .bind(&payload.origem)
        .fetch_optional(&self.pool)
        .await
        .map_err(trata_duplicado)
    }

    pub async fn deletar(&self, id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM clientes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return AppError::BadRequest(
                            "O cliente possui registros vinculados e não pode ser removido"
                                .to_string(),
                        );
                    }
                }
                e.into()
            })?;
        Ok(resultado.rows_affected() > 0)
    }
}

// A sincronização reescreve os campos vindos da Stays e repassa os campos do
// CRM exatamente como estavam (ou com os padrões, na criação).
#[async_trait]
impl ClienteSyncStore for ClienteRepository {
    async fn buscar_por_stays_id(&self, stays_id: &str) -> Result<Option<Cliente>, AppError> {
        ClienteRepository::buscar_por_stays_id(self, stays_id).await
    }

    async fn criar(
        &self,
        dados: &ClienteSync,
        locais: &CamposLocaisCliente,
    ) -> Result<Cliente, AppError> {
        sqlx::query_as::<_, Cliente>(
            r#"
            INSERT INTO clientes (
                stays_cliente_id, nome, cpf, email, telefone, emails, telefones,
                documentos, origem, total_reservas, valor_total_gasto, ultima_reserva,
                tags, score, preferencias, observacoes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(&dados.stays_cliente_id)
        .bind(&dados.nome)
        .bind(&dados.cpf)
        .bind(&dados.email)
        .bind(&dados.telefone)
        .bind(&dados.emails)
        .bind(&dados.telefones)
        .bind(&dados.documentos)
        .bind(&dados.origem)
        .bind(dados.total_reservas)
        .bind(dados.valor_total_gasto)
        .bind(dados.ultima_reserva)
        .bind(&locais.tags)
        .bind(locais.score)
        .bind(&locais.preferencias)
        .bind(&locais.observacoes)
        .fetch_one(&self.pool)
        .await
        .map_err(trata_duplicado)
    }

    async fn atualizar(
        &self,
        id: Uuid,
        dados: &ClienteSync,
        locais: &CamposLocaisCliente,
    ) -> Result<Cliente, AppError> {
        sqlx::query_as::<_, Cliente>(
            r#"
            UPDATE clientes SET
                stays_cliente_id = $2, nome = $3, cpf = $4, email = $5, telefone = $6,
                emails = $7, telefones = $8, documentos = $9, origem = $10,
                total_reservas = $11, valor_total_gasto = $12, ultima_reserva = $13,
                tags = $14, score = $15, preferencias = $16, observacoes = $17,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&dados.stays_cliente_id)
        .bind(&dados.nome)
        .bind(&dados.cpf)
        .bind(&dados.email)
        .bind(&dados.telefone)
        .bind(&dados.emails)
        .bind(&dados.telefones)
        .bind(&dados.documentos)
        .bind(&dados.origem)
        .bind(dados.total_reservas)
        .bind(dados.valor_total_gasto)
        .bind(dados.ultima_reserva)
        .bind(&locais.tags)
        .bind(locais.score)
        .bind(&locais.preferencias)
        .bind(&locais.observacoes)
        .fetch_one(&self.pool)
        .await
        .map_err(trata_duplicado)
    }
}

fn trata_duplicado(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::UniqueViolation(
                "Já existe um cliente com este identificador".to_string(),
            );
        }
    }
    e.into()
}
