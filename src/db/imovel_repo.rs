// src/db/imovel_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::imovel::{CreateImovelPayload, Imovel, ImovelStatus, UpdateImovelPayload};
use crate::services::sync::{CamposLocaisImovel, ImovelSync, ImovelSyncStore};

// O repositório de imóveis, responsável por todas as interações com a
// tabela 'imoveis'.
#[derive(Clone)]
pub struct ImovelRepository {
    pool: PgPool,
}

impl ImovelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn criar(&self, payload: &CreateImovelPayload) -> Result<Imovel, AppError> {
        sqlx::query_as::<_, Imovel>(
            r#"
            INSERT INTO imoveis (
                stays_imovel_id, nome, endereco, tipo, capacidade,
                rua, numero, complemento, bairro, cidade, estado, cep, apartamento,
                matricula, cartorio, inscricao_municipal, valor_minimo_diaria,
                status, responsavel_local, responsavel_contato,
                comodidades, fotos, instrucoes,
                historico_manutencao, custos_operacionais,
                documentacao, observacoes, ultima_vistoria, proxima_manutencao
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                $16, $17, $18, $19, $20, $21, $22, $23,
                COALESCE($24, '[]'::jsonb), COALESCE($25, '[]'::jsonb),
                $26, $27, $28, $29
            )
            RETURNING *
            "#,
        )
        .bind(&payload.stays_imovel_id)
        .bind(&payload.nome)
        .bind(&payload.endereco)
        .bind(&payload.tipo)
        .bind(payload.capacidade)
        .bind(&payload.rua)
        .bind(&payload.numero)
        .bind(&payload.complemento)
        .bind(&payload.bairro)
        .bind(&payload.cidade)
        .bind(&payload.estado)
        .bind(&payload.cep)
        .bind(&payload.apartamento)
        .bind(&payload.matricula)
        .bind(&payload.cartorio)
        .bind(&payload.inscricao_municipal)
        .bind(payload.valor_minimo_diaria)
        .bind(payload.status.unwrap_or(ImovelStatus::Disponivel))
        .bind(&payload.responsavel_local)
        .bind(&payload.responsavel_contato)
        .bind(payload.comodidades.clone().unwrap_or_default())
        .bind(payload.fotos.clone().unwrap_or_default())
        .bind(&payload.instrucoes)
        .bind(&payload.historico_manutencao)
        .bind(&payload.custos_operacionais)
        .bind(payload.documentacao.clone().unwrap_or_default())
        .bind(&payload.observacoes)
        .bind(payload.ultima_vistoria)
        .bind(payload.proxima_manutencao)
        .fetch_one(&self.pool)
        .await
        .map_err(trata_duplicado)
    }

    pub async fn listar(
        &self,
        tipo: Option<&str>,
        skip: i64,
        take: i64,
    ) -> Result<Vec<Imovel>, AppError> {
        let mut query = String::from("SELECT * FROM imoveis");
        let mut param = 0;

        if tipo.is_some() {
            param += 1;
            query.push_str(&format!(" WHERE tipo = ${}", param));
        }
        query.push_str(&format!(
            " ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
            param + 1,
            param + 2
        ));

        let mut q = sqlx::query_as::<_, Imovel>(&query);
        if let Some(tipo) = tipo {
            q = q.bind(tipo);
        }

        Ok(q.bind(take).bind(skip).fetch_all(&self.pool).await?)
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<Imovel>, AppError> {
        let imovel = sqlx::query_as::<_, Imovel>("SELECT * FROM imoveis WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(imovel)
    }

    pub async fn buscar_por_stays_id(&self, stays_id: &str) -> Result<Option<Imovel>, AppError> {
        let imovel =
            sqlx::query_as::<_, Imovel>("SELECT * FROM imoveis WHERE stays_imovel_id = $1")
                .bind(stays_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(imovel)
    }

    pub async fn atualizar(
        &self,
        id: Uuid,
        payload: &UpdateImovelPayload,
    ) -> Result<Option<Imovel>, AppError> {
        sqlx::query_as::<_, Imovel>(
            r#"
            UPDATE imoveis SET
                nome = COALESCE($2, nome),
                endereco = COALESCE($3, endereco),
                tipo = COALESCE($4, tipo),
                capacidade = COALESCE($5, capacidade),
                rua = COALESCE($6, rua),
                numero = COALESCE($7, numero),
                complemento = COALESCE($8, complemento),
                bairro = COALESCE($9, bairro),
                cidade = COALESCE($10, cidade),
                estado = COALESCE($11, estado),
                cep = COALESCE($12, cep),
                apartamento = COALESCE($13, apartamento),
                matricula = COALESCE($14, matricula),
                cartorio = COALESCE($15, cartorio),
                inscricao_municipal = COALESCE($16, inscricao_municipal),
                valor_minimo_diaria = COALESCE($17, valor_minimo_diaria),
                status = COALESCE($18, status),
                responsavel_local = COALESCE($19, responsavel_local),
                responsavel_contato = COALESCE($20, responsavel_contato),
                comodidades = COALESCE($21, comodidades),
                fotos = COALESCE($22, fotos),
                instrucoes = COALESCE($23, instrucoes),
                historico_manutencao = COALESCE($24, historico_manutencao),
                custos_operacionais = COALESCE($25, custos_operacionais),
                documentacao = COALESCE($26, documentacao),
                observacoes = COALESCE($27, observacoes),
                ultima_vistoria = COALESCE($28, ultima_vistoria),
                proxima_manutencao = COALESCE($29, proxima_manutencao),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.nome)
        .bind(&payload.endereco)
        .bind(&payload.tipo)
        .bind(payload.capacidade)
        .bind(&payload.rua)
        .bind(&payload.numero)
        .bind(&payload.complemento)
        .bind(&payload.bairro)
        .bind(&payload.cidade)
        .bind(&payload.estado)
        .bind(&payload.cep)
        .bind(&payload.apartamento)
        .bind(&payload.matricula)
        .bind(&payload.cartorio)
        .bind(&payload.inscricao_municipal)
        .bind(payload.valor_minimo_diaria)
        .bind(payload.status)
        .bind(&payload.responsavel_local)
        .bind(&payload.responsavel_contato)
        .bind(&payload.comodidades)
        .bind(&payload.fotos)
        .bind(&payload.instrucoes)
        .bind(&payload.historico_manutencao)
        .bind(&payload.custos_operacionais)
        .bind(&payload.documentacao)
        .bind(&payload.observacoes)
        .bind(payload.ultima_vistoria)
        .bind(payload.proxima_manutencao)
        .fetch_optional(&self.pool)
        .await
        .map_err(trata_duplicado)
    }

    pub async fn deletar(&self, id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM imoveis WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return AppError::BadRequest(
                            "O imóvel possui reservas vinculadas e não pode ser removido"
                                .to_string(),
                        );
                    }
                }
                e.into()
            })?;
        Ok(resultado.rows_affected() > 0)
    }
}

// A sincronização só é dona de nome, endereço, tipo e capacidade; todo o
// resto pertence ao CRM e é repassado como estava.
#[async_trait]
impl ImovelSyncStore for ImovelRepository {
    async fn buscar_por_stays_id(&self, stays_id: &str) -> Result<Option<Imovel>, AppError> {
        ImovelRepository::buscar_por_stays_id(self, stays_id).await
    }

    async fn criar(
        &self,
        dados: &ImovelSync,
        locais: &CamposLocaisImovel,
    ) -> Result<Imovel, AppError> {
        sqlx::query_as::<_, Imovel>(
            r#"
            INSERT INTO imoveis (
                stays_imovel_id, nome, endereco, tipo, capacidade,
                rua, numero, complemento, bairro, cidade, estado, cep, apartamento,
                matricula, cartorio, inscricao_municipal, valor_minimo_diaria,
                status, responsavel_local, responsavel_contato,
                comodidades, fotos, instrucoes,
                historico_manutencao, custos_operacionais,
                documentacao, observacoes, ultima_vistoria, proxima_manutencao
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29
            )
            RETURNING *
            "#,
        )
        .bind(&dados.stays_imovel_id)
        .bind(&dados.nome)
        .bind(&dados.endereco)
        .bind(&dados.tipo)
        .bind(dados.capacidade)
        .bind(&locais.rua)
        .bind(&locais.numero)
        .bind(&locais.complemento)
        .bind(&locais.bairro)
        .bind(&locais.cidade)
        .bind(&locais.estado)
        .bind(&locais.cep)
        .bind(&locais.apartamento)
        .bind(&locais.matricula)
        .bind(&locais.cartorio)
        .bind(&locais.inscricao_municipal)
        .bind(locais.valor_minimo_diaria)
        .bind(locais.status)
        .bind(&locais.responsavel_local)
        .bind(&locais.responsavel_contato)
        .bind(&locais.comodidades)
        .bind(&locais.fotos)
        .bind(&locais.instrucoes)
        .bind(&locais.historico_manutencao)
        .bind(&locais.custos_operacionais)
        .bind(&locais.documentacao)
        .bind(&locais.observacoes)
        .bind(locais.ultima_vistoria)
        .bind(locais.proxima_manutencao)
        .fetch_one(&self.pool)
        .await
        .map_err(trata_duplicado)
    }

    async fn atualizar(
        &self,
        id: Uuid,
        dados: &ImovelSync,
        locais: &CamposLocaisImovel,
    ) -> Result<Imovel, AppError> {
        sqlx::query_as::<_, Imovel>(
            r#"
            UPDATE imoveis SET
                stays_imovel_id = $2, nome = $3, endereco = $4, tipo = $5, capacidade = $6,
                rua = $7, numero = $8, complemento = $9, bairro = $10, cidade = $11,
                estado = $12, cep = $13, apartamento = $14, matricula = $15,
                cartorio = $16, inscricao_municipal = $17, valor_minimo_diaria = $18,
                status = $19, responsavel_local = $20, responsavel_contato = $21,
                comodidades = $22, fotos = $23, instrucoes = $24,
                historico_manutencao = $25, custos_operacionais = $26,
                documentacao = $27, observacoes = $28, ultima_vistoria = $29,
                proxima_manutencao = $30, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&dados.stays_imovel_id)
        .bind(&dados.nome)
        .bind(&dados.endereco)
        .bind(&dados.tipo)
        .bind(dados.capacidade)
        .bind(&locais.rua)
        .bind(&locais.numero)
        .bind(&locais.complemento)
        .bind(&locais.bairro)
        .bind(&locais.cidade)
        .bind(&locais.estado)
        .bind(&locais.cep)
        .bind(&locais.apartamento)
        .bind(&locais.matricula)
        .bind(&locais.cartorio)
        .bind(&locais.inscricao_municipal)
        .bind(locais.valor_minimo_diaria)
        .bind(locais.status)
        .bind(&locais.responsavel_local)
        .bind(&locais.responsavel_contato)
        .bind(&locais.comodidades)
        .bind(&locais.fotos)
        .bind(&locais.instrucoes)
        .bind(&locais.historico_manutencao)
        .bind(&locais.custos_operacionais)
        .bind(&locais.documentacao)
        .bind(&locais.observacoes)
        .bind(locais.ultima_vistoria)
        .bind(locais.proxima_manutencao)
        .fetch_one(&self.pool)
        .await
        .map_err(trata_duplicado)
    }
}

fn trata_duplicado(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::UniqueViolation(
                "Já existe um imóvel com este identificador".to_string(),
            );
        }
    }
    e.into()
}
