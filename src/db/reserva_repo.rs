// src/db/reserva_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::reserva::{
    BookingSource, CreateReservaPayload, PaymentStatus, Reserva, ReservaClienteInfo,
    ReservaFiltros, ReservaImovelInfo, ReservaResumo, ReservaStatus, UpdateReservaPayload,
};
use crate::models::tarefa::{CreateTarefaPayload, Tarefa, TarefaResumo, TarefaStatus};
use crate::services::sync::{CamposLocaisReserva, ReservaSync, ReservaSyncStore};

// Projeção das listagens: a reserva com o resumo do imóvel e do cliente,
// sempre via os mesmos joins.
const RESUMO_SELECT: &str = r#"
SELECT
    r.id, r.stays_reserva_id, r.status, r.payment_status, r.origem, r.canal,
    r.check_in, r.check_out, r.total_hospedes, r.valor_total, r.sinal,
    r.observacoes, r.notas_internas, r.pipeline_posicao, r.created_at, r.updated_at,
    i.id AS imovel_id, i.nome AS imovel_nome, i.tipo AS imovel_tipo,
    i.endereco AS imovel_endereco,
    i.responsavel_local AS imovel_responsavel_local,
    i.responsavel_contato AS imovel_responsavel_contato,
    c.id AS cliente_id, c.nome AS cliente_nome, c.email AS cliente_email,
    c.telefone AS cliente_telefone, c.origem AS cliente_origem, c.tags AS cliente_tags
FROM reservas r
JOIN imoveis i ON i.id = r.imovel_id
JOIN clientes c ON c.id = r.cliente_id
"#;

#[derive(FromRow)]
struct ReservaResumoRow {
    id: Uuid,
    stays_reserva_id: Option<String>,
    status: ReservaStatus,
    payment_status: PaymentStatus,
    origem: BookingSource,
    canal: Option<String>,
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
    total_hospedes: i32,
    valor_total: Option<Decimal>,
    sinal: Option<Decimal>,
    observacoes: Option<String>,
    notas_internas: Option<String>,
    pipeline_posicao: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    imovel_id: Uuid,
    imovel_nome: String,
    imovel_tipo: String,
    imovel_endereco: String,
    imovel_responsavel_local: Option<String>,
    imovel_responsavel_contato: Option<String>,
    cliente_id: Uuid,
    cliente_nome: String,
    cliente_email: String,
    cliente_telefone: Option<String>,
    cliente_origem: Option<String>,
    cliente_tags: Vec<String>,
}

impl From<ReservaResumoRow> for ReservaResumo {
    fn from(row: ReservaResumoRow) -> Self {
        ReservaResumo {
            id: row.id,
            stays_reserva_id: row.stays_reserva_id,
            status: row.status,
            payment_status: row.payment_status,
            origem: row.origem,
            canal: row.canal,
            check_in: row.check_in,
            check_out: row.check_out,
            total_hospedes: row.total_hospedes,
            valor_total: row.valor_total,
            sinal: row.sinal,
            observacoes: row.observacoes,
            notas_internas: row.notas_internas,
            pipeline_posicao: row.pipeline_posicao,
            created_at: row.created_at,
            updated_at: row.updated_at,
            imovel: ReservaImovelInfo {
                id: row.imovel_id,
                nome: row.imovel_nome,
                tipo: row.imovel_tipo,
                endereco: row.imovel_endereco,
                responsavel_local: row.imovel_responsavel_local,
                responsavel_contato: row.imovel_responsavel_contato,
            },
            cliente: ReservaClienteInfo {
                id: row.cliente_id,
                nome: row.cliente_nome,
                email: row.cliente_email,
                telefone: row.cliente_telefone,
                origem: row.cliente_origem,
                tags: row.cliente_tags,
            },
        }
    }
}

// O repositório de reservas e de suas tarefas operacionais.
#[derive(Clone)]
pub struct ReservaRepository {
    pool: PgPool,
}

// Monta as cláusulas WHERE dos filtros da listagem. A mesma sequência de
// condições vale para o SELECT e para o COUNT, então os binds têm que seguir
// a mesma ordem nos dois.
fn condicoes_de_filtro(filtros: &ReservaFiltros, param_inicial: usize) -> (Vec<String>, usize) {
    let mut condicoes: Vec<String> = Vec::new();
    let mut param = param_inicial;

    if filtros.status.is_some() {
        param += 1;
        condicoes.push(format!("r.status = ${}", param));
    }
    if filtros.payment_status.is_some() {
        param += 1;
        condicoes.push(format!("r.payment_status = ${}", param));
    }
    if filtros.origem.is_some() {
        param += 1;
        condicoes.push(format!("r.origem = ${}", param));
    }
    if filtros.imovel_id.is_some() {
        param += 1;
        condicoes.push(format!("r.imovel_id = ${}", param));
    }
    if filtros.cliente_id.is_some() {
        param += 1;
        condicoes.push(format!("r.cliente_id = ${}", param));
    }
    if filtros.check_in_from.is_some() {
        param += 1;
        condicoes.push(format!("r.check_in >= ${}", param));
    }
    if filtros.check_in_to.is_some() {
        param += 1;
        condicoes.push(format!("r.check_in <= ${}", param));
    }

    (condicoes, param)
}

impl ReservaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn criar(&self, payload: &CreateReservaPayload) -> Result<Reserva, AppError> {
        sqlx::query_as::<_, Reserva>(
            r#"
            INSERT INTO reservas (
                stays_reserva_id, imovel_id, cliente_id, status, payment_status,
                origem, canal, check_in, check_out, total_hospedes,
                valor_total, sinal, observacoes, notas_internas, pipeline_posicao
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(&payload.stays_reserva_id)
        .bind(payload.imovel_id)
        .bind(payload.cliente_id)
        .bind(payload.status.unwrap_or(ReservaStatus::Lead))
        .bind(payload.payment_status.unwrap_or(PaymentStatus::Pendente))
        .bind(payload.origem.unwrap_or(BookingSource::Outro))
        .bind(&payload.canal)
        .bind(payload.check_in)
        .bind(payload.check_out)
        .bind(payload.total_hospedes)
        .bind(payload.valor_total)
        .bind(payload.sinal)
        .bind(&payload.observacoes)
        .bind(&payload.notas_internas)
        .bind(payload.pipeline_posicao.unwrap_or(0))
        .fetch_one(&self.pool)
        .await
        .map_err(trata_erros_de_escrita)
    }

    /// Listagem ordenada pela posição manual no pipeline e, dentro dela, pelo
    /// check-in mais próximo.
    pub async fn listar(
        &self,
        filtros: &ReservaFiltros,
        skip: i64,
        take: i64,
    ) -> Result<Vec<ReservaResumo>, AppError> {
        let mut query = String::from(RESUMO_SELECT);
        let (condicoes, param) = condicoes_de_filtro(filtros, 0);

        if !condicoes.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&condicoes.join(" AND "));
        }
        query.push_str(&format!(
            " ORDER BY r.pipeline_posicao ASC, r.check_in ASC LIMIT ${} OFFSET ${}",
            param + 1,
            param + 2
        ));

        let mut q = sqlx::query_as::<_, ReservaResumoRow>(&query);
        q = aplicar_binds(q, filtros);

        let linhas = q.bind(take).bind(skip).fetch_all(&self.pool).await?;
        Ok(linhas.into_iter().map(ReservaResumo::from).collect())
    }

    pub async fn contar(&self, filtros: &ReservaFiltros) -> Result<i64, AppError> {
        let mut query = String::from("SELECT COUNT(*) FROM reservas r");
        let (condicoes, _) = condicoes_de_filtro(filtros, 0);

        if !condicoes.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&condicoes.join(" AND "));
        }

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        q = aplicar_binds_scalar(q, filtros);

        Ok(q.fetch_one(&self.pool).await?)
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<Reserva>, AppError> {
        let reserva = sqlx::query_as::<_, Reserva>("SELECT * FROM reservas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(reserva)
    }

    pub async fn buscar_resumo_por_id(&self, id: Uuid) -> Result<Option<ReservaResumo>, AppError> {
        let query = format!("{} WHERE r.id = $1", RESUMO_SELECT);
        let linha = sqlx::query_as::<_, ReservaResumoRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(linha.map(ReservaResumo::from))
    }

    pub async fn buscar_por_stays_id(&self, stays_id: &str) -> Result<Option<Reserva>, AppError> {
        let reserva =
            sqlx::query_as::<_, Reserva>("SELECT * FROM reservas WHERE stays_reserva_id = $1")
                .bind(stays_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(reserva)
    }

    pub async fn atualizar(
        &self,
        id: Uuid,
        payload: &UpdateReservaPayload,
    ) -> Result<Option<Reserva>, AppError> {
        sqlx::query_as::<_, Reserva>(
            r#"
            UPDATE reservas SET
                stays_reserva_id = COALESCE($2, stays_reserva_id),
                imovel_id = COALESCE($3, imovel_id),
                cliente_id = COALESCE($4, cliente_id),
                status = COALESCE($5, status),
                payment_status = COALESCE($6, payment_status),
                origem = COALESCE($7, origem),
                canal = COALESCE($8, canal),
                check_in = COALESCE($9, check_in),
                check_out = COALESCE($10, check_out),
                total_hospedes = COALESCE($11, total_hospedes),
                valor_total = COALESCE($12, valor_total),
                sinal = COALESCE($13, sinal),
                observacoes = COALESCE($14, observacoes),
                notas_internas = COALESCE($15, notas_internas),
                pipeline_posicao = COALESCE($16, pipeline_posicao),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.stays_reserva_id)
        .bind(payload.imovel_id)
        .bind(payload.cliente_id)
        .bind(payload.status)
        .bind(payload.payment_status)
        .bind(payload.origem)
        .bind(&payload.canal)
        .bind(payload.check_in)
        .bind(payload.check_out)
        .bind(payload.total_hospedes)
        .bind(payload.valor_total)
        .bind(payload.sinal)
        .bind(&payload.observacoes)
        .bind(&payload.notas_internas)
        .bind(payload.pipeline_posicao)
        .fetch_optional(&self.pool)
        .await
        .map_err(trata_erros_de_escrita)
    }

    pub async fn deletar(&self, id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM reservas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }

    // --- TAREFAS ---

    pub async fn criar_tarefa(
        &self,
        reserva_id: Uuid,
        payload: &CreateTarefaPayload,
    ) -> Result<Tarefa, AppError> {
        sqlx::query_as::<_, Tarefa>(
            r#"
            INSERT INTO tarefas (reserva_id, tipo, status, data_prevista, responsavel)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(reserva_id)
        .bind(&payload.tipo)
        .bind(TarefaStatus::Pendente)
        .bind(payload.data_prevista)
        .bind(&payload.responsavel)
        .fetch_one(&self.pool)
        .await
        .map_err(trata_erros_de_escrita)
    }

    pub async fn listar_tarefas(&self, reserva_id: Uuid) -> Result<Vec<Tarefa>, AppError> {
        let tarefas = sqlx::query_as::<_, Tarefa>(
            "SELECT * FROM tarefas WHERE reserva_id = $1 ORDER BY data_prevista ASC",
        )
        .bind(reserva_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tarefas)
    }

    pub async fn listar_tarefas_resumo(
        &self,
        reserva_id: Uuid,
    ) -> Result<Vec<TarefaResumo>, AppError> {
        let tarefas = sqlx::query_as::<_, TarefaResumo>(
            r#"
            SELECT id, tipo, status, data_prevista, data_conclusao, responsavel
            FROM tarefas
            WHERE reserva_id = $1
            ORDER BY data_prevista ASC
            "#,
        )
        .bind(reserva_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tarefas)
    }

    pub async fn concluir_tarefa(&self, tarefa_id: Uuid) -> Result<Option<Tarefa>, AppError> {
        let tarefa = sqlx::query_as::<_, Tarefa>(
            r#"
            UPDATE tarefas
            SET status = $2, data_conclusao = NOW(), updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(tarefa_id)
        .bind(TarefaStatus::Concluida)
        .fetch_optional(&self.pool)
        .await?;
        Ok(tarefa)
    }
}

type QueryAs<'q, T> =
    sqlx::query::QueryAs<'q, sqlx::Postgres, T, sqlx::postgres::PgArguments>;
type QueryScalar<'q, T> =
    sqlx::query::QueryScalar<'q, sqlx::Postgres, T, sqlx::postgres::PgArguments>;

fn aplicar_binds<'q, T>(mut q: QueryAs<'q, T>, filtros: &'q ReservaFiltros) -> QueryAs<'q, T> {
    if let Some(status) = filtros.status {
        q = q.bind(status);
    }
    if let Some(payment_status) = filtros.payment_status {
        q = q.bind(payment_status);
    }
    if let Some(origem) = filtros.origem {
        q = q.bind(origem);
    }
    if let Some(imovel_id) = filtros.imovel_id {
        q = q.bind(imovel_id);
    }
    if let Some(cliente_id) = filtros.cliente_id {
        q = q.bind(cliente_id);
    }
    if let Some(check_in_from) = filtros.check_in_from {
        q = q.bind(check_in_from);
    }
    if let Some(check_in_to) = filtros.check_in_to {
        q = q.bind(check_in_to);
    }
    q
}

fn aplicar_binds_scalar<'q, T>(
    mut q: QueryScalar<'q, T>,
    filtros: &'q ReservaFiltros,
) -> QueryScalar<'q, T> {
    if let Some(status) = filtros.status {
        q = q.bind(status);
    }
    if let Some(payment_status) = filtros.payment_status {
        q = q.bind(payment_status);
    }
    if let Some(origem) = filtros.origem {
        q = q.bind(origem);
    }
    if let Some(imovel_id) = filtros.imovel_id {
        q = q.bind(imovel_id);
    }
    if let Some(cliente_id) = filtros.cliente_id {
        q = q.bind(cliente_id);
    }
    if let Some(check_in_from) = filtros.check_in_from {
        q = q.bind(check_in_from);
    }
    if let Some(check_in_to) = filtros.check_in_to {
        q = q.bind(check_in_to);
    }
    q
}

#[async_trait]
impl ReservaSyncStore for ReservaRepository {
    async fn buscar_por_stays_id(&self, stays_id: &str) -> Result<Option<Reserva>, AppError> {
        ReservaRepository::buscar_por_stays_id(self, stays_id).await
    }

    async fn criar(
        &self,
        dados: &ReservaSync,
        locais: &CamposLocaisReserva,
    ) -> Result<Reserva, AppError> {
        sqlx::query_as::<_, Reserva>(
            r#"
            INSERT INTO reservas (
                stays_reserva_id, imovel_id, cliente_id, status, payment_status,
                origem, canal, check_in, check_out, total_hospedes,
                valor_total, sinal, observacoes, notas_internas, pipeline_posicao
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(&dados.stays_reserva_id)
        .bind(dados.imovel_id)
        .bind(dados.cliente_id)
        .bind(dados.status)
        .bind(dados.payment_status)
        .bind(dados.origem)
        .bind(&dados.canal)
        .bind(dados.check_in)
        .bind(dados.check_out)
        .bind(dados.total_hospedes)
        .bind(dados.valor_total)
        .bind(dados.sinal)
        .bind(&locais.observacoes)
        .bind(&locais.notas_internas)
        .bind(locais.pipeline_posicao)
        .fetch_one(&self.pool)
        .await
        .map_err(trata_erros_de_escrita)
    }

    async fn atualizar(
        &self,
        id: Uuid,
        dados: &ReservaSync,
        locais: &CamposLocaisReserva,
    ) -> Result<Reserva, AppError> {
        sqlx::query_as::<_, Reserva>(
            r#"
            UPDATE reservas SET
                stays_reserva_id = $2, imovel_id = $3, cliente_id = $4, status = $5,
                payment_status = $6, origem = $7, canal = $8, check_in = $9,
                check_out = $10, total_hospedes = $11, valor_total = $12, sinal = $13,
                observacoes = $14, notas_internas = $15, pipeline_posicao = $16,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&dados.stays_reserva_id)
        .bind(dados.imovel_id)
        .bind(dados.cliente_id)
        .bind(dados.status)
        .bind(dados.payment_status)
        .bind(dados.origem)
        .bind(&dados.canal)
        .bind(dados.check_in)
        .bind(dados.check_out)
        .bind(dados.total_hospedes)
        .bind(dados.valor_total)
        .bind(dados.sinal)
        .bind(&locais.observacoes)
        .bind(&locais.notas_internas)
        .bind(locais.pipeline_posicao)
        .fetch_one(&self.pool)
        .await
        .map_err(trata_erros_de_escrita)
    }
}

// Duplicidade de stays_reserva_id vira 409; referência a imóvel ou cliente
// inexistente vira 400 em vez de um 500 opaco.
fn trata_erros_de_escrita(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::UniqueViolation(
                "Já existe uma reserva com este identificador".to_string(),
            );
        }
        if db_err.is_foreign_key_violation() {
            return AppError::BadRequest(
                "O imóvel ou o cliente informado não existe".to_string(),
            );
        }
    }
    e.into()
}
