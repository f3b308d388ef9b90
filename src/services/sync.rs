// src/services/sync.rs
//
// Sincronização com a Stays. Os motores (clientes, imóveis, reservas) falam
// com o mundo externo apenas por estes ports, o que permite testá-los com
// implementações em memória.

pub mod campos;
pub mod clientes;
pub mod identidade;
pub mod imoveis;
pub mod reservas;

pub use clientes::SyncClientes;
pub use imoveis::SyncImoveis;
pub use reservas::SyncReservas;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::cliente::Cliente;
use crate::models::imovel::{Imovel, ImovelStatus};
use crate::models::reserva::{BookingSource, PaymentStatus, Reserva, ReservaStatus};
use crate::stays::types::{
    StaysCliente, StaysClienteDetalhado, StaysImovel, StaysImovelBooking, StaysPagina,
    StaysProperty, StaysReserva, StaysReservasFiltros,
};

/// Trava de segurança contra paginação infinita caso a Stays repita páginas.
pub const MAX_PAGINAS: u32 = 1000;

/// Tamanho de página padrão e faixa aceita pelos motores de sincronização.
pub const LIMITE_PADRAO: u32 = 100;

pub(crate) fn limite_efetivo(limit: Option<u32>) -> u32 {
    limit.unwrap_or(LIMITE_PADRAO).clamp(1, 500)
}

/// Chamadas da API da Stays consumidas pelos motores de sincronização.
#[async_trait]
pub trait StaysGateway: Send + Sync {
    async fn listar_clientes(
        &self,
        skip: u32,
        limit: u32,
    ) -> Result<StaysPagina<StaysCliente>, AppError>;

    async fn buscar_cliente(&self, id: &str) -> Result<Option<StaysClienteDetalhado>, AppError>;

    async fn listar_imoveis(
        &self,
        skip: u32,
        limit: u32,
    ) -> Result<StaysPagina<StaysImovel>, AppError>;

    /// Detalhe do anúncio em `/content/listings/{id}`.
    async fn buscar_imovel(&self, id: &str) -> Result<Option<StaysImovel>, AppError>;

    /// Detalhe do anúncio em `/booking/listings/{id}`.
    async fn buscar_imovel_booking(&self, id: &str)
        -> Result<Option<StaysImovelBooking>, AppError>;

    /// Propriedade-mãe em `/content/properties/{id}`.
    async fn buscar_property(&self, id: &str) -> Result<Option<StaysProperty>, AppError>;

    async fn listar_reservas(
        &self,
        filtros: &StaysReservasFiltros,
    ) -> Result<Vec<StaysReserva>, AppError>;
}

// --- CAMPOS DE PROPRIEDADE DA SINCRONIZAÇÃO ---
//
// Cada entidade sincronizada divide seus campos em dois conjuntos disjuntos:
// os derivados da Stays (reescritos a cada execução) e os de propriedade do
// CRM (preservados). A escrita é sempre um read-merge-write explícito.

#[derive(Debug, Clone)]
pub struct ClienteSync {
    pub stays_cliente_id: String,
    pub nome: String,
    pub cpf: String,
    pub email: String,
    pub telefone: Option<String>,
    pub emails: Vec<String>,
    pub telefones: Vec<String>,
    pub documentos: Value,
    pub origem: Option<String>,
    pub total_reservas: i32,
    pub valor_total_gasto: Decimal,
    pub ultima_reserva: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct CamposLocaisCliente {
    pub tags: Vec<String>,
    pub score: i32,
    pub preferencias: Option<Value>,
    pub observacoes: Option<String>,
}

impl CamposLocaisCliente {
    pub fn de_cliente(cliente: &Cliente) -> Self {
        Self {
            tags: cliente.tags.clone(),
            score: cliente.score,
            preferencias: cliente.preferencias.clone(),
            observacoes: cliente.observacoes.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImovelSync {
    pub stays_imovel_id: String,
    pub nome: String,
    pub endereco: String,
    pub tipo: String,
    pub capacidade: i32,
}

#[derive(Debug, Clone)]
pub struct CamposLocaisImovel {
    pub rua: Option<String>,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub cep: Option<String>,
    pub apartamento: Option<String>,
    pub matricula: Option<String>,
    pub cartorio: Option<String>,
    pub inscricao_municipal: Option<String>,
    pub valor_minimo_diaria: Option<Decimal>,
    pub status: ImovelStatus,
    pub responsavel_local: Option<String>,
    pub responsavel_contato: Option<String>,
    pub comodidades: Vec<String>,
    pub fotos: Vec<String>,
    pub instrucoes: Option<Value>,
    pub historico_manutencao: Value,
    pub custos_operacionais: Value,
    pub documentacao: Vec<String>,
    pub observacoes: Option<String>,
    pub ultima_vistoria: Option<DateTime<Utc>>,
    pub proxima_manutencao: Option<DateTime<Utc>>,
}

impl Default for CamposLocaisImovel {
    fn default() -> Self {
        Self {
            rua: None,
            numero: None,
            complemento: None,
            bairro: None,
            cidade: None,
            estado: None,
            cep: None,
            apartamento: None,
            matricula: None,
            cartorio: None,
            inscricao_municipal: None,
            valor_minimo_diaria: None,
            status: ImovelStatus::Disponivel,
            responsavel_local: None,
            responsavel_contato: None,
            comodidades: Vec::new(),
            fotos: Vec::new(),
            instrucoes: None,
            historico_manutencao: Value::Array(Vec::new()),
            custos_operacionais: Value::Array(Vec::new()),
            documentacao: Vec::new(),
            observacoes: None,
            ultima_vistoria: None,
            proxima_manutencao: None,
        }
    }
}

impl CamposLocaisImovel {
    pub fn de_imovel(imovel: &Imovel) -> Self {
        Self {
            rua: imovel.rua.clone(),
            numero: imovel.numero.clone(),
            complemento: imovel.complemento.clone(),
            bairro: imovel.bairro.clone(),
            cidade: imovel.cidade.clone(),
            estado: imovel.estado.clone(),
            cep: imovel.cep.clone(),
            apartamento: imovel.apartamento.clone(),
            matricula: imovel.matricula.clone(),
            cartorio: imovel.cartorio.clone(),
            inscricao_municipal: imovel.inscricao_municipal.clone(),
            valor_minimo_diaria: imovel.valor_minimo_diaria,
            status: imovel.status,
            responsavel_local: imovel.responsavel_local.clone(),
            responsavel_contato: imovel.responsavel_contato.clone(),
            comodidades: imovel.comodidades.clone(),
            fotos: imovel.fotos.clone(),
            instrucoes: imovel.instrucoes.clone(),
            historico_manutencao: imovel.historico_manutencao.clone(),
            custos_operacionais: imovel.custos_operacionais.clone(),
            documentacao: imovel.documentacao.clone(),
            observacoes: imovel.observacoes.clone(),
            ultima_vistoria: imovel.ultima_vistoria,
            proxima_manutencao: imovel.proxima_manutencao,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReservaSync {
    pub stays_reserva_id: String,
    pub imovel_id: Uuid,
    pub cliente_id: Uuid,
    pub status: ReservaStatus,
    pub payment_status: PaymentStatus,
    pub origem: BookingSource,
    pub canal: Option<String>,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub total_hospedes: i32,
    pub valor_total: Option<Decimal>,
    pub sinal: Option<Decimal>,
}

#[derive(Debug, Clone, Default)]
pub struct CamposLocaisReserva {
    pub observacoes: Option<String>,
    pub notas_internas: Option<String>,
    pub pipeline_posicao: i32,
}

impl CamposLocaisReserva {
    pub fn de_reserva(reserva: &Reserva) -> Self {
        Self {
            observacoes: reserva.observacoes.clone(),
            notas_internas: reserva.notas_internas.clone(),
            pipeline_posicao: reserva.pipeline_posicao,
        }
    }
}

// --- STORES ---

#[async_trait]
pub trait ClienteSyncStore: Send + Sync {
    async fn buscar_por_stays_id(&self, stays_id: &str) -> Result<Option<Cliente>, AppError>;
    async fn criar(
        &self,
        dados: &ClienteSync,
        locais: &CamposLocaisCliente,
    ) -> Result<Cliente, AppError>;
    async fn atualizar(
        &self,
        id: Uuid,
        dados: &ClienteSync,
        locais: &CamposLocaisCliente,
    ) -> Result<Cliente, AppError>;
}

#[async_trait]
pub trait ImovelSyncStore: Send + Sync {
    async fn buscar_por_stays_id(&self, stays_id: &str) -> Result<Option<Imovel>, AppError>;
    async fn criar(
        &self,
        dados: &ImovelSync,
        locais: &CamposLocaisImovel,
    ) -> Result<Imovel, AppError>;
    async fn atualizar(
        &self,
        id: Uuid,
        dados: &ImovelSync,
        locais: &CamposLocaisImovel,
    ) -> Result<Imovel, AppError>;
}

#[async_trait]
pub trait ReservaSyncStore: Send + Sync {
    async fn buscar_por_stays_id(&self, stays_id: &str) -> Result<Option<Reserva>, AppError>;
    async fn criar(
        &self,
        dados: &ReservaSync,
        locais: &CamposLocaisReserva,
    ) -> Result<Reserva, AppError>;
    async fn atualizar(
        &self,
        id: Uuid,
        dados: &ReservaSync,
        locais: &CamposLocaisReserva,
    ) -> Result<Reserva, AppError>;
}

/// Desfecho do processamento de um registro vindo da Stays.
pub(crate) enum ResultadoRegistro {
    Criado,
    Atualizado,
    Pulado(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limite_efetivo_aplica_faixa_e_padrao() {
        assert_eq!(limite_efetivo(None), 100);
        assert_eq!(limite_efetivo(Some(0)), 1);
        assert_eq!(limite_efetivo(Some(37)), 37);
        assert_eq!(limite_efetivo(Some(9999)), 500);
    }
}
