// src/config.rs

use std::sync::Arc;
use std::{env, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::db::{
    ClienteRepository, ContratoRepository, ImovelRepository, InteracaoRepository,
    ReservaRepository,
};
use crate::services::sync::{
    ClienteSyncStore, ImovelSyncStore, ReservaSyncStore, StaysGateway, SyncClientes, SyncImoveis,
    SyncReservas,
};
use crate::services::{
    ClienteService, ContratoService, DocumentoService, ImovelService, InteracaoService,
    ReservaService,
};
use crate::stays::client::{StaysClient, StaysConfig};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub cliente_service: ClienteService,
    pub imovel_service: ImovelService,
    pub reserva_service: ReservaService,
    pub contrato_service: ContratoService,
    pub interacao_service: InteracaoService,
    pub documento_service: DocumentoService,
    pub sync_clientes: SyncClientes,
    pub sync_imoveis: SyncImoveis,
    pub sync_reservas: SyncReservas,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let stays = Arc::new(StaysClient::new(StaysConfig::carregar()?));
        tracing::info!("✅ Cliente da API da Stays configurado!");

        // --- Monta o gráfico de dependências ---
        let cliente_repo = ClienteRepository::new(db_pool.clone());
        let imovel_repo = ImovelRepository::new(db_pool.clone());
        let reserva_repo = ReservaRepository::new(db_pool.clone());
        let contrato_repo = ContratoRepository::new(db_pool.clone());
        let interacao_repo = InteracaoRepository::new(db_pool.clone());

        let cliente_service = ClienteService::new(
            cliente_repo.clone(),
            contrato_repo.clone(),
            interacao_repo.clone(),
            Arc::clone(&stays),
        );
        let imovel_service = ImovelService::new(imovel_repo.clone());
        let reserva_service = ReservaService::new(reserva_repo.clone());
        let contrato_service = ContratoService::new(contrato_repo.clone(), cliente_repo.clone());
        let interacao_service = InteracaoService::new(interacao_repo, cliente_repo.clone());
        let documento_service = DocumentoService::new(contrato_repo, cliente_repo.clone());

        // Os motores de sincronização enxergam a Stays e o banco pelos ports.
        let gateway: Arc<dyn StaysGateway> = stays;
        let cliente_store: Arc<dyn ClienteSyncStore> = Arc::new(cliente_repo);
        let imovel_store: Arc<dyn ImovelSyncStore> = Arc::new(imovel_repo);
        let reserva_store: Arc<dyn ReservaSyncStore> = Arc::new(reserva_repo);

        let sync_clientes =
            SyncClientes::new(Arc::clone(&gateway), Arc::clone(&cliente_store));
        let sync_imoveis = SyncImoveis::new(Arc::clone(&gateway), Arc::clone(&imovel_store));
        let sync_reservas = SyncReservas::new(
            Arc::clone(&gateway),
            reserva_store,
            imovel_store,
            cliente_store,
        );

        Ok(Self {
            db_pool,
            cliente_service,
            imovel_service,
            reserva_service,
            contrato_service,
            interacao_service,
            documento_service,
            sync_clientes,
            sync_imoveis,
            sync_reservas,
        })
    }
}
