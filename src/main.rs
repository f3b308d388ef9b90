//src/main.rs

use axum::{
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crm_backend::config::AppState;
use crm_backend::docs::ApiDoc;
use crm_backend::handlers;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let cliente_routes = Router::new()
        .route(
            "/",
            post(handlers::clientes::criar_cliente).get(handlers::clientes::listar_clientes),
        )
        .route("/sync", post(handlers::clientes::sincronizar_clientes))
        .route("/stays", get(handlers::clientes::listar_clientes_stays))
        .route("/stays/{id}", get(handlers::clientes::detalhe_cliente_stays))
        .route(
            "/{id}",
            get(handlers::clientes::detalhe_cliente)
                .patch(handlers::clientes::atualizar_cliente)
                .delete(handlers::clientes::deletar_cliente),
        );

    let imovel_routes = Router::new()
        .route(
            "/",
            post(handlers::imoveis::criar_imovel).get(handlers::imoveis::listar_imoveis),
        )
        .route("/sync", post(handlers::imoveis::sincronizar_imoveis))
        .route(
            "/{id}",
            get(handlers::imoveis::buscar_imovel)
                .patch(handlers::imoveis::atualizar_imovel)
                .delete(handlers::imoveis::deletar_imovel),
        );

    let reserva_routes = Router::new()
        .route(
            "/",
            post(handlers::reservas::criar_reserva).get(handlers::reservas::listar_reservas),
        )
        .route("/sync", post(handlers::reservas::sincronizar_reservas))
        .route(
            "/tarefas/{id}/concluir",
            patch(handlers::reservas::concluir_tarefa),
        )
        .route(
            "/{id}",
            get(handlers::reservas::detalhe_reserva)
                .patch(handlers::reservas::atualizar_reserva)
                .delete(handlers::reservas::deletar_reserva),
        )
        .route(
            "/{id}/tarefas",
            post(handlers::reservas::criar_tarefa).get(handlers::reservas::listar_tarefas),
        );

    let contrato_routes = Router::new()
        .route(
            "/",
            post(handlers::contratos::criar_contrato).get(handlers::contratos::listar_contratos),
        )
        .route(
            "/{id}",
            get(handlers::contratos::buscar_contrato)
                .patch(handlers::contratos::atualizar_contrato)
                .delete(handlers::contratos::deletar_contrato),
        )
        .route("/{id}/pdf", get(handlers::contratos::gerar_pdf_contrato));

    let interacao_routes = Router::new()
        .route(
            "/",
            post(handlers::interacoes::criar_interacao)
                .get(handlers::interacoes::listar_interacoes),
        )
        .route(
            "/{id}",
            get(handlers::interacoes::buscar_interacao)
                .patch(handlers::interacoes::atualizar_interacao)
                .delete(handlers::interacoes::deletar_interacao),
        );

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/clientes", cliente_routes)
        .nest("/api/imoveis", imovel_routes)
        .nest("/api/reservas", reserva_routes)
        .nest("/api/contratos", contrato_routes)
        .nest("/api/interacoes", interacao_routes)
        .merge(SwaggerUi::new("/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
