// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;
use crate::stays;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Clientes ---
        handlers::clientes::criar_cliente,
        handlers::clientes::listar_clientes,
        handlers::clientes::detalhe_cliente,
        handlers::clientes::atualizar_cliente,
        handlers::clientes::deletar_cliente,
        handlers::clientes::sincronizar_clientes,
        handlers::clientes::listar_clientes_stays,
        handlers::clientes::detalhe_cliente_stays,

        // --- Imóveis ---
        handlers::imoveis::criar_imovel,
        handlers::imoveis::listar_imoveis,
        handlers::imoveis::buscar_imovel,
        handlers::imoveis::atualizar_imovel,
        handlers::imoveis::deletar_imovel,
        handlers::imoveis::sincronizar_imoveis,

        // --- Reservas ---
        handlers::reservas::criar_reserva,
        handlers::reservas::listar_reservas,
        handlers::reservas::detalhe_reserva,
        handlers::reservas::atualizar_reserva,
        handlers::reservas::deletar_reserva,
        handlers::reservas::sincronizar_reservas,
        handlers::reservas::criar_tarefa,
        handlers::reservas::listar_tarefas,
        handlers::reservas::concluir_tarefa,

        // --- Contratos ---
        handlers::contratos::criar_contrato,
        handlers::contratos::listar_contratos,
        handlers::contratos::buscar_contrato,
        handlers::contratos::atualizar_contrato,
        handlers::contratos::deletar_contrato,
        handlers::contratos::gerar_pdf_contrato,

        // --- Interações ---
        handlers::interacoes::criar_interacao,
        handlers::interacoes::listar_interacoes,
        handlers::interacoes::buscar_interacao,
        handlers::interacoes::atualizar_interacao,
        handlers::interacoes::deletar_interacao,
    ),
    components(
        schemas(
            // --- Clientes ---
            models::cliente::Cliente,
            models::cliente::DocumentoCliente,
            models::cliente::ClienteDetalhe,
            models::cliente::CreateClientePayload,
            models::cliente::UpdateClientePayload,

            // --- Imóveis ---
            models::imovel::ImovelStatus,
            models::imovel::Imovel,
            models::imovel::CreateImovelPayload,
            models::imovel::UpdateImovelPayload,

            // --- Reservas ---
            models::reserva::ReservaStatus,
            models::reserva::PaymentStatus,
            models::reserva::BookingSource,
            models::reserva::Reserva,
            models::reserva::ReservaImovelInfo,
            models::reserva::ReservaClienteInfo,
            models::reserva::ReservaResumo,
            models::reserva::ReservaDetalhe,
            models::reserva::ReservasMeta,
            models::reserva::ReservasResponse,
            models::reserva::CreateReservaPayload,
            models::reserva::UpdateReservaPayload,

            // --- Tarefas ---
            models::tarefa::TarefaStatus,
            models::tarefa::Tarefa,
            models::tarefa::TarefaResumo,
            models::tarefa::CreateTarefaPayload,

            // --- Contratos ---
            models::contrato::TipoContrato,
            models::contrato::StatusContrato,
            models::contrato::Contrato,
            models::contrato::CreateContratoPayload,
            models::contrato::UpdateContratoPayload,

            // --- Interações ---
            models::interacao::TipoInteracao,
            models::interacao::CategoriaInteracao,
            models::interacao::Interacao,
            models::interacao::CreateInteracaoPayload,
            models::interacao::UpdateInteracaoPayload,

            // --- Sincronização ---
            models::sync::SyncResumo,
            models::sync::SyncReservasResumo,
            models::sync::SyncClientesPayload,
            models::sync::SyncImoveisPayload,
            models::sync::SyncReservasPayload,
            stays::types::TipoDataReserva,
        )
    ),
    tags(
        (name = "Clientes", description = "Cadastro de clientes e sincronização com a Stays"),
        (name = "Imóveis", description = "Cadastro de imóveis e sincronização com a Stays"),
        (name = "Reservas", description = "Pipeline de reservas, tarefas e sincronização com a Stays"),
        (name = "Contratos", description = "Ciclo de vida dos contratos e geração de PDF"),
        (name = "Interações", description = "Linha do tempo de interações com os clientes")
    )
)]
pub struct ApiDoc;
