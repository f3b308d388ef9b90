pub mod cliente_service;
pub use cliente_service::ClienteService;
pub mod imovel_service;
pub use imovel_service::ImovelService;
pub mod reserva_service;
pub use reserva_service::ReservaService;
pub mod contrato_service;
pub use contrato_service::ContratoService;
pub mod interacao_service;
pub use interacao_service::InteracaoService;
pub mod documento_service;
pub use documento_service::DocumentoService;
pub mod sync;
