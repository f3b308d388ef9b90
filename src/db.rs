pub mod cliente_repo;
pub use cliente_repo::ClienteRepository;
pub mod imovel_repo;
pub use imovel_repo::ImovelRepository;
pub mod reserva_repo;
pub use reserva_repo::ReservaRepository;
pub mod contrato_repo;
pub use contrato_repo::ContratoRepository;
pub mod interacao_repo;
pub use interacao_repo::InteracaoRepository;
