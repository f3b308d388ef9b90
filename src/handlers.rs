pub mod clientes;
pub mod contratos;
pub mod imoveis;
pub mod interacoes;
pub mod reservas;
