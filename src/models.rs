pub mod cliente;
pub mod contrato;
pub mod imovel;
pub mod interacao;
pub mod reserva;
pub mod sync;
pub mod tarefa;
