// tests/support/mod.rs
//
// Dublês em memória dos ports de sincronização. A Stays falsa é roteirizada
// por páginas (cada chamada de listagem consome a próxima) e os stores
// guardam as entidades num mapa por stays_id, com injeção de falha por id.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crm_backend::common::error::AppError;
use crm_backend::models::cliente::Cliente;
use crm_backend::models::imovel::Imovel;
use crm_backend::models::reserva::Reserva;
use crm_backend::services::sync::{
    CamposLocaisCliente, CamposLocaisImovel, CamposLocaisReserva, ClienteSync, ClienteSyncStore,
    ImovelSync, ImovelSyncStore, ReservaSync, ReservaSyncStore, StaysGateway,
};
use crm_backend::stays::types::{
    StaysCliente, StaysClienteDetalhado, StaysDocumento, StaysEndereco, StaysImovel,
    StaysImovelBooking, StaysPagina, StaysProperty, StaysReserva, StaysReservaPreco,
    StaysReservaStats, StaysReservasFiltros, StaysTelefone,
};

// --- STAYS ROTEIRIZADA ---

/// Os mapas de detalhe são preenchidos antes do `Arc::new`; só as filas de
/// páginas mudam durante a execução.
#[derive(Default)]
pub struct FakeStays {
    pub paginas_clientes: Mutex<Vec<Vec<StaysCliente>>>,
    pub detalhes_clientes: HashMap<String, StaysClienteDetalhado>,
    pub paginas_imoveis: Mutex<Vec<Vec<StaysImovel>>>,
    pub detalhes_imoveis: HashMap<String, StaysImovel>,
    pub bookings: HashMap<String, StaysImovelBooking>,
    pub properties: HashMap<String, StaysProperty>,
    pub paginas_reservas: Mutex<Vec<Vec<StaysReserva>>>,

    pub paginas_pedidas: AtomicU32,
    pub limites_pedidos: Mutex<Vec<u32>>,
    pub buscas_detalhe_imovel: AtomicU32,
    pub buscas_property: AtomicU32,
}

impl FakeStays {
    fn proxima_pagina<T>(filas: &Mutex<Vec<Vec<T>>>) -> Vec<T> {
        let mut filas = filas.lock().unwrap();
        if filas.is_empty() {
            Vec::new()
        } else {
            filas.remove(0)
        }
    }

    fn registrar_pedido(&self, limit: u32) {
        self.paginas_pedidas.fetch_add(1, Ordering::SeqCst);
        self.limites_pedidos.lock().unwrap().push(limit);
    }
}

#[async_trait]
impl StaysGateway for FakeStays {
    async fn listar_clientes(
        &self,
        _skip: u32,
        limit: u32,
    ) -> Result<StaysPagina<StaysCliente>, AppError> {
        self.registrar_pedido(limit);
        Ok(StaysPagina {
            data: Self::proxima_pagina(&self.paginas_clientes),
            total: None,
            page: None,
            limit: None,
        })
    }

    async fn buscar_cliente(&self, id: &str) -> Result<Option<StaysClienteDetalhado>, AppError> {
        Ok(self.detalhes_clientes.get(id).cloned())
    }

    async fn listar_imoveis(
        &self,
        _skip: u32,
        limit: u32,
    ) -> Result<StaysPagina<StaysImovel>, AppError> {
        self.registrar_pedido(limit);
        Ok(StaysPagina {
            data: Self::proxima_pagina(&self.paginas_imoveis),
            total: None,
            page: None,
            limit: None,
        })
    }

    async fn buscar_imovel(&self, id: &str) -> Result<Option<StaysImovel>, AppError> {
        self.buscas_detalhe_imovel.fetch_add(1, Ordering::SeqCst);
        Ok(self.detalhes_imoveis.get(id).cloned())
    }

    async fn buscar_imovel_booking(
        &self,
        id: &str,
    ) -> Result<Option<StaysImovelBooking>, AppError> {
        Ok(self.bookings.get(id).cloned())
    }

    async fn buscar_property(&self, id: &str) -> Result<Option<StaysProperty>, AppError> {
        self.buscas_property.fetch_add(1, Ordering::SeqCst);
        Ok(self.properties.get(id).cloned())
    }

    async fn listar_reservas(
        &self,
        filtros: &StaysReservasFiltros,
    ) -> Result<Vec<StaysReserva>, AppError> {
        self.registrar_pedido(filtros.limit.unwrap_or(0));
        Ok(Self::proxima_pagina(&self.paginas_reservas))
    }
}

// --- STORES EM MEMÓRIA ---

fn falha_simulada() -> AppError {
    AppError::InternalServerError(anyhow::anyhow!("falha simulada no banco"))
}

#[derive(Default)]
pub struct FakeClienteStore {
    pub registros: Mutex<HashMap<String, Cliente>>,
    pub falhar_em: HashSet<String>,
    pub consultas: AtomicU32,
}

impl FakeClienteStore {
    pub fn com_falha_em(ids: &[&str]) -> Self {
        Self {
            falhar_em: ids.iter().map(|id| id.to_string()).collect(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl ClienteSyncStore for FakeClienteStore {
    async fn buscar_por_stays_id(&self, stays_id: &str) -> Result<Option<Cliente>, AppError> {
        self.consultas.fetch_add(1, Ordering::SeqCst);
        Ok(self.registros.lock().unwrap().get(stays_id).cloned())
    }

    async fn criar(
        &self,
        dados: &ClienteSync,
        locais: &CamposLocaisCliente,
    ) -> Result<Cliente, AppError> {
        if self.falhar_em.contains(&dados.stays_cliente_id) {
            return Err(falha_simulada());
        }
        let cliente = cliente_de(Uuid::new_v4(), dados, locais);
        self.registros
            .lock()
            .unwrap()
            .insert(dados.stays_cliente_id.clone(), cliente.clone());
        Ok(cliente)
    }

    async fn atualizar(
        &self,
        id: Uuid,
        dados: &ClienteSync,
        locais: &CamposLocaisCliente,
    ) -> Result<Cliente, AppError> {
        if self.falhar_em.contains(&dados.stays_cliente_id) {
            return Err(falha_simulada());
        }
        let cliente = cliente_de(id, dados, locais);
        self.registros
            .lock()
            .unwrap()
            .insert(dados.stays_cliente_id.clone(), cliente.clone());
        Ok(cliente)
    }
}

#[derive(Default)]
pub struct FakeImovelStore {
    pub registros: Mutex<HashMap<String, Imovel>>,
    pub consultas: AtomicU32,
}

#[async_trait]
impl ImovelSyncStore for FakeImovelStore {
    async fn buscar_por_stays_id(&self, stays_id: &str) -> Result<Option<Imovel>, AppError> {
        self.consultas.fetch_add(1, Ordering::SeqCst);
        Ok(self.registros.lock().unwrap().get(stays_id).cloned())
    }

    async fn criar(
        &self,
        dados: &ImovelSync,
        locais: &CamposLocaisImovel,
    ) -> Result<Imovel, AppError> {
        let imovel = imovel_de(Uuid::new_v4(), dados, locais);
        self.registros
            .lock()
            .unwrap()
            .insert(dados.stays_imovel_id.clone(), imovel.clone());
        Ok(imovel)
    }

    async fn atualizar(
        &self,
        id: Uuid,
        dados: &ImovelSync,
        locais: &CamposLocaisImovel,
    ) -> Result<Imovel, AppError> {
        let imovel = imovel_de(id, dados, locais);
        self.registros
            .lock()
            .unwrap()
            .insert(dados.stays_imovel_id.clone(), imovel.clone());
        Ok(imovel)
    }
}

#[derive(Default)]
pub struct FakeReservaStore {
    pub registros: Mutex<HashMap<String, Reserva>>,
}

#[async_trait]
impl ReservaSyncStore for FakeReservaStore {
    async fn buscar_por_stays_id(&self, stays_id: &str) -> Result<Option<Reserva>, AppError> {
        Ok(self.registros.lock().unwrap().get(stays_id).cloned())
    }

    async fn criar(
        &self,
        dados: &ReservaSync,
        locais: &CamposLocaisReserva,
    ) -> Result<Reserva, AppError> {
        let reserva = reserva_de(Uuid::new_v4(), dados, locais);
        self.registros
            .lock()
            .unwrap()
            .insert(dados.stays_reserva_id.clone(), reserva.clone());
        Ok(reserva)
    }

    async fn atualizar(
        &self,
        id: Uuid,
        dados: &ReservaSync,
        locais: &CamposLocaisReserva,
    ) -> Result<Reserva, AppError> {
        let reserva = reserva_de(id, dados, locais);
        self.registros
            .lock()
            .unwrap()
            .insert(dados.stays_reserva_id.clone(), reserva.clone());
        Ok(reserva)
    }
}

// --- MONTAGEM DE ENTIDADES ---

pub fn cliente_de(id: Uuid, dados: &ClienteSync, locais: &CamposLocaisCliente) -> Cliente {
    let agora = Utc::now();
    Cliente {
        id,
        stays_cliente_id: Some(dados.stays_cliente_id.clone()),
        nome: dados.nome.clone(),
        cpf: Some(dados.cpf.clone()),
        email: dados.email.clone(),
        telefone: dados.telefone.clone(),
        emails: dados.emails.clone(),
        telefones: dados.telefones.clone(),
        documentos: dados.documentos.clone(),
        tags: locais.tags.clone(),
        score: locais.score,
        preferencias: locais.preferencias.clone(),
        observacoes: locais.observacoes.clone(),
        origem: dados.origem.clone(),
        total_reservas: dados.total_reservas,
        valor_total_gasto: dados.valor_total_gasto,
        ultima_reserva: dados.ultima_reserva,
        created_at: agora,
        updated_at: agora,
    }
}

pub fn imovel_de(id: Uuid, dados: &ImovelSync, locais: &CamposLocaisImovel) -> Imovel {
    let agora = Utc::now();
    Imovel {
        id,
        stays_imovel_id: Some(dados.stays_imovel_id.clone()),
        nome: dados.nome.clone(),
        endereco: dados.endereco.clone(),
        tipo: dados.tipo.clone(),
        capacidade: dados.capacidade,
        rua: locais.rua.clone(),
        numero: locais.numero.clone(),
        complemento: locais.complemento.clone(),
        bairro: locais.bairro.clone(),
        cidade: locais.cidade.clone(),
        estado: locais.estado.clone(),
        cep: locais.cep.clone(),
        apartamento: locais.apartamento.clone(),
        matricula: locais.matricula.clone(),
        cartorio: locais.cartorio.clone(),
        inscricao_municipal: locais.inscricao_municipal.clone(),
        valor_minimo_diaria: locais.valor_minimo_diaria,
        status: locais.status,
        responsavel_local: locais.responsavel_local.clone(),
        responsavel_contato: locais.responsavel_contato.clone(),
        comodidades: locais.comodidades.clone(),
        fotos: locais.fotos.clone(),
        instrucoes: locais.instrucoes.clone(),
        historico_manutencao: locais.historico_manutencao.clone(),
        custos_operacionais: locais.custos_operacionais.clone(),
        documentacao: locais.documentacao.clone(),
        observacoes: locais.observacoes.clone(),
        ultima_vistoria: locais.ultima_vistoria,
        proxima_manutencao: locais.proxima_manutencao,
        created_at: agora,
        updated_at: agora,
    }
}

pub fn reserva_de(id: Uuid, dados: &ReservaSync, locais: &CamposLocaisReserva) -> Reserva {
    let agora = Utc::now();
    Reserva {
        id,
        stays_reserva_id: Some(dados.stays_reserva_id.clone()),
        imovel_id: dados.imovel_id,
        cliente_id: dados.cliente_id,
        status: dados.status,
        payment_status: dados.payment_status,
        origem: dados.origem,
        canal: dados.canal.clone(),
        check_in: dados.check_in,
        check_out: dados.check_out,
        total_hospedes: dados.total_hospedes,
        valor_total: dados.valor_total,
        sinal: dados.sinal,
        observacoes: locais.observacoes.clone(),
        notas_internas: locais.notas_internas.clone(),
        pipeline_posicao: locais.pipeline_posicao,
        created_at: agora,
        updated_at: agora,
    }
}

/// Imóvel já sincronizado, para semear o store antes de uma carga de reservas.
pub fn imovel_local(stays_id: &str) -> Imovel {
    imovel_de(
        Uuid::new_v4(),
        &ImovelSync {
            stays_imovel_id: stays_id.to_string(),
            nome: "Apartamento Mar Azul 302".to_string(),
            endereco: "Rua das Gaivotas, 120, Ingleses, Florianópolis, SC".to_string(),
            tipo: "apartamento".to_string(),
            capacidade: 4,
        },
        &CamposLocaisImovel::default(),
    )
}

/// Cliente já sincronizado, para semear o store antes de uma carga de reservas.
pub fn cliente_local(stays_id: &str) -> Cliente {
    cliente_de(
        Uuid::new_v4(),
        &ClienteSync {
            stays_cliente_id: stays_id.to_string(),
            nome: "Ana Souza".to_string(),
            cpf: "12345678901".to_string(),
            email: "ana@exemplo.com".to_string(),
            telefone: None,
            emails: vec!["ana@exemplo.com".to_string()],
            telefones: Vec::new(),
            documentos: serde_json::Value::Array(Vec::new()),
            origem: Some("Stays".to_string()),
            total_reservas: 0,
            valor_total_gasto: rust_decimal::Decimal::ZERO,
            ultima_reserva: None,
        },
        &CamposLocaisCliente::default(),
    )
}

// --- FIXTURES DA STAYS ---

pub fn stays_cliente(id: &str, f_name: &str, l_name: &str, email: &str) -> StaysCliente {
    StaysCliente {
        id: id.to_string(),
        kind: Some("person".to_string()),
        f_name: Some(f_name.to_string()),
        l_name: Some(l_name.to_string()),
        email: Some(email.to_string()),
        is_user: Some(false),
    }
}

pub fn detalhe_com_cpf(id: &str, email: &str, cpf: &str) -> StaysClienteDetalhado {
    StaysClienteDetalhado {
        id: id.to_string(),
        kind: Some("person".to_string()),
        f_name: None,
        l_name: None,
        email: Some(email.to_string()),
        is_user: Some(false),
        phones: Some(vec![StaysTelefone {
            num: Some("+55 48 98877-0011".to_string()),
            iso: Some("BR".to_string()),
            hint: None,
        }]),
        documents: Some(vec![StaysDocumento {
            tipo: Some("cpf".to_string()),
            numb: Some(cpf.to_string()),
        }]),
        alternate_langs: None,
        last_access: None,
        reservations: None,
    }
}

pub fn detalhe_sem_email(id: &str, cpf: &str) -> StaysClienteDetalhado {
    StaysClienteDetalhado {
        email: None,
        ..detalhe_com_cpf(id, "descartado@exemplo.com", cpf)
    }
}

/// Anúncio com nome, endereço e capacidade na própria listagem, que a
/// sincronização consegue resolver sem buscar os detalhes.
pub fn stays_imovel_completo(id: &str, nome: &str) -> StaysImovel {
    StaysImovel {
        id: id.to_string(),
        name: Some(nome.to_string()),
        address: Some(StaysEndereco {
            street: Some("Rua das Gaivotas".to_string()),
            number: Some("120".to_string()),
            neighborhood: Some("Ingleses".to_string()),
            city: Some("Florianópolis".to_string()),
            state: Some("SC".to_string()),
            ..Default::default()
        }),
        characteristics: Some(vec!["apartamento".to_string()]),
        capacity: Some(4.0),
        ..Default::default()
    }
}

pub fn stays_reserva(id: &str, idlisting: &str, idclient: &str) -> StaysReserva {
    StaysReserva {
        id: id.to_string(),
        codigo: Some(format!("BK-{}", id)),
        check_in_date: Some("2026-09-10".to_string()),
        check_in_time: Some("15:00".to_string()),
        check_out_date: Some("2026-09-15".to_string()),
        check_out_time: Some("11:00".to_string()),
        idlisting: Some(idlisting.to_string()),
        idclient: Some(idclient.to_string()),
        price: Some(StaysReservaPreco {
            currency: Some("BRL".to_string()),
            total: Some(1500.0),
            ..Default::default()
        }),
        stats: Some(StaysReservaStats {
            total_paid: Some(500.0),
        }),
        guests: Some(2.0),
        ..Default::default()
    }
}
