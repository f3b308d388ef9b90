// tests/sync_engine.rs
//
// Os motores de sincronização rodando contra uma Stays roteirizada e stores
// em memória. O que importa aqui é o contrato de upsert: reexecutar nunca
// duplica, os campos do CRM sobrevivem e registro ruim não derruba a carga.

mod support;

use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;

use crm_backend::models::imovel::ImovelStatus;
use crm_backend::models::reserva::PaymentStatus;
use crm_backend::models::sync::SyncReservasPayload;
use crm_backend::services::sync::{SyncClientes, SyncImoveis, SyncReservas};
use crm_backend::stays::types::{
    StaysCliente, StaysClienteDetalhado, StaysImovel, StaysReserva, TipoDataReserva,
};

use support::{FakeClienteStore, FakeImovelStore, FakeReservaStore, FakeStays};

fn stays_com_clientes(
    paginas: Vec<Vec<StaysCliente>>,
    detalhes: Vec<StaysClienteDetalhado>,
) -> Arc<FakeStays> {
    let mut stays = FakeStays::default();
    stays.paginas_clientes = Mutex::new(paginas);
    for detalhe in detalhes {
        stays.detalhes_clientes.insert(detalhe.id.clone(), detalhe);
    }
    Arc::new(stays)
}

fn stays_com_imoveis(paginas: Vec<Vec<StaysImovel>>) -> Arc<FakeStays> {
    let mut stays = FakeStays::default();
    stays.paginas_imoveis = Mutex::new(paginas);
    Arc::new(stays)
}

fn stays_com_reservas(paginas: Vec<Vec<StaysReserva>>) -> Arc<FakeStays> {
    let mut stays = FakeStays::default();
    stays.paginas_reservas = Mutex::new(paginas);
    Arc::new(stays)
}

fn pagina_ana() -> Vec<Vec<StaysCliente>> {
    vec![vec![support::stays_cliente(
        "cli-1",
        "Ana",
        "Souza",
        "ana@exemplo.com",
    )]]
}

fn detalhe_ana() -> Vec<StaysClienteDetalhado> {
    vec![support::detalhe_com_cpf(
        "cli-1",
        "ana@exemplo.com",
        "123.456.789-01",
    )]
}

#[tokio::test]
async fn segunda_execucao_atualiza_sem_duplicar() {
    let store = Arc::new(FakeClienteStore::default());

    let sync = SyncClientes::new(stays_com_clientes(pagina_ana(), detalhe_ana()), store.clone());
    let resumo = sync.executar(None).await.unwrap();
    assert_eq!(resumo.created, 1);
    assert_eq!(resumo.updated, 0);

    // O CRM marca o cliente entre as duas cargas.
    let id_original = {
        let mut registros = store.registros.lock().unwrap();
        let cliente = registros.get_mut("cli-1").unwrap();
        cliente.tags = vec!["vip".to_string()];
        cliente.score = 80;
        cliente.observacoes = Some("Prefere contato por WhatsApp".to_string());
        cliente.id
    };

    let sync = SyncClientes::new(stays_com_clientes(pagina_ana(), detalhe_ana()), store.clone());
    let resumo = sync.executar(None).await.unwrap();
    assert_eq!(resumo.created, 0);
    assert_eq!(resumo.updated, 1);

    let registros = store.registros.lock().unwrap();
    assert_eq!(registros.len(), 1);

    let cliente = registros.get("cli-1").unwrap();
    assert_eq!(cliente.id, id_original);
    assert_eq!(cliente.tags, vec!["vip".to_string()]);
    assert_eq!(cliente.score, 80);
    assert_eq!(
        cliente.observacoes.as_deref(),
        Some("Prefere contato por WhatsApp")
    );
    // Os campos espelhados da Stays continuam vindo de lá.
    assert_eq!(cliente.nome, "Ana Souza");
    assert_eq!(cliente.cpf.as_deref(), Some("12345678901"));
    assert_eq!(cliente.telefone.as_deref(), Some("+55 48 98877-0011"));
}

#[tokio::test]
async fn sincronizacao_de_imoveis_preserva_campos_operacionais() {
    let store = Arc::new(FakeImovelStore::default());
    let pagina = vec![vec![support::stays_imovel_completo(
        "im-1",
        "Apartamento Mar Azul 302",
    )]];

    let sync = SyncImoveis::new(stays_com_imoveis(pagina.clone()), store.clone());
    sync.executar(None).await.unwrap();

    {
        let mut registros = store.registros.lock().unwrap();
        let imovel = registros.get_mut("im-1").unwrap();
        imovel.status = ImovelStatus::Manutencao;
        imovel.historico_manutencao = json!([{"data": "2026-08-01", "descricao": "Troca do chuveiro"}]);
        imovel.custos_operacionais = json!([{"mes": "2026-07", "valor": 430.0}]);
        imovel.valor_minimo_diaria = Some(Decimal::new(35000, 2));
    }

    let stays = stays_com_imoveis(pagina);
    let sync = SyncImoveis::new(stays.clone(), store.clone());
    let resumo = sync.executar(None).await.unwrap();
    assert_eq!(resumo.updated, 1);

    let registros = store.registros.lock().unwrap();
    let imovel = registros.get("im-1").unwrap();
    assert_eq!(imovel.status, ImovelStatus::Manutencao);
    assert_eq!(
        imovel.historico_manutencao,
        json!([{"data": "2026-08-01", "descricao": "Troca do chuveiro"}])
    );
    assert_eq!(
        imovel.custos_operacionais,
        json!([{"mes": "2026-07", "valor": 430.0}])
    );
    assert_eq!(imovel.valor_minimo_diaria, Some(Decimal::new(35000, 2)));

    // Registro completo na listagem não dispara busca de complemento.
    assert_eq!(stays.buscas_detalhe_imovel.load(Ordering::SeqCst), 0);
    assert_eq!(stays.buscas_property.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn paginacao_segue_ate_a_pagina_vazia() {
    let mut paginas = Vec::new();
    let mut detalhes = Vec::new();
    for (inicio, tamanho) in [(0u64, 100u64), (100, 100), (200, 37)] {
        let mut pagina = Vec::new();
        for n in inicio..inicio + tamanho {
            let id = format!("cli-{:03}", n);
            let email = format!("hospede{}@exemplo.com", n);
            pagina.push(support::stays_cliente(&id, "Hóspede", &n.to_string(), &email));
            detalhes.push(support::detalhe_com_cpf(
                &id,
                &email,
                &format!("{:011}", 10_000_000_000u64 + n),
            ));
        }
        paginas.push(pagina);
    }

    let stays = stays_com_clientes(paginas, detalhes);
    let store = Arc::new(FakeClienteStore::default());
    let sync = SyncClientes::new(stays.clone(), store.clone());

    let resumo = sync.executar(None).await.unwrap();
    assert_eq!(resumo.total_fetched, 237);
    assert_eq!(resumo.created, 237);
    assert_eq!(resumo.skipped, 0);
    assert_eq!(store.registros.lock().unwrap().len(), 237);

    // Três páginas com dados e a quarta, vazia, encerrando a varredura. A
    // página curta (37) não encerra sozinha.
    assert_eq!(stays.paginas_pedidas.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn falha_em_um_registro_nao_interrompe_a_carga() {
    let primeira_pagina: Vec<StaysCliente> = (1u64..=5)
        .map(|n| {
            support::stays_cliente(
                &format!("cli-{}", n),
                "Hóspede",
                &n.to_string(),
                &format!("hospede{}@exemplo.com", n),
            )
        })
        .collect();
    let segunda_pagina = vec![support::stays_cliente(
        "cli-6",
        "Hóspede",
        "6",
        "hospede6@exemplo.com",
    )];
    let detalhes = (1u64..=6)
        .map(|n| {
            support::detalhe_com_cpf(
                &format!("cli-{}", n),
                &format!("hospede{}@exemplo.com", n),
                &format!("{:011}", 10_000_000_000u64 + n),
            )
        })
        .collect();

    let stays = stays_com_clientes(vec![primeira_pagina, segunda_pagina], detalhes);
    let store = Arc::new(FakeClienteStore::com_falha_em(&["cli-3"]));
    let sync = SyncClientes::new(stays.clone(), store.clone());

    let resumo = sync.executar(None).await.unwrap();
    assert_eq!(resumo.created, 5);
    assert_eq!(resumo.skipped, 1);
    assert_eq!(resumo.skipped_reasons.get("error"), Some(&1));

    // A carga seguiu além da página do registro com falha.
    assert_eq!(stays.paginas_pedidas.load(Ordering::SeqCst), 3);
    assert!(store.registros.lock().unwrap().get("cli-3").is_none());
}

#[tokio::test]
async fn limite_informado_chega_normalizado_na_stays() {
    for (limite, esperado) in [(Some(9999u32), 500u32), (Some(0), 1), (None, 100)] {
        let stays = stays_com_clientes(Vec::new(), Vec::new());
        let sync = SyncClientes::new(stays.clone(), Arc::new(FakeClienteStore::default()));
        sync.executar(limite).await.unwrap();
        assert_eq!(*stays.limites_pedidos.lock().unwrap(), vec![esperado]);
    }
}

#[tokio::test]
async fn clientes_invalidos_sao_pulados_com_motivo() {
    let pagina = vec![
        support::stays_cliente("", "Sem", "Id", "semid@exemplo.com"),
        // Sem detalhe cadastrado: a Stays não devolve documentos.
        support::stays_cliente("cli-sem-doc", "Sem", "Documento", "semdoc@exemplo.com"),
        StaysCliente {
            email: None,
            ..support::stays_cliente("cli-sem-email", "Sem", "Email", "descartado@exemplo.com")
        },
        support::stays_cliente("cli-ok", "Ana", "Souza", "ana@exemplo.com"),
    ];
    let detalhes = vec![
        support::detalhe_sem_email("cli-sem-email", "98765432100"),
        support::detalhe_com_cpf("cli-ok", "ana@exemplo.com", "12345678901"),
    ];

    let store = Arc::new(FakeClienteStore::default());
    let sync = SyncClientes::new(stays_com_clientes(vec![pagina], detalhes), store.clone());

    let resumo = sync.executar(None).await.unwrap();
    assert_eq!(resumo.total_fetched, 4);
    assert_eq!(resumo.created, 1);
    assert_eq!(resumo.skipped, 3);
    assert_eq!(resumo.skipped_reasons.get("invalid_id"), Some(&1));
    assert_eq!(resumo.skipped_reasons.get("invalid_document"), Some(&1));
    assert_eq!(resumo.skipped_reasons.get("missing_email"), Some(&1));

    let registros = store.registros.lock().unwrap();
    assert_eq!(registros.len(), 1);
    assert!(registros.contains_key("cli-ok"));
}

#[tokio::test]
async fn reservas_sem_referencias_no_crm_sao_puladas() {
    let imoveis = Arc::new(FakeImovelStore::default());
    imoveis
        .registros
        .lock()
        .unwrap()
        .insert("im-1".to_string(), support::imovel_local("im-1"));
    let clientes = Arc::new(FakeClienteStore::default());
    let reservas = Arc::new(FakeReservaStore::default());

    let mut sem_checkout = support::stays_reserva("res-4", "im-1", "cli-fantasma");
    sem_checkout.check_out_date = None;

    let pagina = vec![
        support::stays_reserva("res-1", "im-desconhecido", "cli-1"),
        support::stays_reserva("res-2", "im-1", "cli-fantasma"),
        support::stays_reserva("res-3", "im-1", "cli-fantasma"),
        sem_checkout,
    ];

    let sync = SyncReservas::new(
        stays_com_reservas(vec![pagina]),
        reservas.clone(),
        imoveis.clone(),
        clientes.clone(),
    );
    let resumo = sync.executar(SyncReservasPayload::default()).await.unwrap();

    assert_eq!(resumo.created, 0);
    assert_eq!(resumo.skipped, 4);
    assert_eq!(resumo.skipped_reasons.get("property_not_found"), Some(&1));
    assert_eq!(resumo.skipped_reasons.get("client_not_found"), Some(&2));
    assert_eq!(resumo.skipped_reasons.get("invalid_dates"), Some(&1));

    // O mesmo cliente ausente aparece uma única vez no resumo.
    assert_eq!(
        resumo.clientes_nao_encontrados,
        vec!["cli-fantasma".to_string()]
    );
    assert!(reservas.registros.lock().unwrap().is_empty());
}

#[tokio::test]
async fn ids_repetidos_consultam_o_banco_uma_vez() {
    let imoveis = Arc::new(FakeImovelStore::default());
    imoveis
        .registros
        .lock()
        .unwrap()
        .insert("im-1".to_string(), support::imovel_local("im-1"));
    let clientes = Arc::new(FakeClienteStore::default());
    clientes
        .registros
        .lock()
        .unwrap()
        .insert("cli-1".to_string(), support::cliente_local("cli-1"));
    let reservas = Arc::new(FakeReservaStore::default());

    let pagina = vec![
        support::stays_reserva("res-1", "im-1", "cli-1"),
        support::stays_reserva("res-2", "im-1", "cli-1"),
        support::stays_reserva("res-3", "im-1", "cli-1"),
    ];

    let sync = SyncReservas::new(
        stays_com_reservas(vec![pagina]),
        reservas.clone(),
        imoveis.clone(),
        clientes.clone(),
    );
    let resumo = sync.executar(SyncReservasPayload::default()).await.unwrap();

    assert_eq!(resumo.created, 3);
    assert_eq!(imoveis.consultas.load(Ordering::SeqCst), 1);
    assert_eq!(clientes.consultas.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn reserva_atualizada_preserva_campos_do_pipeline() {
    let imoveis = Arc::new(FakeImovelStore::default());
    imoveis
        .registros
        .lock()
        .unwrap()
        .insert("im-1".to_string(), support::imovel_local("im-1"));
    let clientes = Arc::new(FakeClienteStore::default());
    clientes
        .registros
        .lock()
        .unwrap()
        .insert("cli-1".to_string(), support::cliente_local("cli-1"));
    let reservas = Arc::new(FakeReservaStore::default());

    let pagina = vec![support::stays_reserva("res-1", "im-1", "cli-1")];

    let sync = SyncReservas::new(
        stays_com_reservas(vec![pagina.clone()]),
        reservas.clone(),
        imoveis.clone(),
        clientes.clone(),
    );
    let resumo = sync.executar(SyncReservasPayload::default()).await.unwrap();
    assert_eq!(resumo.created, 1);

    {
        let mut registros = reservas.registros.lock().unwrap();
        let reserva = registros.get_mut("res-1").unwrap();
        reserva.pipeline_posicao = 3;
        reserva.notas_internas = Some("Aguardando caução".to_string());
    }

    let sync = SyncReservas::new(
        stays_com_reservas(vec![pagina]),
        reservas.clone(),
        imoveis.clone(),
        clientes.clone(),
    );
    let resumo = sync.executar(SyncReservasPayload::default()).await.unwrap();
    assert_eq!(resumo.created, 0);
    assert_eq!(resumo.updated, 1);

    let registros = reservas.registros.lock().unwrap();
    assert_eq!(registros.len(), 1);

    let reserva = registros.get("res-1").unwrap();
    assert_eq!(reserva.pipeline_posicao, 3);
    assert_eq!(reserva.notas_internas.as_deref(), Some("Aguardando caução"));
    // Os valores continuam espelhando a Stays.
    assert_eq!(reserva.valor_total, Some(Decimal::new(1500, 0)));
    assert_eq!(reserva.sinal, Some(Decimal::new(500, 0)));
    assert_eq!(reserva.payment_status, PaymentStatus::Parcial);
    assert_eq!(reserva.total_hospedes, 2);
}

#[tokio::test]
async fn janela_padrao_e_parametros_ecoados_no_resumo() {
    let imoveis = Arc::new(FakeImovelStore::default());
    let clientes = Arc::new(FakeClienteStore::default());
    let reservas = Arc::new(FakeReservaStore::default());

    // Sem parâmetros: janela de -30 a +180 dias, dateType arrival, limit 100.
    let sync = SyncReservas::new(
        stays_com_reservas(Vec::new()),
        reservas.clone(),
        imoveis.clone(),
        clientes.clone(),
    );
    let resumo = sync.executar(SyncReservasPayload::default()).await.unwrap();
    assert_eq!(resumo.date_type, "arrival");
    assert_eq!(resumo.limit, 100);

    let from = NaiveDate::parse_from_str(&resumo.from, "%Y-%m-%d").unwrap();
    let to = NaiveDate::parse_from_str(&resumo.to, "%Y-%m-%d").unwrap();
    assert_eq!((to - from).num_days(), 210);

    // Com parâmetros: ecoados como vieram.
    let stays = stays_com_reservas(Vec::new());
    let sync = SyncReservas::new(stays.clone(), reservas, imoveis, clientes);
    let resumo = sync
        .executar(SyncReservasPayload {
            from: NaiveDate::from_ymd_opt(2026, 1, 10),
            to: NaiveDate::from_ymd_opt(2026, 2, 10),
            date_type: Some(TipoDataReserva::Departure),
            limit: Some(50),
        })
        .await
        .unwrap();

    assert_eq!(resumo.from, "2026-01-10");
    assert_eq!(resumo.to, "2026-02-10");
    assert_eq!(resumo.date_type, "departure");
    assert_eq!(resumo.limit, 50);
    assert_eq!(*stays.limites_pedidos.lock().unwrap(), vec![50]);
}
