// src/services/sync/clientes.rs

use std::sync::Arc;

use serde_json::Value;

use crate::common::error::AppError;
use crate::models::cliente::DocumentoCliente;
use crate::models::sync::SyncResumo;
use crate::stays::types::{StaysCliente, StaysClienteDetalhado};

use super::campos::{agregados_de_reservas, extrair_cpf, primeira_string};
use super::{
    limite_efetivo, CamposLocaisCliente, ClienteSync, ClienteSyncStore, ResultadoRegistro,
    StaysGateway, MAX_PAGINAS,
};

/// Motor de sincronização de clientes: percorre `/booking/clients` página a
/// página e faz upsert por `stays_cliente_id`, preservando os campos do CRM.
#[derive(Clone)]
pub struct SyncClientes {
    stays: Arc<dyn StaysGateway>,
    store: Arc<dyn ClienteSyncStore>,
}

impl SyncClientes {
    pub fn new(stays: Arc<dyn StaysGateway>, store: Arc<dyn ClienteSyncStore>) -> Self {
        Self { stays, store }
    }

    pub async fn executar(&self, limit: Option<u32>) -> Result<SyncResumo, AppError> {
        let limite = limite_efetivo(limit);
        let mut resumo = SyncResumo::default();
        let mut skip: u32 = 0;

        tracing::info!("Iniciando sincronização de clientes da Stays (limit={})", limite);

        for _ in 0..MAX_PAGINAS {
            let pagina = self.stays.listar_clientes(skip, limite).await?;
            if pagina.data.is_empty() {
                tracing::info!(
                    "✅ Sincronização de clientes concluída: {} criados, {} atualizados, {} pulados",
                    resumo.created,
                    resumo.updated,
                    resumo.skipped
                );
                return Ok(resumo);
            }

            let recebidos = pagina.data.len() as u32;
            for registro in &pagina.data {
                resumo.total_fetched += 1;
                match self.processar(registro).await {
                    Ok(ResultadoRegistro::Criado) => resumo.created += 1,
                    Ok(ResultadoRegistro::Atualizado) => resumo.updated += 1,
                    Ok(ResultadoRegistro::Pulado(motivo)) => resumo.pular(motivo),
                    Err(e) => {
                        tracing::warn!("Falha ao sincronizar cliente {}: {}", registro.id, e);
                        resumo.pular("error");
                    }
                }
            }

            // Avança pelo que veio, não pelo tamanho pedido: a última página
            // costuma vir menor.
            skip += recebidos;
        }

        Err(AppError::StaysPayloadInvalido(format!(
            "A paginação de clientes da Stays não terminou após {} páginas",
            MAX_PAGINAS
        )))
    }

    async fn processar(&self, registro: &StaysCliente) -> Result<ResultadoRegistro, AppError> {
        let stays_id = registro.id.trim();
        if stays_id.is_empty() {
            return Ok(ResultadoRegistro::Pulado("invalid_id"));
        }

        // A listagem não traz documentos, telefones nem reservas; o detalhe
        // sim. 404 no detalhe não é fatal: segue só com o registro da lista.
        let detalhe = self.stays.buscar_cliente(stays_id).await?;

        let dados = match montar_cliente(stays_id, registro, detalhe.as_ref()) {
            Ok(dados) => dados,
            Err(motivo) => return Ok(ResultadoRegistro::Pulado(motivo)),
        };

        match self.store.buscar_por_stays_id(stays_id).await? {
            Some(cliente) => {
                let locais = CamposLocaisCliente::de_cliente(&cliente);
                self.store.atualizar(cliente.id, &dados, &locais).await?;
                Ok(ResultadoRegistro::Atualizado)
            }
            None => {
                self.store.criar(&dados, &CamposLocaisCliente::default()).await?;
                Ok(ResultadoRegistro::Criado)
            }
        }
    }
}

fn nome_completo(f_name: Option<&str>, l_name: Option<&str>) -> Option<String> {
    let partes: Vec<&str> = [f_name, l_name]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    (!partes.is_empty()).then(|| partes.join(" "))
}

/// Valida e converte um registro da Stays nos campos de propriedade da
/// sincronização. `Err` carrega o motivo de skip.
fn montar_cliente(
    stays_id: &str,
    registro: &StaysCliente,
    detalhe: Option<&StaysClienteDetalhado>,
) -> Result<ClienteSync, &'static str> {
    let documentos = detalhe
        .and_then(|d| d.documents.as_deref())
        .unwrap_or_default();

    let cpf = extrair_cpf(documentos).ok_or("invalid_document")?;

    let email = primeira_string([
        detalhe.and_then(|d| d.email.as_deref()),
        registro.email.as_deref(),
    ])
    .ok_or("missing_email")?;

    let nome = nome_completo(
        detalhe.and_then(|d| d.f_name.as_deref()),
        detalhe.and_then(|d| d.l_name.as_deref()),
    )
    .or_else(|| nome_completo(registro.f_name.as_deref(), registro.l_name.as_deref()))
    .unwrap_or_else(|| email.clone());

    let telefones: Vec<String> = detalhe
        .and_then(|d| d.phones.as_ref())
        .map(|fones| {
            fones
                .iter()
                .filter_map(|f| f.num.as_deref())
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let documentos_json = serde_json::to_value(
        documentos
            .iter()
            .map(|d| DocumentoCliente {
                tipo: d.tipo.clone(),
                numero: d.numb.clone(),
            })
            .collect::<Vec<_>>(),
    )
    .unwrap_or_else(|_| Value::Array(Vec::new()));

    let reservas = detalhe
        .and_then(|d| d.reservations.as_deref())
        .unwrap_or_default();
    let (total_reservas, valor_total_gasto, ultima_reserva) = agregados_de_reservas(reservas);

    Ok(ClienteSync {
        stays_cliente_id: stays_id.to_string(),
        nome,
        cpf,
        telefone: telefones.first().cloned(),
        emails: vec![email.clone()],
        email,
        telefones,
        documentos: documentos_json,
        origem: Some("Stays".to_string()),
        total_reservas,
        valor_total_gasto,
        ultima_reserva,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stays::types::{StaysClienteReserva, StaysClienteReservaPreco, StaysDocumento, StaysTelefone};
    use rust_decimal::Decimal;

    fn registro(id: &str) -> StaysCliente {
        StaysCliente {
            id: id.to_string(),
            kind: None,
            f_name: Some("Maria".to_string()),
            l_name: Some("Silva".to_string()),
            email: Some("maria@exemplo.com".to_string()),
            is_user: None,
        }
    }

    fn detalhe_completo() -> StaysClienteDetalhado {
        StaysClienteDetalhado {
            id: "cli-1".to_string(),
            kind: None,
            f_name: Some("Maria".to_string()),
            l_name: Some("Silva Santos".to_string()),
            email: Some("maria.santos@exemplo.com".to_string()),
            is_user: None,
            phones: Some(vec![
                StaysTelefone {
                    num: Some("+55 11 98888-7777".to_string()),
                    iso: None,
                    hint: None,
                },
                StaysTelefone {
                    num: Some("  ".to_string()),
                    iso: None,
                    hint: None,
                },
            ]),
            documents: Some(vec![StaysDocumento {
                tipo: Some("cpf".to_string()),
                numb: Some("123.456.789-01".to_string()),
            }]),
            alternate_langs: None,
            last_access: None,
            reservations: Some(vec![StaysClienteReserva {
                id: "res-1".to_string(),
                codigo: None,
                check_in_date: Some("2024-03-10".to_string()),
                check_in_time: Some("14:00".to_string()),
                check_out_date: None,
                check_out_time: None,
                idlisting: None,
                idclient: None,
                tipo: None,
                currency: None,
                price: Some(StaysClienteReservaPreco { total: Some(900.0) }),
                guests: None,
            }]),
        }
    }

    #[test]
    fn detalhe_prevalece_sobre_a_listagem() {
        let dados = montar_cliente("cli-1", &registro("cli-1"), Some(&detalhe_completo())).unwrap();

        assert_eq!(dados.nome, "Maria Silva Santos");
        assert_eq!(dados.email, "maria.santos@exemplo.com");
        assert_eq!(dados.cpf, "12345678901");
        assert_eq!(dados.telefone.as_deref(), Some("+55 11 98888-7777"));
        assert_eq!(dados.telefones.len(), 1);
        assert_eq!(dados.total_reservas, 1);
        assert_eq!(dados.valor_total_gasto, Decimal::from(900));
        assert!(dados.ultima_reserva.is_some());
        assert_eq!(dados.origem.as_deref(), Some("Stays"));
    }

    #[test]
    fn sem_documentos_e_skip_de_documento() {
        let erro = montar_cliente("cli-1", &registro("cli-1"), None).unwrap_err();
        assert_eq!(erro, "invalid_document");
    }

    #[test]
    fn cpf_fora_do_tamanho_e_skip_de_documento() {
        let mut detalhe = detalhe_completo();
        detalhe.documents = Some(vec![StaysDocumento {
            tipo: Some("cpf".to_string()),
            numb: Some("123".to_string()),
        }]);

        let erro = montar_cliente("cli-1", &registro("cli-1"), Some(&detalhe)).unwrap_err();
        assert_eq!(erro, "invalid_document");
    }

    #[test]
    fn sem_email_em_lugar_nenhum_e_skip_de_email() {
        let mut lista = registro("cli-1");
        lista.email = None;
        let mut detalhe = detalhe_completo();
        detalhe.email = None;

        let erro = montar_cliente("cli-1", &lista, Some(&detalhe)).unwrap_err();
        assert_eq!(erro, "missing_email");
    }

    #[test]
    fn nome_vazio_cai_para_o_email() {
        let mut lista = registro("cli-1");
        lista.f_name = None;
        lista.l_name = None;
        let mut detalhe = detalhe_completo();
        detalhe.f_name = None;
        detalhe.l_name = Some("   ".to_string());

        let dados = montar_cliente("cli-1", &lista, Some(&detalhe)).unwrap();
        assert_eq!(dados.nome, "maria.santos@exemplo.com");
    }
}
