// src/services/sync/campos.rs
//
// Resolução de campos canônicos a partir dos registros heterogêneos da
// Stays. Funções puras: a precedência entre as alternativas fica declarada
// aqui e testada isoladamente, sem rede nem banco.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;

use crate::models::imovel::Imovel;
use crate::models::reserva::{BookingSource, PaymentStatus, ReservaStatus};
use crate::stays::types::{
    StaysClienteReserva, StaysDocumento, StaysEndereco, StaysImovel, StaysImovelBooking,
    StaysProperty, StaysReserva, StaysTituloMultilingue,
};

/// Tipo atribuído a imóveis sem nenhuma característica informada.
pub const TIPO_INDEFINIDO: &str = "Indefinido";

/// Primeiro candidato não vazio depois do trim.
pub fn primeira_string<'a, I>(candidatos: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidatos
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Primeiro candidato finito e estritamente positivo.
pub fn primeiro_numero<I>(candidatos: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    candidatos
        .into_iter()
        .flatten()
        .find(|v| v.is_finite() && *v > 0.0)
}

/// Primeiro candidato definido e finito, sem exigir sinal. Valores
/// monetários zerados contam como resposta válida.
pub fn primeiro_valor<I>(candidatos: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    candidatos.into_iter().flatten().find(|v| v.is_finite())
}

pub fn decimal_de(valor: Option<f64>) -> Option<Decimal> {
    valor
        .filter(|v| v.is_finite())
        .and_then(Decimal::from_f64_retain)
}

/// Título multilíngue: pt_BR, depois en_US, depois qualquer idioma.
pub fn titulo_multilingue(titulo: &StaysTituloMultilingue) -> Option<String> {
    primeira_string([titulo.pt_br.as_deref(), titulo.en_us.as_deref()]).or_else(|| {
        primeira_string(titulo.outros.values().map(|v| v.as_deref()))
    })
}

/// Junta as partes não vazias do endereço com ", ", na ordem postal.
pub fn formatar_endereco(endereco: &StaysEndereco) -> String {
    [
        endereco.street.as_deref(),
        endereco.number.as_deref(),
        endereco.complement.as_deref(),
        endereco.neighborhood.as_deref(),
        endereco.city.as_deref(),
        endereco.state.as_deref(),
        endereco.country.as_deref(),
        endereco.zipcode.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .filter(|p| !p.is_empty())
    .collect::<Vec<_>>()
    .join(", ")
}

fn nome_do_anuncio(imovel: &StaysImovel) -> Option<String> {
    imovel
        .mstitle
        .as_ref()
        .and_then(titulo_multilingue)
        .or_else(|| {
            primeira_string([
                imovel.name.as_deref(),
                imovel.internal_name.as_deref(),
                imovel.title.as_deref(),
                imovel.display_name.as_deref(),
                imovel.unit_name.as_deref(),
            ])
        })
}

fn nome_do_booking(booking: &StaysImovelBooking) -> Option<String> {
    booking
        .mstitle
        .as_ref()
        .and_then(titulo_multilingue)
        .or_else(|| {
            primeira_string([
                booking.name.as_deref(),
                booking.internal_name.as_deref(),
                booking.title.as_deref(),
                booking.display_name.as_deref(),
                booking.unit_name.as_deref(),
            ])
        })
}

fn nome_da_property(property: &StaysProperty) -> Option<String> {
    property
        .mstitle
        .as_ref()
        .and_then(titulo_multilingue)
        .or_else(|| {
            primeira_string([
                property.name.as_deref(),
                property.title.as_deref(),
                property.display_name.as_deref(),
            ])
        })
}

fn endereco_formatado(endereco: Option<&StaysEndereco>) -> Option<String> {
    endereco
        .map(formatar_endereco)
        .filter(|e| !e.is_empty())
}

/// True quando o registro da listagem sozinho não fornece nome, endereço e
/// capacidade. Só nesse caso os detalhes complementares são buscados.
pub fn precisa_complemento(imovel: &StaysImovel) -> bool {
    let tem_nome = nome_do_anuncio(imovel).is_some();
    let tem_endereco = endereco_formatado(imovel.address.as_ref()).is_some();
    let tem_capacidade =
        primeiro_numero([imovel.capacity, imovel.i_max_guests]).is_some();

    !(tem_nome && tem_endereco && tem_capacidade)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CamposImovel {
    pub nome: String,
    pub endereco: String,
    pub tipo: String,
    pub capacidade: i32,
}

/// Resolve nome, endereço, tipo e capacidade de um anúncio. O registro de
/// detalhe (mesma forma do primário) entra logo após o primário em cada
/// cadeia; a capacidade consulta apenas primário, booking e o valor local.
pub fn resolver_campos_imovel(
    stays_id: &str,
    primario: &StaysImovel,
    detalhe: Option<&StaysImovel>,
    booking: Option<&StaysImovelBooking>,
    property: Option<&StaysProperty>,
    existente: Option<&Imovel>,
) -> CamposImovel {
    let nome_bruto = nome_do_anuncio(primario)
        .or_else(|| detalhe.and_then(nome_do_anuncio))
        .or_else(|| booking.and_then(nome_do_booking))
        .or_else(|| property.and_then(nome_da_property))
        .or_else(|| {
            existente
                .map(|e| e.nome.trim())
                .filter(|n| !n.is_empty())
                .map(str::to_string)
        });

    let endereco_base = endereco_formatado(primario.address.as_ref())
        .or_else(|| endereco_formatado(detalhe.and_then(|d| d.address.as_ref())))
        .or_else(|| endereco_formatado(booking.and_then(|b| b.address.as_ref())))
        .or_else(|| endereco_formatado(property.and_then(|p| p.address.as_ref())))
        .or_else(|| {
            existente
                .map(|e| e.endereco.trim())
                .filter(|e| !e.is_empty())
                .map(str::to_string)
        })
        .or_else(|| nome_bruto.clone());

    let mut nome = nome_bruto
        .or_else(|| endereco_base.clone())
        .unwrap_or_else(|| format!("Imóvel {}", stays_id));
    let endereco = endereco_base.unwrap_or_else(|| nome.clone());

    // Nome idêntico ao endereço vira só o primeiro segmento, para não exibir
    // o endereço completo como título do imóvel.
    if nome.eq_ignore_ascii_case(&endereco) {
        if let Some(segmento) = nome.split(',').next().map(|s| s.trim().to_string()) {
            if !segmento.is_empty() {
                nome = segmento;
            }
        }
    }

    let tipo = primeira_string([
        primario.characteristics.as_ref().and_then(|c| c.first()).map(String::as_str),
        detalhe
            .and_then(|d| d.characteristics.as_ref())
            .and_then(|c| c.first())
            .map(String::as_str),
        existente.map(|e| e.tipo.as_str()),
    ])
    .unwrap_or_else(|| TIPO_INDEFINIDO.to_string());

    let capacidade = primeiro_numero([
        primario.capacity,
        primario.i_max_guests,
        booking.and_then(|b| b.capacity),
        booking.and_then(|b| b.max_guests),
        booking.and_then(|b| b.i_max_guests),
        existente.map(|e| e.capacidade as f64),
    ])
    .map(|v| v as i32)
    .unwrap_or(0);

    CamposImovel {
        nome,
        endereco,
        tipo,
        capacidade,
    }
}

// --- CLIENTES ---

pub fn normalizar_digitos(texto: &str) -> String {
    texto.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Extrai o CPF dos documentos do cliente: prefere o documento de tipo
/// "cpf", senão usa o primeiro; aceita apenas 11 dígitos após normalizar.
pub fn extrair_cpf(documentos: &[StaysDocumento]) -> Option<String> {
    let escolhido = documentos
        .iter()
        .find(|d| {
            d.tipo
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case("cpf"))
        })
        .or_else(|| documentos.first())?;

    let digitos = normalizar_digitos(escolhido.numb.as_deref()?);
    (digitos.len() == 11).then_some(digitos)
}

/// Agregados calculados sobre as reservas embutidas no detalhe do cliente.
pub fn agregados_de_reservas(
    reservas: &[StaysClienteReserva],
) -> (i32, Decimal, Option<DateTime<Utc>>) {
    let total_reservas = reservas.len() as i32;

    let valor_total_gasto = reservas
        .iter()
        .filter_map(|r| r.price.as_ref().and_then(|p| p.total))
        .filter(|v| v.is_finite())
        .filter_map(Decimal::from_f64_retain)
        .sum();

    let ultima_reserva = reservas
        .iter()
        .filter_map(|r| compor_data_hora(r.check_in_date.as_deref(), r.check_in_time.as_deref()))
        .max();

    (total_reservas, valor_total_gasto, ultima_reserva)
}

// --- RESERVAS ---

/// Canal de venda inferido por substring, testando os candidatos em ordem
/// de confiabilidade: parceiro, tipo, agente, URL da reserva.
pub fn inferir_origem(reserva: &StaysReserva) -> BookingSource {
    let candidatos = [
        reserva.partner.as_ref().and_then(|p| p.name.as_deref()),
        reserva.tipo.as_deref(),
        reserva.agent.as_ref().and_then(|a| a.name.as_deref()),
        reserva.reservation_url.as_deref(),
    ];

    for candidato in candidatos.into_iter().flatten() {
        let texto = candidato.to_lowercase();
        if texto.contains("airbnb") {
            return BookingSource::Airbnb;
        }
        if texto.contains("booking") {
            return BookingSource::Booking;
        }
        if texto.contains("expedia") {
            return BookingSource::Expedia;
        }
        if texto.contains("direto") || texto.contains("direct") || texto.contains("website") {
            return BookingSource::Direto;
        }
    }

    BookingSource::Outro
}

/// Rótulo bruto do canal, como veio da Stays.
pub fn canal_bruto(reserva: &StaysReserva) -> Option<String> {
    primeira_string([
        reserva.partner.as_ref().and_then(|p| p.name.as_deref()),
        reserva.tipo.as_deref(),
        reserva.agent.as_ref().and_then(|a| a.name.as_deref()),
    ])
}

/// Nunca devolve zero: contagem explícita, senão a soma do detalhamento,
/// senão 1.
pub fn resolver_total_hospedes(reserva: &StaysReserva) -> i32 {
    if let Some(guests) = reserva.guests.filter(|g| g.is_finite() && *g > 0.0) {
        return guests as i32;
    }

    if let Some(detalhe) = &reserva.guests_details {
        let soma = detalhe.adults.unwrap_or(0.0)
            + detalhe.children.unwrap_or(0.0)
            + detalhe.infants.unwrap_or(0.0);
        if soma.is_finite() && soma > 0.0 {
            return soma as i32;
        }
    }

    1
}

pub fn resolver_valor_total(reserva: &StaysReserva) -> Option<f64> {
    let preco = reserva.price.as_ref();
    primeiro_valor([
        preco.and_then(|p| p.total),
        preco.and_then(|p| p.hosting_details.as_ref()).and_then(|h| h.total),
        preco.and_then(|p| p.extras_details.as_ref()).and_then(|e| e.total),
    ])
}

pub fn resolver_valor_pago(reserva: &StaysReserva) -> Option<f64> {
    reserva
        .stats
        .as_ref()
        .and_then(|s| s.total_paid)
        .filter(|v| v.is_finite())
}

pub fn derivar_payment_status(total: Option<f64>, pago: Option<f64>) -> PaymentStatus {
    let total = match total {
        Some(t) if t > 0.0 => t,
        _ => return PaymentStatus::Pendente,
    };
    let pago = match pago {
        Some(p) if p > 0.0 => p,
        _ => return PaymentStatus::Pendente,
    };

    if pago >= total {
        PaymentStatus::Pago
    } else {
        PaymentStatus::Parcial
    }
}

pub fn derivar_status_reserva(
    agora: DateTime<Utc>,
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
) -> ReservaStatus {
    if agora >= check_out {
        ReservaStatus::Concluido
    } else if agora >= check_in {
        ReservaStatus::Ativo
    } else {
        ReservaStatus::CheckinAgendado
    }
}

/// Compõe data (`YYYY-MM-DD`) e hora (`HH:MM`, aceitando `HH:MM:SS`) em um
/// instante UTC. Sem hora, assume meia-noite. Data ilegível devolve None.
pub fn compor_data_hora(data: Option<&str>, hora: Option<&str>) -> Option<DateTime<Utc>> {
    let data = data.map(str::trim).filter(|d| !d.is_empty())?;
    let dia = NaiveDate::parse_from_str(data, "%Y-%m-%d").ok()?;

    let horario = hora
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .and_then(|h| {
            NaiveTime::parse_from_str(h, "%H:%M")
                .or_else(|_| NaiveTime::parse_from_str(h, "%H:%M:%S"))
                .ok()
        })
        .unwrap_or(NaiveTime::MIN);

    Some(dia.and_time(horario).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn endereco_de(street: &str, city: &str) -> StaysEndereco {
        StaysEndereco {
            street: Some(street.to_string()),
            city: Some(city.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn primeira_string_ignora_vazios_e_espacos() {
        assert_eq!(
            primeira_string([None, Some("   "), Some(""), Some(" Casa Azul ")]),
            Some("Casa Azul".to_string())
        );
        assert_eq!(primeira_string([None, Some("  ")]), None);
    }

    #[test]
    fn primeiro_numero_exige_finito_e_positivo() {
        assert_eq!(primeiro_numero([Some(0.0), Some(-2.0), Some(4.0)]), Some(4.0));
        assert_eq!(primeiro_numero([Some(f64::NAN), Some(f64::INFINITY)]), None);
        assert_eq!(primeiro_numero([None, None]), None);
    }

    #[test]
    fn primeiro_valor_aceita_zero() {
        assert_eq!(primeiro_valor([None, Some(0.0), Some(150.0)]), Some(0.0));
    }

    #[test]
    fn formatar_endereco_junta_partes_na_ordem() {
        let endereco = StaysEndereco {
            street: Some("Rua das Flores".to_string()),
            number: Some("120".to_string()),
            complement: Some("  ".to_string()),
            neighborhood: Some("Centro".to_string()),
            city: Some("Florianópolis".to_string()),
            state: Some("SC".to_string()),
            country: None,
            zipcode: Some("88010-000".to_string()),
        };

        assert_eq!(
            formatar_endereco(&endereco),
            "Rua das Flores, 120, Centro, Florianópolis, SC, 88010-000"
        );
        assert_eq!(formatar_endereco(&StaysEndereco::default()), "");
    }

    #[test]
    fn titulo_multilingue_prefere_pt_br() {
        let mut titulo = StaysTituloMultilingue {
            pt_br: Some("Casa da Praia".to_string()),
            en_us: Some("Beach House".to_string()),
            ..Default::default()
        };
        assert_eq!(titulo_multilingue(&titulo), Some("Casa da Praia".to_string()));

        titulo.pt_br = None;
        assert_eq!(titulo_multilingue(&titulo), Some("Beach House".to_string()));

        titulo.en_us = None;
        titulo
            .outros
            .insert("es_ES".to_string(), Some("Casa de Playa".to_string()));
        assert_eq!(titulo_multilingue(&titulo), Some("Casa de Playa".to_string()));
    }

    #[test]
    fn nome_igual_ao_endereco_fica_com_primeiro_segmento() {
        let primario = StaysImovel {
            id: "st-1".to_string(),
            mstitle: Some(StaysTituloMultilingue {
                pt_br: Some("Casa 1, Rua X".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let campos = resolver_campos_imovel("st-1", &primario, None, None, None, None);

        assert_eq!(campos.nome, "Casa 1");
        assert_eq!(campos.endereco, "Casa 1, Rua X");
    }

    #[test]
    fn endereco_do_anuncio_tem_precedencia_sobre_nome() {
        let primario = StaysImovel {
            id: "st-2".to_string(),
            name: Some("Apto 301".to_string()),
            address: Some(endereco_de("Av. Beira Mar", "Fortaleza")),
            capacity: Some(4.0),
            ..Default::default()
        };

        let campos = resolver_campos_imovel("st-2", &primario, None, None, None, None);

        assert_eq!(campos.nome, "Apto 301");
        assert_eq!(campos.endereco, "Av. Beira Mar, Fortaleza");
        assert_eq!(campos.capacidade, 4);
    }

    #[test]
    fn capacidade_cai_para_booking_e_depois_para_valor_local() {
        let primario = StaysImovel {
            id: "st-3".to_string(),
            ..Default::default()
        };
        let booking = StaysImovelBooking {
            max_guests: Some(6.0),
            ..Default::default()
        };

        let campos =
            resolver_campos_imovel("st-3", &primario, None, Some(&booking), None, None);
        assert_eq!(campos.capacidade, 6);

        let campos = resolver_campos_imovel("st-3", &primario, None, None, None, None);
        assert_eq!(campos.capacidade, 0);
    }

    #[test]
    fn tipo_usa_primeira_caracteristica_ou_sentinela() {
        let primario = StaysImovel {
            id: "st-4".to_string(),
            name: Some("Chalé".to_string()),
            characteristics: Some(vec!["Chalé de montanha".to_string(), "Pet friendly".to_string()]),
            ..Default::default()
        };
        let campos = resolver_campos_imovel("st-4", &primario, None, None, None, None);
        assert_eq!(campos.tipo, "Chalé de montanha");

        let sem_caracteristicas = StaysImovel {
            id: "st-5".to_string(),
            name: Some("Loft".to_string()),
            ..Default::default()
        };
        let campos =
            resolver_campos_imovel("st-5", &sem_caracteristicas, None, None, None, None);
        assert_eq!(campos.tipo, TIPO_INDEFINIDO);
    }

    #[test]
    fn nome_sem_nenhuma_fonte_usa_identificador() {
        let primario = StaysImovel {
            id: "st-6".to_string(),
            ..Default::default()
        };
        let campos = resolver_campos_imovel("st-6", &primario, None, None, None, None);
        assert_eq!(campos.nome, "Imóvel st-6");
        assert_eq!(campos.endereco, "Imóvel st-6");
    }

    #[test]
    fn precisa_complemento_quando_falta_qualquer_campo() {
        let completo = StaysImovel {
            id: "st-7".to_string(),
            name: Some("Casa".to_string()),
            address: Some(endereco_de("Rua A", "Recife")),
            capacity: Some(2.0),
            ..Default::default()
        };
        assert!(!precisa_complemento(&completo));

        let sem_capacidade = StaysImovel {
            capacity: None,
            ..completo.clone()
        };
        assert!(precisa_complemento(&sem_capacidade));
    }

    #[test]
    fn extrair_cpf_prefere_documento_do_tipo_cpf() {
        let documentos = vec![
            StaysDocumento {
                tipo: Some("passport".to_string()),
                numb: Some("AB123456".to_string()),
            },
            StaysDocumento {
                tipo: Some("CPF".to_string()),
                numb: Some("123.456.789-01".to_string()),
            },
        ];
        assert_eq!(extrair_cpf(&documentos), Some("12345678901".to_string()));
    }

    #[test]
    fn extrair_cpf_rejeita_numero_curto() {
        let documentos = vec![StaysDocumento {
            tipo: Some("cpf".to_string()),
            numb: Some("123".to_string()),
        }];
        assert_eq!(extrair_cpf(&documentos), None);
        assert_eq!(extrair_cpf(&[]), None);
    }

    #[test]
    fn agregados_somam_valores_e_pegam_ultima_entrada() {
        let reservas = vec![
            StaysClienteReserva {
                id: "r1".to_string(),
                check_in_date: Some("2024-01-10".to_string()),
                price: Some(crate::stays::types::StaysClienteReservaPreco {
                    total: Some(500.0),
                }),
                ..reserva_cliente_vazia()
            },
            StaysClienteReserva {
                id: "r2".to_string(),
                check_in_date: Some("2024-03-02".to_string()),
                price: Some(crate::stays::types::StaysClienteReservaPreco {
                    total: Some(250.5),
                }),
                ..reserva_cliente_vazia()
            },
        ];

        let (total, valor, ultima) = agregados_de_reservas(&reservas);
        assert_eq!(total, 2);
        assert_eq!(valor, Decimal::from_f64_retain(750.5).unwrap());
        assert_eq!(
            ultima,
            Some(Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap())
        );
    }

    fn reserva_cliente_vazia() -> StaysClienteReserva {
        StaysClienteReserva {
            id: String::new(),
            codigo: None,
            check_in_date: None,
            check_in_time: None,
            check_out_date: None,
            check_out_time: None,
            idlisting: None,
            idclient: None,
            tipo: None,
            currency: None,
            price: None,
            guests: None,
        }
    }

    fn reserva_vazia() -> StaysReserva {
        StaysReserva::default()
    }

    #[test]
    fn origem_inferida_na_ordem_de_prioridade() {
        let mut reserva = reserva_vazia();
        reserva.partner = Some(crate::stays::types::StaysParceiro {
            id: None,
            name: Some("Airbnb Brasil".to_string()),
            commission: None,
        });
        reserva.tipo = Some("booking.com".to_string());
        assert_eq!(inferir_origem(&reserva), BookingSource::Airbnb);

        reserva.partner = None;
        assert_eq!(inferir_origem(&reserva), BookingSource::Booking);

        reserva.tipo = None;
        reserva.reservation_url = Some("https://www.expedia.com/r/99".to_string());
        assert_eq!(inferir_origem(&reserva), BookingSource::Expedia);

        reserva.reservation_url = Some("https://website.direto.com".to_string());
        assert_eq!(inferir_origem(&reserva), BookingSource::Direto);

        reserva.reservation_url = None;
        assert_eq!(inferir_origem(&reserva), BookingSource::Outro);
    }

    #[test]
    fn total_de_hospedes_nunca_zera() {
        let mut reserva = reserva_vazia();
        reserva.guests = Some(3.0);
        assert_eq!(resolver_total_hospedes(&reserva), 3);

        reserva.guests = Some(0.0);
        reserva.guests_details = Some(crate::stays::types::StaysHospedes {
            adults: Some(2.0),
            children: Some(1.0),
            infants: None,
        });
        assert_eq!(resolver_total_hospedes(&reserva), 3);

        reserva.guests_details = None;
        assert_eq!(resolver_total_hospedes(&reserva), 1);
    }

    #[test]
    fn valor_total_percorre_total_hospedagem_extras() {
        let mut reserva = reserva_vazia();
        reserva.price = Some(crate::stays::types::StaysReservaPreco {
            currency: None,
            total: None,
            hosting_details: Some(crate::stays::types::StaysPrecoHospedagem {
                fees: None,
                discounts: None,
                night_price: None,
                total: Some(890.0),
            }),
            extras_details: None,
        });
        assert_eq!(resolver_valor_total(&reserva), Some(890.0));

        reserva.price = None;
        assert_eq!(resolver_valor_total(&reserva), None);
    }

    #[test]
    fn payment_status_cobre_os_quatro_ramos() {
        use PaymentStatus::*;

        assert_eq!(derivar_payment_status(None, Some(100.0)), Pendente);
        assert_eq!(derivar_payment_status(Some(0.0), Some(100.0)), Pendente);
        assert_eq!(derivar_payment_status(Some(300.0), None), Pendente);
        assert_eq!(derivar_payment_status(Some(300.0), Some(0.0)), Pendente);
        assert_eq!(derivar_payment_status(Some(300.0), Some(300.0)), Pago);
        assert_eq!(derivar_payment_status(Some(300.0), Some(450.0)), Pago);
        assert_eq!(derivar_payment_status(Some(300.0), Some(120.0)), Parcial);
    }

    #[test]
    fn status_da_reserva_segue_o_relogio() {
        let check_in = Utc.with_ymd_and_hms(2024, 6, 10, 14, 0, 0).unwrap();
        let check_out = Utc.with_ymd_and_hms(2024, 6, 15, 11, 0, 0).unwrap();

        let antes = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(
            derivar_status_reserva(antes, check_in, check_out),
            ReservaStatus::CheckinAgendado
        );

        let durante = Utc.with_ymd_and_hms(2024, 6, 12, 9, 0, 0).unwrap();
        assert_eq!(
            derivar_status_reserva(durante, check_in, check_out),
            ReservaStatus::Ativo
        );

        let depois = Utc.with_ymd_and_hms(2024, 6, 15, 11, 0, 0).unwrap();
        assert_eq!(
            derivar_status_reserva(depois, check_in, check_out),
            ReservaStatus::Concluido
        );
    }

    #[test]
    fn compor_data_hora_aceita_variacoes_de_horario() {
        assert_eq!(
            compor_data_hora(Some("2024-05-01"), Some("14:30")),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 14, 30, 0).unwrap())
        );
        assert_eq!(
            compor_data_hora(Some("2024-05-01"), Some("14:30:45")),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 14, 30, 45).unwrap())
        );
        assert_eq!(
            compor_data_hora(Some("2024-05-01"), None),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
        );
        // Hora ilegível não invalida a data.
        assert_eq!(
            compor_data_hora(Some("2024-05-01"), Some("meio-dia")),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(compor_data_hora(Some("01/05/2024"), None), None);
        assert_eq!(compor_data_hora(None, Some("10:00")), None);
    }

    #[test]
    fn decimal_de_descarta_nao_finitos() {
        assert_eq!(decimal_de(Some(12.5)), Decimal::from_f64_retain(12.5));
        assert_eq!(decimal_de(Some(f64::NAN)), None);
        assert_eq!(decimal_de(None), None);
    }
}
