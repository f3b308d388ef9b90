// src/stays/types.rs
//
// Formas de payload da API externa da Stays. A API mistura convenções de
// nome (camelCase, prefixos `_id`, prefixos de tipo `_f_`/`_i_`/`_ms`),
// então os renames são explícitos onde o camelCase não cobre.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- CLIENTES ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaysCliente {
    // `_id` ausente vira string vazia e o registro é pulado na sincronização,
    // sem derrubar o parse da página inteira.
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub f_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub l_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_user: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaysClienteDetalhado {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub f_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub l_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_user: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phones: Option<Vec<StaysTelefone>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<StaysDocumento>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_langs: Option<Vec<String>>,
    /// Metadados de acesso que só interessam ao frontend; repassados como vieram.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_access: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservations: Option<Vec<StaysClienteReserva>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StaysTelefone {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StaysDocumento {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numb: Option<String>,
}

/// Reserva resumida embutida no detalhe do cliente. Alimenta os agregados
/// (total de reservas, valor gasto, última reserva).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaysClienteReserva {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out_time: Option<String>,
    #[serde(rename = "_idlisting", skip_serializing_if = "Option::is_none")]
    pub idlisting: Option<String>,
    #[serde(rename = "_idclient", skip_serializing_if = "Option::is_none")]
    pub idclient: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<StaysClienteReservaPreco>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StaysClienteReservaPreco {
    #[serde(rename = "_f_total", skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

/// Filtros repassados ao `GET /booking/clients`.
#[derive(Debug, Clone, Default)]
pub struct StaysClientesFiltros {
    pub has_reservations: Option<bool>,
    pub reservation_filter: Option<String>,
    pub reservation_from: Option<String>,
    pub reservation_to: Option<String>,
}

// --- IMÓVEIS ---

/// Título multilíngue (`_mstitle`). Mantém pt_BR e en_US nomeados e o resto
/// num mapa, já que a Stays devolve um idioma por chave.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaysTituloMultilingue {
    #[serde(rename = "pt_BR", skip_serializing_if = "Option::is_none")]
    pub pt_br: Option<String>,
    #[serde(rename = "en_US", skip_serializing_if = "Option::is_none")]
    pub en_us: Option<String>,
    #[serde(flatten)]
    pub outros: BTreeMap<String, Option<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaysEndereco {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
}

/// Anúncio retornado por `/content/listings` (lista e detalhe).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaysImovel {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_idowner", skip_serializing_if = "Option::is_none")]
    pub idowner: Option<String>,
    #[serde(rename = "_idproperty", skip_serializing_if = "Option::is_none")]
    pub idproperty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
    #[serde(rename = "_mstitle", skip_serializing_if = "Option::is_none")]
    pub mstitle: Option<StaysTituloMultilingue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<StaysEndereco>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characteristics: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
    #[serde(rename = "_i_maxGuests", skip_serializing_if = "Option::is_none")]
    pub i_max_guests: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rooms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
}

/// Variante de `/booking/listings/{id}`, com campos de lotação próprios.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaysImovelBooking {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_idproperty", skip_serializing_if = "Option::is_none")]
    pub idproperty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
    #[serde(rename = "_mstitle", skip_serializing_if = "Option::is_none")]
    pub mstitle: Option<StaysTituloMultilingue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_guests: Option<f64>,
    #[serde(rename = "_i_maxGuests", skip_serializing_if = "Option::is_none")]
    pub i_max_guests: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<StaysEndereco>,
}

/// Propriedade-mãe (`/content/properties/{id}`), usada como último recurso
/// para nome e endereço de anúncios incompletos.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaysProperty {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "_mstitle", skip_serializing_if = "Option::is_none")]
    pub mstitle: Option<StaysTituloMultilingue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<StaysEndereco>,
}

// --- RESERVAS ---

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaysReserva {
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Código curto legível (campo `id` da Stays, diferente de `_id`).
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out_time: Option<String>,
    #[serde(rename = "_idlisting", skip_serializing_if = "Option::is_none")]
    pub idlisting: Option<String>,
    #[serde(rename = "_idclient", skip_serializing_if = "Option::is_none")]
    pub idclient: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<StaysAgente>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<StaysReservaPreco>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StaysReservaStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests_details: Option<StaysHospedes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner: Option<StaysParceiro>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaysAgente {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaysParceiro {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaysReservaPreco {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(rename = "_f_total", skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosting_details: Option<StaysPrecoHospedagem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras_details: Option<StaysPrecoExtras>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaysPrecoHospedagem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fees: Option<Vec<StaysItemValor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounts: Option<Vec<StaysItemValor>>,
    #[serde(rename = "_f_nightPrice", skip_serializing_if = "Option::is_none")]
    pub night_price: Option<f64>,
    #[serde(rename = "_f_total", skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaysPrecoExtras {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fees: Option<Vec<StaysItemValor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_services: Option<Vec<StaysItemValor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounts: Option<Vec<StaysItemValor>>,
    #[serde(rename = "_f_total", skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaysItemValor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "_f_val", skip_serializing_if = "Option::is_none")]
    pub val: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaysReservaStats {
    #[serde(rename = "_f_totalPaid", skip_serializing_if = "Option::is_none")]
    pub total_paid: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StaysHospedes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adults: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infants: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TipoDataReserva {
    #[default]
    Arrival,
    Departure,
    Creation,
}

impl TipoDataReserva {
    pub fn como_str(&self) -> &'static str {
        match self {
            TipoDataReserva::Arrival => "arrival",
            TipoDataReserva::Departure => "departure",
            TipoDataReserva::Creation => "creation",
        }
    }
}

/// Parâmetros do `GET /booking/reservations`. `from`, `to` e `dateType` são
/// obrigatórios na API da Stays.
#[derive(Debug, Clone, Default)]
pub struct StaysReservasFiltros {
    pub from: String,
    pub to: String,
    pub date_type: TipoDataReserva,
    pub listing_id: Option<String>,
    pub tipo: Option<String>,
    pub cliente_id: Option<String>,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

/// Página de listagem. A Stays ora devolve um array puro, ora um envelope
/// `{data, total, page, limit}`; o cliente normaliza os dois para esta forma.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StaysPagina<T> {
    pub data: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}
