// src/stays/client.rs

use std::time::Duration;
use std::{env, fs};

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::common::error::AppError;
use crate::services::sync::StaysGateway;

use super::types::{
    StaysCliente, StaysClienteDetalhado, StaysClientesFiltros, StaysImovel, StaysImovelBooking,
    StaysPagina, StaysProperty, StaysReserva, StaysReservasFiltros,
};

const URL_PADRAO: &str = "https://brazeiro.stays.net/external/v1";
const TIMEOUT_REQUISICAO: Duration = Duration::from_secs(30);

/// Configuração da integração, carregada do ambiente na inicialização.
#[derive(Debug, Clone)]
pub struct StaysConfig {
    pub api_url: String,
    pub login: String,
    pub senha: String,
}

impl StaysConfig {
    /// Lê STAYS_API_URL, STAYS_LOGIN e STAYS_PASSWORD. As credenciais aceitam
    /// a indireção `<VAR>_FILE` (convenção de secrets do Docker). Falha aqui
    /// derruba a inicialização, antes de qualquer sincronização rodar.
    pub fn carregar() -> Result<Self, AppError> {
        let api_url = normalizar_api_url(env::var("STAYS_API_URL").ok().as_deref())
            .unwrap_or_else(|| URL_PADRAO.to_string());

        let login = valor_secreto("STAYS_LOGIN")?;
        let senha = valor_secreto("STAYS_PASSWORD")?;

        if login.is_empty() || senha.is_empty() {
            return Err(AppError::StaysConfig(
                "STAYS_LOGIN e STAYS_PASSWORD devem ser configurados no .env".to_string(),
            ));
        }

        Ok(Self {
            api_url,
            login,
            senha,
        })
    }
}

// Normaliza a URL para o caminho /external/v1, sem query, fragmento ou barra
// final. URL ilegível cai na padrão do serviço, com aviso no log.
fn normalizar_api_url(valor: Option<&str>) -> Option<String> {
    let bruto = valor.map(str::trim).filter(|v| !v.is_empty())?;

    match Url::parse(bruto) {
        Ok(mut url) => {
            url.set_path("/external/v1");
            url.set_query(None);
            url.set_fragment(None);
            Some(url.to_string().trim_end_matches('/').to_string())
        }
        Err(_) => {
            tracing::warn!(
                "STAYS_API_URL inválida ({}). Usando URL padrão do serviço.",
                bruto
            );
            None
        }
    }
}

fn valor_secreto(chave: &str) -> Result<String, AppError> {
    if let Ok(valor) = env::var(chave) {
        if !valor.is_empty() {
            return Ok(valor);
        }
    }

    let chave_arquivo = format!("{}_FILE", chave);
    if let Ok(caminho) = env::var(&chave_arquivo) {
        if !caminho.is_empty() {
            return fs::read_to_string(&caminho)
                .map(|conteudo| conteudo.trim().to_string())
                .map_err(|_| {
                    AppError::StaysConfig(format!(
                        "Não foi possível ler o secret {}: {}",
                        chave_arquivo, caminho
                    ))
                });
        }
    }

    Ok(String::new())
}

// A Stays ora devolve listas como array puro, ora como envelope com
// metadados de paginação.
#[derive(Deserialize)]
#[serde(untagged)]
enum PayloadPaginado<T> {
    Envelope(StaysPagina<T>),
    Lista(Vec<T>),
}

/// Cliente HTTP da API externa da Stays. Todas as chamadas levam Basic auth.
pub struct StaysClient {
    http: Client,
    api_url: String,
    login: String,
    senha: String,
}

impl StaysClient {
    pub fn new(config: StaysConfig) -> Self {
        let http = Client::builder()
            .timeout(TIMEOUT_REQUISICAO)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            api_url: config.api_url,
            login: config.login,
            senha: config.senha,
        }
    }

    fn get(&self, caminho: &str) -> reqwest::RequestBuilder {
        self.http
            .get(format!("{}{}", self.api_url, caminho))
            .basic_auth(&self.login, Some(&self.senha))
    }

    async fn pagina<T: DeserializeOwned>(
        &self,
        caminho: &str,
        params: Vec<(&str, String)>,
        skip: u32,
        limit: u32,
        descricao_erro: &str,
    ) -> Result<StaysPagina<T>, AppError> {
        let resposta = self.get(caminho).query(&params).send().await?;

        if !resposta.status().is_success() {
            return Err(AppError::StaysApi {
                status: resposta.status().as_u16(),
                mensagem: format!("{}: {}", descricao_erro, resposta.status()),
            });
        }

        let payload = resposta.json::<PayloadPaginado<T>>().await?;

        Ok(match payload {
            PayloadPaginado::Envelope(pagina) => pagina,
            // Array puro: sintetiza os metadados que o envelope traria.
            PayloadPaginado::Lista(itens) => {
                let total = itens.len() as i64;
                StaysPagina {
                    data: itens,
                    total: Some(total),
                    page: Some((skip / limit.max(1)) as i64 + 1),
                    limit: Some(limit as i64),
                }
            }
        })
    }

    async fn detalhe<T: DeserializeOwned>(
        &self,
        caminho: &str,
        descricao_erro: &str,
    ) -> Result<Option<T>, AppError> {
        let resposta = self.get(caminho).send().await?;

        if resposta.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !resposta.status().is_success() {
            return Err(AppError::StaysApi {
                status: resposta.status().as_u16(),
                mensagem: format!("{}: {}", descricao_erro, resposta.status()),
            });
        }

        Ok(Some(resposta.json::<T>().await?))
    }

    pub async fn listar_clientes(
        &self,
        skip: u32,
        limit: u32,
    ) -> Result<StaysPagina<StaysCliente>, AppError> {
        tracing::debug!("Buscando clientes da Stays skip={}, limit={}", skip, limit);

        let params = vec![("skip", skip.to_string()), ("limit", limit.to_string())];
        self.pagina(
            "/booking/clients",
            params,
            skip,
            limit,
            "Erro ao paginar clientes da Stays",
        )
        .await
    }

    /// Listagem com os filtros de reserva aceitos pelo endpoint de clientes.
    /// Usada pelo passthrough do frontend, não pela sincronização.
    pub async fn listar_clientes_com_filtros(
        &self,
        skip: u32,
        limit: u32,
        filtros: &StaysClientesFiltros,
    ) -> Result<StaysPagina<StaysCliente>, AppError> {
        let mut params = vec![("skip", skip.to_string()), ("limit", limit.to_string())];

        if let Some(valor) = filtros.has_reservations {
            params.push(("hasReservations", valor.to_string()));
        }
        if let Some(filtro) = &filtros.reservation_filter {
            params.push(("reservationFilter", filtro.clone()));
        }
        if let Some(de) = &filtros.reservation_from {
            params.push(("reservationFrom", de.clone()));
        }
        if let Some(ate) = &filtros.reservation_to {
            params.push(("reservationTo", ate.clone()));
        }

        self.pagina(
            "/booking/clients",
            params,
            skip,
            limit,
            "Erro ao buscar clientes da Stays",
        )
        .await
    }

    pub async fn buscar_cliente(
        &self,
        id: &str,
    ) -> Result<Option<StaysClienteDetalhado>, AppError> {
        self.detalhe(
            &format!("/booking/clients/{}", id),
            "Erro ao buscar cliente da Stays",
        )
        .await
    }

    pub async fn listar_imoveis(
        &self,
        skip: u32,
        limit: u32,
    ) -> Result<StaysPagina<StaysImovel>, AppError> {
        tracing::debug!("Buscando imóveis da Stays skip={}, limit={}", skip, limit);

        let params = vec![("skip", skip.to_string()), ("limit", limit.to_string())];
        self.pagina(
            "/content/listings",
            params,
            skip,
            limit,
            "Erro ao paginar imóveis da Stays",
        )
        .await
    }

    pub async fn buscar_imovel(&self, id: &str) -> Result<Option<StaysImovel>, AppError> {
        self.detalhe(
            &format!("/content/listings/{}", id),
            &format!("Erro ao buscar imóvel {} na Stays", id),
        )
        .await
    }

    pub async fn buscar_imovel_booking(
        &self,
        id: &str,
    ) -> Result<Option<StaysImovelBooking>, AppError> {
        self.detalhe(
            &format!("/booking/listings/{}", id),
            &format!("Erro ao buscar informações de booking do imóvel {}", id),
        )
        .await
    }

    pub async fn buscar_property(&self, id: &str) -> Result<Option<StaysProperty>, AppError> {
        self.detalhe(
            &format!("/content/properties/{}", id),
            &format!("Erro ao buscar propriedade {} na Stays", id),
        )
        .await
    }

    /// O contrato das reservas é um array puro. Envelope, objeto ou corpo
    /// ilegível contam como resposta inválida do upstream (bad gateway).
    pub async fn listar_reservas(
        &self,
        filtros: &StaysReservasFiltros,
    ) -> Result<Vec<StaysReserva>, AppError> {
        if filtros.from.trim().is_empty() || filtros.to.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Parâmetros from, to e dateType são obrigatórios".to_string(),
            ));
        }

        let mut params: Vec<(&str, String)> = vec![
            ("from", filtros.from.clone()),
            ("to", filtros.to.clone()),
            ("dateType", filtros.date_type.como_str().to_string()),
        ];

        if let Some(listing) = &filtros.listing_id {
            params.push(("listingId", listing.clone()));
        }
        if let Some(tipo) = &filtros.tipo {
            params.push(("type", tipo.clone()));
        }
        if let Some(cliente) = &filtros.cliente_id {
            params.push(("_idclient", cliente.clone()));
        }
        if let Some(skip) = filtros.skip {
            params.push(("skip", skip.to_string()));
        }
        if let Some(limit) = filtros.limit {
            params.push(("limit", limit.to_string()));
        }

        let resposta = self
            .get("/booking/reservations")
            .query(&params)
            .send()
            .await?;

        if !resposta.status().is_success() {
            return Err(AppError::StaysApi {
                status: resposta.status().as_u16(),
                mensagem: format!("Erro ao buscar reservas da Stays: {}", resposta.status()),
            });
        }

        let corpo = resposta.text().await?;
        let payload: serde_json::Value = serde_json::from_str(&corpo).map_err(|_| {
            AppError::StaysPayloadInvalido(
                "Resposta inválida da Stays ao listar reservas".to_string(),
            )
        })?;

        if !payload.is_array() {
            return Err(AppError::StaysPayloadInvalido(
                "Resposta inválida da Stays ao listar reservas".to_string(),
            ));
        }

        serde_json::from_value(payload).map_err(|e| {
            AppError::StaysPayloadInvalido(format!(
                "Resposta inválida da Stays ao listar reservas: {}",
                e
            ))
        })
    }
}

#[async_trait]
impl StaysGateway for StaysClient {
    async fn listar_clientes(
        &self,
        skip: u32,
        limit: u32,
    ) -> Result<StaysPagina<StaysCliente>, AppError> {
        StaysClient::listar_clientes(self, skip, limit).await
    }

    async fn buscar_cliente(&self, id: &str) -> Result<Option<StaysClienteDetalhado>, AppError> {
        StaysClient::buscar_cliente(self, id).await
    }

    async fn listar_imoveis(
        &self,
        skip: u32,
        limit: u32,
    ) -> Result<StaysPagina<StaysImovel>, AppError> {
        StaysClient::listar_imoveis(self, skip, limit).await
    }

    async fn buscar_imovel(&self, id: &str) -> Result<Option<StaysImovel>, AppError> {
        StaysClient::buscar_imovel(self, id).await
    }

    async fn buscar_imovel_booking(
        &self,
        id: &str,
    ) -> Result<Option<StaysImovelBooking>, AppError> {
        StaysClient::buscar_imovel_booking(self, id).await
    }

    async fn buscar_property(&self, id: &str) -> Result<Option<StaysProperty>, AppError> {
        StaysClient::buscar_property(self, id).await
    }

    async fn listar_reservas(
        &self,
        filtros: &StaysReservasFiltros,
    ) -> Result<Vec<StaysReserva>, AppError> {
        StaysClient::listar_reservas(self, filtros).await
    }
}
