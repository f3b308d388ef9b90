// src/models/cliente.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::contrato::Contrato;
use crate::models::interacao::Interacao;

// --- CLIENTE ---

// staysClienteId é a chave secundária única que amarra o registro local ao
// registro da Stays. Os campos de agregado (totalReservas, valorTotalGasto,
// ultimaReserva) são recalculados a cada sync a partir do detalhe do cliente.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    pub id: Uuid,
    pub stays_cliente_id: Option<String>,

    pub nome: String,
    pub cpf: Option<String>,
    pub email: String,
    pub telefone: Option<String>,

    // Contatos adicionais vindos do detalhe da Stays
    pub emails: Vec<String>,
    pub telefones: Vec<String>,

    // Documentos no formato [{"tipo": "cpf", "numero": "..."}]
    pub documentos: Value,

    // Campos de propriedade exclusiva do CRM (nunca tocados pelo sync)
    pub tags: Vec<String>,
    pub score: i32,
    pub preferencias: Option<Value>,
    pub observacoes: Option<String>,

    pub origem: Option<String>,

    pub total_reservas: i32,
    pub valor_total_gasto: Decimal,
    pub ultima_reserva: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentoCliente {
    pub tipo: Option<String>,
    pub numero: Option<String>,
}

// Detalhe retornado por GET /api/clientes/{id}: o cliente com seus
// contratos e as últimas interações registradas.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClienteDetalhe {
    #[serde(flatten)]
    pub cliente: Cliente,
    pub contratos: Vec<Contrato>,
    pub interacoes: Vec<Interacao>,
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientePayload {
    pub stays_cliente_id: Option<String>,

    #[validate(length(min = 3, max = 100, message = "O nome deve ter entre 3 e 100 caracteres"))]
    #[schema(example = "Maria da Silva")]
    pub nome: String,

    #[validate(custom(
        function = validar_cpf,
        message = "CPF deve estar no formato XXX.XXX.XXX-XX ou apenas 11 dígitos"
    ))]
    #[schema(example = "123.456.789-00")]
    pub cpf: Option<String>,

    #[validate(email(message = "E-mail inválido"))]
    #[schema(example = "maria@email.com")]
    pub email: String,

    #[validate(custom(
        function = validar_telefone_br,
        message = "Telefone deve estar em formato brasileiro válido"
    ))]
    #[schema(example = "(21) 98765-4321")]
    pub telefone: String,

    #[schema(example = json!(["vip", "2024"]))]
    pub tags: Option<Vec<String>>,

    #[validate(range(min = 0, max = 100, message = "O score deve estar entre 0 e 100"))]
    pub score: Option<i32>,

    pub preferencias: Option<Value>,

    #[validate(length(max = 1000, message = "Observações devem ter no máximo 1000 caracteres"))]
    pub observacoes: Option<String>,

    pub origem: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientePayload {
    #[validate(length(min = 3, max = 100, message = "O nome deve ter entre 3 e 100 caracteres"))]
    pub nome: Option<String>,

    #[validate(custom(
        function = validar_cpf,
        message = "CPF deve estar no formato XXX.XXX.XXX-XX ou apenas 11 dígitos"
    ))]
    pub cpf: Option<String>,

    #[validate(email(message = "E-mail inválido"))]
    pub email: Option<String>,

    #[validate(custom(
        function = validar_telefone_br,
        message = "Telefone deve estar em formato brasileiro válido"
    ))]
    pub telefone: Option<String>,

    pub tags: Option<Vec<String>>,

    #[validate(range(min = 0, max = 100, message = "O score deve estar entre 0 e 100"))]
    pub score: Option<i32>,

    pub preferencias: Option<Value>,

    #[validate(length(max = 1000, message = "Observações devem ter no máximo 1000 caracteres"))]
    pub observacoes: Option<String>,

    pub origem: Option<String>,
}

// Aceita "12345678900" ou "123.456.789-00", como no cadastro original.
fn validar_cpf(cpf: &str) -> Result<(), ValidationError> {
    let bytes = cpf.as_bytes();
    let valido = match bytes.len() {
        11 => bytes.iter().all(u8::is_ascii_digit),
        14 => bytes.iter().enumerate().all(|(i, b)| match i {
            3 | 7 => *b == b'.',
            11 => *b == b'-',
            _ => b.is_ascii_digit(),
        }),
        _ => false,
    };

    if valido {
        Ok(())
    } else {
        Err(ValidationError::new("cpf_invalido"))
    }
}

// Formato brasileiro: DDD + 8 ou 9 dígitos, com +55, parênteses,
// espaços e hífen opcionais.
fn validar_telefone_br(telefone: &str) -> Result<(), ValidationError> {
    let mut resto = telefone.trim();
    if let Some(sem_ddi) = resto.strip_prefix("+55") {
        resto = sem_ddi.trim_start();
    }

    let permitidos = resto
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '(' || c == ')' || c == '-');
    let digitos = resto.chars().filter(char::is_ascii_digit).count();

    if permitidos && (digitos == 10 || digitos == 11) {
        Ok(())
    } else {
        Err(ValidationError::new("telefone_invalido"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpf_aceita_apenas_digitos_ou_pontuado() {
        assert!(validar_cpf("12345678900").is_ok());
        assert!(validar_cpf("123.456.789-00").is_ok());
        assert!(validar_cpf("1234567890").is_err());
        assert!(validar_cpf("123.456.789-0X").is_err());
        assert!(validar_cpf("123456789-00").is_err());
    }

    #[test]
    fn telefone_aceita_formatos_brasileiros() {
        assert!(validar_telefone_br("(21) 98765-4321").is_ok());
        assert!(validar_telefone_br("+55 21 98765-4321").is_ok());
        assert!(validar_telefone_br("2198765432").is_ok());
        assert!(validar_telefone_br("987654321").is_err());
        assert!(validar_telefone_br("abc").is_err());
    }
}
