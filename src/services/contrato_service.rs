// src/services/contrato_service.rs

use uuid::Uuid;

use crate::common::error::AppError;
use crate::db::{ClienteRepository, ContratoRepository};
use crate::models::contrato::{
    transicao_permitida, Contrato, CreateContratoPayload, StatusContrato, TipoContrato,
    UpdateContratoPayload,
};

#[derive(Clone)]
pub struct ContratoService {
    repo: ContratoRepository,
    clientes: ClienteRepository,
}

impl ContratoService {
    pub fn new(repo: ContratoRepository, clientes: ClienteRepository) -> Self {
        Self { repo, clientes }
    }

    pub async fn criar(&self, payload: &CreateContratoPayload) -> Result<Contrato, AppError> {
        if self
            .clientes
            .buscar_por_id(payload.cliente_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!(
                "Cliente {} não encontrado",
                payload.cliente_id
            )));
        }
        self.repo.criar(payload).await
    }

    pub async fn listar(
        &self,
        tipo: Option<TipoContrato>,
        status: Option<StatusContrato>,
    ) -> Result<Vec<Contrato>, AppError> {
        self.repo.listar(tipo, status).await
    }

    pub async fn buscar(&self, id: Uuid) -> Result<Contrato, AppError> {
        self.repo
            .buscar_por_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Contrato {} não encontrado", id)))
    }

    pub async fn atualizar(
        &self,
        id: Uuid,
        payload: &UpdateContratoPayload,
    ) -> Result<Contrato, AppError> {
        let existente = self.buscar(id).await?;

        let mut versao_forcada = None;
        if let Some(para) = payload.status {
            versao_forcada = validar_transicao(existente.status, para, existente.versao)?;
        }

        self.repo
            .atualizar(id, payload, versao_forcada)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Contrato {} não encontrado", id)))
    }

    pub async fn deletar(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.deletar(id).await? {
            return Err(AppError::NotFound(format!(
                "Contrato {} não encontrado",
                id
            )));
        }
        Ok(())
    }
}

// Valida a mudança de status e decide a versão resultante. Repetir o mesmo
// status é um no-op permitido; regenerar um contrato já gerado
// (GERADO -> GERADO) incrementa a versão do documento.
fn validar_transicao(
    de: StatusContrato,
    para: StatusContrato,
    versao_atual: i32,
) -> Result<Option<i32>, AppError> {
    if de != para && !transicao_permitida(de, para) {
        return Err(AppError::TransicaoContratoInvalida { de, para });
    }

    if de == StatusContrato::Gerado && para == StatusContrato::Gerado {
        Ok(Some(versao_atual + 1))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use StatusContrato::*;

    #[test]
    fn regenerar_contrato_gerado_incrementa_a_versao() {
        assert_eq!(validar_transicao(Gerado, Gerado, 3).unwrap(), Some(4));
        assert_eq!(validar_transicao(Rascunho, Gerado, 1).unwrap(), None);
    }

    #[test]
    fn repetir_o_mesmo_status_nao_muda_a_versao() {
        assert_eq!(validar_transicao(Rascunho, Rascunho, 1).unwrap(), None);
        assert_eq!(validar_transicao(Assinado, Assinado, 2).unwrap(), None);
    }

    #[test]
    fn transicao_proibida_vira_erro_de_conflito() {
        let erro = validar_transicao(Assinado, Cancelado, 1).unwrap_err();
        assert!(matches!(
            erro,
            AppError::TransicaoContratoInvalida {
                de: Assinado,
                para: Cancelado
            }
        ));
    }
}
