// src/services/sync/identidade.rs

use std::collections::HashMap;
use std::future::Future;

use uuid::Uuid;

use crate::common::error::AppError;

/// Mapa memoizado de ids da Stays para ids locais, com escopo de uma única
/// execução de sincronização. Ausências também são memoizadas, então cada id
/// distinto custa no máximo uma consulta ao banco por execução.
#[derive(Debug, Default)]
pub struct MapaIdentidade {
    cache: HashMap<String, Option<Uuid>>,
}

impl MapaIdentidade {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve um id da Stays, consultando `buscar` apenas na primeira vez.
    /// `None` significa que o id não existe no CRM; cabe ao chamador decidir
    /// o que fazer (na sincronização de reservas, vira motivo de skip).
    pub async fn resolver<F, Fut>(
        &mut self,
        stays_id: &str,
        buscar: F,
    ) -> Result<Option<Uuid>, AppError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<Option<Uuid>, AppError>>,
    {
        if let Some(conhecido) = self.cache.get(stays_id) {
            return Ok(*conhecido);
        }

        let resolvido = buscar(stays_id.to_string()).await?;
        self.cache.insert(stays_id.to_string(), resolvido);
        Ok(resolvido)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn consulta_uma_unica_vez_por_id() {
        let mut mapa = MapaIdentidade::new();
        let chamadas = AtomicU32::new(0);
        let local_id = Uuid::new_v4();

        for _ in 0..3 {
            let resolvido = mapa
                .resolver("st-cli-1", |_| {
                    chamadas.fetch_add(1, Ordering::SeqCst);
                    async move { Ok(Some(local_id)) }
                })
                .await
                .unwrap();
            assert_eq!(resolvido, Some(local_id));
        }

        assert_eq!(chamadas.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn memoiza_tambem_as_ausencias() {
        let mut mapa = MapaIdentidade::new();

        let primeiro = mapa
            .resolver("st-cli-2", |_| async { Ok(None) })
            .await
            .unwrap();
        assert_eq!(primeiro, None);

        let segundo = mapa
            .resolver("st-cli-2", |_| async {
                panic!("id ausente não deveria ser consultado de novo")
            })
            .await
            .unwrap();
        assert_eq!(segundo, None);
    }
}
