use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::store::{DocumentStore, StoreError};
use crate::models::{NuevoUsuario, Ubicacion, Usuario};

/// In-process document store.
/// Identifiers are generated the same way the MongoDB store generates them.
#[derive(Debug, Default)]
pub struct MemoryStore {
    usuarios: RwLock<Vec<Usuario>>,
    ubicaciones: RwLock<Vec<Ubicacion>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with locations, since the API has no write path for them
    pub fn with_ubicaciones(ubicaciones: Vec<Ubicacion>) -> Self {
        Self {
            usuarios: RwLock::new(Vec::new()),
            ubicaciones: RwLock::new(ubicaciones),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_usuarios(&self) -> Result<Vec<Usuario>, StoreError> {
        let usuarios = self.usuarios.read().await;
        Ok(usuarios.clone())
    }

    async fn list_ubicaciones(&self) -> Result<Vec<Ubicacion>, StoreError> {
        let ubicaciones = self.ubicaciones.read().await;
        Ok(ubicaciones.clone())
    }

    async fn insert_usuario(&self, nuevo: NuevoUsuario) -> Result<Usuario, StoreError> {
        let usuario = nuevo.into_usuario(ObjectId::new().to_hex());
        let mut usuarios = self.usuarios.write().await;
        usuarios.push(usuario.clone());
        Ok(usuario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nuevo(user_id: i64, nombre: &str) -> NuevoUsuario {
        NuevoUsuario {
            user_id,
            nombre: nombre.to_string(),
            telefono: "555".to_string(),
            correo: format!("{}@example.com", nombre),
        }
    }

    #[tokio::test]
    async fn test_insert_generates_distinct_ids() {
        let store = MemoryStore::new();
        let first = store.insert_usuario(nuevo(1, "ana")).await.unwrap();
        let second = store.insert_usuario(nuevo(1, "ana")).await.unwrap();

        assert_eq!(first.id.len(), 24);
        assert_ne!(first.id, second.id);
        assert_eq!(store.list_usuarios().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_seeded_ubicaciones_returned_in_order() {
        let seeded = vec![
            Ubicacion::new("a", 1.0, 2.0, "Uno"),
            Ubicacion::new("b", "x", "y", "Dos"),
        ];
        let store = MemoryStore::with_ubicaciones(seeded.clone());
        assert_eq!(store.list_ubicaciones().await.unwrap(), seeded);
    }
}
