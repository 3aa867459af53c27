//! Store abstraction handed to the HTTP handlers at router construction.
use async_trait::async_trait;

use crate::models::{NuevoUsuario, Ubicacion, Usuario};

/// Failures raised by document store adapters.
///
/// The display form is the raw underlying message, which is what the API
/// reports back to callers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("{message}")]
    Connection { message: String },
    /// A read or write was rejected by the store.
    #[error("{message}")]
    Query { message: String },
    /// A stored document could not be mapped onto a record.
    #[error("{message}")]
    Decode { message: String },
}

impl StoreError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Collection access for `Usuarios` and `Ubicaciones`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every stored user, in store order.
    async fn list_usuarios(&self) -> Result<Vec<Usuario>, StoreError>;

    /// Every stored location, unfiltered and uncoerced.
    async fn list_ubicaciones(&self) -> Result<Vec<Ubicacion>, StoreError>;

    /// Persist a new user and return it with its generated identifier.
    async fn insert_usuario(&self, nuevo: NuevoUsuario) -> Result<Usuario, StoreError>;
}
