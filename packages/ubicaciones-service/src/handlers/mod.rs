pub mod ubicaciones;
pub mod usuarios;

pub use ubicaciones::list_ubicaciones;
pub use usuarios::{create_usuario, list_usuarios};

pub const LIVENESS_MESSAGE: &str = "¡Servidor funcionando correctamente!";

/// Liveness check; answers as long as the process is up
pub async fn root() -> &'static str {
    LIVENESS_MESSAGE
}
