pub mod ubicacion;
pub mod usuario;

// Re-export commonly used types
pub use ubicacion::{RawCoordinate, Ubicacion};
pub use usuario::{FieldIssue, NuevoUsuario, Usuario, ValidationError};
