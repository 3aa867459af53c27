pub mod marker;
pub mod region;
pub mod ubicacion;

// Re-export commonly used types
pub use marker::Marker;
pub use region::{Coordinate, EdgePadding, Region};
pub use ubicacion::{RawUbicacion, Ubicacion};
