use serde::{Deserialize, Serialize};

use super::{Coordinate, Ubicacion};

/// One pin on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub key: Option<String>,
    pub coordinate: Coordinate,
    pub title: Option<String>,
    pub description: String,
}

impl From<&Ubicacion> for Marker {
    fn from(ubicacion: &Ubicacion) -> Self {
        Self {
            key: ubicacion.id.clone(),
            coordinate: ubicacion.coordinate(),
            title: ubicacion.lugar.clone(),
            description: format!("Lat: {}, Lon: {}", ubicacion.latitud, ubicacion.longitud),
        }
    }
}
