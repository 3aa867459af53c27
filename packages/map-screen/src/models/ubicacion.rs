use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::Coordinate;

/// A location record as the data service sends it.
///
/// Coordinates are kept as untyped JSON because the store may hold them as
/// text. `_id` and `Lugar` accept scalars of any type and render them as
/// text. Any keys besides the known ones are preserved in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawUbicacion {
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(rename = "Latitud", default, skip_serializing_if = "Option::is_none")]
    pub latitud: Option<Value>,
    #[serde(rename = "Longitud", default, skip_serializing_if = "Option::is_none")]
    pub longitud: Option<Value>,
    #[serde(
        rename = "Lugar",
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub lugar: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// A location whose coordinates parsed to finite numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ubicacion {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "Latitud")]
    pub latitud: f64,
    #[serde(rename = "Longitud")]
    pub longitud: f64,
    #[serde(rename = "Lugar", default, skip_serializing_if = "Option::is_none")]
    pub lugar: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Ubicacion {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitud, self.longitud)
    }
}

impl From<Ubicacion> for RawUbicacion {
    fn from(ubicacion: Ubicacion) -> Self {
        Self {
            id: ubicacion.id,
            latitud: Some(Value::from(ubicacion.latitud)),
            longitud: Some(Value::from(ubicacion.longitud)),
            lugar: ubicacion.lugar,
            extra: ubicacion.extra,
        }
    }
}
