use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A coordinate exactly as the store holds it.
///
/// Locations are written outside this service, so a latitude or longitude may
/// have been saved as text, or as something else entirely. The service passes
/// every form through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCoordinate {
    Number(f64),
    Text(String),
    Other(Value),
}

impl From<f64> for RawCoordinate {
    fn from(value: f64) -> Self {
        RawCoordinate::Number(value)
    }
}

impl From<&str> for RawCoordinate {
    fn from(value: &str) -> Self {
        RawCoordinate::Text(value.to_string())
    }
}

/// A stored location record (read-only through this service)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ubicacion {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "Latitud", default, skip_serializing_if = "Option::is_none")]
    pub latitud: Option<RawCoordinate>,
    #[serde(rename = "Longitud", default, skip_serializing_if = "Option::is_none")]
    pub longitud: Option<RawCoordinate>,
    #[serde(rename = "Lugar", default, skip_serializing_if = "Option::is_none")]
    pub lugar: Option<Value>,
    /// Any other stored keys, such as `__v`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Ubicacion {
    /// Create a location with the given coordinates and place name
    pub fn new(
        id: impl Into<String>,
        latitud: impl Into<RawCoordinate>,
        longitud: impl Into<RawCoordinate>,
        lugar: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            latitud: Some(latitud.into()),
            longitud: Some(longitud.into()),
            lugar: Some(Value::String(lugar.into())),
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_coordinates_serialize_as_numbers() {
        let ubicacion = Ubicacion::new("a1", 10.5, -74.25, "Plaza");
        assert_eq!(
            serde_json::to_value(&ubicacion).unwrap(),
            json!({ "_id": "a1", "Latitud": 10.5, "Longitud": -74.25, "Lugar": "Plaza" })
        );
    }

    #[test]
    fn test_text_coordinates_pass_through() {
        let ubicacion = Ubicacion::new("a2", "10.5", "bad", "Mercado");
        assert_eq!(
            serde_json::to_value(&ubicacion).unwrap(),
            json!({ "_id": "a2", "Latitud": "10.5", "Longitud": "bad", "Lugar": "Mercado" })
        );
    }

    #[test]
    fn test_missing_fields_are_omitted() {
        let ubicacion = Ubicacion {
            id: "a3".to_string(),
            latitud: None,
            longitud: Some(RawCoordinate::Number(3.0)),
            lugar: None,
            extra: Map::new(),
        };
        assert_eq!(
            serde_json::to_value(&ubicacion).unwrap(),
            json!({ "_id": "a3", "Longitud": 3.0 })
        );
    }

    #[test]
    fn test_unusual_values_and_extra_keys_pass_through() {
        let stored = json!({
            "_id": "a5",
            "Latitud": true,
            "Longitud": { "$numberDecimal": "20.25" },
            "Lugar": 42,
            "__v": 0
        });

        let ubicacion: Ubicacion = serde_json::from_value(stored.clone()).unwrap();
        assert_eq!(ubicacion.latitud, Some(RawCoordinate::Other(json!(true))));
        assert_eq!(ubicacion.lugar, Some(json!(42)));
        assert_eq!(ubicacion.extra.get("__v"), Some(&json!(0)));
        assert_eq!(serde_json::to_value(&ubicacion).unwrap(), stored);
    }

    #[test]
    fn test_deserialize_mixed_coordinates() {
        let ubicacion: Ubicacion = serde_json::from_value(json!({
            "_id": "a4",
            "Latitud": 4,
            "Longitud": "5.5"
        }))
        .unwrap();
        assert_eq!(ubicacion.latitud, Some(RawCoordinate::Number(4.0)));
        assert_eq!(ubicacion.longitud, Some(RawCoordinate::Text("5.5".to_string())));
        assert_eq!(ubicacion.lugar, None);
    }
}
