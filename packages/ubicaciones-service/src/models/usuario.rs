use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A stored user record as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usuario {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "User_id")]
    pub user_id: i64,
    #[serde(rename = "Nombre")]
    pub nombre: String,
    #[serde(rename = "Telefono")]
    pub telefono: String,
    #[serde(rename = "Correo")]
    pub correo: String,
}

/// A validated create-user payload, not yet persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NuevoUsuario {
    pub user_id: i64,
    pub nombre: String,
    pub telefono: String,
    pub correo: String,
}

/// Largest integer a JSON number can carry without losing precision (2^53 - 1)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl NuevoUsuario {
    /// Validate and cast an arbitrary JSON body into a create-user payload.
    ///
    /// Every field is checked so that one error lists all offending paths.
    /// Unknown keys are ignored.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let mut issues = Vec::new();

        let user_id = field(body, "User_id", &mut issues, cast_integer);
        let nombre = field(body, "Nombre", &mut issues, cast_string);
        let telefono = field(body, "Telefono", &mut issues, cast_string);
        let correo = field(body, "Correo", &mut issues, cast_string);

        match (user_id, nombre, telefono, correo) {
            (Some(user_id), Some(nombre), Some(telefono), Some(correo)) if issues.is_empty() => {
                Ok(Self {
                    user_id,
                    nombre,
                    telefono,
                    correo,
                })
            }
            _ => Err(ValidationError { issues }),
        }
    }

    /// Attach the store-generated identifier
    pub fn into_usuario(self, id: String) -> Usuario {
        Usuario {
            id,
            user_id: self.user_id,
            nombre: self.nombre,
            telefono: self.telefono,
            correo: self.correo,
        }
    }
}

fn field<T>(
    body: &Value,
    path: &'static str,
    issues: &mut Vec<FieldIssue>,
    cast: fn(&Value) -> Option<T>,
) -> Option<T> {
    let value = match body.get(path) {
        None | Some(Value::Null) => {
            issues.push(FieldIssue::required(path));
            return None;
        }
        Some(Value::String(s)) if s.is_empty() => {
            issues.push(FieldIssue::required(path));
            return None;
        }
        Some(value) => value,
    };

    let cast_value = cast(value);
    if cast_value.is_none() {
        issues.push(FieldIssue::cast(path, value));
    }
    cast_value
}

fn cast_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn cast_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}

/// One rejected field of a create-user payload
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    pub path: &'static str,
    pub reason: String,
}

impl FieldIssue {
    fn required(path: &'static str) -> Self {
        Self {
            path,
            reason: format!("Path `{}` is required.", path),
        }
    }

    fn cast(path: &'static str, value: &Value) -> Self {
        let target = if path == "User_id" { "Number" } else { "string" };
        let shown = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        Self {
            path,
            reason: format!(
                "Cast to {} failed for value \"{}\" (type {}) at path \"{}\"",
                target,
                shown,
                json_type_name(value),
                path
            ),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Usuario validation failed: {}", join_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
