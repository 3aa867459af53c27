use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    options::ClientOptions,
    Client, Collection, Database,
};
use serde_json::Map;
use tracing::{debug, error, info, warn};

use super::store::{DocumentStore, StoreError};
use crate::models::{NuevoUsuario, RawCoordinate, Ubicacion, Usuario};

pub const USUARIOS_COLLECTION: &str = "Usuarios";
pub const UBICACIONES_COLLECTION: &str = "Ubicaciones";

/// Database used when neither the connection string nor the config names one
const DEFAULT_DATABASE: &str = "test";

/// Applied unless the connection string sets `serverSelectionTimeoutMS`
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// MongoDB-backed document store
#[derive(Debug, Clone)]
pub struct MongoStore {
    usuarios: Collection<Document>,
    ubicaciones: Collection<Document>,
}

impl MongoStore {
    /// Build a client from the connection string and select the database.
    ///
    /// An unreachable server is logged but not fatal: the driver connects
    /// lazily and each request reports its own failure.
    pub async fn connect(uri: &str, database: Option<&str>) -> Result<Self, StoreError> {
        let options = client_options(uri).await?;
        let client =
            Client::with_options(options).map_err(|e| StoreError::connection(e.to_string()))?;

        let db = match database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };

        match db.run_command(doc! { "ping": 1 }).await {
            Ok(_) => info!("Connected to MongoDB database {}", db.name()),
            Err(e) => error!("Failed to reach MongoDB database {}: {}", db.name(), e),
        }

        Ok(Self::from_database(&db))
    }

    pub fn from_database(db: &Database) -> Self {
        Self {
            usuarios: db.collection(USUARIOS_COLLECTION),
            ubicaciones: db.collection(UBICACIONES_COLLECTION),
        }
    }

    async fn find_all(collection: &Collection<Document>) -> Result<Vec<Document>, StoreError> {
        let cursor = collection
            .find(doc! {})
            .await
            .map_err(|e| StoreError::query(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::query(e.to_string()))
    }
}

async fn client_options(uri: &str) -> Result<ClientOptions, StoreError> {
    let mut options = ClientOptions::parse(uri)
        .await
        .map_err(|e| StoreError::connection(e.to_string()))?;

    if options.server_selection_timeout.is_none() {
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
    }
    Ok(options)
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn list_usuarios(&self) -> Result<Vec<Usuario>, StoreError> {
        let documents = Self::find_all(&self.usuarios).await?;
        debug!("Read {} documents from {}", documents.len(), USUARIOS_COLLECTION);
        Ok(usuarios_from_documents(&documents))
    }

    async fn list_ubicaciones(&self) -> Result<Vec<Ubicacion>, StoreError> {
        let documents = Self::find_all(&self.ubicaciones).await?;
        debug!("Read {} documents from {}", documents.len(), UBICACIONES_COLLECTION);
        Ok(documents.into_iter().map(ubicacion_from_document).collect())
    }

    async fn insert_usuario(&self, nuevo: NuevoUsuario) -> Result<Usuario, StoreError> {
        let id = ObjectId::new();
        let document = doc! {
            "_id": id,
            "User_id": nuevo.user_id,
            "Nombre": nuevo.nombre.as_str(),
            "Telefono": nuevo.telefono.as_str(),
            "Correo": nuevo.correo.as_str(),
        };

        self.usuarios
            .insert_one(document)
            .await
            .map_err(|e| StoreError::query(e.to_string()))?;

        Ok(nuevo.into_usuario(id.to_hex()))
    }
}

fn document_id(document: &Document) -> String {
    match document.get("_id") {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Documents written outside this service may not fit the user shape.
/// Those are skipped one by one instead of failing the whole listing.
fn usuarios_from_documents(documents: &[Document]) -> Vec<Usuario> {
    documents
        .iter()
        .filter_map(|document| match usuario_from_document(document) {
            Ok(usuario) => Some(usuario),
            Err(e) => {
                warn!("Skipping stored usuario: {}", e);
                None
            }
        })
        .collect()
}

fn usuario_from_document(document: &Document) -> Result<Usuario, StoreError> {
    let id = document_id(document);

    let user_id = match document.get("User_id") {
        Some(Bson::Int32(n)) => Some(i64::from(*n)),
        Some(Bson::Int64(n)) => Some(*n),
        Some(Bson::Double(f)) if f.fract() == 0.0 => Some(*f as i64),
        Some(Bson::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| {
        StoreError::decode(format!(
            "Usuario {} has an invalid User_id: {:?}",
            id,
            document.get("User_id")
        ))
    })?;

    let text = |key: &str| -> Result<String, StoreError> {
        match document.get(key) {
            Some(Bson::String(s)) => Ok(s.clone()),
            Some(Bson::Int32(n)) => Ok(n.to_string()),
            Some(Bson::Int64(n)) => Ok(n.to_string()),
            Some(Bson::Double(f)) => Ok(f.to_string()),
            other => Err(StoreError::decode(format!(
                "Usuario {} field {}: {:?}",
                id, key, other
            ))),
        }
    };

    Ok(Usuario {
        user_id,
        nombre: text("Nombre")?,
        telefono: text("Telefono")?,
        correo: text("Correo")?,
        id: id.clone(),
    })
}

fn coordinate_from_bson(value: Bson) -> RawCoordinate {
    match value {
        Bson::Double(f) => RawCoordinate::Number(f),
        Bson::Int32(n) => RawCoordinate::Number(f64::from(n)),
        Bson::Int64(n) => RawCoordinate::Number(n as f64),
        Bson::String(s) => RawCoordinate::Text(s),
        other => RawCoordinate::Other(other.into_relaxed_extjson()),
    }
}

/// Every stored key is carried through; nothing is validated here
fn ubicacion_from_document(document: Document) -> Ubicacion {
    let id = document_id(&document);
    let mut ubicacion = Ubicacion {
        id,
        latitud: None,
        longitud: None,
        lugar: None,
        extra: Map::new(),
    };

    for (key, value) in document {
        match key.as_str() {
            "_id" => {}
            "Latitud" => ubicacion.latitud = Some(coordinate_from_bson(value)),
            "Longitud" => ubicacion.longitud = Some(coordinate_from_bson(value)),
            "Lugar" => ubicacion.lugar = Some(value.into_relaxed_extjson()),
            _ => {
                ubicacion.extra.insert(key, value.into_relaxed_extjson());
            }
        }
    }

    ubicacion
}
