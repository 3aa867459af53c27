use serde_json::Value;
use tracing::{debug, warn};

use crate::models::RawUbicacion;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to parse response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Read-only client for the data service's location list
#[derive(Debug, Clone)]
pub struct UbicacionesClient {
    client: reqwest::Client,
    base_url: String,
}

impl UbicacionesClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("map-screen/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn ubicaciones_url(&self) -> String {
        format!("{}/ubicaciones", self.base_url.trim_end_matches('/'))
    }

    /// Fetch every location record as the service returns it.
    ///
    /// Elements are decoded one at a time; one that is not a record at all
    /// is skipped without losing the rest.
    pub async fn fetch_ubicaciones(&self) -> Result<Vec<RawUbicacion>, FetchError> {
        let url = self.ubicaciones_url();
        debug!("Fetching ubicaciones from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url,
                status: response.status(),
            });
        }

        let elements = response
            .json::<Vec<Value>>()
            .await
            .map_err(|source| FetchError::Decode { url, source })?;

        Ok(records_from_elements(elements))
    }
}

fn records_from_elements(elements: Vec<Value>) -> Vec<RawUbicacion> {
    elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| match serde_json::from_value(element) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping ubicacion {}: {}", index, e);
                None
            }
        })
        .collect()
}
