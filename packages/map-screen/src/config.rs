use crate::models::EdgePadding;

/// Data service address baked into the app build
pub const DEFAULT_API_BASE_URL: &str = "http://192.168.1.32:5000";

pub const LOADING_MESSAGE: &str = "Cargando ubicación...";
pub const PERMISSION_DENIED_MESSAGE: &str = "Permiso para acceder a la ubicación fue denegado";

const DEFAULT_LATITUDE_DELTA: f64 = 0.0922;
const DEFAULT_LONGITUDE_DELTA: f64 = 0.0421;
const DEFAULT_EDGE_INSET: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenConfig {
    pub api_base_url: String,
    // Zoom applied around the device position
    pub latitude_delta: f64,
    pub longitude_delta: f64,
    pub edge_padding: EdgePadding,
    pub animated_fit: bool,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            latitude_delta: DEFAULT_LATITUDE_DELTA,
            longitude_delta: DEFAULT_LONGITUDE_DELTA,
            edge_padding: EdgePadding::uniform(DEFAULT_EDGE_INSET),
            animated_fit: true,
        }
    }
}

impl ScreenConfig {
    /// Default settings pointed at another data service
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }
}
