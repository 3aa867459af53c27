use async_trait::async_trait;

use crate::models::Coordinate;

/// Outcome of a foreground location permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum DeviceError {
    #[error("Current position unavailable: {0}")]
    PositionUnavailable(String),
}

/// Device permission and positioning subsystem
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn request_foreground_permissions(&self) -> PermissionStatus;

    /// One-shot fix; no continuous tracking
    async fn current_position(&self) -> Result<Coordinate, DeviceError>;
}
