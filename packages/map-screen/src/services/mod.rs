pub mod api_client;
pub mod device;

pub use api_client::{FetchError, UbicacionesClient};
pub use device::{DeviceError, Geolocator, PermissionStatus};
