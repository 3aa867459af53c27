pub mod config;
pub mod libraries;
pub mod models;
pub mod screen;
pub mod services;
pub mod view;

pub use config::ScreenConfig;
pub use screen::{MapScreen, PermissionFlow};
pub use view::{MapView, ScreenView};
