use crate::libraries::FitRequest;
use crate::models::{Marker, Region};

/// The map-rendering widget.
///
/// `fit_to_coordinates` is invoked while the screen state is locked, so
/// implementations must not call back into the screen.
pub trait MapView: Send + Sync {
    fn fit_to_coordinates(&self, request: &FitRequest);
}

/// What the screen shows at a given moment
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenView {
    /// Text in place of the map (loading or permission denied)
    Status(String),
    Map {
        region: Region,
        shows_user_location: bool,
        markers: Vec<Marker>,
    },
}

impl ScreenView {
    pub fn status_text(&self) -> Option<&str> {
        match self {
            ScreenView::Status(text) => Some(text),
            ScreenView::Map { .. } => None,
        }
    }
}
