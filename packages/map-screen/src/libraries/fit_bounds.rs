use geo::{BoundingRect, MultiPoint, Point, Rect};

use crate::models::{Coordinate, EdgePadding, Ubicacion};

/// Instruction for the map widget to bring every marker into view
#[derive(Debug, Clone, PartialEq)]
pub struct FitRequest {
    pub coordinates: Vec<Coordinate>,
    pub edge_padding: EdgePadding,
    pub animated: bool,
    /// Geographic extent of `coordinates` (x = longitude, y = latitude)
    pub bounds: Rect<f64>,
}

/// Build a fit request for the given locations.
///
/// Returns `None` when there is nothing to fit, so callers never ask the
/// widget to fit an empty set.
pub fn fit_request(
    ubicaciones: &[Ubicacion],
    edge_padding: EdgePadding,
    animated: bool,
) -> Option<FitRequest> {
    let coordinates: Vec<Coordinate> = ubicaciones.iter().map(Ubicacion::coordinate).collect();

    let points: MultiPoint<f64> = coordinates
        .iter()
        .map(|c| Point::new(c.longitude, c.latitude))
        .collect();
    let bounds = points.bounding_rect()?;

    Some(FitRequest {
        coordinates,
        edge_padding,
        animated,
        bounds,
    })
}
