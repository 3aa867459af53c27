pub mod fit_bounds;
pub mod normalize;

pub use fit_bounds::{fit_request, FitRequest};
pub use normalize::{normalize_ubicacion, normalize_ubicaciones, parse_float};
