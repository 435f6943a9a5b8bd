mod error;
mod normalize;
mod point;

pub use error::{CloudError, Result};
pub use normalize::{normalize, NormalizedBuffers};
pub use point::{Extent, Point, PointCloud};
