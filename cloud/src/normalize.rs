use serde::Serialize;

use crate::{CloudError, PointCloud, Result};

/// Flat per-point `[x, y, z]` and `[r, g, b]` buffers, index-aligned with
/// the source cloud. Serializes to the `position`/`color` JSON fields the
/// viewer uploads its vertex buffers from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedBuffers {
    pub position: Vec<f32>,
    pub color: Vec<f32>,
}

/// Centers a cloud on the midpoint of its bounding extent and uniformly
/// rescales it so the longest axis spans [-1, 1]. Shorter axes use the
/// same factor, so aspect ratio is preserved. Colors map to [0, 1].
///
/// Every output position depends on the global extent, so the extent
/// reduce runs over the whole cloud before any coordinate is rewritten.
pub fn normalize(cloud: &PointCloud) -> Result<NormalizedBuffers> {
    // The extent fold silently drops NaN and absorbs infinities, so a
    // non-finite coordinate has to be caught here or it poisons the
    // rewritten positions.
    if cloud.iter().any(|point| !point.position.is_finite()) {
        return Err(CloudError::NonFinite);
    }

    let extent = cloud.extent().ok_or(CloudError::Empty)?;
    let center = extent.center();
    let size = extent.size();

    // Zero iff all points coincide; dividing would poison the output.
    let scale = size.x.max(size.y).max(size.z) / 2.0;
    if scale == 0.0 {
        return Err(CloudError::Degenerate);
    }

    let mut position = Vec::with_capacity(cloud.len() * 3);
    let mut color = Vec::with_capacity(cloud.len() * 3);
    for point in cloud.iter() {
        let p = (point.position - center) / scale;
        position.extend_from_slice(&p.to_array());
        color.extend(point.color.iter().map(|&c| f32::from(c) / 255.0));
    }

    Ok(NormalizedBuffers { position, color })
}
