use glam::Vec3;

/// One decoded record: a position and an 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub position: Vec3,
    pub color: [u8; 3],
}

impl Point {
    pub fn new(position: Vec3, color: [u8; 3]) -> Self {
        Self { position, color }
    }
}

/// An ordered point set. Points keep their load order, which fixes the
/// index correspondence of the output buffers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    points: Vec<Point>,
}

impl PointCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    /// Bounding extent over all points, `None` for an empty cloud.
    pub fn extent(&self) -> Option<Extent> {
        let mut points = self.points.iter();
        let first = Extent::from_point(points.next()?.position);
        Some(points.fold(first, |mut extent, point| {
            extent.expand(point.position);
            extent
        }))
    }
}

impl FromIterator<Point> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// Per-axis [min, max] range spanned by a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: Vec3,
    pub max: Vec3,
}

impl Extent {
    pub fn from_point(position: Vec3) -> Self {
        Self {
            min: position,
            max: position,
        }
    }

    pub fn expand(&mut self, position: Vec3) {
        self.min = self.min.min(position);
        self.max = self.max.max(position);
    }

    /// Midpoint of the bounding extent. Not the centroid.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_tracks_running_extrema() {
        let cloud: PointCloud = [
            Point::new(Vec3::new(1.0, -2.0, 0.5), [0, 0, 0]),
            Point::new(Vec3::new(-3.0, 4.0, 0.5), [0, 0, 0]),
            Point::new(Vec3::new(2.0, 1.0, -1.5), [0, 0, 0]),
        ]
        .into_iter()
        .collect();

        let extent = cloud.extent().unwrap();
        assert_eq!(extent.min, Vec3::new(-3.0, -2.0, -1.5));
        assert_eq!(extent.max, Vec3::new(2.0, 4.0, 0.5));
        assert_eq!(extent.center(), Vec3::new(-0.5, 1.0, -0.5));
        assert_eq!(extent.size(), Vec3::new(5.0, 6.0, 2.0));
    }

    #[test]
    fn empty_cloud_has_no_extent() {
        assert!(PointCloud::new().extent().is_none());
    }
}
