use crate::error::{Result, SelectionError};
use crate::math::{Point3, Vector3};

/// Computes the arithmetic mean of a set of points.
///
/// Every point carries equal weight.
pub struct Centroid<'a> {
    points: &'a [Point3],
}

impl<'a> Centroid<'a> {
    /// Creates a new `Centroid` query.
    #[must_use]
    pub fn new(points: &'a [Point3]) -> Self {
        Self { points }
    }

    /// Executes the query, returning the mean point.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::NothingSelected`] if there are no points.
    pub fn execute(&self) -> Result<Point3> {
        if self.points.is_empty() {
            return Err(SelectionError::NothingSelected.into());
        }

        let sum = self
            .points
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords);

        #[allow(clippy::cast_precision_loss)]
        let inv_n = 1.0 / self.points.len() as f64;
        Ok(Point3::from(sum * inv_n))
    }
}
