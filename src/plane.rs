//! Best-fit plane representation and total-least-squares fitting.

use crate::errors::PlaneFitError;
use crate::float_types::{EPSILON, Real, tolerance};
use nalgebra::{Matrix3, Point3, SymmetricEigen, Vector3};

/// An oriented plane `n · p = w` with unit normal `n`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    /// Unit normal vector of the plane
    pub normal: Vector3<Real>,
    /// Distance from origin along normal (plane equation: n·p = w)
    pub w: Real,
}

/// Arithmetic mean of a point set, `None` when empty.
pub fn centroid(points: &[Point3<Real>]) -> Option<Point3<Real>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as Real))
}

impl Plane {
    /// Total-least-squares fit to `points`, minimizing aggregate orthogonal
    /// distance.
    ///
    /// The normal is the eigenvector of the smallest eigenvalue of the 3×3
    /// covariance of the centered points. With eigenvalues λ0 ≤ λ1 ≤ λ2 the
    /// fit is rejected as [`PlaneFitError::Degenerate`] when λ2 is
    /// vanishing (coincident points) or λ1 ≤ [`tolerance`]·λ2 (collinear
    /// within tolerance), rather than returning an arbitrary plane. The
    /// fitted plane passes through the centroid.
    pub fn fit(points: &[Point3<Real>]) -> Result<Self, PlaneFitError> {
        if points.len() < 3 {
            return Err(PlaneFitError::TooFewPoints(points.len()));
        }
        let center = centroid(points).unwrap_or_else(Point3::origin);

        let mut covariance = Matrix3::zeros();
        for point in points {
            let d = point - center;
            covariance += d * d.transpose();
        }

        let eigen = SymmetricEigen::new(covariance);
        let mut order = [0usize, 1, 2];
        order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));
        let [smallest, middle, largest] = order;

        let spread = eigen.eigenvalues[largest];
        if spread <= EPSILON || eigen.eigenvalues[middle] <= tolerance() * spread {
            return Err(PlaneFitError::Degenerate {
                tolerance: tolerance(),
            });
        }

        let normal = eigen.eigenvectors.column(smallest).normalize();
        let w = normal.dot(&center.coords);
        Ok(Plane { normal, w })
    }

    /// Get the plane normal
    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    /// Get the offset (distance from origin)
    pub const fn offset(&self) -> Real {
        self.w
    }

    /// Flip the plane (reverse normal and distance)
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Signed distance of `point` from the plane, positive on the normal side.
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.w
    }

    /// Orthogonal projection of `point` onto the plane.
    pub fn project_point(&self, point: &Point3<Real>) -> Point3<Real> {
        point - self.signed_distance(point) * self.normal
    }

    /// An arbitrary orthonormal basis `{u, v}` spanning the plane, for
    /// consumers that need in-plane directions before the user has
    /// supplied a reference point.
    pub fn tangent_basis(&self) -> (Vector3<Real>, Vector3<Real>) {
        let mut u = if self.normal.z.abs() > self.normal.x.abs()
            || self.normal.z.abs() > self.normal.y.abs()
        {
            // normal is closer to ±Z ⇒ cross with X
            Vector3::x().cross(&self.normal)
        } else {
            // otherwise cross with Z
            Vector3::z().cross(&self.normal)
        };
        u.normalize_mut();
        let v = self.normal.cross(&u).normalize();
        (u, v)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn three_point_fit_is_perpendicular_to_both_edges() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(2.0, 0.0, 1.0);
        let c = Point3::new(0.0, 3.0, -1.0);
        let plane = Plane::fit(&[a, b, c]).unwrap();

        assert_relative_eq!(plane.normal().dot(&(b - a)), 0.0, epsilon = 1e-10);
        assert_relative_eq!(plane.normal().dot(&(c - a)), 0.0, epsilon = 1e-10);
        assert_relative_eq!(plane.normal().norm(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn fit_passes_through_centroid() {
        let points = [
            Point3::new(0.0, 0.0, 0.1),
            Point3::new(1.0, 0.0, -0.1),
            Point3::new(1.0, 1.0, 0.1),
            Point3::new(0.0, 1.0, -0.1),
        ];
        let plane = Plane::fit(&points).unwrap();
        let center = centroid(&points).unwrap();
        assert_relative_eq!(plane.signed_distance(&center), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn too_few_points_is_reported() {
        let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        assert_eq!(Plane::fit(&points), Err(PlaneFitError::TooFewPoints(2)));
    }

    #[test]
    fn collinear_points_are_degenerate() {
        let points: Vec<_> = (0..5)
            .map(|i| Point3::new(i as Real, 2.0 * i as Real, 0.0))
            .collect();
        assert!(matches!(
            Plane::fit(&points),
            Err(PlaneFitError::Degenerate { .. })
        ));
    }

    #[test]
    fn coincident_points_are_degenerate() {
        let points = vec![Point3::new(1.0, 2.0, 3.0); 4];
        assert!(matches!(
            Plane::fit(&points),
            Err(PlaneFitError::Degenerate { .. })
        ));
    }

    #[test]
    fn tetrahedron_fit_is_defined_though_not_exact() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];
        let plane = Plane::fit(&points).unwrap();
        // Not all points lie on the least-squares plane.
        assert!(
            points
                .iter()
                .any(|p| plane.signed_distance(p).abs() > 1e-3)
        );
    }

    #[test]
    fn projection_lands_on_plane() {
        let plane = Plane::fit(&[
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ])
        .unwrap();
        let projected = plane.project_point(&Point3::new(0.3, 0.4, 7.0));
        assert_relative_eq!(plane.signed_distance(&projected), 0.0, epsilon = 1e-10);
        assert_relative_eq!(projected.x, 0.3, epsilon = 1e-10);
        assert_relative_eq!(projected.y, 0.4, epsilon = 1e-10);
    }

    #[test]
    fn tangent_basis_spans_the_plane() {
        let plane = Plane {
            normal: Vector3::new(1.0, 2.0, 3.0).normalize(),
            w: 0.5,
        };
        let (u, v) = plane.tangent_basis();
        assert_relative_eq!(u.dot(&plane.normal()), 0.0, epsilon = 1e-10);
        assert_relative_eq!(v.dot(&plane.normal()), 0.0, epsilon = 1e-10);
        assert_relative_eq!(u.dot(&v), 0.0, epsilon = 1e-10);
        assert_relative_eq!(u.norm(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn flip_reverses_orientation() {
        let mut plane = Plane {
            normal: Vector3::z(),
            w: 2.0,
        };
        plane.flip();
        assert_eq!(plane.normal(), -Vector3::z());
        assert_eq!(plane.offset(), -2.0);
    }
}
