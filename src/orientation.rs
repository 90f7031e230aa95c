//! In-plane orientation basis and the plane-local bounding rectangle.
//!
//! Built during the ORIENTING state from the fitted plane and a second,
//! user-supplied reference point; rebuilt from scratch on every reference
//! movement. The unscaled axis directions feed the commit transform;
//! display scaling happens at draw time.

use crate::accumulator::PlaneFit;
use crate::float_types::{EPSILON, Real};
use nalgebra::{Matrix4, Point3, Vector3};

/// Four corner points of the plane-local bounding rectangle, wound to match
/// the basis axes: `(min,min) → (max,min) → (max,max) → (min,max)`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingRectangle {
    pub corners: [Point3<Real>; 4],
}

/// An orthonormal in-plane `(x, y)` frame plus the plane normal.
#[derive(Debug, Clone)]
pub struct OrientationBasis {
    /// The projected centroid the frame is anchored at.
    pub origin: Point3<Real>,
    /// Unit vector from the origin toward the projected reference point.
    pub x_axis: Vector3<Real>,
    /// Unit vector completing a right-handed frame with the normal.
    pub y_axis: Vector3<Real>,
    /// Unit plane normal.
    pub normal: Vector3<Real>,
    /// Bounding rectangle of the accumulated points in this basis.
    pub rect: BoundingRectangle,
    /// 3D midpoint of the bounding ranges. Coincides with the origin only
    /// for symmetric point distributions.
    pub center: Point3<Real>,
}

impl OrientationBasis {
    /// Derive the basis from the current fit, a reference point, and the
    /// accumulated points.
    ///
    /// `None` when the reference point projects onto the centroid (no
    /// direction to orient along) or when no points were supplied.
    pub fn update(
        fit: &PlaneFit,
        reference: &Point3<Real>,
        points: &[Point3<Real>],
    ) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let toward = fit.plane.project_point(reference) - fit.projected_centroid;
        if toward.norm() <= EPSILON {
            return None;
        }
        let origin = fit.projected_centroid;
        let x_axis = toward.normalize();
        let y_axis = fit.normal.cross(&x_axis);

        let (mut min_x, mut min_y) = (Real::MAX, Real::MAX);
        let (mut max_x, mut max_y) = (Real::MIN, Real::MIN);
        for point in points {
            let offset = fit.plane.project_point(point) - origin;
            let x = offset.dot(&x_axis);
            let y = offset.dot(&y_axis);
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        let mut basis = OrientationBasis {
            origin,
            x_axis,
            y_axis,
            normal: fit.normal,
            rect: BoundingRectangle {
                corners: [origin; 4],
            },
            center: origin,
        };
        basis.rect = BoundingRectangle {
            corners: [
                basis.plane_point(min_x, min_y),
                basis.plane_point(max_x, min_y),
                basis.plane_point(max_x, max_y),
                basis.plane_point(min_x, max_y),
            ],
        };
        basis.center = basis.plane_point((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
        Some(basis)
    }

    /// Map plane-local `(x, y)` coordinates back to 3D.
    pub fn plane_point(&self, x: Real, y: Real) -> Point3<Real> {
        self.origin + x * self.x_axis + y * self.y_axis
    }

    /// Plane-local `(x, y)` coordinates of a point; the in-plane component
    /// is all that survives, so this is also a projection.
    pub fn local_coordinates(&self, point: &Point3<Real>) -> (Real, Real) {
        let offset = point - self.origin;
        (offset.dot(&self.x_axis), offset.dot(&self.y_axis))
    }

    /// Orthonormal-frame transform mapping a prototype's local origin to
    /// the rectangle center and its local x/y/up axes onto the basis.
    pub fn frame_transform(&self) -> Matrix4<Real> {
        let mut frame = Matrix4::identity();
        frame.fixed_view_mut::<3, 1>(0, 0).copy_from(&self.x_axis);
        frame.fixed_view_mut::<3, 1>(0, 1).copy_from(&self.y_axis);
        frame.fixed_view_mut::<3, 1>(0, 2).copy_from(&self.normal);
        frame
            .fixed_view_mut::<3, 1>(0, 3)
            .copy_from(&self.center.coords);
        frame
    }
}
