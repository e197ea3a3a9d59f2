//! Splitting plane for BSP construction.

use crate::polygon::Polygon;
use lamina_kernel_math::{Point3, Vec3, PLANE_TOL};

const COPLANAR: u8 = 0;
const FRONT: u8 = 1;
const BACK: u8 = 2;
const SPANNING: u8 = 3;

/// An oriented plane in Hessian normal form: `normal . p == w`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit plane normal.
    pub normal: Vec3,
    /// Signed distance of the plane from the origin along `normal`.
    pub w: f64,
}

impl Plane {
    /// Plane through three points, oriented by their winding.
    ///
    /// Returns `None` for (near-)collinear points.
    pub fn from_points(a: &Point3, b: &Point3, c: &Point3) -> Option<Self> {
        let n = (b - a).cross(&(c - a));
        let len = n.norm();
        if len < 1e-12 {
            return None;
        }
        let normal = n / len;
        Some(Self {
            normal,
            w: normal.dot(&a.coords),
        })
    }

    /// Invert plane orientation in place.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Signed distance of a point from the plane.
    pub fn signed_distance(&self, p: &Point3) -> f64 {
        self.normal.dot(&p.coords) - self.w
    }

    /// Split `polygon` by this plane, distributing the pieces.
    ///
    /// Coplanar polygons go to `coplanar_front`/`coplanar_back` depending on
    /// their facing, whole polygons on one side go to `front`/`back`, and
    /// spanning polygons are cut along the plane with new vertices
    /// interpolated on the crossing edges.
    pub fn split_polygon(
        &self,
        polygon: &Polygon,
        coplanar_front: &mut Vec<Polygon>,
        coplanar_back: &mut Vec<Polygon>,
        front: &mut Vec<Polygon>,
        back: &mut Vec<Polygon>,
    ) {
        let mut polygon_type = COPLANAR;
        let mut types = Vec::with_capacity(polygon.vertices.len());

        for v in &polygon.vertices {
            let t = self.signed_distance(&v.pos);
            let vtype = if t < -PLANE_TOL {
                BACK
            } else if t > PLANE_TOL {
                FRONT
            } else {
                COPLANAR
            };
            polygon_type |= vtype;
            types.push(vtype);
        }

        match polygon_type {
            COPLANAR => {
                if self.normal.dot(&polygon.plane.normal) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            }
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let mut f = Vec::new();
                let mut b = Vec::new();
                let n = polygon.vertices.len();
                for i in 0..n {
                    let j = (i + 1) % n;
                    let ti = types[i];
                    let tj = types[j];
                    let vi = &polygon.vertices[i];
                    let vj = &polygon.vertices[j];
                    if ti != BACK {
                        f.push(*vi);
                    }
                    if ti != FRONT {
                        b.push(*vi);
                    }
                    if (ti | tj) == SPANNING {
                        let di = self.signed_distance(&vi.pos);
                        let dj = self.signed_distance(&vj.pos);
                        let t = di / (di - dj);
                        let v = vi.interpolate(vj, t);
                        f.push(v);
                        b.push(v);
                    }
                }
                if let Some(p) = Polygon::from_vertices(f) {
                    front.push(p);
                }
                if let Some(p) = Polygon::from_vertices(b) {
                    back.push(p);
                }
            }
        }
    }
}
