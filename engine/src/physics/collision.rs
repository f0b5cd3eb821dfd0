//! Collision detection module
//!
//! Ray queries against the static collidable surfaces of the scene.
//!
//! Every surface is a triangle mesh with a cached axis-aligned bounding box.
//! A query first rejects whole meshes with the slab test, then runs
//! Möller–Trumbore against the remaining triangles and keeps the nearest hit.
//!
//! # Example
//!
//! ```ignore
//! use stride_engine::physics::{CollidableSet, TriangleMesh, cast_ray};
//! use glam::Vec3;
//!
//! let mut surfaces = CollidableSet::new();
//! surfaces.push(TriangleMesh::quad("ground", Vec3::new(-5.0, 0.0, -5.0), Vec3::X * 10.0, Vec3::Z * 10.0));
//!
//! if let Some(hit) = cast_ray(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y, 10.0, &surfaces) {
//!     println!("Ground at y = {}", hit.point.y);
//! }
//! ```

use glam::Vec3;

/// Distance tolerance for the far end of a query. A surface exactly at `max_distance`
/// must still count as a hit even when the intersection math lands one ulp past it.
pub const RAY_EPSILON: f32 = 1.0e-5;

/// Padding applied to mesh bounds so flat meshes (planes, walls) keep a non-degenerate slab.
const AABB_PADDING: f32 = 1.0e-4;

/// Identifier of a surface inside a [`CollidableSet`] (its insertion index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub usize);

/// Result of a ray query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space position where the ray met the surface
    pub point: Vec3,
    /// Surface normal at the hit point, facing back toward the ray origin
    pub normal: Vec3,
    /// Which surface was hit
    pub surface: SurfaceId,
    /// Distance from ray origin to hit point
    pub distance: f32,
}

/// A single triangle in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    /// Unnormalized face normal (right-handed winding a -> b -> c).
    pub fn face_normal(&self) -> Vec3 {
        (self.b - self.a).cross(self.c - self.a)
    }
}

/// A static triangle mesh registered as one collidable surface.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    /// Name of the scene part this mesh came from
    pub name: String,
    triangles: Vec<Triangle>,
    bounds_min: Vec3,
    bounds_max: Vec3,
}

impl TriangleMesh {
    /// Build a mesh from world-space triangles.
    pub fn new(name: impl Into<String>, triangles: Vec<Triangle>) -> Self {
        let (bounds_min, bounds_max) = bounds_of(&triangles);
        Self {
            name: name.into(),
            triangles,
            bounds_min,
            bounds_max,
        }
    }

    /// Build a mesh from an indexed vertex list.
    ///
    /// Triangles referencing out-of-range vertices are skipped.
    pub fn from_indexed(name: impl Into<String>, vertices: &[Vec3], indices: &[[u32; 3]]) -> Self {
        let triangles = indices
            .iter()
            .filter_map(|&[i, j, k]| {
                let a = *vertices.get(i as usize)?;
                let b = *vertices.get(j as usize)?;
                let c = *vertices.get(k as usize)?;
                Some(Triangle::new(a, b, c))
            })
            .collect();
        Self::new(name, triangles)
    }

    /// A planar quad spanned by two edge vectors from `origin`, as two triangles.
    pub fn quad(name: impl Into<String>, origin: Vec3, edge_u: Vec3, edge_v: Vec3) -> Self {
        let p0 = origin;
        let p1 = origin + edge_u;
        let p2 = origin + edge_u + edge_v;
        let p3 = origin + edge_v;
        Self::new(
            name,
            vec![Triangle::new(p0, p1, p2), Triangle::new(p0, p2, p3)],
        )
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Axis-aligned bounds (min, max) of the mesh.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        (self.bounds_min, self.bounds_max)
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Nearest intersection with this mesh within `[0, max_distance]`.
    ///
    /// Returns the distance and the normal facing the ray origin.
    pub fn ray_cast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<(f32, Vec3)> {
        if self.triangles.is_empty() {
            return None;
        }

        let pad = Vec3::splat(AABB_PADDING);
        let entry = ray_aabb_intersect(
            origin,
            direction,
            self.bounds_min - pad,
            self.bounds_max + pad,
        )?;
        if entry > max_distance + RAY_EPSILON {
            return None;
        }

        let mut best: Option<(f32, Vec3)> = None;
        for tri in &self.triangles {
            if let Some(t) = ray_triangle_intersect(origin, direction, tri) {
                if t <= max_distance + RAY_EPSILON && best.is_none_or(|(d, _)| t < d) {
                    let mut normal = tri.face_normal().normalize_or_zero();
                    if normal.dot(direction) > 0.0 {
                        normal = -normal;
                    }
                    best = Some((t, normal));
                }
            }
        }
        best
    }
}

fn bounds_of(triangles: &[Triangle]) -> (Vec3, Vec3) {
    if triangles.is_empty() {
        return (Vec3::ZERO, Vec3::ZERO);
    }
    let mut min = Vec3::splat(f32::MAX);
    let mut max = Vec3::splat(f32::MIN);
    for tri in triangles {
        for p in [tri.a, tri.b, tri.c] {
            min = min.min(p);
            max = max.max(p);
        }
    }
    (min, max)
}

/// Ordered, append-only collection of static collidable surfaces.
///
/// Populated between frames as scene geometry resolves; read-only during a frame.
#[derive(Debug, Clone, Default)]
pub struct CollidableSet {
    surfaces: Vec<TriangleMesh>,
}

impl CollidableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a surface and return its identifier.
    pub fn push(&mut self, mesh: TriangleMesh) -> SurfaceId {
        let id = SurfaceId(self.surfaces.len());
        self.surfaces.push(mesh);
        id
    }

    /// Append several surfaces in order.
    pub fn extend(&mut self, meshes: impl IntoIterator<Item = TriangleMesh>) {
        self.surfaces.extend(meshes);
    }

    pub fn get(&self, id: SurfaceId) -> Option<&TriangleMesh> {
        self.surfaces.get(id.0)
    }

    /// Returns the number of surfaces in the set.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Returns true if no geometry has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SurfaceId, &TriangleMesh)> {
        self.surfaces
            .iter()
            .enumerate()
            .map(|(i, mesh)| (SurfaceId(i), mesh))
    }

    /// Casts a ray against every surface and returns the closest hit.
    ///
    /// See [`cast_ray`].
    pub fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let mut closest: Option<RayHit> = None;

        for (id, mesh) in self.iter() {
            if let Some((t, normal)) = mesh.ray_cast(origin, direction, max_distance) {
                // Strict comparison: on equal distance the earlier surface wins
                if closest.is_none_or(|c| t < c.distance) {
                    closest = Some(RayHit {
                        point: origin + direction * t,
                        normal,
                        surface: id,
                        distance: t,
                    });
                }
            }
        }

        closest
    }

    /// Checks if a ray hits anything within `max_distance`.
    pub fn ray_test(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> bool {
        self.surfaces
            .iter()
            .any(|mesh| mesh.ray_cast(origin, direction, max_distance).is_some())
    }
}

/// Nearest hit along a ray within `[0, max_distance]`.
///
/// `direction` must already be normalized; it is not normalized here.
/// O(surfaces x triangles) with a per-surface bounds rejection. Ties go to the
/// surface inserted first, so results are reproducible for a fixed set.
pub fn cast_ray(
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
    surfaces: &CollidableSet,
) -> Option<RayHit> {
    surfaces.cast_ray(origin, direction, max_distance)
}

/// Ray-triangle intersection (Möller–Trumbore), double-sided.
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the intersection point (t >= 0)
/// * `None` - No intersection, ray parallel to the triangle, or hit behind the origin
pub fn ray_triangle_intersect(origin: Vec3, direction: Vec3, tri: &Triangle) -> Option<f32> {
    const PARALLEL_EPS: f32 = 1.0e-8;
    const BARY_EPS: f32 = 1.0e-6;

    let e1 = tri.b - tri.a;
    let e2 = tri.c - tri.a;
    let p = direction.cross(e2);
    let det = e1.dot(p);
    if det.abs() < PARALLEL_EPS {
        return None;
    }
    let inv_det = 1.0 / det;

    let s = origin - tri.a;
    let u = s.dot(p) * inv_det;
    if u < -BARY_EPS || u > 1.0 + BARY_EPS {
        return None;
    }

    let q = s.cross(e1);
    let v = direction.dot(q) * inv_det;
    if v < -BARY_EPS || u + v > 1.0 + BARY_EPS {
        return None;
    }

    let t = e2.dot(q) * inv_det;
    if t >= 0.0 { Some(t) } else { None }
}

/// Performs ray-AABB (Axis-Aligned Bounding Box) intersection test using the slab method.
///
/// # Arguments
///
/// * `ray_origin` - Starting point of the ray
/// * `ray_dir` - Direction of the ray (must be normalized)
/// * `aabb_min` - Minimum corner of the AABB
/// * `aabb_max` - Maximum corner of the AABB
///
/// # Returns
///
/// * `Some(t)` - Distance at which the ray enters the box (0 when the origin is inside)
/// * `None` - No intersection or the box is entirely behind the ray origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    // Near-zero directions use large finite values so 0 * inv never turns into NaN
    let inv_dir = Vec3::new(
        if ray_dir.x.abs() > 1e-10 { 1.0 / ray_dir.x } else { f32::MAX },
        if ray_dir.y.abs() > 1e-10 { 1.0 / ray_dir.y } else { f32::MAX },
        if ray_dir.z.abs() > 1e-10 { 1.0 / ray_dir.z } else { f32::MAX },
    );

    let t1 = (aabb_min - ray_origin) * inv_dir;
    let t2 = (aabb_max - ray_origin) * inv_dir;

    let t_min = t1.min(t2).max_element();
    let t_max = t1.max(t2).min_element();

    if t_max >= t_min && t_max >= 0.0 {
        Some(t_min.max(0.0))
    } else {
        None
    }
}
