//! Physics module
//!
//! Geometry queries against the static scene. There is no rigid-body
//! simulation: the character is moved kinematically by the locomotion
//! controller and only asks "what does this ray hit first?".
//!
//! # Unit System
//!
//! **1 unit = 1 meter**
//!
//! # Submodules
//!
//! - [`collision`] - Triangle-mesh collidables and nearest-hit ray casting

pub mod collision;

// Re-export commonly used types at the physics module level
pub use collision::{
    CollidableSet, RAY_EPSILON, RayHit, SurfaceId, Triangle, TriangleMesh, cast_ray,
    ray_aabb_intersect, ray_triangle_intersect,
};
