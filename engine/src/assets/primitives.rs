//! Procedural geometry
//!
//! The default scene: a flat ground plane and a few boxes to walk into.

use glam::Vec3;

use super::{LoadedGeometry, LoadedRig};
use crate::animation::AnimationClip;
use crate::physics::{Triangle, TriangleMesh};

/// Side length of the default ground plane.
pub const GROUND_SIZE: f32 = 50.0;

/// Square ground plane of the given side length, centred on the origin at y = 0.
pub fn ground_plane(size: f32) -> TriangleMesh {
    let half = size * 0.5;
    TriangleMesh::quad(
        "ground",
        Vec3::new(-half, 0.0, -half),
        Vec3::new(0.0, 0.0, size),
        Vec3::new(size, 0.0, 0.0),
    )
}

/// Axis-aligned box as 12 triangles.
pub fn box_mesh(name: impl Into<String>, center: Vec3, half_extents: Vec3) -> TriangleMesh {
    let min = center - half_extents;
    let max = center + half_extents;
    let corner = |x: bool, y: bool, z: bool| {
        Vec3::new(
            if x { max.x } else { min.x },
            if y { max.y } else { min.y },
            if z { max.z } else { min.z },
        )
    };

    // Each face as (a, b, c, d) in winding order
    let faces = [
        // -X, +X
        [corner(false, false, false), corner(false, false, true), corner(false, true, true), corner(false, true, false)],
        [corner(true, false, true), corner(true, false, false), corner(true, true, false), corner(true, true, true)],
        // -Y, +Y
        [corner(false, false, false), corner(true, false, false), corner(true, false, true), corner(false, false, true)],
        [corner(false, true, true), corner(true, true, true), corner(true, true, false), corner(false, true, false)],
        // -Z, +Z
        [corner(true, false, false), corner(false, false, false), corner(false, true, false), corner(true, true, false)],
        [corner(false, false, true), corner(true, false, true), corner(true, true, true), corner(false, true, true)],
    ];

    let triangles = faces
        .iter()
        .flat_map(|&[a, b, c, d]| [Triangle::new(a, b, c), Triangle::new(a, c, d)])
        .collect();
    TriangleMesh::new(name, triangles)
}

/// The demo arena: ground plane plus three crates.
pub fn demo_geometry() -> LoadedGeometry {
    LoadedGeometry {
        root: "arena".to_string(),
        parts: vec![
            ground_plane(GROUND_SIZE),
            box_mesh("crate_a", Vec3::new(0.0, 1.0, -8.0), Vec3::new(2.0, 1.0, 1.0)),
            box_mesh("crate_b", Vec3::new(6.0, 1.5, -3.0), Vec3::splat(1.5)),
            box_mesh("pillar", Vec3::new(-5.0, 3.0, 4.0), Vec3::new(0.5, 3.0, 0.5)),
        ],
    }
}

/// The demo character: body and head with a single run cycle.
pub fn demo_rig() -> LoadedRig {
    LoadedRig {
        root: "runner".to_string(),
        clips: vec![AnimationClip::new("run", 0.8)],
        parts: vec!["body".to_string(), "head".to_string()],
    }
}
