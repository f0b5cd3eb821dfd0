//! Camera Tests - Orbit, First-Person and Mode Switching
//!
//! Strategies are driven through `CameraContext` the same way the session
//! drives them; mode round trips go through a full `Session`.

use std::f32::consts::FRAC_PI_2;

use approx::assert_relative_eq;
use glam::{Vec2, Vec3};
use stride_engine::assets::primitives::{self, box_mesh};
use stride_engine::camera::{
    CameraContext, CameraMode, CameraRig, CameraStrategy, FirstPersonCamera, OrbitCamera,
};
use stride_engine::character::Character;
use stride_engine::config::CharacterConfig;
use stride_engine::input::{FrameInput, MouseButton, PointerCapture};
use stride_engine::physics::CollidableSet;
use stride_engine::Session;

fn placeholder() -> Character {
    Character::placeholder(&CharacterConfig::default())
}

/// Large wall behind the default orbit position, near face at `z = 2`.
fn wall_behind() -> CollidableSet {
    let mut set = CollidableSet::new();
    set.push(box_mesh(
        "backdrop",
        Vec3::new(0.0, 0.0, 2.5),
        Vec3::new(10.0, 10.0, 0.5),
    ));
    set
}

fn run<S: CameraStrategy>(
    camera: &mut S,
    character: &mut Character,
    surfaces: &CollidableSet,
    input: &FrameInput,
) -> stride_engine::Transform {
    let mut ctx = CameraContext {
        character,
        surfaces,
        input,
    };
    camera.update(&mut ctx, 0.016)
}

// ============================================================================
// Orbit Camera
// ============================================================================

#[test]
fn test_orbit_looks_at_head() {
    let mut camera = OrbitCamera::default();
    let mut character = placeholder();

    let transform = run(&mut camera, &mut character, &CollidableSet::new(), &FrameInput::default());

    let target = camera.look_target().expect("target seeded");
    assert_eq!(target, Vec3::new(0.0, 1.6, 0.0));
    assert_relative_eq!(transform.position.distance(target), 6.0, epsilon = 1e-4);

    let towards_target = (target - transform.position).normalize();
    let forward = transform.forward();
    assert_relative_eq!(forward.x, towards_target.x, epsilon = 1e-4);
    assert_relative_eq!(forward.y, towards_target.y, epsilon = 1e-4);
    assert_relative_eq!(forward.z, towards_target.z, epsilon = 1e-4);
}

#[test]
fn test_orbit_bounds_hold_under_huge_input() {
    let mut camera = OrbitCamera::default();
    let mut character = placeholder();
    let surfaces = CollidableSet::new();

    let wild = FrameInput {
        orbit_delta: Vec2::new(1.0e7, -1.0e7),
        zoom_delta: 1.0e7,
        ..Default::default()
    };
    for _ in 0..10 {
        run(&mut camera, &mut character, &surfaces, &wild);
        let (min_polar, max_polar) = camera.polar_limits();
        let (min_distance, max_distance) = camera.distance_limits();
        assert!(camera.polar() >= min_polar && camera.polar() <= max_polar);
        assert!(camera.distance() >= min_distance && camera.distance() <= max_distance);
        assert!(camera.azimuth().is_finite());
    }

    let opposite = FrameInput {
        orbit_delta: Vec2::new(-1.0e7, 1.0e7),
        zoom_delta: -1.0e7,
        ..Default::default()
    };
    run(&mut camera, &mut character, &surfaces, &opposite);
    assert_eq!(camera.polar(), 0.2);
    assert_eq!(camera.distance(), 2.0);
}

#[test]
fn test_orbit_pulled_in_front_of_obstruction() {
    let mut camera = OrbitCamera::default();
    let mut character = placeholder();
    let surfaces = wall_behind();

    let transform = run(&mut camera, &mut character, &surfaces, &FrameInput::default());

    assert!(camera.actual_distance() < camera.distance());
    assert!(transform.position.z < 2.0);
    // Zoom the user chose is untouched
    assert_eq!(camera.distance(), 6.0);
}

#[test]
fn test_orbit_recovers_when_obstruction_is_gone() {
    let mut camera = OrbitCamera::default();
    let mut character = placeholder();

    run(&mut camera, &mut character, &wall_behind(), &FrameInput::default());
    run(&mut camera, &mut character, &CollidableSet::new(), &FrameInput::default());

    assert_eq!(camera.actual_distance(), camera.distance());
}

#[test]
fn test_orbit_target_trails_character() {
    let mut camera = OrbitCamera::default();
    let mut character = placeholder();
    let surfaces = CollidableSet::new();

    run(&mut camera, &mut character, &surfaces, &FrameInput::default());
    character.transform.position = Vec3::new(0.0, 0.0, -10.0);
    run(&mut camera, &mut character, &surfaces, &FrameInput::default());

    let target = camera.look_target().expect("target seeded");
    assert_relative_eq!(target.z, -1.0, epsilon = 1e-5);
}

// ============================================================================
// First-Person Camera
// ============================================================================

#[test]
fn test_first_person_sits_at_eyes_and_turns_character() {
    let mut camera = FirstPersonCamera::default();
    let mut character = placeholder();
    character.transform.position = Vec3::new(2.0, 0.0, 3.0);

    let input = FrameInput {
        look_delta: Vec2::new(100.0, 0.0),
        ..Default::default()
    };
    let transform = run(&mut camera, &mut character, &CollidableSet::new(), &input);

    assert_eq!(transform.position, Vec3::new(2.0, 1.6, 3.0));
    assert_relative_eq!(character.transform.yaw, 0.2, epsilon = 1e-6);
    assert_relative_eq!(camera.facing_yaw(), 0.2, epsilon = 1e-6);
}

#[test]
fn test_first_person_pitch_never_reaches_vertical() {
    let mut camera = FirstPersonCamera::default();
    let mut character = placeholder();
    let surfaces = CollidableSet::new();

    for dy in [1.0e6, -1.0e6, 1.0e9, -1.0e9] {
        let input = FrameInput {
            look_delta: Vec2::new(0.0, dy),
            ..Default::default()
        };
        for _ in 0..50 {
            let transform = run(&mut camera, &mut character, &surfaces, &input);
            assert!(transform.pitch.abs() < FRAC_PI_2);
        }
    }
}

// ============================================================================
// Camera Rig
// ============================================================================

#[test]
fn test_rig_dispatches_to_active_strategy() {
    let mut rig = CameraRig::default();
    let mut capture = PointerCapture::new();

    assert_eq!(rig.active().mode(), CameraMode::ThirdPerson);
    rig.toggle(None, &mut capture);
    assert_eq!(rig.active().mode(), CameraMode::FirstPerson);
    assert!(capture.is_requested());
    rig.toggle(None, &mut capture);
    assert_eq!(rig.active().mode(), CameraMode::ThirdPerson);
    assert!(!capture.is_requested());
}

#[test]
fn test_toggle_round_trip_restores_orbit() {
    let mut session = Session::default();
    session.spawn_character(primitives::demo_rig());

    // Drag and zoom the orbit a little
    session.input_mut().pointer_button(MouseButton::Left, true);
    session.input_mut().pointer_motion(40.0, 10.0);
    session.input_mut().scroll(2.0);
    session.advance(0.016);
    session.input_mut().pointer_button(MouseButton::Left, false);

    let before = session.camera().orbit().clone();

    session.input_mut().key_down("v");
    session.advance(0.016);
    session.input_mut().key_up("v");
    assert_eq!(session.camera_mode(), CameraMode::FirstPerson);

    // Pointer activity in first-person must not touch the orbit
    session.input_mut().pointer_motion(300.0, -200.0);
    session.input_mut().scroll(-5.0);
    session.advance(0.016);

    session.input_mut().key_down("v");
    session.advance(0.016);
    assert_eq!(session.camera_mode(), CameraMode::ThirdPerson);

    let after = session.camera().orbit();
    assert_eq!(after.distance(), before.distance());
    assert_eq!(after.azimuth(), before.azimuth());
    assert_eq!(after.polar(), before.polar());
}

#[test]
fn test_head_hidden_only_in_first_person() {
    let mut session = Session::default();
    session.spawn_character(primitives::demo_rig());

    let head_visible = |session: &Session| {
        session
            .character()
            .and_then(|c| c.rig.is_part_visible("head"))
    };
    assert_eq!(head_visible(&session), Some(true));

    session.input_mut().key_down("v");
    let snapshot = session.advance(0.016);
    session.input_mut().key_up("v");
    assert_eq!(head_visible(&session), Some(false));
    assert_eq!(
        snapshot.character.expect("character").hidden_parts,
        vec!["head".to_string()]
    );

    session.input_mut().key_down("v");
    session.advance(0.016);
    assert_eq!(head_visible(&session), Some(true));
}
