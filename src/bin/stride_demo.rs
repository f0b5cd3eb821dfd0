//! Character Controller Demo
//!
//! Run with: `cargo run --bin stride_demo [config.json]`
//!
//! Opens a window and drives the movement core from real input. There is no
//! GPU renderer here: frame snapshots are written to the log, so run with
//! `RUST_LOG=info` (or `debug`) to watch the character and camera.
//!
//! Controls:
//! - WASD: Move (relative to the camera)
//! - V: Toggle third-person / first-person
//! - Left-drag: Orbit (third-person)
//! - Scroll: Zoom (third-person)
//! - Mouse: Look (first-person, pointer captured)
//! - ESC: Release pointer, press again to exit

use std::error::Error;
use std::time::Instant;

use log::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{
    DeviceEvent, DeviceId, ElementState, KeyEvent, MouseButton as WinitMouseButton,
    MouseScrollDelta, WindowEvent,
};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{CursorGrabMode, Window, WindowAttributes, WindowId};

use stride_engine::assets::primitives;
use stride_engine::{
    AssetHandle, CameraMode, CaptureRequest, EngineConfig, FrameDriver, FrameRenderer,
    FrameSnapshot, MouseButton, Session,
};

/// Frames between snapshot log lines.
const LOG_EVERY: u64 = 60;

/// Stand-in renderer: reports the frame through `log`.
#[derive(Default)]
struct LogRenderer;

impl FrameRenderer for LogRenderer {
    fn render(&mut self, snapshot: &FrameSnapshot) {
        if snapshot.frame % LOG_EVERY != 0 {
            return;
        }
        match &snapshot.character {
            Some(character) => info!(
                "frame {} | {:?} | character {:.2} yaw {:.2} clip {} | camera {:.2} pitch {:.2}",
                snapshot.frame,
                snapshot.camera_mode,
                character.transform.position,
                character.transform.yaw,
                if character.clip_paused { "paused" } else { "running" },
                snapshot.camera.position,
                snapshot.camera.pitch,
            ),
            None => info!(
                "frame {} | waiting for character ({} loads pending)",
                snapshot.frame, snapshot.pending_assets
            ),
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        debug!("viewport {width}x{height}");
    }
}

struct App {
    driver: FrameDriver<LogRenderer>,
    window: Option<Window>,
    shown_mode: Option<CameraMode>,
}

impl App {
    fn new(session: Session) -> Self {
        Self {
            driver: FrameDriver::new(session, LogRenderer),
            window: None,
            shown_mode: None,
        }
    }

    fn session(&mut self) -> &mut Session {
        self.driver.session_mut()
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: KeyEvent) {
        let pressed = event.state == ElementState::Pressed;

        if pressed && event.logical_key == Key::Named(NamedKey::Escape) {
            if self.session().input().capture().is_locked() {
                self.apply_capture(CaptureRequest::Release);
            } else {
                event_loop.exit();
            }
            return;
        }

        let Some(id) = key_id(&event.logical_key) else {
            return;
        };
        let input = self.session().input_mut();
        if pressed {
            input.key_down(&id);
        } else {
            input.key_up(&id);
        }
    }

    fn handle_mouse_button(&mut self, button: WinitMouseButton, pressed: bool) {
        let button = map_button(button);

        // Clicking back into a first-person window re-grabs the pointer
        let capture = self.session().input().capture();
        if pressed && capture.is_requested() && !capture.is_locked() {
            self.apply_capture(CaptureRequest::Engage);
        }

        self.session().input_mut().pointer_button(button, pressed);
    }

    fn handle_scroll(&mut self, delta: MouseScrollDelta) {
        // Wheel up zooms in
        let amount = match delta {
            MouseScrollDelta::LineDelta(_, y) => -y,
            MouseScrollDelta::PixelDelta(pos) => -(pos.y as f32) * 0.02,
        };
        self.session().input_mut().scroll(amount);
    }

    /// Ask the window for what the core requested and report what we got.
    fn apply_capture(&mut self, request: CaptureRequest) {
        let Some(window) = &self.window else {
            return;
        };

        let locked = match request {
            CaptureRequest::Engage => {
                let grabbed = window
                    .set_cursor_grab(CursorGrabMode::Locked)
                    .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
                match grabbed {
                    Ok(()) => {
                        window.set_cursor_visible(false);
                        true
                    }
                    Err(err) => {
                        warn!("pointer capture unavailable: {err}");
                        false
                    }
                }
            }
            CaptureRequest::Release => {
                if let Err(err) = window.set_cursor_grab(CursorGrabMode::None) {
                    warn!("pointer release failed: {err}");
                }
                window.set_cursor_visible(true);
                false
            }
        };

        debug!("capture {request:?} -> locked {locked}");
        self.session().input_mut().pointer_lock_changed(locked);
    }

    fn frame(&mut self) {
        self.driver.tick(Instant::now());

        if let Some(request) = self.session().input_mut().capture_mut().take_request() {
            self.apply_capture(request);
        }

        let mode = self.driver.session().camera_mode();
        if self.shown_mode != Some(mode) {
            self.shown_mode = Some(mode);
            if let Some(window) = &self.window {
                window.set_title(&format!("Stride - {mode:?}"));
            }
            for line in self.driver.session().instructions().lines {
                info!("  {line}");
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = WindowAttributes::default()
            .with_title("Stride")
            .with_inner_size(PhysicalSize::new(1280, 720));

        match event_loop.create_window(window_attrs) {
            Ok(window) => {
                let size = window.inner_size();
                self.driver.resize(size.width, size.height);
                self.window = Some(window);
            }
            Err(err) => {
                error!("could not create window: {err}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.driver.resize(size.width, size.height);
            }
            WindowEvent::Focused(focused) => {
                let input = self.session().input_mut();
                if focused {
                    input.capture_mut().handle_focus_gained();
                } else {
                    input.focus_lost();
                    self.driver.clock_mut().reset();
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(event_loop, event);
            }
            WindowEvent::MouseInput { button, state, .. } => {
                self.handle_mouse_button(button, state == ElementState::Pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.handle_scroll(delta);
            }
            WindowEvent::RedrawRequested => {
                self.frame();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.session()
                .input_mut()
                .pointer_motion(delta.0 as f32, delta.1 as f32);
        }
    }
}

/// Key identifier in the form the input layer expects.
fn key_id(key: &Key) -> Option<String> {
    match key {
        Key::Character(text) => Some(text.to_string()),
        Key::Named(NamedKey::Space) => Some(" ".to_string()),
        Key::Named(named) => Some(format!("{named:?}")),
        _ => None,
    }
}

fn map_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(n) => MouseButton::Other(n),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("loading config from {path}");
            EngineConfig::load(&path)?
        }
        None => EngineConfig::default(),
    };

    println!("=== Stride ===");
    println!("Controls: WASD Move, V Toggle camera, Left-drag Orbit, Scroll Zoom, ESC Exit");

    let mut session = Session::new(config);
    session.load_geometry(AssetHandle::spawn("arena", || Ok(primitives::demo_geometry())));
    session.load_character(AssetHandle::spawn("runner", || Ok(primitives::demo_rig())));

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = App::new(session);
    event_loop.run_app(&mut app)?;
    Ok(())
}
