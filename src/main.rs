use std::time::Instant;

use anyhow::Result;
use glam::{Vec4, vec3};
use glow::HasContext;
use log::info;
use sdl2::keyboard::Keycode;

use crate::abs::{App, Mesh, PositionVertex, Shader, ShaderKind, ShaderProgram};
use crate::config::ShaderPaths;
use crate::source::ShaderSource;

mod abs;
mod config;
mod source;

const WINDOW_TITLE: &str = "Trishade";
const WINDOW_SIZE: u32 = 800;

/// Background clear color.
const CLEAR_COLOR: [f32; 4] = [0.5, 0.2, 0.3, 1.0];

/// The one shape this harness draws.
const TRIANGLE_VERTICES: [PositionVertex; 3] = [
    PositionVertex {
        position: vec3(-0.5, -0.5, 0.0),
    },
    PositionVertex {
        position: vec3(0.5, -0.5, 0.0),
    },
    PositionVertex {
        position: vec3(0.0, 0.5, 0.0),
    },
];

fn main() -> Result<()> {
    init_logging()?;

    let mut app = App::new(WINDOW_TITLE, WINDOW_SIZE, WINDOW_SIZE)?;
    let scene = setup(&app)?;
    run(&mut app, &scene);
    Ok(())
}

/// Installs the fern logger, writing timestamped records to stderr.
fn init_logging() -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

/// GPU resources built by the startup sequence, owned for the life of the
/// frame loop.
struct Scene {
    program: ShaderProgram,
    mesh: Mesh,
}

/// Loads, compiles and links the shader pair, then uploads the triangle.
///
/// Any failure here is fatal: the loop never runs with a partially-built
/// program.
fn setup(app: &App) -> Result<Scene> {
    let paths = ShaderPaths::from_env();

    let vertex_source = ShaderSource::load(ShaderKind::Vertex, &paths.vertex)?;
    let fragment_source = ShaderSource::load(ShaderKind::Fragment, &paths.fragment)?;

    let vertex = Shader::new(&app.gl, vertex_source.kind, &vertex_source.text)?;
    let fragment = Shader::new(&app.gl, fragment_source.kind, &fragment_source.text)?;
    let program = ShaderProgram::new(&app.gl, vertex, fragment)?;

    let mesh = Mesh::new(&app.gl, &TRIANGLE_VERTICES);
    info!("uploaded mesh with {} vertices", mesh.vertex_count());

    Ok(Scene { program, mesh })
}

/// Runs the frame loop until a close signal is observed.
fn run(app: &mut App, scene: &Scene) {
    let clock = Instant::now();

    'running: loop {
        unsafe {
            app.gl.clear_color(
                CLEAR_COLOR[0],
                CLEAR_COLOR[1],
                CLEAR_COLOR[2],
                CLEAR_COLOR[3],
            );
            app.gl.clear(glow::COLOR_BUFFER_BIT);
        }

        scene.program.use_program();
        let t = clock.elapsed().as_secs_f32();
        scene.program.set_uniform("ourColor", pulse_color(t));

        scene.mesh.draw();
        app.window.gl_swap_window();

        for event in app.event_pump.poll_iter() {
            match classify_event(&event) {
                EventAction::Close => break 'running,
                EventAction::Resize { width, height } => unsafe {
                    app.gl.viewport(0, 0, width, height);
                },
                EventAction::RightClick => info!("right mouse button pressed"),
                EventAction::Ignore => {}
            }
        }
    }
}

/// The animated blue channel: oscillates over [0, 1] with elapsed seconds.
fn pulse_blue(t: f32) -> f32 {
    t.sin() / 2.0 + 0.5
}

/// The full uniform color pushed to the program each frame.
fn pulse_color(t: f32) -> Vec4 {
    Vec4::new(0.0, 0.0, pulse_blue(t), 1.0)
}

/// What the frame loop should do with a polled window event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventAction {
    Ignore,
    Close,
    Resize { width: i32, height: i32 },
    RightClick,
}

/// Maps a window-system event to its frame-loop action.
///
/// Escape closes only on an initial press; key repeats and releases are
/// ignored. A right mouse button press is diagnostic-only.
fn classify_event(event: &sdl2::event::Event) -> EventAction {
    use sdl2::event::{Event, WindowEvent};
    use sdl2::mouse::MouseButton;

    match event {
        Event::Quit { .. } => EventAction::Close,
        Event::KeyDown {
            keycode: Some(Keycode::Escape),
            repeat: false,
            ..
        } => EventAction::Close,
        Event::Window {
            win_event: WindowEvent::Resized(width, height),
            ..
        } => EventAction::Resize {
            width: *width,
            height: *height,
        },
        Event::MouseButtonDown {
            mouse_btn: MouseButton::Right,
            ..
        } => EventAction::RightClick,
        _ => EventAction::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdl2::event::{Event, WindowEvent};
    use sdl2::keyboard::Mod;
    use sdl2::mouse::MouseButton;

    fn key_down(keycode: Keycode, repeat: bool) -> Event {
        Event::KeyDown {
            timestamp: 0,
            window_id: 0,
            keycode: Some(keycode),
            scancode: None,
            keymod: Mod::NOMOD,
            repeat,
        }
    }

    fn mouse_down(mouse_btn: MouseButton) -> Event {
        Event::MouseButtonDown {
            timestamp: 0,
            window_id: 0,
            which: 0,
            mouse_btn,
            clicks: 1,
            x: 0,
            y: 0,
        }
    }

    #[test]
    fn escape_press_closes() {
        let action = classify_event(&key_down(Keycode::Escape, false));
        assert_eq!(action, EventAction::Close);
    }

    #[test]
    fn escape_repeat_is_ignored() {
        let action = classify_event(&key_down(Keycode::Escape, true));
        assert_eq!(action, EventAction::Ignore);
    }

    #[test]
    fn escape_release_is_ignored() {
        let event = Event::KeyUp {
            timestamp: 0,
            window_id: 0,
            keycode: Some(Keycode::Escape),
            scancode: None,
            keymod: Mod::NOMOD,
            repeat: false,
        };
        assert_eq!(classify_event(&event), EventAction::Ignore);
    }

    #[test]
    fn other_keys_are_ignored() {
        let action = classify_event(&key_down(Keycode::Space, false));
        assert_eq!(action, EventAction::Ignore);
    }

    #[test]
    fn quit_request_closes() {
        let event = Event::Quit { timestamp: 0 };
        assert_eq!(classify_event(&event), EventAction::Close);
    }

    #[test]
    fn resize_carries_new_dimensions() {
        let event = Event::Window {
            timestamp: 0,
            window_id: 0,
            win_event: WindowEvent::Resized(640, 480),
        };
        assert_eq!(
            classify_event(&event),
            EventAction::Resize {
                width: 640,
                height: 480
            }
        );
    }

    #[test]
    fn right_click_is_diagnostic_only() {
        assert_eq!(
            classify_event(&mouse_down(MouseButton::Right)),
            EventAction::RightClick
        );
    }

    #[test]
    fn left_click_is_ignored() {
        assert_eq!(
            classify_event(&mouse_down(MouseButton::Left)),
            EventAction::Ignore
        );
    }

    #[test]
    fn pulse_blue_stays_in_unit_range() {
        for i in 0..1000 {
            let blue = pulse_blue(i as f32 * 0.05);
            assert!((0.0..=1.0).contains(&blue));
        }
    }

    #[test]
    fn pulse_blue_reference_points() {
        assert_eq!(pulse_blue(0.0), 0.5);
        assert!((pulse_blue(std::f32::consts::FRAC_PI_2) - 1.0).abs() < 1e-6);
        assert!(pulse_blue(3.0 * std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn pulse_color_animates_only_blue() {
        let color = pulse_color(1.3);
        assert_eq!(color.x, 0.0);
        assert_eq!(color.y, 0.0);
        assert_eq!(color.w, 1.0);
        assert_eq!(color.z, pulse_blue(1.3));
    }

    #[test]
    fn triangle_is_exactly_three_vertices() {
        assert_eq!(TRIANGLE_VERTICES.len(), 3);
    }
}
