#![deny(clippy::all)]
#![forbid(unsafe_code)]

use life_grid::{Loc, Random};
use life_playback::Simulation;
use log::debug;
use pixels::wgpu::Color;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, KeyEvent, MouseButton, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Cursor, CursorIcon, Window, WindowId};

const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;
const CELL_PIXEL_WIDTH: u32 = 4;
const RANDOMIZE_PROBABILITY: f64 = 0.5;
const ALIVE_COLOR: [u8; 4] = [0xff, 0xa5, 0x00, 0xff];
const DEAD_COLOR: [u8; 4] = [0x00, 0x00, 0x00, 0xff];
const BACKGROUND_COLOR: Color = Color::BLACK;

fn main() {
    env_logger::init();
    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop.run_app(&mut AppEventHandler::new()).unwrap();
}

struct App {
    sim: Simulation,
    window: Arc<Window>,
    pixels: Pixels<'static>,
    cursor: PhysicalPosition<f64>,
}

impl App {
    fn new(event_loop: &ActiveEventLoop) -> Self {
        let window = Arc::new(Self::build_window(event_loop));
        let mut sim = Simulation::new(
            WINDOW_WIDTH / CELL_PIXEL_WIDTH,
            WINDOW_HEIGHT / CELL_PIXEL_WIDTH,
            Random::new(),
        );
        sim.randomize(RANDOMIZE_PROBABILITY);
        let pixels = Self::build_pixels(&window, sim.grid().width(), sim.grid().height());
        Self {
            sim,
            window,
            pixels,
            cursor: PhysicalPosition::new(0.0, 0.0),
        }
    }

    fn build_window(event_loop: &ActiveEventLoop) -> Window {
        let window_attributes = Window::default_attributes()
            .with_title("Conway's Game of Life")
            .with_inner_size(LogicalSize::new(WINDOW_WIDTH as f64, WINDOW_HEIGHT as f64))
            .with_resizable(false)
            .with_cursor(Cursor::Icon(CursorIcon::Crosshair))
            .with_visible(false);
        event_loop.create_window(window_attributes).unwrap()
    }

    fn build_pixels(window: &Arc<Window>, width: u32, height: u32) -> Pixels<'static> {
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        PixelsBuilder::new(width, height, surface_texture)
            .clear_color(BACKGROUND_COLOR)
            .build()
            .unwrap()
    }

    fn on_create(&mut self) {
        self.window.request_redraw();
        self.window.set_visible(true);
    }

    fn on_tick(&mut self) {
        if self.sim.poll(Instant::now()) {
            self.window.request_redraw();
        }
    }

    fn on_key_released(&mut self, code: KeyCode) {
        match code {
            KeyCode::Space => {
                if self.sim.is_playing() {
                    self.sim.pause();
                } else {
                    self.sim.play();
                }
            }
            KeyCode::KeyS => {
                self.sim.step();
                self.window.request_redraw();
            }
            KeyCode::KeyR => {
                self.sim.randomize(RANDOMIZE_PROBABILITY);
                self.window.request_redraw();
            }
            KeyCode::KeyC => {
                self.sim.clear();
                self.window.request_redraw();
            }
            KeyCode::ArrowUp => {
                self.sim.set_interval(self.sim.interval() / 2);
            }
            KeyCode::ArrowDown => {
                self.sim.set_interval(self.sim.interval() * 2);
            }
            _ => (),
        }
    }

    fn on_click(&mut self) {
        let pos = (self.cursor.x as f32, self.cursor.y as f32);
        let Ok((col, row)) = self.pixels.window_pos_to_pixel(pos) else {
            return;
        };
        match self.sim.toggle_cell(Loc::new(row as u32, col as u32)) {
            Ok(_) => self.window.request_redraw(),
            Err(err) => debug!("ignoring click: {err}"),
        }
    }

    fn on_redraw(&mut self) {
        let screen = self.pixels.frame_mut();
        debug_assert_eq!(screen.len(), 4 * self.sim.grid().num_cells());

        for (alive, pixel) in self.sim.grid().cells_iter().zip(screen.chunks_exact_mut(4)) {
            pixel.copy_from_slice(if *alive { &ALIVE_COLOR } else { &DEAD_COLOR });
        }
        self.pixels.render().unwrap();
    }
}

#[derive(Default)]
struct AppEventHandler {
    app: Option<App>,
}

impl AppEventHandler {
    fn new() -> Self {
        Self::default()
    }

    fn app(&mut self) -> &mut App {
        self.app.as_mut().unwrap()
    }
}

impl ApplicationHandler for AppEventHandler {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause {
            self.app().on_tick();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_none() {
            self.app = Some(App::new(event_loop));
            self.app().on_create();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Released,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape | KeyCode::KeyQ => {
                    event_loop.exit();
                }
                _ => self.app().on_key_released(code),
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.app().cursor = position;
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.app().on_click();
            }
            WindowEvent::RedrawRequested => {
                self.app().on_redraw();
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let control_flow = match self.app().sim.next_tick() {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        };
        event_loop.set_control_flow(control_flow);
    }
}
