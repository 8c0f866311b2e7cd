use std::collections::HashSet;
use std::fs;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use raycaster::camera::horizontal_fov;
use raycaster::canvas::{Canvas, FrameBuffer};
use raycaster::config::Cli;
use raycaster::map::{DEMO_MAP, Map};
use raycaster::scaler::{ScaleLut, blit_nearest, build_scale_lut};
use raycaster::world::{Command, World};
use raycaster::{logging, minimap, renderer};

/// Simulation runs at a fixed 30 ticks per second, whatever the frame rate.
const TICK: Duration = Duration::from_nanos(1_000_000_000 / 30);

const BINDINGS: [(KeyCode, Command); 8] = [
    (KeyCode::ArrowUp, Command::Forward),
    (KeyCode::KeyW, Command::Forward),
    (KeyCode::ArrowDown, Command::Backward),
    (KeyCode::KeyS, Command::Backward),
    (KeyCode::ArrowLeft, Command::TurnLeft),
    (KeyCode::KeyA, Command::TurnLeft),
    (KeyCode::ArrowRight, Command::TurnRight),
    (KeyCode::KeyD, Command::TurnRight),
];

type WindowSurface = softbuffer::Surface<Rc<Window>, Rc<Window>>;

struct App {
    window: Option<Rc<Window>>,
    surface: Option<WindowSurface>,
    world: World,
    fov: f64,
    minimap_zoom: f64,

    // HUD
    frame_counter: u32,
    last_fps_print: Instant,

    // Internal frame, stretched to the window
    frame: FrameBuffer,
    minimap: Option<FrameBuffer>,
    scale_lut: ScaleLut,

    // Input and simulation clock
    keys_down: HashSet<KeyCode>,
    last_tick: Instant,
    lag: Duration,
}

impl App {
    fn new(cli: &Cli, world: World) -> Self {
        let fov = cli
            .fov_radians()
            .unwrap_or_else(|| horizontal_fov(cli.render_width, cli.render_height));
        let minimap = (cli.minimap_size > 0)
            .then(|| FrameBuffer::new(cli.minimap_size, cli.minimap_size));

        Self {
            window: None,
            surface: None,
            world,
            fov,
            minimap_zoom: cli.minimap_zoom,

            frame_counter: 0,
            last_fps_print: Instant::now(),

            frame: FrameBuffer::new(cli.render_width, cli.render_height),
            minimap,
            scale_lut: ScaleLut::empty(),

            keys_down: HashSet::new(),
            last_tick: Instant::now(),
            lag: Duration::ZERO,
        }
    }

    fn open_window(event_loop: &ActiveEventLoop) -> Result<(Rc<Window>, WindowSurface)> {
        let attributes = Window::default_attributes()
            .with_title("raycaster")
            .with_inner_size(LogicalSize::new(800.0, 600.0));

        let window = Rc::new(
            event_loop
                .create_window(attributes)
                .context("creating window")?,
        );
        // SoftBufferError is not Send + Sync, so it cannot carry `.context`
        let context = softbuffer::Context::new(window.clone())
            .map_err(|err| anyhow!("creating softbuffer context: {err}"))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|err| anyhow!("creating softbuffer surface: {err}"))?;

        Ok((window, surface))
    }

    /// Advances the simulation by however many whole ticks have elapsed.
    fn tick(&mut self) {
        // Cap the catch-up so a paused app does not lurch forward
        let now = Instant::now();
        self.lag += now
            .duration_since(self.last_tick)
            .min(Duration::from_millis(100));
        self.last_tick = now;

        while self.lag >= TICK {
            self.lag -= TICK;
            for command in [
                Command::Forward,
                Command::Backward,
                Command::TurnLeft,
                Command::TurnRight,
            ] {
                let held = BINDINGS
                    .iter()
                    .any(|(key, bound)| *bound == command && self.keys_down.contains(key));
                if held {
                    self.world.apply(command);
                }
            }
        }
    }

    fn redraw(&mut self, id: WindowId) -> Result<()> {
        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return Ok(()),
        };

        let size = window.inner_size();
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            return Ok(()); // Minimized window, skip drawing
        };
        let (dw, dh) = (size.width as usize, size.height as usize);

        surface
            .resize(w, h)
            .map_err(|err| anyhow!("resizing surface: {err}"))?;

        renderer::render(
            &mut self.frame,
            &self.world.map.segments,
            &self.world.camera,
            Some(self.fov),
        )?;

        if let Some(overlay) = &mut self.minimap {
            minimap::draw_minimap(
                overlay,
                &self.world.map.segments,
                &self.world.camera,
                self.fov,
                self.minimap_zoom,
            );
            // bottom-right corner
            let x = self.frame.width().saturating_sub(overlay.width());
            let y = self.frame.height().saturating_sub(overlay.height());
            self.frame.blit(overlay, x, y);
        }

        if !self.scale_lut.fits(dw, dh) {
            self.scale_lut = build_scale_lut(dw, dh, self.frame.width(), self.frame.height());
        }

        let mut buf = surface
            .buffer_mut()
            .map_err(|err| anyhow!("locking surface buffer: {err}"))?;
        blit_nearest(&mut buf, dw, &self.frame, &self.scale_lut);
        buf.present()
            .map_err(|err| anyhow!("presenting frame: {err}"))?;

        Ok(())
    }

    fn report_fps(&mut self) {
        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            let fps = self.frame_counter as f32 / elapsed;
            log::info!("FPS: {fps:.1}");
            if let Some(window) = &self.window {
                let region = self.world.region().unwrap_or(' ');
                window.set_title(&format!("raycaster | {fps:.1} fps | region '{region}'"));
            }
            self.frame_counter = 0;
            self.last_fps_print = now;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        match Self::open_window(event_loop) {
            Ok((window, surface)) => {
                window.request_redraw();
                self.surface = Some(surface);
                self.window = Some(window);
                self.last_tick = Instant::now();
            }
            Err(err) => {
                log::error!("{err:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested, stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed if code == KeyCode::Escape => event_loop.exit(),
                ElementState::Pressed => {
                    self.keys_down.insert(code);
                }
                ElementState::Released => {
                    self.keys_down.remove(&code);
                }
            },

            WindowEvent::RedrawRequested => {
                self.tick();
                if let Err(err) = self.redraw(id) {
                    log::error!("frame failed: {err:#}");
                }
                self.report_fps();
            }

            WindowEvent::Resized(new_size) => {
                self.scale_lut = build_scale_lut(
                    new_size.width as usize,
                    new_size.height as usize,
                    self.frame.width(),
                    self.frame.height(),
                );
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    cli.validate()?;

    let text = match &cli.map {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading map {}", path.display()))?,
        None => DEMO_MAP.to_owned(),
    };
    let world = World::new(Map::parse(&text), cli.spawn)?.with_steps(cli.steps());

    let event_loop = EventLoop::new().context("creating event loop")?;

    // ControlFlow::Wait pauses the event loop if no events are available;
    // about_to_wait keeps requesting redraws so frames keep coming.
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(&cli, world);
    event_loop.run_app(&mut app).context("running event loop")?;
    Ok(())
}
