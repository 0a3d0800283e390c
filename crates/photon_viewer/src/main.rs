mod args;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use photon_renderer::{build_world, render, render_parallel, ImageBuffer};
use photon_viewport::{Display, RenderStats};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::args::{load_description, Args};

/// Extra window width for the properties panel
const PANEL_WIDTH: u32 = 240;

/// Application state
struct App {
    image: ImageBuffer,
    stats: RenderStats,
    window: Option<Arc<Window>>,
    display: Option<Display>,
    last_frame_time: Instant,
}

impl App {
    fn new(image: ImageBuffer, stats: RenderStats) -> Self {
        Self {
            image,
            stats,
            window: None,
            display: None,
            last_frame_time: Instant::now(),
        }
    }

    fn create_display(&self, event_loop: &ActiveEventLoop) -> Result<(Arc<Window>, Display)> {
        let window_attrs = Window::default_attributes()
            .with_title(format!("Photon - {}", self.stats.scene_name))
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.image.width + PANEL_WIDTH,
                self.image.height.max(400),
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let display = pollster::block_on(Display::new(
            window.clone(),
            &self.image,
            self.stats.clone(),
        ))?;
        Ok((window, display))
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match self.create_display(event_loop) {
            Ok((window, display)) => {
                self.window = Some(window);
                self.display = Some(display);
                log::info!("Window and display initialized");
            }
            Err(e) => {
                log::error!("Failed to initialize display: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        // Let egui handle the event first
        if let (Some(display), Some(window)) = (&mut self.display, &self.window) {
            if display.handle_egui_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(display) = &mut self.display {
                    display.resize((physical_size.width, physical_size.height));
                    log::debug!("Resized to {}x{}", physical_size.width, physical_size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(keycode),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => match keycode {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::Tab => {
                    if let Some(display) = &mut self.display {
                        display.show_ui = !display.show_ui;
                    }
                }
                _ => {}
            },
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let delta_time = (now - self.last_frame_time).as_secs_f32();
                self.last_frame_time = now;

                if let (Some(display), Some(window)) = (&mut self.display, &self.window) {
                    display.update_fps(delta_time);

                    let clear_color = wgpu::Color {
                        r: 0.05,
                        g: 0.05,
                        b: 0.05,
                        a: 1.0,
                    };

                    if let Err(e) = display.render(clear_color, window) {
                        match e.downcast_ref::<wgpu::SurfaceError>() {
                            Some(wgpu::SurfaceError::Lost) => display.resize(display.size),
                            Some(wgpu::SurfaceError::OutOfMemory) => {
                                log::error!("Out of memory!");
                                event_loop.exit();
                            }
                            Some(surface_err) => log::warn!("Surface error: {:?}", surface_err),
                            None => log::error!("Render error: {:?}", e),
                        }
                    }

                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    log::info!("Starting Photon Viewer");

    let mut desc = load_description(&args.scene)?;
    if let Some(seed) = args.seed {
        desc.seed = seed;
    }

    let mut world = build_world(&desc)?;
    let config = world.render_config();

    let start = Instant::now();
    let (image, threads) = if args.sequential {
        (render(&mut world.camera, &world.objects, &config), 1)
    } else {
        (
            render_parallel(&mut world.camera, &world.objects, &config),
            rayon::current_num_threads(),
        )
    };
    let stats = RenderStats::from_camera(&world.name, &world.camera)
        .with_render_time(start.elapsed())
        .with_object_count(world.objects.len())
        .with_threads(threads);

    if let Some(output) = &args.output {
        image.save_png(output)?;
    }

    if args.headless {
        return Ok(());
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(image, stats);

    log::info!("Running event loop");
    event_loop.run_app(&mut app)?;

    Ok(())
}
