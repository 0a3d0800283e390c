//! Photon Viewport - GPU display of rendered images.
//!
//! Uploads a finished RGBA8 buffer as a single texture and draws it with
//! egui on top of a wgpu surface, next to a properties panel.

mod properties;

pub use properties::{render_properties, FpsCounter, RenderStats};

use anyhow::Result;
use wgpu::{Device, Instance, Queue, Surface, SurfaceConfiguration};

use photon_renderer::ImageBuffer;

/// Width of the properties side panel in points.
const PANEL_WIDTH: f32 = 240.0;

/// Largest size with the image's aspect ratio that fits in `available`.
///
/// Images are never scaled up past their native size.
pub fn fit_image(available: egui::Vec2, image_size: [u32; 2]) -> egui::Vec2 {
    let native = egui::vec2(image_size[0] as f32, image_size[1] as f32);
    if native.x <= 0.0 || native.y <= 0.0 || available.x <= 0.0 || available.y <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let scale = (available.x / native.x).min(available.y / native.y).min(1.0);
    native * scale
}

/// Convert a rendered buffer into an egui image.
pub fn to_color_image(image: &ImageBuffer) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(
        [image.width as usize, image.height as usize],
        image.as_bytes(),
    )
}

/// Window display for a finished render.
pub struct Display {
    pub surface: Surface<'static>,
    pub device: Device,
    pub queue: Queue,
    pub config: SurfaceConfiguration,
    pub size: (u32, u32),

    // egui state
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,

    /// The rendered image, sampled nearest with clamp-to-edge
    render_texture: egui::TextureHandle,

    // UI state
    pub show_ui: bool,
    pub stats: RenderStats,
    pub fps: FpsCounter,
}

impl Display {
    /// Create a display for the given window showing `image`.
    pub async fn new(
        window: std::sync::Arc<winit::window::Window>,
        image: &ImageBuffer,
        stats: RenderStats,
    ) -> Result<Self> {
        let size = window.inner_size();

        let instance = Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Photon Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        log::info!("Using GPU adapter: {}", adapter.get_info().name);

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no supported formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None, // max_texture_side (use default)
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            &device,
            config.format,
            None, // No depth testing for egui
            1,
            false, // dithering
        );

        let render_texture = egui_ctx.load_texture(
            "render",
            to_color_image(image),
            egui::TextureOptions::NEAREST,
        );

        log::info!(
            "Display initialized: {}x{} surface, {}x{} image",
            config.width,
            config.height,
            image.width,
            image.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            size: (config.width, config.height),
            config,
            egui_ctx,
            egui_state,
            egui_renderer,
            render_texture,
            show_ui: true,
            stats,
            fps: FpsCounter::default(),
        })
    }

    pub fn resize(&mut self, new_size: (u32, u32)) {
        if new_size.0 > 0 && new_size.1 > 0 {
            self.size = new_size;
            self.config.width = new_size.0;
            self.config.height = new_size.1;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Handle egui window event - returns true if event was consumed by egui
    pub fn handle_egui_event(
        &mut self,
        window: &winit::window::Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_state.on_window_event(window, event);
        response.consumed
    }

    /// Update FPS counter (call each frame with delta_time)
    pub fn update_fps(&mut self, delta_time: f32) {
        self.fps.tick(delta_time);
    }

    /// Render a frame with the given clear color
    pub fn render(&mut self, clear_color: wgpu::Color, window: &winit::window::Window) -> Result<()> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let raw_input = self.egui_state.take_egui_input(window);

        // Split borrows so the UI closure does not capture all of self
        let show_ui = self.show_ui;
        let fps = self.fps.fps;
        let stats = &self.stats;
        let texture = &self.render_texture;

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if show_ui {
                egui::SidePanel::left("properties_panel")
                    .default_width(PANEL_WIDTH)
                    .show(ctx, |ui| render_properties(ui, stats, fps));
            }

            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| {
                    let size = fit_image(ui.available_size(), texture.size().map(|s| s as u32));
                    ui.centered_and_justified(|ui| {
                        ui.add(egui::Image::new((texture.id(), size)).fit_to_exact_size(size));
                    });
                });
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.size.0, self.size.1],
            pixels_per_point: window.scale_factor() as f32,
        };

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Display Encoder"),
            });

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let mut egui_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(clear_color),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime(); // egui renderer needs a 'static pass

            self.egui_renderer
                .render(&mut egui_pass, &paint_jobs, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_image_scales_down_keeping_aspect() {
        let size = fit_image(egui::vec2(800.0, 600.0), [1600, 900]);
        assert_eq!(size, egui::vec2(800.0, 450.0));

        let size = fit_image(egui::vec2(400.0, 100.0), [1600, 900]);
        assert!((size.x / size.y - 16.0 / 9.0).abs() < 1e-4);
        assert!(size.y <= 100.0);
    }

    #[test]
    fn test_fit_image_never_upscales() {
        let size = fit_image(egui::vec2(2000.0, 2000.0), [400, 225]);
        assert_eq!(size, egui::vec2(400.0, 225.0));
    }

    #[test]
    fn test_fit_image_degenerate() {
        assert_eq!(fit_image(egui::vec2(0.0, 100.0), [10, 10]), egui::Vec2::ZERO);
        assert_eq!(fit_image(egui::vec2(100.0, 100.0), [0, 10]), egui::Vec2::ZERO);
    }

    #[test]
    fn test_to_color_image() {
        let mut image = ImageBuffer::new(3, 2);
        image.data[4..8].copy_from_slice(&[255, 128, 0, 255]);

        let color_image = to_color_image(&image);
        assert_eq!(color_image.size, [3, 2]);
        assert_eq!(color_image.pixels[1], egui::Color32::from_rgb(255, 128, 0));
    }
}
