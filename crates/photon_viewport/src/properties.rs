//! Properties panel - statistics for the displayed render.

use std::time::Duration;

use photon_renderer::Camera;

/// Statistics about a finished render.
#[derive(Clone, Debug, Default)]
pub struct RenderStats {
    /// Scene name
    pub scene_name: String,

    /// Image resolution in pixels
    pub width: u32,
    pub height: u32,

    /// Samples per pixel
    pub samples_per_pixel: u32,

    /// Maximum ray bounce depth
    pub max_depth: u32,

    /// Number of primitives in the scene
    pub object_count: usize,

    /// Wall-clock time spent rendering
    pub render_time: Duration,

    /// Threads used for rendering (1 for sequential renders)
    pub threads: usize,
}

impl RenderStats {
    /// Collect statistics from an initialized camera.
    pub fn from_camera(scene_name: impl Into<String>, camera: &Camera) -> Self {
        Self {
            scene_name: scene_name.into(),
            width: camera.image_width,
            height: camera.image_height(),
            samples_per_pixel: camera.samples_per_pixel,
            max_depth: camera.max_depth,
            threads: 1,
            ..Default::default()
        }
    }

    /// Set the render time.
    pub fn with_render_time(mut self, render_time: Duration) -> Self {
        self.render_time = render_time;
        self
    }

    /// Set the object count.
    pub fn with_object_count(mut self, object_count: usize) -> Self {
        self.object_count = object_count;
        self
    }

    /// Set the worker thread count.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Camera rays traced for the whole image, excluding bounces.
    pub fn primary_rays(&self) -> u64 {
        self.width as u64 * self.height as u64 * self.samples_per_pixel as u64
    }

    /// Label/value rows shown in the panel.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let seconds = self.render_time.as_secs_f64();
        let mut rows = vec![
            ("Scene", self.scene_name.clone()),
            ("Resolution", format!("{}x{}", self.width, self.height)),
            ("Samples", self.samples_per_pixel.to_string()),
            ("Max Depth", self.max_depth.to_string()),
            ("Objects", self.object_count.to_string()),
            ("Threads", self.threads.to_string()),
            ("Render Time", format!("{:.2}s", seconds)),
        ];
        if seconds > 0.0 {
            let mrays = self.primary_rays() as f64 / seconds / 1.0e6;
            rows.push(("Camera Rays", format!("{:.2} M/s", mrays)));
        }
        rows
    }
}

/// Tracks frames per second of the UI.
#[derive(Clone, Debug, Default)]
pub struct FpsCounter {
    pub fps: f32,
    frame_count: u32,
    timer: f32,
}

impl FpsCounter {
    /// Seconds between FPS updates
    const UPDATE_INTERVAL: f32 = 0.5;

    /// Count one frame that took `delta_time` seconds.
    pub fn tick(&mut self, delta_time: f32) {
        self.frame_count += 1;
        self.timer += delta_time;

        if self.timer >= Self::UPDATE_INTERVAL {
            self.fps = self.frame_count as f32 / self.timer;
            self.frame_count = 0;
            self.timer = 0.0;
        }
    }
}

/// Render the properties panel.
pub fn render_properties(ui: &mut egui::Ui, stats: &RenderStats, fps: f32) {
    ui.heading("Properties");
    ui.separator();

    egui::Grid::new("render_stats_grid")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            for (name, value) in stats.rows() {
                ui.label(name);
                ui.label(egui::RichText::new(value).monospace());
                ui.end_row();
            }
        });

    ui.separator();
    ui.label(format!("FPS: {:.1}", fps));
}
