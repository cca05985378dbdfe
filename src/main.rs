#![windows_subsystem = "windows"]
//! Point Recorder - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod constants;
mod db;
mod model;
mod playback;
mod recorder;
mod settings;
mod theme;
mod trajectory;
mod types;
mod ui;
mod utils;

use app::App;
use constants::*;
use db::SampleStore;
use eframe::egui;
use std::time::Instant;
use tracing::{error, info, warn};
use utils::get_data_dir;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "point-recorder.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,point_recorder=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn open_store(data_dir: &std::path::Path) -> SampleStore {
    let db_path = data_dir.join("samples.db");
    match SampleStore::open(&db_path) {
        Ok(store) => {
            info!(path = %db_path.display(), "Sample library opened");
            store
        }
        Err(e) => {
            error!(error = %e, path = %db_path.display(), "Failed to open sample library");
            warn!("Falling back to an in-memory library; samples will not persist");
            match SampleStore::open_in_memory() {
                Ok(store) => store,
                Err(e) => panic!("Failed to create in-memory sample library: {}", e),
            }
        }
    }
}

fn main() -> eframe::Result<()> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Point Recorder starting");

    let store = open_store(&data_dir);

    // Load saved window position/size
    let settings = settings::Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(DEFAULT_WINDOW_SIZE))
        .with_min_inner_size([720.0, 400.0])
        .with_title(APP_NAME);

    if let Some((rgba, width, height)) = utils::rasterize_icon(64) {
        let icon = egui::IconData { rgba, width, height };
        viewport = viewport.with_icon(std::sync::Arc::new(icon));
    }

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, store, settings, data_dir);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        let now = Instant::now();
        self.recorder.tick(now);

        // Panels must be added before the CentralPanel
        egui::TopBottomPanel::bottom("control_bar")
            .exact_height(theme::CONTROL_BAR_HEIGHT)
            .frame(theme::control_bar_frame())
            .show(ctx, |ui| self.render_controls(ui, now));

        let sidebar = egui::SidePanel::left("recorded_panel")
            .resizable(true)
            .default_width(self.sidebar_width)
            .min_width(220.0)
            .frame(theme::sidebar_frame())
            .show(ctx, |ui| self.render_sidebar(ui));
        self.sidebar_width = sidebar.response.rect.width();

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::BG_BASE).inner_margin(egui::Margin::same(4)))
            .show(ctx, |ui| self.render_canvas(ui, now));

        self.render_toast(ctx);
        self.schedule_repaint(ctx, now);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        self.save_settings();
    }
}
