use std::sync::Arc;

use eframe::egui;

mod config;
mod icon;
mod images;
mod logger;
mod models;
mod ui_helpers;

use config::{apply_env_overrides, read_config, save_config};
use images::ImageManager;
use models::Config;
use showdeck_core::{ActiveView, Artwork, Shell, ShellOptions, TmdbClient};
use ui_helpers::{render_api_key_prompt, render_catalog, render_detail};

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    let mut config = read_config().unwrap_or_default();
    apply_env_overrides(&mut config);
    logger::init(&config.log_level);
    log::info!("starting ShowDeck, log file at {}", logger::log_path().display());

    let icon = icon::generate_icon(256);
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1200.0, 800.0])
        .with_icon(icon);
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "ShowDeck",
        options,
        Box::new(|cc| Box::new(ShowDeck::new(&cc.egui_ctx, config))),
    )
}

struct ShowDeck {
    config: Config,
    shell: Option<Shell>,
    images: ImageManager,
    artwork: Artwork,
    api_key_draft: String,
    theme_applied: bool,
}

impl ShowDeck {
    fn new(ctx: &egui::Context, config: Config) -> Self {
        let mut app = Self {
            images: ImageManager::new(config.cover_parallel as usize, config.texture_cache_limit as usize),
            artwork: Artwork::new(&config.image_base),
            config,
            shell: None,
            api_key_draft: String::new(),
            theme_applied: false,
        };
        if app.config.is_complete() {
            app.start_shell(ctx);
        } else {
            log::warn!("no TMDB API key configured; waiting for one");
        }
        app
    }

    fn start_shell(&mut self, ctx: &egui::Context) {
        let client = match TmdbClient::new(self.config.catalog_config()) {
            Ok(client) => client,
            Err(e) => {
                log::error!("could not create HTTP client: {}", e);
                return;
            }
        };
        let repaint_ctx = ctx.clone();
        let options = ShellOptions {
            debounce_window: self.config.search_debounce(),
            wake: Some(Arc::new(move || repaint_ctx.request_repaint())),
        };
        self.shell = Some(Shell::new(Arc::new(client), options));
    }

    fn submit_api_key(&mut self, ctx: &egui::Context) {
        self.config.api_key = self.api_key_draft.trim().to_string();
        self.api_key_draft.clear();
        if let Err(e) = save_config(&self.config) {
            log::error!("failed to save config: {}", e);
        }
        self.start_shell(ctx);
    }
}

impl eframe::App for ShowDeck {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.theme_applied {
            match self.config.theme.as_str() {
                "light" => ctx.set_visuals(egui::Visuals::light()),
                _ => ctx.set_visuals(egui::Visuals::dark()),
            }
            self.theme_applied = true;
        }

        self.images.poll(ctx);
        if let Some(shell) = self.shell.as_mut() {
            shell.pump();
        }

        let mut key_submitted = false;
        egui::CentralPanel::default().show(ctx, |ui| match self.shell.as_mut() {
            Some(shell) => match shell.active_mut() {
                ActiveView::Catalog(view) => render_catalog(ui, view, &mut self.images, &self.artwork),
                ActiveView::Detail(view) => render_detail(ui, view, &mut self.images, &self.artwork),
            },
            None => key_submitted = render_api_key_prompt(ui, &mut self.api_key_draft),
        });
        if key_submitted {
            self.submit_api_key(ctx);
        }
    }
}
