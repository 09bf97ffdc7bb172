use eframe::egui::{self, Color32, RichText, Ui};

use showdeck_core::{Artwork, CatalogView, DetailView, PosterSource, Show};

use crate::images::ImageManager;

const POSTER_SIZE: egui::Vec2 = egui::vec2(120.0, 180.0);
const STILL_SIZE: egui::Vec2 = egui::vec2(200.0, 112.0);
const ACCENT: Color32 = Color32::from_rgb(168, 85, 247);

pub fn render_loading_spinner(ui: &mut Ui, text: &str) {
    ui.horizontal(|ui| {
        ui.spinner();
        ui.label(text);
    });
}

fn poster_texture(
    ui: &Ui,
    images: &mut ImageManager,
    artwork: &Artwork,
    show: &Show,
) -> egui::TextureHandle {
    match artwork.poster(show.poster_path.as_deref()) {
        PosterSource::Remote(url) => match images.texture(ui.ctx(), &url) {
            Some(tex) => tex,
            None => images.placeholder(ui.ctx()),
        },
        PosterSource::Placeholder => images.placeholder(ui.ctx()),
    }
}

/// Catalog screen. Clicks are collected while drawing and applied afterwards
/// so the view is not borrowed by the layout closures.
pub fn render_catalog(ui: &mut Ui, view: &mut CatalogView, images: &mut ImageManager, artwork: &Artwork) {
    let mut selected: Option<u64> = None;

    ui.horizontal(|ui| {
        ui.heading(RichText::new("ShowDeck").color(ACCENT).strong());
        ui.add_space(16.0);
        let mut query = view.state().query().to_string();
        let response = ui.add(
            egui::TextEdit::singleline(&mut query)
                .hint_text("Search TV shows...")
                .desired_width(320.0),
        );
        if response.changed() {
            view.on_query_change(query);
        }
        if view.search_pending() {
            ui.spinner();
        }
    });

    let results = view.state().results();
    if !results.is_empty() {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_source("search_results")
                .max_height(240.0)
                .show(ui, |ui| {
                    for show in results {
                        if ui.selectable_label(false, &show.name).clicked() {
                            selected = Some(show.id);
                        }
                    }
                });
        });
    }
    ui.separator();

    let state = view.state();
    if state.is_loading() {
        render_loading_spinner(ui, "Loading shows...");
    } else {
        egui::ScrollArea::vertical().id_source("catalog").show(ui, |ui| {
            for group in state.grouped() {
                ui.label(RichText::new(&group.name).heading().strong());
                egui::ScrollArea::horizontal()
                    .id_source(format!("genre_row_{}", group.name))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            for show in &group.shows {
                                let tex = poster_texture(ui, images, artwork, show);
                                let image = egui::Image::new(&tex).fit_to_exact_size(POSTER_SIZE);
                                let response = ui
                                    .add(egui::ImageButton::new(image))
                                    .on_hover_text(format!("{}\n\n{}", show.name, show.summary()));
                                if response.clicked() {
                                    selected = Some(show.id);
                                }
                            }
                        });
                    });
                ui.add_space(12.0);
            }
        });
    }

    if let Some(show_id) = selected {
        view.select_show(show_id);
    }
}

pub fn render_detail(ui: &mut Ui, view: &DetailView, images: &mut ImageManager, artwork: &Artwork) {
    let state = view.state();
    ui.horizontal(|ui| {
        if ui.button("⬅ Back").on_hover_text("Back to the catalog").clicked() {
            view.go_back();
        }
        ui.heading(RichText::new(state.show_name()).strong());
        if let Some(season) = state.season() {
            ui.label(RichText::new(format!("Season {}", season)).weak());
        }
    });
    ui.separator();

    if state.is_loading() {
        render_loading_spinner(ui, "Loading episodes...");
        return;
    }

    egui::ScrollArea::vertical().id_source("episodes").show(ui, |ui| {
        for episode in state.episodes() {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    if let Some(url) = artwork.still(episode.still_path.as_deref()) {
                        match images.texture(ui.ctx(), &url) {
                            Some(tex) => {
                                ui.add(egui::Image::new(&tex).fit_to_exact_size(STILL_SIZE));
                            }
                            None if !images.has_failed(&url) => {
                                ui.allocate_ui(STILL_SIZE, |ui| ui.spinner());
                            }
                            None => {}
                        }
                    }
                    ui.vertical(|ui| {
                        ui.label(RichText::new(episode.title()).strong());
                        ui.label(episode.description());
                    });
                });
            });
        }
    });
}

/// Asks for the TMDB key. Returns true when the user submits a non-empty key.
pub fn render_api_key_prompt(ui: &mut Ui, draft: &mut String) -> bool {
    let mut submitted = false;
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.heading("TMDB API key required");
        ui.label("Enter your API key to browse shows. It is stored in your config file.");
        ui.add_space(8.0);
        let response = ui.add(
            egui::TextEdit::singleline(draft)
                .hint_text("API key")
                .password(true)
                .desired_width(320.0),
        );
        let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if (ui.button("Save").clicked() || enter) && !draft.trim().is_empty() {
            submitted = true;
        }
    });
    submitted
}
