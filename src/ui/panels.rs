use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::{MatchdaySelection, MatchdayView};
use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – navigation and matchday filters
// ---------------------------------------------------------------------------

/// Render the left side panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Pages");
    ui.separator();
    for page in Page::ALL {
        if ui.selectable_label(state.page == page, page.title()).clicked() {
            state.page = page;
        }
    }

    if state.page != Page::MatchdayOverview {
        return;
    }

    ui.add_space(12.0);
    ui.heading("Filters");
    ui.separator();

    // Page-level load errors are reported in the central panel.
    let Ok(schedule) = state.load_schedule() else {
        ui.label("No data loaded.");
        return;
    };
    let view = match MatchdayView::build(&schedule, &state.selection) {
        Ok(view) => view,
        Err(e) => {
            ui.label(RichText::new(e.to_string()).color(Color32::YELLOW));
            return;
        }
    };

    let mut next = MatchdaySelection {
        season: view.season.clone(),
        competition: view.competition.clone(),
        matchday: Some(view.matchday),
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if !view.seasons.is_empty() {
                ui.strong("Season");
                egui::ComboBox::from_id_salt("season")
                    .selected_text(next.season.clone().unwrap_or_default())
                    .show_ui(ui, |ui: &mut Ui| {
                        for season in &view.seasons {
                            ui.selectable_value(&mut next.season, Some(season.clone()), season.as_str());
                        }
                    });
            }

            if !view.competitions.is_empty() {
                ui.strong("Competition");
                egui::ComboBox::from_id_salt("competition")
                    .selected_text(next.competition.clone().unwrap_or_else(|| "All".into()))
                    .show_ui(ui, |ui: &mut Ui| {
                        ui.selectable_value(&mut next.competition, None, "All");
                        for comp in &view.competitions {
                            ui.selectable_value(&mut next.competition, Some(comp.clone()), comp.as_str());
                        }
                    });
            }

            ui.strong("Matchday");
            egui::ComboBox::from_id_salt("matchday")
                .selected_text(next.matchday.map(|md| md.to_string()).unwrap_or_default())
                .show_ui(ui, |ui: &mut Ui| {
                    for md in &view.matchdays {
                        ui.selectable_value(&mut next.matchday, Some(*md), md.to_string());
                    }
                });
        });

    if next != state.selection {
        // A new season or competition starts from its latest matchday.
        if next.season != view.season || next.competition != view.competition {
            next.matchday = None;
        }
        log::debug!("Matchday selection changed: {next:?}");
        state.selection = next;
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload data").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        match &state.data_root {
            Some(root) => ui.label(format!("Data root: {}", root.display())),
            None => ui.label("Data root: default"),
        };

        let cached = state.cached_keys();
        if !cached.is_empty() {
            ui.separator();
            let names: Vec<&str> = cached.iter().map(|k| k.as_str()).collect();
            ui.label(RichText::new(format!("cached: {}", names.join(", "))).weak());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Choose data folder")
        .pick_folder();

    if let Some(path) = folder {
        if path.is_dir() {
            state.set_data_root(path);
        } else {
            log::error!("Not a directory: {}", path.display());
            state.status_message = Some(format!("Error: {} is not a directory", path.display()));
        }
    }
}
