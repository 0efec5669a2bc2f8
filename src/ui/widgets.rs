use eframe::egui::{self, Color32, RichText, Stroke, Ui};

use crate::assets::LogoStore;
use crate::color::{accent, side_color};
use crate::data::records::ClubSide;
use crate::format::{clamp01, NumberFormat};

/// Rounded "label: value" pill.
pub fn kpi_chip(ui: &mut Ui, label: &str, value: &str) {
    egui::Frame::new()
        .stroke(Stroke::new(1.0, Color32::from_white_alpha(30)))
        .fill(Color32::from_white_alpha(10))
        .corner_radius(egui::CornerRadius::same(12))
        .inner_margin(egui::Margin::symmetric(10, 6))
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.label(RichText::new(format!("{label}:")).weak());
                ui.label(RichText::new(value).strong());
            });
        });
}

/// Heading with the accent bar on its left.
pub fn section_header(ui: &mut Ui, text: &str) {
    ui.add_space(12.0);
    ui.horizontal(|ui: &mut Ui| {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(6.0, 24.0), egui::Sense::hover());
        ui.painter().rect_filled(rect, egui::CornerRadius::ZERO, accent());
        ui.add_space(6.0);
        ui.heading(RichText::new(text).strong());
    });
    ui.add_space(6.0);
}

/// Club logo, or an empty slot of the same size when there is none.
pub fn club_logo(ui: &mut Ui, logos: &LogoStore, club_id: Option<&str>, size: f32) {
    match club_id.and_then(|id| logos.logo_uri(id)) {
        Some(uri) => {
            ui.add(egui::Image::new(uri).fit_to_exact_size(egui::vec2(size, size)));
        }
        None => {
            ui.allocate_space(egui::vec2(size, size));
        }
    }
}

/// Metric label with the home and away values in their side colours.
pub fn comparison_row(
    ui: &mut Ui,
    label: &str,
    home: Option<f64>,
    away: Option<f64>,
    format: NumberFormat,
) {
    ui.label(label);
    for (side, value) in [(ClubSide::Home, home), (ClubSide::Away, away)] {
        let text = format.show(value);
        if value.is_some() {
            ui.label(RichText::new(text).strong().color(side_color(side)));
        } else {
            ui.label(text);
        }
    }
    ui.end_row();
}

/// Two progress bars, one per club, for a share of the squad.
pub fn dual_progress_bar(
    ui: &mut Ui,
    label: &str,
    home: Option<f64>,
    away: Option<f64>,
    names: (&str, &str),
) {
    ui.label(label);
    ui.columns(2, |cols| {
        let sides = [(ClubSide::Home, home, names.0), (ClubSide::Away, away, names.1)];
        for (col, (side, value, name)) in cols.iter_mut().zip(sides) {
            col.label(RichText::new(name).small().weak());
            let bar = egui::ProgressBar::new(clamp01(value) as f32).fill(side_color(side));
            let bar = match value {
                Some(_) => bar.text(NumberFormat::Percent.show(value)),
                None => bar,
            };
            col.add(bar);
        }
    });
    ui.add_space(4.0);
}
