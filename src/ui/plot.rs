use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::side_color;
use crate::data::matchup::Matchup;
use crate::data::records::ClubSide;
use crate::format::clamp01;

const SHORT_LABELS: [&str; 3] = ["Available", "Matchday squad", "Deployed"];

// ---------------------------------------------------------------------------
// Head-to-head utilization chart (match analysis page)
// ---------------------------------------------------------------------------

/// Grouped bars: one group per utilization share, home left, away right.
pub fn utilization_chart(ui: &mut Ui, matchup: &Matchup<'_>) {
    let charts: Vec<BarChart> = [(ClubSide::Home, -0.2), (ClubSide::Away, 0.2)]
        .into_iter()
        .map(|(side, offset)| {
            let bars = matchup
                .kpis(side)
                .shares()
                .iter()
                .enumerate()
                .map(|(i, (label, share))| {
                    Bar::new(i as f64 + offset, clamp01(*share) * 100.0)
                        .width(0.35)
                        .name(*label)
                })
                .collect();
            BarChart::new(bars)
                .color(side_color(side))
                .name(matchup.club_name(side))
        })
        .collect();

    Plot::new("utilization_chart")
        .legend(Legend::default())
        .height(200.0)
        .include_y(0.0)
        .include_y(100.0)
        .y_axis_label("% of squad")
        .x_axis_formatter(|mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() < f64::EPSILON && (0.0..3.0).contains(&idx) {
                SHORT_LABELS[idx as usize].to_string()
            } else {
                String::new()
            }
        })
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}
