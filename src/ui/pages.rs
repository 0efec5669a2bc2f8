use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::MatchdayView;
use crate::data::matchup::Matchup;
use crate::data::records::ClubSide;
use crate::format::NumberFormat::{self, Count, Decimal, Percent, Thousands};
use crate::state::{AppState, Page};
use crate::ui::plot;
use crate::ui::widgets::{club_logo, comparison_row, dual_progress_bar, kpi_chip, section_header};

fn page_error(ui: &mut Ui, msg: &str) {
    ui.label(RichText::new(msg).color(Color32::RED).strong());
}

// ---------------------------------------------------------------------------
// Homepage
// ---------------------------------------------------------------------------

pub fn home(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        ui.horizontal(|ui: &mut Ui| {
            for pill in ["Season 2025-26", "Matchday dashboard", "Transfermarkt-based"] {
                egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                    ui.label(RichText::new(pill).strong());
                });
            }
            if let Ok(clubs) = state.load_clubs() {
                kpi_chip(ui, "Clubs", &clubs.len().to_string());
            }
        });
        ui.label(RichText::new("La Liga Squad Efficiency").size(40.0).strong());
        ui.label(
            "Explore how market value, availability, age and loan strategy relate to \
             team performance, one matchday at a time.",
        );
        ui.label(RichText::new("Tip: Use the sidebar to navigate pages").weak());
        ui.separator();

        ui.heading("Dashboard overview");
        ui.label("This dashboard explores squad efficiency in La Liga at the match level.");
        ui.label("Instead of focusing only on results, we look at:");
        for point in [
            "Who was available",
            "Who was actually used",
            "The age and market value of deployed players",
            "How clubs differ in squad depth and utilization",
        ] {
            ui.label(format!("  • {point}"));
        }

        let start = egui::Button::new(RichText::new("START EXPLORING").strong())
            .min_size(egui::vec2(ui.available_width(), 36.0));
        if ui.add(start).clicked() {
            state.page = Page::MatchdayOverview;
        }
        ui.separator();

        ui.columns(2, |cols| {
            cols[0].heading(RichText::new("Matchday overview").color(Color32::YELLOW));
            cols[0].label(
                "Scan all matches of a selected matchday, see fixtures, dates \
                 and quickly jump into match analysis.",
            );
            cols[1].heading(RichText::new("Match analysis").color(Color32::YELLOW));
            cols[1].label(
                "Compare two teams in a single match using squad availability, \
                 age profiles and market value deployment.",
            );
        });
        ui.separator();

        ui.columns(3, |cols| {
            let cards = [
                (
                    "Pick a matchday",
                    "Browse fixtures for the selected matchday and jump into match analysis.",
                ),
                (
                    "Compare two teams",
                    "Side by side squad availability, age profile and market value deployment.",
                ),
                (
                    "What is inside",
                    "Gold KPI tables only, no heavy computations inside the UI layer.",
                ),
            ];
            for (col, (title, body)) in cols.iter_mut().zip(cards) {
                egui::Frame::group(col.style()).show(col, |ui: &mut Ui| {
                    ui.strong(title);
                    ui.add_space(6.0);
                    ui.label(body);
                });
            }
        });
        ui.separator();

        ui.label(
            RichText::new(
                "Data source: Transfermarkt | Project: Squad efficiency in La Liga 2025–26 | \
                 HEC Lausanne - University of Lausanne",
            )
            .small()
            .weak(),
        );
    });
}

// ---------------------------------------------------------------------------
// Matchday overview
// ---------------------------------------------------------------------------

pub fn matchday_overview(ui: &mut Ui, state: &mut AppState) {
    ui.heading(RichText::new("Matchday Overview").size(28.0));

    let schedule = match state.load_schedule() {
        Ok(schedule) => schedule,
        Err(e) => return page_error(ui, &format!("{e:#}")),
    };
    let view = match MatchdayView::build(&schedule, &state.selection) {
        Ok(view) => view,
        Err(e) => {
            ui.label(RichText::new(e.to_string()).color(Color32::YELLOW));
            return;
        }
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.heading(view.title());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            if let Some((label, value)) = view.date_span() {
                kpi_chip(ui, label, &value);
            }
            kpi_chip(ui, "Matches", &view.fixtures.len().to_string());
        });
    });

    if !view.has_logo_ids() {
        ui.label(
            RichText::new(
                "Tip: Add home_club_id and away_club_id to matchday_overview_gold \
                 to display team logos on this page.",
            )
            .color(Color32::LIGHT_BLUE),
        );
    }
    ui.separator();

    let mut opened: Option<String> = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for m in &view.fixtures {
                egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui: &mut Ui| {
                        ui.vertical(|ui: &mut Ui| {
                            ui.set_width(110.0);
                            if let Some(date) = m.match_date {
                                let date = date.format("%a %Y-%m-%d").to_string();
                                ui.label(RichText::new(date).weak());
                            }
                            if let Some(time) = &m.kickoff_time {
                                ui.label(RichText::new(time).weak());
                            }
                        });
                        club_logo(ui, &state.logos, m.home_club_id.as_deref(), 48.0);
                        ui.label(RichText::new(&m.home_club_name).strong().size(16.0));
                        ui.label(
                            RichText::new(m.result_string.as_deref().unwrap_or("-"))
                                .strong()
                                .size(20.0),
                        );
                        ui.label(RichText::new(&m.away_club_name).strong().size(16.0));
                        club_logo(ui, &state.logos, m.away_club_id.as_deref(), 48.0);
                        let right = egui::Layout::right_to_left(egui::Align::Center);
                        ui.with_layout(right, |ui: &mut Ui| {
                            if ui.button("View").clicked() {
                                opened = Some(m.match_id.clone());
                            }
                        });
                    });
                });
            }
        });

    if let Some(match_id) = opened {
        log::info!("Opening match {match_id}");
        state.open_match(&match_id);
    }
}

// ---------------------------------------------------------------------------
// Match analysis
// ---------------------------------------------------------------------------

pub fn match_analysis(ui: &mut Ui, state: &mut AppState) {
    if ui.button("← Back to Matchday selection").clicked() {
        state.back_to_matchday();
        return;
    }
    ui.heading(RichText::new("Match Analysis").size(28.0));

    let loaded = state
        .load_schedule()
        .and_then(|schedule| state.load_kpis().map(|kpis| (schedule, kpis)));
    let (schedule, kpis) = match loaded {
        Ok(records) => records,
        Err(e) => return page_error(ui, &format!("{e:#}")),
    };
    let match_id = state.selected_match_id.clone().unwrap_or_default();
    let matchup = match Matchup::find(&schedule.matches, &kpis, &match_id) {
        Ok(matchup) => matchup,
        Err(e) => return page_error(ui, &e.to_string()),
    };
    let names = (
        matchup.club_name(ClubSide::Home),
        matchup.club_name(ClubSide::Away),
    );

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                ui.set_width(ui.available_width());
                ui.columns(3, |cols| {
                    cols[0].horizontal(|ui: &mut Ui| {
                        club_logo(ui, &state.logos, matchup.club_id(ClubSide::Home), 80.0);
                        ui.label(RichText::new(names.0).strong().size(20.0));
                    });
                    cols[1].vertical_centered(|ui: &mut Ui| {
                        ui.label(RichText::new(matchup.score()).strong().size(32.0));
                        let meta = matchup.meta_line();
                        if !meta.is_empty() {
                            ui.label(RichText::new(meta).weak());
                        }
                    });
                    let right = egui::Layout::right_to_left(egui::Align::Center);
                    cols[2].with_layout(right, |ui: &mut Ui| {
                        club_logo(ui, &state.logos, matchup.club_id(ClubSide::Away), 80.0);
                        ui.label(RichText::new(names.1).strong().size(20.0));
                    });
                });
            });

            let (home, away) = (matchup.home, matchup.away);

            section_header(ui, "Squad availability");
            comparison_grid(
                ui,
                "availability",
                &[
                    ("Total squad players", home.players_total_squad, away.players_total_squad, Count),
                    ("Players available", home.players_available, away.players_available, Count),
                    ("Players used", home.players_used, away.players_used, Count),
                    ("Usage rate", home.usage_rate, away.usage_rate, Percent),
                ],
            );

            ui.separator();
            section_header(ui, "Squad utilization ratios");
            for ((label, h), (_, a)) in home.shares().into_iter().zip(away.shares()) {
                dual_progress_bar(ui, label, h, a, names);
            }
            plot::utilization_chart(ui, &matchup);
            ui.label(
                RichText::new(
                    "Ratios are expressed as a share of the registered squad. \
                     Deployed players are those who played at least one minute.",
                )
                .small()
                .weak(),
            );

            ui.separator();
            section_header(ui, "Age profile");
            comparison_grid(
                ui,
                "age",
                &[
                    ("Average age", home.avg_age_used, away.avg_age_used, Decimal),
                    ("Minutes weighted age", home.weighted_age_used, away.weighted_age_used, Decimal),
                ],
            );

            ui.separator();
            section_header(ui, "Market value");
            comparison_grid(
                ui,
                "market_value",
                &[
                    (
                        "Average market value",
                        home.avg_market_value_used,
                        away.avg_market_value_used,
                        Decimal,
                    ),
                    (
                        "Minutes weighted market value",
                        home.weighted_market_value_used,
                        away.weighted_market_value_used,
                        Decimal,
                    ),
                    (
                        "Deployed squad market value",
                        home.deployed_squad_market_value,
                        away.deployed_squad_market_value,
                        Thousands,
                    ),
                ],
            );
        });
}

type ComparisonRow<'a> = (&'a str, Option<f64>, Option<f64>, NumberFormat);

fn comparison_grid(ui: &mut Ui, id: &str, rows: &[ComparisonRow<'_>]) {
    egui::Grid::new(id)
        .num_columns(3)
        .striped(true)
        .min_col_width(120.0)
        .show(ui, |ui: &mut Ui| {
            for &(label, home, away, format) in rows {
                comparison_row(ui, label, home, away, format);
            }
        });
}
