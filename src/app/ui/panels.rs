use std::path::Path;

use eframe::egui::{
    self, Align, Color32, Context, Layout, RichText, Sense, Shape, Stroke, Ui, ViewportCommand,
    vec2,
};

use crate::scan::ScanResults;

use super::super::ViewModel;
use super::super::classify::DeviceCategory;
use super::super::physics::SimulationConfig;
use super::super::render_utils::{
    BADGE_FILL, BADGE_STROKE, CANVAS_BACKGROUND, DOWN_PALETTE, LINK_COLOR, NodePalette,
    ROUTER_PALETTE, UP_PALETTE,
};

const HINT: &str = "Drag nodes to move them · scroll or pinch to zoom · drag the background to pan";

impl ViewModel {
    pub(in crate::app) fn new(results: ScanResults, fullscreen: bool) -> Self {
        Self {
            results,
            topology: None,
            config: SimulationConfig::default(),
            fullscreen,
            graph_dirty: true,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        scan_path: &Path,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("header")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Network topology");
                    ui.separator();
                    ui.label(RichText::new(HINT).weak());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        self.draw_header_buttons(ui, reload_requested, is_loading);
                        ui.label(RichText::new(scan_path.display().to_string()).small().weak());
                    });
                });
            });

        egui::TopBottomPanel::bottom("summary")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal_wrapped(|ui| {
                    draw_legend(ui);
                    ui.separator();
                    self.draw_network_info(ui);
                });
                ui.horizontal(|ui| self.draw_layout_status(ui));
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(CANVAS_BACKGROUND))
            .show(ctx, |ui| self.draw_topology(ui));
    }

    fn draw_header_buttons(&mut self, ui: &mut Ui, reload_requested: &mut bool, is_loading: bool) {
        if is_loading {
            ui.spinner();
        }

        let reload_button = ui.add_enabled(!is_loading, egui::Button::new("Reload"));
        if reload_button.clicked() {
            tracing::info!("reloading scan results");
            *reload_requested = true;
        }

        let label = if self.fullscreen {
            "Exit fullscreen"
        } else {
            "Fullscreen"
        };
        if ui.button(label).clicked() {
            self.toggle_fullscreen(ui.ctx());
        }

        let reset_button = ui.add_enabled(self.topology.is_some(), egui::Button::new("Reset"));
        if reset_button.clicked()
            && let Some(view) = self.topology.as_mut()
        {
            view.reset_simulation(ui.input(|input| input.time));
        }
    }

    fn toggle_fullscreen(&mut self, ctx: &Context) {
        self.fullscreen = !self.fullscreen;
        ctx.send_viewport_cmd(ViewportCommand::Fullscreen(self.fullscreen));
        self.graph_dirty = true;
        tracing::info!(fullscreen = self.fullscreen, "toggled fullscreen");
    }

    fn draw_network_info(&self, ui: &mut Ui) {
        let results = &self.results;
        let hosts = results.hosts.as_deref().unwrap_or_default();
        let total = if results.total_hosts > 0 {
            results.total_hosts
        } else {
            hosts.len()
        };
        let active = if results.active_hosts > 0 {
            results.active_hosts
        } else {
            hosts.iter().filter(|host| host.state.is_up()).count()
        };
        let range = if results.network_range.is_empty() {
            "-"
        } else {
            results.network_range.as_str()
        };

        info_item(ui, "Range", range);
        info_item(ui, "Topology", "Star");
        info_item(ui, "Hosts", &total.to_string());
        info_item(ui, "Active", &active.to_string());

        if let Some(finished) = results.scan_end.as_ref().or(results.scan_start.as_ref()) {
            info_item(ui, "Scanned", finished);
        }
        if let Some(duration) = results.duration {
            info_item(ui, "Duration", &format!("{duration:.1} s"));
        }
        if let Some(scan_id) = &results.scan_id {
            info_item(ui, "Scan", scan_id);
        }
    }

    fn draw_layout_status(&self, ui: &mut Ui) {
        let layout = match self.topology.as_ref().map(|view| view.simulation()) {
            None => "-".to_owned(),
            Some(simulation) if !simulation.is_running() => "settled".to_owned(),
            Some(simulation) if simulation.alpha_target() > 0.0 => {
                format!("following drag, tick {}", simulation.tick_count())
            }
            Some(simulation) => format!(
                "settling, tick {} (alpha {:.3})",
                simulation.tick_count(),
                simulation.alpha()
            ),
        };
        info_item(ui, "Layout", &layout);
    }
}

fn info_item(ui: &mut Ui, label: &str, value: &str) {
    ui.label(RichText::new(label).weak());
    ui.label(RichText::new(value).monospace().strong());
    ui.add_space(8.0);
}

fn draw_legend(ui: &mut Ui) {
    legend_disc(ui, ROUTER_PALETTE, "Router");
    legend_disc(ui, UP_PALETTE, "Active");
    legend_disc(ui, DOWN_PALETTE, "Inactive");
    legend_disc(
        ui,
        NodePalette {
            fill: BADGE_FILL,
            stroke: BADGE_STROKE,
            glow: BADGE_FILL,
        },
        "Open ports",
    );

    let (rect, _) = ui.allocate_exact_size(vec2(28.0, 14.0), Sense::hover());
    ui.painter().extend(Shape::dashed_line(
        &[rect.left_center(), rect.right_center()],
        Stroke::new(2.0, LINK_COLOR),
        6.0,
        3.0,
    ));
    ui.label("Connection");

    ui.separator();
    for category in DeviceCategory::ALL {
        ui.label(format!("{} {}", category.glyph(), category.label()));
    }
}

fn legend_disc(ui: &mut Ui, palette: NodePalette, label: &str) {
    let (rect, _) = ui.allocate_exact_size(vec2(14.0, 14.0), Sense::hover());
    ui.painter().circle_filled(rect.center(), 6.0, palette.fill);
    ui.painter()
        .circle_stroke(rect.center(), 6.0, Stroke::new(1.5, palette.stroke));
    ui.label(RichText::new(label).color(Color32::from_gray(210)));
    ui.add_space(6.0);
}
