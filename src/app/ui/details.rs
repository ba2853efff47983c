use eframe::egui::{self, Context, Rect, RichText, Ui};

use crate::scan::HostState;

use super::super::graph::TopologyNode;
use super::super::render_utils::{BADGE_FILL, DOWN_TEXT, UP_TEXT};
use super::super::tooltip::{PANEL_WIDTH, position_tooltip};
use super::super::topology::TopologyView;

const MAX_LISTED_PORTS: usize = 8;

pub(in crate::app) fn draw_node_tooltip(ctx: &Context, canvas: Rect, view: &TopologyView) {
    let tooltip = view.tooltip();
    if !tooltip.visible {
        return;
    }
    let Some(node) = tooltip.node.and_then(|index| view.graph().nodes.get(index)) else {
        return;
    };

    let placement = position_tooltip(tooltip.anchor, canvas.width());
    let origin = canvas.min + placement.panel_origin(PANEL_WIDTH).to_vec2();

    egui::Area::new(egui::Id::new("topology-node-tooltip"))
        .order(egui::Order::Tooltip)
        .fixed_pos(origin)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                let inner = PANEL_WIDTH - ui.spacing().menu_margin.sum().x;
                ui.set_width(inner.max(0.0));
                node_details(ui, node);
            });
        });
}

fn node_details(ui: &mut Ui, node: &TopologyNode) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(node.category.glyph()).size(22.0));
        ui.label(RichText::new(node.label.as_str()).strong().size(15.0));
    });
    ui.separator();

    detail_row(ui, "IP", RichText::new(node.ip.as_str()).monospace());
    if let Some(mac) = &node.mac_address {
        detail_row(ui, "MAC", RichText::new(mac.as_str()).monospace());
    }
    if let Some(vendor) = &node.vendor {
        detail_row(ui, "Vendor", RichText::new(vendor.as_str()));
    }
    if let Some(os) = &node.os {
        detail_row(ui, "OS", RichText::new(os.as_str()));
    }

    let state_color = if node.state == HostState::Up {
        UP_TEXT
    } else {
        DOWN_TEXT
    };
    detail_row(
        ui,
        "State",
        RichText::new(node.state.label()).color(state_color).strong(),
    );

    if node.open_port_count > 0 {
        detail_row(
            ui,
            "Open ports",
            RichText::new(node.open_port_count.to_string()).color(BADGE_FILL).strong(),
        );
        for port in node.ports.iter().take(MAX_LISTED_PORTS) {
            ui.label(RichText::new(port.as_str()).monospace().small());
        }
        if node.ports.len() > MAX_LISTED_PORTS {
            ui.label(
                RichText::new(format!("+{} more", node.ports.len() - MAX_LISTED_PORTS))
                    .small()
                    .weak(),
            );
        }
    }

    if let Some(seen) = &node.last_seen {
        ui.add_space(4.0);
        ui.label(RichText::new(format!("Last seen {seen}")).small().weak());
    }
}

fn detail_row(ui: &mut Ui, label: &str, value: RichText) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(label).weak());
        ui.label(value);
    });
}
