use eframe::egui::{self, Align2, Color32, FontId, Painter, Rect, Sense, Shape, Stroke, Ui, vec2};

use crate::util::short_ip;

use super::super::ViewModel;
use super::super::gesture::ViewTransform;
use super::super::pulse::PulseFrame;
use super::super::render_utils::{
    BADGE_FILL, BADGE_STROKE, LABEL_COLOR, LINK_COLOR, PULSE_COLOR, circle_visible,
    draw_background, glow_radius, hovered_radius, node_palette, world_to_screen,
};
use super::super::topology::TopologyView;
use super::super::ui::draw_node_tooltip;
use super::TopologyNode;
use super::interaction::handle_pointer;

const HOVER_SECS: f32 = 0.2;
const LINK_WIDTH: f32 = 3.0;
const LINK_DASH: f32 = 8.0;
const LINK_GAP: f32 = 4.0;
const LINK_OPACITY: f32 = 0.6;
const GLOW_OPACITY: f32 = 0.3;
const BADGE_OFFSET: f32 = 30.0;
const BADGE_RADIUS: f32 = 12.0;

pub(in crate::app) fn port_badge_label(node: &TopologyNode) -> Option<String> {
    (node.open_port_count > 0).then(|| node.open_port_count.to_string())
}

fn pointer_cursor(view: &TopologyView) -> Option<egui::CursorIcon> {
    let grabbing = (0..view.graph().nodes.len()).any(|index| view.simulation().is_pinned(index));
    if grabbing {
        Some(egui::CursorIcon::Grabbing)
    } else {
        view.tooltip().node.map(|_| egui::CursorIcon::PointingHand)
    }
}

impl ViewModel {
    pub(in crate::app) fn draw_topology(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        let now = ui.input(|input| input.time);

        self.ensure_topology(rect.size(), now);

        let Some(view) = self.topology.as_mut() else {
            draw_background(&painter, rect, ViewTransform::IDENTITY);
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Run a scan to see the network topology",
                FontId::proportional(16.0),
                Color32::from_gray(148),
            );
            return;
        };

        draw_background(&painter, rect, view.transform());
        handle_pointer(ui, rect, &response, view);

        let update = view.advance(now);
        if update.needs_repaint() {
            ui.ctx().request_repaint();
        }

        paint_links(&painter, rect, view);
        paint_nodes(ui, &painter, rect, view, update.pulse);
        draw_node_tooltip(ui.ctx(), rect, view);
    }
}

fn paint_links(painter: &Painter, rect: Rect, view: &TopologyView) {
    let transform = view.transform();
    let positions = view.simulation().positions();
    let stroke = Stroke::new(
        LINK_WIDTH * transform.scale,
        LINK_COLOR.gamma_multiply(LINK_OPACITY),
    );

    for &(source, target) in view.simulation().links() {
        let start = world_to_screen(rect, transform, positions[source]);
        let end = world_to_screen(rect, transform, positions[target]);
        if !rect.intersects(Rect::from_two_pos(start, end).expand(LINK_WIDTH)) {
            continue;
        }

        painter.extend(Shape::dashed_line(
            &[start, end],
            stroke,
            LINK_DASH * transform.scale,
            LINK_GAP * transform.scale,
        ));
    }
}

fn paint_nodes(
    ui: &Ui,
    painter: &Painter,
    rect: Rect,
    view: &TopologyView,
    pulse: Option<PulseFrame>,
) {
    let transform = view.transform();
    let scale = transform.scale;
    let hovered = view.tooltip().node;
    let mut hover_animating = false;

    for (index, node) in view.graph().nodes.iter().enumerate() {
        let world = view.simulation().positions()[index];
        let center = world_to_screen(rect, transform, world);
        if !circle_visible(rect, center, (glow_radius(node) + BADGE_OFFSET) * scale) {
            continue;
        }

        let palette = node_palette(node);
        let hover = ui.ctx().animate_bool_with_time(
            egui::Id::new(("topology-hover", node.id.as_str())),
            hovered == Some(index),
            HOVER_SECS,
        );
        if hover > 0.0 && hover < 1.0 {
            hover_animating = true;
        }

        painter.circle_filled(
            center,
            glow_radius(node) * scale,
            palette.glow.gamma_multiply(GLOW_OPACITY),
        );
        painter.circle_filled(
            center,
            (glow_radius(node) + 3.0) * scale,
            palette.glow.gamma_multiply(GLOW_OPACITY * 0.35),
        );

        let radius = hovered_radius(node, hover) * scale;
        painter.circle_filled(center, radius, palette.fill);
        painter.circle_stroke(
            center,
            radius,
            Stroke::new((3.0 + 2.0 * hover) * scale, palette.stroke),
        );

        if index == view.graph().router_index
            && let Some(frame) = pulse
        {
            painter.circle_stroke(
                center,
                frame.radius * scale,
                Stroke::new(2.0 * scale, PULSE_COLOR.gamma_multiply(frame.opacity)),
            );
        }

        let glyph_size = if node.is_router { 32.0 } else { 28.0 };
        painter.text(
            center,
            Align2::CENTER_CENTER,
            node.category.glyph(),
            FontId::proportional(glyph_size * scale),
            Color32::WHITE,
        );

        let label_offset = if node.is_router { 70.0 } else { 60.0 };
        painter.text(
            center + vec2(0.0, label_offset * scale),
            Align2::CENTER_CENTER,
            short_ip(&node.ip),
            FontId::monospace(13.0 * scale),
            LABEL_COLOR,
        );

        if let Some(badge) = port_badge_label(node) {
            let badge_center = center + vec2(BADGE_OFFSET, -BADGE_OFFSET) * scale;
            painter.circle_filled(badge_center, BADGE_RADIUS * scale, BADGE_FILL);
            painter.circle_stroke(
                badge_center,
                BADGE_RADIUS * scale,
                Stroke::new(2.0 * scale, BADGE_STROKE),
            );
            painter.text(
                badge_center,
                Align2::CENTER_CENTER,
                badge,
                FontId::proportional(11.0 * scale),
                Color32::WHITE,
            );
        }
    }

    if let Some(cursor) = pointer_cursor(view) {
        ui.output_mut(|output| output.cursor_icon = cursor);
    }

    if hover_animating {
        ui.ctx().request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::classify::DeviceCategory;
    use crate::app::physics::SimulationConfig;
    use crate::scan::{HostState, parse_scan_results};

    fn node_with_ports(open_port_count: usize) -> TopologyNode {
        TopologyNode {
            id: "192.168.1.20".to_owned(),
            label: "nas".to_owned(),
            ip: "192.168.1.20".to_owned(),
            state: HostState::Up,
            open_port_count,
            ports: Vec::new(),
            vendor: Some("Synology".to_owned()),
            os: None,
            mac_address: None,
            last_seen: None,
            is_router: false,
            category: DeviceCategory::Server,
        }
    }

    #[test]
    fn badge_only_for_open_ports() {
        assert_eq!(port_badge_label(&node_with_ports(0)), None);
        assert_eq!(port_badge_label(&node_with_ports(1)).as_deref(), Some("1"));
        assert_eq!(port_badge_label(&node_with_ports(23)).as_deref(), Some("23"));
    }

    #[test]
    fn cursor_grabs_while_a_node_is_held() {
        let hosts = parse_scan_results(
            r#"{"hosts": [{"ip": "192.168.1.1", "state": "up"}, {"ip": "192.168.1.7", "state": "up"}]}"#,
        )
        .expect("valid scan results")
        .hosts
        .expect("hosts present");
        let mut view = TopologyView::build(&hosts, vec2(900.0, 600.0), 0.0, SimulationConfig::default())
            .expect("non-empty input");
        let world = view.simulation().position(1).expect("node exists");
        let node = view.transform().apply(world).to_pos2();

        assert_eq!(pointer_cursor(&view), None);
        view.hover(Some(node));
        assert_eq!(pointer_cursor(&view), Some(egui::CursorIcon::PointingHand));

        view.pointer_pressed(node);
        assert_eq!(pointer_cursor(&view), Some(egui::CursorIcon::Grabbing));
        view.pointer_released();
        assert_eq!(pointer_cursor(&view), Some(egui::CursorIcon::PointingHand));
    }
}
