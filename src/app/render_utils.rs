use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use crate::scan::HostState;

use super::gesture::ViewTransform;
use super::graph::TopologyNode;

pub(super) const CANVAS_BACKGROUND: Color32 = Color32::from_rgb(15, 23, 42);
pub(super) const LINK_COLOR: Color32 = Color32::from_rgb(0x47, 0x55, 0x69);
pub(super) const LABEL_COLOR: Color32 = Color32::from_rgb(0xcb, 0xd5, 0xe1);
pub(super) const BADGE_FILL: Color32 = Color32::from_rgb(0xf5, 0x9e, 0x0b);
pub(super) const BADGE_STROKE: Color32 = Color32::from_rgb(0xfb, 0xbf, 0x24);
pub(super) const PULSE_COLOR: Color32 = Color32::from_rgb(0x60, 0xa5, 0xfa);
pub(super) const UP_TEXT: Color32 = Color32::from_rgb(0x34, 0xd3, 0x99);
pub(super) const DOWN_TEXT: Color32 = Color32::from_rgb(0xf8, 0x71, 0x71);

const ROUTER_RADIUS: f32 = 45.0;
const HOST_RADIUS: f32 = 35.0;
const HOVER_GROWTH: f32 = 10.0;
const GLOW_GROWTH: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct NodePalette {
    pub fill: Color32,
    pub stroke: Color32,
    pub glow: Color32,
}

pub(super) const ROUTER_PALETTE: NodePalette = NodePalette {
    fill: Color32::from_rgb(0x25, 0x63, 0xeb),
    stroke: Color32::from_rgb(0x60, 0xa5, 0xfa),
    glow: Color32::from_rgb(0x1e, 0x40, 0xaf),
};

pub(super) const UP_PALETTE: NodePalette = NodePalette {
    fill: Color32::from_rgb(0x10, 0xb9, 0x81),
    stroke: Color32::from_rgb(0x34, 0xd3, 0x99),
    glow: Color32::from_rgb(0x05, 0x96, 0x69),
};

pub(super) const DOWN_PALETTE: NodePalette = NodePalette {
    fill: Color32::from_rgb(0xef, 0x44, 0x44),
    stroke: Color32::from_rgb(0xf8, 0x71, 0x71),
    glow: Color32::from_rgb(0xdc, 0x26, 0x26),
};

pub(super) fn node_palette(node: &TopologyNode) -> NodePalette {
    if node.is_router {
        ROUTER_PALETTE
    } else if node.state == HostState::Up {
        UP_PALETTE
    } else {
        DOWN_PALETTE
    }
}

pub(super) fn node_radius(node: &TopologyNode) -> f32 {
    if node.is_router { ROUTER_RADIUS } else { HOST_RADIUS }
}

pub(super) fn hovered_radius(node: &TopologyNode, hover: f32) -> f32 {
    node_radius(node) + HOVER_GROWTH * hover.clamp(0.0, 1.0)
}

pub(super) fn glow_radius(node: &TopologyNode) -> f32 {
    node_radius(node) + GLOW_GROWTH
}

pub(super) fn world_to_screen(rect: Rect, transform: ViewTransform, world: Vec2) -> Pos2 {
    rect.min + transform.apply(world)
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, transform: ViewTransform) {
    painter.rect_filled(rect, 0.0, CANVAS_BACKGROUND);

    let step = (48.0 * transform.scale).max(16.0);
    let origin = rect.min + transform.translate;
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(51, 65, 85, 60));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    rect.expand(radius).contains(position)
}
