use eframe::egui::{self, Pos2, Rect, Ui};

use super::super::topology::TopologyView;

fn to_local(rect: Rect, screen: Pos2) -> Pos2 {
    (screen - rect.min).to_pos2()
}

pub(super) fn handle_pointer(
    ui: &Ui,
    rect: Rect,
    response: &egui::Response,
    view: &mut TopologyView,
) {
    if response.drag_started_by(egui::PointerButton::Primary)
        && let Some(origin) = ui.input(|input| input.pointer.press_origin())
    {
        view.pointer_pressed(to_local(rect, origin));
    }

    if response.dragged_by(egui::PointerButton::Primary)
        && let Some(pointer) = response.interact_pointer_pos()
    {
        view.pointer_dragged(to_local(rect, pointer), response.drag_delta());
    }

    if response.drag_stopped() {
        view.pointer_released();
    }

    let hover_pos = ui
        .input(|input| input.pointer.hover_pos())
        .filter(|pointer| rect.contains(*pointer));

    if response.hovered() {
        let anchor = to_local(rect, hover_pos.unwrap_or_else(|| rect.center()));
        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        view.wheel(anchor, scroll);

        if let Some(touch) = ui.input(|input| input.multi_touch()) {
            view.pinch(to_local(rect, touch.center_pos), touch.zoom_delta);
        }
    }

    view.hover(hover_pos.map(|pointer| to_local(rect, pointer)));
}
