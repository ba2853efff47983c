use eframe::egui::{Pos2, Vec2, vec2};

const POINTER_OFFSET: Vec2 = vec2(20.0, 20.0);
const FLIP_MARGIN: f32 = 300.0;
const FLIP_GAP: f32 = 40.0;
pub(in crate::app) const PANEL_WIDTH: f32 = 280.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct TooltipPlacement {
    pub pos: Pos2,
    pub flip: bool,
}

impl TooltipPlacement {
    pub(in crate::app) fn panel_origin(self, panel_width: f32) -> Pos2 {
        if self.flip {
            Pos2::new(self.pos.x - panel_width - FLIP_GAP, self.pos.y)
        } else {
            self.pos
        }
    }
}

pub(in crate::app) fn position_tooltip(pointer: Pos2, container_width: f32) -> TooltipPlacement {
    TooltipPlacement {
        pos: pointer + POINTER_OFFSET,
        flip: pointer.x > container_width - FLIP_MARGIN,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(in crate::app) struct TooltipState {
    pub visible: bool,
    pub anchor: Pos2,
    pub node: Option<usize>,
}

impl TooltipState {
    pub(in crate::app) fn hidden() -> Self {
        Self::default()
    }

    pub(in crate::app) fn hovering(node: usize, anchor: Pos2) -> Self {
        Self {
            visible: true,
            anchor,
            node: Some(node),
        }
    }

    pub(in crate::app) fn observe(hit: Option<usize>, pointer: Option<Pos2>) -> Self {
        match (hit, pointer) {
            (Some(node), Some(anchor)) => Self::hovering(node, anchor),
            _ => Self::hidden(),
        }
    }
}
