mod drag;
mod zoom;

pub(in crate::app) use drag::DragController;
pub(in crate::app) use zoom::{ViewTransform, ZoomController};
