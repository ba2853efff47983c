mod details;
mod panels;

pub(super) use details::draw_node_tooltip;
