use eframe::egui::{Pos2, Vec2};

use crate::scan::Host;

use super::gesture::{DragController, ViewTransform, ZoomController};
use super::graph::{TopologyGraph, build_topology};
use super::physics::{Simulation, SimulationConfig};
use super::pulse::{PulseAnimator, PulseFrame};
use super::render_utils::node_radius;
use super::tooltip::TooltipState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PointerGesture {
    NodeDrag(usize),
    Pan,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(in crate::app) struct FrameUpdate {
    pub ticked: bool,
    pub pulse: Option<PulseFrame>,
    pub dragging: bool,
}

impl FrameUpdate {
    pub(in crate::app) fn needs_repaint(&self) -> bool {
        self.ticked || self.pulse.is_some() || self.dragging
    }
}

pub(in crate::app) struct TopologyView {
    graph: TopologyGraph,
    simulation: Simulation,
    zoom: ZoomController,
    drag: DragController,
    pulse: PulseAnimator,
    tooltip: TooltipState,
    gesture: Option<PointerGesture>,
    stop_at: Option<f64>,
    size: Vec2,
    live: bool,
}

impl TopologyView {
    pub(in crate::app) fn build(
        hosts: &[Host],
        size: Vec2,
        now: f64,
        config: SimulationConfig,
    ) -> Option<Self> {
        let graph = build_topology(hosts)?;
        let simulation = Simulation::new(graph.nodes.len(), graph.edge_pairs(), size * 0.5, config);

        tracing::info!(
            nodes = graph.nodes.len(),
            links = graph.links.len(),
            router = graph.router_id(),
            width = size.x,
            height = size.y,
            "built topology view"
        );

        Some(Self {
            graph,
            simulation,
            zoom: ZoomController::default(),
            drag: DragController::default(),
            pulse: PulseAnimator::start(now),
            tooltip: TooltipState::hidden(),
            gesture: None,
            stop_at: None,
            size,
            live: true,
        })
    }

    pub(in crate::app) fn graph(&self) -> &TopologyGraph {
        &self.graph
    }

    pub(in crate::app) fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub(in crate::app) fn transform(&self) -> ViewTransform {
        self.zoom.transform()
    }

    pub(in crate::app) fn tooltip(&self) -> TooltipState {
        self.tooltip
    }

    pub(in crate::app) fn size(&self) -> Vec2 {
        self.size
    }

    pub(in crate::app) fn advance(&mut self, now: f64) -> FrameUpdate {
        if !self.live {
            return FrameUpdate::default();
        }

        if let Some(deadline) = self.stop_at
            && now >= deadline
        {
            self.stop_at = None;
            self.simulation.stop();
            tracing::debug!(ticks = self.simulation.tick_count(), "reset stop timer fired");
        }

        FrameUpdate {
            ticked: self.simulation.tick(),
            pulse: self.pulse.sample(now),
            dragging: self.drag.is_active(),
        }
    }

    pub(in crate::app) fn reset_simulation(&mut self, now: f64) {
        if !self.live {
            return;
        }

        self.simulation.reheat();
        self.stop_at = Some(now + self.simulation.config().reset_stop_after_secs);
        tracing::debug!("simulation reheated");
    }

    pub(in crate::app) fn node_at(&self, local: Pos2) -> Option<usize> {
        let world = self.zoom.transform().invert(local.to_vec2());
        self.simulation
            .positions()
            .iter()
            .enumerate()
            .filter_map(|(index, position)| {
                let distance = (*position - world).length();
                (distance <= node_radius(&self.graph.nodes[index])).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    pub(in crate::app) fn pointer_pressed(&mut self, local: Pos2) {
        if !self.live || self.gesture.is_some() {
            return;
        }

        self.gesture = Some(match self.node_at(local) {
            Some(index) => {
                let world = self.zoom.transform().invert(local.to_vec2());
                self.drag.on_drag_start(&mut self.simulation, index, world);
                PointerGesture::NodeDrag(index)
            }
            None => PointerGesture::Pan,
        });
    }

    pub(in crate::app) fn pointer_dragged(&mut self, local: Pos2, delta: Vec2) {
        if !self.live {
            return;
        }

        match self.gesture {
            Some(PointerGesture::NodeDrag(index)) => {
                let world = self.zoom.transform().invert(local.to_vec2());
                self.drag.on_drag_move(&mut self.simulation, index, world);
            }
            Some(PointerGesture::Pan) => self.zoom.on_pan(delta),
            None => {}
        }
    }

    pub(in crate::app) fn pointer_released(&mut self) {
        if let Some(PointerGesture::NodeDrag(index)) = self.gesture.take() {
            self.drag.on_drag_end(&mut self.simulation, index);
        }
    }

    pub(in crate::app) fn wheel(&mut self, local: Pos2, scroll_y: f32) {
        if self.live {
            self.zoom.on_wheel(local.to_vec2(), scroll_y);
        }
    }

    pub(in crate::app) fn pinch(&mut self, local: Pos2, zoom_factor: f32) {
        if self.live {
            self.zoom.on_pinch(local.to_vec2(), zoom_factor);
        }
    }

    pub(in crate::app) fn hover(&mut self, local: Option<Pos2>) {
        if !self.live {
            return;
        }

        let hit = local.and_then(|point| self.node_at(point));
        self.tooltip = TooltipState::observe(hit, local);
    }

    pub(in crate::app) fn teardown(&mut self) {
        if !self.live {
            return;
        }

        self.live = false;
        self.simulation.stop();
        self.pulse.cancel();
        self.stop_at = None;
        self.gesture = None;
        self.drag.release_all(&mut self.simulation);
        self.tooltip = TooltipState::hidden();
        tracing::debug!(nodes = self.graph.nodes.len(), "topology view torn down");
    }
}

impl Drop for TopologyView {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;
    use crate::app::classify::DeviceCategory;
    use crate::app::graph::port_badge_label;
    use crate::scan::parse_scan_results;

    const SIZE: Vec2 = vec2(1000.0, 700.0);
    const FRAME: f64 = 1.0 / 60.0;

    fn printer_scan() -> Vec<Host> {
        let raw = r#"{"hosts": [
            {"ip": "192.168.1.1", "state": "up", "ports": []},
            {"ip": "192.168.1.5", "hostname": "printer-hp", "state": "up", "ports": [{}, {}]}
        ]}"#;
        parse_scan_results(raw)
            .expect("valid scan results")
            .hosts
            .expect("hosts present")
    }

    fn view() -> TopologyView {
        TopologyView::build(&printer_scan(), SIZE, 0.0, SimulationConfig::default())
            .expect("non-empty input")
    }

    fn local(view: &TopologyView, index: usize) -> Pos2 {
        let world = view.simulation().position(index).expect("node exists");
        view.transform().apply(world).to_pos2()
    }

    #[test]
    fn printer_scan_end_to_end() {
        let view = view();
        let graph = view.graph();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.links.len(), 1);
        let link = graph.links[0];
        assert_eq!(graph.nodes[link.source].id, "192.168.1.1");
        assert_eq!(graph.nodes[link.target].id, "192.168.1.5");
        assert_eq!(graph.router_id(), "192.168.1.1");

        let printer = &graph.nodes[1];
        assert_eq!(printer.category, DeviceCategory::Printer);
        assert_eq!(port_badge_label(printer).as_deref(), Some("2"));
        assert_eq!(port_badge_label(&graph.nodes[0]), None);
        assert_eq!(view.transform(), ViewTransform::IDENTITY);
    }

    #[test]
    fn empty_hosts_build_nothing() {
        assert!(TopologyView::build(&[], SIZE, 0.0, SimulationConfig::default()).is_none());
    }

    #[test]
    fn frames_tick_and_pulse_until_teardown() {
        let mut view = view();
        let mut now = 0.0;
        for _ in 0..5 {
            now += FRAME;
            let update = view.advance(now);
            assert!(update.ticked);
            assert!(update.pulse.is_some());
            assert!(update.needs_repaint());
        }

        view.teardown();
        let frozen = view.simulation().positions().to_vec();
        for _ in 0..30 {
            now += FRAME;
            let update = view.advance(now);
            assert_eq!(update, FrameUpdate::default());
            assert!(!update.needs_repaint());
        }
        assert_eq!(view.simulation().positions(), frozen.as_slice());
        assert_eq!(view.simulation().tick_count(), 5);
    }

    #[test]
    fn gestures_are_ignored_after_teardown() {
        let mut view = view();
        let router = local(&view, 0);
        view.teardown();

        view.pointer_pressed(router);
        view.pointer_dragged(router + vec2(80.0, 0.0), vec2(80.0, 0.0));
        view.wheel(router, 500.0);
        view.hover(Some(router));

        assert!(!view.simulation().is_pinned(0));
        assert_eq!(view.transform(), ViewTransform::IDENTITY);
        assert!(!view.tooltip().visible);
        assert!(!view.simulation().is_running());
    }

    #[test]
    fn teardown_releases_active_drags() {
        let mut view = view();
        let printer = local(&view, 1);
        view.pointer_pressed(printer);
        assert!(view.simulation().is_pinned(1));

        view.teardown();
        assert!(!view.simulation().is_pinned(1));
        assert_eq!(view.simulation().alpha_target(), 0.0);
        view.teardown();
    }

    #[test]
    fn reset_reheats_then_stops_after_the_delay() {
        let mut view = view();
        let mut now = 0.0;
        while view.advance(now).ticked {
            now += FRAME;
        }
        assert!(!view.simulation().is_running());

        view.reset_simulation(now);
        assert_eq!(view.simulation().tick_count(), 0);
        assert_eq!(view.simulation().alpha(), 1.0);

        assert!(view.advance(now + 1.0).ticked);
        assert!(view.advance(now + 2.9).ticked);
        assert!(!view.advance(now + 3.0).ticked);
        assert!(!view.simulation().is_running());
        assert!(view.advance(now + 3.1).pulse.is_some(), "pulse outlives the simulation");
    }

    #[test]
    fn dragging_a_node_pins_it_under_the_pointer() {
        let mut view = view();
        for step in 1..20 {
            view.advance(step as f64 * FRAME);
        }

        let start = local(&view, 1);
        view.pointer_pressed(start);
        assert!(view.simulation().is_pinned(1));
        assert_eq!(view.simulation().alpha_target(), 0.1);

        let target = start + vec2(60.0, -25.0);
        view.pointer_dragged(target, vec2(60.0, -25.0));
        view.advance(1.0);
        assert!((local(&view, 1) - target).length() < 1e-3);

        view.pointer_released();
        assert!(!view.simulation().is_pinned(1));
        assert_eq!(view.simulation().alpha_target(), 0.0);
        assert!(!view.advance(1.1).dragging);
    }

    #[test]
    fn dragging_the_background_pans_the_view() {
        let mut view = view();
        let empty_corner = Pos2::new(2.0, 2.0);
        assert!(view.node_at(empty_corner).is_none());
        let before = view.simulation().positions().to_vec();

        view.pointer_pressed(empty_corner);
        view.pointer_dragged(empty_corner + vec2(30.0, 10.0), vec2(30.0, 10.0));
        view.pointer_released();

        assert_eq!(view.transform().translate, vec2(30.0, 10.0));
        assert_eq!(view.simulation().positions(), before.as_slice());
    }

    #[test]
    fn hover_shows_and_clears_the_tooltip() {
        let mut view = view();
        let printer = local(&view, 1);

        view.hover(Some(printer));
        assert!(view.tooltip().visible);
        assert_eq!(view.tooltip().node, Some(1));
        assert_eq!(view.tooltip().anchor, printer);

        view.hover(Some(Pos2::new(2.0, 2.0)));
        assert!(!view.tooltip().visible);
        assert!(view.tooltip().node.is_none());

        view.hover(Some(printer));
        view.hover(None);
        assert_eq!(view.tooltip(), TooltipState::hidden());
    }

    #[test]
    fn wheel_zoom_stays_in_range_and_leaves_positions_alone() {
        let mut view = view();
        let before = view.simulation().positions().to_vec();
        for _ in 0..50 {
            view.wheel(Pos2::new(500.0, 350.0), 400.0);
        }
        assert_eq!(view.transform().scale, ZoomController::MAX_SCALE);
        view.pinch(Pos2::new(500.0, 350.0), 0.01);
        assert_eq!(view.transform().scale, ZoomController::MIN_SCALE);
        assert_eq!(view.simulation().positions(), before.as_slice());
    }
}
