use std::collections::HashMap;

use eframe::egui::Vec2;

use super::super::physics::Simulation;

#[derive(Debug, Default)]
pub(in crate::app) struct DragController {
    grabs: HashMap<usize, Vec2>,
}

impl DragController {
    pub(in crate::app) fn is_active(&self) -> bool {
        !self.grabs.is_empty()
    }

    pub(in crate::app) fn on_drag_start(
        &mut self,
        simulation: &mut Simulation,
        index: usize,
        pointer: Vec2,
    ) {
        let Some(position) = simulation.position(index) else {
            return;
        };

        if self.grabs.is_empty() {
            simulation.set_alpha_target(simulation.config().drag_alpha_target);
            simulation.restart();
            tracing::debug!(node = index, ticks = simulation.tick_count(), "drag re-excitation");
        }

        self.grabs.insert(index, position - pointer);
        simulation.pin(index, position);
    }

    pub(in crate::app) fn on_drag_move(
        &mut self,
        simulation: &mut Simulation,
        index: usize,
        pointer: Vec2,
    ) {
        if let Some(&offset) = self.grabs.get(&index) {
            simulation.pin(index, pointer + offset);
        }
    }

    pub(in crate::app) fn on_drag_end(&mut self, simulation: &mut Simulation, index: usize) {
        if self.grabs.remove(&index).is_none() {
            return;
        }

        if self.grabs.is_empty() {
            simulation.set_alpha_target(0.0);
        }
        simulation.unpin(index);
    }

    pub(in crate::app) fn release_all(&mut self, simulation: &mut Simulation) {
        let indices = self.grabs.keys().copied().collect::<Vec<_>>();
        for index in indices {
            self.on_drag_end(simulation, index);
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;
    use crate::app::physics::SimulationConfig;

    fn assert_near(actual: Option<Vec2>, expected: Vec2) {
        let actual = actual.expect("body exists");
        assert!((actual - expected).length() < 1e-3, "{actual:?} != {expected:?}");
    }

    fn simulation() -> Simulation {
        Simulation::new(
            3,
            vec![(0, 1), (0, 2)],
            vec2(400.0, 300.0),
            SimulationConfig::default(),
        )
    }

    #[test]
    fn drag_pins_and_follows_pointer_one_to_one() {
        let mut simulation = simulation();
        let mut drag = DragController::default();
        let start = simulation.position(1).expect("node 1");

        drag.on_drag_start(&mut simulation, 1, start + vec2(3.0, -2.0));
        assert!(simulation.is_pinned(1));
        assert_eq!(simulation.alpha_target(), 0.1);
        assert_eq!(simulation.position(1), Some(start));

        drag.on_drag_move(&mut simulation, 1, start + vec2(53.0, 38.0));
        assert_near(simulation.position(1), start + vec2(50.0, 40.0));

        let dragged = simulation.position(1);
        simulation.tick();
        assert_eq!(simulation.position(1), dragged);

        drag.on_drag_end(&mut simulation, 1);
        assert!(!simulation.is_pinned(1));
        assert_eq!(simulation.alpha_target(), 0.0);
        assert!(!drag.is_active());
    }

    #[test]
    fn concurrent_drags_are_independent() {
        let mut simulation = simulation();
        let mut drag = DragController::default();
        let first = simulation.position(1).expect("node 1");
        let second = simulation.position(2).expect("node 2");

        drag.on_drag_start(&mut simulation, 1, first);
        drag.on_drag_start(&mut simulation, 2, second);
        drag.on_drag_end(&mut simulation, 1);

        assert!(!simulation.is_pinned(1));
        assert!(simulation.is_pinned(2));
        assert_eq!(simulation.alpha_target(), 0.1, "another drag is still active");

        drag.on_drag_end(&mut simulation, 2);
        assert_eq!(simulation.alpha_target(), 0.0);
    }

    #[test]
    fn drag_resumes_a_stopped_engine_without_resetting_ticks() {
        let mut simulation = simulation();
        while simulation.tick() {}
        let mut drag = DragController::default();
        let start = simulation.position(2).expect("node 2");

        drag.on_drag_start(&mut simulation, 2, start);
        assert!(simulation.is_running());
        assert_eq!(simulation.tick_count(), 300);

        drag.on_drag_move(&mut simulation, 2, start + vec2(10.0, 0.0));
        assert_eq!(simulation.position(2), Some(start + vec2(10.0, 0.0)));
    }

    #[test]
    fn release_all_unpins_everything() {
        let mut simulation = simulation();
        let mut drag = DragController::default();
        drag.on_drag_start(&mut simulation, 0, Vec2::ZERO);
        drag.on_drag_start(&mut simulation, 2, Vec2::ZERO);

        drag.release_all(&mut simulation);
        assert!(!drag.is_active());
        assert!(!simulation.is_pinned(0));
        assert!(!simulation.is_pinned(2));
        assert_eq!(simulation.alpha_target(), 0.0);
    }
}
