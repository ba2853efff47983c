mod forces;
mod quadtree;

use eframe::egui::{Vec2, vec2};

use forces::{
    CollisionParams, LinkParams, accumulate_collisions, apply_center, apply_link, charge_on,
};
use quadtree::BodyTree;

#[derive(Clone, Copy, Debug)]
pub(in crate::app) struct SimulationConfig {
    pub link_distance: f32,
    pub link_strength: f32,
    pub charge_strength: f32,
    pub theta: f32,
    pub center_strength: f32,
    pub collision_radius: f32,
    pub collision_strength: f32,
    pub alpha_decay: f32,
    pub alpha_min: f32,
    // Fraction of velocity removed every tick.
    pub velocity_decay: f32,
    pub max_ticks: u32,
    pub drag_alpha_target: f32,
    pub reset_stop_after_secs: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            link_distance: 200.0,
            link_strength: 0.5,
            charge_strength: -500.0,
            theta: 0.9,
            center_strength: 1.0,
            collision_radius: 70.0,
            collision_strength: 1.0,
            alpha_decay: 0.02,
            alpha_min: 0.001,
            velocity_decay: 0.4,
            max_ticks: 300,
            drag_alpha_target: 0.1,
            reset_stop_after_secs: 3.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Pin {
    x: Option<f32>,
    y: Option<f32>,
}

struct PhysicsScratch {
    positions: Vec<Vec2>,
    velocities: Vec<Vec2>,
    predicted: Vec<Vec2>,
    deltas: Vec<Vec2>,
}

// Forces write positions and velocities every tick; only `pin` and `unpin` touch the pins.
pub(in crate::app) struct Simulation {
    positions: Vec<Vec2>,
    velocities: Vec<Vec2>,
    pins: Vec<Pin>,
    links: Vec<(usize, usize)>,
    link_bias: Vec<f32>,
    center: Vec2,
    alpha: f32,
    alpha_target: f32,
    tick_count: u32,
    running: bool,
    config: SimulationConfig,
    scratch: PhysicsScratch,
}

fn initial_positions(count: usize, center: Vec2) -> Vec<Vec2> {
    let golden_angle = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
    (0..count)
        .map(|index| {
            let radius = 10.0 * (0.5 + index as f32).sqrt();
            let angle = index as f32 * golden_angle;
            center + vec2(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

fn link_bias(count: usize, links: &[(usize, usize)]) -> Vec<f32> {
    let mut degree = vec![0usize; count];
    for &(source, target) in links {
        degree[source] += 1;
        degree[target] += 1;
    }

    links
        .iter()
        .map(|&(source, target)| degree[source] as f32 / (degree[source] + degree[target]) as f32)
        .collect()
}

impl Simulation {
    pub(in crate::app) fn new(
        count: usize,
        links: Vec<(usize, usize)>,
        center: Vec2,
        config: SimulationConfig,
    ) -> Self {
        let links = links
            .into_iter()
            .filter(|&(source, target)| source < count && target < count && source != target)
            .collect::<Vec<_>>();

        Self {
            positions: initial_positions(count, center),
            velocities: vec![Vec2::ZERO; count],
            pins: vec![Pin::default(); count],
            link_bias: link_bias(count, &links),
            links,
            center,
            alpha: 1.0,
            alpha_target: 0.0,
            tick_count: 0,
            running: true,
            config,
            scratch: PhysicsScratch {
                positions: Vec::with_capacity(count),
                velocities: Vec::with_capacity(count),
                predicted: Vec::with_capacity(count),
                deltas: Vec::with_capacity(count),
            },
        }
    }

    pub(in crate::app) fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    pub(in crate::app) fn position(&self, index: usize) -> Option<Vec2> {
        self.positions.get(index).copied()
    }

    pub(in crate::app) fn links(&self) -> &[(usize, usize)] {
        &self.links
    }

    pub(in crate::app) fn alpha(&self) -> f32 {
        self.alpha
    }

    pub(in crate::app) fn alpha_target(&self) -> f32 {
        self.alpha_target
    }

    pub(in crate::app) fn tick_count(&self) -> u32 {
        self.tick_count
    }

    pub(in crate::app) fn is_running(&self) -> bool {
        self.running
    }

    pub(in crate::app) fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub(in crate::app) fn is_pinned(&self, index: usize) -> bool {
        self.pins
            .get(index)
            .is_some_and(|pin| pin.x.is_some() || pin.y.is_some())
    }

    pub(in crate::app) fn pin(&mut self, index: usize, position: Vec2) {
        let Some(pin) = self.pins.get_mut(index) else {
            return;
        };
        *pin = Pin {
            x: Some(position.x),
            y: Some(position.y),
        };
        self.positions[index] = position;
        self.velocities[index] = Vec2::ZERO;
    }

    pub(in crate::app) fn unpin(&mut self, index: usize) {
        if let Some(pin) = self.pins.get_mut(index) {
            *pin = Pin::default();
        }
    }

    pub(in crate::app) fn set_alpha_target(&mut self, alpha_target: f32) {
        self.alpha_target = alpha_target.clamp(0.0, 1.0);
    }

    // Keeps alpha and the tick counter.
    pub(in crate::app) fn restart(&mut self) {
        self.running = true;
    }

    pub(in crate::app) fn reheat(&mut self) {
        self.alpha = 1.0;
        self.tick_count = 0;
        self.running = true;
    }

    pub(in crate::app) fn stop(&mut self) {
        self.running = false;
    }

    pub(in crate::app) fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }

        self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;
        self.apply_forces();
        self.integrate();

        self.tick_count += 1;
        if self.tick_count >= self.config.max_ticks {
            tracing::debug!(ticks = self.tick_count, alpha = self.alpha, "tick cutoff reached");
            self.running = false;
        } else if self.alpha < self.config.alpha_min {
            tracing::debug!(ticks = self.tick_count, "simulation cooled");
            self.running = false;
        }
        true
    }

    fn apply_forces(&mut self) {
        let count = self.positions.len();
        if count == 0 {
            return;
        }
        let config = self.config;
        let alpha = self.alpha;

        apply_link(
            &self.positions,
            &mut self.velocities,
            &self.links,
            &self.link_bias,
            LinkParams {
                distance: config.link_distance,
                strength: config.link_strength,
                alpha,
            },
        );

        let scratch = &mut self.scratch;
        scratch.positions.clear();
        scratch.positions.extend_from_slice(&self.positions);
        scratch.deltas.clear();
        scratch.deltas.resize(count, Vec2::ZERO);
        if let Some(tree) = BodyTree::build(&scratch.positions) {
            for (index, delta) in scratch.deltas.iter_mut().enumerate() {
                *delta = charge_on(
                    &tree,
                    index,
                    &scratch.positions,
                    config.charge_strength * alpha,
                    config.theta,
                );
            }
        }
        for (velocity, delta) in self.velocities.iter_mut().zip(&scratch.deltas) {
            *velocity += *delta;
        }

        apply_center(&mut self.positions, self.center, config.center_strength);

        scratch.velocities.clear();
        scratch.velocities.extend_from_slice(&self.velocities);
        scratch.predicted.clear();
        scratch.predicted.extend(
            self.positions
                .iter()
                .zip(&scratch.velocities)
                .map(|(position, velocity)| *position + *velocity),
        );
        scratch.deltas.fill(Vec2::ZERO);
        if let Some(tree) = BodyTree::build(&scratch.predicted) {
            accumulate_collisions(
                &tree,
                &scratch.predicted,
                CollisionParams {
                    radius: config.collision_radius,
                    strength: config.collision_strength,
                },
                &mut scratch.deltas,
            );
        }
        for (velocity, delta) in self.velocities.iter_mut().zip(&scratch.deltas) {
            *velocity += *delta;
        }
    }

    fn integrate(&mut self) {
        let retained = 1.0 - self.config.velocity_decay;
        for ((position, velocity), pin) in self
            .positions
            .iter_mut()
            .zip(self.velocities.iter_mut())
            .zip(&self.pins)
        {
            match pin.x {
                Some(fixed) => {
                    position.x = fixed;
                    velocity.x = 0.0;
                }
                None => {
                    velocity.x *= retained;
                    position.x += velocity.x;
                }
            }
            match pin.y {
                Some(fixed) => {
                    position.y = fixed;
                    velocity.y = 0.0;
                }
                None => {
                    velocity.y *= retained;
                    position.y += velocity.y;
                }
            }
        }
    }
}
