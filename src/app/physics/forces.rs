use eframe::egui::{Vec2, vec2};

use super::quadtree::{BodyTree, Source};

const DISTANCE_MIN_SQ: f32 = 1.0;

// Direction for coincident bodies; swapping the pair flips it.
fn separation_hint(from: usize, to: usize) -> Vec2 {
    let (low, high) = (from.min(to), from.max(to));
    let angle = ((low as f32) * 0.618_034 + (high as f32) * 0.414_214) * std::f32::consts::TAU;
    let direction = vec2(angle.cos(), angle.sin());
    if from <= to { direction } else { -direction }
}

#[derive(Clone, Copy)]
pub(super) struct LinkParams {
    pub(super) distance: f32,
    pub(super) strength: f32,
    pub(super) alpha: f32,
}

pub(super) fn apply_link(
    positions: &[Vec2],
    velocities: &mut [Vec2],
    links: &[(usize, usize)],
    bias: &[f32],
    params: LinkParams,
) {
    for (link_index, &(source, target)) in links.iter().enumerate() {
        let mut delta = (positions[target] + velocities[target])
            - (positions[source] + velocities[source]);
        if delta.length_sq() <= f32::EPSILON {
            delta = separation_hint(source, target) * 1e-3;
        }

        let length = delta.length();
        let stretch = (length - params.distance) / length * params.alpha * params.strength;
        let correction = delta * stretch;
        let share = bias[link_index];

        velocities[target] -= correction * share;
        velocities[source] += correction * (1.0 - share);
    }
}

fn charge_between(delta: Vec2, weight: f32) -> Vec2 {
    let mut distance_sq = delta.length_sq();
    if distance_sq < DISTANCE_MIN_SQ {
        distance_sq = (DISTANCE_MIN_SQ * distance_sq).sqrt();
    }
    delta * (weight / distance_sq)
}

// `strength_alpha` is the per-body charge already scaled by alpha; negative repels.
pub(super) fn charge_on(
    tree: &BodyTree,
    index: usize,
    positions: &[Vec2],
    strength_alpha: f32,
    theta: f32,
) -> Vec2 {
    let point = positions[index];
    let mut total = Vec2::ZERO;
    tree.far_field(index, point, theta, |source| {
        total += match source {
            Source::Body(other) => {
                let delta = positions[other] - point;
                if delta.length_sq() <= f32::EPSILON {
                    -separation_hint(index, other) * strength_alpha.abs()
                } else {
                    charge_between(delta, strength_alpha)
                }
            }
            Source::Cluster { centroid, count } => {
                charge_between(centroid - point, strength_alpha * count as f32)
            }
        };
    });
    total
}

pub(super) fn apply_center(positions: &mut [Vec2], center: Vec2, strength: f32) {
    if positions.is_empty() {
        return;
    }

    let mean = positions.iter().fold(Vec2::ZERO, |sum, position| sum + *position)
        / positions.len() as f32;
    let shift = (mean - center) * strength;
    for position in positions {
        *position -= shift;
    }
}

#[derive(Clone, Copy)]
pub(super) struct CollisionParams {
    pub(super) radius: f32,
    pub(super) strength: f32,
}

fn resolve_overlap(
    from: usize,
    to: usize,
    predicted: &[Vec2],
    params: CollisionParams,
    delta_velocities: &mut [Vec2],
) {
    let min_distance = params.radius * 2.0;
    let mut delta = predicted[from] - predicted[to];
    let mut distance_sq = delta.length_sq();
    if distance_sq >= min_distance * min_distance {
        return;
    }
    if distance_sq <= f32::EPSILON {
        delta = separation_hint(from, to) * 1e-3;
        distance_sq = delta.length_sq();
    }

    let distance = distance_sq.sqrt();
    let push = delta * ((min_distance - distance) / distance * params.strength);
    // Equal radii: each body takes half of the correction.
    delta_velocities[from] += push * 0.5;
    delta_velocities[to] -= push * 0.5;
}

pub(super) fn accumulate_collisions(
    tree: &BodyTree,
    predicted: &[Vec2],
    params: CollisionParams,
    delta_velocities: &mut [Vec2],
) {
    tree.close_pairs(params.radius * 2.0, |from, to| {
        resolve_overlap(from, to, predicted, params, delta_velocities);
    });
}
