use std::ops::Range;

use eframe::egui::{Vec2, vec2};

const LEAF_BODIES: usize = 8;
const DEPTH_LIMIT: usize = 12;

#[derive(Clone, Copy, Debug)]
struct Square {
    center: Vec2,
    half: f32,
}

impl Square {
    fn enclosing(points: &[Vec2]) -> Option<Self> {
        let (min, max) = points.iter().fold(
            (
                vec2(f32::INFINITY, f32::INFINITY),
                vec2(f32::NEG_INFINITY, f32::NEG_INFINITY),
            ),
            |(min, max), point| (min.min(*point), max.max(*point)),
        );

        if !(min.x.is_finite() && min.y.is_finite() && max.x.is_finite() && max.y.is_finite()) {
            return None;
        }

        let span = (max - min).max_elem().max(1.0);
        Some(Self {
            center: (min + max) * 0.5,
            half: (span * 0.5) + 1.0,
        })
    }

    fn holds(self, point: Vec2) -> bool {
        let offset = point - self.center;
        offset.x.abs() <= self.half && offset.y.abs() <= self.half
    }

    fn gap_sq(self, other: Self) -> f32 {
        let reach = self.half + other.half;
        let dx = ((self.center.x - other.center.x).abs() - reach).max(0.0);
        let dy = ((self.center.y - other.center.y).abs() - reach).max(0.0);
        (dx * dx) + (dy * dy)
    }

    fn quadrant(self, point: Vec2) -> u8 {
        u8::from(point.x >= self.center.x) | (u8::from(point.y >= self.center.y) << 1)
    }

    fn quarter(self, quadrant: u8) -> Self {
        let half = self.half * 0.5;
        let sign_x = if quadrant & 1 == 0 { -1.0 } else { 1.0 };
        let sign_y = if quadrant & 2 == 0 { -1.0 } else { 1.0 };
        Self {
            center: self.center + vec2(sign_x * half, sign_y * half),
            half,
        }
    }
}

struct Cell {
    square: Square,
    centroid: Vec2,
    bodies: Range<usize>,
    children: Range<usize>,
}

impl Cell {
    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) enum Source {
    Body(usize),
    Cluster { centroid: Vec2, count: usize },
}

// Cells index into `order`, which holds body indices grouped by cell.
pub(super) struct BodyTree {
    cells: Vec<Cell>,
    order: Vec<usize>,
}

impl BodyTree {
    pub(super) fn build(positions: &[Vec2]) -> Option<Self> {
        let square = Square::enclosing(positions)?;
        let mut tree = Self {
            cells: Vec::new(),
            order: (0..positions.len()).collect(),
        };
        tree.push_cell(square, 0..positions.len(), positions);
        tree.split(0, positions, 0);
        Some(tree)
    }

    fn push_cell(&mut self, square: Square, bodies: Range<usize>, positions: &[Vec2]) {
        let centroid = if bodies.is_empty() {
            square.center
        } else {
            self.order[bodies.clone()]
                .iter()
                .fold(Vec2::ZERO, |sum, &body| sum + positions[body])
                / bodies.len() as f32
        };
        self.cells.push(Cell {
            square,
            centroid,
            bodies,
            children: 0..0,
        });
    }

    fn split(&mut self, cell: usize, positions: &[Vec2], depth: usize) {
        let square = self.cells[cell].square;
        let bodies = self.cells[cell].bodies.clone();
        if depth >= DEPTH_LIMIT || bodies.len() <= LEAF_BODIES {
            return;
        }

        self.order[bodies.clone()].sort_by_key(|&body| square.quadrant(positions[body]));
        let mut groups = Vec::with_capacity(4);
        let mut start = bodies.start;
        for quadrant in 0..4 {
            let len = self.order[start..bodies.end]
                .iter()
                .take_while(|&&body| square.quadrant(positions[body]) == quadrant)
                .count();
            if len > 0 {
                groups.push((quadrant, start..start + len));
            }
            start += len;
        }

        // Coincident bodies cannot be separated by splitting.
        if groups.len() <= 1 {
            return;
        }

        let first = self.cells.len();
        for (quadrant, group) in groups {
            self.push_cell(square.quarter(quadrant), group, positions);
        }
        let children = first..self.cells.len();
        self.cells[cell].children = children.clone();
        for child in children {
            self.split(child, positions, depth + 1);
        }
    }

    pub(super) fn far_field(&self, body: usize, point: Vec2, theta: f32, mut visit: impl FnMut(Source)) {
        self.far_field_from(0, body, point, theta * theta, &mut visit);
    }

    fn far_field_from(
        &self,
        cell: usize,
        body: usize,
        point: Vec2,
        theta_sq: f32,
        visit: &mut impl FnMut(Source),
    ) {
        let current = &self.cells[cell];
        if current.is_leaf() {
            for &other in &self.order[current.bodies.clone()] {
                if other != body {
                    visit(Source::Body(other));
                }
            }
            return;
        }

        let side = current.square.half * 2.0;
        let distance_sq = (current.centroid - point).length_sq();
        if !current.square.holds(point) && side * side < theta_sq * distance_sq {
            visit(Source::Cluster {
                centroid: current.centroid,
                count: current.bodies.len(),
            });
            return;
        }

        for child in current.children.clone() {
            self.far_field_from(child, body, point, theta_sq, visit);
        }
    }

    pub(super) fn close_pairs(&self, reach: f32, mut visit: impl FnMut(usize, usize)) {
        self.pairs_between(0, 0, reach * reach, &mut visit);
    }

    fn pairs_between(&self, a: usize, b: usize, reach_sq: f32, visit: &mut impl FnMut(usize, usize)) {
        let (cell_a, cell_b) = (&self.cells[a], &self.cells[b]);
        if cell_a.square.gap_sq(cell_b.square) > reach_sq {
            return;
        }

        match (cell_a.is_leaf(), cell_b.is_leaf()) {
            (true, true) if a == b => {
                let bodies = &self.order[cell_a.bodies.clone()];
                for (offset, &from) in bodies.iter().enumerate() {
                    for &to in &bodies[offset + 1..] {
                        visit(from, to);
                    }
                }
            }
            (true, true) => {
                for &from in &self.order[cell_a.bodies.clone()] {
                    for &to in &self.order[cell_b.bodies.clone()] {
                        visit(from, to);
                    }
                }
            }
            _ if a == b => {
                let children = cell_a.children.clone();
                for first in children.clone() {
                    for second in first..children.end {
                        self.pairs_between(first, second, reach_sq, visit);
                    }
                }
            }
            (false, leaf_b) if leaf_b || cell_a.square.half >= cell_b.square.half => {
                for child in cell_a.children.clone() {
                    self.pairs_between(child, b, reach_sq, visit);
                }
            }
            _ => {
                for child in cell_b.children.clone() {
                    self.pairs_between(a, child, reach_sq, visit);
                }
            }
        }
    }
}
