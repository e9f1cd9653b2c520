use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Unique identifier for a radio node
pub type NodeId = u32;

/// Planar position of a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Direction from `self` towards `other`, normalized into [0, 2π).
    ///
    /// Coincident positions have no defined direction; they report 0 so that
    /// ordering falls back to node ids.
    pub fn bearing_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        if dx == 0.0 && dy == 0.0 {
            return 0.0;
        }
        normalize_angle(dy.atan2(dx))
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Map any angle onto [0, 2π).
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU { 0.0 } else { a }
}

/// A radio node. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub position: Position,
    /// Maximum transmission radius
    pub radius: f64,
}

impl Node {
    pub fn new(id: NodeId, position: Position, radius: f64) -> Self {
        Self {
            id,
            position,
            radius,
        }
    }

    pub fn distance_to(&self, other: &Node) -> f64 {
        self.position.distance_to(&other.position)
    }

    pub fn can_reach(&self, other: &Node) -> bool {
        self.distance_to(other) <= self.radius
    }
}
