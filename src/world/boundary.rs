//! Reflection of bodies off the world's optional axis-aligned bounds.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{config::Bounds, core::body::Body};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryEdge {
    Left,
    Right,
    Top,
    Bottom,
}

impl BoundaryEdge {
    pub fn name(self) -> &'static str {
        match self {
            BoundaryEdge::Left => "left",
            BoundaryEdge::Right => "right",
            BoundaryEdge::Top => "top",
            BoundaryEdge::Bottom => "bottom",
        }
    }
}

/// Clamps `body` inside `bounds`, flipping the offending velocity component
/// scaled by the body's elasticity. Each axis is handled on its own; the
/// returned edges are the ones that were violated this call.
pub fn reflect(body: &mut Body, bounds: &Bounds) -> Vec<BoundaryEdge> {
    let mut hits = Vec::new();
    let elasticity = body.elasticity();
    let mut position = body.position();
    let mut velocity = body.velocity();
    let size = body.size();

    if let Some(left) = bounds.left {
        if position.x < left {
            position.x = left;
            velocity.x = -velocity.x * elasticity;
            hits.push(BoundaryEdge::Left);
        }
    }
    if let Some(right) = bounds.right {
        if position.x + size.x > right {
            position.x = right - size.x;
            velocity.x = -velocity.x * elasticity;
            hits.push(BoundaryEdge::Right);
        }
    }
    if let Some(top) = bounds.top {
        if position.y < top {
            position.y = top;
            velocity.y = -velocity.y * elasticity;
            hits.push(BoundaryEdge::Top);
        }
    }
    if let Some(bottom) = bounds.bottom {
        if position.y + size.y > bottom {
            position.y = bottom - size.y;
            velocity.y = -velocity.y * elasticity;
            hits.push(BoundaryEdge::Bottom);
        }
    }

    if !hits.is_empty() {
        body.set_position(position);
        body.set_velocity(Vec2::new(velocity.x, velocity.y));
    }
    hits
}
