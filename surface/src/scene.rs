//! Scene back-end interface and an in-memory implementation.
//!
//! The physics engine behind a real editor implements [`Scene`]; the core only
//! ever creates, finds, moves, and removes bodies through it. [`BodyStore`]
//! keeps bodies in a plain list (last = topmost) with no simulation, which is
//! enough for headless runs and tests.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geom::{Rect, Vector};

/// Unique identifier for a body.
pub type BodyId = Uuid;

/// Unique identifier for a joint (spring or hinge).
pub type JointId = Uuid;

/// Operations the editor needs from the scene/physics back-end.
pub trait Scene {
    /// Add an axis-aligned box (scene space).
    fn create_rect(&mut self, rect: Rect) -> BodyId;

    /// Add a circle (scene space).
    fn create_circle(&mut self, center: Vector, radius: f64) -> BodyId;

    /// Connect two distinct bodies with a spring anchored at the given scene points.
    fn create_spring(&mut self, a: (BodyId, Vector), b: (BodyId, Vector)) -> JointId;

    /// Join two distinct bodies at a scene point.
    fn create_hinge(&mut self, a: BodyId, b: BodyId, at: Vector) -> JointId;

    /// Topmost body containing a scene point.
    fn body_at(&self, point: Vector) -> Option<BodyId>;

    /// Scene-space center of a body.
    fn body_center(&self, id: BodyId) -> Option<Vector>;

    /// Move a body so its center lands on `center`. Returns `false` if unknown.
    fn move_body(&mut self, id: BodyId, center: Vector) -> bool;

    /// Remove a body and any joints attached to it. Returns `false` if unknown.
    fn remove_body(&mut self, id: BodyId) -> bool;

    /// Flip the simulation run state and return the new one.
    fn toggle_running(&mut self) -> bool;

    fn is_running(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Rect { rect: Rect },
    Circle { center: Vector, radius: f64 },
}

impl Shape {
    #[must_use]
    pub fn contains(&self, p: Vector) -> bool {
        match self {
            Self::Rect { rect } => rect.contains(p),
            Self::Circle { center, radius } => center.distance(p) < *radius,
        }
    }

    #[must_use]
    pub fn center(&self) -> Vector {
        match self {
            Self::Rect { rect } => rect.center(),
            Self::Circle { center, .. } => *center,
        }
    }

    fn recentered(&self, to: Vector) -> Self {
        match self {
            Self::Rect { rect } => {
                Self::Rect { rect: Rect::new(to.x - rect.width / 2.0, to.y - rect.height / 2.0, rect.width, rect.height) }
            }
            Self::Circle { radius, .. } => Self::Circle { center: to, radius: *radius },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub shape: Shape,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Joint {
    Spring { id: JointId, a: BodyId, a_at: Vector, b: BodyId, b_at: Vector },
    Hinge { id: JointId, a: BodyId, b: BodyId, at: Vector },
}

impl Joint {
    #[must_use]
    pub fn id(&self) -> JointId {
        match self {
            Self::Spring { id, .. } | Self::Hinge { id, .. } => *id,
        }
    }

    #[must_use]
    pub fn touches(&self, body: BodyId) -> bool {
        match self {
            Self::Spring { a, b, .. } | Self::Hinge { a, b, .. } => *a == body || *b == body,
        }
    }
}

/// In-memory scene: bodies in creation order, last drawn on top.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodyStore {
    bodies: Vec<Body>,
    joints: Vec<Joint>,
    running: bool,
}

impl BodyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    #[must_use]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    #[must_use]
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    fn insert(&mut self, shape: Shape) -> BodyId {
        let id = Uuid::new_v4();
        self.bodies.push(Body { id, shape });
        id
    }
}

impl Scene for BodyStore {
    fn create_rect(&mut self, rect: Rect) -> BodyId {
        self.insert(Shape::Rect { rect })
    }

    fn create_circle(&mut self, center: Vector, radius: f64) -> BodyId {
        self.insert(Shape::Circle { center, radius })
    }

    fn create_spring(&mut self, a: (BodyId, Vector), b: (BodyId, Vector)) -> JointId {
        let id = Uuid::new_v4();
        self.joints.push(Joint::Spring { id, a: a.0, a_at: a.1, b: b.0, b_at: b.1 });
        id
    }

    fn create_hinge(&mut self, a: BodyId, b: BodyId, at: Vector) -> JointId {
        let id = Uuid::new_v4();
        self.joints.push(Joint::Hinge { id, a, b, at });
        id
    }

    fn body_at(&self, point: Vector) -> Option<BodyId> {
        self.bodies.iter().rev().find(|b| b.shape.contains(point)).map(|b| b.id)
    }

    fn body_center(&self, id: BodyId) -> Option<Vector> {
        self.get(id).map(|b| b.shape.center())
    }

    fn move_body(&mut self, id: BodyId, center: Vector) -> bool {
        match self.bodies.iter_mut().find(|b| b.id == id) {
            Some(body) => {
                body.shape = body.shape.recentered(center);
                true
            }
            None => false,
        }
    }

    fn remove_body(&mut self, id: BodyId) -> bool {
        let before = self.bodies.len();
        self.bodies.retain(|b| b.id != id);
        if self.bodies.len() == before {
            return false;
        }
        self.joints.retain(|j| !j.touches(id));
        true
    }

    fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
