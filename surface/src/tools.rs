//! Tool handlers: what the active tool does with a drag, a finished drawing,
//! or a click no menu took.
//!
//! All positions here are scene space; the engine converts before calling.
//! Degenerate gestures (zero-size shapes, joints missing a body or joining a
//! body to itself) are dropped without an action.

#[cfg(test)]
#[path = "tools_test.rs"]
mod tools_test;

use crate::engine::Action;
use crate::geom::{Rect, Vector};
use crate::input::Tool;
use crate::scene::{BodyId, Scene};

/// First half of a two-click tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    /// Hinge tool picked its first body.
    Hinge { body: BodyId },
    /// Move tool picked the body to relocate.
    Move { body: BodyId },
}

/// A body held by the drag tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grab {
    pub body: BodyId,
    /// Body center minus the grab point, so the body does not jump.
    pub offset: Vector,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolState {
    pub active: Tool,
    pub pending: Option<Pending>,
    pub grab: Option<Grab>,
}

impl ToolState {
    #[must_use]
    pub fn new(active: Tool) -> Self {
        Self { active, pending: None, grab: None }
    }

    /// Switch tools, dropping any half-finished gesture. Returns whether the
    /// tool actually changed.
    pub fn select(&mut self, tool: Tool) -> bool {
        if self.active == tool {
            return false;
        }
        tracing::debug!(from = self.active.name(), to = tool.name(), "tool selected");
        self.active = tool;
        self.pending = None;
        self.grab = None;
        true
    }
}

/// Grab the body under `at`, if any.
pub fn begin_drag(tools: &mut ToolState, scene: &dyn Scene, at: Vector) -> Option<BodyId> {
    let body = scene.body_at(at)?;
    let center = scene.body_center(body)?;
    tools.grab = Some(Grab { body, offset: center - at });
    Some(body)
}

/// Move the grabbed body to follow the pointer.
pub fn drag_to(tools: &ToolState, scene: &mut dyn Scene, at: Vector) -> Option<Action> {
    let grab = tools.grab?;
    scene.move_body(grab.body, at + grab.offset).then_some(Action::BodyMoved { id: grab.body })
}

pub fn end_drag(tools: &mut ToolState) {
    tools.grab = None;
}

/// Complete a drawing gesture from `origin` to `end`.
pub fn finish_drawing(tool: Tool, scene: &mut dyn Scene, origin: Vector, end: Vector) -> Option<Action> {
    if origin == end {
        tracing::trace!(tool = tool.name(), "zero-length drawing discarded");
        return None;
    }
    match tool {
        Tool::Rectangle => {
            let rect = Rect::from_corners(origin, end);
            if rect.width == 0.0 || rect.height == 0.0 {
                tracing::trace!("flat rectangle discarded");
                return None;
            }
            Some(Action::BodyCreated { id: scene.create_rect(rect) })
        }
        Tool::Circle => Some(Action::BodyCreated { id: scene.create_circle(origin, origin.distance(end)) }),
        Tool::Spring => {
            let (Some(a), Some(b)) = (scene.body_at(origin), scene.body_at(end)) else {
                tracing::trace!("spring endpoint without a body discarded");
                return None;
            };
            if a == b {
                tracing::trace!("spring joining a body to itself discarded");
                return None;
            }
            Some(Action::JointCreated { id: scene.create_spring((a, origin), (b, end)) })
        }
        Tool::Pan | Tool::Drag | Tool::Erase | Tool::Hinge | Tool::Move => None,
    }
}

/// Apply a click that no menu consumed.
pub fn click(tools: &mut ToolState, scene: &mut dyn Scene, at: Vector) -> Option<Action> {
    match tools.active {
        Tool::Erase => {
            let body = scene.body_at(at)?;
            scene.remove_body(body).then_some(Action::BodyRemoved { id: body })
        }
        Tool::Hinge => {
            let Some(body) = scene.body_at(at) else {
                tracing::trace!("hinge click on empty space discarded");
                tools.pending = None;
                return None;
            };
            match tools.pending.take() {
                Some(Pending::Hinge { body: first }) if first != body => {
                    Some(Action::JointCreated { id: scene.create_hinge(first, body, at) })
                }
                Some(Pending::Hinge { .. }) => {
                    tracing::trace!("hinge joining a body to itself discarded");
                    None
                }
                _ => {
                    tools.pending = Some(Pending::Hinge { body });
                    None
                }
            }
        }
        Tool::Move => match tools.pending.take() {
            Some(Pending::Move { body }) => scene.move_body(body, at).then_some(Action::BodyMoved { id: body }),
            _ => {
                tools.pending = scene.body_at(at).map(|body| Pending::Move { body });
                None
            }
        },
        Tool::Pan | Tool::Drag | Tool::Rectangle | Tool::Circle | Tool::Spring => None,
    }
}
