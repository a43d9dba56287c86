//! Input model: tools, per-frame pointer samples, and the gesture state machine.
//!
//! The host samples the pointer once per frame (absolute position, primary
//! button, wheel) with no event deltas. [`transition`] classifies the gesture
//! from the previous state and the current sample; [`Interaction`] wraps it
//! with the consume acknowledgment that returns one-shot states to `Idle`.
//!
//! ```text
//! Idle     -> Pressed(origin)   primary down
//! Pressed  -> Dragging          moved, drag tool, over a draggable body
//! Pressed  -> Panning           moved, pan tool (or drag tool over nothing)
//! Pressed  -> Drawing(origin)   moved, rectangle / circle / spring
//! Pressed  -> Click             unmoved, released
//! Dragging -> Idle              released
//! Panning  -> Idle              released
//! Drawing  -> Idle              consumed by the draw handler
//! Click    -> Idle              consumed by the dispatcher or a tool
//! ```

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::geom::Vector;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Drag the view.
    Pan,
    /// Drag bodies; falls back to panning over empty space.
    #[default]
    Drag,
    /// Remove the clicked body.
    Erase,
    /// Draw an axis-aligned box.
    Rectangle,
    /// Draw a circle from its center outward.
    Circle,
    /// Draw a spring between two bodies.
    Spring,
    /// Join two bodies at a point, one click per body.
    Hinge,
    /// Pick a body, then click where it goes.
    Move,
}

impl Tool {
    /// Every tool, in toolbar order.
    pub const ALL: [Tool; 8] = [
        Tool::Pan,
        Tool::Drag,
        Tool::Erase,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Spring,
        Tool::Hinge,
        Tool::Move,
    ];

    /// Whether a moved press with this tool draws a shape.
    #[must_use]
    pub fn is_draw(self) -> bool {
        matches!(self, Self::Rectangle | Self::Circle | Self::Spring)
    }

    /// Whether this tool has an options sub-menu.
    #[must_use]
    pub fn has_options(self) -> bool {
        !self.option_fields().is_empty()
    }

    /// Text fields shown in this tool's options sub-menu.
    #[must_use]
    pub fn option_fields(self) -> &'static [&'static str] {
        match self {
            Self::Rectangle | Self::Circle => &["density"],
            Self::Spring => &["stiffness", "damping"],
            Self::Pan | Self::Drag | Self::Erase | Self::Hinge | Self::Move => &[],
        }
    }

    /// Short lowercase name used for labels and logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Pan => "pan",
            Self::Drag => "drag",
            Self::Erase => "erase",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Spring => "spring",
            Self::Hinge => "hinge",
            Self::Move => "move",
        }
    }
}

/// Raw pointer snapshot handed over by the host once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerFrame {
    /// Absolute pointer position in screen pixels.
    pub position: Vector,
    /// Primary button currently held.
    pub primary_down: bool,
    /// A secondary-button click happened since the previous frame.
    #[serde(default)]
    pub secondary_click: bool,
    /// Wheel delta accumulated since the previous frame (positive = down).
    #[serde(default)]
    pub wheel_delta: f64,
}

/// What the state machine needs to classify a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub screen_pos: Vector,
    pub primary_down: bool,
    /// A draggable body lies under the pointer.
    pub over_draggable: bool,
}

/// The discrete gesture active this frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InteractionState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Primary button went down at `origin` and the pointer has not moved yet.
    Pressed { origin: Vector },
    /// A body is being dragged.
    Dragging,
    /// The view is being panned.
    Panning,
    /// A shape is being drawn from `origin`. One-shot: the draw handler consumes it.
    Drawing { origin: Vector },
    /// Press then release without movement. One-shot: the dispatcher consumes it.
    Click,
}

impl InteractionState {
    /// Whether this state must be acknowledged before the machine moves on.
    #[must_use]
    pub fn is_one_shot(self) -> bool {
        matches!(self, Self::Drawing { .. } | Self::Click)
    }
}

/// Pure transition function.
///
/// `threshold` is the distance (screen pixels) the pointer must exceed from the
/// press origin to count as moved. One-shot states are returned unchanged;
/// only [`Interaction::consume`] leaves them.
#[must_use]
pub fn transition(prev: InteractionState, sample: &PointerSample, tool: Tool, threshold: f64) -> InteractionState {
    match prev {
        InteractionState::Idle => {
            if sample.primary_down {
                InteractionState::Pressed { origin: sample.screen_pos }
            } else {
                InteractionState::Idle
            }
        }
        InteractionState::Pressed { origin } => {
            let moved = sample.screen_pos.distance(origin) > threshold;
            if !moved {
                return if sample.primary_down { prev } else { InteractionState::Click };
            }
            match tool {
                Tool::Drag if sample.over_draggable => InteractionState::Dragging,
                Tool::Pan | Tool::Drag => InteractionState::Panning,
                t if t.is_draw() => InteractionState::Drawing { origin },
                // Click-only tools: a moved press is abandoned on release.
                _ => {
                    if sample.primary_down {
                        prev
                    } else {
                        InteractionState::Idle
                    }
                }
            }
        }
        InteractionState::Dragging | InteractionState::Panning => {
            if sample.primary_down {
                prev
            } else {
                InteractionState::Idle
            }
        }
        InteractionState::Drawing { .. } | InteractionState::Click => prev,
    }
}

/// The gesture state machine with explicit consumption of one-shot states.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    state: InteractionState,
    threshold: f64,
}

impl Interaction {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self { state: InteractionState::Idle, threshold }
    }

    /// The state produced by the most recent [`Interaction::advance`].
    #[must_use]
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Classify this frame's sample and return the new state.
    pub fn advance(&mut self, sample: &PointerSample, tool: Tool) -> InteractionState {
        let next = transition(self.state, sample, tool, self.threshold);
        if std::mem::discriminant(&next) != std::mem::discriminant(&self.state) {
            tracing::debug!(from = ?self.state, to = ?next, tool = tool.name(), "interaction transition");
        }
        self.state = next;
        next
    }

    /// Acknowledge a one-shot state (`Click`, `Drawing`), returning to `Idle`.
    ///
    /// Returns `false` and leaves the state alone when it is not one-shot.
    pub fn consume(&mut self) -> bool {
        if self.state.is_one_shot() {
            self.state = InteractionState::Idle;
            true
        } else {
            false
        }
    }
}
