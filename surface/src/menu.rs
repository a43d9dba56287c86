//! Menu model: controls laid out on an abstract grid, the menus that own them,
//! and the UI state their predicates are evaluated against.
//!
//! Per-kind behaviour (visibility, highlighting, click handling) lives in
//! [`crate::controls`]; this module only holds data.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

use serde::{Deserialize, Serialize};

use crate::geom::Vector;
use crate::input::{InteractionState, Tool};

/// Column/row of a control on the menu grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCell {
    pub x: u32,
    pub y: u32,
}

/// Number of grid units a control occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub width: u32,
    pub height: u32,
}

impl Default for Span {
    fn default() -> Self {
        Self { width: 1, height: 1 }
    }
}

/// What a control is. Drives its behaviour; never used to find a click target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "arg", rename_all = "snake_case")]
pub enum ControlKind {
    /// Static heading; swallows clicks.
    Title,
    /// Closes the owning menu.
    Close,
    /// Toggles the owning menu between floating and scene-pinned.
    Pin,
    /// Selects a tool.
    Tool(Tool),
    /// Starts or stops the simulation.
    PlayPause,
    /// Opens the active tool's options sub-menu.
    ToolOptions,
    /// Eases the camera back to zoom 1.
    ResetZoom,
    /// A named text field mirrored by an overlay input.
    Field(String),
}

/// One interactive cell of a menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub cell: GridCell,
    pub span: Span,
    pub kind: ControlKind,
    pub label: Option<String>,
    /// Glyph drawn instead of the label. The only field a click handler may
    /// rewrite (play/pause swaps it).
    pub icon: Option<String>,
    pub keep_menu_open_on_click: bool,
}

impl Control {
    #[must_use]
    pub fn new(kind: ControlKind, x: u32, y: u32) -> Self {
        Self {
            cell: GridCell { x, y },
            span: Span::default(),
            kind,
            label: None,
            icon: None,
            keep_menu_open_on_click: false,
        }
    }

    #[must_use]
    pub fn span(mut self, width: u32, height: u32) -> Self {
        self.span = Span { width, height };
        self
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn keep_open(mut self) -> Self {
        self.keep_menu_open_on_click = true;
        self
    }

    /// Text a renderer should draw: the icon when set, else the label.
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.icon.as_deref().or(self.label.as_deref()).unwrap_or("")
    }
}

/// Which coordinate space a menu lives in.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Placement {
    /// `position` is in screen space; drawn at scale 1.
    #[default]
    Floating,
    /// `position` is in scene space; drawn at scale 1.
    PositionPinned,
    /// `position` is in scene space; scale tracks the camera relative to `zoom`,
    /// the camera zoom at pin time.
    ScenePinned { zoom: f64 },
}

impl Placement {
    /// Anything other than `Floating`. Pinned menus survive outside clicks.
    #[must_use]
    pub fn is_pinned(self) -> bool {
        !matches!(self, Self::Floating)
    }
}

/// Condition under which the per-frame sweep removes a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "when", content = "tool", rename_all = "snake_case")]
pub enum CloseRule {
    /// Close once the active tool is no longer this one.
    ToolChanged(Tool),
}

/// What a control's click handler asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickResult {
    /// Leave the menu open regardless of pinning.
    Keep,
    /// Close the menu regardless of pinning.
    Close,
    /// Close only if the menu is floating and the control did not ask to stay open.
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub name: String,
    pub position: Vector,
    pub placement: Placement,
    pub controls: Vec<Control>,
    pub close_when: Option<CloseRule>,
}

impl Menu {
    /// An empty floating menu at a screen position.
    #[must_use]
    pub fn new(name: impl Into<String>, position: Vector) -> Self {
        Self {
            name: name.into(),
            position,
            placement: Placement::Floating,
            controls: Vec::new(),
            close_when: None,
        }
    }

    #[must_use]
    pub fn with_control(mut self, control: Control) -> Self {
        self.controls.push(control);
        self
    }

    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    #[must_use]
    pub fn close_when(mut self, rule: CloseRule) -> Self {
        self.close_when = Some(rule);
        self
    }

    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.placement.is_pinned()
    }
}

/// Snapshot of editor state that control and menu predicates read.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct UiState {
    pub tool: Tool,
    pub interaction: InteractionState,
    pub running: bool,
}
