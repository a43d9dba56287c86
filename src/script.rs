//! Pointer scripts: recorded per-frame samples in, per-frame JSON trace out.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use serde::{Deserialize, Serialize};
use surface::engine::{Action, EditorCore};
use surface::geom::Vector;
use surface::input::{InteractionState, PointerFrame, Tool};
use surface::layout;
use surface::menu::Placement;
use surface::scene::Scene;
use surface::stack::MenuId;

/// Frame delta used when a script frame does not give one.
const DEFAULT_FRAME_DT: f64 = 1.0 / 60.0;

fn default_dt() -> f64 {
    DEFAULT_FRAME_DT
}

/// One recorded pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ScriptFrame {
    pub pos: Vector,
    #[serde(default)]
    pub down: bool,
    #[serde(default)]
    pub right_click: bool,
    #[serde(default)]
    pub wheel: f64,
    /// Seconds since the previous frame.
    #[serde(default = "default_dt")]
    pub dt: f64,
}

impl ScriptFrame {
    #[must_use]
    pub fn pointer(&self) -> PointerFrame {
        PointerFrame {
            position: self.pos,
            primary_down: self.down,
            secondary_click: self.right_click,
            wheel_delta: self.wheel,
        }
    }
}

/// An open menu as seen at the end of a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuTrace {
    pub id: MenuId,
    pub name: String,
    pub placement: Placement,
    /// Screen-space top-left corner.
    pub origin: Vector,
    /// Screen-space extent.
    pub size: Vector,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameTrace {
    pub frame: usize,
    pub state: InteractionState,
    pub tool: Tool,
    pub running: bool,
    pub zoom: f64,
    pub menus: Vec<MenuTrace>,
    pub actions: Vec<Action>,
}

/// Parse a script: a JSON array of frames.
///
/// # Errors
///
/// Returns the `serde_json` error when the text is not a valid script.
pub fn parse(text: &str) -> Result<Vec<ScriptFrame>, serde_json::Error> {
    serde_json::from_str(text)
}

/// Play every frame through `core`, recording a trace entry per frame.
pub fn run<S: Scene>(core: &mut EditorCore<S>, frames: &[ScriptFrame]) -> Vec<FrameTrace> {
    frames
        .iter()
        .enumerate()
        .map(|(frame, sample)| {
            let actions = core.frame(&sample.pointer(), sample.dt);
            trace_frame(core, frame, actions)
        })
        .collect()
}

fn trace_frame<S: Scene>(core: &EditorCore<S>, frame: usize, actions: Vec<Action>) -> FrameTrace {
    let ui = core.ui_state();
    let camera = core.camera();
    let menus = core
        .menu_stack()
        .iter()
        .map(|(id, menu)| MenuTrace {
            id,
            name: menu.name.clone(),
            placement: menu.placement,
            origin: layout::menu_screen_origin(menu, camera),
            size: layout::layout(menu, &ui, core.grid, camera).size,
        })
        .collect();
    FrameTrace {
        frame,
        state: ui.interaction,
        tool: ui.tool,
        running: ui.running,
        zoom: camera.zoom,
        menus,
        actions,
    }
}

/// Look a tool up by its lowercase name.
///
/// # Errors
///
/// Returns a message listing the valid names.
pub fn parse_tool(name: &str) -> Result<Tool, String> {
    Tool::ALL.into_iter().find(|t| t.name() == name).ok_or_else(|| {
        let names: Vec<&str> = Tool::ALL.iter().map(|t| t.name()).collect();
        format!("unknown tool `{name}`; expected one of {}", names.join(", "))
    })
}
