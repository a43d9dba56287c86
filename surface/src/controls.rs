//! Per-kind control behaviour and the standard menus built from it.
//!
//! Each [`ControlKind`] maps to a visibility rule, a highlight rule, and a
//! click handler. Handlers may mutate the owning menu, the menu stack, the
//! camera, the tool selection, and the scene; they report back a
//! [`ClickResult`] that the dispatcher turns into keep/close.

#[cfg(test)]
#[path = "controls_test.rs"]
mod controls_test;

use crate::camera::Camera;
use crate::consts::{
    CONTEXT_MENU, GLYPH_CLOSE, GLYPH_OPTIONS, GLYPH_PAUSE, GLYPH_PIN, GLYPH_PLAY, GLYPH_RESET_ZOOM, TOOL_OPTIONS_MENU,
};
use crate::dispatch::ClickContext;
use crate::engine::Action;
use crate::geom::Vector;
use crate::input::Tool;
use crate::layout;
use crate::menu::{ClickResult, CloseRule, Control, ControlKind, Menu, Placement, UiState};
use crate::stack::MenuId;

impl Control {
    /// Whether the control is left out of this frame's layout.
    #[must_use]
    pub fn is_hidden(&self, ui: &UiState, _menu: &Menu) -> bool {
        match &self.kind {
            ControlKind::ToolOptions => !ui.tool.has_options(),
            ControlKind::Title
            | ControlKind::Close
            | ControlKind::Pin
            | ControlKind::Tool(_)
            | ControlKind::PlayPause
            | ControlKind::ResetZoom
            | ControlKind::Field(_) => false,
        }
    }

    /// Presentation only; has no effect on dispatch.
    #[must_use]
    pub fn is_highlighted(&self, ui: &UiState, menu: &Menu) -> bool {
        match &self.kind {
            ControlKind::Tool(tool) => ui.tool == *tool,
            ControlKind::Pin => menu.is_pinned(),
            ControlKind::PlayPause => ui.running,
            ControlKind::Title
            | ControlKind::Close
            | ControlKind::ToolOptions
            | ControlKind::ResetZoom
            | ControlKind::Field(_) => false,
        }
    }
}

impl CloseRule {
    /// Whether the sweep should remove a menu carrying this rule.
    #[must_use]
    pub fn holds(self, ui: &UiState) -> bool {
        match self {
            CloseRule::ToolChanged(tool) => ui.tool != tool,
        }
    }
}

/// Run the click handler of `controls[index]` in menu `menu_id`.
///
/// A control that no longer exists is treated as a `Keep` no-op.
pub fn activate(ctx: &mut ClickContext<'_>, menu_id: MenuId, index: usize) -> ClickResult {
    let Some(kind) = ctx.stack.get(menu_id).and_then(|m| m.controls.get(index)).map(|c| c.kind.clone()) else {
        return ClickResult::Keep;
    };

    match kind {
        ControlKind::Title | ControlKind::Field(_) => ClickResult::Keep,
        ControlKind::Close => ClickResult::Close,
        ControlKind::Pin => {
            if let Some(menu) = ctx.stack.get_mut(menu_id) {
                toggle_pin(menu, &*ctx.camera);
            }
            ClickResult::Keep
        }
        ControlKind::Tool(tool) => {
            if ctx.tools.select(tool) {
                ctx.actions.push(Action::ToolChanged { tool });
            }
            ClickResult::Default
        }
        ControlKind::PlayPause => {
            let running = ctx.scene.toggle_running();
            tracing::info!(running, "simulation toggled");
            if let Some(control) = ctx.stack.get_mut(menu_id).and_then(|m| m.controls.get_mut(index)) {
                control.icon = Some(play_pause_glyph(running).to_string());
            }
            ctx.actions.push(Action::SimulationToggled { running });
            ClickResult::Keep
        }
        ControlKind::ToolOptions => {
            open_tool_options(ctx, menu_id);
            ClickResult::Keep
        }
        ControlKind::ResetZoom => {
            ctx.camera.set_zoom_target(1.0);
            ClickResult::Default
        }
    }
}

/// Convert a menu between floating and scene-pinned without moving it on
/// screen under the current camera.
pub fn toggle_pin(menu: &mut Menu, camera: &Camera) {
    match menu.placement {
        Placement::Floating => {
            menu.position = camera.to_scene(menu.position);
            menu.placement = Placement::ScenePinned { zoom: camera.zoom };
        }
        Placement::PositionPinned | Placement::ScenePinned { .. } => {
            menu.position = camera.to_screen(menu.position);
            menu.placement = Placement::Floating;
        }
    }
}

/// Open the active tool's options beside the owning menu. A pinned owner gets
/// a position-pinned sub-menu so the two stay together when the view pans.
fn open_tool_options(ctx: &mut ClickContext<'_>, owner_id: MenuId) {
    let ui = ctx.ui();
    if !ui.tool.has_options() {
        return;
    }
    let Some(owner) = ctx.stack.get(owner_id) else {
        return;
    };

    let origin = layout::menu_screen_origin(owner, &*ctx.camera);
    let size = layout::layout(owner, &ui, ctx.grid, &*ctx.camera).size;
    let beside = origin + Vector::new(size.x, 0.0);

    let mut options = tool_options_menu(ui.tool, beside);
    if owner.is_pinned() {
        options.position = ctx.camera.to_scene(beside);
        options.placement = Placement::PositionPinned;
    }
    ctx.stack.replace(options);
}

#[must_use]
pub fn play_pause_glyph(running: bool) -> &'static str {
    if running { GLYPH_PAUSE } else { GLYPH_PLAY }
}

/// The right-click menu: tool palette, play/pause, zoom reset, tool options.
#[must_use]
pub fn context_menu(position: Vector, running: bool) -> Menu {
    let mut menu = Menu::new(CONTEXT_MENU, position)
        .with_control(Control::new(ControlKind::Title, 0, 0).span(6, 1).label("tools"))
        .with_control(Control::new(ControlKind::Pin, 6, 0).icon(GLYPH_PIN).keep_open())
        .with_control(Control::new(ControlKind::Close, 7, 0).icon(GLYPH_CLOSE));

    for (i, tool) in (0_u32..).zip(Tool::ALL) {
        let control = Control::new(ControlKind::Tool(tool), (i % 2) * 4, 1 + i / 2).span(4, 1).label(tool.name());
        menu.controls.push(control);
    }

    let tool_rows = 1 + u32::try_from(Tool::ALL.len().div_ceil(2)).unwrap_or(0);
    menu.with_control(
        Control::new(ControlKind::PlayPause, 0, tool_rows)
            .span(4, 1)
            .icon(play_pause_glyph(running))
            .keep_open(),
    )
    .with_control(Control::new(ControlKind::ResetZoom, 4, tool_rows).span(4, 1).icon(GLYPH_RESET_ZOOM))
    .with_control(
        Control::new(ControlKind::ToolOptions, 0, tool_rows + 1)
            .span(8, 1)
            .icon(GLYPH_OPTIONS)
            .label("options"),
    )
}

/// Options sub-menu for `tool`: a title row, then one text field per option,
/// all declared in the same cell so they flow downward.
#[must_use]
pub fn tool_options_menu(tool: Tool, position: Vector) -> Menu {
    let mut menu = Menu::new(TOOL_OPTIONS_MENU, position)
        .with_control(Control::new(ControlKind::Title, 0, 0).span(6, 1).label(format!("{} options", tool.name())))
        .with_control(Control::new(ControlKind::Close, 6, 0).icon(GLYPH_CLOSE))
        .close_when(CloseRule::ToolChanged(tool));
    for field in tool.option_fields() {
        menu.controls.push(Control::new(ControlKind::Field((*field).to_string()), 0, 1).span(7, 1).label(*field));
    }
    menu
}
