//! Hit-testing and click dispatch against the menu stack.
//!
//! Search runs from the topmost menu down. The first menu whose bounds contain
//! the pointer takes the click, whether or not a control is under it; menus
//! below are never consulted. A click outside every menu closes the oldest
//! floating menu instead.

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod dispatch_test;

use crate::camera::Camera;
use crate::controls;
use crate::engine::Action;
use crate::geom::Vector;
use crate::input::InteractionState;
use crate::layout::{self, Grid};
use crate::menu::{ClickResult, Menu, UiState};
use crate::scene::Scene;
use crate::stack::{MenuId, MenuStack};
use crate::tools::ToolState;

/// Everything a control's click handler may touch.
pub struct ClickContext<'a> {
    pub stack: &'a mut MenuStack,
    pub camera: &'a mut Camera,
    pub tools: &'a mut ToolState,
    pub scene: &'a mut dyn Scene,
    pub grid: Grid,
    pub interaction: InteractionState,
    pub actions: &'a mut Vec<Action>,
}

impl ClickContext<'_> {
    /// Predicate snapshot for the current moment.
    #[must_use]
    pub fn ui(&self) -> UiState {
        UiState { tool: self.tools.active, interaction: self.interaction, running: self.scene.is_running() }
    }
}

/// Menu (and control, if any) under a screen point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub menu: MenuId,
    /// Index into `Menu::controls`; `None` when the point is on the menu
    /// background.
    pub control: Option<usize>,
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A control handled the click.
    Dispatched { menu: MenuId, control: usize, result: ClickResult, closed: bool },
    /// The click landed on a menu but not on a control.
    Absorbed { menu: MenuId },
    /// No menu under the pointer; `closed` is the floating menu this dismissed.
    Missed { closed: Option<MenuId> },
}

impl ClickOutcome {
    /// Whether a menu took the click.
    #[must_use]
    pub fn consumed(&self) -> bool {
        !matches!(self, Self::Missed { .. })
    }
}

/// Find the topmost menu under `point` and the first visible control in it
/// containing the point.
#[must_use]
pub fn hit_test(stack: &MenuStack, point: Vector, ui: &UiState, grid: Grid, camera: &Camera) -> Option<Hit> {
    let id = stack.topmost_at(point, ui, grid, camera)?;
    let menu = stack.get(id)?;
    let origin = layout::menu_screen_origin(menu, camera);
    let control = layout::layout(menu, ui, grid, camera).control_at(point - origin);
    Some(Hit { menu: id, control })
}

/// Whether a menu closes after one of its controls returned `result`.
#[must_use]
pub fn should_close(result: ClickResult, pinned: bool, keep_open: bool) -> bool {
    match result {
        ClickResult::Close => true,
        ClickResult::Keep => false,
        ClickResult::Default => !pinned && !keep_open,
    }
}

/// Dispatch a click at a screen point. At most one control fires.
pub fn dispatch_click(ctx: &mut ClickContext<'_>, point: Vector) -> ClickOutcome {
    let ui = ctx.ui();
    let Some(hit) = hit_test(&*ctx.stack, point, &ui, ctx.grid, &*ctx.camera) else {
        let closed = ctx.stack.close_oldest_unpinned();
        return ClickOutcome::Missed { closed };
    };
    let Some(control) = hit.control else {
        return ClickOutcome::Absorbed { menu: hit.menu };
    };

    let keep_open = ctx
        .stack
        .get(hit.menu)
        .and_then(|m| m.controls.get(control))
        .is_some_and(|c| c.keep_menu_open_on_click);

    let result = controls::activate(ctx, hit.menu, control);

    // The handler may have rearranged the stack; only the owning menu's id is trusted.
    let pinned = ctx.stack.get(hit.menu).is_some_and(Menu::is_pinned);
    let closed = ctx.stack.contains(hit.menu) && should_close(result, pinned, keep_open);
    if closed {
        ctx.stack.remove(hit.menu);
    }
    ClickOutcome::Dispatched { menu: hit.menu, control, result, closed }
}

/// Remove every menu whose close rule holds. Runs once per frame.
pub fn sweep_close_when(stack: &mut MenuStack, ui: &UiState) -> Vec<MenuId> {
    stack.close_where(|_, menu| menu.close_when.is_some_and(|rule| rule.holds(ui)))
}
