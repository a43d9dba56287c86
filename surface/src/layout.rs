//! Menu layout: turns a menu's grid-declared controls into pixel rectangles.
//!
//! The same function feeds hit-testing and drawing, so it must stay pure:
//! identical inputs give bit-identical rectangles.
//!
//! Rules, applied to the visible controls only:
//! - **stretch**: a control spans the whole menu width when no other visible
//!   control sits on its row at a different column;
//! - **flow**: controls declaring the same cell stack downward in insertion
//!   order, one grid unit per rank;
//! - **extent**: the menu is as wide and tall as its furthest control.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use crate::camera::Camera;
use crate::consts::DEFAULT_LINE_HEIGHT_PX;
use crate::geom::{Rect, Vector};
use crate::menu::{Control, Menu, Placement, UiState};

/// Pixel size of one grid unit: two text lines tall, half that wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub unit_width: f64,
    pub unit_height: f64,
}

impl Grid {
    #[must_use]
    pub fn from_line_height(line_height: f64) -> Self {
        let unit_height = line_height * 2.0;
        Self { unit_width: unit_height / 2.0, unit_height }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::from_line_height(DEFAULT_LINE_HEIGHT_PX)
    }
}

/// Rectangle of one visible control, relative to the menu origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellLayout {
    /// Index into `Menu::controls`.
    pub index: usize,
    pub rect: Rect,
    pub stretched: bool,
    /// Rank within a group of controls sharing one cell.
    pub flow: u32,
}

/// Result of laying out a menu. All sizes already include the scale factor.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuLayout {
    pub size: Vector,
    pub scale: f64,
    /// Visible controls in menu order.
    pub cells: Vec<CellLayout>,
}

impl MenuLayout {
    /// Bounding rectangle once the menu is placed at `origin`.
    #[must_use]
    pub fn bounds(&self, origin: Vector) -> Rect {
        Rect::new(origin.x, origin.y, self.size.x, self.size.y)
    }

    /// Menu-relative rectangle of `Menu::controls[index]`, if it is visible.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<Rect> {
        self.cells.iter().find(|c| c.index == index).map(|c| c.rect)
    }

    /// First visible control (in menu order) containing a menu-relative point.
    #[must_use]
    pub fn control_at(&self, local: Vector) -> Option<usize> {
        self.cells.iter().find(|c| c.rect.contains(local)).map(|c| c.index)
    }
}

/// Indices of the controls whose hidden predicate is false.
#[must_use]
pub fn visible_controls(menu: &Menu, ui: &UiState) -> Vec<usize> {
    menu.controls
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.is_hidden(ui, menu))
        .map(|(i, _)| i)
        .collect()
}

/// Lay out the given visible controls of `menu` at `scale`.
#[must_use]
pub fn arrange(menu: &Menu, visible: &[usize], grid: Grid, scale: f64) -> MenuLayout {
    let controls: Vec<(usize, &Control)> = visible
        .iter()
        .filter_map(|&i| menu.controls.get(i).map(|c| (i, c)))
        .collect();

    let flows: Vec<u32> = controls
        .iter()
        .enumerate()
        .map(|(pos, (_, c))| {
            let earlier = controls[..pos].iter().filter(|(_, other)| other.cell == c.cell).count();
            u32::try_from(earlier).unwrap_or(u32::MAX)
        })
        .collect();

    let mut width_units = 0_u32;
    let mut height_units = 0_u32;
    for ((_, c), flow) in controls.iter().zip(&flows) {
        width_units = width_units.max(c.cell.x.saturating_add(c.span.width));
        height_units = height_units.max(c.cell.y.saturating_add(c.span.height).saturating_add(*flow));
    }
    let menu_width = f64::from(width_units) * grid.unit_width;
    let menu_height = f64::from(height_units) * grid.unit_height;

    let cells = controls
        .iter()
        .zip(&flows)
        .map(|(&(index, c), &flow)| {
            let stretched = !controls
                .iter()
                .any(|(j, other)| *j != index && other.cell.y == c.cell.y && other.cell.x != c.cell.x);
            let width = if stretched { menu_width } else { f64::from(c.span.width) * grid.unit_width };
            let rect = Rect::new(
                f64::from(c.cell.x) * grid.unit_width,
                f64::from(c.cell.y.saturating_add(flow)) * grid.unit_height,
                width,
                f64::from(c.span.height) * grid.unit_height,
            );
            CellLayout { index, rect: rect.scale(scale), stretched, flow }
        })
        .collect();

    MenuLayout { size: Vector::new(menu_width, menu_height) * scale, scale, cells }
}

/// Lay out `menu` as it appears this frame: visibility from `ui`, scale from
/// its placement and the camera.
#[must_use]
pub fn layout(menu: &Menu, ui: &UiState, grid: Grid, camera: &Camera) -> MenuLayout {
    arrange(menu, &visible_controls(menu, ui), grid, menu_scale(menu, camera))
}

/// Scale factor a menu is drawn at.
#[must_use]
pub fn menu_scale(menu: &Menu, camera: &Camera) -> f64 {
    match menu.placement {
        Placement::Floating | Placement::PositionPinned => 1.0,
        Placement::ScenePinned { zoom } => zoom / camera.zoom,
    }
}

/// Screen-space position of a menu's top-left corner.
#[must_use]
pub fn menu_screen_origin(menu: &Menu, camera: &Camera) -> Vector {
    match menu.placement {
        Placement::Floating => menu.position,
        Placement::PositionPinned | Placement::ScenePinned { .. } => camera.to_screen(menu.position),
    }
}

/// Absolute screen rectangle of `Menu::controls[index]`, or `None` when the
/// control is hidden or does not exist.
#[must_use]
pub fn control_rectangle(menu: &Menu, index: usize, ui: &UiState, grid: Grid, camera: &Camera) -> Option<Rect> {
    let origin = menu_screen_origin(menu, camera);
    layout(menu, ui, grid, camera).cell(index).map(|r| r.translate(origin))
}
