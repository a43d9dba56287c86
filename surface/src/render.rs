//! Rendering: turns the menu stack into drawing commands on a [`Surface`].
//!
//! Everything here is read-only over editor state. Rectangles come from the
//! same [`layout::layout`] call the dispatcher hit-tests against, so what is
//! drawn is exactly what is clickable.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::TAU;

use serde::Serialize;

use crate::camera::Camera;
use crate::geom::{Rect, Vector};
use crate::input::{InteractionState, Tool};
use crate::layout::{self, Grid};
use crate::menu::UiState;
use crate::stack::MenuStack;

/// Glyph size relative to the grid unit height.
const TEXT_SCALE: f64 = 0.5;

/// Stroke width of gesture previews, in screen pixels.
const PREVIEW_STROKE_PX: f64 = 1.0;

/// Segments used to approximate a circle preview.
const CIRCLE_SEGMENTS: u32 = 32;

/// Drawing primitives in screen-space pixels.
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, fill: Fill);
    fn draw_text(&mut self, center: Vector, text: &str, size: f64);
    fn stroke_path(&mut self, points: &[Vector], width: f64);
}

/// Fill style; the surface picks actual colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    MenuBackground,
    Control,
    ControlHighlighted,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    FillRect { rect: Rect, fill: Fill },
    DrawText { center: Vector, text: String, size: f64 },
    StrokePath { points: Vec<Vector>, width: f64 },
}

/// A surface that records commands instead of painting.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayList {
    pub commands: Vec<DrawCommand>,
}

impl DisplayList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for DisplayList {
    fn fill_rect(&mut self, rect: Rect, fill: Fill) {
        self.commands.push(DrawCommand::FillRect { rect, fill });
    }

    fn draw_text(&mut self, center: Vector, text: &str, size: f64) {
        self.commands.push(DrawCommand::DrawText { center, text: text.to_string(), size });
    }

    fn stroke_path(&mut self, points: &[Vector], width: f64) {
        self.commands.push(DrawCommand::StrokePath { points: points.to_vec(), width });
    }
}

/// Draw every open menu, bottom of the stack first.
pub fn draw_menus(surface: &mut dyn Surface, stack: &MenuStack, ui: &UiState, grid: Grid, camera: &Camera) {
    for (_, menu) in stack.iter() {
        let origin = layout::menu_screen_origin(menu, camera);
        let laid = layout::layout(menu, ui, grid, camera);
        surface.fill_rect(laid.bounds(origin), Fill::MenuBackground);

        let text_size = grid.unit_height * laid.scale * TEXT_SCALE;
        for cell in &laid.cells {
            let Some(control) = menu.controls.get(cell.index) else {
                continue;
            };
            let rect = cell.rect.translate(origin);
            let fill = if control.is_highlighted(ui, menu) { Fill::ControlHighlighted } else { Fill::Control };
            surface.fill_rect(rect, fill);
            let text = control.display_text();
            if !text.is_empty() {
                surface.draw_text(rect.center(), text, text_size);
            }
        }
    }
}

/// Outline of the shape a `Drawing` gesture would create if released at `pointer`.
pub fn draw_gesture(surface: &mut dyn Surface, state: InteractionState, tool: Tool, pointer: Vector) {
    let InteractionState::Drawing { origin } = state else {
        return;
    };
    match tool {
        Tool::Rectangle => {
            let r = Rect::from_corners(origin, pointer);
            let corners = [
                r.origin(),
                Vector::new(r.x + r.width, r.y),
                Vector::new(r.x + r.width, r.y + r.height),
                Vector::new(r.x, r.y + r.height),
                r.origin(),
            ];
            surface.stroke_path(&corners, PREVIEW_STROKE_PX);
        }
        Tool::Circle => {
            let radius = origin.distance(pointer);
            let points: Vec<Vector> = (0..=CIRCLE_SEGMENTS)
                .map(|i| {
                    let angle = TAU * f64::from(i) / f64::from(CIRCLE_SEGMENTS);
                    origin + Vector::new(angle.cos(), angle.sin()) * radius
                })
                .collect();
            surface.stroke_path(&points, PREVIEW_STROKE_PX);
        }
        Tool::Spring => surface.stroke_path(&[origin, pointer], PREVIEW_STROKE_PX),
        Tool::Pan | Tool::Drag | Tool::Erase | Tool::Hinge | Tool::Move => {}
    }
}
