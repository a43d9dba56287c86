#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::{CONTEXT_MENU, GLYPH_PAUSE, TOOL_OPTIONS_MENU};
use crate::menu::{ControlKind, Placement};
use crate::render::{DisplayList, DrawCommand, Fill};
use crate::scene::{BodyStore, Shape};

// =============================================================
// Helpers
// =============================================================

const DT: f64 = 1.0 / 60.0;

fn core() -> EditorCore<BodyStore> {
    EditorCore::new(BodyStore::new(), &EditorConfig::default())
}

fn pt(x: f64, y: f64) -> Vector {
    Vector::new(x, y)
}

fn pointer(x: f64, y: f64, down: bool) -> PointerFrame {
    PointerFrame { position: pt(x, y), primary_down: down, ..PointerFrame::default() }
}

fn press(core: &mut EditorCore<BodyStore>, x: f64, y: f64) -> Vec<Action> {
    core.frame(&pointer(x, y, true), DT)
}

fn release(core: &mut EditorCore<BodyStore>, x: f64, y: f64) -> Vec<Action> {
    core.frame(&pointer(x, y, false), DT)
}

fn click(core: &mut EditorCore<BodyStore>, p: Vector) -> Vec<Action> {
    let mut actions = press(core, p.x, p.y);
    actions.extend(release(core, p.x, p.y));
    actions
}

fn drag(core: &mut EditorCore<BodyStore>, from: Vector, to: Vector) -> Vec<Action> {
    let mut actions = press(core, from.x, from.y);
    actions.extend(press(core, to.x, to.y));
    actions.extend(release(core, to.x, to.y));
    actions
}

fn right_click(core: &mut EditorCore<BodyStore>, x: f64, y: f64) -> Vec<Action> {
    core.frame(&PointerFrame { position: pt(x, y), secondary_click: true, ..PointerFrame::default() }, DT)
}

/// Open the context menu at `(x, y)` and return its id.
fn open_context(core: &mut EditorCore<BodyStore>, x: f64, y: f64) -> MenuId {
    right_click(core, x, y);
    core.menu_stack().find_by_name(CONTEXT_MENU).unwrap()
}

/// Screen-space center of the first control of `kind` in `menu`.
fn center_of(core: &EditorCore<BodyStore>, menu: MenuId, kind: &ControlKind) -> Vector {
    let index = core.menu_stack().get(menu).unwrap().controls.iter().position(|c| &c.kind == kind).unwrap();
    core.control_rectangle(menu, index).unwrap().center()
}

fn approx(a: Vector, b: Vector) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

// =============================================================
// Interaction state
// =============================================================

#[test]
fn press_release_in_place_is_a_click_consumed_same_frame() {
    let mut core = core();
    core.before_update(&pointer(10.0, 10.0, true), DT);
    assert_eq!(core.current_interaction_state(), InteractionState::Pressed { origin: pt(10.0, 10.0) });
    core.after_render(&pointer(10.0, 10.0, true));

    core.before_update(&pointer(10.0, 10.0, false), DT);
    assert_eq!(core.current_interaction_state(), InteractionState::Click);
    core.after_render(&pointer(10.0, 10.0, false));
    assert_eq!(core.current_interaction_state(), InteractionState::Idle);
}

#[test]
fn ui_state_reflects_tool_and_simulation() {
    let mut core = core();
    assert!(core.set_tool(Tool::Spring));
    assert!(!core.set_tool(Tool::Spring));
    core.scene.toggle_running();
    let ui = core.ui_state();
    assert_eq!(ui.tool, Tool::Spring);
    assert!(ui.running);
}

// =============================================================
// Right-click and context menu
// =============================================================

#[test]
fn right_click_opens_context_menu_at_pointer() {
    let mut core = core();
    let actions = right_click(&mut core, 100.0, 120.0);
    let id = core.menu_stack().find_by_name(CONTEXT_MENU).unwrap();
    assert_eq!(actions, vec![Action::MenuOpened { id, name: CONTEXT_MENU.to_string() }]);
    assert_eq!(core.menu_screen_origin(id), Some(pt(100.0, 120.0)));
}

#[test]
fn right_click_closes_oldest_unpinned_first() {
    let mut core = core();
    let first = open_context(&mut core, 100.0, 100.0);
    let actions = right_click(&mut core, 300.0, 300.0);
    assert_eq!(core.menu_stack().len(), 1);
    assert!(!core.menu_stack().contains(first));
    assert_eq!(actions[0], Action::MenuClosed { id: first });
    assert!(matches!(actions[1], Action::MenuOpened { .. }));
}

#[test]
fn right_click_ignores_gesture_in_progress() {
    let mut core = core();
    press(&mut core, 500.0, 500.0);
    core.frame(
        &PointerFrame { position: pt(500.0, 500.0), primary_down: true, secondary_click: true, wheel_delta: 0.0 },
        DT,
    );
    assert_eq!(core.menu_stack().len(), 1);
    assert_eq!(core.current_interaction_state(), InteractionState::Pressed { origin: pt(500.0, 500.0) });
}

#[test]
fn click_in_right_click_frame_lands_on_new_context_menu() {
    let mut core = core();
    let body = core.scene.create_rect(Rect::new(0.0, 0.0, 500.0, 500.0));
    core.set_tool(Tool::Erase);
    press(&mut core, 100.0, 100.0);
    let actions = core.frame(
        &PointerFrame { position: pt(100.0, 100.0), secondary_click: true, ..PointerFrame::default() },
        DT,
    );

    let id = core.menu_stack().find_by_name(CONTEXT_MENU).unwrap();
    assert_eq!(actions, vec![Action::MenuOpened { id, name: CONTEXT_MENU.to_string() }]);
    assert_eq!(core.menu_stack().len(), 1);
    assert!(core.scene().get(body).is_some());
    assert_eq!(core.current_interaction_state(), InteractionState::Idle);
}

#[test]
fn tool_button_selects_tool_and_closes_floating_menu() {
    let mut core = core();
    let id = open_context(&mut core, 100.0, 100.0);
    let at = center_of(&core, id, &ControlKind::Tool(Tool::Rectangle));
    let actions = click(&mut core, at);
    assert_eq!(core.ui_state().tool, Tool::Rectangle);
    assert_eq!(actions, vec![Action::ToolChanged { tool: Tool::Rectangle }, Action::MenuClosed { id }]);
    assert!(core.menu_stack().is_empty());
}

#[test]
fn pinned_menu_survives_tool_selection() {
    let mut core = core();
    let id = open_context(&mut core, 100.0, 100.0);
    let at = center_of(&core, id, &ControlKind::Pin);
    click(&mut core, at);
    assert!(core.menu_stack().get(id).unwrap().is_pinned());

    let at = center_of(&core, id, &ControlKind::Tool(Tool::Erase));
    click(&mut core, at);
    assert_eq!(core.ui_state().tool, Tool::Erase);
    assert!(core.menu_stack().contains(id));
}

#[test]
fn play_pause_keeps_menu_open_and_swaps_icon() {
    let mut core = core();
    let id = open_context(&mut core, 100.0, 100.0);
    let at = center_of(&core, id, &ControlKind::PlayPause);
    let actions = click(&mut core, at);
    assert_eq!(actions, vec![Action::SimulationToggled { running: true }]);
    assert!(core.scene().is_running());
    let menu = core.menu_stack().get(id).unwrap();
    let play = menu.controls.iter().find(|c| c.kind == ControlKind::PlayPause).unwrap();
    assert_eq!(play.icon.as_deref(), Some(GLYPH_PAUSE));
}

#[test]
fn tool_options_sub_menu_closes_when_tool_changes() {
    let mut core = core();
    core.set_tool(Tool::Spring);
    let context = open_context(&mut core, 100.0, 100.0);
    let at = center_of(&core, context, &ControlKind::ToolOptions);
    let actions = click(&mut core, at);
    let options = core.menu_stack().find_by_name(TOOL_OPTIONS_MENU).unwrap();
    assert_eq!(actions, vec![Action::MenuOpened { id: options, name: TOOL_OPTIONS_MENU.to_string() }]);
    assert_eq!(core.menu_screen_origin(options), Some(pt(228.0, 100.0)));

    let at = center_of(&core, context, &ControlKind::Tool(Tool::Circle));
    let actions = click(&mut core, at);
    assert!(core.menu_stack().is_empty());
    assert!(actions.contains(&Action::MenuClosed { id: context }));
    assert!(actions.contains(&Action::MenuClosed { id: options }));
}

#[test]
fn outside_click_closes_menu_without_running_tool() {
    let mut core = core();
    let body = core.scene.create_rect(Rect::new(400.0, 400.0, 50.0, 50.0));
    core.set_tool(Tool::Erase);
    let id = open_context(&mut core, 100.0, 100.0);

    let actions = click(&mut core, pt(420.0, 420.0));
    assert_eq!(actions, vec![Action::MenuClosed { id }]);
    assert_eq!(core.scene().len(), 1);

    let actions = click(&mut core, pt(420.0, 420.0));
    assert_eq!(actions, vec![Action::BodyRemoved { id: body }]);
    assert!(core.scene().is_empty());
}

#[test]
fn outside_click_with_mixed_stack_closes_oldest_unpinned() {
    let mut core = core();
    let a = core.open_menu(controls::context_menu(pt(0.0, 0.0), false));
    let b = core.open_menu(controls::context_menu(pt(200.0, 0.0), false).with_placement(Placement::PositionPinned));
    let c = core.open_menu(controls::context_menu(pt(400.0, 0.0), false));
    core.frame(&pointer(0.0, 0.0, false), DT);

    click(&mut core, pt(900.0, 900.0));
    assert_eq!(core.menu_stack().ids(), vec![b, c]);
    assert!(!core.menu_stack().contains(a));
}

#[test]
fn click_on_menu_background_never_reaches_tool() {
    let mut core = core();
    let body = core.scene.create_rect(Rect::new(0.0, 0.0, 500.0, 500.0));
    core.set_tool(Tool::Erase);
    let id = open_context(&mut core, 100.0, 100.0);
    let at = center_of(&core, id, &ControlKind::Title);
    click(&mut core, at);
    assert!(core.scene().get(body).is_some());
    assert!(core.menu_stack().contains(id));
}

// =============================================================
// Pinning and camera
// =============================================================

#[test]
fn pinned_menu_stays_put_in_the_scene() {
    let mut core = core();
    let id = open_context(&mut core, 100.0, 100.0);
    let at = center_of(&core, id, &ControlKind::Pin);
    click(&mut core, at);
    let menu = core.menu_stack().get(id).unwrap();
    let scene_pos = menu.position;
    assert_eq!(core.menu_screen_origin(id), Some(pt(100.0, 100.0)));

    // Drag over empty space pans the view; the menu travels with the scene.
    drag(&mut core, pt(400.0, 400.0), pt(450.0, 420.0));
    assert_eq!(core.camera().pan_offset, pt(-50.0, -20.0));
    assert_eq!(core.menu_screen_origin(id), Some(pt(150.0, 120.0)));

    core.frame(&PointerFrame { position: pt(300.0, 300.0), wheel_delta: 100.0, ..PointerFrame::default() }, DT);
    let origin = core.menu_screen_origin(id).unwrap();
    assert!(approx(origin, core.camera().to_screen(scene_pos)));
    assert_eq!(core.menu_stack().get(id).unwrap().position, scene_pos);
}

#[test]
fn wheel_zoom_keeps_anchor_fixed() {
    let mut core = core();
    let anchor = pt(200.0, 150.0);
    let before = core.camera().to_scene(anchor);
    core.frame(&PointerFrame { position: anchor, wheel_delta: -300.0, ..PointerFrame::default() }, DT);
    assert!(core.camera().zoom < 1.0);
    assert!(approx(core.camera().to_scene(anchor), before));
}

#[test]
fn reset_zoom_eases_back_to_one() {
    let mut core = core();
    core.camera.zoom = 3.0;
    core.camera.zoom_target = 3.0;
    let id = open_context(&mut core, 10.0, 10.0);
    let at = center_of(&core, id, &ControlKind::ResetZoom);
    click(&mut core, at);
    assert_eq!(core.camera().zoom_target, 1.0);
    for _ in 0..600 {
        core.frame(&pointer(0.0, 0.0, false), DT);
    }
    assert_eq!(core.camera().zoom, 1.0);
}

// =============================================================
// Tools through the frame loop
// =============================================================

#[test]
fn drawing_a_rectangle_creates_a_body() {
    let mut core = core();
    core.set_tool(Tool::Rectangle);
    press(&mut core, 10.0, 10.0);
    press(&mut core, 50.0, 40.0);
    assert_eq!(core.current_interaction_state(), InteractionState::Drawing { origin: pt(10.0, 10.0) });
    let actions = release(&mut core, 50.0, 40.0);
    let [Action::BodyCreated { id }] = actions.as_slice() else {
        panic!("expected one body, got {actions:?}");
    };
    assert_eq!(core.scene().get(*id).map(|b| b.shape), Some(Shape::Rect { rect: Rect::new(10.0, 10.0, 40.0, 30.0) }));
    assert_eq!(core.current_interaction_state(), InteractionState::Idle);
}

#[test]
fn drawing_back_to_origin_is_discarded() {
    let mut core = core();
    core.set_tool(Tool::Circle);
    press(&mut core, 10.0, 10.0);
    press(&mut core, 60.0, 60.0);
    let actions = release(&mut core, 10.0, 10.0);
    assert!(actions.is_empty());
    assert!(core.scene().is_empty());
    assert_eq!(core.current_interaction_state(), InteractionState::Idle);
}

#[test]
fn drawing_uses_scene_coordinates() {
    let mut core = core();
    core.camera.pan_offset = pt(100.0, 0.0);
    core.camera.zoom = 2.0;
    core.camera.zoom_target = 2.0;
    core.set_tool(Tool::Circle);
    drag(&mut core, pt(0.0, 0.0), pt(3.0, 4.0));
    let body = &core.scene().bodies()[0];
    assert_eq!(body.shape, Shape::Circle { center: pt(100.0, 0.0), radius: 10.0 });
}

#[test]
fn drag_tool_moves_body_under_press() {
    let mut core = core();
    let body = core.scene.create_rect(Rect::new(0.0, 0.0, 20.0, 20.0));
    press(&mut core, 5.0, 5.0);
    let actions = press(&mut core, 25.0, 5.0);
    assert_eq!(core.current_interaction_state(), InteractionState::Dragging);
    assert_eq!(actions, vec![Action::BodyMoved { id: body }]);
    assert_eq!(core.scene().body_center(body), Some(pt(30.0, 10.0)));
    release(&mut core, 25.0, 5.0);
    assert!(core.tools.grab.is_none());
    assert_eq!(core.camera().pan_offset, Vector::ZERO);
}

#[test]
fn pan_tool_pans_even_over_bodies() {
    let mut core = core();
    core.scene.create_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
    core.set_tool(Tool::Pan);
    drag(&mut core, pt(50.0, 50.0), pt(60.0, 50.0));
    assert_eq!(core.camera().pan_offset, pt(-10.0, 0.0));
    assert_eq!(core.scene().body_center(core.scene().bodies()[0].id), Some(pt(50.0, 50.0)));
}

#[test]
fn hinge_tool_joins_two_clicked_bodies() {
    let mut core = core();
    core.scene.create_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
    core.scene.create_rect(Rect::new(100.0, 0.0, 10.0, 10.0));
    core.set_tool(Tool::Hinge);
    assert!(click(&mut core, pt(5.0, 5.0)).is_empty());
    let actions = click(&mut core, pt(105.0, 5.0));
    assert!(matches!(actions.as_slice(), [Action::JointCreated { .. }]));
    assert_eq!(core.scene().joints().len(), 1);
}

// =============================================================
// Collaborator API
// =============================================================

#[test]
fn menus_opened_through_api_are_announced_next_frame() {
    let mut core = core();
    let id = core.open_menu(controls::tool_options_menu(Tool::Circle, pt(0.0, 0.0)));
    core.set_tool(Tool::Circle);
    let actions = core.frame(&pointer(500.0, 500.0, false), DT);
    assert_eq!(actions, vec![Action::MenuOpened { id, name: TOOL_OPTIONS_MENU.to_string() }]);

    let closed = core.close_menu_by_predicate(|_, m| m.name == TOOL_OPTIONS_MENU);
    assert_eq!(closed, vec![id]);
    let actions = core.frame(&pointer(500.0, 500.0, false), DT);
    assert_eq!(actions, vec![Action::MenuClosed { id }]);
}

#[test]
fn control_rectangle_is_absolute_and_none_when_hidden() {
    let mut core = core();
    let id = open_context(&mut core, 100.0, 100.0);
    let close = core.menu_stack().get(id).unwrap().controls.iter().position(|c| c.kind == ControlKind::Close).unwrap();
    assert_eq!(core.control_rectangle(id, close), Some(Rect::new(212.0, 100.0, 16.0, 32.0)));

    let options = core.menu_stack().get(id).unwrap().controls.len() - 1;
    assert_eq!(core.control_rectangle(id, options), None);
    core.set_tool(Tool::Rectangle);
    assert!(core.control_rectangle(id, options).is_some());
}

#[test]
fn draw_emits_menu_background_then_cells() {
    let mut core = core();
    open_context(&mut core, 100.0, 100.0);
    let mut list = DisplayList::new();
    core.draw(&mut list);
    assert_eq!(
        list.commands[0],
        DrawCommand::FillRect { rect: Rect::new(100.0, 100.0, 128.0, 192.0), fill: Fill::MenuBackground }
    );
    let cells = list.commands.iter().filter(|c| matches!(c, DrawCommand::FillRect { fill, .. } if *fill != Fill::MenuBackground)).count();
    assert_eq!(cells, 13);
    let highlighted = list
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::FillRect { fill: Fill::ControlHighlighted, .. }))
        .count();
    assert_eq!(highlighted, 1);
}

#[test]
fn action_serializes_with_tag() {
    let json = serde_json::to_value(Action::ToolChanged { tool: Tool::Hinge }).unwrap();
    assert_eq!(json, serde_json::json!({ "action": "tool_changed", "tool": "hinge" }));
}
