use serde::Serialize;

use crate::camera::Camera;
use crate::config::EditorConfig;
use crate::controls;
use crate::dispatch::{self, ClickContext, ClickOutcome};
use crate::geom::{Rect, Vector};
use crate::input::{Interaction, InteractionState, PointerFrame, PointerSample, Tool};
use crate::layout::{self, Grid};
use crate::menu::{Menu, UiState};
use crate::render::{self, Surface};
use crate::scene::{BodyId, JointId, Scene};
use crate::stack::{MenuId, MenuStack};
use crate::tools::{self, ToolState};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Side effects of a frame, reported back to the host in the order they happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    MenuOpened { id: MenuId, name: String },
    MenuClosed { id: MenuId },
    ToolChanged { tool: Tool },
    SimulationToggled { running: bool },
    BodyCreated { id: BodyId },
    BodyMoved { id: BodyId },
    BodyRemoved { id: BodyId },
    JointCreated { id: JointId },
}

/// The editor core: camera, menus, tools, and the gesture machine over a scene.
///
/// The host calls [`EditorCore::before_update`] before stepping its simulation
/// and [`EditorCore::after_render`] after drawing, once each per frame, or
/// [`EditorCore::frame`] for both.
pub struct EditorCore<S: Scene> {
    pub scene: S,
    pub camera: Camera,
    pub stack: MenuStack,
    pub tools: ToolState,
    pub interaction: Interaction,
    pub grid: Grid,
    /// Pointer position of the previous frame, for pan deltas.
    last_pointer: Option<Vector>,
    /// Seconds since the first frame, summed from frame deltas.
    clock: f64,
    /// Menus already announced through `MenuOpened`.
    announced: Vec<MenuId>,
}

impl<S: Scene> EditorCore<S> {
    #[must_use]
    pub fn new(scene: S, config: &EditorConfig) -> Self {
        Self {
            scene,
            camera: config.camera(),
            stack: MenuStack::new(),
            tools: ToolState::default(),
            interaction: Interaction::new(config.drag_threshold_px),
            grid: config.grid(),
            last_pointer: None,
            clock: 0.0,
            announced: Vec::new(),
        }
    }

    // --- Frame phases ---

    /// Zoom, classify the pointer sample, and run the gesture tools
    /// (drag, pan, drawing completion).
    pub fn before_update(&mut self, frame: &PointerFrame, dt: f64) -> Vec<Action> {
        let dt = dt.max(0.0);
        self.clock += dt;
        self.camera.wheel(frame.wheel_delta, frame.position, self.clock);
        self.camera.step(dt);

        let prev = self.interaction.state();
        let sample = self.sample(frame, prev);
        let state = self.interaction.advance(&sample, self.tools.active);
        let delta = frame.position - self.last_pointer.unwrap_or(frame.position);
        self.last_pointer = Some(frame.position);

        let mut actions = Vec::new();
        if state != InteractionState::Dragging {
            tools::end_drag(&mut self.tools);
        }
        match state {
            InteractionState::Dragging => {
                if let InteractionState::Pressed { origin } = prev {
                    tools::begin_drag(&mut self.tools, &self.scene, self.camera.to_scene(origin));
                }
                actions.extend(tools::drag_to(&self.tools, &mut self.scene, self.camera.to_scene(frame.position)));
            }
            InteractionState::Panning => self.camera.pan_by_screen(delta),
            InteractionState::Drawing { origin } if !frame.primary_down => {
                let (from, to) = (self.camera.to_scene(origin), self.camera.to_scene(frame.position));
                actions.extend(tools::finish_drawing(self.tools.active, &mut self.scene, from, to));
                self.interaction.consume();
            }
            _ => {}
        }
        actions
    }

    /// Right-click menu, click dispatch (menus first, then the active tool),
    /// and the `close_when` sweep.
    pub fn after_render(&mut self, frame: &PointerFrame) -> Vec<Action> {
        let mut actions = Vec::new();

        // Opened before click dispatch: a click in the same frame lands on this menu.
        if frame.secondary_click {
            self.stack.close_oldest_unpinned();
            self.stack.open(controls::context_menu(frame.position, self.scene.is_running()));
        }

        if self.interaction.state() == InteractionState::Click {
            let mut ctx = ClickContext {
                stack: &mut self.stack,
                camera: &mut self.camera,
                tools: &mut self.tools,
                scene: &mut self.scene,
                grid: self.grid,
                interaction: InteractionState::Click,
                actions: &mut actions,
            };
            let outcome = dispatch::dispatch_click(&mut ctx, frame.position);
            tracing::trace!(?outcome, "click dispatched");
            if outcome == (ClickOutcome::Missed { closed: None }) {
                let at = self.camera.to_scene(frame.position);
                actions.extend(tools::click(&mut self.tools, &mut self.scene, at));
            }
            self.interaction.consume();
        }

        let ui = self.ui_state();
        dispatch::sweep_close_when(&mut self.stack, &ui);
        self.announce_menus(&mut actions);
        actions
    }

    /// Both phases back to back, for hosts with nothing to do in between.
    pub fn frame(&mut self, frame: &PointerFrame, dt: f64) -> Vec<Action> {
        let mut actions = self.before_update(frame, dt);
        actions.extend(self.after_render(frame));
        actions
    }

    /// Emit the menus drawn this frame, plus the preview of a shape being drawn.
    pub fn draw(&self, surface: &mut dyn Surface) {
        let ui = self.ui_state();
        render::draw_menus(surface, &self.stack, &ui, self.grid, &self.camera);
        if let Some(pointer) = self.last_pointer {
            render::draw_gesture(surface, self.interaction.state(), self.tools.active, pointer);
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn current_interaction_state(&self) -> InteractionState {
        self.interaction.state()
    }

    #[must_use]
    pub fn menu_stack(&self) -> &MenuStack {
        &self.stack
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    #[must_use]
    pub fn ui_state(&self) -> UiState {
        UiState { tool: self.tools.active, interaction: self.interaction.state(), running: self.scene.is_running() }
    }

    /// Absolute screen rectangle of a control, for overlay widgets.
    #[must_use]
    pub fn control_rectangle(&self, menu: MenuId, index: usize) -> Option<Rect> {
        let menu = self.stack.get(menu)?;
        layout::control_rectangle(menu, index, &self.ui_state(), self.grid, &self.camera)
    }

    #[must_use]
    pub fn menu_screen_origin(&self, menu: MenuId) -> Option<Vector> {
        self.stack.get(menu).map(|m| layout::menu_screen_origin(m, &self.camera))
    }

    // --- Mutators ---

    pub fn open_menu(&mut self, menu: Menu) -> MenuId {
        self.stack.open(menu)
    }

    pub fn close_menu_by_predicate(&mut self, pred: impl FnMut(MenuId, &Menu) -> bool) -> Vec<MenuId> {
        self.stack.close_where(pred)
    }

    /// Select a tool from outside the menus. Returns whether it changed.
    pub fn set_tool(&mut self, tool: Tool) -> bool {
        self.tools.select(tool)
    }

    // --- Internals ---

    /// Build the state machine sample. While pressed, "over a draggable body"
    /// is judged at the press origin, where a drag would grab.
    fn sample(&self, frame: &PointerFrame, prev: InteractionState) -> PointerSample {
        let grab_at = match prev {
            InteractionState::Pressed { origin } => origin,
            _ => frame.position,
        };
        PointerSample {
            screen_pos: frame.position,
            primary_down: frame.primary_down,
            over_draggable: self.scene.body_at(self.camera.to_scene(grab_at)).is_some(),
        }
    }

    /// Report menus opened or closed since the last frame, by whatever path.
    fn announce_menus(&mut self, actions: &mut Vec<Action>) {
        let current = self.stack.ids();
        for id in self.announced.iter().filter(|id| !current.contains(id)) {
            actions.push(Action::MenuClosed { id: *id });
        }
        for (id, menu) in self.stack.iter().filter(|(id, _)| !self.announced.contains(id)) {
            actions.push(Action::MenuOpened { id, name: menu.name.clone() });
        }
        self.announced = current;
    }
}
