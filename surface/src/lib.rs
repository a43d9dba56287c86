//! Menu, camera, and gesture core for an immediate-mode 2D scene editor.
//!
//! The host samples the pointer once per frame and hands the sample to
//! [`engine::EditorCore`], which classifies the gesture, applies the active
//! tool to the scene, dispatches clicks to the topmost menu, and reports what
//! happened as [`engine::Action`]s. Nothing here touches a window, a clock, or
//! a physics engine directly: the scene sits behind [`scene::Scene`] and
//! drawing goes through [`render::Surface`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Per-frame phases and the collaborator-facing API |
//! | [`input`] | Tools, pointer samples, and the gesture state machine |
//! | [`camera`] | Pan/zoom camera and screen/scene conversions |
//! | [`menu`] | Controls, menus, placement, and the UI state snapshot |
//! | [`layout`] | Grid layout of menus into pixel rectangles |
//! | [`stack`] | The ordered stack of open menus |
//! | [`dispatch`] | Hit-testing, click dispatch, and the close-when sweep |
//! | [`controls`] | Per-kind control behaviour and the standard menus |
//! | [`tools`] | What each tool does with drags, drawings, and clicks |
//! | [`scene`] | Scene back-end trait and an in-memory body store |
//! | [`render`] | Drawing surface trait and a recording display list |
//! | [`config`] | Environment-driven editor settings |
//! | [`geom`] | `Vector` and `Rect` |
//! | [`consts`] | Shared numeric constants and glyphs |

pub mod camera;
pub mod config;
pub mod consts;
pub mod controls;
pub mod dispatch;
pub mod engine;
pub mod geom;
pub mod input;
pub mod layout;
pub mod menu;
pub mod render;
pub mod scene;
pub mod stack;
pub mod tools;
