//! The ordered collection of open menus.
//!
//! Bottom of the stack is the oldest menu, top is the most recently opened
//! and wins hit-tests. Menus are addressed by [`MenuId`] rather than index, so
//! a click handler that opens or closes menus mid-dispatch cannot invalidate
//! the dispatcher's handle on the menu it is serving.

#[cfg(test)]
#[path = "stack_test.rs"]
mod stack_test;

use serde::Serialize;

use crate::camera::Camera;
use crate::geom::Vector;
use crate::layout::{self, Grid};
use crate::menu::{Menu, UiState};

/// Stable identity of an open menu. Allocated in opening order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MenuId(u64);

#[derive(Debug, Clone, Default)]
pub struct MenuStack {
    entries: Vec<(MenuId, Menu)>,
    next_id: u64,
}

impl MenuStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Push a menu on top.
    pub fn open(&mut self, menu: Menu) -> MenuId {
        let id = MenuId(self.next_id);
        self.next_id += 1;
        tracing::debug!(id = id.0, name = %menu.name, pinned = menu.is_pinned(), "menu opened");
        self.entries.push((id, menu));
        id
    }

    /// Swap `menu` in for an open menu of the same name, keeping its id and
    /// stack slot; open it on top when there is none.
    pub fn replace(&mut self, menu: Menu) -> MenuId {
        match self.entries.iter_mut().find(|(_, m)| m.name == menu.name) {
            Some((id, slot)) => {
                tracing::debug!(id = id.0, name = %menu.name, "menu replaced");
                *slot = menu;
                *id
            }
            None => self.open(menu),
        }
    }

    /// Remove one menu.
    pub fn remove(&mut self, id: MenuId) -> Option<Menu> {
        let index = self.index_of(id)?;
        let (_, menu) = self.entries.remove(index);
        tracing::debug!(id = id.0, name = %menu.name, "menu closed");
        Some(menu)
    }

    /// Remove every menu matching `pred`, returning their ids bottom to top.
    pub fn close_where(&mut self, mut pred: impl FnMut(MenuId, &Menu) -> bool) -> Vec<MenuId> {
        let doomed: Vec<MenuId> = self.entries.iter().filter(|(id, m)| pred(*id, m)).map(|(id, _)| *id).collect();
        for id in &doomed {
            self.remove(*id);
        }
        doomed
    }

    /// Remove the first floating menu found scanning up from the bottom, i.e.
    /// the oldest one.
    pub fn close_oldest_unpinned(&mut self) -> Option<MenuId> {
        let id = self.entries.iter().find(|(_, m)| !m.is_pinned()).map(|(id, _)| *id)?;
        self.remove(id);
        Some(id)
    }

    #[must_use]
    pub fn get(&self, id: MenuId) -> Option<&Menu> {
        self.entries.iter().find(|(i, _)| *i == id).map(|(_, m)| m)
    }

    pub fn get_mut(&mut self, id: MenuId) -> Option<&mut Menu> {
        self.entries.iter_mut().find(|(i, _)| *i == id).map(|(_, m)| m)
    }

    #[must_use]
    pub fn contains(&self, id: MenuId) -> bool {
        self.index_of(id).is_some()
    }

    /// Stack slot of a menu, 0 being the bottom.
    #[must_use]
    pub fn index_of(&self, id: MenuId) -> Option<usize> {
        self.entries.iter().position(|(i, _)| *i == id)
    }

    /// First menu with the given name, from the bottom.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<MenuId> {
        self.entries.iter().find(|(_, m)| m.name == name).map(|(id, _)| *id)
    }

    /// Menus from bottom (oldest) to top (newest).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (MenuId, &Menu)> {
        self.entries.iter().map(|(id, m)| (*id, m))
    }

    /// Ids from bottom to top.
    #[must_use]
    pub fn ids(&self) -> Vec<MenuId> {
        self.entries.iter().map(|(id, _)| *id).collect()
    }

    /// Topmost menu whose bounds contain a screen point.
    #[must_use]
    pub fn topmost_at(&self, point: Vector, ui: &UiState, grid: Grid, camera: &Camera) -> Option<MenuId> {
        self.iter()
            .rev()
            .find(|(_, menu)| {
                let origin = layout::menu_screen_origin(menu, camera);
                layout::layout(menu, ui, grid, camera).bounds(origin).contains(point)
            })
            .map(|(id, _)| id)
    }
}
