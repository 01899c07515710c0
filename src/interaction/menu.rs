//! Selectable post-dialogue actions and their screen-space hit regions.
use bevy::math::{Rect, Vec2};

use super::catalog::ActionKind;

pub const MENU_ITEM_SIZE: Vec2 = Vec2::new(220.0, 32.0);
pub const MENU_ITEM_SPACING: f32 = 8.0;
/// Gap between the dialogue box and the window edges.
pub const DIALOGUE_BOX_MARGIN: f32 = 20.0;
pub const DIALOGUE_BOX_HEIGHT: f32 = 180.0;

/// Window-space rectangle of the dialogue box, anchored to the bottom edge.
pub fn dialogue_box_bounds(window_size: Vec2) -> Rect {
    let width = (window_size.x - 2.0 * DIALOGUE_BOX_MARGIN).max(0.0);
    let bottom = (window_size.y - DIALOGUE_BOX_MARGIN).max(0.0);
    let top = (bottom - DIALOGUE_BOX_HEIGHT).max(0.0);
    Rect::from_corners(
        Vec2::new(DIALOGUE_BOX_MARGIN, top),
        Vec2::new(DIALOGUE_BOX_MARGIN + width, bottom),
    )
}

/// One row of the action menu.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionItem {
    pub kind: ActionKind,
    pub enabled: bool,
    pub hovered: bool,
    /// Assigned by layout each frame; `None` until the menu has been laid out.
    pub region: Option<Rect>,
}

impl ActionItem {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            enabled: true,
            hovered: false,
            region: None,
        }
    }

    pub fn contains(&self, position: Vec2) -> bool {
        self.region.is_some_and(|region| region.contains(position))
    }
}

/// Geometry for a vertical column of menu rows, in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuLayout {
    pub origin: Vec2,
    pub item_size: Vec2,
    pub spacing: f32,
}

impl MenuLayout {
    /// Centres a column of `item_count` rows inside `bounds`.
    pub fn centered(bounds: Rect, item_size: Vec2, spacing: f32, item_count: usize) -> Self {
        let rows = item_count as f32;
        let height = rows * item_size.y + (rows - 1.0).max(0.0) * spacing;
        let center = bounds.center();
        Self {
            origin: Vec2::new(center.x - item_size.x * 0.5, center.y - height * 0.5),
            item_size,
            spacing,
        }
    }

    pub fn region(&self, index: usize) -> Rect {
        let top = self.origin.y + index as f32 * (self.item_size.y + self.spacing);
        Rect::from_corners(
            Vec2::new(self.origin.x, top),
            Vec2::new(self.origin.x + self.item_size.x, top + self.item_size.y),
        )
    }
}

/// Holds the menu rows for the NPC currently being engaged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionMenuPresenter {
    items: Vec<ActionItem>,
}

impl ActionMenuPresenter {
    pub fn from_actions(actions: &[ActionKind]) -> Self {
        Self {
            items: actions.iter().copied().map(ActionItem::new).collect(),
        }
    }

    pub fn items(&self) -> &[ActionItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    pub fn set_enabled(&mut self, kind: ActionKind, enabled: bool) {
        for item in self.items.iter_mut().filter(|item| item.kind == kind) {
            item.enabled = enabled;
        }
    }

    pub fn layout(&mut self, layout: &MenuLayout) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.region = Some(layout.region(index));
        }
    }

    /// Refreshes hover flags; returns the index of the hovered row, if any.
    pub fn update_hover(&mut self, pointer: Vec2) -> Option<usize> {
        let mut hovered = None;
        for (index, item) in self.items.iter_mut().enumerate() {
            item.hovered = hovered.is_none() && item.contains(pointer);
            if item.hovered {
                hovered = Some(index);
            }
        }
        hovered
    }

    #[cfg(test)]
    pub fn hovered(&self) -> Option<usize> {
        self.items.iter().position(|item| item.hovered)
    }

    /// The enabled action under `position`, if any.
    pub fn action_at(&self, position: Vec2) -> Option<ActionKind> {
        self.items
            .iter()
            .find(|item| item.contains(position))
            .filter(|item| item.enabled)
            .map(|item| item.kind)
    }
}
