//! Drop target resolution by rectangle intersection.
//!
//! The dragged card's rectangle, moved by the pointer offset, is tested
//! against droppable rectangles. The droppable with the largest overlap area
//! wins; earlier droppables win ties. Touching edges do not count.
//!
//! Column bodies contain their cards, so a flat comparison would always pick
//! the column. [`BoardLayout::target_for`] therefore resolves in two steps:
//! first the column body with the largest overlap, then the card of that
//! column with the largest overlap, falling back to the bare column.

use crate::domain::slot::SlotKey;
use kurbo::{Rect, Vec2};

/// A rendered drop target: a card slot or a column body
#[derive(Debug, Clone, PartialEq)]
pub struct Droppable {
    pub key: SlotKey,
    pub rect: Rect,
}

impl Droppable {
    pub fn new(key: SlotKey, rect: Rect) -> Self {
        Self {
            key,
            rect: rect.abs(),
        }
    }
}

/// Overlap area of two rectangles, 0 when they are disjoint
pub fn overlap_area(a: Rect, b: Rect) -> f64 {
    a.abs().intersect(b.abs()).area()
}

/// Droppable with the greatest positive overlap with `dragged`
pub fn rect_intersection(dragged: Rect, droppables: &[Droppable]) -> Option<&Droppable> {
    best_overlap(dragged, droppables)
}

fn best_overlap<'a>(
    dragged: Rect,
    candidates: impl IntoIterator<Item = &'a Droppable>,
) -> Option<&'a Droppable> {
    let mut best: Option<(&Droppable, f64)> = None;
    for droppable in candidates {
        let area = overlap_area(dragged, droppable.rect);
        if area <= 0.0 {
            continue;
        }
        match best {
            Some((_, best_area)) if best_area >= area => {}
            _ => best = Some((droppable, area)),
        }
    }
    best.map(|(droppable, _)| droppable)
}

/// Measured geometry of the rendered board, in render order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardLayout {
    pub droppables: Vec<Droppable>,
}

impl BoardLayout {
    pub fn new(droppables: Vec<Droppable>) -> Self {
        Self { droppables }
    }

    pub fn push(&mut self, key: SlotKey, rect: Rect) {
        self.droppables.push(Droppable::new(key, rect));
    }

    /// Rectangle of the droppable registered under `key`
    pub fn rect_of(&self, key: &SlotKey) -> Option<Rect> {
        self.droppables
            .iter()
            .find(|droppable| &droppable.key == key)
            .map(|droppable| droppable.rect)
    }

    /// Drop target for the card that started at `source`, moved by `offset`
    pub fn target_for(&self, source: &SlotKey, offset: Vec2) -> Option<&SlotKey> {
        let dragged = self.rect_of(source)? + offset;
        self.target_at(dragged)
    }

    /// Drop target for a dragged rectangle
    pub fn target_at(&self, dragged: Rect) -> Option<&SlotKey> {
        let columns = self.droppables.iter().filter(|d| d.key.is_bare());
        let cards = || self.droppables.iter().filter(|d| !d.key.is_bare());

        let hit = match best_overlap(dragged, columns) {
            Some(column) => best_overlap(
                dragged,
                cards().filter(|card| card.key.column_id == column.key.column_id),
            )
            .unwrap_or(column),
            // No column body under the card; loose card slots may still match.
            None => best_overlap(dragged, cards())?,
        };
        Some(&hit.key)
    }
}
