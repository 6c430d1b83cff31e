//! Pointer sensor with an activation distance.
//!
//! A press on a drag handle only becomes a drag once the pointer has moved
//! far enough, so clicks and double-clicks on a card never start one.

use crate::domain::slot::SlotKey;
use kurbo::{Point, Vec2};

/// What a pointer move produced
#[derive(Debug, Clone, PartialEq)]
pub enum SensorEvent {
    /// The press crossed the activation distance; a drag starts from `key`
    Activated { key: SlotKey, offset: Vec2 },
    /// The active drag moved; `offset` is the total travel since the press
    Moved { key: SlotKey, offset: Vec2 },
}

/// What a pointer release ended
#[derive(Debug, Clone, PartialEq)]
pub enum PointerRelease {
    /// The press never activated: a click on `key`
    Click { key: SlotKey },
    /// An active drag was released after travelling `offset`
    Drop { key: SlotKey, offset: Vec2 },
}

#[derive(Debug, Clone)]
struct Press {
    key: SlotKey,
    origin: Point,
    active: bool,
}

/// Turns raw pointer input into drag activation
#[derive(Debug, Clone)]
pub struct PointerSensor {
    activation_distance: f64,
    press: Option<Press>,
    last_pos: Option<Point>,
}

impl PointerSensor {
    pub fn new(activation_distance: f64) -> Self {
        Self {
            activation_distance: activation_distance.max(0.0),
            press: None,
            last_pos: None,
        }
    }

    pub fn activation_distance(&self) -> f64 {
        self.activation_distance
    }

    /// Arms the sensor for a press on `key` at `pos`
    ///
    /// Returns `false` when a press is already being tracked.
    pub fn press(&mut self, key: SlotKey, pos: Point) -> bool {
        if self.press.is_some() {
            return false;
        }
        self.press = Some(Press {
            key,
            origin: pos,
            active: false,
        });
        self.last_pos = Some(pos);
        true
    }

    /// Feeds a pointer move
    pub fn move_to(&mut self, pos: Point) -> Option<SensorEvent> {
        let press = self.press.as_mut()?;
        self.last_pos = Some(pos);
        let offset = pos - press.origin;

        if press.active {
            return Some(SensorEvent::Moved {
                key: press.key.clone(),
                offset,
            });
        }
        if offset.hypot() >= self.activation_distance {
            press.active = true;
            return Some(SensorEvent::Activated {
                key: press.key.clone(),
                offset,
            });
        }
        None
    }

    /// Ends the press
    pub fn release(&mut self) -> Option<PointerRelease> {
        let press = self.press.take()?;
        let offset = self.last_pos.take().map_or(Vec2::ZERO, |pos| pos - press.origin);
        Some(if press.active {
            PointerRelease::Drop {
                key: press.key,
                offset,
            }
        } else {
            PointerRelease::Click { key: press.key }
        })
    }

    /// Drops any tracked press without reporting it
    pub fn reset(&mut self) {
        self.press = None;
        self.last_pos = None;
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.press.as_ref().is_some_and(|press| press.active)
    }

    /// Total pointer travel since the press
    pub fn offset(&self) -> Option<Vec2> {
        let press = self.press.as_ref()?;
        self.last_pos.map(|pos| pos - press.origin)
    }
}

impl Default for PointerSensor {
    fn default() -> Self {
        Self::new(5.0)
    }
}
