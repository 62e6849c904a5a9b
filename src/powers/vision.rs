//! Visibility filter for power previews.
//!
//! Powers resolve from the activator's unrestricted perspective. A
//! `Vision` is passed only when computing what another player would see,
//! for example when replaying an opponent's power under fog of war.

use crate::core::{Snapshot, Vector};

/// Decides whether a position is visible.
pub trait Vision {
    fn is_visible(&self, snapshot: &Snapshot, position: Vector) -> bool;
}

impl<F> Vision for F
where
    F: Fn(&Snapshot, Vector) -> bool,
{
    fn is_visible(&self, snapshot: &Snapshot, position: Vector) -> bool {
        self(snapshot, position)
    }
}

/// Everything is visible.
#[derive(Clone, Copy, Debug, Default)]
pub struct FullVision;

impl Vision for FullVision {
    fn is_visible(&self, _snapshot: &Snapshot, _position: Vector) -> bool {
        true
    }
}
