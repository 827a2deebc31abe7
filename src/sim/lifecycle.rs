//! Live sprite bookkeeping
//!
//! The lifecycle owns every sprite currently on screen and is the only place
//! occupancy changes. A sprite leaves either when its lifespan runs out or when
//! it is clicked; whichever comes first wins and the other is a no-op.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::variant::{ObjectVariant, ScoreConvention};

/// Stable identifier for a spawned sprite (never reused within a session)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectHandle(u32);

impl ObjectHandle {
    pub fn id(&self) -> u32 {
        self.0
    }
}

/// A sprite on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveObject {
    pub handle: ObjectHandle,
    pub variant: ObjectVariant,
    pub position: Vec2,
    /// Session clock time at spawn
    pub spawned_at: f32,
    /// Session clock time at which it disappears on its own
    pub expires_at: f32,
}

/// Owner of all live sprites
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectLifecycle {
    lifespan: f32,
    convention: ScoreConvention,
    /// Sorted by handle (spawn order)
    live: Vec<LiveObject>,
    next_id: u32,
}

impl ObjectLifecycle {
    pub fn new(lifespan: f32, convention: ScoreConvention) -> Self {
        Self {
            lifespan: lifespan.max(0.0),
            convention,
            live: Vec::new(),
            next_id: 1,
        }
    }

    pub fn lifespan(&self) -> f32 {
        self.lifespan
    }

    /// Put a sprite on screen; it expires `lifespan` seconds after `now`
    pub fn spawn(&mut self, position: Vec2, variant: ObjectVariant, now: f32) -> ObjectHandle {
        let handle = ObjectHandle(self.next_id);
        self.next_id += 1;
        self.live.push(LiveObject {
            handle,
            variant,
            position,
            spawned_at: now,
            expires_at: now + self.lifespan,
        });
        handle
    }

    /// Remove a sprite. Returns the removed sprite, or None if it was already gone.
    pub fn expire(&mut self, handle: ObjectHandle) -> Option<LiveObject> {
        let index = self.live.binary_search_by_key(&handle, |o| o.handle).ok()?;
        Some(self.live.remove(index))
    }

    /// Click on a sprite: removes it and returns its score delta.
    /// Stale handles yield None and have no effect.
    pub fn on_interact(&mut self, handle: ObjectHandle) -> Option<i32> {
        self.expire(handle)
            .map(|object| self.convention.delta(object.variant.kind))
    }

    /// Remove every sprite whose lifespan ended at or before `now`
    pub fn expire_due(&mut self, now: f32) -> Vec<LiveObject> {
        let mut expired = Vec::new();
        self.live.retain(|object| {
            if object.expires_at <= now {
                expired.push(*object);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Positions of live sprites, for placement queries
    pub fn occupied(&self) -> Vec<Vec2> {
        self.live.iter().map(|o| o.position).collect()
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&LiveObject> {
        self.live
            .binary_search_by_key(&handle, |o| o.handle)
            .ok()
            .map(|index| &self.live[index])
    }

    pub fn live(&self) -> &[LiveObject] {
        &self.live
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
