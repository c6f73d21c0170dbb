//! Common types used across the survcore workspace

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

/// Unique identifier for a player, as handed out by the host runtime
pub type PlayerId = Uuid;

/// Timestamp type used for display and logging
pub type Timestamp = DateTime<Utc>;

/// Block-granularity world coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// A full-precision location inside a named world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

impl Position {
    /// Create a position with neutral orientation
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Discretize to block granularity. Movement checks compare block
    /// positions so sub-block jitter does not count as movement.
    pub fn block_pos(&self) -> BlockPos {
        BlockPos {
            x: self.x.floor() as i32,
            y: self.y.floor() as i32,
            z: self.z.floor() as i32,
        }
    }
}

/// Who moves when a teleport request is accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeleportDirection {
    /// The requester is teleported to the target's current location
    ToTarget,
    /// The target is teleported to the requester's current location
    ToRequester,
}
