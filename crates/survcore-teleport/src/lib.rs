//! Teleport coordination core for survival game servers.
//!
//! Three collaborating pieces: [`CooldownTracker`] rate-limits feature
//! use, [`RequestRegistry`] runs the TPA request state machine, and
//! [`DelayedTeleports`] runs the countdown-with-cancellation warmup every
//! teleport feature shares. [`TeleportService`] glues them into the flows
//! a host adapter exposes as chat commands.
//!
//! The host runtime stays behind the [`Sessions`] and [`Notifier`] seams;
//! this crate never touches the world or the network itself.

pub mod cooldown;
pub mod delay;
pub mod request;
pub mod service;
pub mod session;
pub mod sweeper;
pub mod test_utils;

pub use cooldown::{format_duration, CooldownTracker};
pub use delay::{DelayedTeleports, DestinationResolver, WarmupRequest};
pub use request::{RequestRegistry, TeleportRequest};
pub use service::{TeleportError, TeleportService};
pub use session::{Notifier, Sessions};
pub use sweeper::{start_sweeper, SweeperHandle};
