//! Render sink types
//!
//! The simulation never talks to a graphics API. Each frame it hands out a
//! `FrameSnapshot` of GPU-ready box instances plus the camera pose.

pub mod instance;
pub mod snapshot;

pub use instance::{BoxInstance, InstanceKind, colors};
pub use snapshot::{FrameSnapshot, platform_tints};
