//! # Fireworks
//!
//! Procedural particle bursts rendered with wgpu.
//!
//! A burst is a cloud of particles sampled on a spherical shell. It expands,
//! sags, twinkles and fades over a fixed duration, then is torn down. Any
//! number of bursts run side by side, each with its own GPU buffers.
//!
//! ## Quick Start
//!
//! ```ignore
//! use fireworks::prelude::*;
//!
//! fn main() -> Result<(), AppError> {
//!     fireworks::app::run(ShowConfig::default())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Bursts
//!
//! [`create_burst`] turns a [`BurstSpec`] (count, origin, size, sprite,
//! radius, color) into per-particle positions, sizes and time multipliers.
//! Pass a seeded RNG to reproduce a burst exactly.
//!
//! ### Progress
//!
//! Every burst shares one `progress` value in `0..=1`, driven by an
//! [`AnimationDriver`] over three seconds with a decelerating ease. Each
//! particle multiplies it by its own time multiplier, so fast particles burn
//! out first and all of them are gone when progress hits 1.
//!
//! ### Lifecycle
//!
//! [`LifecycleManager`] allocates resources through a [`RenderBackend`],
//! attaches bursts to a [`SceneGraph`], advances them each tick and disposes
//! them exactly once on completion:
//!
//! ```ignore
//! let mut manager = LifecycleManager::new(3.0, Easing::Power2Out, resolution);
//! let handle = manager.spawn(burst, &mut backend, &mut scene)?;
//!
//! loop {
//!     let finished = manager.tick(clock.tick().delta, &mut backend, &mut scene);
//! }
//! ```
//!
//! ### Triggers
//!
//! [`FireworkShow`] queues [`Trigger`]s (startup, click) and turns them into
//! bursts at the next tick.
//!
//! ## Module Overview
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`burst`] | shell sampling, [`Burst`], [`ParticleVertex`] |
//! | [`uniforms`], [`shading`] | per-burst shader parameters and the WGSL program |
//! | [`animation`], [`easing`] | progress driver and curves |
//! | [`lifecycle`], [`scene`] | manager and its backend/scene seams |
//! | [`trigger`], [`show`] | trigger mapping and per-frame orchestration |
//! | [`config`] | JSON show configuration |
//! | [`gpu`], [`app`] | wgpu backend and winit host |

pub mod animation;
pub mod app;
pub mod burst;
pub mod color;
pub mod config;
pub mod easing;
pub mod error;
pub mod gpu;
pub mod lifecycle;
pub mod scene;
pub mod shading;
pub mod show;
pub mod textures;
pub mod time;
pub mod trigger;
pub mod uniforms;

pub use animation::{AnimationDriver, AnimationState, Step};
pub use burst::{create_burst, create_burst_seeded, Burst, BurstSpec, ParticleVertex};
pub use color::Color;
pub use config::ShowConfig;
pub use easing::Easing;
pub use error::{AppError, ConfigError, GpuError, TextureError};
pub use glam::{Vec2, Vec3};
pub use lifecycle::{BurstHandle, LifecycleManager};
pub use scene::{RenderBackend, Scene, SceneGraph};
pub use show::FireworkShow;
pub use textures::{TextureHandle, TexturePalette};
pub use trigger::{Trigger, TriggerController};
pub use uniforms::ShaderParameters;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use fireworks::prelude::*;
/// ```
pub mod prelude {
    pub use crate::animation::{AnimationDriver, AnimationState};
    pub use crate::burst::{create_burst, Burst, BurstSpec};
    pub use crate::color::Color;
    pub use crate::config::ShowConfig;
    pub use crate::easing::Easing;
    pub use crate::error::AppError;
    pub use crate::lifecycle::{BurstHandle, LifecycleManager};
    pub use crate::scene::{RenderBackend, Scene, SceneGraph};
    pub use crate::show::FireworkShow;
    pub use crate::textures::{TextureHandle, TexturePalette};
    pub use crate::time::{Clock, Time};
    pub use crate::trigger::Trigger;
    pub use crate::{Vec2, Vec3};
}
