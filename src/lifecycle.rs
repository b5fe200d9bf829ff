//! Burst lifecycle management.
//!
//! [`LifecycleManager`] owns every active burst from spawn to disposal:
//!
//! 1. `spawn` allocates backend resources, attaches the burst to the scene
//!    and starts its [`AnimationDriver`].
//! 2. `tick` advances every running burst and pushes the new progress to the
//!    backend.
//! 3. When a burst completes (or is cancelled) it is detached, then its
//!    resources are released, then its completion callback runs. Each of
//!    these happens exactly once and the handle is forgotten.
//!
//! Bursts never share buffers, so disposing one leaves every other burst
//! untouched.
//!
//! # Example
//!
//! ```ignore
//! let mut manager = LifecycleManager::new(3.0, Easing::Power2Out, resolution);
//! let handle = manager.spawn_with(burst, &mut backend, &mut scene, |h| {
//!     tracing::info!(?h, "burst finished");
//! })?;
//!
//! // In the frame loop:
//! let finished = manager.tick(time.delta(), &mut backend, &mut scene);
//! ```

use crate::animation::{AnimationDriver, AnimationState, Step};
use crate::burst::Burst;
use crate::easing::Easing;
use crate::scene::{RenderBackend, SceneGraph};
use crate::uniforms::ShaderParameters;
use glam::Vec2;
use tracing::debug;

/// Identifies one spawned burst. Never reused within a manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BurstHandle(pub u64);

type CompletionCallback = Box<dyn FnOnce(BurstHandle)>;

struct ActiveBurst<R> {
    handle: BurstHandle,
    burst: Burst,
    params: ShaderParameters,
    driver: AnimationDriver,
    resources: Option<R>,
    attached: bool,
    on_complete: Option<CompletionCallback>,
}

/// Owns active bursts and their graphics resources.
pub struct LifecycleManager<B: RenderBackend> {
    active: Vec<ActiveBurst<B::Resources>>,
    next_id: u64,
    duration: f32,
    easing: Easing,
    resolution: Vec2,
}

impl<B: RenderBackend> LifecycleManager<B> {
    /// Create a manager whose bursts all run for `duration` seconds.
    ///
    /// `resolution` is the viewport size passed to new bursts' uniforms.
    /// Durations that are not finite and positive are replaced the way
    /// [`AnimationDriver::new`] replaces them.
    pub fn new(duration: f32, easing: Easing, resolution: Vec2) -> Self {
        Self {
            active: Vec::new(),
            next_id: 0,
            duration: AnimationDriver::new(duration, easing).duration(),
            easing,
            resolution,
        }
    }

    /// Spawn a burst with no completion callback.
    pub fn spawn<S: SceneGraph + ?Sized>(
        &mut self,
        burst: Burst,
        backend: &mut B,
        scene: &mut S,
    ) -> Result<BurstHandle, B::Error> {
        self.insert(burst, backend, scene, None)
    }

    /// Spawn a burst and run `on_complete` once it has been disposed.
    pub fn spawn_with<S, F>(
        &mut self,
        burst: Burst,
        backend: &mut B,
        scene: &mut S,
        on_complete: F,
    ) -> Result<BurstHandle, B::Error>
    where
        S: SceneGraph + ?Sized,
        F: FnOnce(BurstHandle) + 'static,
    {
        self.insert(burst, backend, scene, Some(Box::new(on_complete)))
    }

    fn insert<S: SceneGraph + ?Sized>(
        &mut self,
        burst: Burst,
        backend: &mut B,
        scene: &mut S,
        on_complete: Option<CompletionCallback>,
    ) -> Result<BurstHandle, B::Error> {
        let params = ShaderParameters::for_burst(burst.spec(), self.resolution);
        let mut driver = AnimationDriver::new(self.duration, self.easing);
        driver.start();

        // Empty bursts have nothing to draw: skip the backend and scene and
        // let the next tick dispose them.
        let resources = if burst.is_empty() {
            driver.finish();
            None
        } else {
            Some(backend.allocate(&burst, &params)?)
        };

        let handle = BurstHandle(self.next_id);
        self.next_id += 1;

        let attached = resources.is_some();
        if attached {
            scene.attach(handle);
        }

        debug!(
            ?handle,
            particles = burst.len(),
            origin = ?burst.spec().origin,
            "spawned burst"
        );

        self.active.push(ActiveBurst {
            handle,
            burst,
            params,
            driver,
            resources,
            attached,
            on_complete,
        });
        Ok(handle)
    }

    /// Advance all bursts by `delta` seconds.
    ///
    /// Returns the handles disposed during this tick, in spawn order.
    pub fn tick<S: SceneGraph + ?Sized>(
        &mut self,
        delta: f32,
        backend: &mut B,
        scene: &mut S,
    ) -> Vec<BurstHandle> {
        let mut finished = Vec::new();
        let mut i = 0;
        while i < self.active.len() {
            let entry = &mut self.active[i];
            let done = match entry.driver.advance(delta) {
                Step::Running(progress) => {
                    entry.params.set_progress(progress);
                    if let Some(resources) = &entry.resources {
                        backend.update(resources, &entry.params);
                    }
                    false
                }
                Step::Completed => true,
                Step::Idle => entry.driver.is_completed(),
            };

            if done {
                let entry = self.active.remove(i);
                finished.push(entry.handle);
                Self::retire(entry, backend, scene);
            } else {
                i += 1;
            }
        }
        finished
    }

    /// Stop a burst now and dispose it through the normal completion path.
    ///
    /// Returns `false` if the handle is unknown or already disposed.
    pub fn cancel<S: SceneGraph + ?Sized>(
        &mut self,
        handle: BurstHandle,
        backend: &mut B,
        scene: &mut S,
    ) -> bool {
        let Some(index) = self.index_of(handle) else {
            return false;
        };
        let mut entry = self.active.remove(index);
        entry.driver.finish();
        debug!(?handle, "cancelled burst");
        Self::retire(entry, backend, scene);
        true
    }

    /// Cancel every active burst. Returns how many were disposed.
    pub fn clear<S: SceneGraph + ?Sized>(&mut self, backend: &mut B, scene: &mut S) -> usize {
        let entries = std::mem::take(&mut self.active);
        let count = entries.len();
        for mut entry in entries {
            entry.driver.finish();
            Self::retire(entry, backend, scene);
        }
        count
    }

    fn retire<S: SceneGraph + ?Sized>(
        mut entry: ActiveBurst<B::Resources>,
        backend: &mut B,
        scene: &mut S,
    ) {
        entry.params.set_progress(1.0);
        if entry.attached {
            scene.detach(entry.handle);
            entry.attached = false;
        }
        if let Some(resources) = entry.resources.take() {
            backend.release(resources);
        }
        debug!(handle = ?entry.handle, "disposed burst");
        if let Some(callback) = entry.on_complete.take() {
            callback(entry.handle);
        }
    }

    /// Update the viewport resolution for current and future bursts.
    pub fn set_resolution(&mut self, resolution: Vec2, backend: &mut B) {
        self.resolution = resolution;
        for entry in &mut self.active {
            entry.params.resolution = resolution;
            if let Some(resources) = &entry.resources {
                backend.update(resources, &entry.params);
            }
        }
    }

    fn index_of(&self, handle: BurstHandle) -> Option<usize> {
        self.active.iter().position(|e| e.handle == handle)
    }

    fn entry(&self, handle: BurstHandle) -> Option<&ActiveBurst<B::Resources>> {
        self.active.iter().find(|e| e.handle == handle)
    }

    /// Number of bursts not yet disposed.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Whether `handle` is still owned by this manager.
    pub fn contains(&self, handle: BurstHandle) -> bool {
        self.entry(handle).is_some()
    }

    /// Animation state, or `None` once the burst has been disposed.
    pub fn state(&self, handle: BurstHandle) -> Option<AnimationState> {
        self.entry(handle).map(|e| e.driver.state())
    }

    pub fn progress(&self, handle: BurstHandle) -> Option<f32> {
        self.entry(handle).map(|e| e.params.progress())
    }

    pub fn burst(&self, handle: BurstHandle) -> Option<&Burst> {
        self.entry(handle).map(|e| &e.burst)
    }

    pub fn parameters(&self, handle: BurstHandle) -> Option<&ShaderParameters> {
        self.entry(handle).map(|e| &e.params)
    }

    pub fn resources(&self, handle: BurstHandle) -> Option<&B::Resources> {
        self.entry(handle).and_then(|e| e.resources.as_ref())
    }

    /// Bursts that currently hold backend resources, in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = (BurstHandle, &ShaderParameters, &B::Resources)> {
        self.active
            .iter()
            .filter_map(|e| e.resources.as_ref().map(|r| (e.handle, &e.params, r)))
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }
}
