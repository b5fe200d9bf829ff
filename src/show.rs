//! Per-frame orchestration.
//!
//! [`FireworkShow`] glues the pieces together for a host:
//!
//! ```text
//! trigger() ──queue──▶ tick(): TriggerController → create_burst → LifecycleManager::spawn
//!                             LifecycleManager::tick (advance + dispose)
//! ```
//!
//! Triggers can arrive at any time (input callbacks, timers) but only take
//! effect at the next `tick`, so a frame always sees a consistent set of
//! bursts.

use crate::burst::create_burst;
use crate::config::ShowConfig;
use crate::lifecycle::{BurstHandle, LifecycleManager};
use crate::scene::{RenderBackend, Scene};
use crate::trigger::{Trigger, TriggerController};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// What happened during one [`FireworkShow::tick`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Bursts spawned from queued triggers.
    pub spawned: Vec<BurstHandle>,
    /// Triggers dropped because the backend refused to allocate.
    pub failed: usize,
    /// Bursts disposed this tick.
    pub finished: Vec<BurstHandle>,
}

/// A running show: trigger queue, burst lifecycle and scene.
pub struct FireworkShow<B: RenderBackend> {
    manager: LifecycleManager<B>,
    scene: Scene,
    controller: TriggerController,
    rng: SmallRng,
    pending: VecDeque<Trigger>,
}

impl<B: RenderBackend> FireworkShow<B> {
    /// Build a show from `config`. `palette_size` is the number of sprites the
    /// backend can resolve.
    ///
    /// Queues the startup burst when the config enables it.
    pub fn new(config: &ShowConfig, palette_size: usize, resolution: Vec2) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let mut show = Self {
            manager: LifecycleManager::new(config.duration, config.easing, resolution),
            scene: Scene::new(),
            controller: TriggerController::new(config.startup, config.click, palette_size),
            rng,
            pending: VecDeque::new(),
        };
        if config.startup_enabled {
            show.trigger(Trigger::Startup);
        }
        info!(
            duration = config.duration,
            easing = ?config.easing,
            palette_size,
            seeded = config.seed.is_some(),
            "show ready"
        );
        show
    }

    /// Queue a trigger for the next tick.
    pub fn trigger(&mut self, trigger: Trigger) {
        self.pending.push_back(trigger);
    }

    /// Apply queued triggers, then advance every burst by `delta` seconds.
    pub fn tick(&mut self, delta: f32, backend: &mut B) -> TickReport {
        let mut report = TickReport::default();

        while let Some(trigger) = self.pending.pop_front() {
            let spec = self.controller.spec_for(trigger, &mut self.rng);
            let burst = create_burst(&spec, &mut self.rng);
            match self.manager.spawn(burst, backend, &mut self.scene) {
                Ok(handle) => {
                    debug!(?trigger, ?handle, count = spec.count, "trigger fired");
                    report.spawned.push(handle);
                }
                Err(e) => {
                    warn!(?trigger, error = %e, "failed to allocate burst");
                    report.failed += 1;
                }
            }
        }

        report.finished = self.manager.tick(delta, backend, &mut self.scene);
        report
    }

    /// Viewport changed; pushes the new resolution to every burst.
    pub fn resize(&mut self, resolution: Vec2, backend: &mut B) {
        self.manager.set_resolution(resolution, backend);
    }

    /// Dispose every burst and drop queued triggers.
    pub fn shutdown(&mut self, backend: &mut B) {
        self.pending.clear();
        let disposed = self.manager.clear(backend, &mut self.scene);
        info!(disposed, "show stopped");
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn manager(&self) -> &LifecycleManager<B> {
        &self.manager
    }

    /// Triggers waiting for the next tick.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::burst::Burst;
    use crate::textures::PALETTE_SIZE;
    use crate::uniforms::ShaderParameters;
    use std::fmt;

    #[derive(Debug)]
    struct OutOfMemory;

    impl fmt::Display for OutOfMemory {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "out of memory")
        }
    }

    impl std::error::Error for OutOfMemory {}

    #[derive(Default)]
    struct Budget {
        remaining: usize,
        live: usize,
    }

    impl RenderBackend for Budget {
        type Resources = usize;
        type Error = OutOfMemory;

        fn allocate(&mut self, burst: &Burst, _: &ShaderParameters) -> Result<usize, OutOfMemory> {
            if self.remaining == 0 {
                return Err(OutOfMemory);
            }
            self.remaining -= 1;
            self.live += 1;
            Ok(burst.len())
        }

        fn update(&mut self, _: &usize, _: &ShaderParameters) {}

        fn release(&mut self, _: usize) {
            self.live -= 1;
        }
    }

    fn config() -> ShowConfig {
        ShowConfig {
            seed: Some(7),
            ..Default::default()
        }
    }

    fn show() -> FireworkShow<Budget> {
        FireworkShow::new(&config(), PALETTE_SIZE, Vec2::new(1280.0, 720.0))
    }

    #[test]
    fn test_startup_is_queued_not_spawned() {
        let mut show = show();
        let mut backend = Budget {
            remaining: 10,
            ..Default::default()
        };
        assert_eq!(show.pending(), 1);
        assert!(show.scene().is_empty());

        let report = show.tick(0.0, &mut backend);
        assert_eq!(report.spawned.len(), 1);
        assert_eq!(show.pending(), 0);
        let handle = report.spawned[0];
        assert!(show.scene().contains(handle));
        assert_eq!(show.manager().burst(handle).map(|b| b.len()), Some(100));
    }

    #[test]
    fn test_startup_can_be_disabled() {
        let config = ShowConfig {
            startup_enabled: false,
            ..config()
        };
        let show: FireworkShow<Budget> = FireworkShow::new(&config, PALETTE_SIZE, Vec2::ONE);
        assert_eq!(show.pending(), 0);
    }

    #[test]
    fn test_triggers_apply_at_tick_boundary() {
        let mut show = show();
        let mut backend = Budget {
            remaining: 10,
            ..Default::default()
        };
        show.tick(0.016, &mut backend);

        show.trigger(Trigger::Click);
        show.trigger(Trigger::Click);
        assert_eq!(show.manager().len(), 1);

        let report = show.tick(0.016, &mut backend);
        assert_eq!(report.spawned.len(), 2);
        assert_eq!(show.manager().len(), 3);
        assert_eq!(backend.live, 3);
    }

    #[test]
    fn test_allocation_failure_is_not_fatal() {
        let mut show = show();
        let mut backend = Budget::default();
        show.trigger(Trigger::Click);

        let report = show.tick(0.016, &mut backend);
        assert_eq!(report.failed, 2);
        assert!(report.spawned.is_empty());
        assert!(show.manager().is_empty());
        assert!(show.scene().is_empty());
    }

    #[test]
    fn test_bursts_finish_and_release() {
        let mut show = show();
        let mut backend = Budget {
            remaining: 10,
            ..Default::default()
        };
        let spawned = show.tick(0.0, &mut backend).spawned;

        let mut finished = Vec::new();
        for _ in 0..200 {
            finished.extend(show.tick(1.0 / 60.0, &mut backend).finished);
        }
        assert_eq!(finished, spawned);
        assert_eq!(backend.live, 0);
        assert!(show.scene().is_empty());
    }

    #[test]
    fn test_shutdown_disposes_everything() {
        let mut show = show();
        let mut backend = Budget {
            remaining: 10,
            ..Default::default()
        };
        show.trigger(Trigger::Click);
        show.tick(0.1, &mut backend);
        show.trigger(Trigger::Click);

        show.shutdown(&mut backend);
        assert_eq!(show.pending(), 0);
        assert!(show.manager().is_empty());
        assert_eq!(backend.live, 0);
    }

    #[test]
    fn test_same_seed_same_show() {
        let mut a = show();
        let mut b = show();
        let mut backend = Budget {
            remaining: 10,
            ..Default::default()
        };
        a.trigger(Trigger::Click);
        b.trigger(Trigger::Click);
        let ha = a.tick(0.0, &mut backend).spawned[1];
        let hb = b.tick(0.0, &mut backend).spawned[1];
        assert_eq!(
            a.manager().burst(ha).map(|x| x.positions.clone()),
            b.manager().burst(hb).map(|x| x.positions.clone())
        );
    }
}
