//! Collaborator interfaces for the burst lifecycle.
//!
//! The lifecycle manager never talks to a window or a GPU directly. It goes
//! through two seams:
//!
//! - [`SceneGraph`] decides what is drawn. Attach and detach are idempotent.
//! - [`RenderBackend`] owns the graphics resources for each burst. Resources
//!   are moved into [`RenderBackend::release`], so a burst cannot be released
//!   twice.
//!
//! [`Scene`] is the in-memory scene graph used by the window host and tests.

use crate::burst::Burst;
use crate::lifecycle::BurstHandle;
use crate::uniforms::ShaderParameters;

/// Host scene graph boundary.
pub trait SceneGraph {
    /// Make a burst's renderable visible. Attaching twice is a no-op.
    fn attach(&mut self, handle: BurstHandle);

    /// Remove a burst's renderable. Returns `false` (and does nothing) if it
    /// was not attached.
    fn detach(&mut self, handle: BurstHandle) -> bool;
}

/// Rendering backend boundary.
pub trait RenderBackend {
    /// Everything the backend allocates for one burst.
    type Resources;
    /// Allocation failure (out of memory, unknown sprite, ...).
    type Error: std::error::Error;

    /// Allocate buffers and material for a burst.
    fn allocate(
        &mut self,
        burst: &Burst,
        params: &ShaderParameters,
    ) -> Result<Self::Resources, Self::Error>;

    /// Push new uniform values for a burst. Called once per frame per
    /// running burst.
    fn update(&mut self, resources: &Self::Resources, params: &ShaderParameters);

    /// Free a burst's resources.
    fn release(&mut self, resources: Self::Resources);
}

/// Ordered set of attached bursts. Draw order is attach order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    attached: Vec<BurstHandle>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, handle: BurstHandle) -> bool {
        self.attached.contains(&handle)
    }

    pub fn len(&self) -> usize {
        self.attached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }

    /// Attached bursts in draw order.
    pub fn iter(&self) -> impl Iterator<Item = BurstHandle> + '_ {
        self.attached.iter().copied()
    }
}

impl SceneGraph for Scene {
    fn attach(&mut self, handle: BurstHandle) {
        if !self.contains(handle) {
            self.attached.push(handle);
        }
    }

    fn detach(&mut self, handle: BurstHandle) -> bool {
        match self.attached.iter().position(|h| *h == handle) {
            Some(index) => {
                self.attached.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_is_idempotent() {
        let mut scene = Scene::new();
        scene.attach(BurstHandle(1));
        scene.attach(BurstHandle(1));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_double_detach_is_noop() {
        let mut scene = Scene::new();
        scene.attach(BurstHandle(1));
        assert!(scene.detach(BurstHandle(1)));
        assert!(!scene.detach(BurstHandle(1)));
        assert!(!scene.detach(BurstHandle(99)));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_draw_order_is_attach_order() {
        let mut scene = Scene::new();
        for id in [3, 1, 2] {
            scene.attach(BurstHandle(id));
        }
        scene.detach(BurstHandle(1));
        let order: Vec<_> = scene.iter().collect();
        assert_eq!(order, vec![BurstHandle(3), BurstHandle(2)]);
    }
}
