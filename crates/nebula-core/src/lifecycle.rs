//! Frame-driven components and their mount lifecycle.

use std::time::Duration;

use tracing::debug;

/// A component advanced by the host's frame loop.
pub trait Tick {
    /// Advance by `dt` of wall-clock time.
    fn tick(&mut self, dt: Duration);

    /// Release any periodic work. Called exactly once, on unmount.
    fn teardown(&mut self) {}
}

/// Owns a mounted component and gates every mutation on it being mounted.
///
/// After [`Mounted::unmount`] the component stays readable, so the last frame
/// can still be drawn, but ticks and updates become no-ops.
#[derive(Debug)]
pub struct Mounted<T: Tick> {
    component: T,
    mounted: bool,
}

impl<T: Tick> Mounted<T> {
    pub fn mount(component: T) -> Self {
        Self {
            component,
            mounted: true,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Deliver a frame tick. Returns false if the component is unmounted.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.mounted {
            return false;
        }
        self.component.tick(dt);
        true
    }

    /// Run `f` against the component if it is still mounted.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.mounted.then(|| f(&mut self.component))
    }

    /// Read-only view for rendering.
    pub fn get(&self) -> &T {
        &self.component
    }

    pub fn unmount(&mut self) {
        if self.mounted {
            self.component.teardown();
            self.mounted = false;
            debug!(component = std::any::type_name::<T>(), "unmounted");
        }
    }
}
