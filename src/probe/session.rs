//! Scoped ownership of an initialized video subsystem.

use crate::video::{VideoBackend, VideoResult};

/// An initialized backend, shut down exactly once when the session ends.
///
/// The backend is only wrapped after `init()` succeeds, so a failed
/// initialization never produces a matching `quit()`.
pub struct VideoSession<'a, B: VideoBackend + ?Sized> {
    backend: &'a mut B,
}

impl<'a, B: VideoBackend + ?Sized> VideoSession<'a, B> {
    /// Initialize `backend` and take ownership of its lifetime.
    pub fn open(backend: &'a mut B) -> VideoResult<Self> {
        backend.init()?;
        log::debug!("{} video subsystem initialized", backend.name());
        Ok(Self { backend })
    }

    /// The initialized backend.
    pub fn backend(&mut self) -> &mut B {
        &mut *self.backend
    }

    /// End the session now.
    pub fn close(self) {
        drop(self);
    }
}

impl<B: VideoBackend + ?Sized> Drop for VideoSession<'_, B> {
    fn drop(&mut self) {
        log::debug!("Shutting down {} video subsystem", self.backend.name());
        self.backend.quit();
    }
}
