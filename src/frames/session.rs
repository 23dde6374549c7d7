use crate::errors::RallyMediaResult;
use async_trait::async_trait;
use image::RgbImage;
#[cfg(test)]
use mockall::automock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A stateful handle to an open video resource supporting seek and frame reads.
///
/// A session wraps exactly one decode handle with a single read position, so
/// seeks must be issued one at a time. `seek` resolves once the frame at the
/// new position is ready to read via [`DecodeSession::current_frame`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DecodeSession: Send {
    /// Intrinsic duration of the resource, in seconds.
    fn duration(&self) -> f64;

    /// Intrinsic pixel dimensions of the resource.
    fn dimensions(&self) -> (u32, u32);

    /// Move the read position to `timestamp` seconds and wait for the frame
    /// there to settle.
    async fn seek(&mut self, timestamp: f64) -> RallyMediaResult<()>;

    /// Copy the frame at the current read position.
    fn current_frame(&mut self) -> RallyMediaResult<RgbImage>;
}

/// Cooperative cancellation flag for a sampling run.
///
/// Cloning shares the flag, so a caller can keep one handle and pass the
/// other into [`crate::frames::sample_frames_cancellable`].
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. The sampler checks the flag between steps and
    /// releases its decode session before returning.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
