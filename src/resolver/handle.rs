//! Handle to a single mount.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::embed::{EmbedState, EmbedTarget, FrameSignal};
use crate::environment::{FrameHost, Navigator};
use crate::error::{Error, Result};
use crate::identifiers::MountId;
use crate::policy::HostClass;
use crate::view::EmbedView;

use super::event_loop::LoopCommand;

// ============================================================================
// FrameSignalSender
// ============================================================================

/// Sends frame signals to one mount.
///
/// Handed to whatever observes the real frame element.
#[derive(Debug, Clone)]
pub struct FrameSignalSender {
    mount_id: MountId,
    command_tx: mpsc::UnboundedSender<LoopCommand>,
}

impl FrameSignalSender {
    /// Returns the mount this sender targets.
    #[inline]
    #[must_use]
    pub fn mount_id(&self) -> MountId {
        self.mount_id
    }

    /// Reports the frame's load-complete event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unmounted`] if the mount is gone.
    pub fn load(&self) -> Result<()> {
        self.send(FrameSignal::Load)
    }

    /// Reports a frame load error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unmounted`] if the mount is gone.
    pub fn error(&self, message: impl Into<String>) -> Result<()> {
        self.send(FrameSignal::error(message))
    }

    /// Sends a signal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unmounted`] if the mount is gone.
    pub fn send(&self, signal: FrameSignal) -> Result<()> {
        self.command_tx
            .send(LoopCommand::Signal(signal))
            .map_err(|_| Error::unmounted(self.mount_id))
    }
}

// ============================================================================
// EmbedHandle
// ============================================================================

/// A handle to one mount of an [`EmbedTarget`].
///
/// Dropping the handle unmounts the frame and cancels any pending timer.
/// Use [`unmount`](Self::unmount) to wait for that to finish.
pub struct EmbedHandle {
    mount_id: MountId,
    target: EmbedTarget,
    host_class: HostClass,
    timeout: Duration,
    state_rx: watch::Receiver<EmbedState>,
    command_tx: mpsc::UnboundedSender<LoopCommand>,
    host: Arc<dyn FrameHost>,
    navigator: Arc<dyn Navigator>,
    task: Option<JoinHandle<()>>,
}

impl fmt::Debug for EmbedHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbedHandle")
            .field("mount_id", &self.mount_id)
            .field("url", &self.target.url().as_str())
            .field("host_class", &self.host_class)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl EmbedHandle {
    /// Creates a new handle.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        mount_id: MountId,
        target: EmbedTarget,
        host_class: HostClass,
        timeout: Duration,
        state_rx: watch::Receiver<EmbedState>,
        command_tx: mpsc::UnboundedSender<LoopCommand>,
        host: Arc<dyn FrameHost>,
        navigator: Arc<dyn Navigator>,
        task: JoinHandle<()>,
    ) -> Self {
        Self {
            mount_id,
            target,
            host_class,
            timeout,
            state_rx,
            command_tx,
            host,
            navigator,
            task: Some(task),
        }
    }
}

// ============================================================================
// EmbedHandle - Accessors
// ============================================================================

impl EmbedHandle {
    /// Returns the mount ID.
    #[inline]
    #[must_use]
    pub fn mount_id(&self) -> MountId {
        self.mount_id
    }

    /// Returns the target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> &EmbedTarget {
        &self.target
    }

    /// Returns the host classification used for this mount.
    #[inline]
    #[must_use]
    pub fn host_class(&self) -> HostClass {
        self.host_class
    }

    /// Returns the suspicion timeout used for this mount.
    #[inline]
    #[must_use]
    pub fn suspicion_timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the current state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> EmbedState {
        *self.state_rx.borrow()
    }

    /// Returns the render model for the current state.
    #[must_use]
    pub fn view(&self) -> EmbedView {
        EmbedView::new(&self.target, self.state())
    }

    /// Returns a sender for frame signals.
    #[must_use]
    pub fn signals(&self) -> FrameSignalSender {
        FrameSignalSender {
            mount_id: self.mount_id,
            command_tx: self.command_tx.clone(),
        }
    }

    /// Returns `true` once the mount's task has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

// ============================================================================
// EmbedHandle - Operations
// ============================================================================

impl EmbedHandle {
    /// Waits until the mount leaves `Loading`.
    ///
    /// Bounded by the suspicion timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unmounted`] if the mount is unmounted first.
    pub async fn wait_resolved(&self) -> Result<EmbedState> {
        let mut state_rx = self.state_rx.clone();
        let state = state_rx
            .wait_for(EmbedState::is_resolved)
            .await
            .map_err(|_| Error::unmounted(self.mount_id))?;
        Ok(*state)
    }

    /// Opens the target in a new browsing context.
    ///
    /// This is the fallback call-to-action; it is never triggered
    /// automatically.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidState`] unless the mount is `Blocked`
    /// - [`Error::Navigation`] if the navigator fails
    pub async fn open_fallback(&self) -> Result<()> {
        let state = self.state();
        if state != EmbedState::Blocked {
            return Err(Error::invalid_state(format!(
                "fallback is not shown while {state}"
            )));
        }

        info!(mount_id = %self.mount_id, url = %self.target.url(), "Opening target in new context");
        self.navigator.open_new_context(self.target.url()).await
    }

    /// Requests fullscreen for the embedded frame.
    ///
    /// The state is read without waiting for the mount's task, so the frame
    /// may be unmounted concurrently. Hosts must tolerate the call for an
    /// unmounted ID; the state is checked again afterwards.
    ///
    /// # Errors
    ///
    /// - [`Error::Unmounted`] if the mount is gone
    /// - [`Error::InvalidState`] if the frame is not on screen
    pub fn request_fullscreen(&self) -> Result<()> {
        if self.is_finished() {
            return Err(Error::unmounted(self.mount_id));
        }

        let state = self.state();
        if !state.frame_visible() {
            return Err(Error::invalid_state(format!(
                "no frame to show fullscreen while {state}"
            )));
        }

        debug!(mount_id = %self.mount_id, "Requesting fullscreen");
        self.host.request_fullscreen(self.mount_id)?;

        let state = self.state();
        if !state.frame_visible() {
            debug!(mount_id = %self.mount_id, state = %state, "Frame removed during fullscreen request");
            return Err(Error::invalid_state(format!(
                "frame was removed while {state}"
            )));
        }
        Ok(())
    }

    /// Unmounts and waits for the mount's task to exit.
    ///
    /// Cancels a pending suspicion timer; the state is left as it was.
    pub async fn unmount(mut self) {
        let _ = self.command_tx.send(LoopCommand::Unmount);

        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            debug!(mount_id = %self.mount_id, error = %e, "Mount task ended abnormally");
        }
    }
}

impl Drop for EmbedHandle {
    fn drop(&mut self) {
        if self.task.is_some() {
            let _ = self.command_tx.send(LoopCommand::Unmount);
        }
    }
}
