//! Per-mount event loop.
//!
//! Each mount spawns one tokio task that owns the [`EmbedMachine`] and the
//! frame lifecycle:
//!
//! 1. **Loading**: race frame signals against the suspicion timer. Signals
//!    are polled first, so a load that is ready in the same turn as the
//!    timer wins.
//! 2. **Resolved**: the timer is dropped. Late signals are ignored until
//!    the handle unmounts.
//!
//! State changes are published on a `watch` channel. Nothing is published
//! after an unmount command is received.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, sleep};
use tracing::{debug, info, trace, warn};

use crate::embed::{EmbedMachine, EmbedState, EmbedTarget, FrameSignal, Transition};
use crate::environment::FrameHost;
use crate::error::Error;
use crate::identifiers::MountId;

// ============================================================================
// Types
// ============================================================================

/// Live mounts keyed by ID.
pub(crate) type MountTable = FxHashMap<MountId, mpsc::UnboundedSender<LoopCommand>>;

/// Commands for the event loop.
#[derive(Debug)]
pub(crate) enum LoopCommand {
    /// A signal observed on the frame.
    Signal(FrameSignal),
    /// The handle was unmounted or dropped.
    Unmount,
}

// ============================================================================
// MountLoop
// ============================================================================

/// Everything one mount's task owns.
pub(crate) struct MountLoop {
    pub mount_id: MountId,
    pub target: EmbedTarget,
    pub timeout: Duration,
    pub machine: EmbedMachine,
    pub frame_mounted: bool,
    pub command_rx: mpsc::UnboundedReceiver<LoopCommand>,
    pub state_tx: watch::Sender<EmbedState>,
    pub host: Arc<dyn FrameHost>,
    pub mounts: Arc<Mutex<MountTable>>,
}

impl MountLoop {
    /// Runs the mount until it is unmounted.
    pub(crate) async fn run(mut self) {
        let started = Instant::now();

        if !self.machine.is_resolved() && !self.run_loading(started).await {
            self.finish();
            return;
        }

        while let Some(command) = self.command_rx.recv().await {
            match command {
                LoopCommand::Signal(signal) => {
                    debug!(
                        mount_id = %self.mount_id,
                        state = %self.machine.state(),
                        ?signal,
                        "Ignoring signal after resolution"
                    );
                }
                LoopCommand::Unmount => break,
            }
        }

        self.finish();
    }

    /// Races signals against the suspicion timer.
    ///
    /// Returns `false` if the mount was unmounted while loading.
    async fn run_loading(&mut self, started: Instant) -> bool {
        let timer = sleep(self.timeout);
        tokio::pin!(timer);

        trace!(mount_id = %self.mount_id, timeout_ms = self.timeout.as_millis() as u64, "Suspicion timer armed");

        loop {
            tokio::select! {
                biased;

                command = self.command_rx.recv() => {
                    match command {
                        Some(LoopCommand::Signal(signal)) => {
                            if let Some(transition) = self.machine.on_signal(&signal) {
                                self.commit(transition, started);
                                return true;
                            }
                        }

                        Some(LoopCommand::Unmount) | None => {
                            debug!(mount_id = %self.mount_id, "Unmounted while loading");
                            return false;
                        }
                    }
                }

                () = &mut timer => {
                    if let Some(transition) = self.machine.on_timeout(self.timeout) {
                        self.commit(transition, started);
                    }
                    return true;
                }
            }
        }
    }

    /// Applies side effects of a committed transition and publishes it.
    fn commit(&mut self, transition: Transition, started: Instant) {
        if transition.to == EmbedState::Blocked {
            // Frame goes away before the fallback is published.
            self.unmount_frame();
        }

        log_resolution(
            self.mount_id,
            &self.target,
            &transition,
            started.elapsed().as_millis() as u64,
        );
        self.state_tx.send_replace(transition.to);
    }

    fn unmount_frame(&mut self) {
        if self.frame_mounted {
            self.host.unmount_frame(self.mount_id);
            self.frame_mounted = false;
        }
    }

    fn finish(&mut self) {
        self.unmount_frame();
        self.mounts.lock().remove(&self.mount_id);
        debug!(mount_id = %self.mount_id, state = %self.machine.state(), "Mount loop terminated");
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Logs a committed resolution.
///
/// Every `Blocked` resolution is reported as [`Error::EmbedUnavailable`]
/// with its cause.
pub(crate) fn log_resolution(
    mount_id: MountId,
    target: &EmbedTarget,
    transition: &Transition,
    elapsed_ms: u64,
) {
    if transition.to == EmbedState::Blocked {
        let err = Error::embed_unavailable(target.url().as_str());
        let cause = transition
            .cause
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        warn!(
            mount_id = %mount_id,
            elapsed_ms,
            cause = %cause,
            error = %err,
            "Showing fallback"
        );
    } else {
        info!(
            mount_id = %mount_id,
            url = %target.url(),
            elapsed_ms,
            "Frame embedded"
        );
    }
}
