//! Core resolver implementation.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle as RuntimeHandle;
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use crate::embed::{EmbedMachine, EmbedState, EmbedTarget, FrameSignal};
use crate::environment::{FrameHost, Navigator};
use crate::error::{Error, Result};
use crate::identifiers::MountId;
use crate::policy::{HostClass, HostPolicy};
use crate::protocol::{FrameEvent, ParsedFrameEvent};

use super::builder::ResolverBuilder;
use super::event_loop::{LoopCommand, MountLoop, MountTable, log_resolution};
use super::handle::EmbedHandle;

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for the resolver.
pub(crate) struct ResolverInner {
    /// Host classification table.
    pub policy: HostPolicy,
    /// Frame mounting primitive.
    pub host: Arc<dyn FrameHost>,
    /// New-context navigation primitive.
    pub navigator: Arc<dyn Navigator>,
    /// Live mounts, for event routing.
    pub mounts: Arc<Mutex<MountTable>>,
}

// ============================================================================
// EmbedResolver
// ============================================================================

/// Factory for mounts.
///
/// Holds the host policy and the environment primitives. Each
/// [`mount`](Self::mount) starts an independent state machine; nothing is
/// remembered between mounts.
///
/// # Example
///
/// ```ignore
/// let resolver = EmbedResolver::builder()
///     .host(my_host)
///     .navigator(my_navigator)
///     .build()?;
///
/// let target = EmbedTarget::new("https://www.y8.com/games/foo", "Foo")?;
/// let handle = resolver.mount(target)?;
/// match handle.wait_resolved().await? {
///     EmbedState::Embedded => {}
///     EmbedState::Blocked => println!("{}", handle.view().to_html()),
///     EmbedState::Loading => unreachable!(),
/// }
/// ```
#[derive(Clone)]
pub struct EmbedResolver {
    pub(crate) inner: Arc<ResolverInner>,
}

impl fmt::Debug for EmbedResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbedResolver")
            .field("rules", &self.inner.policy.rule_count())
            .field("active_mounts", &self.active_mounts())
            .finish_non_exhaustive()
    }
}

impl EmbedResolver {
    /// Creates a configuration builder.
    #[inline]
    #[must_use]
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    /// Creates a resolver from validated parts.
    pub(crate) fn new(
        policy: HostPolicy,
        host: Arc<dyn FrameHost>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            inner: Arc::new(ResolverInner {
                policy,
                host,
                navigator,
                mounts: Arc::new(Mutex::new(MountTable::default())),
            }),
        }
    }
}

// ============================================================================
// EmbedResolver - Classification
// ============================================================================

impl EmbedResolver {
    /// Returns the host policy.
    #[inline]
    #[must_use]
    pub fn policy(&self) -> &HostPolicy {
        &self.inner.policy
    }

    /// Classifies a target's host.
    #[inline]
    #[must_use]
    pub fn classify(&self, target: &EmbedTarget) -> HostClass {
        self.inner.policy.classify(target.url())
    }

    /// Returns the suspicion timeout a mount of this target would use.
    #[inline]
    #[must_use]
    pub fn suspicion_timeout(&self, target: &EmbedTarget) -> Duration {
        self.inner.policy.suspicion_timeout(target.url())
    }

    /// Returns the number of live mounts.
    #[inline]
    #[must_use]
    pub fn active_mounts(&self) -> usize {
        self.inner.mounts.lock().len()
    }
}

// ============================================================================
// EmbedResolver - Mounting
// ============================================================================

impl EmbedResolver {
    /// Mounts a frame for the target and starts its state machine.
    ///
    /// The frame is mounted immediately with `src = target.url()`; the
    /// returned handle starts in [`EmbedState::Loading`]. If the host
    /// refuses to mount, the handle is already [`EmbedState::Blocked`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if called outside a tokio runtime.
    pub fn mount(&self, target: EmbedTarget) -> Result<EmbedHandle> {
        let runtime = RuntimeHandle::try_current()
            .map_err(|e| Error::config(format!("mount requires a tokio runtime: {e}")))?;

        let mount_id = MountId::generate();
        let host_class = self.classify(&target);
        let timeout = self.inner.policy.timeout_for(host_class);

        debug!(
            mount_id = %mount_id,
            url = %target.url(),
            host_class = %host_class,
            timeout_ms = timeout.as_millis() as u64,
            "Mounting frame"
        );

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(EmbedState::Loading);
        let mut machine = EmbedMachine::new();

        // Register before mounting so a synchronous load from the host routes.
        self.inner.mounts.lock().insert(mount_id, command_tx.clone());

        let frame_mounted = match self.inner.host.mount_frame(mount_id, &target) {
            Ok(()) => true,
            Err(e) => {
                warn!(mount_id = %mount_id, error = %e, "Frame host refused mount");
                if let Some(transition) = machine.on_mount_failed(e.to_string()) {
                    log_resolution(mount_id, &target, &transition, 0);
                    state_tx.send_replace(transition.to);
                }
                false
            }
        };

        let mount_loop = MountLoop {
            mount_id,
            target: target.clone(),
            timeout,
            machine,
            frame_mounted,
            command_rx,
            state_tx,
            host: Arc::clone(&self.inner.host),
            mounts: Arc::clone(&self.inner.mounts),
        };
        let task = runtime.spawn(mount_loop.run());

        Ok(EmbedHandle::new(
            mount_id,
            target,
            host_class,
            timeout,
            state_rx,
            command_tx,
            Arc::clone(&self.inner.host),
            Arc::clone(&self.inner.navigator),
            task,
        ))
    }
}

// ============================================================================
// EmbedResolver - Event Routing
// ============================================================================

impl EmbedResolver {
    /// Routes a frame event to its mount.
    ///
    /// Unknown event methods are ignored.
    ///
    /// # Errors
    ///
    /// - [`Error::Protocol`] if the event lacks a valid mount ID
    /// - [`Error::MountNotFound`] if the mount is not live
    pub fn dispatch(&self, event: &FrameEvent) -> Result<()> {
        match event.parse()? {
            ParsedFrameEvent::Load { mount_id } => self.route(mount_id, FrameSignal::Load),

            ParsedFrameEvent::Error { mount_id, error } => {
                self.route(mount_id, FrameSignal::error(error))
            }

            ParsedFrameEvent::Unknown { method, .. } => {
                warn!(method = %method, "Ignoring unknown frame event");
                Ok(())
            }
        }
    }

    /// Parses a JSON frame event and routes it.
    ///
    /// # Errors
    ///
    /// - [`Error::Json`] if the text is not a valid event
    /// - see [`dispatch`](Self::dispatch)
    pub fn dispatch_json(&self, text: &str) -> Result<()> {
        let event = FrameEvent::from_json(text)?;
        self.dispatch(&event)
    }

    fn route(&self, mount_id: MountId, signal: FrameSignal) -> Result<()> {
        let command_tx = self.inner.mounts.lock().get(&mount_id).cloned();

        let Some(command_tx) = command_tx else {
            warn!(mount_id = %mount_id, ?signal, "Event for unknown mount");
            return Err(Error::mount_not_found(mount_id));
        };

        command_tx
            .send(LoopCommand::Signal(signal))
            .map_err(|_| Error::mount_not_found(mount_id))
    }
}

// ============================================================================
// Tests
// ============================================================================
