//! Recording environment doubles for tests.

use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use url::Url;

use crate::embed::EmbedTarget;
use crate::environment::{FrameHost, Navigator};
use crate::error::{Error, Result};
use crate::identifiers::MountId;

/// Installs a test subscriber once; honours `RUST_LOG`.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Log output captured by [`capture_logs`].
#[derive(Debug, Clone, Default)]
pub(crate) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Routes this thread's events into a buffer until the guard drops.
pub(crate) fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(move || writer.clone())
        .finish();
    (logs, tracing::subscriber::set_default(subscriber))
}

#[derive(Debug, Default)]
struct HostLog {
    mounted: Vec<(MountId, Url)>,
    unmounted: Vec<MountId>,
    fullscreen: Vec<MountId>,
}

/// Frame host that records calls.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingHost {
    log: Arc<Mutex<HostLog>>,
    refuse_mount: bool,
}

impl RecordingHost {
    /// A host whose `mount_frame` always fails.
    pub fn refusing() -> Self {
        Self {
            refuse_mount: true,
            ..Self::default()
        }
    }

    pub fn mounted(&self) -> Vec<(MountId, Url)> {
        self.log.lock().mounted.clone()
    }

    pub fn unmounted(&self) -> Vec<MountId> {
        self.log.lock().unmounted.clone()
    }

    pub fn fullscreen(&self) -> Vec<MountId> {
        self.log.lock().fullscreen.clone()
    }
}

impl FrameHost for RecordingHost {
    fn mount_frame(&self, mount_id: MountId, target: &EmbedTarget) -> Result<()> {
        if self.refuse_mount {
            return Err(Error::frame_host("frame container detached"));
        }
        self.log
            .lock()
            .mounted
            .push((mount_id, target.url().clone()));
        Ok(())
    }

    fn unmount_frame(&self, mount_id: MountId) {
        self.log.lock().unmounted.push(mount_id);
    }

    fn request_fullscreen(&self, mount_id: MountId) -> Result<()> {
        self.log.lock().fullscreen.push(mount_id);
        Ok(())
    }
}

/// Navigator that records opened URLs.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingNavigator {
    opened: Arc<Mutex<Vec<Url>>>,
}

impl RecordingNavigator {
    pub fn opened(&self) -> Vec<Url> {
        self.opened.lock().clone()
    }
}

#[async_trait]
impl Navigator for RecordingNavigator {
    async fn open_new_context(&self, url: &Url) -> Result<()> {
        self.opened.lock().push(url.clone());
        Ok(())
    }
}
