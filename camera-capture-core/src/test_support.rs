//! Fake backend, stream, preview and delegate for session tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::models::constraints::CaptureConstraints;
use crate::models::error::{CaptureError, PlatformError};
use crate::models::frame::VideoFrame;
use crate::models::state::SessionState;
use crate::traits::camera_backend::{CameraBackend, MediaStreamHandle};
use crate::traits::preview_surface::PreviewSurface;
use crate::traits::session_delegate::SessionDelegate;

/// Counts live hardware handles across every fake stream sharing it.
#[derive(Debug, Default)]
pub struct HandleLedger {
    live: AtomicUsize,
    peak: AtomicUsize,
    acquired: AtomicUsize,
}

impl HandleLedger {
    fn open(&self) {
        let now = self.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.acquired.fetch_add(1, Ordering::SeqCst);
    }

    fn close(&self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEvent {
    TorchRequested(bool),
    TracksStopped,
}

/// What happened to one fake stream. Outlives the stream itself.
#[derive(Debug, Default)]
pub struct StreamProbe {
    events: Mutex<Vec<StreamEvent>>,
    stopped: AtomicBool,
    torch: AtomicBool,
}

impl StreamProbe {
    pub fn events(&self) -> Vec<StreamEvent> {
        self.events.lock().clone()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    pub fn torch(&self) -> bool {
        self.torch.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TorchBehavior {
    Absent,
    Works,
    Rejects,
    RejectsOff,
    Ignored,
}

pub struct FakeStream {
    probe: Arc<StreamProbe>,
    ledger: Arc<HandleLedger>,
    torch: TorchBehavior,
}

impl FakeStream {
    pub fn new(ledger: &Arc<HandleLedger>) -> Self {
        ledger.open();
        Self {
            probe: Arc::new(StreamProbe::default()),
            ledger: Arc::clone(ledger),
            torch: TorchBehavior::Absent,
        }
    }

    pub fn with_torch(mut self) -> Self {
        self.torch = TorchBehavior::Works;
        self
    }

    /// Torch advertised, but every constraint update is rejected.
    pub fn with_broken_torch(mut self) -> Self {
        self.torch = TorchBehavior::Rejects;
        self
    }

    /// Torch turns on fine but refuses to turn off.
    pub fn with_sticky_torch(mut self) -> Self {
        self.torch = TorchBehavior::RejectsOff;
        self
    }

    /// Torch constraint is accepted but the hardware never changes.
    pub fn with_ignored_torch(mut self) -> Self {
        self.torch = TorchBehavior::Ignored;
        self
    }

    pub fn probe(&self) -> Arc<StreamProbe> {
        Arc::clone(&self.probe)
    }
}

impl MediaStreamHandle for FakeStream {
    fn supports_torch(&self) -> bool {
        self.torch != TorchBehavior::Absent
    }

    fn torch_enabled(&self) -> Option<bool> {
        (self.torch == TorchBehavior::Ignored).then(|| self.probe.torch())
    }

    async fn set_torch(&self, enabled: bool) -> Result<(), PlatformError> {
        self.probe.events.lock().push(StreamEvent::TorchRequested(enabled));
        let rejected = match self.torch {
            TorchBehavior::Absent | TorchBehavior::Rejects => true,
            TorchBehavior::RejectsOff => !enabled,
            TorchBehavior::Works | TorchBehavior::Ignored => false,
        };
        if rejected || self.probe.is_stopped() {
            return Err(PlatformError::new("OverconstrainedError", "torch"));
        }
        if self.torch != TorchBehavior::Ignored {
            self.probe.torch.store(enabled, Ordering::SeqCst);
        }
        Ok(())
    }

    fn stop_tracks(&self) {
        if !self.probe.stopped.swap(true, Ordering::SeqCst) {
            self.probe.events.lock().push(StreamEvent::TracksStopped);
            self.ledger.close();
        }
    }
}

pub enum Grant {
    Stream(FakeStream),
    Reject(PlatformError),
    Deferred(oneshot::Receiver<Result<FakeStream, PlatformError>>),
}

/// Backend answering acquisitions from a script, in order.
pub struct FakeBackend {
    supported: bool,
    secure: bool,
    script: Mutex<VecDeque<Grant>>,
    requests: Mutex<Vec<CaptureConstraints>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            supported: true,
            secure: true,
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new()
        }
    }

    pub fn insecure() -> Self {
        Self {
            secure: false,
            ..Self::new()
        }
    }

    pub fn then(self, grant: Grant) -> Self {
        self.script.lock().push_back(grant);
        self
    }

    pub fn then_reject(self, name: &str) -> Self {
        self.then(Grant::Reject(PlatformError::new(name, format!("{} from fake", name))))
    }

    pub fn requests(&self) -> Vec<CaptureConstraints> {
        self.requests.lock().clone()
    }
}

impl CameraBackend for FakeBackend {
    type Stream = FakeStream;

    fn is_supported(&self) -> bool {
        self.supported
    }

    fn is_secure_context(&self) -> bool {
        self.secure
    }

    async fn acquire(&self, constraints: &CaptureConstraints) -> Result<FakeStream, PlatformError> {
        self.requests.lock().push(constraints.clone());
        let next = self.script.lock().pop_front();
        match next {
            Some(Grant::Stream(stream)) => Ok(stream),
            Some(Grant::Reject(err)) => Err(err),
            Some(Grant::Deferred(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(PlatformError::new("AbortError", "grant dropped"))),
            None => Err(PlatformError::new("NotFoundError", "script exhausted")),
        }
    }
}

enum FrameSource {
    Missing,
    Live(VideoFrame),
    Broken(String),
}

/// Preview that serves a fixed frame while a stream is attached.
pub struct FakePreview {
    attached: AtomicBool,
    attach_count: AtomicUsize,
    detach_count: AtomicUsize,
    source: FrameSource,
}

impl FakePreview {
    fn with_source(source: FrameSource) -> Self {
        Self {
            attached: AtomicBool::new(false),
            attach_count: AtomicUsize::new(0),
            detach_count: AtomicUsize::new(0),
            source,
        }
    }

    pub fn blank() -> Self {
        Self::with_source(FrameSource::Missing)
    }

    pub fn with_frame(width: u32, height: u32) -> Self {
        let rgba = vec![200; (width * height * 4) as usize];
        let frame = VideoFrame::from_rgba(width, height, rgba).expect("consistent frame buffer");
        Self::with_source(FrameSource::Live(frame))
    }

    pub fn broken(message: &str) -> Self {
        Self::with_source(FrameSource::Broken(message.into()))
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    pub fn attach_count(&self) -> usize {
        self.attach_count.load(Ordering::SeqCst)
    }

    pub fn detach_count(&self) -> usize {
        self.detach_count.load(Ordering::SeqCst)
    }
}

impl PreviewSurface<FakeStream> for FakePreview {
    fn attach(&self, _stream: &FakeStream) {
        self.attached.store(true, Ordering::SeqCst);
        self.attach_count.fetch_add(1, Ordering::SeqCst);
    }

    fn detach(&self) {
        self.attached.store(false, Ordering::SeqCst);
        self.detach_count.fetch_add(1, Ordering::SeqCst);
    }

    fn current_frame(&self) -> Result<Option<VideoFrame>, PlatformError> {
        if !self.is_attached() {
            return Ok(None);
        }
        match &self.source {
            FrameSource::Missing => Ok(None),
            FrameSource::Live(frame) => Ok(Some(frame.clone())),
            FrameSource::Broken(message) => Err(PlatformError::new("InvalidStateError", message.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    State(SessionState),
    Error(&'static str),
    Torch { torch: bool, supports_torch: bool },
}

#[derive(Debug, Default)]
pub struct RecordingDelegate {
    events: Mutex<Vec<Recorded>>,
}

impl RecordingDelegate {
    pub fn events(&self) -> Vec<Recorded> {
        self.events.lock().clone()
    }

    pub fn states(&self) -> Vec<SessionState> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Recorded::State(state) => Some(state),
                _ => None,
            })
            .collect()
    }
}

impl SessionDelegate for RecordingDelegate {
    fn on_state_changed(&self, state: SessionState) {
        self.events.lock().push(Recorded::State(state));
    }

    fn on_error(&self, error: &CaptureError) {
        self.events.lock().push(Recorded::Error(error.code()));
    }

    fn on_torch_changed(&self, torch: bool, supports_torch: bool) {
        self.events.lock().push(Recorded::Torch { torch, supports_torch });
    }
}
