use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::config::CaptureConfiguration;
use crate::models::constraints::CaptureConstraints;
use crate::models::error::{CaptureError, ConfigError, PlatformError};
use crate::models::frame::CapturedImage;
use crate::models::snapshot::SessionSnapshot;
use crate::models::state::SessionState;
use crate::processing::jpeg_encoder;
use crate::session::lease::StreamLease;
use crate::traits::camera_backend::{CameraBackend, MediaStreamHandle};
use crate::traits::preview_surface::PreviewSurface;
use crate::traits::session_delegate::SessionDelegate;

/// Internal mutable session state, protected by `parking_lot::Mutex`.
///
/// The lock is never held across an `.await` or a call into the backend,
/// the preview, or the delegate.
struct SessionInner<S: MediaStreamHandle> {
    state: SessionState,
    error: Option<CaptureError>,
    lease: Option<StreamLease<S>>,
    torch: bool,
    supports_torch: bool,
    stop_requested: bool,
    generation: u64,
}

impl<S: MediaStreamHandle> SessionInner<S> {
    fn new() -> Self {
        Self {
            state: SessionState::Idle,
            error: None,
            lease: None,
            torch: false,
            supports_torch: false,
            stop_requested: false,
            generation: 0,
        }
    }
}

enum SessionEvent {
    State(SessionState),
    Error(CaptureError),
    Torch { torch: bool, supports_torch: bool },
}

/// Owns one camera for the lifetime of a capture screen.
///
/// Generic over the platform via `CameraBackend` and over the on-screen sink
/// via `PreviewSurface`. Operations take `&self` so a `stop()` can be issued
/// while a `start()` is still awaiting the platform.
///
/// ```text
/// start() ─→ preferred profile ─rejected─→ baseline profile
///                 │                              │
///                 └──────── granted ─────────────┴─→ [StreamLease] ─→ preview
/// ```
///
/// Dropping the session releases any held stream.
pub struct CameraSession<B: CameraBackend, P: PreviewSurface<B::Stream>> {
    backend: B,
    preview: P,
    config: CaptureConfiguration,
    is_supported: bool,
    inner: Mutex<SessionInner<B::Stream>>,
    delegate: Option<Arc<dyn SessionDelegate>>,
}

impl<B: CameraBackend, P: PreviewSurface<B::Stream>> CameraSession<B, P> {
    pub fn new(backend: B, preview: P, config: CaptureConfiguration) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new_unchecked(backend, preview, config))
    }

    pub fn with_defaults(backend: B, preview: P) -> Self {
        Self::new_unchecked(backend, preview, CaptureConfiguration::default())
    }

    fn new_unchecked(backend: B, preview: P, config: CaptureConfiguration) -> Self {
        let is_supported = backend.is_supported();
        Self {
            backend,
            preview,
            config,
            is_supported,
            inner: Mutex::new(SessionInner::new()),
            delegate: None,
        }
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn SessionDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn config(&self) -> &CaptureConfiguration {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn preview(&self) -> &P {
        &self.preview
    }

    pub fn state(&self) -> SessionState {
        self.inner.lock().state
    }

    pub fn error(&self) -> Option<CaptureError> {
        self.inner.lock().error.clone()
    }

    pub fn is_active(&self) -> bool {
        self.inner.lock().state.is_active()
    }

    /// Computed once at construction; not reactive to later capability loss.
    pub fn is_supported(&self) -> bool {
        self.is_supported
    }

    pub fn torch(&self) -> bool {
        self.inner.lock().torch
    }

    pub fn supports_torch(&self) -> bool {
        self.inner.lock().supports_torch
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.lock();
        SessionSnapshot {
            state: inner.state,
            error: inner.error.clone(),
            is_active: inner.state.is_active(),
            is_supported: self.is_supported,
            torch: inner.torch,
            supports_torch: inner.supports_torch,
        }
    }

    pub fn clear_error(&self) {
        self.inner.lock().error = None;
    }

    /// Acquire the camera. Transitions: idle → starting → active | error.
    ///
    /// A no-op while a stream is held or an acquisition/teardown is in flight.
    /// Returns `Ok(())` without holding hardware when a `stop()` issued during
    /// the acquisition superseded it.
    pub async fn start(&self) -> Result<(), CaptureError> {
        let precondition = if !self.is_supported {
            Some(CaptureError::Unsupported)
        } else if !self.backend.is_secure_context() {
            Some(CaptureError::InsecureContext)
        } else {
            None
        };

        {
            let mut inner = self.inner.lock();
            if !inner.state.can_start() {
                log::debug!("start ignored in state {:?}", inner.state);
                return Ok(());
            }
            if let Some(err) = precondition {
                inner.error = Some(err.clone());
                drop(inner);
                log::error!("camera unavailable: {}", err);
                self.notify([SessionEvent::Error(err.clone())]);
                return Err(err);
            }
            inner.error = None;
            inner.stop_requested = false;
            inner.state = SessionState::Starting;
        }
        self.notify([SessionEvent::State(SessionState::Starting)]);

        let outcome = self.negotiate().await;
        self.finish_start(outcome)
    }

    /// Preferred profile first, then the baseline. The baseline's rejection
    /// is the one reported. No baseline attempt once a stop is pending.
    async fn negotiate(&self) -> Result<B::Stream, PlatformError> {
        let preferred = CaptureConstraints::preferred();
        let err = match self.backend.acquire(&preferred).await {
            Ok(stream) => return Ok(stream),
            Err(err) => err,
        };
        if self.inner.lock().stop_requested {
            log::debug!("preferred constraints rejected ({}) after stop, skipping baseline", err);
            return Err(err);
        }
        log::warn!("preferred constraints rejected ({}), retrying with baseline", err);
        self.backend.acquire(&self.config.baseline).await
    }

    fn finish_start(&self, outcome: Result<B::Stream, PlatformError>) -> Result<(), CaptureError> {
        let mut inner = self.inner.lock();
        let superseded = std::mem::take(&mut inner.stop_requested);

        let stream = match outcome {
            Ok(stream) => stream,
            Err(platform) if superseded => {
                inner.state = SessionState::Idle;
                drop(inner);
                log::info!("acquisition failed after stop was requested: {}", platform);
                self.notify([SessionEvent::State(SessionState::Idle)]);
                return Ok(());
            }
            Err(platform) => {
                let err = CaptureError::from_platform(&platform);
                inner.state = SessionState::Error;
                inner.error = Some(err.clone());
                drop(inner);
                log::error!("camera acquisition failed: {} ({})", err, platform);
                self.notify([
                    SessionEvent::State(SessionState::Error),
                    SessionEvent::Error(err.clone()),
                ]);
                return Err(err);
            }
        };

        let lease = StreamLease::new(stream);
        if superseded {
            inner.state = SessionState::Idle;
            drop(inner);
            log::info!("stop requested during acquisition, releasing stream");
            lease.release();
            self.notify([SessionEvent::State(SessionState::Idle)]);
            return Ok(());
        }

        let shared = lease.shared();
        let supports_torch = lease.stream().supports_torch();
        inner.lease = Some(lease);
        inner.generation += 1;
        inner.state = SessionState::Active;
        inner.error = None;
        inner.torch = false;
        inner.supports_torch = supports_torch;
        drop(inner);

        self.preview.attach(&shared);
        log::info!("camera active (torch supported: {})", supports_torch);

        let mut events = vec![SessionEvent::State(SessionState::Active)];
        if supports_torch {
            events.push(SessionEvent::Torch {
                torch: false,
                supports_torch,
            });
        }
        self.notify(events);
        Ok(())
    }

    /// Release the camera. Transitions: active → [stopping_torch_off] → stopped → idle.
    ///
    /// Turns the torch off first when it is on; a failure there is logged and
    /// does not block the release. Idempotent. While an acquisition is in
    /// flight the request is remembered and honored when it resolves.
    pub async fn stop(&self) {
        let (lease, torch_on) = {
            let mut inner = self.inner.lock();
            match inner.state {
                SessionState::Starting => {
                    log::debug!("stop requested while starting, deferring");
                    inner.stop_requested = true;
                    return;
                }
                SessionState::StoppingTorchOff => return,
                _ => {}
            }
            let Some(lease) = inner.lease.take() else {
                drop(inner);
                self.settle_without_hardware();
                return;
            };
            let torch_on = inner.torch;
            if torch_on {
                inner.state = SessionState::StoppingTorchOff;
            }
            (lease, torch_on)
        };

        let pending = PendingTeardown {
            session: self,
            lease: Some(lease),
        };
        if torch_on {
            self.notify([SessionEvent::State(SessionState::StoppingTorchOff)]);
            if let Some(lease) = &pending.lease {
                if let Err(err) = lease.stream().set_torch(false).await {
                    log::warn!("failed to turn off torch before release: {}", err);
                }
            }
        }
        drop(pending);
    }

    /// Synchronous teardown for unmount paths that cannot await.
    ///
    /// Skips the torch-off step; stopping the tracks releases the torch with
    /// the camera.
    pub fn close(&self) {
        let lease = {
            let mut inner = self.inner.lock();
            if inner.state == SessionState::Starting {
                inner.stop_requested = true;
                return;
            }
            inner.lease.take()
        };
        match lease {
            Some(lease) => self.teardown(lease),
            None => self.settle_without_hardware(),
        }
    }

    /// Flip the torch. A no-op unless active with torch capability.
    ///
    /// Failures are logged and leave the tracked flag unchanged. When the
    /// stream reports its applied setting, the flag follows the hardware.
    pub async fn toggle_torch(&self) {
        let (stream, target, generation) = {
            let inner = self.inner.lock();
            if !inner.state.is_active() || !inner.supports_torch {
                log::debug!("torch toggle ignored (state {:?})", inner.state);
                return;
            }
            let Some(lease) = inner.lease.as_ref() else {
                return;
            };
            (lease.shared(), !inner.torch, inner.generation)
        };

        if let Err(err) = stream.set_torch(target).await {
            log::warn!("failed to toggle torch: {}", err);
            return;
        }
        let applied = stream.torch_enabled().unwrap_or(target);
        if applied != target {
            log::warn!("torch constraint accepted but track reports torch={}", applied);
        }

        let supports_torch = {
            let mut inner = self.inner.lock();
            if !inner.state.is_active() || inner.generation != generation {
                log::debug!("torch toggle resolved after teardown, ignoring");
                return;
            }
            if inner.torch == applied {
                return;
            }
            inner.torch = applied;
            inner.supports_torch
        };
        self.notify([SessionEvent::Torch {
            torch: applied,
            supports_torch,
        }]);
    }

    /// Encode the frame currently shown in the preview.
    ///
    /// Does not change session state or stop the camera.
    pub fn capture_image(&self) -> Result<CapturedImage, CaptureError> {
        let active = {
            let inner = self.inner.lock();
            inner.state.is_active() && inner.lease.is_some()
        };
        if !active {
            return Err(self.record_error(CaptureError::NotActive));
        }

        let frame = match self.preview.current_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => return Err(self.record_error(CaptureError::NotActive)),
            Err(err) => return Err(self.record_error(CaptureError::CaptureFailed(err.message))),
        };

        let bytes = jpeg_encoder::encode_jpeg(&frame, self.config.jpeg_quality)
            .map_err(|e| self.record_error(CaptureError::CaptureFailed(e)))?;

        log::info!(
            "captured {}x{} still ({} bytes)",
            frame.width(),
            frame.height(),
            bytes.len()
        );
        Ok(CapturedImage::new_jpeg(bytes, frame.width(), frame.height()))
    }

    // --- Internal helpers ---

    /// The single release path for a held stream.
    fn teardown(&self, lease: StreamLease<B::Stream>) {
        lease.release();
        self.preview.detach();

        let torch_changed = {
            let mut inner = self.inner.lock();
            let changed = inner.torch || inner.supports_torch;
            inner.torch = false;
            inner.supports_torch = false;
            inner.state = SessionState::Stopped;
            changed
        };
        log::info!("camera stream released");

        let mut events = Vec::with_capacity(2);
        if torch_changed {
            events.push(SessionEvent::Torch {
                torch: false,
                supports_torch: false,
            });
        }
        events.push(SessionEvent::State(SessionState::Stopped));
        self.notify(events);

        self.settle_without_hardware();
    }

    /// Reset to idle once no hardware is held.
    fn settle_without_hardware(&self) {
        let reset = {
            let mut inner = self.inner.lock();
            let reset = matches!(inner.state, SessionState::Stopped | SessionState::Error);
            if reset {
                inner.state = SessionState::Idle;
            }
            reset
        };
        if reset {
            self.notify([SessionEvent::State(SessionState::Idle)]);
        }
    }

    fn record_error(&self, err: CaptureError) -> CaptureError {
        self.inner.lock().error = Some(err.clone());
        log::error!("{}", err);
        self.notify([SessionEvent::Error(err.clone())]);
        err
    }

    fn notify(&self, events: impl IntoIterator<Item = SessionEvent>) {
        let Some(delegate) = self.delegate.as_ref() else {
            return;
        };
        for event in events {
            match event {
                SessionEvent::State(state) => delegate.on_state_changed(state),
                SessionEvent::Error(err) => delegate.on_error(&err),
                SessionEvent::Torch {
                    torch,
                    supports_torch,
                } => delegate.on_torch_changed(torch, supports_torch),
            }
        }
    }
}

impl<B: CameraBackend, P: PreviewSurface<B::Stream>> Drop for CameraSession<B, P> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Runs the teardown when dropped, so a `stop()` future abandoned during the
/// torch-off await still releases the stream.
struct PendingTeardown<'a, B: CameraBackend, P: PreviewSurface<B::Stream>> {
    session: &'a CameraSession<B, P>,
    lease: Option<StreamLease<B::Stream>>,
}

impl<B: CameraBackend, P: PreviewSurface<B::Stream>> Drop for PendingTeardown<'_, B, P> {
    fn drop(&mut self) {
        if let Some(lease) = self.lease.take() {
            self.session.teardown(lease);
        }
    }
}
