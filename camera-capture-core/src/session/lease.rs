use std::sync::Arc;

use crate::traits::camera_backend::MediaStreamHandle;

/// Exclusive ownership of an acquired hardware stream.
///
/// The tracks are stopped exactly once: either by `release()` or, if the
/// lease is dropped on some other path, by `Drop`.
pub(crate) struct StreamLease<S: MediaStreamHandle> {
    stream: Arc<S>,
    released: bool,
}

impl<S: MediaStreamHandle> StreamLease<S> {
    pub(crate) fn new(stream: S) -> Self {
        Self {
            stream: Arc::new(stream),
            released: false,
        }
    }

    pub(crate) fn stream(&self) -> &S {
        &self.stream
    }

    /// Handle for an in-flight constraint update. Does not extend the lease.
    pub(crate) fn shared(&self) -> Arc<S> {
        Arc::clone(&self.stream)
    }

    pub(crate) fn release(mut self) {
        self.stop_tracks();
    }

    fn stop_tracks(&mut self) {
        if !self.released {
            self.released = true;
            self.stream.stop_tracks();
        }
    }
}

impl<S: MediaStreamHandle> Drop for StreamLease<S> {
    fn drop(&mut self) {
        if !self.released {
            log::debug!("stream lease dropped without explicit release, stopping tracks");
        }
        self.stop_tracks();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeStream, HandleLedger, StreamEvent};

    #[test]
    fn release_stops_tracks_once() {
        let ledger = Arc::new(HandleLedger::default());
        let stream = FakeStream::new(&ledger);
        let probe = stream.probe();

        let lease = StreamLease::new(stream);
        assert_eq!(ledger.live(), 1);
        lease.release();

        assert_eq!(ledger.live(), 0);
        assert_eq!(probe.events(), vec![StreamEvent::TracksStopped]);
    }

    #[test]
    fn drop_releases_unreleased_lease() {
        let ledger = Arc::new(HandleLedger::default());
        {
            let _lease = StreamLease::new(FakeStream::new(&ledger));
            assert_eq!(ledger.live(), 1);
        }
        assert_eq!(ledger.live(), 0);
    }

    #[test]
    fn shared_handle_does_not_delay_release() {
        let ledger = Arc::new(HandleLedger::default());
        let lease = StreamLease::new(FakeStream::new(&ledger));
        let in_flight = lease.shared();

        lease.release();
        assert_eq!(ledger.live(), 0);
        assert!(in_flight.probe().is_stopped());
    }
}
