use std::collections::BTreeSet;

/// Handle of one requested frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameRequestId(pub u64);

/// The host's "call me before the next display refresh" primitive.
pub trait FrameScheduler {
    /// Request one callback; the host later reports it back with the returned id.
    fn request_frame(&mut self) -> FrameRequestId;

    /// Cancel a request that has not fired yet. Unknown ids are ignored.
    fn cancel_frame(&mut self, id: FrameRequestId);
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for &mut T {
    fn request_frame(&mut self) -> FrameRequestId {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        (**self).cancel_frame(id)
    }
}

/// Headless scheduler: requests queue up until the caller drains them as one "refresh".
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    outstanding: BTreeSet<FrameRequestId>,
    requested_total: u64,
    cancelled_total: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests waiting to fire.
    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }

    /// Ids waiting to fire, oldest first.
    pub fn pending_ids(&self) -> Vec<FrameRequestId> {
        self.outstanding.iter().copied().collect()
    }

    /// Simulate a display refresh: every outstanding request fires and is forgotten.
    pub fn take_due(&mut self) -> Vec<FrameRequestId> {
        std::mem::take(&mut self.outstanding).into_iter().collect()
    }

    pub fn requested_total(&self) -> u64 {
        self.requested_total
    }

    pub fn cancelled_total(&self) -> u64 {
        self.cancelled_total
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameRequestId {
        self.next_id += 1;
        let id = FrameRequestId(self.next_id);
        self.outstanding.insert(id);
        self.requested_total += 1;
        id
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        if self.outstanding.remove(&id) {
            self.cancelled_total += 1;
        }
    }
}
