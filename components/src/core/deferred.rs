// Deferred re-measurement
// True content extent is only known after a render pass, so layout changes
// queue a measurement that fires on the first tick after the next mount.
// Teardown cancels it for good.

/// Why a re-measurement was queued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureReason {
    DescriptorsChanged,
    Resized,
    PositionChanged,
}

#[derive(Debug, Default)]
pub struct DeferredTask {
    pending: Option<MeasureReason>,
    /// Set by schedule, cleared by the next mount
    awaiting_mount: bool,
    cancelled: bool,
}

impl DeferredTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a measurement. Repeated schedules before it fires coalesce
    /// (the latest reason wins). Returns false once the task was cancelled.
    pub fn schedule(&mut self, reason: MeasureReason) -> bool {
        if self.cancelled {
            tracing::trace!(?reason, "Deferred measure ignored after teardown");
            return false;
        }
        self.pending = Some(reason);
        self.awaiting_mount = true;
        true
    }

    /// Record that fresh geometry was registered
    pub fn mounted(&mut self) {
        self.awaiting_mount = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Take the pending measurement once a mount has happened since it was
    /// scheduled. Before that the registry still holds the old geometry.
    pub fn fire(&mut self) -> Option<MeasureReason> {
        if self.cancelled || self.awaiting_mount {
            return None;
        }
        self.pending.take()
    }

    /// Drop the pending measurement and refuse future ones
    pub fn cancel(&mut self) {
        if let Some(reason) = self.pending.take() {
            tracing::debug!(?reason, "Cancelled pending deferred measure");
        }
        self.cancelled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_once() {
        let mut task = DeferredTask::new();
        assert!(task.schedule(MeasureReason::DescriptorsChanged));
        assert!(task.schedule(MeasureReason::Resized));
        task.mounted();
        assert_eq!(task.fire(), Some(MeasureReason::Resized));
        assert_eq!(task.fire(), None);
    }

    #[test]
    fn test_waits_for_mount() {
        let mut task = DeferredTask::new();
        task.mounted();
        task.schedule(MeasureReason::DescriptorsChanged);
        assert_eq!(task.fire(), None);
        assert!(task.is_pending());

        task.mounted();
        assert_eq!(task.fire(), Some(MeasureReason::DescriptorsChanged));
    }

    #[test]
    fn test_cancel_drops_pending_and_future() {
        let mut task = DeferredTask::new();
        task.schedule(MeasureReason::DescriptorsChanged);
        task.mounted();
        task.cancel();
        assert!(!task.is_pending());
        assert_eq!(task.fire(), None);
        assert!(!task.schedule(MeasureReason::Resized));
        assert_eq!(task.fire(), None);
    }
}
