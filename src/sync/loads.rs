use std::future::Future;

use super::*;

/// Tracks the in-flight load of one collection. Beginning a new load cancels the previous
/// one, so a slow superseded load can never overwrite a newer result.
#[derive(Default)]
pub(super) struct LoadSlot {
    current: Mutex<Option<(u64, CancellationToken)>>,
    generation: std::sync::atomic::AtomicU64,
}

pub(super) struct LoadTicket<'a> {
    slot: &'a LoadSlot,
    id: u64,
    pub(super) token: CancellationToken,
}

impl LoadSlot {
    fn guard(&self) -> MutexGuard<'_, Option<(u64, CancellationToken)>> {
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(super) fn begin(&self, parent: &CancellationToken) -> LoadTicket<'_> {
        let id = self
            .generation
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let token = parent.child_token();
        if let Some((prev, prev_token)) = self.guard().replace((id, token.clone())) {
            debug!(superseded = prev, by = id, "cancel superseded load");
            prev_token.cancel();
        }
        LoadTicket {
            slot: self,
            id,
            token,
        }
    }

    pub(super) fn cancel_current(&self) {
        if let Some((_, token)) = self.guard().take() {
            token.cancel();
        }
    }
}

impl Drop for LoadTicket<'_> {
    fn drop(&mut self) {
        let mut current = self.slot.guard();
        if matches!(current.as_ref(), Some((id, _)) if *id == self.id) {
            *current = None;
        }
    }
}

/// Runs `fut` unless `token` fires first.
pub(super) async fn cancellable<T>(
    token: &CancellationToken,
    fut: impl Future<Output = T>,
) -> Result<T, SyncError> {
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(SyncError::Cancelled),
        out = fut => Ok(out),
    }
}
