use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use super::slice::{reduce, OperationKey, SyncAction, SyncState};
use super::status::Phase;

/// Explicit, cloneable handle to the sync state.
///
/// Every dispatch runs the reducer under the channel's lock and publishes
/// exactly one snapshot, so observers never see a half-applied action.
/// Each `pending` also numbers a new run of its operation.
#[derive(Clone)]
pub struct SyncStore {
    sender: Arc<watch::Sender<SyncState>>,
    runs: Arc<[AtomicU64; 4]>,
}

impl Default for SyncStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncStore {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(SyncState::default());
        Self {
            sender: Arc::new(sender),
            runs: Arc::new(Default::default()),
        }
    }

    pub fn dispatch(&self, action: SyncAction) {
        self.apply(action);
    }

    /// Marks `key` pending and returns the number of the run it starts.
    pub(crate) fn begin(&self, key: OperationKey) -> u64 {
        self.apply(SyncAction::Pending(key))
    }

    // The run counter moves under the channel lock, together with the state.
    fn apply(&self, action: SyncAction) -> u64 {
        let key = action.key();
        debug!(operation = %key, action = action.name(), "sync dispatch");
        let starts_run = matches!(action, SyncAction::Pending(_));
        let counter = &self.runs[key.index()];
        let mut run = 0;
        self.sender.send_modify(|state| {
            run = if starts_run {
                counter.fetch_add(1, Ordering::SeqCst) + 1
            } else {
                counter.load(Ordering::SeqCst)
            };
            reduce(state, action);
        });
        run
    }

    /// Resets `key` when run `run` is still the latest one and is still
    /// showing its success. Used by the dwell timer, so a newer run of the
    /// same operation keeps its own full dwell.
    pub(crate) fn expire_success(&self, key: OperationKey, run: u64) -> bool {
        let counter = &self.runs[key.index()];
        self.sender.send_if_modified(|state| {
            let latest = counter.load(Ordering::SeqCst) == run;
            let expire = latest && state.phase(key) == Phase::Fulfilled;
            if expire {
                debug!(operation = %key, run, "success dwell elapsed");
                reduce(state, SyncAction::Reset(key));
            }
            expire
        })
    }

    pub fn snapshot(&self) -> SyncState {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.sender.subscribe()
    }
}
