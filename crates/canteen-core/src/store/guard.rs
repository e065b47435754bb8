// Drop guards that clear a store flag however the action ends.

use tokio::sync::watch;

/// Sets a flag on creation and clears it on drop, including when the
/// owning future is cancelled mid-request.
pub(crate) struct FlagGuard<'a, S> {
    state: &'a watch::Sender<S>,
    clear: fn(&mut S),
}

impl<'a, S> FlagGuard<'a, S> {
    pub(crate) fn raise(state: &'a watch::Sender<S>, set: fn(&mut S), clear: fn(&mut S)) -> Self {
        state.send_modify(set);
        Self { state, clear }
    }
}

impl<S> Drop for FlagGuard<'_, S> {
    fn drop(&mut self) {
        self.state.send_modify(self.clear);
    }
}
