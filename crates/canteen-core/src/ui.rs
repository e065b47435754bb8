// ── UI state ──
//
// Notification slot, blocking action overlay and the sidebar flag. The
// sidebar flag is the only piece that survives a restart (see `persist`).

use tokio::sync::watch;

use crate::notify::{DEFAULT_DISMISS, Notification, Notifier, Severity};

pub struct UiStore {
    notifier: Notifier,
    overlay: watch::Sender<Option<String>>,
    sidebar_open: watch::Sender<bool>,
}

impl UiStore {
    pub fn new(sidebar_open: bool) -> Self {
        let (overlay, _) = watch::channel(None);
        let (sidebar_open, _) = watch::channel(sidebar_open);
        Self {
            notifier: Notifier::new(),
            overlay,
            sidebar_open,
        }
    }

    // ── Notifications ────────────────────────────────────────────────

    pub fn notify(&self, message: impl Into<String>, severity: Severity) {
        self.notifier.show(message, severity, DEFAULT_DISMISS);
    }

    pub fn hide_notification(&self) {
        self.notifier.hide();
    }

    pub fn notification(&self) -> Option<Notification> {
        self.notifier.current()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    // ── Action overlay ───────────────────────────────────────────────

    pub fn show_action_overlay(&self, message: impl Into<String>) {
        self.overlay.send_replace(Some(message.into()));
    }

    pub fn hide_action_overlay(&self) {
        self.overlay.send_replace(None);
    }

    pub fn action_overlay(&self) -> Option<String> {
        self.overlay.borrow().clone()
    }

    pub fn subscribe_overlay(&self) -> watch::Receiver<Option<String>> {
        self.overlay.subscribe()
    }

    // ── Sidebar ──────────────────────────────────────────────────────

    pub fn is_sidebar_open(&self) -> bool {
        *self.sidebar_open.borrow()
    }

    pub fn set_sidebar_open(&self, open: bool) {
        self.sidebar_open.send_replace(open);
    }

    pub fn toggle_sidebar(&self) -> bool {
        let mut open = false;
        self.sidebar_open.send_modify(|v| {
            *v = !*v;
            open = *v;
        });
        open
    }

    pub fn subscribe_sidebar(&self) -> watch::Receiver<bool> {
        self.sidebar_open.subscribe()
    }
}

impl Default for UiStore {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Hides the action overlay when dropped.
pub(crate) struct OverlayGuard<'a>(pub(crate) &'a UiStore);

impl Drop for OverlayGuard<'_> {
    fn drop(&mut self) {
        self.0.hide_action_overlay();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidebar_toggles() {
        let ui = UiStore::new(false);
        assert!(ui.toggle_sidebar());
        assert!(ui.is_sidebar_open());
        assert!(!ui.toggle_sidebar());
    }

    #[test]
    fn overlay_guard_hides_on_drop() {
        let ui = UiStore::default();
        {
            ui.show_action_overlay("Deleting…");
            let _guard = OverlayGuard(&ui);
            assert_eq!(ui.action_overlay().as_deref(), Some("Deleting…"));
        }
        assert!(ui.action_overlay().is_none());
    }
}
