//! Application-wide context handed to every page.

use std::time::Instant;

use fadila_lib::Language;
use fadila_ui::State;
use fadila_ui::toast::Toast;
use fadila_ui::toast::ToastId;
use fadila_ui::toast::ToastLevel;
use fadila_ui::toast::ToastQueue;

/// Interface language plus the shared toast stack.
///
/// Cheap to clone; clones share the same toast queue, so table callbacks can
/// hold one and post notifications.
#[derive(Debug, Clone)]
pub struct AppContext {
    language: Language,
    toasts: State<ToastQueue>,
    last_shown: State<Option<ToastId>>,
}

impl AppContext {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            toasts: State::new(ToastQueue::new()),
            last_shown: State::new(None),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn toast(&self, toast: impl Into<Toast>) -> ToastId {
        self.toast_at(toast, Instant::now())
    }

    pub fn toast_at(&self, toast: impl Into<Toast>, now: Instant) -> ToastId {
        let toast = toast.into();
        log::info!("toast [{:?}] {}", toast.level, toast.message);
        self.toasts.update(|queue| queue.push(toast, now))
    }

    /// Expire old toasts and return the visible ones not yet printed.
    pub fn fresh_toasts(&self, now: Instant) -> Vec<(ToastLevel, String)> {
        let last = self.last_shown.get();
        let fresh: Vec<(ToastId, ToastLevel, String)> = self.toasts.update(|queue| {
            queue.tick(now);
            queue
                .active(now)
                .into_iter()
                .filter(|(id, _, _)| last.is_none_or(|last| *id > last))
                .map(|(id, toast, _)| (id, toast.level, toast.message.clone()))
                .collect()
        });
        if let Some((id, _, _)) = fresh.last() {
            self.last_shown.set(Some(*id));
        }
        fresh
            .into_iter()
            .map(|(_, level, message)| (level, message))
            .collect()
    }

}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_fresh_toasts_are_reported_once() {
        let ctx = AppContext::new(Language::Fr);
        let t0 = Instant::now();
        ctx.toast_at(Toast::success("ok"), t0);
        ctx.toast_at(Toast::error("ko"), t0);

        let fresh = ctx.fresh_toasts(t0 + Duration::from_millis(10));
        assert_eq!(
            fresh,
            vec![
                (ToastLevel::Success, "ok".to_string()),
                (ToastLevel::Error, "ko".to_string())
            ]
        );
        assert!(ctx.fresh_toasts(t0 + Duration::from_millis(20)).is_empty());
    }

    #[test]
    fn test_clones_share_the_queue() {
        let ctx = AppContext::new(Language::En);
        let handle = ctx.clone();
        let t0 = Instant::now();
        handle.toast_at("saved", t0);
        assert_eq!(ctx.fresh_toasts(t0).len(), 1);

        // expired before it was ever printed
        handle.toast_at("late", t0);
        assert!(ctx.fresh_toasts(t0 + Duration::from_millis(3300)).is_empty());
    }
}
