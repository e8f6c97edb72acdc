// app/src/toast.rs

use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

/// Transient notifications pushed by pages and drained by the shell. Shared
/// behind an `Arc`; the mutex only guards the queue handoff.
#[derive(Debug, Default)]
pub struct ToastQueue {
    queue: Mutex<VecDeque<Toast>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        ToastQueue::default()
    }

    pub fn push(&self, kind: ToastKind, message: impl Into<String>) {
        self.queue
            .lock()
            .expect("toast queue lock")
            .push_back(Toast { kind, message: message.into() });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(ToastKind::Warning, message);
    }

    pub fn drain(&self) -> Vec<Toast> {
        self.queue.lock().expect("toast queue lock").drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().expect("toast queue lock").is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_drain_in_push_order() {
        let q = ToastQueue::new();
        q.success("saved");
        q.error("failed");
        let drained = q.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].kind, ToastKind::Success);
        assert_eq!(drained[1].message, "failed");
        assert!(q.is_empty());
    }
}
