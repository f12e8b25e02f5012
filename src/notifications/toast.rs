use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<ToastVariant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    pub shown_at: DateTime<Utc>,
}

/// Fire-and-forget display surface for toasts.
pub trait ToastSink: Send + Sync {
    fn show(&self, toast: &Toast);
}

/// Writes toasts to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingToastSink;

impl ToastSink for TracingToastSink {
    fn show(&self, toast: &Toast) {
        tracing::info!(
            toast_id = %toast.id,
            title = %toast.title,
            description = %toast.description,
            variant = ?toast.variant,
            "toast"
        );
    }
}

/// Keeps every toast in memory.
#[derive(Debug, Default)]
pub struct MemoryToastSink {
    toasts: Mutex<Vec<Toast>>,
}

impl MemoryToastSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.toasts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.lock().is_empty()
    }
}

impl ToastSink for MemoryToastSink {
    fn show(&self, toast: &Toast) {
        self.toasts.lock().push(toast.clone());
    }
}
