use movielist_api::ApiError;
use serde::Serialize;
use std::future::Future;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Progress of the most recent operation, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum OperationStatus {
    Idle,
    Loading(String),
    Succeeded(Option<String>),
    Failed(String),
}

impl OperationStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, OperationStatus::Succeeded(_) | OperationStatus::Failed(_))
    }
}

/// Publishes [`OperationStatus`] changes to any number of subscribers.
#[derive(Debug)]
pub struct StatusTracker {
    tx: watch::Sender<OperationStatus>,
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusTracker {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(OperationStatus::Idle);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<OperationStatus> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> OperationStatus {
        self.tx.borrow().clone()
    }

    pub fn set(&self, status: OperationStatus) {
        debug!(?status, "operation status");
        self.tx.send_replace(status);
    }

    pub fn loading(&self, label: impl Into<String>) {
        self.set(OperationStatus::Loading(label.into()));
    }

    pub fn succeeded(&self, message: Option<String>) {
        self.set(OperationStatus::Succeeded(message));
    }

    pub fn failed(&self, error: &ApiError) {
        warn!(error = %error, kind = ?error.kind(), "operation failed");
        self.set(OperationStatus::Failed(error.to_string()));
    }

    /// Run a fetch, publishing loading and then its outcome.
    pub async fn track<T, F>(&self, label: impl Into<String>, operation: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        self.loading(label);
        let result = operation.await;
        match &result {
            Ok(_) => self.succeeded(None),
            Err(e) => self.failed(e),
        }
        result
    }

    /// Run a mutation whose success carries the server's message.
    pub async fn track_message<F>(
        &self,
        label: impl Into<String>,
        operation: F,
    ) -> Result<String, ApiError>
    where
        F: Future<Output = Result<String, ApiError>>,
    {
        self.loading(label);
        let result = operation.await;
        match &result {
            Ok(message) => self.succeeded(Some(message.clone())),
            Err(e) => self.failed(e),
        }
        result
    }
}
