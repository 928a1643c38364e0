use indicatif::{ProgressBar, ProgressStyle};
use movielist_core::OperationStatus;
use std::future::Future;
use std::io::IsTerminal;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Spinner driven by an operation-status channel.
///
/// Without a terminal the labels go to the log instead.
pub struct StatusUi {
    spinner: Option<ProgressBar>,
    task: JoinHandle<()>,
}

impl StatusUi {
    pub fn attach(mut rx: watch::Receiver<OperationStatus>) -> Self {
        let spinner = is_interactive().then(|| {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner())
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
            );
            spinner.enable_steady_tick(Duration::from_millis(80));
            spinner
        });

        let bar = spinner.clone();
        let task = tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let status = rx.borrow_and_update().clone();
                if let OperationStatus::Loading(label) = status {
                    match &bar {
                        Some(bar) => bar.set_message(label),
                        None => tracing::info!(operation = "progress", message = %label, "Progress update"),
                    }
                }
            }
        });

        Self { spinner, task }
    }

    pub fn finish(self) {
        self.task.abort();
        if let Some(spinner) = self.spinner {
            spinner.finish_and_clear();
        }
    }
}

/// Await `operation` with a spinner bound to `rx`.
pub async fn with_status<T, F>(rx: watch::Receiver<OperationStatus>, operation: F) -> T
where
    F: Future<Output = T>,
{
    let ui = StatusUi::attach(rx);
    let result = operation.await;
    ui.finish();
    result
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
