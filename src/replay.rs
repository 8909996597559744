use crate::actions::{Action, PageRun};
use crate::pageset::{PageEntry, PageSet};
use std::time::Duration;
use url::Url;

/// Error reported by an action runner while executing a step
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct RunnerError(Box<dyn std::error::Error + Send + Sync>);

impl RunnerError {
    /// Wrap a runner's own error
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(source.into())
    }

    /// Wrap a plain message
    pub fn msg(message: impl Into<String>) -> Self {
        Self(message.into().into())
    }
}

/// The contract a page-replay harness exposes to page sets.
///
/// The engine behind it (browser control, archive playback) lives in the
/// external harness; this crate only drives the steps.
#[allow(async_fn_in_trait)]
pub trait ActionRunner {
    /// Navigate the browser to a URL
    async fn navigate_to(&mut self, url: &Url) -> Result<(), RunnerError>;

    /// Hold for a fixed duration before the current page visit counts as done
    async fn wait(&mut self, duration: Duration) -> Result<(), RunnerError>;
}

/// A page that failed during a set replay
#[derive(Debug)]
pub struct PageFailure {
    /// URL of the failed page
    pub url: String,
    /// The error the runner reported
    pub error: RunnerError,
}

/// Outcome of replaying a whole page set
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Pages the replay loop attempted
    pub pages_attempted: usize,
    /// Pages whose every step completed
    pub pages_completed: usize,
    /// Per-page failures, in set order
    pub failures: Vec<PageFailure>,
}

impl RunSummary {
    /// Whether every attempted page completed
    pub fn all_completed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Execute the steps of a single page run against a runner
pub async fn execute_steps<R: ActionRunner>(
    run: &PageRun,
    runner: &mut R,
) -> Result<(), RunnerError> {
    for step in &run.steps {
        match step {
            Action::Navigate { url } => {
                let parsed = Url::parse(url).map_err(RunnerError::new)?;
                ::log::debug!("NAVIGATE: {}", url);
                runner.navigate_to(&parsed).await?;
            }
            Action::Wait { seconds } => {
                ::log::debug!("WAIT: {}s", seconds);
                runner.wait(Duration::from_secs(*seconds)).await?;
            }
        }
    }
    Ok(())
}

/// Replay a single page: navigate, then wait
pub async fn run_page<R: ActionRunner>(
    entry: &PageEntry,
    runner: &mut R,
) -> Result<(), RunnerError> {
    execute_steps(&PageRun::for_entry(entry), runner).await
}

/// Replay every page of a set in order.
///
/// A failing page is recorded in the summary and the loop moves on to
/// the next page rather than aborting the whole set.
pub async fn run_page_set<R: ActionRunner>(set: &PageSet, runner: &mut R) -> RunSummary {
    ::log::info!(
        "Replaying page set '{}' ({} pages, archive: {})",
        set.name,
        set.len(),
        set.archive_data_file
    );

    let mut summary = RunSummary::default();

    for entry in set {
        summary.pages_attempted += 1;

        match run_page(entry, runner).await {
            Ok(()) => {
                summary.pages_completed += 1;
                ::log::info!(
                    "Replayed page {} of {}: {}",
                    summary.pages_attempted,
                    set.len(),
                    entry.url
                );
            }
            Err(error) => {
                ::log::error!("Failed to replay {}: {}", entry.url, error);
                summary.failures.push(PageFailure {
                    url: entry.url.clone(),
                    error,
                });
            }
        }
    }

    ::log::info!(
        "Replay of '{}' complete: {} of {} pages succeeded",
        set.name,
        summary.pages_completed,
        summary.pages_attempted
    );

    summary
}

/// Runner that logs every step and honors waits without driving a
/// browser.
///
/// Useful for checking a set's replay order and timing profile before
/// handing it to a real harness.
#[derive(Debug, Default)]
pub struct DryRunRunner {
    /// Log waits instead of sleeping through them
    pub skip_waits: bool,
}

impl ActionRunner for DryRunRunner {
    async fn navigate_to(&mut self, url: &Url) -> Result<(), RunnerError> {
        ::log::info!("dry-run navigate: {}", url);
        Ok(())
    }

    async fn wait(&mut self, duration: Duration) -> Result<(), RunnerError> {
        if self.skip_waits {
            ::log::info!("dry-run wait skipped: {}s", duration.as_secs());
        } else {
            ::log::info!("dry-run wait: {}s", duration.as_secs());
            tokio::time::sleep(duration).await;
        }
        Ok(())
    }
}
