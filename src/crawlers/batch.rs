use crate::config::ExtractorConfig;
use crate::crawlers::renderer::Renderer;
use crate::error::Result;
use crate::filter::InternalHosts;
use crate::input::InputRow;
use crate::pipeline;
use crate::results::Record;
use crate::session::{RunSummary, Session};
use crate::utils::jitter_delay;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::time::Duration;

/// Settings shared by all workers of one batch
struct WorkerContext {
    renderer: Arc<dyn Renderer>,
    config: ExtractorConfig,
    internal_hosts: InternalHosts,
}

/// Analyses every pending row with a bounded pool of workers.
///
/// Records are appended to `session` as they complete, in any order; each
/// append may trigger a checkpoint. A final checkpoint is written at the end.
pub async fn run(
    renderer: Arc<dyn Renderer>,
    rows: Vec<InputRow>,
    config: &ExtractorConfig,
    session: &mut Session,
) -> Result<RunSummary> {
    let (pending, skipped) = session.pending(rows);
    ::log::info!(
        "Queued {} URLs ({} already processed)",
        pending.len(),
        skipped
    );

    let num_workers = config.max_concurrency.max(1).min(pending.len().max(1));
    let (job_tx, job_rx) = mpsc::channel::<InputRow>(pending.len().max(1));
    let (result_tx, mut result_rx) = mpsc::channel::<Record>(num_workers * 2);

    for row in pending {
        if job_tx.send(row).await.is_err() {
            ::log::error!("Job queue closed before all URLs were queued");
            break;
        }
    }
    // workers stop once the queue is drained
    drop(job_tx);

    let context = Arc::new(WorkerContext {
        renderer,
        config: config.clone(),
        internal_hosts: InternalHosts::new(&config.internal_hosts),
    });
    let job_rx = Arc::new(Mutex::new(job_rx));

    for worker_id in 0..num_workers {
        spawn_worker(
            worker_id,
            Arc::clone(&context),
            Arc::clone(&job_rx),
            result_tx.clone(),
        );
    }
    // the result channel closes when the last worker exits
    drop(result_tx);

    let started = std::time::Instant::now();
    while let Some(record) = result_rx.recv().await {
        if record.is_error() {
            ::log::debug!("Recorded error row for {}", record.url());
        } else {
            ::log::debug!("Recorded features for {}", record.url());
        }
        if let Err(e) = session.record(record) {
            ::log::error!("Failed to write checkpoint: {}", e);
        }
    }
    session.checkpoint()?;

    let summary = session.summary(skipped);
    ::log::info!(
        "Run complete in {:.2} seconds: {} feature rows, {} error rows, {} skipped",
        started.elapsed().as_secs_f64(),
        summary.feature_rows,
        summary.error_rows,
        summary.skipped
    );
    Ok(summary)
}

fn spawn_worker(
    worker_id: usize,
    context: Arc<WorkerContext>,
    job_rx: Arc<Mutex<mpsc::Receiver<InputRow>>>,
    result_tx: mpsc::Sender<Record>,
) {
    ::log::trace!("Spawning worker {}", worker_id);

    tokio::spawn(async move {
        while let Some(row) = next_job(worker_id, &job_rx).await {
            let record = analyze_with_retries(worker_id, &context, &row).await;
            if let Err(e) = result_tx.send(record).await {
                ::log::error!("Worker {} failed to send result: {}", worker_id, e);
                break;
            }
        }
        ::log::debug!("Worker {} finished, no more URLs to process", worker_id);
    });
}

/// Next row from the shared queue; `None` once it is closed and empty
async fn next_job(worker_id: usize, job_rx: &Arc<Mutex<mpsc::Receiver<InputRow>>>) -> Option<InputRow> {
    let mut rx = job_rx.lock().await;
    let row = rx.recv().await;
    if let Some(row) = &row {
        ::log::trace!("Worker {} picked up {}", worker_id, row.url);
    }
    row
}

/// Runs the pipeline for one row, retrying transient failures with a fixed
/// backoff. Exhausted retries become an error row.
async fn analyze_with_retries(worker_id: usize, context: &WorkerContext, row: &InputRow) -> Record {
    let config = &context.config;
    let mut attempt = 1;
    loop {
        tokio::time::sleep(jitter_delay(config.min_delay_ms, config.max_delay_ms)).await;
        ::log::debug!("Worker {} analysing {} (attempt {})", worker_id, row.url, attempt);

        match pipeline::analyze(context.renderer.as_ref(), row, config, &context.internal_hosts).await {
            Ok(record) => return record,
            Err(e) if e.is_transient() && attempt < config.max_retries => {
                ::log::warn!(
                    "Worker {} attempt {}/{} failed for {}: {}",
                    worker_id,
                    attempt,
                    config.max_retries,
                    row.url,
                    e
                );
                tokio::time::sleep(Duration::from_secs(config.retry_backoff_secs)).await;
                attempt += 1;
            }
            Err(e) => {
                ::log::error!(
                    "Worker {} giving up on {} after {} attempts: {}",
                    worker_id,
                    row.url,
                    attempt,
                    e
                );
                return Record::error(&row.url, &e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawlers::renderer::PageSnapshot;
    use crate::error::ExtractError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Serves canned pages; URLs listed in `failures` time out that many times first
    struct CannedRenderer {
        pages: HashMap<String, String>,
        failures: HashMap<String, u32>,
        calls: std::sync::Mutex<HashMap<String, u32>>,
        renders: AtomicU32,
    }

    impl CannedRenderer {
        fn new(pages: &[(&str, &str)], failures: &[(&str, u32)]) -> Self {
            Self {
                pages: pages.iter().map(|(u, h)| (u.to_string(), h.to_string())).collect(),
                failures: failures.iter().map(|(u, n)| (u.to_string(), *n)).collect(),
                calls: std::sync::Mutex::new(HashMap::new()),
                renders: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl Renderer for CannedRenderer {
        async fn render(&self, url: &str) -> Result<PageSnapshot> {
            self.renders.fetch_add(1, Ordering::SeqCst);
            let call = {
                let mut calls = self.calls.lock().unwrap();
                let n = calls.entry(url.to_string()).or_insert(0);
                *n += 1;
                *n
            };
            if call <= self.failures.get(url).copied().unwrap_or(0) {
                return Err(ExtractError::Timeout {
                    url: url.to_string(),
                    secs: 30,
                });
            }
            match self.pages.get(url) {
                Some(html) => Ok(PageSnapshot::from_html(url, html)),
                None => Err(ExtractError::InvalidUrl(url.to_string())),
            }
        }
    }

    fn fast_config() -> ExtractorConfig {
        ExtractorConfig {
            min_delay_ms: 0,
            max_delay_ms: 0,
            retry_backoff_secs: 0,
            max_concurrency: 3,
            max_retries: 3,
            ..ExtractorConfig::default()
        }
    }

    const PAGE: &str = "<html><body><h1>Hello</h1><button>Get started</button></body></html>";

    #[tokio::test]
    async fn test_transient_failures_are_retried() {
        let renderer = Arc::new(CannedRenderer::new(
            &[("https://a.com/", PAGE), ("https://b.com/", PAGE)],
            &[("https://a.com/", 2), ("https://b.com/", 5)],
        ));
        let rows = vec![InputRow::new("https://a.com/"), InputRow::new("https://b.com/")];
        let mut session = Session::new(None, 10);

        let summary = run(renderer.clone(), rows, &fast_config(), &mut session).await.unwrap();
        assert_eq!(summary.feature_rows, 1);
        assert_eq!(summary.error_rows, 1);

        let failed = session.results().iter().find(|r| r.is_error()).unwrap();
        assert_eq!(failed.url(), "https://b.com/");
        assert_eq!(renderer.renders.load(Ordering::SeqCst), 3 + 3);
    }

    #[tokio::test]
    async fn test_non_transient_errors_are_not_retried() {
        let renderer = Arc::new(CannedRenderer::new(&[], &[]));
        let mut session = Session::new(None, 10);
        run(renderer.clone(), vec![InputRow::new("https://missing.com/")], &fast_config(), &mut session)
            .await
            .unwrap();
        assert_eq!(renderer.renders.load(Ordering::SeqCst), 1);
        assert!(session.results()[0].is_error());
    }

    #[tokio::test]
    async fn test_every_url_gets_a_row() {
        let pages: Vec<(String, &str)> = (0..12).map(|i| (format!("https://site{i}.com/"), PAGE)).collect();
        let page_refs: Vec<(&str, &str)> = pages.iter().map(|(u, h)| (u.as_str(), *h)).collect();
        let renderer = Arc::new(CannedRenderer::new(&page_refs, &[]));
        let rows = pages.iter().map(|(u, _)| InputRow::new(u)).collect();
        let mut session = Session::new(None, 5);

        let summary = run(renderer, rows, &fast_config(), &mut session).await.unwrap();
        assert_eq!(summary.feature_rows, 12);
        assert_eq!(session.results().len(), 12);
    }

    #[tokio::test]
    async fn test_resumed_run_matches_uninterrupted_run() {
        let urls: Vec<String> = (0..8).map(|i| format!("https://shop{i}.com/")).collect();
        let pages: Vec<(&str, &str)> = urls.iter().map(|u| (u.as_str(), PAGE)).collect();
        let rows = || urls.iter().map(|u| InputRow::new(u)).collect::<Vec<_>>();
        let result_urls = |records: &[Record]| {
            records.iter().map(|r| r.url().to_string()).collect::<std::collections::BTreeSet<_>>()
        };

        let mut uninterrupted = Session::new(None, 2);
        run(Arc::new(CannedRenderer::new(&pages, &[])), rows(), &fast_config(), &mut uninterrupted)
            .await
            .unwrap();

        let path = std::env::temp_dir().join(format!("lp-features-batch-resume-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let renderer = Arc::new(CannedRenderer::new(&pages, &[]));

        // the first run stops after half the rows have been checkpointed
        let mut first = Session::new(Some(path.clone()), 2);
        run(renderer.clone(), rows()[..4].to_vec(), &fast_config(), &mut first)
            .await
            .unwrap();
        drop(first);

        let mut resumed = Session::resume(Some(path.clone()), 2).unwrap();
        let summary = run(renderer.clone(), rows(), &fast_config(), &mut resumed).await.unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(summary.skipped, 4);
        assert_eq!(summary.feature_rows, 8);
        assert_eq!(result_urls(resumed.results()), result_urls(uninterrupted.results()));
        assert_eq!(resumed.results().len(), 8);
        assert_eq!(renderer.renders.load(Ordering::SeqCst), 8);
    }
}
