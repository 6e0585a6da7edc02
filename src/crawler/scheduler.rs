//! Frontier scheduler: the concurrency core of the crawl
//!
//! The scheduler owns the worker pool and drives the crawl through three
//! phases: Seeding (the seed page is processed inline), Draining (completed
//! tasks are reaped and their discoveries claimed and resubmitted), and
//! Completed (no outstanding work remains and none can appear).
//!
//! The outstanding-task set is a [`JoinSet`]; every spawned task is reaped
//! exactly once by `join_next`, including panicked ones, so the accounting
//! that completion detection rests on cannot drift. A semaphore sized to the
//! worker count caps how many fetches execute at once; spawning itself never
//! blocks the scheduler loop, excess tasks just wait for a permit.

use crate::config::Config;
use crate::crawler::aggregator::{Aggregator, CrawlResult, TaskRecord};
use crate::crawler::extractor::{extract_page, DiscoveryBatch};
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchOutcome};
use crate::crawler::registry::VisitedRegistry;
use crate::output::{print_fetch_failure, print_unparseable_advisory};
use crate::SpanError;
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// How many task completions between progress log lines
const PROGRESS_INTERVAL: usize = 10;

/// Lifecycle of one crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CrawlPhase {
    Seeding,
    Draining,
    Completed,
}

/// Drives one crawl from seed to completion
pub struct Scheduler {
    config: Arc<Config>,
    client: Client,
    registry: Arc<VisitedRegistry>,
}

impl Scheduler {
    /// Creates a scheduler with a fresh registry and a shared HTTP client
    pub fn new(config: Config) -> Result<Self, SpanError> {
        let client = build_http_client(
            &config.crawler.user_agent,
            Duration::from_secs(config.crawler.fetch_timeout_secs),
        )?;

        Ok(Self {
            config: Arc::new(config),
            client,
            registry: Arc::new(VisitedRegistry::new()),
        })
    }

    /// The registry backing this crawl; exposed for inspection
    pub fn registry(&self) -> Arc<VisitedRegistry> {
        Arc::clone(&self.registry)
    }

    /// Runs the crawl to completion and returns the final result
    ///
    /// Errors only on startup problems (malformed seed URL); every per-page
    /// failure during the crawl is recorded and the run still completes.
    pub async fn run(&self, seed_url: &str) -> Result<CrawlResult, SpanError> {
        let seed = Url::parse(seed_url)?;
        let start_time = Instant::now();

        let mut phase = CrawlPhase::Seeding;
        let mut aggregator = Aggregator::new();
        let semaphore = Arc::new(Semaphore::new(self.config.crawler.workers));
        let mut outstanding: JoinSet<TaskRecord> = JoinSet::new();

        // Seeding: the seed page is processed inline since there is nothing
        // to parallelize against yet.
        tracing::info!("{:?}: fetching seed {}", phase, seed);
        let seed_outcome = fetch_url(&self.client, seed.as_str()).await;
        let seed_batch = match &seed_outcome {
            FetchOutcome::Fetched { body, final_url } => extract_page(final_url, body),
            _ => DiscoveryBatch::default(),
        };
        aggregator.record_seed_forms(&seed_batch.forms);

        let seed_record = TaskRecord::from_outcome(&seed_outcome, seed_batch);
        report_outcome(&seed_record);
        if let TaskRecord::Processed { batch } = &seed_record {
            for candidate in batch.follow_candidates() {
                if self.registry.claim(candidate) {
                    self.spawn_task(&mut outstanding, &semaphore, candidate.to_string());
                }
            }
        }
        aggregator.record(&seed_record);

        phase = CrawlPhase::Draining;
        tracing::debug!(
            "{:?}: {} tasks submitted from the seed page",
            phase,
            outstanding.len()
        );

        // Draining: reap completions; each may grow the outstanding set.
        // join_next returning None is the termination condition: the set is
        // empty and no live task exists to submit more work.
        let mut completions = 0usize;
        while let Some(joined) = outstanding.join_next().await {
            completions += 1;

            let record = match joined {
                Ok(record) => record,
                Err(e) => {
                    // A panicked task is an empty discovery batch; the
                    // JoinSet already removed it from the outstanding set.
                    tracing::warn!("Crawl task aborted unexpectedly: {}", e);
                    TaskRecord::Failed {
                        url: "<lost task>".to_string(),
                        reason: e.to_string(),
                    }
                }
            };

            report_outcome(&record);
            if let TaskRecord::Processed { batch } = &record {
                for candidate in batch.follow_candidates() {
                    if self.registry.claim(candidate) {
                        self.spawn_task(&mut outstanding, &semaphore, candidate.to_string());
                    }
                }
            }
            aggregator.record(&record);

            if completions % PROGRESS_INTERVAL == 0 {
                tracing::info!(
                    "Progress: {} tasks completed, {} outstanding, {} URLs claimed",
                    completions,
                    outstanding.len(),
                    self.registry.len()
                );
            }
        }

        phase = CrawlPhase::Completed;
        tracing::info!(
            "{:?}: {} URLs claimed, {} tasks run in {:?}",
            phase,
            self.registry.len(),
            completions,
            start_time.elapsed()
        );

        Ok(aggregator.snapshot(&self.registry))
    }

    /// Submits one claimed URL to the pool
    ///
    /// The permit is acquired inside the spawned task, so submission returns
    /// immediately no matter how deep the backlog is; only task execution is
    /// capped at the worker count.
    fn spawn_task(
        &self,
        outstanding: &mut JoinSet<TaskRecord>,
        semaphore: &Arc<Semaphore>,
        url: String,
    ) {
        let client = self.client.clone();
        let semaphore = Arc::clone(semaphore);

        outstanding.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    // The semaphore outlives the crawl; closed means shutdown
                    return TaskRecord::Failed {
                        url,
                        reason: "scheduler shut down".to_string(),
                    };
                }
            };

            tracing::debug!("Fetching {}", url);
            let outcome = fetch_url(&client, &url).await;
            let batch = match &outcome {
                FetchOutcome::Fetched { body, final_url } => extract_page(final_url, body),
                _ => DiscoveryBatch::default(),
            };

            TaskRecord::from_outcome(&outcome, batch)
        });
    }
}

/// Reports a task outcome to the user inline, as it happens
fn report_outcome(record: &TaskRecord) {
    match record {
        TaskRecord::Processed { .. } => {}
        TaskRecord::Skipped { url, .. } => print_unparseable_advisory(url),
        TaskRecord::Failed { url, reason } => print_fetch_failure(url, reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(workers: usize) -> Config {
        let mut config = Config::default();
        config.crawler.workers = workers;
        config.crawler.fetch_timeout_secs = 2;
        config
    }

    async fn mount_page(server: &MockServer, route: &str, body: String) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(body)
                    .insert_header("content-type", "text/html"),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_seed_with_no_links_completes() {
        let server = MockServer::start().await;
        mount_page(&server, "/", "<html><body>nothing here</body></html>".into()).await;

        let scheduler = Scheduler::new(test_config(4)).unwrap();
        let result = scheduler.run(&format!("{}/", server.uri())).await.unwrap();

        assert!(result.links.is_empty());
        assert_eq!(result.pages_fetched, 1);
    }

    #[tokio::test]
    async fn test_failed_seed_still_completes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let scheduler = Scheduler::new(test_config(4)).unwrap();
        let result = scheduler.run(&format!("{}/", server.uri())).await.unwrap();

        assert!(result.links.is_empty());
        assert_eq!(result.fetch_failures, 1);
        assert_eq!(result.pages_fetched, 0);
    }

    #[tokio::test]
    async fn test_malformed_seed_is_startup_error() {
        let scheduler = Scheduler::new(test_config(4)).unwrap();
        assert!(scheduler.run("not a url").await.is_err());
    }

    #[tokio::test]
    async fn test_duplicate_links_fetched_once() {
        let server = MockServer::start().await;
        let base = server.uri();

        mount_page(
            &server,
            "/",
            format!(
                r#"<html><body>
                <a href="{base}/page">One</a>
                <a href="{base}/page">Two</a>
                </body></html>"#
            ),
        )
        .await;

        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html></html>")
                    .insert_header("content-type", "text/html"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let scheduler = Scheduler::new(test_config(4)).unwrap();
        let result = scheduler.run(&format!("{}/", base)).await.unwrap();

        assert_eq!(result.links, vec![format!("{}/page", base)]);
    }

    #[tokio::test]
    async fn test_seed_forms_surface_in_result() {
        let server = MockServer::start().await;
        let base = server.uri();

        mount_page(
            &server,
            "/",
            format!(
                r#"<html><body>
                <form action="{base}/login"></form>
                <a href="{base}/page">Next</a>
                </body></html>"#
            ),
        )
        .await;
        mount_page(
            &server,
            "/page",
            format!(r#"<html><body><form action="{base}/other"></form></body></html>"#),
        )
        .await;

        let scheduler = Scheduler::new(test_config(2)).unwrap();
        let result = scheduler.run(&format!("{}/", base)).await.unwrap();

        // Only the seed page's forms are listed; the later page's form is
        // counted but not surfaced.
        assert_eq!(result.seed_forms, vec![format!("{}/login", base)]);
        assert_eq!(result.forms_seen, 2);
    }

    #[tokio::test]
    async fn test_script_sources_are_followed() {
        let server = MockServer::start().await;
        let base = server.uri();

        mount_page(
            &server,
            "/",
            format!(r#"<html><head><script src="{base}/app.js"></script></head></html>"#),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/app.js"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("console.log('hi')")
                    .insert_header("content-type", "text/javascript"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let scheduler = Scheduler::new(test_config(2)).unwrap();
        let result = scheduler.run(&format!("{}/", base)).await.unwrap();

        assert_eq!(result.links, vec![format!("{}/app.js", base)]);
    }
}
