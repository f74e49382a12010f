//! Selection mirroring use case
//!
//! Runs the classify -> read -> detect -> write pipeline for one selection
//! at a time. `MirrorState` is owned here and only touched from the single
//! dispatch path; notifier workers only enqueue selection identifiers.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout, timeout_at, Instant};

use crate::domain::classify::{classify, Category};
use crate::domain::fingerprint::Fingerprint;
use crate::domain::interval::Interval;
use crate::domain::mirror_state::{MirrorState, SelectionState};
use crate::domain::selection::{Selection, DEFAULT_SELECTIONS};

use super::ports::{ChangeNotifier, Clipboard, NotifierError, Reporter, SelectionSource};
use super::stop::StopSignal;

/// Errors that end the mirror loop
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("{0}")]
    NotifierFailed(#[from] NotifierError),
}

/// Configuration for the mirror loop
#[derive(Debug, Clone)]
pub struct MirrorConfig {
    /// Selections to mirror, fixed for the lifetime of the loop
    pub selections: Vec<Selection>,
    /// Poll period, queue wait timeout and worker join bound
    pub interval: Interval,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            selections: DEFAULT_SELECTIONS.to_vec(),
            interval: Interval::default(),
        }
    }
}

/// What one pipeline run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No usable targets advertised
    Empty,
    /// Targets classified but the payload could not be read
    Unreadable,
    /// Content already seen on this selection or already in the destination
    Unchanged,
    /// Destination clipboard updated
    Written {
        category: Category,
        canonical_type: String,
        bytes: usize,
    },
    /// Destination write failed; retried on the next change
    WriteFailed,
}

/// Mirror use case
pub struct MirrorUseCase<S, C, R>
where
    S: SelectionSource,
    C: Clipboard,
    R: Reporter + 'static,
{
    source: S,
    clipboard: C,
    reporter: Arc<R>,
    state: MirrorState,
    config: MirrorConfig,
}

impl<S, C, R> MirrorUseCase<S, C, R>
where
    S: SelectionSource,
    C: Clipboard,
    R: Reporter + 'static,
{
    /// Create a new mirror use case instance
    pub fn new(source: S, clipboard: C, reporter: R, config: MirrorConfig) -> Self {
        Self {
            source,
            clipboard,
            reporter: Arc::new(reporter),
            state: MirrorState::new(),
            config,
        }
    }

    /// Get the observed state of one selection
    pub fn selection_state(&self, selection: Selection) -> SelectionState {
        self.state.state(selection)
    }

    /// Last fingerprint written to the destination
    pub fn last_written(&self) -> Option<&Fingerprint> {
        self.state.last_written()
    }

    fn watches(&self, selection: Selection) -> bool {
        self.config.selections.contains(&selection)
    }

    /// Run the full pipeline for one selection.
    ///
    /// Never fails: query and read errors count as "nothing to do this
    /// cycle", write errors leave the state untouched so the next change
    /// retries.
    pub async fn sync_selection(&mut self, selection: Selection) -> SyncOutcome {
        let targets = match self.source.query_targets(selection).await {
            Ok(targets) => targets,
            Err(e) => {
                self.reporter
                    .debug(&format!("failed to query TARGETS for {}: {}", selection, e));
                Vec::new()
            }
        };

        let Some(classified) = classify(&targets) else {
            if self.state.mark_empty(selection) {
                self.reporter
                    .debug(&format!("{} selection empty; waiting", selection));
            }
            return SyncOutcome::Empty;
        };

        let payload = match self
            .source
            .read_target(selection, classified.source_type())
            .await
        {
            Ok(payload) => payload,
            Err(e) => {
                self.reporter.debug(&format!(
                    "failed to read target {} for {}: {}",
                    classified.source_type(),
                    selection,
                    e
                ));
                return SyncOutcome::Unreadable;
            }
        };

        let fingerprint = Fingerprint::compute(classified.canonical_type(), &payload);
        if self.state.is_redundant(selection, &fingerprint) {
            self.state.record_seen(selection, fingerprint);
            return SyncOutcome::Unchanged;
        }

        if let Err(e) = self
            .clipboard
            .copy(&payload, classified.canonical_type())
            .await
        {
            self.reporter.info(&format!("wl-copy failed: {}", e));
            return SyncOutcome::WriteFailed;
        }

        self.state.record_written(selection, fingerprint);
        self.reporter.info(&format!(
            "Wayland clipboard updated from {} ({}) via '{}' ({} bytes)",
            selection,
            classified.category(),
            classified.canonical_type(),
            payload.len()
        ));
        self.reporter.debug(&format!(
            "{} fingerprint {} from target '{}'",
            selection,
            fingerprint.short(),
            classified.source_type()
        ));

        SyncOutcome::Written {
            category: classified.category(),
            canonical_type: classified.canonical_type().to_string(),
            bytes: payload.len(),
        }
    }

    /// Polling discipline: sync every selection, wait one interval, repeat
    /// until `stop` is set.
    pub async fn run_polling(&mut self, stop: &StopSignal) -> Result<(), MirrorError> {
        let selections = self.config.selections.clone();
        let interval = self.config.interval.as_std();

        while !stop.is_stopped() {
            for &selection in &selections {
                if stop.is_stopped() {
                    break;
                }
                self.sync_selection(selection).await;
            }

            tokio::select! {
                _ = stop.stopped() => break,
                _ = sleep(interval) => {}
            }
        }

        Ok(())
    }

    /// Event-driven discipline: one notifier worker per selection feeds a
    /// shared queue drained here, one selection per event.
    ///
    /// A worker dying on its own sets `stop` and is reported as an error
    /// once the loop has drained.
    pub async fn run_events<N: ChangeNotifier>(
        &mut self,
        notifier: N,
        stop: &StopSignal,
    ) -> Result<(), MirrorError> {
        let shutdown_bound = self
            .config
            .interval
            .as_std()
            .max(notifier.shutdown_timeout());
        let notifier = Arc::new(notifier);
        let (events, mut queue) = mpsc::unbounded_channel();

        let workers: Vec<JoinHandle<Result<(), NotifierError>>> = self
            .config
            .selections
            .iter()
            .map(|&selection| {
                let notifier = Arc::clone(&notifier);
                let reporter = Arc::clone(&self.reporter);
                let events = events.clone();
                let stop = stop.clone();
                tokio::spawn(async move {
                    // Initial sync before the first change notification
                    let _ = events.send(selection);
                    let result = notifier.watch(selection, &events, &stop).await;
                    if let Err(e) = &result {
                        if !stop.is_stopped() {
                            reporter.info(&e.to_string());
                        }
                        stop.stop();
                    }
                    result
                })
            })
            .collect();
        drop(events);

        let interval = self.config.interval.as_std();
        loop {
            tokio::select! {
                biased;
                _ = stop.stopped() => break,
                received = timeout(interval, queue.recv()) => match received {
                    Ok(Some(selection)) => {
                        if self.watches(selection) {
                            self.sync_selection(selection).await;
                        }
                    }
                    Ok(None) => break,
                    Err(_) => continue,
                },
            }
        }
        stop.stop();

        // Workers tear down in parallel; one deadline covers all of them
        let deadline = Instant::now() + shutdown_bound;
        let mut failure = None;
        for mut worker in workers {
            match timeout_at(deadline, &mut worker).await {
                Ok(Ok(Err(e))) => {
                    failure.get_or_insert(e);
                }
                Ok(_) => {}
                Err(_) => {
                    self.reporter.debug("notifier worker did not exit in time");
                    worker.abort();
                }
            }
        }

        match failure {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{ClipboardError, NotifierError, SelectionError, SelectionEvents};
    use crate::domain::classify::DEFAULT_TEXT_MIME;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct MockSource {
        content: Mutex<HashMap<Selection, (Vec<String>, Vec<u8>)>>,
        fail_reads: bool,
    }

    impl MockSource {
        fn set(&self, selection: Selection, targets: &[&str], payload: &[u8]) {
            self.content.lock().unwrap().insert(
                selection,
                (
                    targets.iter().map(|t| t.to_string()).collect(),
                    payload.to_vec(),
                ),
            );
        }
    }

    #[async_trait]
    impl SelectionSource for Arc<MockSource> {
        async fn query_targets(&self, selection: Selection) -> Result<Vec<String>, SelectionError> {
            Ok(self
                .content
                .lock()
                .unwrap()
                .get(&selection)
                .map(|(targets, _)| targets.clone())
                .unwrap_or_default())
        }

        async fn read_target(
            &self,
            selection: Selection,
            _target: &str,
        ) -> Result<Vec<u8>, SelectionError> {
            if self.fail_reads {
                return Err(SelectionError::ReadFailed("owner vanished".to_string()));
            }
            self.content
                .lock()
                .unwrap()
                .get(&selection)
                .map(|(_, payload)| payload.clone())
                .ok_or_else(|| SelectionError::ReadFailed("no owner".to_string()))
        }
    }

    #[derive(Default)]
    struct MockClipboard {
        writes: Mutex<Vec<(Vec<u8>, String)>>,
        fail: std::sync::atomic::AtomicBool,
    }

    impl MockClipboard {
        fn writes(&self) -> Vec<(Vec<u8>, String)> {
            self.writes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Clipboard for Arc<MockClipboard> {
        async fn copy(&self, data: &[u8], mime_type: &str) -> Result<(), ClipboardError> {
            if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
                return Err(ClipboardError::CopyFailed("compositor gone".to_string()));
            }
            self.writes
                .lock()
                .unwrap()
                .push((data.to_vec(), mime_type.to_string()));
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockReporter {
        lines: Mutex<Vec<String>>,
    }

    impl Reporter for Arc<MockReporter> {
        fn info(&self, message: &str) {
            self.lines.lock().unwrap().push(message.to_string());
        }

        fn debug(&self, message: &str) {
            self.lines.lock().unwrap().push(format!("[debug] {}", message));
        }
    }

    struct Fixture {
        source: Arc<MockSource>,
        clipboard: Arc<MockClipboard>,
        reporter: Arc<MockReporter>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                source: Arc::new(MockSource::default()),
                clipboard: Arc::new(MockClipboard::default()),
                reporter: Arc::new(MockReporter::default()),
            }
        }

        fn use_case(
            &self,
            config: MirrorConfig,
        ) -> MirrorUseCase<Arc<MockSource>, Arc<MockClipboard>, Arc<MockReporter>> {
            MirrorUseCase::new(
                Arc::clone(&self.source),
                Arc::clone(&self.clipboard),
                Arc::clone(&self.reporter),
                config,
            )
        }
    }

    #[tokio::test]
    async fn writes_text_once_with_canonical_type() {
        let fx = Fixture::new();
        fx.source.set(Selection::Clipboard, &["UTF8_STRING"], b"hello");
        let mut mirror = fx.use_case(MirrorConfig::default());

        let outcome = mirror.sync_selection(Selection::Clipboard).await;
        assert_eq!(
            outcome,
            SyncOutcome::Written {
                category: Category::Text,
                canonical_type: DEFAULT_TEXT_MIME.to_string(),
                bytes: 5,
            }
        );
        assert_eq!(mirror.sync_selection(Selection::Clipboard).await, SyncOutcome::Unchanged);
        assert_eq!(
            fx.clipboard.writes(),
            vec![(b"hello".to_vec(), DEFAULT_TEXT_MIME.to_string())]
        );
    }

    #[tokio::test]
    async fn same_content_on_other_selection_is_not_rewritten() {
        let fx = Fixture::new();
        fx.source.set(Selection::Clipboard, &["UTF8_STRING"], b"shared");
        fx.source.set(Selection::Primary, &["UTF8_STRING"], b"shared");
        let mut mirror = fx.use_case(MirrorConfig::default());

        mirror.sync_selection(Selection::Clipboard).await;
        let outcome = mirror.sync_selection(Selection::Primary).await;

        assert_eq!(outcome, SyncOutcome::Unchanged);
        assert_eq!(fx.clipboard.writes().len(), 1);
        assert!(matches!(
            mirror.selection_state(Selection::Primary),
            SelectionState::Populated(_)
        ));
    }

    #[tokio::test]
    async fn changed_content_is_written_again() {
        let fx = Fixture::new();
        fx.source.set(Selection::Clipboard, &["UTF8_STRING"], b"one");
        let mut mirror = fx.use_case(MirrorConfig::default());
        mirror.sync_selection(Selection::Clipboard).await;

        fx.source.set(Selection::Clipboard, &["UTF8_STRING"], b"two");
        mirror.sync_selection(Selection::Clipboard).await;

        let writes = fx.clipboard.writes();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[1].0, b"two".to_vec());
    }

    #[tokio::test]
    async fn empty_selection_is_reported_once() {
        let fx = Fixture::new();
        fx.source.set(Selection::Primary, &["TARGETS", "TIMESTAMP"], b"");
        let mut mirror = fx.use_case(MirrorConfig::default());

        assert_eq!(mirror.sync_selection(Selection::Primary).await, SyncOutcome::Empty);
        assert_eq!(mirror.sync_selection(Selection::Primary).await, SyncOutcome::Empty);

        let lines = fx.reporter.lines.lock().unwrap().clone();
        let empties = lines.iter().filter(|l| l.contains("selection empty")).count();
        assert_eq!(empties, 1);
        assert_eq!(mirror.selection_state(Selection::Primary), SelectionState::Empty);
        assert!(fx.clipboard.writes().is_empty());
    }

    #[tokio::test]
    async fn content_after_empty_is_written() {
        let fx = Fixture::new();
        fx.source.set(Selection::Clipboard, &["UTF8_STRING"], b"first");
        let mut mirror = fx.use_case(MirrorConfig::default());
        mirror.sync_selection(Selection::Clipboard).await;

        fx.source.set(Selection::Clipboard, &[], b"");
        assert_eq!(mirror.sync_selection(Selection::Clipboard).await, SyncOutcome::Empty);

        fx.source.set(Selection::Clipboard, &["UTF8_STRING"], b"second");
        assert!(matches!(
            mirror.sync_selection(Selection::Clipboard).await,
            SyncOutcome::Written { .. }
        ));
        assert_eq!(fx.clipboard.writes().len(), 2);
    }

    #[tokio::test]
    async fn same_content_after_empty_is_written_again() {
        let fx = Fixture::new();
        fx.source.set(Selection::Clipboard, &["UTF8_STRING"], b"again");
        let mut mirror = fx.use_case(MirrorConfig::default());
        mirror.sync_selection(Selection::Clipboard).await;

        fx.source.set(Selection::Clipboard, &[], b"");
        mirror.sync_selection(Selection::Clipboard).await;

        fx.source.set(Selection::Clipboard, &["UTF8_STRING"], b"again");
        mirror.sync_selection(Selection::Clipboard).await;
        assert_eq!(fx.clipboard.writes().len(), 2);
    }

    #[tokio::test]
    async fn read_failure_is_not_a_change() {
        let fx = Fixture {
            source: Arc::new(MockSource {
                fail_reads: true,
                ..Default::default()
            }),
            clipboard: Arc::new(MockClipboard::default()),
            reporter: Arc::new(MockReporter::default()),
        };
        fx.source.set(Selection::Clipboard, &["image/png"], b"\x89PNG");
        let mut mirror = fx.use_case(MirrorConfig::default());

        assert_eq!(
            mirror.sync_selection(Selection::Clipboard).await,
            SyncOutcome::Unreadable
        );
        assert!(fx.clipboard.writes().is_empty());
        assert_eq!(mirror.selection_state(Selection::Clipboard), SelectionState::Unknown);
    }

    #[tokio::test]
    async fn failed_write_is_retried() {
        let fx = Fixture::new();
        fx.source.set(Selection::Clipboard, &["image/png"], b"\x89PNG");
        let mut mirror = fx.use_case(MirrorConfig::default());

        fx.clipboard.fail.store(true, std::sync::atomic::Ordering::SeqCst);
        assert_eq!(
            mirror.sync_selection(Selection::Clipboard).await,
            SyncOutcome::WriteFailed
        );
        assert!(mirror.last_written().is_none());

        fx.clipboard.fail.store(false, std::sync::atomic::Ordering::SeqCst);
        assert!(matches!(
            mirror.sync_selection(Selection::Clipboard).await,
            SyncOutcome::Written { category: Category::Image, .. }
        ));
    }

    #[tokio::test]
    async fn binary_fallback_uses_octet_stream() {
        let fx = Fixture::new();
        fx.source.set(
            Selection::Clipboard,
            &["application/x-custom", "application/x-other"],
            b"\x00\x01",
        );
        let mut mirror = fx.use_case(MirrorConfig::default());
        mirror.sync_selection(Selection::Clipboard).await;

        assert_eq!(
            fx.clipboard.writes(),
            vec![(b"\x00\x01".to_vec(), "application/octet-stream".to_string())]
        );
    }

    #[tokio::test]
    async fn polling_stops_when_signalled() {
        let fx = Fixture::new();
        fx.source.set(Selection::Clipboard, &["UTF8_STRING"], b"hello");
        let mut mirror = fx.use_case(MirrorConfig {
            selections: vec![Selection::Clipboard],
            interval: Interval::from_millis(10).unwrap(),
        });
        let stop = StopSignal::new();

        let stopper = {
            let stop = stop.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(60)).await;
                stop.stop();
            })
        };

        tokio::time::timeout(Duration::from_secs(2), mirror.run_polling(&stop))
            .await
            .expect("polling should exit after stop")
            .unwrap();
        stopper.await.unwrap();

        // Several passes, one write
        assert_eq!(fx.clipboard.writes().len(), 1);
    }

    /// Emits `changes` events then waits for stop, or fails if `die` is set
    struct MockNotifier {
        changes: usize,
        die: bool,
    }

    #[async_trait]
    impl ChangeNotifier for MockNotifier {
        async fn watch(
            &self,
            selection: Selection,
            events: &SelectionEvents,
            stop: &StopSignal,
        ) -> Result<(), NotifierError> {
            for _ in 0..self.changes {
                let _ = events.send(selection);
            }
            if self.die {
                return Err(NotifierError::Exited {
                    selection,
                    detail: "no details".to_string(),
                });
            }
            stop.stopped().await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn events_dispatch_each_selection_and_suppress_repeats() {
        let fx = Fixture::new();
        fx.source.set(Selection::Clipboard, &["UTF8_STRING"], b"hello");
        fx.source.set(Selection::Primary, &["text/plain"], b"world");
        let mut mirror = fx.use_case(MirrorConfig {
            selections: vec![Selection::Clipboard, Selection::Primary],
            interval: Interval::from_millis(20).unwrap(),
        });
        let stop = StopSignal::new();

        let stopper = {
            let stop = stop.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(150)).await;
                stop.stop();
            })
        };

        let result = tokio::time::timeout(
            Duration::from_secs(2),
            mirror.run_events(MockNotifier { changes: 3, die: false }, &stop),
        )
        .await
        .expect("event loop should exit after stop");
        stopper.await.unwrap();

        assert!(result.is_ok());
        let writes = fx.clipboard.writes();
        assert_eq!(writes.len(), 2);
        assert!(writes.contains(&(b"hello".to_vec(), DEFAULT_TEXT_MIME.to_string())));
        assert!(writes.contains(&(b"world".to_vec(), "text/plain".to_string())));
    }

    #[tokio::test]
    async fn dead_notifier_stops_the_loop() {
        let fx = Fixture::new();
        let mut mirror = fx.use_case(MirrorConfig {
            selections: vec![Selection::Clipboard],
            interval: Interval::from_millis(20).unwrap(),
        });
        let stop = StopSignal::new();

        let result = tokio::time::timeout(
            Duration::from_secs(2),
            mirror.run_events(MockNotifier { changes: 0, die: true }, &stop),
        )
        .await
        .expect("event loop should exit when a notifier dies");

        assert!(matches!(
            result,
            Err(MirrorError::NotifierFailed(NotifierError::Exited { .. }))
        ));
        assert!(stop.is_stopped());
        let lines = fx.reporter.lines.lock().unwrap().clone();
        assert!(lines.iter().any(|l| l.contains("exited unexpectedly")));
    }

    /// Takes `teardown` to return after stop, and says so
    struct SlowNotifier {
        teardown: Duration,
        finished: Arc<std::sync::atomic::AtomicUsize>,
    }

    #[async_trait]
    impl ChangeNotifier for SlowNotifier {
        async fn watch(
            &self,
            _selection: Selection,
            _events: &SelectionEvents,
            stop: &StopSignal,
        ) -> Result<(), NotifierError> {
            stop.stopped().await;
            tokio::time::sleep(self.teardown).await;
            self.finished
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(())
        }

        fn shutdown_timeout(&self) -> Duration {
            self.teardown * 3
        }
    }

    #[tokio::test]
    async fn workers_get_their_shutdown_timeout_past_the_interval() {
        let fx = Fixture::new();
        let mut mirror = fx.use_case(MirrorConfig {
            selections: vec![Selection::Clipboard, Selection::Primary],
            interval: Interval::from_millis(20).unwrap(),
        });
        let finished = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let notifier = SlowNotifier {
            teardown: Duration::from_millis(100),
            finished: Arc::clone(&finished),
        };
        let stop = StopSignal::new();

        let stopper = {
            let stop = stop.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                stop.stop();
            })
        };
        let result = mirror.run_events(notifier, &stop).await;
        stopper.await.unwrap();

        assert!(result.is_ok());
        assert_eq!(finished.load(std::sync::atomic::Ordering::SeqCst), 2);
        let lines = fx.reporter.lines.lock().unwrap().clone();
        assert!(!lines.iter().any(|l| l.contains("did not exit in time")));
    }
}
