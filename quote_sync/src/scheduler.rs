//! Repeating fetch-then-merge timer.
//!
//! `SyncScheduler` runs a background thread that waits on a crossbeam `tick`
//! channel. Every tick spawns its own worker thread running [`run_tick`]; the
//! scheduler never waits for a worker, so slow fetches from consecutive ticks can
//! overlap and their merges reach the shared store in completion order.
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, select, tick};
use log::{debug, error, info};
use quote_common::notify::Notifier;
use quote_common::store::MergeReport;
use quote_common::{QuoteStore, Result};

use crate::receiver::RemoteSource;

/// One sync tick: fetch without holding the store, then merge under the lock.
///
/// A fetch returning nothing leaves the store untouched.
pub fn run_tick(
    store: &Mutex<QuoteStore>,
    source: &dyn RemoteSource,
    notifier: &dyn Notifier,
) -> Result<MergeReport> {
    let remote = source.fetch_quotes();
    if remote.is_empty() {
        debug!("No remote quotes this tick");
        return Ok(MergeReport::default());
    }
    info!("New quotes fetched from server: {}", remote.len());
    let mut store = store.lock()?;
    store.merge(remote, notifier)
}

/// Background timer driving sync ticks.
pub struct SyncScheduler;

impl SyncScheduler {
    /// Start the timer thread; it stops once `shutdown_rx` yields or disconnects.
    ///
    /// Workers already running when shutdown arrives are not cancelled.
    pub fn start(
        store: Arc<Mutex<QuoteStore>>,
        source: Arc<dyn RemoteSource>,
        notifier: Arc<dyn Notifier>,
        interval: Duration,
        shutdown_rx: Receiver<()>,
    ) -> JoinHandle<()> {
        thread::spawn(move || {
            let ticker = tick(interval);
            info!("Sync scheduler started, interval {:?}", interval);

            loop {
                select! {
                    recv(shutdown_rx) -> _ => break,
                    recv(ticker) -> _ => {
                        let store = Arc::clone(&store);
                        let source = Arc::clone(&source);
                        let notifier = Arc::clone(&notifier);
                        thread::spawn(move || {
                            if let Err(e) = run_tick(&store, source.as_ref(), notifier.as_ref()) {
                                error!("Sync tick failed: {}", e);
                            }
                        });
                    },
                }
            }
            info!("Sync scheduler stopping...");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use quote_common::Quote;
    use quote_common::net::QUOTES_KEY;
    use quote_common::notify::{ChannelNotifier, NotificationKind};
    use quote_common::storage::{KeyValueStore, MemoryStorage};
    use std::sync::Barrier;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedSource(Vec<Quote>);

    impl RemoteSource for FixedSource {
        fn fetch_quotes(&self) -> Vec<Quote> {
            self.0.clone()
        }
    }

    /// The first two fetches only return once both are in flight.
    struct OverlappingSource {
        calls: AtomicUsize,
        barrier: Barrier,
    }

    impl RemoteSource for OverlappingSource {
        fn fetch_quotes(&self) -> Vec<Quote> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call >= 2 {
                return Vec::new();
            }
            self.barrier.wait();
            vec![Quote::new(format!("Remote quote {}", call), "Remote")]
        }
    }

    fn shared_store() -> (Arc<dyn KeyValueStore>, Arc<Mutex<QuoteStore>>) {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStorage::new());
        let store = Arc::new(Mutex::new(QuoteStore::load(Arc::clone(&storage))));
        (storage, store)
    }

    #[test]
    fn tick_merges_and_persists() {
        let (storage, store) = shared_store();
        let (tx, rx) = unbounded();
        let source = FixedSource(vec![
            Quote::new("Get busy living or get busy dying.", "Changed"),
            Quote::new("Fresh from the server", "Remote"),
        ]);

        let report = run_tick(&store, &source, &ChannelNotifier::new(tx)).unwrap();

        assert_eq!(report.conflicts, 1);
        assert_eq!(report.added, 1);
        let kinds: Vec<_> = rx.try_iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NotificationKind::Conflict, NotificationKind::Added]);
        assert_eq!(QuoteStore::load(storage).len(), 6);
    }

    #[test]
    fn empty_fetch_skips_merge() {
        let (storage, store) = shared_store();
        let (tx, rx) = unbounded();

        let report = run_tick(&store, &FixedSource(Vec::new()), &ChannelNotifier::new(tx)).unwrap();

        assert_eq!(report, MergeReport::default());
        assert!(rx.try_recv().is_err());
        assert_eq!(storage.get_item(QUOTES_KEY).unwrap(), None);
    }

    #[test]
    fn ticks_overlap_instead_of_queueing() {
        let (_storage, store) = shared_store();
        let (tx, rx) = unbounded();
        let (shutdown_tx, shutdown_rx) = unbounded();
        let source = Arc::new(OverlappingSource {
            calls: AtomicUsize::new(0),
            barrier: Barrier::new(2),
        });

        let handle = SyncScheduler::start(
            Arc::clone(&store),
            source,
            Arc::new(ChannelNotifier::new(tx)),
            Duration::from_millis(20),
            shutdown_rx,
        );

        let timeout = Duration::from_secs(5);
        let mut added: Vec<String> = (0..2)
            .map(|_| rx.recv_timeout(timeout).unwrap().message)
            .collect();
        added.sort();
        assert_eq!(
            added,
            vec![
                "Added new quote: Remote quote 0",
                "Added new quote: Remote quote 1"
            ]
        );

        shutdown_tx.send(()).unwrap();
        handle.join().unwrap();
        assert_eq!(store.lock().unwrap().len(), 7);
    }
}
