//! Load scenarios driving the strategies from many concurrent workers.
//!
//! The store and cache are shared across workers without external
//! locking; these tests check that no interleaving corrupts the store,
//! not that the cache stays fresh (staleness under keyed invalidation is
//! policy, see the keyed suite).

use roster_service::{
    BulkInvalidateService, KeyedInvalidateService, LoadHarness, TransactionalService, UserService,
    WorkerConfig,
};
use roster_storage::{CacheBackend, CacheKey, MemoryCacheBackend, UserCache};
use roster_test_utils::*;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

struct Shared {
    store: Arc<MemoryUserStore>,
    backend: Arc<MemoryCacheBackend>,
    bulk: Arc<BulkInvalidateService>,
    keyed: Arc<KeyedInvalidateService>,
    transactional: Arc<TransactionalService>,
}

fn shared() -> Shared {
    let store = Arc::new(MemoryUserStore::new());
    let backend = Arc::new(MemoryCacheBackend::new());
    let cache = UserCache::new(backend.clone(), CacheSettings::default());
    Shared {
        bulk: Arc::new(BulkInvalidateService::new(store.clone(), cache.clone())),
        keyed: Arc::new(KeyedInvalidateService::new(store.clone(), cache)),
        transactional: Arc::new(TransactionalService::new(store.clone())),
        store,
        backend,
    }
}

fn new_user() -> User {
    User::new("Terry", "Jerry", Gender::AttackHelicopter)
}

async fn seed(store: &MemoryUserStore, count: usize) {
    for _ in 0..count {
        store.save(Some(new_user())).await.unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn high_load_linear_scenario() {
    init_tracing();
    let s = shared();
    let number_of_users = 100;
    let number_of_cycles = 1000;

    let started = Instant::now();
    seed(&s.store, number_of_users).await;
    info!(
        users = number_of_users,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "seeded store"
    );
    assert_eq!(s.store.count().await.unwrap(), number_of_users as u64);

    // First list populates the collection entry.
    assert!(s.backend.get(&CacheKey::All).await.unwrap().is_none());
    s.bulk.list_users().await.unwrap();
    assert!(s.backend.get(&CacheKey::All).await.unwrap().is_some());

    let started = Instant::now();
    for _ in 0..number_of_cycles {
        let users = s.bulk.list_users().await.unwrap();
        assert_eq!(users.len(), number_of_users);
    }
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "cacheable service listing finished"
    );

    let started = Instant::now();
    for _ in 0..number_of_cycles {
        let users = s.transactional.list_users().await.unwrap();
        assert_eq!(users.len(), number_of_users);
    }
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "non-cacheable service listing finished"
    );

    // Cached and uncached views agree once no writes are in flight.
    assert_eq!(
        s.bulk.list_users().await.unwrap(),
        s.transactional.list_users().await.unwrap()
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn high_load_multithreaded_scenario() {
    init_tracing();
    let s = shared();
    let number_of_users = 100;
    let number_of_threads = 11;
    let number_of_cycles = 1000;
    let save_probability = 0.01;

    seed(&s.store, number_of_users).await;
    s.bulk.list_users().await.unwrap();

    let mut harness = LoadHarness::new(number_of_threads);

    // Listing workers alternate between the cacheable and the
    // passthrough strategy.
    for i in 0..number_of_threads - 1 {
        if i % 2 == 0 {
            let svc = Arc::clone(&s.bulk);
            harness.spawn(
                format!("list-cacheable-{}", i),
                WorkerConfig::every_cycle(number_of_cycles),
                move || {
                    let svc = Arc::clone(&svc);
                    async move { svc.list_users().await.map(|_| ()) }
                },
            );
        } else {
            let svc = Arc::clone(&s.transactional);
            harness.spawn(
                format!("list-passthrough-{}", i),
                WorkerConfig::every_cycle(number_of_cycles),
                move || {
                    let svc = Arc::clone(&svc);
                    async move { svc.list_users().await.map(|_| ()) }
                },
            );
        }
    }

    // One writer occasionally saves through the keyed strategy and
    // forces a list reload, the way a background refresher would.
    let keyed = Arc::clone(&s.keyed);
    harness.spawn(
        "save-user",
        WorkerConfig {
            cycles: number_of_cycles,
            probability: save_probability,
        },
        move || {
            let keyed = Arc::clone(&keyed);
            async move {
                keyed.save_user(Some(new_user())).await?;
                keyed.reload_users().await
            }
        },
    );

    let (reports, summary) = harness.wait().await;
    info!(
        total_operations = summary.total_operations,
        wall_ms = summary.wall_time.as_millis() as u64,
        "multithreaded scenario finished"
    );

    assert_eq!(reports.len(), number_of_threads);
    assert_eq!(summary.total_failures, 0);

    let saves: u64 = reports
        .iter()
        .filter(|r| r.name == "save-user")
        .map(|r| r.operations)
        .sum();
    assert_eq!(
        s.store.count().await.unwrap(),
        number_of_users as u64 + saves
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn interleaved_writes_preserve_store_cardinality() {
    init_tracing();
    let s = shared();
    let seeded: i64 = 50;

    seed(&s.store, seeded as usize).await;

    let mut harness = LoadHarness::new(6);

    // Three savers through the keyed strategy.
    for i in 0..3 {
        let keyed = Arc::clone(&s.keyed);
        harness.spawn(
            format!("saver-{}", i),
            WorkerConfig::every_cycle(30),
            move || {
                let keyed = Arc::clone(&keyed);
                async move { keyed.save_user(Some(new_user())).await.map(|_| ()) }
            },
        );
    }

    // One deleter walks the seeded ids exactly once each through the
    // bulk strategy; every delete hits an existing record.
    let next_victim = Arc::new(AtomicI64::new(1));
    let bulk = Arc::clone(&s.bulk);
    harness.spawn(
        "deleter",
        WorkerConfig::every_cycle(seeded as u32),
        move || {
            let bulk = Arc::clone(&bulk);
            let next_victim = Arc::clone(&next_victim);
            async move {
                let id = next_victim.fetch_add(1, Ordering::SeqCst);
                bulk.delete_user(Some(id)).await
            }
        },
    );

    // Two listers churn both cached and uncached views throughout.
    let bulk = Arc::clone(&s.bulk);
    harness.spawn("lister-cached", WorkerConfig::every_cycle(40), move || {
        let bulk = Arc::clone(&bulk);
        async move { bulk.list_users().await.map(|_| ()) }
    });
    let transactional = Arc::clone(&s.transactional);
    harness.spawn(
        "lister-passthrough",
        WorkerConfig::every_cycle(40),
        move || {
            let transactional = Arc::clone(&transactional);
            async move { transactional.list_users().await.map(|_| ()) }
        },
    );

    let (reports, summary) = harness.wait().await;
    assert_eq!(summary.total_failures, 0);

    // Conservation: every seeded record was deleted exactly once, so the
    // final count is exactly the number of successful saves.
    let saves: u64 = reports
        .iter()
        .filter(|r| r.name.starts_with("saver-"))
        .map(|r| r.operations)
        .sum();
    assert_eq!(saves, 90);
    assert_eq!(s.store.count().await.unwrap(), saves);
}
