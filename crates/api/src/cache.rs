//! Per-user ledger snapshot cache using Moka.
//!
//! Analytics requests read a whole ledger at once, so the three source reads
//! are fetched together and kept for a short time. Writers call
//! [`SnapshotCache::refresh`] after changing a user's data.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use spendwise_core::LedgerSnapshot;
use spendwise_shared::config::CacheConfig;
use spendwise_shared::{AppResult, types::UserId};
use tracing::info;

use crate::source::LedgerSource;

/// Caller-owned cache of ledger snapshots keyed by user.
#[derive(Clone)]
pub struct SnapshotCache {
    source: Arc<dyn LedgerSource>,
    cache: Cache<UserId, Arc<LedgerSnapshot>>,
}

impl std::fmt::Debug for SnapshotCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotCache")
            .field("entries", &self.cache.entry_count())
            .finish_non_exhaustive()
    }
}

impl SnapshotCache {
    /// Creates a cache over `source` with the configured capacity and TTL.
    #[must_use]
    pub fn new(source: Arc<dyn LedgerSource>, config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.ttl_secs))
            .build();

        Self { source, cache }
    }

    /// Returns the user's snapshot, loading it from the source on a miss.
    ///
    /// Concurrent misses for the same user share one load.
    pub async fn snapshot(&self, user: UserId) -> AppResult<Arc<LedgerSnapshot>> {
        let source = Arc::clone(&self.source);
        self.cache
            .try_get_with(user, async move { load(source.as_ref(), user).await.map(Arc::new) })
            .await
            .map_err(|err| (*err).clone())
    }

    /// Drops the cached snapshot and loads a fresh one.
    pub async fn refresh(&self, user: UserId) -> AppResult<Arc<LedgerSnapshot>> {
        self.cache.invalidate(&user).await;
        info!(user_id = %user, "Refreshing ledger snapshot");
        self.snapshot(user).await
    }

    /// Drops every cached snapshot.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

async fn load(source: &dyn LedgerSource, user: UserId) -> AppResult<LedgerSnapshot> {
    let (expenses, income, budgets) = tokio::try_join!(
        source.expenses(user),
        source.income(user),
        source.budgets(user),
    )?;

    info!(
        user_id = %user,
        expenses = expenses.len(),
        income = income.len(),
        budgets = budgets.len(),
        "Loaded ledger snapshot"
    );

    Ok(LedgerSnapshot {
        expenses,
        income,
        budgets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use spendwise_core::{Budget, Transaction};
    use spendwise_shared::AppError;

    use crate::source::InMemoryLedger;

    /// Counts expense reads and delegates to an in-memory ledger.
    struct CountingSource {
        inner: InMemoryLedger,
        reads: AtomicUsize,
    }

    #[async_trait]
    impl LedgerSource for CountingSource {
        async fn expenses(&self, user: UserId) -> AppResult<Vec<Transaction>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.expenses(user).await
        }

        async fn income(&self, user: UserId) -> AppResult<Vec<Transaction>> {
            self.inner.income(user).await
        }

        async fn budgets(&self, user: UserId) -> AppResult<Vec<Budget>> {
            self.inner.budgets(user).await
        }
    }

    fn expense(amount: rust_decimal::Decimal) -> Transaction {
        Transaction::new(amount, Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap())
    }

    async fn counting_cache(user: UserId) -> (SnapshotCache, Arc<CountingSource>) {
        let inner = InMemoryLedger::new();
        inner.insert_expense(user, expense(dec!(10))).await.unwrap();
        let source = Arc::new(CountingSource {
            inner,
            reads: AtomicUsize::new(0),
        });
        let cache = SnapshotCache::new(source.clone(), &CacheConfig::default());
        (cache, source)
    }

    #[tokio::test]
    async fn test_snapshot_is_cached() {
        let user = UserId::new();
        let (cache, source) = counting_cache(user).await;

        let first = cache.snapshot(user).await.unwrap();
        let second = cache.snapshot(user).await.unwrap();

        assert_eq!(first.expenses.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refresh_reloads_from_source() {
        let user = UserId::new();
        let (cache, source) = counting_cache(user).await;

        cache.snapshot(user).await.unwrap();
        source.inner.insert_expense(user, expense(dec!(5))).await.unwrap();
        assert_eq!(cache.snapshot(user).await.unwrap().expenses.len(), 1);

        let refreshed = cache.refresh(user).await.unwrap();
        assert_eq!(refreshed.expenses.len(), 2);
        assert_eq!(source.reads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_all_forces_reload() {
        let user = UserId::new();
        let (cache, source) = counting_cache(user).await;

        cache.snapshot(user).await.unwrap();
        cache.invalidate_all();
        cache.snapshot(user).await.unwrap();

        assert_eq!(source.reads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_source_errors_are_not_cached() {
        let user = UserId::new();
        let (cache, source) = counting_cache(UserId::new()).await;

        let err = cache.snapshot(user).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        source.inner.insert_user(user).await;
        assert!(cache.snapshot(user).await.unwrap().expenses.is_empty());
    }
}
