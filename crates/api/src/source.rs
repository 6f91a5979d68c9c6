//! Ledger data sources.
//!
//! Persistence is owned by an external collaborator; the API only needs read
//! access to one user's expenses, income and budgets. [`InMemoryLedger`] is
//! the bundled implementation, filled from a JSON seed file or by hand.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use spendwise_core::{Budget, LedgerSnapshot, Transaction};
use spendwise_shared::{AppError, AppResult, types::UserId};
use tokio::sync::RwLock;
use tracing::info;

/// Read access to per-user ledgers.
#[async_trait]
pub trait LedgerSource: Send + Sync {
    /// Returns the user's expense records.
    async fn expenses(&self, user: UserId) -> AppResult<Vec<Transaction>>;

    /// Returns the user's income records.
    async fn income(&self, user: UserId) -> AppResult<Vec<Transaction>>;

    /// Returns the user's declared budgets.
    async fn budgets(&self, user: UserId) -> AppResult<Vec<Budget>>;
}

/// Seed file layout: `{ "users": [ { "userId": ..., "expenses": [...], ... } ] }`.
#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    users: Vec<SeedUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedUser {
    user_id: UserId,
    #[serde(flatten)]
    ledger: LedgerSnapshot,
}

/// Ledgers held in memory behind an async lock.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    users: RwLock<HashMap<UserId, LedgerSnapshot>>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON seed document.
    ///
    /// Every amount must be non-negative and each user may declare at most one
    /// budget per period kind; the whole seed is rejected otherwise.
    pub fn from_seed_json(json: &str) -> AppResult<Self> {
        let seed: SeedFile = serde_json::from_str(json)
            .map_err(|e| AppError::Config(format!("Invalid seed file: {e}")))?;

        let mut users: HashMap<UserId, LedgerSnapshot> = HashMap::new();
        for user in seed.users {
            for tx in user.ledger.expenses.iter().chain(&user.ledger.income) {
                tx.validate()?;
            }
            for budget in &user.ledger.budgets {
                budget.validate()?;
            }
            let entry = users.entry(user.user_id).or_default();
            entry.expenses.extend(user.ledger.expenses);
            entry.income.extend(user.ledger.income);
            entry.budgets.extend(user.ledger.budgets);

            let mut kinds = HashSet::new();
            if let Some(dup) = entry.budgets.iter().find(|b| !kinds.insert(b.period_kind)) {
                return Err(AppError::Validation(format!(
                    "Duplicate {} budget for user {}",
                    dup.period_kind, user.user_id
                )));
            }
        }

        Ok(Self {
            users: RwLock::new(users),
        })
    }

    /// Reads and parses a JSON seed file.
    pub async fn from_seed_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::Config(format!("Cannot read seed file {}: {e}", path.display())))?;
        let ledger = Self::from_seed_json(&json)?;
        info!(
            path = %path.display(),
            users = ledger.users.read().await.len(),
            "Loaded ledger seed"
        );
        Ok(ledger)
    }

    /// Registers a user with an empty ledger.
    pub async fn insert_user(&self, user: UserId) {
        self.users.write().await.entry(user).or_default();
    }

    /// Adds an expense record.
    pub async fn insert_expense(&self, user: UserId, tx: Transaction) -> AppResult<()> {
        tx.validate()?;
        self.users.write().await.entry(user).or_default().expenses.push(tx);
        Ok(())
    }

    /// Adds an income record.
    pub async fn insert_income(&self, user: UserId, tx: Transaction) -> AppResult<()> {
        tx.validate()?;
        self.users.write().await.entry(user).or_default().income.push(tx);
        Ok(())
    }

    /// Declares a budget, replacing any existing one of the same period kind.
    pub async fn insert_budget(&self, user: UserId, budget: Budget) -> AppResult<()> {
        budget.validate()?;
        let mut users = self.users.write().await;
        let budgets = &mut users.entry(user).or_default().budgets;
        match budgets.iter_mut().find(|b| b.period_kind == budget.period_kind) {
            Some(existing) => *existing = budget,
            None => budgets.push(budget),
        }
        Ok(())
    }

    async fn read<T>(&self, user: UserId, pick: impl FnOnce(&LedgerSnapshot) -> T) -> AppResult<T> {
        self.users
            .read()
            .await
            .get(&user)
            .map(pick)
            .ok_or_else(|| AppError::NotFound(format!("User {user}")))
    }
}

#[async_trait]
impl LedgerSource for InMemoryLedger {
    async fn expenses(&self, user: UserId) -> AppResult<Vec<Transaction>> {
        self.read(user, |ledger| ledger.expenses.clone()).await
    }

    async fn income(&self, user: UserId) -> AppResult<Vec<Transaction>> {
        self.read(user, |ledger| ledger.income.clone()).await
    }

    async fn budgets(&self, user: UserId) -> AppResult<Vec<Budget>> {
        self.read(user, |ledger| ledger.budgets.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use spendwise_core::PeriodKind;

    const SEED: &str = r#"{
        "users": [
            {
                "userId": "0190f0a8-9a4c-7cc1-9a0e-6d1f4d7e2b10",
                "expenses": [
                    { "amount": "12.50", "date": "2024-03-02T10:00:00Z", "categoryName": "Food" },
                    { "amount": "40", "date": "2024-03-05T18:30:00Z" }
                ],
                "income": [
                    { "amount": "2500.00", "date": "2024-03-01T09:00:00Z", "description": "Salary" }
                ],
                "budgets": [
                    { "periodKind": "monthly", "amount": "500" }
                ]
            }
        ]
    }"#;

    fn seeded_user() -> UserId {
        "0190f0a8-9a4c-7cc1-9a0e-6d1f4d7e2b10".parse().unwrap()
    }

    #[tokio::test]
    async fn test_seed_json_loads_all_records() {
        let ledger = InMemoryLedger::from_seed_json(SEED).unwrap();
        let user = seeded_user();

        let expenses = ledger.expenses(user).await.unwrap();
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].amount, dec!(12.50));
        assert_eq!(expenses[0].category_name.as_deref(), Some("Food"));
        assert_eq!(ledger.income(user).await.unwrap()[0].description, "Salary");
        assert_eq!(
            ledger.budgets(user).await.unwrap()[0].period_kind,
            PeriodKind::Monthly
        );
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let ledger = InMemoryLedger::new();
        let err = ledger.expenses(UserId::new()).await.unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_registered_user_has_empty_ledger() {
        let ledger = InMemoryLedger::new();
        let user = UserId::new();
        ledger.insert_user(user).await;

        assert!(ledger.expenses(user).await.unwrap().is_empty());
        assert!(ledger.budgets(user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_rejects_negative_amounts() {
        let ledger = InMemoryLedger::new();
        let user = UserId::new();
        let tx = Transaction::new(dec!(-1), Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());

        let err = ledger.insert_expense(user, tx).await.unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_seed_with_negative_amount_rejected() {
        let seed = SEED.replace("\"12.50\"", "\"-12.50\"");
        let err = InMemoryLedger::from_seed_json(&seed).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_insert_budget_replaces_same_kind() {
        let ledger = InMemoryLedger::new();
        let user = UserId::new();
        ledger
            .insert_budget(user, Budget::new(PeriodKind::Monthly, dec!(500)))
            .await
            .unwrap();
        ledger
            .insert_budget(user, Budget::new(PeriodKind::Weekly, dec!(100)))
            .await
            .unwrap();
        ledger
            .insert_budget(user, Budget::new(PeriodKind::Monthly, dec!(650)))
            .await
            .unwrap();

        let budgets = ledger.budgets(user).await.unwrap();
        assert_eq!(budgets.len(), 2);
        assert_eq!(budgets[0].period_kind, PeriodKind::Monthly);
        assert_eq!(budgets[0].amount, dec!(650));
        assert_eq!(budgets[1].period_kind, PeriodKind::Weekly);
    }

    #[test]
    fn test_seed_with_duplicate_budget_kind_rejected() {
        let seed = SEED.replace(
            r#"{ "periodKind": "monthly", "amount": "500" }"#,
            r#"{ "periodKind": "monthly", "amount": "500" },
                    { "periodKind": "month", "amount": "700" }"#,
        );
        let err = InMemoryLedger::from_seed_json(&seed).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_bundled_example_seed_parses() {
        let ledger =
            InMemoryLedger::from_seed_json(include_str!("../../../config/seed.example.json"))
                .unwrap();

        let expenses = ledger.expenses(seeded_user()).await.unwrap();
        assert_eq!(expenses.len(), 7);
        assert_eq!(ledger.budgets(seeded_user()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_seed_file_missing_is_config_error() {
        let err = InMemoryLedger::from_seed_file("does/not/exist.json")
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_malformed_seed_is_config_error() {
        let err = InMemoryLedger::from_seed_json("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}
