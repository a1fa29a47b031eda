//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store`
//! trait.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use spato_ledger_core::{
    Account, AccountId, Balance, BalanceKind, LedgerTransaction, TransactionId,
};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// RocksDB-backed storage implementation.
///
/// All balance mutations go through `balance_lock`, so two concurrent
/// operations touching the same account cannot both read the same
/// pre-mutation value. Each mutation and its transaction record land in
/// one `WriteBatch`.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    balance_lock: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!("Ledger database opened");

        Ok(Self {
            db: Arc::new(db),
            balance_lock: Mutex::new(()),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Take the balance write lock.
    fn balance_guard(&self) -> Result<MutexGuard<'_, ()>> {
        self.balance_lock
            .lock()
            .map_err(|_| StoreError::Database("balance lock poisoned".into()))
    }

    /// Read a balance row without taking the lock.
    fn read_balance(&self, account_id: &AccountId) -> Result<Balance> {
        let cf = self.cf(cf::BALANCES)?;
        let key = keys::balance_key(account_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()?
            .ok_or_else(|| StoreError::NotFound {
                entity: "balance",
                id: account_id.to_string(),
            })
    }

    /// Check an idempotency key without taking the lock.
    fn read_request(&self, request_id: &str) -> Result<bool> {
        let cf = self.cf(cf::REQUESTS)?;
        let exists = self
            .db
            .get_cf(&cf, keys::request_key(request_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .is_some();
        Ok(exists)
    }

    /// Stage the by-account index entries for a transaction into `batch`.
    fn stage_index_entries(
        &self,
        batch: &mut WriteBatch,
        transaction: &LedgerTransaction,
    ) -> Result<()> {
        let cf_index = self.cf(cf::TRANSACTIONS_BY_ACCOUNT)?;
        let mut indexed: Vec<AccountId> = Vec::with_capacity(2);
        for account in [transaction.from_account, transaction.to_account]
            .into_iter()
            .flatten()
        {
            if !indexed.contains(&account) {
                batch.put_cf(
                    &cf_index,
                    keys::account_transaction_key(&account, &transaction.id),
                    [],
                );
                indexed.push(account);
            }
        }
        Ok(())
    }
}

impl Store for RocksStore {
    // =========================================================================
    // Account Operations
    // =========================================================================

    fn create_account(&self, account: &Account) -> Result<()> {
        let _guard = self.balance_guard()?;

        if self.get_account(&account.account_id)?.is_some() {
            return Err(StoreError::AlreadyExists {
                entity: "account",
                id: account.account_id.to_string(),
            });
        }

        let cf_accounts = self.cf(cf::ACCOUNTS)?;
        let cf_balances = self.cf(cf::BALANCES)?;

        let account_value = Self::serialize(account)?;
        let balance_value = Self::serialize(&Balance::zero())?;

        // Account and its zero balance appear together or not at all.
        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_accounts, keys::account_key(&account.account_id), account_value);
        batch.put_cf(&cf_balances, keys::balance_key(&account.account_id), balance_value);

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_account(&self, account_id: &AccountId) -> Result<Option<Account>> {
        let cf = self.cf(cf::ACCOUNTS)?;
        let key = keys::account_key(account_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    // =========================================================================
    // Balance Operations
    // =========================================================================

    fn get_balance(&self, account_id: &AccountId) -> Result<Balance> {
        self.read_balance(account_id)
    }

    fn adjust_balance(
        &self,
        account_id: &AccountId,
        delta_units: i64,
        kind: BalanceKind,
    ) -> Result<Balance> {
        let _guard = self.balance_guard()?;

        let mut balance = self.read_balance(account_id)?;
        let current = balance.get(kind);
        let updated = current
            .checked_add(delta_units)
            .ok_or_else(|| StoreError::Database("balance overflow".into()))?;

        if updated < 0 {
            return Err(StoreError::InsufficientFunds {
                available: current,
                required: delta_units.saturating_neg(),
            });
        }
        balance.set(kind, updated);

        let cf = self.cf(cf::BALANCES)?;
        let value = Self::serialize(&balance)?;
        self.db
            .put_cf(&cf, keys::balance_key(account_id), value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(balance)
    }

    // =========================================================================
    // Transaction Operations
    // =========================================================================

    fn put_transaction(&self, transaction: &LedgerTransaction) -> Result<()> {
        let cf_tx = self.cf(cf::TRANSACTIONS)?;

        let value = Self::serialize(transaction)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_tx, keys::transaction_key(&transaction.id), &value);
        self.stage_index_entries(&mut batch, transaction)?;

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_transaction(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<Option<LedgerTransaction>> {
        let cf = self.cf(cf::TRANSACTIONS)?;
        let key = keys::transaction_key(transaction_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn list_transactions_for_account(
        &self,
        account_id: &AccountId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<LedgerTransaction>> {
        let cf_index = self.cf(cf::TRANSACTIONS_BY_ACCOUNT)?;
        let prefix = keys::account_transactions_prefix(account_id);

        let iter = self.db.iterator_cf(
            &cf_index,
            IteratorMode::From(&prefix, rocksdb::Direction::Forward),
        );

        // ULID keys are time-ordered, so the prefix scan yields oldest
        // first; collect and reverse for newest-first.
        let mut all_keys: Vec<Vec<u8>> = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            all_keys.push(key.to_vec());
        }
        all_keys.reverse();

        let mut transactions = Vec::new();
        for key in all_keys.into_iter().skip(offset) {
            if transactions.len() >= limit {
                break;
            }

            let tx_id = keys::extract_transaction_id_from_index_key(&key);
            if let Some(tx) = self.get_transaction(&tx_id)? {
                transactions.push(tx);
            }
        }

        Ok(transactions)
    }

    // =========================================================================
    // Idempotency Operations
    // =========================================================================

    fn has_request(&self, request_id: &str) -> Result<bool> {
        self.read_request(request_id)
    }

    // =========================================================================
    // Compound Operations
    // =========================================================================

    fn apply_transfer(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount_units: i64,
        transaction: &LedgerTransaction,
        request_id: Option<&str>,
    ) -> Result<Balance> {
        if from == to {
            return Err(StoreError::Database(
                "transfer source and destination are the same account".into(),
            ));
        }

        let _guard = self.balance_guard()?;

        if let Some(request_id) = request_id {
            if self.read_request(request_id)? {
                return Err(StoreError::DuplicateRequest {
                    request_id: request_id.to_string(),
                });
            }
        }

        let mut from_balance = self.read_balance(from)?;
        let mut to_balance = self.read_balance(to)?;

        if from_balance.available_units < amount_units {
            return Err(StoreError::InsufficientFunds {
                available: from_balance.available_units,
                required: amount_units,
            });
        }

        from_balance.available_units -= amount_units;
        to_balance.available_units = to_balance
            .available_units
            .checked_add(amount_units)
            .ok_or_else(|| StoreError::Database("balance overflow".into()))?;

        let cf_balances = self.cf(cf::BALANCES)?;
        let cf_tx = self.cf(cf::TRANSACTIONS)?;

        let from_value = Self::serialize(&from_balance)?;
        let to_value = Self::serialize(&to_balance)?;
        let tx_value = Self::serialize(transaction)?;

        // Both balances, the record, its indexes, and the idempotency
        // marker commit together.
        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_balances, keys::balance_key(from), &from_value);
        batch.put_cf(&cf_balances, keys::balance_key(to), &to_value);
        batch.put_cf(&cf_tx, keys::transaction_key(&transaction.id), &tx_value);
        self.stage_index_entries(&mut batch, transaction)?;
        if let Some(request_id) = request_id {
            let cf_requests = self.cf(cf::REQUESTS)?;
            batch.put_cf(&cf_requests, keys::request_key(request_id), []);
        }

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(from_balance)
    }

    fn apply_mint(
        &self,
        account_id: &AccountId,
        amount_units: i64,
        transaction: &LedgerTransaction,
        request_id: Option<&str>,
    ) -> Result<Balance> {
        let _guard = self.balance_guard()?;

        if let Some(request_id) = request_id {
            if self.read_request(request_id)? {
                return Err(StoreError::DuplicateRequest {
                    request_id: request_id.to_string(),
                });
            }
        }

        let mut balance = self.read_balance(account_id)?;
        balance.available_units = balance
            .available_units
            .checked_add(amount_units)
            .ok_or_else(|| StoreError::Database("balance overflow".into()))?;

        let cf_balances = self.cf(cf::BALANCES)?;
        let cf_tx = self.cf(cf::TRANSACTIONS)?;

        let balance_value = Self::serialize(&balance)?;
        let tx_value = Self::serialize(transaction)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_balances, keys::balance_key(account_id), &balance_value);
        batch.put_cf(&cf_tx, keys::transaction_key(&transaction.id), &tx_value);
        self.stage_index_entries(&mut batch, transaction)?;
        if let Some(request_id) = request_id {
            let cf_requests = self.cf(cf::REQUESTS)?;
            batch.put_cf(&cf_requests, keys::request_key(request_id), []);
        }

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(balance)
    }
}
