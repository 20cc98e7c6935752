//! The application state and the component that keeps it in sync with storage.

use crate::{
    budget::{self, DEFAULT_MONTHLY_BUDGET},
    persistence::{
        load_ledger, save_monthly_budget, save_recurring_transactions, save_transactions,
    },
    record_id::{IdGenerator, RecordId},
    recurring::{self, RecurringTransaction, RecurringTransactionDraft},
    storage::KeyValueStore,
    transaction::{self, Transaction, TransactionDraft},
    validation::ValidationError,
};

/// Everything the user has recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    /// Transactions, newest first.
    pub transactions: Vec<Transaction>,
    /// Recurring transaction templates in the order they were added.
    pub recurring_transactions: Vec<RecurringTransaction>,
    /// The expense ceiling for a calendar month.
    pub monthly_budget: f64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            recurring_transactions: Vec::new(),
            monthly_budget: DEFAULT_MONTHLY_BUDGET,
        }
    }
}

/// Owns the [Ledger] and writes every change through to a [KeyValueStore].
///
/// Each mutation applies the matching pure operation, swaps the result into
/// the ledger and then rewrites the affected slot in full. Writes are
/// best-effort: a failed write is logged and the in-memory change is kept.
pub struct BudgetTracker {
    ledger: Ledger,
    ids: IdGenerator,
    store: Box<dyn KeyValueStore + Send>,
}

impl BudgetTracker {
    /// Load the ledger from `store` and start tracking it.
    pub fn open(store: Box<dyn KeyValueStore + Send>) -> Self {
        let ledger = load_ledger(&*store);

        Self::with_ledger(ledger, store)
    }

    /// Track `ledger`, writing changes to `store`.
    ///
    /// Fresh IDs are guaranteed not to collide with the IDs already in `ledger`.
    pub fn with_ledger(ledger: Ledger, store: Box<dyn KeyValueStore + Send>) -> Self {
        let ids = IdGenerator::seeded(
            ledger
                .transactions
                .iter()
                .map(|transaction| &transaction.id)
                .chain(ledger.recurring_transactions.iter().map(|recurring| &recurring.id)),
        );

        Self { ledger, ids, store }
    }

    /// The current state.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Validate `draft` and record it as the newest transaction.
    ///
    /// # Errors
    ///
    /// Returns a [ValidationError] if the draft is invalid, the ledger is left
    /// unchanged.
    pub fn add_transaction(
        &mut self,
        draft: TransactionDraft,
    ) -> Result<RecordId, ValidationError> {
        let transactions =
            transaction::add_transaction(&self.ledger.transactions, draft, &mut self.ids)?;
        // New transactions are prepended.
        let id = transactions[0].id.clone();
        tracing::info!("added transaction {id}");

        self.ledger.transactions = transactions;
        self.write_transactions();

        Ok(id)
    }

    /// Remove the transaction with `id`.
    ///
    /// Returns `false` if there was no such transaction, in which case nothing
    /// is written.
    pub fn delete_transaction(&mut self, id: &RecordId) -> bool {
        let transactions = transaction::delete_transaction(&self.ledger.transactions, id);

        if transactions.len() == self.ledger.transactions.len() {
            tracing::debug!("ignoring delete of unknown transaction {id}");
            return false;
        }

        tracing::info!("deleted transaction {id}");
        self.ledger.transactions = transactions;
        self.write_transactions();

        true
    }

    /// Validate `draft` and append it as a new, active recurring transaction.
    ///
    /// # Errors
    ///
    /// Returns a [ValidationError] if the draft is invalid, the ledger is left
    /// unchanged.
    pub fn add_recurring_transaction(
        &mut self,
        draft: RecurringTransactionDraft,
    ) -> Result<RecordId, ValidationError> {
        let recurring_transactions = recurring::add_recurring_transaction(
            &self.ledger.recurring_transactions,
            draft,
            &mut self.ids,
        )?;
        // New recurring transactions are appended.
        let id = recurring_transactions[recurring_transactions.len() - 1]
            .id
            .clone();
        tracing::info!("added recurring transaction {id}");

        self.ledger.recurring_transactions = recurring_transactions;
        self.write_recurring_transactions();

        Ok(id)
    }

    /// Flip the active flag of the recurring transaction with `id`.
    ///
    /// Returns the new value of the flag, or `None` if there was no such
    /// recurring transaction.
    pub fn toggle_recurring_active(&mut self, id: &RecordId) -> Option<bool> {
        let recurring_transactions =
            recurring::toggle_recurring_active(&self.ledger.recurring_transactions, id);

        let Some(is_active) = recurring_transactions
            .iter()
            .find(|recurring| &recurring.id == id)
            .map(|recurring| recurring.is_active)
        else {
            tracing::debug!("ignoring toggle of unknown recurring transaction {id}");
            return None;
        };

        tracing::info!("set recurring transaction {id} active = {is_active}");
        self.ledger.recurring_transactions = recurring_transactions;
        self.write_recurring_transactions();

        Some(is_active)
    }

    /// Remove the recurring transaction with `id`.
    ///
    /// Returns `false` if there was no such recurring transaction.
    pub fn delete_recurring_transaction(&mut self, id: &RecordId) -> bool {
        let recurring_transactions =
            recurring::delete_recurring_transaction(&self.ledger.recurring_transactions, id);

        if recurring_transactions.len() == self.ledger.recurring_transactions.len() {
            tracing::debug!("ignoring delete of unknown recurring transaction {id}");
            return false;
        }

        tracing::info!("deleted recurring transaction {id}");
        self.ledger.recurring_transactions = recurring_transactions;
        self.write_recurring_transactions();

        true
    }

    /// Change the monthly budget.
    ///
    /// # Errors
    ///
    /// Returns [ValidationError::NonPositiveBudget] if `proposed` is not a
    /// positive number, the budget is left unchanged.
    pub fn set_monthly_budget(&mut self, proposed: f64) -> Result<f64, ValidationError> {
        let monthly_budget = budget::set_monthly_budget(self.ledger.monthly_budget, proposed)?;
        tracing::info!("set monthly budget to {monthly_budget}");

        self.ledger.monthly_budget = monthly_budget;
        if let Err(error) = save_monthly_budget(&mut *self.store, monthly_budget) {
            tracing::warn!("could not save the monthly budget: {error}");
        }

        Ok(monthly_budget)
    }

    fn write_transactions(&mut self) {
        if let Err(error) = save_transactions(&mut *self.store, &self.ledger.transactions) {
            tracing::warn!("could not save transactions: {error}");
        }
    }

    fn write_recurring_transactions(&mut self) {
        if let Err(error) =
            save_recurring_transactions(&mut *self.store, &self.ledger.recurring_transactions)
        {
            tracing::warn!("could not save recurring transactions: {error}");
        }
    }
}

impl std::fmt::Debug for BudgetTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BudgetTracker")
            .field("ledger", &self.ledger)
            .field("ids", &self.ids)
            .finish_non_exhaustive()
    }
}
