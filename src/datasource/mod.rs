//! Data Source Seam
//!
//! The application talks to persistence through the [`DataSource`] trait.
//! Two implementations exist:
//!
//! - [`RemoteDataSource`]: Supabase (PostgREST + GoTrue)
//! - [`MockDataSource`]: in-memory, for offline mode, demos and tests
//!
//! Which one runs is decided once at startup by configuration. Every
//! operation is scoped to a single user; implementations must never return
//! rows belonging to anyone else.

mod mock;
mod remote;

pub use mock::MockDataSource;
pub use remote::RemoteDataSource;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{
    CreditSimulation, Expense, ExpenseChanges, FinancialGoal, GoalChanges, Income, IncomeChanges,
    NewCategory, NewCreditSimulation, NewExpense, NewGoal, NewIncome, RecordFilter, SavedCategory,
};
use crate::supabase::Session;

/// Identity of the caller for a data operation.
#[derive(Debug, Clone, Default)]
pub struct UserScope {
    pub user_id: String,
    /// Bearer token forwarded to the backend so RLS applies. Absent in
    /// mock mode.
    pub access_token: Option<String>,
}

impl UserScope {
    pub fn new(user_id: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            access_token,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}

/// Error kinds at the data boundary.
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("network failure: {0}")]
    NetworkFailure(String),

    #[error("session expired or rejected")]
    AuthExpired,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Unknown(String),
}

impl From<crate::supabase::SupabaseError> for DataSourceError {
    fn from(err: crate::supabase::SupabaseError) -> Self {
        use crate::supabase::SupabaseError;

        if err.is_auth_rejection() {
            return DataSourceError::AuthExpired;
        }
        match err {
            SupabaseError::Unavailable | SupabaseError::Timeout => {
                DataSourceError::NetworkFailure(err.to_string())
            }
            SupabaseError::Request(e) => DataSourceError::NetworkFailure(e.to_string()),
            SupabaseError::Api { status, details } => match status {
                404 => DataSourceError::NotFound(details.to_string()),
                400 | 409 | 422 => DataSourceError::Validation(details.to_string()),
                _ => DataSourceError::Unknown(details.to_string()),
            },
            SupabaseError::AuthRejected { .. } => DataSourceError::AuthExpired,
            SupabaseError::Decode(msg) => DataSourceError::Unknown(msg),
        }
    }
}

/// Persistence and identity operations used by the API layer.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Implementation name, for logs and health output.
    fn name(&self) -> &str;

    async fn health_check(&self) -> Result<(), DataSourceError>;

    // Identity
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        nombre: Option<String>,
    ) -> Result<Session, DataSourceError>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, DataSourceError>;
    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, DataSourceError>;

    // Incomes
    async fn list_incomes(
        &self,
        scope: &UserScope,
        filter: &RecordFilter,
    ) -> Result<Vec<Income>, DataSourceError>;
    async fn insert_income(
        &self,
        scope: &UserScope,
        record: NewIncome,
    ) -> Result<Income, DataSourceError>;
    async fn update_income(
        &self,
        scope: &UserScope,
        id: &str,
        changes: IncomeChanges,
    ) -> Result<Income, DataSourceError>;
    async fn delete_income(&self, scope: &UserScope, id: &str) -> Result<(), DataSourceError>;

    // Expenses
    async fn list_expenses(
        &self,
        scope: &UserScope,
        filter: &RecordFilter,
    ) -> Result<Vec<Expense>, DataSourceError>;
    async fn insert_expense(
        &self,
        scope: &UserScope,
        record: NewExpense,
    ) -> Result<Expense, DataSourceError>;
    async fn update_expense(
        &self,
        scope: &UserScope,
        id: &str,
        changes: ExpenseChanges,
    ) -> Result<Expense, DataSourceError>;
    async fn delete_expense(&self, scope: &UserScope, id: &str) -> Result<(), DataSourceError>;

    // Saved credit simulations
    async fn list_simulations(
        &self,
        scope: &UserScope,
    ) -> Result<Vec<CreditSimulation>, DataSourceError>;
    async fn insert_simulation(
        &self,
        scope: &UserScope,
        record: NewCreditSimulation,
    ) -> Result<CreditSimulation, DataSourceError>;
    async fn delete_simulation(&self, scope: &UserScope, id: &str)
        -> Result<(), DataSourceError>;

    // Custom categories
    async fn list_categories(
        &self,
        scope: &UserScope,
    ) -> Result<Vec<SavedCategory>, DataSourceError>;
    async fn insert_category(
        &self,
        scope: &UserScope,
        record: NewCategory,
    ) -> Result<SavedCategory, DataSourceError>;
    async fn delete_category(&self, scope: &UserScope, id: &str) -> Result<(), DataSourceError>;

    // Financial goals
    async fn list_goals(&self, scope: &UserScope) -> Result<Vec<FinancialGoal>, DataSourceError>;
    async fn insert_goal(
        &self,
        scope: &UserScope,
        record: NewGoal,
    ) -> Result<FinancialGoal, DataSourceError>;
    async fn update_goal(
        &self,
        scope: &UserScope,
        id: &str,
        changes: GoalChanges,
    ) -> Result<FinancialGoal, DataSourceError>;
    async fn delete_goal(&self, scope: &UserScope, id: &str) -> Result<(), DataSourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::supabase::{PostgrestErrorDetails, SupabaseError};

    #[test]
    fn test_supabase_error_mapping() {
        let err: DataSourceError = SupabaseError::Timeout.into();
        assert!(matches!(err, DataSourceError::NetworkFailure(_)));

        let err: DataSourceError = SupabaseError::AuthRejected {
            status: 401,
            message: "expired".into(),
        }
        .into();
        assert!(matches!(err, DataSourceError::AuthExpired));

        let err: DataSourceError = SupabaseError::Api {
            status: 401,
            details: PostgrestErrorDetails::default(),
        }
        .into();
        assert!(matches!(err, DataSourceError::AuthExpired));

        let err: DataSourceError = SupabaseError::Api {
            status: 400,
            details: PostgrestErrorDetails::default(),
        }
        .into();
        assert!(matches!(err, DataSourceError::Validation(_)));

        let err: DataSourceError = SupabaseError::Api {
            status: 404,
            details: PostgrestErrorDetails::default(),
        }
        .into();
        assert!(matches!(err, DataSourceError::NotFound(_)));

        let err: DataSourceError = SupabaseError::Decode("bad json".into()).into();
        assert!(matches!(err, DataSourceError::Unknown(_)));
    }
}
