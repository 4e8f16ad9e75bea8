//! Supabase-backed Data Source
//!
//! Thin mapping from [`DataSource`] operations onto PostgREST requests.
//! Every table query carries an `usuario_id=eq.{id}` filter in addition to
//! whatever RLS enforces server-side; an unfiltered query once leaked rows
//! across users and must never be issued again.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{DataSource, DataSourceError, UserScope};
use crate::model::{
    tables, CreditSimulation, Expense, ExpenseChanges, FinancialGoal, GoalChanges, Income,
    IncomeChanges, NewCategory, NewCreditSimulation, NewExpense, NewGoal, NewIncome, RecordFilter,
    SavedCategory,
};
use crate::supabase::{AuthApi, Session, SignUpMetadata, SortOrder, SupabaseClient, SupabaseConfig, TableQuery};

/// Production data source backed by a Supabase project.
pub struct RemoteDataSource {
    client: SupabaseClient,
    auth: AuthApi,
}

impl RemoteDataSource {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            client: SupabaseClient::new(config.clone()),
            auth: AuthApi::new(config),
        }
    }

    /// Base query scoped to the calling user.
    fn scoped_query(scope: &UserScope) -> TableQuery {
        TableQuery::new().select("*").eq("usuario_id", &scope.user_id)
    }

    /// Scoped query narrowed by month and category.
    fn filtered_query(scope: &UserScope, filter: &RecordFilter) -> TableQuery {
        let mut query = Self::scoped_query(scope);
        if let Some(month) = filter.month {
            query = query
                .gte("fecha", month.first_day())
                .lt("fecha", month.next_month_first_day());
        }
        if let Some(categoria) = &filter.categoria {
            query = query.eq("categoria", categoria);
        }
        query.order("fecha", SortOrder::Descending)
    }

    async fn insert_one<T, B>(
        &self,
        table: &str,
        body: &B,
        scope: &UserScope,
    ) -> Result<T, DataSourceError>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let rows: Vec<T> = self.client.insert(table, body, scope.token()).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| DataSourceError::Unknown(format!("{table}: insert returned no row")))
    }

    async fn update_one<T, B>(
        &self,
        table: &str,
        id: &str,
        body: &B,
        scope: &UserScope,
    ) -> Result<T, DataSourceError>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let query = Self::scoped_query(scope).eq("id", id);
        let rows: Vec<T> = self.client.update(table, &query, body, scope.token()).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| DataSourceError::NotFound(format!("{table}/{id}")))
    }

    async fn delete_one(
        &self,
        table: &str,
        id: &str,
        scope: &UserScope,
    ) -> Result<(), DataSourceError> {
        let query = Self::scoped_query(scope).eq("id", id);
        let rows: Vec<serde_json::Value> =
            self.client.delete(table, &query, scope.token()).await?;
        if rows.is_empty() {
            Err(DataSourceError::NotFound(format!("{table}/{id}")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DataSource for RemoteDataSource {
    fn name(&self) -> &str {
        "supabase"
    }

    async fn health_check(&self) -> Result<(), DataSourceError> {
        self.client.health_check().await.map_err(Into::into)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        nombre: Option<String>,
    ) -> Result<Session, DataSourceError> {
        let metadata = SignUpMetadata { nombre };
        self.auth
            .sign_up(email, password, metadata)
            .await
            .map_err(Into::into)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, DataSourceError> {
        self.auth
            .sign_in_with_password(email, password)
            .await
            .map_err(Into::into)
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, DataSourceError> {
        self.auth
            .refresh_session(refresh_token)
            .await
            .map_err(Into::into)
    }

    async fn list_incomes(
        &self,
        scope: &UserScope,
        filter: &RecordFilter,
    ) -> Result<Vec<Income>, DataSourceError> {
        let query = Self::filtered_query(scope, filter);
        self.client
            .select(tables::INGRESOS, &query, scope.token())
            .await
            .map_err(Into::into)
    }

    async fn insert_income(
        &self,
        scope: &UserScope,
        record: NewIncome,
    ) -> Result<Income, DataSourceError> {
        // The row is owned by the caller no matter what the payload said
        let record = NewIncome {
            usuario_id: scope.user_id.clone(),
            ..record
        };
        self.insert_one(tables::INGRESOS, &record, scope).await
    }

    async fn update_income(
        &self,
        scope: &UserScope,
        id: &str,
        changes: IncomeChanges,
    ) -> Result<Income, DataSourceError> {
        if changes.is_empty() {
            return Err(DataSourceError::Validation("no fields to update".into()));
        }
        self.update_one(tables::INGRESOS, id, &changes, scope).await
    }

    async fn delete_income(&self, scope: &UserScope, id: &str) -> Result<(), DataSourceError> {
        self.delete_one(tables::INGRESOS, id, scope).await
    }

    async fn list_expenses(
        &self,
        scope: &UserScope,
        filter: &RecordFilter,
    ) -> Result<Vec<Expense>, DataSourceError> {
        let query = Self::filtered_query(scope, filter);
        self.client
            .select(tables::GASTOS, &query, scope.token())
            .await
            .map_err(Into::into)
    }

    async fn insert_expense(
        &self,
        scope: &UserScope,
        record: NewExpense,
    ) -> Result<Expense, DataSourceError> {
        let record = NewExpense {
            usuario_id: scope.user_id.clone(),
            ..record
        };
        self.insert_one(tables::GASTOS, &record, scope).await
    }

    async fn update_expense(
        &self,
        scope: &UserScope,
        id: &str,
        changes: ExpenseChanges,
    ) -> Result<Expense, DataSourceError> {
        if changes.is_empty() {
            return Err(DataSourceError::Validation("no fields to update".into()));
        }
        self.update_one(tables::GASTOS, id, &changes, scope).await
    }

    async fn delete_expense(&self, scope: &UserScope, id: &str) -> Result<(), DataSourceError> {
        self.delete_one(tables::GASTOS, id, scope).await
    }

    async fn list_simulations(
        &self,
        scope: &UserScope,
    ) -> Result<Vec<CreditSimulation>, DataSourceError> {
        let query = Self::scoped_query(scope).order("created_at", SortOrder::Descending);
        self.client
            .select(tables::SIMULACIONES_CREDITO, &query, scope.token())
            .await
            .map_err(Into::into)
    }

    async fn insert_simulation(
        &self,
        scope: &UserScope,
        record: NewCreditSimulation,
    ) -> Result<CreditSimulation, DataSourceError> {
        let record = NewCreditSimulation {
            usuario_id: scope.user_id.clone(),
            ..record
        };
        self.insert_one(tables::SIMULACIONES_CREDITO, &record, scope)
            .await
    }

    async fn delete_simulation(
        &self,
        scope: &UserScope,
        id: &str,
    ) -> Result<(), DataSourceError> {
        self.delete_one(tables::SIMULACIONES_CREDITO, id, scope).await
    }

    async fn list_categories(
        &self,
        scope: &UserScope,
    ) -> Result<Vec<SavedCategory>, DataSourceError> {
        let query = Self::scoped_query(scope).order("nombre", SortOrder::Ascending);
        self.client
            .select(tables::CATEGORIAS_PERSONALIZADAS, &query, scope.token())
            .await
            .map_err(Into::into)
    }

    async fn insert_category(
        &self,
        scope: &UserScope,
        record: NewCategory,
    ) -> Result<SavedCategory, DataSourceError> {
        let record = NewCategory {
            usuario_id: scope.user_id.clone(),
            ..record
        };
        self.insert_one(tables::CATEGORIAS_PERSONALIZADAS, &record, scope)
            .await
    }

    async fn delete_category(&self, scope: &UserScope, id: &str) -> Result<(), DataSourceError> {
        self.delete_one(tables::CATEGORIAS_PERSONALIZADAS, id, scope)
            .await
    }

    async fn list_goals(&self, scope: &UserScope) -> Result<Vec<FinancialGoal>, DataSourceError> {
        let query = Self::scoped_query(scope).order("fecha_limite", SortOrder::Ascending);
        self.client
            .select(tables::METAS_FINANCIERAS, &query, scope.token())
            .await
            .map_err(Into::into)
    }

    async fn insert_goal(
        &self,
        scope: &UserScope,
        record: NewGoal,
    ) -> Result<FinancialGoal, DataSourceError> {
        let record = NewGoal {
            usuario_id: scope.user_id.clone(),
            ..record
        };
        self.insert_one(tables::METAS_FINANCIERAS, &record, scope)
            .await
    }

    async fn update_goal(
        &self,
        scope: &UserScope,
        id: &str,
        changes: GoalChanges,
    ) -> Result<FinancialGoal, DataSourceError> {
        self.update_one(tables::METAS_FINANCIERAS, id, &changes, scope)
            .await
    }

    async fn delete_goal(&self, scope: &UserScope, id: &str) -> Result<(), DataSourceError> {
        self.delete_one(tables::METAS_FINANCIERAS, id, scope).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Month;

    #[test]
    fn test_every_list_query_is_user_scoped() {
        let scope = UserScope::new("u-1", None);

        let query = RemoteDataSource::scoped_query(&scope);
        assert!(query
            .params()
            .iter()
            .any(|(k, v)| k == "usuario_id" && v == "eq.u-1"));

        let filter = RecordFilter {
            month: Some(Month::parse("2025-03").unwrap()),
            categoria: Some("comida".into()),
        };
        let query = RemoteDataSource::filtered_query(&scope, &filter);
        let params = query.params();

        assert!(params.iter().any(|(k, v)| k == "usuario_id" && v == "eq.u-1"));
        assert!(params.iter().any(|(k, v)| k == "fecha" && v == "gte.2025-03-01"));
        assert!(params.iter().any(|(k, v)| k == "fecha" && v == "lt.2025-04-01"));
        assert!(params.iter().any(|(k, v)| k == "categoria" && v == "eq.comida"));
    }
}
