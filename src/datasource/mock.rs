//! In-memory Data Source
//!
//! Offline-mode implementation. Rows live in RwLock'd vectors; sign-in
//! always succeeds with a deterministic demo session so the dashboard is
//! usable without a Supabase project.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{Datelike, Utc};

use super::{DataSource, DataSourceError, UserScope};
use crate::model::{
    CreditSimulation, Expense, ExpenseChanges, FinancialGoal, GoalChanges, Income, IncomeChanges,
    NewCategory, NewCreditSimulation, NewExpense, NewGoal, NewIncome, RecordFilter, SavedCategory,
};
use crate::supabase::{AuthUser, Session};

/// Fixed identity handed out by mock sign-in.
pub const DEMO_USER_ID: &str = "00000000-0000-4000-8000-000000000001";
const DEMO_ACCESS_TOKEN: &str = "mock-access-token";
const DEMO_REFRESH_TOKEN: &str = "mock-refresh-token";

#[derive(Default)]
struct MockTables {
    incomes: Vec<Income>,
    expenses: Vec<Expense>,
    simulations: Vec<CreditSimulation>,
    categories: Vec<SavedCategory>,
    goals: Vec<FinancialGoal>,
}

/// Offline data source.
#[derive(Default)]
pub struct MockDataSource {
    tables: RwLock<MockTables>,
}

impl MockDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock pre-populated with a month of demo activity for the demo user.
    pub fn with_demo_data() -> Self {
        let source = Self::new();
        {
            let mut tables = source.tables.write().unwrap_or_else(|e| e.into_inner());
            let today = Utc::now().date_naive();
            let day = |d: u32| today.with_day(d.min(28)).unwrap_or(today);

            tables.incomes.push(Income {
                id: new_id(),
                usuario_id: DEMO_USER_ID.to_string(),
                descripcion: "Salario mensual".to_string(),
                monto: 2800.0,
                categoria: "salario".to_string(),
                fecha: day(1),
                recurrente: true,
                created_at: Some(Utc::now()),
            });
            tables.expenses.push(Expense {
                id: new_id(),
                usuario_id: DEMO_USER_ID.to_string(),
                descripcion: "Alquiler".to_string(),
                monto: 950.0,
                categoria: "vivienda".to_string(),
                fecha: day(2),
                recurrente: true,
                created_at: Some(Utc::now()),
            });
            tables.expenses.push(Expense {
                id: new_id(),
                usuario_id: DEMO_USER_ID.to_string(),
                descripcion: "Supermercado".to_string(),
                monto: 420.0,
                categoria: "comida".to_string(),
                fecha: day(8),
                recurrente: false,
                created_at: Some(Utc::now()),
            });
            tables.goals.push(FinancialGoal {
                id: new_id(),
                usuario_id: DEMO_USER_ID.to_string(),
                nombre: "Fondo de emergencia".to_string(),
                monto_objetivo: 5000.0,
                monto_actual: 1500.0,
                fecha_limite: None,
            });
        }
        source
    }

    fn demo_session(email: &str, nombre: Option<String>) -> Session {
        Session {
            access_token: DEMO_ACCESS_TOKEN.to_string(),
            refresh_token: DEMO_REFRESH_TOKEN.to_string(),
            expires_in: 3600,
            token_type: "bearer".to_string(),
            user: AuthUser {
                id: DEMO_USER_ID.to_string(),
                email: Some(email.to_string()),
                user_metadata: match nombre {
                    Some(nombre) => serde_json::json!({ "nombre": nombre }),
                    None => serde_json::json!({}),
                },
                created_at: None,
            },
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, MockTables> {
        self.tables.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, MockTables> {
        self.tables.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn matches_filter(fecha: chrono::NaiveDate, categoria: &str, filter: &RecordFilter) -> bool {
    if let Some(month) = filter.month {
        if !month.contains(fecha) {
            return false;
        }
    }
    if let Some(want) = &filter.categoria {
        if want != categoria {
            return false;
        }
    }
    true
}

#[async_trait]
impl DataSource for MockDataSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn health_check(&self) -> Result<(), DataSourceError> {
        Ok(())
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        nombre: Option<String>,
    ) -> Result<Session, DataSourceError> {
        if email.is_empty() || password.is_empty() {
            return Err(DataSourceError::Validation(
                "email and password are required".into(),
            ));
        }
        Ok(Self::demo_session(email, nombre))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, DataSourceError> {
        if email.is_empty() || password.is_empty() {
            return Err(DataSourceError::Validation(
                "email and password are required".into(),
            ));
        }
        Ok(Self::demo_session(email, None))
    }

    async fn refresh_session(&self, _refresh_token: &str) -> Result<Session, DataSourceError> {
        Ok(Self::demo_session("demo@planifica.local", None))
    }

    async fn list_incomes(
        &self,
        scope: &UserScope,
        filter: &RecordFilter,
    ) -> Result<Vec<Income>, DataSourceError> {
        let mut rows: Vec<Income> = self
            .read()
            .incomes
            .iter()
            .filter(|r| r.usuario_id == scope.user_id)
            .filter(|r| matches_filter(r.fecha, &r.categoria, filter))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.fecha.cmp(&a.fecha));
        Ok(rows)
    }

    async fn insert_income(
        &self,
        scope: &UserScope,
        record: NewIncome,
    ) -> Result<Income, DataSourceError> {
        let row = Income {
            id: new_id(),
            usuario_id: scope.user_id.clone(),
            descripcion: record.descripcion,
            monto: record.monto,
            categoria: record.categoria,
            fecha: record.fecha,
            recurrente: record.recurrente,
            created_at: Some(Utc::now()),
        };
        self.write().incomes.push(row.clone());
        Ok(row)
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
        let mut tables = self.write();
        let row = tables
            .incomes
            .iter_mut()
            .find(|r| r.id == id && r.usuario_id == scope.user_id)
            .ok_or_else(|| DataSourceError::NotFound(format!("ingresos/{id}")))?;

        if let Some(descripcion) = changes.descripcion {
            row.descripcion = descripcion;
        }
        if let Some(monto) = changes.monto {
            row.monto = monto;
        }
        if let Some(categoria) = changes.categoria {
            row.categoria = categoria;
        }
        if let Some(fecha) = changes.fecha {
            row.fecha = fecha;
        }
        if let Some(recurrente) = changes.recurrente {
            row.recurrente = recurrente;
        }
        Ok(row.clone())
    }

    async fn delete_income(&self, scope: &UserScope, id: &str) -> Result<(), DataSourceError> {
        let mut tables = self.write();
        let before = tables.incomes.len();
        tables
            .incomes
            .retain(|r| !(r.id == id && r.usuario_id == scope.user_id));
        if tables.incomes.len() == before {
            Err(DataSourceError::NotFound(format!("ingresos/{id}")))
        } else {
            Ok(())
        }
    }

    async fn list_expenses(
        &self,
        scope: &UserScope,
        filter: &RecordFilter,
    ) -> Result<Vec<Expense>, DataSourceError> {
        let mut rows: Vec<Expense> = self
            .read()
            .expenses
            .iter()
            .filter(|r| r.usuario_id == scope.user_id)
            .filter(|r| matches_filter(r.fecha, &r.categoria, filter))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.fecha.cmp(&a.fecha));
        Ok(rows)
    }

    async fn insert_expense(
        &self,
        scope: &UserScope,
        record: NewExpense,
    ) -> Result<Expense, DataSourceError> {
        let row = Expense {
            id: new_id(),
            usuario_id: scope.user_id.clone(),
            descripcion: record.descripcion,
            monto: record.monto,
            categoria: record.categoria,
            fecha: record.fecha,
            recurrente: record.recurrente,
            created_at: Some(Utc::now()),
        };
        self.write().expenses.push(row.clone());
        Ok(row)
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
        let mut tables = self.write();
        let row = tables
            .expenses
            .iter_mut()
            .find(|r| r.id == id && r.usuario_id == scope.user_id)
            .ok_or_else(|| DataSourceError::NotFound(format!("gastos/{id}")))?;

        if let Some(descripcion) = changes.descripcion {
            row.descripcion = descripcion;
        }
        if let Some(monto) = changes.monto {
            row.monto = monto;
        }
        if let Some(categoria) = changes.categoria {
            row.categoria = categoria;
        }
        if let Some(fecha) = changes.fecha {
            row.fecha = fecha;
        }
        if let Some(recurrente) = changes.recurrente {
            row.recurrente = recurrente;
        }
        Ok(row.clone())
    }

    async fn delete_expense(&self, scope: &UserScope, id: &str) -> Result<(), DataSourceError> {
        let mut tables = self.write();
        let before = tables.expenses.len();
        tables
            .expenses
            .retain(|r| !(r.id == id && r.usuario_id == scope.user_id));
        if tables.expenses.len() == before {
            Err(DataSourceError::NotFound(format!("gastos/{id}")))
        } else {
            Ok(())
        }
    }

    async fn list_simulations(
        &self,
        scope: &UserScope,
    ) -> Result<Vec<CreditSimulation>, DataSourceError> {
        let rows = self
            .read()
            .simulations
            .iter()
            .filter(|r| r.usuario_id == scope.user_id)
            .cloned()
            .collect();
        Ok(rows)
    }

    async fn insert_simulation(
        &self,
        scope: &UserScope,
        record: NewCreditSimulation,
    ) -> Result<CreditSimulation, DataSourceError> {
        let row = CreditSimulation {
            id: new_id(),
            usuario_id: scope.user_id.clone(),
            monto: record.monto,
            plazo_meses: record.plazo_meses,
            tasa_anual: record.tasa_anual,
            cuota_mensual: record.cuota_mensual,
            total_intereses: record.total_intereses,
            total_pagar: record.total_pagar,
            estado: record.estado,
            created_at: Some(Utc::now()),
        };
        self.write().simulations.push(row.clone());
        Ok(row)
    }

    async fn delete_simulation(
        &self,
        scope: &UserScope,
        id: &str,
    ) -> Result<(), DataSourceError> {
        let mut tables = self.write();
        let before = tables.simulations.len();
        tables
            .simulations
            .retain(|r| !(r.id == id && r.usuario_id == scope.user_id));
        if tables.simulations.len() == before {
            Err(DataSourceError::NotFound(format!("simulaciones_credito/{id}")))
        } else {
            Ok(())
        }
    }

    async fn list_categories(
        &self,
        scope: &UserScope,
    ) -> Result<Vec<SavedCategory>, DataSourceError> {
        let mut rows: Vec<SavedCategory> = self
            .read()
            .categories
            .iter()
            .filter(|r| r.usuario_id == scope.user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.nombre.cmp(&b.nombre));
        Ok(rows)
    }

    async fn insert_category(
        &self,
        scope: &UserScope,
        record: NewCategory,
    ) -> Result<SavedCategory, DataSourceError> {
        let row = SavedCategory {
            id: new_id(),
            usuario_id: scope.user_id.clone(),
            nombre: record.nombre,
            tipo: record.tipo,
            color: record.color,
        };
        self.write().categories.push(row.clone());
        Ok(row)
    }

    async fn delete_category(&self, scope: &UserScope, id: &str) -> Result<(), DataSourceError> {
        let mut tables = self.write();
        let before = tables.categories.len();
        tables
            .categories
            .retain(|r| !(r.id == id && r.usuario_id == scope.user_id));
        if tables.categories.len() == before {
            Err(DataSourceError::NotFound(format!(
                "categorias_personalizadas/{id}"
            )))
        } else {
            Ok(())
        }
    }

    async fn list_goals(&self, scope: &UserScope) -> Result<Vec<FinancialGoal>, DataSourceError> {
        let rows = self
            .read()
            .goals
            .iter()
            .filter(|r| r.usuario_id == scope.user_id)
            .cloned()
            .collect();
        Ok(rows)
    }

    async fn insert_goal(
        &self,
        scope: &UserScope,
        record: NewGoal,
    ) -> Result<FinancialGoal, DataSourceError> {
        let row = FinancialGoal {
            id: new_id(),
            usuario_id: scope.user_id.clone(),
            nombre: record.nombre,
            monto_objetivo: record.monto_objetivo,
            monto_actual: record.monto_actual,
            fecha_limite: record.fecha_limite,
        };
        self.write().goals.push(row.clone());
        Ok(row)
    }

    async fn update_goal(
        &self,
        scope: &UserScope,
        id: &str,
        changes: GoalChanges,
    ) -> Result<FinancialGoal, DataSourceError> {
        let mut tables = self.write();
        let row = tables
            .goals
            .iter_mut()
            .find(|r| r.id == id && r.usuario_id == scope.user_id)
            .ok_or_else(|| DataSourceError::NotFound(format!("metas_financieras/{id}")))?;

        if let Some(nombre) = changes.nombre {
            row.nombre = nombre;
        }
        if let Some(monto_objetivo) = changes.monto_objetivo {
            row.monto_objetivo = monto_objetivo;
        }
        if let Some(monto_actual) = changes.monto_actual {
            row.monto_actual = monto_actual;
        }
        if let Some(fecha_limite) = changes.fecha_limite {
            row.fecha_limite = Some(fecha_limite);
        }
        Ok(row.clone())
    }

    async fn delete_goal(&self, scope: &UserScope, id: &str) -> Result<(), DataSourceError> {
        let mut tables = self.write();
        let before = tables.goals.len();
        tables
            .goals
            .retain(|r| !(r.id == id && r.usuario_id == scope.user_id));
        if tables.goals.len() == before {
            Err(DataSourceError::NotFound(format!("metas_financieras/{id}")))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Month;
    use chrono::NaiveDate;

    fn new_income(descripcion: &str, monto: f64, fecha: &str) -> NewIncome {
        NewIncome {
            usuario_id: String::new(),
            descripcion: descripcion.to_string(),
            monto,
            categoria: "general".to_string(),
            fecha: NaiveDate::parse_from_str(fecha, "%Y-%m-%d").unwrap(),
            recurrente: false,
        }
    }

    #[tokio::test]
    async fn test_insert_then_list_roundtrip() {
        let source = MockDataSource::new();
        let scope = UserScope::new("u-1", None);

        let created = source
            .insert_income(&scope, new_income("Salario", 2500.0, "2025-03-01"))
            .await
            .unwrap();

        let rows = source
            .list_incomes(&scope, &RecordFilter::default())
            .await
            .unwrap();

        assert_eq!(rows, vec![created]);
    }

    #[tokio::test]
    async fn test_listing_never_crosses_users() {
        let source = MockDataSource::new();
        let ana = UserScope::new("u-ana", None);
        let luis = UserScope::new("u-luis", None);

        source
            .insert_income(&ana, new_income("Salario Ana", 2000.0, "2025-03-01"))
            .await
            .unwrap();
        source
            .insert_income(&luis, new_income("Salario Luis", 3000.0, "2025-03-01"))
            .await
            .unwrap();

        let rows = source
            .list_incomes(&ana, &RecordFilter::default())
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert!(rows.iter().all(|r| r.usuario_id == "u-ana"));
    }

    #[tokio::test]
    async fn test_month_filter() {
        let source = MockDataSource::new();
        let scope = UserScope::new("u-1", None);

        source
            .insert_income(&scope, new_income("Marzo", 100.0, "2025-03-15"))
            .await
            .unwrap();
        source
            .insert_income(&scope, new_income("Abril", 200.0, "2025-04-02"))
            .await
            .unwrap();

        let filter = RecordFilter::for_month(Month::parse("2025-03").unwrap());
        let rows = source.list_incomes(&scope, &filter).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].descripcion, "Marzo");
    }

    #[tokio::test]
    async fn test_update_and_delete_respect_ownership() {
        let source = MockDataSource::new();
        let owner = UserScope::new("u-1", None);
        let intruder = UserScope::new("u-2", None);

        let row = source
            .insert_income(&owner, new_income("Salario", 2500.0, "2025-03-01"))
            .await
            .unwrap();

        let changes = IncomeChanges {
            monto: Some(2600.0),
            ..Default::default()
        };
        let err = source
            .update_income(&intruder, &row.id, changes.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, DataSourceError::NotFound(_)));

        let updated = source.update_income(&owner, &row.id, changes).await.unwrap();
        assert_eq!(updated.monto, 2600.0);

        let err = source.delete_income(&intruder, &row.id).await.unwrap_err();
        assert!(matches!(err, DataSourceError::NotFound(_)));
        source.delete_income(&owner, &row.id).await.unwrap();

        let rows = source
            .list_incomes(&owner, &RecordFilter::default())
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_empty_update_is_rejected() {
        let source = MockDataSource::new();
        let scope = UserScope::new("u-1", None);
        let err = source
            .update_income(&scope, "whatever", IncomeChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DataSourceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_demo_data_belongs_to_demo_user() {
        let source = MockDataSource::with_demo_data();
        let scope = UserScope::new(DEMO_USER_ID, None);

        let incomes = source
            .list_incomes(&scope, &RecordFilter::default())
            .await
            .unwrap();
        let expenses = source
            .list_expenses(&scope, &RecordFilter::default())
            .await
            .unwrap();

        assert!(!incomes.is_empty());
        assert!(!expenses.is_empty());

        let stranger = UserScope::new("u-x", None);
        assert!(source
            .list_incomes(&stranger, &RecordFilter::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_mock_sign_in() {
        let source = MockDataSource::new();
        let session = source.sign_in("demo@example.com", "pw").await.unwrap();
        assert_eq!(session.user.id, DEMO_USER_ID);

        let err = source.sign_in("", "").await.unwrap_err();
        assert!(matches!(err, DataSourceError::Validation(_)));
    }
}
