//! Domain Model
//!
//! Row types for the PlanificaPro tables. Field names match the deployed
//! Postgres column names (Spanish) so serde maps 1:1 onto PostgREST JSON.
//!
//! Every row belongs to exactly one `usuario_id`; cross-user isolation is
//! enforced both by RLS on the database side and by explicit filters on
//! every query this crate issues.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Table names as deployed in Supabase.
pub mod tables {
    pub const INGRESOS: &str = "ingresos";
    pub const GASTOS: &str = "gastos";
    pub const SIMULACIONES_CREDITO: &str = "simulaciones_credito";
    pub const CATEGORIAS_PERSONALIZADAS: &str = "categorias_personalizadas";
    pub const METAS_FINANCIERAS: &str = "metas_financieras";
}

/// An income row (`ingresos`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: String,
    pub usuario_id: String,
    pub descripcion: String,
    pub monto: f64,
    pub categoria: String,
    pub fecha: NaiveDate,
    #[serde(default)]
    pub recurrente: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for creating an income. The id and timestamps are assigned
/// by the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIncome {
    pub usuario_id: String,
    pub descripcion: String,
    pub monto: f64,
    pub categoria: String,
    pub fecha: NaiveDate,
    #[serde(default)]
    pub recurrente: bool,
}

/// Partial update for an income. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomeChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monto: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrente: Option<bool>,
}

impl IncomeChanges {
    pub fn is_empty(&self) -> bool {
        self.descripcion.is_none()
            && self.monto.is_none()
            && self.categoria.is_none()
            && self.fecha.is_none()
            && self.recurrente.is_none()
    }
}

/// An expense row (`gastos`). Same shape as [`Income`], kept as a distinct
/// type because the two tables evolve independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub usuario_id: String,
    pub descripcion: String,
    pub monto: f64,
    pub categoria: String,
    pub fecha: NaiveDate,
    #[serde(default)]
    pub recurrente: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for creating an expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub usuario_id: String,
    pub descripcion: String,
    pub monto: f64,
    pub categoria: String,
    pub fecha: NaiveDate,
    #[serde(default)]
    pub recurrente: bool,
}

/// Partial update for an expense.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monto: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrente: Option<bool>,
}

impl ExpenseChanges {
    pub fn is_empty(&self) -> bool {
        self.descripcion.is_none()
            && self.monto.is_none()
            && self.categoria.is_none()
            && self.fecha.is_none()
            && self.recurrente.is_none()
    }
}

/// A persisted credit simulation (`simulaciones_credito`).
///
/// The derived columns are optional: the deployed table predates this
/// service and narrower variants of it exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditSimulation {
    pub id: String,
    pub usuario_id: String,
    pub monto: f64,
    pub plazo_meses: u32,
    pub tasa_anual: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuota_mensual: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_intereses: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pagar: Option<f64>,
    #[serde(default = "default_estado")]
    pub estado: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_estado() -> String {
    "simulada".to_string()
}

/// Payload for persisting a simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCreditSimulation {
    pub usuario_id: String,
    pub monto: f64,
    pub plazo_meses: u32,
    pub tasa_anual: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuota_mensual: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_intereses: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pagar: Option<f64>,
    #[serde(default = "default_estado")]
    pub estado: String,
}

/// A user-defined category (`categorias_personalizadas`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCategory {
    pub id: String,
    pub usuario_id: String,
    pub nombre: String,
    /// "ingreso" or "gasto"
    pub tipo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Payload for creating a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    pub usuario_id: String,
    pub nombre: String,
    pub tipo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A savings goal (`metas_financieras`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialGoal {
    pub id: String,
    pub usuario_id: String,
    pub nombre: String,
    pub monto_objetivo: f64,
    #[serde(default)]
    pub monto_actual: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_limite: Option<NaiveDate>,
}

impl FinancialGoal {
    /// Progress toward the target, clamped to [0, 1].
    pub fn progress(&self) -> f64 {
        if self.monto_objetivo <= 0.0 {
            return 0.0;
        }
        (self.monto_actual / self.monto_objetivo).clamp(0.0, 1.0)
    }
}

/// Payload for creating a goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGoal {
    pub usuario_id: String,
    pub nombre: String,
    pub monto_objetivo: f64,
    #[serde(default)]
    pub monto_actual: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_limite: Option<NaiveDate>,
}

/// Partial update for a goal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monto_objetivo: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monto_actual: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_limite: Option<NaiveDate>,
}

/// Month scoping for list queries, `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    /// Parse a `YYYY-MM` label.
    pub fn parse(label: &str) -> Option<Self> {
        let (y, m) = label.split_once('-')?;
        let year: i32 = y.parse().ok()?;
        let month: u32 = m.parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // Month is validated at construction, so the date is always valid
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// First day of the following month (exclusive upper bound).
    pub fn next_month_first_day(&self) -> NaiveDate {
        let (y, m) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(y, m, 1).unwrap_or(NaiveDate::MAX)
    }

    /// True if `date` falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date < self.next_month_first_day()
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Optional narrowing of a list query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub month: Option<Month>,
    pub categoria: Option<String>,
}

impl RecordFilter {
    pub fn for_month(month: Month) -> Self {
        Self {
            month: Some(month),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_parse() {
        let m = Month::parse("2025-03").unwrap();
        assert_eq!(m.year, 2025);
        assert_eq!(m.month, 3);
        assert_eq!(m.to_string(), "2025-03");

        assert!(Month::parse("2025-13").is_none());
        assert!(Month::parse("2025").is_none());
        assert!(Month::parse("not-a-month").is_none());
    }

    #[test]
    fn test_month_bounds() {
        let m = Month::parse("2025-12").unwrap();
        assert_eq!(m.first_day(), NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(
            m.next_month_first_day(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );

        assert!(m.contains(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()));
        assert!(!m.contains(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
    }

    #[test]
    fn test_goal_progress() {
        let goal = FinancialGoal {
            id: "g1".into(),
            usuario_id: "u1".into(),
            nombre: "Fondo de emergencia".into(),
            monto_objetivo: 1000.0,
            monto_actual: 250.0,
            fecha_limite: None,
        };
        assert!((goal.progress() - 0.25).abs() < f64::EPSILON);

        let overfunded = FinancialGoal {
            monto_actual: 1500.0,
            ..goal.clone()
        };
        assert_eq!(overfunded.progress(), 1.0);

        let degenerate = FinancialGoal {
            monto_objetivo: 0.0,
            ..goal
        };
        assert_eq!(degenerate.progress(), 0.0);
    }

    #[test]
    fn test_changes_is_empty() {
        assert!(IncomeChanges::default().is_empty());
        let changes = IncomeChanges {
            monto: Some(10.0),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }
}
