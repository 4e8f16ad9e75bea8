//! Monthly Reports
//!
//! Aggregation over income and expense rows for the reportes module.
//! Pure functions; the API layer fetches the rows and hands them over.

use serde::Serialize;
use std::collections::HashMap;

use crate::model::{Expense, Income, Month};

/// Per-category expense total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub categoria: String,
    pub total: f64,
    /// Share of all expenses, 0..=1. Zero when there are no expenses.
    pub porcentaje: f64,
}

/// Aggregated view of one month (or all time when `mes` is None).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mes: Option<String>,
    pub total_ingresos: f64,
    pub total_gastos: f64,
    pub balance: f64,
    /// Fraction of income left over, 0 when there is no income.
    pub tasa_ahorro: f64,
    pub num_ingresos: usize,
    pub num_gastos: usize,
    /// Expense totals per category, largest first.
    pub gastos_por_categoria: Vec<CategoryTotal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria_dominante: Option<String>,
}

/// Build the summary for rows already scoped to one user and month.
pub fn monthly_summary(
    mes: Option<Month>,
    incomes: &[Income],
    expenses: &[Expense],
) -> MonthlySummary {
    let total_ingresos: f64 = incomes.iter().map(|r| r.monto).sum();
    let total_gastos: f64 = expenses.iter().map(|r| r.monto).sum();
    let balance = total_ingresos - total_gastos;

    let tasa_ahorro = if total_ingresos > 0.0 {
        balance / total_ingresos
    } else {
        0.0
    };

    let mut by_category: HashMap<&str, f64> = HashMap::new();
    for expense in expenses {
        *by_category.entry(expense.categoria.as_str()).or_insert(0.0) += expense.monto;
    }

    let mut gastos_por_categoria: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(categoria, total)| CategoryTotal {
            categoria: categoria.to_string(),
            total,
            porcentaje: if total_gastos > 0.0 {
                total / total_gastos
            } else {
                0.0
            },
        })
        .collect();

    // Largest first; name breaks ties so output is stable
    gastos_por_categoria.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.categoria.cmp(&b.categoria))
    });

    let categoria_dominante = gastos_por_categoria.first().map(|c| c.categoria.clone());

    MonthlySummary {
        mes: mes.map(|m| m.to_string()),
        total_ingresos,
        total_gastos,
        balance,
        tasa_ahorro,
        num_ingresos: incomes.len(),
        num_gastos: expenses.len(),
        gastos_por_categoria,
        categoria_dominante,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn income(monto: f64) -> Income {
        Income {
            id: "i".into(),
            usuario_id: "u-1".into(),
            descripcion: "ingreso".into(),
            monto,
            categoria: "salario".into(),
            fecha: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            recurrente: false,
            created_at: None,
        }
    }

    fn expense(monto: f64, categoria: &str) -> Expense {
        Expense {
            id: "g".into(),
            usuario_id: "u-1".into(),
            descripcion: "gasto".into(),
            monto,
            categoria: categoria.into(),
            fecha: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            recurrente: false,
            created_at: None,
        }
    }

    #[test]
    fn test_summary_totals() {
        let incomes = vec![income(2000.0), income(500.0)];
        let expenses = vec![
            expense(800.0, "vivienda"),
            expense(300.0, "comida"),
            expense(150.0, "comida"),
        ];

        let summary = monthly_summary(Month::parse("2025-03"), &incomes, &expenses);

        assert_eq!(summary.mes.as_deref(), Some("2025-03"));
        assert_eq!(summary.total_ingresos, 2500.0);
        assert_eq!(summary.total_gastos, 1250.0);
        assert_eq!(summary.balance, 1250.0);
        assert!((summary.tasa_ahorro - 0.5).abs() < 1e-9);
        assert_eq!(summary.num_ingresos, 2);
        assert_eq!(summary.num_gastos, 3);
    }

    #[test]
    fn test_categories_sorted_largest_first() {
        let expenses = vec![
            expense(300.0, "comida"),
            expense(800.0, "vivienda"),
            expense(150.0, "comida"),
        ];

        let summary = monthly_summary(None, &[], &expenses);

        assert_eq!(summary.gastos_por_categoria.len(), 2);
        assert_eq!(summary.gastos_por_categoria[0].categoria, "vivienda");
        assert_eq!(summary.gastos_por_categoria[0].total, 800.0);
        assert_eq!(summary.gastos_por_categoria[1].categoria, "comida");
        assert_eq!(summary.gastos_por_categoria[1].total, 450.0);
        assert_eq!(summary.categoria_dominante.as_deref(), Some("vivienda"));

        // Percentages add up to 1
        let pct: f64 = summary.gastos_por_categoria.iter().map(|c| c.porcentaje).sum();
        assert!((pct - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_rows() {
        let summary = monthly_summary(None, &[], &[]);

        assert_eq!(summary.total_ingresos, 0.0);
        assert_eq!(summary.total_gastos, 0.0);
        assert_eq!(summary.balance, 0.0);
        assert_eq!(summary.tasa_ahorro, 0.0);
        assert!(summary.gastos_por_categoria.is_empty());
        assert!(summary.categoria_dominante.is_none());
    }

    #[test]
    fn test_no_income_yields_zero_savings_rate() {
        let summary = monthly_summary(None, &[], &[expense(100.0, "comida")]);
        assert_eq!(summary.tasa_ahorro, 0.0);
        assert_eq!(summary.balance, -100.0);
    }
}
