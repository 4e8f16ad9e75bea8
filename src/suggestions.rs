//! Spending Suggestions
//!
//! Deterministic rule engine for the sugerencias module. Takes the monthly
//! summary and the user's goals, emits ranked advice. No model calls, no
//! randomness; the same inputs always produce the same output.

use serde::Serialize;

use crate::model::FinancialGoal;
use crate::reports::MonthlySummary;

/// What a suggestion is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Sobregasto,
    CategoriaDominante,
    Ahorro,
    Meta,
    Registro,
}

/// How urgent a suggestion is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Alert,
}

/// A single piece of advice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub severity: Severity,
    pub titulo: String,
    pub detalle: String,
}

/// Share of expenses above which a single category triggers a warning.
const DOMINANT_CATEGORY_THRESHOLD: f64 = 0.4;
/// Savings rate below which we nudge.
const LOW_SAVINGS_THRESHOLD: f64 = 0.1;
/// Savings rate above which we congratulate.
const HEALTHY_SAVINGS_THRESHOLD: f64 = 0.2;

/// Evaluate all rules, most severe advice first.
pub fn evaluate(summary: &MonthlySummary, goals: &[FinancialGoal]) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    overspending_rule(summary, &mut suggestions);
    dominant_category_rule(summary, &mut suggestions);
    savings_rate_rule(summary, &mut suggestions);
    goal_rules(goals, &mut suggestions);
    empty_activity_rule(summary, &mut suggestions);

    suggestions.sort_by(|a, b| b.severity.cmp(&a.severity));
    suggestions
}

fn overspending_rule(summary: &MonthlySummary, out: &mut Vec<Suggestion>) {
    if summary.balance < 0.0 {
        out.push(Suggestion {
            kind: SuggestionKind::Sobregasto,
            severity: Severity::Alert,
            titulo: "Gastas más de lo que ingresas".to_string(),
            detalle: format!(
                "Este período los gastos superan a los ingresos por {:.2}. Revisa los gastos no esenciales.",
                -summary.balance
            ),
        });
    }
}

fn dominant_category_rule(summary: &MonthlySummary, out: &mut Vec<Suggestion>) {
    if let Some(top) = summary.gastos_por_categoria.first() {
        if top.porcentaje > DOMINANT_CATEGORY_THRESHOLD {
            out.push(Suggestion {
                kind: SuggestionKind::CategoriaDominante,
                severity: Severity::Warning,
                titulo: format!("La categoría \"{}\" concentra tu gasto", top.categoria),
                detalle: format!(
                    "\"{}\" representa el {:.0}% de tus gastos ({:.2}). Considera fijarle un límite mensual.",
                    top.categoria,
                    top.porcentaje * 100.0,
                    top.total
                ),
            });
        }
    }
}

fn savings_rate_rule(summary: &MonthlySummary, out: &mut Vec<Suggestion>) {
    if summary.total_ingresos <= 0.0 || summary.balance < 0.0 {
        // Overspending already produced an alert
        return;
    }
    if summary.tasa_ahorro < LOW_SAVINGS_THRESHOLD {
        out.push(Suggestion {
            kind: SuggestionKind::Ahorro,
            severity: Severity::Warning,
            titulo: "Tasa de ahorro baja".to_string(),
            detalle: format!(
                "Estás ahorrando el {:.0}% de tus ingresos. Un objetivo razonable es al menos el 10%.",
                summary.tasa_ahorro * 100.0
            ),
        });
    } else if summary.tasa_ahorro >= HEALTHY_SAVINGS_THRESHOLD {
        out.push(Suggestion {
            kind: SuggestionKind::Ahorro,
            severity: Severity::Info,
            titulo: "Buen ritmo de ahorro".to_string(),
            detalle: format!(
                "Ahorras el {:.0}% de tus ingresos. Podrías destinar parte a tus metas financieras.",
                summary.tasa_ahorro * 100.0
            ),
        });
    }
}

fn goal_rules(goals: &[FinancialGoal], out: &mut Vec<Suggestion>) {
    if goals.is_empty() {
        out.push(Suggestion {
            kind: SuggestionKind::Meta,
            severity: Severity::Info,
            titulo: "Sin metas financieras".to_string(),
            detalle: "Definir una meta (un fondo de emergencia, por ejemplo) ayuda a sostener el ahorro."
                .to_string(),
        });
        return;
    }

    for goal in goals {
        let progress = goal.progress();
        if progress >= 1.0 {
            out.push(Suggestion {
                kind: SuggestionKind::Meta,
                severity: Severity::Info,
                titulo: format!("Meta \"{}\" completada", goal.nombre),
                detalle: "Alcanzaste el objetivo. Puedes archivarla o plantear la siguiente.".to_string(),
            });
        } else if progress < 0.25 {
            out.push(Suggestion {
                kind: SuggestionKind::Meta,
                severity: Severity::Info,
                titulo: format!("Meta \"{}\" recién comienza", goal.nombre),
                detalle: format!(
                    "Llevas el {:.0}% de {:.2}. Un aporte periódico pequeño la mantiene viva.",
                    progress * 100.0,
                    goal.monto_objetivo
                ),
            });
        }
    }
}

fn empty_activity_rule(summary: &MonthlySummary, out: &mut Vec<Suggestion>) {
    if summary.num_ingresos == 0 && summary.num_gastos == 0 {
        out.push(Suggestion {
            kind: SuggestionKind::Registro,
            severity: Severity::Info,
            titulo: "Sin movimientos registrados".to_string(),
            detalle: "Registra tus ingresos y gastos del período para recibir un análisis útil."
                .to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Expense, Income};
    use crate::reports::monthly_summary;
    use chrono::NaiveDate;

    fn income(monto: f64) -> Income {
        Income {
            id: "i".into(),
            usuario_id: "u".into(),
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
            usuario_id: "u".into(),
            descripcion: "gasto".into(),
            monto,
            categoria: categoria.into(),
            fecha: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            recurrente: false,
            created_at: None,
        }
    }

    fn goal(nombre: &str, objetivo: f64, actual: f64) -> FinancialGoal {
        FinancialGoal {
            id: "m".into(),
            usuario_id: "u".into(),
            nombre: nombre.into(),
            monto_objetivo: objetivo,
            monto_actual: actual,
            fecha_limite: None,
        }
    }

    #[test]
    fn test_overspending_fires_alert_first() {
        let summary = monthly_summary(None, &[income(1000.0)], &[expense(1500.0, "comida")]);
        let suggestions = evaluate(&summary, &[goal("Meta", 100.0, 50.0)]);

        assert_eq!(suggestions[0].kind, SuggestionKind::Sobregasto);
        assert_eq!(suggestions[0].severity, Severity::Alert);
    }

    #[test]
    fn test_dominant_category_warning() {
        let expenses = vec![expense(500.0, "ocio"), expense(100.0, "comida")];
        let summary = monthly_summary(None, &[income(2000.0)], &expenses);
        let suggestions = evaluate(&summary, &[goal("Meta", 100.0, 50.0)]);

        assert!(suggestions
            .iter()
            .any(|s| s.kind == SuggestionKind::CategoriaDominante
                && s.severity == Severity::Warning
                && s.titulo.contains("ocio")));
    }

    #[test]
    fn test_savings_rate_tiers() {
        // 5% savings rate
        let summary = monthly_summary(None, &[income(1000.0)], &[expense(950.0, "varios")]);
        let low = evaluate(&summary, &[goal("Meta", 100.0, 50.0)]);
        assert!(low
            .iter()
            .any(|s| s.kind == SuggestionKind::Ahorro && s.severity == Severity::Warning));

        // 30% savings rate
        let summary = monthly_summary(None, &[income(1000.0)], &[expense(700.0, "varios")]);
        let healthy = evaluate(&summary, &[goal("Meta", 100.0, 50.0)]);
        assert!(healthy
            .iter()
            .any(|s| s.kind == SuggestionKind::Ahorro && s.severity == Severity::Info));
    }

    #[test]
    fn test_missing_goals_nudge() {
        let summary = monthly_summary(None, &[income(1000.0)], &[expense(500.0, "varios")]);
        let suggestions = evaluate(&summary, &[]);
        assert!(suggestions
            .iter()
            .any(|s| s.kind == SuggestionKind::Meta && s.titulo.contains("Sin metas")));
    }

    #[test]
    fn test_completed_goal_congratulated() {
        let summary = monthly_summary(None, &[income(1000.0)], &[expense(500.0, "varios")]);
        let suggestions = evaluate(&summary, &[goal("Viaje", 800.0, 800.0)]);
        assert!(suggestions
            .iter()
            .any(|s| s.kind == SuggestionKind::Meta && s.titulo.contains("completada")));
    }

    #[test]
    fn test_empty_period() {
        let summary = monthly_summary(None, &[], &[]);
        let suggestions = evaluate(&summary, &[goal("Meta", 100.0, 50.0)]);
        assert!(suggestions
            .iter()
            .any(|s| s.kind == SuggestionKind::Registro));
    }

    #[test]
    fn test_deterministic_output() {
        let summary = monthly_summary(None, &[income(1000.0)], &[expense(600.0, "ocio")]);
        let goals = [goal("Meta", 1000.0, 100.0)];
        assert_eq!(evaluate(&summary, &goals), evaluate(&summary, &goals));
    }
}
