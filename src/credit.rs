//! Credit Simulation
//!
//! Loan amortization math for the créditos module. Pure functions over
//! validated terms.
//!
//! Monthly payment uses the standard annuity formula
//! `P·r·(1+r)^n / ((1+r)^n − 1)` with monthly rate `r = tasa_anual/100/12`,
//! falling back to straight division when the rate is zero.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input terms for a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditTerms {
    /// Principal amount
    pub monto: f64,
    /// Annual interest rate, percent (18.5 means 18.5%)
    pub tasa_anual: f64,
    /// Term in months
    pub plazo_meses: u32,
}

/// Derived figures for a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditSummary {
    pub cuota_mensual: f64,
    pub total_pagar: f64,
    pub total_intereses: f64,
    /// Monthly rate as a fraction (0.0154167 for 18.5% annual)
    pub tasa_mensual: f64,
}

/// One month of the amortization table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based month number
    pub mes: u32,
    pub cuota: f64,
    pub interes: f64,
    pub capital: f64,
    pub saldo: f64,
}

/// Rejected input terms.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CreditError {
    #[error("el monto debe ser mayor que cero")]
    InvalidAmount,

    #[error("la tasa anual no puede ser negativa")]
    InvalidRate,

    #[error("el plazo debe ser de al menos un mes")]
    InvalidTerm,
}

impl CreditTerms {
    fn validate(&self) -> Result<(), CreditError> {
        if !(self.monto > 0.0) || !self.monto.is_finite() {
            return Err(CreditError::InvalidAmount);
        }
        if !(self.tasa_anual >= 0.0) || !self.tasa_anual.is_finite() {
            return Err(CreditError::InvalidRate);
        }
        if self.plazo_meses < 1 {
            return Err(CreditError::InvalidTerm);
        }
        Ok(())
    }

    /// Monthly rate as a fraction.
    pub fn tasa_mensual(&self) -> f64 {
        self.tasa_anual / 100.0 / 12.0
    }
}

/// Compute payment, total and interest for the given terms.
pub fn simulate(terms: CreditTerms) -> Result<CreditSummary, CreditError> {
    terms.validate()?;

    let n = terms.plazo_meses as f64;
    let r = terms.tasa_mensual();

    let cuota_mensual = if r == 0.0 {
        terms.monto / n
    } else {
        let factor = (1.0 + r).powf(n);
        terms.monto * r * factor / (factor - 1.0)
    };

    let total_pagar = cuota_mensual * n;
    let total_intereses = total_pagar - terms.monto;

    Ok(CreditSummary {
        cuota_mensual,
        total_pagar,
        total_intereses,
        tasa_mensual: r,
    })
}

/// Month-by-month amortization table.
///
/// The final row absorbs accumulated rounding so the balance lands on
/// exactly zero.
pub fn schedule(terms: CreditTerms) -> Result<Vec<ScheduleRow>, CreditError> {
    let summary = simulate(terms)?;
    let r = summary.tasa_mensual;

    let mut rows = Vec::with_capacity(terms.plazo_meses as usize);
    let mut saldo = terms.monto;

    for mes in 1..=terms.plazo_meses {
        let interes = saldo * r;
        let (cuota, capital) = if mes == terms.plazo_meses {
            // Last payment clears whatever balance remains
            (saldo + interes, saldo)
        } else {
            (summary.cuota_mensual, summary.cuota_mensual - interes)
        };
        saldo = (saldo - capital).max(0.0);

        rows.push(ScheduleRow {
            mes,
            cuota,
            interes,
            capital,
            saldo,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 0.01;

    fn example_terms() -> CreditTerms {
        CreditTerms {
            monto: 15000.0,
            tasa_anual: 18.5,
            plazo_meses: 24,
        }
    }

    #[test]
    fn test_worked_example() {
        // 15000 at 18.5% over 24 months
        let summary = simulate(example_terms()).unwrap();

        assert!((summary.tasa_mensual - 0.0154167).abs() < 1e-6);
        assert!((summary.cuota_mensual - 747.07).abs() < TOLERANCE);
        assert!((summary.total_pagar - 17929.68).abs() < 0.5);
        assert!((summary.total_intereses - 2929.68).abs() < 0.5);
    }

    #[test]
    fn test_totals_are_consistent() {
        for (monto, tasa, plazo) in [
            (15000.0, 18.5, 24),
            (500.0, 0.0, 10),
            (250_000.0, 7.25, 360),
            (1200.0, 45.0, 6),
        ] {
            let terms = CreditTerms {
                monto,
                tasa_anual: tasa,
                plazo_meses: plazo,
            };
            let s = simulate(terms).unwrap();

            assert!(
                (s.cuota_mensual * plazo as f64 - s.total_pagar).abs() < TOLERANCE,
                "cuota*n vs total mismatch for {:?}",
                terms
            );
            assert!(
                (s.total_pagar - monto - s.total_intereses).abs() < TOLERANCE,
                "total-monto vs intereses mismatch for {:?}",
                terms
            );
        }
    }

    #[test]
    fn test_zero_rate_is_straight_division() {
        let summary = simulate(CreditTerms {
            monto: 1200.0,
            tasa_anual: 0.0,
            plazo_meses: 12,
        })
        .unwrap();

        assert_eq!(summary.cuota_mensual, 100.0);
        assert_eq!(summary.total_intereses, 0.0);
        assert_eq!(summary.tasa_mensual, 0.0);
    }

    #[test]
    fn test_rejects_invalid_terms() {
        let base = example_terms();

        assert_eq!(
            simulate(CreditTerms { monto: 0.0, ..base }),
            Err(CreditError::InvalidAmount)
        );
        assert_eq!(
            simulate(CreditTerms {
                monto: -100.0,
                ..base
            }),
            Err(CreditError::InvalidAmount)
        );
        assert_eq!(
            simulate(CreditTerms {
                tasa_anual: -1.0,
                ..base
            }),
            Err(CreditError::InvalidRate)
        );
        assert_eq!(
            simulate(CreditTerms {
                plazo_meses: 0,
                ..base
            }),
            Err(CreditError::InvalidTerm)
        );
        assert_eq!(
            simulate(CreditTerms {
                monto: f64::NAN,
                ..base
            }),
            Err(CreditError::InvalidAmount)
        );
    }

    #[test]
    fn test_schedule_amortizes_to_zero() {
        let rows = schedule(example_terms()).unwrap();

        assert_eq!(rows.len(), 24);
        assert_eq!(rows[0].mes, 1);

        // Balance strictly decreases and ends at zero
        let mut prev = f64::INFINITY;
        for row in &rows {
            assert!(row.saldo < prev);
            prev = row.saldo;
        }
        assert!(rows.last().unwrap().saldo.abs() < 1e-9);

        // Principal portions sum back to the loan amount
        let capital: f64 = rows.iter().map(|r| r.capital).sum();
        assert!((capital - 15000.0).abs() < TOLERANCE);

        // Interest decreases over the life of the loan
        assert!(rows[0].interes > rows[23].interes);
    }

    #[test]
    fn test_schedule_zero_rate() {
        let rows = schedule(CreditTerms {
            monto: 1200.0,
            tasa_anual: 0.0,
            plazo_meses: 12,
        })
        .unwrap();

        assert!(rows.iter().all(|r| r.interes == 0.0));
        assert!((rows[5].cuota - 100.0).abs() < 1e-9);
        assert!(rows.last().unwrap().saldo.abs() < 1e-9);
    }
}
