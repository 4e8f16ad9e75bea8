//! Benchmarks for the finance hot paths
//!
//! Run with: cargo bench

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use planifica::credit::{schedule, simulate, CreditTerms};
use planifica::model::{Expense, Income};
use planifica::reports::monthly_summary;

fn create_test_rows(count: usize) -> (Vec<Income>, Vec<Expense>) {
    let categories = ["vivienda", "comida", "transporte", "ocio", "salud"];
    let fecha = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();

    let incomes = (0..count / 4)
        .map(|i| Income {
            id: format!("i-{i}"),
            usuario_id: "u-bench".to_string(),
            descripcion: "ingreso".to_string(),
            monto: 100.0 + i as f64,
            categoria: "salario".to_string(),
            fecha,
            recurrente: false,
            created_at: None,
        })
        .collect();

    let expenses = (0..count)
        .map(|i| Expense {
            id: format!("g-{i}"),
            usuario_id: "u-bench".to_string(),
            descripcion: "gasto".to_string(),
            monto: 10.0 + (i % 90) as f64,
            categoria: categories[i % categories.len()].to_string(),
            fecha,
            recurrente: false,
            created_at: None,
        })
        .collect();

    (incomes, expenses)
}

fn bench_credit(c: &mut Criterion) {
    let mut group = c.benchmark_group("credit");

    let terms = CreditTerms {
        monto: 250_000.0,
        tasa_anual: 7.25,
        plazo_meses: 360,
    };

    group.bench_function("simulate", |b| {
        b.iter(|| simulate(black_box(terms)).unwrap())
    });

    group.bench_function("schedule_360", |b| {
        b.iter(|| schedule(black_box(terms)).unwrap())
    });

    group.finish();
}

fn bench_reports(c: &mut Criterion) {
    let mut group = c.benchmark_group("reports");

    for size in [100, 1000, 10000] {
        let (incomes, expenses) = create_test_rows(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("monthly_summary_{}", size), |b| {
            b.iter(|| monthly_summary(None, black_box(&incomes), black_box(&expenses)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_credit, bench_reports);
criterion_main!(benches);
