//! Dashboard pages

mod credits;
mod dashboard;
mod expenses;
mod incomes;
mod login;
mod reports;
mod suggestions;

pub use credits::Credits;
pub use dashboard::Dashboard;
pub use expenses::Expenses;
pub use incomes::Incomes;
pub use login::Login;
pub use reports::Reports;
pub use suggestions::Suggestions;

/// Current month as `YYYY-MM`, the default report scope.
pub fn current_month() -> String {
    chrono::Local::now().format("%Y-%m").to_string()
}
