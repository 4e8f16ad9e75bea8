//! Summary Card
//!
//! Small stat card used on the dashboard and report pages.

use leptos::*;

/// One headline figure with a label
#[component]
pub fn SummaryCard(
    #[prop(into)] label: String,
    #[prop(into)] value: String,
    #[prop(default = "text-white")] value_class: &'static str,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl p-4 border border-gray-700">
            <p class="text-gray-400 text-sm">{label}</p>
            <p class=format!("text-2xl font-bold mt-1 {}", value_class)>{value}</p>
        </div>
    }
}

/// Format an amount the way the dashboard shows money
pub fn format_money(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    format!("{}${:.2}", sign, abs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.5), "$1234.50");
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(-42.75), "-$42.75");
    }
}
