//! Loading Indicator

use leptos::*;

/// Centered loading spinner with a label
#[component]
pub fn Loading(#[prop(default = "Cargando...")] label: &'static str) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center space-x-3 py-12 text-gray-400">
            <div class="loading-spinner w-5 h-5" />
            <span>{label}</span>
        </div>
    }
}
