//! Suggestions Page
//!
//! Rule-based advice computed server-side from the current month.

use leptos::*;

use crate::api;
use crate::components::Loading;
use crate::pages::current_month;
use crate::state::global::GlobalState;

/// Sugerencias module page
#[component]
pub fn Suggestions() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (rows, set_rows) = create_signal(Vec::<api::SuggestionRow>::new());
    let (loading, set_loading) = create_signal(true);

    let state_for_effect = state.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        let Some(user_id) = state.user_id() else {
            return;
        };
        let token = state.access_token();
        let month = current_month();

        spawn_local(async move {
            match api::fetch_suggestions(&user_id, token.as_deref(), Some(&month)).await {
                Ok(fetched) => set_rows.set(fetched),
                Err(e) => state.show_error(&e),
            }
            set_loading.set(false);
        });
    });

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Sugerencias"</h1>
                <p class="text-gray-400 mt-1">"Consejos generados a partir de tu actividad"</p>
            </div>

            {move || {
                if loading.get() {
                    return view! { <Loading /> }.into_view();
                }

                let current = rows.get();
                if current.is_empty() {
                    view! {
                        <p class="text-gray-400 text-center py-8">
                            "Nada que sugerir por ahora. Sigue así."
                        </p>
                    }.into_view()
                } else {
                    current.into_iter().map(|row| {
                        let (icon, border) = match row.severity.as_str() {
                            "alert" => ("🚨", "border-red-500"),
                            "warning" => ("⚠️", "border-yellow-500"),
                            _ => ("💡", "border-gray-600"),
                        };
                        view! {
                            <div class=format!(
                                "bg-gray-800 rounded-xl p-5 border-l-4 {} mb-3",
                                border
                            )>
                                <div class="flex items-start space-x-3">
                                    <span class="text-2xl">{icon}</span>
                                    <div>
                                        <h3 class="font-semibold">{row.titulo.clone()}</h3>
                                        <p class="text-gray-400 text-sm mt-1">{row.detalle.clone()}</p>
                                    </div>
                                </div>
                            </div>
                        }
                    }).collect_view()
                }
            }}
        </div>
    }
}
