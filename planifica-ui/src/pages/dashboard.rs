//! Dashboard Page
//!
//! Overview: headline figures for the current month plus module shortcuts.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::summary_card::format_money;
use crate::components::SummaryCard;
use crate::modules::REGISTRY;
use crate::pages::current_month;
use crate::state::global::GlobalState;

/// Dashboard overview page
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (summary, set_summary) = create_signal(None::<api::Summary>);

    // Fetch the current-month summary on mount
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        let Some(user_id) = state.user_id() else {
            return;
        };
        let token = state.access_token();
        let month = current_month();

        spawn_local(async move {
            match api::fetch_summary(&user_id, token.as_deref(), Some(&month)).await {
                Ok(result) => set_summary.set(Some(result)),
                Err(e) => state.show_error(&e),
            }
        });
    });

    let greeting = {
        let state = state.clone();
        move || {
            state
                .session
                .get()
                .and_then(|s| s.user.nombre)
                .map(|nombre| format!("Hola, {}", nombre))
                .unwrap_or_else(|| "Hola".to_string())
        }
    };

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">{greeting}</h1>
                <p class="text-gray-400 mt-1">"Resumen del mes en curso"</p>
            </div>

            // Headline figures
            {move || {
                summary.get().map(|s| view! {
                    <div class="grid md:grid-cols-3 gap-4">
                        <SummaryCard
                            label="Ingresos"
                            value=format_money(s.total_ingresos)
                            value_class="text-green-400"
                        />
                        <SummaryCard
                            label="Gastos"
                            value=format_money(s.total_gastos)
                            value_class="text-red-400"
                        />
                        <SummaryCard
                            label="Balance"
                            value=format_money(s.balance)
                            value_class=if s.balance >= 0.0 { "text-green-400" } else { "text-red-400" }
                        />
                    </div>
                })
            }}

            // Module shortcuts
            <section>
                <h2 class="text-xl font-semibold mb-4">"Módulos"</h2>
                <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-4">
                    {REGISTRY
                        .iter()
                        .map(|module| view! {
                            <A
                                href=format!("/m/{}", module.name())
                                class="bg-gray-800 rounded-xl p-5 border border-gray-700
                                       hover:border-gray-600 transition-colors block"
                            >
                                <span class="text-3xl">{module.icon()}</span>
                                <h3 class="font-semibold mt-2">{module.title()}</h3>
                            </A>
                        })
                        .collect_view()}
                </div>
            </section>
        </div>
    }
}
