//! Reports Page
//!
//! Monthly summary with a per-category breakdown.

use leptos::*;

use crate::api;
use crate::components::summary_card::format_money;
use crate::components::{Loading, SummaryCard};
use crate::pages::current_month;
use crate::state::global::GlobalState;

/// Reportes module page
#[component]
pub fn Reports() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (month, set_month) = create_signal(current_month());
    let (summary, set_summary) = create_signal(None::<api::Summary>);
    let (loading, set_loading) = create_signal(false);

    // Refetch whenever the month changes
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let selected = month.get();
        let state = state_for_effect.clone();
        let Some(user_id) = state.user_id() else {
            return;
        };
        let token = state.access_token();

        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_summary(&user_id, token.as_deref(), Some(&selected)).await {
                Ok(result) => set_summary.set(Some(result)),
                Err(e) => state.show_error(&e),
            }
            set_loading.set(false);
        });
    });

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Reportes"</h1>
                    <p class="text-gray-400 mt-1">"Resumen mensual de tu actividad"</p>
                </div>

                <input
                    type="month"
                    prop:value=move || month.get()
                    on:input=move |ev| set_month.set(event_target_value(&ev))
                    class="bg-gray-700 rounded-lg px-4 py-2 border border-gray-600
                           focus:border-primary-500 focus:outline-none"
                />
            </div>

            {move || {
                if loading.get() {
                    return view! { <Loading /> }.into_view();
                }

                match summary.get() {
                    None => view! {
                        <p class="text-gray-400 text-center py-8">"Selecciona un mes."</p>
                    }.into_view(),
                    Some(s) => {
                        let breakdown = s.gastos_por_categoria.clone();
                        view! {
                            <div class="space-y-8">
                                <div class="grid md:grid-cols-4 gap-4">
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
                                    <SummaryCard
                                        label="Tasa de ahorro"
                                        value=format!("{:.0}%", s.tasa_ahorro * 100.0)
                                    />
                                </div>

                                <section class="bg-gray-800 rounded-xl p-6">
                                    <h2 class="text-xl font-semibold mb-4">"Gastos por categoría"</h2>
                                    {if breakdown.is_empty() {
                                        view! {
                                            <p class="text-gray-400">"Sin gastos en este período."</p>
                                        }.into_view()
                                    } else {
                                        breakdown.into_iter().map(|c| view! {
                                            <div class="mb-3">
                                                <div class="flex justify-between text-sm mb-1">
                                                    <span class="capitalize">{c.categoria.clone()}</span>
                                                    <span class="text-gray-400">
                                                        {format_money(c.total)}
                                                        " (" {format!("{:.0}%", c.porcentaje * 100.0)} ")"
                                                    </span>
                                                </div>
                                                <div class="bg-gray-700 rounded-full h-2">
                                                    <div
                                                        class="bg-primary-500 rounded-full h-2"
                                                        style=format!("width: {:.0}%", c.porcentaje * 100.0)
                                                    />
                                                </div>
                                            </div>
                                        }).collect_view()
                                    }}
                                </section>
                            </div>
                        }.into_view()
                    }
                }
            }}
        </div>
    }
}
