//! Credits Page
//!
//! Loan simulator: run an ephemeral simulation, optionally persist it,
//! and review saved simulations.

use leptos::*;

use crate::api;
use crate::components::summary_card::format_money;
use crate::components::SummaryCard;
use crate::state::global::GlobalState;

/// Créditos module page
#[component]
pub fn Credits() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (monto, set_monto) = create_signal("15000".to_string());
    let (tasa, set_tasa) = create_signal("18.5".to_string());
    let (plazo, set_plazo) = create_signal("24".to_string());
    let (con_tabla, set_con_tabla) = create_signal(false);
    let (result, set_result) = create_signal(None::<api::SimulationResult>);
    let (saved, set_saved) = create_signal(Vec::<api::SavedSimulation>::new());
    let (working, set_working) = create_signal(false);

    // Load saved simulations on mount
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        let Some(user_id) = state.user_id() else {
            return;
        };
        let token = state.access_token();
        spawn_local(async move {
            match api::fetch_simulations(&user_id, token.as_deref()).await {
                Ok(fetched) => set_saved.set(fetched),
                Err(e) => state.show_error(&e),
            }
        });
    });

    let parse_terms = move || -> Result<(f64, f64, u32), String> {
        let monto: f64 = monto
            .get()
            .parse()
            .map_err(|_| "El monto debe ser un número".to_string())?;
        let tasa: f64 = tasa
            .get()
            .parse()
            .map_err(|_| "La tasa debe ser un número".to_string())?;
        let plazo: u32 = plazo
            .get()
            .parse()
            .map_err(|_| "El plazo debe ser un entero de meses".to_string())?;
        Ok((monto, tasa, plazo))
    };

    let simulate_state = state.clone();
    let on_simulate = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let state = simulate_state.clone();
        let (monto, tasa, plazo) = match parse_terms() {
            Ok(terms) => terms,
            Err(e) => {
                state.show_error(&e);
                return;
            }
        };

        set_working.set(true);
        let incluir_tabla = con_tabla.get();

        spawn_local(async move {
            match api::simulate_credit(monto, tasa, plazo, incluir_tabla).await {
                Ok(simulation) => set_result.set(Some(simulation)),
                Err(e) => state.show_error(&e),
            }
            set_working.set(false);
        });
    };

    let save_state = state.clone();
    let on_save = move |_| {
        let state = save_state.clone();
        let Some(user_id) = state.user_id() else {
            return;
        };
        let (monto, tasa, plazo) = match parse_terms() {
            Ok(terms) => terms,
            Err(e) => {
                state.show_error(&e);
                return;
            }
        };
        let token = state.access_token();

        spawn_local(async move {
            match api::save_simulation(&user_id, monto, tasa, plazo, token.as_deref()).await {
                Ok(row) => {
                    set_saved.update(|rows| rows.insert(0, row));
                    state.show_success("Simulación guardada");
                }
                Err(e) => state.show_error(&e),
            }
        });
    };

    let delete_state = state.clone();
    let on_delete = move |id: String| {
        let state = delete_state.clone();
        let Some(user_id) = state.user_id() else {
            return;
        };
        let token = state.access_token();
        spawn_local(async move {
            match api::delete_simulation(&id, &user_id, token.as_deref()).await {
                Ok(()) => set_saved.update(|rows| rows.retain(|r| r.id != id)),
                Err(e) => state.show_error(&e),
            }
        });
    };

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Simulador de crédito"</h1>
                <p class="text-gray-400 mt-1">"Calcula la cuota mensual y el costo total"</p>
            </div>

            // Terms form
            <form on:submit=on_simulate class="bg-gray-800 rounded-xl p-6 grid md:grid-cols-4 gap-4 items-end">
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Monto"</label>
                    <input
                        type="number"
                        step="0.01"
                        min="0"
                        prop:value=move || monto.get()
                        on:input=move |ev| set_monto.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Tasa anual (%)"</label>
                    <input
                        type="number"
                        step="0.01"
                        min="0"
                        prop:value=move || tasa.get()
                        on:input=move |ev| set_tasa.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Plazo (meses)"</label>
                    <input
                        type="number"
                        min="1"
                        prop:value=move || plazo.get()
                        on:input=move |ev| set_plazo.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                <label class="flex items-center space-x-2 text-sm text-gray-400">
                    <input
                        type="checkbox"
                        prop:checked=move || con_tabla.get()
                        on:change=move |ev| set_con_tabla.set(event_target_checked(&ev))
                    />
                    <span>"Tabla de amortización"</span>
                </label>

                <button
                    type="submit"
                    disabled=move || working.get()
                    class="md:col-span-4 px-4 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           rounded-lg font-medium transition-colors"
                >
                    {move || if working.get() { "Calculando..." } else { "Simular" }}
                </button>
            </form>

            // Result panel
            {move || {
                result.get().map(|r| view! {
                    <div class="space-y-4">
                        <div class="grid md:grid-cols-3 gap-4">
                            <SummaryCard
                                label="Cuota mensual"
                                value=format_money(r.cuota_mensual)
                                value_class="text-primary-400"
                            />
                            <SummaryCard label="Total a pagar" value=format_money(r.total_pagar) />
                            <SummaryCard
                                label="Total intereses"
                                value=format_money(r.total_intereses)
                                value_class="text-yellow-400"
                            />
                        </div>

                        <button
                            on:click=on_save.clone()
                            class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm transition-colors"
                        >
                            "Guardar simulación"
                        </button>

                        {r.tabla.map(|tabla| view! {
                            <div class="bg-gray-800 rounded-xl p-4 overflow-x-auto">
                                <table class="w-full text-sm">
                                    <thead class="text-gray-400">
                                        <tr>
                                            <th class="text-left py-2">"Mes"</th>
                                            <th class="text-right py-2">"Cuota"</th>
                                            <th class="text-right py-2">"Interés"</th>
                                            <th class="text-right py-2">"Capital"</th>
                                            <th class="text-right py-2">"Saldo"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {tabla.into_iter().map(|row| view! {
                                            <tr class="border-t border-gray-700">
                                                <td class="py-1">{row.mes}</td>
                                                <td class="text-right">{format_money(row.cuota)}</td>
                                                <td class="text-right">{format_money(row.interes)}</td>
                                                <td class="text-right">{format_money(row.capital)}</td>
                                                <td class="text-right">{format_money(row.saldo)}</td>
                                            </tr>
                                        }).collect_view()}
                                    </tbody>
                                </table>
                            </div>
                        })}
                    </div>
                })
            }}

            // Saved simulations
            <section>
                <h2 class="text-xl font-semibold mb-4">"Simulaciones guardadas"</h2>
                {move || {
                    let current = saved.get();
                    if current.is_empty() {
                        view! {
                            <p class="text-gray-400">"No has guardado simulaciones."</p>
                        }.into_view()
                    } else {
                        current.into_iter().map(|row| {
                            let on_delete = on_delete.clone();
                            let id = row.id.clone();
                            view! {
                                <div class="bg-gray-800 rounded-lg px-4 py-3 flex items-center justify-between
                                            border border-gray-700 mb-2">
                                    <div>
                                        <p class="font-medium">
                                            {format_money(row.monto)} " · "
                                            {row.plazo_meses} " meses · "
                                            {row.tasa_anual} "% anual"
                                        </p>
                                        <p class="text-gray-400 text-sm">
                                            "Cuota: "
                                            {row.cuota_mensual.map(format_money).unwrap_or_else(|| "-".into())}
                                            " · " {row.estado.clone()}
                                        </p>
                                    </div>
                                    <button
                                        on:click=move |_| on_delete(id.clone())
                                        class="text-gray-500 hover:text-red-400"
                                        title="Eliminar"
                                    >
                                        "🗑"
                                    </button>
                                </div>
                            }
                        }).collect_view()
                    }
                }}
            </section>
        </div>
    }
}
