//! Incomes Page
//!
//! List, create and delete income records.

use leptos::*;

use crate::api;
use crate::components::summary_card::format_money;
use crate::state::global::GlobalState;

const CATEGORIES: &[&str] = &["salario", "freelance", "inversiones", "ventas", "otros"];

/// Ingresos module page
#[component]
pub fn Incomes() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (rows, set_rows) = create_signal(Vec::<api::IncomeRow>::new());
    let (descripcion, set_descripcion) = create_signal(String::new());
    let (monto, set_monto) = create_signal(String::new());
    let (categoria, set_categoria) = create_signal(CATEGORIES[0].to_string());
    let (fecha, set_fecha) = create_signal(today());
    let (recurrente, set_recurrente) = create_signal(false);
    let (submitting, set_submitting) = create_signal(false);

    // Load rows on mount
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        let Some(user_id) = state.user_id() else {
            return;
        };
        let token = state.access_token();
        spawn_local(async move {
            match api::fetch_incomes(&user_id, token.as_deref(), None).await {
                Ok(fetched) => set_rows.set(fetched),
                Err(e) => state.show_error(&e),
            }
        });
    });

    let submit_state = state.clone();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let state = submit_state.clone();
        let Some(user_id) = state.user_id() else {
            return;
        };

        let Ok(monto_value) = monto.get().parse::<f64>() else {
            state.show_error("El monto debe ser un número");
            return;
        };
        if monto_value <= 0.0 {
            state.show_error("El monto debe ser mayor que cero");
            return;
        }
        if descripcion.get().is_empty() {
            state.show_error("La descripción es obligatoria");
            return;
        }

        set_submitting.set(true);

        let payload = api::RecordPayload {
            usuario_id: user_id,
            descripcion: descripcion.get(),
            monto: monto_value,
            categoria: categoria.get(),
            fecha: fecha.get(),
            recurrente: recurrente.get(),
        };
        let token = state.access_token();

        spawn_local(async move {
            match api::create_income(&payload, token.as_deref()).await {
                Ok(row) => {
                    set_rows.update(|rows| rows.insert(0, row));
                    set_descripcion.set(String::new());
                    set_monto.set(String::new());
                    state.show_success("Ingreso registrado");
                }
                Err(e) => state.show_error(&e),
            }
            set_submitting.set(false);
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
            match api::delete_income(&id, &user_id, token.as_deref()).await {
                Ok(()) => {
                    set_rows.update(|rows| rows.retain(|r| r.id != id));
                    state.show_success("Ingreso eliminado");
                }
                Err(e) => state.show_error(&e),
            }
        });
    };

    let total = move || rows.get().iter().map(|r| r.monto).sum::<f64>();

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Ingresos"</h1>
                    <p class="text-gray-400 mt-1">"Registra tus fuentes de ingreso"</p>
                </div>
                <div class="text-right">
                    <p class="text-gray-400 text-sm">"Total"</p>
                    <p class="text-2xl font-bold text-green-400">{move || format_money(total())}</p>
                </div>
            </div>

            // New income form
            <form on:submit=on_submit class="bg-gray-800 rounded-xl p-6 grid md:grid-cols-5 gap-4 items-end">
                <div class="md:col-span-2">
                    <label class="block text-sm text-gray-400 mb-2">"Descripción"</label>
                    <input
                        type="text"
                        placeholder="Salario de marzo"
                        prop:value=move || descripcion.get()
                        on:input=move |ev| set_descripcion.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Monto"</label>
                    <input
                        type="number"
                        step="0.01"
                        min="0"
                        placeholder="0.00"
                        prop:value=move || monto.get()
                        on:input=move |ev| set_monto.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Categoría"</label>
                    <select
                        on:change=move |ev| set_categoria.set(event_target_value(&ev))
                        prop:value=move || categoria.get()
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    >
                        {CATEGORIES
                            .iter()
                            .map(|c| view! { <option value=*c>{*c}</option> })
                            .collect_view()}
                    </select>
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Fecha"</label>
                    <input
                        type="date"
                        prop:value=move || fecha.get()
                        on:input=move |ev| set_fecha.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                <label class="flex items-center space-x-2 text-sm text-gray-400">
                    <input
                        type="checkbox"
                        prop:checked=move || recurrente.get()
                        on:change=move |ev| set_recurrente.set(event_target_checked(&ev))
                    />
                    <span>"Recurrente"</span>
                </label>

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="md:col-span-5 px-4 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           rounded-lg font-medium transition-colors"
                >
                    {move || if submitting.get() { "Guardando..." } else { "+ Agregar ingreso" }}
                </button>
            </form>

            // Income list
            <div class="space-y-2">
                {move || {
                    let current = rows.get();
                    if current.is_empty() {
                        view! {
                            <p class="text-gray-400 text-center py-8">
                                "Sin ingresos todavía. Agrega el primero."
                            </p>
                        }.into_view()
                    } else {
                        current.into_iter().map(|row| {
                            let on_delete = on_delete.clone();
                            let id = row.id.clone();
                            view! {
                                <div class="bg-gray-800 rounded-lg px-4 py-3 flex items-center justify-between
                                            border border-gray-700">
                                    <div>
                                        <p class="font-medium">{row.descripcion.clone()}</p>
                                        <p class="text-gray-400 text-sm">
                                            {row.categoria.clone()} " · " {row.fecha.clone()}
                                            {if row.recurrente { " · recurrente" } else { "" }}
                                        </p>
                                    </div>
                                    <div class="flex items-center space-x-4">
                                        <span class="text-green-400 font-semibold">
                                            {format_money(row.monto)}
                                        </span>
                                        <button
                                            on:click=move |_| on_delete(id.clone())
                                            class="text-gray-500 hover:text-red-400"
                                            title="Eliminar"
                                        >
                                            "🗑"
                                        </button>
                                    </div>
                                </div>
                            }
                        }).collect_view()
                    }
                }}
            </div>
        </div>
    }
}

/// Today as `YYYY-MM-DD` for the date input default
fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
