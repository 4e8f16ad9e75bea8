//! Login Page
//!
//! Password sign-in and account creation against the proxied Supabase auth.

use leptos::*;
use leptos_router::use_navigate;

use crate::api;
use crate::state::global::GlobalState;
use crate::state::session::{StoredSession, StoredUser};

/// Sign-in / sign-up page
#[component]
pub fn Login() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (nombre, set_nombre) = create_signal(String::new());
    let (registering, set_registering) = create_signal(false);
    let (submitting, set_submitting) = create_signal(false);

    let navigate = use_navigate();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let email_value = email.get();
        let password_value = password.get();
        let nombre_value = nombre.get();
        let is_register = registering.get();

        if email_value.is_empty() || password_value.is_empty() {
            state.show_error("Correo y contraseña son obligatorios");
            return;
        }

        set_submitting.set(true);

        let state = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = if is_register {
                api::sign_up(&email_value, &password_value, &nombre_value).await
            } else {
                api::login(&email_value, &password_value).await
            };

            match result {
                Ok(session) => {
                    let nombre = session.user.user_metadata["nombre"]
                        .as_str()
                        .map(|s| s.to_string());
                    state.set_session(StoredSession {
                        access_token: session.access_token,
                        user: StoredUser {
                            id: session.user.id,
                            email: session.user.email,
                            nombre,
                        },
                    });
                    state.show_success("Sesión iniciada");
                    navigate("/", Default::default());
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="flex items-center justify-center min-h-screen">
            <div class="bg-gray-800 rounded-xl p-8 w-full max-w-md mx-4">
                <div class="text-center mb-8">
                    <span class="text-4xl">"📒"</span>
                    <h1 class="text-2xl font-bold mt-2">"PlanificaPro"</h1>
                    <p class="text-gray-400 mt-1">"Tu panel de finanzas personales"</p>
                </div>

                <form on:submit=on_submit class="space-y-4">
                    {move || {
                        if registering.get() {
                            view! {
                                <div>
                                    <label class="block text-sm text-gray-400 mb-2">"Nombre"</label>
                                    <input
                                        type="text"
                                        placeholder="Ana"
                                        prop:value=move || nombre.get()
                                        on:input=move |ev| set_nombre.set(event_target_value(&ev))
                                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                                    />
                                </div>
                            }.into_view()
                        } else {
                            view! {}.into_view()
                        }
                    }}

                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"Correo"</label>
                        <input
                            type="email"
                            placeholder="ana@ejemplo.com"
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            class="w-full bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                    </div>

                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"Contraseña"</label>
                        <input
                            type="password"
                            placeholder="••••••"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            class="w-full bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                    </div>

                    <button
                        type="submit"
                        disabled=move || submitting.get()
                        class="w-full px-4 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                               rounded-lg font-medium transition-colors"
                    >
                        {move || {
                            if submitting.get() {
                                "Enviando..."
                            } else if registering.get() {
                                "Crear cuenta"
                            } else {
                                "Entrar"
                            }
                        }}
                    </button>
                </form>

                <button
                    on:click=move |_| set_registering.update(|r| *r = !*r)
                    class="w-full mt-4 text-sm text-gray-400 hover:text-white"
                >
                    {move || {
                        if registering.get() {
                            "¿Ya tienes cuenta? Inicia sesión"
                        } else {
                            "¿Sin cuenta? Regístrate"
                        }
                    }}
                </button>
            </div>
        </div>
    }
}
