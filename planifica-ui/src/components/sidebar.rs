//! Sidebar Navigation
//!
//! Collapsible sidebar with one entry per registered module.

use leptos::*;
use leptos_router::*;

use crate::modules::REGISTRY;
use crate::state::global::GlobalState;

/// Sidebar with module links and the collapse toggle
#[component]
pub fn Sidebar() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let collapsed = state.sidebar_collapsed;

    let toggle_state = state.clone();
    let signout_state = state.clone();

    view! {
        <aside class=move || format!(
            "bg-gray-800 border-r border-gray-700 min-h-screen transition-all duration-200 {}",
            if collapsed.get() { "w-16" } else { "w-60" }
        )>
            // Brand and collapse toggle
            <div class="flex items-center justify-between h-16 px-4 border-b border-gray-700">
                {move || {
                    if collapsed.get() {
                        view! { <span class="text-2xl">"📒"</span> }.into_view()
                    } else {
                        view! {
                            <A href="/" class="flex items-center space-x-2">
                                <span class="text-2xl">"📒"</span>
                                <span class="text-lg font-bold text-white">"PlanificaPro"</span>
                            </A>
                        }.into_view()
                    }
                }}
                <button
                    on:click=move |_| toggle_state.toggle_sidebar()
                    class="text-gray-400 hover:text-white"
                    title="Mostrar/ocultar menú"
                >
                    "☰"
                </button>
            </div>

            // Module links
            <nav class="py-4 space-y-1">
                <SidebarLink href=String::from("/") icon="🏠" label="Inicio" collapsed=collapsed />
                {REGISTRY
                    .iter()
                    .map(|module| view! {
                        <SidebarLink
                            href=format!("/m/{}", module.name())
                            icon=module.icon()
                            label=module.title()
                            collapsed=collapsed
                        />
                    })
                    .collect_view()}
            </nav>

            // Sign out
            <div class="absolute bottom-4 px-4">
                <button
                    on:click=move |_| signout_state.sign_out()
                    class="text-gray-400 hover:text-white text-sm"
                >
                    {move || if collapsed.get() { "⎋" } else { "Cerrar sesión" }}
                </button>
            </div>
        </aside>
    }
}

/// Individual sidebar link
#[component]
fn SidebarLink(
    href: String,
    icon: &'static str,
    label: &'static str,
    collapsed: RwSignal<bool>,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="flex items-center space-x-3 px-4 py-2 text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            <span class="text-lg">{icon}</span>
            {move || {
                if collapsed.get() {
                    view! {}.into_view()
                } else {
                    view! { <span>{label}</span> }.into_view()
                }
            }}
        </A>
    }
}
