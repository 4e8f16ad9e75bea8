//! App Root Component
//!
//! Main application component with routing, session guard and global
//! providers.

use leptos::*;
use leptos_router::*;

use crate::components::{Sidebar, Toast};
use crate::modules::{Module, UnderConstruction};
use crate::pages::{Dashboard, Login};
use crate::state::global::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white">
                <Routes>
                    <Route path="/login" view=Login />
                    <Route path="/" view=Shell>
                        <Route path="" view=Dashboard />
                        <Route path="m/:modulo" view=ModuleOutlet />
                    </Route>
                    <Route path="/*any" view=NotFound />
                </Routes>

                // Toast notifications
                <Toast />
            </div>
        </Router>
    }
}

/// Authenticated layout: sidebar plus the active page.
/// Redirects to the login page when no session is stored.
#[component]
fn Shell() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        {move || {
            if state.session.get().is_none() {
                view! { <Redirect path="/login" /> }.into_view()
            } else {
                view! {
                    <div class="flex">
                        <Sidebar />
                        <main class="flex-1 px-6 py-8">
                            <Outlet />
                        </main>
                    </div>
                }.into_view()
            }
        }}
    }
}

/// Resolve the `:modulo` URL segment through the module registry.
/// Unknown names get the fallback view, never an error page.
#[component]
fn ModuleOutlet() -> impl IntoView {
    let params = use_params_map();

    view! {
        {move || {
            let name = params.with(|p| p.get("modulo").cloned().unwrap_or_default());
            match Module::resolve(&name) {
                Some(module) => module.view(),
                None => view! { <UnderConstruction name=name /> }.into_view(),
            }
        }}
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Página no encontrada"</h1>
            <p class="text-gray-400 mb-6">"La página que buscas no existe."</p>
            <A
                href="/"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Ir al panel"
            </A>
        </div>
    }
}
