//! Module Registry
//!
//! Typed lookup table for the dashboard sections. Each module name maps to
//! a [`Module`] variant; unknown names resolve to the designated fallback
//! view instead of failing.

use leptos::*;

use crate::pages::{Credits, Expenses, Incomes, Reports, Suggestions};

/// A dashboard section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Module {
    Ingresos,
    Gastos,
    Creditos,
    Reportes,
    Sugerencias,
}

/// Registry order drives the sidebar.
pub const REGISTRY: &[Module] = &[
    Module::Ingresos,
    Module::Gastos,
    Module::Creditos,
    Module::Reportes,
    Module::Sugerencias,
];

impl Module {
    /// URL segment and registry key.
    pub fn name(self) -> &'static str {
        match self {
            Module::Ingresos => "ingresos",
            Module::Gastos => "gastos",
            Module::Creditos => "creditos",
            Module::Reportes => "reportes",
            Module::Sugerencias => "sugerencias",
        }
    }

    /// Sidebar label.
    pub fn title(self) -> &'static str {
        match self {
            Module::Ingresos => "Ingresos",
            Module::Gastos => "Gastos",
            Module::Creditos => "Créditos",
            Module::Reportes => "Reportes",
            Module::Sugerencias => "Sugerencias",
        }
    }

    /// Sidebar icon.
    pub fn icon(self) -> &'static str {
        match self {
            Module::Ingresos => "💰",
            Module::Gastos => "🧾",
            Module::Creditos => "🏦",
            Module::Reportes => "📊",
            Module::Sugerencias => "💡",
        }
    }

    /// Look a module up by name. Unknown names return None and the caller
    /// renders the fallback view.
    pub fn resolve(name: &str) -> Option<Module> {
        REGISTRY.iter().copied().find(|m| m.name() == name)
    }

    /// Render the module's page.
    pub fn view(self) -> View {
        match self {
            Module::Ingresos => view! { <Incomes /> }.into_view(),
            Module::Gastos => view! { <Expenses /> }.into_view(),
            Module::Creditos => view! { <Credits /> }.into_view(),
            Module::Reportes => view! { <Reports /> }.into_view(),
            Module::Sugerencias => view! { <Suggestions /> }.into_view(),
        }
    }
}

/// Fallback for unknown module names.
#[component]
pub fn UnderConstruction(#[prop(into)] name: String) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[50vh] text-center">
            <div class="text-6xl mb-4">"🚧"</div>
            <h1 class="text-2xl font-bold mb-2">"Módulo en construcción"</h1>
            <p class="text-gray-400">
                "La sección \"" {name} "\" no está disponible todavía."
            </p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_modules() {
        assert_eq!(Module::resolve("ingresos"), Some(Module::Ingresos));
        assert_eq!(Module::resolve("gastos"), Some(Module::Gastos));
        assert_eq!(Module::resolve("creditos"), Some(Module::Creditos));
        assert_eq!(Module::resolve("reportes"), Some(Module::Reportes));
        assert_eq!(Module::resolve("sugerencias"), Some(Module::Sugerencias));
    }

    #[test]
    fn test_resolve_unknown_falls_through() {
        assert_eq!(Module::resolve("pagos"), None);
        assert_eq!(Module::resolve(""), None);
        assert_eq!(Module::resolve("INGRESOS"), None);
    }

    #[test]
    fn test_registry_names_are_unique() {
        let mut names: Vec<_> = REGISTRY.iter().map(|m| m.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), REGISTRY.len());
    }
}
