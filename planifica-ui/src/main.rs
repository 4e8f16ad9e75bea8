//! PlanificaPro Dashboard
//!
//! Personal finance dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Income and expense tracking per module
//! - Credit simulation with amortization table
//! - Monthly reports and rule-based suggestions
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It communicates with the PlanificaPro API over HTTP; the
//! session token lives in localStorage.

use leptos::*;

mod api;
mod app;
mod components;
mod modules;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
