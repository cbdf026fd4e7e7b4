//! EventDesk
//!
//! Admin console for the event-booking platform, built with Leptos (WASM).
//!
//! # Features
//!
//! - Event creation with resource allocation
//! - Resource management with type-specific capacity rules
//! - Attendance registration for users and external attendees
//! - Six reporting views over scheduling conflicts and utilization
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. All domain rules live in the booking API it talks to over
//! HTTP; the console renders server responses and reports server errors.

use leptos::*;

mod api;
mod app;
mod components;
mod model;
mod pages;
mod reports;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
