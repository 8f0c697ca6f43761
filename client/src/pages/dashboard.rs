//! Authenticated dashboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Landing route after sign-in. Redirects to `/auth` once auth has settled
//! without a session, hides its sticky header while scrolling down, and
//! offers sign-out.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::{AuthSessionManager, Operation};

use crate::components::loading::Loading;
use crate::state::auth::AuthState;
use crate::state::scroll::should_hide_header;
use crate::util::auth::{inline_feedback, install_unauth_redirect};
use crate::util::scroll::{use_scroll_direction, use_scrolled};

/// Offset past which the header gains its solid background.
pub const HEADER_SOLID_OFFSET_PX: u32 = 50;

/// Account creation day as `YYYY-MM-DD`, in UTC.
pub fn member_since(created_at_ms: Option<i64>) -> Option<String> {
    let nanos = i128::from(created_at_ms?) * 1_000_000;
    match time::OffsetDateTime::from_unix_timestamp_nanos(nanos) {
        Ok(at) => Some(at.date().to_string()),
        Err(e) => {
            log::warn!("account creation time out of range: {e}");
            None
        }
    }
}

pub fn welcome_line(label: &str) -> String {
    format!("Welcome back, {label}")
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let manager = expect_context::<Arc<AuthSessionManager>>();
    let navigate = use_navigate();

    let leaving = RwSignal::new(false);
    let signed_out = RwSignal::new(false);
    install_unauth_redirect(auth, leaving, navigate.clone());
    Effect::new(move || {
        if signed_out.get() {
            navigate("/", NavigateOptions::default());
        }
    });

    let scroll = use_scroll_direction();
    let scrolled = use_scrolled(HEADER_SOLID_OFFSET_PX);
    let header_class = move || {
        let mut class = String::from("dashboard__header");
        if scrolled.get() {
            class.push_str(" dashboard__header--solid");
        }
        if should_hide_header(scroll.direction.get(), scroll.offset.get()) {
            class.push_str(" dashboard__header--hidden");
        }
        class
    };

    let sign_out_error = RwSignal::new(String::new());
    let on_sign_out = move |_| {
        sign_out_error.set(String::new());
        leaving.set(true);
        let manager = Arc::clone(&manager);
        leptos::task::spawn_local(async move {
            let result = manager.end_session().await;
            match inline_feedback(&manager, Operation::SignOut, &result) {
                None => signed_out.set(true),
                Some(message) => {
                    leaving.set(false);
                    sign_out_error.set(message);
                }
            }
        });
    };

    view! {
        <Show
            when=move || auth.get().is_signed_in()
            fallback=move || {
                view! { <Loading text="Loading your dashboard..." full_screen=true/> }
            }
        >
            <div class="dashboard">
                <header class=header_class>
                    <span class="dashboard__brand">"Gov-X"</span>
                    <span class="dashboard__avatar">
                        {move || auth.get().avatar_initial().map(String::from).unwrap_or_default()}
                    </span>
                    <button
                        class="dashboard__sign-out"
                        type="button"
                        disabled=move || auth.get().loading
                        on:click=on_sign_out.clone()
                    >
                        "Sign Out"
                    </button>
                </header>
                <Show when=move || !sign_out_error.get().is_empty()>
                    <p class="dashboard__error" role="alert">{move || sign_out_error.get()}</p>
                </Show>
                <section class="dashboard__welcome">
                    <h1>{move || welcome_line(auth.get().user_label().unwrap_or_default())}</h1>
                    <p>"Report civic issues around you and follow them until they are resolved."</p>
                </section>
                <section class="dashboard__profile">
                    <dl>
                        <dt>"Email"</dt>
                        <dd>
                            {move || {
                                auth.get().session.and_then(|s| s.email_address).unwrap_or_default()
                            }}
                        </dd>
                        <dt>"Member since"</dt>
                        <dd>
                            {move || {
                                member_since(auth.get().session.and_then(|s| s.created_at_ms))
                                    .unwrap_or_else(|| "-".to_owned())
                            }}
                        </dd>
                    </dl>
                </section>
            </div>
        </Show>
    }
}
