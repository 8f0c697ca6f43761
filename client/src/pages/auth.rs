//! Sign-in / sign-up page.
//!
//! SYSTEM CONTEXT
//! ==============
//! One form toggles between signing in and creating an account; a second
//! button runs the federated provider flow. The manager already toasts every
//! outcome, so this page only mirrors failures inline and navigates to the
//! dashboard once an operation completes.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::{AuthSessionManager, Operation};

use crate::state::auth::AuthState;
use crate::util::auth::{DASHBOARD_ROUTE, inline_feedback};

pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords don't match";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn title(self) -> &'static str {
        match self {
            Self::SignIn => "Welcome back to Gov-X India",
            Self::SignUp => "Join India's Civic Revolution",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            Self::SignIn => "Sign in to scan and report civic issues across India",
            Self::SignUp => "Start building a better India, one photo at a time",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Self::SignIn => "Sign In",
            Self::SignUp => "Create Account",
        }
    }

    pub fn operation(self) -> Operation {
        match self {
            Self::SignIn => Operation::SignIn,
            Self::SignUp => Operation::Register,
        }
    }
}

/// Form-level checks the manager cannot make on its own.
pub fn check_auth_form(mode: AuthMode, password: &str, confirm: &str) -> Result<(), &'static str> {
    if mode == AuthMode::SignUp && password != confirm {
        return Err(PASSWORD_MISMATCH_MESSAGE);
    }
    Ok(())
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let manager = expect_context::<Arc<AuthSessionManager>>();
    let navigate = use_navigate();

    let mode = RwSignal::new(AuthMode::SignIn);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);

    let busy = move || auth.get().loading;

    let switch_mode = move |next: AuthMode| {
        mode.set(next);
        error.set(String::new());
    };

    let on_submit = {
        let manager = Arc::clone(&manager);
        let navigate = navigate.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            error.set(String::new());
            let current = mode.get_untracked();
            let email_value = email.get_untracked();
            let password_value = password.get_untracked();
            if let Err(message) = check_auth_form(current, &password_value, &confirm.get_untracked()) {
                error.set(message.to_owned());
                return;
            }

            let manager = Arc::clone(&manager);
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = match current {
                    AuthMode::SignIn => manager.sign_in_with_password(&email_value, &password_value).await,
                    AuthMode::SignUp => manager.register_with_password(&email_value, &password_value).await,
                };
                match inline_feedback(&manager, current.operation(), &result) {
                    None => navigate(DASHBOARD_ROUTE, NavigateOptions::default()),
                    Some(message) => error.set(message),
                }
            });
        }
    };

    let on_federated = {
        let manager = Arc::clone(&manager);
        move |_| {
            error.set(String::new());
            let manager = Arc::clone(&manager);
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = manager.sign_in_with_federated_provider().await;
                match inline_feedback(&manager, Operation::FederatedSignIn, &result) {
                    None => navigate(DASHBOARD_ROUTE, NavigateOptions::default()),
                    Some(message) => error.set(message),
                }
            });
        }
    };

    let provider_label = format!("Continue with {}", manager.provider_label());
    let password_type = move || if show_password.get() { "text" } else { "password" };

    view! {
        <div class="auth-page">
            <a href="/" class="auth-page__back">"Back to Home"</a>
            <div class="auth-card">
                <h1>{move || mode.get().title()}</h1>
                <p class="auth-card__subtitle">{move || mode.get().subtitle()}</p>

                <div class="auth-card__tabs">
                    <button
                        type="button"
                        class:active=move || mode.get() == AuthMode::SignIn
                        on:click=move |_| switch_mode(AuthMode::SignIn)
                    >
                        "Sign In"
                    </button>
                    <button
                        type="button"
                        class:active=move || mode.get() == AuthMode::SignUp
                        on:click=move |_| switch_mode(AuthMode::SignUp)
                    >
                        "Sign Up"
                    </button>
                </div>

                <Show when=move || !error.get().is_empty()>
                    <p class="auth-card__error" role="alert">{move || error.get()}</p>
                </Show>

                <form class="auth-form" on:submit=on_submit>
                    <label for="auth-email">"Email"</label>
                    <input
                        id="auth-email"
                        type="email"
                        placeholder="you@example.com"
                        required
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <label for="auth-password">"Password"</label>
                    <input
                        id="auth-password"
                        type=password_type
                        required
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button
                        type="button"
                        class="auth-form__reveal"
                        on:click=move |_| show_password.update(|v| *v = !*v)
                    >
                        {move || if show_password.get() { "Hide" } else { "Show" }}
                    </button>
                    <Show when=move || mode.get() == AuthMode::SignUp>
                        <label for="auth-confirm">"Confirm Password"</label>
                        <input
                            id="auth-confirm"
                            type=password_type
                            required
                            prop:value=move || confirm.get()
                            on:input=move |ev| confirm.set(event_target_value(&ev))
                        />
                    </Show>
                    <Show when=move || mode.get() == AuthMode::SignIn>
                        <a href="/auth/forgot-password" class="auth-form__forgot">"Forgot password?"</a>
                    </Show>
                    <button class="auth-form__submit" type="submit" disabled=busy>
                        {move || if busy() { "Please wait..." } else { mode.get().submit_label() }}
                    </button>
                </form>

                <div class="auth-card__divider">"Or"</div>
                <button class="auth-card__federated" type="button" disabled=busy on:click=on_federated>
                    {provider_label}
                </button>
            </div>
        </div>
    }
}
