//! Password-reset request page.
//!
//! Shows a confirmation view once the request completes. Unknown addresses
//! get the same confirmation as known ones.

#[cfg(test)]
#[path = "forgot_password_test.rs"]
mod forgot_password_test;

use std::sync::Arc;

use leptos::prelude::*;
use session::{AuthSessionManager, Operation};

use crate::state::auth::AuthState;
use crate::util::auth::{AUTH_ROUTE, inline_feedback};

pub const EMPTY_EMAIL_MESSAGE: &str = "Enter your email address";

/// Trim the input and require something to send.
pub fn check_reset_email(raw: &str) -> Result<String, &'static str> {
    let email = raw.trim();
    if email.is_empty() {
        return Err(EMPTY_EMAIL_MESSAGE);
    }
    Ok(email.to_owned())
}

pub fn sent_message(email: &str) -> String {
    format!("We've sent a password reset link to {email}")
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let manager = expect_context::<Arc<AuthSessionManager>>();

    let email = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let sent_to = RwSignal::new(None::<String>);
    let busy = move || auth.get().loading;

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        error.set(String::new());
        let address = match check_reset_email(&email.get_untracked()) {
            Ok(address) => address,
            Err(message) => {
                error.set(message.to_owned());
                return;
            }
        };
        let manager = Arc::clone(&manager);
        leptos::task::spawn_local(async move {
            let result = manager.send_password_reset(&address).await;
            match inline_feedback(&manager, Operation::PasswordReset, &result) {
                None => sent_to.set(Some(address)),
                Some(message) => error.set(message),
            }
        });
    };

    view! {
        <div class="auth-page">
            <a href=AUTH_ROUTE class="auth-page__back">"Back to Sign In"</a>
            <div class="auth-card">
                <Show
                    when=move || sent_to.get().is_some()
                    fallback=move || {
                        view! {
                            <h1>"Reset your password"</h1>
                            <p class="auth-card__subtitle">
                                "Enter your email and we'll send you a link to reset your password."
                            </p>
                            <Show when=move || !error.get().is_empty()>
                                <p class="auth-card__error" role="alert">{move || error.get()}</p>
                            </Show>
                            <form class="auth-form" on:submit=on_submit.clone()>
                                <label for="reset-email">"Email"</label>
                                <input
                                    id="reset-email"
                                    type="email"
                                    placeholder="you@example.com"
                                    required
                                    prop:value=move || email.get()
                                    on:input=move |ev| email.set(event_target_value(&ev))
                                />
                                <button class="auth-form__submit" type="submit" disabled=busy>
                                    {move || if busy() { "Sending..." } else { "Send Reset Link" }}
                                </button>
                            </form>
                        }
                    }
                >
                    <h1>"Check your email"</h1>
                    <p>{move || sent_to.get().map(|to| sent_message(&to)).unwrap_or_default()}</p>
                    <p class="auth-card__hint">
                        "Didn't receive the email? Check your spam folder or try again."
                    </p>
                    <button
                        type="button"
                        class="auth-form__submit"
                        on:click=move |_| {
                            sent_to.set(None);
                            email.set(String::new());
                        }
                    >
                        "Try again"
                    </button>
                </Show>
            </div>
        </div>
    }
}
