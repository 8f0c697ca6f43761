//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Builds the one `AuthSessionManager` for the page and provides it, plus the
//! auth and toast signals, to every route. In the browser the manager is
//! activated on mount and each store snapshot is copied into the auth
//! signal; the server renders the pending state and never activates.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};
use session::NotificationSink;

use crate::components::toaster::Toaster;
use crate::net::identity::build_manager;
use crate::pages::{
    auth::AuthPage, dashboard::DashboardPage, forgot_password::ForgotPasswordPage, home::HomePage,
};
use crate::state::auth::AuthState;
use crate::state::toast::{ToastSink, ToastState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let toasts = RwSignal::new(ToastState::default());
    let sink: Arc<dyn NotificationSink> = Arc::new(ToastSink::new(toasts));
    let manager = Arc::new(build_manager(sink));

    provide_context(auth);
    provide_context(toasts);
    provide_context(Arc::clone(&manager));

    // Effects only run after hydration, so the first client render matches
    // the server markup before real session state arrives.
    #[cfg(feature = "hydrate")]
    Effect::new({
        let manager = Arc::clone(&manager);
        move || connect_session(&manager, auth)
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/govx.css"/>
        <Title text="Gov-X India"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("auth") view=AuthPage/>
                <Route path=(StaticSegment("auth"), StaticSegment("forgot-password")) view=ForgotPasswordPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
            </Routes>
        </Router>
        <Toaster/>
    }
}

/// Activate the manager and mirror every store write into `auth` until the
/// app is torn down.
#[cfg(feature = "hydrate")]
fn connect_session(manager: &Arc<session::AuthSessionManager>, auth: RwSignal<AuthState>) {
    let mut reader = manager.reader();
    manager.activate();
    auth.set(AuthState::from_snapshot(&reader.snapshot()));

    leptos::task::spawn_local(async move {
        while let Some(snapshot) = reader.changed().await {
            if auth.try_set(AuthState::from_snapshot(&snapshot)).is_some() {
                log::debug!("auth signal disposed; stopping session bridge");
                break;
            }
        }
    });

    let manager = Arc::clone(manager);
    on_cleanup(move || manager.deactivate());
}
