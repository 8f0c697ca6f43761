//! Public landing page.

use leptos::prelude::*;

use crate::components::navbar::Navbar;
use crate::state::auth::AuthState;
use crate::util::auth::{AUTH_ROUTE, DASHBOARD_ROUTE};

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let cta_href = move || if auth.get().is_signed_in() { DASHBOARD_ROUTE } else { AUTH_ROUTE };

    view! {
        <div class="home-page">
            <Navbar/>
            <section class="hero">
                <h1 class="hero__title">"Gov-X India"</h1>
                <p class="hero__subtitle">
                    "Scan and report civic issues in your neighbourhood. Track them until they are fixed."
                </p>
                <a class="hero__cta" href=cta_href>"Get Started"</a>
            </section>
        </div>
    }
}
