//! Landing-page navigation bar.
//!
//! Turns solid once the page scrolls past the default threshold and links
//! to the dashboard or the sign-in page depending on auth state.

use leptos::prelude::*;

use crate::state::auth::AuthState;
use crate::state::scroll::DEFAULT_SCROLL_THRESHOLD_PX;
use crate::util::auth::{AUTH_ROUTE, DASHBOARD_ROUTE};
use crate::util::scroll::use_scrolled;

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let scrolled = use_scrolled(DEFAULT_SCROLL_THRESHOLD_PX);

    let class = move || if scrolled.get() { "navbar navbar--scrolled" } else { "navbar" };

    view! {
        <nav class=class>
            <a href="/" class="navbar__brand">"Gov-X"</a>
            <div class="navbar__actions">
                <Show
                    when=move || auth.get().is_signed_in()
                    fallback=|| view! { <a href=AUTH_ROUTE class="navbar__link">"Sign In"</a> }
                >
                    <a href=DASHBOARD_ROUTE class="navbar__link">"Dashboard"</a>
                </Show>
            </div>
        </nav>
    }
}
