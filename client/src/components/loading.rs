//! Spinner shown while auth state is pending.

use leptos::prelude::*;

#[component]
pub fn Loading(
    #[prop(into, default = "Loading...".into())] text: String,
    #[prop(optional)] full_screen: bool,
) -> impl IntoView {
    let class = if full_screen { "loading loading--fullscreen" } else { "loading" };
    view! {
        <div class=class role="status">
            <span class="loading__spinner"></span>
            <span class="loading__text">{text}</span>
        </div>
    }
}
