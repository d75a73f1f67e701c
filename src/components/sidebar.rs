use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands;
use crate::theme::{ThemeContext, THEME_KEY};

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = expect_context::<ThemeContext>();

    let on_toggle = move |_| {
        let next = ctx.theme.get_untracked().toggled();
        ctx.set_theme.set(next);
        spawn_local(async move {
            let _ = commands::set_preference(THEME_KEY, next.as_str()).await;
        });
    };

    view! {
        <nav class="sidebar">
            <div class="sidebar-header">
                <h1 class="sidebar-title">"EcoPack AI"</h1>
                <p class="sidebar-subtitle">"Sustainable Packaging Advisor"</p>
            </div>
            <ul class="nav-list">
                <li class="nav-item">
                    <a href="/" class="nav-link">"Recommendations"</a>
                </li>
                <li class="nav-item">
                    <a href="/enterprise" class="nav-link">"Enterprise Dashboard"</a>
                </li>
            </ul>
            <button class="btn btn-secondary theme-toggle" on:click=on_toggle>
                {move || ctx.theme.get().toggle_label()}
            </button>
        </nav>
    }
}
