use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;
use wasm_bindgen_futures::spawn_local;

use crate::commands;
use crate::components::sidebar::Sidebar;
use crate::pages::enterprise::EnterprisePage;
use crate::pages::recommend::RecommendPage;
use crate::theme::{apply_theme, Theme, ThemeContext, THEME_KEY};

#[component]
pub fn App() -> impl IntoView {
    let (theme, set_theme) = signal(Theme::Light);
    provide_context(ThemeContext { theme, set_theme });

    // Load saved theme preference on mount
    Effect::new(move |_| {
        spawn_local(async move {
            if let Ok(Some(saved)) = commands::get_preference(THEME_KEY).await {
                set_theme.set(Theme::parse(&saved));
            }
        });
    });

    Effect::new(move |_| {
        apply_theme(theme.get());
    });

    view! {
        <Router>
            <div class="app-layout">
                <Sidebar />
                <main class="content">
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=RecommendPage />
                        <Route path=path!("/enterprise") view=EnterprisePage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
