use leptos::prelude::*;

#[component]
pub fn RejectedList(lines: Vec<String>) -> impl IntoView {
    view! {
        <ul class="rejected-list">
            {lines.into_iter().map(|line| view! { <li>{line}</li> }).collect::<Vec<_>>()}
        </ul>
    }
}
