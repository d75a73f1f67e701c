use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// A searchable dropdown over plain material names.
///
/// Replaces a native `<select>` with a text input that filters options
/// by case-insensitive substring.
#[component]
pub fn SearchableSelect(
    /// Unique ID for this select instance.
    id: &'static str,
    /// Placeholder text shown when nothing is selected.
    placeholder: &'static str,
    options: Signal<Vec<String>>,
    value: ReadSignal<String>,
    /// Called with the chosen name, or an empty string on clear.
    on_select: impl Fn(String) + 'static + Copy + Send + Sync,
) -> impl IntoView {
    let (is_open, set_is_open) = signal(false);
    let (search_text, set_search_text) = signal(String::new());

    let filtered = move || {
        let query = search_text.get().to_lowercase();
        let all = options.get();
        if query.is_empty() {
            all
        } else {
            all.into_iter()
                .filter(|name| name.to_lowercase().contains(&query))
                .collect()
        }
    };

    let open = move || {
        set_is_open.set(true);
        set_search_text.set(String::new());
    };

    let on_input_change = move |ev: leptos::ev::Event| {
        set_search_text.set(event_target_value(&ev));
        set_is_open.set(true);
    };

    let on_select_option = move |name: String| {
        on_select(name);
        set_is_open.set(false);
        set_search_text.set(String::new());
    };

    let on_clear = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        on_select(String::new());
        set_search_text.set(String::new());
    };

    // Close dropdown when clicking outside
    let container_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move |_| {
        if !is_open.get() {
            return;
        }
        let Some(container) = container_ref.get() else {
            return;
        };
        let Some(window) = web_sys::window() else {
            return;
        };

        let closure = Closure::<dyn Fn(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
            if let Some(node) = ev.target().as_ref().and_then(|t| t.dyn_ref::<web_sys::Node>()) {
                if !container.contains(Some(node)) {
                    set_is_open.set(false);
                }
            }
        });

        let _ = window.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
        closure.forget();
    });

    let dropdown_id = format!("{}-dropdown", id);

    view! {
        <div
            class="searchable-select"
            class:open=move || is_open.get()
            node_ref=container_ref
        >
            {move || {
                if is_open.get() {
                    view! {
                        <input
                            type="text"
                            class="ss-search input"
                            placeholder="Type to search..."
                            prop:value=move || search_text.get()
                            on:input=on_input_change
                            autofocus=true
                        />
                    }.into_any()
                } else {
                    let current = value.get();
                    if current.is_empty() {
                        view! {
                            <div class="ss-display" on:click=move |_| open()>
                                <span class="ss-display-text">{placeholder}</span>
                                <span class="ss-chevron">"\u{25BE}"</span>
                            </div>
                        }.into_any()
                    } else {
                        view! {
                            <div class="ss-display has-value" on:click=move |_| open()>
                                <span class="ss-display-text">{current}</span>
                                <button class="ss-clear" on:click=on_clear title="Clear selection">
                                    "\u{2715}"
                                </button>
                                <span class="ss-chevron">"\u{25BE}"</span>
                            </div>
                        }.into_any()
                    }
                }
            }}

            {move || {
                if !is_open.get() {
                    return view! { <div style="display:none"></div> }.into_any();
                }

                let names = filtered();
                if names.is_empty() {
                    return view! {
                        <div class="ss-dropdown">
                            <div class="ss-empty">"No matching materials"</div>
                        </div>
                    }.into_any();
                }

                let count = names.len();
                let selected = value.get();
                let item_views: Vec<_> = names
                    .into_iter()
                    .map(|name| {
                        let class = if name == selected { "ss-option selected" } else { "ss-option" };
                        let picked = name.clone();
                        view! {
                            <div class=class on:mousedown=move |_| on_select_option(picked.clone())>
                                {name}
                            </div>
                        }
                    })
                    .collect();

                let count_label = format!("{} material{}", count, if count == 1 { "" } else { "s" });

                view! {
                    <div class="ss-dropdown" id={dropdown_id.clone()}>
                        <div class="ss-options">
                            {item_views}
                            <div class="ss-count">{count_label}</div>
                        </div>
                    </div>
                }.into_any()
            }}
        </div>
    }
}
