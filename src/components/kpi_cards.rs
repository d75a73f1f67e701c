use leptos::prelude::*;

/// One labelled figure in a KPI strip.
#[component]
pub fn KpiCard(
    #[prop(into)]
    label: String,
    #[prop(into)]
    value: String,
) -> impl IntoView {
    view! {
        <div class="kpi-card">
            <span class="kpi-label">{label}</span>
            <span class="kpi-value">{value}</span>
        </div>
    }
}

/// Strip of KPI cards, one per `(label, value)` pair.
#[component]
pub fn KpiStrip(items: Vec<(&'static str, String)>) -> impl IntoView {
    view! {
        <div class="kpi-strip">
            {items
                .into_iter()
                .map(|(label, value)| view! { <KpiCard label=label value=value /> })
                .collect::<Vec<_>>()}
        </div>
    }
}
