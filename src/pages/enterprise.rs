use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, CachedRecommendations, DashboardFilter, EnterpriseView};
use crate::components::chart::Chart;
use crate::components::kpi_cards::KpiStrip;

fn optional_date(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[component]
pub fn EnterprisePage() -> impl IntoView {
    let (dashboard, set_dashboard) = signal::<Option<EnterpriseView>>(None);
    let (cached, set_cached) = signal::<Option<CachedRecommendations>>(None);
    let (active_filter, set_active_filter) = signal::<Option<DashboardFilter>>(None);
    let (start_date, set_start_date) = signal(String::new());
    let (end_date, set_end_date) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let fetch = move |filter: Option<DashboardFilter>| {
        set_active_filter.set(filter.clone());
        spawn_local(async move {
            match commands::get_enterprise_dashboard(filter).await {
                Ok(view) => {
                    set_error.set(None);
                    set_dashboard.set(Some(view));
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    // Unfiltered aggregates and the last recommendation on mount
    Effect::new(move |_| {
        fetch(None);
        spawn_local(async move {
            if let Ok(entry) = commands::load_cached_recommendations().await {
                set_cached.set(entry);
            }
        });
    });

    let on_apply_dates = move |_| {
        fetch(Some(DashboardFilter::DateRange {
            start: optional_date(start_date.get_untracked()),
            end: optional_date(end_date.get_untracked()),
        }));
    };

    let on_reset = move |_| {
        set_start_date.set(String::new());
        set_end_date.set(String::new());
        fetch(None);
    };

    let filter_label = move || match active_filter.get() {
        Some(DashboardFilter::Material { name }) => format!("Filtered by material: {}", name),
        Some(DashboardFilter::DateRange { start, end }) => format!(
            "Reports from {} to {}",
            start.unwrap_or_else(|| "the beginning".to_string()),
            end.unwrap_or_else(|| "today".to_string())
        ),
        Some(DashboardFilter::All) | None => "All reports".to_string(),
    };

    view! {
        <div class="page enterprise-page">
            <h2>"Enterprise Sustainability Dashboard"</h2>

            <section class="filter-bar">
                <div class="form-group">
                    <label for="startDate">"From"</label>
                    <input id="startDate" type="date" class="input"
                        prop:value=move || start_date.get()
                        on:input=move |ev| set_start_date.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="endDate">"To"</label>
                    <input id="endDate" type="date" class="input"
                        prop:value=move || end_date.get()
                        on:input=move |ev| set_end_date.set(event_target_value(&ev))
                    />
                </div>
                <button class="btn btn-primary" on:click=on_apply_dates>"Apply"</button>
                <button class="btn btn-secondary" on:click=on_reset>"Reset"</button>
                <span class="status-text">{filter_label}</span>
            </section>

            <Show when=move || error.get().is_some()>
                <div class="notice notice-error">{move || error.get().unwrap_or_default()}</div>
            </Show>

            {move || {
                dashboard.get().map(|view| {
                    let headline = vec![
                        ("Total Reports", view.total_reports.clone()),
                        ("Top Material", view.top_material.clone()),
                        ("Avg Eco Score", view.avg_eco.clone()),
                        ("Avg CO\u{2082}", view.avg_co2.clone()),
                    ];
                    let impact = vec![
                        ("Avg Cost", view.avg_cost.clone()),
                        ("CO\u{2082} Reduction", view.co2_reduction.clone()),
                        ("Cost Savings", view.cost_savings.clone()),
                        ("Better Than Plastic", view.better_than_plastic.clone()),
                    ];
                    let materials = view.material_share.categories.clone();
                    view! {
                        <KpiStrip items=headline />
                        <KpiStrip items=impact />
                        <section class="charts-section">
                            <Chart spec=view.material_share.clone() />
                            <div class="material-filter">
                                {materials
                                    .into_iter()
                                    .map(|name| {
                                        let picked = name.clone();
                                        view! {
                                            <button class="btn btn-chip"
                                                on:click=move |_| fetch(Some(DashboardFilter::Material { name: picked.clone() }))
                                            >
                                                {name}
                                            </button>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                            </div>
                            <Chart spec=view.cumulative_savings.clone() />
                            <Chart spec=view.trend.clone() />
                            <Chart spec=view.category_share.clone() />
                        </section>
                    }
                })
            }}

            {move || {
                cached.get().map(|entry| {
                    let items: Vec<_> = entry
                        .value
                        .iter()
                        .enumerate()
                        .map(|(i, m)| {
                            view! {
                                <li>
                                    {format!(
                                        "{}. {} | Eco: {} | CO\u{2082}: {} | Cost: {}",
                                        i + 1,
                                        m.material,
                                        m.eco_score,
                                        m.predicted_co2,
                                        m.predicted_cost
                                    )}
                                </li>
                            }
                        })
                        .collect();
                    view! {
                        <section class="cached-section">
                            <h3>"Last Recommendation"</h3>
                            <p class="status-text">{format!("Updated {}", entry.updated_at)}</p>
                            <ol class="cached-list">{items}</ol>
                        </section>
                    }
                })
            }}
        </div>
    }
}
