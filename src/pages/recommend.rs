use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, DashboardView, PredictionForm, ScoreWeights};
use crate::components::chart::Chart;
use crate::components::kpi_cards::KpiStrip;
use crate::components::rejected_list::RejectedList;
use crate::components::results_table::ResultsTable;
use crate::components::searchable_select::SearchableSelect;

const LEVELS: [&str; 3] = ["Low", "Medium", "High"];

/// Low/Medium/High select bound to a form field.
#[component]
fn LevelSelect(
    id: &'static str,
    label: &'static str,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <select id=id class="input"
                prop:value=move || value.get()
                on:change=move |ev| set_value.set(event_target_value(&ev))
            >
                {LEVELS
                    .iter()
                    .map(|level| view! { <option value={*level}>{*level}</option> })
                    .collect::<Vec<_>>()}
            </select>
        </div>
    }
}

#[component]
fn NumberInput(
    id: &'static str,
    label: &'static str,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <input id=id type="number" class="input" min="0"
                prop:value=move || value.get()
                on:input=move |ev| set_value.set(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
pub fn RecommendPage() -> impl IntoView {
    let (category, set_category) = signal(String::new());
    let (strength, set_strength) = signal("Medium".to_string());
    let (capacity, set_capacity) = signal(String::new());
    let (biodegradability, set_biodegradability) = signal("Medium".to_string());
    let (recyclability, set_recyclability) = signal(String::new());
    let (moisture, set_moisture) = signal("Medium".to_string());
    let (heat, set_heat) = signal("Medium".to_string());
    let (use_weights, set_use_weights) = signal(false);
    let (cost_weight, set_cost_weight) = signal(0.5_f64);

    let (dashboard, set_dashboard) = signal::<Option<DashboardView>>(None);
    let (catalog, set_catalog) = signal(Vec::<String>::new());
    let (ai_choice, set_ai_choice) = signal(String::new());
    let (catalog_choice, set_catalog_choice) = signal(String::new());
    let (loading, set_loading) = signal(false);
    let (status, set_status) = signal::<Option<String>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    // Catalog and any earlier result on mount
    Effect::new(move |_| {
        spawn_local(async move {
            match commands::load_catalog().await {
                Ok(names) => set_catalog.set(names),
                Err(e) => set_error.set(Some(format!("Failed to load materials: {}", e))),
            }
            if let Ok(view) = commands::get_dashboard_view().await {
                set_dashboard.set(Some(view));
            }
        });
    });

    let refresh = move || {
        spawn_local(async move {
            match commands::get_dashboard_view().await {
                Ok(view) => set_dashboard.set(Some(view)),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let on_predict = move |_| {
        let form = PredictionForm {
            product_category: category.get_untracked(),
            strength_score: strength.get_untracked(),
            weight_capacity_kg: capacity.get_untracked(),
            biodegradability_score: biodegradability.get_untracked(),
            recyclability_percent: recyclability.get_untracked(),
            moisture_resistance: moisture.get_untracked(),
            heat_resistance: heat.get_untracked(),
            weights: use_weights.get_untracked().then(|| {
                let cost = cost_weight.get_untracked();
                ScoreWeights { cost, co2: 1.0 - cost }
            }),
        };
        set_loading.set(true);
        set_error.set(None);
        set_status.set(None);
        spawn_local(async move {
            match commands::predict(form).await {
                Ok(view) => {
                    set_ai_choice.set(String::new());
                    set_catalog_choice.set(String::new());
                    set_dashboard.set(Some(view));
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    };

    let on_ai_compare = move |ev: leptos::ev::Event| {
        let name = event_target_value(&ev);
        set_ai_choice.set(name.clone());
        if name.is_empty() {
            return;
        }
        spawn_local(async move {
            match commands::compare_ai_material(&name).await {
                Ok(Some(_)) => refresh(),
                Ok(None) => {}
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let on_catalog_compare = move |name: String| {
        set_catalog_choice.set(name.clone());
        if name.is_empty() {
            return;
        }
        spawn_local(async move {
            match commands::compare_catalog_material(&name).await {
                Ok(Some(_)) => refresh(),
                Ok(None) => {}
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let on_save = move |_| {
        let category = category.get_untracked();
        spawn_local(async move {
            match commands::save_report(&category).await {
                Ok(message) => set_status.set(Some(message)),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let on_export_csv = move |_| {
        spawn_local(async move {
            match commands::export_csv().await {
                Ok(path) => set_status.set(Some(format!("CSV saved to {}", path))),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let on_export_pdf = move |_| {
        set_status.set(Some("Preparing PDF...".to_string()));
        spawn_local(async move {
            match commands::export_pdf().await {
                Ok(path) => set_status.set(Some(format!("PDF saved to {}", path))),
                Err(e) => {
                    set_status.set(None);
                    set_error.set(Some(e));
                }
            }
        });
    };

    let catalog_options = Signal::derive(move || {
        dashboard
            .get()
            .map(|view| view.catalog_options)
            .filter(|names| !names.is_empty())
            .unwrap_or_else(|| catalog.get())
    });

    view! {
        <div class="page recommend-page">
            <h2>"Packaging Recommendation"</h2>

            <section class="form-section">
                <div class="form-grid">
                    <div class="form-group">
                        <label for="category">"Product Category"</label>
                        <input id="category" type="text" class="input" placeholder="e.g. Electronics"
                            prop:value=move || category.get()
                            on:input=move |ev| set_category.set(event_target_value(&ev))
                        />
                    </div>
                    <LevelSelect id="strength_score" label="Strength" value=strength set_value=set_strength />
                    <NumberInput id="weight_capacity_kg" label="Weight Capacity (kg)" value=capacity set_value=set_capacity />
                    <LevelSelect id="biodegradability_score" label="Biodegradability"
                        value=biodegradability set_value=set_biodegradability />
                    <NumberInput id="recyclability_percent" label="Recyclability (%)"
                        value=recyclability set_value=set_recyclability />
                    <LevelSelect id="moisture_resistance" label="Moisture Resistance" value=moisture set_value=set_moisture />
                    <LevelSelect id="heat_resistance" label="Heat Resistance" value=heat set_value=set_heat />
                </div>

                <div class="form-group weights">
                    <label>
                        <input type="checkbox"
                            prop:checked=move || use_weights.get()
                            on:change=move |ev| set_use_weights.set(event_target_checked(&ev))
                        />
                        " Custom cost / CO\u{2082} weighting"
                    </label>
                    <Show when=move || use_weights.get()>
                        <input type="range" min="0" max="1" step="0.1" class="input"
                            prop:value=move || cost_weight.get().to_string()
                            on:input=move |ev| {
                                if let Ok(v) = event_target_value(&ev).parse::<f64>() {
                                    set_cost_weight.set(v);
                                }
                            }
                        />
                        <span class="status-text">
                            {move || {
                                let cost = cost_weight.get();
                                format!("Cost {:.1} / CO\u{2082} {:.1}", cost, 1.0 - cost)
                            }}
                        </span>
                    </Show>
                </div>

                <button class="btn btn-primary" on:click=on_predict disabled=move || loading.get()>
                    {move || if loading.get() { "Analyzing..." } else { "Get Recommendations" }}
                </button>
            </section>

            <Show when=move || error.get().is_some()>
                <div class="notice notice-error">
                    {move || error.get().unwrap_or_default()}
                    <button class="btn-link" on:click=move |_| set_error.set(None)>"Dismiss"</button>
                </div>
            </Show>
            <Show when=move || status.get().is_some()>
                <div class="notice notice-info">{move || status.get().unwrap_or_default()}</div>
            </Show>

            {move || {
                dashboard.get().map(|view| {
                    let kpis = vec![
                        ("Avg Eco Score", format!("{:.2}", view.kpis.avg_eco)),
                        ("Avg CO\u{2082}", format!("{:.2}", view.kpis.avg_co2)),
                        ("Avg Cost", format!("{:.2}", view.kpis.avg_cost)),
                    ];
                    let insights = vec![
                        ("Best Overall", view.insights.best_overall.clone()),
                        ("Lowest CO\u{2082}", view.insights.lowest_co2.clone()),
                        ("Lowest Cost", view.insights.lowest_cost.clone()),
                    ];
                    let compare_options = view.compare_options.clone();
                    let charts = view.charts.clone();
                    view! {
                        <section class="results-section">
                            <KpiStrip items=kpis />
                            <KpiStrip items=insights />
                            <p class="ai-reason">{view.ai_reason.clone()}</p>
                            <ResultsTable rows=view.rows.clone() />
                            <h3>"Rejected Materials"</h3>
                            <RejectedList lines=view.rejected.clone() />
                        </section>

                        <section class="charts-section">
                            {charts.eco_overview.map(|spec| view! { <Chart spec=spec /> })}

                            <div class="compare-controls">
                                <div class="form-group">
                                    <label for="compareMaterial">"Compare AI materials"</label>
                                    <select id="compareMaterial" class="input"
                                        prop:value=move || ai_choice.get()
                                        on:change=on_ai_compare
                                    >
                                        <option value="">"Select a material"</option>
                                        {compare_options
                                            .into_iter()
                                            .map(|name| view! { <option value={name.clone()}>{name}</option> })
                                            .collect::<Vec<_>>()}
                                    </select>
                                </div>
                                <div class="form-group">
                                    <label>"Compare with database material"</label>
                                    <SearchableSelect
                                        id="dbMaterialSelect"
                                        placeholder="Search materials..."
                                        options=catalog_options
                                        value=catalog_choice
                                        on_select=on_catalog_compare
                                    />
                                </div>
                            </div>

                            {charts.ai_comparison.map(|spec| view! { <Chart spec=spec /> })}
                            {charts.catalog_comparison.map(|spec| view! { <Chart spec=spec /> })}
                        </section>

                        <section class="actions-section">
                            <button class="btn btn-save" on:click=on_save>"Save Report"</button>
                            <button class="btn btn-secondary" on:click=on_export_csv>"Export CSV"</button>
                            <button class="btn btn-secondary" on:click=on_export_pdf>"Export PDF"</button>
                        </section>
                    }
                })
            }}
        </div>
    }
}
