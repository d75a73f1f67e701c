use leptos::prelude::*;

use crate::commands::TableRow;

/// Ranked recommendations with the cheapest and cleanest rows tagged.
#[component]
pub fn ResultsTable(rows: Vec<TableRow>) -> impl IntoView {
    let body: Vec<_> = rows
        .into_iter()
        .map(|row| {
            let cost_badge = row
                .lowest_cost
                .then(|| view! { <span class="badge badge-cost">"Lowest cost"</span> });
            let co2_badge = row
                .lowest_co2
                .then(|| view! { <span class="badge badge-co2">"Lowest CO\u{2082}"</span> });
            let class = if row.rank == 1 { "results-row best" } else { "results-row" };
            view! {
                <tr class=class>
                    <td>{row.rank}</td>
                    <td>{row.material} {cost_badge} {co2_badge}</td>
                    <td>{row.eco_score}</td>
                    <td>{row.predicted_co2}</td>
                    <td>{row.predicted_cost}</td>
                </tr>
            }
        })
        .collect();

    view! {
        <table class="results-table">
            <thead>
                <tr>
                    <th>"Rank"</th>
                    <th>"Material"</th>
                    <th>"Eco Score"</th>
                    <th>"CO\u{2082}"</th>
                    <th>"Cost"</th>
                </tr>
            </thead>
            <tbody>{body}</tbody>
        </table>
    }
}
