//! SVG rendering of backend `ChartSpec`s.

use std::f64::consts::PI;

use leptos::prelude::*;

use crate::commands::{ChartKind, ChartSpec};

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 320.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 40.0;
const MARGIN_LEFT: f64 = 50.0;
const MARGIN_RIGHT: f64 = 20.0;

/// Slice colors for pie and doughnut charts; matches the backend palette.
const SLICE_COLORS: [&str; 6] = ["#2e7d32", "#0277bd", "#ef6c00", "#8e24aa", "#c62828", "#00838f"];

fn max_value(spec: &ChartSpec) -> f64 {
    let max = spec
        .series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max);
    if max > 0.0 {
        max
    } else {
        1.0
    }
}

fn inner_width() -> f64 {
    WIDTH - MARGIN_LEFT - MARGIN_RIGHT
}

fn inner_height() -> f64 {
    HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
}

fn y_scale(value: f64, max: f64) -> f64 {
    MARGIN_TOP + inner_height() - (value.max(0.0) / max) * inner_height()
}

fn axes(spec: &ChartSpec, max: f64) -> AnyView {
    let baseline = HEIGHT - MARGIN_BOTTOM;
    let band = inner_width() / spec.categories.len().max(1) as f64;

    let y_ticks: Vec<_> = (0..=4)
        .map(|i| {
            let value = max * i as f64 / 4.0;
            let y = y_scale(value, max);
            view! {
                <text x={(MARGIN_LEFT - 8.0).to_string()} y={y.to_string()} text-anchor="end"
                    alignment-baseline="middle" class="chart-tick">
                    {format!("{:.2}", value)}
                </text>
            }
        })
        .collect();

    let x_labels: Vec<_> = spec
        .categories
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let x = MARGIN_LEFT + band * (i as f64 + 0.5);
            view! {
                <text x={x.to_string()} y={(baseline + 18.0).to_string()} text-anchor="middle" class="chart-tick">
                    {label.clone()}
                </text>
            }
        })
        .collect();

    view! {
        <g>
            <line x1={MARGIN_LEFT.to_string()} y1={MARGIN_TOP.to_string()}
                x2={MARGIN_LEFT.to_string()} y2={baseline.to_string()} class="chart-axis" />
            <line x1={MARGIN_LEFT.to_string()} y1={baseline.to_string()}
                x2={(WIDTH - MARGIN_RIGHT).to_string()} y2={baseline.to_string()} class="chart-axis" />
            {y_ticks}
            {x_labels}
        </g>
    }
    .into_any()
}

fn bars(spec: &ChartSpec, max: f64) -> AnyView {
    let band = inner_width() / spec.categories.len().max(1) as f64;
    let groups = spec.series.len().max(1) as f64;
    let bar_width = band * 0.8 / groups;

    let rects: Vec<_> = spec
        .series
        .iter()
        .enumerate()
        .flat_map(|(s, series)| {
            series.values.iter().enumerate().map(move |(i, value)| {
                let x = MARGIN_LEFT + band * i as f64 + band * 0.1 + bar_width * s as f64;
                let y = y_scale(*value, max);
                let height = HEIGHT - MARGIN_BOTTOM - y;
                view! {
                    <rect x={x.to_string()} y={y.to_string()} width={bar_width.to_string()}
                        height={height.to_string()} fill={series.color.clone()} />
                }
            })
        })
        .collect();

    view! { <g>{axes(spec, max)}{rects}</g> }.into_any()
}

fn lines(spec: &ChartSpec, max: f64) -> AnyView {
    let band = inner_width() / spec.categories.len().max(1) as f64;

    let paths: Vec<_> = spec
        .series
        .iter()
        .map(|series| {
            let points = series
                .values
                .iter()
                .enumerate()
                .map(|(i, v)| format!("{},{}", MARGIN_LEFT + band * (i as f64 + 0.5), y_scale(*v, max)))
                .collect::<Vec<_>>()
                .join(" ");
            view! {
                <polyline points={points} fill="none" stroke={series.color.clone()} stroke-width="2.5" />
            }
        })
        .collect();

    view! { <g>{axes(spec, max)}{paths}</g> }.into_any()
}

fn radar(spec: &ChartSpec, max: f64) -> AnyView {
    let axes_count = spec.categories.len().max(3);
    let center = (WIDTH / 2.0, HEIGHT / 2.0);
    let radius = HEIGHT / 2.0 - 30.0;
    let point = |i: usize, fraction: f64| {
        let angle = -PI / 2.0 + 2.0 * PI * i as f64 / axes_count as f64;
        (
            center.0 + radius * fraction * angle.cos(),
            center.1 + radius * fraction * angle.sin(),
        )
    };

    let spokes: Vec<_> = spec
        .categories
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let (x, y) = point(i, 1.0);
            let (lx, ly) = point(i, 1.12);
            view! {
                <g>
                    <line x1={center.0.to_string()} y1={center.1.to_string()} x2={x.to_string()} y2={y.to_string()} class="chart-axis" />
                    <text x={lx.to_string()} y={ly.to_string()} text-anchor="middle" class="chart-tick">{label.clone()}</text>
                </g>
            }
        })
        .collect();

    let shapes: Vec<_> = spec
        .series
        .iter()
        .map(|series| {
            let points = series
                .values
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    let (x, y) = point(i, (v.max(0.0) / max).min(1.0));
                    format!("{},{}", x, y)
                })
                .collect::<Vec<_>>()
                .join(" ");
            view! {
                <polygon points={points} fill={series.color.clone()} fill-opacity="0.25"
                    stroke={series.color.clone()} stroke-width="2" />
            }
        })
        .collect();

    view! { <g>{spokes}{shapes}</g> }.into_any()
}

fn slices(spec: &ChartSpec, doughnut: bool) -> AnyView {
    let values: Vec<f64> = spec
        .series
        .first()
        .map(|s| s.values.iter().map(|v| v.max(0.0)).collect())
        .unwrap_or_default();
    let total: f64 = values.iter().sum();
    let (cx, cy) = (WIDTH / 2.0, HEIGHT / 2.0);
    let radius = HEIGHT / 2.0 - 20.0;

    if total <= 0.0 {
        return view! {
            <text x={cx.to_string()} y={cy.to_string()} text-anchor="middle" class="chart-tick">"No data"</text>
        }
        .into_any();
    }

    let mut start = -PI / 2.0;
    let paths: Vec<_> = values
        .iter()
        .enumerate()
        .filter(|(_, v)| **v > 0.0)
        .map(|(i, v)| {
            let sweep = v / total * 2.0 * PI;
            let end = start + sweep;
            let (x0, y0) = (cx + radius * start.cos(), cy + radius * start.sin());
            let (x1, y1) = (cx + radius * end.cos(), cy + radius * end.sin());
            let large = if sweep > PI { 1 } else { 0 };
            // A full circle cannot be drawn as a single arc.
            let d = if sweep >= 2.0 * PI - 1e-9 {
                format!(
                    "M {cx} {} A {radius} {radius} 0 1 1 {cx} {} A {radius} {radius} 0 1 1 {cx} {} Z",
                    cy - radius,
                    cy + radius,
                    cy - radius
                )
            } else {
                format!("M {cx} {cy} L {x0} {y0} A {radius} {radius} 0 {large} 1 {x1} {y1} Z")
            };
            start = end;
            view! {
                <path d={d} fill={SLICE_COLORS[i % SLICE_COLORS.len()]} class="chart-slice" />
            }
        })
        .collect();

    let hole = doughnut.then(|| {
        view! { <circle cx={cx.to_string()} cy={cy.to_string()} r={(radius * 0.55).to_string()} class="chart-hole" /> }
    });

    view! { <g>{paths}{hole}</g> }.into_any()
}

fn legend(spec: &ChartSpec) -> Vec<(String, String)> {
    match spec.kind {
        ChartKind::Pie | ChartKind::Doughnut => spec
            .categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), SLICE_COLORS[i % SLICE_COLORS.len()].to_string()))
            .collect(),
        _ => spec
            .series
            .iter()
            .map(|s| (s.label.clone(), s.color.clone()))
            .collect(),
    }
}

#[component]
pub fn Chart(spec: ChartSpec) -> impl IntoView {
    let max = max_value(&spec);
    let body = match spec.kind {
        ChartKind::Bar => bars(&spec, max),
        ChartKind::Line => lines(&spec, max),
        ChartKind::Radar => radar(&spec, max),
        ChartKind::Pie => slices(&spec, false),
        ChartKind::Doughnut => slices(&spec, true),
    };

    let legend_items: Vec<_> = legend(&spec)
        .into_iter()
        .map(|(label, color)| {
            view! {
                <li class="legend-item">
                    <span class="legend-swatch" style={format!("background: {}", color)}></span>
                    {label}
                </li>
            }
        })
        .collect();

    view! {
        <figure class="chart">
            <figcaption class="chart-title">{spec.title.clone()}</figcaption>
            <svg viewBox={format!("0 0 {} {}", WIDTH, HEIGHT)} class="chart-svg"
                style="width: 100%; height: auto;">
                {body}
            </svg>
            <ul class="chart-legend">{legend_items}</ul>
        </figure>
    }
}
