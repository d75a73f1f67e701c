//! Report snapshots of `ChartSpec`s, drawn with plotters into an RGB buffer.
//!
//! Text uses a bundled DejaVu Sans so snapshots look the same on every
//! machine, with or without system fonts.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::sync::OnceLock;

use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontStyle};

use super::{palette_color, ChartKind, ChartSpec};
use crate::error::{EcoPackError, Result};

pub const SNAPSHOT_WIDTH: u32 = 900;
pub const SNAPSHOT_HEIGHT: u32 = 500;

/// Height of the caption strip above the plot.
const TITLE_HEIGHT: u32 = 40;

const FONT_FAMILY: &str = "sans-serif";
static FONT_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

const TEXT: RGBColor = RGBColor(40, 40, 40);
const AXIS: RGBColor = RGBColor(120, 120, 120);
const GRID: RGBColor = RGBColor(225, 225, 225);

type DrawResult<DB> = std::result::Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

fn register_bundled_font() -> Result<()> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let registered = *REGISTERED
        .get_or_init(|| register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES).is_ok());
    if registered {
        Ok(())
    } else {
        Err(EcoPackError::Export("Bundled chart font could not be loaded".to_string()))
    }
}

/// Draw `spec` with its title, axis values, category labels and legend.
pub fn rasterize(spec: &ChartSpec) -> Result<RgbImage> {
    register_bundled_font()?;

    let mut buffer = vec![0u8; (SNAPSHOT_WIDTH * SNAPSHOT_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (SNAPSHOT_WIDTH, SNAPSHOT_HEIGHT))
            .into_drawing_area();
        draw_chart(&root, spec)
            .and_then(|()| root.present())
            .map_err(|e| EcoPackError::Export(format!("Failed to draw chart '{}': {}", spec.title, e)))?;
    }

    RgbImage::from_raw(SNAPSHOT_WIDTH, SNAPSHOT_HEIGHT, buffer)
        .ok_or_else(|| EcoPackError::Export("Chart buffer has the wrong size".to_string()))
}

fn text_style(size: f64) -> TextStyle<'static> {
    (FONT_FAMILY, size).into_font().color(&TEXT)
}

fn series_color(index: usize) -> RGBColor {
    let [r, g, b] = palette_color(index);
    RGBColor(r, g, b)
}

/// Negatives and NaN sit on the axis.
fn clamp(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn headroom(spec: &ChartSpec) -> f64 {
    let max = spec.max_value();
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

fn draw_chart<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, spec: &ChartSpec) -> DrawResult<DB> {
    root.fill(&WHITE)?;
    let (header, body) = root.split_vertically(TITLE_HEIGHT as i32);

    header.draw(&Text::new(
        spec.title.clone(),
        (SNAPSHOT_WIDTH as i32 / 2, TITLE_HEIGHT as i32 / 2),
        text_style(20.0).pos(Pos::new(HPos::Center, VPos::Center)),
    ))?;

    match spec.kind {
        ChartKind::Bar => draw_bars(root, &body, spec),
        ChartKind::Line => draw_lines(root, &body, spec),
        ChartKind::Radar => draw_radar(root, &body, spec),
        ChartKind::Pie => draw_slices(&body, spec, 0.0),
        ChartKind::Doughnut => draw_slices(&body, spec, 0.55),
    }
}

/// Category names under the x axis, at absolute pixel positions.
fn draw_ticks<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    ticks: Vec<(String, (i32, i32))>,
) -> DrawResult<DB> {
    let style = text_style(13.0).pos(Pos::new(HPos::Center, VPos::Top));
    for (label, (x, y)) in ticks {
        root.draw(&Text::new(label, (x, y + 6), style.clone()))?;
    }
    Ok(())
}

fn draw_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    body: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
) -> DrawResult<DB> {
    let groups = spec.categories.len().max(1);
    let mut chart = ChartBuilder::on(body)
        .margin(15)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..groups as f64, 0f64..headroom(spec))?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_: &f64| String::new())
        .light_line_style(GRID)
        .axis_style(AXIS)
        .label_style(text_style(12.0))
        .draw()?;

    let width = 0.8 / spec.series.len().max(1) as f64;
    for (s, series) in spec.series.iter().enumerate() {
        let color = series_color(s);
        chart
            .draw_series(series.values.iter().take(groups).enumerate().map(|(g, v)| {
                let x0 = g as f64 + 0.1 + s as f64 * width;
                Rectangle::new([(x0, 0.0), (x0 + width, clamp(*v))], color.filled())
            }))?
            .label(series.label.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    let ticks = spec
        .categories
        .iter()
        .enumerate()
        .map(|(i, c)| (c.clone(), chart.backend_coord(&(i as f64 + 0.5, 0.0))))
        .collect();
    draw_ticks(root, ticks)?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.9))
        .border_style(AXIS)
        .label_font(text_style(13.0))
        .draw()
}

fn draw_lines<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    body: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
) -> DrawResult<DB> {
    let points = spec.categories.len();
    let x_max = points.saturating_sub(1).max(1) as f64;
    let mut chart = ChartBuilder::on(body)
        .margin(25)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, 0f64..headroom(spec))?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_: &f64| String::new())
        .light_line_style(GRID)
        .axis_style(AXIS)
        .label_style(text_style(12.0))
        .draw()?;

    for (s, series) in spec.series.iter().enumerate() {
        let color = series_color(s);
        chart
            .draw_series(LineSeries::new(
                series
                    .values
                    .iter()
                    .take(points)
                    .enumerate()
                    .map(|(i, v)| (i as f64, clamp(*v))),
                color.stroke_width(3),
            ))?
            .label(series.label.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    let ticks = spec
        .categories
        .iter()
        .enumerate()
        .map(|(i, c)| (c.clone(), chart.backend_coord(&(i as f64, 0.0))))
        .collect();
    draw_ticks(root, ticks)?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.9))
        .border_style(AXIS)
        .label_font(text_style(13.0))
        .draw()
}

/// Color swatches with names, stacked in the top-left corner of `area`.
fn draw_swatch_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    entries: &[(String, RGBColor)],
) -> DrawResult<DB> {
    let style = text_style(13.0).pos(Pos::new(HPos::Left, VPos::Center));
    for (i, (label, color)) in entries.iter().enumerate() {
        let y = 16 + i as i32 * 20;
        area.draw(&Rectangle::new([(12, y - 6), (24, y + 6)], color.filled()))?;
        area.draw(&Text::new(label.clone(), (30, y), style.clone()))?;
    }
    Ok(())
}

fn draw_radar<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    body: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
) -> DrawResult<DB> {
    let axes = spec.categories.len();
    if axes < 3 {
        // A radar needs at least a triangle.
        return draw_lines(root, body, spec);
    }

    let (width, height) = body.dim_in_pixel();
    let center = (width as f64 / 2.0, height as f64 / 2.0);
    let radius = (height as f64 / 2.0 - 40.0).max(10.0);
    let max = match spec.max_value() {
        m if m > 0.0 => m,
        _ => 1.0,
    };
    let point = |axis: usize, fraction: f64| {
        let angle = -FRAC_PI_2 + TAU * axis as f64 / axes as f64;
        (
            (center.0 + radius * fraction * angle.cos()).round() as i32,
            (center.1 + radius * fraction * angle.sin()).round() as i32,
        )
    };
    let closed = |mut ring: Vec<(i32, i32)>| {
        if let Some(first) = ring.first().copied() {
            ring.push(first);
        }
        ring
    };

    for ring in 1..=4 {
        let fraction = ring as f64 / 4.0;
        body.draw(&PathElement::new(
            closed((0..axes).map(|a| point(a, fraction)).collect()),
            GRID,
        ))?;
    }

    let label_style = text_style(13.0).pos(Pos::new(HPos::Center, VPos::Center));
    let hub = (center.0 as i32, center.1 as i32);
    for (a, label) in spec.categories.iter().enumerate() {
        body.draw(&PathElement::new(vec![hub, point(a, 1.0)], AXIS))?;
        body.draw(&Text::new(label.clone(), point(a, 1.15), label_style.clone()))?;
    }

    for (s, series) in spec.series.iter().enumerate() {
        let color = series_color(s);
        let vertices: Vec<(i32, i32)> = (0..axes)
            .map(|a| {
                let v = clamp(series.values.get(a).copied().unwrap_or(0.0));
                point(a, (v / max).min(1.0))
            })
            .collect();
        body.draw(&Polygon::new(vertices.clone(), color.mix(0.25).filled()))?;
        body.draw(&PathElement::new(closed(vertices), color.stroke_width(2)))?;
    }

    let entries: Vec<_> = spec
        .series
        .iter()
        .enumerate()
        .map(|(s, series)| (series.label.clone(), series_color(s)))
        .collect();
    draw_swatch_legend(body, &entries)
}

fn draw_slices<DB: DrawingBackend>(
    body: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    hole: f64,
) -> DrawResult<DB> {
    let values: Vec<f64> = spec
        .series
        .first()
        .map(|s| s.values.iter().copied().map(clamp).collect())
        .unwrap_or_default();
    let total: f64 = values.iter().sum();

    let (width, height) = body.dim_in_pixel();
    let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
    let hub = (cx as i32, cy as i32);
    let radius = height as f64 / 2.0 - 20.0;

    if total <= 0.0 {
        return body.draw(&Text::new(
            "No data".to_string(),
            hub,
            text_style(16.0).pos(Pos::new(HPos::Center, VPos::Center)),
        ));
    }

    let mut start = -FRAC_PI_2;
    for (i, v) in values.iter().enumerate() {
        if *v <= 0.0 {
            continue;
        }
        let sweep = v / total * TAU;
        let steps = (sweep / TAU * 180.0).ceil().max(2.0) as usize;
        let mut outline = vec![hub];
        outline.extend((0..=steps).map(|k| {
            let angle = start + sweep * k as f64 / steps as f64;
            (
                (cx + radius * angle.cos()).round() as i32,
                (cy + radius * angle.sin()).round() as i32,
            )
        }));
        body.draw(&Polygon::new(outline, series_color(i).filled()))?;
        start += sweep;
    }

    if hole > 0.0 {
        body.draw(&Circle::new(hub, (radius * hole) as i32, WHITE.filled()))?;
    }

    let entries: Vec<_> = spec
        .categories
        .iter()
        .enumerate()
        .map(|(i, c)| (c.clone(), series_color(i)))
        .collect();
    draw_swatch_legend(body, &entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE_PIXEL: [u8; 3] = [255, 255, 255];

    fn count_color(img: &RgbImage, color: [u8; 3]) -> usize {
        img.pixels().filter(|p| p.0 == color).count()
    }

    /// Center of the plot body, below the caption strip.
    fn body_center() -> (u32, u32) {
        (
            SNAPSHOT_WIDTH / 2,
            TITLE_HEIGHT + (SNAPSHOT_HEIGHT - TITLE_HEIGHT) / 2,
        )
    }

    #[test]
    fn test_taller_bar_covers_more_pixels() {
        let spec = ChartSpec::new(ChartKind::Bar, "t", vec!["a", "b"])
            .with_series("s", vec![1.0, 2.0]);
        let img = rasterize(&spec).unwrap();
        let bar_color = palette_color(0);

        let half = SNAPSHOT_WIDTH / 2;
        let (left, right) = img
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0 == bar_color)
            .fold((0, 0), |(l, r), (x, _, _)| if x < half { (l + 1, r) } else { (l, r + 1) });
        assert!(left > 0);
        assert!(right > left);
    }

    #[test]
    fn test_labels_change_the_snapshot() {
        let first = ChartSpec::new(ChartKind::Bar, "CO2 vs Cost", vec!["Bagasse", "Cork"])
            .with_series("CO2 Emissions", vec![1.1, 1.4]);
        let second = ChartSpec::new(ChartKind::Bar, "Totally different", vec!["Glass", "Steel"])
            .with_series("Something else", vec![1.1, 1.4]);
        assert_ne!(rasterize(&first).unwrap(), rasterize(&second).unwrap());
    }

    #[test]
    fn test_category_names_alone_change_the_snapshot() {
        let spec = |names: Vec<&str>| {
            ChartSpec::new(ChartKind::Pie, "Materials", names).with_series("Reports", vec![2.0, 1.0])
        };
        assert_ne!(
            rasterize(&spec(vec!["Jute", "Cork"])).unwrap(),
            rasterize(&spec(vec!["Glass", "Steel"])).unwrap()
        );
    }

    #[test]
    fn test_title_is_drawn_in_caption_strip() {
        let spec = ChartSpec::new::<&str>(ChartKind::Line, "Report Trend", vec![]);
        let img = rasterize(&spec).unwrap();
        let inked = (0..TITLE_HEIGHT)
            .flat_map(|y| (0..SNAPSHOT_WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| img.get_pixel(x, y).0 != WHITE_PIXEL)
            .count();
        assert!(inked > 0);
        assert_eq!(count_color(&img, palette_color(0)), 0);
    }

    #[test]
    fn test_pie_uses_one_color_per_slice() {
        let spec = ChartSpec::new(ChartKind::Pie, "t", vec!["a", "b", "c"])
            .with_series("s", vec![1.0, 1.0, 2.0]);
        let img = rasterize(&spec).unwrap();
        for i in 0..3 {
            assert!(count_color(&img, palette_color(i)) > 100);
        }
    }

    #[test]
    fn test_doughnut_leaves_center_blank() {
        let spec = ChartSpec::new(ChartKind::Doughnut, "t", vec!["a"]).with_series("s", vec![5.0]);
        let img = rasterize(&spec).unwrap();
        let (cx, cy) = body_center();
        let (x, y) = (cx + 40, cy + 40);
        assert_eq!(img.get_pixel(x, y).0, WHITE_PIXEL);

        let pie = ChartSpec::new(ChartKind::Pie, "t", vec!["a"]).with_series("s", vec![5.0]);
        let img = rasterize(&pie).unwrap();
        assert_eq!(img.get_pixel(x, y).0, palette_color(0));
    }

    #[test]
    fn test_radar_draws_every_series() {
        let spec = ChartSpec::new(ChartKind::Radar, "t", vec!["CO₂", "Cost", "Eco Score"])
            .with_series("Cork", vec![1.1, 4.5, 0.81])
            .with_series("Jute", vec![2.0, 3.2, 0.55]);
        let img = rasterize(&spec).unwrap();
        assert!(count_color(&img, palette_color(0)) > 0);
        assert!(count_color(&img, palette_color(1)) > 0);
    }
}
