//! Chart Components
//!
//! Assessment trend line, category radar and score distribution pie, all
//! drawn on HTML5 Canvas. Score axes are fixed to the 1-5 range so charts
//! stay comparable between visits.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::api::{CategoryBreakdown, TrendPoint};

const LINE_COLOR: &str = "#a78bfa"; // violet-400
const Y_MIN: f64 = 1.0;
const Y_MAX: f64 = 5.0;

/// One shade per category, darkest first
const SLICE_COLORS: [&str; 5] = ["#8b5cf6", "#a78bfa", "#c4b5fd", "#ddd6fe", "#ede9fe"];

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

/// Average score per assessment, oldest first
#[component]
pub fn TrendChart(points: Vec<TrendPoint>) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &points);
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width="800"
            height="320"
            class="w-full h-64 rounded-lg"
        />
    }
}

/// X position of point `i` of `count`, evenly spaced
fn x_for(i: usize, count: usize, left: f64, width: f64) -> f64 {
    if count <= 1 {
        left + width / 2.0
    } else {
        left + (i as f64 / (count - 1) as f64) * width
    }
}

fn draw_chart(canvas: &HtmlCanvasElement, points: &[TrendPoint]) {
    let Some(ctx) = context_2d(canvas) else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    // Margins
    let margin_left = 40.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;
    let y_for = |value: f64| {
        margin_top + ((Y_MAX - value.clamp(Y_MIN, Y_MAX)) / (Y_MAX - Y_MIN)) * chart_height
    };

    // Clear canvas
    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    // One grid line per score step
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);
    ctx.set_fill_style(&"#9ca3af".into()); // gray-400
    ctx.set_font("12px sans-serif");

    for step in 1..=5 {
        let y = y_for(step as f64);
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();
        let _ = ctx.fill_text(&step.to_string(), 15.0, y + 4.0);
    }

    if points.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No assessments yet", width / 2.0 - 70.0, height / 2.0);
        return;
    }

    // Line
    ctx.set_stroke_style(&LINE_COLOR.into());
    ctx.set_line_width(2.0);
    ctx.begin_path();
    for (i, point) in points.iter().enumerate() {
        let x = x_for(i, points.len(), margin_left, chart_width);
        let y = y_for(point.average_score);
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.stroke();

    // Points and date labels
    let label_every = (points.len() / 6).max(1);
    for (i, point) in points.iter().enumerate() {
        let x = x_for(i, points.len(), margin_left, chart_width);

        ctx.set_fill_style(&LINE_COLOR.into());
        ctx.begin_path();
        let _ = ctx.arc(x, y_for(point.average_score), 4.0, 0.0, std::f64::consts::PI * 2.0);
        ctx.fill();

        if i % label_every == 0 || i + 1 == points.len() {
            let date = chrono::DateTime::from_timestamp_millis(point.timestamp)
                .map(|dt| dt.format("%m/%d").to_string())
                .unwrap_or_default();
            ctx.set_fill_style(&"#9ca3af".into());
            ctx.set_font("12px sans-serif");
            let _ = ctx.fill_text(&date, x - 15.0, height - 10.0);
        }
    }
}

/// Latest score per category on one spoke each
#[component]
pub fn RadarChart(categories: Vec<CategoryBreakdown>) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        if let Some(canvas) = canvas_ref.get() {
            draw_radar(&canvas, &categories);
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width="640"
            height="400"
            class="w-full h-80 rounded-lg"
        />
    }
}

/// Point on spoke `i` of `count` at `value` on the 0-5 scale. Spoke 0
/// points straight up, the rest follow clockwise.
fn radar_point(i: usize, count: usize, value: f64, center: (f64, f64), radius: f64) -> (f64, f64) {
    let angle = -std::f64::consts::FRAC_PI_2
        + (i as f64 / count.max(1) as f64) * std::f64::consts::TAU;
    let r = radius * value.clamp(0.0, Y_MAX) / Y_MAX;
    (center.0 + r * angle.cos(), center.1 + r * angle.sin())
}

fn draw_radar(canvas: &HtmlCanvasElement, categories: &[CategoryBreakdown]) {
    let Some(ctx) = context_2d(canvas) else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let center = (width / 2.0, height / 2.0);
    let radius = height / 2.0 - 50.0;
    let count = categories.len();

    ctx.set_fill_style(&"#1f2937".into());
    ctx.fill_rect(0.0, 0.0, width, height);

    if count < 3 {
        return;
    }

    // Rings at each score step
    ctx.set_stroke_style(&"#374151".into());
    ctx.set_line_width(1.0);
    for step in 1..=5 {
        ctx.begin_path();
        for i in 0..=count {
            let (x, y) = radar_point(i % count, count, step as f64, center, radius);
            if i == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        }
        ctx.stroke();
    }

    // Spokes and labels
    ctx.set_fill_style(&"#9ca3af".into());
    ctx.set_font("12px sans-serif");
    ctx.set_text_align("center");
    for (i, category) in categories.iter().enumerate() {
        let (x, y) = radar_point(i, count, Y_MAX, center, radius);
        ctx.begin_path();
        ctx.move_to(center.0, center.1);
        ctx.line_to(x, y);
        ctx.stroke();

        let (lx, ly) = radar_point(i, count, Y_MAX * 1.15, center, radius);
        let _ = ctx.fill_text(&category.title, lx, ly + 4.0);
    }
    ctx.set_text_align("start");

    // Score polygon
    ctx.begin_path();
    for (i, category) in categories.iter().enumerate() {
        let (x, y) = radar_point(i, count, category.score, center, radius);
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.close_path();
    ctx.set_global_alpha(0.3);
    ctx.set_fill_style(&SLICE_COLORS[0].into());
    ctx.fill();
    ctx.set_global_alpha(1.0);
    ctx.set_stroke_style(&SLICE_COLORS[0].into());
    ctx.set_line_width(2.0);
    ctx.stroke();
}

/// Share of the latest total each category holds
#[component]
pub fn PieChart(categories: Vec<CategoryBreakdown>) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        if let Some(canvas) = canvas_ref.get() {
            draw_pie(&canvas, &categories);
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width="640"
            height="400"
            class="w-full h-80 rounded-lg"
        />
    }
}

/// Start and end angle of each slice, clockwise from twelve o'clock.
/// Empty when there is nothing to share out.
fn pie_slices(values: &[f64]) -> Vec<(f64, f64)> {
    let total: f64 = values.iter().map(|v| v.max(0.0)).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut start = -std::f64::consts::FRAC_PI_2;
    values
        .iter()
        .map(|value| {
            let end = start + value.max(0.0) / total * std::f64::consts::TAU;
            let slice = (start, end);
            start = end;
            slice
        })
        .collect()
}

fn draw_pie(canvas: &HtmlCanvasElement, categories: &[CategoryBreakdown]) {
    let Some(ctx) = context_2d(canvas) else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let center = (height / 2.0, height / 2.0);
    let radius = height / 2.0 - 30.0;

    ctx.set_fill_style(&"#1f2937".into());
    ctx.fill_rect(0.0, 0.0, width, height);

    let scores: Vec<f64> = categories.iter().map(|c| c.score).collect();
    let total: f64 = scores.iter().sum();
    let slices = pie_slices(&scores);

    ctx.set_stroke_style(&"#1f2937".into());
    ctx.set_line_width(2.0);
    ctx.set_font("13px sans-serif");

    for (i, ((start, end), category)) in slices.iter().zip(categories).enumerate() {
        let color = SLICE_COLORS[i % SLICE_COLORS.len()];

        ctx.set_fill_style(&color.into());
        ctx.begin_path();
        ctx.move_to(center.0, center.1);
        let _ = ctx.arc(center.0, center.1, radius, *start, *end);
        ctx.close_path();
        ctx.fill();
        ctx.stroke();

        // Legend
        let legend_x = height + 10.0;
        let legend_y = 60.0 + i as f64 * 28.0;
        ctx.fill_rect(legend_x, legend_y - 10.0, 12.0, 12.0);
        ctx.set_fill_style(&"#d1d5db".into());
        let percent = (category.score / total * 100.0).round();
        let _ = ctx.fill_text(
            &format!("{}: {}%", category.title, percent),
            legend_x + 20.0,
            legend_y,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_point_is_centered() {
        assert_eq!(x_for(0, 1, 40.0, 100.0), 90.0);
    }

    #[test]
    fn test_points_span_width() {
        assert_eq!(x_for(0, 3, 40.0, 100.0), 40.0);
        assert_eq!(x_for(2, 3, 40.0, 100.0), 140.0);
    }

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn test_radar_first_spoke_points_up() {
        assert!(close(radar_point(0, 5, 5.0, (100.0, 100.0), 50.0), (100.0, 50.0)));
        assert!(close(radar_point(0, 5, 2.5, (100.0, 100.0), 50.0), (100.0, 75.0)));
    }

    #[test]
    fn test_radar_spokes_go_clockwise() {
        // A quarter turn from the top is the right-hand side
        assert!(close(radar_point(1, 4, 5.0, (0.0, 0.0), 10.0), (10.0, 0.0)));
        assert!(close(radar_point(2, 4, 9.0, (0.0, 0.0), 10.0), (0.0, 10.0)));
    }

    #[test]
    fn test_pie_slices_cover_the_circle() {
        let slices = pie_slices(&[1.0, 1.0, 2.0]);
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].0, -std::f64::consts::FRAC_PI_2);
        assert_eq!(slices[0].1, slices[1].0);
        let covered = slices[2].1 - slices[0].0;
        assert!((covered - std::f64::consts::TAU).abs() < 1e-9);
        assert!(((slices[2].1 - slices[2].0) - std::f64::consts::PI).abs() < 1e-9);
    }

    #[test]
    fn test_pie_needs_a_positive_total() {
        assert!(pie_slices(&[]).is_empty());
        assert!(pie_slices(&[0.0, 0.0]).is_empty());
    }
}
