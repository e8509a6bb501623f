use shared::state::ChartSeries;
use yew::prelude::*;

const WIDTH: f64 = 320.0;
const HEIGHT: f64 = 120.0;
const PADDING: f64 = 8.0;

/// SVG `points` for `values` scaled into the plot area, oldest on the left.
/// A flat series is drawn across the middle.
fn polyline_points(values: &[f64], width: f64, height: f64) -> String {
    let Some((low, high)) = values.iter().copied().fold(None, |acc: Option<(f64, f64)>, v| {
        Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
    }) else {
        return String::new();
    };
    let inner_w = width - 2.0 * PADDING;
    let inner_h = height - 2.0 * PADDING;
    #[allow(clippy::cast_precision_loss)]
    let step = if values.len() > 1 {
        inner_w / (values.len() - 1) as f64
    } else {
        0.0
    };

    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            #[allow(clippy::cast_precision_loss)]
            let x = PADDING + step * index as f64;
            let y = if high > low {
                PADDING + inner_h * (1.0 - (value - low) / (high - low))
            } else {
                height / 2.0
            };
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Properties, PartialEq)]
pub struct VitalsChartProps {
    pub series: ChartSeries,
}

/// Line chart of one metric over the latest readings.
#[function_component(VitalsChart)]
pub fn vitals_chart(props: &VitalsChartProps) -> Html {
    let series = &props.series;
    let body = if series.is_empty() {
        html! { <p class="text-sm opacity-70">{"No readings yet"}</p> }
    } else {
        let points = polyline_points(&series.values, WIDTH, HEIGHT);
        let range = series.bounds().map(|(low, high)| {
            format!("{} – {}", series.kind.format_value(low), series.kind.format_value(high))
        });
        html! {
            <>
                <svg viewBox={format!("0 0 {WIDTH} {HEIGHT}")} class="w-full h-32">
                    <polyline
                        fill="none"
                        stroke="currentColor"
                        stroke-width="2"
                        class="text-primary"
                        points={points}
                    />
                </svg>
                <div class="flex justify-between text-xs opacity-70">
                    <span>{ series.labels.first().cloned().unwrap_or_default() }</span>
                    <span>{ range.unwrap_or_default() }</span>
                    <span>{ series.labels.last().cloned().unwrap_or_default() }</span>
                </div>
            </>
        }
    };

    html! {
        <div class="card bg-base-200 shadow">
            <div class="card-body p-4">
                <h3 class="card-title text-base">{ series.label }</h3>
                { body }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_span_the_plot_area() {
        let points = polyline_points(&[1.0, 2.0, 3.0], 100.0, 50.0);
        assert_eq!(points, "8.0,42.0 50.0,25.0 92.0,8.0");
    }

    #[test]
    fn flat_and_empty_series() {
        assert_eq!(polyline_points(&[5.0, 5.0], 100.0, 50.0), "8.0,25.0 92.0,25.0");
        assert_eq!(polyline_points(&[7.0], 100.0, 50.0), "8.0,25.0");
        assert!(polyline_points(&[], 100.0, 50.0).is_empty());
    }
}
