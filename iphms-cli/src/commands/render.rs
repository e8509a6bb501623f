//! Plain-text tables and charts for terminal output.

use shared::state::{ChartSeries, PageInfo, PageNumber};

/// Render rows under a header, padding each column to its widest cell.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}", width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };
    let rule = widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join("  ");

    let mut out = vec![line(headers.to_vec()), rule];
    out.extend(rows.iter().map(|row| line(row.iter().map(String::as_str).collect())));
    out.join("\n")
}

/// `Showing 11-20 of 25 (page 2 of 3)  1 [2] 3`
pub fn page_footer(info: &PageInfo, numbers: &[PageNumber]) -> String {
    if info.total_items == 0 {
        return "No results".to_string();
    }
    let selector = numbers
        .iter()
        .map(|number| match number {
            PageNumber::Page(page) if *page == info.current_page => format!("[{page}]"),
            PageNumber::Page(page) => page.to_string(),
            PageNumber::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "Showing {}-{} of {} (page {} of {})  {selector}",
        info.first_item_index + 1,
        info.last_item_index,
        info.total_items,
        info.current_page,
        info.total_pages,
    )
}

const BAR_WIDTH: f64 = 40.0;

/// One bar per point, scaled between the series' minimum and maximum.
pub fn bar_chart(series: &ChartSeries, unit: &str) -> String {
    let Some((low, high)) = series.bounds() else {
        return format!("{}: no readings", series.label);
    };
    let span = (high - low).max(f64::EPSILON);
    let label_width = series.labels.iter().map(String::len).max().unwrap_or(0);

    let mut out = vec![format!("{} ({unit})", series.label)];
    for (label, value) in series.labels.iter().zip(&series.values) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let filled = 1 + ((value - low) / span * (BAR_WIDTH - 1.0)).round() as usize;
        out.push(format!(
            "{label:>label_width$} | {} {value:.1}",
            "█".repeat(filled)
        ));
    }
    out.join("\n")
}
