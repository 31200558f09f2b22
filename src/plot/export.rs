//! Figure → image file via plotters.

use std::{
    fs,
    path::{Path, PathBuf},
};

use plotters::{
    backend::{BitMapBackend, DrawingBackend, SVGBackend},
    chart::{ChartBuilder, SeriesLabelPosition},
    coord::Shift,
    drawing::{DrawingArea, IntoDrawingArea},
    element::{Circle, Cross, ErrorBar, PathElement, Rectangle, TriangleMarker},
    series::{DashedLineSeries, LineSeries},
    style::{
        Color, IntoFont,
        colors::{BLACK, WHITE},
    },
};

use crate::{
    core::{
        bounds::settle,
        constants::{FIGURE_INCHES, POINTS_PER_INCH},
        error::PlotError,
    },
    plot::{
        figure::{Axes, Figure, Scale, Series},
        style::{LineStyle, Marker},
    },
};

/// Fraction of the data range added on each side.
const RANGE_PADDING: f64 = 0.05;
const FONT_POINTS: f64 = 10.0;
const LINE_POINTS: f64 = 1.5;

/// Output path for `filename`: `-log` appended when a log axis is asked for
/// and the name does not mention it, a three-character extension replaced
/// by `ext`.
#[must_use]
pub fn export_path(filename: &str, log: &str, ext: &str, outpath: &Path) -> PathBuf {
    let stem = match filename.rsplit_once('.') {
        Some((stem, old))
            if !stem.is_empty() && old.len() == 3 && old.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            stem
        }
        _ => filename,
    };
    let mut name = stem.to_owned();
    if (log.contains('x') || log.contains('y')) && !name.contains("log") {
        name.push_str("-log");
    }
    if !ext.starts_with('.') {
        name.push('.');
    }
    name.push_str(ext);
    outpath.join(name)
}

fn backend<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Backend(e.to_string())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn points_to_px(pt: f64, dpi: u32) -> u32 {
    (pt * f64::from(dpi) / POINTS_PER_INCH).round().max(1.0) as u32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pixel_size(dpi: u32) -> (u32, u32) {
    let (w, h) = FIGURE_INCHES;
    (
        (w * f64::from(dpi)).round() as u32,
        (h * f64::from(dpi)).round() as u32,
    )
}

/// Write `fig` to `path`; `.svg` goes through the SVG backend, anything
/// else through the bitmap backend (which picks the format by extension).
pub fn save_figure(fig: &Figure, path: &Path, dpi: u32) -> Result<(), PlotError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let size = pixel_size(dpi);
    let svg = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if svg {
        draw(SVGBackend::new(path, size).into_drawing_area(), &fig.axes, dpi)
    } else {
        draw(BitMapBackend::new(path, size).into_drawing_area(), &fig.axes, dpi)
    }
}

/// Padded drawing-coordinate range, overridden by explicit limits.
fn axis_range(values: impl Iterator<Item = f64>, limits: Option<(f64, f64)>, scale: Scale) -> (f64, f64) {
    if let Some((lo, hi)) = limits {
        if let (Some(lo), Some(hi)) = (scale.apply(lo), scale.apply(hi)) {
            if lo < hi {
                return (lo, hi);
            }
        }
    }
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let (lo, hi) = settle(lo, hi);
    let pad = (hi - lo) * RANGE_PADDING;
    (lo - pad, hi + pad)
}

/// Drawing coordinates of every point with its error extent along one axis.
fn extents(axes: &Axes, vertical: bool) -> Vec<f64> {
    let scale = if vertical { axes.yscale } else { axes.xscale };
    let mut out = Vec::new();
    for s in &axes.series {
        let data = if vertical { &s.y } else { &s.x };
        for (i, &v) in data.iter().enumerate() {
            let err = s.errors.as_ref().map_or(0.0, |(xe, ye)| {
                Series::error_at(if vertical { ye } else { xe }, i)
            });
            out.extend([v - err, v, v + err].into_iter().filter_map(|v| scale.apply(v)));
        }
    }
    out
}

fn tick(scale: Scale, v: f64) -> String {
    let v = scale.invert(v);
    let a = v.abs();
    if a != 0.0 && !(1e-3..1e5).contains(&a) {
        return format!("{v:.1e}");
    }
    let s = format!("{v:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_owned()
}

#[allow(
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::too_many_lines
)]
fn draw<DB: DrawingBackend>(root: DrawingArea<DB, Shift>, axes: &Axes, dpi: u32) -> Result<(), PlotError> {
    root.fill(&WHITE).map_err(backend)?;

    let (xs, ys) = (axes.xscale, axes.yscale);
    let x_range = axis_range(extents(axes, false).into_iter(), axes.xlim, xs);
    let y_range = axis_range(extents(axes, true).into_iter(), axes.ylim, ys);

    let font_px = points_to_px(FONT_POINTS, dpi);
    let line_px = points_to_px(LINE_POINTS, dpi);

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(font_px)
        .x_label_area_size(font_px * 3)
        .y_label_area_size(font_px * 5);
    if !axes.title.is_empty() {
        builder.caption(&axes.title, ("sans-serif", font_px * 6 / 5).into_font());
    }
    let mut chart = builder
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)
        .map_err(backend)?;

    let x_fmt = move |v: &f64| tick(xs, *v);
    let y_fmt = move |v: &f64| tick(ys, *v);
    chart
        .configure_mesh()
        .x_desc(axes.xlabel.as_str())
        .y_desc(axes.ylabel.as_str())
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt)
        .label_style(("sans-serif", font_px).into_font())
        .light_line_style(BLACK.mix(0.1))
        .draw()
        .map_err(backend)?;

    for (idx, s) in axes.series.iter().enumerate() {
        let color = s.style.color_or_cycle(idx).mix(s.alpha.clamp(0.0, 1.0));
        let stroke = color.stroke_width(line_px);
        let radius = (points_to_px(s.markersize, dpi) / 2).max(1) as i32;
        let pts: Vec<(f64, f64)> = s.points(xs, ys).collect();

        if let Some((xerr, yerr)) = &s.errors {
            let cap = radius as u32;
            let bars = s.x.iter().zip(&s.y).enumerate().filter_map(|(i, (&x, &y))| {
                let (px, py) = (xs.apply(x)?, ys.apply(y)?);
                let e = Series::error_at(yerr, i);
                let (lo, hi) = (ys.apply(y - e).unwrap_or(py), ys.apply(y + e).unwrap_or(py));
                Some(ErrorBar::new_vertical(px, lo, py, hi, stroke, cap))
            });
            chart.draw_series(bars).map_err(backend)?;
            let bars = s.x.iter().zip(&s.y).enumerate().filter_map(|(i, (&x, &y))| {
                let (px, py) = (xs.apply(x)?, ys.apply(y)?);
                let e = Series::error_at(xerr, i);
                let (lo, hi) = (xs.apply(x - e).unwrap_or(px), xs.apply(x + e).unwrap_or(px));
                Some(ErrorBar::new_horizontal(py, lo, px, hi, stroke, cap))
            });
            chart.draw_series(bars).map_err(backend)?;
        }

        match s.style.marker {
            Some(Marker::Point) => {
                let dot = stroke.filled();
                chart
                    .draw_series(pts.iter().map(|&p| Circle::new(p, (radius / 3).max(1), dot)))
                    .map_err(backend)?;
            }
            Some(Marker::Circle) => {
                chart
                    .draw_series(pts.iter().map(|&p| Circle::new(p, radius, stroke)))
                    .map_err(backend)?;
            }
            Some(Marker::Triangle) => {
                chart
                    .draw_series(pts.iter().map(|&p| TriangleMarker::new(p, radius, stroke)))
                    .map_err(backend)?;
            }
            Some(Marker::Cross) => {
                chart
                    .draw_series(pts.iter().map(|&p| Cross::new(p, radius, stroke)))
                    .map_err(backend)?;
            }
            // Drawn in pixels so the shape keeps its size on any scale.
            Some(Marker::Square) => {
                for p in &pts {
                    let (x, y) = chart.backend_coord(p);
                    let corners = [(x - radius, y - radius), (x + radius, y + radius)];
                    root.draw(&Rectangle::new(corners, stroke)).map_err(backend)?;
                }
            }
            Some(Marker::Plus) => {
                for p in &pts {
                    let (x, y) = chart.backend_coord(p);
                    root.draw(&PathElement::new(vec![(x - radius, y), (x + radius, y)], stroke))
                        .map_err(backend)?;
                    root.draw(&PathElement::new(vec![(x, y - radius), (x, y + radius)], stroke))
                        .map_err(backend)?;
                }
            }
            None => {}
        }

        let dash = (line_px * 4) as i32;
        match s.style.line {
            Some(LineStyle::Solid) => {
                chart.draw_series(LineSeries::new(pts.iter().copied(), stroke)).map_err(backend)?;
            }
            Some(LineStyle::Dashed) => {
                chart
                    .draw_series(DashedLineSeries::new(pts.iter().copied(), dash, dash / 2, stroke))
                    .map_err(backend)?;
            }
            Some(LineStyle::Dotted) => {
                let dot = line_px as i32;
                chart
                    .draw_series(DashedLineSeries::new(pts.iter().copied(), dot, dot * 2, stroke))
                    .map_err(backend)?;
            }
            None => {}
        }

        if let Some(label) = &s.label {
            let anno = chart
                .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())
                .map_err(backend)?;
            anno.label(label.as_str());
            if s.style.line.is_some() {
                anno.legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], stroke));
            } else {
                anno.legend(move |(x, y)| Circle::new((x + 10, y), radius, stroke));
            }
        }
    }

    if axes.series.iter().any(|s| s.label.is_some()) {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font(("sans-serif", font_px).into_font())
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(backend)?;
    }

    root.present().map_err(backend)?;
    Ok(())
}
