//! Figure registry and the `plot` entry point.

use std::path::PathBuf;

use crate::{
    core::{
        bounds::{Axis, Span, graph_dims, terminal_geometry, y_label_width},
        color::AnsiCode,
        constants::{DECIMAL_PRECISION, DEFAULT_DPI, FIGURE_COUNT},
        error::{Error, PlotError},
    },
    plot::{export, style::Style},
    render::{self, Renderer, ViewBuilder},
};

/// Terminal preview height cap, in character rows.
const PREVIEW_ROWS: usize = 20;

/// Axis scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scale {
    #[default]
    Linear,
    Log,
}

impl Scale {
    /// Data value → drawing coordinate. `None` for values the scale cannot
    /// show (non-finite, or ≤ 0 on a log axis).
    #[inline]
    #[must_use]
    pub fn apply(self, v: f64) -> Option<f64> {
        match self {
            Self::Linear => v.is_finite().then_some(v),
            Self::Log => (v.is_finite() && v > 0.0).then(|| v.log10()),
        }
    }

    /// Drawing coordinate → data value.
    #[inline]
    #[must_use]
    pub fn invert(self, v: f64) -> f64 {
        match self {
            Self::Linear => v,
            Self::Log => 10f64.powf(v),
        }
    }
}

/// One drawn data set.
#[derive(Clone, Debug)]
pub struct Series {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// `(xerr, yerr)`; a one-element vector applies to every point.
    pub errors: Option<(Vec<f64>, Vec<f64>)>,
    pub style: Style,
    /// Marker size in points.
    pub markersize: f64,
    pub alpha: f64,
    pub label: Option<String>,
}

impl Series {
    /// Points in drawing coordinates; points a scale cannot show are dropped.
    pub fn points(&self, xs: Scale, ys: Scale) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .filter_map(move |(&x, &y)| Some((xs.apply(x)?, ys.apply(y)?)))
    }

    /// Error of point `i`, broadcasting a single value.
    #[must_use]
    pub fn error_at(err: &[f64], i: usize) -> f64 {
        err.get(i).or_else(|| err.first()).copied().unwrap_or(0.0)
    }
}

/// Everything one figure shows.
#[derive(Clone, Debug, Default)]
pub struct Axes {
    pub series: Vec<Series>,
    pub xscale: Scale,
    pub yscale: Scale,
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
    pub xlabel: String,
    pub ylabel: String,
    pub title: String,
}

impl Axes {
    /// Label the series in drawing order; surplus labels are ignored.
    pub fn set_legend(&mut self, labels: &[String]) {
        for (s, l) in self.series.iter_mut().zip(labels) {
            s.label = Some(l.clone());
        }
    }

    /// `-` forces linear scales; otherwise `x` / `y` switch that axis to log.
    pub fn set_log(&mut self, log: &str) {
        if log == "-" {
            self.xscale = Scale::Linear;
            self.yscale = Scale::Linear;
            return;
        }
        if log.contains('x') {
            self.xscale = Scale::Log;
        }
        if log.contains('y') {
            self.yscale = Scale::Log;
        }
    }

    /// Every point (with error extents) as drawing-coordinate spans.
    #[must_use]
    pub fn spans(&self) -> Vec<Span> {
        let (xs, ys) = (self.xscale, self.yscale);
        let mut out = Vec::new();
        for s in &self.series {
            for (i, (&x, &y)) in s.x.iter().zip(&s.y).enumerate() {
                let (Some(px), Some(py)) = (xs.apply(x), ys.apply(y)) else {
                    continue;
                };
                let (lo, hi) = match &s.errors {
                    Some((_, yerr)) => {
                        let e = Series::error_at(yerr, i);
                        (ys.apply(y - e).unwrap_or(py), ys.apply(y + e).unwrap_or(py))
                    }
                    None => (py, py),
                };
                out.push(Span { x: px, lo, hi });
            }
        }
        out
    }
}

/// A numbered figure.
#[derive(Clone, Debug)]
pub struct Figure {
    pub number: usize,
    pub axes: Axes,
}

impl Figure {
    fn new(number: usize) -> Self {
        Self {
            number,
            axes: Axes::default(),
        }
    }

    fn heading(&self) -> String {
        if self.axes.title.is_empty() {
            format!("Figure {}", self.number)
        } else {
            self.axes.title.clone()
        }
    }

    fn subtitle(&self) -> Option<String> {
        let a = &self.axes;
        match (a.xlabel.is_empty(), a.ylabel.is_empty()) {
            (true, true) => None,
            (false, true) => Some(format!("x: {}", a.xlabel)),
            (true, false) => Some(format!("y: {}", a.ylabel)),
            (false, false) => Some(format!("x: {}  y: {}", a.xlabel, a.ylabel)),
        }
    }

    fn view(&self, color: AnsiCode) -> impl FnOnce(ViewBuilder) -> ViewBuilder + use<> {
        let (title, subtitle) = (self.heading(), self.subtitle());
        move |b| b.title(title).subtitle_opt(subtitle).color(color)
    }

    /// Braille preview of the figure in an `x_chars` × `y_chars` graph area.
    pub fn preview_string(&self, x_chars: usize, y_chars: usize, color: &str) -> Result<String, Error> {
        render::frame_spans(self.axes.spans(), x_chars, y_chars, self.view(color.into()))
    }

    /// Print the preview sized to the current terminal.
    pub fn preview(&self) -> Result<(), Error> {
        let spans = self.axes.spans();
        if spans.is_empty() {
            tracing::warn!(figure = self.number, "nothing to preview");
            return Ok(());
        }
        let label_w = y_label_width(Axis::Y.bounds(&spans), DECIMAL_PRECISION);
        let (x_chars, y_chars) = graph_dims(terminal_geometry(), spans.len(), label_w);
        let view = self.view(AnsiCode::industrial_orange());
        let (cfg, plot) = render::prepare(spans, x_chars, y_chars.min(PREVIEW_ROWS), view)?;
        Renderer::full().render(&cfg, &plot)
    }
}

/// Keyword arguments of [`Figures::plot`].
#[derive(Clone, Debug)]
pub struct PlotOptions {
    pub xerr: Vec<f64>,
    pub yerr: Vec<f64>,
    /// Figure number, 1 ..= 10; anything else selects figure 1.
    pub figure: usize,
    pub fmt: String,
    pub markersize: f64,
    pub alpha: f64,
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
    pub xlabel: String,
    pub ylabel: String,
    pub title: String,
    pub dpi: u32,
    /// `""` untouched, `"-"` both linear, otherwise `x` and/or `y` log.
    pub log: String,
    pub ext: String,
    /// Export target; empty means no file.
    pub filename: String,
    pub outpath: PathBuf,
    /// Clear the figure before drawing.
    pub newplot: bool,
    pub legend: Vec<String>,
    /// Print the braille preview afterwards.
    pub show: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            xerr: Vec::new(),
            yerr: Vec::new(),
            figure: 1,
            fmt: "+".to_owned(),
            markersize: 8.0,
            alpha: 1.0,
            xlim: None,
            ylim: None,
            xlabel: String::new(),
            ylabel: String::new(),
            title: String::new(),
            dpi: DEFAULT_DPI,
            log: String::new(),
            ext: ".png".to_owned(),
            filename: String::new(),
            outpath: PathBuf::from("./"),
            newplot: true,
            legend: Vec::new(),
            show: false,
        }
    }
}

macro_rules! string_setters {
    ($($name:ident),+) => {
        $(
            #[inline]
            #[must_use]
            pub fn $name(mut self, v: impl Into<String>) -> Self {
                self.$name = v.into();
                self
            }
        )+
    };
}

impl PlotOptions {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    string_setters!(fmt, xlabel, ylabel, title, log, ext, filename);

    #[inline]
    #[must_use]
    pub fn errors(mut self, xerr: impl Into<Vec<f64>>, yerr: impl Into<Vec<f64>>) -> Self {
        self.xerr = xerr.into();
        self.yerr = yerr.into();
        self
    }
    #[inline]
    #[must_use]
    pub fn figure(mut self, n: usize) -> Self {
        self.figure = n;
        self
    }
    #[inline]
    #[must_use]
    pub fn markersize(mut self, pt: f64) -> Self {
        self.markersize = pt;
        self
    }
    #[inline]
    #[must_use]
    pub fn alpha(mut self, a: f64) -> Self {
        self.alpha = a;
        self
    }
    #[inline]
    #[must_use]
    pub fn xlim(mut self, lo: f64, hi: f64) -> Self {
        self.xlim = Some((lo, hi));
        self
    }
    #[inline]
    #[must_use]
    pub fn ylim(mut self, lo: f64, hi: f64) -> Self {
        self.ylim = Some((lo, hi));
        self
    }
    #[inline]
    #[must_use]
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }
    #[inline]
    #[must_use]
    pub fn outpath(mut self, p: impl Into<PathBuf>) -> Self {
        self.outpath = p.into();
        self
    }
    #[inline]
    #[must_use]
    pub fn newplot(mut self, on: bool) -> Self {
        self.newplot = on;
        self
    }
    #[inline]
    #[must_use]
    pub fn legend<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.legend = labels.into_iter().map(Into::into).collect();
        self
    }
    #[inline]
    #[must_use]
    pub fn show(mut self, on: bool) -> Self {
        self.show = on;
        self
    }
}

/// Figures 1 ..= 10, created on first use.
#[derive(Debug)]
pub struct Figures {
    figures: Vec<Figure>,
}

impl Default for Figures {
    fn default() -> Self {
        Self {
            figures: (1..=FIGURE_COUNT).map(Figure::new).collect(),
        }
    }
}

impl Figures {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Figure `n`; out-of-range numbers select figure 1.
    #[must_use]
    pub fn figure(&self, n: usize) -> &Figure {
        &self.figures[Self::slot(n)]
    }

    fn slot(n: usize) -> usize {
        if (1..=FIGURE_COUNT).contains(&n) { n - 1 } else { 0 }
    }

    /// Draw `y` over `x` into the selected figure, then export and/or
    /// preview it. Returns the exported path, if any.
    pub fn plot(&mut self, x: &[f64], y: &[f64], opts: &PlotOptions) -> Result<Option<PathBuf>, PlotError> {
        if x.len() != y.len() {
            return Err(PlotError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }

        let fig = &mut self.figures[Self::slot(opts.figure)];
        if opts.newplot {
            fig.axes = Axes::default();
        }
        let axes = &mut fig.axes;

        if opts.xlim.is_some() {
            axes.xlim = opts.xlim;
        }
        if opts.ylim.is_some() {
            axes.ylim = opts.ylim;
        }
        if !opts.log.is_empty() {
            axes.set_log(&opts.log);
        }

        // empty data draws nothing, the figure can still be exported
        if !y.is_empty() {
            let errors = (!opts.xerr.is_empty() && !opts.yerr.is_empty())
                .then(|| (opts.xerr.clone(), opts.yerr.clone()));
            axes.series.push(Series {
                x: x.to_vec(),
                y: y.to_vec(),
                errors,
                style: Style::parse(&opts.fmt),
                markersize: opts.markersize,
                alpha: opts.alpha,
                label: None,
            });
        }

        if !opts.xlabel.is_empty() {
            axes.xlabel.clone_from(&opts.xlabel);
        }
        if !opts.ylabel.is_empty() {
            axes.ylabel.clone_from(&opts.ylabel);
        }
        if !opts.title.is_empty() {
            axes.title.clone_from(&opts.title);
        }
        if !opts.legend.is_empty() {
            axes.set_legend(&opts.legend);
        }

        let saved = if opts.filename.is_empty() {
            None
        } else {
            let path = export::export_path(&opts.filename, &opts.log, &opts.ext, &opts.outpath);
            tracing::info!(path = %path.display(), "saving figure");
            export::save_figure(fig, &path, opts.dpi)?;
            Some(path)
        };

        if opts.show {
            fig.preview().map_err(|e| PlotError::Preview(Box::new(e)))?;
        }
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{MIN_GRAPH_HEIGHT, MIN_GRAPH_WIDTH};

    fn ramp(n: u32) -> (Vec<f64>, Vec<f64>) {
        let x: Vec<f64> = (0..n).map(f64::from).collect();
        let y = x.iter().map(|v| v * v).collect();
        (x, y)
    }

    #[test]
    fn mismatched_lengths_draw_nothing() {
        let mut figs = Figures::new();
        let err = figs.plot(&[1.0, 2.0], &[1.0], &PlotOptions::new()).unwrap_err();
        assert!(matches!(err, PlotError::LengthMismatch { x: 2, y: 1 }));
        assert!(figs.figure(1).axes.series.is_empty());
    }

    #[test]
    fn out_of_range_figure_is_figure_one() {
        let mut figs = Figures::new();
        let (x, y) = ramp(5);
        figs.plot(&x, &y, &PlotOptions::new().figure(42)).unwrap();
        assert_eq!(figs.figure(1).axes.series.len(), 1);
        assert_eq!(figs.figure(0).number, 1);
        assert_eq!(figs.figure(10).number, 10);
    }

    #[test]
    fn newplot_false_overlays() {
        let mut figs = Figures::new();
        let (x, y) = ramp(5);
        let opts = PlotOptions::new().figure(3).legend(["a", "b"]);
        figs.plot(&x, &y, &opts).unwrap();
        figs.plot(&x, &y, &opts.clone().newplot(false).fmt("r--")).unwrap();
        let axes = &figs.figure(3).axes;
        assert_eq!(axes.series.len(), 2);
        assert_eq!(axes.series[1].label.as_deref(), Some("b"));

        figs.plot(&x, &y, &PlotOptions::new().figure(3)).unwrap();
        assert_eq!(figs.figure(3).axes.series.len(), 1);
    }

    #[test]
    fn log_scales_and_limits() {
        let mut figs = Figures::new();
        let (x, y) = ramp(4);
        figs.plot(&x, &y, &PlotOptions::new().log("xy").xlim(1.0, 10.0)).unwrap();
        let axes = &figs.figure(1).axes;
        assert_eq!((axes.xscale, axes.yscale), (Scale::Log, Scale::Log));
        assert_eq!(axes.xlim, Some((1.0, 10.0)));
        assert_eq!(axes.ylim, None);
        // x = 0 cannot sit on a log axis
        assert_eq!(axes.series[0].points(axes.xscale, axes.yscale).count(), 3);

        let mut linear = axes.clone();
        linear.set_log("-");
        assert_eq!((linear.xscale, linear.yscale), (Scale::Linear, Scale::Linear));
    }

    #[test]
    fn error_bars_need_both_errors() {
        let mut figs = Figures::new();
        let (x, y) = ramp(3);
        figs.plot(&x, &y, &PlotOptions::new().errors(vec![0.5], Vec::new())).unwrap();
        assert!(figs.figure(1).axes.series[0].errors.is_none());

        figs.plot(&x, &y, &PlotOptions::new().errors(vec![0.5], vec![1.0])).unwrap();
        let spans = figs.figure(1).axes.spans();
        assert_eq!(spans[2], Span { x: 2.0, lo: 3.0, hi: 5.0 });
    }

    #[test]
    fn preview_shows_title() {
        let mut figs = Figures::new();
        let (x, y) = ramp(40);
        figs.plot(&x, &y, &PlotOptions::new().title("squares").xlabel("n"))
            .unwrap();
        let frame = figs
            .figure(1)
            .preview_string(MIN_GRAPH_WIDTH, MIN_GRAPH_HEIGHT, "blue")
            .unwrap();
        assert!(frame.contains("squares"));
        assert!(frame.contains("x: n"));
        assert_eq!(frame.lines().count(), MIN_GRAPH_HEIGHT + 4);
    }

    #[test]
    fn degenerate_preview_is_rejected() {
        let mut figs = Figures::new();
        let (x, y) = ramp(10);
        figs.plot(&x, &y, &PlotOptions::new()).unwrap();
        for (w, h) in [(20, 0), (0, 10), (MIN_GRAPH_WIDTH - 1, MIN_GRAPH_HEIGHT)] {
            assert!(matches!(
                figs.figure(1).preview_string(w, h, "blue"),
                Err(Error::GraphTooSmall { .. })
            ));
        }
    }
}
