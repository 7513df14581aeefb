use super::svg::{nice_axis, series_color, tick_label, Anchor, Canvas, LinearScale, TextStyle};
use super::tables::tool_label;
use crate::application::read_models::ComparisonReadModel;
use crate::cbom_analysis::services::{BoxPlotSummary, LinearFit};
use crate::ports::outbound::{ChartArtifact, ChartRenderer};
use crate::shared::Result;

const WIDTH: f64 = 900.0;
const HEIGHT: f64 = 560.0;
const AXIS_COLOR: &str = "#333333";
const GRID_COLOR: &str = "#e5e5e5";

/// Plot area inside the canvas
#[derive(Debug, Clone, Copy)]
struct Frame {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl Frame {
    fn standard() -> Self {
        Self {
            left: 90.0,
            top: 70.0,
            right: WIDTH - 40.0,
            bottom: HEIGHT - 90.0,
        }
    }

    fn width(&self) -> f64 {
        self.right - self.left
    }

    fn center_x(&self) -> f64 {
        self.left + self.width() / 2.0
    }

    fn center_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }
}

/// One colored point series of a scatter chart
struct ScatterSeries {
    label: String,
    color: &'static str,
    points: Vec<(f64, f64)>,
    fit: Option<LinearFit>,
}

/// SvgChartRenderer adapter drawing the report charts as standalone SVG files
pub struct SvgChartRenderer;

impl SvgChartRenderer {
    pub fn new() -> Self {
        Self
    }

    fn start(title: &str) -> Result<(Canvas, Frame)> {
        let mut canvas = Canvas::new(WIDTH, HEIGHT);
        canvas.text(
            WIDTH / 2.0,
            36.0,
            title,
            TextStyle::new(Anchor::Middle, 20).bold(),
        )?;
        Ok((canvas, Frame::standard()))
    }

    /// Draws the value axis with grid lines and returns its scale
    fn value_axis(canvas: &mut Canvas, frame: &Frame, max: f64, label: &str) -> Result<LinearScale> {
        let (axis_max, step) = nice_axis(max);
        let scale = LinearScale {
            min: 0.0,
            max: axis_max,
            pixel_start: frame.bottom,
            pixel_end: frame.top,
        };

        let ticks = (axis_max / step).round() as usize;
        for i in 0..=ticks {
            let value = step * i as f64;
            let y = scale.map(value);
            canvas.line((frame.left, y), (frame.right, y), GRID_COLOR, 1.0)?;
            canvas.text(
                frame.left - 8.0,
                y + 4.0,
                &tick_label(value),
                TextStyle::new(Anchor::End, 12),
            )?;
        }
        canvas.line((frame.left, frame.top), (frame.left, frame.bottom), AXIS_COLOR, 1.0)?;
        canvas.line((frame.left, frame.bottom), (frame.right, frame.bottom), AXIS_COLOR, 1.0)?;
        canvas.text(
            24.0,
            frame.center_y(),
            label,
            TextStyle::new(Anchor::Middle, 14).rotated(-90.0),
        )?;
        Ok(scale)
    }

    fn x_axis_label(canvas: &mut Canvas, frame: &Frame, label: &str) -> Result<()> {
        canvas.text(
            frame.center_x(),
            canvas.height() - 24.0,
            label,
            TextStyle::new(Anchor::Middle, 14),
        )
    }

    fn legend(canvas: &mut Canvas, frame: &Frame, entries: &[(String, &'static str)]) -> Result<()> {
        let x = frame.right - 150.0;
        for (i, (label, color)) in entries.iter().enumerate() {
            let y = frame.top + 8.0 + i as f64 * 20.0;
            canvas.rect(x, y, 12.0, 12.0, color)?;
            canvas.text(x + 18.0, y + 10.5, label, TextStyle::new(Anchor::Start, 12))?;
        }
        Ok(())
    }

    /// Simple one-bar-per-tool chart with value labels
    fn bar_chart(
        title: &str,
        y_label: &str,
        bars: &[(String, f64)],
        value_label: impl Fn(f64) -> String,
    ) -> Result<String> {
        let (mut canvas, frame) = Self::start(title)?;
        let max = bars.iter().map(|(_, v)| *v).fold(0.0, f64::max);
        let scale = Self::value_axis(&mut canvas, &frame, max, y_label)?;

        let slot = frame.width() / bars.len().max(1) as f64;
        let bar_width = slot * 0.6;
        for (i, (label, value)) in bars.iter().enumerate() {
            let x = frame.left + slot * i as f64 + (slot - bar_width) / 2.0;
            let y = scale.map(*value);
            canvas.rect(x, y, bar_width, frame.bottom - y, series_color(i))?;
            canvas.text(
                x + bar_width / 2.0,
                y - 6.0,
                &value_label(*value),
                TextStyle::new(Anchor::Middle, 12),
            )?;
            canvas.text(
                x + bar_width / 2.0,
                frame.bottom + 20.0,
                label,
                TextStyle::new(Anchor::Middle, 13),
            )?;
        }
        Self::x_axis_label(&mut canvas, &frame, "Tool")?;
        Ok(canvas.finish())
    }

    fn average_components_chart(model: &ComparisonReadModel) -> Result<String> {
        let bars: Vec<(String, f64)> = model
            .statistics
            .iter()
            .map(|s| (tool_label(&s.tool), s.avg_components_non_empty))
            .collect();
        Self::bar_chart(
            "Average Components per Non-Empty CBOM",
            "Average Number of Components",
            &bars,
            |v| format!("{:.1}", v),
        )
    }

    fn empty_percentage_chart(model: &ComparisonReadModel) -> Result<String> {
        let bars: Vec<(String, f64)> = model
            .statistics
            .iter()
            .map(|s| (tool_label(&s.tool), s.empty_percentage))
            .collect();
        Self::bar_chart(
            "Percentage of Empty CBOMs",
            "Percentage (%)",
            &bars,
            |v| format!("{:.1}%", v),
        )
    }

    /// Execution time box plot; renders a placeholder when no tool has timings
    fn execution_time_chart(model: &ComparisonReadModel) -> Result<String> {
        let (mut canvas, frame) = Self::start("Execution Time Distribution")?;
        let boxes: Vec<(String, BoxPlotSummary)> = model
            .tools
            .iter()
            .filter_map(|tool| {
                BoxPlotSummary::from_values(&model.execution_times_of(tool))
                    .map(|summary| (tool_label(tool), summary))
            })
            .collect();

        if boxes.is_empty() {
            canvas.text(
                WIDTH / 2.0,
                HEIGHT / 2.0,
                "No execution time data available",
                TextStyle::new(Anchor::Middle, 16),
            )?;
            return Ok(canvas.finish());
        }

        let max = boxes
            .iter()
            .map(|(_, s)| s.max_value())
            .fold(0.0, f64::max);
        let scale = Self::value_axis(&mut canvas, &frame, max, "Time (seconds)")?;

        let slot = frame.width() / boxes.len() as f64;
        let box_width = slot * 0.4;
        for (i, (label, summary)) in boxes.iter().enumerate() {
            let center = frame.left + slot * (i as f64 + 0.5);
            let color = series_color(i);
            let (q1, q3) = (scale.map(summary.q1), scale.map(summary.q3));

            canvas.line(
                (center, scale.map(summary.lower_whisker)),
                (center, q1),
                AXIS_COLOR,
                1.0,
            )?;
            canvas.line(
                (center, q3),
                (center, scale.map(summary.upper_whisker)),
                AXIS_COLOR,
                1.0,
            )?;
            for whisker in [summary.lower_whisker, summary.upper_whisker] {
                let y = scale.map(whisker);
                canvas.line(
                    (center - box_width / 4.0, y),
                    (center + box_width / 4.0, y),
                    AXIS_COLOR,
                    1.0,
                )?;
            }
            canvas.outlined_rect(center - box_width / 2.0, q3, box_width, q1 - q3, color)?;
            let median = scale.map(summary.median);
            canvas.line(
                (center - box_width / 2.0, median),
                (center + box_width / 2.0, median),
                AXIS_COLOR,
                2.0,
            )?;
            for outlier in &summary.outliers {
                canvas.circle(center, scale.map(*outlier), 3.5, color)?;
            }
            canvas.text(
                center,
                frame.bottom + 20.0,
                label,
                TextStyle::new(Anchor::Middle, 13),
            )?;
        }
        Self::x_axis_label(&mut canvas, &frame, "Tool")?;
        Ok(canvas.finish())
    }

    /// Grouped bars: one group per component type, one bar per tool
    fn component_types_chart(model: &ComparisonReadModel) -> Result<String> {
        let (mut canvas, frame) = Self::start("Component Types Distribution")?;
        let max = model
            .type_distribution
            .iter()
            .flat_map(|row| row.counts.iter())
            .copied()
            .max()
            .unwrap_or(0) as f64;
        let scale = Self::value_axis(&mut canvas, &frame, max, "Number of Components")?;

        let groups = model.type_distribution.len();
        let slot = frame.width() / groups as f64;
        let bar_width = slot * 0.8 / model.tools.len().max(1) as f64;
        for (g, row) in model.type_distribution.iter().enumerate() {
            let group_start = frame.left + slot * g as f64 + slot * 0.1;
            for (t, count) in row.counts.iter().enumerate() {
                let y = scale.map(*count as f64);
                canvas.rect(
                    group_start + bar_width * t as f64,
                    y,
                    bar_width,
                    frame.bottom - y,
                    series_color(t),
                )?;
            }
            canvas.text(
                frame.left + slot * (g as f64 + 0.5),
                frame.bottom + 16.0,
                &row.component_type,
                TextStyle::new(Anchor::End, 12).rotated(-30.0),
            )?;
        }

        let entries: Vec<(String, &'static str)> = model
            .tools
            .iter()
            .enumerate()
            .map(|(i, tool)| (tool_label(tool), series_color(i)))
            .collect();
        Self::legend(&mut canvas, &frame, &entries)?;
        Ok(canvas.finish())
    }

    fn scatter_chart(title: &str, x_label: &str, series: &[ScatterSeries]) -> Result<String> {
        let (mut canvas, frame) = Self::start(title)?;
        let all_points = || series.iter().flat_map(|s| s.points.iter());
        let max_x = all_points().map(|(x, _)| *x).fold(0.0, f64::max);
        let max_y = all_points().map(|(_, y)| *y).fold(0.0, f64::max);

        let y_scale = Self::value_axis(&mut canvas, &frame, max_y, "Execution Time (seconds)")?;
        let (x_max, x_step) = nice_axis(max_x);
        let x_scale = LinearScale {
            min: 0.0,
            max: x_max,
            pixel_start: frame.left,
            pixel_end: frame.right,
        };
        let ticks = (x_max / x_step).round() as usize;
        for i in 0..=ticks {
            let value = x_step * i as f64;
            canvas.text(
                x_scale.map(value),
                frame.bottom + 20.0,
                &tick_label(value),
                TextStyle::new(Anchor::Middle, 12),
            )?;
        }

        for s in series {
            for (x, y) in &s.points {
                canvas.circle(x_scale.map(*x), y_scale.map(*y), 5.0, s.color)?;
            }
            if let Some(fit) = s.fit {
                let (from, to) = Self::clip_fit(fit, x_max, y_scale.max);
                canvas.dashed_line(
                    (x_scale.map(from.0), y_scale.map(from.1)),
                    (x_scale.map(to.0), y_scale.map(to.1)),
                    s.color,
                )?;
            }
        }

        let entries: Vec<(String, &'static str)> =
            series.iter().map(|s| (s.label.clone(), s.color)).collect();
        Self::legend(&mut canvas, &frame, &entries)?;
        Self::x_axis_label(&mut canvas, &frame, x_label)?;
        Ok(canvas.finish())
    }

    /// End points of a regression line kept inside the plotted value range
    fn clip_fit(fit: LinearFit, x_max: f64, y_max: f64) -> ((f64, f64), (f64, f64)) {
        let clamp = |x: f64| {
            let y = fit.predict(x);
            if y < 0.0 && fit.slope != 0.0 {
                let x0 = -fit.intercept / fit.slope;
                (x0, 0.0)
            } else if y > y_max && fit.slope != 0.0 {
                let x1 = (y_max - fit.intercept) / fit.slope;
                (x1, y_max)
            } else {
                (x, y.clamp(0.0, y_max))
            }
        };
        (clamp(0.0), clamp(x_max))
    }

    fn size_vs_time_all_chart(model: &ComparisonReadModel) -> Result<Option<String>> {
        let series: Vec<ScatterSeries> = model
            .tools
            .iter()
            .enumerate()
            .map(|(i, tool)| ScatterSeries {
                label: tool_label(tool),
                color: series_color(i),
                points: model.size_time_points(Some(tool)),
                fit: None,
            })
            .filter(|s| !s.points.is_empty())
            .collect();
        if series.is_empty() {
            return Ok(None);
        }

        let title = format!(
            "{} Code Size vs. Execution Time (All Tools)",
            model.language
        );
        let x_label = format!("{} Code Size (KB)", model.language);
        Self::scatter_chart(&title, &x_label, &series).map(Some)
    }

    fn size_vs_time_tool_chart(
        model: &ComparisonReadModel,
        index: usize,
        tool: &str,
    ) -> Result<Option<String>> {
        let points = model.size_time_points(Some(tool));
        if points.len() < 2 {
            return Ok(None);
        }

        let label = tool_label(tool);
        let series = [ScatterSeries {
            label: label.clone(),
            color: series_color(index),
            fit: LinearFit::fit(&points),
            points,
        }];
        let title = format!(
            "{} Code Size vs. Execution Time ({})",
            model.language, label
        );
        let x_label = format!("{} Code Size (KB)", model.language);
        Self::scatter_chart(&title, &x_label, &series).map(Some)
    }
}

impl Default for SvgChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&self, model: &ComparisonReadModel) -> Result<Vec<ChartArtifact>> {
        if model.statistics.is_empty() {
            return Ok(Vec::new());
        }

        let mut charts = vec![
            ChartArtifact::new("avg_components.svg", Self::average_components_chart(model)?),
            ChartArtifact::new("empty_percentage.svg", Self::empty_percentage_chart(model)?),
            ChartArtifact::new("execution_time.svg", Self::execution_time_chart(model)?),
        ];
        if !model.type_distribution.is_empty() {
            charts.push(ChartArtifact::new(
                "component_types.svg",
                Self::component_types_chart(model)?,
            ));
        }

        match Self::size_vs_time_all_chart(model)? {
            Some(chart) => charts.push(ChartArtifact::new("size_vs_time_all.svg", chart)),
            None => tracing::info!(
                "skipping size vs. time charts: no record has both a language size and an execution time"
            ),
        }
        for (index, tool) in model.tools.iter().enumerate() {
            if let Some(chart) = Self::size_vs_time_tool_chart(model, index, tool)? {
                charts.push(ChartArtifact::new(format!("size_vs_time_{}.svg", tool), chart));
            }
        }

        Ok(charts)
    }
}
