//! Minimal SVG drawing primitives for the report charts

use crate::shared::Result;
use std::fmt::Write;

/// Series colors, cycled when there are more series than entries
const PALETTE: [&str; 8] = [
    "#4c72b0", "#dd8452", "#55a868", "#c44e52", "#8172b3", "#937860", "#da8bc3", "#8c8c8c",
];

const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

pub fn series_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Escapes text for use in SVG element content and attributes
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Text placement options
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub anchor: Anchor,
    pub size: u32,
    pub bold: bool,
    /// Rotation in degrees around the text origin
    pub rotate: Option<f64>,
}

impl TextStyle {
    pub fn new(anchor: Anchor, size: u32) -> Self {
        Self {
            anchor,
            size,
            bold: false,
            rotate: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotate = Some(degrees);
        self
    }
}

/// An SVG document under construction
pub struct Canvas {
    width: f64,
    height: f64,
    body: String,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str) -> Result<()> {
        writeln!(
            self.body,
            r#"  <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
            x,
            y,
            width.max(0.0),
            height.max(0.0),
            fill
        )?;
        Ok(())
    }

    pub fn outlined_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str) -> Result<()> {
        writeln!(
            self.body,
            r##"  <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" fill-opacity="0.7" stroke="#333333"/>"##,
            x,
            y,
            width.max(0.0),
            height.max(0.0),
            fill
        )?;
        Ok(())
    }

    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &str, width: f64) -> Result<()> {
        writeln!(
            self.body,
            r#"  <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{}"/>"#,
            from.0, from.1, to.0, to.1, stroke, width
        )?;
        Ok(())
    }

    pub fn dashed_line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &str) -> Result<()> {
        writeln!(
            self.body,
            r#"  <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="2" stroke-dasharray="6,4"/>"#,
            from.0, from.1, to.0, to.1, stroke
        )?;
        Ok(())
    }

    pub fn circle(&mut self, cx: f64, cy: f64, radius: f64, fill: &str) -> Result<()> {
        writeln!(
            self.body,
            r#"  <circle cx="{:.1}" cy="{:.1}" r="{}" fill="{}" fill-opacity="0.75"/>"#,
            cx, cy, radius, fill
        )?;
        Ok(())
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, style: TextStyle) -> Result<()> {
        write!(
            self.body,
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="{}" font-size="{}""#,
            x,
            y,
            style.anchor.as_str(),
            style.size
        )?;
        if style.bold {
            self.body.push_str(r#" font-weight="bold""#);
        }
        if let Some(degrees) = style.rotate {
            write!(self.body, r#" transform="rotate({} {:.1} {:.1})""#, degrees, x, y)?;
        }
        writeln!(self.body, ">{}</text>", escape_xml(content))?;
        Ok(())
    }

    /// Completes the document
    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"{font}\">\n  <rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            font = FONT_FAMILY,
            body = self.body
        )
    }
}

/// Maps data values onto a pixel range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub min: f64,
    pub max: f64,
    pub pixel_start: f64,
    pub pixel_end: f64,
}

impl LinearScale {
    pub fn map(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            return self.pixel_start;
        }
        self.pixel_start + (value - self.min) / span * (self.pixel_end - self.pixel_start)
    }
}

/// Rounds `max` up to a readable axis limit
///
/// # Returns
/// Tuple of (axis maximum, tick step)
pub fn nice_axis(max: f64) -> (f64, f64) {
    if !max.is_finite() || max <= 0.0 {
        return (1.0, 0.2);
    }
    let raw_step = max / 5.0;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let residual = raw_step / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    let step = nice * magnitude;
    ((max / step).ceil() * step, step)
}

/// Formats a tick label without trailing zeros
pub fn tick_label(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        let text = format!("{:.2}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
