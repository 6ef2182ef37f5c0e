//! SVG serialisation of a [`Scene`].

use std::fmt::{self, Display, Write};

use super::{ChartKind, Path, PathCommand, Primitive, Scene, Tone};

const TEMPERATURE_DEFS: &str = r##"<defs>
<linearGradient id="lineGradient" x1="0" y1="0" x2="1" y2="0"><stop offset="0%" stop-color="#60a5fa"/><stop offset="100%" stop-color="#38bdf8"/></linearGradient>
<linearGradient id="areaGradient" x1="0" y1="0" x2="0" y2="1"><stop offset="0%" stop-color="#3b82f6" stop-opacity="0.3"/><stop offset="90%" stop-color="#3b82f6" stop-opacity="0"/></linearGradient>
<filter id="softGlow" x="-20%" y="-20%" width="140%" height="140%"><feGaussianBlur stdDeviation="6" result="coloredBlur"/><feMerge><feMergeNode in="coloredBlur"/><feMergeNode in="SourceGraphic"/></feMerge></filter>
</defs>"##;

const UV_DEFS: &str = r##"<defs>
<linearGradient id="uvArea" x1="0" y1="0" x2="0" y2="1"><stop offset="0%" stop-color="#fb923c" stop-opacity="0.35"/><stop offset="100%" stop-color="#fb923c" stop-opacity="0"/></linearGradient>
</defs>"##;

/// Render `scene` as a standalone SVG document.
pub fn render(scene: &Scene) -> String {
    Svg(scene).to_string()
}

/// Display adapter writing SVG markup.
pub struct Svg<'a>(pub &'a Scene);

impl Display for Svg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scene = self.0;
        let canvas = &scene.canvas;
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="100%" height="100%">"#,
            canvas.width, canvas.height
        )?;

        if let Some(message) = scene.placeholder_message() {
            writeln!(
                f,
                r##"<text x="{}" y="{}" text-anchor="middle" style="fill: #94a3b8; font-size: 16px;">{}</text>"##,
                canvas.width / 2.0,
                canvas.height / 2.0,
                escape(message)
            )?;
            return f.write_str("</svg>\n");
        }

        match scene.kind {
            ChartKind::Temperature => writeln!(f, "{TEMPERATURE_DEFS}")?,
            ChartKind::Uv => writeln!(f, "{UV_DEFS}")?,
            ChartKind::Precipitation => {}
        }

        for primitive in &scene.primitives {
            write_primitive(f, primitive)?;
        }

        f.write_str("</svg>\n")
    }
}

fn write_primitive(f: &mut fmt::Formatter<'_>, primitive: &Primitive) -> fmt::Result {
    match primitive {
        Primitive::Rule { from, to, tone, dashed } => {
            let dash = if *dashed { r#" stroke-dasharray="6 6""# } else { "" };
            writeln!(
                f,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="1"{dash}/>"#,
                from.x,
                from.y,
                to.x,
                to.y,
                paint(*tone)
            )
        }
        Primitive::Line { path, tone } => {
            let glow = if *tone == Tone::TemperatureLine { r#" filter="url(#softGlow)""# } else { "" };
            writeln!(
                f,
                r#"<path d="{}" fill="none" stroke="{}" stroke-width="3" stroke-linecap="round" stroke-linejoin="round"{glow}/>"#,
                path_data(path),
                paint(*tone)
            )
        }
        Primitive::Area { path, tone } => {
            writeln!(f, r#"<path d="{}" fill="{}" stroke="none"/>"#, path_data(path), paint(*tone))
        }
        Primitive::Bar { rect, tone, opacity } => writeln!(
            f,
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}" opacity="{}"/>"#,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            rect.radius,
            paint(*tone),
            opacity
        ),
        Primitive::Marker { center, radius, tone } => {
            let (fill, stroke) = marker_paint(*tone);
            writeln!(
                f,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{fill}" stroke="{stroke}" stroke-width="3"/>"#,
                center.x, center.y, radius
            )
        }
        Primitive::Label { at, text, size, bold, tone } => {
            let weight = if *bold { 700 } else { 500 };
            writeln!(
                f,
                r#"<text x="{}" y="{}" text-anchor="middle" style="fill: {}; font-size: {}px; font-weight: {};">{}</text>"#,
                at.x,
                at.y,
                paint(*tone),
                size,
                weight,
                escape(text)
            )
        }
    }
}

/// `d` attribute for a path.
pub fn path_data(path: &Path) -> String {
    let mut d = String::new();
    for (i, cmd) in path.commands().iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        // writing into a String cannot fail
        let _ = match cmd {
            PathCommand::MoveTo(p) => write!(d, "M {} {}", p.x, p.y),
            PathCommand::LineTo(p) => write!(d, "L {} {}", p.x, p.y),
            PathCommand::CubicTo { c1, c2, to } => write!(
                d,
                "C {} {}, {} {}, {} {}",
                c1.x, c1.y, c2.x, c2.y, to.x, to.y
            ),
            PathCommand::Close => write!(d, "Z"),
        };
    }
    d
}

fn paint(tone: Tone) -> &'static str {
    match tone {
        Tone::TemperatureLine => "url(#lineGradient)",
        Tone::TemperatureArea => "url(#areaGradient)",
        Tone::TemperatureMarker => "#60a5fa",
        Tone::Rain => "#3b82f6",
        Tone::Snow => "#cffafe",
        Tone::RainLabel => "#93c5fd",
        Tone::SnowLabel => "#a5f3fc",
        Tone::Precipitation => "#38bdf8",
        Tone::Uv | Tone::UvMarker => "#fb923c",
        Tone::UvArea => "url(#uvArea)",
        Tone::Column => "rgba(255,255,255,0.02)",
        Tone::Stub => "white",
        Tone::Baseline => "rgba(255,255,255,0.05)",
        Tone::GridLine => "rgba(255,255,255,0.03)",
        Tone::Value => "#f1f5f9",
        Tone::Caption => "#64748b",
    }
}

fn marker_paint(tone: Tone) -> (&'static str, &'static str) {
    match tone {
        Tone::UvMarker => ("#f8fafc", "#fb923c"),
        _ => ("#0f172a", paint(tone)),
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
