//! Chart geometry as a scene graph of typed drawing primitives.
//!
//! Projectors in the submodules are pure: the same records and [`Canvas`]
//! always yield the same [`Scene`]. Serialisation lives in [`svg`].

use serde::Serialize;

pub mod precipitation;
pub mod svg;
pub mod temperature;
pub mod uv;

pub use precipitation::precipitation_chart;
pub use temperature::temperature_chart;
pub use uv::uv_chart;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo { c1: Point, c2: Point, to: Point },
    Close,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, to: Point) -> Self {
        self.commands.push(PathCommand::MoveTo(to));
        self
    }

    pub fn line_to(mut self, to: Point) -> Self {
        self.commands.push(PathCommand::LineTo(to));
        self
    }

    pub fn cubic_to(mut self, c1: Point, c2: Point, to: Point) -> Self {
        self.commands.push(PathCommand::CubicTo { c1, c2, to });
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Straight polyline through `points`.
    pub fn polyline(points: &[Point]) -> Self {
        points.iter().enumerate().fold(Self::new(), |path, (i, p)| {
            if i == 0 { path.move_to(*p) } else { path.line_to(*p) }
        })
    }

    /// Smooth curve through `points`; both control points of each segment sit at
    /// the horizontal midpoint, at the start and end heights respectively.
    pub fn smooth(points: &[Point]) -> Self {
        let Some(first) = points.first() else {
            return Self::new();
        };
        points.windows(2).fold(Self::new().move_to(*first), |path, pair| {
            let (a, b) = (pair[0], pair[1]);
            let mid = (a.x + b.x) / 2.0;
            path.cubic_to(Point::new(mid, a.y), Point::new(mid, b.y), b)
        })
    }

    /// Close the path down to `baseline`, producing the area under it.
    pub fn close_to_baseline(self, first_x: f64, last_x: f64, baseline: f64) -> Self {
        self.line_to(Point::new(last_x, baseline))
            .line_to(Point::new(first_x, baseline))
            .close()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
}

/// Semantic colour role; the renderer decides the actual paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    TemperatureLine,
    TemperatureArea,
    TemperatureMarker,
    Rain,
    Snow,
    RainLabel,
    SnowLabel,
    Precipitation,
    Uv,
    UvArea,
    UvMarker,
    Column,
    Stub,
    Baseline,
    GridLine,
    Value,
    Caption,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Rule {
        from: Point,
        to: Point,
        tone: Tone,
        dashed: bool,
    },
    Line {
        path: Path,
        tone: Tone,
    },
    Area {
        path: Path,
        tone: Tone,
    },
    Bar {
        rect: Rect,
        tone: Tone,
        opacity: f64,
    },
    Marker {
        center: Point,
        radius: f64,
        tone: Tone,
    },
    Label {
        at: Point,
        text: String,
        size: f64,
        bold: bool,
        tone: Tone,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Temperature,
    Precipitation,
    Uv,
}

impl ChartKind {
    pub fn file_stem(&self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Precipitation => "precipitation",
            Self::Uv => "uv",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    NoData,
    InsufficientData,
}

/// Fixed coordinate system of a chart: a viewBox with horizontal and vertical padding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub padding_x: f64,
    pub padding_y: f64,
}

impl Canvas {
    pub const TEMPERATURE: Canvas = Canvas {
        width: 1000.0,
        height: 350.0,
        padding_x: 70.0,
        padding_y: 70.0,
    };

    pub const HOURLY_BARS: Canvas = Canvas {
        width: 1000.0,
        height: 280.0,
        padding_x: 60.0,
        padding_y: 50.0,
    };

    /// y coordinate of the zero line.
    pub fn baseline(&self) -> f64 {
        self.height - self.padding_y
    }

    pub fn plot_width(&self) -> f64 {
        self.width - self.padding_x * 2.0
    }

    pub fn plot_height(&self) -> f64 {
        self.height - self.padding_y * 2.0
    }
}

/// Vertical value range mapped onto the plot height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub kind: ChartKind,
    pub canvas: Canvas,
    pub domain: Option<Domain>,
    pub placeholder: Option<Placeholder>,
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn placeholder(kind: ChartKind, canvas: Canvas, placeholder: Placeholder) -> Self {
        Self {
            kind,
            canvas,
            domain: None,
            placeholder: Some(placeholder),
            primitives: Vec::new(),
        }
    }

    pub fn placeholder_message(&self) -> Option<&'static str> {
        self.placeholder.map(|p| match (self.kind, p) {
            (ChartKind::Temperature, Placeholder::NoData) => "Keine Diagrammdaten verfügbar.",
            (_, Placeholder::InsufficientData) => "Zu wenige Daten für ein Diagramm.",
            (_, Placeholder::NoData) => "Keine Daten.",
        })
    }
}

pub(crate) fn label(at: Point, text: String, size: f64, bold: bool, tone: Tone) -> Primitive {
    Primitive::Label {
        at,
        text,
        size,
        bold,
        tone,
    }
}
