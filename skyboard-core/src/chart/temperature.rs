use crate::model::HourlyRecord;

use super::{
    label, Canvas, ChartKind, Domain, Path, Placeholder, Point, Primitive, Rect, Scene, Tone,
};

/// Every n-th hour is plotted.
pub const SAMPLE_STEP: usize = 3;
pub const MAX_POINTS: usize = 8;

const DOMAIN_PADDING: f64 = 3.0;
const MIN_SPAN: f64 = 1.0;
/// Share of the height above the baseline a 100 % precipitation bar reaches.
const MAX_BAR_SHARE: f64 = 0.8;
const PRECIP_LABEL_THRESHOLD: u8 = 15;

/// Padded temperature range, never narrower than one degree.
pub fn temperature_domain(temperatures: &[i32]) -> Domain {
    let lo = temperatures.iter().copied().min().unwrap_or(0);
    let hi = temperatures.iter().copied().max().unwrap_or(0);
    let min = f64::from(lo) - DOMAIN_PADDING;
    let max = f64::from(hi) + DOMAIN_PADDING;
    Domain {
        min,
        max: max.max(min + MIN_SPAN),
    }
}

/// Smoothed temperature curve over every third hour, with precipitation bars
/// drawn behind it on the same horizontal axis.
pub fn temperature_chart(records: &[HourlyRecord], canvas: &Canvas) -> Scene {
    let kind = ChartKind::Temperature;
    if records.is_empty() {
        return Scene::placeholder(kind, *canvas, Placeholder::NoData);
    }

    let samples: Vec<(&HourlyRecord, i32)> = records
        .iter()
        .step_by(SAMPLE_STEP)
        .take(MAX_POINTS)
        .filter_map(|r| r.temperature.map(|t| (r, t)))
        .collect();

    match samples.len() {
        0 => return Scene::placeholder(kind, *canvas, Placeholder::NoData),
        1 => return Scene::placeholder(kind, *canvas, Placeholder::InsufficientData),
        _ => {}
    }

    let temperatures: Vec<i32> = samples.iter().map(|(_, t)| *t).collect();
    let domain = temperature_domain(&temperatures);
    let baseline = canvas.baseline();
    let step = canvas.plot_width() / (samples.len() - 1) as f64;
    let x_at = |i: usize| canvas.padding_x + i as f64 * step;
    let y_at = |t: i32| baseline - (f64::from(t) - domain.min) / domain.span() * canvas.plot_height();

    let points: Vec<Point> = temperatures
        .iter()
        .enumerate()
        .map(|(i, t)| Point::new(x_at(i), y_at(*t)))
        .collect();

    let mut primitives = vec![
        Primitive::Rule {
            from: Point::new(canvas.padding_x, baseline),
            to: Point::new(canvas.width - canvas.padding_x, baseline),
            tone: Tone::Baseline,
            dashed: false,
        },
        Primitive::Rule {
            from: Point::new(canvas.padding_x, baseline / 2.0 + 20.0),
            to: Point::new(canvas.width - canvas.padding_x, baseline / 2.0 + 20.0),
            tone: Tone::GridLine,
            dashed: true,
        },
    ];

    for (i, (record, _)) in samples.iter().enumerate() {
        let x = x_at(i);
        let probability = record.precipitation_probability;
        let bar_height = f64::from(probability) / 100.0 * baseline * MAX_BAR_SHARE;

        primitives.push(Primitive::Bar {
            rect: Rect { x: x - 18.0, y: 0.0, width: 36.0, height: baseline, radius: 4.0 },
            tone: Tone::Column,
            opacity: 1.0,
        });

        if probability > 0 {
            primitives.push(Primitive::Bar {
                rect: Rect {
                    x: x - 12.0,
                    y: baseline - bar_height,
                    width: 24.0,
                    height: bar_height,
                    radius: 3.0,
                },
                tone: if record.is_snow { Tone::Snow } else { Tone::Rain },
                opacity: 0.4,
            });
        } else {
            primitives.push(Primitive::Bar {
                rect: Rect { x: x - 8.0, y: baseline - 2.0, width: 16.0, height: 2.0, radius: 1.0 },
                tone: Tone::Stub,
                opacity: 0.05,
            });
        }

        if probability >= PRECIP_LABEL_THRESHOLD {
            primitives.push(label(
                Point::new(x, baseline - bar_height - 12.0),
                format!("{probability}%"),
                14.0,
                true,
                if record.is_snow { Tone::SnowLabel } else { Tone::RainLabel },
            ));
        }
    }

    let line = Path::smooth(&points);
    let first_x = points[0].x;
    let last_x = points[points.len() - 1].x;
    primitives.push(Primitive::Area {
        path: line.clone().close_to_baseline(first_x, last_x, baseline),
        tone: Tone::TemperatureArea,
    });
    primitives.push(Primitive::Line {
        path: line,
        tone: Tone::TemperatureLine,
    });

    for ((record, temperature), point) in samples.iter().zip(&points) {
        primitives.push(Primitive::Marker {
            center: *point,
            radius: 6.0,
            tone: Tone::TemperatureMarker,
        });
        primitives.push(label(
            Point::new(point.x, point.y - 20.0),
            format!("{temperature}°"),
            20.0,
            true,
            Tone::Value,
        ));
        primitives.push(label(
            Point::new(point.x, canvas.height - 20.0),
            record.time_label(),
            14.0,
            false,
            Tone::Caption,
        ));
    }

    Scene {
        kind,
        canvas: *canvas,
        domain: Some(domain),
        placeholder: None,
        primitives,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{chart::PathCommand, test_support::snapshot_fixture};

    fn labels(scene: &Scene) -> Vec<&str> {
        scene
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Label { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn empty_input_is_no_data() {
        let scene = temperature_chart(&[], &Canvas::TEMPERATURE);
        assert_eq!(scene.placeholder, Some(Placeholder::NoData));
        assert!(scene.primitives.is_empty());
    }

    #[test]
    fn single_sample_is_insufficient() {
        let hourly = snapshot_fixture().hourly;
        // three records sample to a single point
        let scene = temperature_chart(&hourly[..3], &Canvas::TEMPERATURE);
        assert_eq!(scene.placeholder, Some(Placeholder::InsufficientData));
    }

    #[test]
    fn samples_every_third_hour_up_to_eight() {
        let hourly = snapshot_fixture().hourly;
        let scene = temperature_chart(&hourly, &Canvas::TEMPERATURE);
        let markers = scene
            .primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Marker { .. }))
            .count();
        assert_eq!(markers, MAX_POINTS);

        let first_time = hourly[0].time_label();
        let fourth_time = hourly[3].time_label();
        let texts = labels(&scene);
        assert!(texts.contains(&first_time.as_str()));
        assert!(texts.contains(&fourth_time.as_str()));
    }

    #[test]
    fn line_is_smoothed() {
        let hourly = snapshot_fixture().hourly;
        let scene = temperature_chart(&hourly, &Canvas::TEMPERATURE);
        let line = scene
            .primitives
            .iter()
            .find_map(|p| match p {
                Primitive::Line { path, .. } => Some(path),
                _ => None,
            })
            .expect("line present");
        assert!(line.commands()[1..].iter().all(|c| matches!(c, PathCommand::CubicTo { .. })));
    }

    #[test]
    fn flat_temperatures_keep_positive_span() {
        let domain = temperature_domain(&[5, 5, 5]);
        assert!(domain.span() >= 1.0);
        assert_eq!(domain.min, 2.0);
        assert_eq!(domain.max, 8.0);
    }

    #[test]
    fn precipitation_label_threshold() {
        let mut hourly = snapshot_fixture().hourly;
        hourly.truncate(4);
        hourly[0].precipitation_probability = 14;
        hourly[3].precipitation_probability = 15;

        let scene = temperature_chart(&hourly, &Canvas::TEMPERATURE);
        let texts = labels(&scene);
        assert!(!texts.contains(&"14%"));
        assert!(texts.contains(&"15%"));
    }

    #[test]
    fn full_probability_bar_reaches_eighty_percent() {
        let mut hourly = snapshot_fixture().hourly;
        hourly.truncate(4);
        hourly[0].precipitation_probability = 100;

        let canvas = Canvas::TEMPERATURE;
        let scene = temperature_chart(&hourly, &canvas);
        let tallest = scene
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Bar { rect, tone: Tone::Rain | Tone::Snow, .. } => Some(rect.height),
                _ => None,
            })
            .fold(0.0_f64, f64::max);
        assert!((tallest - canvas.baseline() * 0.8).abs() < 1e-9);
    }
}
