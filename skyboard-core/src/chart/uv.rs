use crate::model::HourlyRecord;

use super::{label, Canvas, ChartKind, Domain, Path, Placeholder, Point, Primitive, Scene, Tone};

pub const HOURS: usize = 12;

/// Upper bound of at least 1 so an all-zero series still has a divisor.
pub fn uv_domain(values: &[i32]) -> Domain {
    let max = values.iter().copied().max().unwrap_or(0).max(1);
    Domain {
        min: 0.0,
        max: f64::from(max),
    }
}

/// Straight-segment UV line and area for the next twelve hours. Missing
/// readings are plotted as 0.
pub fn uv_chart(records: &[HourlyRecord], canvas: &Canvas) -> Scene {
    let kind = ChartKind::Uv;
    let data = &records[..records.len().min(HOURS)];
    if data.is_empty() {
        return Scene::placeholder(kind, *canvas, Placeholder::NoData);
    }

    let values: Vec<i32> = data.iter().map(|r| r.uv_index.unwrap_or(0)).collect();
    let domain = uv_domain(&values);
    let baseline = canvas.baseline();
    let step = canvas.plot_width() / (data.len() - 1).max(1) as f64;

    let points: Vec<Point> = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            Point::new(
                canvas.padding_x + i as f64 * step,
                baseline - f64::from(*v) / domain.max * canvas.plot_height(),
            )
        })
        .collect();

    let line = Path::polyline(&points);
    let first_x = points[0].x;
    let last_x = points[points.len() - 1].x;

    let mut primitives = vec![
        Primitive::Area {
            path: line.clone().close_to_baseline(first_x, last_x, baseline),
            tone: Tone::UvArea,
        },
        Primitive::Line {
            path: line,
            tone: Tone::Uv,
        },
    ];

    for ((record, value), point) in data.iter().zip(&values).zip(&points) {
        primitives.push(Primitive::Marker {
            center: *point,
            radius: 6.0,
            tone: Tone::UvMarker,
        });
        primitives.push(label(
            Point::new(point.x, point.y - 14.0),
            value.to_string(),
            13.0,
            true,
            Tone::Value,
        ));
        primitives.push(label(
            Point::new(point.x, baseline + 18.0),
            record.time_label(),
            12.0,
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

    #[test]
    fn empty_input_is_no_data() {
        let scene = uv_chart(&[], &Canvas::HOURLY_BARS);
        assert_eq!(scene.placeholder, Some(Placeholder::NoData));
    }

    #[test]
    fn all_zero_series_sits_on_baseline() {
        let mut hourly = snapshot_fixture().hourly;
        hourly.truncate(5);
        for record in &mut hourly {
            record.uv_index = Some(0);
        }

        let canvas = Canvas::HOURLY_BARS;
        let scene = uv_chart(&hourly, &canvas);
        assert_eq!(scene.domain, Some(Domain { min: 0.0, max: 1.0 }));
        for p in &scene.primitives {
            if let Primitive::Marker { center, .. } = p {
                assert_eq!(center.y, canvas.baseline());
            }
        }
    }

    #[test]
    fn single_record_does_not_divide_by_zero() {
        let mut hourly = snapshot_fixture().hourly;
        hourly.truncate(1);
        let scene = uv_chart(&hourly, &Canvas::HOURLY_BARS);
        assert!(scene.placeholder.is_none());
        for p in &scene.primitives {
            if let Primitive::Marker { center, .. } = p {
                assert!(center.x.is_finite() && center.y.is_finite());
            }
        }
    }

    #[test]
    fn missing_reading_plots_as_zero() {
        let mut hourly = snapshot_fixture().hourly;
        hourly.truncate(3);
        hourly[1].uv_index = None;
        let scene = uv_chart(&hourly, &Canvas::HOURLY_BARS);
        let texts: Vec<_> = scene
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Label { text, tone: Tone::Value, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(texts[1], "0");
    }

    #[test]
    fn line_uses_straight_segments() {
        let hourly = snapshot_fixture().hourly;
        let scene = uv_chart(&hourly, &Canvas::HOURLY_BARS);
        let Some(Primitive::Line { path, .. }) = scene.primitives.get(1) else {
            panic!("expected the line as second primitive");
        };
        assert_eq!(path.commands().len(), HOURS);
        assert!(path.commands()[1..].iter().all(|c| matches!(c, PathCommand::LineTo(_))));
    }
}
