use crate::model::HourlyRecord;

use super::{label, Canvas, ChartKind, Domain, Placeholder, Point, Primitive, Rect, Scene, Tone};

pub const HOURS: usize = 12;

/// The scale never drops below 100 % so bar heights stay comparable between loads.
pub fn precipitation_domain(probabilities: &[u8]) -> Domain {
    let max = probabilities.iter().copied().max().unwrap_or(0).max(100);
    Domain {
        min: 0.0,
        max: f64::from(max),
    }
}

/// One bar per hour for the next twelve hours.
pub fn precipitation_chart(records: &[HourlyRecord], canvas: &Canvas) -> Scene {
    let kind = ChartKind::Precipitation;
    let data = &records[..records.len().min(HOURS)];
    if data.is_empty() {
        return Scene::placeholder(kind, *canvas, Placeholder::NoData);
    }

    let probabilities: Vec<u8> = data.iter().map(|r| r.precipitation_probability).collect();
    let domain = precipitation_domain(&probabilities);
    let baseline = canvas.baseline();
    let slot = canvas.plot_width() / data.len() as f64;

    let mut primitives = Vec::with_capacity(data.len() * 4);
    for (i, record) in data.iter().enumerate() {
        let x = canvas.padding_x + i as f64 * slot + 10.0;
        let probability = record.precipitation_probability;
        let bar_height = f64::from(probability) / domain.max * canvas.plot_height();
        let y = baseline - bar_height;

        primitives.push(Primitive::Bar {
            rect: Rect {
                x,
                y: canvas.padding_y,
                width: 32.0,
                height: canvas.plot_height(),
                radius: 8.0,
            },
            tone: Tone::Column,
            opacity: 1.0,
        });
        primitives.push(Primitive::Bar {
            rect: Rect {
                x: x + 4.0,
                y,
                width: 24.0,
                height: bar_height,
                radius: 6.0,
            },
            tone: Tone::Precipitation,
            opacity: 1.0,
        });
        primitives.push(label(
            Point::new(x + 16.0, y - 8.0),
            format!("{probability}%"),
            14.0,
            true,
            Tone::Value,
        ));
        primitives.push(label(
            Point::new(x + 16.0, baseline + 18.0),
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
