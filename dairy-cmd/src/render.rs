//! JSON chart output.
//!
//! Stands in for the drawing layer: the serialized view carries categories,
//! aligned series (with `null` for unfed buckets), axis bound and geometry.

use dairy_chart::{ChartRenderer, ChartView};
use serde::Serialize;
use std::io::Write;

pub struct JsonRenderer<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(writer: W, pretty: bool) -> Self {
        Self { writer, pretty }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write any serializable payload followed by a newline.
    pub fn write_value<T: Serialize>(&mut self, value: &T) -> anyhow::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, value)?;
        } else {
            serde_json::to_writer(&mut self.writer, value)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> ChartRenderer for JsonRenderer<W> {
    type Error = anyhow::Error;

    fn render(&mut self, view: &ChartView) -> anyhow::Result<()> {
        self.write_value(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dairy_chart::{resolve_filter, CatalogCounts, Notice, ViewState};
    use dairy_feed::filter::FilterMode;
    use dairy_feed::usage::{FeedQuantity, UsageRecord};

    #[test]
    fn test_render_writes_nulls_and_scale() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let records = vec![
            UsageRecord {
                date: day,
                feeds: vec![FeedQuantity {
                    feed_id: 1,
                    feed_name: "Hay".to_string(),
                    quantity_kg: 5.0,
                }],
            },
            UsageRecord {
                date: day.succ_opt().unwrap(),
                feeds: vec![FeedQuantity {
                    feed_id: 2,
                    feed_name: "Silage".to_string(),
                    quantity_kg: 2.0,
                }],
            },
        ];
        let filter = resolve_filter(FilterMode::Week, day, None).unwrap();
        let view = ChartView::build(
            &filter,
            &records,
            &ViewState::default(),
            Default::default(),
            CatalogCounts {
                feed_types: 3,
                nutritions: 5,
            },
            None,
        );

        let mut renderer = JsonRenderer::new(Vec::new(), false);
        renderer.render(&view).unwrap();
        let output = String::from_utf8(renderer.into_inner()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["buckets"], serde_json::json!(["2024-03-04", "2024-03-05"]));
        assert_eq!(json["series"][0]["data"], serde_json::json!([5.0, null]));
        assert_eq!(json["filter"]["mode"], "week");
        assert_eq!(json["scale"]["chart_height"], 400);
        assert_eq!(json["summary"]["feed_type_count"], 3);
        assert_eq!(json["summary"]["nutrition_count"], 5);
        assert!(json["notice"].is_null());
    }

    #[test]
    fn test_notice_serialization() {
        let mut renderer = JsonRenderer::new(Vec::new(), false);
        renderer
            .write_value(&Notice::ProviderFailure("down".to_string()))
            .unwrap();
        renderer.write_value(&Notice::Empty).unwrap();
        let output = String::from_utf8(renderer.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], r#"{"kind":"provider_failure","message":"down"}"#);
        assert_eq!(lines[1], r#"{"kind":"empty"}"#);
    }
}
