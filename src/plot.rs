use crate::compute::DailySales;
use anyhow::Context;
use chrono::{Datelike, Duration, NaiveDate};
use plotters::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use std::path::Path;

/// 12x6 inches at 100 DPI.
pub const CHART_SIZE: (u32, u32) = (1200, 600);
const LINE_COLOR: RGBColor = RGBColor(0x00, 0x7B, 0xFF);
const FONT: &str = "sans-serif";

const MONTHS: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Everything the line chart shows, computed up front so the drawing code only
/// has to lay it out. The x coordinate is the number of days since `first_day`,
/// which keeps days without sales as gaps on the axis.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ChartSeries {
    pub title: String,
    pub x_desc: &'static str,
    pub first_day: NaiveDate,
    pub points: Vec<(i32, f64)>,
    pub y_max: f64,
}

impl ChartSeries {
    /// `None` for an empty aggregate: there is nothing to plot. `Decimal`
    /// always converts to `f64`, so that is the only `None`.
    pub fn new(daily: &DailySales) -> Option<Self> {
        let (first_day, last_day) = daily.date_range()?;
        let points = daily
            .iter()
            .map(|(date, total)| {
                let offset = date.signed_duration_since(first_day).num_days() as i32;
                Some((offset, total.to_f64()?))
            })
            .collect::<Option<Vec<_>>>()?;
        let max = daily.max_total()?.to_f64()?;
        let single_month = same_month(first_day, last_day);
        Some(Self {
            title: chart_title(first_day, last_day),
            x_desc: if single_month { "Dia do Mês" } else { "Data" },
            first_day,
            points,
            y_max: if max > 0.0 { max * 1.1 } else { 1.0 },
        })
    }

    /// Draws the chart as a PNG at `path`, creating its directory first. The
    /// bitmap is flushed and released before this returns.
    pub fn render(&self, path: &Path) -> Result<(), anyhow::Error> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("could not create directory {}", dir.display()))?;
        }
        self.draw(path)
            .map_err(|e| anyhow::anyhow!("could not draw chart {}: {e}", path.display()))?;
        log::info!("chart with {} points written to {}", self.points.len(), path.display());
        Ok(())
    }

    fn draw(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let last = self.points.last().map_or(0, |(offset, _)| *offset);
        let first_day = self.first_day;
        let day_label = |offset: &i32| {
            first_day
                .checked_add_signed(Duration::days(i64::from(*offset)))
                .map(|date| date.format("%d/%m").to_string())
                .unwrap_or_default()
        };

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, (FONT, 32).into_font().style(FontStyle::Bold))
            .margin(20)
            .x_label_area_size(80)
            .y_label_area_size(100)
            .build_cartesian_2d(-1..last + 1, 0f64..self.y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .bold_line_style(BLACK.mix(0.25))
            .light_line_style(BLACK.mix(0.08))
            .x_labels((last + 3).clamp(2, 32) as usize)
            .x_label_formatter(&day_label)
            .x_label_style((FONT, 14).into_font().transform(FontTransform::Rotate90))
            .y_label_formatter(&|total| format!("{total:.2}"))
            .x_desc(self.x_desc)
            .y_desc("Total Vendido (R$)")
            .axis_desc_style((FONT, 18))
            .draw()?;

        chart.draw_series(LineSeries::new(
            self.points.iter().copied(),
            LINE_COLOR.stroke_width(2),
        ))?;
        chart.draw_series(
            self.points
                .iter()
                .map(|&point| Circle::new(point, 5, LINE_COLOR.filled())),
        )?;

        root.present()?;
        Ok(())
    }
}

fn same_month(first: NaiveDate, last: NaiveDate) -> bool {
    (first.year(), first.month()) == (last.year(), last.month())
}

/// Names the month when all sales fall in one, the date span otherwise.
pub(crate) fn chart_title(first: NaiveDate, last: NaiveDate) -> String {
    if same_month(first, last) {
        format!(
            "Vendas Diárias de {} de {}",
            MONTHS[first.month0() as usize],
            first.year()
        )
    } else {
        format!(
            "Vendas Diárias de {} a {}",
            first.format("%d/%m/%Y"),
            last.format("%d/%m/%Y")
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        compute::DailySales,
        data::Sale,
        plot::{chart_title, ChartSeries},
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::Map;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn daily(sales: &[(NaiveDate, Decimal)]) -> DailySales {
        let sales: Vec<_> = sales
            .iter()
            .map(|(date, total)| Sale {
                timestamp: date.and_hms_opt(0, 0, 0).unwrap(),
                total: *total,
                extra: Map::new(),
            })
            .collect();
        DailySales::from_sales(&sales).unwrap()
    }

    #[test]
    fn series_follows_the_days() {
        let daily = daily(&[
            (date(2024, 10, 1), dec!(100.0)),
            (date(2024, 10, 1), dec!(50.0)),
            (date(2024, 10, 2), dec!(200.0)),
            (date(2024, 10, 5), dec!(80.25)),
        ]);
        let series = ChartSeries::new(&daily).unwrap();
        assert_eq!(series.title, "Vendas Diárias de Outubro de 2024");
        assert_eq!(series.x_desc, "Dia do Mês");
        assert_eq!(series.first_day, date(2024, 10, 1));
        assert_eq!(series.points, [(0, 150.0), (1, 200.0), (4, 80.25)]);
        assert!((series.y_max - 220.0).abs() < 1e-9);
        assert_eq!(ChartSeries::new(&daily), Some(series));
    }

    #[test]
    fn series_across_months() {
        let daily = daily(&[
            (date(2024, 10, 30), dec!(10)),
            (date(2024, 11, 2), dec!(20)),
        ]);
        let series = ChartSeries::new(&daily).unwrap();
        assert_eq!(series.title, "Vendas Diárias de 30/10/2024 a 02/11/2024");
        assert_eq!(series.x_desc, "Data");
        assert_eq!(series.points, [(0, 10.0), (3, 20.0)]);
    }

    #[test]
    fn series_of_zero_sales() {
        let series = ChartSeries::new(&daily(&[(date(2024, 10, 7), dec!(0))])).unwrap();
        assert_eq!(series.points, [(0, 0.0)]);
        assert_eq!(series.y_max, 1.0);
    }

    #[test]
    fn no_series_without_data() {
        assert_eq!(ChartSeries::new(&DailySales::default()), None);
    }

    #[test]
    fn titles() {
        assert_eq!(
            chart_title(date(2025, 3, 1), date(2025, 3, 31)),
            "Vendas Diárias de Março de 2025"
        );
        assert_eq!(
            chart_title(date(2024, 12, 31), date(2025, 1, 1)),
            "Vendas Diárias de 31/12/2024 a 01/01/2025"
        );
        assert_eq!(
            chart_title(date(2024, 10, 1), date(2025, 10, 1)),
            "Vendas Diárias de 01/10/2024 a 01/10/2025"
        );
    }

    #[test]
    fn render_into_a_file_fails() {
        let dir = std::env::temp_dir().join(format!("vendas-plot-file-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("images");
        std::fs::write(&blocker, b"").unwrap();
        let series = ChartSeries::new(&daily(&[(date(2024, 10, 1), dec!(150))])).unwrap();
        let err = series
            .render(&blocker.join("vendas_diarias.png"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("could not create directory {}", blocker.display())
        );
        assert!(err.root_cause().downcast_ref::<std::io::Error>().is_some());
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    #[ignore = "needs a system sans-serif font"]
    fn render_png() {
        let dir = std::env::temp_dir().join(format!("vendas-plot-{}", std::process::id()));
        let path = dir.join("images").join("vendas_diarias.png");
        let series = ChartSeries::new(&daily(&[
            (date(2024, 10, 1), dec!(150)),
            (date(2024, 10, 2), dec!(200)),
        ]))
        .unwrap();
        series.render(&path).unwrap();
        let png = std::fs::read(&path).unwrap();
        assert_eq!(&png[1..4], b"PNG");
        std::fs::remove_dir_all(dir).unwrap();
    }
}
