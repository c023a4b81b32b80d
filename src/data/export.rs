// Export runs on the UI thread, after the user has picked a path.

use {
    crate::domain::HistoricalSeries,
    anyhow::{Context, Result},
    serde::{Deserialize, Serialize},
    std::fs::File,
    std::io::{BufWriter, Write},
    std::path::Path,
    strum_macros::{Display, EnumIter},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, Serialize, Deserialize)]
pub enum ExportFormat {
    #[default]
    #[strum(to_string = "CSV")]
    Csv,
    #[strum(to_string = "JSON")]
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Reads the settings value ("CSV" / "JSON", any case). Unknown values fall back to CSV.
    pub fn from_setting(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            ExportFormat::Json
        } else {
            ExportFormat::Csv
        }
    }
}

/// `{asset}_{days}d_history.{ext}`
pub fn default_file_name(series: &HistoricalSeries, format: ExportFormat) -> String {
    format!(
        "{}_{}d_history.{}",
        series.asset_id,
        series.days,
        format.extension()
    )
}

/// CSV: one flat row per point. JSON: the whole series object, pretty-printed.
pub fn write_series(path: &Path, series: &HistoricalSeries, format: ExportFormat) -> Result<()> {
    match format {
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_path(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            for point in &series.points {
                writer.serialize(point)?;
            }
            writer.flush()?;
        }
        ExportFormat::Json => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, series)?;
            writer.flush()?;
        }
    }
    log::info!(
        "Exported {} points of {} to {}",
        series.points.len(),
        series.asset_id,
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DayWindow, SeriesPoint};
    use tempfile::tempdir;

    fn series() -> HistoricalSeries {
        HistoricalSeries {
            asset_id: "bitcoin".into(),
            vs_currency: "usd".into(),
            days: DayWindow::Days(30),
            points: vec![
                SeriesPoint {
                    timestamp: 1_700_000_000_000,
                    date: "2023-11-14 22:13:20".into(),
                    price: 37000.5,
                    market_cap: Some(7.2e11),
                    total_volume: None,
                },
                SeriesPoint {
                    timestamp: 1_700_086_400_000,
                    date: "2023-11-15 22:13:20".into(),
                    price: 37500.0,
                    market_cap: None,
                    total_volume: Some(1.5e10),
                },
            ],
        }
    }

    #[test]
    fn default_name_uses_asset_and_window() {
        assert_eq!(
            default_file_name(&series(), ExportFormat::Csv),
            "bitcoin_30d_history.csv"
        );
        let mut max = series();
        max.days = DayWindow::Max;
        assert_eq!(
            default_file_name(&max, ExportFormat::Json),
            "bitcoin_maxd_history.json"
        );
    }

    #[test]
    fn format_setting_is_case_insensitive() {
        assert_eq!(ExportFormat::from_setting("json"), ExportFormat::Json);
        assert_eq!(ExportFormat::from_setting("CSV"), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_setting("xml"), ExportFormat::Csv);
        assert_eq!(ExportFormat::Json.to_string(), "JSON");
    }

    #[test]
    fn csv_has_flat_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_series(&path, &series(), ExportFormat::Csv).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "timestamp,date,price,market_cap,total_volume");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1700000000000,2023-11-14 22:13:20,37000.5,"));
        assert!(lines[1].ends_with(','));
    }

    #[test]
    fn json_holds_the_whole_series() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_series(&path, &series(), ExportFormat::Json).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["asset_id"], "bitcoin");
        assert_eq!(value["vs_currency"], "usd");
        assert_eq!(value["data_points"].as_array().unwrap().len(), 2);
        assert!(value.get("days").is_none());
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        assert!(write_series(&path, &series(), ExportFormat::Csv).is_err());
    }
}
