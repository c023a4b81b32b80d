use std::path::Path;

use anyhow::Result;

use super::{Effect, Notice, ViewUpdate, wrong_payload};
use crate::config::constants::truncate;
use crate::data::{ExportFormat, default_file_name, write_series};
use crate::domain::{HistoricalSeries, Payload};
use crate::engine::FetchResult;

/// A fetched series waiting for the user to pick a destination.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSave {
    pub series: HistoricalSeries,
    pub format: ExportFormat,
    pub suggested_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub status: String,
    pub notice: Option<Notice>,
}

impl PendingSave {
    /// Maps a download result. The download tab has no rendered view of its own, only a
    /// status line, so the view slot is `()`.
    pub fn map(result: &FetchResult, format: ExportFormat) -> Result<ViewUpdate<()>> {
        match result {
            FetchResult::Success(Payload::Historical(series)) => {
                let pending = PendingSave {
                    suggested_name: default_file_name(series, format),
                    series: series.clone(),
                    format,
                };
                let status = format!(
                    "Received {} data points for {}. Choose where to save.",
                    series.points.len(),
                    series.asset_id
                );
                Ok(ViewUpdate::new((), status).with_effect(Effect::PromptSave(pending)))
            }
            FetchResult::Success(other) => Err(wrong_payload("Download", other)),
            FetchResult::Failure(f) => Ok(ViewUpdate::new(
                (),
                format!(
                    "Download API error: {}",
                    f.display_message(truncate::DOWNLOAD_STATUS)
                ),
            )
            .with_notice(Notice::error(
                "Download API Error",
                format!("Could not download the data:\n{}", f.message),
            ))),
        }
    }

    /// Runs on the UI thread once the user answered the save prompt. `None` means cancelled.
    pub fn save(&self, path: Option<&Path>) -> SaveOutcome {
        let Some(path) = path else {
            return SaveOutcome {
                status: "Save cancelled.".into(),
                notice: None,
            };
        };

        match write_series(path, &self.series, self.format) {
            Ok(()) => SaveOutcome {
                status: format!("Data saved to:\n{}", path.display()),
                notice: None,
            },
            Err(e) => {
                log::error!("Export to {} failed: {:#}", path.display(), e);
                SaveOutcome {
                    status: format!("Error while saving:\n{:#}", e),
                    notice: Some(Notice::error(
                        "Save Error",
                        format!("Could not save the file:\n{:#}", e),
                    )),
                }
            }
        }
    }
}
