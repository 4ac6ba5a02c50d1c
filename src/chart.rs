//! Chart.js line-chart assembly.
//!
//! Dataset assembly is pure data; turning a config into markup is delegated
//! to a [`ChartBackend`] so chart composition stays testable without any
//! drawing surface.

use serde::Serialize;

use crate::error::Result;
use crate::severity::SeverityBand;
use crate::stats::BandSeries;

/// Alpha applied to every band color, fill and line alike.
const BAND_ALPHA: f32 = 0.5;

/// A single Chart.js dataset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub fill: bool,
    pub background_color: String,
    pub border_color: String,
    pub data: Vec<i64>,
}

/// Chart.js `data` block: shared labels plus one dataset per band.
#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendOptions {
    pub position: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TitleOptions {
    pub display: bool,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartOptions {
    pub legend: LegendOptions,
    pub title: TitleOptions,
}

/// Complete Chart.js configuration for one chart.
#[derive(Debug, Clone, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: String,
    pub data: ChartData,
    pub options: ChartOptions,
}

/// Build the three band datasets in fixed band order.
///
/// Label and series lengths are not checked against each other; a mismatch
/// degrades in the charting library rather than erroring here.
pub fn band_datasets(info: &BandSeries) -> Vec<Dataset> {
    SeverityBand::ALL
        .iter()
        .map(|&band| {
            let color = band.color().css_with_alpha(BAND_ALPHA);
            Dataset {
                label: band.label().to_string(),
                fill: false,
                background_color: color.clone(),
                border_color: color,
                data: info.get(band).to_vec(),
            }
        })
        .collect()
}

/// Assemble a full line-chart config: legend on top, title shown as given.
pub fn line_chart(labels: &[String], title: &str, info: &BandSeries) -> ChartConfig {
    ChartConfig {
        chart_type: "line".to_string(),
        data: ChartData { labels: labels.to_vec(), datasets: band_datasets(info) },
        options: ChartOptions {
            legend: LegendOptions { position: "top".to_string() },
            title: TitleOptions { display: true, text: title.to_string() },
        },
    }
}

/// Rendering backend seam: turns a config plus target surface into markup.
pub trait ChartBackend {
    /// Markup for the drawing surface itself.
    fn surface(&self, surface_id: &str, height: u32) -> String;

    /// Script that mounts the chart on the surface once the document's
    /// structural content has been parsed.
    fn bootstrap(&self, surface_id: &str, config: &ChartConfig) -> Result<String>;
}

/// Chart.js backend: a canvas per chart, initialized on `DOMContentLoaded`.
#[derive(Debug, Default)]
pub struct ChartJs;

impl ChartBackend for ChartJs {
    fn surface(&self, surface_id: &str, height: u32) -> String {
        format!(r#"<canvas id="{}" height="{}"></canvas>"#, surface_id, height)
    }

    fn bootstrap(&self, surface_id: &str, config: &ChartConfig) -> Result<String> {
        let config_json = serde_json::to_string(config)?;
        Ok(format!(
            r#"document.addEventListener("DOMContentLoaded", function() {{
  new Chart(document.getElementById("{id}").getContext("2d"), {config});
}});"#,
            id = surface_id,
            config = config_json,
        ))
    }
}
