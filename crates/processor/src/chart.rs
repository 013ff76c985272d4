//! Chart configuration for the dashboard
//!
//! Maps satisfaction counts onto the declarative structures consumed by a
//! Chart.js renderer. Field names serialize in camelCase.

use kiosk_types::Satisfaction;
use serde::{Deserialize, Serialize};

use crate::aggregation::SatisfactionCounts;

/// Bar fill per level, in display order
pub const BACKGROUND_COLORS: [&str; 3] = [
    "rgba(16, 185, 129, .75)",
    "rgba(56, 189, 248, .75)",
    "rgba(244, 63, 94, .75)",
];

/// Doughnut border per level, in display order
pub const BORDER_COLORS: [&str; 3] = [
    "rgba(16, 185, 129, 1)",
    "rgba(56, 189, 248, 1)",
    "rgba(244, 63, 94, 1)",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<u64>,
    pub background_color: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutout: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LegendLabels {
    pub box_width: u32,
    pub box_height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegendOptions {
    pub labels: LegendLabels,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PluginOptions {
    pub legend: LegendOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TickOptions {
    pub precision: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AxisOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<TickOptions>,
    pub grid: GridOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScaleOptions {
    pub y: AxisOptions,
    pub x: AxisOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<PluginOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<ScaleOptions>,
}

impl ChartOptions {
    /// Responsive canvas without a fixed aspect ratio
    pub fn minimal() -> Self {
        Self {
            responsive: true,
            maintain_aspect_ratio: false,
            plugins: None,
            scales: None,
        }
    }

    /// Options for the bar chart: compact legend, integer ticks, faint y grid
    pub fn bar() -> Self {
        Self {
            plugins: Some(PluginOptions {
                legend: LegendOptions {
                    labels: LegendLabels {
                        box_width: 12,
                        box_height: 12,
                    },
                },
            }),
            scales: Some(ScaleOptions {
                y: AxisOptions {
                    ticks: Some(TickOptions { precision: 0 }),
                    grid: GridOptions {
                        color: Some("rgba(0,0,0,.08)".to_string()),
                        display: None,
                    },
                },
                x: AxisOptions {
                    ticks: None,
                    grid: GridOptions {
                        color: None,
                        display: Some(false),
                    },
                },
            }),
            ..Self::minimal()
        }
    }
}

/// Both dashboard charts with their options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChartSet {
    pub bar: ChartData,
    pub bar_options: ChartOptions,
    pub doughnut: ChartData,
    pub doughnut_options: ChartOptions,
}

impl ChartSet {
    pub fn from_counts(counts: &SatisfactionCounts) -> Self {
        Self {
            bar: bar_chart(counts),
            bar_options: ChartOptions::bar(),
            doughnut: doughnut_chart(counts),
            doughnut_options: ChartOptions::minimal(),
        }
    }
}

fn labels() -> Vec<String> {
    Satisfaction::ALL.iter().map(|s| s.title().to_string()).collect()
}

fn colors(palette: [&str; 3]) -> Vec<String> {
    palette.iter().map(|c| c.to_string()).collect()
}

/// Totals per level
pub fn bar_chart(counts: &SatisfactionCounts) -> ChartData {
    ChartData {
        labels: labels(),
        datasets: vec![ChartDataset {
            label: "Total".to_string(),
            data: counts.as_array().to_vec(),
            background_color: colors(BACKGROUND_COLORS),
            border_color: None,
            border_width: None,
            border_radius: Some(10),
            cutout: None,
        }],
    }
}

/// Share per level
pub fn doughnut_chart(counts: &SatisfactionCounts) -> ChartData {
    ChartData {
        labels: labels(),
        datasets: vec![ChartDataset {
            label: "%".to_string(),
            data: counts.as_array().to_vec(),
            background_color: colors(BACKGROUND_COLORS),
            border_color: Some(colors(BORDER_COLORS)),
            border_width: Some(1),
            border_radius: None,
            cutout: Some("64%".to_string()),
        }],
    }
}
