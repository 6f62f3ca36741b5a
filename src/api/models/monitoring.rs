use serde::{Deserialize, Serialize};

use crate::telemetry::DailyAggregate;

pub const ENERGY_SERIES_LABEL: &str = "AC Power (kWh)";

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    /// Kept raw so a malformed value gets a JSON error body
    pub days: Option<String>,
}

/// Chart-ready history: one label per day, one value per label in each series.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HistoryChart {
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub values: Vec<f64>,
}

impl From<Vec<DailyAggregate>> for HistoryChart {
    fn from(aggregates: Vec<DailyAggregate>) -> Self {
        let (labels, values) = aggregates
            .into_iter()
            .map(|a| (a.date.format("%Y-%m-%d").to_string(), a.total_energy))
            .unzip();

        Self {
            labels,
            series: vec![ChartSeries {
                label: ENERGY_SERIES_LABEL.to_string(),
                values,
            }],
        }
    }
}

/// Chart.js line-chart body served on the dashboard's `/api/historical-data` path.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DashboardChart {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
    pub border_width: u32,
    pub tension: f64,
    pub fill: bool,
}

impl From<Vec<DailyAggregate>> for DashboardChart {
    fn from(aggregates: Vec<DailyAggregate>) -> Self {
        let HistoryChart { labels, series } = HistoryChart::from(aggregates);
        let datasets = series
            .into_iter()
            .map(|s| ChartDataset {
                label: s.label,
                data: s.values,
                border_color: "#4285F4".to_string(),
                background_color: "rgba(66, 133, 244, 0.1)".to_string(),
                border_width: 2,
                tension: 0.4,
                fill: true,
            })
            .collect();

        Self { labels, datasets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_chart_from_aggregates() {
        let chart = HistoryChart::from(vec![
            DailyAggregate {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                total_energy: 0.5,
            },
            DailyAggregate {
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                total_energy: 1.25,
            },
        ]);

        assert_eq!(
            serde_json::to_value(&chart).unwrap(),
            serde_json::json!({
                "labels": ["2024-01-01", "2024-01-02"],
                "series": [{"label": "AC Power (kWh)", "values": [0.5, 1.25]}],
            })
        );
    }

    #[test]
    fn test_dashboard_chart_uses_datasets() {
        let chart = DashboardChart::from(vec![DailyAggregate {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            total_energy: 0.5,
        }]);

        assert_eq!(
            serde_json::to_value(&chart).unwrap(),
            serde_json::json!({
                "labels": ["2024-01-01"],
                "datasets": [{
                    "label": "AC Power (kWh)",
                    "data": [0.5],
                    "borderColor": "#4285F4",
                    "backgroundColor": "rgba(66, 133, 244, 0.1)",
                    "borderWidth": 2,
                    "tension": 0.4,
                    "fill": true,
                }],
            })
        );
    }

    #[test]
    fn test_empty_chart_keeps_series() {
        let chart = HistoryChart::from(Vec::new());
        assert!(chart.labels.is_empty());
        assert_eq!(chart.series.len(), 1);
        assert!(chart.series[0].values.is_empty());
    }
}
