// Default chart parameters for a new chart in a project
use super::chart::{
    AxisValue, BeeswarmParameters, Chart, ChartParameters, ChartType, HeatmapParameters, MetricId,
    RadarParameters, SliceId, SlicesMetricsOrModels, SlicesOrModels, TableParameters,
    XcParameters,
};
use super::error::ChartError;
use serde::Deserialize;

const DEFAULT_SLICE_COUNT: usize = 2;
const FALLBACK_METRIC: MetricId = 1;

/// What a project currently offers to chart: its slices, models and metrics.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectContext {
    #[serde(default)]
    pub slices: Vec<SliceId>,
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(default)]
    pub metrics: Vec<MetricId>,
}

impl ProjectContext {
    fn leading_slices(&self) -> Vec<SliceId> {
        self.slices.iter().take(DEFAULT_SLICE_COUNT).copied().collect()
    }

    /// The project's first metric. The web client always seeds new charts
    /// with metric id 1; that id is only the fallback here, for projects
    /// without metrics.
    fn first_metric(&self) -> MetricId {
        self.metrics.first().copied().unwrap_or(FALLBACK_METRIC)
    }

    fn first_model(&self) -> Vec<String> {
        self.models.first().cloned().into_iter().collect()
    }
}

/// Build a chart of `chart_type` populated with sensible starting parameters.
pub fn chart_defaults(
    name: &str,
    id: i64,
    chart_type: ChartType,
    context: &ProjectContext,
) -> Result<Chart, ChartError> {
    let parameters = match chart_type {
        ChartType::Bar | ChartType::Line => ChartParameters::Xc(XcParameters {
            slices: context.leading_slices(),
            metric: context.first_metric(),
            models: context.models.clone(),
            x_channel: SlicesOrModels::Slices,
            color_channel: SlicesOrModels::Models,
        }),
        ChartType::Table => ChartParameters::Table(TableParameters {
            models: context.models.clone(),
            slices: context.leading_slices(),
            metrics: vec![context.first_metric()],
            x_channel: SlicesMetricsOrModels::Models,
            y_channel: SlicesOrModels::Slices,
            fixed_channel: SlicesMetricsOrModels::Metrics,
        }),
        ChartType::Beeswarm => ChartParameters::Beeswarm(BeeswarmParameters {
            models: context.first_model(),
            slices: context.leading_slices(),
            metrics: context.metrics.clone(),
            y_channel: SlicesOrModels::Models,
            color_channel: SlicesOrModels::Slices,
            fixed_dimension: "y".to_string(),
        }),
        ChartType::Radar => ChartParameters::Radar(RadarParameters {
            models: context.first_model(),
            slices: context.leading_slices(),
            metrics: context.metrics.clone(),
            axis_channel: SlicesMetricsOrModels::Metrics,
            fixed_channel: SlicesMetricsOrModels::Models,
            layer_channel: SlicesOrModels::Slices,
        }),
        ChartType::Heatmap => {
            let model = context
                .models
                .first()
                .cloned()
                .ok_or(ChartError::NoModels { chart_type })?;
            ChartParameters::Heatmap(HeatmapParameters {
                x_values: context
                    .leading_slices()
                    .into_iter()
                    .map(AxisValue::from)
                    .collect(),
                y_values: context.models.iter().cloned().map(AxisValue::from).collect(),
                metric: context.first_metric(),
                model,
                x_channel: SlicesOrModels::Slices,
                y_channel: SlicesOrModels::Models,
            })
        }
    };

    Chart::new(id, name, chart_type, parameters)
}
