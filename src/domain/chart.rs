// Chart domain model: chart types, channel selectors and per-type parameters
use super::error::ChartError;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub type SliceId = i64;
pub type MetricId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChartType {
    Bar,
    Line,
    Table,
    Beeswarm,
    Radar,
    Heatmap,
}

impl ChartType {
    pub const ALL: [ChartType; 6] = [
        ChartType::Bar,
        ChartType::Line,
        ChartType::Table,
        ChartType::Beeswarm,
        ChartType::Radar,
        ChartType::Heatmap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Bar => "BAR",
            ChartType::Line => "LINE",
            ChartType::Table => "TABLE",
            ChartType::Beeswarm => "BEESWARM",
            ChartType::Radar => "RADAR",
            ChartType::Heatmap => "HEATMAP",
        }
    }

    /// The parameter shape this chart type is drawn from.
    pub fn shape(&self) -> ParameterShape {
        match self {
            ChartType::Bar | ChartType::Line => ParameterShape::Xc,
            ChartType::Table => ParameterShape::Table,
            ChartType::Beeswarm => ParameterShape::Beeswarm,
            ChartType::Radar => ParameterShape::Radar,
            ChartType::Heatmap => ParameterShape::Heatmap,
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ChartError::UnknownChartType(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParameterShape {
    #[serde(rename = "XCParameters")]
    Xc,
    #[serde(rename = "TableParameters")]
    Table,
    #[serde(rename = "BeeswarmParameters")]
    Beeswarm,
    #[serde(rename = "RadarParameters")]
    Radar,
    #[serde(rename = "HeatmapParameters")]
    Heatmap,
}

impl fmt::Display for ParameterShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParameterShape::Xc => "XCParameters",
            ParameterShape::Table => "TableParameters",
            ParameterShape::Beeswarm => "BeeswarmParameters",
            ParameterShape::Radar => "RadarParameters",
            ParameterShape::Heatmap => "HeatmapParameters",
        };
        f.write_str(name)
    }
}

/// Channel encoding choice between slices and models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SlicesOrModels {
    Slices,
    Models,
}

/// Channel encoding choice between slices, metrics and models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SlicesMetricsOrModels {
    Slices,
    Models,
    Metrics,
}

/// Parameters for charts with an x channel and a color channel (bar, line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct XcParameters {
    pub slices: Vec<SliceId>,
    pub metric: MetricId,
    pub models: Vec<String>,
    #[serde(alias = "color_channel")]
    pub color_channel: SlicesOrModels,
    #[serde(alias = "x_channel")]
    pub x_channel: SlicesOrModels,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TableParameters {
    pub metrics: Vec<MetricId>,
    pub slices: Vec<SliceId>,
    pub models: Vec<String>,
    #[serde(alias = "y_channel")]
    pub y_channel: SlicesOrModels,
    #[serde(alias = "x_channel")]
    pub x_channel: SlicesMetricsOrModels,
    #[serde(alias = "fixed_channel")]
    pub fixed_channel: SlicesMetricsOrModels,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BeeswarmParameters {
    pub metrics: Vec<MetricId>,
    pub slices: Vec<SliceId>,
    pub models: Vec<String>,
    #[serde(alias = "y_channel")]
    pub y_channel: SlicesOrModels,
    #[serde(alias = "color_channel")]
    pub color_channel: SlicesOrModels,
    #[serde(alias = "fixed_dimension")]
    pub fixed_dimension: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RadarParameters {
    pub metrics: Vec<MetricId>,
    pub slices: Vec<SliceId>,
    pub models: Vec<String>,
    #[serde(alias = "axis_channel")]
    pub axis_channel: SlicesMetricsOrModels,
    #[serde(alias = "layer_channel")]
    pub layer_channel: SlicesOrModels,
    #[serde(alias = "fixed_channel")]
    pub fixed_channel: SlicesMetricsOrModels,
}

/// One entry of a heatmap axis: a slice id or a model name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    Id(i64),
    Name(String),
}

impl From<i64> for AxisValue {
    fn from(id: i64) -> Self {
        AxisValue::Id(id)
    }
}

impl From<String> for AxisValue {
    fn from(name: String) -> Self {
        AxisValue::Name(name)
    }
}

impl From<&str> for AxisValue {
    fn from(name: &str) -> Self {
        AxisValue::Name(name.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HeatmapParameters {
    pub metric: MetricId,
    #[serde(alias = "x_values")]
    pub x_values: Vec<AxisValue>,
    #[serde(alias = "y_values")]
    pub y_values: Vec<AxisValue>,
    pub model: String,
    #[serde(alias = "y_channel")]
    pub y_channel: SlicesOrModels,
    #[serde(alias = "x_channel")]
    pub x_channel: SlicesOrModels,
}

/// Parameters of a chart. Serializes as the bare record, without a variant
/// wrapper; the variant is recovered from the chart type on the way back in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ChartParameters {
    Xc(XcParameters),
    Table(TableParameters),
    Beeswarm(BeeswarmParameters),
    Radar(RadarParameters),
    Heatmap(HeatmapParameters),
}

impl ChartParameters {
    /// Select and validate the parameter record matching `chart_type`.
    pub fn from_value(chart_type: ChartType, value: Value) -> Result<Self, ChartError> {
        let parsed = match chart_type.shape() {
            ParameterShape::Xc => serde_json::from_value(value).map(ChartParameters::Xc),
            ParameterShape::Table => serde_json::from_value(value).map(ChartParameters::Table),
            ParameterShape::Beeswarm => {
                serde_json::from_value(value).map(ChartParameters::Beeswarm)
            }
            ParameterShape::Radar => serde_json::from_value(value).map(ChartParameters::Radar),
            ParameterShape::Heatmap => {
                serde_json::from_value(value).map(ChartParameters::Heatmap)
            }
        };
        parsed.map_err(|source| ChartError::InvalidParameters { chart_type, source })
    }

    pub fn shape(&self) -> ParameterShape {
        match self {
            ChartParameters::Xc(_) => ParameterShape::Xc,
            ChartParameters::Table(_) => ParameterShape::Table,
            ChartParameters::Beeswarm(_) => ParameterShape::Beeswarm,
            ChartParameters::Radar(_) => ParameterShape::Radar,
            ChartParameters::Heatmap(_) => ParameterShape::Heatmap,
        }
    }

    pub fn fits(&self, chart_type: ChartType) -> bool {
        self.shape() == chart_type.shape()
    }
}

/// Wire form of a chart, with parameters still untyped.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartPayload {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub chart_type: String,
    pub parameters: Value,
}

/// A named chart whose parameters always match its type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ChartPayload")]
pub struct Chart {
    id: i64,
    name: String,
    chart_type: ChartType,
    parameters: ChartParameters,
}

impl Chart {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        chart_type: ChartType,
        parameters: ChartParameters,
    ) -> Result<Self, ChartError> {
        if !parameters.fits(chart_type) {
            return Err(ChartError::TypeMismatch {
                chart_type,
                expected: chart_type.shape(),
                found: parameters.shape(),
            });
        }
        Ok(Self {
            id,
            name: name.into(),
            chart_type,
            parameters,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    pub fn parameters(&self) -> &ChartParameters {
        &self.parameters
    }

    pub fn with_id(self, id: i64) -> Self {
        Self { id, ..self }
    }
}

impl TryFrom<ChartPayload> for Chart {
    type Error = ChartError;

    fn try_from(payload: ChartPayload) -> Result<Self, Self::Error> {
        let chart_type: ChartType = payload.chart_type.parse()?;
        let parameters = ChartParameters::from_value(chart_type, payload.parameters)?;
        Chart::new(payload.id, payload.name, chart_type, parameters)
    }
}

#[derive(Serialize)]
struct ChartRef<'a> {
    id: i64,
    name: &'a str,
    #[serde(rename = "type")]
    chart_type: ChartType,
    parameters: &'a ChartParameters,
}

impl Serialize for Chart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ChartRef {
            id: self.id,
            name: &self.name,
            chart_type: self.chart_type,
            parameters: &self.parameters,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn xc_json() -> Value {
        json!({
            "slices": [1, 2],
            "metric": 3,
            "models": ["gpt-4", "llama"],
            "colorChannel": "MODELS",
            "xChannel": "SLICES"
        })
    }

    fn heatmap_json() -> Value {
        json!({
            "metric": 1,
            "xValues": [4, 5],
            "yValues": ["gpt-4", "llama"],
            "model": "gpt-4",
            "yChannel": "MODELS",
            "xChannel": "SLICES"
        })
    }

    #[test]
    fn test_chart_type_parse() {
        for chart_type in ChartType::ALL {
            assert_eq!(chart_type.as_str().parse::<ChartType>().unwrap(), chart_type);
        }
        let err = "PIE".parse::<ChartType>().unwrap_err();
        assert!(matches!(err, ChartError::UnknownChartType(ref t) if t == "PIE"));
    }

    #[test]
    fn test_bar_and_line_share_xc_shape() {
        let bar = ChartParameters::from_value(ChartType::Bar, xc_json()).unwrap();
        let line = ChartParameters::from_value(ChartType::Line, xc_json()).unwrap();
        assert_eq!(bar, line);
        assert!(bar.fits(ChartType::Bar));
        assert!(bar.fits(ChartType::Line));
        assert!(!bar.fits(ChartType::Table));
    }

    #[test]
    fn test_table_rejects_xc_payload() {
        let err = ChartParameters::from_value(ChartType::Table, xc_json()).unwrap_err();
        assert!(matches!(
            err,
            ChartError::InvalidParameters {
                chart_type: ChartType::Table,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut payload = xc_json();
        payload["extra"] = json!(true);
        assert!(ChartParameters::from_value(ChartType::Bar, payload).is_err());
    }

    #[test]
    fn test_reference_types_enforced() {
        let mut payload = xc_json();
        payload["slices"] = json!(["one"]);
        assert!(ChartParameters::from_value(ChartType::Bar, payload).is_err());

        let mut payload = xc_json();
        payload["models"] = json!([7]);
        assert!(ChartParameters::from_value(ChartType::Bar, payload).is_err());

        let mut payload = xc_json();
        payload["xChannel"] = json!("METRICS");
        assert!(ChartParameters::from_value(ChartType::Bar, payload).is_err());
    }

    #[test]
    fn test_snake_case_keys_accepted() {
        let stored = json!({
            "metrics": [1, 2],
            "slices": [3],
            "models": ["m"],
            "axis_channel": "METRICS",
            "layer_channel": "SLICES",
            "fixed_channel": "MODELS"
        });
        let parsed = ChartParameters::from_value(ChartType::Radar, stored).unwrap();
        assert_eq!(
            parsed,
            ChartParameters::Radar(RadarParameters {
                metrics: vec![1, 2],
                slices: vec![3],
                models: vec!["m".to_string()],
                axis_channel: SlicesMetricsOrModels::Metrics,
                layer_channel: SlicesOrModels::Slices,
                fixed_channel: SlicesMetricsOrModels::Models,
            })
        );
    }

    #[test]
    fn test_heatmap_axis_values_keep_kind() {
        let parsed = ChartParameters::from_value(ChartType::Heatmap, heatmap_json()).unwrap();
        let ChartParameters::Heatmap(heatmap) = parsed else {
            panic!("expected heatmap parameters");
        };
        assert_eq!(heatmap.x_values, vec![AxisValue::Id(4), AxisValue::Id(5)]);
        assert_eq!(
            heatmap.y_values,
            vec![AxisValue::from("gpt-4"), AxisValue::from("llama")]
        );
    }

    #[test]
    fn test_chart_new_rejects_mismatch() {
        let xc = ChartParameters::from_value(ChartType::Bar, xc_json()).unwrap();
        let err = Chart::new(1, "Accuracy", ChartType::Heatmap, xc).unwrap_err();
        assert!(matches!(
            err,
            ChartError::TypeMismatch {
                chart_type: ChartType::Heatmap,
                expected: ParameterShape::Heatmap,
                found: ParameterShape::Xc,
            }
        ));
    }

    #[test]
    fn test_chart_payload_with_wrong_shape_rejected() {
        let payload = json!({
            "id": 1,
            "name": "Accuracy",
            "type": "HEATMAP",
            "parameters": xc_json()
        });
        assert!(serde_json::from_value::<Chart>(payload).is_err());
    }

    #[test]
    fn test_chart_json_shape() {
        let payload = json!({
            "id": 9,
            "name": "Per-slice accuracy",
            "type": "HEATMAP",
            "parameters": heatmap_json()
        });
        let chart: Chart = serde_json::from_value(payload.clone()).unwrap();
        assert_eq!(chart.id(), 9);
        assert_eq!(chart.chart_type(), ChartType::Heatmap);
        assert_eq!(serde_json::to_value(&chart).unwrap(), payload);
    }

    #[test]
    fn test_with_id_keeps_rest() {
        let xc = ChartParameters::from_value(ChartType::Line, xc_json()).unwrap();
        let chart = Chart::new(0, "Trend", ChartType::Line, xc).unwrap().with_id(42);
        assert_eq!(chart.id(), 42);
        assert_eq!(chart.name(), "Trend");
        assert_eq!(chart.chart_type(), ChartType::Line);
    }

    #[test]
    fn test_parameter_shape_names() {
        assert_eq!(ParameterShape::Xc.to_string(), "XCParameters");
        assert_eq!(
            serde_json::to_value(ChartType::Beeswarm.shape()).unwrap(),
            json!("BeeswarmParameters")
        );
    }
}
