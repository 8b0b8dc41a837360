// Parameter codec - flat JSON form of chart parameters as stored in the database
use crate::domain::chart::{ChartParameters, ChartType};
use crate::domain::error::ChartError;
use serde_json::{Map, Value};

/// Flatten parameters into a key-value map with snake_case keys.
pub fn encode_parameters(parameters: &ChartParameters) -> Result<Map<String, Value>, ChartError> {
    match serde_json::to_value(parameters)? {
        Value::Object(fields) => Ok(fields
            .into_iter()
            .map(|(key, value)| (to_snake_case(&key), value))
            .collect()),
        // Every parameter record is a struct, so this is unreachable in practice.
        other => Err(ChartError::Storage(anyhow::anyhow!(
            "{} parameters encoded to a non-object value: {}",
            parameters.shape(),
            other
        ))),
    }
}

pub fn parameters_to_json(parameters: &ChartParameters) -> Result<String, ChartError> {
    let fields = encode_parameters(parameters)?;
    Ok(serde_json::to_string(&fields)?)
}

/// Decode stored parameters for a chart of `chart_type`.
pub fn parameters_from_json(chart_type: ChartType, text: &str) -> Result<ChartParameters, ChartError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|source| ChartError::InvalidParameters { chart_type, source })?;
    ChartParameters::from_value(chart_type, value)
}

fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
