//! Prompt text and output schema sent to the model.

use campo_core::advisory::AdvisoryRequest;
use campo_core::reading::{SensorKind, SensorValue};
use serde_json::{json, Value};

/// Render the assessment prompt: crop context followed by every sensor
/// value with its unit.
pub fn advisory_prompt(request: &AdvisoryRequest) -> String {
    let mut prompt = format!(
        "You are an expert agricultural advisor analysing real-time field data.\n\n\
         Crop: {}\nField: {}\n",
        request.crop_type, request.field_name
    );
    if let Some(stage) = request.growth_stage {
        prompt.push_str(&format!("Plant development stage: {stage}\n"));
    }
    prompt.push_str("\nCurrent readings:\n");

    for (key, value) in &request.sensor_values {
        prompt.push_str("- ");
        prompt.push_str(&describe_value(key, value));
        prompt.push('\n');
    }

    prompt.push_str(
        "\nJudge each value against reasonable thresholds for this crop type and \
         development stage. Reply with a concise message describing the overall \
         condition and a severity: \"Normal\" for nominal conditions, \"Attention\" \
         for mild deviations, \"Critical\" for conditions needing immediate action.",
    );
    prompt
}

fn describe_value(key: &str, value: &SensorValue) -> String {
    match (SensorKind::from_key(key), value) {
        (Some(kind), SensorValue::Number(v)) => format!("{}: {v}{}", kind.label(), kind.unit()),
        (None, SensorValue::Number(v)) => format!("{key}: {v}"),
        (_, SensorValue::Text(text)) if key == "windDirection" => format!("wind direction: {text}"),
        (_, SensorValue::Text(text)) => format!("{key}: {text}"),
    }
}

/// JSON schema constraining the model's reply to `{message, severity}`.
pub fn advisory_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "message": { "type": "STRING" },
            "severity": {
                "type": "STRING",
                "enum": ["Normal", "Attention", "Critical"]
            }
        },
        "required": ["message", "severity"]
    })
}

/// Wrap a free-text field description into an image prompt.
pub fn field_image_prompt(description: &str) -> String {
    format!(
        "Generate a satellite image of an agricultural field. Conditions: {description}. \
         Style: realistic, top-down view."
    )
}
