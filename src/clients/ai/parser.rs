use std::panic::{self, AssertUnwindSafe};

use crate::clients::ai::prompts::FIELD_DELIMITER;
use crate::types::PredictionResult;

const DEFAULT_PREDICTION: &str = "Price movement uncertain";
const DEFAULT_CONFIDENCE: &str = "60%";
const DEFAULT_TIP: &str = "Monitor market conditions";

const UNPARSEABLE_PREDICTION: &str = "Unable to parse prediction";
const UNPARSEABLE_CONFIDENCE: &str = "50%";
const UNPARSEABLE_TIP: &str = "Check market manually";

/// Parse a `Prediction: ... / Confidence: ... / Tip: ...` reply. Missing
/// fields fall back to fixed defaults; this never fails.
pub fn parse_prediction_response(raw: &str) -> PredictionResult {
    match panic::catch_unwind(AssertUnwindSafe(|| extract_fields(raw))) {
        Ok(result) => result,
        Err(_) => {
            tracing::error!("Prediction response parsing panicked");
            PredictionResult::new(UNPARSEABLE_PREDICTION, UNPARSEABLE_CONFIDENCE, UNPARSEABLE_TIP, raw)
        }
    }
}

fn extract_fields(raw: &str) -> PredictionResult {
    let mut prediction = None;
    let mut confidence = None;
    let mut tip = None;

    for part in raw.split(FIELD_DELIMITER).map(str::trim) {
        if let Some(rest) = part.strip_prefix("Prediction:") {
            prediction = Some(rest.trim());
        } else if let Some(rest) = part.strip_prefix("Confidence:") {
            confidence = Some(rest.trim());
        } else if let Some(rest) = part.strip_prefix("Tip:") {
            tip = Some(rest.trim());
        }
    }

    PredictionResult {
        prediction: or_default(prediction, DEFAULT_PREDICTION),
        confidence: or_default(confidence, DEFAULT_CONFIDENCE),
        tip: or_default(tip, DEFAULT_TIP),
        raw_response: raw.to_string(),
    }
}

fn or_default(value: Option<&str>, default: &str) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or(default).to_string()
}
