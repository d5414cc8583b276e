use crate::{AppError, Result};

/// Separator the model is asked to place between the three answer fields.
pub const FIELD_DELIMITER: &str = " / ";

pub fn trend_glyph(first: f64, last: f64) -> &'static str {
    if last > first {
        "↗"
    } else if last < first {
        "↘"
    } else {
        "→"
    }
}

pub fn build_prediction_prompt(
    prices: &[f64],
    market: &str,
    commodity: &str,
    dates: &[String],
    currency: &str,
) -> Result<String> {
    let (first, last) = match (prices.first(), prices.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => {
            return Err(AppError::Validation(
                "Cannot build a prediction prompt from an empty price series".to_string(),
            ))
        }
    };

    Ok(format!(
        r#"You are MarketScan AI, an expert market analyst for Ethiopian agricultural markets.

CONTEXT:
- Market: {market}
- Commodity: {commodity}
- Price data: {prices:?} (for dates {dates:?})
- Latest price: {last:?} {currency}
- Price trend: {trend}

TASK:
Analyze this price data and provide:
1. A 1-sentence prediction for tomorrow's price (will it go up, down, or stay stable?)
2. A confidence score (40-95%) based on the data patterns
3. A short actionable tip (max 10 words) for buyers/sellers

FORMAT YOUR RESPONSE EXACTLY AS ONE LINE:
Prediction: [your prediction sentence]{d}Confidence: [XX%]{d}Tip: [your tip]

EXAMPLES:
- If prices are rising: "Prediction: Price likely to increase by 2-3 {currency} tomorrow.{d}Confidence: 75%{d}Tip: Buy today before prices rise further."
- If prices are stable: "Prediction: Price expected to remain stable around current level.{d}Confidence: 65%{d}Tip: Good time to buy, no rush needed."
- If prices are falling: "Prediction: Price may continue declining by 1-2 {currency}.{d}Confidence: 70%{d}Tip: Wait 1-2 days for better prices."

Be realistic and consider Ethiopian market patterns, seasonal factors, and price volatility."#,
        trend = trend_glyph(first, last),
        d = FIELD_DELIMITER,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates() -> Vec<String> {
        vec!["2025-07-24".to_string(), "2025-07-25".to_string(), "2025-07-26".to_string()]
    }

    #[test]
    fn test_trend_glyph() {
        assert_eq!(trend_glyph(1.0, 2.0), "↗");
        assert_eq!(trend_glyph(2.0, 1.0), "↘");
        assert_eq!(trend_glyph(2.0, 2.0), "→");
    }

    #[test]
    fn test_prompt_contents() {
        let prompt =
            build_prediction_prompt(&[25.0, 27.0, 31.5], "Merkato", "onion", &dates(), "ETB").unwrap();
        assert!(prompt.contains("- Market: Merkato"));
        assert!(prompt.contains("- Commodity: onion"));
        assert!(prompt.contains("[25.0, 27.0, 31.5]"));
        assert!(prompt.contains(r#"["2025-07-24", "2025-07-25", "2025-07-26"]"#));
        assert!(prompt.contains("- Latest price: 31.5 ETB"));
        assert!(prompt.contains("- Price trend: ↗"));
        assert!(prompt.contains("Prediction: [your prediction sentence] / Confidence: [XX%] / Tip: [your tip]"));
    }

    #[test]
    fn test_latest_price_matches_series_formatting() {
        let prompt = build_prediction_prompt(&[25.0, 31.0], "Merkato", "onion", &dates(), "ETB").unwrap();
        assert!(prompt.contains("[25.0, 31.0]"));
        assert!(prompt.contains("- Latest price: 31.0 ETB"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let a = build_prediction_prompt(&[3.0, 2.0], "Shola", "teff", &dates(), "ETB").unwrap();
        let b = build_prediction_prompt(&[3.0, 2.0], "Shola", "teff", &dates(), "ETB").unwrap();
        assert_eq!(a, b);
        assert!(a.contains("- Price trend: ↘"));
    }

    #[test]
    fn test_empty_prices_rejected() {
        let err = build_prediction_prompt(&[], "Shola", "teff", &dates(), "ETB").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
