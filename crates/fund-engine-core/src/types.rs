use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Currency code
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    GBP,
    #[default]
    USD,
    EUR,
    CHF,
    Other(String),
}

impl Currency {
    /// Prefix used when rendering amounts in human-readable messages.
    pub fn symbol(&self) -> &str {
        match self {
            Currency::GBP => "£",
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::CHF => "CHF ",
            Currency::Other(code) => code.as_str(),
        }
    }
}

/// Render an amount with a currency prefix and thousands separators,
/// e.g. `$2,000,000` or `$10,000.50`. Whole amounts drop the fraction.
pub fn format_money(amount: Money, currency: &Currency) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();

    let whole = abs.trunc();
    let frac = abs - whole;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(currency.symbol());
    out.push_str(&grouped);
    if !frac.is_zero() {
        // frac is in (0, 1) with at most 2 dp
        let cents = (frac * Decimal::ONE_HUNDRED).trunc().to_u32().unwrap_or(0);
        out.push_str(&format!(".{cents:02}"));
    }
    out
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata.
///
/// The calculators themselves return bare values so repeated calls stay
/// bit-identical; front ends wrap them here together with their own timing.
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_money_thousands() {
        assert_eq!(format_money(dec!(2000000), &Currency::USD), "$2,000,000");
        assert_eq!(format_money(dec!(10000), &Currency::USD), "$10,000");
        assert_eq!(format_money(dec!(999), &Currency::USD), "$999");
    }

    #[test]
    fn test_format_money_fraction() {
        assert_eq!(format_money(dec!(1234.5), &Currency::USD), "$1,234.50");
        assert_eq!(format_money(dec!(0.07), &Currency::GBP), "£0.07");
    }

    #[test]
    fn test_format_money_negative() {
        assert_eq!(format_money(dec!(-250000), &Currency::EUR), "-€250,000");
    }
}
