use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// Report payloads returned by the brand API. Every field defaults so that a
// null payload, a missing key or an explicit `null` still renders as zeros and
// empty lists. Metrics are `f64` because the backend does not promise integers.

// Explicit `null` decodes like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RedemptionTotals {
    #[serde(deserialize_with = "null_as_default")]
    pub total_redemptions: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub active_tokens: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub expired_tokens: f64,
    // Fraction in [0, 1].
    #[serde(deserialize_with = "null_as_default")]
    pub redemption_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RedemptionsReport {
    #[serde(deserialize_with = "null_as_default")]
    pub totals: RedemptionTotals,
    // Row shape varies per backend version, so rows stay untyped.
    #[serde(deserialize_with = "null_as_default")]
    pub redemptions_by_reward: Vec<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub redemptions_by_partner: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProductUnits {
    #[serde(deserialize_with = "null_as_default")]
    pub product_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub product_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub units_recycled: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DailyUnits {
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub units: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CityUnits {
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub units: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub consumers: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TraceabilityReport {
    #[serde(deserialize_with = "null_as_default")]
    pub total_scans: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub validated_scans: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub eco_points_issued: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub redemptions: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub redemption_rate: f64,
    pub unique_consumers: Option<f64>,
    pub avg_units_per_consumer: Option<f64>,
    pub per_product: Option<Vec<ProductUnits>>,
    pub daily_trend: Option<Vec<DailyUnits>>,
    pub geo_breakdown: Option<Vec<CityUnits>>,
}

// Both reports, merged once both fetches have resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardReport {
    pub redemptions: RedemptionsReport,
    pub traceability: TraceabilityReport,
}

// Optional date filter for the traceability report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Query string (without the leading `?`) for the traceability endpoint.
    ///
    /// Both `from` and `to` are emitted as soon as either bound is set; an
    /// unset bound is sent as an empty value.
    pub fn query(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let format = |date: Option<NaiveDate>| {
            date.map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        };
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("from", &format(self.from))
            .append_pair("to", &format(self.to))
            .finish();
        Some(query)
    }
}
