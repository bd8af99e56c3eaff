//! Company record model and API response types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::{AppError, AppResult};

/// Row returned by the company lookup.
///
/// Only the columns of the requested field groups are selected, so every
/// column outside the base group carries `#[sqlx(default)]`.
#[derive(Debug, Clone, Default, FromRow)]
pub struct CompanyRecord {
    pub crn: Option<String>,
    pub company_name: Option<String>,
    /// JSON document with `Code`/`Description` keys
    pub primary_trade: Option<String>,
    pub registered_address: Option<String>,

    #[sqlx(default)]
    pub dnb_blue_collar_employees: Option<f64>,
    #[sqlx(default)]
    pub dnb_delinquency_score: Option<String>,
    #[sqlx(default)]
    pub dnb_duns_number: Option<String>,
    #[sqlx(default)]
    pub dnb_employees: Option<f64>,
    #[sqlx(default)]
    pub dnb_estimate_net_worth: Option<f64>,
    #[sqlx(default)]
    pub dnb_estimate_sales: Option<f64>,
    #[sqlx(default)]
    pub dnb_estimate_working_capital: Option<f64>,
    #[sqlx(default)]
    pub dnb_failure_score: Option<f64>,
    #[sqlx(default)]
    pub dnb_max_credit: Option<f64>,
    #[sqlx(default)]
    pub dnb_wage_estimate: Option<f64>,
    #[sqlx(default)]
    pub dnb_white_collar_employees: Option<f64>,
}

/// Primary trade of a company, parsed from the stored JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryTrade {
    pub code: String,
    pub description: String,
}

impl PrimaryTrade {
    /// Parse the stored JSON document.
    ///
    /// The document uses capitalized keys (`Code`, `Description`); unknown
    /// keys are tolerated, missing keys default to empty. A document where
    /// both values come out empty is rejected.
    pub fn from_stored_json(data: &str) -> AppResult<Self> {
        let fields: HashMap<String, String> = serde_json::from_str(data)?;
        let trade = PrimaryTrade {
            code: fields.get("Code").cloned().unwrap_or_default(),
            description: fields.get("Description").cloned().unwrap_or_default(),
        };
        if trade.code.is_empty() && trade.description.is_empty() {
            return Err(AppError::Validation(
                "failed to parse primary trade".to_string(),
            ));
        }
        Ok(trade)
    }
}

/// D&B metrics group of the company response.
///
/// Every field is omitted from the JSON when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DnbMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blue_collar_employees: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delinquency_score: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duns_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employees: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate_net_worth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate_sales: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate_working_capital: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_credit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_indicator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sic_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wage_estimate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white_collar_employees: Option<f64>,
}

/// Company data API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyResponse {
    pub crn: String,
    pub company_name: String,
    pub primary_trade: Option<PrimaryTrade>,
    pub registered_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dnb: Option<DnbMetrics>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_trade_full() {
        let trade =
            PrimaryTrade::from_stored_json(r#"{"Code": "00001", "Description": "best trade ever"}"#)
                .unwrap();
        assert_eq!(trade.code, "00001");
        assert_eq!(trade.description, "best trade ever");
    }

    #[test]
    fn test_primary_trade_code_only() {
        let trade = PrimaryTrade::from_stored_json(r#"{"Code": "00001"}"#).unwrap();
        assert_eq!(trade.code, "00001");
        assert!(trade.description.is_empty());
    }

    #[test]
    fn test_primary_trade_empty_document() {
        assert!(PrimaryTrade::from_stored_json("{}").is_err());
    }

    #[test]
    fn test_primary_trade_invalid_json() {
        assert!(PrimaryTrade::from_stored_json("not json").is_err());
    }

    #[test]
    fn test_dnb_unset_fields_omitted() {
        let metrics = DnbMetrics {
            employees: Some(12.0),
            ..Default::default()
        };
        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json, serde_json::json!({"employees": 12.0}));
    }

    #[test]
    fn test_company_response_dnb_omitted() {
        let response = CompanyResponse {
            crn: "000111222".to_string(),
            company_name: "Test Ltd".to_string(),
            primary_trade: None,
            registered_address: String::new(),
            dnb: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("dnb").is_none());
        assert_eq!(json["crn"], "000111222");
    }
}
