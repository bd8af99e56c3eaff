//! Company data retrieval service.

use std::sync::Arc;
use std::time::Duration;

use crate::db::models::{CompanyRecord, CompanyResponse, DnbMetrics, PrimaryTrade};
use crate::db::queries::company as queries;
use crate::db::Storage;
use crate::error::{AppError, AppResult};

const MAX_RETRIES: u32 = 3;
const INITIAL_DELAY: Duration = Duration::from_millis(50);
const MAX_DELAY: Duration = Duration::from_secs(10);

/// Service for company data operations.
#[derive(Clone)]
pub struct CompanyService {
    storage: Arc<Storage>,
}

impl CompanyService {
    /// Create a new company service.
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// Retrieve a company's data for the requested field groups.
    ///
    /// Groups must already be normalized (lowercased, trimmed). Unknown
    /// groups are rejected, a missing CRN maps to `NotFound`.
    pub async fn retrieve(&self, crn: &str, groups: &[String]) -> AppResult<CompanyResponse> {
        if !queries::valid_groups(groups) {
            return Err(AppError::BadRequest("invalid groups".to_string()));
        }

        let record = self.fetch_with_retry(crn, groups).await?;
        let record = record.ok_or_else(|| AppError::NotFound(format!("company {crn} not found")))?;

        Ok(build_response(record, groups))
    }

    /// Run the lookup, reconnecting and backing off on transient I/O
    /// failures. Query-level errors propagate immediately.
    async fn fetch_with_retry(
        &self,
        crn: &str,
        groups: &[String],
    ) -> AppResult<Option<CompanyRecord>> {
        let mut delay = INITIAL_DELAY;

        for attempt in 0..=MAX_RETRIES {
            let pool = self.storage.pool().await;
            match queries::fetch_company(&pool, crn, groups).await {
                Ok(record) => return Ok(record),
                Err(e) if is_transient(&e) && attempt < MAX_RETRIES => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        crn,
                        error = %e,
                        "Company lookup failed, retrying"
                    );
                    if let Err(e) = self.storage.reconnect().await {
                        tracing::error!(error = %e, "Failed to reconnect");
                    }
                    tokio::time::sleep(delay).await;
                    delay = std::cmp::min(delay * 2, MAX_DELAY);
                }
                Err(e) => {
                    tracing::error!(crn, error = %e, "Company lookup failed");
                    return Err(e.into());
                }
            }
        }

        unreachable!("retry loop returns on the final attempt")
    }
}

/// True for failures worth a reconnect-and-retry: the connection dropped
/// mid-flight or the pool could not hand out a connection in time.
fn is_transient(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed
    )
}

/// Shape the API response from a fetched record.
///
/// The D&B block is attached only when the `dnb` group was requested. A
/// malformed primary-trade document is logged and omitted rather than
/// failing the whole request.
fn build_response(record: CompanyRecord, groups: &[String]) -> CompanyResponse {
    let primary_trade = record.primary_trade.as_deref().and_then(|data| {
        PrimaryTrade::from_stored_json(data)
            .map_err(|e| {
                tracing::error!(
                    crn = record.crn.as_deref().unwrap_or_default(),
                    primary_trade = data,
                    error = %e,
                    "Failed to parse primary trade"
                );
            })
            .ok()
    });

    let dnb = groups
        .iter()
        .any(|g| g == queries::DNB_GROUP)
        .then(|| DnbMetrics {
            blue_collar_employees: record.dnb_blue_collar_employees,
            delinquency_score: record.dnb_delinquency_score.clone(),
            duns_number: record.dnb_duns_number.clone(),
            employees: record.dnb_employees,
            estimate_net_worth: record.dnb_estimate_net_worth,
            estimate_sales: record.dnb_estimate_sales,
            failure_score: record.dnb_failure_score,
            max_credit: record.dnb_max_credit,
            wage_estimate: record.dnb_wage_estimate,
            white_collar_employees: record.dnb_white_collar_employees,
            ..Default::default()
        });

    CompanyResponse {
        crn: record.crn.unwrap_or_default(),
        company_name: record.company_name.unwrap_or_default(),
        primary_trade,
        registered_address: record.registered_address.unwrap_or_default(),
        dnb,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn record() -> CompanyRecord {
        CompanyRecord {
            crn: Some("000111222".to_string()),
            company_name: Some("Test Ltd".to_string()),
            registered_address: Some("1 Test Street".to_string()),
            dnb_employees: Some(42.0),
            dnb_duns_number: Some("123456789".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_response_base() {
        let response = build_response(record(), &groups(&[]));
        assert_eq!(response.crn, "000111222");
        assert_eq!(response.company_name, "Test Ltd");
        assert!(response.primary_trade.is_none());
        assert!(response.dnb.is_none());
    }

    #[test]
    fn test_build_response_with_dnb() {
        let response = build_response(record(), &groups(&["dnb"]));
        let dnb = response.dnb.expect("dnb group requested");
        assert_eq!(dnb.employees, Some(42.0));
        assert_eq!(dnb.duns_number.as_deref(), Some("123456789"));
    }

    #[test]
    fn test_build_response_primary_trade() {
        let mut record = record();
        record.primary_trade =
            Some(r#"{"Code": "00001", "Description": "best trade ever"}"#.to_string());
        let response = build_response(record, &groups(&[]));
        let trade = response.primary_trade.expect("valid document");
        assert_eq!(trade.code, "00001");
        assert_eq!(trade.description, "best trade ever");
    }

    #[test]
    fn test_build_response_bad_primary_trade_is_omitted() {
        let mut record = record();
        record.primary_trade = Some("{}".to_string());
        let response = build_response(record, &groups(&[]));
        assert!(response.primary_trade.is_none());
        assert_eq!(response.crn, "000111222");
    }

    #[test]
    fn test_is_transient() {
        assert!(is_transient(&sqlx::Error::PoolTimedOut));
        assert!(!is_transient(&sqlx::Error::RowNotFound));
    }
}
