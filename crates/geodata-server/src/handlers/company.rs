//! Company data retrieval handler.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::db::models::CompanyResponse;
use crate::error::AppError;
use crate::services::CompanyService;

/// Query parameters accepted by the retrieve endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct RetrieveParams {
    /// Comma-separated list of field groups
    #[serde(default)]
    pub groups: String,
}

/// Normalize a raw comma-separated groups parameter: trim, lowercase, and
/// drop empty entries.
pub fn normalize_groups(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|group| group.trim().to_lowercase())
        .filter(|group| !group.is_empty())
        .collect()
}

/// Retrieve company data by CRN.
///
/// `GET /v2/company/{crn}?groups=dnb`
pub async fn retrieve(
    State(service): State<CompanyService>,
    Path(crn): Path<String>,
    Query(params): Query<RetrieveParams>,
) -> Result<Json<CompanyResponse>, AppError> {
    let groups = normalize_groups(&params.groups);
    let response = service.retrieve(&crn, &groups).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_groups_empty() {
        assert!(normalize_groups("").is_empty());
    }

    #[test]
    fn test_normalize_groups_single() {
        assert_eq!(normalize_groups("One"), vec!["one"]);
    }

    #[test]
    fn test_normalize_groups_two() {
        assert_eq!(normalize_groups("oNe,twO"), vec!["one", "two"]);
    }

    #[test]
    fn test_normalize_groups_whitespace_and_empties() {
        assert_eq!(normalize_groups(" dnb , ,base,"), vec!["dnb", "base"]);
    }
}
