//! Company lookup queries.
//!
//! The `entries_crn` table is wide; callers select columns by field group
//! rather than pulling whole rows. The `base` group is always included,
//! additional groups are opt-in.

use crate::db::models::CompanyRecord;
use crate::db::DbPool;

/// Field group always included in a lookup.
pub const BASE_GROUP: &str = "base";

/// D&B metrics field group.
pub const DNB_GROUP: &str = "dnb";

const BASE_COLUMNS: &[&str] = &["crn", "company_name", "primary_trade", "registered_address"];

const DNB_COLUMNS: &[&str] = &[
    "dnb_blue_collar_employees",
    "dnb_delinquency_score",
    "dnb_duns_number",
    "dnb_employees",
    "dnb_estimate_net_worth",
    "dnb_estimate_sales",
    "dnb_estimate_working_capital",
    "dnb_failure_score",
    "dnb_max_credit",
    "dnb_wage_estimate",
    "dnb_white_collar_employees",
];

fn group_columns(group: &str) -> Option<&'static [&'static str]> {
    match group {
        BASE_GROUP => Some(BASE_COLUMNS),
        DNB_GROUP => Some(DNB_COLUMNS),
        _ => None,
    }
}

/// Check that every requested group is known.
pub fn valid_groups(groups: &[String]) -> bool {
    groups.iter().all(|g| group_columns(g).is_some())
}

/// Build the lookup SELECT for the requested groups plus the base group.
pub fn select_statement(groups: &[String]) -> String {
    let mut columns: Vec<&'static str> = Vec::new();
    for group in groups
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(BASE_GROUP))
    {
        let Some(cols) = group_columns(group) else {
            continue;
        };
        for column in cols.iter().copied() {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
    }

    let column_list = columns
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ");

    format!("SELECT {column_list} FROM entries_crn WHERE crn = $1")
}

/// Fetch a single company record by CRN.
///
/// Returns `Ok(None)` when no row matches. Errors are left as raw
/// `sqlx::Error` so callers can distinguish transient I/O failures.
pub async fn fetch_company(
    pool: &DbPool,
    crn: &str,
    groups: &[String],
) -> Result<Option<CompanyRecord>, sqlx::Error> {
    let query = select_statement(groups);
    sqlx::query_as::<_, CompanyRecord>(&query)
        .bind(crn)
        .fetch_optional(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_valid_groups() {
        assert!(valid_groups(&groups(&[])));
        assert!(valid_groups(&groups(&["dnb"])));
        assert!(valid_groups(&groups(&["base", "dnb"])));
        assert!(!valid_groups(&groups(&["dnb", "experian"])));
    }

    #[test]
    fn test_select_statement_base_only() {
        let sql = select_statement(&groups(&[]));
        assert_eq!(
            sql,
            "SELECT \"crn\", \"company_name\", \"primary_trade\", \"registered_address\" \
             FROM entries_crn WHERE crn = $1"
        );
    }

    #[test]
    fn test_select_statement_with_dnb() {
        let sql = select_statement(&groups(&["dnb"]));
        assert!(sql.starts_with("SELECT \"dnb_blue_collar_employees\""));
        assert!(sql.contains("\"dnb_white_collar_employees\""));
        assert!(sql.contains("\"registered_address\""));
        assert!(sql.ends_with("FROM entries_crn WHERE crn = $1"));
    }

    #[test]
    fn test_select_statement_dedupes_base() {
        let sql = select_statement(&groups(&["base"]));
        assert_eq!(sql.matches("\"crn\"").count(), 1);
    }
}
