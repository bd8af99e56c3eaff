//! One-shot RDS connectivity probe.
//!
//! Mints an IAM authentication token, opens a single TLS connection,
//! runs `SELECT now()`, and reports the outcome on stdout. The probe is a
//! manual diagnostic tool: it never fails the process, a broken database
//! shows up as a printed diagnostic and a zero exit status.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use sqlx::{Connection, PgConnection};

use geodata_server::db::auth;

const ENDPOINT: &str = "postgresmydb.123456789012.us-east-1.rds.amazonaws.com";
const PORT: u16 = 5432;
const DB_USER: &str = "jane_doe";
const DB_NAME: &str = "mydb";
const REGION: &str = "us-east-1";
const AWS_PROFILE: &str = "RDSCreds";

/// Leftover connection block for the dev RDS instance. Nothing below reads
/// these values; the probe connects to [`ENDPOINT`].
/// TODO: delete this block once dev-postgres-11 is decommissioned.
#[allow(dead_code)]
mod legacy {
    pub const RDS_HOST: &str = "dev-postgres-11.c5xohzyav5el.eu-west-1.rds.amazonaws.com";
    pub const RDS_PORT: &str = "5432";
    pub const RDS_NAME: &str = "geodata_dev";

    pub fn rds_user() -> String {
        std::env::var("POSTGRES_USER").unwrap_or_else(|_| "geo".to_string())
    }

    pub fn rds_password() -> String {
        std::env::var("POSTGRES_PASSWORD").unwrap_or_else(|_| "TGL2022!!".to_string())
    }
}

/// Connection parameters for the probe.
#[derive(Debug, Args)]
pub struct ProbeArgs {
    /// Database endpoint hostname
    #[arg(long, default_value = ENDPOINT)]
    pub endpoint: String,

    /// Database port
    #[arg(long, default_value_t = PORT)]
    pub port: u16,

    /// Database user
    #[arg(long, default_value = DB_USER)]
    pub user: String,

    /// Database name
    #[arg(long, default_value = DB_NAME)]
    pub database: String,

    /// AWS region for token generation
    #[arg(long, default_value = REGION)]
    pub region: String,

    /// Named AWS credentials profile
    #[arg(long, default_value = AWS_PROFILE)]
    pub profile: String,

    /// Path to a CA bundle (e.g. rds-combined-ca-bundle.pem)
    #[arg(long)]
    pub ca_bundle: Option<PathBuf>,
}

/// Run the probe and report on stdout.
///
/// Always returns `Ok`: any failure along the token/connect/query path is
/// caught and printed as a diagnostic.
pub async fn run(args: &ProbeArgs) -> Result<()> {
    match probe_once(args).await {
        Ok(now) => println!("{now}"),
        Err(e) => println!("{}", failure_message(&e)),
    }
    Ok(())
}

async fn probe_once(args: &ProbeArgs) -> Result<DateTime<Utc>> {
    let token = auth::build_auth_token(
        &args.endpoint,
        args.port,
        &args.user,
        &args.region,
        Some(&args.profile),
    )
    .await?;

    let mut options = PgConnectOptions::new()
        .host(&args.endpoint)
        .port(args.port)
        .username(&args.user)
        .password(&token)
        .database(&args.database)
        .ssl_mode(PgSslMode::Require);
    if let Some(ref ca_bundle) = args.ca_bundle {
        options = options.ssl_root_cert(ca_bundle);
    }

    let mut conn = PgConnection::connect_with(&options).await?;
    let row: (DateTime<Utc>,) = sqlx::query_as("SELECT now()").fetch_one(&mut conn).await?;
    conn.close().await?;

    Ok(row.0)
}

fn failure_message(error: &anyhow::Error) -> String {
    format!("Database connection failed due to {error:#}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_embeds_error() {
        let error = anyhow::anyhow!("connection refused");
        let message = failure_message(&error);
        assert_eq!(message, "Database connection failed due to connection refused");
        assert!(message.contains("failed"));
    }

    #[test]
    fn test_legacy_user_default() {
        if std::env::var("POSTGRES_USER").is_err() {
            assert_eq!(legacy::rds_user(), "geo");
        }
    }
}
