//! AWS account validation and identity

use crate::aws::context::AwsContext;
use anyhow::{Context, Result};
use tracing::info;

/// Strongly-typed AWS account ID (12-digit string)
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display, derive_more::Deref)]
pub struct AccountId(String);

/// Fetch the current AWS account ID from credentials via STS GetCallerIdentity
///
/// This requires no special permissions, so it doubles as a credential check
/// before any ConfigService call is made.
pub async fn get_current_account_id(aws: &AwsContext) -> Result<AccountId> {
    let identity = aws
        .sts_client()
        .get_caller_identity()
        .send()
        .await
        .context("Failed to get AWS caller identity - check credentials")?;

    let account = identity
        .account()
        .context("No account ID returned from STS GetCallerIdentity")?;

    info!(account_id = %account, region = %aws.region(), "AWS account validated");

    Ok(AccountId(account.to_string()))
}
