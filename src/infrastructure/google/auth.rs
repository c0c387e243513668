//! Google OAuth2 credential provider (installed-app flow).

use anyhow::{Context, Result, anyhow};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use std::path::Path;
use tracing::info;
use yup_oauth2::authenticator::Authenticator;
use yup_oauth2::{InstalledFlowAuthenticator, InstalledFlowReturnMethod, read_application_secret};

/// Read-only scope for the Admin SDK usage-report API.
pub const USAGE_REPORTS_SCOPE: &str =
    "https://www.googleapis.com/auth/admin.reports.usage.readonly";

pub struct GoogleCredentialProvider {
    auth: Authenticator<HttpsConnector<HttpConnector>>,
}

impl GoogleCredentialProvider {
    /// Build the provider from the OAuth client secret file.
    ///
    /// When `token_file` holds no usable token yet, the first token request
    /// runs the one-time interactive authorization flow on the terminal and
    /// the obtained token is written back to `token_file`. Later refreshes
    /// are transparent.
    pub async fn from_files(credentials_file: &Path, token_file: &Path) -> Result<Self> {
        let secret = read_application_secret(credentials_file)
            .await
            .with_context(|| {
                format!(
                    "Failed to read OAuth client secret file {}",
                    credentials_file.display()
                )
            })?;

        let auth =
            InstalledFlowAuthenticator::builder(secret, InstalledFlowReturnMethod::Interactive)
                .persist_tokens_to_disk(token_file.to_path_buf())
                .build()
                .await
                .context("Failed to build Google authenticator")?;

        info!(
            "Google credential provider ready (token cache: {})",
            token_file.display()
        );

        Ok(Self { auth })
    }

    /// A bearer token valid for the usage-report scope.
    pub async fn access_token(&self) -> Result<String> {
        let token = self
            .auth
            .token(&[USAGE_REPORTS_SCOPE])
            .await
            .context("Failed to obtain Google access token")?;

        token
            .token()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("authorization produced no access token"))
    }
}
