use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use serde::Deserialize;

use crate::config::AppConfig;
use crate::error::{AuthError, FetchError};
use crate::loader::{DataSource, ExpenseSource};
use crate::records::RawPage;
use crate::session::{AuthGateway, Credentials};

/// `POST`s credentials as JSON to the login endpoint.
#[derive(Clone, Debug)]
pub struct HttpAuthGateway {
    login_url: String,
}

impl HttpAuthGateway {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            login_url: config.login_url(),
        }
    }
}

#[async_trait(?Send)]
impl AuthGateway for HttpAuthGateway {
    async fn authenticate(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let request = Request::post(&self.login_url)
            .json(credentials)
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        if response.ok() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(rejection_from_body(status, &body))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Maps a non-2xx login answer to an error. The server's `message` is shown
/// verbatim; a body without one gets the generic failure text.
pub fn rejection_from_body(status: u16, body: &str) -> AuthError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
        }) if !message.is_empty() => AuthError::Rejected(message),
        _ => AuthError::Transport(format!("login answered {} without a message", status)),
    }
}

/// Reads expense pages from the data API and the static fallback file.
#[derive(Clone, Debug)]
pub struct HttpExpenseSource {
    config: AppConfig,
}

impl HttpExpenseSource {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    fn request(&self, source: DataSource) -> RequestBuilder {
        match source {
            DataSource::Primary => Request::get(&self.config.expenses_url())
                .header("Authorization", &self.config.authorization_header()),
            DataSource::Secondary => Request::get(&self.config.card_expenses_url())
                .header("Authorization", &self.config.authorization_header()),
            DataSource::Fallback => Request::get(&self.config.fallback_url),
        }
    }
}

#[async_trait(?Send)]
impl ExpenseSource for HttpExpenseSource {
    async fn fetch(&self, source: DataSource) -> Result<RawPage, FetchError> {
        log::debug!("Fetching {:?} expenses", source);
        let response = self.request(source).send().await?;
        if !response.ok() {
            return Err(FetchError::Status(response.status()));
        }
        let body = response.text().await?;
        Ok(RawPage::from_json(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LOGIN_FAILED_MESSAGE;

    #[test]
    fn test_rejection_uses_server_message() {
        let err = rejection_from_body(401, r#"{"message":"Invalid credentials"}"#);
        assert_eq!(err, AuthError::Rejected("Invalid credentials".to_string()));
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_rejection_without_message_is_generic() {
        let err = rejection_from_body(500, r#"{"error":"boom"}"#);
        assert!(matches!(err, AuthError::Transport(_)));
        assert_eq!(err.to_string(), LOGIN_FAILED_MESSAGE);
    }

    #[test]
    fn test_rejection_with_html_body_is_generic() {
        let err = rejection_from_body(502, "<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), LOGIN_FAILED_MESSAGE);
    }

    #[test]
    fn test_rejection_with_empty_message_is_generic() {
        let err = rejection_from_body(401, r#"{"message":""}"#);
        assert!(matches!(err, AuthError::Transport(_)));
    }
}
