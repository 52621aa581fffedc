//! Personal access token wrapper.

use super::error::CollectError;

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `CollectError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, CollectError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CollectError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the `Authorization` header value GitHub expects for a PAT.
    pub(crate) fn authorization_value(&self) -> String {
        format!("token {}", self.0)
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for PersonalAccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PersonalAccessToken").field(&"***").finish()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::PersonalAccessToken;
    use crate::github::error::CollectError;

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("   \n")]
    fn blank_tokens_are_rejected(#[case] raw: &str) {
        let error = PersonalAccessToken::new(raw).expect_err("blank token should fail");
        assert_eq!(error, CollectError::MissingToken);
    }

    #[rstest]
    fn token_is_trimmed_and_formatted() {
        let token = PersonalAccessToken::new("  ghp_abc \n").expect("token should be valid");

        assert_eq!(token.as_ref(), "ghp_abc");
        assert_eq!(token.authorization_value(), "token ghp_abc");
        assert!(!format!("{token:?}").contains("ghp_abc"));
    }
}
