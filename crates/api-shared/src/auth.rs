use subtle::ConstantTimeEq;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingHeader,
    #[error("invalid Authorization header format")]
    MalformedHeader,
    #[error("invalid Bearer token")]
    InvalidToken,
}

/// Message returned to callers for any authentication failure.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized. Invalid or missing Bearer token.";

/// Validates an `Authorization` header value against the configured secret token.
///
/// When no token is configured the check passes, which is only meant for local testing. The
/// header must be exactly `<scheme> <token>` with a case-insensitive `Bearer` scheme, and the
/// token is compared in constant time.
pub fn validate_bearer_token(header: Option<&str>, expected: Option<&str>) -> Result<(), AuthError> {
    let Some(expected) = expected.filter(|t| !t.is_empty()) else {
        tracing::debug!("no secret token configured, skipping auth check");
        return Ok(());
    };

    let header = header
        .filter(|h| !h.is_empty())
        .ok_or(AuthError::MissingHeader)?;

    let mut parts = header.split(' ');
    let (Some(scheme), Some(token), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AuthError::MalformedHeader);
    };
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthError::MalformedHeader);
    }

    if bool::from(token.as_bytes().ct_eq(expected.as_bytes())) {
        Ok(())
    } else {
        Err(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: Option<&str> = Some("s3cret");

    #[test]
    fn test_no_configured_token_allows_everything() {
        assert_eq!(validate_bearer_token(None, None), Ok(()));
        assert_eq!(validate_bearer_token(Some("garbage"), Some("")), Ok(()));
    }

    #[test]
    fn test_valid_token() {
        assert_eq!(validate_bearer_token(Some("Bearer s3cret"), TOKEN), Ok(()));
        assert_eq!(validate_bearer_token(Some("bearer s3cret"), TOKEN), Ok(()));
        assert_eq!(validate_bearer_token(Some("BEARER s3cret"), TOKEN), Ok(()));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(
            validate_bearer_token(None, TOKEN),
            Err(AuthError::MissingHeader)
        );
        assert_eq!(
            validate_bearer_token(Some(""), TOKEN),
            Err(AuthError::MissingHeader)
        );
    }

    #[test]
    fn test_malformed_header() {
        for header in ["s3cret", "Basic s3cret", "Bearer  s3cret", "Bearer s3cret extra"] {
            assert_eq!(
                validate_bearer_token(Some(header), TOKEN),
                Err(AuthError::MalformedHeader),
                "{header:?}"
            );
        }
    }

    #[test]
    fn test_wrong_token() {
        assert_eq!(
            validate_bearer_token(Some("Bearer s3cre"), TOKEN),
            Err(AuthError::InvalidToken)
        );
        assert_eq!(
            validate_bearer_token(Some("Bearer S3CRET"), TOKEN),
            Err(AuthError::InvalidToken)
        );
    }
}
