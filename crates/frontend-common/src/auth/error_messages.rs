//! User-facing error text

use jiupluck_http::ClientError;

pub const LOGIN_FAILED: &str = "Login failed";
pub const SIGNUP_FAILED: &str = "Sign-up failed";
pub const VERIFICATION_FAILED: &str = "Email verification failed";
pub const REQUEST_FAILED: &str = "Request failed";

/// The server's own message when it sent one, otherwise `fallback`
///
/// Errors are not classified further: the backend owns the wording.
pub fn user_message(error: &ClientError, fallback: &str) -> String {
    error
        .message()
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map_or_else(|| fallback.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_backend_detail() {
        let error = ClientError::BadRequest("Invalid or expired code".into());
        assert_eq!(user_message(&error, LOGIN_FAILED), "Invalid or expired code");
    }

    #[test]
    fn falls_back_without_server_message() {
        let error = ClientError::Configuration("base_url is required".into());
        assert_eq!(user_message(&error, SIGNUP_FAILED), SIGNUP_FAILED);

        let blank = ClientError::BadRequest("  ".into());
        assert_eq!(user_message(&blank, REQUEST_FAILED), REQUEST_FAILED);
    }
}
