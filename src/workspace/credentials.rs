//! API credential expiry check

use chrono::{DateTime, Duration, FixedOffset, Utc};
use log::Level;

use crate::client::CredentialsApi;
use crate::error::Result;
use crate::logging::{EventLog, clean};

/// Warn when the credentials expire in less than this many days
pub const EXPIRY_WARNING_DAYS: i64 = 7;

const FUNCTION: &str = "check_credential_expiry";

/// True when less than [`EXPIRY_WARNING_DAYS`] remain before `expiration`.
pub fn expires_soon(expiration: &DateTime<FixedOffset>, now: DateTime<Utc>) -> bool {
    expiration.signed_duration_since(now) < Duration::days(EXPIRY_WARNING_DAYS)
}

/// Fetch the current credentials and warn if they are about to expire.
///
/// Returns whether a warning was issued.
pub async fn check_credential_expiry<C>(client: &C, log: &EventLog, now: DateTime<Utc>) -> Result<bool>
where
    C: CredentialsApi + ?Sized,
{
    let credentials = client.get_api_credentials().await?;
    let expiration = credentials.expiration_ts;

    if !expires_soon(&expiration, now) {
        log.debug(
            FUNCTION,
            &format!(
                "API credentials {} valid until {}",
                clean(&credentials.api_id),
                expiration.to_rfc3339()
            ),
        );
        return Ok(false);
    }

    let message = if expiration <= now {
        format!("These API credentials expired {}", expiration.to_rfc3339())
    } else {
        format!("These API credentials expire {}", expiration.to_rfc3339())
    };
    log.announce(Level::Warn, FUNCTION, &message);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockVeracodeClient;
    use crate::client::fixtures::credentials_expiring;
    use crate::logging::capture::event_log;

    fn at(remaining: Duration) -> (DateTime<Utc>, DateTime<FixedOffset>) {
        let now = Utc::now();
        (now, credentials_expiring(now, remaining).expiration_ts)
    }

    #[test]
    fn test_exactly_seven_days_does_not_warn() {
        let (now, expiration) = at(Duration::days(7));
        assert!(!expires_soon(&expiration, now));
    }

    #[test]
    fn test_just_under_seven_days_warns() {
        let (now, expiration) = at(Duration::days(6) + Duration::hours(23));
        assert!(expires_soon(&expiration, now));
    }

    #[test]
    fn test_expired_credentials_warn() {
        let (now, expiration) = at(Duration::hours(-1));
        assert!(expires_soon(&expiration, now));
    }

    #[tokio::test]
    async fn test_warning_is_logged() {
        let now = Utc::now();
        let client = MockVeracodeClient::new().with_credentials(credentials_expiring(
            now,
            Duration::days(2),
        ));
        let (log, buffer) = event_log(false);

        let warned = check_credential_expiry(&client, &log, now).await.unwrap();

        assert!(warned);
        assert!(
            buffer
                .contents()
                .contains("WARN - check_credential_expiry - These API credentials expire ")
        );
    }

    #[tokio::test]
    async fn test_no_warning_far_from_expiry() {
        let now = Utc::now();
        let client = MockVeracodeClient::new().with_credentials(credentials_expiring(
            now,
            Duration::days(90),
        ));
        let (log, buffer) = event_log(false);

        let warned = check_credential_expiry(&client, &log, now).await.unwrap();

        assert!(!warned);
        assert!(buffer.contents().is_empty());
    }

    #[tokio::test]
    async fn test_debug_line_names_key() {
        let now = Utc::now();
        let client = MockVeracodeClient::new().with_credentials(credentials_expiring(
            now,
            Duration::days(30),
        ));
        let (log, buffer) = event_log(true);

        check_credential_expiry(&client, &log, now).await.unwrap();

        assert!(
            buffer
                .contents()
                .contains("DEBUG - check_credential_expiry - API credentials 3f2a1b valid until ")
        );
    }

    #[tokio::test]
    async fn test_credentials_failure_propagates() {
        let client =
            MockVeracodeClient::new().with_error(crate::error::ApiError::Unauthorized);
        let (log, _buffer) = event_log(false);

        assert!(check_credential_expiry(&client, &log, Utc::now()).await.is_err());
    }
}
