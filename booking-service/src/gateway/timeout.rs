use std::time::Duration;

use http::HeaderMap;

use super::error::GatewayError;

pub const GRPC_TIMEOUT_HEADER: &str = "grpc-timeout";

/// At most eight digits are allowed before the unit.
const MAX_TIMEOUT_DIGITS: usize = 8;

/// Reads the caller deadline from the `grpc-timeout` header.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidTimeout`] if the header is present but not a
/// valid timeout such as `100m` or `2S`.
pub fn from_headers(headers: &HeaderMap) -> Result<Option<Duration>, GatewayError> {
    let Some(value) = headers.get(GRPC_TIMEOUT_HEADER) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| {
        GatewayError::InvalidTimeout(String::from_utf8_lossy(value.as_bytes()).into_owned())
    })?;
    parse(value)
        .map(Some)
        .ok_or_else(|| GatewayError::InvalidTimeout(value.into()))
}

/// Parses a gRPC timeout value: up to eight ASCII digits followed by one of
/// `H`, `M`, `S`, `m`, `u` or `n`.
pub fn parse(value: &str) -> Option<Duration> {
    if !value.is_ascii() || value.len() < 2 || value.len() > MAX_TIMEOUT_DIGITS + 1 {
        return None;
    }
    let (digits, unit) = value.split_at(value.len() - 1);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let amount: u64 = digits.parse().ok()?;

    let duration = match unit {
        "H" => Duration::from_secs(amount * 60 * 60),
        "M" => Duration::from_secs(amount * 60),
        "S" => Duration::from_secs(amount),
        "m" => Duration::from_millis(amount),
        "u" => Duration::from_micros(amount),
        "n" => Duration::from_nanos(amount),
        _ => return None,
    };
    Some(duration)
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    #[test]
    fn units() {
        assert_eq!(parse("1H"), Some(Duration::from_secs(3600)));
        assert_eq!(parse("2M"), Some(Duration::from_secs(120)));
        assert_eq!(parse("3S"), Some(Duration::from_secs(3)));
        assert_eq!(parse("500m"), Some(Duration::from_millis(500)));
        assert_eq!(parse("10u"), Some(Duration::from_micros(10)));
        assert_eq!(parse("99999999n"), Some(Duration::from_nanos(99_999_999)));
    }

    #[test]
    fn invalid() {
        for value in ["", "S", "10", "1x", "-1S", "+1S", "1.5S", "123456789S", "1é"] {
            assert_eq!(parse(value), None, "{value}");
        }
    }

    #[test]
    fn headers() {
        let mut headers = HeaderMap::new();
        assert!(from_headers(&headers).unwrap().is_none());

        headers.insert(GRPC_TIMEOUT_HEADER, HeaderValue::from_static("250m"));
        assert_eq!(
            from_headers(&headers).unwrap(),
            Some(Duration::from_millis(250))
        );

        headers.insert(GRPC_TIMEOUT_HEADER, HeaderValue::from_static("soon"));
        assert!(matches!(
            from_headers(&headers),
            Err(GatewayError::InvalidTimeout(value)) if value == "soon"
        ));
    }
}
