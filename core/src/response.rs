//! Status-code interpretation for every API response.
//!
//! 2xx and 3xx pass through untouched. 429 becomes `RateLimited` with the
//! reset instant from `X-RateLimit-Reset` (milliseconds since the epoch,
//! rounded down to the second, plus one). Any other status is an error
//! carrying the vendor message when the body has one.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::codec::{json_error_fields, xml_error_fields, Format};
use crate::error::ApiError;
use crate::http::HttpResponse;

pub const RATE_LIMIT_RESET_HEADER: &str = "X-RateLimit-Reset";

pub fn check_response(format: Format, response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }

    let status = response.status;
    if status == 429 {
        let reset = rate_limit_reset(&response);
        warn!(%reset, "rate limited");
        return Err(ApiError::RateLimited { reset });
    }

    let (code, message) = match format {
        Format::Json => json_error_fields(&response.body).unwrap_or_default(),
        Format::Xml => xml_error_fields(&response.body),
    };
    let code = code.filter(|c| !c.is_empty());
    let message = message.filter(|m| !m.is_empty());
    warn!(status, code = code.as_deref().unwrap_or(""), "error response");

    match message.or_else(|| code.clone()) {
        Some(message) => Err(ApiError::Vendor { status, code, message }),
        None => Err(ApiError::Http { status }),
    }
}

pub fn rate_limit_reset(response: &HttpResponse) -> DateTime<Utc> {
    let reset_ms: i64 = response
        .header(RATE_LIMIT_RESET_HEADER)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0);
    DateTime::from_timestamp(reset_ms / 1000 + 1, 0).unwrap_or_default()
}
