use chrono::{DateTime, TimeDelta, Utc};
use headers::{Cookie, HeaderMapExt};
use http::header::{HeaderMap, HeaderValue};

use crate::session::errors::SessionError;
use crate::session::types::CookieParams;

const EXPIRES_FORMAT: &str = "%a, %d-%b-%Y %H:%M:%S GMT";
const DELETED_VALUE: &str = "deleted";

/// Read the value of cookie `cookie_name` from the request headers.
///
/// Missing, empty or unparsable cookies all read as `None`.
pub(crate) fn get_session_id_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let cookies = match headers.typed_try_get::<Cookie>() {
        Ok(Some(cookies)) => cookies,
        Ok(None) => {
            tracing::debug!("No cookie header found");
            return None;
        }
        Err(e) => {
            tracing::debug!("Ignoring unreadable cookie header: {}", e);
            return None;
        }
    };

    let session_id = cookies
        .get(cookie_name)
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    if session_id.is_none() {
        tracing::debug!("No session cookie '{}' found in cookies", cookie_name);
    }

    session_id
}

/// `Set-Cookie` value carrying `value`, with `max_age` anchored to `now`.
pub(crate) fn live_cookie(
    name: &str,
    value: &str,
    params: &CookieParams,
    now: DateTime<Utc>,
) -> Result<HeaderValue, SessionError> {
    let expires = if params.max_age > 0 {
        let expires = TimeDelta::try_seconds(params.max_age)
            .and_then(|max_age| now.checked_add_signed(max_age))
            .ok_or_else(|| {
                SessionError::Cookie(format!("Cookie max age {} is out of range", params.max_age))
            })?;
        Some(expires)
    } else {
        None
    };

    header_value(name, value, expires, params)
}

/// `Set-Cookie` value that makes the client drop cookie `name`.
pub(crate) fn delete_cookie(name: &str, params: &CookieParams) -> Result<HeaderValue, SessionError> {
    let expires = DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(1);
    header_value(name, DELETED_VALUE, Some(expires), params)
}

fn header_value(
    name: &str,
    value: &str,
    expires: Option<DateTime<Utc>>,
    params: &CookieParams,
) -> Result<HeaderValue, SessionError> {
    if !is_valid_cookie_name(name) {
        return Err(SessionError::Cookie(format!("Invalid cookie name: {name:?}")));
    }

    let mut cookie = format!("{name}={value}");
    if let Some(expires) = expires {
        cookie.push_str(&format!("; expires={}", expires.format(EXPIRES_FORMAT)));
    }
    if !params.path.is_empty() {
        cookie.push_str(&format!("; path={}", params.path));
    }
    if !params.domain.is_empty() {
        cookie.push_str(&format!("; domain={}", params.domain));
    }
    if params.secure {
        cookie.push_str("; secure");
    }
    if params.http_only {
        cookie.push_str("; httponly");
    }

    cookie
        .parse()
        .map_err(|_| SessionError::Cookie(format!("Failed to build cookie header: {cookie}")))
}

// RFC 6265 cookie-name: an RFC 2616 token
fn is_valid_cookie_name(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b)
        })
}
