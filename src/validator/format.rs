//! Format & content validators (component G, spec.md §6, §9).
//!
//! Unknown `format` names accept any string -- spec.md §6 is explicit that the
//! recognized-format list is the only one enforced, everything else is a no-op.
//! `draft3-hostname`/`hostname` and `ip-address`/`ipv4` share a checker per spec.md §9's
//! note that the source's two regexes for each pair were identical.

use base64::Engine as _;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

lazy_static! {
    static ref HOSTNAME_RE: Regex = Regex::new(
        r"(?i)^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?(\.[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?)*$"
    )
    .expect("hostname regex is valid");
    static ref EMAIL_RE: Regex = Regex::new(
        r"(?i)^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?(\.[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?)+$"
    )
    .expect("email regex is valid");
    static ref URI_TEMPLATE_RE: Regex =
        Regex::new(r"^([^{}]|\{[^{}]*\})*$").expect("uri-template regex is valid");
    static ref JSON_POINTER_RE: Regex =
        Regex::new(r"^(/([^~/]|~0|~1)*)*$").expect("json-pointer regex is valid");
    static ref RELATIVE_JSON_POINTER_RE: Regex =
        Regex::new(r"^(0|[1-9][0-9]*)(#|(/([^~/]|~0|~1)*)*)$")
            .expect("relative-json-pointer regex is valid");
    static ref TIME_RE: Regex = Regex::new(
        r"(?i)^([01][0-9]|2[0-3]):[0-5][0-9]:[0-5][0-9](\.[0-9]+)?(z|[+-][0-9]{2}:[0-9]{2})$"
    )
    .expect("time regex is valid");
    static ref COLOR_RE: Regex =
        Regex::new(r"(?i)^(#[0-9a-f]{3}([0-9a-f]{3})?|[a-z]+)$").expect("color regex is valid");
    static ref UTC_MILLISEC_RE: Regex =
        Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("utc-millisec regex is valid");
}

/// `true` if `value` satisfies the named format. Names outside the recognized set
/// (spec.md §6) always accept.
#[must_use]
pub(super) fn matches(format_name: &str, value: &str) -> bool {
    match format_name {
        "hostname" | "host-name" | "idn-hostname" => HOSTNAME_RE.is_match(value),
        "email" | "idn-email" => EMAIL_RE.is_match(value),
        "ipv4" | "ip-address" => Ipv4Addr::from_str(value).is_ok(),
        "ipv6" => Ipv6Addr::from_str(value).is_ok(),
        "uri" => url::Url::parse(value).is_ok(),
        "uri-reference" | "iri" | "iri-reference" => is_uri_reference(value),
        "uri-template" => URI_TEMPLATE_RE.is_match(value),
        "json-pointer" => JSON_POINTER_RE.is_match(value),
        "relative-json-pointer" => RELATIVE_JSON_POINTER_RE.is_match(value),
        "date" => NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok(),
        "time" => TIME_RE.is_match(value),
        "date-time" => is_date_time(value),
        "utc-millisec" => UTC_MILLISEC_RE.is_match(value),
        "regex" => Regex::new(value).is_ok(),
        "color" => COLOR_RE.is_match(value),
        _ => true,
    }
}

fn is_uri_reference(value: &str) -> bool {
    if url::Url::parse(value).is_ok() {
        return true;
    }
    // Not an absolute URI on its own -- accept it if it resolves as a reference
    // relative to an arbitrary base, which is how `uri-reference`/`iri-reference`
    // differ from `uri`/`iri`.
    url::Url::parse("http://localhost/")
        .and_then(|base| base.join(value))
        .is_ok()
}

fn is_date_time(value: &str) -> bool {
    let separator = match value.find(|c: char| c == 'T' || c == 't') {
        Some(index) => index,
        None => return false,
    };
    let (date_part, time_part) = value.split_at(separator);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").is_ok() && TIME_RE.is_match(&time_part[1..])
}

/// `true` if `value` satisfies the schema's `contentEncoding`/`contentMediaType`
/// combination. A keyword that is absent is treated as automatically satisfied.
#[must_use]
pub(super) fn validate_content(encoding: Option<&str>, media_type: Option<&str>, value: &str) -> bool {
    let decoded = match encoding {
        Some("base64") => {
            let bytes = match base64::engine::general_purpose::STANDARD.decode(value) {
                Ok(bytes) => bytes,
                Err(_) => return false,
            };
            match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(_) => return false,
            }
        }
        Some(_) | None => value.to_string(),
    };

    match media_type {
        Some("application/json") => serde_json::from_str::<serde_json::Value>(&decoded).is_ok(),
        Some(_) | None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::{matches, validate_content};
    use test_case::test_case;

    #[test_case("hostname", "example.com" => true)]
    #[test_case("hostname", "not a hostname!" => false)]
    #[test_case("host-name", "example.com" => true; "host-name is the draft3 alias of hostname")]
    #[test_case("ipv4", "127.0.0.1" => true)]
    #[test_case("ipv4", "999.0.0.1" => false)]
    #[test_case("ip-address", "127.0.0.1" => true; "ip-address is the draft3 alias of ipv4")]
    #[test_case("ipv6", "::1" => true)]
    #[test_case("ipv6", "127.0.0.1" => false)]
    #[test_case("email", "user@example.com" => true)]
    #[test_case("email", "not-an-email" => false)]
    #[test_case("uri", "https://example.com/path" => true)]
    #[test_case("uri", "not a uri" => false)]
    #[test_case("uri-reference", "/relative/path" => true)]
    #[test_case("json-pointer", "/a/b" => true)]
    #[test_case("json-pointer", "no-leading-slash" => false)]
    #[test_case("date", "2021-01-01" => true)]
    #[test_case("date", "2021-13-01" => false)]
    #[test_case("time", "12:34:56Z" => true)]
    #[test_case("time", "25:00:00Z" => false)]
    #[test_case("date-time", "2021-01-01T12:34:56Z" => true)]
    #[test_case("date-time", "2021-01-01" => false)]
    #[test_case("utc-millisec", "1609459200" => true)]
    #[test_case("regex", "^[a-z]+$" => true)]
    #[test_case("regex", "^[a-z+$" => false)]
    #[test_case("color", "#fff" => true)]
    #[test_case("color", "red" => true)]
    #[test_case("totally-unknown-format-name", "anything at all" => true)]
    fn test_matches(format_name: &str, value: &str) -> bool {
        matches(format_name, value)
    }

    #[test_case(Some("base64"), None, "aGVsbG8=" => true)]
    #[test_case(Some("base64"), None, "not base64!!" => false)]
    #[test_case(None, Some("application/json"), r#"{"a": 1}"# => true)]
    #[test_case(None, Some("application/json"), "not json" => false)]
    #[test_case(Some("base64"), Some("application/json"), "eyJhIjogMX0=" => true; "base64 encoded json")]
    #[test_case(None, None, "anything" => true)]
    fn test_validate_content(encoding: Option<&str>, media_type: Option<&str>, value: &str) -> bool {
        validate_content(encoding, media_type, value)
    }
}
