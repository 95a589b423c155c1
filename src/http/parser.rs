use crate::http::request::{Method, Request};
use std::collections::HashMap;

/// Upper bound on the request line plus headers.
pub const MAX_HEADER_BYTES: usize = 64 * 1024;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    InvalidRequest,
    InvalidMethod,
    InvalidHeader,
    InvalidContentLength,
    HeadersTooLarge,
    Incomplete,
}

pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {

    // Look for header/body separator
    let headers_end = match find_headers_end(buf) {
        Some(end) => end,
        None if buf.len() > MAX_HEADER_BYTES => return Err(ParseError::HeadersTooLarge),
        None => return Err(ParseError::Incomplete),
    };
    if headers_end > MAX_HEADER_BYTES {
        return Err(ParseError::HeadersTooLarge);
    }
    let header_bytes = &buf[..headers_end];
    let body_bytes = &buf[headers_end + 4..];

    let headers_str = std::str::from_utf8(header_bytes)
        .map_err(|_| ParseError::InvalidRequest)?;

    let mut lines = headers_str.split("\r\n");

    // Request line
    let request_line = lines.next().ok_or(ParseError::InvalidRequest);
    let mut parts = request_line?.split_whitespace();

    let method_str = parts.next().ok_or(ParseError::InvalidRequest)?;
    let path = parts.next().ok_or(ParseError::InvalidRequest)?;
    let version = parts.next().ok_or(ParseError::InvalidRequest)?;

    if !version.starts_with("HTTP/") {
        return Err(ParseError::InvalidRequest);
    }

    let method = Method::from_str(method_str).ok_or(ParseError::InvalidMethod)?;

    // Headers
    let mut headers = HashMap::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }

        let (key, value) = line
            .split_once(':')
            .ok_or(ParseError::InvalidHeader)?;

        headers.insert(
           key.trim().to_string(),
           value.trim().to_string(),
        );
    }

    // Body
    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("Content-Length"))
        .map(|(_, v)| v.parse::<usize>().map_err(|_| ParseError::InvalidContentLength))
        .transpose()?
        .unwrap_or(0);

    if body_bytes.len() < content_length {
        return Err(ParseError::Incomplete);
    }

    let body = body_bytes[..content_length].to_vec();

    let request = Request {
        method,
        path: path.to_string(),
        version: version.to_string(),
        headers,
        body,
    };

    let total_consumed = headers_end + 4 + content_length;
    Ok((request, total_consumed))

}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let (parsed, consumed) = parse_http_request(req).unwrap();

        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.headers.get("Host").unwrap(), "example.com");
        assert_eq!(consumed, req.len());
    }

    #[test]
    fn oversized_headers_are_rejected() {
        let mut req = b"GET / HTTP/1.1\r\nX-Fill: ".to_vec();
        req.resize(MAX_HEADER_BYTES + 1, b'a');

        assert_eq!(
            parse_http_request(&req).unwrap_err(),
            ParseError::HeadersTooLarge
        );
    }

    #[test]
    fn oversized_headers_with_terminator_are_rejected() {
        let mut req = b"GET / HTTP/1.1\r\nX-Fill: ".to_vec();
        req.resize(2 * MAX_HEADER_BYTES, b'a');
        req.extend_from_slice(b"\r\n\r\n");

        assert_eq!(
            parse_http_request(&req).unwrap_err(),
            ParseError::HeadersTooLarge
        );
    }

    #[test]
    fn headers_at_the_limit_are_accepted() {
        let mut req = b"GET / HTTP/1.1\r\nX-Fill: ".to_vec();
        req.resize(MAX_HEADER_BYTES, b'a');
        req.extend_from_slice(b"\r\n\r\n");

        assert!(parse_http_request(&req).is_ok());
    }
}
