use tcphttp::http::error::{ErrorKind, ParseError};
use tcphttp::http::headers::Headers;

#[test]
fn test_valid_single_header() {
    let mut headers = Headers::new();
    let data = b"Host: localhost:42069\r\n\r\n";
    let (n, done) = headers.parse(data).unwrap();

    assert_eq!(headers.get("host"), Some("localhost:42069"));
    // The field line is 23 bytes; the blank line adds its own CRLF.
    assert_eq!(n, 25);
    assert!(done);
}

#[test]
fn test_non_utf8_value_is_accepted() {
    let mut headers = Headers::new();
    let data = b"X-Name: caf\xe9\r\nHost: x\r\n\r\n";
    let (n, done) = headers.parse(data).unwrap();

    assert_eq!(n, data.len());
    assert!(done);
    assert_eq!(headers.get("x-name"), Some("caf\u{fffd}"));
    assert_eq!(headers.get("host"), Some("x"));
}

#[test]
fn test_invalid_spacing_header() {
    let mut headers = Headers::new();
    let data = b"       Host : localhost:42069       \r\n\r\n";
    let err = headers.parse(data).unwrap_err();

    assert!(matches!(err, ParseError::InvalidHeaderName(ref name) if name == "Host "));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_leading_whitespace_and_repeated_header() {
    let mut headers = Headers::new();
    let data = b"       Host:localhost:42069       \r\nHost:localhost:42019\r\n\r\n";
    let (n, done) = headers.parse(data).unwrap();

    assert_eq!(headers.get("host"), Some("localhost:42069, localhost:42019"));
    assert_eq!(n, data.len());
    assert!(done);
}

#[test]
fn test_non_ascii_header_name() {
    let mut headers = Headers::new();
    let data = "H\u{a9}st: localhost:42069\r\n\r\n".as_bytes();

    assert!(matches!(
        headers.parse(data),
        Err(ParseError::InvalidHeaderName(_))
    ));
    assert!(headers.is_empty());
}

#[test]
fn test_missing_colon() {
    let mut headers = Headers::new();

    assert!(matches!(
        headers.parse(b"NoColonHere\r\n\r\n"),
        Err(ParseError::InvalidHeaderLine)
    ));
}

#[test]
fn test_valid_header_with_existing_headers() {
    let mut headers = Headers::new();
    headers.set("Accept", "*/*");

    let (n, done) = headers.parse(b"User-Agent: curl/7.81.0\r\n").unwrap();

    assert_eq!(n, 25);
    assert!(!done);
    assert_eq!(headers.get("accept"), Some("*/*"));
    assert_eq!(headers.get("user-agent"), Some("curl/7.81.0"));
}

#[test]
fn test_missing_end_of_headers() {
    let mut headers = Headers::new();
    let data = b"Host: localhost:42069\r\nAccept: */*";
    let (n, done) = headers.parse(data).unwrap();

    assert_eq!(n, 23);
    assert!(!done);

    let (n, done) = headers.parse(b"Accept: */*\r\n\r\n").unwrap();
    assert_eq!(n, 15);
    assert!(done);
    assert_eq!(headers.len(), 2);
}

#[test]
fn test_value_whitespace_is_trimmed() {
    let mut headers = Headers::new();
    headers.parse(b"X-Pad: \t spaced out \t\r\n\r\n").unwrap();

    assert_eq!(headers.get("x-pad"), Some("spaced out"));
}

#[test]
fn test_lookup_ignores_case() {
    let mut headers = Headers::new();
    headers.set("Content-Type", "text/html");

    assert_eq!(headers.get("CONTENT-TYPE"), Some("text/html"));
    assert!(headers.contains("content-type"));
}

#[test]
fn test_replace_overwrites() {
    let mut headers = Headers::new();
    headers.set("Content-Type", "text/plain");
    headers.set("Content-Type", "charset=utf-8");
    assert_eq!(headers.get("content-type"), Some("text/plain, charset=utf-8"));

    headers.replace("content-type", "text/html");
    assert_eq!(headers.get("Content-Type"), Some("text/html"));
    assert_eq!(headers.len(), 1);
}

#[test]
fn test_iteration_follows_insertion_order() {
    let mut headers = Headers::new();
    headers.set("Zeta", "1");
    headers.set("Alpha", "2");
    headers.set("Mid", "3");
    headers.set("zeta", "4");

    let names: Vec<&str> = headers.iter().map(|(k, _)| k).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    assert_eq!(headers.remove("ALPHA"), Some("2".to_string()));
    assert_eq!(headers.len(), 2);
}
