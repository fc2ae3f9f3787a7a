use tcphttp::http::headers::Headers;
use tcphttp::http::response::{Response, StatusCode, default_headers};
use tcphttp::http::writer::{ResponseWriter, WriteError, WriteState};

#[tokio::test]
async fn test_full_response_in_order() {
    let mut writer = ResponseWriter::new(Vec::new());
    let body = b"Hello World!\n";

    writer.write_status_line(StatusCode::Ok).await.unwrap();
    assert_eq!(writer.state(), WriteState::Headers);

    writer.write_headers(&default_headers(body.len())).await.unwrap();
    assert_eq!(writer.state(), WriteState::Body);

    assert_eq!(writer.write_body(body).await.unwrap(), body.len());

    let out = String::from_utf8(writer.into_inner()).unwrap();
    assert_eq!(
        out,
        "HTTP/1.1 200 OK\r\n\
         content-length: 13\r\n\
         connection: close\r\n\
         content-type: text/plain\r\n\
         \r\n\
         Hello World!\n"
    );
}

#[tokio::test]
async fn test_headers_before_status_line_is_rejected() {
    let mut writer = ResponseWriter::new(Vec::new());

    let err = writer.write_headers(&Headers::new()).await.unwrap_err();

    assert!(matches!(
        err,
        WriteError::OutOfOrder {
            attempted: WriteState::Headers,
            current: WriteState::StatusLine
        }
    ));
    assert!(writer.get_ref().is_empty());
    assert_eq!(writer.state(), WriteState::StatusLine);
}

#[tokio::test]
async fn test_second_status_line_is_rejected() {
    let mut writer = ResponseWriter::new(Vec::new());
    writer.write_status_line(StatusCode::Ok).await.unwrap();

    let err = writer
        .write_status_line(StatusCode::BadRequest)
        .await
        .unwrap_err();

    assert!(matches!(err, WriteError::OutOfOrder { .. }));
    assert_eq!(writer.into_inner(), b"HTTP/1.1 200 OK\r\n".to_vec());
}

#[tokio::test]
async fn test_body_before_headers_is_rejected() {
    let mut writer = ResponseWriter::new(Vec::new());
    writer.write_status_line(StatusCode::Ok).await.unwrap();

    assert!(writer.write_body(b"too soon").await.is_err());
    assert_eq!(writer.state(), WriteState::Headers);
}

#[tokio::test]
async fn test_headers_cannot_be_written_twice() {
    let mut writer = ResponseWriter::new(Vec::new());
    writer.write_status_line(StatusCode::Ok).await.unwrap();
    writer.write_headers(&Headers::new()).await.unwrap();

    assert!(writer.write_headers(&Headers::new()).await.is_err());
}

#[tokio::test]
async fn test_body_written_in_pieces() {
    let mut writer = ResponseWriter::new(Vec::new());
    writer.write_status_line(StatusCode::Created).await.unwrap();
    writer.write_headers(&Headers::new()).await.unwrap();

    writer.write_body(b"part one, ").await.unwrap();
    writer.write_body(b"part two").await.unwrap();

    assert_eq!(
        writer.into_inner(),
        b"HTTP/1.1 201 Created\r\n\r\npart one, part two".to_vec()
    );
}

#[tokio::test]
async fn test_unknown_status_code_reason() {
    let mut writer = ResponseWriter::new(Vec::new());
    writer.write_status_line(StatusCode::from(418)).await.unwrap();

    assert_eq!(
        writer.into_inner(),
        b"HTTP/1.1 418 Internal Server Error\r\n".to_vec()
    );
}

#[tokio::test]
async fn test_write_response() {
    let mut writer = ResponseWriter::new(Vec::new());
    writer
        .write_response(&Response::bad_request("bad request line"))
        .await
        .unwrap();

    let out = String::from_utf8(writer.into_inner()).unwrap();
    assert!(out.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    assert!(out.contains("content-length: 16\r\n"));
    assert!(out.ends_with("\r\n\r\nbad request line"));
}
