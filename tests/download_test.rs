use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use mockito::Matcher;
use page_fetcher::download::download_page;
use page_fetcher::PageError;
use reqwest::blocking::Client;
use reqwest::StatusCode;

fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/1.png", port)
}

#[test]
fn test_ok_body_written_byte_for_byte() {
    let body: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", Matcher::Regex(r"^/1\.png".to_string()))
        .with_status(200)
        .with_body(body.clone())
        .create();

    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("1.png");
    let url = format!("{}/1.png?token=T", server.url());

    let written = download_page(&Client::new(), &url, &path).unwrap();

    mock.assert();
    assert_eq!(written, body.len() as u64);
    assert_eq!(fs::read(&path).unwrap(), body);
}

#[test]
fn test_ok_overwrites_existing_file() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", Matcher::Regex(r"^/2\.png".to_string()))
        .with_status(200)
        .with_body("new")
        .create();

    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("2.png");
    fs::write(&path, b"a much longer stale body").unwrap();

    let url = format!("{}/2.png?token=T", server.url());
    download_page(&Client::new(), &url, &path).unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"new");
}

#[test]
fn test_not_found_writes_nothing() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", Matcher::Regex(r"^/4\.png".to_string()))
        .with_status(404)
        .with_body("missing")
        .create();

    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("4.png");
    let url = format!("{}/4.png?token=T", server.url());

    let err = download_page(&Client::new(), &url, &path).unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(err.to_string(), "Status code: 404");
    assert!(!path.exists());
}

#[test]
fn test_error_status_leaves_existing_file_alone() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", Matcher::Regex(r"^/5\.png".to_string()))
        .with_status(500)
        .create();

    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("5.png");
    fs::write(&path, b"from an earlier run").unwrap();

    let url = format!("{}/5.png?token=T", server.url());
    let err = download_page(&Client::new(), &url, &path).unwrap_err();

    assert!(matches!(err, PageError::Status(_)));
    assert_eq!(fs::read(&path).unwrap(), b"from an earlier run");
}

#[test]
fn test_other_success_status_is_not_saved() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", Matcher::Regex(r"^/6\.png".to_string()))
        .with_status(204)
        .create();

    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("6.png");
    let url = format!("{}/6.png?token=T", server.url());

    let err = download_page(&Client::new(), &url, &path).unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NO_CONTENT));
    assert!(!path.exists());
}

#[test]
fn test_connection_refused_is_transport_error() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("1.png");

    let err = download_page(&Client::new(), &closed_port_url(), &path).unwrap_err();

    assert!(matches!(err, PageError::Transport(_)));
    assert!(err.status().is_none());
    assert!(!path.exists());
}

#[test]
fn test_truncated_body_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/7.png?token=T", listener.local_addr().unwrap());

    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = [0u8; 1024];
        let mut head = Vec::new();
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        stream
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\nabc")
            .unwrap();
    });

    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("7.png");

    let err = download_page(&Client::new(), &url, &path).unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, PageError::Transport(_)));
}
