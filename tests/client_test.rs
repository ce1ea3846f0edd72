//! NNTP client session tests against the in-memory server

mod support;

use gmane_rescue::{NntpClient, NntpError, ServerConfig};
use std::sync::Arc;
use support::FakeServer;

#[tokio::test]
async fn test_select_group_reports_range() {
    let server = FakeServer::new()
        .with_article("gmane.emacs.orgmode", 5134, "<a@b>", &[])
        .with_article("gmane.emacs.orgmode", 5140, "<c@d>", &[]);
    let (mut client, _log) = server.connect(ServerConfig::gmane()).await;

    let info = client.select_group("gmane.emacs.orgmode").await.unwrap();
    assert_eq!(info.count, 2);
    assert_eq!(info.first, 5134);
    assert_eq!(info.last, 5140);
    assert_eq!(info.name, "gmane.emacs.orgmode");
}

#[tokio::test]
async fn test_stat_without_group() {
    let server = FakeServer::new().with_article("gmane.emacs.orgmode", 5134, "<a@b>", &[]);
    let (mut client, _log) = server.connect(ServerConfig::gmane()).await;

    let err = client.stat("5134").await.unwrap_err();
    assert!(matches!(err, NntpError::NoGroupSelected));
}

#[tokio::test]
async fn test_stat_with_response_keeps_status_line() {
    let server = FakeServer::new().with_article("gmane.emacs.orgmode", 5134, "<a@b>", &[]);
    let (mut client, _log) = server.connect(ServerConfig::gmane()).await;

    client.select_group("gmane.emacs.orgmode").await.unwrap();
    let (info, response) = client.stat_with_response("5134").await.unwrap();
    assert_eq!(info.number, 5134);
    assert_eq!(info.message_id, "<a@b>");
    assert_eq!(response.status_line(), "223 5134 <a@b> status");
}

#[tokio::test]
async fn test_article_dot_unstuffing() {
    let server = FakeServer::new().with_article(
        "gmane.test",
        1,
        "<dots@example.org>",
        &[".", "..", ".leading", "plain"],
    );
    let (mut client, _log) = server.connect(ServerConfig::gmane()).await;

    client.select_group("gmane.test").await.unwrap();
    let article = client.fetch_article("1").await.unwrap();
    assert_eq!(article.number, 1);
    assert_eq!(article.message_id, "<dots@example.org>");
    assert_eq!(article.lines, vec![".", "..", ".leading", "plain"]);
}

#[tokio::test]
async fn test_open_authenticates_and_enters_reader_mode() {
    let server = FakeServer::new()
        .with_group("gmane.test")
        .with_credentials("alice", "secret");
    let (io, log) = server.spawn();

    let mut config = ServerConfig::gmane().with_credentials("alice", "secret");
    config.reader_mode = true;

    let mut client = NntpClient::from_stream(io, Arc::new(config)).await.unwrap();
    client.prepare().await.unwrap();

    assert!(client.is_authenticated());
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "AUTHINFO USER alice".to_string(),
            "AUTHINFO PASS secret".to_string(),
            "MODE READER".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_anonymous_prepare_sends_nothing() {
    let (mut client, log) = FakeServer::new().connect(ServerConfig::gmane()).await;

    client.prepare().await.unwrap();
    assert!(!client.is_authenticated());
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_wrong_password() {
    let server = FakeServer::new().with_credentials("alice", "secret");
    let config = ServerConfig::gmane().with_credentials("alice", "wrong");
    let (mut client, _log) = server.connect(config).await;

    let err = client.authenticate().await.unwrap_err();
    assert!(matches!(err, NntpError::AuthFailed(_)));
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_quit_closes_session() {
    let server = FakeServer::new().with_group("gmane.test");
    let (mut client, log) = server.connect(ServerConfig::gmane()).await;

    client.select_group("gmane.test").await.unwrap();
    client.quit().await.unwrap();
    assert!(client.is_closed());
    assert!(client.current_group().is_none());

    // Second QUIT must not touch the (now closed) connection
    client.quit().await.unwrap();
    assert_eq!(log.lock().unwrap().last().map(String::as_str), Some("QUIT"));
}

#[tokio::test]
async fn test_connection_closed_mid_session() {
    let (io, mut server_io) = tokio::io::duplex(1024);
    tokio::spawn(async move {
        use tokio::io::AsyncWriteExt;
        server_io.write_all(b"200 ready\r\n").await.unwrap();
        // Dropping the server end closes the connection
    });

    let mut client = NntpClient::from_stream(io, Arc::new(ServerConfig::gmane()))
        .await
        .unwrap();
    let err = client.select_group("gmane.test").await.unwrap_err();
    assert!(
        matches!(err, NntpError::ConnectionClosed | NntpError::Io(_)),
        "{:?}",
        err
    );
}

#[tokio::test]
async fn test_garbage_marks_connection_broken() {
    let (io, mut server_io) = tokio::io::duplex(1024);
    tokio::spawn(async move {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        server_io.write_all(b"200 ready\r\n").await.unwrap();
        let mut buf = [0u8; 64];
        let _ = server_io.read(&mut buf).await;
        server_io.write_all(b"HTTP/1.1 400 Bad Request\r\n").await.unwrap();
        let _ = server_io.read(&mut buf).await;
    });

    let mut client = NntpClient::from_stream(io, Arc::new(ServerConfig::gmane()))
        .await
        .unwrap();
    let err = client.select_group("gmane.test").await.unwrap_err();
    assert!(matches!(err, NntpError::InvalidResponse(_)));
    assert!(client.is_broken());
}

#[tokio::test]
async fn test_bad_greeting_is_rejected() {
    let server = FakeServer::new().with_greeting("400 service temporarily unavailable");
    let (io, _log) = server.spawn();

    let result = NntpClient::from_stream(io, Arc::new(ServerConfig::gmane())).await;
    assert!(matches!(result, Err(NntpError::Protocol { code: 400, .. })));
}
