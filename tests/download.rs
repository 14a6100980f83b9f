use std::path::Path;
use std::sync::Arc;

use blog_archiver::download::{DownloadOutcome, MediaDownloader};
use blog_archiver::fs::StorageLayout;
use blog_archiver::{BlogApi, Config, MediaJob};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn downloader(root: &Path) -> MediaDownloader {
    std::fs::create_dir_all(root.join("staff").join("media")).unwrap();
    let api = Arc::new(BlogApi::from_config(&Config::default()).unwrap());
    MediaDownloader::new(api, Arc::new(StorageLayout::new(root, false)), false)
}

/// Serves one response whose body stops well short of its Content-Length.
async fn truncated_body_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\n\
                  Content-Length: 1000\r\nConnection: close\r\n\r\n",
            )
            .await
            .unwrap();
        socket.write_all(&[7u8; 10]).await.unwrap();
        socket.flush().await.unwrap();
    });

    format!("http://{}/media/cut.bin", addr)
}

#[tokio::test]
async fn saves_new_media_file() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    Mock::given(method("GET"))
        .and(path("/media/new.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpeg-bytes".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let job = MediaJob::new("staff", format!("{}/media/new.jpg", server.uri())).unwrap();
    let outcome = downloader(tmp.path()).download(&job).await;

    let dest = tmp.path().join("staff/media/new.jpg");
    assert_eq!(
        outcome,
        DownloadOutcome::Saved {
            path: dest.clone(),
            bytes: 10
        }
    );
    assert_eq!(std::fs::read(dest).unwrap(), b"jpeg-bytes");
}

#[tokio::test]
async fn existing_destination_is_left_untouched() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    Mock::given(method("GET"))
        .and(path("/media/old.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"new".to_vec()))
        .expect(0)
        .mount(&server)
        .await;

    let downloader = downloader(tmp.path());
    let dest = tmp.path().join("staff/media/old.jpg");
    std::fs::write(&dest, b"original").unwrap();

    let job = MediaJob::new("staff", format!("{}/media/old.jpg", server.uri())).unwrap();
    let outcome = downloader.download(&job).await;

    assert_eq!(outcome, DownloadOutcome::AlreadyPresent { path: dest.clone() });
    assert_eq!(std::fs::read(dest).unwrap(), b"original");
}

#[tokio::test]
async fn http_error_leaves_no_file_behind() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    Mock::given(method("GET"))
        .and(path("/media/gone.gif"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let job = MediaJob::new("staff", format!("{}/media/gone.gif", server.uri())).unwrap();
    let outcome = downloader(tmp.path()).download(&job).await;

    assert!(matches!(outcome, DownloadOutcome::Failed { .. }));
    assert!(!tmp.path().join("staff/media/gone.gif").exists());
}

#[tokio::test]
async fn interrupted_body_removes_partial_file() {
    let tmp = tempfile::tempdir().unwrap();
    let url = truncated_body_server().await;

    let job = MediaJob::new("staff", url).unwrap();
    let outcome = downloader(tmp.path()).download(&job).await;

    assert!(matches!(outcome, DownloadOutcome::Failed { .. }));
    assert!(!tmp.path().join("staff/media/cut.bin").exists());
}

#[tokio::test]
async fn url_without_file_name_fails_without_writing() {
    let tmp = tempfile::tempdir().unwrap();

    let job = MediaJob::new("staff", "https://media.example.com/").unwrap();
    let outcome = downloader(tmp.path()).download(&job).await;

    assert!(matches!(outcome, DownloadOutcome::Failed { .. }));
    let entries = std::fs::read_dir(tmp.path().join("staff/media")).unwrap().count();
    assert_eq!(entries, 0);
}
