use std::path::Path;

use data_cache::QueryCache;
use data_character::HttpCharacterClient;
use fs_preferences::PreferenceStore;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::context::Context;

pub(crate) const CHARACTERS: &str = r#"[
    {"name": "Harry Potter", "house": "Gryffindor", "hogwartsStudent": true, "alive": true},
    {"name": "Minerva McGonagall", "house": "Gryffindor", "hogwartsStaff": true, "alive": true},
    {"name": "Draco Malfoy", "house": "Slytherin", "hogwartsStudent": true, "alive": true}
]"#;

/// Serve canned JSON bodies on a local port, keyed by the path below
/// `/api`. Unknown paths answer 404. Returns the base url.
pub(crate) async fn serve(routes: &[(&'static str, &'static str)]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = routes.to_vec();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap_or(0);
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let request = String::from_utf8_lossy(&request);
            let path = request.split_whitespace().nth(1).unwrap_or_default();
            let (status, body) = routes
                .iter()
                .find(|(route, _)| path == format!("/api{}", route))
                .map(|(_, body)| ("200 OK", *body))
                .unwrap_or(("404 Not Found", "[]"));

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}/api", addr)
}

pub(crate) fn context(base_url: &str, data_dir: &Path, json: bool) -> Context {
    Context {
        cache: QueryCache::new(HttpCharacterClient::new(base_url).unwrap()),
        preferences: PreferenceStore::open(data_dir),
        json,
    }
}
