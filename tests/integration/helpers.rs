//! Shared helpers: a stub HTTP backend and a CLI runner.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{mpsc, Arc, Mutex};

use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A request the stub received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    /// Path without the query string
    pub path: String,
    pub query: String,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone)]
struct Reply {
    status: u16,
    body: String,
}

/// Minimal HTTP/1.1 server answering canned JSON per `METHOD path`.
///
/// Runs on its own thread so both async tests and CLI tests can use it.
/// Unknown routes get a 404.
pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

#[derive(Default)]
pub struct StubBuilder {
    routes: HashMap<String, Reply>,
}

impl StubBuilder {
    pub fn route(mut self, method: &str, path: &str, status: u16, body: impl Into<String>) -> Self {
        self.routes.insert(
            format!("{method} {path}"),
            Reply {
                status,
                body: body.into(),
            },
        );
        self
    }

    pub fn get(self, path: &str, body: impl Into<String>) -> Self {
        self.route("GET", path, 200, body)
    }

    pub fn start(self) -> StubServer {
        let routes = Arc::new(self.routes);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("stub runtime");
            runtime.block_on(async move {
                let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
                tx.send(listener.local_addr().expect("stub addr")).expect("send addr");
                loop {
                    let Ok((stream, _)) = listener.accept().await else {
                        break;
                    };
                    let routes = Arc::clone(&routes);
                    let recorded = Arc::clone(&recorded);
                    tokio::spawn(async move {
                        let _ = serve(stream, &routes, &recorded).await;
                    });
                }
            });
        });

        let addr = rx.recv().expect("stub did not start");
        StubServer { addr, requests }
    }
}

impl StubServer {
    pub fn builder() -> StubBuilder {
        StubBuilder::default()
    }

    /// Base URL of the API, with trailing slash.
    pub fn api_url(&self) -> String {
        format!("http://{}/api/", self.addr)
    }

    pub fn media_url(&self) -> String {
        format!("http://{}/media/", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

async fn serve(
    mut stream: TcpStream,
    routes: &HashMap<String, Reply>,
    recorded: &Mutex<Vec<Recorded>>,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let headers: HashMap<String, String> = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let mut body = buf[header_end..].to_vec();
    if let Some(len) = headers.get("content-length").and_then(|v| v.parse::<usize>().ok()) {
        while body.len() < len {
            let n = stream.read(&mut chunk).await?;
            if n == 0 {
                break;
            }
            body.extend_from_slice(&chunk[..n]);
        }
    } else if headers
        .get("transfer-encoding")
        .is_some_and(|v| v.eq_ignore_ascii_case("chunked"))
    {
        while find(&body, b"0\r\n\r\n").is_none() {
            let n = stream.read(&mut chunk).await?;
            if n == 0 {
                break;
            }
            body.extend_from_slice(&chunk[..n]);
        }
    }

    let (path, query) = match target.split_once('?') {
        Some((p, q)) => (p.to_string(), q.to_string()),
        None => (target.clone(), String::new()),
    };

    let reply = routes
        .get(&format!("{method} {path}"))
        .cloned()
        .unwrap_or(Reply {
            status: 404,
            body: r#"{"detail": "Not found."}"#.to_string(),
        });

    recorded.lock().expect("requests lock").push(Recorded {
        method,
        path,
        query,
        body,
    });

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.status,
        reason(reply.status),
        reply.body.len(),
        reply.body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

fn catalog() -> serde_json::Value {
    serde_json::json!([
        {
            "id": 1,
            "title": "Morning Show",
            "video_file": "/media/videos/morning.mp4",
            "uploaded_at": "2024-05-01T10:00:00Z",
            "subtitles": []
        },
        {
            "id": 2,
            "title": "Evening News",
            "video_file": "videos/evening.mkv",
            "uploaded_at": "2024-05-02T18:30:00Z"
        }
    ])
}

/// A catalog of two videos, as the backend returns it.
pub fn videos_json() -> String {
    catalog().to_string()
}

/// Detail view of one catalog video (ids 1 and 2).
pub fn video_json(id: u64) -> String {
    catalog()[(id - 1) as usize].to_string()
}

pub fn languages_json() -> String {
    serde_json::json!([
        {"code": "eng", "name": "English"},
        {"code": "rus", "name": "Russian"}
    ])
    .to_string()
}

/// Stub with catalog, languages and a search for video 1.
pub fn catalog_stub(search_body: &str) -> StubServer {
    StubServer::builder()
        .get("/api/videos/", videos_json())
        .get("/api/videos/1/", video_json(1))
        .get("/api/videos/2/", video_json(2))
        .get("/api/videos/1/languages/", languages_json())
        .get("/api/search", search_body.to_string())
        .start()
}

/// Temp dir holding a config file pointed at `api_url`.
pub struct TestConfig {
    _dir: TempDir,
    pub path: PathBuf,
}

impl TestConfig {
    pub fn new(api_url: &str, media_url: &str, player: &str) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("config.toml");
        // Fast simulated loading unless the test picks its own step
        let step = if player.contains("load_step_ms") {
            ""
        } else {
            "load_step_ms = 1\n"
        };
        let content = format!(
            "[server]\nbase_url = \"{api_url}\"\nmedia_url = \"{media_url}\"\nrequest_timeout_secs = 5\n\n[player]\n{step}{player}\n"
        );
        std::fs::write(&path, content).expect("write config");
        Self { _dir: dir, path }
    }

    pub fn for_stub(stub: &StubServer) -> Self {
        Self::new(&stub.api_url(), &stub.media_url(), "")
    }
}

/// Run the subseek binary, returning (stdout, stderr, exit code).
pub fn run_subseek(config: Option<&Path>, args: &[&str]) -> (String, String, i32) {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_subseek"));
    if let Some(path) = config {
        cmd.arg("--config").arg(path);
    }
    let output = cmd
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("SUBSEEK_CONFIG")
        .output()
        .expect("Failed to execute subseek");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}
