//! Loopback HTTP backend used by the async tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path including the query string
    pub path: String,
    pub body: String,
}

type Routes = Arc<Mutex<HashMap<(String, String), (u16, String)>>>;

/// Answers canned JSON per (method, path) and records every request
pub struct MockBackend {
    pub base_url: String,
    routes: Routes,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock backend");
        let addr = listener.local_addr().expect("mock address");
        let routes: Routes = Arc::new(Mutex::new(HashMap::new()));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let server_routes = routes.clone();
        let server_requests = requests.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = server_routes.clone();
                let requests = server_requests.clone();
                tokio::spawn(async move {
                    let _ = serve(stream, routes, requests).await;
                });
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            routes,
            requests,
        }
    }

    /// Register (or replace) the response for `method path`
    ///
    /// `path` may carry a query string, an exact match wins over a bare-path match.
    pub fn route(&self, method: &str, path: &str, status: u16, body: &str) {
        self.routes
            .lock()
            .expect("routes lock")
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

async fn serve(
    mut stream: TcpStream,
    routes: Routes,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
) -> std::io::Result<()> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buffer.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_header_end(&buffer) {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = header_end + 4;
    while buffer.len() < body_start + content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);
    }
    let body_end = buffer.len().min(body_start + content_length);
    let body = String::from_utf8_lossy(&buffer[body_start..body_end]).to_string();

    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();
    let bare_path = path.split('?').next().unwrap_or_default().to_string();

    requests.lock().expect("requests lock").push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        body,
    });

    let (status, payload) = {
        let routes = routes.lock().expect("routes lock");
        routes
            .get(&(method.clone(), path))
            .or_else(|| routes.get(&(method, bare_path)))
            .cloned()
            .unwrap_or((404, r#"{"message": "Not found"}"#.to_string()))
    };

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        payload.len(),
        payload
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|w| w == b"\r\n\r\n")
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

/// One transaction row as the backend serializes it
pub fn sample_row_json(id: i64, number: &str, direction: &str) -> String {
    format!(
        r#"{{"id": {id}, "transaction_number": "{number}", "date": "2024-01-01", "time": "09:30",
            "bank1": "Citi", "bank2": "HSBC", "deal_type": "Spot", "local_code_role": "TAKER",
            "direction": "{direction}", "currency1": "EUR", "currency2": "USD",
            "rate": 1.0845, "amount_base": 1000000.0, "amount_counter": 1084500.0, "pair": "EUR/USD"}}"#
    )
}
