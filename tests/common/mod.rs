//! 集成测试用的本地 HTTP 夹具服务器。
//!
//! 每个连接只处理一个请求，响应后关闭连接；
//! 所有收到的请求都会被记录下来，供测试断言。

#![allow(dead_code)]

use std::{
    collections::HashMap,
    io,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{TcpListener, TcpStream, tcp::OwnedWriteHalf},
    task::JoinHandle,
};

/// 服务器收到的一个请求。
#[derive(Debug, Clone)]
pub struct Request {
    pub path: String,
    pub query: HashMap<String, String>,
}

impl Request {
    fn parse(target: &str) -> Self {
        let (path, raw_query) = target.split_once('?').unwrap_or((target, ""));
        let query = raw_query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                (decode(k), decode(v))
            })
            .collect();
        Self {
            path: path.to_string(),
            query,
        }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    pub fn param_u32(&self, name: &str) -> u32 {
        self.param(name).and_then(|v| v.parse().ok()).unwrap_or(0)
    }
}

fn decode(s: &str) -> String {
    urlencoding::decode(&s.replace('+', " "))
        .map(|c| c.into_owned())
        .unwrap_or_default()
}

/// 夹具服务器的应答。
pub enum Reply {
    Json(u16, String),
    /// 原样发送的 JSON 响应体，可以包含非法的 UTF-8。
    RawJson(u16, Vec<u8>),
    Audio(Vec<u8>),
    Redirect(u16, String),
    Status(u16),
    /// 不声明长度、永不结束的音频体，直到客户端断开。
    Endless,
}

type Handler = dyn Fn(&Request) -> Reply + Send + Sync;

pub struct FixtureServer {
    pub root: String,
    requests: Arc<Mutex<Vec<Request>>>,
    stream_aborted: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl FixtureServer {
    pub async fn start(handler: impl Fn(&Request) -> Reply + Send + Sync + 'static) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handler: Arc<Handler> = Arc::new(handler);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let stream_aborted = Arc::new(AtomicBool::new(false));

        let log = requests.clone();
        let aborted = stream_aborted.clone();
        let task = tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let handler = handler.clone();
                let log = log.clone();
                let aborted = aborted.clone();
                tokio::spawn(async move {
                    let _ = serve(socket, handler, log, aborted).await;
                });
            }
        });

        Self {
            root: format!("http://{addr}"),
            requests,
            stream_aborted,
            task,
        }
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Request> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    pub fn stream_aborted(&self) -> bool {
        self.stream_aborted.load(Ordering::SeqCst)
    }
}

impl Drop for FixtureServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(
    socket: TcpStream,
    handler: Arc<Handler>,
    log: Arc<Mutex<Vec<Request>>>,
    aborted: Arc<AtomicBool>,
) -> io::Result<()> {
    let (read, mut write) = socket.into_split();
    let mut reader = BufReader::new(read);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;
    loop {
        let mut header = String::new();
        let n = reader.read_line(&mut header).await?;
        if n == 0 || header == "\r\n" {
            break;
        }
    }

    let target = request_line.split_whitespace().nth(1).unwrap_or("/");
    let request = Request::parse(target);
    log.lock().unwrap().push(request.clone());

    match handler(&request) {
        Reply::Json(status, body) => {
            respond(&mut write, status, &[("Content-Type", "application/json")], body.as_bytes())
                .await
        }
        Reply::RawJson(status, body) => {
            respond(&mut write, status, &[("Content-Type", "application/json")], &body).await
        }
        Reply::Audio(bytes) => {
            respond(&mut write, 200, &[("Content-Type", "audio/mpeg")], &bytes).await
        }
        Reply::Redirect(status, location) => {
            respond(&mut write, status, &[("Location", location.as_str())], b"").await
        }
        Reply::Status(status) => respond(&mut write, status, &[], b"").await,
        Reply::Endless => {
            write
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Type: audio/mpeg\r\nConnection: close\r\n\r\n")
                .await?;
            let chunk = [0u8; 4096];
            loop {
                if write.write_all(&chunk).await.is_err() {
                    aborted.store(true, Ordering::SeqCst);
                    return Ok(());
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        }
    }
}

async fn respond(
    write: &mut OwnedWriteHalf,
    status: u16,
    headers: &[(&str, &str)],
    body: &[u8],
) -> io::Result<()> {
    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown");

    let mut head = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Length: {}\r\nConnection: close\r\n",
        body.len()
    );
    for (name, value) in headers {
        head.push_str(&format!("{name}: {value}\r\n"));
    }
    head.push_str("\r\n");

    write.write_all(head.as_bytes()).await?;
    write.write_all(body).await?;
    write.shutdown().await
}

// =================================================================
// JSON 构造辅助函数
// =================================================================

pub fn track_json(id: &str, release_id: &str, release_type: &str) -> Value {
    json!({
        "Artists": [
            { "CatalogRecordId": "c1", "Id": "a1", "Name": "Nitro Fun", "Public": true, "Role": "Primary", "URI": "nitrofun" }
        ],
        "ArtistsTitle": "Nitro Fun",
        "BPM": 174,
        "Brand": "Monstercat",
        "BrandId": 1,
        "DebutDate": "2014-06-02T00:00:00Z",
        "Duration": 240,
        "Explicit": false,
        "GenrePrimary": "Drum & Bass",
        "GenreSecondary": null,
        "Id": id,
        "Public": true,
        "Release": {
            "CatalogId": format!("MCS-{release_id}"),
            "Id": release_id,
            "Title": format!("Release {release_id}"),
            "Type": release_type
        },
        "Title": format!("Track {id}"),
        "TrackNumber": 1
    })
}

/// 生成一页搜索结果：从 `offset` 开始最多 `limit` 首，总数为 `total`。
pub fn page_json(limit: u32, offset: u32, total: u32, release_id: &str) -> String {
    let end = total.min(offset.saturating_add(limit));
    let data: Vec<Value> = (offset..end)
        .map(|i| track_json(&format!("t{i}"), release_id, "Single"))
        .collect();
    json!({ "Limit": limit, "Offset": offset, "Total": total, "Data": data }).to_string()
}

/// 按请求中的 `limit`/`offset` 返回对应的一页，模拟一个共有 `total` 首曲目的目录。
pub fn browse_reply(request: &Request, total: u32, release_id: &str) -> Reply {
    let limit = request.param_u32("limit");
    let offset = request.param_u32("offset");
    Reply::Json(200, page_json(limit, offset, total, release_id))
}
