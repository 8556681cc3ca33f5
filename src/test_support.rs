//! 测试辅助：内存抓取器 + 一次性本地 HTTP 服务

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

use crate::error::{FavResult, FavhashError};
use crate::transport::{FetchResponse, Fetcher, ProbeMethod};

#[derive(Debug, Clone)]
enum MockRoute {
    Respond {
        status: u16,
        headers: HashMap<String, String>,
        body: Vec<u8>,
    },
    Fail,
    Misconfigured,
}

/// URL → 预置响应；未登记的 URL 返回 404 text/html
#[derive(Debug, Default)]
pub(crate) struct MockFetcher {
    routes: HashMap<String, MockRoute>,
    log: Mutex<Vec<(ProbeMethod, String)>>,
}

impl MockFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, url: &str, status: u16, headers: &[(&str, &str)], body: &[u8]) -> Self {
        let headers = headers
            .iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
            .collect();
        self.routes.insert(
            normalize(url),
            MockRoute::Respond {
                status,
                headers,
                body: body.to_vec(),
            },
        );
        self
    }

    pub(crate) fn page(self, url: &str, html: &str) -> Self {
        self.respond(url, 200, &[("Content-Type", "text/html; charset=utf-8")], html.as_bytes())
    }

    pub(crate) fn icon(self, url: &str, content_type: &str, body: &[u8]) -> Self {
        self.respond(url, 200, &[("Content-Type", content_type)], body)
    }

    pub(crate) fn fail(mut self, url: &str) -> Self {
        self.routes.insert(normalize(url), MockRoute::Fail);
        self
    }

    /// 抓取器自身故障（与目标站点无关）
    pub(crate) fn misconfigured(mut self, url: &str) -> Self {
        self.routes.insert(normalize(url), MockRoute::Misconfigured);
        self
    }

    /// 按请求顺序记录的 URL
    pub(crate) fn requested_urls(&self) -> Vec<String> {
        self.log
            .lock()
            .map(|log| log.iter().map(|(_, url)| url.clone()).collect())
            .unwrap_or_default()
    }

    pub(crate) fn requested_methods(&self) -> Vec<ProbeMethod> {
        self.log
            .lock()
            .map(|log| log.iter().map(|(method, _)| *method).collect())
            .unwrap_or_default()
    }
}

fn normalize(url: &str) -> String {
    Url::parse(url).map(|u| u.to_string()).unwrap_or_else(|_| url.to_string())
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &Url, method: ProbeMethod) -> FavResult<FetchResponse> {
        if let Ok(mut log) = self.log.lock() {
            log.push((method, url.to_string()));
        }

        match self.routes.get(url.as_str()) {
            Some(MockRoute::Respond {
                status,
                headers,
                body,
            }) => Ok(FetchResponse {
                status: *status,
                headers: headers.clone(),
                body: match method {
                    ProbeMethod::Get => body.clone(),
                    ProbeMethod::Head => Vec::new(),
                },
                method,
            }),
            Some(MockRoute::Fail) => Err(FavhashError::FetchError(format!(
                "connection refused: {}",
                url
            ))),
            Some(MockRoute::Misconfigured) => Err(FavhashError::UrlError(url::ParseError::EmptyHost)),
            None => Ok(FetchResponse {
                status: 404,
                headers: HashMap::from([(
                    "content-type".to_string(),
                    "text/html".to_string(),
                )]),
                body: b"<html>not found</html>".to_vec(),
                method,
            }),
        }
    }
}

/// 启动只处理一个连接的本地 HTTP 服务，返回服务根地址与收到的原始请求
pub(crate) async fn serve_once(
    status: &str,
    headers: &[(&str, &str)],
    body: &[u8],
) -> (Url, JoinHandle<String>) {
    let (base, handle) = serve_sequence(vec![build_response(status, headers, body)]).await;
    let handle = tokio::spawn(async move {
        handle.await.unwrap().pop().unwrap_or_default()
    });
    (base, handle)
}

/// 依次处理多个连接，每个连接返回一个预置响应
pub(crate) async fn serve_sequence(responses: Vec<Vec<u8>>) -> (Url, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut requests = Vec::with_capacity(responses.len());
        for response in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&chunk[..n]);
                if raw.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            socket.write_all(&response).await.unwrap();
            let _ = socket.shutdown().await;
            requests.push(String::from_utf8_lossy(&raw).into_owned());
        }
        requests
    });

    (Url::parse(&format!("http://{}/", addr)).unwrap(), handle)
}

/// 拼装一条 HTTP/1.1 响应（Connection: close，避免客户端复用连接）
pub(crate) fn build_response(status: &str, headers: &[(&str, &str)], body: &[u8]) -> Vec<u8> {
    let mut response = format!("HTTP/1.1 {}\r\n", status).into_bytes();
    for (key, value) in headers {
        response.extend_from_slice(format!("{}: {}\r\n", key, value).as_bytes());
    }
    response.extend_from_slice(
        format!("Content-Length: {}\r\nConnection: close\r\n\r\n", body.len()).as_bytes(),
    );
    response.extend_from_slice(body);
    response
}
