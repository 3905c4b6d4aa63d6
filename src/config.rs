//! 负责客户端的运行配置。
//!
//! 本库不读取任何配置文件；`ClientConfig` 派生了 serde 的 trait，
//! 调用方可以自行决定从哪里加载它。

use serde::{Deserialize, Serialize};

/// JSON API 的根地址。
pub const BASE_URL: &str = "https://player.monstercat.app/api";
/// 网页站点的根地址，发行封面 URL 固定由它派生。
pub const WEB_URL: &str = "https://www.monstercat.com";
/// 图片缩放服务的根地址。
pub const RESIZE_URL: &str = "https://cdx.monstercat.com/";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// `MonstercatClient` 的配置项。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// JSON API 的根地址，不带末尾的 `/`。
    pub base_url: String,
    /// 图片缩放服务的根地址。
    pub resize_url: String,
    /// 请求时发送的 `User-Agent`。
    pub user_agent: String,
    /// 建立连接的超时时间（秒）。`None` 表示使用 reqwest 的默认行为。
    ///
    /// 只作用于建立连接，不限制整个请求（包括音频流）的时长。
    pub connect_timeout_secs: Option<u64>,
    /// 音频流后台任务与读取端之间通道的容量（以数据块为单位）。
    pub stream_buffer_chunks: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            resize_url: RESIZE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            connect_timeout_secs: Some(10),
            stream_buffer_chunks: 16,
        }
    }
}

impl ClientConfig {
    /// 将 API 与图片缩放服务都指向同一个服务器，主要用于测试或自建代理。
    pub fn with_root(root: &str) -> Self {
        let root = root.trim_end_matches('/');
        Self {
            base_url: format!("{root}/api"),
            resize_url: format!("{root}/resize"),
            ..Default::default()
        }
    }

    /// 拼接 API 路径，确保 `base_url` 与路径之间恰好有一个 `/`。
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
