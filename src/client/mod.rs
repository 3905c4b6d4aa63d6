//! 此模块实现了与 Monstercat 目录服务进行交互的客户端。
//!
//! # 使用流程
//!
//! 1. 使用 `search_catalog` 搜索曲目，得到一页 `SearchCatalogResults`，
//!    通过 `SearchCatalogResults::next` 继续翻页。
//! 2. 将得到的 `Track` 作为参数，调用其他函数以执行后续操作：
//!    - 调用 `get_track_stream(&track)` 获取音频字节流。
//!    - 调用 `get_track_stream_url(&track)` 获取短时有效的播放链接。
//!    - 调用 `get_resized_image_url(&track.release.cover_url(), ..)` 获取缩放后的封面。
//! 3. 调用 `get_release(id, ..)` 获取发行详情及其完整曲目列表。

use std::time::Duration;

use reqwest::{Client, Response, redirect};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::{
    config::ClientConfig,
    error::{MonstercatError, Result},
    model::{ReleaseInfo, SearchCatalogResults, SearchCursor, Track},
    options::{ReleaseOptions, SearchOptions},
};

pub(crate) mod models;
mod resize;
mod stream;

pub use stream::TrackStream;

/// 组装发行曲目列表时最多请求的页数。
///
/// 按每页 100 首计算可覆盖一万首曲目；服务端的 `has_next` 若始终为真，
/// 超过该页数后以 `MonstercatError::PaginationExceeded` 结束。
pub const MAX_RELEASE_PAGES: usize = 100;

/// Monstercat 目录服务的客户端。
///
/// 内部持有两个 HTTP 客户端：一个正常跟随重定向，
/// 另一个禁用重定向，专门用于从图片缩放服务的 `Location` 头中取出结果。
#[derive(Debug, Clone)]
pub struct MonstercatClient {
    http_client: Client,
    no_redirect_client: Client,
    config: ClientConfig,
}

impl MonstercatClient {
    /// 使用默认配置创建客户端。
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// 使用指定配置创建客户端。
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http_client = build_http_client(&config, redirect::Policy::default())?;
        Self::with_http_client(http_client, config)
    }

    /// 使用调用方提供的 `reqwest::Client` 发送 API 请求。
    ///
    /// 图片缩放请求仍然使用按 `config` 构建的、禁用重定向的客户端。
    pub fn with_http_client(http_client: Client, config: ClientConfig) -> Result<Self> {
        let no_redirect_client = build_http_client(&config, redirect::Policy::none())?;
        Ok(Self {
            http_client,
            no_redirect_client,
            config,
        })
    }

    /// 当前使用的配置。
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// 辅助函数，向 API 发送 GET 请求并返回原始响应，不检查状态码。
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Response> {
        let url = self.config.api_url(path);
        debug!(%url, ?query, "发送 GET 请求");
        let response = self.http_client.get(&url).query(query).send().await?;
        debug!(status = %response.status(), "收到响应");
        Ok(response)
    }

    /// 辅助函数，读取完整响应体并解析为 JSON。
    ///
    /// 直接解析原始字节，非法的 UTF-8 会得到 `JsonParse` 错误而不是被替换掉。
    async fn read_json<R: DeserializeOwned>(response: Response) -> Result<R> {
        let body = response.bytes().await?;
        serde_json::from_slice::<R>(&body).map_err(MonstercatError::from)
    }

    /// 在目录中搜索曲目，返回一页结果。
    ///
    /// `query` 会去除首尾空白后作为 `search` 参数发送，覆盖 `options.search`。
    ///
    /// # 错误
    /// * `InvalidLimit` - `options.limit` 不在 `[1, 100]` 之间。
    /// * `Reqwest` - 网络请求失败。
    /// * `UnexpectedStatus` - 服务端返回非成功状态码。
    /// * `JsonParse` - 响应不是合法的 JSON。
    #[instrument(skip(self, options))]
    pub async fn search_catalog(
        &self,
        query: &str,
        options: SearchOptions,
    ) -> Result<SearchCatalogResults> {
        let options = options.with_search(query.trim());
        self.search_with_options(options).await
    }

    /// 使用之前保存的游标请求对应的一页。
    pub async fn search_with_cursor(&self, cursor: &SearchCursor) -> Result<SearchCatalogResults> {
        self.search_with_options(cursor.options().clone()).await
    }

    async fn search_with_options(&self, options: SearchOptions) -> Result<SearchCatalogResults> {
        options.validate()?;

        let response = self.get("catalog/browse", &options.to_query()).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MonstercatError::UnexpectedStatus(status));
        }

        let page: models::SearchCatalogResponse = Self::read_json(response).await?;
        let tracks = page.data.into_iter().map(Track::from).collect();
        let results =
            SearchCatalogResults::from_page(page.limit, page.offset, page.total, tracks, &options);

        debug!(
            offset = results.offset,
            size = results.size,
            total = results.total,
            has_next = results.has_next,
            "目录搜索完成"
        );
        Ok(results)
    }

    /// 获取发行详情，并通过目录搜索组装它的完整曲目列表。
    ///
    /// # 参数
    /// * `id` - 数字目录号或 UUID，由 `options.id_type` 指明。
    ///
    /// # 错误
    /// * `EmptyId` - `id` 去除空白后为空，不会发起请求。
    /// * `InvalidId` - 发行详情接口返回非成功状态码。
    /// * `ReleaseTracks` - 获取曲目列表的某一页失败，不会返回部分曲目。
    /// * `PaginationExceeded` - 翻页超过 `MAX_RELEASE_PAGES` 页。
    #[instrument(skip(self))]
    pub async fn get_release(&self, id: &str, options: ReleaseOptions) -> Result<ReleaseInfo> {
        let id = id.trim();
        if id.is_empty() {
            return Err(MonstercatError::EmptyId);
        }

        let path = format!("catalog/release/{}", urlencoding::encode(id));
        let response = self.get(&path, &options.to_query()).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MonstercatError::InvalidId(status));
        }

        let detail: models::GetReleaseResponse = Self::read_json(response).await?;
        let release_id = detail.release.id.as_deref().unwrap_or_default().trim();

        // 空的 releaseId 不会被发送，搜索就会覆盖整个目录
        let tracks = if release_id.is_empty() {
            warn!(id, "发行详情缺少 UUID，无法获取曲目列表");
            Vec::new()
        } else {
            self.collect_release_tracks(release_id).await?
        };

        Ok(detail.release.into_release_info(tracks))
    }

    /// 逐页搜索指定发行中的曲目，直到 `has_next` 为假。
    async fn collect_release_tracks(&self, release_id: &str) -> Result<Vec<Track>> {
        let wrap = |e: MonstercatError| MonstercatError::ReleaseTracks(Box::new(e));

        let options = SearchOptions::default().with_release_id(release_id);
        let mut page = self.search_with_options(options).await.map_err(wrap)?;
        // total 来自服务端，预分配时不超过上限页数能容纳的曲目数
        let max_tracks = MAX_RELEASE_PAGES * page.limit.max(1) as usize;
        let mut tracks = Vec::with_capacity((page.total as usize).min(max_tracks));
        let mut pages = 1;

        loop {
            tracks.append(&mut page.tracks);
            if !page.has_next {
                break;
            }
            if pages >= MAX_RELEASE_PAGES {
                return Err(MonstercatError::PaginationExceeded(MAX_RELEASE_PAGES));
            }
            page = page.next(self).await.map_err(wrap)?;
            pages += 1;
        }

        debug!(release_id, pages, count = tracks.len(), "发行曲目组装完成");
        Ok(tracks)
    }
}

fn build_http_client(config: &ClientConfig, policy: redirect::Policy) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .redirect(policy);
    if let Some(secs) = config.connect_timeout_secs {
        builder = builder.connect_timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{IdType, ReleaseType};

    const TEST_QUERY: &str = "Nitro Fun";
    const TEST_CATALOG_ID: &str = "742779555328";
    const TEST_RELEASE_UUID: &str = "475fcbbb-be8e-41bb-9f5e-1d3ce05f77be";

    #[tokio::test]
    async fn test_validation_happens_before_network() {
        // 指向一个不可达的地址，若发起了请求就会得到网络错误而不是校验错误
        let client =
            MonstercatClient::with_config(ClientConfig::with_root("http://127.0.0.1:9")).unwrap();

        let err = client
            .search_catalog(TEST_QUERY, SearchOptions::default().with_limit(0))
            .await
            .unwrap_err();
        assert!(matches!(err, MonstercatError::InvalidLimit(0)));

        let err = client
            .get_release("   ", ReleaseOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, MonstercatError::EmptyId));
    }

    #[tokio::test]
    #[ignore]
    async fn test_search_catalog() {
        let client = MonstercatClient::new().unwrap();
        let res = client
            .search_catalog(TEST_QUERY, SearchOptions::default())
            .await
            .unwrap();

        assert!(!res.tracks.is_empty(), "搜索结果不应为空");
        for track in &res.tracks {
            assert!(!track.artists.is_empty(), "每首曲目都应有艺术家");
        }
        println!("✅ 测试 search_catalog 通过，共 {} 首", res.total);
    }

    #[tokio::test]
    #[ignore]
    async fn test_search_with_limit_and_type() {
        let client = MonstercatClient::new().unwrap();
        let res = client
            .search_catalog(
                TEST_QUERY,
                SearchOptions::default()
                    .with_limit(5)
                    .with_release_type(ReleaseType::Single),
            )
            .await
            .unwrap();

        assert!(res.size <= 5);
        assert_eq!(res.offset, 0);
        for track in &res.tracks {
            assert_eq!(track.release.release_type, ReleaseType::Single.to_string());
        }
    }

    #[tokio::test]
    #[ignore]
    async fn test_next_matches_direct_offset() {
        let client = MonstercatClient::new().unwrap();
        let opts = SearchOptions::default().with_limit(50);
        let first = client.search_catalog(TEST_QUERY, opts.clone()).await.unwrap();
        assert!(first.has_next, "测试数据应有第二页");

        let next = first.next(&client).await.unwrap();
        let direct = client
            .search_catalog(TEST_QUERY, opts.with_offset(first.offset + first.limit))
            .await
            .unwrap();

        let mut a: Vec<_> = next.tracks.iter().map(Track::stream_id).collect();
        let mut b: Vec<_> = direct.tracks.iter().map(Track::stream_id).collect();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[tokio::test]
    #[ignore]
    async fn test_get_release_by_catalog_id_and_uuid() {
        let client = MonstercatClient::new().unwrap();
        let by_catalog = client
            .get_release(TEST_CATALOG_ID, ReleaseOptions::default())
            .await
            .unwrap();
        assert!(!by_catalog.tracks.is_empty());

        let by_uuid = client
            .get_release(
                TEST_RELEASE_UUID,
                ReleaseOptions::default().with_id_type(IdType::Uuid),
            )
            .await
            .unwrap();
        assert_eq!(by_catalog.title, by_uuid.title);

        let mut a: Vec<_> = by_catalog.tracks.iter().map(Track::stream_id).collect();
        let mut b: Vec<_> = by_uuid.tracks.iter().map(Track::stream_id).collect();
        a.sort();
        b.sort();
        assert_eq!(a, b);
        println!("✅ 测试 get_release 通过: '{}'", by_catalog.title);
    }

    #[tokio::test]
    #[ignore]
    async fn test_get_release_invalid_id() {
        let client = MonstercatClient::new().unwrap();
        let err = client
            .get_release("xxxxxxxx", ReleaseOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, MonstercatError::InvalidId(_)), "{err:?}");
    }
}
