//! 定义了目录搜索的分页结果与续页游标。

use serde::{Deserialize, Serialize};

use crate::{
    client::MonstercatClient,
    error::{MonstercatError, Result},
    model::track::Track,
    options::SearchOptions,
};

/// 请求下一页所需的全部数据。
///
/// 游标只保存选项，不持有客户端；调用方可以把它存起来，
/// 稍后再交给 `MonstercatClient::search_with_cursor` 继续翻页。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCursor {
    options: SearchOptions,
}

impl SearchCursor {
    /// 由产生当前页的选项推导下一页的游标：`offset` 前进 `limit`。
    pub(crate) fn after(options: &SearchOptions) -> Self {
        let next_offset = options.offset.saturating_add(options.limit);
        Self {
            options: options.clone().with_offset(next_offset),
        }
    }

    /// 下一页请求将使用的选项。
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }
}

/// 目录搜索返回的一页结果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCatalogResults {
    /// 服务端确认的每页数量。
    pub limit: u32,
    /// 本页的起始偏移。
    pub offset: u32,
    /// 本页实际包含的曲目数，总是等于 `tracks.len()`。
    pub size: u32,
    /// 匹配的曲目总数。
    pub total: u32,
    /// 本页的曲目。
    pub tracks: Vec<Track>,
    /// 是否还有下一页，即 `offset + size < total`。
    pub has_next: bool,
    cursor: Option<SearchCursor>,
}

impl SearchCatalogResults {
    /// 根据一页数据与产生它的选项构造结果，并计算分页信息。
    pub(crate) fn from_page(
        limit: u32,
        offset: u32,
        total: u32,
        tracks: Vec<Track>,
        options: &SearchOptions,
    ) -> Self {
        let size = u32::try_from(tracks.len()).unwrap_or(u32::MAX);
        let has_next = u64::from(offset) + u64::from(size) < u64::from(total);
        let cursor = has_next.then(|| SearchCursor::after(options));

        Self {
            limit,
            offset,
            size,
            total,
            tracks,
            has_next,
            cursor,
        }
    }

    /// 获取下一页的游标。没有下一页时为 `None`。
    pub fn next_cursor(&self) -> Option<&SearchCursor> {
        self.cursor.as_ref()
    }

    /// 请求下一页。
    ///
    /// # 错误
    /// 当 `has_next` 为 `false` 时返回 `MonstercatError::NoFurtherResults`，不会发起请求。
    pub async fn next(&self, client: &MonstercatClient) -> Result<SearchCatalogResults> {
        match self.cursor.as_ref() {
            Some(cursor) if self.has_next => client.search_with_cursor(cursor).await,
            _ => Err(MonstercatError::NoFurtherResults),
        }
    }
}
