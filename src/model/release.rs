//! 定义了发行（单曲、EP、专辑）的数据结构。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{config::WEB_URL, model::track::Track, options::ReleaseType};

/// 根据目录号拼接封面地址。
pub(crate) fn cover_url(catalog_id: &str) -> String {
    format!("{WEB_URL}/release/{catalog_id}/cover")
}

/// 代表曲目所属的发行。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// 数字目录号，出现在公开 URL 中。
    pub catalog_id: String,
    /// 发行 UUID。
    pub id: String,
    /// 发行标题。
    pub title: String,
    /// 发行类型，通常是 `Single`、`EP` 或 `Album`。
    pub release_type: String,
    /// 艺术家署名。
    pub artists_title: String,
    /// 发行时间。
    pub release_date: Option<DateTime<Utc>>,
    /// UPC 编码。
    pub upc: String,
    /// 版本说明。
    pub version: String,
    /// 发行描述。
    pub description: String,
}

impl Release {
    /// 封面图片地址，总是由目录号派生。
    pub fn cover_url(&self) -> String {
        cover_url(&self.catalog_id)
    }

    /// 将 `release_type` 解析为枚举；服务端返回了未知类型时为 `None`。
    pub fn parsed_type(&self) -> Option<ReleaseType> {
        self.release_type.parse().ok()
    }
}

/// 发行详情，包含完整的曲目列表。
///
/// 只能通过 `MonstercatClient::get_release` 获得。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    /// 数字目录号。
    pub catalog_id: String,
    /// 发行 UUID。
    pub id: String,
    /// 发行标题。
    pub title: String,
    /// 发行类型。
    pub release_type: String,
    /// 艺术家署名。
    pub artists_title: String,
    /// 厂牌 ID。
    pub brand_id: i64,
    /// 厂牌名称。
    pub brand: String,
    /// 主流派。
    pub genre_primary: String,
    /// 次流派。
    pub genre_secondary: String,
    /// 发行时间。
    pub release_date: Option<DateTime<Utc>>,
    /// UPC 编码。
    pub upc: String,
    /// ℗ 版权声明。
    pub copyright_p_line: String,
    /// 描述。
    pub description: String,
    /// 是否可在线播放。
    pub streamable: bool,
    /// 是否可下载。
    pub downloadable: bool,
    /// 发行中的全部曲目。
    pub tracks: Vec<Track>,
}

impl ReleaseInfo {
    /// 封面图片地址，总是由目录号派生。
    pub fn cover_url(&self) -> String {
        cover_url(&self.catalog_id)
    }
}
