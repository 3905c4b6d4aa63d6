//! 定义了曲目与艺术家的数据结构。

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::release::Release;

/// 代表曲目中的一位艺术家。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    /// 目录记录 ID。
    pub catalog_record_id: String,
    /// 艺术家 ID。
    pub id: String,
    /// 显示名称。
    pub name: String,
    /// 是否公开可见。
    pub public: bool,
    /// 在曲目中的角色，例如 `Primary`、`Featured`、`Remixer`。
    pub role: String,
    /// 艺术家主页路径。
    pub uri: String,
    /// 头像文件 ID。
    pub profile_file_id: String,
}

/// 代表目录中的一首曲目。
///
/// 从搜索结果构造后不会再被修改。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// 曲目 ID (UUID)。
    pub id: String,
    /// 曲目标题。
    pub title: String,
    /// 厂牌 ID。
    pub brand_id: i64,
    /// 厂牌名称，例如 `Uncaged`。
    pub brand: String,
    /// 首发时间。
    pub debut_date: Option<DateTime<Utc>>,
    /// 每分钟节拍数。
    pub bpm: u32,
    /// 时长。
    pub duration: Duration,
    /// 是否包含露骨内容。
    pub explicit: bool,
    /// 主流派。
    pub genre_primary: String,
    /// 次流派。
    pub genre_secondary: String,
    /// 是否公开。
    pub public: bool,
    /// 所属发行。
    pub release: Release,
    /// 艺术家署名。
    pub artists_title: String,
    /// 艺术家列表。
    pub artists: Vec<Artist>,
    /// ISRC 编码。
    pub isrc: String,
    /// 在发行中的曲序。
    pub track_number: u32,
    /// 版本说明，例如 `Original Mix`。
    pub version: String,
    /// 是否可下载。
    pub downloadable: bool,
    /// 是否可在线播放。
    pub streamable: bool,
    /// 是否处于抢先体验阶段。
    pub in_early_access: bool,
    /// 是否对创作者友好（可用于视频配乐）。
    pub creator_friendly: bool,
}

impl Track {
    /// 曲目在目录中的唯一键，格式为 `发行ID|曲目ID`。
    pub fn stream_id(&self) -> String {
        format!("{}|{}", self.release.id, self.id)
    }
}
