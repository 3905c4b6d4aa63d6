//! 此模块定义了所有用于反序列化 Monstercat API 响应的 `struct` 数据结构，
//! 以及它们到 `crate::model` 中领域模型的转换。
//!
//! 服务端返回的字段使用 PascalCase，部分字段可能为 `null`，
//! 这里统一用 `Option` 接收后再转换为默认值。

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::model::{Artist, Release, ReleaseInfo, Track};

// =================================================================
// 目录搜索接口 (`catalog/browse`) 的模型
// =================================================================

/// 搜索接口的顶层响应。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchCatalogResponse {
    /// 服务端确认的每页数量。
    #[serde(default)]
    pub limit: u32,
    /// 本页的起始偏移。
    #[serde(default)]
    pub offset: u32,
    /// 匹配的曲目总数。
    #[serde(default)]
    pub total: u32,
    /// 本页的曲目。
    #[serde(default)]
    pub data: Vec<TrackItem>,
}

/// 搜索结果中的一首曲目。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrackItem {
    #[serde(default)]
    pub artists: Vec<ArtistItem>,
    pub artists_title: Option<String>,
    #[serde(rename = "BPM")]
    pub bpm: Option<u32>,
    pub brand: Option<String>,
    pub brand_id: Option<i64>,
    #[serde(default)]
    pub creator_friendly: bool,
    pub debut_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub downloadable: bool,
    /// 时长（秒）。
    pub duration: Option<u64>,
    #[serde(default)]
    pub explicit: bool,
    pub genre_primary: Option<String>,
    pub genre_secondary: Option<String>,
    #[serde(rename = "ISRC")]
    pub isrc: Option<String>,
    pub id: Option<String>,
    #[serde(default)]
    pub in_early_access: bool,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub release: ReleaseItem,
    #[serde(default)]
    pub streamable: bool,
    pub title: Option<String>,
    pub track_number: Option<u32>,
    pub version: Option<String>,
}

/// 曲目中内嵌的发行信息。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReleaseItem {
    pub artists_title: Option<String>,
    pub catalog_id: Option<String>,
    pub description: Option<String>,
    pub id: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    pub title: Option<String>,
    #[serde(rename = "Type")]
    pub release_type: Option<String>,
    #[serde(rename = "UPC")]
    pub upc: Option<String>,
    pub version: Option<String>,
}

/// 曲目中的艺术家。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ArtistItem {
    pub catalog_record_id: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub profile_file_id: Option<String>,
    #[serde(default)]
    pub public: bool,
    pub role: Option<String>,
    #[serde(rename = "URI")]
    pub uri: Option<String>,
}

// =================================================================
// 发行详情接口 (`catalog/release/{id}`) 的模型
// =================================================================

/// 发行详情接口的顶层响应。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetReleaseResponse {
    pub release: ReleaseDetail,
}

/// 发行的详细信息。曲目列表需要另外通过目录搜索获取。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReleaseDetail {
    pub artists_title: Option<String>,
    pub brand_id: Option<i64>,
    pub brand_title: Option<String>,
    pub catalog_id: Option<String>,
    pub copyright_p_line: Option<String>,
    pub description: Option<String>,
    pub genre_primary: Option<String>,
    pub genre_secondary: Option<String>,
    pub id: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    pub title: Option<String>,
    #[serde(rename = "Type")]
    pub release_type: Option<String>,
    #[serde(rename = "UPC")]
    pub upc: Option<String>,
    #[serde(default)]
    pub downloadable: bool,
    #[serde(default)]
    pub streamable: bool,
}

// =================================================================
// 音频流接口 (`release/{releaseId}/track-stream/{trackId}?noRedirect=true`) 的模型
// =================================================================

/// 带 `noRedirect=true` 时音频流接口返回的 JSON。
#[derive(Debug, Deserialize)]
pub struct SignedUrlResponse {
    /// 短时有效的播放地址。
    #[serde(rename = "SignedUrl", alias = "SignedURL")]
    pub signed_url: String,
}

// =================================================================
// 转换为领域模型
// =================================================================

impl From<ArtistItem> for Artist {
    fn from(artist: ArtistItem) -> Self {
        Artist {
            catalog_record_id: artist.catalog_record_id.unwrap_or_default(),
            id: artist.id.unwrap_or_default(),
            name: artist.name.unwrap_or_default(),
            public: artist.public,
            role: artist.role.unwrap_or_default(),
            uri: artist.uri.unwrap_or_default(),
            profile_file_id: artist.profile_file_id.unwrap_or_default(),
        }
    }
}

impl From<ReleaseItem> for Release {
    fn from(release: ReleaseItem) -> Self {
        Release {
            catalog_id: release.catalog_id.unwrap_or_default(),
            id: release.id.unwrap_or_default(),
            title: release.title.unwrap_or_default(),
            release_type: release.release_type.unwrap_or_default(),
            artists_title: release.artists_title.unwrap_or_default(),
            release_date: release.release_date,
            upc: release.upc.unwrap_or_default(),
            version: release.version.unwrap_or_default(),
            description: release.description.unwrap_or_default(),
        }
    }
}

impl From<TrackItem> for Track {
    fn from(track: TrackItem) -> Self {
        Track {
            id: track.id.unwrap_or_default(),
            title: track.title.unwrap_or_default(),
            brand_id: track.brand_id.unwrap_or_default(),
            brand: track.brand.unwrap_or_default(),
            debut_date: track.debut_date,
            bpm: track.bpm.unwrap_or_default(),
            duration: Duration::from_secs(track.duration.unwrap_or_default()),
            explicit: track.explicit,
            genre_primary: track.genre_primary.unwrap_or_default(),
            genre_secondary: track.genre_secondary.unwrap_or_default(),
            public: track.public,
            release: track.release.into(),
            artists_title: track.artists_title.unwrap_or_default(),
            artists: track.artists.into_iter().map(Artist::from).collect(),
            isrc: track.isrc.unwrap_or_default(),
            track_number: track.track_number.unwrap_or_default(),
            version: track.version.unwrap_or_default(),
            downloadable: track.downloadable,
            streamable: track.streamable,
            in_early_access: track.in_early_access,
            creator_friendly: track.creator_friendly,
        }
    }
}

impl ReleaseDetail {
    /// 与组装好的曲目列表合并为 `ReleaseInfo`。
    pub fn into_release_info(self, tracks: Vec<Track>) -> ReleaseInfo {
        ReleaseInfo {
            catalog_id: self.catalog_id.unwrap_or_default(),
            id: self.id.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            release_type: self.release_type.unwrap_or_default(),
            artists_title: self.artists_title.unwrap_or_default(),
            brand_id: self.brand_id.unwrap_or_default(),
            brand: self.brand_title.unwrap_or_default(),
            genre_primary: self.genre_primary.unwrap_or_default(),
            genre_secondary: self.genre_secondary.unwrap_or_default(),
            release_date: self.release_date,
            upc: self.upc.unwrap_or_default(),
            copyright_p_line: self.copyright_p_line.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            streamable: self.streamable,
            downloadable: self.downloadable,
            tracks,
        }
    }
}
