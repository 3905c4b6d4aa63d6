//! 定义了各个接口的请求选项。
//!
//! 每个选项结构体都有带文档说明的默认值，并提供 `with_*` 形式的构建方法。
//! 对同一字段多次调用构建方法时，以最后一次为准。

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::error::{MonstercatError, Result};

/// 单页最多可请求的曲目数量。
pub const MAX_LIMIT: u32 = 100;

/// 发行类型。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum ReleaseType {
    /// 单曲
    Single,
    /// 迷你专辑
    #[strum(serialize = "EP")]
    #[serde(rename = "EP")]
    Ep,
    /// 专辑
    Album,
}

/// 目录搜索 (`catalog/browse`) 的选项。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// 每页数量，默认 100，必须在 `[1, 100]` 之间。
    pub limit: u32,
    /// 起始偏移，默认 0。
    pub offset: u32,
    /// 搜索关键词，默认为空。
    pub search: String,
    /// 排序字段，默认为空（由服务端决定）。
    pub sort: String,
    /// 只返回指定类型发行中的曲目。
    pub release_type: Option<ReleaseType>,
    /// 只返回指定发行 (UUID) 中的曲目。
    pub release_id: Option<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: MAX_LIMIT,
            offset: 0,
            search: String::new(),
            sort: String::new(),
            release_type: None,
            release_id: None,
        }
    }
}

impl SearchOptions {
    /// 设置每页数量。
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// 设置起始偏移。
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// 设置搜索关键词。
    ///
    /// `MonstercatClient::search_catalog` 会用它的 `query` 参数覆盖这里的值。
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// 设置排序字段。
    pub fn with_sort(mut self, field: impl Into<String>) -> Self {
        self.sort = field.into();
        self
    }

    /// 按发行类型过滤。
    pub fn with_release_type(mut self, release_type: ReleaseType) -> Self {
        self.release_type = Some(release_type);
        self
    }

    /// 按发行 UUID 过滤。
    pub fn with_release_id(mut self, release_id: impl Into<String>) -> Self {
        self.release_id = Some(release_id.into());
        self
    }

    /// 校验选项。目前只有 `limit` 需要校验。
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_LIMIT).contains(&self.limit) {
            return Err(MonstercatError::InvalidLimit(self.limit));
        }
        Ok(())
    }

    /// 生成查询参数。
    ///
    /// `limit`、`offset`、`search`、`sort` 总是会发送（即使为空），
    /// `types` 与 `releaseId` 只在设置了非空值时发送。
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
            ("search", self.search.clone()),
            ("sort", self.sort.clone()),
        ];

        if let Some(release_type) = self.release_type {
            query.push(("types", release_type.to_string()));
        }
        if let Some(release_id) = self.release_id.as_deref().filter(|id| !id.is_empty()) {
            query.push(("releaseId", release_id.to_string()));
        }

        query
    }
}

/// 发行 ID 的类型。
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum IdType {
    /// 公开 URL 中使用的数字目录号，例如 `742779555328`。
    #[default]
    #[strum(serialize = "catalogId")]
    #[serde(rename = "catalogId")]
    CatalogId,
    /// 服务内部使用的 UUID。
    #[strum(serialize = "uuid")]
    #[serde(rename = "uuid")]
    Uuid,
}

/// 发行详情 (`catalog/release/{id}`) 的选项。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseOptions {
    /// 传入 ID 的类型，默认为 `IdType::CatalogId`。
    pub id_type: IdType,
}

impl ReleaseOptions {
    /// 设置 ID 类型。
    pub fn with_id_type(mut self, id_type: IdType) -> Self {
        self.id_type = id_type;
        self
    }

    pub(crate) fn to_query(self) -> [(&'static str, String); 1] {
        [("idType", self.id_type.to_string())]
    }
}

/// 图片缩放服务支持的编码。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ImageEncoding {
    /// JPEG
    Jpeg,
    /// WebP
    Webp,
}

impl From<ImageEncoding> for String {
    fn from(encoding: ImageEncoding) -> Self {
        encoding.to_string()
    }
}

/// 图片缩放的选项。
///
/// `encoding` 以字符串保存，在发请求前才会校验，
/// 这样调用方传入的任意编码名都能得到明确的 `InvalidEncoding` 错误。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeOptions {
    /// 目标宽度（像素），默认 300。
    pub width: u32,
    /// 目标编码，默认 `webp`。
    pub encoding: String,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            width: 300,
            encoding: ImageEncoding::Webp.into(),
        }
    }
}

impl ResizeOptions {
    /// 设置目标宽度。
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// 设置目标编码。
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// 校验编码是否在允许的集合中，并返回解析后的编码。
    pub fn validate(&self) -> Result<ImageEncoding> {
        self.encoding
            .parse::<ImageEncoding>()
            .map_err(|_| MonstercatError::InvalidEncoding(self.encoding.clone()))
    }
}
