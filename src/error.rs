//! 定义了整个 `monstercat-rs` 库的错误类型 `MonstercatError`。

use reqwest::StatusCode;
use thiserror::Error;

/// `monstercat-rs` 库的通用错误枚举。
#[derive(Error, Debug)]
pub enum MonstercatError {
    /// 分页大小超出 `[1, 100]` 的范围
    #[error("limit 必须在 1 到 100 之间，实际为 {0}")]
    InvalidLimit(u32),

    /// 图片编码不在允许的集合 (`jpeg`, `webp`) 中
    #[error("无效的图片编码: '{0}'")]
    InvalidEncoding(String),

    /// 发行 ID 在去除首尾空白后为空
    #[error("发行 ID 不能为空")]
    EmptyId,

    /// 歌曲缺少获取音频流所需的标识符
    #[error("歌曲缺少标识符: {0}")]
    MissingIdentifier(&'static str),

    /// 网络请求失败 (源自 `reqwest::Error`)
    #[error("网络请求失败: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// JSON 解析失败 (源自 `serde_json::Error`)
    #[error("JSON 解析失败: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// 音频流接口返回了非成功状态码，通常意味着歌曲或发行 ID 不存在
    #[error("无效的歌曲 (HTTP {0})")]
    InvalidTrack(StatusCode),

    /// 发行详情接口返回了非成功状态码
    #[error("无效的发行 ID (HTTP {0})")]
    InvalidId(StatusCode),

    /// 图片缩放服务没有返回可用的重定向
    #[error("图片缩放失败: {0}")]
    ResizeFailed(String),

    /// 其他接口返回了意料之外的状态码
    #[error("接口返回了意外的状态码: {0}")]
    UnexpectedStatus(StatusCode),

    /// 在 `has_next == false` 的结果上请求下一页
    #[error("没有更多结果")]
    NoFurtherResults,

    /// 组装发行曲目列表时翻页次数超过上限
    #[error("翻页次数超过上限 ({0} 页)")]
    PaginationExceeded(usize),

    /// 获取发行的曲目列表时某一页失败
    #[error("获取发行曲目时出错: {0}")]
    ReleaseTracks(#[source] Box<MonstercatError>),
}

impl MonstercatError {
    /// 是否为参数校验错误（不会发起任何网络请求）。
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidLimit(_)
                | Self::InvalidEncoding(_)
                | Self::EmptyId
                | Self::MissingIdentifier(_)
        )
    }

    /// 是否为服务端返回了意外状态码导致的错误。
    pub fn is_status(&self) -> bool {
        matches!(
            self,
            Self::InvalidTrack(_)
                | Self::InvalidId(_)
                | Self::ResizeFailed(_)
                | Self::UnexpectedStatus(_)
        )
    }
}

/// `MonstercatError` 的 `Result` 类型别名，方便在函数签名中使用。
pub type Result<T> = std::result::Result<T, MonstercatError>;
