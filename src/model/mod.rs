//! 定义了本库对外暴露的领域模型。
//!
//! 这些结构体由 `client::models` 中的 API 响应结构转换而来，
//! 字段命名与服务端的临时 JSON 形状解耦。

pub mod release;
pub mod search;
pub mod track;

pub use release::{Release, ReleaseInfo};
pub use search::{SearchCatalogResults, SearchCursor};
pub use track::{Artist, Track};
