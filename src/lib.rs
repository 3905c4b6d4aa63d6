#![warn(missing_docs)]

//! # Monstercat RS
//!
//! 一个轻量的 Rust 库，用于访问 Monstercat 的音乐目录与流媒体服务。
//!
//! ## 主要功能
//!
//! - **目录搜索**: 按关键词、发行类型、发行 ID 搜索曲目，并通过游标逐页翻阅。
//! - **发行详情**: 按目录号或 UUID 获取发行信息，自动组装完整的曲目列表。
//! - **音频流**: 以 `futures::io::AsyncRead` 的形式边下载边读取曲目音频，或获取签名播放链接。
//! - **封面缩放**: 获取指定宽度与编码的封面图片地址。
//!
//! ## 搜索并下载
//!
//! ```rust,no_run
//! use futures::AsyncReadExt;
//! use monstercat_rs::{MonstercatClient, options::{ReleaseType, SearchOptions}};
//!
//! async {
//!     let client = MonstercatClient::new().unwrap();
//!     let page = client
//!         .search_catalog(
//!             "Nitro Fun",
//!             SearchOptions::default().with_release_type(ReleaseType::Single),
//!         )
//!         .await
//!         .unwrap();
//!
//!     let track = &page.tracks[0];
//!     let mut stream = client.get_track_stream(track).await.unwrap();
//!     let mut audio = Vec::new();
//!     stream.read_to_end(&mut audio).await.unwrap();
//!     println!("{} - {}: {} 字节", track.artists_title, track.title, audio.len());
//!
//!     if page.has_next {
//!         let next_page = page.next(&client).await.unwrap();
//!         println!("第二页共 {} 首", next_page.size);
//!     }
//! };
//! ```
//!
//! ## 发行详情
//!
//! ```rust,no_run
//! use monstercat_rs::{MonstercatClient, options::{IdType, ReleaseOptions}};
//!
//! async {
//!     let client = MonstercatClient::new().unwrap();
//!     let release = client
//!         .get_release(
//!             "475fcbbb-be8e-41bb-9f5e-1d3ce05f77be",
//!             ReleaseOptions::default().with_id_type(IdType::Uuid),
//!         )
//!         .await
//!         .unwrap();
//!     println!("{} 共 {} 首，封面: {}", release.title, release.tracks.len(), release.cover_url());
//! };
//! ```
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod options;

pub use crate::{
    client::{MAX_RELEASE_PAGES, MonstercatClient, TrackStream},
    config::ClientConfig,
    error::{MonstercatError, Result},
    model::{Artist, Release, ReleaseInfo, SearchCatalogResults, SearchCursor, Track},
};
