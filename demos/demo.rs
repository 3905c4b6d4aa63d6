//! 用于演示 `monstercat_rs` 库的核心功能。
//!
//! ## 如何运行
//!
//! ```bash
//! cargo run --package monstercat_rs --example demo
//! ```

use std::error::Error;

use futures::AsyncReadExt as _;
use monstercat_rs::{
    MonstercatClient,
    options::{ReleaseOptions, ReleaseType, ResizeOptions, SearchOptions},
};
use tokio::{fs::File, io::AsyncWriteExt as _};
use tracing::{Level, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let client = MonstercatClient::new()?;

    let page = client
        .search_catalog(
            "Nitro Fun",
            SearchOptions::default()
                .with_limit(10)
                .with_release_type(ReleaseType::Single),
        )
        .await?;
    info!("共找到 {} 首单曲，本页 {} 首", page.total, page.size);
    for (i, track) in page.tracks.iter().enumerate() {
        info!(
            "[{}] {} - {} ({})",
            i + 1,
            track.artists_title,
            track.title,
            track.release.catalog_id
        );
    }

    let Some(track) = page.tracks.first() else {
        warn!("没有搜索到任何曲目，程序退出。");
        return Ok(());
    };

    let cover = client
        .get_resized_image_url(
            &track.release.cover_url(),
            ResizeOptions::default().with_width(512),
        )
        .await?;
    info!("封面: {cover}");

    let release = client
        .get_release(&track.release.catalog_id, ReleaseOptions::default())
        .await?;
    info!("发行 '{}' 共 {} 首曲目", release.title, release.tracks.len());

    let file_name = format!("{}.mp3", track.title.replace(['/', '\\'], "_"));
    let mut stream = client.get_track_stream(track).await?;
    let mut file = File::create(&file_name).await?;
    let mut buf = vec![0u8; 64 * 1024];
    let mut written = 0u64;
    loop {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n]).await?;
        written += n as u64;
    }
    file.flush().await?;
    info!("已保存 {file_name}，共 {written} 字节");

    Ok(())
}
