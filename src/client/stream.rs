//! 曲目音频流与签名播放链接。
//!
//! `get_track_stream` 返回的 `TrackStream` 由一个后台任务供给数据：
//! 任务把 HTTP 响应体逐块写入有界通道，调用方从另一端读取。
//! 通道满时写入方等待，通道空时读取方等待。
//! `TrackStream` 被丢弃时后台任务会被中止，响应体随之释放。

use std::{
    io,
    pin::Pin,
    task::{Context, Poll},
};

use bytes::Bytes;
use futures::{
    AsyncRead, Stream, StreamExt, TryStreamExt,
    stream::{BoxStream, IntoAsyncRead},
};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, instrument, trace, warn};

use crate::{
    client::{MonstercatClient, models},
    error::{MonstercatError, Result},
    model::Track,
};

type Chunk = io::Result<Bytes>;

/// 曲目的音频字节流，实现了 `futures::io::AsyncRead`。
///
/// 传输中途发生的错误会以 `io::Error` 的形式交给读取方并结束流，
/// 不会被当作正常结束而静默截断。
pub struct TrackStream {
    reader: IntoAsyncRead<BoxStream<'static, Chunk>>,
    producer: JoinHandle<()>,
    content_length: Option<u64>,
    content_type: Option<String>,
}

impl TrackStream {
    /// 启动后台复制任务，并返回读取端。
    ///
    /// `body` 可以是任何分块的字节流，通常是 `reqwest::Response::bytes_stream()`。
    pub(crate) fn spawn<S, B, E>(body: S, buffer_chunks: usize) -> Self
    where
        S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
        B: Into<Bytes> + Send + 'static,
        E: Into<Box<dyn std::error::Error + Send + Sync>> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<Chunk>(buffer_chunks.max(1));
        let producer = tokio::spawn(copy_body(body, tx));

        let chunks = futures::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|chunk| (chunk, rx))
        })
        .boxed();

        Self {
            reader: chunks.into_async_read(),
            producer,
            content_length: None,
            content_type: None,
        }
    }

    /// 服务端声明的内容长度（字节）。
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// 服务端声明的 `Content-Type`，例如 `audio/mpeg`。
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}

impl std::fmt::Debug for TrackStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackStream")
            .field("content_length", &self.content_length)
            .field("content_type", &self.content_type)
            .field("finished", &self.producer.is_finished())
            .finish_non_exhaustive()
    }
}

impl AsyncRead for TrackStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.reader).poll_read(cx, buf)
    }
}

impl Drop for TrackStream {
    fn drop(&mut self) {
        if !self.producer.is_finished() {
            debug!("读取端已关闭，中止音频流复制任务");
            self.producer.abort();
        }
    }
}

/// 后台任务：把响应体逐块写入通道，读取端关闭或出错时退出。
async fn copy_body<S, B, E>(body: S, tx: mpsc::Sender<Chunk>)
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: Into<Bytes>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let mut body = std::pin::pin!(body);
    let mut copied = 0usize;
    loop {
        let next = tokio::select! {
            _ = tx.closed() => {
                debug!(copied, "读取端已关闭，停止复制");
                return;
            }
            next = body.next() => next,
        };

        match next {
            Some(Ok(chunk)) => {
                let chunk: Bytes = chunk.into();
                copied += chunk.len();
                trace!(len = chunk.len(), copied, "写入音频数据块");
                if tx.send(Ok(chunk)).await.is_err() {
                    debug!(copied, "读取端已关闭，停止复制");
                    return;
                }
            }
            Some(Err(e)) => {
                let err = io::Error::other(e);
                warn!(copied, "音频流传输中断: {err}");
                let _ = tx.send(Err(err)).await;
                return;
            }
            None => {
                debug!(copied, "音频流复制完成");
                return;
            }
        }
    }
}

/// 拼接音频流接口的路径，并校验两个标识符都不为空。
fn track_stream_path(track: &Track) -> Result<String> {
    if track.id.trim().is_empty() {
        return Err(MonstercatError::MissingIdentifier("track id"));
    }
    if track.release.id.trim().is_empty() {
        return Err(MonstercatError::MissingIdentifier("release id"));
    }
    Ok(format!(
        "release/{}/track-stream/{}",
        urlencoding::encode(&track.release.id),
        urlencoding::encode(&track.id)
    ))
}

impl MonstercatClient {
    /// 获取曲目的音频字节流。
    ///
    /// 返回时响应体尚未读完，调用方可以边下载边消费。
    ///
    /// # 错误
    /// * `MissingIdentifier` - 曲目 ID 或发行 ID 为空，不会发起请求。
    /// * `InvalidTrack` - 服务端返回非成功状态码（响应体会在返回前释放）。
    #[instrument(skip(self, track), fields(stream_id = %track.stream_id()))]
    pub async fn get_track_stream(&self, track: &Track) -> Result<TrackStream> {
        let path = track_stream_path(track)?;
        let response = self.get(&path, &[]).await?;

        let status = response.status();
        if !status.is_success() {
            drop(response);
            return Err(MonstercatError::InvalidTrack(status));
        }

        let content_length = response.content_length();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let mut stream =
            TrackStream::spawn(response.bytes_stream(), self.config.stream_buffer_chunks);
        stream.content_length = content_length;
        stream.content_type = content_type;
        Ok(stream)
    }

    /// 获取曲目的短时有效播放链接，而不是音频字节。
    ///
    /// # 错误
    /// * `MissingIdentifier` - 曲目 ID 或发行 ID 为空，不会发起请求。
    /// * `InvalidTrack` - 服务端返回非成功状态码。
    /// * `JsonParse` - 响应不是预期的 JSON。
    #[instrument(skip(self, track), fields(stream_id = %track.stream_id()))]
    pub async fn get_track_stream_url(&self, track: &Track) -> Result<String> {
        let path = track_stream_path(track)?;
        let response = self
            .get(&path, &[("noRedirect", "true".to_string())])
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MonstercatError::InvalidTrack(status));
        }

        let signed: models::SignedUrlResponse = Self::read_json(response).await?;
        Ok(signed.signed_url)
    }
}
