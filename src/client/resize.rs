//! 通过图片缩放服务获取调整尺寸后的封面地址。

use reqwest::{StatusCode, header::LOCATION};
use tracing::{debug, instrument};

use crate::{
    client::MonstercatClient,
    error::{MonstercatError, Result},
    options::ResizeOptions,
};

impl MonstercatClient {
    /// 获取缩放后的图片地址。
    ///
    /// 缩放服务以重定向作为应答，结果就是响应的 `Location` 头，
    /// 因此这里使用禁用了重定向的客户端，并不会真正下载图片。
    ///
    /// # 参数
    /// * `source_url` - 原图地址，通常是 `Release::cover_url()`。
    /// * `options` - 目标宽度与编码，默认 300 像素、`webp`。
    ///
    /// # 错误
    /// * `InvalidEncoding` - 编码不是 `jpeg` 或 `webp`，不会发起请求。
    /// * `ResizeFailed` - 服务端没有返回带 `Location` 的 301、302、307 或 308 重定向。
    #[instrument(skip(self))]
    pub async fn get_resized_image_url(
        &self,
        source_url: &str,
        options: ResizeOptions,
    ) -> Result<String> {
        let encoding = options.validate()?;

        let query = [
            ("url", source_url.to_string()),
            ("width", options.width.to_string()),
            ("encoding", encoding.to_string()),
        ];
        debug!(url = %self.config.resize_url, ?query, "请求图片缩放");

        let response = self
            .no_redirect_client
            .get(&self.config.resize_url)
            .query(&query)
            .send()
            .await?;

        // 只接受真正指向新地址的重定向，300 与 304 等不算
        let status = response.status();
        if !matches!(
            status,
            StatusCode::MOVED_PERMANENTLY
                | StatusCode::FOUND
                | StatusCode::TEMPORARY_REDIRECT
                | StatusCode::PERMANENT_REDIRECT
        ) {
            return Err(MonstercatError::ResizeFailed(format!(
                "期望重定向，实际状态码为 {status}"
            )));
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                MonstercatError::ResizeFailed(format!("重定向 ({status}) 缺少 Location 头"))
            })?;

        // Location 可能是相对地址，按请求地址解析为绝对地址
        let resolved = response.url().join(location).map_err(|e| {
            MonstercatError::ResizeFailed(format!("无法解析 Location '{location}': {e}"))
        })?;

        Ok(resolved.to_string())
    }
}
