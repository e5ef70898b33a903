// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 探测错误类型
#[derive(Error, Debug)]
pub enum ProbeError {
    /// 请求失败（连接拒绝、超时、DNS 等）
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 目标地址无效
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// 重定向处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Redirects {
    /// 跟随重定向直到最终页面
    Follow,
    /// 不跟随，直接返回 3xx 响应
    Manual,
}

/// 探测响应
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    /// HTTP状态码
    pub status: u16,
    /// 跟随重定向后的最终URL
    pub final_url: String,
    /// `Location` 响应头
    pub location: Option<String>,
    /// 响应内容
    pub body: String,
}

impl ProbeResponse {
    pub fn is_redirect(&self) -> bool {
        matches!(self.status, 301 | 302 | 307 | 308)
    }
}

/// 页面获取特质
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 对站点内路径执行 GET 请求
    async fn fetch(&self, path: &str, redirects: Redirects) -> Result<ProbeResponse, ProbeError>;

    /// 被测站点的基础URL
    fn base_url(&self) -> &str;
}
