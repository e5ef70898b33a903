// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{PageFetcher, ProbeError, ProbeResponse, Redirects};
use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::header::LOCATION;
use reqwest::{redirect, Client};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("otka-verify/", env!("CARGO_PKG_VERSION"));

/// HTTP 探测会话
///
/// 在整个运行期间复用两个共享同一 Cookie 存储的客户端：
/// 一个跟随重定向，一个不跟随
pub struct HttpProbe {
    base_url: String,
    following: Client,
    manual: Client,
}

impl HttpProbe {
    /// 创建新的探测会话
    ///
    /// # 参数
    ///
    /// * `base_url` - 被测站点地址
    /// * `timeout` - 可选的请求超时，未设置时使用客户端默认值
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ProbeError> {
        Url::parse(base_url)?;
        let jar = Arc::new(Jar::default());

        let build = |policy: redirect::Policy| {
            let mut builder = Client::builder()
                .user_agent(USER_AGENT)
                .cookie_provider(jar.clone())
                .redirect(policy);
            if let Some(timeout) = timeout {
                builder = builder.timeout(timeout);
            }
            builder.build()
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            following: build(redirect::Policy::default())?,
            manual: build(redirect::Policy::none())?,
        })
    }

    /// 拼接站点路径，保留基础URL中已有的路径前缀
    pub fn url_for(&self, path: &str) -> Result<Url, ProbeError> {
        Ok(Url::parse(&format!("{}{}", self.base_url, path))?)
    }
}

#[async_trait]
impl PageFetcher for HttpProbe {
    async fn fetch(&self, path: &str, redirects: Redirects) -> Result<ProbeResponse, ProbeError> {
        let url = self.url_for(path)?;
        let client = match redirects {
            Redirects::Follow => &self.following,
            Redirects::Manual => &self.manual,
        };

        let response = client.get(url).send().await?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        debug!(path, status, final_url = %final_url, ?redirects, "Probe response");

        Ok(ProbeResponse {
            status,
            final_url,
            location,
            body,
        })
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
