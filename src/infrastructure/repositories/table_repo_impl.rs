// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::row_id::RowId;
use crate::domain::repositories::table_repository::{RepositoryError, TableRepository};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_RANGE};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

const PREFER: &str = "Prefer";
const RETURN_REPRESENTATION: &str = "return=representation";
const COUNT_EXACT: &str = "count=exact";

/// PostgREST 错误响应体
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

/// 基于 PostgREST 的表仓库实现
///
/// 通过托管服务的 `/rest/v1/<table>` 端点访问数据，使用 service-role 密钥认证
#[derive(Clone)]
pub struct PostgrestTableRepository {
    client: Client,
    base_url: String,
}

impl PostgrestTableRepository {
    /// 创建新的表仓库
    ///
    /// # 参数
    ///
    /// * `base_url` - 服务端点，例如 `https://<project>.supabase.co`
    /// * `service_key` - service-role 密钥，同时用作 `apikey` 与 Bearer 令牌
    /// * `timeout` - 可选的请求超时
    pub fn new(
        base_url: &str,
        service_key: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, RepositoryError> {
        let mut headers = HeaderMap::new();
        let key =
            HeaderValue::from_str(service_key).map_err(|_| RepositoryError::InvalidCredential)?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", service_key))
            .map_err(|_| RepositoryError::InvalidCredential)?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn send(&self, table: &str, request: RequestBuilder) -> Result<Response, RepositoryError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(table, status = status.as_u16(), "PostgREST response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = match serde_json::from_str::<PostgrestErrorBody>(&body) {
            Ok(parsed) => {
                let mut message = parsed
                    .message
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
                if let Some(details) = parsed.details.filter(|d| !d.is_empty()) {
                    message = format!("{} ({})", message, details);
                }
                if let Some(hint) = parsed.hint.filter(|h| !h.is_empty()) {
                    message = format!("{}; hint: {}", message, hint);
                }
                RepositoryError::Api {
                    status: status.as_u16(),
                    code: parsed.code,
                    message,
                }
            }
            Err(_) => RepositoryError::Api {
                status: status.as_u16(),
                code: None,
                message: if body.is_empty() {
                    status.canonical_reason().unwrap_or("error").to_string()
                } else {
                    body
                },
            },
        };
        error!(table, error = %err, "PostgREST request rejected");
        Err(err)
    }

    async fn rows(&self, table: &str, request: RequestBuilder) -> Result<Vec<Value>, RepositoryError> {
        let response = self.send(table, request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn exact_count(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<u64, RepositoryError> {
        let request = self
            .client
            .head(self.endpoint(table))
            .query(query)
            .header(PREFER, COUNT_EXACT);
        let response = self.send(table, request).await?;
        let header = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        match header.as_deref().and_then(parse_content_range_total) {
            Some(total) => Ok(total),
            None => Err(RepositoryError::InvalidContentRange(header)),
        }
    }
}

/// 解析 `Content-Range` 中的总数，例如 `0-9/42` 或 `*/42`
pub fn parse_content_range_total(value: &str) -> Option<u64> {
    let (_, total) = value.trim().rsplit_once('/')?;
    total.parse().ok()
}

#[async_trait]
impl TableRepository for PostgrestTableRepository {
    async fn insert(&self, table: &str, row: &Value) -> Result<Value, RepositoryError> {
        let request = self
            .client
            .post(self.endpoint(table))
            .header(PREFER, RETURN_REPRESENTATION)
            .json(row);

        self.rows(table, request)
            .await?
            .into_iter()
            .next()
            .ok_or(RepositoryError::EmptyResponse)
    }

    async fn select(&self, table: &str, limit: Option<usize>) -> Result<Vec<Value>, RepositoryError> {
        let mut query = vec![("select", "*".to_string())];
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        let request = self.client.get(self.endpoint(table)).query(&query);
        self.rows(table, request).await
    }

    async fn find_by_id(&self, table: &str, id: &RowId) -> Result<Option<Value>, RepositoryError> {
        let request = self
            .client
            .get(self.endpoint(table))
            .query(&[("select", "*".to_string()), ("id", id.eq_filter())]);

        Ok(self.rows(table, request).await?.into_iter().next())
    }

    async fn update_by_id(
        &self,
        table: &str,
        id: &RowId,
        patch: &Value,
    ) -> Result<Value, RepositoryError> {
        let request = self
            .client
            .patch(self.endpoint(table))
            .query(&[("id", id.eq_filter())])
            .header(PREFER, RETURN_REPRESENTATION)
            .json(patch);

        self.rows(table, request)
            .await?
            .into_iter()
            .next()
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete_by_id(&self, table: &str, id: &RowId) -> Result<usize, RepositoryError> {
        let request = self
            .client
            .delete(self.endpoint(table))
            .query(&[("id", id.eq_filter())])
            .header(PREFER, RETURN_REPRESENTATION);

        Ok(self.rows(table, request).await?.len())
    }

    async fn count(&self, table: &str) -> Result<u64, RepositoryError> {
        self.exact_count(table, &[("select", "id".to_string())]).await
    }

    async fn column_exists(&self, table: &str, column: &str) -> Result<bool, RepositoryError> {
        let request = self
            .client
            .get(self.endpoint(table))
            .query(&[("select", column.to_string()), ("limit", "0".to_string())]);

        match self.send(table, request).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_undefined_column() => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn count_not_null(&self, table: &str, column: &str) -> Result<u64, RepositoryError> {
        self.exact_count(
            table,
            &[
                ("select", "id".to_string()),
                (column, "not.is.null".to_string()),
            ],
        )
        .await
    }

    async fn probe_table(&self, table: &str) -> Result<usize, RepositoryError> {
        let request = self
            .client
            .get(self.endpoint(table))
            .query(&[("select", "id".to_string()), ("limit", "1".to_string())]);

        Ok(self.rows(table, request).await?.len())
    }
}
