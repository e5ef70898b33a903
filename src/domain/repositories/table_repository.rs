// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::models::row_id::RowId;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 网络或传输错误
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// 远程服务拒绝了请求
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },
    /// 响应体无法解析
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
    /// 写操作未返回任何行
    #[error("Empty response")]
    EmptyResponse,
    /// 计数响应缺少有效的 Content-Range
    #[error("Invalid Content-Range header: {0:?}")]
    InvalidContentRange(Option<String>),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
    /// 密钥无法作为请求头发送
    #[error("Service key is not a valid header value")]
    InvalidCredential,
}

impl RepositoryError {
    /// 是否为“列不存在”错误
    pub fn is_undefined_column(&self) -> bool {
        matches!(
            self,
            RepositoryError::Api { code: Some(code), .. } if code == "42703" || code == "PGRST204"
        )
    }
}

/// 表仓库特质
///
/// 以 JSON 行为单位访问托管数据库中的表
#[async_trait]
pub trait TableRepository: Send + Sync {
    /// 插入一行并返回服务端生成的完整行
    async fn insert(&self, table: &str, row: &Value) -> Result<Value, RepositoryError>;
    /// 查询行，`limit` 为 `None` 时返回全部
    async fn select(&self, table: &str, limit: Option<usize>) -> Result<Vec<Value>, RepositoryError>;
    /// 根据ID查找行
    async fn find_by_id(&self, table: &str, id: &RowId) -> Result<Option<Value>, RepositoryError>;
    /// 根据ID更新行并返回更新后的行
    async fn update_by_id(
        &self,
        table: &str,
        id: &RowId,
        patch: &Value,
    ) -> Result<Value, RepositoryError>;
    /// 根据ID删除行，返回删除的行数
    async fn delete_by_id(&self, table: &str, id: &RowId) -> Result<usize, RepositoryError>;
    /// 精确统计表中行数
    async fn count(&self, table: &str) -> Result<u64, RepositoryError>;
    /// 探测列是否存在
    async fn column_exists(&self, table: &str, column: &str) -> Result<bool, RepositoryError>;
    /// 统计某列非空的行数
    async fn count_not_null(&self, table: &str, column: &str) -> Result<u64, RepositoryError>;
    /// 检查表是否可访问，返回读取到的行数（最多一行）
    async fn probe_table(&self, table: &str) -> Result<usize, RepositoryError>;
}
