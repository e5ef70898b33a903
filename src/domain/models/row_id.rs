// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// 服务端生成的行主键
///
/// 数据库中 `id` 列可能是整数或 UUID，这里统一保存为 JSON 值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(Value);

impl RowId {
    /// 从一行数据中提取 `id` 列
    pub fn from_row(row: &Value) -> Option<Self> {
        match row.get("id")? {
            v @ (Value::Number(_) | Value::String(_)) => Some(Self(v.clone())),
            _ => None,
        }
    }

    /// PostgREST 等值过滤表达式
    pub fn eq_filter(&self) -> String {
        format!("eq.{}", self)
    }
}

impl From<i64> for RowId {
    fn from(id: i64) -> Self {
        Self(Value::from(id))
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}
