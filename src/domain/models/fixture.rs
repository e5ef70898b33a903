// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;


/// 可执行完整 CRUD 生命周期的实体
///
/// 描述一张表：如何生成唯一的测试行、如何更新、如何在控制台展示
pub trait LifecycleEntity: DeserializeOwned + Send + Sync {
    /// 表名
    const TABLE: &'static str;
    /// 控制台显示的实体名称
    const LABEL: &'static str;
    /// 控制台显示的复数名称
    const PLURAL: &'static str;
    /// 读取阶段的查询行数上限，`None` 表示全部
    const READ_LIMIT: Option<usize>;
    /// 读取阶段展示的行数
    const READ_DISPLAY: usize;

    /// 插入时提交的字段
    type Draft: Serialize + Send + Sync;
    /// 更新时提交的字段
    type Patch: Serialize + Send + Sync;

    /// 基于当前时间生成唯一的测试行
    fn draft(now: DateTime<Utc>) -> Self::Draft;

    fn patch() -> Self::Patch;

    /// 用户提交的字段是否与读回的行一致
    fn matches_draft(&self, draft: &Self::Draft) -> bool;

    /// 更新后的行是否反映了补丁，且未更新的字段保持不变
    fn matches_patch(&self, patch: &Self::Patch, before: &Self) -> bool;

    fn describe_created(&self) -> Vec<String>;

    fn describe_updated(&self) -> Vec<String>;

    /// 读取阶段的单行摘要
    fn summary(&self) -> String;
}

/// `datetime.timestamp()` 风格的时间戳，保留微秒
pub fn fractional_timestamp(now: DateTime<Utc>) -> String {
    format!("{}.{:06}", now.timestamp(), now.timestamp_subsec_micros())
}
