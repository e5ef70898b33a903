// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, SecondsFormat, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::test_result::{TestResult, TestRun};

/// 冒烟测试报告
///
/// 运行结束时写入磁盘的 JSON 文档
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestReport {
    /// ISO-8601 时间戳
    pub timestamp: String,
    /// 检查总数
    pub total_tests: usize,
    /// 通过的检查数
    pub passed_tests: usize,
    /// 通过率（0 到 1）
    pub success_rate: f64,
    /// 按执行顺序排列的检查结果
    pub results: Vec<TestResult>,
}

impl TestReport {
    pub fn from_run<Tz>(run: &TestRun, at: DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            timestamp: at.to_rfc3339_opts(SecondsFormat::Micros, false),
            total_tests: run.total(),
            passed_tests: run.passed(),
            success_rate: run.success_rate(),
            results: run.results().to_vec(),
        }
    }

    pub fn all_passed(&self) -> bool {
        self.passed_tests == self.total_tests
    }
}
