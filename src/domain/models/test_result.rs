// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 单条检查结果
///
/// 每个逻辑检查创建一次，追加到 [`TestRun`] 之后不再修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    /// 检查名称
    pub test: String,
    /// 是否通过
    pub success: bool,
    /// 详细信息
    pub details: String,
    /// 期望的状态码
    pub expected_status: Option<u16>,
    /// 实际的状态码
    pub actual_status: Option<u16>,
}

impl TestResult {
    pub fn passed(test: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            test: test.into(),
            success: true,
            details: details.into(),
            expected_status: None,
            actual_status: None,
        }
    }

    pub fn failed(test: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            test: test.into(),
            success: false,
            details: details.into(),
            expected_status: None,
            actual_status: None,
        }
    }

    /// 状态码不符合预期的失败记录
    pub fn unexpected_status(test: impl Into<String>, expected: u16, actual: u16) -> Self {
        Self {
            test: test.into(),
            success: false,
            details: format!("HTTP {}", actual),
            expected_status: Some(expected),
            actual_status: Some(actual),
        }
    }
}

/// 测试运行累加器
///
/// 按顺序保存所有检查结果，通过数与总数均由结果推导
#[derive(Debug, Default, Clone)]
pub struct TestRun {
    results: Vec<TestResult>,
}

impl TestRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一条检查结果并输出到控制台
    pub fn record(&mut self, result: TestResult) {
        if result.success {
            println!("✅ {} - PASSED", result.test);
        } else {
            println!("❌ {} - FAILED", result.test);
            if let (Some(expected), Some(actual)) = (result.expected_status, result.actual_status) {
                println!("   Expected status: {}, Got: {}", expected, actual);
            }
            if !result.details.is_empty() {
                println!("   Details: {}", result.details);
            }
            tracing::warn!(test = %result.test, details = %result.details, "Check failed");
        }
        self.results.push(result);
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    /// 通过率，未运行任何检查时为 0
    pub fn success_rate(&self) -> f64 {
        if self.results.is_empty() {
            0.0
        } else {
            self.passed() as f64 / self.total() as f64
        }
    }

    /// 所有检查都通过时为 true
    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }
}

#[cfg(test)]
#[path = "test_result_test.rs"]
mod tests;
