// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::domain::models::test_report::TestReport;

/// 报告存储错误
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// 本地文件系统报告存储
pub struct LocalReportStorage {
    path: PathBuf,
}

impl LocalReportStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 以缩进 JSON 写入报告，必要时创建父目录
    pub async fn save(&self, report: &TestReport) -> Result<(), ReportError> {
        let data = serde_json::to_vec_pretty(report)?;

        // 确保目录存在
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(&self.path).await?;
        file.write_all(&data).await?;
        file.flush().await?;

        info!(path = %self.path.display(), "Report saved");
        Ok(())
    }
}
