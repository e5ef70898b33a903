// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::article::Article;
use crate::domain::models::fixture::LifecycleEntity;
use crate::domain::models::product::Product;
use crate::domain::models::row_id::RowId;
use crate::domain::repositories::table_repository::{RepositoryError, TableRepository};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// 生命周期阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// 插入测试行
    Create,
    /// 按ID读回并比对插入的字段
    ReadBack,
    /// 读取表中的行
    ReadAll,
    /// 更新并按ID读回比对
    Update,
    /// 按ID删除
    Delete,
    /// 确认删除后按ID读取不到任何行
    ConfirmDelete,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Create,
        Stage::ReadBack,
        Stage::ReadAll,
        Stage::Update,
        Stage::Delete,
        Stage::ConfirmDelete,
    ];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Create => "CREATE",
            Stage::ReadBack => "READ BACK",
            Stage::ReadAll => "READ",
            Stage::Update => "UPDATE",
            Stage::Delete => "DELETE",
            Stage::ConfirmDelete => "CONFIRM DELETE",
        };
        f.write_str(name)
    }
}

/// 阶段结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Passed,
    Failed(String),
    /// 前置阶段失败，未执行
    Skipped,
}

/// 单张表的生命周期结果
#[derive(Debug, Clone)]
pub struct LifecycleReport {
    pub table: &'static str,
    pub id: Option<RowId>,
    stages: Vec<(Stage, StageOutcome)>,
}

impl LifecycleReport {
    fn new(table: &'static str) -> Self {
        Self {
            table,
            id: None,
            stages: Vec::with_capacity(Stage::ALL.len()),
        }
    }

    fn push(&mut self, stage: Stage, outcome: StageOutcome) {
        if let StageOutcome::Failed(reason) = &outcome {
            warn!(table = self.table, %stage, reason = %reason, "Lifecycle stage failed");
        }
        self.stages.push((stage, outcome));
    }

    fn skip_remaining(&mut self) {
        for stage in Stage::ALL {
            if self.outcome(stage).is_none() {
                self.stages.push((stage, StageOutcome::Skipped));
            }
        }
    }

    pub fn outcome(&self, stage: Stage) -> Option<&StageOutcome> {
        self.stages
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, outcome)| outcome)
    }

    pub fn stages(&self) -> &[(Stage, StageOutcome)] {
        &self.stages
    }

    pub fn all_passed(&self) -> bool {
        self.stages
            .iter()
            .all(|(_, outcome)| *outcome == StageOutcome::Passed)
    }
}

/// `embedding` 列的探测结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbeddingStatus {
    /// 列存在，附带非空行数
    Present(u64),
    /// 列尚未创建
    ColumnMissing,
    /// 探测本身失败
    Unknown(String),
}

/// 数据库统计
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseStats {
    pub articles: Result<u64, String>,
    pub products: Result<u64, String>,
    pub embeddings: EmbeddingStatus,
}

/// 一次完整校验的汇总
#[derive(Debug, Clone)]
pub struct VerificationSummary {
    pub initial_stats: DatabaseStats,
    pub table_access: Vec<(String, Result<usize, String>)>,
    pub articles: LifecycleReport,
    pub products: LifecycleReport,
    pub final_stats: DatabaseStats,
}

impl VerificationSummary {
    pub fn all_passed(&self) -> bool {
        self.articles.all_passed() && self.products.all_passed()
    }
}

fn banner(title: &str) {
    println!();
    println!("{}", "=".repeat(50));
    println!("{}", title);
    println!("{}", "=".repeat(50));
}

fn decode<E: LifecycleEntity>(row: Value) -> Result<E, RepositoryError> {
    Ok(serde_json::from_value(row)?)
}

/// 数据库 CRUD 校验用例
///
/// 对 `articles` 与 `products` 表执行插入、读取、更新、删除，并输出结果
pub struct CrudVerifier<R> {
    repo: Arc<R>,
}

impl<R> CrudVerifier<R>
where
    R: TableRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// 统计两张表的行数，并探测 `products.embedding`
    pub async fn check_stats(&self) -> DatabaseStats {
        banner("STATISTICI DATABASE");

        let articles = self.repo.count(Article::TABLE).await.map_err(|e| e.to_string());
        match &articles {
            Ok(count) => println!("📊 Total Articles: {}", count),
            Err(e) => println!("❌ Eroare la count articles: {}", e),
        }

        let products = self.repo.count(Product::TABLE).await.map_err(|e| e.to_string());
        match &products {
            Ok(count) => println!("📦 Total Products: {}", count),
            Err(e) => println!("❌ Eroare la count products: {}", e),
        }

        let embeddings = match self.repo.column_exists(Product::TABLE, "embedding").await {
            Ok(true) => match self.repo.count_not_null(Product::TABLE, "embedding").await {
                Ok(count) => EmbeddingStatus::Present(count),
                Err(e) => EmbeddingStatus::Unknown(e.to_string()),
            },
            Ok(false) => EmbeddingStatus::ColumnMissing,
            Err(e) => EmbeddingStatus::Unknown(e.to_string()),
        };
        match &embeddings {
            EmbeddingStatus::Present(count) => println!("🧠 Products cu embeddings: {}", count),
            EmbeddingStatus::ColumnMissing => {
                println!("ℹ️  Coloana embedding nu există încă în tabelul products")
            }
            EmbeddingStatus::Unknown(e) => {
                println!("ℹ️  Nu s-a putut verifica embeddings: {}", e)
            }
        }

        DatabaseStats {
            articles,
            products,
            embeddings,
        }
    }

    /// 检查附加表是否可访问
    pub async fn probe_tables(&self, tables: &[String]) -> Vec<(String, Result<usize, String>)> {
        if tables.is_empty() {
            return Vec::new();
        }
        banner("VERIFICARE TABELE");

        let mut results = Vec::with_capacity(tables.len());
        for table in tables {
            let outcome = self.repo.probe_table(table).await.map_err(|e| e.to_string());
            match &outcome {
                Ok(rows) => println!(
                    "✅ Tabelul {} există și este accesibil ({} rânduri citite)",
                    table, rows
                ),
                Err(e) => {
                    println!("❌ Tabelul {} nu există sau nu este accesibil", table);
                    println!("   Error: {}", e);
                }
            }
            results.push((table.clone(), outcome));
        }
        results
    }

    /// 对一张表执行完整的 CRUD 生命周期
    ///
    /// 插入失败时跳过后续阶段；插入成功但无法解码时直接删除；读取或更新失败不影响删除
    pub async fn run_lifecycle<E: LifecycleEntity>(&self, now: DateTime<Utc>) -> LifecycleReport {
        banner(&format!("TESTARE CRUD {}", E::TABLE.to_uppercase()));
        let mut report = LifecycleReport::new(E::TABLE);
        let table = E::TABLE;

        // 1. CREATE
        println!("\n1️⃣ CREATE {}...", E::LABEL);
        let draft = E::draft(now);
        let raw = match self.insert::<E>(&draft).await {
            Ok(raw) => raw,
            Err(e) => {
                println!("❌ Eroare la CREATE: {}", e);
                report.push(Stage::Create, StageOutcome::Failed(e.to_string()));
                report.skip_remaining();
                return report;
            }
        };
        let Some(id) = RowId::from_row(&raw) else {
            println!("❌ Eroare la CREATE: rândul inserat nu are ID");
            report.push(
                Stage::Create,
                StageOutcome::Failed("inserted row carries no id".into()),
            );
            report.skip_remaining();
            return report;
        };
        report.id = Some(id.clone());

        // 行已在服务端创建，解码失败时仍需删除
        let created = match decode::<E>(raw) {
            Ok(created) => created,
            Err(e) => {
                println!("❌ Eroare la CREATE: {}", e);
                report.push(Stage::Create, StageOutcome::Failed(e.to_string()));
                for stage in [Stage::ReadBack, Stage::ReadAll, Stage::Update] {
                    report.push(stage, StageOutcome::Skipped);
                }
                self.remove::<E>(&id, &mut report).await;
                return report;
            }
        };
        println!("✅ {} creat cu succes! ID: {}", E::LABEL, id);
        for line in created.describe_created() {
            println!("   {}", line);
        }
        report.push(Stage::Create, StageOutcome::Passed);
        info!(table, %id, "Test row created");

        // Read back by id
        let before = match self.find::<E>(&id).await {
            Ok(Some(row)) if row.matches_draft(&draft) => {
                report.push(Stage::ReadBack, StageOutcome::Passed);
                row
            }
            Ok(Some(row)) => {
                println!("❌ Câmpurile citite nu corespund celor inserate");
                report.push(
                    Stage::ReadBack,
                    StageOutcome::Failed("read-back fields differ from inserted values".into()),
                );
                row
            }
            Ok(None) => {
                println!("❌ Rândul inserat nu a putut fi citit după ID");
                report.push(
                    Stage::ReadBack,
                    StageOutcome::Failed("inserted row not found by id".into()),
                );
                created
            }
            Err(e) => {
                println!("❌ Eroare la citirea după ID: {}", e);
                report.push(Stage::ReadBack, StageOutcome::Failed(e.to_string()));
                created
            }
        };

        // 2. READ
        match E::READ_LIMIT {
            Some(limit) => println!("\n2️⃣ READ {} (first {})...", E::PLURAL, limit),
            None => println!("\n2️⃣ READ {} (all)...", E::PLURAL),
        }
        match self.repo.select(table, E::READ_LIMIT).await {
            Ok(rows) => {
                println!("✅ {} {} găsite", rows.len(), E::PLURAL);
                for row in rows.into_iter().take(E::READ_DISPLAY) {
                    let line = match decode::<E>(row.clone()) {
                        Ok(entity) => entity.summary(),
                        Err(_) => row.to_string(),
                    };
                    println!("   - {}", line);
                }
                report.push(Stage::ReadAll, StageOutcome::Passed);
            }
            Err(e) => {
                println!("❌ Eroare la READ: {}", e);
                report.push(Stage::ReadAll, StageOutcome::Failed(e.to_string()));
            }
        }

        // 3. UPDATE
        println!("\n3️⃣ UPDATE {} (ID: {})...", E::LABEL, id);
        let patch = E::patch();
        match self.update::<E>(&id, &patch).await {
            Ok(updated) => {
                println!("✅ {} actualizat cu succes!", E::LABEL);
                for line in updated.describe_updated() {
                    println!("   {}", line);
                }
                let outcome = match self.find::<E>(&id).await {
                    Ok(Some(row)) if row.matches_patch(&patch, &before) => StageOutcome::Passed,
                    Ok(Some(_)) => {
                        StageOutcome::Failed("updated row does not reflect the patch".into())
                    }
                    Ok(None) => StageOutcome::Failed("updated row not found by id".into()),
                    Err(e) => StageOutcome::Failed(e.to_string()),
                };
                if let StageOutcome::Failed(reason) = &outcome {
                    println!("❌ Verificare UPDATE eșuată: {}", reason);
                }
                report.push(Stage::Update, outcome);
            }
            Err(e) => {
                println!("❌ Eroare la UPDATE: {}", e);
                report.push(Stage::Update, StageOutcome::Failed(e.to_string()));
            }
        }

        // 4. DELETE
        self.remove::<E>(&id, &mut report).await;

        report
    }

    /// 执行完整校验：统计、附加表探测、两张表的生命周期、最终统计
    pub async fn run(&self, probe_tables: &[String]) -> VerificationSummary {
        let initial_stats = self.check_stats().await;
        let table_access = self.probe_tables(probe_tables).await;
        let articles = self.run_lifecycle::<Article>(Utc::now()).await;
        let products = self.run_lifecycle::<Product>(Utc::now()).await;
        let final_stats = self.check_stats().await;

        banner("✅ TESTE COMPLETE!");

        VerificationSummary {
            initial_stats,
            table_access,
            articles,
            products,
            final_stats,
        }
    }

    /// 按ID删除并确认删除结果
    async fn remove<E: LifecycleEntity>(&self, id: &RowId, report: &mut LifecycleReport) {
        let table = E::TABLE;
        println!("\n4️⃣ DELETE {} (ID: {})...", E::LABEL, id);
        match self.repo.delete_by_id(table, id).await {
            Ok(0) => {
                println!("❌ Eroare la DELETE: niciun rând șters");
                report.push(Stage::Delete, StageOutcome::Failed("no rows deleted".into()));
            }
            Ok(_) => {
                println!("✅ {} șters cu succes!", E::LABEL);
                report.push(Stage::Delete, StageOutcome::Passed);
            }
            Err(e) => {
                println!("❌ Eroare la DELETE: {}", e);
                warn!(table, %id, "Test row left behind");
                report.push(Stage::Delete, StageOutcome::Failed(e.to_string()));
            }
        }

        let confirm = match self.repo.find_by_id(table, id).await {
            Ok(None) => StageOutcome::Passed,
            Ok(Some(_)) => {
                println!("❌ Rândul {} încă există după DELETE", id);
                StageOutcome::Failed("row still present after delete".into())
            }
            Err(e) => StageOutcome::Failed(e.to_string()),
        };
        report.push(Stage::ConfirmDelete, confirm);
    }

    async fn insert<E: LifecycleEntity>(&self, draft: &E::Draft) -> Result<Value, RepositoryError> {
        let row = serde_json::to_value(draft)?;
        self.repo.insert(E::TABLE, &row).await
    }

    async fn find<E: LifecycleEntity>(&self, id: &RowId) -> Result<Option<E>, RepositoryError> {
        self.repo
            .find_by_id(E::TABLE, id)
            .await?
            .map(decode::<E>)
            .transpose()
    }

    async fn update<E: LifecycleEntity>(
        &self,
        id: &RowId,
        patch: &E::Patch,
    ) -> Result<E, RepositoryError> {
        let patch = serde_json::to_value(patch)?;
        decode(self.repo.update_by_id(E::TABLE, id, &patch).await?)
    }
}

#[cfg(test)]
#[path = "crud_lifecycle_test.rs"]
mod tests;
