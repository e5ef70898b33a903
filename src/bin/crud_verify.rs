// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use otka_verify::application::use_cases::crud_lifecycle::CrudVerifier;
use otka_verify::config::settings::Settings;
use otka_verify::infrastructure::repositories::table_repo_impl::PostgrestTableRepository;
use otka_verify::utils::telemetry;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

/// 数据库 CRUD 校验入口
///
/// 端点与 service-role 密钥通过 `OTKA__DATABASE__URL` 和
/// `OTKA__DATABASE__SERVICE_KEY` 提供
#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    telemetry::init_telemetry();

    let settings = Settings::new()?;
    let (url, service_key) = settings.database.credentials()?;
    let repo = PostgrestTableRepository::new(url, service_key, None)?;
    info!(url = repo.base_url(), "Database client ready");

    println!("\n🚀 Începere teste CRUD Supabase pentru OTKA");
    println!("🔗 Conectare la: {}", repo.base_url());

    let verifier = CrudVerifier::new(Arc::new(repo));
    let summary = verifier.run(&settings.database.probe_tables).await;

    Ok(if summary.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
