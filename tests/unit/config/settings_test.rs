// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置设置测试模块
///
/// 验证默认配置可以在没有任何配置文件的情况下加载

#[cfg(test)]
mod tests {
    use otka_verify::config::settings::{Settings, SettingsError};

    #[test]
    fn test_config_loading_with_defaults() {
        match Settings::new() {
            Ok(settings) => {
                println!("✓ Configuration loaded successfully");
                println!("  Base URL: {}", settings.smoke.base_url);
                println!("  Report: {}", settings.smoke.report_path.display());
                println!(
                    "  Database: {}",
                    if settings.database.url.is_some() {
                        "[SET]"
                    } else {
                        "[NOT SET]"
                    }
                );

                assert!(!settings.smoke.base_url.is_empty());
                assert!(settings
                    .smoke
                    .report_path
                    .to_string_lossy()
                    .ends_with(".json"));
            }
            Err(e) => {
                panic!("✗ Failed to load configuration: {}", e);
            }
        }
    }

    #[test]
    fn test_crud_verifier_requires_credentials() {
        let settings = Settings::from_toml_str("").unwrap();

        let err = settings.database.credentials().unwrap_err();

        assert!(matches!(err, SettingsError::Missing("database.url")));
        assert_eq!(err.to_string(), "Missing required setting: database.url");
    }
}
