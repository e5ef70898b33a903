// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含冒烟测试套件与数据库 CRUD 校验用例
pub mod application;

/// 配置模块
///
/// 处理配置文件与环境变量
pub mod config;

/// 领域模块
///
/// 包含测试结果、外部实体与仓库接口
pub mod domain;

/// 引擎模块
///
/// 实现 HTTP 页面探测
pub mod engines;

/// 基础设施模块
///
/// 提供 PostgREST 表仓库与报告存储
pub mod infrastructure;

/// 工具模块
pub mod utils;
