// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含与外部系统交互的技术实现：
/// - 仓库实现（repositories）：基于 PostgREST 的表仓库
/// - 存储（storage）：冒烟测试报告的本地落盘
///
/// 基础设施层依赖于领域层的抽象接口
pub mod repositories;
pub mod storage;
