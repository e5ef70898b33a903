// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了两个校验工具使用的数据结构：
/// - 测试结果（test_result）：冒烟测试的单条检查记录与运行累加器
/// - 测试报告（test_report）：运行结束后落盘的 JSON 报告
/// - 文章（article）与商品（product）：托管数据库中的外部实体
/// - 行标识（row_id）：服务端生成的主键
/// - 生命周期实体（fixture）：描述如何为一张表生成、更新测试行
pub mod article;
pub mod fixture;
pub mod product;
pub mod row_id;
pub mod test_report;
pub mod test_result;
