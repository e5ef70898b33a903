// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 页面探测引擎
///
/// 基于 reqwest 的 HTTP 会话，供冒烟测试使用
pub mod http_probe;
pub mod traits;
