// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fixture::{fractional_timestamp, LifecycleEntity};
use super::row_id::RowId;

/// 商品
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: RowId,
    pub sku: String,
    pub name: String,
    pub slug: String,
    /// 公开零售价（含税）
    pub price_public_ttc: f64,
    /// 合作伙伴净价
    #[serde(default)]
    pub price_partner_net: Option<f64>,
    pub stock_qty: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub gallery: Option<Vec<String>>,
    /// 向量列可能尚未创建
    #[serde(default)]
    pub embedding: Option<Value>,
}

/// 新建商品
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    pub slug: String,
    pub price_public_ttc: f64,
    pub price_partner_net: f64,
    pub stock_qty: i64,
    pub description: String,
    pub category: String,
    pub gallery: Vec<String>,
}

/// 商品更新字段
#[derive(Debug, Clone, Serialize)]
pub struct ProductUpdate {
    pub name: String,
    pub price_public_ttc: f64,
    pub stock_qty: i64,
}

impl LifecycleEntity for Product {
    const TABLE: &'static str = "products";
    const LABEL: &'static str = "Product";
    const PLURAL: &'static str = "produse";
    const READ_LIMIT: Option<usize> = Some(5);
    const READ_DISPLAY: usize = 5;

    type Draft = NewProduct;
    type Patch = ProductUpdate;

    fn draft(now: DateTime<Utc>) -> NewProduct {
        NewProduct {
            sku: format!("TEST-{}", now.timestamp()),
            name: "Produs Test Rust".to_string(),
            slug: format!("produs-test-{}", fractional_timestamp(now)),
            price_public_ttc: 1299.99,
            price_partner_net: 1099.99,
            stock_qty: 10,
            description: "Descriere produs de test".to_string(),
            category: "Test Category".to_string(),
            gallery: vec!["https://example.com/product1.jpg".to_string()],
        }
    }

    fn patch() -> ProductUpdate {
        ProductUpdate {
            name: "Produs Test UPDATED".to_string(),
            price_public_ttc: 1499.99,
            stock_qty: 15,
        }
    }

    fn matches_draft(&self, draft: &NewProduct) -> bool {
        self.sku == draft.sku
            && self.name == draft.name
            && self.slug == draft.slug
            && self.price_public_ttc == draft.price_public_ttc
            && self.price_partner_net == Some(draft.price_partner_net)
            && self.stock_qty == draft.stock_qty
            && self.description.as_deref() == Some(draft.description.as_str())
            && self.category.as_deref() == Some(draft.category.as_str())
            && self.gallery.as_deref() == Some(draft.gallery.as_slice())
    }

    fn matches_patch(&self, patch: &ProductUpdate, before: &Product) -> bool {
        self.name == patch.name
            && self.price_public_ttc == patch.price_public_ttc
            && self.stock_qty == patch.stock_qty
            && self.sku == before.sku
            && self.slug == before.slug
            && self.price_partner_net == before.price_partner_net
            && self.description == before.description
            && self.category == before.category
            && self.gallery == before.gallery
    }

    fn describe_created(&self) -> Vec<String> {
        vec![
            format!("SKU: {}", self.sku),
            format!("Name: {}", self.name),
            format!("Price: {} RON", self.price_public_ttc),
        ]
    }

    fn describe_updated(&self) -> Vec<String> {
        vec![
            format!("Nou name: {}", self.name),
            format!("Nou price: {} RON", self.price_public_ttc),
            format!("Nou stock: {} buc", self.stock_qty),
        ]
    }

    fn summary(&self) -> String {
        format!(
            "{} | SKU: {} | {} RON",
            self.name, self.sku, self.price_public_ttc
        )
    }
}
