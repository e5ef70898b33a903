// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::fixture::{fractional_timestamp, LifecycleEntity};
use super::row_id::RowId;

/// 文章
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Article {
    pub id: RowId,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub published: bool,
}

/// 新建文章
#[derive(Debug, Clone, Serialize)]
pub struct NewArticle {
    pub slug: String,
    pub title: String,
    pub body: String,
    pub images: Vec<String>,
    pub published: bool,
}

/// 文章更新字段
#[derive(Debug, Clone, Serialize)]
pub struct ArticleUpdate {
    pub title: String,
    pub published: bool,
}

impl LifecycleEntity for Article {
    const TABLE: &'static str = "articles";
    const LABEL: &'static str = "Article";
    const PLURAL: &'static str = "articole";
    const READ_LIMIT: Option<usize> = None;
    const READ_DISPLAY: usize = 3;

    type Draft = NewArticle;
    type Patch = ArticleUpdate;

    fn draft(now: DateTime<Utc>) -> NewArticle {
        NewArticle {
            slug: format!("test-article-{}", fractional_timestamp(now)),
            title: "Test Article from Rust".to_string(),
            body: "Acesta este un articol de test pentru verificare CRUD.".to_string(),
            images: vec![
                "https://example.com/image1.jpg".to_string(),
                "https://example.com/image2.jpg".to_string(),
            ],
            published: false,
        }
    }

    fn patch() -> ArticleUpdate {
        ArticleUpdate {
            title: "Test Article UPDATED".to_string(),
            published: true,
        }
    }

    fn matches_draft(&self, draft: &NewArticle) -> bool {
        self.slug == draft.slug
            && self.title == draft.title
            && self.body.as_deref() == Some(draft.body.as_str())
            && self.images.as_deref() == Some(draft.images.as_slice())
            && self.published == draft.published
    }

    fn matches_patch(&self, patch: &ArticleUpdate, before: &Article) -> bool {
        self.title == patch.title
            && self.published == patch.published
            && self.slug == before.slug
            && self.body == before.body
            && self.images == before.images
    }

    fn describe_created(&self) -> Vec<String> {
        vec![format!("Title: {}", self.title)]
    }

    fn describe_updated(&self) -> Vec<String> {
        vec![
            format!("Nou title: {}", self.title),
            format!("Published: {}", self.published),
        ]
    }

    fn summary(&self) -> String {
        format!("{} (published: {})", self.title, self.published)
    }
}
