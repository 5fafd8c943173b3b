// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Where pages come from.
//!
//! The index only needs two things from the outside world: the block tree of a
//! page (or of a block with children, same call, same shape) and a page's
//! display metadata. [`DocumentSource`] is that seam.
//!
//! Three implementations:
//! - [`MemorySource`]: blocks held in a map. Tests build corpora with it.
//! - [`SnapshotSource`]: a JSON corpus snapshot on disk, for offline use.
//! - [`NotionSource`] (feature `notion`): the live Notion API over blocking HTTP.
//!   No retries, no pagination past the first page of children.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::SourceError;
use crate::types::{Block, PageMeta};

/// Supplies page content and metadata.
///
/// `Send + Sync` so pages can be fetched in parallel. Implementations must not
/// share mutable state across calls.
pub trait DocumentSource: Send + Sync {
    /// Top-level blocks of a page, or the children of a block. Same shape either way.
    fn fetch_blocks(&self, id: &str) -> Result<Vec<Block>, SourceError>;

    /// Canonical URL and title of a page.
    fn fetch_metadata(&self, key: &str) -> Result<PageMeta, SourceError>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for &S {
    fn fetch_blocks(&self, id: &str) -> Result<Vec<Block>, SourceError> {
        (**self).fetch_blocks(id)
    }

    fn fetch_metadata(&self, key: &str) -> Result<PageMeta, SourceError> {
        (**self).fetch_metadata(key)
    }
}

// ============================================================================
// IN-MEMORY
// ============================================================================

/// Pages and child-block collections keyed by id.
///
/// A block marked `has_children` whose id has no entry here fails to fetch,
/// which is how tests simulate retrieval errors.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    blocks: HashMap<String, Vec<Block>>,
    meta: HashMap<String, PageMeta>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page with its top-level blocks.
    pub fn insert_page(&mut self, key: &str, meta: PageMeta, blocks: Vec<Block>) -> &mut Self {
        self.blocks.insert(key.to_string(), blocks);
        self.meta.insert(key.to_string(), meta);
        self
    }

    /// Register a page's blocks without metadata; metadata lookups will fail.
    pub fn insert_blocks(&mut self, id: &str, blocks: Vec<Block>) -> &mut Self {
        self.blocks.insert(id.to_string(), blocks);
        self
    }

    /// Register the children of a block.
    pub fn insert_children(&mut self, block_id: &str, children: Vec<Block>) -> &mut Self {
        self.insert_blocks(block_id, children)
    }

    pub fn len(&self) -> usize {
        self.meta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meta.is_empty()
    }
}

impl DocumentSource for MemorySource {
    fn fetch_blocks(&self, id: &str) -> Result<Vec<Block>, SourceError> {
        self.blocks
            .get(id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(id.to_string()))
    }

    fn fetch_metadata(&self, key: &str) -> Result<PageMeta, SourceError> {
        self.meta
            .get(key)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(key.to_string()))
    }
}

// ============================================================================
// SNAPSHOT FILE
// ============================================================================

/// One page in a snapshot file.
#[derive(Deserialize, Debug)]
struct SnapshotPage {
    id: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    blocks: Vec<Block>,
}

#[derive(Deserialize, Debug)]
struct SnapshotFile {
    pages: Vec<SnapshotPage>,
    /// Block id → child blocks, for every block with `has_children`.
    #[serde(default)]
    children: HashMap<String, Vec<Block>>,
}

/// A corpus captured as JSON:
///
/// ```json
/// {
///   "pages": [ { "id": "p1", "url": "https://…", "title": "…", "blocks": [ … ] } ],
///   "children": { "block-id": [ … ] }
/// }
/// ```
///
/// Blocks use the Notion block JSON shape. Page ids and `children` keys share
/// one id space, so a `children` key naming a page is rejected.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    inner: MemorySource,
    page_ids: Vec<String>,
}

impl SnapshotSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let content = fs::read_to_string(path)
            .map_err(|e| SourceError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let file: SnapshotFile = serde_json::from_str(json)?;

        let mut inner = MemorySource::new();
        let mut page_ids = Vec::with_capacity(file.pages.len());
        for page in file.pages {
            let meta = PageMeta {
                url: page.url,
                title: page.title,
            };
            inner.insert_page(&page.id, meta, page.blocks);
            page_ids.push(page.id);
        }
        for (block_id, children) in file.children {
            if inner.meta.contains_key(&block_id) {
                return Err(SourceError::Decode(format!(
                    "children key '{}' is also a page id",
                    block_id
                )));
            }
            inner.insert_children(&block_id, children);
        }

        Ok(SnapshotSource { inner, page_ids })
    }

    /// Page ids in file order.
    pub fn page_ids(&self) -> &[String] {
        &self.page_ids
    }
}

impl DocumentSource for SnapshotSource {
    fn fetch_blocks(&self, id: &str) -> Result<Vec<Block>, SourceError> {
        self.inner.fetch_blocks(id)
    }

    fn fetch_metadata(&self, key: &str) -> Result<PageMeta, SourceError> {
        self.inner.fetch_metadata(key)
    }
}

// ============================================================================
// NOTION API
// ============================================================================

#[cfg(feature = "notion")]
pub use notion::NotionSource;

#[cfg(feature = "notion")]
mod notion {
    use std::time::Duration;

    use reqwest::blocking::{Client, Response};
    use serde::Deserialize;

    use super::DocumentSource;
    use crate::error::SourceError;
    use crate::types::{Block, PageMeta};

    pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";
    pub const NOTION_VERSION: &str = "2022-06-28";

    #[derive(Deserialize)]
    struct BlockList {
        results: Vec<Block>,
    }

    #[derive(Deserialize)]
    struct PageResponse {
        #[serde(default)]
        url: String,
        #[serde(default)]
        properties: serde_json::Value,
    }

    /// Live Notion workspace reached through an integration token.
    #[derive(Debug, Clone)]
    pub struct NotionSource {
        client: Client,
        base_url: String,
        token: String,
    }

    impl NotionSource {
        pub fn new(token: &str) -> Result<Self, SourceError> {
            Self::with_base_url(token, DEFAULT_BASE_URL)
        }

        /// Point at another API root (a proxy or a local mock).
        pub fn with_base_url(token: &str, base_url: &str) -> Result<Self, SourceError> {
            let client = Client::builder()
                .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
                .timeout(Duration::from_secs(30))
                .build()
                .map_err(|e| SourceError::Transport(e.to_string()))?;
            Ok(NotionSource {
                client,
                base_url: base_url.trim_end_matches('/').to_string(),
                token: token.to_string(),
            })
        }

        fn get(&self, path: &str) -> Result<Response, SourceError> {
            let url = format!("{}/{}", self.base_url, path);
            tracing::debug!(%url, "GET");
            let response = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .header("Notion-Version", NOTION_VERSION)
                .header("Content-Type", "application/json")
                .send()
                .map_err(|e| SourceError::Transport(format!("{}: {}", url, e)))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().unwrap_or_default();
                return Err(SourceError::Http {
                    status: status.as_u16(),
                    body,
                });
            }
            Ok(response)
        }
    }

    /// `properties.Name.title[0].plain_text`, if the page has one.
    pub(super) fn title_from_properties(properties: &serde_json::Value) -> Option<String> {
        properties
            .get("Name")?
            .get("title")?
            .get(0)?
            .get("plain_text")?
            .as_str()
            .map(str::to_string)
    }

    impl DocumentSource for NotionSource {
        fn fetch_blocks(&self, id: &str) -> Result<Vec<Block>, SourceError> {
            let list: BlockList = self
                .get(&format!("blocks/{}/children", id))?
                .json()
                .map_err(|e| SourceError::Decode(format!("children of {}: {}", id, e)))?;
            Ok(list.results)
        }

        fn fetch_metadata(&self, key: &str) -> Result<PageMeta, SourceError> {
            let page: PageResponse = self
                .get(&format!("pages/{}", key))?
                .json()
                .map_err(|e| SourceError::Decode(format!("page {}: {}", key, e)))?;

            let title = title_from_properties(&page.properties).unwrap_or_else(|| {
                tracing::warn!(page = key, "page has no Name title; indexing without title");
                String::new()
            });
            Ok(PageMeta {
                url: page.url,
                title,
            })
        }
    }
}
