// src/pipeline.rs
//! The export pipeline: fetch → enrich → materialize → save.
//!
//! Every step awaits the previous one. Only fetching and saving can fail
//! the run; bookmark enrichment and image downloads degrade gracefully.

use crate::api::{FetchMetadata, NotionFetcher, NotionRepository};
use crate::bookmarks::{BookmarkEnricher, MetadataSource};
use crate::config::ExportConfig;
use crate::error::AppError;
use crate::images::{AssetFetcher, ImageMaterializer, MaterializeReport};
use crate::model::{Page, TreeStats};
use crate::output::{create_directory, write_json};
use crate::types::PageId;
use std::path::PathBuf;

/// What happened to the page's bookmarks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkOutcome {
    /// `--meta` was not given.
    Disabled,
    Enriched { count: usize },
    /// Enrichment failed and the bookmarks were saved as fetched.
    Failed { error: String },
}

/// Summary of a completed export.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub page_id: PageId,
    pub title: Option<String>,
    pub output_file: PathBuf,
    pub image_dir: PathBuf,
    pub stats: TreeStats,
    pub fetch: FetchMetadata,
    pub bookmarks: BookmarkOutcome,
    pub images: MaterializeReport,
}

/// Runs one export with injected remote capabilities.
pub struct PageExporter<'a> {
    config: &'a ExportConfig,
    notion: &'a dyn NotionRepository,
    assets: &'a dyn AssetFetcher,
    metadata: &'a dyn MetadataSource,
}

impl<'a> PageExporter<'a> {
    pub fn new(
        config: &'a ExportConfig,
        notion: &'a dyn NotionRepository,
        assets: &'a dyn AssetFetcher,
        metadata: &'a dyn MetadataSource,
    ) -> Self {
        Self {
            config,
            notion,
            assets,
            metadata,
        }
    }

    pub async fn export(&self) -> Result<ExportReport, AppError> {
        let page_id = &self.config.page_id;

        log::info!("Fetching page {}", page_id);
        let fetched = NotionFetcher::new(self.notion).fetch_full_page(page_id).await?;
        for warning in &fetched.metadata.warnings {
            log::warn!("Fetch warning: {}", warning);
        }
        let Page { fields, blocks } = fetched.page;
        log::debug!(
            "Fetched {} block(s) in {} request(s)",
            fetched.metadata.blocks_fetched,
            fetched.metadata.children_requests
        );

        let (blocks, bookmarks) = if self.config.enrich_bookmarks {
            log::info!("Fetching bookmark metadata...");
            let enricher = BookmarkEnricher::new(self.metadata, &self.config.metadata_fields);
            match enricher.enrich(&blocks).await {
                Ok(result) => {
                    log::debug!(
                        "Enriched {} bookmark(s) from {} link(s)",
                        result.enriched,
                        result.lookups
                    );
                    let count = result.enriched;
                    (result.blocks, BookmarkOutcome::Enriched { count })
                }
                Err(e) => {
                    log::error!("Bookmark metadata was not added: {}", e);
                    let error = e.to_string();
                    (blocks, BookmarkOutcome::Failed { error })
                }
            }
        } else {
            (blocks, BookmarkOutcome::Disabled)
        };

        let materializer = ImageMaterializer::new(
            self.assets,
            &self.config.image_root,
            page_id,
            &self.config.working_dir,
        );
        let image_dir = materializer.image_dir().to_path_buf();
        let (blocks, images) = materializer.materialize(blocks).await?;
        if !images.is_success() {
            log::warn!(
                "{} image(s) could not be downloaded and keep their remote URL",
                images.failed.len()
            );
        }

        let page = Page::new(fields, blocks);
        create_directory(&self.config.output_dir)?;
        let output_file = self.config.output_file();
        write_json(&output_file, &page)?;
        log::info!("Page data saved to {}", output_file.display());
        log::info!("Images saved to {}", image_dir.display());

        Ok(ExportReport {
            page_id: page_id.clone(),
            title: page.title(),
            output_file,
            image_dir,
            stats: page.stats(),
            fetch: fetched.metadata,
            bookmarks,
            images,
        })
    }
}
