//! Downloads a page's images and rewrites image blocks to local paths.
//!
//! The work happens in three passes over the tree:
//! 1. plan: collect each unique remote reference in depth-first order
//! 2. download: fetch and write one file per planned reference
//! 3. rewrite: rebuild the tree with downloaded references replaced
//!
//! A failed download is logged and leaves its blocks pointing at the
//! remote URL; it never stops the other images.

use super::{extension_for_media_type, is_image_extension, AssetFetcher};
use crate::error::AppError;
use crate::model::Block;
use crate::output::{create_directory, relative_reference, sanitize_filename, write_file};
use crate::types::{PageId, ValidatedUrl};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// One image to download.
#[derive(Debug, Clone)]
struct ImageJob {
    url: ValidatedUrl,
    /// Reference exactly as it appears in the block.
    reference: String,
    block_id: Option<String>,
    file_stem: String,
}

/// An image that could not be materialized.
#[derive(Debug, Clone)]
pub struct FailedImage {
    pub url: String,
    pub block_id: Option<String>,
    pub error: String,
}

/// What a materialization pass did.
#[derive(Debug, Clone, Default)]
pub struct MaterializeReport {
    /// Files written.
    pub downloaded: usize,
    /// Image blocks that pointed at an already planned reference.
    pub reused: usize,
    /// Image blocks with a local or missing reference.
    pub skipped: usize,
    pub failed: Vec<FailedImage>,
    pub bytes_written: usize,
}

impl MaterializeReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Writes a page's images under `<image_root>/<page_id>/`.
pub struct ImageMaterializer<'a> {
    fetcher: &'a dyn AssetFetcher,
    image_dir: PathBuf,
    reference_base: PathBuf,
}

impl<'a> ImageMaterializer<'a> {
    /// `reference_base` is the directory rewritten references are relative to.
    pub fn new(
        fetcher: &'a dyn AssetFetcher,
        image_root: &Path,
        page_id: &PageId,
        reference_base: &Path,
    ) -> Self {
        Self {
            fetcher,
            image_dir: image_root.join(sanitize_filename(page_id.as_str())),
            reference_base: reference_base.to_path_buf(),
        }
    }

    /// The per-page directory images are written to.
    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    /// Downloads every unique remote image and returns the rewritten tree.
    ///
    /// Only a failure to create the image directory is an error; per-image
    /// failures are recorded in the report.
    pub async fn materialize(
        &self,
        blocks: Vec<Block>,
    ) -> Result<(Vec<Block>, MaterializeReport), AppError> {
        create_directory(&self.image_dir)?;

        let mut report = MaterializeReport::default();
        let jobs = plan_downloads(&blocks, &mut report);
        log::info!(
            "Downloading {} image(s) to {}",
            jobs.len(),
            self.image_dir.display()
        );

        let mut local_refs = HashMap::new();
        for job in jobs {
            match self.download(&job).await {
                Ok((local_ref, bytes)) => {
                    report.downloaded += 1;
                    report.bytes_written += bytes;
                    local_refs.insert(job.reference, local_ref);
                }
                Err(e) => {
                    log::error!("Image download failed: {}", e);
                    report.failed.push(FailedImage {
                        url: job.url.to_string(),
                        block_id: job.block_id,
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok((rewrite_references(blocks, &local_refs), report))
    }

    /// Fetches one image and writes it, returning its local reference and size.
    async fn download(&self, job: &ImageJob) -> Result<(String, usize), AppError> {
        let asset = self.fetcher.fetch(&job.url).await?;

        // An image extension in the URL wins; script-like paths (`img.php`)
        // defer to the content type and only fall back to their own suffix.
        let url_extension = job.url.path_extension();
        let extension = url_extension
            .clone()
            .filter(|ext| is_image_extension(ext))
            .or_else(|| {
                asset
                    .media_type()
                    .and_then(|media| extension_for_media_type(&media))
                    .map(str::to_owned)
            })
            .or(url_extension);
        let file_name = match extension {
            Some(ext) => format!("{}.{}", job.file_stem, ext),
            None => job.file_stem.clone(),
        };

        let path = self.image_dir.join(file_name);
        let bytes = write_file(&path, &asset.bytes).map_err(|e| AppError::ImageDownload {
            url: job.url.to_string(),
            message: format!("could not write {}: {}", path.display(), e),
        })?;

        let local_ref = relative_reference(&path, &self.reference_base);
        log::debug!("Saved {} as {}", job.url, local_ref);
        Ok((local_ref, bytes))
    }
}

/// Collects one job per unique remote reference, depth-first.
fn plan_downloads(blocks: &[Block], report: &mut MaterializeReport) -> Vec<ImageJob> {
    fn visit(
        blocks: &[Block],
        seen: &mut HashSet<String>,
        jobs: &mut Vec<ImageJob>,
        report: &mut MaterializeReport,
    ) {
        for block in blocks {
            if let Block::Image(image) = block {
                match image.source_url().map(|r| (r, ValidatedUrl::parse(r))) {
                    Some((reference, Ok(url))) => {
                        if seen.insert(reference.to_string()) {
                            let file_stem = match image.common.id() {
                                Some(id) => sanitize_filename(&id.replace('-', "")),
                                None => format!("image-{}", jobs.len() + 1),
                            };
                            jobs.push(ImageJob {
                                url,
                                reference: reference.to_string(),
                                block_id: image.common.id().map(str::to_owned),
                                file_stem,
                            });
                        } else {
                            report.reused += 1;
                        }
                    }
                    _ => report.skipped += 1,
                }
            }
            visit(block.children(), seen, jobs, report);
        }
    }

    let mut seen = HashSet::new();
    let mut jobs = Vec::new();
    visit(blocks, &mut seen, &mut jobs, report);
    jobs
}

/// Rebuilds the tree with downloaded references swapped for local ones.
fn rewrite_references(blocks: Vec<Block>, local_refs: &HashMap<String, String>) -> Vec<Block> {
    blocks
        .into_iter()
        .map(|mut block| {
            if let Block::Image(image) = &mut block {
                let local = image
                    .source_url()
                    .and_then(|reference| local_refs.get(reference))
                    .cloned();
                if let Some(local) = local {
                    image.set_source_url(local);
                }
            }
            if let Some(children) = block.take_children() {
                block.set_children(rewrite_references(children, local_refs));
            }
            block
        })
        .collect()
}
