// src/config.rs
use crate::constants::{DEFAULT_IMAGE_OUT_DIR, DEFAULT_OUTPUT_DIR};
use crate::error::AppError;
use crate::output::{normalize_path, page_data_filename};
use crate::types::{ApiKey, MetadataFieldSet, PageId};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(
    name = "npresso",
    author,
    version,
    about = "Download a Notion page and its images as JSON for static-site generators",
    long_about = None,
    after_help = "Examples:\n  \
        $ npresso --page myblog/page-id-123 --auth secret_token...\n  \
        $ npresso --page page-id-123 --auth secret_token... --dir custom-dir --image-dir images\n  \
        $ npresso --page page-id-123 --auth secret_token... --meta --fields title,url"
)]
pub struct CommandLineInput {
    /// Notion page ID or URL (e.g. myblog/page-id-123 or just page-id-123)
    #[arg(long = "page", value_name = "PAGE_URL")]
    pub page: String,

    /// Notion API integration token (create one at https://www.notion.so/my-integrations)
    #[arg(long = "auth", value_name = "AUTH_TOKEN", env = "NOTION_API_KEY", hide_env_values = true)]
    pub auth: String,

    /// Directory where the page content will be saved
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub dir: String,

    /// Directory where the page images will be saved
    #[arg(long = "image-dir", value_name = "DIR", default_value = DEFAULT_IMAGE_OUT_DIR)]
    pub image_dir: String,

    /// Fetch bookmark metadata (title, url, description, favicon, image by default)
    #[arg(long, default_value_t = false)]
    pub meta: bool,

    /// Comma separated bookmark metadata fields to keep (with --meta)
    #[arg(long, value_name = "FIELDS")]
    pub fields: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved export configuration, validated and fixed for the run.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub page_id: PageId,
    pub api_key: ApiKey,
    /// Directory receiving `<page_id>.json`.
    pub output_dir: PathBuf,
    /// Root of the image tree; images land in `<image_root>/<page_id>/`.
    pub image_root: PathBuf,
    /// Directory rewritten image references are relative to.
    pub working_dir: PathBuf,
    pub enrich_bookmarks: bool,
    pub metadata_fields: MetadataFieldSet,
}

impl ExportConfig {
    /// Resolves and validates CLI input. Relative directories are taken
    /// from `working_dir`.
    pub fn resolve(cli: CommandLineInput, working_dir: &Path) -> Result<Self, AppError> {
        let page_id = PageId::parse(&cli.page)?;
        let api_key = ApiKey::new(cli.auth)?;

        if cli.dir.trim().is_empty() || cli.image_dir.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "--dir and --image-dir cannot be empty".to_string(),
            ));
        }

        let metadata_fields = match (&cli.fields, cli.meta) {
            (Some(fields), true) => MetadataFieldSet::parse(fields)?,
            (Some(fields), false) => {
                log::warn!("--fields '{}' has no effect without --meta", fields);
                MetadataFieldSet::default()
            }
            (None, _) => MetadataFieldSet::default(),
        };

        Ok(ExportConfig {
            page_id,
            api_key,
            output_dir: normalize_path(&working_dir.join(cli.dir.trim())),
            image_root: normalize_path(&working_dir.join(cli.image_dir.trim())),
            working_dir: working_dir.to_path_buf(),
            enrich_bookmarks: cli.meta,
            metadata_fields,
        })
    }

    /// Where the page JSON is written.
    pub fn output_file(&self) -> PathBuf {
        self.output_dir.join(page_data_filename(self.page_id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MetadataField;

    fn parse(args: &[&str]) -> CommandLineInput {
        let mut argv = vec!["npresso"];
        argv.extend_from_slice(args);
        CommandLineInput::try_parse_from(argv).unwrap()
    }

    #[test]
    fn resolves_defaults_against_working_dir() {
        let cli = parse(&["--page", "myblog/abc123", "--auth", "secret_abcdefghijklmnop"]);
        let config = ExportConfig::resolve(cli, Path::new("/site")).unwrap();

        assert_eq!(config.page_id.as_str(), "abc123");
        assert_eq!(config.output_dir, Path::new("/site/notion-data"));
        assert_eq!(config.image_root, Path::new("/site/public/notion-data"));
        assert_eq!(config.output_file(), Path::new("/site/notion-data/abc123.json"));
        assert!(!config.enrich_bookmarks);
        assert_eq!(config.metadata_fields, MetadataFieldSet::default());
    }

    #[test]
    fn custom_dirs_and_fields() {
        let cli = parse(&[
            "--page",
            "abc123",
            "--auth",
            "ntn_abcdefghijklmnop",
            "--dir",
            "./data/../content",
            "--image-dir",
            "/abs/images",
            "--meta",
            "--fields",
            "title,url",
        ]);
        let config = ExportConfig::resolve(cli, Path::new("/site")).unwrap();

        assert_eq!(config.output_dir, Path::new("/site/content"));
        assert_eq!(config.image_root, Path::new("/abs/images"));
        assert!(config.enrich_bookmarks);
        assert_eq!(
            config.metadata_fields.iter().collect::<Vec<_>>(),
            vec![MetadataField::Title, MetadataField::Url]
        );
    }

    #[test]
    fn parent_dirs_stop_at_the_root() {
        let cli = parse(&[
            "--page",
            "abc123",
            "--auth",
            "secret_abcdefghijklmnop",
            "--dir",
            "../../out",
        ]);
        let config = ExportConfig::resolve(cli, Path::new("/site")).unwrap();
        assert_eq!(config.output_dir, Path::new("/out"));
    }

    #[test]
    fn accepts_tokens_of_any_shape() {
        let cli = parse(&["--page", "abc123", "--auth", "my-oauth-access-token-123"]);
        let config = ExportConfig::resolve(cli, Path::new("/site")).unwrap();
        assert_eq!(config.api_key.as_str(), "my-oauth-access-token-123");
    }

    #[test]
    fn rejects_bad_input_before_any_fetch() {
        let bad_page = parse(&["--page", "https://www.notion.so/", "--auth", "secret_abcdefghijklmnop"]);
        assert!(ExportConfig::resolve(bad_page, Path::new("/site"))
            .unwrap_err()
            .is_input_error());

        let bad_fields = parse(&[
            "--page",
            "abc123",
            "--auth",
            "secret_abcdefghijklmnop",
            "--meta",
            "--fields",
            "title,author",
        ]);
        assert!(ExportConfig::resolve(bad_fields, Path::new("/site")).is_err());
    }

    #[test]
    fn page_flag_is_required() {
        assert!(CommandLineInput::try_parse_from(["npresso", "--auth", "secret_x"]).is_err());
    }
}
