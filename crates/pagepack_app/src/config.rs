use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use pagepack_engine::DEFAULT_OUTPUT_DIR;

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Directory page archives are written to.
    #[serde(default = "default_output_directory")]
    pub output_directory: String,
    /// Optional cap on concurrent image downloads within a page.
    /// Unset means every image is fetched at once.
    #[serde(default)]
    pub max_in_flight: Option<usize>,
    pub pages: Vec<PageSettings>,
}

/// One page group: where to browse and how to query the documents the
/// operator feeds in.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct PageSettings {
    pub url: String,
    pub title_selector: String,
    pub image_selector: String,
}

fn default_output_directory() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let settings = toml::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let settings: Settings = toml::from_str(
            r#"
            [[pages]]
            url = "https://example.com/gallery"
            title_selector = "h1.title"
            image_selector = "div.gallery img"
            "#,
        )
        .unwrap();

        assert_eq!(settings.output_directory, "downloads");
        assert_eq!(settings.max_in_flight, None);
        assert_eq!(settings.pages.len(), 1);
        assert_eq!(settings.pages[0].image_selector, "div.gallery img");
    }

    #[test]
    fn honors_overrides() {
        let settings: Settings = toml::from_str(
            r#"
            output_directory = "rips"
            max_in_flight = 8

            [[pages]]
            url = "https://example.com"
            title_selector = "title"
            image_selector = "img"
            "#,
        )
        .unwrap();

        assert_eq!(settings.output_directory, "rips");
        assert_eq!(settings.max_in_flight, Some(8));
    }

    #[test]
    fn rejects_pages_without_selectors() {
        let result: Result<Settings, _> = toml::from_str(
            r#"
            [[pages]]
            url = "https://example.com"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [[pages]]
            url = "https://example.com"
            title_selector = "title"
            image_selector = "img"
            "#,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.pages.len(), 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        let missing = Path::new("/definitely/not/here/config.toml");
        assert!(Settings::load(missing).is_err());
    }
}
