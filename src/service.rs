use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tower::Service;
use tracing::info;

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::export::save_to_csv;
use crate::odisha::{OdishaScraper, ProjectRecord};

/// スクレイピングリクエスト
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    pub row_limit: usize,
    pub output_path: PathBuf,
    pub headless: bool,
    pub pause: Duration,
    pub chrome_executable: Option<PathBuf>,
}

impl Default for ScrapeRequest {
    fn default() -> Self {
        ScraperConfig::default().into()
    }
}

impl ScrapeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row_limit(mut self, row_limit: usize) -> Self {
        self.row_limit = row_limit;
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }
}

impl From<ScraperConfig> for ScrapeRequest {
    fn from(config: ScraperConfig) -> Self {
        Self {
            row_limit: config.row_limit,
            output_path: config.output_path,
            headless: config.headless,
            pause: config.pause,
            chrome_executable: config.chrome_executable,
        }
    }
}

impl From<ScrapeRequest> for ScraperConfig {
    fn from(req: ScrapeRequest) -> Self {
        ScraperConfig {
            row_limit: req.row_limit,
            output_path: req.output_path,
            headless: req.headless,
            pause: req.pause,
            chrome_executable: req.chrome_executable,
            ..Default::default()
        }
    }
}

/// スクレイピング結果
#[derive(Debug)]
pub struct ScrapeResult {
    /// 取得順のレコード
    pub records: Vec<ProjectRecord>,
    /// 保存先（レコードが無い場合は `None`）
    pub csv_path: Option<PathBuf>,
}

/// tower::Serviceを実装したスクレイパーサービス
#[derive(Debug, Clone, Default)]
pub struct ScraperService {}

impl ScraperService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Service<ScrapeRequest> for ScraperService {
    type Response = ScrapeResult;
    type Error = ScraperError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ScrapeRequest) -> Self::Future {
        info!("Scrape request received: row_limit={}", req.row_limit);

        Box::pin(async move {
            let config: ScraperConfig = req.into();
            let scraper = OdishaScraper::new(config);

            let records = scraper.run().await;
            let csv_path = save_to_csv(&records, &scraper.config().output_path)?;

            info!(
                "Scrape finished: records={}, path={:?}",
                records.len(),
                csv_path
            );

            Ok(ScrapeResult { records, csv_path })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_request_builder() {
        let req = ScrapeRequest::new()
            .with_row_limit(3)
            .with_output_path("/tmp/rera.csv")
            .with_headless(false)
            .with_pause(Duration::from_secs(1));

        assert_eq!(req.row_limit, 3);
        assert_eq!(req.output_path, PathBuf::from("/tmp/rera.csv"));
        assert!(!req.headless);
        assert_eq!(req.pause, Duration::from_secs(1));
    }

    #[test]
    fn test_scrape_request_to_config() {
        let req = ScrapeRequest::new().with_row_limit(2);
        let config: ScraperConfig = req.into();

        assert_eq!(config.row_limit, 2);
        assert_eq!(config.output_path, PathBuf::from("rera_projects.csv"));
        assert_eq!(config.detail_wait, Duration::from_secs(10));
        assert_eq!(config.list_url(), "https://rera.odisha.gov.in/projects/project-list");
    }

    #[test]
    fn test_config_round_trip_keeps_browser_path() {
        let config = ScraperConfig::new().with_chrome_executable("/opt/chrome/chrome");
        let req: ScrapeRequest = config.into();
        let back: ScraperConfig = req.into();

        assert_eq!(back.chrome_executable, Some(PathBuf::from("/opt/chrome/chrome")));
    }
}
