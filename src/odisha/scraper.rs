//! Odisha RERA スクレイパー実装
//!
//! 一覧ページ → 各詳細ページの「Promoter Details」タブ → レコード化

use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::browser::{wait_until, ChromeSession};
use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::traits::BrowserSession;

use super::parse::{parse_listing, parse_promoter_details};
use super::types::{ProjectRecord, ProjectRow, PromoterDetails};

/// 詳細ページのタブ文言
const PROMOTER_TAB_TEXT: &str = "Promoter Details";
/// タブ表示完了の目印になる要素
const PROMOTER_READY_SELECTOR: &str = "#lblCompanyName";

/// Odisha RERA スクレイパー
pub struct OdishaScraper {
    config: ScraperConfig,
}

impl OdishaScraper {
    /// 新しいスクレイパーを作成
    pub fn new(config: ScraperConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// ブラウザを起動して一括実行
    ///
    /// 起動失敗を含め、実行全体のエラー時は空の結果を返す。
    pub async fn run(&self) -> Vec<ProjectRecord> {
        let session = match ChromeSession::launch(&self.config).await {
            Ok(session) => session,
            Err(e) => {
                error!("Error in main scraping function: {}", e);
                return Vec::new();
            }
        };

        self.run_with_session(session).await
    }

    /// 既存のセッションで一括実行し、最後に必ずセッションを閉じる
    pub async fn run_with_session<S: BrowserSession>(&self, mut session: S) -> Vec<ProjectRecord> {
        let records = match self.collect(&session).await {
            Ok(records) => records,
            Err(e) => {
                error!("Error in main scraping function: {}", e);
                self.capture_screenshot(&session).await;
                Vec::new()
            }
        };

        if let Err(e) = session.close().await {
            warn!("Failed to close browser session: {}", e);
        }

        records
    }

    async fn collect<S: BrowserSession>(
        &self,
        session: &S,
    ) -> Result<Vec<ProjectRecord>, ScraperError> {
        info!("Loading project list page...");
        let rows = self.fetch_listing(session).await?;
        info!("Found {} projects. Scraping details...", rows.len());

        let mut records = Vec::with_capacity(rows.len());
        for (i, row) in rows.into_iter().enumerate() {
            if i > 0 && !self.config.pause.is_zero() {
                sleep(self.config.pause).await;
            }

            info!("Scraping: {}", row.project_name);
            let details = self.extract_details(session, &row.project_url).await;
            info!(
                "Promoter: {} / Address: {} / GST No: {}",
                details.promoter_name, details.address, details.gst_no
            );

            records.push(ProjectRecord::from_parts(row, details));
        }

        Ok(records)
    }

    /// 一覧ページを開き、先頭 `row_limit` 件の行を取得
    pub async fn fetch_listing<S: BrowserSession>(
        &self,
        session: &S,
    ) -> Result<Vec<ProjectRow>, ScraperError> {
        let list_url = self.config.list_url();
        session.navigate(&list_url).await?;

        wait_until("table", self.config.list_wait, || session.has_element("table")).await?;

        let html = session.content().await?;
        parse_listing(&html, &self.config.base_url, self.config.row_limit)
    }

    /// 詳細ページからプロモーター情報を取得（エラーはそのまま返す）
    pub async fn fetch_details<S: BrowserSession>(
        &self,
        session: &S,
        project_url: &str,
    ) -> Result<PromoterDetails, ScraperError> {
        session.navigate(project_url).await?;

        wait_until(PROMOTER_TAB_TEXT, self.config.detail_wait, || {
            session.click_text("a", PROMOTER_TAB_TEXT)
        })
        .await?;

        wait_until(PROMOTER_READY_SELECTOR, self.config.detail_wait, || {
            session.has_element(PROMOTER_READY_SELECTOR)
        })
        .await?;

        let html = session.content().await?;
        parse_promoter_details(&html)
    }

    /// 詳細ページからプロモーター情報を取得
    ///
    /// 失敗してもバッチは止めず、URL付きでログを出して `N/A` を返す。
    pub async fn extract_details<S: BrowserSession>(
        &self,
        session: &S,
        project_url: &str,
    ) -> PromoterDetails {
        match self.fetch_details(session, project_url).await {
            Ok(details) => details,
            Err(e) => {
                error!("Error scraping {}: {}", project_url, e);
                PromoterDetails::default()
            }
        }
    }

    async fn capture_screenshot<S: BrowserSession>(&self, session: &S) {
        let path = &self.config.screenshot_path;
        match session.screenshot(path).await {
            Ok(()) => info!("Saved screenshot as {}", path.display()),
            Err(e) => warn!("Failed to save screenshot: {}", e),
        }
    }
}
