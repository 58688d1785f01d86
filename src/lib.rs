//! Odisha RERA スクレイパーライブラリ
//!
//! - プロジェクト一覧ページから先頭N件を取得
//! - 各詳細ページの「Promoter Details」タブからプロモーター情報を抽出
//! - BOM付きUTF-8のCSVに保存
//!
//! # 使用例
//!
//! ```rust,ignore
//! use rera_scraper::{ScrapeRequest, ScraperService};
//! use tower::Service;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut service = ScraperService::new();
//!
//!     let request = ScrapeRequest::new()
//!         .with_row_limit(6)
//!         .with_output_path("rera_projects.csv")
//!         .with_headless(false);
//!
//!     let result = service.call(request).await.unwrap();
//!     println!("Projects: {}, CSV: {:?}", result.records.len(), result.csv_path);
//! }
//! ```
//!
//! # ブラウザを差し替える場合
//!
//! ```rust,ignore
//! use rera_scraper::{BrowserSession, OdishaScraper, ScraperConfig};
//!
//! async fn scrape(session: impl BrowserSession) {
//!     let scraper = OdishaScraper::new(ScraperConfig::default());
//!     let records = scraper.run_with_session(session).await;
//!     println!("Projects: {}", records.len());
//! }
//! ```

pub mod browser;
pub mod config;
pub mod error;
pub mod export;
pub mod odisha;
pub mod service;
pub mod traits;

// 主要な型をリエクスポート
pub use browser::ChromeSession;
pub use config::ScraperConfig;
pub use error::ScraperError;
pub use export::save_to_csv;
pub use service::{ScrapeRequest, ScrapeResult, ScraperService};
pub use traits::BrowserSession;

pub use odisha::{OdishaScraper, ProjectRecord, ProjectRow, PromoterDetails, NOT_AVAILABLE};
