//! Odisha RERA スクレイパーモジュール
//!
//! プロジェクト一覧から先頭N件を取得し、各詳細ページのプロモーター情報を抽出する

mod parse;
mod scraper;
mod types;

pub use parse::{parse_listing, parse_promoter_details};
pub use self::scraper::OdishaScraper;
pub use types::{ProjectRecord, ProjectRow, PromoterDetails, NOT_AVAILABLE};
