use async_trait::async_trait;
use std::path::Path;

use crate::error::ScraperError;

/// ブラウザセッションの抽象
///
/// 一覧・詳細ページの取得はすべてこのトレイト越しに行う。
/// 実装は [`crate::browser::ChromeSession`]。
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// URLへ遷移
    async fn navigate(&self, url: &str) -> Result<(), ScraperError>;

    /// セレクタに一致する要素が存在するか
    async fn has_element(&self, selector: &str) -> Result<bool, ScraperError>;

    /// `text` を含む最初の要素をスクロールしてクリック
    ///
    /// クリック可能な要素がまだ無い場合は `Ok(false)`。
    async fn click_text(&self, selector: &str, text: &str) -> Result<bool, ScraperError>;

    /// レンダリング後のHTML
    async fn content(&self) -> Result<String, ScraperError>;

    /// スクリーンショットを保存
    async fn screenshot(&self, path: &Path) -> Result<(), ScraperError>;

    /// リソース解放
    async fn close(&mut self) -> Result<(), ScraperError>;
}
