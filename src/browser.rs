//! Chrome セッションと待機ユーティリティ

use std::future::Future;
use std::path::Path;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::traits::BrowserSession;

/// 条件待機のポーリング間隔（ミリ秒）
const POLL_INTERVAL_MS: u64 = 250;

/// 自動操作の痕跡を隠すスクリプト（全ドキュメントで先行実行）
const STEALTH_SCRIPT: &str = r#"
Object.defineProperty(navigator, 'webdriver', {get: () => undefined});
window.chrome = window.chrome || { runtime: {} };
"#;

/// chromiumoxide の既定引数から `--enable-automation` を除いたもの
const BASE_ARGS: &[&str] = &[
    "--disable-background-networking",
    "--enable-features=NetworkService,NetworkServiceInProcess",
    "--disable-background-timer-throttling",
    "--disable-backgrounding-occluded-windows",
    "--disable-breakpad",
    "--disable-client-side-phishing-detection",
    "--disable-component-extensions-with-background-pages",
    "--disable-default-apps",
    "--disable-dev-shm-usage",
    "--disable-extensions",
    "--disable-features=TranslateUI",
    "--disable-hang-monitor",
    "--disable-ipc-flooding-protection",
    "--disable-popup-blocking",
    "--disable-prompt-on-repost",
    "--disable-renderer-backgrounding",
    "--disable-sync",
    "--force-color-profile=srgb",
    "--metrics-recording-only",
    "--no-first-run",
    "--password-store=basic",
    "--use-mock-keychain",
];

/// 起動設定を組み立てる
///
/// 既定引数は無効化し、自動操作の検出につながるフラグを渡さない。
pub fn browser_config(config: &ScraperConfig) -> Result<BrowserConfig, ScraperError> {
    let (width, height) = config.window_size;
    let mut builder = BrowserConfig::builder()
        .disable_default_args()
        .window_size(width, height)
        .no_sandbox()
        .request_timeout(config.request_timeout);

    for arg in BASE_ARGS {
        builder = builder.arg(*arg);
    }

    builder = builder
        .arg("--disable-gpu")
        .arg("--ignore-certificate-errors")
        .arg("--disable-blink-features=AutomationControlled")
        .arg(format!("--user-agent={}", config.user_agent));

    if !config.headless {
        builder = builder.with_head();
    }

    if let Some(path) = &config.chrome_executable {
        builder = builder.chrome_executable(path);
    }

    builder
        .build()
        .map_err(|e| ScraperError::BrowserInit(format!("ブラウザ設定エラー: {}", e)))
}

/// chromiumoxide によるブラウザセッション
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl ChromeSession {
    /// ブラウザを起動してタブを1つ開く
    pub async fn launch(config: &ScraperConfig) -> Result<Self, ScraperError> {
        info!("Launching browser...");

        let browser_config = browser_config(config)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        // ブラウザイベントハンドラをバックグラウンドで実行
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                debug!("Browser event: {:?}", event);
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        page.execute(AddScriptToEvaluateOnNewDocumentParams::new(STEALTH_SCRIPT))
            .await
            .map_err(|e| ScraperError::BrowserInit(format!("スクリプト注入エラー: {}", e)))?;

        info!("Browser launched");
        Ok(Self {
            browser,
            page,
            handler,
        })
    }
}

#[async_trait]
impl BrowserSession for ChromeSession {
    async fn navigate(&self, url: &str) -> Result<(), ScraperError> {
        debug!("Navigating to {}", url);
        self.page
            .goto(url)
            .await
            .map_err(|e| ScraperError::Navigation(format!("{}: {}", url, e)))?;

        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| ScraperError::Navigation(format!("{}: {}", url, e)))?;
        Ok(())
    }

    async fn has_element(&self, selector: &str) -> Result<bool, ScraperError> {
        Ok(self.page.find_element(selector).await.is_ok())
    }

    async fn click_text(&self, selector: &str, text: &str) -> Result<bool, ScraperError> {
        let elements = match self.page.find_elements(selector).await {
            Ok(elements) => elements,
            Err(e) => {
                debug!("find_elements({}) failed: {}", selector, e);
                return Ok(false);
            }
        };

        for element in elements {
            let inner = element.inner_text().await.ok().flatten().unwrap_or_default();
            if !inner.contains(text) {
                continue;
            }

            element
                .scroll_into_view()
                .await
                .map_err(|e| ScraperError::ElementNotFound(format!("{}: {}", text, e)))?;

            // 非表示などでクリック座標が取れない場合はまだクリック不可とみなす
            return match element.click().await {
                Ok(_) => Ok(true),
                Err(e) => {
                    debug!("'{}' not clickable yet: {}", text, e);
                    Ok(false)
                }
            };
        }

        Ok(false)
    }

    async fn content(&self) -> Result<String, ScraperError> {
        self.page
            .content()
            .await
            .map_err(|e| ScraperError::Navigation(format!("ページ内容の取得に失敗: {}", e)))
    }

    async fn screenshot(&self, path: &Path) -> Result<(), ScraperError> {
        let png = self
            .page
            .screenshot(ScreenshotParams::builder().full_page(true).build())
            .await
            .map_err(|e| ScraperError::Navigation(format!("スクリーンショット失敗: {}", e)))?;

        tokio::fs::write(path, png).await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        info!("Closing browser...");

        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            debug!("Failed to wait for browser process: {}", e);
        }
        self.handler.abort();

        info!("Browser closed");
        Ok(())
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        // Browser 側の Drop で子プロセスは kill される
        self.handler.abort();
    }
}

/// 条件が真になるまでポーリングで待機する
///
/// 条件判定のエラーは「まだ」と同じ扱い。`timeout` を超えたら
/// [`ScraperError::Timeout`]。
pub async fn wait_until<F, Fut>(
    what: &str,
    timeout: Duration,
    mut condition: F,
) -> Result<(), ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, ScraperError>>,
{
    let start = Instant::now();
    let interval = Duration::from_millis(POLL_INTERVAL_MS);

    loop {
        // 1回の判定（CDP呼び出し）も残り時間で打ち切る
        let remaining = timeout.saturating_sub(start.elapsed());
        match tokio::time::timeout(remaining, condition()).await {
            Ok(Ok(true)) => {
                debug!("{} ready after {:?}", what, start.elapsed());
                return Ok(());
            }
            Ok(Ok(false)) => {}
            Ok(Err(e)) => debug!("{} check error: {}", what, e),
            Err(_) => debug!("{} check did not finish within {:?}", what, remaining),
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            return Err(ScraperError::Timeout(format!(
                "{} が{:?}以内に見つかりませんでした",
                what, timeout
            )));
        }

        sleep(interval.min(timeout - elapsed)).await;
    }
}
