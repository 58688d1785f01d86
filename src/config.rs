use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://rera.odisha.gov.in";
pub const DEFAULT_LIST_PATH: &str = "/projects/project-list";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// ポータルのオリジン（詳細ページの相対パスはここに結合される）
    pub base_url: String,
    pub list_path: String,
    /// 一覧から処理するデータ行の上限（ヘッダー行は含まない）
    pub row_limit: usize,
    /// 一覧テーブル出現の待機上限
    pub list_wait: Duration,
    /// 詳細ページのタブ・要素の待機上限
    pub detail_wait: Duration,
    /// プロジェクト間の固定待機
    pub pause: Duration,
    pub output_path: PathBuf,
    pub screenshot_path: PathBuf,
    pub headless: bool,
    pub chrome_executable: Option<PathBuf>,
    pub user_agent: String,
    pub window_size: (u32, u32),
    pub request_timeout: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            list_path: DEFAULT_LIST_PATH.to_string(),
            row_limit: 6,
            list_wait: Duration::from_secs(30),
            detail_wait: Duration::from_secs(10),
            pause: Duration::from_secs(4),
            output_path: PathBuf::from("rera_projects.csv"),
            screenshot_path: PathBuf::from("error_screenshot.png"),
            headless: true,
            chrome_executable: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            window_size: (1920, 1080),
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl ScraperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 環境変数で上書きした設定を作成
    ///
    /// - `CHROME_PATH` / `CHROMIUM_PATH`: ブラウザ実行ファイル
    /// - `RERA_HEADLESS`: `0` または `false` で表示モード
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("CHROME_PATH").or_else(|_| std::env::var("CHROMIUM_PATH")) {
            config.chrome_executable = Some(PathBuf::from(path));
        }

        if let Ok(value) = std::env::var("RERA_HEADLESS") {
            config.headless = parse_flag(&value).unwrap_or(config.headless);
        }

        config
    }

    pub fn list_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.list_path)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_row_limit(mut self, row_limit: usize) -> Self {
        self.row_limit = row_limit;
        self
    }

    pub fn with_list_wait(mut self, wait: Duration) -> Self {
        self.list_wait = wait;
        self
    }

    pub fn with_detail_wait(mut self, wait: Duration) -> Self {
        self.detail_wait = wait;
        self
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_screenshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.screenshot_path = path.into();
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_chrome_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_executable = Some(path.into());
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
