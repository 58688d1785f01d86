use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("ブラウザ初期化エラー: {0}")]
    BrowserInit(String),

    #[error("ナビゲーションエラー: {0}")]
    Navigation(String),

    #[error("タイムアウト: {0}")]
    Timeout(String),

    #[error("要素が見つかりません: {0}")]
    ElementNotFound(String),

    #[error("no table found: {0}")]
    NoTable(String),

    #[error("セレクタが不正です: {0}")]
    Selector(String),

    #[error("URLが不正です: {0}")]
    InvalidUrl(String),

    #[error("CSV出力エラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("ファイル操作エラー: {0}")]
    FileIO(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_table_message() {
        let err = ScraperError::NoTable("https://example.com/list".into());
        assert!(err.to_string().contains("no table found"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ScraperError = io.into();
        assert!(matches!(err, ScraperError::FileIO(_)));
    }
}
