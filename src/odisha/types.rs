//! Odisha RERA 関連の型定義

use serde::Serialize;

/// 取得できなかった項目の値
pub const NOT_AVAILABLE: &str = "N/A";

/// 一覧テーブルの1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRow {
    pub rera_no: String,
    pub project_name: String,
    /// 詳細ページの絶対URL
    pub project_url: String,
}

/// 詳細ページ「Promoter Details」タブの内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoterDetails {
    pub promoter_name: String,
    pub address: String,
    pub gst_no: String,
}

impl Default for PromoterDetails {
    fn default() -> Self {
        Self {
            promoter_name: NOT_AVAILABLE.to_string(),
            address: NOT_AVAILABLE.to_string(),
            gst_no: NOT_AVAILABLE.to_string(),
        }
    }
}

/// CSV出力の1行
///
/// フィールド順がそのまま列順になる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRecord {
    #[serde(rename = "Rera Regd. No")]
    pub rera_no: String,
    #[serde(rename = "Project Name")]
    pub project_name: String,
    #[serde(rename = "Promoter Name")]
    pub promoter_name: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "GST No")]
    pub gst_no: String,
    #[serde(rename = "Project URL")]
    pub project_url: String,
}

impl ProjectRecord {
    pub fn from_parts(row: ProjectRow, details: PromoterDetails) -> Self {
        Self {
            rera_no: row.rera_no,
            project_name: row.project_name,
            promoter_name: details.promoter_name,
            address: details.address,
            gst_no: details.gst_no,
            project_url: row.project_url,
        }
    }
}
