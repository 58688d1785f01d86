//! 一覧・詳細ページのHTML解析

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::error::ScraperError;

use super::types::{ProjectRow, PromoterDetails};

const PROMOTER_NAME_SELECTOR: &str = "span#lblCompanyName";
const PROMOTER_ADDRESS_SELECTOR: &str = "span#lblCompanyAddress";
const GST_SELECTOR: &str = "span#lblGST";

fn selector(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::Selector(format!("{}: {}", css, e)))
}

/// 各テキストノードをtrimし、空でないものを連結
fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// 一覧ページから先頭 `limit` 件のデータ行を取り出す
///
/// ヘッダー行は除外する。セルが2つ未満の行、2列目にリンクが無い行はスキップ。
pub fn parse_listing(
    html: &str,
    base_url: &str,
    limit: usize,
) -> Result<Vec<ProjectRow>, ScraperError> {
    let base = Url::parse(base_url)
        .map_err(|e| ScraperError::InvalidUrl(format!("{}: {}", base_url, e)))?;

    let table_selector = selector("table")?;
    let row_selector = selector("tr")?;
    let cell_selector = selector("td")?;
    let link_selector = selector("a")?;

    let document = Html::parse_document(html);
    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| ScraperError::NoTable("プロジェクト一覧テーブル".into()))?;

    let mut rows = Vec::new();
    for row in table.select(&row_selector).skip(1).take(limit) {
        let cells: Vec<ElementRef<'_>> = row.select(&cell_selector).collect();
        if cells.len() < 2 {
            debug!("Skipping row with {} cells", cells.len());
            continue;
        }

        let rera_no = stripped_text(cells[0]);
        let project_name = stripped_text(cells[1]);

        let Some(href) = cells[1]
            .select(&link_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            debug!("Skipping row without detail link: {}", project_name);
            continue;
        };

        let project_url = match base.join(href) {
            Ok(url) => url.to_string(),
            Err(e) => {
                warn!("Skipping row with invalid link {}: {}", href, e);
                continue;
            }
        };

        rows.push(ProjectRow {
            rera_no,
            project_name,
            project_url,
        });
    }

    Ok(rows)
}

/// 「Promoter Details」タブ表示後のHTMLからプロモーター情報を取り出す
///
/// 要素が無い、または空の項目は `N/A` のまま。
pub fn parse_promoter_details(html: &str) -> Result<PromoterDetails, ScraperError> {
    let document = Html::parse_document(html);
    let mut details = PromoterDetails::default();

    let fields = [
        (PROMOTER_NAME_SELECTOR, &mut details.promoter_name),
        (PROMOTER_ADDRESS_SELECTOR, &mut details.address),
        (GST_SELECTOR, &mut details.gst_no),
    ];

    for (css, slot) in fields {
        let sel = selector(css)?;
        if let Some(element) = document.select(&sel).next() {
            let text = stripped_text(element);
            if !text.is_empty() {
                *slot = text;
            }
        }
    }

    Ok(details)
}
