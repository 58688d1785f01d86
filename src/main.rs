use std::io::{self, Write};
use std::time::Instant;

use rera_scraper::{ScrapeRequest, ScrapeResult, ScraperConfig, ScraperService};
use tower::Service;
use tracing_subscriber::EnvFilter;

/// 取得結果の概要を出力する
fn write_summary<W: Write>(out: &mut W, result: &ScrapeResult) -> io::Result<()> {
    if result.records.is_empty() {
        // 「No data to save」は保存処理側のログで通知済み
        writeln!(out, "\nFailed to scrape projects. Please check the site or your setup.")?;
        return Ok(());
    }

    writeln!(out, "\nSuccessfully scraped projects:")?;
    for (i, project) in result.records.iter().enumerate() {
        writeln!(out, "\nProject {}:", i + 1)?;
        writeln!(out, "Rera No: {}", project.rera_no)?;
        writeln!(out, "Name: {}", project.project_name)?;
        writeln!(out, "Promoter: {}", project.promoter_name)?;
        writeln!(out, "Address: {}", project.address)?;
        writeln!(out, "GST No: {}", project.gst_no)?;
    }

    if let Some(path) = &result.csv_path {
        writeln!(out, "\nData saved to {}", path.display())?;
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    // ログ設定（RUST_LOG で上書き可能）
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("Starting Odisha RERA project scraper...");
    let start = Instant::now();

    let request: ScrapeRequest = ScraperConfig::from_env().into();
    let mut service = ScraperService::new();

    match service.call(request).await {
        Ok(result) => {
            if let Err(e) = write_summary(&mut io::stdout().lock(), &result) {
                eprintln!("\nFailed to print summary: {}", e);
            }
        }
        Err(e) => {
            eprintln!("\nFailed to save projects: {}", e);
        }
    }

    println!("\nExecution time: {:.2} seconds", start.elapsed().as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rera_scraper::{ProjectRecord, ProjectRow, PromoterDetails};
    use std::path::PathBuf;

    fn summary(result: &ScrapeResult) -> String {
        let mut out = Vec::new();
        write_summary(&mut out, result).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_empty_result_prints_failure_once() {
        let result = ScrapeResult {
            records: Vec::new(),
            csv_path: None,
        };
        let text = summary(&result);

        assert!(!text.contains("No data to save"));
        assert_eq!(text.matches("Failed to scrape projects").count(), 1);
    }

    #[test]
    fn test_summary_lists_projects_and_path() {
        let row = ProjectRow {
            rera_no: "RP/01/2024/00001".into(),
            project_name: "Project 1".into(),
            project_url: "https://rera.odisha.gov.in/projects/project-details/1".into(),
        };
        let result = ScrapeResult {
            records: vec![ProjectRecord::from_parts(row, PromoterDetails::default())],
            csv_path: Some(PathBuf::from("rera_projects.csv")),
        };
        let text = summary(&result);

        assert!(text.contains("Project 1:"));
        assert!(text.contains("Rera No: RP/01/2024/00001"));
        assert!(text.contains("Promoter: N/A"));
        assert!(text.contains("Data saved to rera_projects.csv"));
        assert!(!text.contains("Failed to scrape"));
    }
}
