//! CLI 모듈
//!
//! page-miner CLI 명령어 정의 및 구현.
//! URL을 하나씩 추출기에 넘기고 결과 문자열을 출력합니다.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::extractor::{
    ExtractorConfig, PageTextExtractor, DEFAULT_MAX_CHARS, DEFAULT_TIMEOUT_SECS,
};

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser)]
#[command(name = "page-miner")]
#[command(version, about = "웹 페이지 텍스트 추출기", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// URL 하나에서 텍스트 추출
    Fetch {
        /// 추출할 URL
        url: String,

        #[command(flatten)]
        options: FetchOptions,
    },

    /// 파일의 URL 목록을 순서대로 추출
    Batch {
        /// URL 목록 파일 (한 줄에 하나, `#` 주석 허용)
        #[arg(short, long)]
        file: PathBuf,

        /// JSON 배열로 출력
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        options: FetchOptions,
    },
}

/// 공통 추출 옵션
#[derive(Args, Debug, Clone)]
pub struct FetchOptions {
    /// 최대 문자 수
    #[arg(short, long, default_value_t = DEFAULT_MAX_CHARS)]
    pub max_chars: usize,

    /// 요청 타임아웃 (초)
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// TLS 인증서 검증 끄기
    #[arg(long)]
    pub insecure: bool,
}

impl FetchOptions {
    fn to_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            timeout: Duration::from_secs(self.timeout),
            max_chars: self.max_chars,
            verify_tls: !self.insecure,
            ..Default::default()
        }
    }
}

/// 배치 JSON 출력 레코드
#[derive(Debug, Serialize)]
struct BatchRecord {
    url: String,
    ok: bool,
    content: String,
}

// ============================================================================
// CLI Runner
// ============================================================================

/// CLI 명령어 실행
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Fetch { url, options } => cmd_fetch(&url, &options).await,
        Commands::Batch {
            file,
            json,
            options,
        } => cmd_batch(&file, json, &options).await,
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

/// 단일 URL 추출 (fetch)
///
/// 실패해도 종료 코드는 0이며, 에러는 인라인 문자열로 출력됩니다.
async fn cmd_fetch(url: &str, options: &FetchOptions) -> Result<()> {
    let extractor = PageTextExtractor::new(options.to_config()).context("추출기 생성 실패")?;

    let output = extractor.extract_or_inline(url, options.max_chars).await;
    println!("{}", output);

    Ok(())
}

/// URL 목록 추출 (batch)
///
/// 병렬 처리 없이 파일 순서대로 한 건씩 요청합니다.
async fn cmd_batch(file: &Path, json: bool, options: &FetchOptions) -> Result<()> {
    let urls = read_url_file(file).await?;

    if urls.is_empty() {
        eprintln!("[!] 처리할 URL이 없습니다: {}", file.display());
        return Ok(());
    }

    let extractor = PageTextExtractor::new(options.to_config()).context("추출기 생성 실패")?;

    eprintln!("[*] {} 개 URL 처리 중...", urls.len());

    let mut records = Vec::with_capacity(urls.len());

    for (i, url) in urls.iter().enumerate() {
        eprintln!("[{}/{}] {}", i + 1, urls.len(), url);

        let record = match extractor.extract_with_limit(url, options.max_chars).await {
            Ok(content) => BatchRecord {
                url: url.clone(),
                ok: true,
                content,
            },
            Err(e) => {
                tracing::warn!("{}", e);
                BatchRecord {
                    url: url.clone(),
                    ok: false,
                    content: e.to_inline(),
                }
            }
        };

        if !json {
            println!("=== {} ===", record.url);
            println!("{}", record.content);
            println!();
        }

        records.push(record);
    }

    if json {
        let out = serde_json::to_string_pretty(&records).context("JSON 직렬화 실패")?;
        println!("{}", out);
    }

    let success_count = records.iter().filter(|r| r.ok).count();
    eprintln!(
        "[OK] 완료: 성공 {}, 실패 {}",
        success_count,
        records.len() - success_count
    );

    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// URL 목록 파일 읽기
async fn read_url_file(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        bail!("URL 목록 파일을 찾을 수 없습니다: {}", path.display());
    }

    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read URL list: {:?}", path))?;

    Ok(parse_url_list(&contents))
}

/// 빈 줄과 `#` 주석을 제외한 URL 목록
fn parse_url_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
