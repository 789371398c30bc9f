//! 페이지 텍스트 추출기 - URL → 제목 + 본문 텍스트
//!
//! 요청 한 번, 정제 한 번. 재시도, 크롤링, 캐시는 하지 않습니다.
//!
//! ## 사용법
//! ```rust,ignore
//! let extractor = PageTextExtractor::new(ExtractorConfig::default())?;
//! let text = extractor.extract("https://example.com/reviews").await?;
//! ```

mod error;

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use url::Url;

use crate::text;

pub use error::{FetchError, FetchErrorKind};

// ============================================================================
// Configuration
// ============================================================================

/// 데스크톱 Chrome User-Agent
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36";

/// 영어 우선 Accept-Language
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// 기본 요청 타임아웃 (초)
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// 기본 최대 문자 수
pub const DEFAULT_MAX_CHARS: usize = 4000;

/// 추출기 설정
///
/// 헤더 값은 생성 시 클라이언트에 고정되며 이후 바뀌지 않습니다.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// User-Agent 헤더
    pub user_agent: String,
    /// Accept-Language 헤더
    pub accept_language: String,
    /// 요청 타임아웃
    pub timeout: Duration,
    /// 결과 최대 문자 수
    pub max_chars: usize,
    /// TLS 인증서 검증 여부
    pub verify_tls: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_chars: DEFAULT_MAX_CHARS,
            verify_tls: true,
        }
    }
}

impl ExtractorConfig {
    /// 인증서 검증을 끈 설정
    ///
    /// 자체 서명 인증서를 쓰는 사이트용. 중간자 공격에 노출됩니다.
    pub fn insecure() -> Self {
        Self {
            verify_tls: false,
            ..Default::default()
        }
    }

    /// 고정 헤더 집합
    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.user_agent).context("잘못된 User-Agent 값")?,
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&self.accept_language).context("잘못된 Accept-Language 값")?,
        );
        Ok(headers)
    }
}

// ============================================================================
// Page Text Extractor
// ============================================================================

/// 페이지 텍스트 추출기
pub struct PageTextExtractor {
    client: reqwest::Client,
    config: ExtractorConfig,
}

impl PageTextExtractor {
    /// 새 추출기 생성
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        if !config.verify_tls {
            tracing::warn!("TLS certificate verification is disabled");
        }

        let client = reqwest::Client::builder()
            .default_headers(config.headers()?)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .context("HTTP 클라이언트 생성 실패")?;

        Ok(Self { client, config })
    }

    /// 생성 시 고정된 설정
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// 설정된 `max_chars`로 추출
    pub async fn extract(&self, url: &str) -> std::result::Result<String, FetchError> {
        self.extract_with_limit(url, self.config.max_chars).await
    }

    /// 호출별 문자 수 제한으로 추출
    pub async fn extract_with_limit(
        &self,
        url: &str,
        max_chars: usize,
    ) -> std::result::Result<String, FetchError> {
        let html = self.fetch(url).await?;
        tracing::debug!("Fetched {} bytes from {}", html.len(), url);

        let extract = text::clean_page(&html, max_chars);
        tracing::debug!("Extracted {} chars from {}", extract.chars().count(), url);

        Ok(extract)
    }

    /// 실패 시에도 문자열을 반환하는 추출
    ///
    /// 실패는 `[Error fetching <url>: <detail>]` 형태로 인라인됩니다.
    /// 에러 문자열은 `max_chars`로 자르지 않습니다.
    pub async fn extract_or_inline(&self, url: &str, max_chars: usize) -> String {
        match self.extract_with_limit(url, max_chars).await {
            Ok(extract) => extract,
            Err(e) => {
                tracing::warn!("{}", e);
                e.to_inline()
            }
        }
    }

    /// GET 요청 후 본문 반환 (2xx만 성공)
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        tracing::info!("Fetching: {}", url);

        let parsed = Url::parse(url).map_err(|e| FetchError::invalid_url(url, e))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))
    }
}

// ============================================================================
// Tests
// ============================================================================
