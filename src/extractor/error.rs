//! 페치 에러 타입

use std::error::Error as StdError;

use thiserror::Error;

/// 페치 실패 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// URL 파싱 실패
    InvalidUrl,
    /// 타임아웃
    Timeout,
    /// 연결 실패 (DNS, 거부, TLS 등)
    Connect,
    /// 2xx가 아닌 HTTP 상태
    Status(u16),
    /// 응답 본문 읽기 실패
    Body,
    /// 그 밖의 요청 에러
    Request,
}

/// 페치 에러
///
/// `Display`는 `Error fetching <url>: <detail>` 형식이며,
/// [`FetchError::to_inline`]이 대괄호로 감싼 문자열 형태를 만듭니다.
#[derive(Debug, Clone, Error)]
#[error("Error fetching {url}: {message}")]
pub struct FetchError {
    kind: FetchErrorKind,
    url: String,
    message: String,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_url(url: &str, err: url::ParseError) -> Self {
        Self::new(FetchErrorKind::InvalidUrl, url, err.to_string())
    }

    pub(crate) fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        let kind = if let Some(status) = err.status() {
            FetchErrorKind::Status(status.as_u16())
        } else if err.is_timeout() {
            FetchErrorKind::Timeout
        } else if err.is_connect() {
            FetchErrorKind::Connect
        } else if err.is_body() || err.is_decode() {
            FetchErrorKind::Body
        } else {
            FetchErrorKind::Request
        };

        Self::new(kind, url, error_chain(&err))
    }

    pub fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// `[Error fetching <url>: <detail>]`
    pub fn to_inline(&self) -> String {
        format!("[{}]", self)
    }
}

/// source 체인을 `: `로 연결
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }

    message
}
