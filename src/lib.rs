//! page-miner - 웹 페이지 텍스트 추출기
//!
//! URL 하나를 가져와 마크업을 걷어내고, 제목 + 본문 텍스트를
//! 지정한 문자 수로 잘라 돌려줍니다. 리뷰 페이지 등의 텍스트를
//! 분석 단계에 넘기기 위한 용도입니다.

pub mod cli;
pub mod extractor;
pub mod text;

// Re-exports
pub use extractor::{
    ExtractorConfig, FetchError, FetchErrorKind, PageTextExtractor, DEFAULT_ACCEPT_LANGUAGE,
    DEFAULT_MAX_CHARS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
pub use text::{clean_page, normalize_whitespace, truncate_chars, EXCLUDED_TAGS, NO_TITLE};
