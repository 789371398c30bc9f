//! 텍스트 정제 모듈 - HTML → 제목 + 본문 텍스트
//!
//! 네트워크 없이 HTML 문자열만으로 동작하는 순수 함수들입니다.
//! 1. `<title>` 추출 (없거나 비면 `"No title found"`)
//! 2. 비콘텐츠 태그(script, style, nav 등) 서브트리 제외
//! 3. 텍스트 노드 수집 (노드별 trim, 줄바꿈으로 연결)
//! 4. 공백 정규화 (줄바꿈 패스 → 공백 패스, 순서 고정)
//! 5. `제목 + "\n\n" + 본문`을 문자 수 기준으로 자르기

use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

// ============================================================================
// Constants
// ============================================================================

/// `<title>`이 없거나 비어있을 때 사용하는 제목
pub const NO_TITLE: &str = "No title found";

/// 텍스트 추출 전에 서브트리째 제외하는 태그
pub const EXCLUDED_TAGS: [&str; 11] = [
    "script", "style", "img", "svg", "noscript", "meta", "input", "button", "nav", "footer",
    "header",
];

/// 제목과 본문 사이 구분자
const TITLE_SEPARATOR: &str = "\n\n";

fn newline_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{2,}").expect("valid newline pattern"))
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s{2,}").expect("valid whitespace pattern"))
}

// ============================================================================
// Extraction
// ============================================================================

/// HTML 문자열에서 최종 추출 텍스트 생성
///
/// 파서는 html5ever 기반이라 깨진 마크업에도 실패하지 않습니다.
pub fn clean_page(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let text = normalize_whitespace(&visible_text(&document));

    compose(&title, &text, max_chars)
}

/// 제목 추출
///
/// `<title>`이 없거나 텍스트가 아예 없을 때만 `NO_TITLE`.
/// 공백뿐인 제목은 빈 문자열이 되고, 결합 후 trim에서 사라집니다.
pub fn extract_title(document: &Html) -> String {
    if let Ok(title_selector) = Selector::parse("title") {
        if let Some(element) = document.select(&title_selector).next() {
            let raw = element.text().collect::<String>();
            if !raw.is_empty() {
                return raw.trim().to_string();
            }
        }
    }

    NO_TITLE.to_string()
}

/// 보이는 텍스트 추출 (제외 태그 서브트리 건너뜀)
///
/// 텍스트 노드마다 앞뒤 공백을 제거하고, 빈 노드는 버린 뒤 `\n`으로 연결합니다.
/// `<title>` 텍스트도 텍스트 노드이므로 본문 첫 줄에 다시 포함됩니다.
pub fn visible_text(document: &Html) -> String {
    let mut nodes = Vec::new();
    collect_text(document.root_element(), &mut nodes);
    nodes.join("\n")
}

fn collect_text<'a>(element: ElementRef<'a>, out: &mut Vec<&'a str>) {
    if is_excluded(element.value().name()) {
        return;
    }

    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                out.push(trimmed);
            }
        } else if let Some(child_element) = ElementRef::wrap(child) {
            collect_text(child_element, out);
        }
    }
}

fn is_excluded(tag: &str) -> bool {
    EXCLUDED_TAGS.iter().any(|excluded| excluded.eq_ignore_ascii_case(tag))
}

// ============================================================================
// Normalization
// ============================================================================

/// 공백 정규화
///
/// 두 패스의 순서를 바꾸면 결과가 달라집니다. 줄바꿈 패스가 먼저 `\n{2,}`을
/// `\n` 하나로 줄이고, 이어서 `\s{2,}`가 남은 공백 연속을 스페이스 하나로
/// 바꿉니다. 단독 `\n`은 유지되지만 다른 공백과 붙어 있으면 스페이스로 흡수됩니다.
pub fn normalize_whitespace(text: &str) -> String {
    let collapsed = newline_runs().replace_all(text, "\n");
    whitespace_runs().replace_all(&collapsed, " ").into_owned()
}

/// 제목 + 본문 결합 후 자르기
pub fn compose(title: &str, text: &str, max_chars: usize) -> String {
    let combined = format!("{}{}{}", title, TITLE_SEPARATOR, text);
    truncate_chars(combined.trim(), max_chars)
}

/// 문자 수 기준으로 자르기 (UTF-8 안전, 단어/문장 경계 무시)
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "<html><head><title> My Page </title></head><body><script>evil()</script><p>Hello   world</p><p>Line2</p></body></html>";

    #[test]
    fn test_clean_page_sample() {
        let extract = clean_page(SAMPLE, 4000);

        assert!(!extract.contains("evil()"));
        assert_eq!(extract.lines().next(), Some("My Page"));
        assert!(extract.contains("Hello world"));
        assert!(extract.contains("Line2"));
        assert_eq!(extract, "My Page\n\nMy Page\nHello world\nLine2");
    }

    #[test]
    fn test_no_title() {
        let html = "<html><body><p>Only body text</p></body></html>";
        let extract = clean_page(html, 4000);
        assert_eq!(extract.lines().next(), Some(NO_TITLE));
        assert_eq!(extract, "No title found\n\nOnly body text");
    }

    #[test]
    fn test_whitespace_title_is_empty() {
        let html = "<html><head><title>   </title></head><body>Body</body></html>";
        let document = Html::parse_document(html);
        assert_eq!(extract_title(&document), "");
        assert_eq!(clean_page(html, 4000), "Body");
    }

    #[test]
    fn test_empty_title_falls_back() {
        let html = "<html><head><title></title></head><body>Body</body></html>";
        let document = Html::parse_document(html);
        assert_eq!(extract_title(&document), NO_TITLE);
        assert_eq!(clean_page(html, 4000), "No title found\n\nBody");
    }

    #[test]
    fn test_excluded_tags_removed() {
        let html = r#"
            <html>
                <head>
                    <title>Reviews</title>
                    <style>.x { color: red }</style>
                    <meta name="description" content="meta text">
                </head>
                <body>
                    <header>Site header</header>
                    <nav><a href="/">Home</a></nav>
                    <noscript>Enable JavaScript</noscript>
                    <svg><text>svg label</text></svg>
                    <button>Buy now</button>
                    <div class="review"><p>Great <b>product</b>, would buy again.</p></div>
                    <footer>Copyright</footer>
                </body>
            </html>
        "#;
        let document = Html::parse_document(html);
        let text = visible_text(&document);

        for boilerplate in [
            "color: red",
            "Site header",
            "Home",
            "Enable JavaScript",
            "svg label",
            "Buy now",
            "Copyright",
        ] {
            assert!(!text.contains(boilerplate), "leaked: {}", boilerplate);
        }
        assert_eq!(text, "Reviews\nGreat\nproduct\n, would buy again.");
    }

    #[test]
    fn test_malformed_html() {
        let html = "<p>unclosed <div>tags <b>bold<script>bad()";
        let extract = clean_page(html, 4000);
        assert!(!extract.contains("bad()"));
        assert!(extract.starts_with(NO_TITLE));
        assert!(extract.contains("unclosed"));
        assert!(extract.contains("bold"));
    }

    #[test]
    fn test_normalize_newline_pass_first() {
        // 공백 패스가 먼저였다면 "a b"가 됨
        assert_eq!(normalize_whitespace("a\n\n\nb"), "a\nb");
        assert_eq!(normalize_whitespace("a\n \nb"), "a b");
        assert_eq!(normalize_whitespace("a\nb"), "a\nb");
        assert_eq!(normalize_whitespace("Hello \t  world"), "Hello world");
    }

    #[test]
    fn test_normalize_idempotent() {
        let inputs = [
            "a\n\n\nb   c",
            "  leading\n \n\t trailing  ",
            "x\r\n\r\ny",
            "single\nlines\nonly",
            "",
        ];
        for input in inputs {
            let once = normalize_whitespace(input);
            assert_eq!(normalize_whitespace(&once), once);
        }
    }

    #[test]
    fn test_truncation_exact_prefix() {
        let body = "review ".repeat(2000);
        let html = format!("<html><head><title>T</title></head><body><p>{}</p></body></html>", body);

        let full = clean_page(&html, usize::MAX);
        let cut = clean_page(&html, 500);

        assert_eq!(cut.chars().count(), 500);
        assert!(full.starts_with(&cut));
    }

    #[test]
    fn test_zero_max_chars() {
        assert_eq!(clean_page(SAMPLE, 0), "");
    }

    #[test]
    fn test_truncate_unicode() {
        assert_eq!(truncate_chars("안녕하세요 세계", 5), "안녕하세요");
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_compose_trims() {
        assert_eq!(compose(NO_TITLE, "", 100), NO_TITLE);
        assert_eq!(compose("Title", "body", 7), "Title\n\n");
    }
}
