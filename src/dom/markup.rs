//! logos-based markup sniffing.
//!
//! Title and content fields accept either a plain phrase or a formatted
//! snippet. [`contains_element`] decides which one a string is: it answers
//! whether parsing the string as an HTML document would leave at least one
//! element under `<body>`. It never fails; anything it cannot make sense of
//! counts as text.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (`</b>` as [`Token::EndTag`] beats `<` as `Lt`)
//! 2. For equal length matches, earlier-defined variants win

use logos::{Lexer, Logos};

/// Elements that the HTML parser moves into `<head>` when they show up
/// before any body content.
const HEAD_ELEMENTS: &[&str] = &[
    "base", "basefont", "bgsound", "link", "meta", "noframes", "script", "style", "template",
    "title",
];

/// Elements whose content is raw text and never parsed for tags.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title", "xmp"];

/// Markup token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    /// `<!-- ... -->`. An unterminated comment swallows the rest of the input.
    #[token("<!--", skip_comment)]
    Comment,

    /// `<!DOCTYPE ...>` and other declarations.
    #[regex(r"<![a-zA-Z][^>]*>")]
    Declaration,

    /// `</name ...>`.
    #[regex(r"</[a-zA-Z][^>]*>")]
    EndTag,

    /// A complete start tag; carries the lowercase tag name. A tag cut off by
    /// the end of input is a lexing error, as the parser drops it.
    #[regex(r"<[a-zA-Z][a-zA-Z0-9-]*", start_tag)]
    StartTag(String),

    /// A `<` that does not open anything.
    #[token("<")]
    Lt,

    /// Character data.
    #[regex(r"[^<]+")]
    Text,
}

fn skip_comment(lex: &mut Lexer<Token>) {
    let rest = lex.remainder();
    let end = rest.find("-->").map_or(rest.len(), |i| i + 3);
    lex.bump(end);
}

fn start_tag(lex: &mut Lexer<Token>) -> Option<String> {
    let name = lex.slice()[1..].to_ascii_lowercase();
    let tag_len = tag_end(lex.remainder())?;
    lex.bump(tag_len);

    if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
        let closing = format!("</{name}");
        // ASCII lowercasing keeps byte offsets intact.
        let rest = lex.remainder().to_ascii_lowercase();
        let body_len = rest.find(&closing).unwrap_or(rest.len());
        lex.bump(body_len);
    }
    Some(name)
}

/// Length of the attribute section up to and including the closing `>`,
/// skipping over quoted attribute values.
fn tag_end(rest: &str) -> Option<usize> {
    let mut quote = None;
    for (i, ch) in rest.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '>') => return Some(i + 1),
            (None, _) => {}
        }
    }
    None
}

fn is_blank(text: &str) -> bool {
    text.chars()
        .all(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c'))
}

/// Whether `input` parses to at least one element inside `<body>`.
///
/// Document wrapper tags (`html`, `head`, `body`) never count, and neither do
/// head-only elements that appear before the first piece of body content.
///
/// ```
/// use toastkit::dom::markup::contains_element;
///
/// assert!(contains_element("<b>Saved</b>"));
/// assert!(!contains_element("Saved"));
/// assert!(!contains_element("1 < 2"));
/// ```
pub fn contains_element(input: &str) -> bool {
    let mut lexer = Token::lexer(input);
    let mut in_body = false;

    while let Some(token) = lexer.next() {
        match token {
            Ok(Token::StartTag(name)) => match name.as_str() {
                "html" | "head" => {}
                "body" => in_body = true,
                other if !in_body && HEAD_ELEMENTS.contains(&other) => {}
                _ => return true,
            },
            Ok(Token::Text) => {
                if !is_blank(lexer.slice()) {
                    in_body = true;
                }
            }
            Ok(Token::Lt) => in_body = true,
            Ok(Token::Comment | Token::Declaration | Token::EndTag) | Err(()) => {}
        }
    }
    false
}

/// The character data of a markup fragment, tags and comments removed.
/// Character references are left as written.
pub fn visible_text(input: &str) -> String {
    let mut lexer = Token::lexer(input);
    let mut out = String::new();
    while let Some(token) = lexer.next() {
        match token {
            Ok(Token::Text | Token::Lt) | Err(()) => out.push_str(lexer.slice()),
            Ok(_) => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        Token::lexer(input).filter_map(Result::ok).collect()
    }

    // ── Tokenizer ────────────────────────────────────────────────────

    #[test]
    fn start_tag_name_is_lowercased() {
        assert_eq!(
            tokens("<DIV class=\"x\">hi</DIV>"),
            vec![Token::StartTag("div".into()), Token::Text, Token::EndTag]
        );
    }

    #[test]
    fn quoted_gt_does_not_close_tag() {
        assert_eq!(
            tokens("<a title='a>b'>x</a>"),
            vec![Token::StartTag("a".into()), Token::Text, Token::EndTag]
        );
    }

    #[test]
    fn stray_lt_is_its_own_token() {
        assert_eq!(tokens("1 < 2"), vec![Token::Text, Token::Lt, Token::Text]);
    }

    #[test]
    fn comment_is_skipped_whole() {
        assert_eq!(tokens("<!-- <b>x</b> -->"), vec![Token::Comment]);
    }

    #[test]
    fn raw_text_content_is_not_tokenized() {
        assert_eq!(
            tokens("<script>if (a<b) {}</script>"),
            vec![Token::StartTag("script".into()), Token::EndTag]
        );
    }

    // ── contains_element ─────────────────────────────────────────────

    #[test]
    fn plain_text_is_not_markup() {
        assert!(!contains_element("Saved"));
        assert!(!contains_element(""));
        assert!(!contains_element("   "));
    }

    #[test]
    fn simple_elements_are_markup() {
        assert!(contains_element("<b>Saved</b>"));
        assert!(contains_element("Model <i>qwen</i> is ready"));
        assert!(contains_element("<br>"));
        assert!(contains_element("<img src=x>"));
    }

    #[test]
    fn comparisons_are_text() {
        assert!(!contains_element("a < b"));
        assert!(!contains_element("<3"));
        assert!(!contains_element("x <= y"));
    }

    #[test]
    fn only_end_tags_or_comments_is_text() {
        assert!(!contains_element("</b>"));
        assert!(!contains_element("<!-- hidden -->"));
        assert!(!contains_element("<!DOCTYPE html>"));
    }

    #[test]
    fn unterminated_tag_is_text() {
        assert!(!contains_element("<b"));
        assert!(!contains_element("see <a href=\"x"));
    }

    #[test]
    fn document_wrappers_are_not_body_elements() {
        assert!(!contains_element("<html><head></head><body></body></html>"));
        assert!(contains_element("<html><body><p>x</p></body></html>"));
    }

    #[test]
    fn head_elements_before_body_content_are_not_counted() {
        assert!(!contains_element("<title>Hello</title>"));
        assert!(!contains_element("<meta charset=utf-8><style>b{}</style>"));
        assert!(!contains_element("<title><b>x</b></title>"));
    }

    #[test]
    fn head_elements_after_body_content_are_counted() {
        assert!(contains_element("text <style>b{}</style>"));
        assert!(contains_element("<body><script>1</script>"));
    }

    #[test]
    fn textarea_is_a_body_element() {
        assert!(contains_element("<textarea><b></textarea>"));
    }

    // ── visible_text ─────────────────────────────────────────────────

    #[test]
    fn visible_text_drops_tags() {
        assert_eq!(visible_text("<b>Saved</b> <!-- c -->ok"), "Saved ok");
        assert_eq!(visible_text("1 < 2"), "1 < 2");
    }
}
