/// Flattens extracted text for the tokenizer: drops anything tag-shaped,
/// turns line breaks into spaces and collapses whitespace runs.
///
/// Inline tags vanish without a trace so `he<i>ll</i>o` stays one word;
/// block-level tags separate words.
pub fn sanitize_text(text: &str) -> String {
    let mut stripped = String::with_capacity(text.len());
    let mut tag: Option<String> = None;

    for c in text.chars() {
        if let Some(name) = tag.as_mut() {
            if c != '>' {
                name.push(c);
                continue;
            }
            if is_block_tag(name) {
                stripped.push(' ');
            }
            tag = None;
            continue;
        }
        match c {
            '<' => tag = Some(String::new()),
            '\r' | '\n' => stripped.push(' '),
            _ => stripped.push(c),
        }
    }

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// `inner` is the text between `<` and `>`, e.g. `/p` or `br/`.
fn is_block_tag(inner: &str) -> bool {
    let name = inner
        .trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or("");
    BLOCK_TAGS.iter().any(|tag| tag.eq_ignore_ascii_case(name))
}
