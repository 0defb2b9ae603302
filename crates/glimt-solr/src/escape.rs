//! Solr/Lucene special-character escaping.
//!
//! User-entered term text is escaped before it is embedded in a query
//! string so that stray operators cannot change the query structure.

/// Characters with meaning to the Lucene query parser.
///
/// `&` and `|` are escaped individually, which also covers the
/// two-character `&&` / `||` operators.
const SPECIAL: &[char] = &[
    '\\', '+', '-', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', '/', '&', '|',
];

/// Escapes every Lucene special character in a bare term.
///
/// # Example
///
/// ```rust
/// use glimt_solr::escape_term;
///
/// assert_eq!(escape_term("a+b"), "a\\+b");
/// assert_eq!(escape_term("path/to"), "path\\/to");
/// ```
pub fn escape_term(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escapes term text for embedding inside a double-quoted phrase.
///
/// Inside quotes only the quote character and the backslash carry
/// meaning; everything else is literal.
pub fn escape_quoted(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
