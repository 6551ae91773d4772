/// Escapes special characters in `input` for safe inclusion in XML text content and in
/// double-quoted attribute values.
///
/// Specifically, it replaces:
/// - `&` with `&amp;`
/// - `<` with `&lt;`
/// - `>` with `&gt;`
/// - `"` with `&quot;`
/// - `'` with `&#39;`
pub fn escape_xml(output: &mut String, input: &str) {
    let mut rest = input;
    while let Some(index) = rest.find(['&', '<', '>', '"', '\'']) {
        let (before, after) = rest.split_at(index);
        output.push_str(before);
        let mut chars = after.chars();
        match chars.next() {
            Some('&') => output.push_str("&amp;"),
            Some('<') => output.push_str("&lt;"),
            Some('>') => output.push_str("&gt;"),
            Some('"') => output.push_str("&quot;"),
            Some('\'') => output.push_str("&#39;"),
            _ => {}
        }
        rest = chars.as_str();
    }
    output.push_str(rest);
}

#[cfg(test)]
mod tests {
    use super::escape_xml;

    fn escape(input: &str) -> String {
        let mut output = String::new();
        escape_xml(&mut output, input);
        output
    }

    /// Reverses `escape_xml`, for checking that no information is lost.
    fn unescape(input: &str) -> String {
        input
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&")
    }

    #[test]
    fn empty_input() {
        assert_eq!(escape(""), "");
    }

    #[test]
    fn no_special_characters() {
        assert_eq!(escape("x + y = z"), "x + y = z");
    }

    #[test]
    fn all_special_characters() {
        assert_eq!(escape("&<>\"'"), "&amp;&lt;&gt;&quot;&#39;");
    }

    #[test]
    fn mixed_with_unicode() {
        assert_eq!(escape("α<β & γ′"), "α&lt;β &amp; γ′");
    }

    #[test]
    fn escaping_is_reversible() {
        for input in ["a & b", "<m:t>", "\"quoted\" 'single'", "&amp;", "∑ & ∫ < ∞"] {
            assert_eq!(unescape(&escape(input)), input);
        }
    }
}
