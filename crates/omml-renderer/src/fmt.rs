const INDENT: &str = "  ";

/// Start a new line and indent it.
///
/// An `indent` of zero means that pretty-printing is disabled, so nothing is written.
/// Otherwise, the new line is indented by `indent - 1` levels.
pub fn new_line_and_indent(s: &mut String, indent: usize) {
    if indent > 0 {
        s.push('\n');
        for _ in 1..indent {
            s.push_str(INDENT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::new_line_and_indent;

    #[test]
    fn no_indent_means_no_newline() {
        let mut s = String::from("<a>");
        new_line_and_indent(&mut s, 0);
        assert_eq!(s, "<a>");
    }

    #[test]
    fn indent_levels() {
        let mut s = String::new();
        new_line_and_indent(&mut s, 1);
        assert_eq!(s, "\n");
        s.clear();
        new_line_and_indent(&mut s, 3);
        assert_eq!(s, "\n    ");
    }
}
