use std::fmt::{self, Write};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::MATH_PREFIX;
use crate::escape::escape_xml;
use crate::fmt::new_line_and_indent;

/// A qualified name, e.g. `m:oMath` or `xmlns:m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct QName {
    pub prefix: Option<&'static str>,
    pub local: &'static str,
}

impl QName {
    /// A name in the math namespace.
    #[inline]
    pub const fn math(local: &'static str) -> Self {
        QName {
            prefix: Some(MATH_PREFIX),
            local,
        }
    }

    #[inline]
    pub const fn new(prefix: Option<&'static str>, local: &'static str) -> Self {
        QName { prefix, local }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.prefix {
            Some(prefix) => write!(f, "{prefix}:{}", self.local),
            None => f.write_str(self.local),
        }
    }
}

/// The `m:val` attribute, which carries the value of almost every property element.
pub const VAL: QName = QName::math("val");

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Content {
    Element(Element),
    Text(String),
}

/// A markup element with ordered attributes and ordered children.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Element {
    pub name: QName,
    pub attributes: Vec<(QName, String)>,
    pub children: Vec<Content>,
}

static_assertions::assert_impl_all!(Element: Send, Sync);

impl Element {
    #[inline]
    pub fn new(name: QName) -> Self {
        Element {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// An element in the math namespace.
    #[inline]
    pub fn math(local: &'static str) -> Self {
        Element::new(QName::math(local))
    }

    /// A property element like `<m:jc m:val="center" />`.
    #[inline]
    pub fn math_val(local: &'static str, value: impl Into<String>) -> Self {
        Element::math(local).with_attr(VAL, value)
    }

    pub fn with_attr(mut self, name: QName, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Content::Element(child));
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children
            .extend(children.into_iter().map(Content::Element));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Content::Text(text.into()));
        self
    }

    /// The `m:val` attribute.
    #[inline]
    pub fn val(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| *name == VAL)
            .map(|(_, value)| value.as_str())
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Content::Element(element) => Some(element),
            Content::Text(_) => None,
        })
    }

    /// The first child element with the given local name.
    pub fn child(&self, local: &str) -> Option<&Element> {
        self.child_elements().find(|child| child.name.local == local)
    }

    /// All text in this subtree, concatenated in document order.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Content::Element(element) => element.collect_text(out),
                Content::Text(t) => out.push_str(t),
            }
        }
    }

    /// Write this element and its subtree to `s`.
    ///
    /// With `base_indent == 0`, everything is written on one line. Otherwise, every child
    /// element starts on a new line one level deeper than its parent. An element whose only
    /// child is text is always written on a single line.
    pub fn emit(&self, s: &mut String, base_indent: usize) -> fmt::Result {
        let child_indent = if base_indent > 0 {
            base_indent.saturating_add(1)
        } else {
            0
        };

        write!(s, "<{}", self.name)?;
        for (name, value) in &self.attributes {
            write!(s, " {name}=\"")?;
            escape_xml(s, value);
            s.push('"');
        }

        match self.children.as_slice() {
            [] => {
                s.push_str(" />");
                return Ok(());
            }
            [Content::Text(text)] => {
                s.push('>');
                escape_xml(s, text);
            }
            children => {
                s.push('>');
                for child in children {
                    new_line_and_indent(s, child_indent);
                    match child {
                        Content::Element(element) => element.emit(s, child_indent)?,
                        Content::Text(text) => escape_xml(s, text),
                    }
                }
                new_line_and_indent(s, base_indent);
            }
        }
        write!(s, "</{}>", self.name)
    }

    /// Serialize the tree, either pretty-printed or on a single line.
    pub fn to_xml(&self, pretty: bool) -> String {
        let mut output = String::new();
        // Writing to a `String` never fails.
        let _ = self.emit(&mut output, if pretty { 1 } else { 0 });
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Element {
        Element::math("r").with_child(Element::math("t").with_text(text))
    }

    #[test]
    fn empty_element() {
        assert_eq!(
            Element::math_val("jc", "center").to_xml(true),
            "<m:jc m:val=\"center\" />"
        );
        assert_eq!(Element::math("deg").to_xml(false), "<m:deg />");
    }

    #[test]
    fn text_only_element_stays_inline() {
        assert_eq!(
            Element::math("t").with_text("x").to_xml(true),
            "<m:t>x</m:t>"
        );
    }

    #[test]
    fn nested_elements_are_indented() {
        let f = Element::math("f")
            .with_child(Element::math("fPr").with_child(Element::math_val("type", "bar")))
            .with_child(Element::math("num").with_child(run("1")))
            .with_child(Element::math("den").with_child(run("2")));
        assert_eq!(
            f.to_xml(true),
            "<m:f>\n  <m:fPr>\n    <m:type m:val=\"bar\" />\n  </m:fPr>\n  <m:num>\n    <m:r>\n      <m:t>1</m:t>\n    </m:r>\n  </m:num>\n  <m:den>\n    <m:r>\n      <m:t>2</m:t>\n    </m:r>\n  </m:den>\n</m:f>"
        );
        assert_eq!(
            f.to_xml(false),
            "<m:f><m:fPr><m:type m:val=\"bar\" /></m:fPr><m:num><m:r><m:t>1</m:t></m:r></m:num><m:den><m:r><m:t>2</m:t></m:r></m:den></m:f>"
        );
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let element = Element::math("t")
            .with_attr(QName::new(None, "title"), "a\"b'c")
            .with_text("x<y & z>'w'");
        assert_eq!(
            element.to_xml(false),
            "<m:t title=\"a&quot;b&#39;c\">x&lt;y &amp; z&gt;&#39;w&#39;</m:t>"
        );
    }

    #[test]
    fn namespace_declaration() {
        let root = Element::math("oMath").with_attr(
            QName::new(Some("xmlns"), "m"),
            crate::MATH_NAMESPACE,
        );
        assert_eq!(
            root.to_xml(true),
            "<m:oMath xmlns:m=\"http://schemas.openxmlformats.org/officeDocument/2006/math\" />"
        );
    }

    #[test]
    fn accessors() {
        let e = Element::math("e").with_child(run("a")).with_child(run("b"));
        assert_eq!(e.child_elements().count(), 2);
        assert_eq!(
            e.child("r").and_then(|r| r.child("t")).map(Element::text_content),
            Some("a".to_string())
        );
        assert_eq!(e.text_content(), "ab");
        let jc = Element::math_val("jc", "left");
        assert_eq!(jc.val(), Some("left"));
        let named = Element::math("t").with_attr(QName::new(None, "val"), "x");
        assert_eq!(named.val(), None);
    }
}
