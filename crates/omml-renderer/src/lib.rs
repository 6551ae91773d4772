//! Internal library for the `math-omml` crate for rendering Office Math Markup.
//!
//! This library allows you to construct a tree of OMML elements and then render it to a string.
//!
//! # Example
//!
//! ```rust
//! use math_omml_renderer_internal::node::Element;
//!
//! let run = Element::math("r").with_child(Element::math("t").with_text("x"));
//! let root = Element::math("oMath").with_child(run);
//!
//! assert_eq!(
//!     root.to_xml(false),
//!     "<m:oMath><m:r><m:t>x</m:t></m:r></m:oMath>"
//! );
//! assert_eq!(
//!     root.to_xml(true),
//!     "<m:oMath>\n  <m:r>\n    <m:t>x</m:t>\n  </m:r>\n</m:oMath>"
//! );
//! ```
pub mod attribute;
pub mod escape;
pub mod fmt;
pub mod node;

/// The namespace prefix used for every element and attribute of the math markup.
pub const MATH_PREFIX: &str = "m";

/// The namespace URI bound to [`MATH_PREFIX`].
pub const MATH_NAMESPACE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/math";
