//! Convert LaTeX math to Office Math Markup (OMML), the equation format of Word documents.
//!
//! # Usage
//!
//! The main struct of this library is [`LatexToOmml`]. Create an instance with an
//! [`OmmlConfig`] and then call [`LatexToOmml::convert`] for each formula.
//!
//! ```rust
//! use math_omml::{LatexToOmml, MathDisplay, OmmlConfig, PrettyPrint};
//!
//! let config = OmmlConfig {
//!     pretty_print: PrettyPrint::Never,
//!     ..Default::default()
//! };
//! let converter = LatexToOmml::new(config);
//! let omml = converter.convert("x^2", MathDisplay::Inline).unwrap();
//! assert_eq!(
//!     omml,
//!     "<m:oMath><m:sSup><m:e><m:r><m:t>x</m:t></m:r></m:e>\
//!      <m:sup><m:r><m:t>2</m:t></m:r></m:sup></m:sSup></m:oMath>"
//! );
//! ```
//!
//! Parsing and writing are also available separately through [`parse`] and [`write_omml`].
//!
//! # Features
//!
//! - `serde`: `OmmlConfig` implements `Deserialize`, and the AST and OMML tree implement
//!   `Serialize`.
//! - `ariadne`: [`LatexError::to_report`] renders errors with source snippets.
//!
pub mod ast;
mod commands;
mod cursor;
mod environments;
mod error;
mod parser;
mod writer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use omml_renderer::node::QName;
use omml_renderer::{MATH_NAMESPACE, MATH_PREFIX};

pub use omml_renderer::node::Element;

use self::ast::Exp;
pub use self::error::{GroupEnd, LatexErrKind, LatexError};
pub use self::writer::write_omml;

/// Display mode for the LaTeX math equations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathDisplay {
    /// For inline equations, like those in `$...$` in LaTeX.
    Inline,
    /// For block equations (or "display style" equations), like those in `$$...$$` in LaTeX.
    Block,
}

/// Configuration for pretty-printing the OMML output.
///
/// Pretty-printing puts every element on its own line, indented by two spaces per level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[non_exhaustive]
pub enum PrettyPrint {
    /// Never pretty print.
    Never,
    /// Always pretty print.
    #[default]
    Always,
    /// Pretty print for block equations only.
    Auto,
}

/// Configuration object for the LaTeX to OMML conversion.
///
/// ```rust
/// use math_omml::{OmmlConfig, PrettyPrint};
///
/// let config = OmmlConfig {
///     pretty_print: PrettyPrint::Auto,
///     xml_namespace: true,
/// };
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct OmmlConfig {
    /// A configuration for pretty-printing the output. See [`PrettyPrint`] for details.
    pub pretty_print: PrettyPrint,
    /// If `true`, declare the `m` prefix on the outermost element, so that the output is a
    /// standalone XML document.
    pub xml_namespace: bool,
}

/// A converter that transforms LaTeX math equations into OMML.
#[derive(Debug, Default)]
pub struct LatexToOmml {
    config: OmmlConfig,
}

impl LatexToOmml {
    pub fn new(config: OmmlConfig) -> Self {
        Self { config }
    }

    /// Convert LaTeX text to serialized OMML.
    ///
    /// The only error is input that ends inside a `{...}` or `[...]` group; everything else
    /// that is not understood is skipped.
    pub fn convert(&self, latex: &str, display: MathDisplay) -> Result<String, Box<LatexError>> {
        let root = self.convert_to_element(latex, display)?;
        let pretty = match self.config.pretty_print {
            PrettyPrint::Never => false,
            PrettyPrint::Always => true,
            PrettyPrint::Auto => display == MathDisplay::Block,
        };
        Ok(root.to_xml(pretty))
    }

    /// Convert LaTeX text to an OMML element tree.
    pub fn convert_to_element(
        &self,
        latex: &str,
        display: MathDisplay,
    ) -> Result<Element, Box<LatexError>> {
        let exps = parse(latex)?;
        let root = write_omml(display, &exps);
        Ok(if self.config.xml_namespace {
            root.with_attr(QName::new(Some("xmlns"), MATH_PREFIX), MATH_NAMESPACE)
        } else {
            root
        })
    }
}

/// Parse LaTeX math into a list of [`Exp`] nodes.
pub fn parse(latex: &str) -> Result<Vec<Exp>, Box<LatexError>> {
    parser::Parser::new(latex).parse()
}

/// Convert with the default configuration.
#[inline]
pub fn latex_to_omml(latex: &str, display: MathDisplay) -> Result<String, Box<LatexError>> {
    LatexToOmml::default().convert(latex, display)
}
