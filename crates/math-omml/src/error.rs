use std::fmt;
#[cfg(feature = "ariadne")]
use std::ops::Range;

use strum_macros::IntoStaticStr;

/// Represents an error that occurred during LaTeX parsing.
///
/// The first field is the byte offset into the input at which the error was detected.
#[derive(Debug, Clone, PartialEq)]
pub struct LatexError(pub usize, pub LatexErrKind);

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum LatexErrKind {
    /// The input ended inside a group that still needed its closing character.
    UnbalancedGroup(GroupEnd),
}

/// The character that closes a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum GroupEnd {
    #[strum(serialize = "}")]
    Brace,
    #[strum(serialize = "]")]
    Bracket,
}

impl LatexErrKind {
    /// Returns the error message as a string.
    pub fn string(&self) -> String {
        match self {
            LatexErrKind::UnbalancedGroup(expected) => {
                "Expected token \"".to_string()
                    + <&str>::from(expected)
                    + "\", but reached the end of the input."
            }
        }
    }
}

impl LatexError {
    #[inline]
    pub(crate) fn unbalanced(pos: usize, expected: GroupEnd) -> Box<Self> {
        Box::new(LatexError(pos, LatexErrKind::UnbalancedGroup(expected)))
    }

    /// Returns the error message without the position.
    pub fn error_message(&self) -> String {
        self.1.string()
    }
}

#[cfg(feature = "ariadne")]
impl LatexError {
    /// Convert this error into an [`ariadne::Report`] for pretty-printing.
    pub fn to_report<'name>(
        &self,
        source_name: &'name str,
        with_color: bool,
    ) -> ariadne::Report<'static, (&'name str, Range<usize>)> {
        use ariadne::{Label, Report, ReportKind};

        let label_msg = match &self.1 {
            LatexErrKind::UnbalancedGroup(expected) => {
                format!(
                    "expected \"{}\" to close the group before this point",
                    <&str>::from(expected)
                )
            }
        };

        let mut config = ariadne::Config::default().with_index_type(ariadne::IndexType::Byte);
        if !with_color {
            config = config.with_color(false);
        }
        Report::build(ReportKind::Error, (source_name, self.0..self.0))
            .with_config(config)
            .with_message(self.1.string())
            .with_label(Label::new((source_name, self.0..self.0)).with_message(label_msg))
            .finish()
    }
}

impl fmt::Display for LatexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.0, self.1.string())
    }
}

impl std::error::Error for LatexError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_the_missing_character() {
        let err = LatexError::unbalanced(10, GroupEnd::Brace);
        assert_eq!(
            err.to_string(),
            "10: Expected token \"}\", but reached the end of the input."
        );
        let err = LatexError::unbalanced(3, GroupEnd::Bracket);
        assert_eq!(
            err.error_message(),
            "Expected token \"]\", but reached the end of the input."
        );
    }
}
