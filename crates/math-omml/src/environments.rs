use crate::ast::Alignment;

static ENVIRONMENTS: phf::Map<&'static str, Env> = phf::phf_map! {
    "array" => Env::Array,
    "matrix" => Env::Matrix,
    "smallmatrix" => Env::Matrix,
    "pmatrix" => Env::PMatrix,
    "bmatrix" => Env::BMatrix,
    "Bmatrix" => Env::Bmatrix,
    "vmatrix" => Env::VMatrix,
    "Vmatrix" => Env::Vmatrix,
    "cases" => Env::Cases,
    "align" => Env::Align,
    "align*" => Env::Align,
    "aligned" => Env::Align,
    "alignat" => Env::Align,
    "alignat*" => Env::Align,
    "eqnarray" => Env::Align,
    "eqnarray*" => Env::Align,
    "gather" => Env::Gather,
    "gather*" => Env::Gather,
    "gathered" => Env::Gather,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Env {
    /// `array`, with its own column specification.
    Array,
    Matrix,
    PMatrix,
    BMatrix,
    Bmatrix,
    VMatrix,
    Vmatrix,
    Cases,
    /// Columns alternate between right and left alignment.
    Align,
    Gather,
}

impl Env {
    /// Known names are looked up exactly; otherwise any name containing `matrix` or `align`
    /// falls into that family.
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        if let Some(env) = ENVIRONMENTS.get(name) {
            return Some(*env);
        }
        if name.contains("matrix") {
            Some(Env::Matrix)
        } else if name.contains("align") {
            Some(Env::Align)
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn needs_colspec(self) -> bool {
        matches!(self, Env::Array)
    }

    /// The fences drawn around the array, if any.
    pub(crate) fn delimiters(self) -> Option<(&'static str, &'static str)> {
        match self {
            Env::PMatrix => Some(("(", ")")),
            Env::BMatrix => Some(("[", "]")),
            Env::Bmatrix => Some(("{", "}")),
            Env::VMatrix => Some(("|", "|")),
            Env::Vmatrix => Some(("‖", "‖")),
            Env::Cases => Some(("{", "")),
            Env::Array | Env::Matrix | Env::Align | Env::Gather => None,
        }
    }

    /// Column alignments for an array with `columns` columns.
    ///
    /// `colspec` is only consulted for `array`; missing entries are centered.
    pub(crate) fn alignments(self, colspec: &[Alignment], columns: usize) -> Vec<Alignment> {
        match self {
            Env::Array => colspec
                .iter()
                .copied()
                .chain(std::iter::repeat(Alignment::Center))
                .take(columns)
                .collect(),
            Env::Align => (0..columns)
                .map(|i| {
                    if i % 2 == 0 {
                        Alignment::Right
                    } else {
                        Alignment::Left
                    }
                })
                .collect(),
            Env::Cases => vec![Alignment::Left; columns],
            Env::Matrix
            | Env::PMatrix
            | Env::BMatrix
            | Env::Bmatrix
            | Env::VMatrix
            | Env::Vmatrix
            | Env::Gather => vec![Alignment::Center; columns],
        }
    }
}

/// Reads `l`, `c` and `r` from an `array` column specification; everything else is ignored.
pub(crate) fn parse_colspec(spec: &str) -> Vec<Alignment> {
    spec.chars()
        .filter_map(|ch| match ch {
            'l' => Some(Alignment::Left),
            'c' => Some(Alignment::Center),
            'r' => Some(Alignment::Right),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_family() {
        assert_eq!(Env::from_name("pmatrix"), Some(Env::PMatrix));
        assert_eq!(Env::from_name("psmallmatrix"), Some(Env::Matrix));
        assert_eq!(Env::from_name("flalign*"), Some(Env::Align));
        assert_eq!(Env::from_name("eqnarray"), Some(Env::Align));
        assert_eq!(Env::from_name("tabular"), None);
    }

    #[test]
    fn align_alternates() {
        assert_eq!(
            Env::Align.alignments(&[], 3),
            [Alignment::Right, Alignment::Left, Alignment::Right]
        );
    }

    #[test]
    fn array_colspec_is_padded_and_truncated() {
        let spec = parse_colspec("l|r");
        assert_eq!(spec, [Alignment::Left, Alignment::Right]);
        assert_eq!(
            Env::Array.alignments(&spec, 3),
            [Alignment::Left, Alignment::Right, Alignment::Center]
        );
        assert_eq!(Env::Array.alignments(&spec, 1), [Alignment::Left]);
        assert!(Env::Matrix.alignments(&spec, 0).is_empty());
    }
}
