//! The math AST produced by the parser and consumed by the writer.
#[cfg(feature = "serde")]
use serde::Serialize;

/// The class of a bare symbol, roughly following TeX's math classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum SymbolClass {
    Ord,
    Op,
    Bin,
    Rel,
    Open,
    Close,
    Pun,
    Accent,
    Fence,
    /// Stretchy character above its base, e.g. an overbrace.
    TOver,
    /// Stretchy character below its base, e.g. an underbrace.
    TUnder,
    Alpha,
    BotAccent,
    Rad,
}

/// Text style applied to text runs and styled sub-sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum TextStyle {
    Normal,
    Bold,
    Italic,
    Monospace,
    SansSerif,
    DoubleStruck,
    Script,
    Fraktur,
    BoldItalic,
    SansSerifBold,
    BoldScript,
    BoldFraktur,
    SansSerifItalic,
    SansSerifBoldItalic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum FractionType {
    /// `\frac`
    Normal,
    /// `\dfrac`
    Display,
    /// `\tfrac`
    Inline,
    /// Fraction without a bar, as in binomial coefficients.
    NoLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// Orientation of the stroke of a cancelled expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Stroke {
    /// `\cancel`, drawn like `/`.
    Forward,
    /// `\bcancel`, drawn like `\`.
    Back,
    /// `\xcancel`
    Both,
}

/// One item of a `\left ... \right` region.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum InDelimited {
    /// A `\middle` delimiter.
    Separator(String),
    Exp(Exp),
}

/// A row of an array: one sequence of expressions per cell.
pub type ArrayLine = Vec<Vec<Exp>>;

/// AST node
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Exp {
    Number(String),
    Identifier(String),
    Symbol(SymbolClass, String),
    Text(TextStyle, String),
    /// Horizontal space, with the width given in ems.
    Space(f32),
    /// An upright operator name like `sin` or `lim`.
    MathOperator(String),
    Grouped(Vec<Exp>),
    Sqrt(Box<Exp>),
    Root {
        index: Box<Exp>,
        base: Box<Exp>,
    },
    Phantom(Box<Exp>),
    Boxed(Box<Exp>),
    Cancel(Stroke, Box<Exp>),
    Scaled(f32, Box<Exp>),
    Sub {
        base: Box<Exp>,
        sub: Box<Exp>,
    },
    Super {
        base: Box<Exp>,
        sup: Box<Exp>,
    },
    SubSup {
        base: Box<Exp>,
        sub: Box<Exp>,
        sup: Box<Exp>,
    },
    Fraction {
        ty: FractionType,
        num: Box<Exp>,
        den: Box<Exp>,
    },
    /// `convertible` means that the attachment may be turned into an n-ary operator with
    /// limits, or into a superscript in inline mode.
    Over {
        convertible: bool,
        base: Box<Exp>,
        over: Box<Exp>,
    },
    Under {
        convertible: bool,
        base: Box<Exp>,
        under: Box<Exp>,
    },
    UnderOver {
        convertible: bool,
        base: Box<Exp>,
        under: Box<Exp>,
        over: Box<Exp>,
    },
    Delimited {
        open: String,
        close: String,
        content: Vec<InDelimited>,
    },
    Array {
        align: Vec<Alignment>,
        rows: Vec<ArrayLine>,
    },
    Styled(TextStyle, Vec<Exp>),
}

static_assertions::assert_impl_all!(Exp: Send, Sync);

impl Exp {
    /// The empty group `{}`, used as a placeholder.
    #[inline]
    pub fn empty_group() -> Self {
        Exp::Grouped(Vec::new())
    }

    #[inline]
    pub fn is_empty_group(&self) -> bool {
        matches!(self, Exp::Grouped(nodes) if nodes.is_empty())
    }

    #[inline]
    pub fn symbol(class: SymbolClass, text: impl Into<String>) -> Self {
        Exp::Symbol(class, text.into())
    }

    #[inline]
    pub fn identifier(text: impl Into<String>) -> Self {
        Exp::Identifier(text.into())
    }

    #[inline]
    pub fn number(text: impl Into<String>) -> Self {
        Exp::Number(text.into())
    }

    /// The class of this node if it is a bare symbol.
    #[inline]
    pub fn symbol_class(&self) -> Option<SymbolClass> {
        match self {
            Exp::Symbol(class, _) => Some(*class),
            _ => None,
        }
    }
}

/// Turn a vector of nodes into a single node.
///
/// This is done either by returning the single node if there is only one,
/// or by creating a group if there are multiple (or zero) nodes.
pub(crate) fn node_vec_to_node(mut nodes: Vec<Exp>) -> Exp {
    if nodes.len() == 1
        && let Some(single) = nodes.pop()
    {
        single
    } else {
        Exp::Grouped(nodes)
    }
}
