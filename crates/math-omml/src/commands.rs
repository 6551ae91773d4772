//! Static lookup tables from LaTeX tokens to AST leaves and parse rules.
use crate::ast::{FractionType, Stroke, SymbolClass, TextStyle};

/// What a backslash command stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Command {
    Symbol(SymbolClass, &'static str),
    Ident(&'static str),
    /// An operator name that takes its sub/superscripts to the side, like `\sin`.
    MathOperator(&'static str),
    /// An operator name that takes limits, like `\lim`.
    LimitOperator(&'static str),
    Space(f32),
    /// A sized delimiter like `\big(`; the value is the scale factor.
    Big(f32),
    /// An accent or a stretchy character placed over (`true`) or under (`false`) its argument.
    Decoration(SymbolClass, &'static str, bool),
    Frac(FractionType),
    Sqrt,
    Left,
    Right,
    Middle,
    Begin,
    End,
    Overset,
    Underset,
    Boxed,
    Phantom,
    Cancel(Stroke),
    OperatorName,
    OperatorNameStar,
    Limits,
    NoLimits,
    /// A command that is accepted but has no effect on the output.
    Ignored,
}

/// Commands whose argument is parsed as math or captured as raw text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum StyleCommand {
    /// `\mathbf{...}` and friends: the argument is parsed and styled.
    Styled(TextStyle),
    /// `\text{...}` and friends: the argument is captured verbatim.
    Text(TextStyle),
}

use Command::*;
use SymbolClass::*;

static COMMANDS: phf::Map<&'static str, Command> = phf::phf_map! {
    // Greek letters
    "alpha" => Ident("α"),
    "beta" => Ident("β"),
    "gamma" => Ident("γ"),
    "delta" => Ident("δ"),
    "epsilon" => Ident("ϵ"),
    "varepsilon" => Ident("ε"),
    "zeta" => Ident("ζ"),
    "eta" => Ident("η"),
    "theta" => Ident("θ"),
    "vartheta" => Ident("ϑ"),
    "iota" => Ident("ι"),
    "kappa" => Ident("κ"),
    "lambda" => Ident("λ"),
    "mu" => Ident("μ"),
    "nu" => Ident("ν"),
    "xi" => Ident("ξ"),
    "pi" => Ident("π"),
    "varpi" => Ident("ϖ"),
    "rho" => Ident("ρ"),
    "varrho" => Ident("ϱ"),
    "sigma" => Ident("σ"),
    "varsigma" => Ident("ς"),
    "tau" => Ident("τ"),
    "upsilon" => Ident("υ"),
    "phi" => Ident("ϕ"),
    "varphi" => Ident("φ"),
    "chi" => Ident("χ"),
    "psi" => Ident("ψ"),
    "omega" => Ident("ω"),
    "Gamma" => Ident("Γ"),
    "Delta" => Ident("Δ"),
    "Theta" => Ident("Θ"),
    "Lambda" => Ident("Λ"),
    "Xi" => Ident("Ξ"),
    "Pi" => Ident("Π"),
    "Sigma" => Ident("Σ"),
    "Upsilon" => Ident("Υ"),
    "Phi" => Ident("Φ"),
    "Psi" => Ident("Ψ"),
    "Omega" => Ident("Ω"),
    // Ordinary symbols
    "infty" => Symbol(Ord, "∞"),
    "partial" => Symbol(Ord, "∂"),
    "nabla" => Symbol(Ord, "∇"),
    "forall" => Symbol(Ord, "∀"),
    "exists" => Symbol(Ord, "∃"),
    "nexists" => Symbol(Ord, "∄"),
    "emptyset" => Symbol(Ord, "∅"),
    "varnothing" => Symbol(Ord, "∅"),
    "hbar" => Symbol(Ord, "ℏ"),
    "ell" => Symbol(Ord, "ℓ"),
    "Re" => Symbol(Ord, "ℜ"),
    "Im" => Symbol(Ord, "ℑ"),
    "aleph" => Symbol(Ord, "ℵ"),
    "wp" => Symbol(Ord, "℘"),
    "imath" => Symbol(Ord, "ı"),
    "jmath" => Symbol(Ord, "ȷ"),
    "prime" => Symbol(Ord, "′"),
    "angle" => Symbol(Ord, "∠"),
    "triangle" => Symbol(Ord, "△"),
    "neg" => Symbol(Ord, "¬"),
    "lnot" => Symbol(Ord, "¬"),
    "top" => Symbol(Ord, "⊤"),
    "bot" => Symbol(Ord, "⊥"),
    "ldots" => Symbol(Ord, "…"),
    "dots" => Symbol(Ord, "…"),
    "cdots" => Symbol(Ord, "⋯"),
    "vdots" => Symbol(Ord, "⋮"),
    "ddots" => Symbol(Ord, "⋱"),
    "backslash" => Symbol(Ord, "\\"),
    "clubsuit" => Symbol(Ord, "♣"),
    "diamondsuit" => Symbol(Ord, "♢"),
    "heartsuit" => Symbol(Ord, "♡"),
    "spadesuit" => Symbol(Ord, "♠"),
    "flat" => Symbol(Ord, "♭"),
    "natural" => Symbol(Ord, "♮"),
    "sharp" => Symbol(Ord, "♯"),
    "surd" => Symbol(Rad, "√"),
    "%" => Symbol(Ord, "%"),
    "#" => Symbol(Ord, "#"),
    "&" => Symbol(Ord, "&"),
    "$" => Symbol(Ord, "$"),
    "_" => Symbol(Ord, "_"),
    "colon" => Symbol(Pun, ":"),
    // Large operators
    "sum" => Symbol(Op, "∑"),
    "prod" => Symbol(Op, "∏"),
    "coprod" => Symbol(Op, "∐"),
    "int" => Symbol(Op, "∫"),
    "iint" => Symbol(Op, "∬"),
    "iiint" => Symbol(Op, "∭"),
    "iiiint" => Symbol(Op, "⨌"),
    "oint" => Symbol(Op, "∮"),
    "oiint" => Symbol(Op, "∯"),
    "oiiint" => Symbol(Op, "∰"),
    "bigcup" => Symbol(Op, "⋃"),
    "bigcap" => Symbol(Op, "⋂"),
    "bigvee" => Symbol(Op, "⋁"),
    "bigwedge" => Symbol(Op, "⋀"),
    "bigoplus" => Symbol(Op, "⨁"),
    "bigotimes" => Symbol(Op, "⨂"),
    "bigodot" => Symbol(Op, "⨀"),
    "biguplus" => Symbol(Op, "⨄"),
    "bigsqcup" => Symbol(Op, "⨆"),
    // Binary operators
    "pm" => Symbol(Bin, "±"),
    "mp" => Symbol(Bin, "∓"),
    "times" => Symbol(Bin, "×"),
    "div" => Symbol(Bin, "÷"),
    "cdot" => Symbol(Bin, "⋅"),
    "ast" => Symbol(Bin, "∗"),
    "star" => Symbol(Bin, "⋆"),
    "circ" => Symbol(Bin, "∘"),
    "bullet" => Symbol(Bin, "∙"),
    "oplus" => Symbol(Bin, "⊕"),
    "ominus" => Symbol(Bin, "⊖"),
    "otimes" => Symbol(Bin, "⊗"),
    "oslash" => Symbol(Bin, "⊘"),
    "odot" => Symbol(Bin, "⊙"),
    "cup" => Symbol(Bin, "∪"),
    "cap" => Symbol(Bin, "∩"),
    "sqcup" => Symbol(Bin, "⊔"),
    "sqcap" => Symbol(Bin, "⊓"),
    "vee" => Symbol(Bin, "∨"),
    "lor" => Symbol(Bin, "∨"),
    "wedge" => Symbol(Bin, "∧"),
    "land" => Symbol(Bin, "∧"),
    "setminus" => Symbol(Bin, "∖"),
    "wr" => Symbol(Bin, "≀"),
    "uplus" => Symbol(Bin, "⊎"),
    "amalg" => Symbol(Bin, "⨿"),
    "diamond" => Symbol(Bin, "⋄"),
    "bigtriangleup" => Symbol(Bin, "△"),
    "bigtriangledown" => Symbol(Bin, "▽"),
    "triangleleft" => Symbol(Bin, "◃"),
    "triangleright" => Symbol(Bin, "▹"),
    "dagger" => Symbol(Bin, "†"),
    "ddagger" => Symbol(Bin, "‡"),
    // Relations
    "leq" => Symbol(Rel, "≤"),
    "le" => Symbol(Rel, "≤"),
    "geq" => Symbol(Rel, "≥"),
    "ge" => Symbol(Rel, "≥"),
    "leqslant" => Symbol(Rel, "⩽"),
    "geqslant" => Symbol(Rel, "⩾"),
    "neq" => Symbol(Rel, "≠"),
    "ne" => Symbol(Rel, "≠"),
    "nleq" => Symbol(Rel, "≰"),
    "ngeq" => Symbol(Rel, "≱"),
    "equiv" => Symbol(Rel, "≡"),
    "approx" => Symbol(Rel, "≈"),
    "cong" => Symbol(Rel, "≅"),
    "sim" => Symbol(Rel, "∼"),
    "simeq" => Symbol(Rel, "≃"),
    "lesssim" => Symbol(Rel, "≲"),
    "gtrsim" => Symbol(Rel, "≳"),
    "propto" => Symbol(Rel, "∝"),
    "ll" => Symbol(Rel, "≪"),
    "gg" => Symbol(Rel, "≫"),
    "prec" => Symbol(Rel, "≺"),
    "succ" => Symbol(Rel, "≻"),
    "preceq" => Symbol(Rel, "⪯"),
    "succeq" => Symbol(Rel, "⪰"),
    "doteq" => Symbol(Rel, "≐"),
    "asymp" => Symbol(Rel, "≍"),
    "coloneqq" => Symbol(Rel, "≔"),
    "subset" => Symbol(Rel, "⊂"),
    "supset" => Symbol(Rel, "⊃"),
    "subseteq" => Symbol(Rel, "⊆"),
    "supseteq" => Symbol(Rel, "⊇"),
    "in" => Symbol(Rel, "∈"),
    "ni" => Symbol(Rel, "∋"),
    "notin" => Symbol(Rel, "∉"),
    "perp" => Symbol(Rel, "⊥"),
    "parallel" => Symbol(Rel, "∥"),
    "mid" => Symbol(Rel, "∣"),
    "vdash" => Symbol(Rel, "⊢"),
    "dashv" => Symbol(Rel, "⊣"),
    "models" => Symbol(Rel, "⊨"),
    "to" => Symbol(Rel, "→"),
    "rightarrow" => Symbol(Rel, "→"),
    "leftarrow" => Symbol(Rel, "←"),
    "gets" => Symbol(Rel, "←"),
    "Rightarrow" => Symbol(Rel, "⇒"),
    "Leftarrow" => Symbol(Rel, "⇐"),
    "leftrightarrow" => Symbol(Rel, "↔"),
    "Leftrightarrow" => Symbol(Rel, "⇔"),
    "longrightarrow" => Symbol(Rel, "⟶"),
    "longleftarrow" => Symbol(Rel, "⟵"),
    "Longrightarrow" => Symbol(Rel, "⟹"),
    "Longleftarrow" => Symbol(Rel, "⟸"),
    "implies" => Symbol(Rel, "⟹"),
    "iff" => Symbol(Rel, "⟺"),
    "mapsto" => Symbol(Rel, "↦"),
    "hookrightarrow" => Symbol(Rel, "↪"),
    "uparrow" => Symbol(Rel, "↑"),
    "downarrow" => Symbol(Rel, "↓"),
    "Uparrow" => Symbol(Rel, "⇑"),
    "Downarrow" => Symbol(Rel, "⇓"),
    "rightleftharpoons" => Symbol(Rel, "⇌"),
    // Operator names
    "arccos" => MathOperator("arccos"),
    "arcsin" => MathOperator("arcsin"),
    "arctan" => MathOperator("arctan"),
    "arg" => MathOperator("arg"),
    "cos" => MathOperator("cos"),
    "cosh" => MathOperator("cosh"),
    "cot" => MathOperator("cot"),
    "coth" => MathOperator("coth"),
    "csc" => MathOperator("csc"),
    "deg" => MathOperator("deg"),
    "dim" => MathOperator("dim"),
    "exp" => MathOperator("exp"),
    "hom" => MathOperator("hom"),
    "ker" => MathOperator("ker"),
    "lg" => MathOperator("lg"),
    "ln" => MathOperator("ln"),
    "log" => MathOperator("log"),
    "sec" => MathOperator("sec"),
    "sin" => MathOperator("sin"),
    "sinh" => MathOperator("sinh"),
    "tan" => MathOperator("tan"),
    "tanh" => MathOperator("tanh"),
    "det" => LimitOperator("det"),
    "gcd" => LimitOperator("gcd"),
    "inf" => LimitOperator("inf"),
    "lim" => LimitOperator("lim"),
    "liminf" => LimitOperator("lim inf"),
    "limsup" => LimitOperator("lim sup"),
    "max" => LimitOperator("max"),
    "min" => LimitOperator("min"),
    "Pr" => LimitOperator("Pr"),
    "sup" => LimitOperator("sup"),
    // Spaces
    "," => Space(0.167),
    ":" => Space(0.222),
    ">" => Space(0.222),
    ";" => Space(0.278),
    "!" => Space(-0.167),
    " " => Space(0.333),
    "thinspace" => Space(0.167),
    "enspace" => Space(0.5),
    "quad" => Space(1.0),
    "qquad" => Space(2.0),
    // Sized delimiters
    "big" => Big(1.2),
    "bigl" => Big(1.2),
    "bigr" => Big(1.2),
    "bigm" => Big(1.2),
    "Big" => Big(1.623),
    "Bigl" => Big(1.623),
    "Bigr" => Big(1.623),
    "Bigm" => Big(1.623),
    "bigg" => Big(2.047),
    "biggl" => Big(2.047),
    "biggr" => Big(2.047),
    "biggm" => Big(2.047),
    "Bigg" => Big(2.470),
    "Biggl" => Big(2.470),
    "Biggr" => Big(2.470),
    "Biggm" => Big(2.470),
    // Accents
    "hat" => Decoration(SymbolClass::Accent, "\u{0302}", true),
    "widehat" => Decoration(SymbolClass::Accent, "\u{0302}", true),
    "check" => Decoration(SymbolClass::Accent, "\u{030C}", true),
    "breve" => Decoration(SymbolClass::Accent, "\u{0306}", true),
    "acute" => Decoration(SymbolClass::Accent, "\u{0301}", true),
    "grave" => Decoration(SymbolClass::Accent, "\u{0300}", true),
    "tilde" => Decoration(SymbolClass::Accent, "\u{0303}", true),
    "widetilde" => Decoration(SymbolClass::Accent, "\u{0303}", true),
    "bar" => Decoration(SymbolClass::Accent, "\u{0304}", true),
    "dot" => Decoration(SymbolClass::Accent, "\u{0307}", true),
    "ddot" => Decoration(SymbolClass::Accent, "\u{0308}", true),
    "dddot" => Decoration(SymbolClass::Accent, "\u{20DB}", true),
    "vec" => Decoration(SymbolClass::Accent, "\u{20D7}", true),
    "mathring" => Decoration(SymbolClass::Accent, "\u{030A}", true),
    "overline" => Decoration(TOver, "\u{00AF}", true),
    "underline" => Decoration(TUnder, "_", false),
    "overbrace" => Decoration(TOver, "⏞", true),
    "underbrace" => Decoration(TUnder, "⏟", false),
    "overparen" => Decoration(TOver, "⏜", true),
    "underparen" => Decoration(TUnder, "⏝", false),
    "overbracket" => Decoration(TOver, "⎴", true),
    "underbracket" => Decoration(TUnder, "⎵", false),
    "overrightarrow" => Decoration(TOver, "→", true),
    "overleftarrow" => Decoration(TOver, "←", true),
    "overleftrightarrow" => Decoration(TOver, "↔", true),
    "underrightarrow" => Decoration(TUnder, "→", false),
    "underleftarrow" => Decoration(TUnder, "←", false),
    "utilde" => Decoration(BotAccent, "\u{0330}", false),
    // Constructs with arguments
    "frac" => Frac(FractionType::Normal),
    "cfrac" => Frac(FractionType::Display),
    "dfrac" => Frac(FractionType::Display),
    "tfrac" => Frac(FractionType::Inline),
    "sqrt" => Sqrt,
    "left" => Left,
    "right" => Right,
    "middle" => Middle,
    "begin" => Begin,
    "end" => End,
    "overset" => Overset,
    "stackrel" => Overset,
    "underset" => Underset,
    "boxed" => Boxed,
    "phantom" => Phantom,
    "cancel" => Cancel(Stroke::Forward),
    "bcancel" => Cancel(Stroke::Back),
    "xcancel" => Cancel(Stroke::Both),
    "operatorname" => OperatorName,
    "operatorname*" => OperatorNameStar,
    "limits" => Limits,
    "nolimits" => NoLimits,
    "displaystyle" => Ignored,
    "textstyle" => Ignored,
    "scriptstyle" => Ignored,
    "scriptscriptstyle" => Ignored,
    "hline" => Ignored,
    "nonumber" => Ignored,
    "notag" => Ignored,
};

/// Single characters that stand for a symbol on their own.
static CHAR_OPS: phf::Map<char, (SymbolClass, &'static str)> = phf::phf_map! {
    '+' => (Bin, "+"),
    '-' => (Bin, "\u{2212}"),
    '*' => (Bin, "\u{2217}"),
    '/' => (Ord, "/"),
    '=' => (Rel, "="),
    '<' => (Rel, "<"),
    '>' => (Rel, ">"),
    ':' => (Rel, ":"),
    ',' => (Pun, ","),
    ';' => (Pun, ";"),
    '!' => (Ord, "!"),
    '?' => (Ord, "?"),
    '.' => (Ord, "."),
    '@' => (Ord, "@"),
    '"' => (Ord, "\u{201D}"),
    '`' => (Ord, "\u{2018}"),
};

/// Delimiters, both as plain characters and as backslash commands.
static ENCLOSURES: phf::Map<&'static str, (SymbolClass, &'static str)> = phf::phf_map! {
    "(" => (Open, "("),
    ")" => (Close, ")"),
    "[" => (Open, "["),
    "]" => (Close, "]"),
    "|" => (Fence, "|"),
    "\\{" => (Open, "{"),
    "\\}" => (Close, "}"),
    "\\lbrace" => (Open, "{"),
    "\\rbrace" => (Close, "}"),
    "\\lbrack" => (Open, "["),
    "\\rbrack" => (Close, "]"),
    "\\langle" => (Open, "⟨"),
    "\\rangle" => (Close, "⟩"),
    "\\lvert" => (Open, "|"),
    "\\rvert" => (Close, "|"),
    "\\lVert" => (Open, "‖"),
    "\\rVert" => (Close, "‖"),
    "\\vert" => (Fence, "|"),
    "\\Vert" => (Fence, "‖"),
    "\\|" => (Fence, "‖"),
    "\\lfloor" => (Open, "⌊"),
    "\\rfloor" => (Close, "⌋"),
    "\\lceil" => (Open, "⌈"),
    "\\rceil" => (Close, "⌉"),
    "\\ulcorner" => (Open, "⌜"),
    "\\urcorner" => (Close, "⌝"),
};

static STYLES: phf::Map<&'static str, StyleCommand> = phf::phf_map! {
    "mathrm" => StyleCommand::Styled(TextStyle::Normal),
    "mathup" => StyleCommand::Styled(TextStyle::Normal),
    "mathbf" => StyleCommand::Styled(TextStyle::Bold),
    "mathit" => StyleCommand::Styled(TextStyle::Italic),
    "mathtt" => StyleCommand::Styled(TextStyle::Monospace),
    "mathsf" => StyleCommand::Styled(TextStyle::SansSerif),
    "mathbb" => StyleCommand::Styled(TextStyle::DoubleStruck),
    "mathcal" => StyleCommand::Styled(TextStyle::Script),
    "mathscr" => StyleCommand::Styled(TextStyle::Script),
    "mathfrak" => StyleCommand::Styled(TextStyle::Fraktur),
    "mathbfit" => StyleCommand::Styled(TextStyle::BoldItalic),
    "boldsymbol" => StyleCommand::Styled(TextStyle::BoldItalic),
    "bm" => StyleCommand::Styled(TextStyle::BoldItalic),
    "text" => StyleCommand::Text(TextStyle::Normal),
    "textrm" => StyleCommand::Text(TextStyle::Normal),
    "textnormal" => StyleCommand::Text(TextStyle::Normal),
    "textup" => StyleCommand::Text(TextStyle::Normal),
    "mbox" => StyleCommand::Text(TextStyle::Normal),
    "textbf" => StyleCommand::Text(TextStyle::Bold),
    "textit" => StyleCommand::Text(TextStyle::Italic),
    "texttt" => StyleCommand::Text(TextStyle::Monospace),
    "textsf" => StyleCommand::Text(TextStyle::SansSerif),
};

#[inline]
pub(crate) fn get_command(name: &str) -> Option<Command> {
    COMMANDS.get(name).copied()
}

#[inline]
pub(crate) fn get_char_op(ch: char) -> Option<(SymbolClass, &'static str)> {
    CHAR_OPS.get(&ch).copied()
}

/// Look up a delimiter; `token` is either a single character or a command including its
/// backslash.
#[inline]
pub(crate) fn get_enclosure(token: &str) -> Option<(SymbolClass, &'static str)> {
    ENCLOSURES.get(token).copied()
}

#[inline]
pub(crate) fn get_style(name: &str) -> Option<StyleCommand> {
    STYLES.get(name).copied()
}

/// The prime character for a run of `count` apostrophes.
pub(crate) fn prime_string(count: usize) -> Option<&'static str> {
    match count {
        1 => Some("′"),
        2 => Some("″"),
        3 => Some("‴"),
        4 => Some("⁗"),
        _ => None,
    }
}

/// Integrals keep their sub/superscripts to the side unless `\limits` is given.
pub(crate) fn is_integral(op: &str) -> bool {
    matches!(
        op,
        "∫" | "∬" | "∭" | "⨌" | "∮" | "∯" | "∰" | "∱" | "∲" | "∳"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups() {
        assert_eq!(get_command("sum"), Some(Symbol(Op, "∑")));
        assert_eq!(get_command("alpha"), Some(Ident("α")));
        assert_eq!(get_command("binom"), None);
        assert_eq!(get_char_op('-'), Some((Bin, "\u{2212}")));
        assert_eq!(get_char_op('x'), None);
        assert_eq!(get_enclosure("\\langle"), Some((Open, "⟨")));
        assert_eq!(get_enclosure("langle"), None);
        assert_eq!(
            get_style("mathbb"),
            Some(StyleCommand::Styled(TextStyle::DoubleStruck))
        );
        assert_eq!(get_style("text"), Some(StyleCommand::Text(TextStyle::Normal)));
    }

    #[test]
    fn primes() {
        assert_eq!(prime_string(1), Some("′"));
        assert_eq!(prime_string(4), Some("⁗"));
        assert_eq!(prime_string(0), None);
        assert_eq!(prime_string(5), None);
    }

    #[test]
    fn integrals() {
        assert!(is_integral("∮"));
        assert!(!is_integral("∑"));
    }
}
