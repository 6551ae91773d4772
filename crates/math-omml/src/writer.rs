//! Translation of [`Exp`] nodes into an OMML element tree.
//!
//! Every node maps to exactly one construct; nothing here can fail. Constructs that OMML
//! cannot express (like explicitly sized delimiters) degrade to their content.
use std::mem;

use log::trace;
use omml_renderer::attribute::{
    BorderBoxFlags, FracType, Justification, LimLoc, Position, on_off,
};
use omml_renderer::node::Element;

use crate::MathDisplay;
use crate::ast::{
    Alignment, ArrayLine, Exp, FractionType, InDelimited, Stroke, SymbolClass, TextStyle,
};
use crate::commands::is_integral;

const ZERO_WIDTH_SPACE: &str = "\u{200B}";

/// Placeholder operand for an n-ary operator at the end of the input.
static EMPTY_GROUP: Exp = Exp::Grouped(Vec::new());

/// Glyphs that become `m:nary` when they carry limits.
const NARY_OPERATORS: [&str; 13] = [
    "∫", "∬", "∭", "⨌", "∮", "∯", "∰", "∱", "∲", "∳", "∏", "∐", "∑",
];

/// Characters that draw a bar rather than an accent.
const BAR_CHARS: [&str; 5] = ["\u{00AF}", "\u{203E}", "\u{0305}", "\u{0332}", "_"];

#[inline]
fn is_nary(op: &str) -> bool {
    NARY_OPERATORS.contains(&op)
}

/// A single run property; lists of these are inherited down the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
enum RunProp {
    /// `m:nor`, normal (non-math) text.
    Normal,
    Sty(&'static str),
    Scr(&'static str),
}

fn style_props(style: TextStyle) -> &'static [RunProp] {
    use RunProp::{Scr, Sty};
    match style {
        TextStyle::Normal => &[Sty("p")],
        TextStyle::Bold => &[Sty("b")],
        TextStyle::Italic => &[Sty("i")],
        TextStyle::BoldItalic => &[Sty("bi")],
        TextStyle::Monospace => &[Sty("p"), Scr("monospace")],
        TextStyle::SansSerif => &[Sty("p"), Scr("sans-serif")],
        TextStyle::SansSerifBold => &[Sty("b"), Scr("sans-serif")],
        TextStyle::SansSerifItalic => &[Sty("i"), Scr("sans-serif")],
        TextStyle::SansSerifBoldItalic => &[Sty("bi"), Scr("sans-serif")],
        TextStyle::DoubleStruck => &[Sty("p"), Scr("double-struck")],
        TextStyle::Script => &[Sty("p"), Scr("script")],
        TextStyle::BoldScript => &[Sty("b"), Scr("script")],
        TextStyle::Fraktur => &[Sty("p"), Scr("fraktur")],
        TextStyle::BoldFraktur => &[Sty("b"), Scr("fraktur")],
    }
}

/// Inner properties come first, so they win over inherited ones.
fn prepend(inner: &[RunProp], inherited: &[RunProp]) -> Vec<RunProp> {
    [inner, inherited].concat()
}

/// `m:rPr` for a property list, or `None` if there is nothing to set.
///
/// The first occurrence of each kind of property counts.
fn run_properties(props: &[RunProp]) -> Option<Element> {
    let normal = props.contains(&RunProp::Normal);
    let script = props.iter().find_map(|prop| match prop {
        RunProp::Scr(scr) => Some(*scr),
        RunProp::Normal | RunProp::Sty(_) => None,
    });
    let style = props.iter().find_map(|prop| match prop {
        RunProp::Sty(sty) => Some(*sty),
        RunProp::Normal | RunProp::Scr(_) => None,
    });
    if !normal && script.is_none() && style.is_none() {
        return None;
    }
    let mut rpr = Element::math("rPr");
    if normal {
        rpr = rpr.with_child(Element::math("nor"));
    }
    if let Some(scr) = script {
        rpr = rpr.with_child(Element::math_val("scr", scr));
    }
    if let Some(sty) = style {
        rpr = rpr.with_child(Element::math_val("sty", sty));
    }
    Some(rpr)
}

fn run(props: &[RunProp], text: &str) -> Element {
    let run = Element::math("r");
    let run = match run_properties(props) {
        Some(rpr) => run.with_child(rpr),
        None => run,
    };
    run.with_child(Element::math("t").with_text(text))
}

/// The Unicode space closest to the given width in ems.
fn space_text(width: f32) -> &'static str {
    match width {
        w if w > 0.0 && w <= 0.17 => "\u{2009}",
        w if w > 0.17 && w <= 0.23 => "\u{2005}",
        w if w > 0.23 && w <= 0.5 => "\u{2004}",
        w if w > 0.5 && w <= 1.8 => "\u{2001}",
        w if w > 1.8 => "\u{2001}\u{2001}",
        _ => ZERO_WIDTH_SPACE,
    }
}

fn justification(align: Alignment) -> Justification {
    match align {
        Alignment::Left => Justification::Left,
        Alignment::Center => Justification::Center,
        Alignment::Right => Justification::Right,
    }
}

fn bar(pos: Position, base: Vec<Element>) -> Element {
    Element::math("bar")
        .with_child(Element::math("barPr").with_child(Element::math_val("pos", <&str>::from(pos))))
        .with_child(Element::math("e").with_children(base))
}

fn accent(chr: &str, base: Vec<Element>) -> Element {
    Element::math("acc")
        .with_child(Element::math("accPr").with_child(Element::math_val("chr", chr)))
        .with_child(Element::math("e").with_children(base))
}

fn group_chr(chr: &str, pos: Position, base: Vec<Element>) -> Element {
    Element::math("groupChr")
        .with_child(
            Element::math("groupChrPr")
                .with_child(Element::math_val("chr", chr))
                .with_child(Element::math_val("pos", <&str>::from(pos)))
                .with_child(Element::math_val("vertJc", <&str>::from(pos.opposite()))),
        )
        .with_child(Element::math("e").with_children(base))
}

/// The limits of an n-ary operator, borrowed from the node they were found in.
#[derive(Debug, Clone, Copy)]
struct NaryLimits<'a> {
    chr: &'a str,
    lim_loc: LimLoc,
    sub: Option<&'a Exp>,
    sup: Option<&'a Exp>,
}

/// An element of the top-level list after n-ary operators have been paired with their
/// operands.
#[derive(Debug)]
enum Item<'a> {
    Exp(&'a Exp),
    Nary(NaryLimits<'a>, &'a Exp),
}

/// Recognize an n-ary glyph, either bare or carrying limits or scripts.
fn nary_limits(exp: &Exp, display: MathDisplay) -> Option<NaryLimits<'_>> {
    let (base, convertible, sub, sup) = match exp {
        Exp::Over {
            convertible,
            base,
            over,
        } => (&**base, Some(*convertible), None, Some(&**over)),
        Exp::Under {
            convertible,
            base,
            under,
        } => (&**base, Some(*convertible), Some(&**under), None),
        Exp::UnderOver {
            convertible,
            base,
            under,
            over,
        } => (
            &**base,
            Some(*convertible),
            Some(&**under),
            Some(&**over),
        ),
        Exp::Sub { base, sub } => (&**base, None, Some(&**sub), None),
        Exp::Super { base, sup } => (&**base, None, None, Some(&**sup)),
        Exp::SubSup { base, sub, sup } => {
            (&**base, None, Some(&**sub), Some(&**sup))
        }
        _ => (exp, None, None, None),
    };
    let Exp::Symbol(SymbolClass::Op, chr) = base else {
        return None;
    };
    if !is_nary(chr) {
        return None;
    }
    let to_the_side = match convertible {
        Some(convertible) => convertible && display == MathDisplay::Inline,
        None => sub.is_some() || sup.is_some() || is_integral(chr),
    };
    let lim_loc = if to_the_side {
        LimLoc::SubSup
    } else {
        LimLoc::UnderOver
    };
    Some(NaryLimits {
        chr,
        lim_loc,
        sub,
        sup,
    })
}

/// Pair every n-ary operator in the list with the node that follows it.
fn merge_nary_limits(exps: &[Exp], display: MathDisplay) -> Vec<Item<'_>> {
    let mut items = Vec::with_capacity(exps.len());
    let mut iter = exps.iter();
    while let Some(exp) = iter.next() {
        items.push(match nary_limits(exp, display) {
            Some(limits) => Item::Nary(limits, iter.next().unwrap_or(&EMPTY_GROUP)),
            None => Item::Exp(exp),
        });
    }
    items
}

/// Build the OMML tree for a parsed formula.
///
/// Block formulas are wrapped in a centered `m:oMathPara`.
pub fn write_omml(display: MathDisplay, exps: &[Exp]) -> Element {
    let writer = Writer { display };
    let mut nodes = Vec::new();
    for item in merge_nary_limits(exps, display) {
        match item {
            Item::Exp(exp) => writer.write_exp(&[], exp, &mut nodes),
            Item::Nary(limits, operand) => nodes.push(writer.write_nary(&[], limits, operand)),
        }
    }
    let math = Element::math("oMath").with_children(nodes);
    match display {
        MathDisplay::Block => Element::math("oMathPara")
            .with_child(Element::math("oMathParaPr").with_child(Element::math_val(
                "jc",
                <&str>::from(Justification::Center),
            )))
            .with_child(math),
        MathDisplay::Inline => math,
    }
}

struct Writer {
    display: MathDisplay,
}

impl Writer {
    fn write_one(&self, props: &[RunProp], exp: &Exp) -> Vec<Element> {
        let mut out = Vec::new();
        self.write_exp(props, exp, &mut out);
        out
    }

    fn write_sequence(&self, props: &[RunProp], exps: &[Exp]) -> Vec<Element> {
        let mut out = Vec::new();
        for exp in exps {
            self.write_exp(props, exp, &mut out);
        }
        out
    }

    /// An argument slot like `m:e` or `m:num`.
    fn slot(&self, name: &'static str, props: &[RunProp], exp: &Exp) -> Element {
        Element::math(name).with_children(self.write_one(props, exp))
    }

    #[inline]
    fn inline_limits(&self, convertible: bool) -> bool {
        convertible && self.display == MathDisplay::Inline
    }

    fn write_exp(&self, props: &[RunProp], exp: &Exp, out: &mut Vec<Element>) {
        match exp {
            Exp::Number(number) => out.push(run(props, number)),
            Exp::Identifier(ident) => {
                let text = if ident.is_empty() {
                    ZERO_WIDTH_SPACE
                } else {
                    ident.as_str()
                };
                out.push(run(props, text));
            }
            Exp::Symbol(class, text) => out.push(write_symbol(props, *class, text)),
            Exp::Text(style, text) => {
                let props = prepend(&[RunProp::Normal], style_props(*style));
                out.push(run(&props, text));
            }
            Exp::Space(width) => out.push(run(props, space_text(*width))),
            Exp::MathOperator(name) => {
                let props = prepend(&[RunProp::Sty("p")], props);
                out.push(run(&props, name));
            }
            Exp::Grouped(nodes) => match nodes.as_slice() {
                [] => out.push(run(props, ZERO_WIDTH_SPACE)),
                [first, operand] => match nary_limits(first, self.display) {
                    Some(limits) => out.push(self.write_nary(props, limits, operand)),
                    None => {
                        self.write_exp(props, first, out);
                        self.write_exp(props, operand, out);
                    }
                },
                nodes => {
                    for node in nodes {
                        self.write_exp(props, node, out);
                    }
                }
            },
            Exp::Sqrt(base) => out.push(
                Element::math("rad")
                    .with_child(
                        Element::math("radPr")
                            .with_child(Element::math_val("degHide", on_off(true))),
                    )
                    .with_child(Element::math("deg"))
                    .with_child(self.slot("e", props, base)),
            ),
            Exp::Root { index, base } => out.push(
                Element::math("rad")
                    .with_child(self.slot("deg", props, index))
                    .with_child(self.slot("e", props, base)),
            ),
            Exp::Phantom(inner) => out.push(
                Element::math("phant")
                    .with_child(
                        Element::math("phantPr").with_child(Element::math_val("show", on_off(false))),
                    )
                    .with_child(self.slot("e", props, inner)),
            ),
            Exp::Boxed(inner) => {
                out.push(Element::math("borderBox").with_child(self.slot("e", props, inner)));
            }
            Exp::Cancel(stroke, inner) => {
                let strike = match stroke {
                    Stroke::Forward => BorderBoxFlags::STRIKE_BLTR,
                    Stroke::Back => BorderBoxFlags::STRIKE_TLBR,
                    Stroke::Both => BorderBoxFlags::STRIKE_BLTR | BorderBoxFlags::STRIKE_TLBR,
                };
                let flags = BorderBoxFlags::HIDE_ALL | strike;
                out.push(
                    Element::math("borderBox")
                        .with_child(Element::math("borderBoxPr").with_children(
                            flags
                                .property_names()
                                .map(|name| Element::math_val(name, on_off(true))),
                        ))
                        .with_child(self.slot("e", props, inner)),
                );
            }
            Exp::Scaled(scale, inner) => {
                trace!("writing delimiter scaled by {scale} at its natural size");
                self.write_exp(props, inner, out);
            }
            Exp::Sub { base, sub } => out.push(self.write_sub(props, base, sub)),
            Exp::Super { base, sup } => out.push(self.write_sup(props, base, sup)),
            Exp::SubSup { base, sub, sup } => out.push(self.write_sub_sup(props, base, sub, sup)),
            Exp::Fraction { ty, num, den } => {
                let ty = match ty {
                    FractionType::Normal | FractionType::Display => FracType::Bar,
                    FractionType::Inline => FracType::Linear,
                    FractionType::NoLine => FracType::NoBar,
                };
                out.push(
                    Element::math("f")
                        .with_child(
                            Element::math("fPr")
                                .with_child(Element::math_val("type", <&str>::from(ty))),
                        )
                        .with_child(self.slot("num", props, num))
                        .with_child(self.slot("den", props, den)),
                );
            }
            Exp::Over {
                convertible,
                base,
                over,
            } => {
                if self.inline_limits(*convertible) {
                    out.push(self.write_sup(props, base, over));
                } else {
                    let base = self.write_one(props, base);
                    out.push(self.write_over(props, base, over));
                }
            }
            Exp::Under {
                convertible,
                base,
                under,
            } => {
                if self.inline_limits(*convertible) {
                    out.push(self.write_sub(props, base, under));
                } else {
                    let base = self.write_one(props, base);
                    out.push(self.write_under(props, base, under));
                }
            }
            Exp::UnderOver {
                convertible,
                base,
                under,
                over,
            } => {
                if self.inline_limits(*convertible) {
                    out.push(self.write_sub_sup(props, base, under, over));
                } else {
                    let base = self.write_one(props, base);
                    let with_under = self.write_under(props, base, under);
                    out.push(self.write_over(props, vec![with_under], over));
                }
            }
            Exp::Delimited {
                open,
                close,
                content,
            } => out.push(self.write_delimited(props, open, close, content)),
            Exp::Array { align, rows } => out.push(self.write_array(props, align, rows)),
            Exp::Styled(style, nodes) => {
                let props = prepend(style_props(*style), props);
                for node in nodes {
                    self.write_exp(&props, node, out);
                }
            }
        }
    }

    fn write_sub(&self, props: &[RunProp], base: &Exp, sub: &Exp) -> Element {
        Element::math("sSub")
            .with_child(self.slot("e", props, base))
            .with_child(self.slot("sub", props, sub))
    }

    fn write_sup(&self, props: &[RunProp], base: &Exp, sup: &Exp) -> Element {
        Element::math("sSup")
            .with_child(self.slot("e", props, base))
            .with_child(self.slot("sup", props, sup))
    }

    fn write_sub_sup(&self, props: &[RunProp], base: &Exp, sub: &Exp, sup: &Exp) -> Element {
        Element::math("sSubSup")
            .with_child(self.slot("e", props, base))
            .with_child(self.slot("sub", props, sub))
            .with_child(self.slot("sup", props, sup))
    }

    /// Place `over` above an already written base.
    fn write_over(&self, props: &[RunProp], base: Vec<Element>, over: &Exp) -> Element {
        match over {
            Exp::Symbol(_, chr) if BAR_CHARS.contains(&chr.as_str()) => bar(Position::Top, base),
            Exp::Symbol(SymbolClass::Accent, chr) => accent(chr, base),
            Exp::Symbol(SymbolClass::TOver, chr) => group_chr(chr, Position::Top, base),
            _ => Element::math("limUpp")
                .with_child(Element::math("e").with_children(base))
                .with_child(self.slot("lim", props, over)),
        }
    }

    /// Place `under` below an already written base.
    fn write_under(&self, props: &[RunProp], base: Vec<Element>, under: &Exp) -> Element {
        match under {
            Exp::Symbol(_, chr) if BAR_CHARS.contains(&chr.as_str()) => {
                bar(Position::Bottom, base)
            }
            Exp::Symbol(SymbolClass::Accent, chr) => accent(chr, base),
            Exp::Symbol(SymbolClass::TUnder | SymbolClass::BotAccent, chr) => {
                group_chr(chr, Position::Bottom, base)
            }
            _ => Element::math("limLow")
                .with_child(Element::math("e").with_children(base))
                .with_child(self.slot("lim", props, under)),
        }
    }

    /// Hidden limits are flagged and their slots left empty.
    fn write_nary(&self, props: &[RunProp], limits: NaryLimits<'_>, operand: &Exp) -> Element {
        let sub_hide = limits.sub.is_none_or(Exp::is_empty_group);
        let sup_hide = limits.sup.is_none_or(Exp::is_empty_group);
        let properties = Element::math("naryPr")
            .with_child(Element::math_val("chr", limits.chr))
            .with_child(Element::math_val("limLoc", <&str>::from(limits.lim_loc)))
            .with_child(Element::math_val("subHide", on_off(sub_hide)))
            .with_child(Element::math_val("supHide", on_off(sup_hide)));
        let sub = match limits.sub {
            Some(sub) if !sub_hide => self.write_one(props, sub),
            _ => Vec::new(),
        };
        let sup = match limits.sup {
            Some(sup) if !sup_hide => self.write_one(props, sup),
            _ => Vec::new(),
        };
        Element::math("nary")
            .with_child(properties)
            .with_child(Element::math("sub").with_children(sub))
            .with_child(Element::math("sup").with_children(sup))
            .with_child(self.slot("e", props, operand))
    }

    /// Every run of expressions between separators becomes one `m:e`.
    fn write_delimited(
        &self,
        props: &[RunProp],
        open: &str,
        close: &str,
        content: &[InDelimited],
    ) -> Element {
        let separator = content.iter().find_map(|item| match item {
            InDelimited::Separator(sep) => Some(sep.as_str()),
            InDelimited::Exp(_) => None,
        });
        let mut properties = Element::math("dPr").with_child(Element::math_val("begChr", open));
        if let Some(sep) = separator {
            properties = properties.with_child(Element::math_val("sepChr", sep));
        }
        let properties = properties
            .with_child(Element::math_val("endChr", close))
            .with_child(Element::math("grow"));

        let mut groups = Vec::new();
        let mut current = Vec::new();
        for item in content {
            match item {
                InDelimited::Separator(_) => {
                    groups.push(Element::math("e").with_children(mem::take(&mut current)));
                }
                InDelimited::Exp(exp) => self.write_exp(props, exp, &mut current),
            }
        }
        groups.push(Element::math("e").with_children(current));
        Element::math("d").with_child(properties).with_children(groups)
    }

    fn write_array(&self, props: &[RunProp], align: &[Alignment], rows: &[ArrayLine]) -> Element {
        let mut properties = Element::math("mPr")
            .with_child(Element::math_val("baseJc", <&str>::from(Justification::Center)))
            .with_child(Element::math_val("plcHide", on_off(true)));
        if !align.is_empty() {
            let columns = align.iter().map(|&align| {
                Element::math("mc").with_child(
                    Element::math("mcPr")
                        .with_child(Element::math_val("count", "1"))
                        .with_child(Element::math_val(
                            "mcJc",
                            <&str>::from(justification(align)),
                        )),
                )
            });
            properties = properties.with_child(Element::math("mcs").with_children(columns));
        }
        let rows = rows.iter().map(|row| {
            Element::math("mr").with_children(
                row.iter()
                    .map(|cell| Element::math("e").with_children(self.write_sequence(props, cell))),
            )
        });
        Element::math("m").with_child(properties).with_children(rows)
    }
}

/// Operators, binary operators and relations that are more than a single punctuation
/// character are boxed so that Word treats them as operators.
fn write_symbol(props: &[RunProp], class: SymbolClass, text: &str) -> Element {
    let mut chars = text.chars();
    let single_punctuation = matches!(
        (chars.next(), chars.next()),
        (Some(ch), None) if !ch.is_alphanumeric() && !ch.is_whitespace()
    );
    if matches!(class, SymbolClass::Op | SymbolClass::Bin | SymbolClass::Rel) && !single_punctuation
    {
        Element::math("box")
            .with_child(
                Element::math("boxPr").with_child(Element::math_val("opEmu", on_off(true))),
            )
            .with_child(Element::math("e").with_child(run(props, text)))
    } else {
        run(props, text)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::Parser;

    use super::*;

    fn write(latex: &str, display: MathDisplay) -> Element {
        let exps = Parser::new(latex).parse().unwrap();
        write_omml(display, &exps)
    }

    fn compact(latex: &str) -> String {
        write(latex, MathDisplay::Inline).to_xml(false)
    }

    /// The `m:oMath` element of a block formula.
    fn block_math(latex: &str) -> Element {
        let para = write(latex, MathDisplay::Block);
        assert_eq!(para.name.local, "oMathPara");
        para.child("oMath").unwrap().clone()
    }

    fn property<'a>(element: &'a Element, path: &[&str]) -> Option<&'a str> {
        let mut current = element;
        for local in path {
            current = current.child(local)?;
        }
        current.val()
    }

    #[test]
    fn superscript() {
        assert_eq!(
            compact("x^2"),
            "<m:oMath><m:sSup><m:e><m:r><m:t>x</m:t></m:r></m:e>\
             <m:sup><m:r><m:t>2</m:t></m:r></m:sup></m:sSup></m:oMath>"
        );
    }

    #[test]
    fn fraction_has_bar() {
        assert_eq!(
            compact(r"\frac{1}{2}"),
            "<m:oMath><m:f><m:fPr><m:type m:val=\"bar\" /></m:fPr>\
             <m:num><m:r><m:t>1</m:t></m:r></m:num>\
             <m:den><m:r><m:t>2</m:t></m:r></m:den></m:f></m:oMath>"
        );
        let math = block_math(r"\tfrac{1}{2}");
        assert_eq!(property(&math, &["f", "fPr", "type"]), Some("lin"));
    }

    #[test]
    fn block_is_centered_paragraph() {
        let para = write("x", MathDisplay::Block);
        assert_eq!(property(&para, &["oMathParaPr", "jc"]), Some("center"));
    }

    #[test]
    fn sum_with_limits_becomes_nary() {
        let math = block_math(r"\sum_{i=1}^{n} i");
        let nary = math.child("nary").unwrap();
        assert_eq!(property(nary, &["naryPr", "chr"]), Some("∑"));
        assert_eq!(property(nary, &["naryPr", "limLoc"]), Some("undOvr"));
        assert_eq!(property(nary, &["naryPr", "subHide"]), Some("0"));
        assert_eq!(property(nary, &["naryPr", "supHide"]), Some("0"));
        assert_eq!(nary.child("sub").unwrap().text_content(), "i=1");
        assert_eq!(nary.child("sup").unwrap().text_content(), "n");
        assert_eq!(nary.child("e").unwrap().text_content(), "i");
        // The operand is consumed by the operator.
        assert_eq!(math.child_elements().count(), 1);
    }

    #[test]
    fn bare_sum_hides_limits() {
        let math = block_math(r"\sum i");
        let nary = math.child("nary").unwrap();
        assert_eq!(property(nary, &["naryPr", "subHide"]), Some("1"));
        assert_eq!(property(nary, &["naryPr", "supHide"]), Some("1"));
        assert_eq!(nary.child("sub").unwrap().child_elements().count(), 0);
        assert_eq!(nary.child("sup").unwrap().child_elements().count(), 0);
        assert_eq!(nary.child("e").unwrap().text_content(), "i");
    }

    #[test]
    fn nary_at_end_gets_placeholder_operand() {
        let math = block_math(r"\int_0^1");
        let nary = math.child("nary").unwrap();
        assert_eq!(property(nary, &["naryPr", "limLoc"]), Some("subSup"));
        assert_eq!(nary.child("e").unwrap().text_content(), ZERO_WIDTH_SPACE);
    }

    #[test]
    fn inline_sum_moves_limits_to_the_side() {
        let math = write(r"\sum_{i}^{n} x", MathDisplay::Inline);
        assert_eq!(property(&math, &["nary", "naryPr", "limLoc"]), Some("subSup"));
    }

    #[test]
    fn lim_in_both_modes() {
        let math = block_math(r"\lim_{x\to 0} f");
        let lim = math.child("limLow").unwrap();
        assert_eq!(lim.child("e").unwrap().text_content(), "lim");
        assert_eq!(property(lim, &["e", "r", "rPr", "sty"]), Some("p"));

        let inline = write(r"\lim_{x\to 0} f", MathDisplay::Inline);
        assert!(inline.child("sSub").is_some());
    }

    #[test]
    fn accents_bars_and_braces() {
        let math = block_math(r"\hat{x}\overline{y}\underbrace{z}_{n}");
        assert_eq!(property(&math, &["acc", "accPr", "chr"]), Some("\u{0302}"));
        assert_eq!(property(&math, &["bar", "barPr", "pos"]), Some("top"));
        let label = math.child("limLow").unwrap();
        let brace = label.child("e").unwrap().child("groupChr").unwrap();
        assert_eq!(property(brace, &["groupChrPr", "chr"]), Some("⏟"));
        assert_eq!(property(brace, &["groupChrPr", "pos"]), Some("bot"));
        assert_eq!(property(brace, &["groupChrPr", "vertJc"]), Some("top"));
        assert_eq!(label.child("lim").unwrap().text_content(), "n");
    }

    #[test]
    fn delimiters_with_separator() {
        let math = block_math(r"\left( a \middle| b \right)");
        let d = math.child("d").unwrap();
        assert_eq!(property(d, &["dPr", "begChr"]), Some("("));
        assert_eq!(property(d, &["dPr", "sepChr"]), Some("|"));
        assert_eq!(property(d, &["dPr", "endChr"]), Some(")"));
        let groups: Vec<_> = d
            .child_elements()
            .filter(|child| child.name.local == "e")
            .map(Element::text_content)
            .collect();
        assert_eq!(groups, ["a", "b"]);
    }

    #[test]
    fn matrix() {
        let math = block_math(r"\begin{pmatrix}1&2\\3&4\end{pmatrix}");
        let d = math.child("d").unwrap();
        let m = d.child("e").unwrap().child("m").unwrap();
        let mcs = m.child("mPr").unwrap().child("mcs").unwrap();
        assert_eq!(mcs.child_elements().count(), 2);
        let rows: Vec<_> = m
            .child_elements()
            .filter(|child| child.name.local == "mr")
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].child_elements().count(), 2);
        assert_eq!(rows[1].text_content(), "34");
    }

    #[test]
    fn roots() {
        let math = block_math(r"\sqrt{x}\sqrt[3]{y}");
        let rads: Vec<_> = math.child_elements().collect();
        assert_eq!(property(rads[0], &["radPr", "degHide"]), Some("1"));
        assert!(rads[1].child("radPr").is_none());
        assert_eq!(rads[1].child("deg").unwrap().text_content(), "3");
    }

    #[test]
    fn styled_runs_and_text() {
        assert_eq!(
            compact(r"\mathbb{R}"),
            "<m:oMath><m:r><m:rPr><m:scr m:val=\"double-struck\" /><m:sty m:val=\"p\" />\
             </m:rPr><m:t>R</m:t></m:r></m:oMath>"
        );
        assert_eq!(
            compact(r"\text{if}"),
            "<m:oMath><m:r><m:rPr><m:nor /><m:sty m:val=\"p\" /></m:rPr>\
             <m:t>if</m:t></m:r></m:oMath>"
        );
        // The innermost style wins.
        let math = block_math(r"\mathbf{\mathit{x}}");
        assert_eq!(property(&math, &["r", "rPr", "sty"]), Some("i"));
    }

    #[test]
    fn spaces() {
        assert_eq!(space_text(0.167), "\u{2009}");
        assert_eq!(space_text(0.222), "\u{2005}");
        assert_eq!(space_text(0.278), "\u{2004}");
        assert_eq!(space_text(1.0), "\u{2001}");
        assert_eq!(space_text(2.0), "\u{2001}\u{2001}");
        assert_eq!(space_text(-0.167), ZERO_WIDTH_SPACE);
        assert_eq!(space_text(0.0), ZERO_WIDTH_SPACE);
    }

    #[test]
    fn cancel_and_box() {
        let math = block_math(r"\bcancel{x}");
        let pr = math.child("borderBox").unwrap().child("borderBoxPr").unwrap();
        let names: Vec<_> = pr.child_elements().map(|child| child.name.local).collect();
        assert_eq!(
            names,
            ["hideTop", "hideBot", "hideLeft", "hideRight", "strikeTLBR"]
        );
        let math = block_math(r"\boxed{x}");
        assert!(math.child("borderBox").unwrap().child("borderBoxPr").is_none());
    }

    #[test]
    fn multi_character_operators_are_boxed() {
        let boxed = write_symbol(&[], SymbolClass::Rel, ":=");
        assert_eq!(boxed.name.local, "box");
        assert_eq!(property(&boxed, &["boxPr", "opEmu"]), Some("1"));
        assert_eq!(write_symbol(&[], SymbolClass::Rel, "=").name.local, "r");
        assert_eq!(write_symbol(&[], SymbolClass::Op, "∑").name.local, "r");
    }

    #[test]
    fn defensive_nary_in_group() {
        let exps = [Exp::Grouped(vec![
            Exp::UnderOver {
                convertible: true,
                base: Box::new(Exp::symbol(SymbolClass::Op, "∏")),
                under: Box::new(Exp::identifier("k")),
                over: Box::new(Exp::empty_group()),
            },
            Exp::identifier("a"),
        ])];
        let math = write_omml(MathDisplay::Inline, &exps);
        let nary = math.child("nary").unwrap();
        assert_eq!(property(nary, &["naryPr", "chr"]), Some("∏"));
        assert_eq!(property(nary, &["naryPr", "supHide"]), Some("1"));
    }

    #[test]
    fn every_node_kind_is_written() {
        let x = || Box::new(Exp::identifier("x"));
        let exps = [
            Exp::number("1"),
            Exp::identifier(""),
            Exp::symbol(SymbolClass::Pun, ","),
            Exp::Text(TextStyle::Bold, "t".to_string()),
            Exp::Space(0.5),
            Exp::MathOperator("sin".to_string()),
            Exp::empty_group(),
            Exp::Sqrt(x()),
            Exp::Root { index: x(), base: x() },
            Exp::Phantom(x()),
            Exp::Boxed(x()),
            Exp::Cancel(Stroke::Both, x()),
            Exp::Scaled(1.2, x()),
            Exp::Sub { base: x(), sub: x() },
            Exp::Super { base: x(), sup: x() },
            Exp::SubSup { base: x(), sub: x(), sup: x() },
            Exp::Fraction { ty: FractionType::NoLine, num: x(), den: x() },
            Exp::Over { convertible: false, base: x(), over: x() },
            Exp::Under { convertible: false, base: x(), under: x() },
            Exp::UnderOver { convertible: false, base: x(), under: x(), over: x() },
            Exp::Delimited {
                open: "[".to_string(),
                close: String::new(),
                content: vec![InDelimited::Exp(Exp::identifier("x"))],
            },
            Exp::Array { align: Vec::new(), rows: Vec::new() },
            Exp::Styled(TextStyle::Fraktur, vec![Exp::identifier("g")]),
        ];
        let math = write_omml(MathDisplay::Block, &exps);
        let names: Vec<_> = math
            .child("oMath")
            .unwrap()
            .child_elements()
            .map(|child| child.name.local)
            .collect();
        assert_eq!(
            names,
            [
                "r", "r", "r", "r", "r", "r", "r", "rad", "rad", "phant", "borderBox",
                "borderBox", "r", "sSub", "sSup", "sSubSup", "f", "limUpp", "limLow", "limUpp",
                "d", "m", "r",
            ]
        );
    }
}
