use insta::assert_snapshot;
use math_omml::{
    Element, LatexToOmml, MathDisplay, OmmlConfig, PrettyPrint, latex_to_omml, parse, write_omml,
};

fn compact() -> LatexToOmml {
    LatexToOmml::new(OmmlConfig {
        pretty_print: PrettyPrint::Never,
        ..Default::default()
    })
}

#[test]
fn pretty_printed_by_default() {
    let omml = latex_to_omml("x^2", MathDisplay::Inline).unwrap();
    assert_snapshot!(omml, @r"
    <m:oMath>
      <m:sSup>
        <m:e>
          <m:r>
            <m:t>x</m:t>
          </m:r>
        </m:e>
        <m:sup>
          <m:r>
            <m:t>2</m:t>
          </m:r>
        </m:sup>
      </m:sSup>
    </m:oMath>
    ");
}

#[test]
fn auto_pretty_print_only_for_blocks() {
    let converter = LatexToOmml::new(OmmlConfig {
        pretty_print: PrettyPrint::Auto,
        ..Default::default()
    });
    let inline = converter.convert("x", MathDisplay::Inline).unwrap();
    assert_eq!(inline, "<m:oMath><m:r><m:t>x</m:t></m:r></m:oMath>");
    let block = converter.convert("x", MathDisplay::Block).unwrap();
    assert!(block.contains('\n'));
}

#[test]
fn namespace_declaration() {
    let converter = LatexToOmml::new(OmmlConfig {
        pretty_print: PrettyPrint::Never,
        xml_namespace: true,
    });
    let omml = converter.convert("x", MathDisplay::Block).unwrap();
    assert!(omml.starts_with(
        "<m:oMathPara xmlns:m=\"http://schemas.openxmlformats.org/officeDocument/2006/math\">"
    ));
}

#[test]
fn quadratic_formula() {
    let omml = compact()
        .convert(r"x = \frac{-b \pm \sqrt{b^2 - 4ac}}{2a}", MathDisplay::Block)
        .unwrap();
    assert!(omml.starts_with("<m:oMathPara><m:oMathParaPr><m:jc m:val=\"center\" />"));
    assert!(omml.contains("<m:f><m:fPr><m:type m:val=\"bar\" /></m:fPr>"));
    assert!(omml.contains("<m:t>±</m:t>"));
    assert!(omml.contains("<m:radPr><m:degHide m:val=\"1\" /></m:radPr><m:deg />"));
}

#[test]
fn special_characters_are_escaped() {
    let omml = compact().convert(r"a < b", MathDisplay::Inline).unwrap();
    assert!(omml.contains("<m:t>&lt;</m:t>"));
    let omml = compact()
        .convert(r"\text{Tom & Jerry's}", MathDisplay::Inline)
        .unwrap();
    assert!(omml.contains("<m:t>Tom &amp; Jerry&#39;s</m:t>"));
}

#[test]
fn nary_operators_take_their_operand() {
    let root = compact()
        .convert_to_element(r"\int_0^\infty e^{-x} dx = 1", MathDisplay::Block)
        .unwrap();
    let math = root.child("oMath").unwrap();
    let names: Vec<_> = math
        .child_elements()
        .map(|child| child.name.local)
        .collect();
    assert_eq!(names, ["nary", "r", "r", "r", "r"]);
    let nary = math.child("nary").unwrap();
    assert_eq!(nary.child("sub").unwrap().text_content(), "0");
    assert_eq!(nary.child("sup").unwrap().text_content(), "∞");
    assert_eq!(nary.child("e").unwrap().text_content(), "e\u{2212}x");
}

#[test]
fn parse_and_write_separately() {
    let exps = parse(r"\alpha + \beta").unwrap();
    assert_eq!(exps.len(), 3);
    let root: Element = write_omml(MathDisplay::Inline, &exps);
    assert_eq!(root.text_content(), "α+β");
}

#[test]
fn unknown_constructs_are_tolerated() {
    for latex in [
        r"\binom{n}{k}",
        r"\left( x",
        r"\begin{matrix} a & b",
        r"\begin{unknown} x \end{unknown}",
        r"x \right)",
        r"a & b \\ c",
        r"\unknowncommand x",
        r"",
        r"x^",
        r"\sqrt",
    ] {
        assert!(
            compact().convert(latex, MathDisplay::Block).is_ok(),
            "failed on {latex:?}"
        );
    }
}

#[test]
fn cases_environment() {
    let omml = compact()
        .convert(
            r"f(x) = \begin{cases} 1 & x \geq 0 \\ 0 & \text{otherwise} \end{cases}",
            MathDisplay::Block,
        )
        .unwrap();
    assert!(omml.contains(
        "<m:dPr><m:begChr m:val=\"{\" /><m:endChr m:val=\"\" /><m:grow /></m:dPr>"
    ));
    assert!(omml.contains("<m:mcJc m:val=\"left\" />"));
}
