use math_omml::{GroupEnd, LatexErrKind, LatexError, LatexToOmml, MathDisplay, OmmlConfig};

#[test]
fn unbalanced_groups() {
    let problems = [
        (r"\frac{1}{2", 10, GroupEnd::Brace),
        (r"{", 1, GroupEnd::Brace),
        (r"\sqrt[3", 7, GroupEnd::Bracket),
        (r"\text{hello", 11, GroupEnd::Brace),
        (r"\begin{matrix", 13, GroupEnd::Brace),
        (r"\left( {x \right)", 17, GroupEnd::Brace),
        (r"\begin{array}{cc", 16, GroupEnd::Brace),
    ];

    let converter = LatexToOmml::new(OmmlConfig::default());
    for (problem, pos, expected) in problems {
        let Err(error) = converter.convert(problem, MathDisplay::Inline) else {
            panic!("problem `{problem}` did not return an error");
        };
        assert_eq!(
            *error,
            LatexError(pos, LatexErrKind::UnbalancedGroup(expected)),
            "wrong error for `{problem}`"
        );
    }
}

#[test]
fn report_points_at_the_end() {
    let problem = r"\frac{1}{2";
    let error = LatexToOmml::default()
        .convert(problem, MathDisplay::Block)
        .unwrap_err();
    let report = error.to_report("<input>", false);
    let mut buf = Vec::new();
    report
        .write(("<input>", ariadne::Source::from(problem)), &mut buf)
        .expect("failed to write report");
    let output = String::from_utf8(buf).expect("report should be valid UTF-8");
    assert!(output.contains("Expected token \"}\", but reached the end of the input."));
    assert!(output.contains("<input>"));
}
