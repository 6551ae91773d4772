//! Recursive-descent parser from LaTeX math to [`Exp`] nodes.
//!
//! Parsing is lenient: unknown commands and stray characters are skipped (and logged at
//! debug level), `\left` without `\right` and unterminated environments are closed at the
//! end of the input. The only fatal error is input that ends inside a brace or bracket
//! group.
use std::mem;

use log::debug;

use crate::ast::{Alignment, ArrayLine, Exp, InDelimited, SymbolClass, node_vec_to_node};
use crate::commands::{
    Command, StyleCommand, get_char_op, get_command, get_enclosure, get_style, is_integral,
    prime_string,
};
use crate::cursor::Cursor;
use crate::environments::{Env, parse_colspec};
use crate::error::{GroupEnd, LatexError};

type ParseResult<T> = Result<T, Box<LatexError>>;

/// What terminates a sequence of expressions.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SequenceEnd {
    Eoi,
    Brace,
    Bracket,
}

/// Where the sub- and superscripts of a base go.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Limits {
    /// To the side, as ordinary scripts.
    Side,
    /// Below and above, but inline math may move them to the side.
    Movable,
    /// Always below and above.
    Fixed,
}

/// A parsed base together with the placement of its scripts.
struct Base {
    exp: Exp,
    limits: Limits,
}

impl Base {
    #[inline]
    fn side(exp: Exp) -> Self {
        Base {
            exp,
            limits: Limits::Side,
        }
    }
}

pub(crate) struct Parser<'source> {
    cursor: Cursor<'source>,
}

impl<'source> Parser<'source> {
    pub(crate) fn new(input: &'source str) -> Self {
        Parser {
            cursor: Cursor::new(input),
        }
    }

    /// Parse the whole input.
    pub(crate) fn parse(mut self) -> ParseResult<Vec<Exp>> {
        let nodes = self.parse_sequence(SequenceEnd::Eoi)?;
        Ok(reclassify_binary_operators(nodes))
    }

    fn parse_sequence(&mut self, end: SequenceEnd) -> ParseResult<Vec<Exp>> {
        let mut nodes = Vec::new();
        loop {
            self.cursor.skip_whitespace();
            match (self.cursor.peek(), end) {
                (None, SequenceEnd::Eoi) => break,
                (None, SequenceEnd::Brace) => {
                    return Err(LatexError::unbalanced(self.cursor.pos(), GroupEnd::Brace));
                }
                (None, SequenceEnd::Bracket) => {
                    return Err(LatexError::unbalanced(
                        self.cursor.pos(),
                        GroupEnd::Bracket,
                    ));
                }
                (Some('}'), SequenceEnd::Brace) | (Some(']'), SequenceEnd::Bracket) => {
                    self.cursor.read_char();
                    break;
                }
                _ => {}
            }
            if let Some(exp) = self.parse_or_skip()? {
                nodes.push(exp);
            }
        }
        Ok(nodes)
    }

    /// Parse one expression. If nothing could be consumed, the offending token is skipped so
    /// that the caller always makes progress.
    fn parse_or_skip(&mut self) -> ParseResult<Option<Exp>> {
        self.cursor.skip_whitespace();
        let start = self.cursor.pos();
        let exp = self.parse_expression()?;
        if exp.is_none() && self.cursor.pos() == start {
            self.skip_token()?;
        }
        Ok(exp)
    }

    fn skip_token(&mut self) -> ParseResult<()> {
        let start = self.cursor.pos();
        if let Some(name) = self.cursor.read_command() {
            match name {
                "end" => {
                    self.parse_env_name()?;
                }
                "right" | "middle" => {
                    self.parse_delimiter();
                }
                _ => {}
            }
            debug!("skipping unexpected \\{name} at byte {start}");
        } else if let Some(ch) = self.cursor.read_char() {
            debug!("skipping unexpected {ch:?} at byte {start}");
        }
        Ok(())
    }

    fn parse_expression(&mut self) -> ParseResult<Option<Exp>> {
        let Some(base) = self.parse_base()? else {
            return Ok(None);
        };
        self.parse_scripts(base).map(Some)
    }

    /// Parse a single base without any scripts.
    ///
    /// Returns `Ok(None)` both for tokens that cannot start an expression (in which case
    /// nothing is consumed) and for commands that are consumed without producing output.
    fn parse_base(&mut self) -> ParseResult<Option<Base>> {
        self.cursor.skip_whitespace();
        let Some(ch) = self.cursor.peek() else {
            return Ok(None);
        };
        if ch == '{' {
            self.cursor.read_char();
            let nodes = self.parse_sequence(SequenceEnd::Brace)?;
            return Ok(Some(Base::side(Exp::Grouped(nodes))));
        }
        if let Some(number) = self.parse_number() {
            return Ok(Some(Base::side(number)));
        }
        let exp = match ch {
            '\\' => return self.parse_command(),
            // A script without a base attaches to an empty group.
            '^' | '_' => Exp::empty_group(),
            '\'' => {
                let count = self.cursor.read_primes();
                prime_symbol(count)
            }
            '~' => {
                self.cursor.read_char();
                Exp::Space(0.333)
            }
            _ if ch.is_alphabetic() => {
                self.cursor.read_char();
                Exp::Identifier(ch.to_string())
            }
            _ => {
                let symbol = get_char_op(ch).or_else(|| get_enclosure(ch.encode_utf8(&mut [0; 4])));
                let (class, text) = match symbol {
                    Some((class, text)) => (class, text.to_string()),
                    None if !ch.is_ascii() => (SymbolClass::Ord, ch.to_string()),
                    None => return Ok(None),
                };
                self.cursor.read_char();
                Exp::Symbol(class, text)
            }
        };
        Ok(Some(Base::side(exp)))
    }

    /// `digits ('.' digits)?` or `'.' digits`. A trailing dot is not part of the number.
    fn parse_number(&mut self) -> Option<Exp> {
        let start = self.cursor.pos();
        self.cursor.read_digits();
        let before_dot = self.cursor.pos();
        if self.cursor.eat('.') && self.cursor.read_digits().is_empty() {
            self.cursor.reset(before_dot);
        }
        let end = self.cursor.pos();
        if end == start {
            return None;
        }
        Some(Exp::Number(self.cursor.slice(start, end).to_string()))
    }

    fn parse_scripts(&mut self, base: Base) -> ParseResult<Exp> {
        let Base { exp: base, mut limits } = base;
        loop {
            self.cursor.skip_whitespace();
            limits = match self.cursor.peek_command() {
                Some("limits") => Limits::Fixed,
                Some("nolimits") => Limits::Side,
                _ => break,
            };
            self.cursor.read_command();
        }

        let primes = self.cursor.read_primes();
        let mut sup = (primes > 0).then(|| prime_symbol(primes));
        // Primes still accept an explicit superscript, as in `f'^2`.
        let mut sup_is_primes = sup.is_some();
        let mut sub = None;
        loop {
            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                Some('_') if sub.is_none() => {
                    self.cursor.read_char();
                    sub = Some(self.parse_argument()?);
                }
                Some('^') if sup.is_none() || sup_is_primes => {
                    self.cursor.read_char();
                    self.cursor.skip_whitespace();
                    let primes = self.cursor.read_primes();
                    let script = if primes > 0 {
                        prime_symbol(primes)
                    } else {
                        self.parse_argument()?
                    };
                    sup = Some(match sup.take() {
                        Some(prime) => Exp::Grouped(vec![prime, script]),
                        None => script,
                    });
                    sup_is_primes = false;
                }
                _ => break,
            }
        }

        let base = Box::new(base);
        let convertible = limits == Limits::Movable;
        let exp = match (sub, sup) {
            (None, None) => *base,
            (Some(sub), None) => match limits {
                Limits::Side => Exp::Sub {
                    base,
                    sub: Box::new(sub),
                },
                Limits::Movable | Limits::Fixed => Exp::Under {
                    convertible,
                    base,
                    under: Box::new(sub),
                },
            },
            (None, Some(sup)) => match limits {
                Limits::Side => Exp::Super {
                    base,
                    sup: Box::new(sup),
                },
                Limits::Movable | Limits::Fixed => Exp::Over {
                    convertible,
                    base,
                    over: Box::new(sup),
                },
            },
            (Some(sub), Some(sup)) => match limits {
                Limits::Side => Exp::SubSup {
                    base,
                    sub: Box::new(sub),
                    sup: Box::new(sup),
                },
                Limits::Movable | Limits::Fixed => Exp::UnderOver {
                    convertible,
                    base,
                    under: Box::new(sub),
                    over: Box::new(sup),
                },
            },
        };
        Ok(exp)
    }

    /// Parse a mandatory argument: a brace group (unwrapped if it holds a single node), a
    /// single digit, or a single token. A missing argument becomes an empty group.
    fn parse_argument(&mut self) -> ParseResult<Exp> {
        self.cursor.skip_whitespace();
        match self.cursor.peek() {
            Some('{') => {
                self.cursor.read_char();
                let nodes = self.parse_sequence(SequenceEnd::Brace)?;
                Ok(node_vec_to_node(nodes))
            }
            Some(ch) if ch.is_ascii_digit() => {
                self.cursor.read_char();
                Ok(Exp::Number(ch.to_string()))
            }
            _ => Ok(self
                .parse_base()?
                .map_or_else(Exp::empty_group, |base| base.exp)),
        }
    }

    fn parse_command(&mut self) -> ParseResult<Option<Base>> {
        let start = self.cursor.pos();
        let Some(name) = self.cursor.read_command() else {
            return Ok(None);
        };
        if let Some(command) = get_command(name) {
            return self.parse_command_rule(start, command);
        }
        if let Some((class, text)) = get_enclosure(self.cursor.slice(start, self.cursor.pos())) {
            return Ok(Some(Base::side(Exp::Symbol(class, text.to_string()))));
        }
        if let Some(style) = get_style(name) {
            return self.parse_style(style).map(|exp| Some(Base::side(exp)));
        }
        self.cursor.reset(start);
        Ok(None)
    }

    fn parse_command_rule(&mut self, start: usize, command: Command) -> ParseResult<Option<Base>> {
        let exp = match command {
            Command::Symbol(class, text) => {
                let limits = if class == SymbolClass::Op && !is_integral(text) {
                    Limits::Movable
                } else {
                    Limits::Side
                };
                return Ok(Some(Base {
                    exp: Exp::Symbol(class, text.to_string()),
                    limits,
                }));
            }
            Command::Ident(text) => Exp::Identifier(text.to_string()),
            Command::MathOperator(name) => Exp::MathOperator(name.to_string()),
            Command::LimitOperator(name) => {
                return Ok(Some(Base {
                    exp: Exp::MathOperator(name.to_string()),
                    limits: Limits::Movable,
                }));
            }
            Command::Space(width) => Exp::Space(width),
            Command::Big(scale) => match self.parse_delimiter() {
                Some((class, text)) => {
                    Exp::Scaled(scale, Box::new(Exp::Symbol(class, text.to_string())))
                }
                None => {
                    debug!("expected a delimiter after the size command at byte {start}");
                    return Ok(None);
                }
            },
            Command::Decoration(class, chr, is_over) => {
                let base = Box::new(self.parse_argument()?);
                let mark = Box::new(Exp::Symbol(class, chr.to_string()));
                let exp = if is_over {
                    Exp::Over {
                        convertible: false,
                        base,
                        over: mark,
                    }
                } else {
                    Exp::Under {
                        convertible: false,
                        base,
                        under: mark,
                    }
                };
                // Braces take their label below or above, like `\underbrace{x}_{n}`.
                let limits = if matches!(class, SymbolClass::TOver | SymbolClass::TUnder) {
                    Limits::Fixed
                } else {
                    Limits::Side
                };
                return Ok(Some(Base { exp, limits }));
            }
            Command::Frac(ty) => {
                let num = Box::new(self.parse_argument()?);
                let den = Box::new(self.parse_argument()?);
                Exp::Fraction { ty, num, den }
            }
            Command::Sqrt => {
                self.cursor.skip_whitespace();
                if self.cursor.eat('[') {
                    let index = node_vec_to_node(self.parse_sequence(SequenceEnd::Bracket)?);
                    let base = self.parse_argument()?;
                    Exp::Root {
                        index: Box::new(index),
                        base: Box::new(base),
                    }
                } else {
                    Exp::Sqrt(Box::new(self.parse_argument()?))
                }
            }
            Command::Left => self.parse_delimited()?,
            Command::Right | Command::Middle | Command::End => {
                // Only meaningful inside `\left` and environments; let the caller decide.
                self.cursor.reset(start);
                return Ok(None);
            }
            Command::Begin => {
                return Ok(self.parse_environment()?.map(Base::side));
            }
            Command::Overset => {
                let over = Box::new(self.parse_argument()?);
                let base = Box::new(self.parse_argument()?);
                Exp::Over {
                    convertible: false,
                    base,
                    over,
                }
            }
            Command::Underset => {
                let under = Box::new(self.parse_argument()?);
                let base = Box::new(self.parse_argument()?);
                Exp::Under {
                    convertible: false,
                    base,
                    under,
                }
            }
            Command::Boxed => Exp::Boxed(Box::new(self.parse_argument()?)),
            Command::Phantom => Exp::Phantom(Box::new(self.parse_argument()?)),
            Command::Cancel(stroke) => Exp::Cancel(stroke, Box::new(self.parse_argument()?)),
            Command::OperatorName | Command::OperatorNameStar => {
                let name = self.parse_text_argument()?;
                let limits = if command == Command::OperatorNameStar {
                    Limits::Movable
                } else {
                    Limits::Side
                };
                return Ok(Some(Base {
                    exp: Exp::MathOperator(name),
                    limits,
                }));
            }
            Command::Limits | Command::NoLimits | Command::Ignored => return Ok(None),
        };
        Ok(Some(Base::side(exp)))
    }

    fn parse_style(&mut self, style: StyleCommand) -> ParseResult<Exp> {
        match style {
            StyleCommand::Styled(style) => {
                self.cursor.skip_whitespace();
                let nodes = if self.cursor.eat('{') {
                    self.parse_sequence(SequenceEnd::Brace)?
                } else {
                    self.parse_base()?.map(|base| base.exp).into_iter().collect()
                };
                Ok(Exp::Styled(style, nodes))
            }
            StyleCommand::Text(style) => Ok(Exp::Text(style, self.parse_text_argument()?)),
        }
    }

    /// Capture the raw text of a brace group, as for `\text{...}`.
    ///
    /// Nested braces are dropped, escaped characters like `\{` or `\%` are kept, and runs of
    /// whitespace collapse into a single space.
    fn parse_text_argument(&mut self) -> ParseResult<String> {
        self.cursor.skip_whitespace();
        if !self.cursor.eat('{') {
            return Ok(self.cursor.read_char().map(String::from).unwrap_or_default());
        }
        let mut text = String::new();
        let mut depth = 0usize;
        loop {
            let Some(ch) = self.cursor.read_char() else {
                return Err(LatexError::unbalanced(self.cursor.pos(), GroupEnd::Brace));
            };
            match ch {
                '}' if depth == 0 => break,
                '}' => depth -= 1,
                '{' => depth += 1,
                '~' => text.push('\u{A0}'),
                '\\' => {
                    let start = self.cursor.pos() - 1;
                    let name = self.cursor.read_command_name();
                    match name.chars().next() {
                        Some(escaped) if !escaped.is_ascii_alphabetic() => text.push(escaped),
                        Some(_) => debug!("ignoring \\{name} inside text at byte {start}"),
                        None => {}
                    }
                }
                _ if ch.is_whitespace() => {
                    if !text.ends_with(' ') {
                        text.push(' ');
                    }
                }
                _ => text.push(ch),
            }
        }
        Ok(text)
    }

    /// Read the delimiter after `\left`, `\right`, `\middle` or a size command.
    ///
    /// `.` stands for "no delimiter" and gives the empty string.
    fn parse_delimiter(&mut self) -> Option<(SymbolClass, &'static str)> {
        self.cursor.skip_whitespace();
        let start = self.cursor.pos();
        let found = match self.cursor.read_char()? {
            '.' => Some((SymbolClass::Open, "")),
            '\\' => {
                let name = self.cursor.read_command_name();
                get_enclosure(self.cursor.slice(start, self.cursor.pos())).or(
                    match get_command(name) {
                        Some(Command::Symbol(class, text)) => Some((class, text)),
                        _ => None,
                    },
                )
            }
            ch => get_enclosure(ch.encode_utf8(&mut [0; 4])).or_else(|| get_char_op(ch)),
        };
        if found.is_none() {
            self.cursor.reset(start);
        }
        found
    }

    fn delimiter_text(&mut self, after: &str) -> String {
        match self.parse_delimiter() {
            Some((_, text)) => text.to_string(),
            None => {
                debug!(
                    "expected a delimiter after {after} at byte {}",
                    self.cursor.pos()
                );
                String::new()
            }
        }
    }

    /// Parse the rest of `\left ... \right`. A missing `\right` closes the region with an
    /// empty delimiter.
    fn parse_delimited(&mut self) -> ParseResult<Exp> {
        let open = self.delimiter_text(r"\left");
        let mut content = Vec::new();
        let close = loop {
            self.cursor.skip_whitespace();
            match (self.cursor.peek(), self.cursor.peek_command()) {
                (None | Some('}'), _) | (_, Some("end")) => {
                    debug!("missing \\right at byte {}", self.cursor.pos());
                    break String::new();
                }
                (_, Some("right")) => {
                    self.cursor.read_command();
                    break self.delimiter_text(r"\right");
                }
                (_, Some("middle")) => {
                    self.cursor.read_command();
                    content.push(InDelimited::Separator(self.delimiter_text(r"\middle")));
                    continue;
                }
                _ => {}
            }
            if let Some(exp) = self.parse_or_skip()? {
                content.push(InDelimited::Exp(exp));
            }
        };
        Ok(Exp::Delimited {
            open,
            close,
            content,
        })
    }

    fn parse_env_name(&mut self) -> ParseResult<Option<&'source str>> {
        self.cursor.skip_whitespace();
        if !self.cursor.eat('{') {
            return Ok(None);
        }
        match self.cursor.read_until('}') {
            Some(name) => Ok(Some(name.trim())),
            None => Err(LatexError::unbalanced(self.cursor.pos(), GroupEnd::Brace)),
        }
    }

    /// Parse an environment after `\begin`. Unsupported environments are consumed up to
    /// their `\end` and produce nothing.
    fn parse_environment(&mut self) -> ParseResult<Option<Exp>> {
        let Some(name) = self.parse_env_name()? else {
            debug!(
                "expected an environment name at byte {}",
                self.cursor.pos()
            );
            return Ok(None);
        };
        let Some(env) = Env::from_name(name) else {
            debug!("skipping unsupported environment {name}");
            self.skip_environment(name)?;
            return Ok(None);
        };
        let colspec = if env.needs_colspec() {
            self.read_colspec()?
        } else {
            Vec::new()
        };
        let rows = self.parse_array_rows()?;
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let array = Exp::Array {
            align: env.alignments(&colspec, columns),
            rows,
        };
        Ok(Some(match env.delimiters() {
            Some((open, close)) => Exp::Delimited {
                open: open.to_string(),
                close: close.to_string(),
                content: vec![InDelimited::Exp(array)],
            },
            None => array,
        }))
    }

    fn skip_environment(&mut self, name: &str) -> ParseResult<()> {
        let mut depth = 0usize;
        loop {
            match self.cursor.read_char() {
                None => {
                    debug!("environment {name} is not closed");
                    return Ok(());
                }
                Some('\\') => match self.cursor.read_command_name() {
                    "begin" => {
                        if self.parse_env_name()? == Some(name) {
                            depth += 1;
                        }
                    }
                    "end" => {
                        if self.parse_env_name()? == Some(name) {
                            if depth == 0 {
                                return Ok(());
                            }
                            depth -= 1;
                        }
                    }
                    _ => {}
                },
                Some(_) => {}
            }
        }
    }

    /// The column specification of `array`, like `{l|cr}`. Nested groups such as `@{...}`
    /// are skipped.
    fn read_colspec(&mut self) -> ParseResult<Vec<Alignment>> {
        self.cursor.skip_whitespace();
        if !self.cursor.eat('{') {
            return Ok(Vec::new());
        }
        let mut spec = String::new();
        let mut depth = 0usize;
        loop {
            match self.cursor.read_char() {
                None => {
                    return Err(LatexError::unbalanced(self.cursor.pos(), GroupEnd::Brace));
                }
                Some('{') => depth += 1,
                Some('}') if depth == 0 => break,
                Some('}') => depth -= 1,
                Some(ch) if depth == 0 => spec.push(ch),
                Some(_) => {}
            }
        }
        Ok(parse_colspec(&spec))
    }

    /// Cells are separated by `&` and rows by `\\`; a trailing `\\` does not open a new row.
    fn parse_array_rows(&mut self) -> ParseResult<Vec<ArrayLine>> {
        let mut rows = Vec::new();
        let mut row = Vec::new();
        let mut cell = Vec::new();
        loop {
            self.cursor.skip_whitespace();
            match (self.cursor.peek(), self.cursor.peek_command()) {
                (None | Some('}'), _) => {
                    debug!("missing \\end at byte {}", self.cursor.pos());
                    break;
                }
                (Some('&'), _) => {
                    self.cursor.read_char();
                    row.push(mem::take(&mut cell));
                    continue;
                }
                (_, Some("\\")) => {
                    self.cursor.read_command();
                    // An optional vertical space like `\\[2pt]`.
                    if self.cursor.peek() == Some('[') {
                        self.cursor.read_until(']');
                    }
                    row.push(mem::take(&mut cell));
                    rows.push(mem::take(&mut row));
                    continue;
                }
                (_, Some("end")) => {
                    self.cursor.read_command();
                    self.parse_env_name()?;
                    break;
                }
                _ => {}
            }
            if let Some(exp) = self.parse_or_skip()? {
                cell.push(exp);
            }
        }
        if !cell.is_empty() || !row.is_empty() {
            row.push(cell);
            rows.push(row);
        }
        Ok(rows)
    }
}

fn prime_symbol(count: usize) -> Exp {
    let text = match prime_string(count) {
        Some(primes) => primes.to_string(),
        None => "′".repeat(count),
    };
    Exp::Symbol(SymbolClass::Ord, text)
}

/// A binary operator at the start of a list, or after another operator, a relation, an
/// opening symbol or punctuation, is treated as ordinary. So is a binary operator that is
/// directly followed by a relation, a closing symbol or punctuation.
fn reclassify_binary_operators(mut nodes: Vec<Exp>) -> Vec<Exp> {
    use SymbolClass::{Bin, Close, Op, Open, Pun, Rel};

    let mut previous: Option<&mut Exp> = None;
    for exp in &mut nodes {
        let prev_class = previous.as_deref().and_then(Exp::symbol_class);
        match exp.symbol_class() {
            Some(Bin) => {
                if previous.is_none() || matches!(prev_class, Some(Bin | Op | Rel | Open | Pun)) {
                    make_ordinary(exp);
                }
            }
            Some(Rel | Close | Pun) => {
                if prev_class == Some(Bin)
                    && let Some(prev) = previous.as_deref_mut()
                {
                    make_ordinary(prev);
                }
            }
            _ => {}
        }
        previous = Some(exp);
    }
    nodes
}

fn make_ordinary(exp: &mut Exp) {
    if let Exp::Symbol(class, _) = exp {
        *class = SymbolClass::Ord;
    }
}
