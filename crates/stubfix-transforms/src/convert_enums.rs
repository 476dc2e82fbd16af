//! Transform to turn out-of-body enum members into class-body annotations.
//!
//! # Rationale
//!
//! Binding generators emit enum stubs with the members assigned after an
//! ellipsis-bodied class:
//!
//! ```text
//! class MyEnum(int): ...
//! MyEnum.Field1 = ...  # type: MyEnum
//! MyEnum.Field2 = ...  # type: MyEnum
//! ```
//!
//! Type checkers do not treat those assignments as class members. This
//! transform rewrites the block into:
//!
//! ```text
//! class MyEnum(int):
//!     Field1: 'MyEnum'
//!     Field2: 'MyEnum'
//! ```
//!
//! # Matching
//!
//! - Header: `<indent>class <Name>[(int)]: ...`
//! - Field: `<indent>[<Qualifier>.]<name> = ...  # type: <annotation>`,
//!   accepted only directly after a header or another field. The qualifier
//!   is not compared with the class name.
//!
//! The first line after a header that is not a field is copied unchanged and
//! ends the block, even if it is itself a header. Every input line produces
//! exactly one output line.

use regex::Regex;
use std::io::{self, BufRead, Write};
use std::sync::OnceLock;
use stubfix_core::utils::split_terminator;
use stubfix_core::{Change, FileContext, Location, Rewrite, Transform};

/// Transform code for convert-enums.
pub const CODE: &str = "SF001";

/// Transform name for convert-enums.
pub const NAME: &str = "convert-enums";

fn header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^( *)class (\w+(?:\(int\))?): \.\.\. *$").expect("Invalid class header regex")
    })
}

fn field_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^( *)(?:\w+\.)*(\w+) = \.\.\. +# type: +('?[\w.]+'?) *$")
            .expect("Invalid field regex")
    })
}

/// An ellipsis-bodied class header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassHeader<'a> {
    /// Leading spaces.
    pub indent: &'a str,
    /// Class name including an optional `(int)` base.
    pub class_name: &'a str,
}

impl<'a> ClassHeader<'a> {
    /// Parses a line body (without terminator) as a class header.
    #[must_use]
    pub fn parse(body: &'a str) -> Option<Self> {
        let caps = header_regex().captures(body)?;
        Some(Self {
            indent: caps.get(1)?.as_str(),
            class_name: caps.get(2)?.as_str(),
        })
    }

    /// Renders the header with an open body.
    #[must_use]
    pub fn render(&self) -> String {
        format!("{}class {}:", self.indent, self.class_name)
    }
}

/// A module-level member assignment with a type comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAssignment<'a> {
    /// Leading spaces.
    pub indent: &'a str,
    /// Member name, without any qualifier.
    pub field_name: &'a str,
    /// Type comment contents, possibly single-quoted.
    pub type_annotation: &'a str,
}

impl<'a> FieldAssignment<'a> {
    /// Parses a line body (without terminator) as a field assignment.
    #[must_use]
    pub fn parse(body: &'a str) -> Option<Self> {
        let caps = field_regex().captures(body)?;
        Some(Self {
            indent: caps.get(1)?.as_str(),
            field_name: caps.get(2)?.as_str(),
            type_annotation: caps.get(3)?.as_str(),
        })
    }

    /// Renders the field as a class-body annotation, re-quoting the type.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{}    {}: '{}'",
            self.indent,
            self.field_name,
            self.type_annotation.replace('\'', "")
        )
    }
}

/// What happened to one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Copied unchanged.
    Verbatim,
    /// Rewritten as a class header.
    Header,
    /// Rewritten as a class-body field.
    Field,
}

/// Line-at-a-time state machine behind [`EnumRewriter`] and
/// [`rewrite_stream`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockState {
    in_block: bool,
}

impl BlockState {
    /// Rewrites one line (terminator included) and advances the state.
    pub fn step(&mut self, line: &str) -> (String, LineKind) {
        let (body, terminator) = split_terminator(line);

        if self.in_block {
            if let Some(field) = FieldAssignment::parse(body) {
                return (field.render() + terminator, LineKind::Field);
            }
            self.in_block = false;
            return (line.to_string(), LineKind::Verbatim);
        }

        if let Some(header) = ClassHeader::parse(body) {
            self.in_block = true;
            return (header.render() + terminator, LineKind::Header);
        }

        (line.to_string(), LineKind::Verbatim)
    }
}

/// Streaming rewriter over a sequence of lines.
///
/// Lines keep their terminators; synthesized lines reuse the terminator of
/// the line they replace.
pub struct EnumRewriter<I> {
    lines: I,
    state: BlockState,
}

impl<I> EnumRewriter<I> {
    /// Wraps a line iterator.
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            state: BlockState::default(),
        }
    }
}

impl<I, S> Iterator for EnumRewriter<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = (String, LineKind);

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        Some(self.state.step(line.as_ref()))
    }
}

/// Counts of rewritten lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Lines read.
    pub lines: usize,
    /// Class headers rewritten.
    pub headers: usize,
    /// Field assignments moved into a class body.
    pub fields: usize,
}

impl RewriteStats {
    fn record(&mut self, kind: LineKind) {
        self.lines += 1;
        match kind {
            LineKind::Header => self.headers += 1,
            LineKind::Field => self.fields += 1,
            LineKind::Verbatim => {}
        }
    }
}

/// Rewrites a whole text.
#[must_use]
pub fn rewrite(text: &str) -> String {
    EnumRewriter::new(text.split_inclusive('\n'))
        .map(|(line, _)| line)
        .collect()
}

/// Rewrites `input` into `output` line by line.
///
/// # Errors
///
/// Returns any IO error from reading or writing, including invalid UTF-8.
pub fn rewrite_stream<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> io::Result<RewriteStats> {
    let mut stats = RewriteStats::default();
    let mut state = BlockState::default();
    let mut line = String::new();

    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let (out, kind) = state.step(&line);
        stats.record(kind);
        output.write_all(out.as_bytes())?;
    }

    output.flush()?;
    Ok(stats)
}

/// Moves enum members declared after an ellipsis-bodied class into the
/// class body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertEnums;

impl ConvertEnums {
    /// Creates a new transform.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Transform for ConvertEnums {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Moves enum members assigned after `class X(int): ...` into the class body"
    }

    fn apply(&self, ctx: &FileContext) -> Rewrite {
        let mut rewrite = Rewrite::default();
        let mut current_class = String::new();

        let rewriter = EnumRewriter::new(ctx.content.split_inclusive('\n'));
        for (idx, (line, kind)) in rewriter.enumerate() {
            let message = match kind {
                LineKind::Verbatim => None,
                LineKind::Header => {
                    current_class = split_terminator(&line).0.trim().to_string();
                    Some(format!("Opened body of `{current_class}`"))
                }
                LineKind::Field => Some(format!(
                    "Moved `{}` into `{current_class}`",
                    split_terminator(&line).0.trim()
                )),
            };

            if let Some(message) = message {
                rewrite.changes.push(Change::new(
                    CODE,
                    NAME,
                    Location::new(ctx.relative_path.clone(), idx + 1),
                    message,
                ));
            }
            rewrite.content.push_str(&line);
        }

        if rewrite.has_changes() {
            tracing::debug!(
                "{}: rewrote {} enum line(s)",
                ctx.relative_path.display(),
                rewrite.changes.len()
            );
        }

        rewrite
    }
}
