//! Argument-text parser
//!
//! Turns the literal rendering of one call's arguments (`'abc', 3, sep='-'`)
//! into a [`CallArgs`]. Only literals are accepted; nothing is evaluated.

use crate::call::CallArgs;
use crate::errors::{to_source_span, DrillError, ErrorKind, ErrorReporting, SourceContext};
use crate::value::Value;
use pest::{error::Error, iterators::Pair, Parser};
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "syntax/arguments.pest"]
struct ArgumentParser;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parse argument-text into call arguments.
pub fn parse_arguments(text: &str) -> Result<CallArgs, DrillError> {
    parse_arguments_in(text, &SourceContext::from_text("arguments", text))
}

/// Parse argument-text, reporting errors against `source`.
pub fn parse_arguments_in(text: &str, source: &SourceContext) -> Result<CallArgs, DrillError> {
    let mut pairs = ArgumentParser::parse(Rule::arguments, text)
        .map_err(|e| convert_parse_error(e, source))?;

    let mut args = CallArgs::new();
    let Some(root) = pairs.next() else {
        return Ok(args);
    };

    for pair in root.into_inner() {
        match pair.as_rule() {
            Rule::EOI => {}
            Rule::named => {
                let span = pair.as_span();
                let mut inner = pair.into_inner();
                let (Some(name), Some(value)) = (inner.next(), inner.next()) else {
                    return Err(source.argument_syntax(
                        "expected name=value",
                        to_source_span(span.start(), span.end()),
                    ));
                };
                args = args.kwarg(name.as_str(), build_value(value, source)?);
            }
            _ => {
                if !args.named.is_empty() {
                    let span = pair.as_span();
                    return Err(source
                        .report(
                            ErrorKind::ArgumentOrder,
                            to_source_span(span.start(), span.end()),
                        )
                        .with_help("move positional arguments before named ones"));
                }
                args.positional.push(build_value(pair, source)?);
            }
        }
    }

    Ok(args)
}

/// Parse a single literal, such as the expected value given on the command line.
pub fn parse_value(text: &str) -> Result<Value, DrillError> {
    let source = SourceContext::from_text("value", text);
    let mut args = parse_arguments_in(text, &source)?;
    if args.positional.len() != 1 || !args.named.is_empty() {
        return Err(source.argument_syntax(
            "expected exactly one literal value",
            to_source_span(0, text.len()),
        ));
    }
    Ok(args.positional.remove(0))
}

// ============================================================================
// VALUE BUILDERS
// ============================================================================

fn build_value(pair: Pair<Rule>, source: &SourceContext) -> Result<Value, DrillError> {
    let span = pair.as_span();
    let src_span = to_source_span(span.start(), span.end());
    let text = pair.as_str();

    match pair.as_rule() {
        Rule::integer => text
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| source.invalid_literal("int", text, src_span)),

        Rule::float => text
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| source.invalid_literal("float", text, src_span)),

        Rule::boolean => Ok(Value::Bool(matches!(text, "True" | "true"))),

        Rule::none => Ok(Value::Nil),

        Rule::string => {
            let quoted = pair.into_inner().next().map_or(text, |p| p.as_str());
            Ok(Value::Str(unescape_string(quoted)))
        }

        Rule::list => {
            let items: Result<Vec<_>, _> = pair
                .into_inner()
                .map(|p| build_value(p, source))
                .collect();
            Ok(Value::List(items?))
        }

        rule => Err(source.argument_syntax(&format!("unsupported rule: {:?}", rule), src_span)),
    }
}

// ============================================================================
// UTILITIES
// ============================================================================

fn unescape_string(text: &str) -> String {
    // Remove surrounding quotes
    let inner = &text[1..text.len() - 1];
    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some('\'') => result.push('\''),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(ch);
        }
    }

    result
}

fn convert_parse_error(error: Error<Rule>, source: &SourceContext) -> DrillError {
    let (start, end) = match error.location {
        pest::error::InputLocation::Pos(pos) => (pos, pos),
        pest::error::InputLocation::Span((start, end)) => (start, end),
    };

    let rest = source.content.get(start..).unwrap_or_default();
    let message = if rest.starts_with('\'') || rest.starts_with('"') {
        "unterminated string"
    } else if start >= source.content.len() {
        "unexpected end of arguments"
    } else {
        "expected a literal value or name=value"
    };

    source.argument_syntax(message, to_source_span(start, end))
}
