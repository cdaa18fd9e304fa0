use winnow::ascii::{dec_int, till_line_ending};
use winnow::combinator::{alt, cut_err, delimited, opt, preceded, repeat};
use winnow::error::{ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, one_of, take_while};

use crate::{PathCondition, Rule};

use super::parser::ParsedRuleSet;

// -- Whitespace & comments --------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    let _: () = repeat(
        0..,
        alt((
            take_while(1.., |c: char| c.is_ascii_whitespace()).void(),
            ('#', till_line_ending).void(),
        )),
    )
    .parse_next(input)?;
    Ok(())
}

fn ws1(input: &mut &str) -> ModalResult<()> {
    take_while(1.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)?;
    ws(input)
}

// -- Tokens -----------------------------------------------------------------

fn ident<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

fn string_literal(input: &mut &str) -> ModalResult<String> {
    '"'.parse_next(input)?;
    let mut s = String::new();
    loop {
        let ch = cut_err(any)
            .context(StrContext::Expected(StrContextValue::CharLiteral('"')))
            .parse_next(input)?;
        match ch {
            '"' => return Ok(s),
            '\\' => {
                let esc = cut_err(any).parse_next(input)?;
                match esc {
                    '"' => s.push('"'),
                    '\\' => s.push('\\'),
                    'n' => s.push('\n'),
                    't' => s.push('\t'),
                    other => {
                        s.push('\\');
                        s.push(other);
                    }
                }
            }
            c => s.push(c),
        }
    }
}

fn page_id(input: &mut &str) -> ModalResult<String> {
    alt((
        string_literal,
        take_while(1.., |c: char| {
            c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
        })
        .map(str::to_owned),
    ))
    .context(StrContext::Expected(StrContextValue::Description(
        "target page id",
    )))
    .parse_next(input)
}

// -- Patterns ---------------------------------------------------------------

fn bare_pattern(input: &mut &str) -> ModalResult<String> {
    (
        one_of(['/', '*', '<']),
        take_while(0.., |c: char| !c.is_whitespace()),
    )
        .take()
        .map(str::to_owned)
        .parse_next(input)
}

fn pattern(input: &mut &str) -> ModalResult<String> {
    alt((string_literal, bare_pattern)).parse_next(input)
}

fn path_condition(input: &mut &str) -> ModalResult<PathCondition> {
    ws.parse_next(input)?;
    let negate = opt(("not", ws1)).parse_next(input)?.is_some();
    let patterns: Vec<String> = cut_err(repeat(1.., preceded(ws, pattern)))
        .context(StrContext::Expected(StrContextValue::Description(
            "path pattern",
        )))
        .parse_next(input)?;
    Ok(PathCondition { patterns, negate })
}

// -- Rule definitions -------------------------------------------------------

fn weight_annotation(input: &mut &str) -> ModalResult<i32> {
    delimited(
        (ws, '(', ws, "weight", ws),
        cut_err(dec_int::<_, i32, _>).context(StrContext::Expected(
            StrContextValue::Description("integer weight"),
        )),
        (ws, cut_err(')')),
    )
    .parse_next(input)
}

fn rule_def(input: &mut &str) -> ModalResult<Rule> {
    ws.parse_next(input)?;
    ("rule", ws1).parse_next(input)?;

    let id = cut_err(ident)
        .context(StrContext::Expected(StrContextValue::Description(
            "rule id",
        )))
        .parse_next(input)?;

    let label = opt(preceded(ws, string_literal)).parse_next(input)?;
    let weight = opt(weight_annotation).parse_next(input)?;
    let disabled = opt(preceded(ws, "disabled")).parse_next(input)?.is_some();

    ws.parse_next(input)?;
    cut_err("->")
        .context(StrContext::Expected(StrContextValue::StringLiteral("->")))
        .parse_next(input)?;
    ws.parse_next(input)?;
    let page = cut_err(page_id).parse_next(input)?;

    ws.parse_next(input)?;
    cut_err(':')
        .context(StrContext::Expected(StrContextValue::CharLiteral(':')))
        .parse_next(input)?;

    let condition = path_condition(input)?;

    Ok(Rule {
        label: label.unwrap_or_else(|| id.to_owned()),
        id: id.to_owned(),
        target_page_id: page,
        path_condition: condition,
        enabled: !disabled,
        weight: weight.unwrap_or(0),
    })
}

// -- Top-level parser -------------------------------------------------------

pub fn parse_ruleset(input: &mut &str) -> ModalResult<ParsedRuleSet> {
    let rules: Vec<Rule> = repeat(0.., rule_def).parse_next(input)?;
    ws.parse_next(input)?;
    Ok(ParsedRuleSet { rules })
}
