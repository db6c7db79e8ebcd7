use std::fmt;

use pest::Parser;
use pest::iterators::Pair;

use crate::EvalError;

#[derive(pest_derive::Parser)]
#[grammar = "directive.pest"]
struct DirectiveParser;

/// `${base.field.field}` parsed into its segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    pub base: String,
    pub chain: Vec<String>,
}

impl PropertyPath {
    pub fn parse(expr: &str) -> Result<Self, EvalError> {
        let property = DirectiveParser::parse(Rule::property, expr)
            .ok()
            .and_then(|mut pairs| pairs.next())
            .ok_or_else(|| EvalError::malformed(expr))?;
        child(property, Rule::expression)
            .and_then(from_expression)
            .ok_or_else(|| EvalError::malformed(expr))
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${{{}", self.base)?;
        for field in &self.chain {
            write!(f, ".{field}")?;
        }
        f.write_str("}")
    }
}

/// `item: ${order.items}`, the text of a `t:each` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EachSpec {
    pub var: String,
    pub path: PropertyPath,
}

impl EachSpec {
    pub fn parse(text: &str) -> Result<Self, EvalError> {
        let each = DirectiveParser::parse(Rule::each, text)
            .ok()
            .and_then(|mut pairs| pairs.next())
            .ok_or_else(|| EvalError::malformed(text))?;

        let mut var = None;
        let mut path = None;
        for part in each.into_inner() {
            match part.as_rule() {
                Rule::ident => var = Some(part.as_str().to_string()),
                Rule::expression => path = from_expression(part),
                _ => {}
            }
        }
        match (var, path) {
            (Some(var), Some(path)) => Ok(EachSpec { var, path }),
            _ => Err(EvalError::malformed(text)),
        }
    }
}

fn child(pair: Pair<'_, Rule>, rule: Rule) -> Option<Pair<'_, Rule>> {
    pair.into_inner().find(|p| p.as_rule() == rule)
}

fn from_expression(expression: Pair<'_, Rule>) -> Option<PropertyPath> {
    let path = child(expression, Rule::path)?;
    let mut idents = path.into_inner().map(|p| p.as_str().to_string());
    let base = idents.next()?;
    Some(PropertyPath {
        base,
        chain: idents.collect(),
    })
}
