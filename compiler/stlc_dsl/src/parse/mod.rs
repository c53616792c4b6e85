//! Surface syntax to terms.

use serde_json::Value as Json;
use stlc_eval::{Branches, Function, Param, Term, Value};
use stlc_stack::ensure_sufficient_stack;
use stlc_types::{Name, TypeRegistry};

use crate::DslError;

/// Parse a surface-syntax JSON tree into a term.
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse(registry: &TypeRegistry, json: &Json) -> Result<Term, DslError> {
    Parser { registry }.term(json)
}

/// Parse JSON text into a term.
pub fn parse_str(registry: &TypeRegistry, text: &str) -> Result<Term, DslError> {
    let json: Json = serde_json::from_str(text)?;
    parse(registry, &json)
}

/// Read a value from its canonical form, `["Type.tag", arg, ...]`.
///
/// Only constructor forms are accepted; the value is validated as it is
/// built.
pub fn parse_value(registry: &TypeRegistry, json: &Json) -> Result<Value, DslError> {
    ensure_sufficient_stack(|| {
        let Some((head, tail)) = json.as_array().and_then(|a| a.split_first()) else {
            return Err(unrecognized(json));
        };
        let Some((ty, tag)) = head.as_str().and_then(split_constructor) else {
            return Err(unrecognized(head));
        };
        let args = tail
            .iter()
            .map(|arg| parse_value(registry, arg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::new(registry, ty, tag, args)?)
    })
}

/// The special heads of the array forms.
enum Head<'a> {
    Construct { ty: &'a str, tag: &'a str },
    Apply { ty: &'a str },
    Match { ty: &'a str },
}

impl<'a> Head<'a> {
    fn classify(head: &'a str) -> Option<Self> {
        if let Some((ty, op)) = head.split_once("<-") {
            if !Name::is_identifier(ty) {
                return None;
            }
            return match op {
                "apply" => Some(Head::Apply { ty }),
                "match" => Some(Head::Match { ty }),
                _ => None,
            };
        }
        split_constructor(head).map(|(ty, tag)| Head::Construct { ty, tag })
    }
}

struct Parser<'r> {
    registry: &'r TypeRegistry,
}

impl Parser<'_> {
    fn term(&self, json: &Json) -> Result<Term, DslError> {
        ensure_sufficient_stack(|| match json {
            Json::String(literal) => {
                let (name, ty) = free_var(literal)?;
                Ok(Term::free(self.registry, name, ty)?)
            }
            Json::Array(items) => self.array(json, items),
            _ => Err(unrecognized(json)),
        })
    }

    fn array(&self, json: &Json, items: &[Json]) -> Result<Term, DslError> {
        let Some((head, tail)) = items.split_first() else {
            return Err(unrecognized(json));
        };

        if let Json::Array(params) = head {
            return Ok(Term::from(self.function(params, tail)?));
        }

        let head_str = head.as_str().ok_or_else(|| unrecognized(head))?;
        match Head::classify(head_str) {
            Some(Head::Construct { ty, tag }) => {
                let args = self.terms(tail)?;
                Ok(Term::construct(self.registry, ty, tag, args)?)
            }
            Some(Head::Apply { ty }) => self.apply(ty, json, tail),
            Some(Head::Match { ty }) => self.match_on(ty, json, tail),
            None => Err(unrecognized(head)),
        }
    }

    fn terms(&self, items: &[Json]) -> Result<Vec<Term>, DslError> {
        items.iter().map(|item| self.term(item)).collect()
    }

    /// `[[params...], body]`, already split into head and tail.
    fn function(&self, params: &[Json], tail: &[Json]) -> Result<Function, DslError> {
        let [body] = tail else {
            return Err(DslError::FunctionBody { got: tail.len() });
        };
        let params = params
            .iter()
            .map(|p| self.param(p))
            .collect::<Result<Vec<_>, _>>()?;
        let body = self.term(body)?;
        Ok(Function::new(params, body)?)
    }

    /// A complete function literal in argument position.
    fn function_literal(&self, json: &Json) -> Result<Function, DslError> {
        match json.as_array().and_then(|a| a.split_first()) {
            Some((Json::Array(params), tail)) => self.function(params, tail),
            _ => Err(unrecognized(json)),
        }
    }

    fn param(&self, json: &Json) -> Result<Param, DslError> {
        let literal = json
            .as_str()
            .ok_or_else(|| DslError::MalformedFreeVarLiteral {
                literal: json.to_string(),
            })?;
        let (name, ty) = free_var(literal)?;
        Ok(Param::new(self.registry, name, ty)?)
    }

    /// `["T<-apply", function, args...]`
    fn apply(&self, ty: &str, json: &Json, tail: &[Json]) -> Result<Term, DslError> {
        let Some((func, args)) = tail.split_first() else {
            return Err(unrecognized(json));
        };
        let declared = self.registry.get(ty)?.name().clone();
        let func = self.function_literal(func)?;
        let term = Term::apply(func, self.terms(args)?)?;
        if *term.ty() != declared {
            return Err(stlc_eval::EvalError::ResultTypeMismatch {
                expected: declared,
                got: term.ty().clone(),
            }
            .into());
        }
        Ok(term)
    }

    /// `["T<-match", scrutinee, {tag: function, ...}]`
    fn match_on(&self, ty: &str, json: &Json, tail: &[Json]) -> Result<Term, DslError> {
        let [scrutinee, Json::Object(mapping)] = tail else {
            return Err(unrecognized(json));
        };
        let scrutinee = self.term(scrutinee)?;
        let mut branches = Branches::new();
        for (tag, func) in mapping {
            branches.insert(Name::new(tag), self.function_literal(func)?);
        }
        tracing::trace!(ty, branches = branches.len(), "parsed match");
        Ok(Term::match_on(self.registry, ty, scrutinee, branches)?)
    }
}

/// `name: Type`, with optional whitespace around the colon only.
fn free_var(literal: &str) -> Result<(&str, &str), DslError> {
    literal
        .split_once(':')
        .map(|(name, ty)| (name.trim_end(), ty.trim_start()))
        .filter(|(name, ty)| Name::is_identifier(name) && Name::is_identifier(ty))
        .ok_or_else(|| DslError::MalformedFreeVarLiteral {
            literal: literal.to_string(),
        })
}

/// `Type.tag`
fn split_constructor(head: &str) -> Option<(&str, &str)> {
    head.split_once('.')
        .filter(|(ty, tag)| Name::is_identifier(ty) && Name::is_identifier(tag))
}

fn unrecognized(json: &Json) -> DslError {
    DslError::UnrecognizedSyntax {
        head: json.to_string(),
    }
}
