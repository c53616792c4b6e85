//! Terms and values to canonical JSON.

use serde_json::{Map, Value as Json};
use stlc_eval::{Function, Term, TermKind, Value};
use stlc_stack::ensure_sufficient_stack;

/// Canonical form of a term; [`parse`](crate::parse) reads it back.
pub fn serialize_term(term: &Term) -> Json {
    ensure_sufficient_stack(|| match term.kind() {
        TermKind::Free { name } => Json::String(format!("{name}:{}", term.ty())),
        TermKind::Construct { tag, args } => {
            let mut out = Vec::with_capacity(args.len().saturating_add(1));
            out.push(Json::String(format!("{}.{tag}", term.ty())));
            out.extend(args.iter().map(serialize_term));
            Json::Array(out)
        }
        TermKind::Function(func) => serialize_function(func),
        TermKind::Apply { func, args } => {
            let mut out = Vec::with_capacity(args.len().saturating_add(2));
            out.push(Json::String(format!("{}<-apply", term.ty())));
            out.push(serialize_function(func));
            out.extend(args.iter().map(serialize_term));
            Json::Array(out)
        }
        TermKind::Match {
            scrutinee,
            branches,
        } => {
            let mapping: Map<String, Json> = branches
                .iter()
                .map(|(tag, func)| (tag.to_string(), serialize_function(func)))
                .collect();
            Json::Array(vec![
                Json::String(format!("{}<-match", term.ty())),
                serialize_term(scrutinee),
                Json::Object(mapping),
            ])
        }
    })
}

/// `[[params...], body]`
fn serialize_function(func: &Function) -> Json {
    let params = func
        .params()
        .iter()
        .map(|p| Json::String(p.to_string()))
        .collect();
    Json::Array(vec![Json::Array(params), serialize_term(func.body())])
}

/// Canonical form of a value: `["Type.tag", arg, ...]`.
pub fn serialize_value(value: &Value) -> Json {
    ensure_sufficient_stack(|| {
        let mut out = Vec::with_capacity(value.args().len().saturating_add(1));
        out.push(Json::String(format!("{}.{}", value.ty(), value.tag())));
        out.extend(value.args().iter().map(serialize_value));
        Json::Array(out)
    })
}

/// Compact JSON text of a term's canonical form.
pub fn to_string(term: &Term) -> String {
    serialize_term(term).to_string()
}
