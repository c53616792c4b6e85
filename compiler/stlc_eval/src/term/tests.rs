use super::*;
use pretty_assertions::assert_eq;

fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry
        .declare("Bool")
        .unwrap()
        .add_constructor("true", &[])
        .add_constructor("false", &[]);
    registry
        .declare("Nat")
        .unwrap()
        .add_constructor("zero", &[])
        .add_constructor("next", &["Nat"]);
    registry.check().unwrap();
    registry
}

fn deps_of(term: &Term) -> Vec<(String, String)> {
    term.deps()
        .iter()
        .map(|(n, t)| (n.to_string(), t.to_string()))
        .collect()
}

fn constant(r: &TypeRegistry, ty: &str, tag: &str) -> Term {
    Term::construct(r, ty, tag, vec![]).unwrap()
}

#[test]
fn closed_constructor_has_no_deps() {
    let r = registry();
    let t = constant(&r, "Bool", "true");
    assert!(t.is_closed());
    assert_eq!(t.ty(), "Bool");
    assert_eq!(t.to_string(), "Bool<...>");
}

#[test]
fn free_variable_depends_on_itself() {
    let r = registry();
    let foo = Term::free(&r, "foo", "Nat").unwrap();
    assert_eq!(foo.to_string(), "foo:Nat");
    assert_eq!(deps_of(&foo), vec![("foo".to_string(), "Nat".to_string())]);
    assert_eq!(foo.describe(), "Nat{foo:Nat}<...>");
}

#[test]
fn constructor_collects_argument_deps() {
    let r = registry();
    let foo = Term::free(&r, "foo", "Nat").unwrap();
    let expr = Term::construct(&r, "Nat", "next", vec![foo]).unwrap();
    assert_eq!(expr.to_string(), "Nat{foo:Nat}<...>");
    assert_eq!(deps_of(&expr), vec![("foo".to_string(), "Nat".to_string())]);
}

#[test]
fn inconsistent_free_var_types_fail_at_construction() {
    let mut r = registry();
    r.declare("Pair")
        .unwrap()
        .add_constructor("pair", &["Nat", "Bool"]);
    let a = Term::free(&r, "x", "Nat").unwrap();
    let b = Term::free(&r, "x", "Bool").unwrap();
    let err = Term::construct(&r, "Pair", "pair", vec![a, b]).unwrap_err();
    assert_eq!(
        err,
        EvalError::InconsistentFreeVarType {
            name: Name::new("x"),
            first: Name::new("Nat"),
            second: Name::new("Bool"),
        }
    );
}

#[test]
fn constructor_arity_is_checked_lazily() {
    let r = registry();
    // Wrong arity is accepted here and rejected at evaluation time.
    let t = Term::construct(&r, "Nat", "zero", vec![constant(&r, "Nat", "zero")]).unwrap();
    assert_eq!(t.ty(), "Nat");
}

#[test]
fn constructor_requires_known_type_and_tag() {
    let r = registry();
    assert!(matches!(
        Term::construct(&r, "Int", "zero", vec![]),
        Err(EvalError::Type(TypeError::UnknownType { .. }))
    ));
    assert!(matches!(
        Term::construct(&r, "Nat", "succ", vec![]),
        Err(EvalError::Type(TypeError::UnknownConstructor { .. }))
    ));
    assert!(matches!(
        Term::free(&r, "x", "Int"),
        Err(EvalError::Type(TypeError::UnknownType { .. }))
    ));
}

#[test]
fn function_removes_its_parameters() {
    let r = registry();
    let body = Term::construct(
        &r,
        "Nat",
        "next",
        vec![Term::free(&r, "x", "Nat").unwrap()],
    )
    .unwrap();
    let f = Function::from_pairs(&r, &[("x", "Nat")], body).unwrap();
    assert!(f.deps().is_empty());
    assert_eq!(f.ty(), "Nat");
    assert_eq!(f.arity(), 1);
    assert_eq!(f.signature().collect::<Vec<_>>(), vec!["Nat"]);
    assert_eq!(f.params()[0].to_string(), "x:Nat");

    let term = Term::function(f.clone());
    assert_eq!(term, Term::from(f));
    assert!(term.is_closed());
    assert!(matches!(term.kind(), TermKind::Function(_)));
}

#[test]
fn function_keeps_outer_free_variables() {
    let mut r = registry();
    r.declare("Pair")
        .unwrap()
        .add_constructor("pair", &["Nat", "Bool"]);
    let body = Term::construct(
        &r,
        "Pair",
        "pair",
        vec![
            Term::free(&r, "x", "Nat").unwrap(),
            Term::free(&r, "flag", "Bool").unwrap(),
        ],
    )
    .unwrap();
    let f = Function::from_pairs(&r, &[("x", "Nat")], body).unwrap();
    assert_eq!(f.deps().to_string(), "{flag:Bool}");
}

#[test]
fn function_rejects_duplicate_parameters() {
    let r = registry();
    let err = Function::from_pairs(
        &r,
        &[("x", "Nat"), ("x", "Nat")],
        Term::free(&r, "x", "Nat").unwrap(),
    )
    .unwrap_err();
    assert_eq!(err, EvalError::MalformedParameterList { name: Name::new("x") });
}

#[test]
fn function_rejects_parameter_used_at_other_type() {
    let r = registry();
    let err = Function::from_pairs(&r, &[("x", "Bool")], Term::free(&r, "x", "Nat").unwrap())
        .unwrap_err();
    assert!(matches!(err, EvalError::InconsistentFreeVarType { .. }));
}

#[test]
fn function_rejects_unknown_parameter_type() {
    let r = registry();
    let err = Function::from_pairs(&r, &[("x", "bar")], Term::free(&r, "x", "Nat").unwrap())
        .unwrap_err();
    assert_eq!(
        err,
        EvalError::Type(TypeError::UnknownType { name: Name::new("bar") })
    );
}

fn predecessor(r: &TypeRegistry) -> Function {
    let branches = Branches::from([
        (
            Name::new("zero"),
            Function::new(vec![], constant(r, "Nat", "zero")).unwrap(),
        ),
        (
            Name::new("next"),
            Function::from_pairs(r, &[("n", "Nat")], Term::free(r, "n", "Nat").unwrap()).unwrap(),
        ),
    ]);
    let body = Term::match_on(r, "Nat", Term::free(r, "x", "Nat").unwrap(), branches).unwrap();
    Function::from_pairs(r, &[("x", "Nat")], body).unwrap()
}

#[test]
fn fully_parameterized_match_function_is_closed() {
    let r = registry();
    let prev = predecessor(&r);
    assert!(prev.deps().is_empty());
    assert_eq!(prev.body().deps().to_string(), "{x:Nat}");
}

#[test]
fn match_must_be_exhaustive() {
    let r = registry();
    let branches = Branches::from([(
        Name::new("zero"),
        Function::new(vec![], constant(&r, "Bool", "true")).unwrap(),
    )]);
    let err =
        Term::match_on(&r, "Bool", Term::free(&r, "x", "Nat").unwrap(), branches).unwrap_err();
    assert_eq!(
        err,
        EvalError::NonExhaustiveMatch {
            ty: Name::new("Nat"),
            missing: Name::new("next"),
        }
    );
    assert_eq!(err.to_string(), "no mapping found in pattern match for Nat.next");

    let err = Term::match_on(&r, "Bool", Term::free(&r, "x", "Nat").unwrap(), Branches::new())
        .unwrap_err();
    assert!(matches!(err, EvalError::NonExhaustiveMatch { .. }));
}

#[test]
fn match_branch_signature_must_match_constructor() {
    let r = registry();
    let branches = Branches::from([
        (
            Name::new("zero"),
            Function::new(vec![], constant(&r, "Bool", "true")).unwrap(),
        ),
        (
            Name::new("next"),
            Function::from_pairs(&r, &[("b", "Bool")], constant(&r, "Bool", "false")).unwrap(),
        ),
    ]);
    let err =
        Term::match_on(&r, "Bool", Term::free(&r, "x", "Nat").unwrap(), branches).unwrap_err();
    assert_eq!(
        err,
        EvalError::BranchSignatureMismatch {
            ty: Name::new("Nat"),
            tag: Name::new("next"),
            expected: vec![Name::new("Nat")],
            got: vec![Name::new("Bool")],
        }
    );
    assert_eq!(
        err.to_string(),
        "branch for Nat.next takes (Bool) but the constructor has (Nat)"
    );
}

#[test]
fn match_branch_result_type_must_agree() {
    let r = registry();
    let branches = Branches::from([
        (
            Name::new("zero"),
            Function::new(vec![], constant(&r, "Nat", "zero")).unwrap(),
        ),
        (
            Name::new("next"),
            Function::from_pairs(&r, &[("n", "Nat")], constant(&r, "Bool", "false")).unwrap(),
        ),
    ]);
    let err =
        Term::match_on(&r, "Bool", Term::free(&r, "x", "Nat").unwrap(), branches).unwrap_err();
    assert_eq!(
        err,
        EvalError::ResultTypeMismatch {
            expected: Name::new("Bool"),
            got: Name::new("Nat"),
        }
    );
}

#[test]
fn match_rejects_branches_for_unknown_tags() {
    let r = registry();
    let branches = Branches::from([
        (
            Name::new("true"),
            Function::new(vec![], constant(&r, "Nat", "zero")).unwrap(),
        ),
        (
            Name::new("false"),
            Function::new(vec![], constant(&r, "Nat", "zero")).unwrap(),
        ),
        (
            Name::new("maybe"),
            Function::new(vec![], constant(&r, "Nat", "zero")).unwrap(),
        ),
    ]);
    let err =
        Term::match_on(&r, "Nat", Term::free(&r, "b", "Bool").unwrap(), branches).unwrap_err();
    assert_eq!(
        err,
        EvalError::Type(TypeError::UnknownConstructor {
            ty: Name::new("Bool"),
            tag: Name::new("maybe"),
        })
    );
}

#[test]
fn match_unions_scrutinee_and_branch_deps() {
    let r = registry();
    let branches = Branches::from([
        (
            Name::new("zero"),
            Function::new(vec![], Term::free(&r, "dflt", "Nat").unwrap()).unwrap(),
        ),
        (
            Name::new("next"),
            Function::from_pairs(&r, &[("n", "Nat")], Term::free(&r, "n", "Nat").unwrap())
                .unwrap(),
        ),
    ]);
    let m = Term::match_on(&r, "Nat", Term::free(&r, "x", "Nat").unwrap(), branches).unwrap();
    assert_eq!(m.deps().to_string(), "{dflt:Nat,x:Nat}");
}

#[test]
fn apply_checks_arguments_eagerly() {
    let r = registry();
    let prev = predecessor(&r);

    let err = Term::apply(prev.clone(), vec![]).unwrap_err();
    assert_eq!(err, EvalError::ArgumentListTypeError { expected: 1, got: 0 });

    let err = Term::apply(prev.clone(), vec![constant(&r, "Bool", "true")]).unwrap_err();
    assert_eq!(
        err,
        EvalError::ParamTypeMismatch {
            param: Name::new("x"),
            expected: Name::new("Nat"),
            got: Name::new("Bool"),
        }
    );

    let applied = Term::apply(prev, vec![Term::free(&r, "y", "Nat").unwrap()]).unwrap();
    assert_eq!(applied.ty(), "Nat");
    assert_eq!(applied.deps().to_string(), "{y:Nat}");
}

#[test]
fn constant_lifts_values() {
    let r = registry();
    let zero = Value::new(&r, "Nat", "zero", vec![]).unwrap();
    let one = Value::new(&r, "Nat", "next", vec![zero]).unwrap();
    let lifted = Term::constant(&one);
    let built = Term::construct(&r, "Nat", "next", vec![constant(&r, "Nat", "zero")]).unwrap();
    assert_eq!(lifted, built);
}

#[test]
fn check_deps_without_evaluating() {
    let r = registry();
    let zero = Value::new(&r, "Nat", "zero", vec![]).unwrap();
    let t = Term::free(&r, "foo", "Bool").unwrap();

    let err = t.check_deps(&Env::new()).unwrap_err();
    assert_eq!(
        err,
        EvalError::UnsatisfiedDependency {
            name: Name::new("foo"),
            expected: Name::new("Bool"),
            found: None,
        }
    );
    assert_eq!(err.to_string(), "unsatisfied dependency foo: expected Bool, not bound");

    let err = t.check_deps(&Env::new().bind("foo", zero)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unsatisfied dependency foo: expected Bool, found Nat"
    );
}

#[test]
fn variable_names_must_be_identifiers() {
    let r = registry();
    assert_eq!(
        Term::free(&r, "my-var", "Nat").unwrap_err(),
        EvalError::Type(TypeError::InvalidName { name: Name::new("my-var") })
    );
    assert_eq!(
        Param::new(&r, "x:y", "Nat").unwrap_err(),
        EvalError::Type(TypeError::InvalidName { name: Name::new("x:y") })
    );
    assert!(matches!(
        Function::from_pairs(&r, &[("a b", "Nat")], constant(&r, "Nat", "zero")),
        Err(EvalError::Type(TypeError::InvalidName { .. }))
    ));
}

#[test]
fn constructor_tags_must_be_identifiers() {
    let mut r = registry();
    r.declare("Opt").unwrap().add_constructor("none.v2", &[]);
    assert_eq!(
        Term::construct(&r, "Opt", "none.v2", vec![]).unwrap_err(),
        EvalError::Type(TypeError::InvalidName { name: Name::new("none.v2") })
    );
}
