use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn naturals() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry
        .declare("Nat")
        .unwrap()
        .add_constructor("zero", &[])
        .add_constructor("next", &["Nat"]);
    registry
}

#[test]
fn new_rejects_dangling_types() {
    let mut registry = naturals();
    registry
        .declare("List")
        .unwrap()
        .add_constructor("nil", &[])
        .add_constructor("cons", &["Elem", "List"]);
    assert_eq!(
        Universe::new(registry).unwrap_err(),
        EvalError::Type(TypeError::UnknownConstructorArgType {
            ty: "List".into(),
            tag: "cons".into(),
            index: 0,
            arg: "Elem".into(),
        })
    );
}

#[test]
fn unchecked_universe_still_reports_on_demand() {
    let mut registry = naturals();
    registry.declare("Box").unwrap().add_constructor("of", &["Thing"]);
    let config = EvalConfig {
        check_registry: false,
        ..EvalConfig::default()
    };
    let universe = Universe::with_config(registry, config).unwrap();
    assert!(matches!(
        universe.check_consistency(),
        Err(TypeError::UnknownConstructorArgType { .. })
    ));
}

#[test]
fn lookup() {
    let universe = Universe::new(naturals()).unwrap();
    let nat = universe.lookup_type("Nat").unwrap();
    assert_eq!(nat.constructors().map(ToString::to_string).collect::<Vec<_>>(), ["next", "zero"]);
    assert_eq!(
        universe.lookup_type("Int").unwrap_err(),
        TypeError::UnknownType { name: "Int".into() }
    );
}

#[test]
fn api_and_dsl_build_the_same_term() {
    let universe = Universe::new(naturals()).unwrap();
    let by_hand = {
        let n = universe.make_free_ref("n", "Nat").unwrap();
        let body = universe.make_construct("Nat", "next", vec![n]).unwrap();
        Term::from(universe.make_function(&[("n", "Nat")], body).unwrap())
    };
    let parsed = universe
        .parse_dsl(&json!([["n:Nat"], ["Nat.next", "n:Nat"]]))
        .unwrap();
    assert_eq!(by_hand, parsed);
}

#[test]
fn evaluate_and_apply() {
    let universe = Universe::new(naturals()).unwrap();
    let zero = universe.make_value("Nat", "zero", vec![]).unwrap();
    let one = universe.make_value("Nat", "next", vec![zero.clone()]).unwrap();

    let succ = universe
        .make_function(
            &[("n", "Nat")],
            universe
                .make_construct("Nat", "next", vec![universe.make_free_ref("n", "Nat").unwrap()])
                .unwrap(),
        )
        .unwrap();
    assert_eq!(universe.apply(&succ, &Env::new(), &[zero.clone()]).unwrap(), one);

    let term = universe.parse_dsl(&json!(["Nat.next", "x:Nat"])).unwrap();
    let env = Env::new().bind("x", zero);
    assert_eq!(universe.evaluate(&term, &env).unwrap(), one);
    assert_eq!(universe.parse_value(&json!(["Nat.next", ["Nat.zero"]])).unwrap(), one);
}

#[test]
fn match_through_the_api() {
    let universe = Universe::new(naturals()).unwrap();
    let zero = universe.make_value("Nat", "zero", vec![]).unwrap();

    let mut branches = Branches::new();
    branches.insert(
        "zero".into(),
        universe
            .make_function(&[], universe.make_construct("Nat", "zero", vec![]).unwrap())
            .unwrap(),
    );
    branches.insert(
        "next".into(),
        universe
            .make_function(&[("m", "Nat")], universe.make_free_ref("m", "Nat").unwrap())
            .unwrap(),
    );
    let pred = universe
        .make_match("Nat", universe.make_free_ref("x", "Nat").unwrap(), branches)
        .unwrap();

    let one = universe.make_value("Nat", "next", vec![zero.clone()]).unwrap();
    assert_eq!(universe.evaluate(&pred, &Env::new().bind("x", one)).unwrap(), zero);
}

#[test]
fn api_built_terms_read_back_from_their_serialization() {
    let universe = Universe::new(naturals()).unwrap();
    let x = universe.make_free_ref("x_1", "Nat").unwrap();
    let body = universe.make_construct("Nat", "next", vec![x]).unwrap();
    let term = Term::from(universe.make_function(&[("x_1", "Nat")], body).unwrap());

    let json = stlc_dsl::serialize_term(&term);
    assert_eq!(universe.parse_dsl(&json).unwrap(), term);
}

#[test]
fn names_the_syntax_cannot_read_are_rejected_up_front() {
    let universe = Universe::new(naturals()).unwrap();
    assert_eq!(
        universe.make_free_ref("my-var", "Nat").unwrap_err(),
        EvalError::Type(TypeError::InvalidName { name: "my-var".into() })
    );
    let body = universe.make_free_ref("x", "Nat").unwrap();
    assert!(matches!(
        universe.make_function(&[("my-var", "Nat")], body),
        Err(EvalError::Type(TypeError::InvalidName { .. }))
    ));

    let mut registry = naturals();
    registry.declare("Opt").unwrap().add_constructor("none.v2", &[]);
    assert_eq!(
        Universe::new(registry).unwrap_err(),
        EvalError::Type(TypeError::InvalidName { name: "none.v2".into() })
    );

    let mut registry = TypeRegistry::new();
    assert_eq!(
        registry.declare("my-type").unwrap_err(),
        TypeError::InvalidName { name: "my-type".into() }
    );
}
