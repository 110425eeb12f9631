//! A domain with nested action namespaces, configured from TOML.

use boundary::{Args, Boundary, Callable, Error, Namespace, Result, Settings};
use serde_json::{Value, json};

struct DoSomething;

impl Callable for DoSomething {
    fn new(_args: Args) -> Result<Self> {
        Ok(Self)
    }

    fn call(&self) -> Result<Value> {
        Ok(json!("do something"))
    }
}

struct DoSomethingElse;

impl Callable for DoSomethingElse {
    fn new(_args: Args) -> Result<Self> {
        Ok(Self)
    }

    fn call(&self) -> Result<Value> {
        Ok(json!("do something else"))
    }
}

struct Refund;

impl Callable for Refund {
    fn new(_args: Args) -> Result<Self> {
        Ok(Self)
    }
}

const SETTINGS: &str = r#"
defined_namespaces = ["Payments"]
"#;

fn payments() -> Namespace {
    Namespace::new("Payments")
        .with_constant("VERSION", "0.1.0")
        .with_namespace("Actions", |ns| {
            ns.with_action::<DoSomething>("DoSomething")
                .with_action::<DoSomethingElse>("DoSomethingElse")
                .with_action::<Refund>("Refund")
        })
}

fn declare(boundary: &mut Boundary) -> Result<()> {
    boundary.declare_facade("Payments", "Facade", |dsl| {
        let actions = dsl.inner("Actions")?.as_namespace().ok_or_else(|| {
            Error::InvalidArguments("Payments::Actions is not a namespace".into())
        })?;
        let do_something = actions.inner("DoSomething")?.as_action();
        let do_something_else = actions.inner("DoSomethingElse")?.as_action();
        let refund = actions.inner("Refund")?.as_action();

        for (operation, action) in [
            ("do_something", do_something),
            ("do_something_else", do_something_else),
            ("refund", refund),
        ] {
            if let Some(action) = action {
                dsl.has_use_case(operation, action)?;
            }
        }
        Ok(())
    })
}

fn setup(settings: Settings) -> Boundary {
    let mut boundary = Boundary::new();
    boundary.initialize_with(settings).unwrap();
    boundary.define(payments());
    declare(&mut boundary).unwrap();
    boundary
}

#[test]
fn has_public_interface() {
    let boundary = setup(Settings::parse(SETTINGS).unwrap());

    assert_eq!(
        boundary.call("Payments::Facade", "do_something", Vec::new()).unwrap(),
        json!("do something")
    );
    assert_eq!(
        boundary
            .call("Payments::Facade", "do_something_else", Vec::new())
            .unwrap(),
        json!("do something else")
    );
}

#[test]
fn has_hidden_implementation() {
    let boundary = setup(Settings::parse(SETTINGS).unwrap());

    for (path, message) in [
        ("Payments::VERSION", "private constant Payments::VERSION referenced"),
        ("Payments::Actions", "private constant Payments::Actions referenced"),
        (
            "Payments::Actions::DoSomething",
            "private constant Payments::Actions referenced",
        ),
    ] {
        let err = boundary.resolve(path).unwrap_err();
        assert!(err.is_boundary_violation());
        assert_eq!(err.to_string(), message);
    }
}

#[test]
fn inner_actions_are_testable_from_inside() {
    let boundary = setup(Settings::parse(SETTINGS).unwrap());
    let payments = boundary.registry().get("Payments").unwrap();

    let action = payments
        .inner("Actions")
        .unwrap()
        .as_namespace()
        .unwrap()
        .inner("DoSomething")
        .unwrap()
        .as_action()
        .unwrap();
    assert_eq!(action.invoke(Vec::new()).unwrap(), json!("do something"));
}

#[test]
fn unimplemented_action_fails_on_first_call() {
    let boundary = setup(Settings::parse(SETTINGS).unwrap());

    let err = boundary
        .call("Payments::Facade", "refund", Vec::new())
        .unwrap_err();
    assert!(matches!(err, Error::NotImplemented { .. }));
    assert_eq!(err.to_string(), "Refund does not implement a call method");
}

#[test]
fn by_name_lookup_can_stay_open() {
    let mut settings = Settings::parse(SETTINGS).unwrap();
    settings.const_get_receive_only_public_constants = false;
    let boundary = setup(settings);
    let payments = boundary.registry().get("Payments").unwrap();

    // Enumeration and direct references are still restricted
    assert_eq!(payments.constants(), vec!["Facade"]);
    assert!(boundary.resolve("Payments::VERSION").is_err());

    assert_eq!(
        payments.const_get("VERSION").unwrap().as_constant(),
        Some(&json!("0.1.0"))
    );
    assert!(payments.const_get("Actions::DoSomething").is_ok());
}

#[test]
fn guarded_by_name_lookup() {
    let boundary = setup(Settings::parse(SETTINGS).unwrap());
    let payments = boundary.registry().get("Payments").unwrap();

    assert!(payments.is_guarded());
    assert!(payments.const_get("Facade").unwrap().as_facade().is_some());
    let err = payments.const_get("Actions::DoSomething").unwrap_err();
    assert_eq!(err.to_string(), "private constant Payments::Actions referenced");
}

#[test]
fn custom_facade_name() {
    let settings = Settings::parse(
        r#"
defined_namespaces = ["Payments::Api"]
allowed_class_names_for_facade = ["Api"]
"#,
    )
    .unwrap();
    let mut boundary = Boundary::new();
    boundary.initialize_with(settings).unwrap();
    boundary.define(payments());

    let err = declare(&mut boundary).unwrap_err();
    assert!(matches!(err, Error::WrongFacadeClassName { .. }));

    boundary
        .declare_facade("Payments", "Api", |_| Ok(()))
        .unwrap();
    assert_eq!(
        boundary.registry().get("Payments").unwrap().constants(),
        vec!["Api"]
    );
}
