use super::*;
use pretty_assertions::assert_eq;
use proto_value::EvalError;

fn run(demo: fn(&DemoContext) -> EvalResult<()>) -> Vec<String> {
    let ctx = DemoContext::buffered(0);
    demo(&ctx).unwrap();
    ctx.lines()
}

#[test]
fn factory_ranges_share_methods() {
    let range = range_factory().unwrap();
    let a = range.invoke(&[Value::number(1), Value::number(3)]).unwrap();
    let b = range.invoke(&[Value::number(2), Value::number(4)]).unwrap();
    let (Value::Record(a), Value::Record(b)) = (a, b) else {
        panic!("range() should return records");
    };
    assert!(a.parent().unwrap().ptr_eq(&b.parent().unwrap()));
    assert_eq!(a.own_keys(), vec!["from", "to"]);

    let methods = range.properties().get("methods").unwrap();
    assert!(methods.as_record().unwrap().ptr_eq(&a.parent().unwrap()));
}

#[test]
fn includes_compares_strings_too() {
    let methods = range_methods().unwrap();
    let letters = range_with(Value::string("b"), Value::string("d"), &methods).unwrap();
    let includes = |x: &str| {
        letters
            .call_method("includes", &[Value::string(x)])
            .unwrap()
    };
    assert_eq!(includes("c"), Value::Bool(true));
    assert_eq!(includes("e"), Value::Bool(false));
}

#[test]
fn foreach_requires_a_function() {
    let r = range_with(Value::number(1), Value::number(2), &range_methods().unwrap()).unwrap();
    assert!(matches!(
        r.call_method("foreach", &[Value::number(1)]).unwrap_err(),
        EvalError::NotCallable { .. }
    ));
}

#[test]
fn foreach_starts_at_ceiling_of_from() {
    let ctx = DemoContext::buffered(0);
    let r = range_with(Value::number(0.5), Value::number(2.5), &range_methods().unwrap()).unwrap();
    print_each(&ctx, &r).unwrap();
    assert_eq!(ctx.lines(), vec!["1", "2"]);
}

#[test]
fn constructed_range_fields_are_own() {
    let range = range_constructor(&range_methods().unwrap()).unwrap();
    let r = range.construct(&[Value::number(1), Value::number(3)]).unwrap();
    assert_eq!(r.own_keys(), vec!["from", "to"]);
    assert!(range.prototype().unwrap().unwrap().is_prototype_of(&r));
}

#[test]
fn factory_output() {
    assert_eq!(
        run(factory_demo),
        vec!["r.includes(2) = true", "1", "2", "3", "r = (1...3)"]
    );
}

#[test]
fn constructor_output() {
    assert_eq!(
        run(constructor_demo),
        vec![
            "r.includes(2) = true",
            "1",
            "2",
            "3",
            "r = (1...3)",
            "r.constructor is Range: true",
        ]
    );
}

#[test]
fn shared_parent_output() {
    assert_eq!(
        run(shared_parent_demo),
        vec![
            "parent of factory range: true",
            "parent of constructed range: true",
            "made.span() = 2",
            "built.span() = 3",
        ]
    );
}

#[test]
fn constructor_property_output() {
    assert_eq!(
        run(constructor_property_demo),
        vec![
            "F.prototype.constructor === F: true",
            "constructor enumerable: false",
            "o.constructor === F: true",
        ]
    );
}
