use super::*;

#[test]
fn messages_render_structured_fields() {
    assert_eq!(
        type_mismatch("record", "number").to_string(),
        "type mismatch: expected record, got number"
    );
    assert_eq!(
        read_only("x").to_string(),
        "cannot assign to read-only property 'x'"
    );
    assert_eq!(unknown_operator("mod").to_string(), "unknown operator: mod");
    assert_eq!(
        thrown("serial number can only be set to a larger value").to_string(),
        "serial number can only be set to a larger value"
    );
}

#[test]
fn names_follow_error_family() {
    assert_eq!(invalid_argument("null parent").name(), "TypeError");
    assert_eq!(cyclic_delegation().name(), "TypeError");
    assert_eq!(validation_failed("name", 42).name(), "Error");
    assert_eq!(thrown("boom").name(), "Error");
}

#[test]
fn variants_are_matchable() {
    let err = not_callable("number");
    assert!(matches!(err, EvalError::NotCallable { ref type_name } if type_name == "number"));
}
