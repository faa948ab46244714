use super::*;
use crate::buffer_handler;
use pretty_assertions::assert_eq;
use proto_value::EvalError;

fn counter_record() -> Record {
    let record = Record::from_entries([("count", 0)]);
    let bump = Function::new("bump", 1, |this, args| {
        let Value::Record(me) = this else {
            return Err(proto_value::type_mismatch("record", this.type_name()));
        };
        let next = me.get("count")?.to_number() + args[0].to_number();
        me.set("count", next)?;
        Ok(Value::number(next))
    });
    record.set("bump", bump).unwrap();
    record
}

#[test]
fn prints_entry_and_exit_around_the_call() {
    let record = counter_record();
    let printer = buffer_handler();
    trace(&record, "bump", printer.clone()).unwrap();

    let result = record.call_method("bump", &[Value::number(5)]).unwrap();
    assert_eq!(result, Value::number(5));
    assert_eq!(record.get("count").unwrap(), Value::number(5));
    assert_eq!(printer.lines(), vec!["Entering: bump", "Exiting: bump"]);
}

#[test]
fn non_function_slot_is_not_callable() {
    let record = Record::from_entries([("count", 0)]);
    let err = trace(&record, "count", buffer_handler()).unwrap_err();
    assert!(matches!(err, EvalError::NotCallable { .. }));

    let err = trace(&record, "missing", buffer_handler()).unwrap_err();
    assert!(matches!(err, EvalError::NotCallable { .. }));
}

#[test]
fn inherited_method_is_wrapped_on_the_heir_only() {
    let parent = counter_record();
    let heir = Record::with_parent(parent.clone());
    heir.set("count", 10).unwrap();
    let printer = buffer_handler();
    trace(&heir, "bump", printer.clone()).unwrap();

    assert!(heir.has_own("bump"));
    parent.call_method("bump", &[Value::number(1)]).unwrap();
    assert!(printer.lines().is_empty());

    heir.call_method("bump", &[Value::number(1)]).unwrap();
    assert_eq!(heir.get("count").unwrap(), Value::number(11));
    assert_eq!(printer.lines().len(), 2);
}

#[test]
fn failing_method_skips_exit_line() {
    let record = Record::new();
    record
        .set("fail", Function::lambda(0, |_| Err(proto_value::thrown("boom"))))
        .unwrap();
    let printer = buffer_handler();
    trace(&record, "fail", printer.clone()).unwrap();
    assert!(record.call_method("fail", &[]).is_err());
    assert_eq!(printer.lines(), vec!["Entering: fail"]);
}
