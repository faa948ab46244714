use super::*;
use crate::EvalError;
use pretty_assertions::assert_eq;

fn constant(n: i32) -> Function {
    Function::lambda(0, move |_| Ok(Value::number(n)))
}

mod delegation {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn heir_reads_parent_keys_without_owning_them() {
        let parent = Record::from_entries([("x", 1)]);
        let heir = Record::with_parent(parent.clone());
        assert!(heir.own_keys().is_empty());
        assert_eq!(heir.get("x").unwrap(), Value::number(1));
        assert!(heir.has("x"));
        assert!(!heir.has_own("x"));
    }

    #[test]
    fn own_key_shadows_parent() {
        let parent = Record::from_entries([("x", 1)]);
        let heir = Record::with_parent(parent.clone());
        heir.set("x", 2).unwrap();
        assert_eq!(heir.get("x").unwrap(), Value::number(2));
        assert_eq!(parent.get("x").unwrap(), Value::number(1));
    }

    #[test]
    fn lookup_follows_long_chains() {
        let root = Record::from_entries([("deep", "yes")]);
        let mut tip = root.clone();
        for _ in 0..10 {
            tip = Record::with_parent(tip);
        }
        assert_eq!(tip.get("deep").unwrap(), Value::string("yes"));
        assert!(root.is_prototype_of(&tip));
        assert!(!tip.is_prototype_of(&root));
    }

    #[test]
    fn self_delegation_is_rejected() {
        let r = Record::new();
        assert_eq!(
            r.set_parent(Some(r.clone())).unwrap_err(),
            EvalError::CyclicDelegation
        );
    }

    #[test]
    fn indirect_cycle_is_rejected() {
        let a = Record::new();
        let b = Record::with_parent(a.clone());
        let c = Record::with_parent(b.clone());
        assert_eq!(
            a.set_parent(Some(c)).unwrap_err(),
            EvalError::CyclicDelegation
        );
        assert!(a.parent().is_none());
    }

    #[test]
    fn parent_can_be_cleared() {
        let heir = Record::with_parent(Record::from_entries([("x", 1)]));
        heir.set_parent(None).unwrap();
        assert_eq!(heir.get("x").unwrap(), Value::Undefined);
    }
}

mod accessors {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vector() -> Record {
        let p = Record::from_entries([("x", 3.0), ("y", 4.0)]);
        let r_get = Function::new("get r", 0, |this, _| {
            let x = this.get("x")?.to_number();
            let y = this.get("y")?.to_number();
            Ok(Value::number(x.hypot(y)))
        });
        let r_set = Function::new("set r", 1, |this, args| {
            let record = this.as_record().cloned().unwrap_or_default();
            let x = record.get("x")?.to_number();
            let y = record.get("y")?.to_number();
            let ratio = args.first().map_or(f64::NAN, Value::to_number) / x.hypot(y);
            record.set("x", x * ratio)?;
            record.set("y", y * ratio)?;
            Ok(Value::Undefined)
        });
        p.define_accessor("r", Some(r_get), Some(r_set)).unwrap();
        p
    }

    #[test]
    fn getter_computes_from_receiver() {
        assert_eq!(vector().get("r").unwrap(), Value::number(5));
    }

    #[test]
    fn setter_writes_through_receiver() {
        let p = vector();
        p.set("r", 10).unwrap();
        assert_eq!(p.get("x").unwrap(), Value::number(6));
        assert_eq!(p.get("y").unwrap(), Value::number(8));
    }

    #[test]
    fn inherited_accessor_uses_heir_as_receiver() {
        let p = vector();
        let q = Record::with_parent(p.clone());
        q.set("x", 6).unwrap();
        q.set("y", 8).unwrap();
        assert_eq!(q.get("r").unwrap(), Value::number(10));
        q.set("r", 5).unwrap();
        assert_eq!(q.get("x").unwrap(), Value::number(3));
        // parent untouched, and r stays an inherited accessor
        assert_eq!(p.get("x").unwrap(), Value::number(3));
        assert!(!q.has_own("r"));
    }

    #[test]
    fn getter_only_rejects_assignment() {
        let r = Record::new();
        r.define_accessor("theta", Some(constant(0)), None).unwrap();
        assert!(matches!(
            r.set("theta", 1).unwrap_err(),
            EvalError::NoSetter { .. }
        ));
    }

    #[test]
    fn setter_only_reads_undefined() {
        let r = Record::new();
        let sink = Function::lambda(1, |_| Ok(Value::Undefined));
        r.define_accessor("sink", None, Some(sink)).unwrap();
        assert_eq!(r.get("sink").unwrap(), Value::Undefined);
        r.set("sink", 1).unwrap();
    }

    #[test]
    fn getter_may_reenter_the_same_record() {
        let r = Record::from_entries([("n", 0)]);
        let next = Function::new("get next", 0, |this, _| {
            let record = this.as_record().cloned().unwrap_or_default();
            let n = record.get("n")?;
            record.set("n", n.to_number() + 1.0)?;
            Ok(n)
        });
        r.define_accessor("next", Some(next), None).unwrap();
        assert_eq!(r.get("next").unwrap(), Value::number(0));
        assert_eq!(r.get("next").unwrap(), Value::number(1));
        assert_eq!(r.get("n").unwrap(), Value::number(2));
    }
}

mod descriptors {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn own_property_descriptor_for_plain_assignment() {
        let r = Record::from_entries([("x", 1)]);
        let desc = r.get_own_property("x").unwrap();
        assert_eq!(desc.value, Some(Value::number(1)));
        assert_eq!(desc.writable, Some(true));
        assert_eq!(desc.enumerable, Some(true));
        assert_eq!(desc.configurable, Some(true));
    }

    #[test]
    fn descriptor_missing_for_inherited_and_absent_keys() {
        let heir = Record::with_parent(Record::from_entries([("x", 1)]));
        assert!(heir.get_own_property("x").is_none());
        assert!(heir.get_own_property("nope").is_none());
    }

    #[test]
    fn non_enumerable_is_hidden_from_enumeration() {
        let r = Record::new();
        r.define_property(
            "x",
            PropertyDescriptor::data(Value::number(1), true, false, true),
        )
        .unwrap();
        assert_eq!(r.get("x").unwrap(), Value::number(1));
        assert!(r.own_enumerable_keys().is_empty());
        assert_eq!(r.own_keys(), vec!["x"]);
    }

    #[test]
    fn read_only_rejects_assignment_but_allows_redefinition_while_configurable() {
        let r = Record::new();
        r.define_property(
            "x",
            PropertyDescriptor::data(Value::number(1), true, false, true),
        )
        .unwrap();
        r.define_property("x", PropertyDescriptor::default().writable(false))
            .unwrap();
        assert!(matches!(r.set("x", 2).unwrap_err(), EvalError::ReadOnly { .. }));
        assert_eq!(r.get("x").unwrap(), Value::number(1));

        r.define_property("x", PropertyDescriptor::with_value(Value::number(2)))
            .unwrap();
        assert_eq!(r.get("x").unwrap(), Value::number(2));
    }

    #[test]
    fn data_converts_to_accessor_and_keeps_shared_attributes() {
        let r = Record::new();
        r.define_property(
            "x",
            PropertyDescriptor::data(Value::number(1), false, false, true),
        )
        .unwrap();
        r.define_property("x", PropertyDescriptor::with_getter(constant(0)))
            .unwrap();
        assert_eq!(r.get("x").unwrap(), Value::number(0));
        let desc = r.get_own_property("x").unwrap();
        assert!(desc.is_accessor());
        assert_eq!(desc.enumerable, Some(false));
        assert_eq!(desc.configurable, Some(true));
    }

    #[test]
    fn accessor_converts_back_to_data() {
        let r = Record::new();
        r.define_accessor("x", Some(constant(7)), None).unwrap();
        r.define_property("x", PropertyDescriptor::with_value(Value::number(1)))
            .unwrap();
        let desc = r.get_own_property("x").unwrap();
        assert!(desc.is_data());
        assert_eq!(desc.writable, Some(false));
        assert_eq!(desc.enumerable, Some(true));
    }

    #[test]
    fn non_configurable_rejects_loosening() {
        let r = Record::new();
        r.define_property(
            "x",
            PropertyDescriptor::data(Value::number(1), false, true, false),
        )
        .unwrap();
        assert!(r
            .define_property("x", PropertyDescriptor::default().configurable(true))
            .is_err());
        assert!(r
            .define_property("x", PropertyDescriptor::default().enumerable(false))
            .is_err());
        assert!(r
            .define_property("x", PropertyDescriptor::default().writable(true))
            .is_err());
        assert!(r
            .define_property("x", PropertyDescriptor::with_value(Value::number(2)))
            .is_err());
        assert!(r
            .define_property("x", PropertyDescriptor::with_getter(constant(0)))
            .is_err());
        // same value is a no-op, not an error
        r.define_property("x", PropertyDescriptor::with_value(Value::number(1)))
            .unwrap();
    }

    #[test]
    fn non_configurable_writable_value_may_change() {
        let r = Record::new();
        r.define_property(
            "x",
            PropertyDescriptor::data(Value::number(1), true, true, false),
        )
        .unwrap();
        r.define_property("x", PropertyDescriptor::with_value(Value::number(5)))
            .unwrap();
        r.define_property("x", PropertyDescriptor::default().writable(false))
            .unwrap();
        assert_eq!(r.get("x").unwrap(), Value::number(5));
    }

    #[test]
    fn define_properties_in_order() {
        let r = Record::new();
        r.define_properties([
            (
                "x",
                PropertyDescriptor::data(Value::number(1), true, false, true),
            ),
            (
                "y",
                PropertyDescriptor::data(Value::number(1), true, false, true),
            ),
        ])
        .unwrap();
        assert_eq!(r.own_keys(), vec!["x", "y"]);
        assert!(r.own_enumerable_keys().is_empty());
    }
}

mod deletion_and_locking {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn delete_removes_own_keys_only() {
        let parent = Record::from_entries([("x", 1)]);
        let heir = Record::with_parent(parent);
        heir.set("y", 2).unwrap();
        assert!(heir.delete("y").unwrap());
        assert!(!heir.delete("x").unwrap());
        assert_eq!(heir.get("x").unwrap(), Value::number(1));
    }

    #[test]
    fn delete_keeps_remaining_order() {
        let r = Record::from_entries([("a", 1), ("b", 2), ("c", 3)]);
        r.delete("b").unwrap();
        assert_eq!(r.own_keys(), vec!["a", "c"]);
    }

    #[test]
    fn non_configurable_cannot_be_deleted() {
        let r = Record::new();
        r.define_property("x", PropertyDescriptor::with_value(Value::number(1)))
            .unwrap();
        assert!(matches!(
            r.delete("x").unwrap_err(),
            EvalError::NotConfigurable { .. }
        ));
    }

    #[test]
    fn prevent_extensions_blocks_new_keys() {
        let r = Record::from_entries([("x", 1)]);
        r.prevent_extensions();
        assert!(!r.is_extensible());
        r.set("x", 2).unwrap();
        assert!(matches!(
            r.set("y", 1).unwrap_err(),
            EvalError::NotExtensible { .. }
        ));
    }

    #[test]
    fn seal_and_freeze() {
        let r = Record::from_entries([("x", 1)]);
        r.seal();
        assert!(r.is_sealed());
        assert!(!r.is_frozen());
        r.set("x", 2).unwrap();
        assert!(r.delete("x").is_err());

        r.freeze();
        assert!(r.is_frozen());
        assert!(r.set("x", 3).is_err());
        assert_eq!(r.get("x").unwrap(), Value::number(2));
    }

    #[test]
    fn inherited_read_only_blocks_shadowing() {
        let parent = Record::from_entries([("x", 1)]);
        parent.freeze();
        let heir = Record::with_parent(parent);
        assert!(matches!(
            heir.set("x", 2).unwrap_err(),
            EvalError::ReadOnly { .. }
        ));
    }
}

mod enumeration {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn enumerable_keys_include_inherited_once() {
        let parent = Record::from_entries([("a", 1), ("b", 2)]);
        let heir = Record::with_parent(parent);
        heir.set("c", 3).unwrap();
        heir.set("a", 10).unwrap();
        assert_eq!(heir.enumerable_keys(), vec!["c", "a", "b"]);
        assert_eq!(heir.own_enumerable_keys(), vec!["c", "a"]);
    }

    #[test]
    fn non_enumerable_shadow_hides_inherited_key() {
        let parent = Record::from_entries([("a", 1)]);
        let heir = Record::with_parent(parent);
        heir.define_property(
            "a",
            PropertyDescriptor::data(Value::number(2), true, false, true),
        )
        .unwrap();
        assert!(heir.enumerable_keys().is_empty());
    }
}

#[test]
fn call_method_passes_record_as_receiver() {
    let r = Record::from_entries([("from", 1), ("to", 3)]);
    let includes = Function::new("includes", 1, |this, args| {
        let x = args.first().map_or(f64::NAN, Value::to_number);
        let from = this.get("from")?.to_number();
        let to = this.get("to")?.to_number();
        Ok(Value::Bool(from <= x && x <= to))
    });
    r.set("includes", includes).unwrap();
    assert_eq!(
        r.call_method("includes", &[Value::number(2)]).unwrap(),
        Value::Bool(true)
    );
    assert!(matches!(
        r.call_method("from", &[]).unwrap_err(),
        EvalError::NotCallable { .. }
    ));
}

#[test]
fn debug_lists_keys() {
    let r = Record::from_entries([("a", 1)]);
    let rendered = format!("{r:?}");
    assert!(rendered.contains("\"a\""), "{rendered}");
}
