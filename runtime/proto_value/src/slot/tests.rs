use super::*;

#[test]
fn default_flags_are_all_set() {
    let slot = Slot::data(Value::number(1));
    assert!(slot.is_enumerable());
    assert!(slot.is_configurable());
    assert!(slot.flags().contains(PropertyFlags::WRITABLE));
}

#[test]
fn accessor_slot_never_writable() {
    let slot = Slot::accessor(None, None);
    assert!(slot.is_accessor());
    assert!(!slot.flags().contains(PropertyFlags::WRITABLE));
}

#[test]
fn data_descriptor_round_trips_attributes() {
    let slot = Slot::Data {
        value: Value::number(1),
        flags: PropertyFlags::ENUMERABLE,
    };
    let desc = slot.to_descriptor();
    assert_eq!(desc.value, Some(Value::number(1)));
    assert_eq!(desc.writable, Some(false));
    assert_eq!(desc.enumerable, Some(true));
    assert_eq!(desc.configurable, Some(false));
    assert!(desc.get.is_none());
}

#[test]
fn new_slot_fills_missing_attributes_with_false() {
    let slot = PropertyDescriptor::with_value(Value::number(3)).into_new_slot();
    assert_eq!(slot.flags(), PropertyFlags::empty());
    match slot {
        Slot::Data { value, .. } => assert_eq!(value, Value::number(3)),
        Slot::Accessor { .. } => panic!("expected data slot"),
    }
}

#[test]
fn generic_descriptor_becomes_undefined_data() {
    let slot = PropertyDescriptor::default().enumerable(true).into_new_slot();
    match slot {
        Slot::Data { value, flags } => {
            assert_eq!(value, Value::Undefined);
            assert_eq!(flags, PropertyFlags::ENUMERABLE);
        }
        Slot::Accessor { .. } => panic!("expected data slot"),
    }
}

#[test]
fn mixed_descriptor_is_rejected() {
    let getter = Function::lambda(0, |_| Ok(Value::number(0)));
    let mut desc = PropertyDescriptor::with_getter(getter);
    desc.value = Some(Value::number(1));
    assert!(matches!(
        desc.validate(),
        Err(crate::EvalError::InvalidArgument { .. })
    ));
}

#[test]
fn descriptor_kinds() {
    assert!(PropertyDescriptor::with_value(Value::Null).is_data());
    assert!(PropertyDescriptor::accessor(None, None, true, true).is_accessor());
    assert!(PropertyDescriptor::default().writable(false).is_data());
    assert!(PropertyDescriptor::default().configurable(true).is_generic());
}
