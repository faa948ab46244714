use super::*;
use pretty_assertions::assert_eq;
use proto_value::EvalError;
use rand::SeedableRng;

#[test]
fn polar_radius_reads_and_rescales() {
    let p = polar_point(3.0, 4.0).unwrap();
    assert_eq!(p.get("r").unwrap(), Value::number(5));
    p.set("r", 10).unwrap();
    assert_eq!(p.get("x").unwrap(), Value::number(6));
    assert_eq!(p.get("y").unwrap(), Value::number(8));
}

#[test]
fn theta_is_read_only() {
    let p = polar_point(1.0, 0.0).unwrap();
    assert_eq!(p.get("theta").unwrap(), Value::number(0));
    assert!(matches!(
        p.set("theta", 1).unwrap_err(),
        EvalError::NoSetter { .. }
    ));
}

#[test]
fn heir_uses_inherited_accessors_on_own_coordinates() {
    let p = polar_point(1.0, 1.0).unwrap();
    let q = inherit(&Value::Record(p.clone())).unwrap();
    q.set("x", 0).unwrap();
    q.set("y", 0).unwrap();
    assert_eq!(q.get("r").unwrap(), Value::number(0));
    assert_eq!(q.get("theta").unwrap(), Value::number(0));
    assert!(!q.has_own("r"));
    assert_eq!(p.get("x").unwrap(), Value::number(1));
}

#[test]
fn serial_numbers_increase_from_zero() {
    let serial = serial_number().unwrap();
    for expected in 0..5 {
        assert_eq!(serial.get("next").unwrap(), Value::number(expected));
    }
}

#[test]
fn serial_rejects_decrease_and_keeps_counter() {
    let serial = serial_number().unwrap();
    serial.get("next").unwrap();
    serial.get("next").unwrap();

    let err = serial.set("next", 1).unwrap_err();
    assert_eq!(
        err,
        EvalError::Thrown("serial number can only be set to a larger value".into())
    );
    assert_eq!(serial.get("next").unwrap(), Value::number(2));

    serial.set("next", 100).unwrap();
    assert_eq!(serial.get("next").unwrap(), Value::number(100));
    // Equal is allowed.
    serial.set("next", 101).unwrap();
    assert_eq!(serial.get("next").unwrap(), Value::number(101));
}

#[test]
fn random_values_stay_in_range() {
    let rng = Rc::new(RefCell::new(StdRng::seed_from_u64(42)));
    let random = random_source(rng).unwrap();
    for _ in 0..200 {
        let octet = random.get("octet").unwrap().to_number();
        assert!((0.0..256.0).contains(&octet) && octet.fract() == 0.0);
        let uint16 = random.get("uint16").unwrap().to_number();
        assert!((0.0..65_536.0).contains(&uint16));
        let int16 = random.get("int16").unwrap().to_number();
        assert!((-32_768.0..32_768.0).contains(&int16));
    }
}

#[test]
fn same_seed_same_output() {
    let first = DemoContext::buffered(7);
    let second = DemoContext::buffered(7);
    random(&first).unwrap();
    random(&second).unwrap();
    assert_eq!(first.lines(), second.lines());
    assert_eq!(first.lines().len(), 3);
}

#[test]
fn polar_demo_output() {
    let ctx = DemoContext::buffered(0);
    polar(&ctx).unwrap();
    let lines = ctx.lines();
    assert_eq!(lines[2], "q.r = 5");
    assert_eq!(lines[4..7].to_vec(), vec!["q.x = 6", "q.y = 8", "p.x = 1"]);
    assert!(lines[7].starts_with("p.theta = 0 rejected:"));
}

#[test]
fn serial_demo_output() {
    let ctx = DemoContext::buffered(0);
    serial(&ctx).unwrap();
    assert_eq!(
        ctx.lines(),
        vec![
            "serial.next = 0",
            "serial.next = 1",
            "serial.next = 2",
            "serial.next = 10",
            "serial.next = 5 rejected: serial number can only be set to a larger value",
            "serial.next = 11",
        ]
    );
}
