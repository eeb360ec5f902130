//! Cross-adapter tests
//!
//! Both adapters bind the same native traits and must be indistinguishable
//! from the host side: same symbols, same arities, same results, same errors.

use proptest::prelude::*;
use test_project_pywrap::adapters::{LIGHTWEIGHT_MODULE, REFLECTIVE_MODULE};
use test_project_pywrap::{
    AdapterKind, CallError, InitStrategy, LightweightAdapter, MathApi, ModuleDef,
    ModuleRegistry, ReflectiveAdapter, StringUtilsApi, Value,
};

use std::sync::Arc;

fn both() -> (Arc<ModuleDef>, Arc<ModuleDef>) {
    let mut registry = ModuleRegistry::new(InitStrategy::Modern);
    let light = registry.import(&LightweightAdapter::new()).unwrap();
    let reflective = registry.import(&ReflectiveAdapter::new()).unwrap();
    (light, reflective)
}

type Outcome = Result<Value, CallError>;

fn call_both(class: &str, method: &str, args: &[Value]) -> (Outcome, Outcome) {
    let (light, reflective) = both();
    let a = light.instantiate(class).unwrap().call(method, args);
    let b = reflective.instantiate(class).unwrap().call(method, args);
    (a, b)
}

#[test]
fn test_default_module_names() {
    let (light, reflective) = both();
    assert_eq!(light.name(), LIGHTWEIGHT_MODULE);
    assert_eq!(reflective.name(), REFLECTIVE_MODULE);
    assert_eq!(AdapterKind::Lightweight.module_name(), "test_project_pywrap");
    assert_eq!(AdapterKind::Reflective.module_name(), "test_project_pywrap_bp");
}

#[test]
fn test_structural_parity() {
    let (light, reflective) = both();
    let a = light.manifest();
    let b = reflective.manifest();
    assert_eq!(a.classes, b.classes);

    let names: Vec<&str> = light.symbols().collect();
    assert_eq!(names, vec!["Math", "StringUtils"]);
    for class in &a.classes {
        assert!(class.constructible, "{} must be default-constructible", class.name);
    }
}

#[test]
fn test_concrete_scenarios_through_both_adapters() {
    let cases: Vec<(&str, &str, Vec<Value>, Value)> = vec![
        ("Math", "add", vec![Value::Int(2), Value::Int(3)], Value::Int(5)),
        ("Math", "multiply", vec![Value::Int(2), Value::Int(3)], Value::Int(6)),
        ("StringUtils", "brackets", vec![Value::from("text")], Value::from("[text]")),
        ("StringUtils", "brackets", vec![Value::from("")], Value::from("[]")),
        ("StringUtils", "reverse", vec![Value::from("abc")], Value::from("cba")),
        ("StringUtils", "reverse", vec![Value::from("")], Value::from("")),
    ];

    for (class, method, args, expected) in cases {
        let (a, b) = call_both(class, method, &args);
        assert_eq!(a, Ok(expected.clone()), "lightweight {}.{}", class, method);
        assert_eq!(b, Ok(expected), "reflective {}.{}", class, method);
    }
}

#[test]
fn test_errors_match_across_adapters() {
    let bad_calls: Vec<(&str, &str, Vec<Value>)> = vec![
        ("Math", "add", vec![Value::Int(1)]),
        ("Math", "add", vec![Value::from("1"), Value::Int(2)]),
        ("Math", "multiply", vec![Value::Int(i64::MAX), Value::Int(2)]),
        ("Math", "divide", vec![Value::Int(1), Value::Int(2)]),
        ("StringUtils", "reverse", vec![Value::None]),
        ("StringUtils", "brackets", vec![]),
    ];

    for (class, method, args) in bad_calls {
        let (a, b) = call_both(class, method, &args);
        assert!(a.is_err(), "{}.{} should fail", class, method);
        assert_eq!(a, b, "{}.{} diverged", class, method);
    }
}

#[test]
fn test_bool_arguments_count_as_ints() {
    let (a, b) = call_both("Math", "add", &[Value::Bool(true), Value::Int(1)]);
    assert_eq!(a, Ok(Value::Int(2)));
    assert_eq!(a, b);
}

/// A native implementation other than the bundled one, to show the adapters
/// bind the traits rather than the concrete types.
#[derive(Default)]
struct Saturating;

impl MathApi for Saturating {
    fn add(&self, a: i32, b: i32) -> i32 {
        a.saturating_add(b)
    }

    fn multiply(&self, a: i32, b: i32) -> i32 {
        a.saturating_mul(b)
    }
}

#[derive(Default)]
struct Shouting;

impl StringUtilsApi for Shouting {
    fn brackets(&self, text: &str) -> String {
        format!("[{}]", text.to_uppercase())
    }

    fn reverse(&self, text: &str) -> String {
        text.chars().rev().collect::<String>().to_uppercase()
    }
}

#[test]
fn test_adapters_bind_any_native_implementation() {
    let mut registry = ModuleRegistry::new(InitStrategy::Modern);
    let light = registry
        .import_as("light", &LightweightAdapter::<Saturating, Shouting>::default())
        .unwrap();
    let reflective = registry
        .import_as("reflective", &ReflectiveAdapter::<Saturating, Shouting>::default())
        .unwrap();

    for module in [&light, &reflective] {
        let math = module.instantiate("Math").unwrap();
        assert_eq!(
            math.call("add", &[Value::Int(i64::from(i32::MAX)), Value::Int(1)]),
            Ok(Value::Int(i64::from(i32::MAX)))
        );
        let utils = module.instantiate("StringUtils").unwrap();
        assert_eq!(utils.call("brackets", &[Value::from("ab")]), Ok(Value::from("[AB]")));
    }
}

proptest! {
    #[test]
    fn prop_math_equivalence(a in any::<i32>(), b in any::<i32>()) {
        for method in ["add", "multiply"] {
            let args = [Value::from(a), Value::from(b)];
            let (x, y) = call_both("Math", method, &args);
            prop_assert!(x.is_ok());
            prop_assert_eq!(x, y);
        }
    }

    #[test]
    fn prop_string_equivalence(s in ".*") {
        for method in ["brackets", "reverse"] {
            let args = [Value::from(s.as_str())];
            let (x, y) = call_both("StringUtils", method, &args);
            prop_assert!(x.is_ok());
            prop_assert_eq!(x, y);
        }
    }

    #[test]
    fn prop_out_of_range_ints_rejected_identically(a in any::<i64>()) {
        let args = [Value::Int(a), Value::Int(0)];
        let (x, y) = call_both("Math", "add", &args);
        prop_assert_eq!(x.is_ok(), i32::try_from(a).is_ok());
        prop_assert_eq!(x, y);
    }
}
