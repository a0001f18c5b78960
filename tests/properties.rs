use proptest::prelude::*;
use serde_json::{json, Value};
use simple_mcp_server::engine::Dispatcher;
use simple_mcp_server::engine_core::models::{InvocationRequest, InvocationResult};
use simple_mcp_server::utils::number::format_number;

fn invoke(name: &str, args: Value) -> InvocationResult {
    Dispatcher::invoke(&InvocationRequest::from_value(name, args))
}

proptest! {
    #[test]
    fn test_unknown_tool_names(name in "\\PC*") {
        prop_assume!(!["hello", "time", "calculator"].contains(&name.as_str()));
        let res = invoke(&name, json!({}));
        prop_assert!(res.is_error);
        prop_assert_eq!(res.text, format!("Unknown tool: {}", name));
    }

    #[test]
    fn test_hello_is_idempotent(name in "\\PC*") {
        let first = invoke("hello", json!({"name": name}));
        let second = invoke("hello", json!({"name": name}));
        prop_assert!(!first.is_error);
        prop_assert!(!first.text.is_empty());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_integer_addition(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
        let res = invoke("calculator", json!({"operation": "add", "a": a, "b": b}));
        prop_assert!(!res.is_error);
        prop_assert_eq!(res.text, format!("Result: {} + {} = {}", a, b, a + b));
    }

    #[test]
    fn test_sqrt_of_non_negative_succeeds(a in 0.0f64..1e12) {
        let res = invoke("calculator", json!({"operation": "sqrt", "a": a}));
        prop_assert!(!res.is_error);
        prop_assert!(res.text.starts_with("Result: √"));
    }

    #[test]
    fn test_sqrt_of_negative_fails(a in -1e12f64..-1e-9) {
        let res = invoke("calculator", json!({"operation": "sqrt", "a": a}));
        prop_assert!(res.is_error);
        prop_assert_eq!(res.text, "Cannot calculate square root of negative number");
    }

    #[test]
    fn test_division_by_non_zero(a in -1e6f64..1e6, b in 1e-3f64..1e6) {
        let res = invoke("calculator", json!({"operation": "divide", "a": a, "b": b}));
        prop_assert!(!res.is_error);
        prop_assert!(res.text.ends_with(&format_number(a / b)));
    }

    #[test]
    fn test_arbitrary_arguments_never_escape(args in arbitrary_json()) {
        for name in ["hello", "time", "calculator"] {
            let res = invoke(name, args.clone());
            prop_assert!(!res.text.is_empty());
        }
    }
}

fn arbitrary_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-z]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop::collection::hash_map(
            prop_oneof![
                Just("name".to_string()),
                Just("format".to_string()),
                Just("timezone".to_string()),
                Just("operation".to_string()),
                Just("a".to_string()),
                Just("b".to_string()),
            ],
            inner,
            0..6,
        )
        .prop_map(|m| Value::Object(m.into_iter().collect()))
    })
}
