use super::*;
use pretty_assertions::assert_eq;

fn runtime() -> Runtime {
    Runtime::new(RuntimeConfig::default().with_load_path("lib"))
}

#[test]
fn test_load_path_aliases_share_state() {
    let rt = runtime();
    let load_path = rt.intern("$LOAD_PATH");
    let colon = rt.intern("$:");

    rt.add_load_path("vendor");

    let expected = Value::list(vec![Value::string("lib"), Value::string("vendor")]);
    assert_eq!(rt.global_get(load_path), Some(expected.clone()));
    assert_eq!(rt.global_get(colon), Some(expected));
}

#[test]
fn test_load_path_is_read_only() {
    let rt = runtime();
    let colon = rt.intern("$:");
    let version = rt.globals().current_version();

    let err = rt.global_set(colon, Value::Nil).err();

    assert_eq!(err, Some(StoreError::ReadOnlyBinding { name: colon }));
    assert_eq!(
        err.map(|e| rt.describe_error(&e)).as_deref(),
        Some("$: is a read-only variable")
    );
    assert_eq!(rt.globals().current_version(), version);
}

#[test]
fn test_loaded_features() {
    let rt = runtime();
    let quote = rt.intern("$\"");

    assert_eq!(rt.global_get(quote), Some(Value::list(Vec::new())));
    rt.add_loaded_feature("set.rb");
    assert_eq!(
        rt.global_get(quote),
        Some(Value::list(vec![Value::string("set.rb")]))
    );
}

#[test]
fn test_pid_global() {
    let rt = runtime();
    let pid = rt.intern("$$");
    assert_eq!(
        rt.global_get(pid),
        Some(Value::int(i64::from(std::process::id())))
    );
}

#[test]
fn test_program_name_is_writable() {
    let rt = runtime();
    let zero = rt.intern("$0");
    let long = rt.intern("$PROGRAM_NAME");

    assert_eq!(rt.global_get(zero), Some(Value::string("cinder")));
    assert!(rt.global_set(zero, Value::string("server.rb")).is_ok());
    assert_eq!(rt.global_get(long), Some(Value::string("server.rb")));
}

#[test]
fn test_program_name_rejects_non_string() {
    let rt = runtime();
    let zero = rt.intern("$0");

    let err = rt.global_set(zero, Value::int(42)).err();

    assert_eq!(
        err.map(|e| rt.describe_error(&e)).as_deref(),
        Some("value of $0 must be String (got Integer)")
    );
    assert_eq!(rt.global_get(zero), Some(Value::string("cinder")));
}

#[test]
fn test_plain_globals() {
    let rt = runtime();
    let debug = rt.intern("$DEBUG");

    assert_eq!(rt.global_get(debug), None);
    assert!(rt.global_set(debug, Value::from(true)).is_ok());
    assert_eq!(rt.global_get(debug), Some(Value::from(true)));
    assert!(rt.global_delete(debug));
    assert_eq!(rt.global_get(debug), None);
}

#[test]
fn test_without_builtin_globals() {
    let rt = Runtime::new(RuntimeConfig::default().without_builtin_globals());
    assert!(rt.globals().is_empty());
    assert_eq!(rt.global_get(rt.intern("$:")), None);
}

#[test]
fn test_custom_virtual_global_reads_runtime() {
    let mut rt = runtime();
    rt.define_virtual(
        "$MODULE_COUNT",
        VirtualCell::read_only(|rt: &Runtime| {
            Value::int(i64::try_from(rt.modules().len()).unwrap_or(i64::MAX))
        }),
    );
    let count = rt.intern("$MODULE_COUNT");

    assert_eq!(rt.global_get(count), Some(Value::int(0)));
    rt.define_class("Object", None);
    assert_eq!(rt.global_get(count), Some(Value::int(1)));
}

#[test]
fn test_class_variables_through_runtime() {
    let mut rt = runtime();
    let a = rt.define_class("A", None);
    let b = rt.define_class("B", Some(a));
    let c = rt.define_class("C", None);
    let v = rt.intern("@@v");

    rt.class_var_set(b, v, Value::int(1));
    rt.class_var_set(a, v, Value::int(2));
    rt.class_var_set(c, v, Value::int(9));

    assert_eq!(rt.class_var_get(b, v), Some(Value::int(2)));
    assert_eq!(rt.class_var_get(c, v), Some(Value::int(9)));
    assert_eq!(
        rt.class_var_resolve(b, v),
        ClassVarLookup::Visible {
            owner: a,
            value: Value::int(2)
        }
    );
    assert_eq!(rt.class_var_names(b), vec![v]);
    assert!(rt.class_var_defined(b, v));
    assert_eq!(rt.class_var_remove(a, v), Some(Value::int(2)));
    assert!(!rt.class_var_defined(b, v));
    assert_eq!(rt.class_vars().len(), 1);
}

#[test]
fn test_included_module_class_variable() {
    let mut rt = runtime();
    let config = rt.define_module("Configurable");
    let app = rt.define_class("App", None);
    let level = rt.intern("@@level");

    rt.class_var_set(config, level, Value::int(1));
    assert_eq!(rt.class_var_get(app, level), None);

    assert!(rt.include_module(app, config));
    assert_eq!(rt.class_var_get(app, level), Some(Value::int(1)));
}

#[test]
fn test_sidecar_lifecycle() {
    let mut rt = runtime();
    let frozen = rt.intern("frozen");
    let obj = rt.alloc_object(Value::string("text"));
    let twin = rt.alloc_object(Value::string("text"));

    assert_eq!(rt.objects().len(), 2);
    rt.sidecar_set(frozen, obj, Value::from(true));
    assert_eq!(rt.sidecar_get(frozen, twin, Value::from(false)), Value::from(false));
    assert_eq!(rt.sidecar_get(frozen, obj, Value::from(false)), Value::from(true));

    assert_eq!(rt.object_reclaimed(obj), 1);
    assert_eq!(rt.sidecar_get(frozen, obj, Value::from(false)), Value::from(false));
}

#[test]
fn test_runtimes_share_interner_not_state() {
    let first = runtime();
    let second = Runtime::with_interner(RuntimeConfig::default(), first.interner().clone());
    let flag = first.intern("$flag");

    assert_eq!(second.intern("$flag"), flag);
    assert!(first.global_set(flag, Value::int(1)).is_ok());
    assert_eq!(second.global_get(flag), None);
    assert_eq!(second.config().program_name, "cinder");
}
