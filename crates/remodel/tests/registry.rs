//! Converter registration, configuration and concurrent use of one context.

use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;
use remodel::convert::simple::{StrToI32, StrToI64};
use remodel::{
    BaseType, ClassDesc, ClassType, ContextConfig, ConversionContext, ConvertError, Instance, MethodDesc,
    ModelConverter, TypeConverter, TypeDescriptor, Value,
};

// ─── Helpers ─────────────────────────────────────────────────────────────────

struct Upper;

impl TypeConverter for Upper {
    fn can_convert(&self, from: &BaseType, to: &BaseType) -> bool {
        *from == BaseType::Str && *to == BaseType::Str
    }

    fn convert(&self, value: Value, _: &TypeDescriptor, _: &ConversionContext) -> Result<Value, ConvertError> {
        Ok(value.as_str().map_or(Value::Null, |s| Value::str(s.to_uppercase())))
    }
}

struct Halve;

impl TypeConverter for Halve {
    fn can_convert(&self, from: &BaseType, to: &BaseType) -> bool {
        from.is_numeric() && *to == BaseType::I32
    }

    fn convert(&self, value: Value, _: &TypeDescriptor, _: &ConversionContext) -> Result<Value, ConvertError> {
        Ok(match value {
            Value::I64(n) => Value::I32((n / 2) as i32),
            Value::I32(n) => Value::I32(n / 2),
            _ => Value::Null,
        })
    }
}

fn i32_target() -> TypeDescriptor { TypeDescriptor::of(BaseType::I32) }

fn position(ctx: &ConversionContext, name: &str) -> Option<usize> {
    ctx.converter_names().iter().position(|n| *n == name)
}

// ─── Registration ────────────────────────────────────────────────────────────

#[test]
fn builtins_are_registered_by_default() {
    let ctx = ConversionContext::new();
    assert_eq!(ctx.converter_names().first(), Some(&"ObjectToStr"));
    assert!(position(&ctx, "StrToEnum").is_some());
    assert_eq!(ctx.convert("42".into(), &i32_target()), Ok(Value::I32(42)));
}

#[test]
fn duplicate_registration_is_ignored() {
    let ctx = ConversionContext::new();
    let before = ctx.converter_names().len();
    assert!(!ctx.register_converter(StrToI32));
    assert!(ctx.register_converter(Halve));
    assert!(!ctx.register_converter(Halve));
    assert_eq!(ctx.converter_names().len(), before + 1);
}

#[test]
fn positional_registration() {
    let ctx = ConversionContext::new();
    assert!(ctx.register_converter_before::<StrToI64, _>(Halve));
    assert_eq!(position(&ctx, "Halve").map(|p| p + 1), position(&ctx, "StrToI64"));

    assert!(ctx.register_converter_after::<StrToI64, _>(Upper));
    assert_eq!(position(&ctx, "StrToI64").map(|p| p + 1), position(&ctx, "Upper"));
}

#[test]
fn positional_registration_with_missing_marker_appends() {
    let ctx = ConversionContext::with_config(ContextConfig { builtin_converters: false, ..ContextConfig::default() });
    assert!(ctx.register_converter(Upper));
    assert!(ctx.register_converter_before::<StrToI32, _>(Halve));
    assert_eq!(ctx.converter_names(), vec!["Upper", "Halve"]);
}

#[test]
fn user_converter_wins_wherever_it_sits() {
    let ctx = ConversionContext::new();
    assert!(ctx.register_converter(Halve));
    assert_eq!(ctx.convert(Value::I64(9), &i32_target()), Ok(Value::I32(4)));

    let first = ConversionContext::new();
    assert!(first.register_converter_first(Halve));
    assert_eq!(first.convert(Value::I64(9), &i32_target()), Ok(Value::I32(4)));
}

#[test]
fn identity_beats_user_converter() {
    let ctx = ConversionContext::new();
    assert!(ctx.register_converter(Upper));
    assert_eq!(ctx.convert("quiet".into(), &TypeDescriptor::of(BaseType::Str)), Ok(Value::str("quiet")));
}

// ─── Configuration ───────────────────────────────────────────────────────────

#[test]
fn disabled_builtin_is_skipped() {
    let cfg = ContextConfig::parse("disabled_converters = [\"StrToI32\"]");
    let ctx = ConversionContext::with_config(cfg.unwrap_or_default());
    assert_eq!(position(&ctx, "StrToI32"), None);
    assert!(matches!(
        ctx.convert("42".into(), &i32_target()),
        Err(ConvertError::ConversionImpossible { .. })
    ));
    assert!(!ctx.can_convert(&BaseType::Str, &i32_target()));
}

#[test]
fn without_builtins_only_identity_and_objects_resolve() {
    let cfg = ContextConfig::parse("builtin_converters = false");
    let ctx = ConversionContext::with_config(cfg.unwrap_or_default());
    assert!(ctx.converter_names().is_empty());
    assert_eq!(ctx.convert("x".into(), &TypeDescriptor::of(BaseType::Str)), Ok(Value::str("x")));
    assert!(!ctx.can_convert(&BaseType::Str, &i32_target()));
    let a = ClassType::new("A");
    let b = ClassType::new("B");
    assert!(ctx.can_convert(&BaseType::Class(a), &TypeDescriptor::class(&b)));
}

#[test]
fn custom_prefixes_drive_name_matching() {
    let cfg = ContextConfig::parse("reader_prefix = \"fetch\"\nwriter_prefix = \"put\"");
    let ctx = ConversionContext::with_config(cfg.unwrap_or_default());
    let source = ClassType::new("Source");
    let target = ClassType::new("Target");
    ctx.register_class(ClassDesc::new(source.clone()).method(MethodDesc::reader("fetchName", BaseType::Str, |i| Ok(i.get("name")))));
    ctx.register_class(ClassDesc::new(target.clone()).method(MethodDesc::writer("putName", BaseType::Str, |i, v| { i.set("name", v); Ok(()) })));

    let out = ctx.convert(Value::object(Instance::new(source).with("name", "Ann")), &TypeDescriptor::class(&target));
    let Ok(Value::Object(out)) = out else { panic!("expected an object") };
    assert_eq!(out.get("name"), Value::str("Ann"));
}

// ─── Concurrency ─────────────────────────────────────────────────────────────

#[test]
fn conversions_and_registrations_run_concurrently() {
    let c = ModelConverter::new();
    let source = ClassType::new("Source");
    let target = ClassType::new("Target");
    c.context().register_class(ClassDesc::new(source.clone()).method(MethodDesc::reader("getAge", BaseType::Str, |i| Ok(i.get("age")))));
    c.context().register_class(ClassDesc::new(target.clone()).method(MethodDesc::writer("setAge", BaseType::I32, |i, v| { i.set("age", v); Ok(()) })));
    let to = TypeDescriptor::class(&target);

    let results: Vec<Value> = thread::scope(|s| {
        let workers: Vec<_> = (0..4)
            .map(|n| {
                let (c, source, to) = (c.clone(), source.clone(), to.clone());
                s.spawn(move || {
                    let donor = Value::object(Instance::new(source).with("age", n.to_string()));
                    c.convert(donor, &to).map_or(Value::Null, |v| v.as_object().map_or(Value::Null, |o| o.get("age")))
                })
            })
            .collect();
        let registrar = Arc::clone(c.context());
        s.spawn(move || registrar.register_converter(Upper));
        workers.into_iter().map(|w| w.join().unwrap_or(Value::Null)).collect()
    });

    assert_eq!(results, (0..4).map(Value::I32).collect::<Vec<_>>());
}
