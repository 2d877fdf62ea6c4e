//! Custom reader → writer mappings registered on the context.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use remodel::{
    BaseType, ClassDesc, ClassType, ConversionContext, ConvertError, Instance, MethodDesc, ModelConverter,
    TypeDescriptor, Value,
};

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn source() -> ClassType { ClassType::new("Source") }
fn base() -> ClassType { ClassType::new("Base") }
fn sub() -> ClassType { ClassType::new("Sub").extending(&base()) }

fn context() -> ConversionContext {
    let ctx = ConversionContext::new();
    ctx.register_class(
        ClassDesc::new(source())
            .method(MethodDesc::reader("getName", BaseType::Str, |i| Ok(i.get("name"))))
            .method(MethodDesc::reader("getCount", BaseType::Str, |i| Ok(i.get("count"))))
            .method(MethodDesc::opaque("getPart", vec![BaseType::I32.into()], Some(BaseType::Str.into())))
            .method(MethodDesc::opaque("reset", vec![], None)),
    );
    ctx.register_class(
        ClassDesc::new(base())
            .method(MethodDesc::writer("setLabel", BaseType::Str, |i, v| { i.set("label", v); Ok(()) }))
            .method(MethodDesc::writer("setTotal", BaseType::I64, |i, v| { i.set("total", v); Ok(()) }))
            .method(MethodDesc::opaque("setPair", vec![BaseType::Str.into(), BaseType::Str.into()], None)),
    );
    ctx.register_class(
        ClassDesc::new(sub())
            .method(MethodDesc::writer("setTitle", BaseType::Str, |i, v| { i.set("title", v); Ok(()) })),
    );
    ctx
}

fn donor() -> Value {
    Value::object(Instance::new(source()).with("name", "Ann").with("count", "12"))
}

fn convert(ctx: ConversionContext, to: &ClassType) -> Instance {
    let c = ModelConverter::with_context(Arc::new(ctx));
    match c.convert(donor(), &TypeDescriptor::class(to)) {
        Ok(Value::Object(o)) => o.lock().clone(),
        other => panic!("expected an object, got {other:?}"),
    }
}

// ─── Overrides ───────────────────────────────────────────────────────────────

#[test]
fn unmapped_names_are_not_copied() {
    let out = convert(context(), &base());
    assert_eq!(out.slot_count(), 0);
}

#[test]
fn mapping_routes_reader_to_writer() {
    let ctx = context();
    assert_eq!(ctx.register_mapping_by_name(&source(), "getName", &base(), "setLabel"), Ok(()));
    let out = convert(ctx, &base());
    assert_eq!(out.get("label"), Value::str("Ann"));
}

#[test]
fn mapped_writer_still_converts() {
    let ctx = context();
    assert_eq!(ctx.register_mapping_by_name(&source(), "getCount", &base(), "setTotal"), Ok(()));
    let out = convert(ctx, &base());
    assert_eq!(out.get("total"), Value::I64(12));
}

#[test]
fn mapping_applies_to_exact_acceptor_only() {
    let ctx = context();
    assert_eq!(ctx.register_mapping_by_name(&source(), "getName", &base(), "setLabel"), Ok(()));
    let out = convert(ctx, &sub());
    assert!(out.slot("label").is_none());
}

#[test]
fn hierarchy_mappings_are_order_independent() {
    let register_base = |ctx: &ConversionContext| ctx.register_mapping_by_name(&source(), "getName", &base(), "setLabel");
    let register_sub = |ctx: &ConversionContext| ctx.register_mapping_by_name(&source(), "getName", &sub(), "setTitle");

    let base_first = context();
    assert_eq!(register_base(&base_first), Ok(()));
    assert_eq!(register_sub(&base_first), Ok(()));

    let sub_first = context();
    assert_eq!(register_sub(&sub_first), Ok(()));
    assert_eq!(register_base(&sub_first), Ok(()));

    for ctx in [base_first, sub_first] {
        let ctx = Arc::new(ctx);
        let c = ModelConverter::with_context(ctx.clone());
        let to_base = c.convert(donor(), &TypeDescriptor::class(&base()));
        let to_sub = c.convert(donor(), &TypeDescriptor::class(&sub()));
        let (Ok(Value::Object(b)), Ok(Value::Object(s))) = (to_base, to_sub) else {
            panic!("expected objects");
        };
        assert_eq!(b.get("label"), Value::str("Ann"));
        assert!(b.lock().slot("title").is_none());
        assert_eq!(s.get("title"), Value::str("Ann"));
        assert!(s.lock().slot("label").is_none());
    }
}

#[test]
fn later_mapping_replaces_earlier() {
    let ctx = context();
    assert_eq!(ctx.register_mapping_by_name(&source(), "getName", &sub(), "setLabel"), Ok(()));
    assert_eq!(ctx.register_mapping_by_name(&source(), "getName", &sub(), "setTitle"), Ok(()));
    let out = convert(ctx, &sub());
    assert_eq!(out.get("title"), Value::str("Ann"));
    assert!(out.slot("label").is_none());
}

// ─── Validation ──────────────────────────────────────────────────────────────

fn rejected(result: Result<(), ConvertError>) -> bool {
    matches!(result, Err(ConvertError::InvalidMapping(_)))
}

#[test]
fn reader_with_argument_is_rejected() {
    assert!(rejected(context().register_mapping_by_name(&source(), "getPart", &base(), "setLabel")));
}

#[test]
fn reader_without_result_is_rejected() {
    assert!(rejected(context().register_mapping_by_name(&source(), "reset", &base(), "setLabel")));
}

#[test]
fn writer_with_two_arguments_is_rejected() {
    assert!(rejected(context().register_mapping_by_name(&source(), "getName", &base(), "setPair")));
}

#[test]
fn writer_of_unrelated_class_is_rejected() {
    let ctx = context();
    let (Some(reader), Some(writer)) = (ctx.find_method(&source(), "getName"), ctx.find_method(&sub(), "setTitle")) else {
        panic!("fixture methods missing");
    };
    assert!(rejected(ctx.register_mapping(&reader, &writer, &TypeDescriptor::class(&base()))));
}

#[test]
fn unknown_method_is_rejected() {
    assert!(rejected(context().register_mapping_by_name(&source(), "getMissing", &base(), "setLabel")));
}

// ─── Fallback ────────────────────────────────────────────────────────────────

#[test]
fn unconvertible_mapping_falls_back_to_name_matching() {
    let ctx = ConversionContext::new();
    let target = ClassType::new("Target");
    ctx.register_class(
        ClassDesc::new(source()).method(MethodDesc::reader("getName", BaseType::Str, |i| Ok(i.get("name")))),
    );
    ctx.register_class(
        ClassDesc::new(target.clone())
            .method(MethodDesc::writer("setName", BaseType::Str, |i, v| { i.set("name", v); Ok(()) }))
            .method(MethodDesc::writer("setWhen", BaseType::Instant, |i, v| { i.set("when", v); Ok(()) })),
    );
    assert_eq!(ctx.register_mapping_by_name(&source(), "getName", &target, "setWhen"), Ok(()));

    let out = convert(ctx, &target);
    assert_eq!(out.get("name"), Value::str("Ann"));
    assert!(out.slot("when").is_none());
}
