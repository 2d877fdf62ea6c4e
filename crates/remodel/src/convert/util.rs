use crate::runtime::value::Value;
use crate::types::descriptor::BaseType;

/// Nearest common supertype of the non-null `items`' runtime types.
///
/// Unrelated types meet at `object`, and so does a collection with nothing to
/// inspect (empty, or only nulls).
pub fn common_type<'a>(items: impl IntoIterator<Item = &'a Value>) -> BaseType {
    items
        .into_iter()
        .filter(|v| !v.is_null())
        .map(Value::runtime_type)
        .reduce(|acc, t| join(&acc, &t))
        .unwrap_or(BaseType::Object)
}

/// Element type of an array value: the common type of its items, or the
/// declared component type when the items only meet at `object`.
pub fn array_element_type(component: &BaseType, items: &[Value]) -> BaseType {
    match common_type(items) {
        BaseType::Object => component.clone(),
        t => t,
    }
}

fn join(a: &BaseType, b: &BaseType) -> BaseType {
    if let (BaseType::Array(x), BaseType::Array(y)) = (a, b) {
        return BaseType::array_of(join(x, y));
    }
    let mut current = Some(a.clone());
    while let Some(t) = current {
        if t.is_assignable_from(b) {
            return t;
        }
        current = t.supertype();
    }
    BaseType::Object
}
