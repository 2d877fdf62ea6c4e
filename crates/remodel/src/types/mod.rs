pub mod descriptor;
pub mod signature;
pub mod accessor;
pub mod catalog;

pub use accessor::{Accessor, AccessorKind, MethodRef};
pub use catalog::{ClassCatalog, ClassDesc, Introspect, MethodBody, MethodDesc};
pub use descriptor::{BaseType, ClassType, EnumType, TypeDescriptor};
pub use signature::{ExecutableTypeResolver, SignatureResolver, TypeSig};
