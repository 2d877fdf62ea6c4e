//! Class catalog: the accessor table behind discovery and instantiation.
//!
//! Each user type is described once by a `ClassDesc`: its identity, whether it
//! can be constructed, and its methods with function-pointer bodies.
//!
//! Consumed by:
//!   • the engine:  `readers_of` / `writers_of` / `instantiate`
//!   • the context: `find_method` when registering mappings by name
//!
//! Adding a new convertible type = registering one `ClassDesc` here.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::{AccessError, ConvertError};
use crate::runtime::value::{Instance, Object, Value};
use crate::types::accessor::{Accessor, AccessorKind, MethodRef};
use crate::types::descriptor::{BaseType, ClassType, TypeDescriptor};
use crate::types::signature::{ExecutableTypeResolver, SignatureResolver, TypeSig};

// ─── Function pointer aliases ─────────────────────────────────────────────────

/// Produce a value from an instance.
pub type ReaderFn = fn(&Instance) -> Result<Value, AccessError>;

/// Store a value into an instance.
pub type WriterFn = fn(&mut Instance, Value) -> Result<(), AccessError>;

/// Initialize a freshly allocated instance.
pub type ConstructorFn = fn(&mut Instance);

// ─── Descriptors ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
pub enum MethodBody {
    Read(ReaderFn),
    Write(WriterFn),
    /// Declared for discovery only; never invoked by the engine.
    Opaque,
}

impl std::fmt::Debug for MethodBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MethodBody::Read(_)  => f.write_str("Read"),
            MethodBody::Write(_) => f.write_str("Write"),
            MethodBody::Opaque   => f.write_str("Opaque"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MethodDesc {
    pub name:      &'static str,
    pub params:    Vec<TypeSig>,
    /// Return type. None means the method returns nothing.
    pub ret:       Option<TypeSig>,
    pub is_static: bool,
    pub is_public: bool,
    pub body:      MethodBody,
}

impl MethodDesc {
    pub fn reader(name: &'static str, ret: impl Into<TypeSig>, body: ReaderFn) -> Self {
        Self { name, params: Vec::new(), ret: Some(ret.into()), is_static: false, is_public: true, body: MethodBody::Read(body) }
    }

    pub fn writer(name: &'static str, param: impl Into<TypeSig>, body: WriterFn) -> Self {
        Self { name, params: vec![param.into()], ret: None, is_static: false, is_public: true, body: MethodBody::Write(body) }
    }

    pub fn opaque(name: &'static str, params: Vec<TypeSig>, ret: Option<TypeSig>) -> Self {
        Self { name, params, ret, is_static: false, is_public: true, body: MethodBody::Opaque }
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn arity(&self) -> usize { self.params.len() }

    fn is_universal(&self) -> bool {
        matches!(
            (self.name, self.arity()),
            ("equals", 1) | ("hashCode", 0) | ("toString", 0) | ("getClass", 0)
                | ("hash_code", 0) | ("to_string", 0) | ("get_class", 0)
        )
    }

    fn is_discoverable(&self) -> bool {
        self.is_public && !self.is_static && !self.is_universal()
    }
}

fn no_init(_: &mut Instance) {}

pub struct ClassDesc {
    pub ty:          ClassType,
    pub is_abstract: bool,
    /// None means there is no public no-argument constructor.
    pub constructor: Option<ConstructorFn>,
    pub methods:     Vec<Arc<MethodDesc>>,
}

impl ClassDesc {
    pub fn new(ty: ClassType) -> Self {
        Self { ty, is_abstract: false, constructor: Some(no_init as ConstructorFn), methods: Vec::new() }
    }

    pub fn method(mut self, method: MethodDesc) -> Self {
        self.methods.push(Arc::new(method));
        self
    }

    pub fn constructor(mut self, init: ConstructorFn) -> Self {
        self.constructor = Some(init);
        self
    }

    pub fn without_constructor(mut self) -> Self {
        self.constructor = None;
        self
    }

    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }
}

// ─── Introspection ────────────────────────────────────────────────────────────

/// Runtime discovery of accessors and construction of instances.
pub trait Introspect {
    /// Zero-argument methods returning a value, in declaration order.
    fn readers_of(&self, ty: &TypeDescriptor) -> Vec<Accessor>;

    /// One-argument methods, in declaration order.
    fn writers_of(&self, ty: &TypeDescriptor) -> Vec<Accessor>;

    fn instantiate(&self, ty: &TypeDescriptor) -> Result<Object, ConvertError>;
}

// ─── Catalog ──────────────────────────────────────────────────────────────────

pub struct ClassCatalog {
    classes:  HashMap<&'static str, Arc<ClassDesc>>,
    resolver: Arc<dyn ExecutableTypeResolver>,
}

impl Default for ClassCatalog {
    fn default() -> Self { Self::new() }
}

impl ClassCatalog {
    pub fn new() -> Self {
        Self::with_resolver(Arc::new(SignatureResolver))
    }

    pub fn with_resolver(resolver: Arc<dyn ExecutableTypeResolver>) -> Self {
        Self { classes: HashMap::new(), resolver }
    }

    /// Re-registering a class replaces its previous description.
    pub fn register(&mut self, desc: ClassDesc) {
        self.classes.insert(desc.ty.name(), Arc::new(desc));
    }

    pub fn get(&self, name: &str) -> Option<Arc<ClassDesc>> {
        self.classes.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool { self.classes.contains_key(name) }

    pub fn resolver(&self) -> Arc<dyn ExecutableTypeResolver> { self.resolver.clone() }

    /// Every method visible on `class`: its own first, then inherited ones.
    /// A subclass method hides a parent method only when both the name and
    /// the declared parameters match. Overloads are all kept.
    pub fn methods_of(&self, class: &ClassType) -> Vec<MethodRef> {
        let mut seen: HashSet<(&'static str, &[TypeSig])> = HashSet::new();
        let mut out = Vec::new();
        let mut current = Some(class);
        while let Some(c) = current {
            if let Some(desc) = self.classes.get(c.name()) {
                for m in &desc.methods {
                    if seen.insert((m.name, m.params.as_slice())) {
                        out.push(MethodRef::new(desc.ty.clone(), m.clone()));
                    }
                }
            }
            current = c.parent();
        }
        out
    }

    /// First visible method called `name`, regardless of visibility or shape.
    pub fn find_method(&self, class: &ClassType, name: &str) -> Option<MethodRef> {
        self.methods_of(class).into_iter().find(|m| m.name() == name)
    }

    fn accessors(&self, ty: &TypeDescriptor, kind: AccessorKind) -> Vec<Accessor> {
        let BaseType::Class(class) = ty.base() else {
            return Vec::new();
        };
        self.methods_of(class)
            .into_iter()
            .filter(|m| m.desc().is_discoverable())
            .filter_map(|method| {
                let value_type = match kind {
                    AccessorKind::Reader if method.arity() == 0 => self.resolver.return_type(&method, ty)?,
                    AccessorKind::Writer if method.arity() == 1 => {
                        self.resolver.parameter_types(&method, ty).into_iter().next()?
                    }
                    _ => return None,
                };
                Some(Accessor { method, kind, value_type })
            })
            .collect()
    }
}

impl Introspect for ClassCatalog {
    fn readers_of(&self, ty: &TypeDescriptor) -> Vec<Accessor> {
        self.accessors(ty, AccessorKind::Reader)
    }

    fn writers_of(&self, ty: &TypeDescriptor) -> Vec<Accessor> {
        self.accessors(ty, AccessorKind::Writer)
    }

    fn instantiate(&self, ty: &TypeDescriptor) -> Result<Object, ConvertError> {
        let fail = |reason: &str| ConvertError::InstanceCreation { ty: ty.to_string(), reason: reason.into() };
        let BaseType::Class(class) = ty.base() else {
            return Err(fail("not a class type"));
        };
        let desc = self.classes.get(class.name()).ok_or_else(|| fail("class is not registered"))?;
        if desc.is_abstract {
            return Err(fail("class is abstract"));
        }
        let init = desc.constructor.ok_or_else(|| fail("no public no-argument constructor"))?;
        let mut instance = Instance::new(desc.ty.clone());
        init(&mut instance);
        Ok(Object::new(instance))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
