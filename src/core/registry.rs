//! Declared type references and the registry that resolves them by name.
//!
//! Containers declare their element type either concretely
//! ([`TypeRef::of`]) or by name ([`TypeRef::named`]). A named reference is
//! looked up in the global [`TypeRegistry`] on first use and cached for the
//! life of the reference, which lets two model types refer to each other
//! without either needing the other at construction time.

use crate::domain::ports::{Construct, FieldObject};
use crate::utils::error::{CoercionError, Result};
use chrono::{DateTime, Utc};
use once_cell::sync::{Lazy, OnceCell};
use serde_json::{Number, Value};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

/// A concrete, constructible element or object type.
#[derive(Clone, Copy)]
pub struct TypeHandle {
    name: &'static str,
    type_id: TypeId,
    construct: fn(&Value) -> Result<Box<dyn FieldObject>>,
}

fn construct_boxed<T: Construct>(raw: &Value) -> Result<Box<dyn FieldObject>> {
    Ok(Box::new(T::construct(raw)?))
}

impl TypeHandle {
    pub fn of<T: Construct>() -> Self {
        Self {
            name: T::declared_name(),
            type_id: TypeId::of::<T>(),
            construct: construct_boxed::<T>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// True when `object` is an instance of this type.
    pub fn is_instance(&self, object: &dyn FieldObject) -> bool {
        Any::type_id(object.as_any()) == self.type_id
    }

    pub fn construct(&self, raw: &Value) -> Result<Box<dyn FieldObject>> {
        (self.construct)(raw)
    }
}

impl PartialEq for TypeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for TypeHandle {}

impl fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeHandle").field(&self.name).finish()
    }
}

pub struct TypeRegistry {
    types: RwLock<HashMap<&'static str, TypeHandle>>,
}

static GLOBAL_REGISTRY: Lazy<TypeRegistry> = Lazy::new(TypeRegistry::with_scalars);

impl TypeRegistry {
    pub fn new() -> Self {
        Self {
            types: RwLock::new(HashMap::new()),
        }
    }

    /// A registry that already knows the scalar element kinds.
    pub fn with_scalars() -> Self {
        let registry = Self::new();
        registry.register::<Number>();
        registry.register::<i64>();
        registry.register::<f64>();
        registry.register::<String>();
        registry.register::<bool>();
        registry.register::<DateTime<Utc>>();
        registry
    }

    pub fn global() -> &'static TypeRegistry {
        &GLOBAL_REGISTRY
    }

    /// Register `T` under its declared name. The first registration of a
    /// name wins; the handle actually stored under the name is returned.
    pub fn register<T: Construct>(&self) -> TypeHandle {
        let handle = TypeHandle::of::<T>();
        let mut types = self.types.write().unwrap_or_else(PoisonError::into_inner);
        let stored = *types.entry(handle.name).or_insert(handle);
        if stored != handle {
            tracing::warn!(
                "type name `{}` already registered to another type, keeping the first",
                handle.name
            );
        } else {
            tracing::debug!("registered type `{}`", handle.name);
        }
        stored
    }

    pub fn lookup(&self, name: &str) -> Result<TypeHandle> {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .copied()
            .ok_or_else(|| CoercionError::UnresolvedType {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Register `T` in the global registry so `TypeRef::named` can find it.
pub fn register<T: Construct>() -> TypeHandle {
    TypeRegistry::global().register::<T>()
}

/// Declared type of a container: concrete, or a name resolved lazily.
pub struct TypeRef {
    name: &'static str,
    resolved: OnceCell<TypeHandle>,
}

impl TypeRef {
    pub fn of<T: Construct>() -> Self {
        let handle = TypeHandle::of::<T>();
        Self {
            name: handle.name,
            resolved: OnceCell::with_value(handle),
        }
    }

    pub const fn named(name: &'static str) -> Self {
        Self {
            name,
            resolved: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }

    /// Resolve through the global registry. Concurrent callers all observe
    /// the same published handle.
    pub fn resolve(&self) -> Result<TypeHandle> {
        self.resolve_in(TypeRegistry::global())
    }

    pub fn resolve_in(&self, registry: &TypeRegistry) -> Result<TypeHandle> {
        self.resolved
            .get_or_try_init(|| {
                let handle = registry.lookup(self.name)?;
                tracing::debug!("resolved type reference `{}`", self.name);
                Ok(handle)
            })
            .copied()
    }
}

impl Clone for TypeRef {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            resolved: self.resolved.clone(),
        }
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRef")
            .field("name", &self.name)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
