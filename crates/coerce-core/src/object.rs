//! Heap objects and their conversion hooks
//!
//! An object is either an ordinary record or an array-like list of values.
//! Either kind may carry caller-supplied [`ConversionHooks`], the analogue of
//! user-defined `valueOf`, `toString` and `[Symbol.toPrimitive]` methods.
//! Objects without hooks fall back to the built-in behavior: `valueOf`
//! returns the object itself and `toString` returns either the element join
//! (arrays) or `"[object Object]"`.

use crate::convert::PreferredType;
use crate::error::ConversionResult;
use crate::value::Value;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared reference to a heap object. Identity is pointer identity.
pub type ObjectRef = Arc<JsObject>;

/// Caller-supplied conversion methods of an object.
///
/// Every method returns `None` when the object does not override it, in
/// which case the built-in method is used. `Some(Err(_))` models a method
/// that throws; the error propagates out of the conversion unchanged.
pub trait ConversionHooks: Send + Sync {
    /// `[Symbol.toPrimitive](hint)`
    fn to_primitive(&self, _hint: PreferredType) -> Option<ConversionResult<Value>> {
        None
    }

    /// `valueOf()`
    fn value_of(&self) -> Option<ConversionResult<Value>> {
        None
    }

    /// `toString()`
    fn to_string(&self) -> Option<ConversionResult<Value>> {
        None
    }
}

/// Hooks whose methods return fixed values.
///
/// A field left as `None` means the method is not overridden.
#[derive(Debug, Clone, Default)]
pub struct FixedHooks {
    /// Result of `[Symbol.toPrimitive]`, regardless of hint
    pub to_primitive: Option<Value>,
    /// Result of `valueOf()`
    pub value_of: Option<Value>,
    /// Result of `toString()`
    pub to_string: Option<Value>,
}

impl FixedHooks {
    /// Override `valueOf()` only
    pub fn with_value_of(value: impl Into<Value>) -> Self {
        Self {
            value_of: Some(value.into()),
            ..Self::default()
        }
    }

    /// Override `toString()` only
    pub fn with_to_string(value: impl Into<Value>) -> Self {
        Self {
            to_string: Some(value.into()),
            ..Self::default()
        }
    }
}

impl ConversionHooks for FixedHooks {
    fn to_primitive(&self, _hint: PreferredType) -> Option<ConversionResult<Value>> {
        self.to_primitive.clone().map(Ok)
    }

    fn value_of(&self) -> Option<ConversionResult<Value>> {
        self.value_of.clone().map(Ok)
    }

    fn to_string(&self) -> Option<ConversionResult<Value>> {
        self.to_string.clone().map(Ok)
    }
}

/// Storage kind of an object
pub enum ObjectKind {
    /// Plain record
    Ordinary,
    /// Array-like list; callers may mutate it between conversions
    Array(RwLock<Vec<Value>>),
}

impl ObjectKind {
    /// Array storage holding `elements`
    pub fn array(elements: impl IntoIterator<Item = Value>) -> Self {
        Self::Array(RwLock::new(elements.into_iter().collect()))
    }
}

/// Deepest array nesting that conversion and formatting walk into
pub const MAX_NESTING_DEPTH: usize = 128;

/// A heap object
pub struct JsObject {
    kind: ObjectKind,
    hooks: Option<Arc<dyn ConversionHooks>>,
}

impl JsObject {
    /// Allocate an ordinary object without hooks
    pub fn ordinary() -> ObjectRef {
        Arc::new(Self {
            kind: ObjectKind::Ordinary,
            hooks: None,
        })
    }

    /// Allocate an array
    pub fn array(elements: impl IntoIterator<Item = Value>) -> ObjectRef {
        Arc::new(Self {
            kind: ObjectKind::array(elements),
            hooks: None,
        })
    }

    /// Allocate an object of the given kind with conversion hooks
    pub fn with_hooks(kind: ObjectKind, hooks: impl ConversionHooks + 'static) -> ObjectRef {
        Arc::new(Self {
            kind,
            hooks: Some(Arc::new(hooks)),
        })
    }

    /// Check if this object is array-like
    pub fn is_array(&self) -> bool {
        matches!(self.kind, ObjectKind::Array(_))
    }

    /// Conversion hooks, if any
    pub fn hooks(&self) -> Option<&dyn ConversionHooks> {
        self.hooks.as_deref()
    }

    /// Snapshot of the array elements (`None` for ordinary objects)
    pub fn elements(&self) -> Option<Vec<Value>> {
        match &self.kind {
            ObjectKind::Array(items) => Some(items.read().clone()),
            ObjectKind::Ordinary => None,
        }
    }

    /// Array length (`0` for ordinary objects)
    pub fn len(&self) -> usize {
        match &self.kind {
            ObjectKind::Array(items) => items.read().len(),
            ObjectKind::Ordinary => 0,
        }
    }

    /// Check if this is an empty array or an ordinary object
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append to an array. Returns `false` for ordinary objects.
    ///
    /// Objects are reference counted: an array that ends up containing
    /// itself is never freed until the cycle is broken with [`JsObject::set`].
    pub fn push(&self, value: Value) -> bool {
        match &self.kind {
            ObjectKind::Array(items) => {
                items.write().push(value);
                true
            }
            ObjectKind::Ordinary => false,
        }
    }

    /// Overwrite an array slot, padding holes with `undefined`.
    /// Returns `false` for ordinary objects.
    ///
    /// As with [`JsObject::push`], storing an array inside itself leaks it
    /// until the slot is overwritten.
    pub fn set(&self, index: usize, value: Value) -> bool {
        match &self.kind {
            ObjectKind::Array(items) => {
                let mut items = items.write();
                if index >= items.len() {
                    items.resize(index + 1, Value::undefined());
                }
                items[index] = value;
                true
            }
            ObjectKind::Ordinary => false,
        }
    }

    /// Identity of this object for cycle detection
    pub(crate) fn addr(&self) -> usize {
        self as *const Self as usize
    }

    fn fmt_nested(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        seen: &mut Vec<usize>,
    ) -> std::fmt::Result {
        let Some(elements) = self.elements() else {
            return if self.hooks.is_some() {
                write!(f, "{{ .. }}")
            } else {
                write!(f, "{{}}")
            };
        };
        if seen.contains(&self.addr()) {
            return write!(f, "[Circular]");
        }
        if seen.len() >= MAX_NESTING_DEPTH {
            return write!(f, "[...]");
        }
        seen.push(self.addr());
        write!(f, "[")?;
        for (i, element) in elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match element {
                Value::Object(inner) => inner.fmt_nested(f, seen)?,
                other => write!(f, "{:?}", other)?,
            }
        }
        seen.pop();
        write!(f, "]")
    }
}

// Nested arrays are torn down with an explicit stack so that dropping a
// deeply nested value does not recurse once per level.
impl Drop for JsObject {
    fn drop(&mut self) {
        let ObjectKind::Array(items) = &mut self.kind else {
            return;
        };
        let mut pending = std::mem::take(items.get_mut());
        while let Some(value) = pending.pop() {
            let Value::Object(obj) = value else {
                continue;
            };
            if let Ok(mut owned) = Arc::try_unwrap(obj) {
                if let ObjectKind::Array(inner) = &mut owned.kind {
                    pending.append(inner.get_mut());
                }
            }
        }
    }
}

impl std::fmt::Debug for JsObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_nested(f, &mut Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_mutation() {
        let arr = JsObject::array([Value::int32(1)]);
        assert!(arr.push(Value::int32(2)));
        assert!(arr.set(3, Value::int32(4)));
        assert_eq!(arr.len(), 4);
        let elements = arr.elements().unwrap();
        assert!(elements[2].is_undefined());
        assert_eq!(elements[3].as_number(), Some(4.0));
    }

    #[test]
    fn test_ordinary_object_rejects_element_writes() {
        let obj = JsObject::ordinary();
        assert!(!obj.push(Value::null()));
        assert!(!obj.set(0, Value::null()));
        assert!(obj.elements().is_none());
        assert!(obj.is_empty());
    }

    #[test]
    fn test_fixed_hooks() {
        let hooks = FixedHooks::with_value_of(42);
        assert!(hooks.to_primitive(PreferredType::Number).is_none());
        assert!(ConversionHooks::to_string(&hooks).is_none());
        let v = hooks.value_of.clone().unwrap();
        assert_eq!(v.as_number(), Some(42.0));
    }

    #[test]
    fn test_debug_handles_cycles() {
        let arr = JsObject::array([Value::int32(1)]);
        arr.push(Value::object(arr.clone()));
        assert_eq!(format!("{:?}", arr), "[1, [Circular]]");
        arr.set(1, Value::null());
    }

    #[test]
    fn test_overwriting_self_reference_releases_cycle() {
        let arr = JsObject::array([]);
        arr.push(Value::object(arr.clone()));
        assert_eq!(Arc::strong_count(&arr), 2);
        arr.set(0, Value::undefined());
        assert_eq!(Arc::strong_count(&arr), 1);
    }

    #[test]
    fn test_deep_nesting_debug_and_drop() {
        let mut value = Value::int32(0);
        for _ in 0..100_000 {
            value = Value::array([value]);
        }
        let rendered = format!("{:?}", value);
        assert!(rendered.contains("[...]"));
        assert_eq!(rendered.matches('[').count(), MAX_NESTING_DEPTH + 1);
        drop(value);
    }
}
