//! # Accessor: Scoped Injection of Shared Instances
//!
//! Consumers deep inside a call tree often need the [`crate::shelf::Shelf`] (or
//! one store) without every function in between taking it as a parameter.
//! This module provides that reach without a global singleton:
//!
//! 1. **Install**: [`provide`] moves a value into a shared handle and makes it
//!    visible on the current thread. It returns a [`ProviderGuard`].
//! 2. **Access**: [`access`] (or [`with`]) fetches the innermost installed value
//!    of the requested type.
//! 3. **Uninstall**: dropping the guard removes the value again.
//!
//! Installing the same type twice shadows the outer value until the inner
//! guard drops. Accessing a type that nobody installed is a wiring bug and
//! fails with [`ShelfError::MissingProvider`].
//!
//! Everything is per-thread and uses `Rc`/`RefCell`; a guard cannot be sent to
//! another thread. Holding a `borrow_mut()` of a handle while calling into
//! code that borrows the same handle panics, as with any `RefCell`.

use crate::error::{Result, ShelfError};
use std::any::{type_name, Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::rc::Rc;

pub type Handle<T> = Rc<RefCell<T>>;

thread_local! {
    static PROVIDERS: RefCell<HashMap<TypeId, Vec<Rc<dyn Any>>>> = RefCell::new(HashMap::new());
}

/// Keeps a value installed until dropped.
#[must_use = "the value is uninstalled as soon as the guard is dropped"]
pub struct ProviderGuard<T: 'static> {
    handle: Handle<T>,
    _not_send: PhantomData<*const ()>,
}

impl<T: 'static> ProviderGuard<T> {
    pub fn handle(&self) -> Handle<T> {
        self.handle.clone()
    }
}

impl<T: 'static> Drop for ProviderGuard<T> {
    fn drop(&mut self) {
        let target = Rc::as_ptr(&self.handle) as *const ();
        // try_with: the thread-local may already be gone during thread teardown
        let _ = PROVIDERS.try_with(|providers| {
            let mut providers = providers.borrow_mut();
            if let Some(stack) = providers.get_mut(&TypeId::of::<T>()) {
                if let Some(pos) = stack
                    .iter()
                    .rposition(|p| Rc::as_ptr(p) as *const () == target)
                {
                    stack.remove(pos);
                }
                if stack.is_empty() {
                    providers.remove(&TypeId::of::<T>());
                }
            }
        });
    }
}

/// Install `value` for the current thread.
pub fn provide<T: 'static>(value: T) -> ProviderGuard<T> {
    provide_handle(Rc::new(RefCell::new(value)))
}

/// Install an existing handle, so the caller can keep using it directly.
pub fn provide_handle<T: 'static>(handle: Handle<T>) -> ProviderGuard<T> {
    let erased: Rc<dyn Any> = handle.clone();
    PROVIDERS.with(|providers| {
        providers
            .borrow_mut()
            .entry(TypeId::of::<T>())
            .or_default()
            .push(erased);
    });
    ProviderGuard {
        handle,
        _not_send: PhantomData,
    }
}

/// The innermost installed value of type `T`.
pub fn access<T: 'static>() -> Result<Handle<T>> {
    PROVIDERS
        .with(|providers| {
            providers
                .borrow()
                .get(&TypeId::of::<T>())
                .and_then(|stack| stack.last().cloned())
        })
        .and_then(|erased| erased.downcast::<RefCell<T>>().ok())
        .ok_or(ShelfError::MissingProvider(type_name::<T>()))
}

/// Run `f` with mutable access to the installed `T`.
pub fn with<T: 'static, R>(f: impl FnOnce(&mut T) -> R) -> Result<R> {
    let handle = access::<T>()?;
    let mut value = handle.borrow_mut();
    Ok(f(&mut value))
}

/// Whether a `T` is currently installed.
pub fn is_provided<T: 'static>() -> bool {
    access::<T>().is_ok()
}
