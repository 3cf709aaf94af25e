//! Type-safe keys for settings storage.

use std::marker::PhantomData;

/// Register a type-safe settings key.
///
/// Associates a storage name with a value type at compile time.
///
/// # Example
/// ```rust
/// use grocery_state::register_setting_key;
///
/// register_setting_key!(pub const REMEMBER_ME: bool = "RememberMe");
/// ```
#[macro_export]
macro_rules! register_setting_key {
    ($vis:vis const $name:ident: $ty:ty = $key:literal) => {
        $vis const $name: $crate::settings::Key<$ty> = $crate::settings::Key::new($key);
    };
}

/// Type-safe key for settings storage.
///
/// Use the [`register_setting_key!`](crate::register_setting_key) macro to create keys.
#[derive(Debug)]
pub struct Key<T> {
    pub(crate) name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

// Manual impls so `Key<T>` is `Copy` regardless of `T`.
impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Key<T> {}

impl<T> Key<T> {
    #[doc(hidden)]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// The name this key is stored under.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}
