//! Opaque identity keys for tracked allocations.

use std::fmt;
use std::ptr;

/// The identity of a tracked allocation.
///
/// An `Address` is derived from the location of an allocation but is only ever used as a
/// lookup key. It cannot be turned back into a pointer, so the registry has no way to
/// dereference the memory it is tracking.
///
/// # Examples
///
/// ```
/// use leak_tracker::Address;
///
/// let value = Box::new(42_u32);
/// let address = Address::of(&*value);
///
/// assert_eq!(address, Address::of(&*value));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Address(usize);

impl Address {
    /// Creates an address from a raw numeric value.
    ///
    /// Useful when the caller already keeps allocation identities as integers (for example
    /// handles received over FFI).
    #[must_use]
    #[inline]
    pub const fn from_raw(value: usize) -> Self {
        Self(value)
    }

    /// Returns the address of the value behind the reference.
    ///
    /// Metadata of wide pointers (slice lengths, vtables) is discarded; only the location of
    /// the data takes part in the identity.
    #[must_use]
    #[inline]
    pub fn of<T: ?Sized>(value: &T) -> Self {
        Self(ptr::from_ref(value).cast::<()>().addr())
    }

    /// Returns the address the raw pointer points to. The pointer is not dereferenced.
    #[must_use]
    #[inline]
    pub fn from_ptr<T: ?Sized>(ptr: *const T) -> Self {
        Self(ptr.cast::<()>().addr())
    }

    /// The numeric value of the address.
    #[must_use]
    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl<T: ?Sized> From<*const T> for Address {
    #[inline]
    fn from(value: *const T) -> Self {
        Self::from_ptr(value)
    }
}

impl<T: ?Sized> From<*mut T> for Address {
    #[inline]
    fn from(value: *mut T) -> Self {
        Self::from_ptr(value.cast_const())
    }
}

impl From<usize> for Address {
    #[inline]
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
