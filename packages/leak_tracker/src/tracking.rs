//! Entry points used at allocation and deallocation sites.
//!
//! With the `tracking` feature enabled, these route through the process-wide registry. With
//! it disabled, they are plain allocation and deallocation: the registry is never touched,
//! no report file is created and the call site metadata is never constructed.

#[cfg(feature = "tracking")]
use tracing::trace;

use crate::{Address, AllocationRecord, CallSite};
#[cfg(feature = "tracking")]
use crate::with_global;

/// Starts tracking a boxed value in the process-wide registry and returns the box unchanged.
///
/// The registry records the type, size and call site of the value, keyed by the address
/// of the heap allocation. Values of zero-sized types are not recorded because they do not
/// occupy a distinct allocation.
///
/// Usually called through [`track_new!`](crate::track_new), which captures the call site.
#[inline]
pub fn track_new<T: ?Sized>(value: Box<T>, call_site: CallSite) -> Box<T> {
    track_new_with(value, || call_site)
}

/// Stops tracking a boxed value in the process-wide registry and then drops it.
///
/// Passing a box that was never tracked is allowed; it is simply dropped.
///
/// Usually called through [`track_delete!`](crate::track_delete).
#[inline]
pub fn track_delete<T: ?Sized>(value: Box<T>) {
    #[cfg(feature = "tracking")]
    {
        if size_of_val(&*value) != 0 {
            release(Address::of(&*value));
        }
    }

    drop(value);
}

/// Records an allocation in the process-wide registry, returning `address` unchanged.
///
/// This is the lower-level counterpart of [`track_new()`] for memory that is not managed
/// through `Box`, such as buffers obtained over FFI. It behaves like
/// [`Registry::record()`](crate::Registry::record), except that it is ignored after
/// [`shutdown_global()`](crate::shutdown_global).
#[cfg_attr(not(feature = "tracking"), expect(unused_variables, reason = "no bookkeeping"))]
#[inline]
pub fn record(address: Address, record: AllocationRecord) -> Address {
    #[cfg(feature = "tracking")]
    {
        with_global(|registry| registry.record(address, record));
    }

    address
}

/// Removes an allocation from the process-wide registry. Unknown addresses are ignored.
#[cfg_attr(not(feature = "tracking"), expect(unused_variables, reason = "no bookkeeping"))]
#[inline]
pub fn release(address: Address) {
    #[cfg(feature = "tracking")]
    {
        with_global(|registry| registry.release(address));
    }
}

// The call site is produced lazily so that with tracking disabled not even the
// metadata is constructed.
#[doc(hidden)]
#[cfg_attr(not(feature = "tracking"), expect(unused_variables, reason = "no bookkeeping"))]
#[inline]
pub fn track_new_with<T: ?Sized>(
    value: Box<T>,
    call_site: impl FnOnce() -> CallSite,
) -> Box<T> {
    #[cfg(feature = "tracking")]
    {
        if size_of_val(&*value) == 0 {
            trace!("zero-sized value not tracked");
            return value;
        }

        let address = Address::of(&*value);
        record(address, AllocationRecord::of(&*value, call_site()));
    }

    value
}
