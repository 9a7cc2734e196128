//! Macros that capture provenance at the call site.

/// Expands to the path of the function in which it is invoked, as a `&'static str`.
///
/// Closures do not count as functions; inside a closure the enclosing named function is
/// reported.
///
/// # Examples
///
/// ```
/// fn load_config() -> &'static str {
///     leak_tracker::function_name!()
/// }
///
/// assert!(load_config().ends_with("load_config"));
/// ```
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __leak_tracker_marker() {}
        $crate::__private::enclosing_function(::core::any::type_name_of_val(
            &__leak_tracker_marker,
        ))
    }};
}

/// Expands to a [`CallSite`](crate::CallSite) describing the location of the invocation.
///
/// # Examples
///
/// ```
/// let site = leak_tracker::call_site!();
///
/// assert_eq!(site.file(), file!());
/// assert_eq!(site.line(), line!() - 3);
/// ```
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite::new(
            ::core::file!(),
            ::core::line!(),
            $crate::function_name!(),
        )
    };
}

/// Moves a value to the heap and tracks the allocation, returning the `Box`.
///
/// The allocation is attributed to the file, line and function of the macro invocation.
/// Release it with [`track_delete!`](crate::track_delete); if it is dropped any other way
/// it is reported as leaked.
///
/// With the `tracking` feature disabled this is exactly `Box::new(value)`.
///
/// # Examples
///
/// ```
/// # leak_tracker::configure_global(leak_tracker::Registry::builder().without_report());
/// struct Texture {
///     pixels: [u8; 64],
/// }
///
/// let texture = leak_tracker::track_new!(Texture { pixels: [0; 64] });
/// assert_eq!(texture.pixels.len(), 64);
///
/// leak_tracker::track_delete!(texture);
/// ```
#[macro_export]
macro_rules! track_new {
    ($value:expr $(,)?) => {
        $crate::__private::track_new_with(::std::boxed::Box::new($value), || {
            $crate::call_site!()
        })
    };
}

/// Stops tracking a `Box` created by [`track_new!`](crate::track_new) and drops it.
///
/// With the `tracking` feature disabled this is exactly `drop(value)`.
#[macro_export]
macro_rules! track_delete {
    ($value:expr $(,)?) => {
        $crate::track_delete($value)
    };
}
