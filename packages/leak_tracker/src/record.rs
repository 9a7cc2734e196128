//! Provenance metadata captured for each tracked allocation.

use std::any::type_name;
use std::borrow::Cow;
use std::fmt;

/// The source location that requested tracking of an allocation.
///
/// Usually created through the [`call_site!`](crate::call_site) macro, which fills in the
/// file, line and enclosing function of the macro invocation.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CallSite {
    file: Cow<'static, str>,
    line: u32,
    function: Cow<'static, str>,
}

impl CallSite {
    /// Creates a call site from explicitly provided provenance.
    ///
    /// The values are taken as-is; they are not validated against any real source code.
    #[must_use]
    pub fn new(
        file: impl Into<Cow<'static, str>>,
        line: u32,
        function: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            function: function.into(),
        }
    }

    /// The source file of the call site.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// The line number of the call site.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The name of the function enclosing the call site.
    #[must_use]
    pub fn function(&self) -> &str {
        &self.function
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{})", self.function, self.file, self.line)
    }
}

/// Everything the registry knows about one live tracked allocation.
///
/// The type name is implementation-defined (see [`std::any::type_name`]) and not guaranteed
/// to be stable across compiler versions. It is meant for humans reading a leak report.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllocationRecord {
    type_name: Cow<'static, str>,
    call_site: CallSite,
    size_bytes: usize,
}

impl AllocationRecord {
    /// Creates a record for an allocation of `size_bytes` bytes of the named type.
    #[must_use]
    pub fn new(
        type_name: impl Into<Cow<'static, str>>,
        size_bytes: usize,
        call_site: CallSite,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            call_site,
            size_bytes,
        }
    }

    /// Creates a record describing one value of type `T`.
    #[must_use]
    pub fn of<T: ?Sized>(value: &T, call_site: CallSite) -> Self {
        Self::new(type_name::<T>(), size_of_val(value), call_site)
    }

    /// Name of the allocated type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Size of the allocated object in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    /// Where the allocation was requested.
    #[must_use]
    pub fn call_site(&self) -> &CallSite {
        &self.call_site
    }

    /// Shorthand for `call_site().file()`.
    #[must_use]
    pub fn source_file(&self) -> &str {
        self.call_site.file()
    }

    /// Shorthand for `call_site().line()`.
    #[must_use]
    pub fn source_line(&self) -> u32 {
        self.call_site.line()
    }

    /// Shorthand for `call_site().function()`.
    #[must_use]
    pub fn allocating_function(&self) -> &str {
        self.call_site.function()
    }
}
