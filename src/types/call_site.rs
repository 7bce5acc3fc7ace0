use core::fmt;

/// Source location of a diagnostic: enclosing function, file and line.
///
/// Usually built with the [`call_site!`](crate::call_site) macro.
///
/// # Examples
///
/// ```
/// use errno_rail::{call_site, CallSite};
///
/// fn load() -> CallSite {
///     call_site!()
/// }
///
/// let site = load();
/// assert_eq!(site.function(), "load");
/// assert!(site.file().ends_with(".rs"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    function: &'static str,
    file: &'static str,
    line: u32,
}

impl CallSite {
    #[inline]
    pub const fn new(function: &'static str, file: &'static str, line: u32) -> Self {
        Self { function, file, line }
    }

    #[inline]
    pub const fn function(&self) -> &'static str {
        self.function
    }

    #[inline]
    pub const fn file(&self) -> &'static str {
        self.file
    }

    #[inline]
    pub const fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}() [{}:{}]", self.function, self.file, self.line)
    }
}

/// Reduces a `type_name` path of a nested item to the enclosing function name.
///
/// `my_crate::io::load::{{closure}}::__f` becomes `load`.
#[doc(hidden)]
pub fn enclosing_function(path: &'static str) -> &'static str {
    let mut path = path.strip_suffix("::__f").unwrap_or(path);
    while let Some(outer) = path.strip_suffix("::{{closure}}") {
        path = outer;
    }
    path.rsplit("::").next().unwrap_or(path)
}
