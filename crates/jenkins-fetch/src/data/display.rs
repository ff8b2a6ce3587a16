use std::fmt;

/// Renders an optional value, or a fixed placeholder when it is absent.
///
/// ```
/// use jenkins_fetch::Placeholder;
///
/// let id: Option<String> = None;
/// assert_eq!(Placeholder::new(id.as_ref(), "<unknown>").to_string(), "<unknown>");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Placeholder<'a, T: ?Sized> {
    value: Option<&'a T>,
    placeholder: &'static str,
}

impl<'a, T: ?Sized> Placeholder<'a, T> {
    pub fn new(value: Option<&'a T>, placeholder: &'static str) -> Self {
        Self { value, placeholder }
    }
}

impl<T: fmt::Display + ?Sized> fmt::Display for Placeholder<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => value.fmt(f),
            None => f.write_str(self.placeholder),
        }
    }
}
