/// A submitted value that passed a safety gate in enforcing mode.
///
/// `Verified<T>` can only be produced by a [`Sanitizer`](crate::Sanitizer)
/// in this crate, so a function taking `Verified<String>` cannot be handed a
/// link or text that skipped the gate.
///
/// # Examples
///
/// External callers cannot create `Verified<T>` directly:
///
/// ```compile_fail
/// use api_guard::Verified;
///
/// let verified = Verified::new("https://example.com/".to_string());
/// ```
///
/// Values come out of a sanitizer instead:
///
/// ```
/// use api_guard::{LinkSanitizer, Sanitizer, Tainted};
///
/// let verified = LinkSanitizer::builtin()
///     .sanitize(Tainted::new("https://example.com/shop".to_string()))
///     .unwrap();
///
/// assert_eq!(verified.as_ref(), "https://example.com/shop/");
/// let link: String = verified.into_inner();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified<T> {
    inner: T,
}

impl<T> Verified<T> {
    /// Wraps a value without checking it.
    ///
    /// Callers must have run the value through its gate first.
    pub(crate) fn new_unchecked(value: T) -> Self {
        Self { inner: value }
    }

    /// Consumes the wrapper and returns the checked value.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> AsRef<T> for Verified<T> {
    fn as_ref(&self) -> &T {
        &self.inner
    }
}
