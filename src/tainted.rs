use std::fmt;

/// A submitted value that has not been through a safety gate yet.
///
/// `Tainted<T>` marks request input (links, descriptions, profile text) that
/// must not be persisted before a [`Sanitizer`](crate::Sanitizer) accepts it.
/// The wrapped value cannot be read from outside the crate.
///
/// # Examples
///
/// ```
/// use api_guard::Tainted;
///
/// let link = Tainted::new("http://bit.ly/promo".to_string());
/// println!("{:?}", link); // Tainted { inner: "http://bit.ly/promo" }
///
/// // There is no way to get the String back without a sanitizer:
/// // let raw: String = link.into_inner(); // Won't compile outside the crate
/// ```
#[derive(Clone)]
pub struct Tainted<T> {
    // Must stay private: sanitizers are the only way out.
    inner: T,
}

impl<T> Tainted<T> {
    /// Wraps a value received from the client.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Extracts the inner value for a sanitizer to check.
    ///
    /// Only sanitizer implementations in this crate may call it, and only to
    /// wrap the value in `Verified<T>` after it passed its gate.
    pub(crate) fn into_inner(self) -> T {
        self.inner
    }
}

// No Deref, AsRef, Borrow or From/Into impls: each one would let an
// unchecked value reach storage.

impl<T: fmt::Debug> fmt::Debug for Tainted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tainted")
            .field("inner", &self.inner)
            .finish()
    }
}
