/// A trait giving read-only access to the headers of a request
///
/// Lookups are case-insensitive. Implementations are provided for `http::HeaderMap`,
/// `http::Request` and `http::request::Parts` with the `http` feature, and for slices of
/// `(name, value)` pairs.
pub trait HeaderSource {
    /// Get every value of the header `name`, in order of appearance
    ///
    /// Values that are not valid visible ASCII must be skipped. A double-ended iterator is
    /// returned to allow the implementation to optimize the iteration in case of multiple values
    fn header_values(&self, name: &str) -> impl DoubleEndedIterator<Item = &str>;

    /// Get the first value of the header `name`
    fn first_value(&self, name: &str) -> Option<&str> {
        self.header_values(name).next()
    }
}

impl<H: HeaderSource + ?Sized> HeaderSource for &H {
    fn header_values(&self, name: &str) -> impl DoubleEndedIterator<Item = &str> {
        (**self).header_values(name)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> HeaderSource for [(K, V)] {
    fn header_values(&self, name: &str) -> impl DoubleEndedIterator<Item = &str> {
        self.iter()
            .filter(move |(key, _)| key.as_ref().eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_ref())
    }
}

#[cfg(feature = "http")]
mod http {
    use super::HeaderSource;

    impl HeaderSource for http::HeaderMap {
        fn header_values(&self, name: &str) -> impl DoubleEndedIterator<Item = &str> {
            self.get_all(name)
                .iter()
                .filter_map(|value| value.to_str().ok())
        }
    }

    impl<T> HeaderSource for http::Request<T> {
        fn header_values(&self, name: &str) -> impl DoubleEndedIterator<Item = &str> {
            self.headers().header_values(name)
        }
    }

    impl HeaderSource for http::request::Parts {
        fn header_values(&self, name: &str) -> impl DoubleEndedIterator<Item = &str> {
            self.headers.header_values(name)
        }
    }
}
