use crate::error::OriginError;
use crate::extract::HeaderSource;
use crate::origin::public_origin_with;
use crate::Config;
use core::future::Future;

/// A trait giving access to the headers of the request being handled
///
/// This is the boundary with the server framework: implement it on whatever carries the current
/// request in your handlers. Implementations are provided for references to `http::Request` and
/// `http::request::Parts` with the `http` feature.
pub trait RequestContext {
    type Headers: HeaderSource;

    /// Fetch the headers of the current request
    fn fetch_headers(&self) -> impl Future<Output = Self::Headers> + Send;
}

/// Resolve the public origin from `headers`, or from the headers of `context` when `None`.
///
/// `headers` can be any [`HeaderSource`], not only the one produced by `context`. The context is
/// read at most once.
pub async fn resolve_public_origin<C, H>(
    context: &C,
    headers: Option<&H>,
    config: &Config,
) -> Result<String, OriginError>
where
    C: RequestContext,
    H: HeaderSource + ?Sized,
{
    match headers {
        Some(headers) => public_origin_with(headers, config),
        None => {
            let headers = context.fetch_headers().await;

            public_origin_with(&headers, config)
        }
    }
}

/// Resolve the public origin from the headers of `context`.
pub async fn public_origin_from_context<C: RequestContext>(
    context: &C,
    config: &Config,
) -> Result<String, OriginError> {
    resolve_public_origin(context, None::<&C::Headers>, config).await
}

#[cfg(feature = "http")]
mod http {
    use super::RequestContext;
    use core::future::{ready, Future};

    impl<'a, T> RequestContext for &'a http::Request<T> {
        type Headers = &'a http::HeaderMap;

        fn fetch_headers(&self) -> impl Future<Output = Self::Headers> + Send {
            let request: &'a http::Request<T> = *self;

            ready(request.headers())
        }
    }

    impl<'a> RequestContext for &'a http::request::Parts {
        type Headers = &'a http::HeaderMap;

        fn fetch_headers(&self) -> impl Future<Output = Self::Headers> + Send {
            let parts: &'a http::request::Parts = *self;

            ready(&parts.headers)
        }
    }
}

#[cfg(all(test, feature = "http"))]
mod tests {
    use super::*;
    use ::http::{HeaderMap, Request};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockContext {
        headers: HeaderMap,
        calls: AtomicUsize,
    }

    impl MockContext {
        fn new(pairs: &[(&'static str, &'static str)]) -> Self {
            let mut headers = HeaderMap::new();

            for (name, value) in pairs {
                headers.append(*name, value.parse().unwrap());
            }

            Self {
                headers,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RequestContext for MockContext {
        type Headers = HeaderMap;

        fn fetch_headers(&self) -> impl Future<Output = Self::Headers> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let headers = self.headers.clone();

            async move { headers }
        }
    }

    #[tokio::test]
    async fn context_is_read_once() {
        let context = MockContext::new(&[
            ("x-forwarded-proto", "https"),
            ("x-forwarded-host", "mocked-origin.com"),
        ]);

        let origin = resolve_public_origin(&context, None::<&HeaderMap>, &Config::new()).await;

        assert_eq!(origin.unwrap(), "https://mocked-origin.com");
        assert_eq!(context.calls(), 1);
    }

    #[tokio::test]
    async fn explicit_headers_skip_context() {
        let context = MockContext::new(&[("x-forwarded-host", "mocked-origin.com")]);
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-host", "explicit.com".parse().unwrap());

        let origin = resolve_public_origin(&context, Some(&headers), &Config::new()).await;

        assert_eq!(origin.unwrap(), "https://explicit.com");
        assert_eq!(context.calls(), 0);
    }

    #[tokio::test]
    async fn context_errors_are_propagated() {
        let context = MockContext::new(&[]);

        let origin = public_origin_from_context(&context, &Config::new()).await;

        assert_eq!(origin, Err(OriginError::MissingHost));
        assert_eq!(context.calls(), 1);
    }

    #[tokio::test]
    async fn request_context() {
        let request = Request::get("/")
            .header("host", "example.com:8443")
            .body(())
            .unwrap();

        let origin = public_origin_from_context(&&request, &Config::new()).await;
        assert_eq!(origin.unwrap(), "https://example.com:8443");

        let (parts, _) = request.into_parts();
        let origin = public_origin_from_context(&&parts, &Config::new()).await;
        assert_eq!(origin.unwrap(), "https://example.com:8443");
    }

    #[tokio::test]
    async fn explicit_headers_of_another_type() {
        let request = Request::get("/")
            .header("host", "from-context.com")
            .body(())
            .unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-host", "explicit.com".parse().unwrap());

        let origin = resolve_public_origin(&&request, Some(&headers), &Config::new()).await;
        assert_eq!(origin.unwrap(), "https://explicit.com");

        let pairs = [("X-Forwarded-Host", "pairs.com")];
        let origin = resolve_public_origin(&&request, Some(&pairs[..]), &Config::new()).await;
        assert_eq!(origin.unwrap(), "https://pairs.com");
    }
}
