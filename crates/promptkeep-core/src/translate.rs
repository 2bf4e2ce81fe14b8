//! Translation capability.
//!
//! The store has no dependency on translation; this port lets the HTTP
//! adapter be wired with a provider. [`BoxTranslator`] follows the usual
//! object-safe wrapper pattern:
//! 1. `Translator` uses native async fn in traits
//! 2. `TranslatorDyn` boxes the futures and is blanket-implemented
//! 3. `BoxTranslator` wraps `Box<dyn TranslatorDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use promptkeep_types::error::TranslateError;
use promptkeep_types::translate::TranslateRequest;

/// A translation provider.
pub trait Translator: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &str;

    fn translate(
        &self,
        request: &TranslateRequest,
    ) -> impl Future<Output = Result<String, TranslateError>> + Send;
}

/// Object-safe version of [`Translator`] with boxed futures.
pub trait TranslatorDyn: Send + Sync {
    fn name(&self) -> &str;

    fn translate_boxed<'a>(
        &'a self,
        request: &'a TranslateRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, TranslateError>> + Send + 'a>>;
}

impl<T: Translator> TranslatorDyn for T {
    fn name(&self) -> &str {
        Translator::name(self)
    }

    fn translate_boxed<'a>(
        &'a self,
        request: &'a TranslateRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, TranslateError>> + Send + 'a>> {
        Box::pin(self.translate(request))
    }
}

/// Type-erased translator.
pub struct BoxTranslator {
    inner: Box<dyn TranslatorDyn>,
}

impl BoxTranslator {
    pub fn new<T: Translator + 'static>(translator: T) -> Self {
        Self {
            inner: Box::new(translator),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub async fn translate(&self, request: &TranslateRequest) -> Result<String, TranslateError> {
        self.inner.translate_boxed(request).await
    }
}
