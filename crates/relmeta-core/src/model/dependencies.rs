use std::{any::Any, collections::BTreeMap, fmt, sync::Arc};

type Service = Arc<dyn Any + Send + Sync>;

///
/// ModelDependencies
///
/// Opaque bundle of runtime services (comparers, value generators, ...)
/// attached to a model before it is finalized. The core never inspects the
/// services; it only carries them to consumers of the frozen model.
///

#[derive(Clone, Default)]
pub struct ModelDependencies {
    services: BTreeMap<&'static str, Service>,
}

impl ModelDependencies {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_service<T: Any + Send + Sync>(mut self, name: &'static str, service: T) -> Self {
        self.services.insert(name, Arc::new(service));
        self
    }

    /// Borrow a service by name, if present and of the requested type.
    #[must_use]
    pub fn service<T: Any + Send + Sync>(&self, name: &str) -> Option<&T> {
        self.services.get(name)?.downcast_ref::<T>()
    }

    pub fn service_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.services.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl fmt::Debug for ModelDependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.services.keys()).finish()
    }
}
