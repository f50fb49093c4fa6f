//! User-facing copy shown when a collection cannot be displayed.

use payloads::Resource;
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    /// Shown when the fetch succeeded but returned no records.
    pub empty: Cow<'static, str>,
    /// Shown when the fetch failed.
    pub failure: Cow<'static, str>,
}

impl Messages {
    pub fn new(
        empty: impl Into<Cow<'static, str>>,
        failure: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            empty: empty.into(),
            failure: failure.into(),
        }
    }

    pub fn for_resource(resource: Resource) -> Self {
        let (empty, failure) = match resource {
            Resource::Movies => (
                "No hay películas disponibles en este momento.",
                "Error al cargar las películas. Verifica tu conexión.",
            ),
            Resource::Series => (
                "No hay series disponibles en este momento.",
                "Error al cargar las series. Verifica tu conexión.",
            ),
            Resource::Episodes => (
                "No hay episodios disponibles en este momento.",
                "Error al cargar los episodios. Verifica tu conexión.",
            ),
            Resource::Categories => (
                "No hay categorías disponibles en este momento.",
                "Error al cargar las categorías. Verifica tu conexión.",
            ),
            Resource::Users => (
                "No hay usuarios disponibles en este momento.",
                "Error al cargar los usuarios. Verifica tu conexión.",
            ),
        };
        Self::new(empty, failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_resource_has_distinct_messages() {
        for resource in Resource::ALL {
            let messages = Messages::for_resource(resource);
            assert!(messages.empty.starts_with("No hay"));
            assert!(messages.failure.starts_with("Error al cargar"));
            assert!(messages.failure.ends_with("Verifica tu conexión."));
            assert_ne!(messages.empty, messages.failure);
        }
    }
}
