//! Language plugins

mod kotlin;

pub use kotlin::KotlinPlugin;

use crate::features::parsing::ports::LanguageRegistry;

/// Create a registry with every supported language
pub fn create_registry() -> LanguageRegistry {
    let mut registry = LanguageRegistry::new();
    registry.register(Box::new(KotlinPlugin::new()));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::ports::LanguageId;

    #[test]
    fn test_registry_resolves_kotlin_extensions() {
        let registry = create_registry();
        assert!(registry.supports("kt"));
        assert!(registry.supports("kts"));
        assert!(!registry.supports("swift"));
        assert_eq!(
            registry.get_by_extension("kt").map(|p| p.language_id()),
            Some(LanguageId::Kotlin)
        );
    }
}
