use crate::config::ScopeConfig;
use crate::core::model::normalize_class_name;

use super::ClassInfo;

/// Decides whether a class belongs to the program under analysis.
pub trait ApplicationScope {
    fn is_application_class(&self, class: &ClassInfo) -> bool;
}

impl<F> ApplicationScope for F
where
    F: Fn(&ClassInfo) -> bool,
{
    fn is_application_class(&self, class: &ClassInfo) -> bool {
        self(class)
    }
}

/// Classifies classes by the loader that defined them, optionally carving
/// out packages by qualified-name prefix.
#[derive(Debug, Clone)]
pub struct LoaderScope {
    loader: String,
    exclude_prefixes: Vec<String>,
}

impl LoaderScope {
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            exclude_prefixes: Vec::new(),
        }
    }

    pub fn from_config(config: &ScopeConfig) -> Self {
        Self {
            loader: config.application_loader.clone(),
            exclude_prefixes: config.exclude_prefixes.clone(),
        }
    }

    pub fn with_excluded_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.exclude_prefixes.push(prefix.into());
        self
    }
}

impl Default for LoaderScope {
    fn default() -> Self {
        Self::new("Application")
    }
}

impl ApplicationScope for LoaderScope {
    fn is_application_class(&self, class: &ClassInfo) -> bool {
        if class.loader != self.loader {
            return false;
        }
        if self.exclude_prefixes.is_empty() {
            return true;
        }

        let (qualified, _) = normalize_class_name(&class.name);
        !self
            .exclude_prefixes
            .iter()
            .any(|prefix| qualified.starts_with(prefix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str, loader: &str) -> ClassInfo {
        ClassInfo {
            name: name.to_string(),
            loader: loader.to_string(),
            ..ClassInfo::default()
        }
    }

    #[test]
    fn test_loader_scope() {
        let scope = LoaderScope::default();
        assert!(scope.is_application_class(&class("Lcom/acme/App", "Application")));
        assert!(!scope.is_application_class(&class("Ljava/lang/String", "Primordial")));
    }

    #[test]
    fn test_excluded_prefix() {
        let scope = LoaderScope::default().with_excluded_prefix("com.acme.generated");
        assert!(scope.is_application_class(&class("Lcom/acme/App", "Application")));
        assert!(!scope.is_application_class(&class("Lcom/acme/generated/Stub", "Application")));
    }

    #[test]
    fn test_closure_scope() {
        let everything = |_: &ClassInfo| true;
        assert!(everything.is_application_class(&class("Ljava/lang/Object", "Primordial")));
    }
}
