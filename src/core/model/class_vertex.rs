use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::names::normalize_class_name;
use crate::core::analysis::ClassInfo;

/// Call graph vertex representing one application class.
///
/// Identity is the qualified class name only, so building the same class
/// twice yields two equal vertices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassVertex {
    pub class_name: String,
    pub short_name: String,
    pub is_private: bool,
    pub num_total_fields: usize,
    pub num_static_fields: usize,
    pub num_instance_fields: usize,
    pub num_total_methods: usize,
    pub num_static_methods: usize,
}

impl ClassVertex {
    pub fn from_class(class: &ClassInfo) -> Self {
        let (class_name, short_name) = normalize_class_name(&class.name);

        Self {
            class_name,
            short_name,
            is_private: class.is_private,
            num_total_fields: class.total_fields,
            num_static_fields: class.static_fields,
            num_instance_fields: class.instance_fields,
            num_total_methods: class.methods.len(),
            num_static_methods: class.methods.iter().filter(|m| m.is_static).count(),
        }
    }
}

impl PartialEq for ClassVertex {
    fn eq(&self, other: &Self) -> bool {
        self.class_name == other.class_name
    }
}

impl Eq for ClassVertex {}

impl Hash for ClassVertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class_name.hash(state);
    }
}
