//! Model instances and classes that roles can be scoped to.

use std::collections::HashMap;
use std::fmt;

/// A domain object that roles can be granted on.
///
/// # Example
/// ```
/// use actix_authorization_core::http::authorization::Authorizable;
///
/// struct Document {
///     id: u64,
/// }
///
/// impl Authorizable for Document {
///     fn model_class(&self) -> &str {
///         "Document"
///     }
///
///     fn model_id(&self) -> String {
///         self.id.to_string()
///     }
/// }
///
/// let doc = Document { id: 3 };
/// assert_eq!(doc.model_ref().to_string(), "Document#3");
/// ```
pub trait Authorizable {
    /// Name of the model class, e.g. `"Document"`.
    fn model_class(&self) -> &str;

    /// Identifier of this instance within its class.
    fn model_id(&self) -> String;

    /// Returns an owned reference to this instance.
    fn model_ref(&self) -> ModelRef {
        ModelRef::new(self.model_class(), self.model_id())
    }
}

/// An owned `(class, id)` pointer to a model instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelRef {
    class: String,
    id: String,
}

impl ModelRef {
    pub fn new(class: impl Into<String>, id: impl Into<String>) -> Self {
        ModelRef {
            class: class.into(),
            id: id.into(),
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Authorizable for ModelRef {
    fn model_class(&self) -> &str {
        &self.class
    }

    fn model_id(&self) -> String {
        self.id.clone()
    }

    fn model_ref(&self) -> ModelRef {
        self.clone()
    }
}

impl fmt::Display for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.class, self.id)
    }
}

/// A registered model class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelClass {
    name: String,
}

impl ModelClass {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The application's model class namespace.
///
/// Uppercase atoms in an expression (`Document`, `admin of Workshop`) are
/// looked up here. Built once at startup and read-only afterwards.
///
/// # Example
/// ```
/// use actix_authorization_core::http::authorization::ModelRegistry;
///
/// let models = ModelRegistry::new().with_class("Document").with_class("Workshop");
/// assert!(models.lookup("Document").is_some());
/// assert!(models.lookup("Invoice").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    classes: HashMap<String, ModelClass>,
}

impl ModelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a model class (builder pattern).
    pub fn with_class(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.classes.insert(name.clone(), ModelClass { name });
        self
    }

    /// Finds a class by its exact name.
    pub fn lookup(&self, name: &str) -> Option<&ModelClass> {
        self.classes.get(name)
    }

    /// Returns the number of registered classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if no class is registered.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
