//! A reference prototype: a website description with a few fixed fields and any number of
//! extra attributes (category, keywords, creation date and the like).

use std::collections::BTreeMap;
use std::fmt;

use crate::{Attributes, DeepCopy, Prototype, Result, Value};

const NAME: &str = "name";
const DOMAIN: &str = "domain";
const DESCRIPTION: &str = "description";
const AUTHOR: &str = "author";

/// A website description used as a template for similar websites.
///
/// `name`, `domain`, `description` and `author` are always present and start out as text. Any
/// other attribute is kept in an open attribute bag. Every attribute, fixed or not, accepts any
/// kind of [`Value`].
///
/// # Example
///
/// ```rust
/// use prototype_registry::{Value, Website};
///
/// let site = Website::new(
///     "ContentGardening",
///     "contentgardening.com",
///     "Automation and data-driven apps",
///     "Kamon Ayeva",
/// )
/// .with_attribute("category", "Blog")
/// .with_attribute("keywords", vec!["python", "data", "apis", "automation"]);
///
/// assert_eq!(site.name(), "ContentGardening");
/// assert_eq!(site.attribute("category").and_then(Value::as_text), Some("Blog"));
/// ```
#[derive(Debug, PartialEq)]
pub struct Website {
    name: Value,
    domain: Value,
    description: Value,
    author: Value,
    extras: Attributes,
}

impl Website {
    /// Creates a website description without extra attributes.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        domain: impl Into<String>,
        description: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            name: Value::Text(name.into()),
            domain: Value::Text(domain.into()),
            description: Value::Text(description.into()),
            author: Value::Text(author.into()),
            extras: Attributes::new(),
        }
    }

    /// Sets an attribute while building the description.
    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value.into());
        self
    }

    fn set(&mut self, name: &str, value: Value) {
        match name {
            NAME => self.name = value,
            DOMAIN => self.domain = value,
            DESCRIPTION => self.description = value,
            AUTHOR => self.author = value,
            _ => {
                self.extras.set(name, value);
            }
        }
    }

    /// The name of the website.
    #[must_use]
    pub fn name(&self) -> &Value {
        &self.name
    }

    /// The domain the website is served from.
    #[must_use]
    pub fn domain(&self) -> &Value {
        &self.domain
    }

    /// A short description of the website.
    #[must_use]
    pub fn description(&self) -> &Value {
        &self.description
    }

    /// The author of the website.
    #[must_use]
    pub fn author(&self) -> &Value {
        &self.author
    }

    /// An extra attribute, if present.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.extras.get(name)
    }

    /// An extra attribute for modification, if present.
    pub fn attribute_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.extras.get_mut(name)
    }

    /// All extra attributes.
    #[must_use]
    pub fn extra_attributes(&self) -> &Attributes {
        &self.extras
    }
}

impl DeepCopy for Website {
    fn deep_copy(&self) -> Result<Self> {
        Ok(Self {
            name: self.name.deep_copy()?,
            domain: self.domain.deep_copy()?,
            description: self.description.deep_copy()?,
            author: self.author.deep_copy()?,
            extras: self.extras.deep_copy()?,
        })
    }
}

impl Prototype for Website {
    fn set_attribute(&mut self, name: &str, value: Value) -> Result<()> {
        self.set(name, value);
        Ok(())
    }
}

impl fmt::Display for Website {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Website \"{}\"", self.name)?;

        let mut lines: BTreeMap<&str, String> = self
            .extras
            .iter()
            .map(|(name, value)| (name.as_str(), value.to_string()))
            .collect();
        lines.insert(DOMAIN, self.domain.to_string());
        lines.insert(DESCRIPTION, self.description.to_string());
        lines.insert(AUTHOR, self.author.to_string());

        for (name, value) in lines {
            writeln!(f, "{name}: {value}")?;
        }

        Ok(())
    }
}
