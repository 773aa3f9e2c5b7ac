//! Failure message assembly
//!
//! [`MessageBuilder`] is total and deterministic: the same inputs always give
//! the same text and building never fails. A because-override replaces
//! everything. Otherwise the message is assembled in a fixed order:
//!
//! 1. subject: `Parameter 'name'` (or `The value` for unnamed arguments)
//! 2. element qualifier: `contains an element that`, for element failures
//! 3. the check's violation phrase, closing the first sentence
//! 4. declared type: `Its type is 'T'.`
//! 5. value: `The actual value is 'v'.` (`null` for null)
//! 6. auxiliary parameters: `Specified 'minimum' is '5'.`, in supplied order
//!
//! ```text
//! Parameter 'count' is null.
//! Parameter 'ports' contains an element that is not in range. The actual value is '0'. Specified 'minimum' is '1'. Specified 'maximum' is '65535'.
//! ```

/// Rendering of a null value.
pub const NULL_SENTINEL: &str = "null";

/// A value as it appears in a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// The value is null.
    Null,
    /// The value's text.
    Text(String),
}

impl From<Option<String>> for Rendered {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Null, Self::Text)
    }
}

/// Builds the text of a failure.
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder<'a> {
    because: Option<&'a str>,
    parameter: Option<&'a str>,
    element: bool,
    phrase: &'a str,
    type_name: Option<&'a str>,
    value: Option<Rendered>,
    params: Vec<(&'a str, &'a str)>,
}

impl<'a> MessageBuilder<'a> {
    /// Starts a message with the check's violation phrase, e.g. `"is null"`.
    pub fn new(phrase: &'a str) -> Self {
        Self {
            phrase,
            ..Self::default()
        }
    }

    /// Sets the caller's override; a non-empty override becomes the whole
    /// message.
    #[must_use = "builder methods must be chained or built"]
    pub fn because(mut self, because: Option<&'a str>) -> Self {
        self.because = because;
        self
    }

    /// Sets the parameter name.
    #[must_use = "builder methods must be chained or built"]
    pub fn parameter(mut self, name: Option<&'a str>) -> Self {
        self.parameter = name;
        self
    }

    /// Marks the failure as concerning one element of an enumerable.
    #[must_use = "builder methods must be chained or built"]
    pub fn element(mut self, element: bool) -> Self {
        self.element = element;
        self
    }

    /// Adds the declared type qualifier.
    #[must_use = "builder methods must be chained or built"]
    pub fn type_name(mut self, type_name: &'a str) -> Self {
        self.type_name = Some(type_name);
        self
    }

    /// Adds the failing value qualifier.
    #[must_use = "builder methods must be chained or built"]
    pub fn value(mut self, value: impl Into<Rendered>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Appends an auxiliary parameter qualifier.
    #[must_use = "builder methods must be chained or built"]
    pub fn param(mut self, name: &'a str, value: &'a str) -> Self {
        self.params.push((name, value));
        self
    }

    /// Assembles the message.
    pub fn build(&self) -> String {
        if let Some(because) = self.because.filter(|because| !because.is_empty()) {
            return because.to_owned();
        }

        let mut message = String::with_capacity(64);
        match self.parameter {
            Some(name) => {
                message.push_str("Parameter '");
                message.push_str(name);
                message.push('\'');
            }
            None => message.push_str("The value"),
        }
        if self.element {
            message.push_str(" contains an element that");
        }
        let phrase = self.phrase.trim();
        if !phrase.is_empty() {
            message.push(' ');
            message.push_str(phrase);
        }
        message.push('.');

        if let Some(type_name) = self.type_name {
            message.push_str(" Its type is '");
            message.push_str(type_name);
            message.push_str("'.");
        }
        match &self.value {
            Some(Rendered::Text(text)) => {
                message.push_str(" The actual value is '");
                message.push_str(text);
                message.push_str("'.");
            }
            Some(Rendered::Null) => {
                message.push_str(" The actual value is ");
                message.push_str(NULL_SENTINEL);
                message.push('.');
            }
            None => {}
        }
        for (name, value) in &self.params {
            message.push_str(" Specified '");
            message.push_str(name);
            message.push_str("' is '");
            message.push_str(value);
            message.push_str("'.");
        }
        message
    }
}
