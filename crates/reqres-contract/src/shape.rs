// crates/reqres-contract/src/shape.rs
// ============================================================================
// Module: Contract Shapes
// Description: Tagged structural rules for JSON values.
// Purpose: Describe required keys, value types, and nested shapes declaratively.
// Dependencies: std
// ============================================================================

//! ## Overview
//! A [`Shape`] is a tagged structural rule. Object shapes list their fields in
//! declaration order; the matcher reports violations in that same order.
//! Keys not named by an object shape are ignored.

// ============================================================================
// SECTION: String Formats
// ============================================================================

/// Additional constraints applied to string values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    /// Any string.
    Plain,
    /// A string with at least one character.
    NonEmpty,
    /// A syntactically valid `local@domain.tld` address.
    Email,
}

impl StringFormat {
    /// Returns a stable label for the format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "string",
            Self::NonEmpty => "non-empty",
            Self::Email => "email",
        }
    }
}

// ============================================================================
// SECTION: Shapes
// ============================================================================

/// Structural rule for a single JSON value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Any JSON value, including `null`.
    Any,
    /// A JSON number without a fractional part.
    Integer,
    /// A JSON string with an optional format constraint.
    String(StringFormat),
    /// A JSON object with declared fields.
    Object(ObjectShape),
    /// A JSON array whose every element matches the inner shape.
    Array(Box<Self>),
    /// A value matching at least one alternative.
    AnyOf(Vec<Self>),
}

impl Shape {
    /// Plain string shape.
    #[must_use]
    pub const fn string() -> Self {
        Self::String(StringFormat::Plain)
    }

    /// Non-empty string shape.
    #[must_use]
    pub const fn non_empty_string() -> Self {
        Self::String(StringFormat::NonEmpty)
    }

    /// Email-formatted string shape.
    #[must_use]
    pub const fn email() -> Self {
        Self::String(StringFormat::Email)
    }

    /// Array shape with the given element shape.
    #[must_use]
    pub fn array_of(items: Self) -> Self {
        Self::Array(Box::new(items))
    }

    /// Returns the label used when reporting an expected type.
    #[must_use]
    pub const fn type_label(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Integer => "integer",
            Self::String(_) => "string",
            Self::Object(_) => "object",
            Self::Array(_) => "array",
            Self::AnyOf(_) => "any-of",
        }
    }
}

impl From<ObjectShape> for Shape {
    fn from(object: ObjectShape) -> Self {
        Self::Object(object)
    }
}

// ============================================================================
// SECTION: Objects
// ============================================================================

/// A named field within an object shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Object key.
    pub name: &'static str,
    /// Shape of the value stored under `name`.
    pub shape: Shape,
    /// Whether the key must be present.
    pub required: bool,
}

/// Object rule listing declared fields in order.
///
/// # Invariants
/// - Field names are unique; re-declaring a name replaces the earlier field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectShape {
    /// Declared fields.
    fields: Vec<Field>,
}

impl ObjectShape {
    /// Creates an object shape with no declared fields.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fields: Vec::new(),
        }
    }

    /// Declares a required field.
    #[must_use]
    pub fn required(self, name: &'static str, shape: Shape) -> Self {
        self.with_field(Field {
            name,
            shape,
            required: true,
        })
    }

    /// Declares an optional field; it is checked only when present.
    #[must_use]
    pub fn optional(self, name: &'static str, shape: Shape) -> Self {
        self.with_field(Field {
            name,
            shape,
            required: false,
        })
    }

    /// Returns the declared fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the names of required fields in declaration order.
    pub fn required_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|field| field.required).map(|field| field.name)
    }

    /// Inserts or replaces a field.
    fn with_field(mut self, field: Field) -> Self {
        if let Some(existing) = self.fields.iter_mut().find(|existing| existing.name == field.name)
        {
            *existing = field;
        } else {
            self.fields.push(field);
        }
        self
    }
}
