//! JSON path tracking for decode diagnostics.

use std::fmt;

/// One step from the document root towards a decoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Object member.
    Field(String),
    /// Array element.
    Index(usize),
    /// Identity of the entity decoded at this point, e.g. `table public.orders`.
    Label { entity: &'static str, id: String },
}

/// Location of a value inside the decoded document.
///
/// Rendered as `tables[2] (table public.orders).info.foreign_keys[0]`, so a
/// failure can be traced back to the offending entity without reading the
/// raw document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonPath {
    segments: Vec<Segment>,
}

impl JsonPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Path to a member of the object at this path.
    pub fn field(&self, name: &str) -> Self {
        self.push(Segment::Field(name.to_string()))
    }

    /// Path to an element of the array at this path.
    pub fn index(&self, index: usize) -> Self {
        self.push(Segment::Index(index))
    }

    /// Attach the identity of the entity found at this path.
    pub fn labelled(&self, entity: &'static str, id: impl Into<String>) -> Self {
        self.push(Segment::Label {
            entity,
            id: id.into(),
        })
    }

    fn push(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "$");
        }

        if !matches!(self.segments.first(), Some(Segment::Field(_))) {
            write!(f, "$")?;
        }

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) if i == 0 => write!(f, "{}", name)?,
                Segment::Field(name) => write!(f, ".{}", name)?,
                Segment::Index(index) => write!(f, "[{}]", index)?,
                Segment::Label { entity, id } => write!(f, " ({} {})", entity, id)?,
            }
        }
        Ok(())
    }
}
