//! Declared field tables mapping external names to record attributes.

/// Whether a field must be present in the external document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Absence is a decode failure.
    Required,
    /// Absence (or `null`) decodes to `None`.
    Optional,
}

/// One entry of a record's field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Attribute of the in-memory record this field populates.
    pub attribute: &'static str,
    /// Member name in the external document.
    pub external: &'static str,
    /// Presence requirement.
    pub presence: Presence,
}

impl FieldSpec {
    /// Declare a required field.
    pub const fn required(attribute: &'static str, external: &'static str) -> Self {
        Self {
            attribute,
            external,
            presence: Presence::Required,
        }
    }

    /// Declare an optional field.
    pub const fn optional(attribute: &'static str, external: &'static str) -> Self {
        Self {
            attribute,
            external,
            presence: Presence::Optional,
        }
    }

    /// Check if this field is required.
    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }
}

/// The complete field table of one entity kind.
#[derive(Debug, Clone, Copy)]
pub struct RecordSpec {
    /// Entity kind used in diagnostics, e.g. `foreign key`.
    pub entity: &'static str,
    /// Declared fields, in encoding order.
    pub fields: &'static [FieldSpec],
}

impl RecordSpec {
    /// Look up a field by its external name.
    pub fn external(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.external == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: FieldSpec = FieldSpec::required("name", "rel_name");
    const COMMENT: FieldSpec = FieldSpec::optional("comment", "comment");
    const SPEC: RecordSpec = RecordSpec {
        entity: "relation",
        fields: &[NAME, COMMENT],
    };

    #[test]
    fn test_field_spec_presence() {
        assert!(NAME.is_required());
        assert!(!COMMENT.is_required());
    }

    #[test]
    fn test_record_spec_lookup() {
        assert_eq!(SPEC.external("rel_name"), Some(&NAME));
        assert!(SPEC.external("name").is_none());
        assert_eq!(SPEC.external("comment").map(|f| f.attribute), Some("comment"));
    }
}
