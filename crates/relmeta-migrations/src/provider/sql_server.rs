use thiserror::Error as ThisError;

// store type names that need an explicit length or precision
const UNQUALIFIED_DATA_TYPES: [&str; 13] = [
    "binary varying",
    "binary",
    "char varying",
    "char",
    "character varying",
    "character",
    "national char varying",
    "national character varying",
    "national character",
    "nchar",
    "nvarchar",
    "varbinary",
    "varchar",
];

const SIGNED_INTEGER_TYPES: [&str; 5] = ["i8", "i16", "i32", "i64", "i128"];

const INTEGER_TYPES: [&str; 8] = ["i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64"];

///
/// SqlServerError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SqlServerError {
    #[error(
        "Identity value generation cannot be used for the property '{property}' on entity type '{entity_type}' because the property type is '{property_type}'. Identity value generation can only be used with signed integer properties."
    )]
    IdentityBadType {
        property: String,
        entity_type: String,
        property_type: String,
    },

    #[error(
        "Data type '{data_type}' is not supported in this form. Either specify the length explicitly in the type name, for example as '{data_type}(16)', or remove the data type and use APIs such as HasMaxLength to allow EF choose the data type."
    )]
    UnqualifiedDataType { data_type: String },

    #[error(
        "SQL Server sequences cannot be used to generate values for the property '{property}' on entity type '{entity_type}' because the property type is '{property_type}'. Sequences can only be used with integer properties."
    )]
    SequenceBadType {
        property: String,
        entity_type: String,
        property_type: String,
    },
}

/// Identity columns require a signed integer (or decimal) property type.
pub fn check_identity(
    property: &str,
    entity_type: &str,
    property_type: &str,
) -> Result<(), SqlServerError> {
    if SIGNED_INTEGER_TYPES.contains(&property_type) || property_type == "decimal" {
        Ok(())
    } else {
        Err(SqlServerError::IdentityBadType {
            property: property.to_string(),
            entity_type: entity_type.to_string(),
            property_type: property_type.to_string(),
        })
    }
}

/// Sequence-generated values require an integer property type.
pub fn check_sequence(
    property: &str,
    entity_type: &str,
    property_type: &str,
) -> Result<(), SqlServerError> {
    if INTEGER_TYPES.contains(&property_type) {
        Ok(())
    } else {
        Err(SqlServerError::SequenceBadType {
            property: property.to_string(),
            entity_type: entity_type.to_string(),
            property_type: property_type.to_string(),
        })
    }
}

/// Reject bare character and binary store types; comparison ignores case
/// and surrounding whitespace.
pub fn check_store_type(data_type: &str) -> Result<(), SqlServerError> {
    let normalized = data_type.trim().to_ascii_lowercase();

    if UNQUALIFIED_DATA_TYPES.contains(&normalized.as_str()) {
        return Err(SqlServerError::UnqualifiedDataType {
            data_type: data_type.trim().to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_accepts_signed_integers_only() {
        check_identity("Id", "Blog", "i64").expect("i64");
        check_identity("Id", "Blog", "decimal").expect("decimal");

        let err = check_identity("Id", "Blog", "String").expect_err("string");
        assert_eq!(
            err.to_string(),
            "Identity value generation cannot be used for the property 'Id' on entity type 'Blog' because the property type is 'String'. Identity value generation can only be used with signed integer properties."
        );
    }

    #[test]
    fn sequences_accept_unsigned_integers() {
        check_sequence("Number", "Invoice", "u32").expect("u32");
        assert!(matches!(
            check_sequence("Number", "Invoice", "f64"),
            Err(SqlServerError::SequenceBadType { .. })
        ));
    }

    #[test]
    fn bare_string_types_need_a_length() {
        check_store_type("nvarchar(64)").expect("qualified");
        check_store_type("int").expect("not a sized type");

        let err = check_store_type(" NVARCHAR ").expect_err("bare nvarchar");
        assert_eq!(
            err,
            SqlServerError::UnqualifiedDataType {
                data_type: "NVARCHAR".to_string()
            }
        );
        assert!(err.to_string().contains("'NVARCHAR(16)'"));
    }
}
