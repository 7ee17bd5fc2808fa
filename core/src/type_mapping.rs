#![deny(missing_docs)]

//! # Type Mapping
//!
//! Converts physical SQL column types into the Rust types emitted by the
//! layer templates. The mapping is total: unknown types fall back to
//! `String`.

/// Maps a physical column type (`varchar(64)`, `bigint unsigned`, …) to a
/// Rust type string for generated code.
pub fn rust_type_for(column_type: &str) -> String {
    let lowered = column_type.to_ascii_lowercase();
    let base = lowered
        .split(|c| c == '(' || c == ' ')
        .next()
        .unwrap_or(&lowered);
    let unsigned = lowered.contains("unsigned");

    // tinyint(1) is the MySQL boolean convention.
    if base == "tinyint" && lowered.starts_with("tinyint(1)") {
        return "bool".to_string();
    }

    let mapped = match base {
        "tinyint" => {
            if unsigned {
                "u8"
            } else {
                "i8"
            }
        }
        "smallint" | "year" => {
            if unsigned {
                "u16"
            } else {
                "i16"
            }
        }
        "mediumint" | "int" | "integer" => {
            if unsigned {
                "u32"
            } else {
                "i32"
            }
        }
        "bigint" => {
            if unsigned {
                "u64"
            } else {
                "i64"
            }
        }
        "float" => "f32",
        "double" | "real" | "decimal" | "numeric" => "f64",
        "bool" | "boolean" => "bool",
        "date" => "NaiveDate",
        "datetime" | "timestamp" => "NaiveDateTime",
        "time" => "NaiveTime",
        "json" => "serde_json::Value",
        "blob" | "tinyblob" | "mediumblob" | "longblob" | "binary" | "varbinary" => "Vec<u8>",
        "char" | "varchar" | "text" | "tinytext" | "mediumtext" | "longtext" | "enum" | "set" => {
            "String"
        }
        _ => "String",
    };
    mapped.to_string()
}
