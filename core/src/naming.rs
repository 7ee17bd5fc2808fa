#![deny(missing_docs)]

//! # Naming Transforms
//!
//! Pure mappings between physical schema names (snake_case, possibly
//! prefixed) and code identifiers (PascalCase / lowerCamel), plus the
//! table-prefix stripping rules applied to struct names and filenames.
//!
//! Every transform is deterministic and total: the worst case passes the
//! input through unchanged, never an empty identifier.

use heck::{ToLowerCamelCase, ToUpperCamelCase};

/// Converts an underscore-delimited or raw token to PascalCase.
///
/// `iam_users` -> `IamUsers`, `users` -> `Users`.
pub fn to_struct_ident(raw: &str) -> String {
    if raw.is_empty() {
        return raw.to_string();
    }
    raw.to_upper_camel_case()
}

/// Converts an underscore-delimited or raw token to lowerCamelCase.
pub fn to_lower_camel(raw: &str) -> String {
    if raw.is_empty() {
        return raw.to_string();
    }
    raw.to_lower_camel_case()
}

/// Lowercases the first letter of an identifier, leaving the rest intact.
pub fn first_letter_to_lower(ident: &str) -> String {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Rewrites a trailing `Id` into `ID` so generated names read `UserID`, not
/// `UserId`. A bare `Id` becomes `ID`.
pub fn replace_id_suffix(ident: &str) -> String {
    if ident == "Id" {
        return "ID".to_string();
    }
    match ident.strip_suffix("Id") {
        Some(stem) => format!("{}ID", stem),
        None => ident.to_string(),
    }
}

/// PascalCase field name for a physical column, with the `ID` special case.
///
/// `user_id` -> `UserID`, `id` -> `ID`, `user_name` -> `UserName`.
pub fn pascal_field_name(column_name: &str) -> String {
    replace_id_suffix(&to_struct_ident(column_name))
}

/// Serialization tag name for a physical column: lowerCamel, with an `_id`
/// suffix special-cased to uppercase `ID` rather than `Id`.
///
/// `user_id` -> `userID`, `user_name` -> `userName`, `id` -> `id`.
pub fn to_json_tag(column_name: &str) -> String {
    if let Some(stem) = column_name.strip_suffix("_id") {
        if !stem.is_empty() {
            return format!("{}ID", to_lower_camel(stem));
        }
    }
    to_lower_camel(column_name)
}

/// Strips a configured table-name prefix from a derived struct name.
///
/// If `table_name` starts with `prefix`, the prefix (underscores stripped) is
/// converted to PascalCase; when `struct_name` begins with that PascalCase
/// prefix it is removed and the remainder re-capitalized. Otherwise the name
/// is returned unchanged. Stripping never yields an empty identifier.
///
/// `strip_table_prefix("IamUsers", "iam_users", "iam_")` -> `"Users"`.
pub fn strip_table_prefix(struct_name: &str, table_name: &str, prefix: &str) -> String {
    if prefix.is_empty() || !table_name.starts_with(prefix) {
        return struct_name.to_string();
    }

    let bare = prefix.trim_end_matches('_');
    if bare.is_empty() {
        return struct_name.to_string();
    }
    let pascal_prefix = to_struct_ident(bare);

    match struct_name.strip_prefix(pascal_prefix.as_str()) {
        Some(rest) if !rest.is_empty() => {
            let mut chars = rest.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                None => struct_name.to_string(),
            }
        }
        // Removing the prefix would leave nothing; keep the original.
        _ => struct_name.to_string(),
    }
}

/// Strips a configured table-name prefix from a snake_case filename stem,
/// preserving the extension.
///
/// `iam_users.rs` with prefix `iam_` -> `users.rs`.
pub fn strip_table_prefix_from_filename(filename: &str, table_name: &str, prefix: &str) -> String {
    if prefix.is_empty() || !table_name.starts_with(prefix) {
        return filename.to_string();
    }

    let (stem, ext) = match filename.rfind('.') {
        Some(i) => (&filename[..i], &filename[i..]),
        None => (filename, ""),
    };

    let bare = prefix.trim_end_matches('_');
    if bare.is_empty() {
        return filename.to_string();
    }
    let snake_prefix = format!("{}_", bare);

    match stem.strip_prefix(snake_prefix.as_str()) {
        Some(rest) if !rest.is_empty() => format!("{}{}", rest, ext),
        _ => filename.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_struct_ident() {
        assert_eq!(to_struct_ident("iam_users"), "IamUsers");
        assert_eq!(to_struct_ident("users"), "Users");
        assert_eq!(to_struct_ident(""), "");
    }

    #[test]
    fn test_to_lower_camel() {
        assert_eq!(to_lower_camel("user_name"), "userName");
        assert_eq!(to_lower_camel("id"), "id");
    }

    #[test]
    fn test_replace_id_suffix() {
        assert_eq!(replace_id_suffix("Id"), "ID");
        assert_eq!(replace_id_suffix("UserId"), "UserID");
        assert_eq!(replace_id_suffix("UserName"), "UserName");
    }

    #[test]
    fn test_pascal_field_name() {
        assert_eq!(pascal_field_name("id"), "ID");
        assert_eq!(pascal_field_name("user_id"), "UserID");
        assert_eq!(pascal_field_name("created_at"), "CreatedAt");
    }

    #[test]
    fn test_to_json_tag() {
        assert_eq!(to_json_tag("user_id"), "userID");
        assert_eq!(to_json_tag("user_name"), "userName");
        assert_eq!(to_json_tag("id"), "id");
        assert_eq!(to_json_tag("_id"), "id");
    }

    #[test]
    fn test_strip_table_prefix() {
        assert_eq!(strip_table_prefix("IamUsers", "iam_users", "iam_"), "Users");
        // Prefix absent from the table name: no-op.
        assert_eq!(strip_table_prefix("Users", "users", "iam_"), "Users");
        // Empty prefix: no-op.
        assert_eq!(strip_table_prefix("IamUsers", "iam_users", ""), "IamUsers");
        // Stripping would leave nothing: keep the original.
        assert_eq!(strip_table_prefix("Iam", "iam_", "iam_"), "Iam");
        // Multi-word prefix.
        assert_eq!(
            strip_table_prefix("SysAdminRoles", "sys_admin_roles", "sys_admin_"),
            "Roles"
        );
    }

    #[test]
    fn test_strip_table_prefix_from_filename() {
        assert_eq!(
            strip_table_prefix_from_filename("iam_users.rs", "iam_users", "iam_"),
            "users.rs"
        );
        assert_eq!(
            strip_table_prefix_from_filename("users.rs", "users", "iam_"),
            "users.rs"
        );
        // Stripping would leave an empty stem: keep the original.
        assert_eq!(
            strip_table_prefix_from_filename("iam_.rs", "iam_x", "iam_"),
            "iam_.rs"
        );
    }
}
