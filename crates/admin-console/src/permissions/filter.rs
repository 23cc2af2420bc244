use crate::model::{Permission, PermissionCategory};
use std::borrow::Cow;

/// Narrows `categories` to those matching `query`, case-insensitively.
///
/// - A category whose name matches keeps all its permissions.
/// - Otherwise it keeps the permissions whose name or description matches,
///   and is dropped when none do.
///
/// Order is preserved. A blank query returns the input itself.
///
/// ```rust
/// use admin_console::model::{Permission, PermissionCategory};
/// use admin_console::permissions::filter_categories;
/// use std::borrow::Cow;
///
/// let categories = vec![PermissionCategory::new(
///     "Billing",
///     vec![Permission::new(1, "refund"), Permission::new(2, "invoice")],
/// )];
///
/// assert!(matches!(filter_categories(&categories, ""), Cow::Borrowed(_)));
/// assert_eq!(filter_categories(&categories, "ref")[0].permissions.len(), 1);
/// ```
pub fn filter_categories<'a>(
    categories: &'a [PermissionCategory],
    query: &str,
) -> Cow<'a, [PermissionCategory]> {
    let query = query.trim();
    if query.is_empty() {
        return Cow::Borrowed(categories);
    }
    let needle = query.to_lowercase();

    let filtered = categories
        .iter()
        .filter_map(|category| {
            if contains(&category.name, &needle) {
                return Some(category.clone());
            }
            let permissions: Vec<Permission> = category
                .permissions
                .iter()
                .filter(|p| permission_matches(p, &needle))
                .cloned()
                .collect();
            (!permissions.is_empty()).then(|| PermissionCategory {
                name: category.name.clone(),
                permissions,
            })
        })
        .collect();

    Cow::Owned(filtered)
}

fn permission_matches(permission: &Permission, needle: &str) -> bool {
    contains(&permission.name, needle)
        || permission
            .description
            .as_deref()
            .is_some_and(|d| contains(d, needle))
}

// `needle` is already lowercase.
fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_matches_count() {
        let categories = vec![PermissionCategory::new(
            "users",
            vec![
                Permission::new(1, "users.ban").with_description("Suspend an account"),
                Permission::new(2, "users.view"),
            ],
        )];

        let result = filter_categories(&categories, "SUSPEND");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].permissions, vec![categories[0].permissions[0].clone()]);
    }

    #[test]
    fn whitespace_query_is_identity() {
        let categories = vec![PermissionCategory::new("roles", vec![])];
        assert!(matches!(filter_categories(&categories, "   "), Cow::Borrowed(_)));
    }

    #[test]
    fn padded_query_matches_like_trimmed_one() {
        let categories = vec![PermissionCategory::new(
            "billing",
            vec![Permission::new(1, "refund"), Permission::new(2, "invoice")],
        )];
        assert_eq!(
            filter_categories(&categories, "  refund \t"),
            filter_categories(&categories, "refund")
        );
    }
}
