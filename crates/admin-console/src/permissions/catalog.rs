use crate::model::{Permission, PermissionCategory};

/// Category for permissions whose name has no `.` prefix.
pub const GENERAL_CATEGORY: &str = "general";

/// Groups permissions by the part of their name before the first `.`.
///
/// Categories appear in the order their first permission does, and keep
/// their permissions in input order.
pub fn categorize(permissions: &[Permission]) -> Vec<PermissionCategory> {
    let mut categories: Vec<PermissionCategory> = Vec::new();

    for permission in permissions {
        let name = match permission.name.split_once('.') {
            Some((prefix, _)) if !prefix.is_empty() => prefix,
            _ => GENERAL_CATEGORY,
        };
        match categories.iter_mut().find(|c| c.name == name) {
            Some(category) => category.permissions.push(permission.clone()),
            None => categories.push(PermissionCategory::new(name, vec![permission.clone()])),
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_prefix_in_first_seen_order() {
        let permissions = vec![
            Permission::new(1, "users.view"),
            Permission::new(2, "roles.edit"),
            Permission::new(3, "users.delete"),
            Permission::new(4, "dashboard"),
        ];

        let categories = categorize(&permissions);

        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["users", "roles", "general"]);
        assert_eq!(categories[0].permissions.len(), 2);
        assert_eq!(categories[0].permissions[1].name, "users.delete");
    }

    #[test]
    fn leading_dot_is_general() {
        let categories = categorize(&[Permission::new(1, ".hidden")]);
        assert_eq!(categories[0].name, GENERAL_CATEGORY);
    }
}
