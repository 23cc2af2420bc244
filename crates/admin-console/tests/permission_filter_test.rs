use admin_console::model::{Permission, PermissionCategory};
use admin_console::permissions::{categorize, filter_categories};
use std::borrow::Cow;

fn catalog() -> Vec<PermissionCategory> {
    vec![
        PermissionCategory::new(
            "Billing",
            vec![
                Permission::new(1, "refund").with_description("Return a payment"),
                Permission::new(2, "invoice"),
            ],
        ),
        PermissionCategory::new(
            "Users",
            vec![
                Permission::new(3, "users.view"),
                Permission::new(4, "users.invite").with_description("Send an invoice-free invitation"),
            ],
        ),
        PermissionCategory::new("Reports", vec![Permission::new(5, "reports.export")]),
    ]
}

#[test]
fn test_empty_query_returns_input_unchanged() {
    let categories = catalog();

    let result = filter_categories(&categories, "");

    match result {
        Cow::Borrowed(slice) => assert!(std::ptr::eq(slice, categories.as_slice())),
        Cow::Owned(_) => panic!("empty query must not copy"),
    }
}

#[test]
fn test_category_name_match_keeps_every_permission() {
    let categories = catalog();

    let result = filter_categories(&categories, "bill");

    assert_eq!(result.len(), 1);
    assert_eq!(result[0], categories[0]);
}

#[test]
fn test_permission_name_match_keeps_only_matches() {
    let categories = catalog();

    let result = filter_categories(&categories, "ref");

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].name, "Billing");
    assert_eq!(result[0].permissions, vec![categories[0].permissions[0].clone()]);
}

#[test]
fn test_matches_across_categories_keep_order() {
    let categories = catalog();

    // "invoice" names a Billing permission and appears in a Users description
    let result = filter_categories(&categories, "Invoice");

    let names: Vec<&str> = result.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Billing", "Users"]);
    assert_eq!(result[0].permissions[0].name, "invoice");
    assert_eq!(result[1].permissions[0].name, "users.invite");
}

#[test]
fn test_no_match_drops_everything() {
    assert!(filter_categories(&catalog(), "zzz").is_empty());
}

#[test]
fn test_categorized_permissions_can_be_filtered() {
    let flat = vec![
        Permission::new(1, "billing.refund"),
        Permission::new(2, "billing.invoice"),
        Permission::new(3, "users.view"),
    ];

    let categories = categorize(&flat);
    let result = filter_categories(&categories, "users");

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].permissions.len(), 1);
}
