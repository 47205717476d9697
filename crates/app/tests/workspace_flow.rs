use chrono::{NaiveDate, TimeZone, Utc};

use deskerp_app::{Workspace, WorkspaceEvent};
use deskerp_core::{DomainError, RecordFilter};
use deskerp_events::Event;
use deskerp_inventory::{ItemForm, StockStatus};
use deskerp_reports::{ReportKind, ReportPeriod, ReportSelection};
use deskerp_sales::OrderStatus;
use deskerp_settings::{Settings, SettingChange, Timezone};
use deskerp_users::{UserForm, UserStatus};

fn at(day: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, 10, 30, 0).unwrap()
}

#[test]
fn inventory_screen_round_trip() {
    deskerp_observability::init();
    let mut workspace = Workspace::new();

    let form = ItemForm {
        name: "Standing Desk".to_string(),
        sku: "DSK-001".to_string(),
        category: "Furniture".to_string(),
        quantity: 5,
        min_stock: 5,
        price_cents: 45_000,
        description: "Height adjustable".to_string(),
    };
    let id = workspace.add_item(form.clone(), at(1)).unwrap();
    assert_eq!(workspace.inventory().get(id).unwrap().status, StockStatus::LowStock);

    let mut edited = form;
    edited.quantity = 0;
    workspace.update_item(id, edited, at(2)).unwrap();
    assert_eq!(workspace.inventory().get(id).unwrap().status, StockStatus::OutOfStock);

    let blank = ItemForm {
        sku: "X".to_string(),
        ..ItemForm::default()
    };
    let err = workspace.add_item(blank, at(3)).unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::Validation(_))));

    workspace.remove_item(id, at(4)).unwrap();
    assert!(workspace.inventory().is_empty());

    let types: Vec<&str> = workspace
        .recent_activity(10)
        .unwrap()
        .iter()
        .map(|entry| entry.payload().event_type())
        .collect();
    assert_eq!(
        types,
        vec!["inventory.item.removed", "inventory.item.updated", "inventory.item.added"]
    );
}

#[test]
fn seeded_filters_behave_like_the_screens() {
    let workspace = Workspace::seeded().unwrap();

    let everything = workspace.search_orders(&RecordFilter::everything());
    assert_eq!(everything.len(), workspace.orders().len());

    let by_email = workspace.search_orders(&RecordFilter::new("BOB@EXAMPLE", "all"));
    assert_eq!(by_email.len(), 1);
    assert_eq!(by_email[0].status, OrderStatus::Delivered);

    let no_match = workspace.search_orders(&RecordFilter::new("jane", "Pending"));
    assert!(no_match.is_empty());

    let electronics = workspace.search_items(&RecordFilter::new("", "Electronics"));
    let names: Vec<&str> = electronics.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Laptop Computer", "Wireless Mouse"]);
}

#[test]
fn user_edits_keep_creation_date() {
    let mut workspace = Workspace::seeded().unwrap();
    let bob = workspace
        .search_users(&RecordFilter::new("bob", "all"))
        .first()
        .map(|u| (*u).clone())
        .unwrap();

    let form = UserForm {
        status: UserStatus::Active,
        ..bob.to_form()
    };
    workspace.update_user(bob.id, form, at(5)).unwrap();

    let updated = workspace.users().get(bob.id).unwrap();
    assert!(updated.is_active());
    assert_eq!(updated.created_at, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    assert_eq!(workspace.dashboard().active_users, 4);

    let last = workspace.recent_activity(1).unwrap();
    assert!(matches!(last[0].payload(), WorkspaceEvent::Users(_)));
}

#[test]
fn settings_survive_json_round_trip() {
    let mut workspace = Workspace::new();
    workspace.change_setting(SettingChange::Timezone(Timezone::Pacific)).unwrap();
    workspace.change_setting(SettingChange::CompanyName("Acme Ltd".to_string())).unwrap();

    let json = workspace.settings().to_json_pretty().unwrap();
    let restored = Settings::from_json(&json).unwrap();
    assert_eq!(&restored, workspace.settings());
    assert_eq!(restored.general.timezone, Timezone::Pacific);
}

#[test]
fn customer_report_export() {
    let workspace = Workspace::seeded().unwrap();
    let export = workspace.export_report(
        ReportSelection::new(ReportKind::Customer, ReportPeriod::Quarter),
        NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
    );

    assert_eq!(export.file_name, "customer_report_quarter.csv");
    let lines: Vec<&str> = export.content.lines().collect();
    assert_eq!(lines[0], "Report Type,Period,Generated Date");
    assert_eq!(lines[1], "customer,quarter,2024-01-20");
    assert_eq!(lines[2], "");
    assert_eq!(lines[3], "Customer,Email,Orders,Total Spent");
    assert_eq!(lines[4], "Alice Brown,alice@example.com,1,1379.97");
}
