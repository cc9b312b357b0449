use manufacturer_core::{Manufacturer, StoreConfig, StoredManufacturer};

#[test]
fn new_manufacturer_is_not_persisted() {
    let manufacturer = Manufacturer::new("Toyota", "Japan");

    assert_eq!(manufacturer.id, None);
    assert!(!manufacturer.is_persisted());
    assert_eq!(manufacturer.name, "Toyota");
    assert_eq!(manufacturer.country, "Japan");
}

#[test]
fn display_includes_id_and_fields() {
    assert_eq!(
        Manufacturer::with_id(3, "Toyota", "Japan").to_string(),
        "manufacturer(id=3, name=Toyota, country=Japan)"
    );
    assert_eq!(
        Manufacturer::new("Ford", "USA").to_string(),
        "manufacturer(id=none, name=Ford, country=USA)"
    );
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let manufacturer = Manufacturer::with_id(1, "Toyota", "Japan");

    let json = serde_json::to_value(&manufacturer).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["name"], "Toyota");
    assert_eq!(json["country"], "Japan");

    let decoded: Manufacturer = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, manufacturer);
}

#[test]
fn unsaved_manufacturer_serializes_null_id() {
    let json = serde_json::to_value(Manufacturer::new("Ford", "USA")).unwrap();
    assert!(json["id"].is_null());
}

#[test]
fn stored_manufacturer_flattens_entity_fields() {
    let stored = StoredManufacturer {
        manufacturer: Manufacturer::with_id(2, "Saab", "Sweden"),
        is_deleted: true,
    };

    let json = serde_json::to_value(&stored).unwrap();
    assert_eq!(json["id"], 2);
    assert_eq!(json["name"], "Saab");
    assert_eq!(json["is_deleted"], true);
    assert!(!stored.is_active());
}

#[test]
fn store_config_deserializes_with_defaults() {
    let config: StoreConfig =
        serde_json::from_str(r#"{ "db_path": "/var/lib/cars.sqlite3" }"#).unwrap();

    assert_eq!(config.db_path.to_str(), Some("/var/lib/cars.sqlite3"));
    assert_eq!(config.busy_timeout_ms, StoreConfig::default().busy_timeout_ms);
}
