#![cfg(feature = "serde")]

use uid_index::{BitLayout, IndexConfig, UidIndex};

#[test]
fn config_loads_with_defaults() {
    let config: IndexConfig =
        serde_json::from_str(r#"{ "initial_population_size": 10000, "number_of_timesteps": 7300 }"#).unwrap();

    assert_eq!(config, IndexConfig::new(10_000, 7_300));
    assert_eq!(UidIndex::from_config(config).unwrap().layout().child_bits(), 3);
}

#[test]
fn config_round_trips_through_json() {
    let config = IndexConfig::new(500, 1_000).with_max_children(4).with_year_size(100);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(serde_json::from_str::<IndexConfig>(&json).unwrap(), config);
}

#[test]
fn layout_serializes_field_widths() {
    let layout = BitLayout::from_config(&IndexConfig::new(10_000, 7_300)).unwrap();
    let value = serde_json::to_value(layout).unwrap();

    assert_eq!(value["population_bits"], 14);
    assert_eq!(value["year_bits"], 5);
}
