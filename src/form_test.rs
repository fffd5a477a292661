use serde_json::json;

use super::*;
use crate::feature::Attributes;

fn fields(name: &str, date: &str, comments: &str) -> FormFields {
    FormFields { name: name.to_owned(), date: date.to_owned(), comments: comments.to_owned() }
}

// =============================================================
// Seeding
// =============================================================

#[test]
fn default_fields_are_blank() {
    let f = FormFields::default();
    assert_eq!(f, fields("", "", ""));
}

#[test]
fn from_attributes_copies_recognized_keys() {
    let value = json!({"name": "A", "date": "2020-01-01", "comments": "x"});
    let f = FormFields::from_attributes(&Attributes::new(&value));
    assert_eq!(f, fields("A", "2020-01-01", "x"));
}

#[test]
fn from_attributes_missing_keys_render_blank() {
    let value = json!({"name": "A"});
    let f = FormFields::from_attributes(&Attributes::new(&value));
    assert_eq!(f, fields("A", "", ""));
}

// =============================================================
// Merging
// =============================================================

#[test]
fn merge_writes_all_three_keys() {
    let mut props = json!({});
    fields("A", "2020-01-01", "x").merge_into(&mut props);
    assert_eq!(props, json!({"name": "A", "date": "2020-01-01", "comments": "x"}));
}

#[test]
fn merge_overwrites_prior_values() {
    let mut props = json!({"name": "old", "date": "old", "comments": "old"});
    fields("new", "", "").merge_into(&mut props);
    assert_eq!(props["name"], "new");
    assert_eq!(props["date"], "");
    assert_eq!(props["comments"], "");
}

#[test]
fn merge_preserves_unrecognized_keys() {
    let mut props = json!({"OBJECTID": 7, "owner": "city"});
    fields("A", "", "").merge_into(&mut props);
    assert_eq!(props["OBJECTID"], 7);
    assert_eq!(props["owner"], "city");
    assert_eq!(props["name"], "A");
}

#[test]
fn merge_initializes_non_object_properties() {
    let mut props = json!(null);
    fields("A", "", "").merge_into(&mut props);
    assert_eq!(props["name"], "A");
}

#[test]
fn empty_strings_are_written_not_skipped() {
    let mut props = json!({});
    fields("", "", "").merge_into(&mut props);
    assert_eq!(props, json!({"name": "", "date": "", "comments": ""}));
}
