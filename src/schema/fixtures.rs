//! Sample schema shared by unit tests.

use super::row::{Relation, RelationTable, SchemaRows};

pub(crate) const ENTITY_COLUMNS: [&str; 4] =
    ["Name", "Label", "Definitional reference", "Definition"];

pub(crate) const PROPERTY_COLUMNS: [&str; 7] = [
    "Name",
    "Label",
    "Entity",
    "Value type",
    "Related entity",
    "Definitional reference",
    "Definition",
];

pub(crate) const TABLE_COLUMNS: [&str; 4] = ["Name", "Label", "Filename", "Entity"];

pub(crate) const FIELD_COLUMNS: [&str; 8] = [
    "Name",
    "Label",
    "Table",
    "Property",
    "Primary key group",
    "Foreign table",
    "Foreign key",
    "Ordinality",
];

pub(crate) fn entities() -> RelationTable {
    RelationTable::new(ENTITY_COLUMNS)
        .with_record(["person", "Person", "NCIT:C25190", "A human being."])
        .with_record(["sample", "Sample", "", "A specimen taken for analysis."])
        .with_record(["order", "Order", "", "A request for goods."])
        .with_record(["age", "Age", "", "A period of life."])
}

pub(crate) fn properties() -> RelationTable {
    RelationTable::new(PROPERTY_COLUMNS)
        .with_record(["age", "Age", "Person", "integer", "", "NCIT:C25150", "Length of life."])
        .with_record(["birth_date", "Birth date", "Person", "date", "", "", "Date of birth."])
        .with_record(["amount", "Amount", "Order", "decimal", "", "", "Monetary amount."])
}

pub(crate) fn tables() -> RelationTable {
    RelationTable::new(TABLE_COLUMNS)
        .with_record(["patients", "Patients", "patients.tsv", "Person"])
        .with_record(["samples", "Samples", "samples.tsv", "Sample"])
        .with_record(["Order", "Orders", "orders.tsv", "Order"])
        .with_record(["audit", "Audit", "audit.tsv", "Ledger"])
}

pub(crate) fn fields() -> RelationTable {
    RelationTable::new(FIELD_COLUMNS)
        .with_record(["patient_id", "Patient ID", "Patients", "Person", "1", "", "", "1"])
        .with_record(["dob", "Date of birth", "Patients", "Birth date", "", "", "", "2"])
        .with_record(["sample_id", "Sample ID", "Samples", "Sample", "1", "", "", "1"])
        .with_record(["donor", "Donor", "Samples", "Person", "", "patients", "patient_id", "2"])
        .with_record(["amount", "Amount", "Orders", "Amount", "", "", "", "1"])
        .with_record(["total", "Total", "Orders", "Amount", "", "", "", "2"])
        .with_record(["ghost_field", "Ghost", "Ghosts", "Amount", "", "", "", "1"])
}

/// The full sample schema.
pub(crate) fn sample_rows() -> SchemaRows {
    SchemaRows::default()
        .with(Relation::Entities, entities())
        .with(Relation::Properties, properties())
        .with(Relation::Tables, tables())
        .with(Relation::Fields, fields())
}
