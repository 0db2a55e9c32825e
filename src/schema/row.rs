//! Raw relation rows as delivered by a schema source.
//!
//! A source hands over each relation as a [`RelationTable`]: the header
//! column names followed by the records in source order. Header names are
//! matched loosely (case, spaces and underscores are ignored), so both the
//! SQLite metaschema spelling `Definitional reference` and the flat-file
//! spelling `DefinitionalReference` name [`Column::DefinitionalReference`].

use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// The four reference relations of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Entities,
    Properties,
    Tables,
    Fields,
}

impl Relation {
    /// All relations, in the order sources are asked for them.
    pub const ALL: [Relation; 4] = [
        Relation::Entities,
        Relation::Properties,
        Relation::Tables,
        Relation::Fields,
    ];

    /// Lowercase relation name, used for file and table names.
    pub fn name(&self) -> &'static str {
        match self {
            Relation::Entities => "entities",
            Relation::Properties => "properties",
            Relation::Tables => "tables",
            Relation::Fields => "fields",
        }
    }

    /// Every column this relation declares.
    pub fn columns(&self) -> &'static [Column] {
        match self {
            Relation::Entities => &[
                Column::Name,
                Column::Label,
                Column::DefinitionalReference,
                Column::Definition,
            ],
            Relation::Properties => &[
                Column::Name,
                Column::Label,
                Column::Entity,
                Column::ValueType,
                Column::RelatedEntity,
                Column::DefinitionalReference,
                Column::Definition,
            ],
            Relation::Tables => &[
                Column::Name,
                Column::Label,
                Column::Filename,
                Column::Entity,
            ],
            Relation::Fields => &[
                Column::Name,
                Column::Label,
                Column::Table,
                Column::Property,
                Column::PrimaryKeyGroup,
                Column::ForeignTable,
                Column::ForeignKey,
                Column::Ordinality,
            ],
        }
    }

    /// Columns the index builder reads. A relation missing any of these is
    /// unusable and contributes nothing.
    pub fn required_columns(&self) -> &'static [Column] {
        match self {
            Relation::Entities | Relation::Properties => &[
                Column::Name,
                Column::Label,
                Column::DefinitionalReference,
                Column::Definition,
            ],
            Relation::Tables => &[Column::Name, Column::Label, Column::Entity],
            Relation::Fields => &[Column::Name, Column::Label, Column::Table, Column::Property],
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named column of one of the reference relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Label,
    DefinitionalReference,
    Definition,
    Entity,
    ValueType,
    RelatedEntity,
    Filename,
    Table,
    Property,
    PrimaryKeyGroup,
    ForeignTable,
    ForeignKey,
    Ordinality,
}

impl Column {
    const ALL: [Column; 14] = [
        Column::Name,
        Column::Label,
        Column::DefinitionalReference,
        Column::Definition,
        Column::Entity,
        Column::ValueType,
        Column::RelatedEntity,
        Column::Filename,
        Column::Table,
        Column::Property,
        Column::PrimaryKeyGroup,
        Column::ForeignTable,
        Column::ForeignKey,
        Column::Ordinality,
    ];

    /// Display spelling, as used by the SQLite metaschema.
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Label => "Label",
            Column::DefinitionalReference => "Definitional reference",
            Column::Definition => "Definition",
            Column::Entity => "Entity",
            Column::ValueType => "Value type",
            Column::RelatedEntity => "Related entity",
            Column::Filename => "Filename",
            Column::Table => "Table",
            Column::Property => "Property",
            Column::PrimaryKeyGroup => "Primary key group",
            Column::ForeignTable => "Foreign table",
            Column::ForeignKey => "Foreign key",
            Column::Ordinality => "Ordinality",
        }
    }

    /// Match a header name against the known columns.
    pub fn parse(header: &str) -> Option<Column> {
        let wanted = normalize(header);
        Self::ALL
            .into_iter()
            .find(|column| normalize(column.as_str()) == wanted)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Column {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// One relation as read from a source: header plus records in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationTable {
    /// Header column names, as spelled by the source
    pub columns: Vec<String>,
    /// Raw records; a record whose length differs from `columns` is malformed
    pub records: Vec<Vec<String>>,
}

impl RelationTable {
    /// Create an empty table with the given header.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            records: Vec::new(),
        }
    }

    /// Append a record.
    pub fn push<I, S>(&mut self, record: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.records.push(record.into_iter().map(Into::into).collect());
    }

    /// Builder-style variant of [`RelationTable::push`].
    pub fn with_record<I, S>(mut self, record: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(record);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Map known header names to their positions.
    pub(crate) fn layout(&self) -> HashMap<Column, usize> {
        let mut layout = HashMap::new();
        for (position, header) in self.columns.iter().enumerate() {
            if let Some(column) = Column::parse(header) {
                layout.entry(column).or_insert(position);
            }
        }
        layout
    }
}

/// A decoded, well-formed row: column to value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: HashMap<Column, String>,
}

impl Row {
    /// Value of `column`, or the empty string when the source lacks it.
    pub fn get(&self, column: Column) -> &str {
        self.cells.get(&column).map(String::as_str).unwrap_or("")
    }

    pub(crate) fn from_record(layout: &HashMap<Column, usize>, record: &[String]) -> Self {
        let cells = layout
            .iter()
            .filter_map(|(column, &position)| {
                record.get(position).map(|value| (*column, value.clone()))
            })
            .collect();
        Self { cells }
    }
}

/// Raw output of a source for all four relations. `None` means the source
/// has no such relation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaRows {
    pub entities: Option<RelationTable>,
    pub properties: Option<RelationTable>,
    pub tables: Option<RelationTable>,
    pub fields: Option<RelationTable>,
}

impl SchemaRows {
    pub fn get(&self, relation: Relation) -> Option<&RelationTable> {
        match relation {
            Relation::Entities => self.entities.as_ref(),
            Relation::Properties => self.properties.as_ref(),
            Relation::Tables => self.tables.as_ref(),
            Relation::Fields => self.fields.as_ref(),
        }
    }

    pub fn set(&mut self, relation: Relation, table: Option<RelationTable>) {
        match relation {
            Relation::Entities => self.entities = table,
            Relation::Properties => self.properties = table,
            Relation::Tables => self.tables = table,
            Relation::Fields => self.fields = table,
        }
    }

    /// Builder-style variant of [`SchemaRows::set`].
    pub fn with(mut self, relation: Relation, table: RelationTable) -> Self {
        self.set(relation, Some(table));
        self
    }

    /// True when the source yielded none of the relations.
    pub fn is_empty(&self) -> bool {
        Relation::ALL.iter().all(|r| self.get(*r).is_none())
    }
}
