//! Data model shared by the parsers, the classifier, and the emitter.
//!
//! Models and relations are kept in declaration order throughout;
//! diagram layout quality depends on it, so ordered `Vec`s are used
//! everywhere, never maps.

/// One column of a parsed `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    /// Raw type token as written, e.g. `VARCHAR(255)`.
    pub typ: String,
    /// Free-text constraint tail; the literal `None` when empty.
    pub constraints: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

/// A data field of a model. Relation-only fields never become a
/// `Field`; they surface as [`Relation`] records instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    /// Base type name, trailing `?` and `[]` stripped.
    pub typ: String,
    pub is_array: bool,
    pub is_enum: bool,
    pub is_id: bool,
    pub is_foreign_key: bool,
    pub is_unique: bool,
    pub is_indexed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub name: String,
    pub fields: Vec<Field>,
}

/// Multiplicity of a relation as declared in the schema text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    OneToOne,
    OneToMany,
    ManyToMany,
}

/// A relationship edge recovered from an `@relation` clause.
///
/// `from`/`to` are not required to name a parsed model; unresolved
/// references are carried through so partial schemas stay visible.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    pub from: String,
    /// Local key column list, joined with `, `.
    pub from_field: String,
    pub to: String,
    /// Referenced key column list, joined with `, `.
    pub to_field: String,
    pub cardinality: Cardinality,
    /// Explicit relation label, if one was given.
    pub name: Option<String>,
}

/// Everything the model parser recovers from one schema text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelSchema {
    pub models: Vec<Model>,
    pub relations: Vec<Relation>,
    /// Names declared as enumerations, used to tell an enum array
    /// (a multi-valued attribute) from an implicit relation list.
    pub enums: Vec<String>,
}
