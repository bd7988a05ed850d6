//! Render-ready form of a parsed schema: entity nodes in declaration
//! order, plus relation edges with the junction-table rendering
//! decision applied.
//!
//! An edge keeps the cardinality the parser declared and the
//! classifier's rendering decision as two separate fields; the
//! emitter consults both.

use crate::ast::{Cardinality, Field, Model, ModelSchema, Relation};

/// How an edge is drawn, independent of its declared cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeRendering {
    /// Drawn from the declaring model to its target.
    Direct,
    /// The declaring model is a junction table: the edge is drawn
    /// with the target as subject, pointing back at the junction, so
    /// the join reads as a direct many-to-many between neighbors.
    JunctionInverted,
}

#[derive(Debug, Clone)]
pub struct DiagramIR {
    pub entities: Vec<EntityNode>,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone)]
pub struct EntityNode {
    pub name: String,
    pub rows: Vec<AttributeRow>,
}

#[derive(Debug, Clone)]
pub struct AttributeRow {
    /// Display type: `enum(T)`, `T[]`, or the base type.
    pub typ: String,
    pub name: String,
    pub is_pk: bool,
    pub is_fk: bool,
    pub is_unique: bool,
    pub is_indexed: bool,
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub from: String,
    pub to: String,
    /// Cardinality exactly as declared at parse time.
    pub declared: Cardinality,
    pub rendering: EdgeRendering,
    pub label: String,
}

impl DiagramIR {
    /// Classification never rejects an edge: relations referencing
    /// unknown models still come through, so partial schemas stay
    /// visible.
    pub fn from_schema(schema: &ModelSchema) -> Self {
        let entities = schema.models.iter().map(entity_node).collect();
        let edges = schema
            .relations
            .iter()
            .map(|r| classify(r, &schema.relations))
            .collect();

        DiagramIR { entities, edges }
    }
}

/// A model owning two or more relation clauses is a junction table.
pub fn is_junction_table(name: &str, relations: &[Relation]) -> bool {
    relations.iter().filter(|r| r.from == name).count() >= 2
}

fn classify(rel: &Relation, relations: &[Relation]) -> Edge {
    let rendering = if rel.cardinality == Cardinality::ManyToMany
        && is_junction_table(&rel.from, relations)
    {
        EdgeRendering::JunctionInverted
    } else {
        EdgeRendering::Direct
    };

    let label = rel
        .name
        .clone()
        .unwrap_or_else(|| format!("{} → {}", rel.from_field, rel.to_field));

    Edge {
        from: rel.from.clone(),
        to: rel.to.clone(),
        declared: rel.cardinality,
        rendering,
        label,
    }
}

fn entity_node(model: &Model) -> EntityNode {
    let rows = model
        .fields
        .iter()
        .map(|f| AttributeRow {
            typ: display_type(f),
            name: f.name.clone(),
            is_pk: f.is_id,
            is_fk: f.is_foreign_key,
            is_unique: f.is_unique,
            is_indexed: f.is_indexed,
        })
        .collect();

    EntityNode {
        name: model.name.clone(),
        rows,
    }
}

fn display_type(f: &Field) -> String {
    if f.is_enum {
        format!("enum({})", f.typ)
    } else if f.is_array {
        format!("{}[]", f.typ)
    } else {
        f.typ.clone()
    }
}
