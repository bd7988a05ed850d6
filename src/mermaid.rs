//! Mermaid `erDiagram` emitter.
//!
//! A pure function of its input: the same IR always yields the same
//! bytes, and every input yields something renderable. Failures are
//! represented as placeholder documents, never propagated.

use crate::ast::Cardinality;
use crate::ir::{AttributeRow, DiagramIR, Edge, EdgeRendering};

const HEADER: &str = "erDiagram";

/// Longest diagnostic text carried into a placeholder document.
const COMMENT_LIMIT: usize = 120;

/// Render the IR as Mermaid ER-diagram markup: the header, one block
/// per entity, one line per edge. Edges referencing entities missing
/// from the entity list are emitted anyway.
pub fn emit(ir: &DiagramIR) -> String {
    if ir.entities.is_empty() && ir.edges.is_empty() {
        return placeholder("empty schema, nothing to draw");
    }

    let mut out = String::new();
    out.push_str(HEADER);
    out.push_str("\n\n");

    for entity in &ir.entities {
        out.push_str(&format!("    {} {{\n", entity.name));
        for row in &entity.rows {
            emit_row(&mut out, row);
        }
        out.push_str("    }\n\n");
    }

    for edge in &ir.edges {
        emit_edge(&mut out, edge);
    }

    out
}

/// Header-only document carrying an explanatory comment. Used for
/// empty input and for internal failures, so callers can always
/// render something.
pub fn placeholder(message: &str) -> String {
    let flat = message.replace(['\n', '\r'], " ");
    let mut comment: String = flat.chars().take(COMMENT_LIMIT).collect();
    if flat.chars().count() > COMMENT_LIMIT {
        comment.push_str("...");
    }
    format!("{HEADER}\n    %% {comment}\n")
}

fn emit_row(out: &mut String, row: &AttributeRow) {
    out.push_str(&format!("        {} {}", row.typ, row.name));
    // Marker order is fixed: PK FK UNIQUE INDEX
    if row.is_pk {
        out.push_str(" PK");
    }
    if row.is_fk {
        out.push_str(" FK");
    }
    if row.is_unique {
        out.push_str(" UNIQUE");
    }
    if row.is_indexed {
        out.push_str(" INDEX");
    }
    out.push('\n');
}

fn emit_edge(out: &mut String, edge: &Edge) {
    let connector = connector(edge.declared);
    match edge.rendering {
        EdgeRendering::JunctionInverted => {
            out.push_str(&format!("    {} {} {}", edge.to, connector, edge.from));
        }
        EdgeRendering::Direct => {
            out.push_str(&format!("    {} {} {}", edge.from, connector, edge.to));
        }
    }
    out.push_str(&format!(" : \"{}\"\n", edge.label));
}

fn connector(card: Cardinality) -> &'static str {
    match card {
        Cardinality::OneToMany => "||--o{",
        Cardinality::ManyToMany => "}o--o{",
        Cardinality::OneToOne => "||--||",
    }
}
