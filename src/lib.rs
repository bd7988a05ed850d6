pub mod ast;
pub mod ddl;
pub mod display;
pub mod ir;
pub mod mermaid;
pub mod prisma;

use wasm_bindgen::prelude::*;

use ir::DiagramIR;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Parse CREATE TABLE text and render the tables it declares as
/// aligned plain text. Input with no recognizable statements yields a
/// short message, never an error.
#[wasm_bindgen(js_name = "sqlToTables")]
pub fn sql_to_tables(source: &str) -> String {
    display::render_tables(&ddl::parse_ddl(source))
}

/// Convert a Prisma-style schema to Mermaid ER-diagram markup.
///
/// Total: blank input gets a placeholder diagram, malformed lines are
/// skipped by the parser, and a schema that yields nothing comes back
/// as a placeholder too, so callers can always render the result.
#[wasm_bindgen(js_name = "prismaToErd")]
pub fn prisma_to_erd(source: &str) -> String {
    if source.trim().is_empty() {
        return mermaid::placeholder("no schema provided");
    }

    let schema = prisma::parse_model(source);
    mermaid::emit(&DiagramIR::from_schema(&schema))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_schema_gets_placeholder() {
        let out = prisma_to_erd("   \n  ");
        assert!(out.starts_with("erDiagram"));
        assert!(out.contains("no schema provided"));
    }

    #[test]
    fn test_unusable_schema_gets_placeholder() {
        let out = prisma_to_erd("model {\n}");
        assert!(out.starts_with("erDiagram"));
        assert!(out.contains("%%"));
    }

    #[test]
    fn test_full_pipeline() {
        let schema = r#"
            model User {
                id Int @id
                email String @unique
            }

            model Post {
                id Int @id
                userId Int
                author User @relation(fields: [userId], references: [id])
            }
        "#;
        let out = prisma_to_erd(schema);

        assert!(out.starts_with("erDiagram\n\n"));
        assert!(out.contains("    User {\n"));
        assert!(out.contains("        Int id PK\n"));
        assert!(out.contains("        String email UNIQUE\n"));
        assert!(out.contains("    Post ||--|| User : \"userId → id\"\n"));
    }

    #[test]
    fn test_junction_table_collapses_in_output() {
        let schema = r#"
            model Post {
                id Int @id
            }

            model Tag {
                id Int @id
            }

            model PostTag {
                postId Int
                tagId Int
                posts Post[] @relation(name: "many_posts", fields: [postId], references: [id])
                tag Tag @relation(fields: [tagId], references: [id])
            }
        "#;
        let out = prisma_to_erd(schema);

        // The junction's fields still appear as an entity block, but
        // the many-to-many edge points at the junction's neighbor
        assert!(out.contains("    PostTag {\n"));
        assert!(out.contains("    Post }o--o{ PostTag : \"many_posts\"\n"));
        assert!(out.contains("    PostTag ||--|| Tag : \"tagId → id\"\n"));
    }

    #[test]
    fn test_reemission_is_byte_identical() {
        let schema = "model A {\n    id Int @id\n}";
        assert_eq!(prisma_to_erd(schema), prisma_to_erd(schema));
    }

    #[test]
    fn test_sql_to_tables_end_to_end() {
        let out = sql_to_tables("CREATE TABLE t (id INT PRIMARY KEY)");
        assert!(out.contains("Table: t"));
        assert!(out.contains("PRIMARY KEY"));

        assert!(sql_to_tables("nothing here").contains("No CREATE TABLE"));
    }
}
