//! Two-pass parser for Prisma-style schema text.
//!
//! Pass one collects enum names; pass two walks the lines with a
//! small state machine (current model + its fields so far). Field
//! lines that do not match the field grammar are skipped so a partly
//! broken schema still yields a diagram.

use super::lexer::{Lexer, Token};
use crate::ast::{Cardinality, Field, Model, ModelSchema, Relation};

/// Parse a Prisma-style schema into models, relations, and enums, in
/// declaration order. Never fails: malformed lines are skipped and
/// parsing continues with the rest of the text.
///
/// Relation fields (an `@relation` attribute, or a bare array of a
/// non-enum type) are excluded from their model's field list; they
/// surface only as [`Relation`] records, and only when the clause
/// names explicit `fields:`/`references:` columns.
pub fn parse_model(input: &str) -> ModelSchema {
    // Pass 1: enum names. Needed before fields are classified, since
    // an array of an enum is a plain multi-valued attribute rather
    // than an implicit relation.
    let mut enums: Vec<String> = Vec::new();
    for line in input.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("enum ") {
            if let Some(name) = header_name(rest) {
                enums.push(name);
            }
        }
    }

    // Pass 2: models and relations.
    let mut models: Vec<Model> = Vec::new();
    let mut relations: Vec<Relation> = Vec::new();
    let mut current: Option<(String, Vec<Field>)> = None;

    for line in input.lines() {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix("model ") {
            if let Some((name, fields)) = current.take() {
                models.push(Model { name, fields });
            }
            // A header without a usable name is skipped along with
            // its body lines, until the next model opens
            current = header_name(rest).map(|name| (name, Vec::new()));
        } else if let Some((model_name, fields)) = current.as_mut() {
            if line.is_empty() || line.starts_with("//") || line.starts_with('}') {
                continue;
            }
            if let Some(parsed) = parse_field_line(line, model_name, &enums) {
                if !parsed.is_relation {
                    fields.push(parsed.field);
                }
                if let Some(rel) = parsed.relation {
                    relations.push(rel);
                }
            }
        }
    }

    if let Some((name, fields)) = current.take() {
        models.push(Model { name, fields });
    }

    ModelSchema {
        models,
        relations,
        enums,
    }
}

/// Second whitespace-separated token of a `model `/`enum ` header,
/// with any glued-on opening brace stripped.
fn header_name(rest: &str) -> Option<String> {
    rest.split_whitespace()
        .next()
        .map(|n| n.trim_end_matches('{'))
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

struct ParsedField {
    field: Field,
    is_relation: bool,
    relation: Option<Relation>,
}

/// Parse one line against the field grammar
/// `<name> <Type>[?][[]] [@attr ...]`. Returns `None` when the line
/// is not a field: wrong leading tokens, lex failure, or leftover
/// tokens that are not attribute clauses.
fn parse_field_line(line: &str, model: &str, enums: &[String]) -> Option<ParsedField> {
    let tokens = Lexer::new(line).tokenize().ok()?;
    let mut pos = 0usize;

    let name = match tokens.get(pos) {
        Some(Token::Ident(s)) => s.clone(),
        _ => return None,
    };
    pos += 1;

    let base = match tokens.get(pos) {
        Some(Token::Ident(s)) => s.clone(),
        _ => return None,
    };
    pos += 1;

    // `?` is consumed and forgotten; optionality does not change the
    // diagram.
    if let Some(Token::Question) = tokens.get(pos) {
        pos += 1;
    }
    let mut array_suffix = false;
    if let Some(Token::Brackets) = tokens.get(pos) {
        array_suffix = true;
        pos += 1;
    }

    // Only attribute clauses may follow; unknown attribute names are
    // tolerated (`@updatedAt` and friends), anything else means this
    // line is not a field.
    let mut attrs: Vec<(String, bool, Option<String>)> = Vec::new();
    loop {
        match tokens.get(pos) {
            Some(Token::Attr { name, block, args }) => {
                attrs.push((name.clone(), *block, args.clone()));
                pos += 1;
            }
            Some(Token::Eof) | None => break,
            _ => return None,
        }
    }

    let is_enum = enums.iter().any(|e| e == &base);
    let is_array = array_suffix && !is_enum;
    let has_relation_attr = attrs.iter().any(|(n, _, _)| n == "relation");
    let is_relation = has_relation_attr || is_array;

    let field = Field {
        name,
        typ: base.clone(),
        is_array,
        is_enum,
        is_id: attrs
            .iter()
            .any(|(n, _, args)| n == "id" && args.is_none()),
        is_foreign_key: has_relation_attr,
        is_unique: attrs
            .iter()
            .any(|(n, _, args)| n == "unique" && args.is_none()),
        is_indexed: attrs
            .iter()
            .any(|(n, block, _)| n == "index" && *block),
    };

    let relation = attrs
        .iter()
        .find(|(n, _, _)| n == "relation")
        .and_then(|(_, _, args)| args.as_deref())
        .and_then(|args| parse_relation_args(args, model, &base, array_suffix));

    Some(ParsedField {
        field,
        is_relation,
        relation,
    })
}

/// Pull `fields: [...]`, `references: [...]`, and `name: "..."` out
/// of a raw `@relation(...)` argument blob. A clause without explicit
/// join columns produces no relation record.
///
/// The cardinality recorded here is the parser's provisional guess;
/// the classifier may change how the edge is drawn but never this
/// value.
fn parse_relation_args(
    args: &str,
    from: &str,
    to: &str,
    is_list: bool,
) -> Option<Relation> {
    let from_field = bracket_list(args, "fields")?;
    let to_field = bracket_list(args, "references")?;
    let name = quoted_value(args, "name");

    let cardinality = if is_list {
        if args.contains("many") {
            Cardinality::ManyToMany
        } else {
            Cardinality::OneToMany
        }
    } else {
        Cardinality::OneToOne
    };

    Some(Relation {
        from: from.to_string(),
        from_field,
        to: to.to_string(),
        to_field,
        cardinality,
        name,
    })
}

/// Find `key:` in an argument blob, returning the offset just past
/// the colon. Guards against matching in the middle of a longer
/// identifier.
fn find_key(args: &str, key: &str) -> Option<usize> {
    let mut search = 0;
    while let Some(idx) = args[search..].find(key) {
        let abs = search + idx;
        let boundary = abs == 0
            || !args[..abs]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric() || c == '_');
        let after = args[abs + key.len()..].trim_start();
        if boundary {
            if let Some(rest) = after.strip_prefix(':') {
                return Some(args.len() - rest.len());
            }
        }
        search = abs + key.len();
    }
    None
}

/// `key: [a, b]` → `"a, b"`. None when the list is missing or empty.
fn bracket_list(args: &str, key: &str) -> Option<String> {
    let at = find_key(args, key)?;
    let rest = args[at..].trim_start().strip_prefix('[')?;
    let end = rest.find(']')?;
    let items: Vec<&str> = rest[..end]
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items.join(", "))
    }
}

/// `key: "value"` → `"value"`.
fn quoted_value(args: &str, key: &str) -> Option<String> {
    let at = find_key(args, key)?;
    let rest = args[at..].trim_start().strip_prefix('"')?;
    let end = rest.find('"')?;
    Some(rest[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_models_one_relation() {
        let schema = r#"
            model User {
                id Int @id
                name String
            }

            model Post {
                id Int @id
                userId Int
                user User @relation(fields: [userId], references: [id])
            }
        "#;
        let parsed = parse_model(schema);

        assert_eq!(parsed.models.len(), 2);
        assert_eq!(parsed.models[0].name, "User");
        assert_eq!(parsed.models[1].name, "Post");
        assert_eq!(parsed.relations.len(), 1);

        let rel = &parsed.relations[0];
        assert_eq!(rel.from, "Post");
        assert_eq!(rel.to, "User");
        assert_eq!(rel.from_field, "userId");
        assert_eq!(rel.to_field, "id");
        assert_eq!(rel.cardinality, Cardinality::OneToOne);
        assert_eq!(rel.name, None);
    }

    #[test]
    fn test_relation_field_excluded_from_model() {
        let schema = r#"
            model Post {
                id Int @id
                user User @relation(fields: [userId], references: [id])
            }
        "#;
        let parsed = parse_model(schema);
        let names: Vec<&str> = parsed.models[0]
            .fields
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["id"]);
    }

    #[test]
    fn test_bare_array_is_implicit_relation_without_record() {
        let schema = r#"
            model User {
                id Int @id
                posts Post[]
            }
        "#;
        let parsed = parse_model(schema);

        // Excluded as a field, but no join columns so no relation
        assert_eq!(parsed.models[0].fields.len(), 1);
        assert!(parsed.relations.is_empty());
    }

    #[test]
    fn test_enum_array_is_a_plain_field() {
        let schema = r#"
            enum Role {
                ADMIN
                USER
            }

            model User {
                id Int @id
                roles Role[]
            }
        "#;
        let parsed = parse_model(schema);

        assert_eq!(parsed.enums, vec!["Role"]);
        let roles = &parsed.models[0].fields[1];
        assert_eq!(roles.name, "roles");
        assert!(roles.is_enum);
        assert!(!roles.is_array);
        assert!(parsed.relations.is_empty());
    }

    #[test]
    fn test_relation_without_join_columns_dropped() {
        let schema = r#"
            model Post {
                id Int @id
                author User @relation("wrote")
            }
        "#;
        let parsed = parse_model(schema);
        assert!(parsed.relations.is_empty());
        // Still a relation field, so not displayed
        assert_eq!(parsed.models[0].fields.len(), 1);
    }

    #[test]
    fn test_provisional_cardinality() {
        let schema = r#"
            model A {
                b B @relation(fields: [bId], references: [id])
                cs C[] @relation(fields: [cId], references: [id])
                ds D[] @relation(name: "many_sided", fields: [dId], references: [id])
            }
        "#;
        let parsed = parse_model(schema);

        assert_eq!(parsed.relations[0].cardinality, Cardinality::OneToOne);
        assert_eq!(parsed.relations[1].cardinality, Cardinality::OneToMany);
        assert_eq!(parsed.relations[2].cardinality, Cardinality::ManyToMany);
        assert_eq!(parsed.relations[2].name.as_deref(), Some("many_sided"));
    }

    #[test]
    fn test_field_flags() {
        let schema = r#"
            model User {
                id Int @id
                email String @unique
                handle String @default("anon") @unique
                joined DateTime @updatedAt
            }
        "#;
        let parsed = parse_model(schema);
        let fields = &parsed.models[0].fields;

        assert!(fields[0].is_id);
        assert!(fields[1].is_unique);
        assert!(fields[2].is_unique);
        // Unknown attribute tolerated, field kept
        assert_eq!(fields[3].name, "joined");
    }

    #[test]
    fn test_junk_lines_skipped() {
        let schema = r#"
            model User {
                id Int @id
                @@index([id])
                ???
                // a comment
            }
        "#;
        let parsed = parse_model(schema);
        assert_eq!(parsed.models[0].fields.len(), 1);
    }

    #[test]
    fn test_composite_key_lists_joined() {
        let schema = r#"
            model M {
                n N @relation(fields: [a, b], references: [x, y])
            }
        "#;
        let parsed = parse_model(schema);
        assert_eq!(parsed.relations[0].from_field, "a, b");
        assert_eq!(parsed.relations[0].to_field, "x, y");
    }

    #[test]
    fn test_last_model_flushed() {
        let schema = "model Tail {\n    id Int @id\n}";
        let parsed = parse_model(schema);
        assert_eq!(parsed.models.len(), 1);
        assert_eq!(parsed.models[0].name, "Tail");
    }

    #[test]
    fn test_nameless_model_skipped_parsing_continues() {
        let schema = r#"
            model First {
                id Int @id
            }

            model {
                orphan Int
            }

            model Second {
                id Int @id
            }
        "#;
        let parsed = parse_model(schema);

        let names: Vec<&str> = parsed.models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        // The nameless model's body lines are dropped, not attached
        // to a neighbor
        assert_eq!(parsed.models[0].fields.len(), 1);
        assert_eq!(parsed.models[1].fields.len(), 1);
    }
}
