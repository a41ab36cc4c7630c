//! Infer the best generator for a column based on its SQL type and name.

use crate::generator::GeneratorKind;
use lvt_schema::Column;

/// Select a generator kind for a column.
///
/// Priority: primary key > column name heuristics > SQL type mapping.
pub fn infer_generator(col: &Column) -> GeneratorKind {
    let name = col.name.to_lowercase();
    let sql_type = col.sql_type.to_uppercase();

    if col.is_primary_key {
        return if is_integer_type(&sql_type) {
            GeneratorKind::AutoIncrement
        } else {
            GeneratorKind::SeedId
        };
    }

    if let Some(kind) = infer_from_name(&name) {
        return kind;
    }

    infer_from_type(&sql_type)
}

fn has_word(name: &str, word: &str) -> bool {
    name.split('_').any(|w| w == word)
}

fn infer_from_name(name: &str) -> Option<GeneratorKind> {
    // more specific patterns first

    if name.contains("email") {
        return Some(GeneratorKind::Email);
    }
    if has_word(name, "phone") || has_word(name, "tel") || has_word(name, "mobile") {
        return Some(GeneratorKind::Phone);
    }
    if name.contains("first_name") || name == "fname" || name.contains("given_name") {
        return Some(GeneratorKind::FirstName);
    }
    if name.contains("last_name") || name == "lname" || name.contains("surname") {
        return Some(GeneratorKind::LastName);
    }
    if name.contains("username") || name == "handle" || name == "login" {
        return Some(GeneratorKind::Username);
    }
    if name == "name"
        || name.contains("full_name")
        || name.contains("display_name")
        || name == "author"
    {
        return Some(GeneratorKind::FullName);
    }
    if has_word(name, "url") || has_word(name, "website") || has_word(name, "link") {
        return Some(GeneratorKind::Url);
    }
    if has_word(name, "city") || has_word(name, "town") {
        return Some(GeneratorKind::City);
    }
    if has_word(name, "country") {
        return Some(GeneratorKind::Country);
    }
    if has_word(name, "address") || has_word(name, "street") {
        return Some(GeneratorKind::Address);
    }
    if has_word(name, "company") || has_word(name, "employer") || has_word(name, "organization") {
        return Some(GeneratorKind::Company);
    }
    if has_word(name, "title") || has_word(name, "subject") || has_word(name, "headline") {
        return Some(GeneratorKind::Title);
    }
    if ["description", "content", "body", "bio", "summary", "notes", "about"]
        .iter()
        .any(|w| has_word(name, w))
    {
        return Some(GeneratorKind::LoremIpsum);
    }
    if name.ends_with("_at") || name.contains("timestamp") {
        return Some(GeneratorKind::Timestamp);
    }
    if has_word(name, "date") || name == "birthday" || name == "dob" {
        return Some(GeneratorKind::Date);
    }
    if has_word(name, "time") {
        return Some(GeneratorKind::Time);
    }
    if ["is_", "has_", "can_", "should_"].iter().any(|p| name.starts_with(p))
        || ["active", "enabled", "published", "verified", "completed", "done", "archived"]
            .contains(&name)
    {
        return Some(GeneratorKind::Bool);
    }

    None
}

fn infer_from_type(sql_type: &str) -> GeneratorKind {
    match sql_type {
        t if t.contains("INT") => GeneratorKind::Int,
        t if t.contains("REAL")
            || t.contains("FLOAT")
            || t.contains("DOUBLE")
            || t.contains("NUMERIC")
            || t.contains("DECIMAL") =>
        {
            GeneratorKind::Float
        }
        t if t.contains("BOOL") => GeneratorKind::Bool,
        t if t.contains("TIMESTAMP") || t.contains("DATETIME") => GeneratorKind::Timestamp,
        t if t.contains("DATE") => GeneratorKind::Date,
        t if t.contains("TIME") => GeneratorKind::Time,
        // TEXT, VARCHAR, CHAR, etc.
        _ => GeneratorKind::Text,
    }
}

fn is_integer_type(sql_type: &str) -> bool {
    sql_type.contains("INT")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, sql_type: &str, pk: bool) -> Column {
        Column {
            name: name.into(),
            sql_type: sql_type.into(),
            nullable: !pk,
            is_primary_key: pk,
        }
    }

    #[test]
    fn primary_keys() {
        assert_eq!(infer_generator(&column("id", "TEXT", true)), GeneratorKind::SeedId);
        assert_eq!(infer_generator(&column("id", "INTEGER", true)), GeneratorKind::AutoIncrement);
    }

    #[test]
    fn name_heuristics() {
        assert_eq!(infer_from_name("email"), Some(GeneratorKind::Email));
        assert_eq!(infer_from_name("user_email"), Some(GeneratorKind::Email));
        assert_eq!(infer_from_name("first_name"), Some(GeneratorKind::FirstName));
        assert_eq!(infer_from_name("created_at"), Some(GeneratorKind::Timestamp));
        assert_eq!(infer_from_name("due_date"), Some(GeneratorKind::Date));
        assert_eq!(infer_from_name("is_active"), Some(GeneratorKind::Bool));
        assert_eq!(infer_from_name("published"), Some(GeneratorKind::Bool));
        assert_eq!(infer_from_name("title"), Some(GeneratorKind::Title));
        assert_eq!(infer_from_name("content"), Some(GeneratorKind::LoremIpsum));
        // substring matches inside other words do not count
        assert_eq!(infer_from_name("hotel"), None);
        assert_eq!(infer_from_name("some_field"), None);
    }

    #[test]
    fn type_mapping() {
        assert_eq!(infer_from_type("INTEGER"), GeneratorKind::Int);
        assert_eq!(infer_from_type("TEXT"), GeneratorKind::Text);
        assert_eq!(infer_from_type("BOOLEAN"), GeneratorKind::Bool);
        assert_eq!(infer_from_type("REAL"), GeneratorKind::Float);
        assert_eq!(infer_from_type("DECIMAL(10,2)"), GeneratorKind::Float);
        assert_eq!(infer_from_type("DATETIME"), GeneratorKind::Timestamp);
        assert_eq!(infer_from_type("DATE"), GeneratorKind::Date);
    }

    #[test]
    fn name_beats_type() {
        assert_eq!(infer_generator(&column("email", "TEXT", false)), GeneratorKind::Email);
        assert_eq!(infer_generator(&column("views", "INTEGER", false)), GeneratorKind::Int);
    }
}
