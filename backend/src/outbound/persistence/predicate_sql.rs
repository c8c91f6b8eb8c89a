//! Translation of `PropertyPredicate` trees into Diesel boolean expressions.
//!
//! Each node keeps the meaning of `PropertyPredicate::matches`: `Contains`
//! becomes `ILIKE '%needle%'` with LIKE metacharacters escaped, price bounds
//! are inclusive, and an empty conjunction adds no `WHERE` clause at all.

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Bool;

use crate::domain::{PropertyPredicate, TextField};

use super::schema::properties;

pub(crate) type BoxedCondition = Box<dyn BoxableExpression<properties::table, Pg, SqlType = Bool>>;

/// Escape `\`, `%` and `_` so the needle matches literally under `ILIKE`.
pub(crate) fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn contains(field: TextField, needle: &str) -> BoxedCondition {
    let pattern = like_pattern(needle);
    match field {
        TextField::Title => Box::new(properties::title.ilike(pattern)),
        TextField::Location => Box::new(properties::location.ilike(pattern)),
        TextField::ShortDescription => Box::new(properties::short_description.ilike(pattern)),
    }
}

fn match_nothing() -> BoxedCondition {
    // The primary key is never null.
    Box::new(properties::id.is_null())
}

fn conjunction(parts: &[PropertyPredicate]) -> Option<BoxedCondition> {
    parts
        .iter()
        .filter_map(condition_for)
        .reduce(|acc, next| -> BoxedCondition { Box::new(acc.and(next)) })
}

fn disjunction(parts: &[PropertyPredicate]) -> BoxedCondition {
    let mut conditions = Vec::with_capacity(parts.len());
    for part in parts {
        match condition_for(part) {
            Some(condition) => conditions.push(condition),
            // One branch matches everything, so the whole disjunction does.
            None => return Box::new(properties::id.is_not_null()),
        }
    }
    conditions
        .into_iter()
        .reduce(|acc, next| -> BoxedCondition { Box::new(acc.or(next)) })
        .unwrap_or_else(match_nothing)
}

/// Build the `WHERE` condition for `predicate`.
///
/// Returns `None` when the predicate matches every row.
pub(crate) fn condition_for(predicate: &PropertyPredicate) -> Option<BoxedCondition> {
    match predicate {
        PropertyPredicate::All(parts) => conjunction(parts),
        PropertyPredicate::Any(parts) => Some(disjunction(parts)),
        PropertyPredicate::Contains { field, needle } => Some(contains(*field, needle)),
        PropertyPredicate::PropertyTypeIs(kind) => {
            Some(Box::new(properties::property_type.eq(kind.clone())))
        }
        PropertyPredicate::PriceBetween { min, max } => match (*min, *max) {
            (Some(min), Some(max)) => Some(Box::new(properties::price.between(min, max))),
            (Some(min), None) => Some(Box::new(properties::price.ge(min))),
            (None, Some(max)) => Some(Box::new(properties::price.le(max))),
            (None, None) => None,
        },
        PropertyPredicate::BedroomsAtLeast(count) => {
            let count = i32::try_from(*count).unwrap_or(i32::MAX);
            Some(Box::new(properties::bedrooms.ge(count)))
        }
        PropertyPredicate::OwnedBy(owner) => {
            Some(Box::new(properties::user_id.eq(owner.as_ref().to_owned())))
        }
    }
}

#[cfg(test)]
mod tests {
    use diesel::debug_query;
    use rstest::rstest;

    use super::*;
    use crate::domain::{OwnerId, PropertyFilter};

    fn render(predicate: &PropertyPredicate) -> String {
        let mut query = properties::table.select(properties::id).into_boxed();
        if let Some(condition) = condition_for(predicate) {
            query = query.filter(condition);
        }
        debug_query::<Pg, _>(&query).to_string()
    }

    #[rstest]
    #[case("50%_off", "%50\\%\\_off%")]
    #[case("back\\slash", "%back\\\\slash%")]
    #[case("gulshan", "%gulshan%")]
    fn like_pattern_escapes_metacharacters(#[case] needle: &str, #[case] expected: &str) {
        assert_eq!(like_pattern(needle), expected);
    }

    #[rstest]
    fn empty_filter_adds_no_where_clause() {
        let sql = render(&PropertyFilter::new().to_predicate());
        assert!(!sql.contains("WHERE"), "{sql}");
    }

    #[rstest]
    fn search_renders_three_ilike_disjuncts() {
        let sql = render(&PropertyFilter::new().with_search("lake").to_predicate());
        assert_eq!(sql.matches("ILIKE").count(), 3, "{sql}");
        assert_eq!(sql.matches(" OR ").count(), 2, "{sql}");
        assert!(sql.contains("\"properties\".\"short_description\""), "{sql}");
    }

    #[rstest]
    fn combined_filter_renders_conjunction() {
        let filter = PropertyFilter::new()
            .with_location("gulshan")
            .with_property_type("Apartment")
            .with_min_price(40_000.0)
            .with_max_price(50_000.0)
            .with_min_bedrooms(2);
        let sql = render(&filter.to_predicate());

        assert!(sql.contains("\"properties\".\"location\" ILIKE"), "{sql}");
        assert!(sql.contains("\"properties\".\"property_type\" ="), "{sql}");
        assert!(sql.contains("\"properties\".\"price\" BETWEEN"), "{sql}");
        assert!(sql.contains("\"properties\".\"bedrooms\" >="), "{sql}");
        assert_eq!(sql.matches(" AND ").count(), 4, "{sql}");
    }

    #[rstest]
    #[case(Some(10.0), None, ">=")]
    #[case(None, Some(10.0), "<=")]
    fn half_open_price_range(#[case] min: Option<f64>, #[case] max: Option<f64>, #[case] op: &str) {
        let sql = render(&PropertyPredicate::PriceBetween { min, max });
        assert!(sql.contains(&format!("\"properties\".\"price\" {op}")), "{sql}");
    }

    #[rstest]
    fn owner_predicate_is_exact_match() {
        let owner = OwnerId::new("user_alpha").expect("valid owner");
        let sql = render(&PropertyPredicate::OwnedBy(owner));
        assert!(sql.contains("\"properties\".\"user_id\" = $1"), "{sql}");
        assert!(sql.contains("user_alpha"), "{sql}");
    }

    #[rstest]
    fn empty_disjunction_matches_nothing() {
        let sql = render(&PropertyPredicate::Any(Vec::new()));
        assert!(sql.contains("\"properties\".\"id\" IS NULL"), "{sql}");
    }

    #[rstest]
    fn disjunction_with_match_all_branch_matches_everything() {
        let predicate = PropertyPredicate::Any(vec![
            PropertyPredicate::everything(),
            PropertyPredicate::BedroomsAtLeast(2),
        ]);
        let sql = render(&predicate);
        assert!(sql.contains("IS NOT NULL"), "{sql}");
        assert!(!sql.contains("bedrooms"), "{sql}");
    }
}
