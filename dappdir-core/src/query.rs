//! Listing filters: what `GET /dapps` and `GET /comments` ask a backend for.
//!
//! Filters are conjunctions of exact-match and value-in-set predicates. There
//! is no range, text or sort support; results come back in natural storage
//! order, capped by the query limit.
//!
//! ```ignore
//! use dappdir_core::query::{Query, Filter};
//!
//! let query = Query::builder()
//!     .and(Filter::eq("category", "DeFi"))
//!     .and(Filter::any_of("chains", vec!["Ethereum"]))
//!     .limit(100)
//!     .build();
//! ```
//!
//! Backends execute a query by implementing [`QueryVisitor`] over [`Expr`].

use bson::Bson;

use crate::error::DocumentStoreError;

/// How a predicate compares a stored field with its operand.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOp {
    /// The stored value equals the operand. An array field matches when one element does.
    Eq,
    /// The field's value, or any element of an array field, is one of the given values.
    AnyOf,
}

/// A predicate tree over stored documents.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Every child must hold. An empty conjunction matches everything.
    And(Vec<Expr>),
    /// One comparison against a top-level field.
    Field {
        field: String,
        op: FieldOp,
        /// Operand; an array for [`FieldOp::AnyOf`].
        value: Bson,
    },
}

impl Expr {
    pub fn field(field: String, op: FieldOp, value: Bson) -> Self {
        Expr::Field { field, op, value }
    }

    /// Conjoins `other`, flattening into an existing conjunction.
    pub fn and(self, other: Expr) -> Self {
        match self {
            Expr::And(mut list) => {
                list.push(other);
                Expr::And(list)
            }
            _ => Expr::And(vec![self, other]),
        }
    }
}

/// What to fetch from one collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// `None` selects every document.
    pub filter: Option<Expr>,
    /// Result cap; listings always set one.
    pub limit: Option<usize>,
}

impl Query {
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }
}

/// Constructors for the predicates the listing endpoints use.
pub struct Filter;

impl Filter {
    /// `field == value`, e.g. `category == "DeFi"`.
    pub fn eq(field: impl Into<String>, value: impl Into<Bson>) -> Expr {
        Expr::field(field.into(), FieldOp::Eq, value.into())
    }

    /// Matches documents where the field (or an element of the array field) is one of `values`.
    pub fn any_of<V: Into<Bson>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Expr {
        Expr::field(
            field.into(),
            FieldOp::AnyOf,
            Bson::Array(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Conjunction of `exprs`.
    pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::And(exprs.into_iter().collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    pub fn new() -> Self {
        QueryBuilder::default()
    }

    /// Adds a predicate to the conjunction.
    pub fn and(mut self, expr: Expr) -> Self {
        self.query.filter = Some(match self.query.filter.take() {
            Some(existing) => existing.and(expr),
            None => expr,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.query.limit = Some(limit);
        self
    }

    pub fn build(self) -> Query {
        self.query
    }
}

/// Walks an [`Expr`] tree; backends implement it to evaluate or translate filters.
pub trait QueryVisitor {
    type Output;
    type Error: Into<DocumentStoreError>;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error>;
    fn visit_field(
        &mut self,
        field: &str,
        op: &FieldOp,
        value: &Bson,
    ) -> Result<Self::Output, Self::Error>;

    fn visit_expr(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        match expr {
            Expr::And(exprs) => self.visit_and(exprs),
            Expr::Field { field, op, value } => self.visit_field(field, op, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use bson::bson;

    use super::*;

    #[test]
    fn builder_without_predicates_has_no_filter() {
        let query = Query::builder().limit(5).build();

        assert_eq!(query.filter, None);
        assert_eq!(query.limit, Some(5));
    }

    #[test]
    fn single_predicate_is_not_wrapped() {
        let query = Query::builder().and(Filter::eq("dapp_id", "abc")).build();

        assert_eq!(query.filter, Some(Filter::eq("dapp_id", "abc")));
    }

    #[test]
    fn predicates_accumulate_into_one_conjunction() {
        let query = Query::builder()
            .and(Filter::eq("category", "DeFi"))
            .and(Filter::any_of("chains", ["Ethereum"]))
            .and(Filter::eq("votes", 3))
            .build();

        match query.filter {
            Some(Expr::And(exprs)) => {
                assert_eq!(exprs.len(), 3);
                assert_eq!(
                    exprs[1],
                    Expr::field("chains".into(), FieldOp::AnyOf, bson!(["Ethereum"]))
                );
            }
            other => panic!("expected a conjunction, got {other:?}"),
        }
    }
}
