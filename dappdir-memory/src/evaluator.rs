//! Filter evaluation for the in-memory backend.
//!
//! Mirrors how MongoDB matches `$eq` and `$in` on the kinds of values dapp
//! listings filter on: strings, numbers, booleans, object ids and string arrays.

use bson::{Bson, Document, oid::ObjectId};

use dappdir_core::{
    query::{QueryVisitor, Expr, FieldOp},
    error::{DocumentStoreError, DocumentStoreResult},
};


/// A borrowed BSON value reduced to what filter matching compares.
///
/// `Int32(3)`, `Int64(3)` and `Double(3.0)` all become `Number(3.0)`.
#[derive(Debug)]
pub(crate) enum Comparable<'a> {
    Null,
    Bool(bool),
    Number(f64),
    String(&'a str),
    ObjectId(ObjectId),
    Array(Vec<Comparable<'a>>),
    /// Dates, embedded documents and the rest; never equal to anything.
    Opaque,
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Null => Comparable::Null,
            Bson::Boolean(flag) => Comparable::Bool(*flag),
            Bson::Int32(n) => Comparable::Number(f64::from(*n)),
            Bson::Int64(n) => Comparable::Number(*n as f64),
            Bson::Double(n) => Comparable::Number(*n),
            Bson::String(text) => Comparable::String(text),
            Bson::ObjectId(oid) => Comparable::ObjectId(*oid),
            Bson::Array(items) => Comparable::Array(items.iter().map(Comparable::from).collect()),
            _ => Comparable::Opaque,
        }
    }
}

impl PartialEq for Comparable<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => true,
            (Comparable::Bool(left), Comparable::Bool(right)) => left == right,
            (Comparable::Number(left), Comparable::Number(right)) => left == right,
            (Comparable::String(left), Comparable::String(right)) => left == right,
            (Comparable::ObjectId(left), Comparable::ObjectId(right)) => left == right,
            (Comparable::Array(left), Comparable::Array(right)) => left == right,
            _ => false,
        }
    }
}


/// Matches one document against a filter.
pub(crate) struct DocumentEvaluator<'a> {
    document: &'a Document,
}

impl<'a> DocumentEvaluator<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    pub fn matches(&mut self, expr: &Expr) -> DocumentStoreResult<bool> {
        self.visit_expr(expr)
    }

    /// Returns the documents matching `expr`, stopping once `limit` have been found.
    pub fn filter_documents(
        documents: impl IntoIterator<Item = &'a Document>,
        expr: &Expr,
        limit: usize,
    ) -> Vec<Document> {
        documents
            .into_iter()
            .filter(|doc| {
                DocumentEvaluator::new(doc)
                    .matches(expr)
                    .unwrap_or(false)
            })
            .take(limit)
            .cloned()
            .collect::<Vec<_>>()
    }
}

impl<'a> QueryVisitor for DocumentEvaluator<'a> {
    type Output = bool;
    type Error = DocumentStoreError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if !self.visit_expr(expr)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn visit_field(&mut self, field: &str, op: &FieldOp, value: &Bson) -> Result<Self::Output, Self::Error> {
        let Some(field_value) = self.document.get(field) else {
            // A missing field only equals null.
            return Ok(matches!(op, FieldOp::Eq) && Comparable::from(value) == Comparable::Null);
        };

        match op {
            // An array field equals a scalar when one of its elements does.
            FieldOp::Eq => Ok(match (Comparable::from(field_value), Comparable::from(value)) {
                (Comparable::Array(items), target @ Comparable::Array(_)) => Comparable::Array(items) == target,
                (Comparable::Array(items), target) => items.iter().any(|item| item == &target),
                (left, right) => left == right,
            }),
            FieldOp::AnyOf => {
                let candidates = match Comparable::from(value) {
                    Comparable::Array(values) => values,
                    single_value => vec![single_value],
                };

                Ok(match Comparable::from(field_value) {
                    Comparable::Array(array) => array
                        .iter()
                        .any(|item| candidates.contains(item)),
                    single_value => candidates.contains(&single_value),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;
    use dappdir_core::query::Filter;

    use super::*;

    fn matches(document: &Document, expr: &Expr) -> bool {
        DocumentEvaluator::new(document).matches(expr).unwrap()
    }

    #[test]
    fn eq_matches_scalars_across_numeric_types() {
        let document = doc! { "category": "DeFi", "votes": 3_i64 };

        assert!(matches(&document, &Filter::eq("category", "DeFi")));
        assert!(!matches(&document, &Filter::eq("category", "NFT")));
        assert!(matches(&document, &Filter::eq("votes", 3_i32)));
    }

    #[test]
    fn eq_on_missing_field_only_matches_null() {
        let document = doc! { "name": "Foo" };

        assert!(!matches(&document, &Filter::eq("category", "DeFi")));
        assert!(matches(&document, &Filter::eq("category", Bson::Null)));
    }

    #[test]
    fn any_of_tests_array_membership() {
        let document = doc! { "chains": ["Ethereum", "Base"] };

        assert!(matches(&document, &Filter::any_of("chains", ["Ethereum"])));
        assert!(matches(&document, &Filter::any_of("chains", ["Solana", "Base"])));
        assert!(!matches(&document, &Filter::any_of("chains", ["Solana"])));
    }

    #[test]
    fn any_of_on_scalar_field() {
        let document = doc! { "category": "DeFi" };

        assert!(matches(&document, &Filter::any_of("category", ["NFT", "DeFi"])));
        assert!(!matches(&document, &Filter::any_of("category", ["NFT"])));
    }

    #[test]
    fn and_requires_every_predicate() {
        let document = doc! { "category": "DeFi", "chains": ["Ethereum"] };

        let both = Filter::and([
            Filter::eq("category", "DeFi"),
            Filter::any_of("chains", ["Ethereum"]),
        ]);
        let wrong_chain = Filter::and([
            Filter::eq("category", "DeFi"),
            Filter::any_of("chains", ["Solana"]),
        ]);

        assert!(matches(&document, &both));
        assert!(!matches(&document, &wrong_chain));
    }

    #[test]
    fn filter_documents_respects_limit() {
        let documents = (0..5)
            .map(|i| doc! { "dapp_id": "a", "n": i })
            .collect::<Vec<_>>();

        let found = DocumentEvaluator::filter_documents(&documents, &Filter::eq("dapp_id", "a"), 3);

        assert_eq!(found.len(), 3);
    }
}
