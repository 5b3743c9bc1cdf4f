//! Query translation from the dappdir filter AST to MongoDB query syntax.
//!
//! This module translates abstract query expressions into MongoDB BSON
//! documents for execution by the MongoDB query engine.

use bson::{Document, Bson, doc};

use dappdir_core::{
    query::{QueryVisitor, Expr, FieldOp},
    error::DocumentStoreError,
};


/// Translates dappdir query expressions into MongoDB query documents.
pub(crate) struct MongoQueryTranslator;

impl QueryVisitor for MongoQueryTranslator {
    type Output = Document;
    type Error = DocumentStoreError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        if exprs.is_empty() {
            return Ok(doc! {});
        }

        Ok(doc! {
            "$and": exprs
                .iter()
                .map(|expr| self.visit_expr(expr))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    fn visit_field(&mut self, field: &str, op: &FieldOp, value: &Bson) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            field: match op {
                FieldOp::Eq => doc! { "$eq": value.clone() },
                // `$in` against an array field matches when any element is in the set.
                FieldOp::AnyOf => match value {
                    Bson::Array(values) => doc! { "$in": values.clone() },
                    single => doc! { "$in": [single.clone()] },
                },
            }
        })
    }
}
