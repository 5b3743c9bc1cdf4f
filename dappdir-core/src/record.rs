//! Typed records for every [`Kind`](crate::schema::Kind).
//!
//! Field defaults here mirror the defaults declared in the schema tables.

use serde::{Deserialize, Serialize};

use crate::{document::Document, schema::Kind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    #[serde(default)]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Document for User {
    const KIND: Kind = Kind::User;
}

/// A decentralized application listed in the directory.
///
/// `votes` only ever changes through the vote operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dapp {
    pub name: String,
    pub tagline: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub chains: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub banner_url: Option<String>,
    #[serde(default)]
    pub submitter_name: Option<String>,
    #[serde(default)]
    pub submitter_wallet: Option<String>,
    #[serde(default)]
    pub votes: i64,
}

impl Document for Dapp {
    const KIND: Kind = Kind::Dapp;
}

/// A comment on a dapp. `dapp_id` is the dapp's storage identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub dapp_id: String,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_wallet: Option<String>,
    pub content: String,
}

impl Document for Comment {
    const KIND: Kind = Kind::Comment;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    #[serde(default = "in_stock_default")]
    pub in_stock: bool,
}

fn in_stock_default() -> bool {
    true
}

impl Document for Product {
    const KIND: Kind = Kind::Product;
}
