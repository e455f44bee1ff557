use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use tokio::sync::RwLock;

use subtrack::remote::{
    Document, DocumentEntry, PatchRequest, SetQuery, apply_field_update, merge_documents,
};

#[path = "subtrack_docstore/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "subtrack_docstore/persistence.rs"]
mod persistence;
use self::persistence::*;
#[path = "subtrack_docstore/handlers.rs"]
mod handlers;
use self::handlers::*;
#[path = "subtrack_docstore/routes.rs"]
mod routes;
use self::routes::*;
#[path = "subtrack_docstore/runtime.rs"]
mod runtime;

type Collections = BTreeMap<String, BTreeMap<String, Document>>;

#[derive(Clone)]
struct AppState {
    data_dir: PathBuf,
    token: String,

    // collection -> key -> document
    collections: Arc<RwLock<Collections>>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = runtime::run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
