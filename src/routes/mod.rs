// Route exports
pub mod library;
pub mod profiles;
pub mod search;

use crate::core::{Matchmaker, ProfileParser, ProfileWriter};
use crate::services::{ExtractorClient, PostgresStore};
use actix_web::web;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PostgresStore>,
    pub extractor: Arc<ExtractorClient>,
    pub parser: ProfileParser,
    pub matchmaker: Matchmaker,
    pub writer: ProfileWriter,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(library::configure)
            .configure(profiles::configure)
            .configure(search::configure),
    );
}
