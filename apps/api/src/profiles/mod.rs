// Candidate profile store: ingestion (structured rows, PDF résumés) and similarity search.

pub mod handlers;
pub mod ingest;
pub mod repository;
