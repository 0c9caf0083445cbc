//! ExportSessionHandler - Renders a session snapshot for download.

use std::sync::Arc;

use crate::domain::feedback::ExportFormat;
use crate::domain::foundation::SessionId;
use crate::ports::TriageSessionRepository;

use super::{load_ledger, TriageError};

#[derive(Debug, Clone)]
pub struct ExportSessionQuery {
    pub session_id: SessionId,
    pub format: ExportFormat,
}

/// A rendered snapshot with its suggested file name.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedSession {
    pub file_name: String,
    pub content_type: &'static str,
    pub body: String,
}

pub struct ExportSessionHandler {
    repository: Arc<dyn TriageSessionRepository>,
}

impl ExportSessionHandler {
    pub fn new(repository: Arc<dyn TriageSessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ExportSessionQuery) -> Result<ExportedSession, TriageError> {
        let ledger = load_ledger(self.repository.as_ref(), query.session_id).await?;
        let snapshot = ledger.export_snapshot();

        let body = snapshot.render(query.format).map_err(|e| {
            tracing::error!(session_id = %query.session_id, error = %e, "Session export failed");
            e
        })?;

        tracing::info!(
            session_id = %query.session_id,
            format = %query.format,
            records = snapshot.routing_tests.len(),
            edge_cases = snapshot.edge_cases.len(),
            "Session exported"
        );

        Ok(ExportedSession {
            file_name: snapshot.file_name(query.format),
            content_type: query.format.content_type(),
            body,
        })
    }
}
