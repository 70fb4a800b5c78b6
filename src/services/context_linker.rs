//! Links a resolved profile to a task through a new context record.
//!
//! Linking never holds up the lookup response. It runs as a spawned task whose
//! outcome is logged and can be collected through [`ContextLinkTask`].

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn, Instrument};

use crate::domain::errors::{LookupError, LookupResult};
use crate::domain::models::{ConnectorInstanceId, ContextLink, NewContext};
use crate::domain::ports::ContextStore;

/// Creates profile contexts and attaches task LookupIds.
#[derive(Clone)]
pub struct ContextLinker {
    store: Arc<dyn ContextStore>,
}

impl ContextLinker {
    pub fn new(store: Arc<dyn ContextStore>) -> Self {
        Self { store }
    }

    /// Create the context, then attach `task_sid` to it.
    #[instrument(skip(self, connector), fields(connector = %connector))]
    pub async fn link(
        &self,
        profile_sid: &str,
        connector: &ConnectorInstanceId,
        task_sid: &str,
    ) -> LookupResult<ContextLink> {
        let context = self
            .store
            .create_context(&NewContext::for_profile(profile_sid, connector))
            .await?;

        self.store.attach_lookup_id(&context.sid, task_sid).await?;

        Ok(ContextLink {
            context_sid: context.sid,
            task_sid: task_sid.to_string(),
        })
    }

    /// Run [`link`](Self::link) in the background. Failures are logged here;
    /// the returned handle may be awaited or dropped.
    pub fn spawn(
        &self,
        profile_sid: String,
        connector: ConnectorInstanceId,
        task_sid: String,
    ) -> ContextLinkTask {
        let linker = self.clone();
        let span = tracing::Span::current();

        let handle = tokio::spawn(
            async move {
                let result = linker.link(&profile_sid, &connector, &task_sid).await;
                match &result {
                    Ok(link) => info!(
                        context_sid = %link.context_sid,
                        task_sid = %link.task_sid,
                        profile_sid = %profile_sid,
                        "profile context linked to task"
                    ),
                    Err(err) => warn!(
                        error = %err,
                        task_sid = %task_sid,
                        profile_sid = %profile_sid,
                        "failed to link profile context to task"
                    ),
                }
                result
            }
            .instrument(span),
        );

        ContextLinkTask { handle }
    }
}

/// Handle to a background context link.
#[derive(Debug)]
pub struct ContextLinkTask {
    handle: JoinHandle<LookupResult<ContextLink>>,
}

impl ContextLinkTask {
    /// Wait for the link to finish.
    pub async fn wait(self) -> LookupResult<ContextLink> {
        self.handle
            .await
            .map_err(|e| LookupError::BackgroundTask(e.to_string()))?
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
