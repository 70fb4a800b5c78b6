//! Profile lookup pipeline.
//!
//! Validate input, resolve the connector instance, find and select a profile,
//! then run the optional context link and summary steps.

use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::context_linker::{ContextLinkTask, ContextLinker};
use crate::domain::errors::LookupResult;
use crate::domain::models::{
    select_profile, AttributeKeys, CandidateProfile, ConnectorInstanceId, LookupAttribute,
    LookupRequest,
};
use crate::domain::ports::{ContextStore, ProfileConnector, SummaryNotifier};

/// Result of a successful lookup.
#[derive(Debug)]
pub struct LookupOutcome {
    /// Selected profile, `None` when Find returned no usable candidate
    pub profile: Option<CandidateProfile>,

    /// Background context link, when one was started
    pub context_link: Option<ContextLinkTask>,
}

/// Resolves profiles through the Profile Connector.
#[derive(Clone)]
pub struct ProfileLookupService {
    connector: Arc<dyn ProfileConnector>,
    linker: ContextLinker,
    summary: Arc<dyn SummaryNotifier>,
    attribute_keys: AttributeKeys,
}

impl ProfileLookupService {
    pub fn new(
        connector: Arc<dyn ProfileConnector>,
        contexts: Arc<dyn ContextStore>,
        summary: Arc<dyn SummaryNotifier>,
        attribute_keys: AttributeKeys,
    ) -> Self {
        Self {
            connector,
            linker: ContextLinker::new(contexts),
            summary,
            attribute_keys,
        }
    }

    /// Run a lookup.
    ///
    /// Validation errors return before any network call. Connector resolution,
    /// Find, and summary failures fail the whole lookup. Context linking only
    /// starts here; its outcome is in [`LookupOutcome::context_link`].
    #[instrument(
        skip(self, request),
        fields(lookup_id = %Uuid::new_v4(), task_sid = ?request.task_sid)
    )]
    pub async fn lookup(&self, request: &LookupRequest) -> LookupResult<LookupOutcome> {
        let attribute = request.lookup_attribute(&self.attribute_keys)?;

        let connector = self.connector.fetch_connector_instance().await?;
        debug!(connector = %connector, "resolved connector instance");

        let Some(profile) = self.find_profile(&connector, &attribute).await? else {
            info!(key = %attribute.key, "no profile found");
            return Ok(LookupOutcome {
                profile: None,
                context_link: None,
            });
        };

        info!(profile_sid = %profile.sid, status = %profile.status, "profile resolved");

        let context_link = request.context_task_sid().map(|task_sid| {
            self.linker
                .spawn(profile.sid.clone(), connector.clone(), task_sid.to_string())
        });

        if request.post_summary {
            self.summary.post_summary(&profile.sid).await?;
        }

        Ok(LookupOutcome {
            profile: Some(profile),
            context_link,
        })
    }

    async fn find_profile(
        &self,
        connector: &ConnectorInstanceId,
        attribute: &LookupAttribute,
    ) -> LookupResult<Option<CandidateProfile>> {
        let candidates = self
            .connector
            .find_profiles(connector, attribute, true)
            .await?;
        Ok(select_profile(candidates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{ConnectorApiError, LookupError};
    use crate::domain::models::{ContextRecord, NewContext, ProfileStatus};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    struct StubConnector {
        candidates: Vec<CandidateProfile>,
        instance_calls: AtomicUsize,
        find_calls: Mutex<Vec<(ConnectorInstanceId, LookupAttribute)>>,
    }

    impl StubConnector {
        fn returning(candidates: Vec<CandidateProfile>) -> Self {
            Self {
                candidates,
                instance_calls: AtomicUsize::new(0),
                find_calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ProfileConnector for StubConnector {
        async fn fetch_connector_instance(
            &self,
        ) -> Result<ConnectorInstanceId, ConnectorApiError> {
            self.instance_calls.fetch_add(1, Ordering::SeqCst);
            Ok(ConnectorInstanceId::new("cfg_test"))
        }

        async fn find_profiles(
            &self,
            connector: &ConnectorInstanceId,
            attribute: &LookupAttribute,
            write_if_not_found: bool,
        ) -> Result<Vec<CandidateProfile>, ConnectorApiError> {
            assert!(write_if_not_found);
            self.find_calls
                .lock()
                .unwrap()
                .push((connector.clone(), attribute.clone()));
            Ok(self.candidates.clone())
        }
    }

    #[derive(Default)]
    struct StubContexts {
        created: Mutex<Vec<NewContext>>,
    }

    #[async_trait]
    impl ContextStore for StubContexts {
        async fn create_context(
            &self,
            context: &NewContext,
        ) -> Result<ContextRecord, ConnectorApiError> {
            self.created.lock().unwrap().push(context.clone());
            Ok(ContextRecord {
                sid: "HX1".to_string(),
            })
        }

        async fn attach_lookup_id(&self, _: &str, _: &str) -> Result<(), ConnectorApiError> {
            Ok(())
        }
    }

    /// Holds `create_context` open until released.
    #[derive(Default)]
    struct GatedContexts {
        release: tokio::sync::Notify,
        created: AtomicUsize,
    }

    #[async_trait]
    impl ContextStore for GatedContexts {
        async fn create_context(
            &self,
            _context: &NewContext,
        ) -> Result<ContextRecord, ConnectorApiError> {
            self.release.notified().await;
            self.created.fetch_add(1, Ordering::SeqCst);
            Ok(ContextRecord {
                sid: "HX_gated".to_string(),
            })
        }

        async fn attach_lookup_id(&self, _: &str, _: &str) -> Result<(), ConnectorApiError> {
            Ok(())
        }
    }

    /// Finishes only after a delay, so an un-awaited call would be visible.
    #[derive(Default)]
    struct SlowSummary {
        completed: AtomicBool,
    }

    #[async_trait]
    impl SummaryNotifier for SlowSummary {
        async fn post_summary(&self, _profile_sid: &str) -> Result<(), ConnectorApiError> {
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.completed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    fn service(
        connector: Arc<StubConnector>,
        contexts: Arc<StubContexts>,
        summary: Arc<SlowSummary>,
    ) -> ProfileLookupService {
        ProfileLookupService::new(connector, contexts, summary, AttributeKeys::default())
    }

    fn identified() -> CandidateProfile {
        CandidateProfile::new("MP_identified", ProfileStatus::Identified)
    }

    #[tokio::test]
    async fn test_validation_skips_network() {
        let connector = Arc::new(StubConnector::returning(vec![identified()]));
        let svc = service(
            connector.clone(),
            Arc::default(),
            Arc::default(),
        );

        let err = svc.lookup(&LookupRequest::default()).await.unwrap_err();

        assert!(matches!(err, LookupError::MissingIdentifier));
        assert_eq!(connector.instance_calls.load(Ordering::SeqCst), 0);
        assert!(connector.find_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_connector_id_flows_into_find() {
        let connector = Arc::new(StubConnector::returning(vec![identified()]));
        let svc = service(connector.clone(), Arc::default(), Arc::default());

        let request = LookupRequest {
            phone: Some("+15550001111".to_string()),
            email: Some("ignored@example.com".to_string()),
            ..Default::default()
        };
        let outcome = svc.lookup(&request).await.unwrap();

        assert_eq!(outcome.profile.unwrap().sid, "MP_identified");
        assert!(outcome.context_link.is_none());
        let calls = connector.find_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, ConnectorInstanceId::new("cfg_test"));
        assert_eq!(calls[0].1, LookupAttribute::new("phone", "+15550001111"));
    }

    #[tokio::test]
    async fn test_empty_find_is_success() {
        let connector = Arc::new(StubConnector::returning(vec![]));
        let contexts = Arc::new(StubContexts::default());
        let summary = Arc::new(SlowSummary::default());
        let svc = service(connector, contexts.clone(), summary.clone());

        let request = LookupRequest {
            post_summary: true,
            ..LookupRequest::by_email("nobody@example.com").with_task_sid("WT1")
        };
        let outcome = svc.lookup(&request).await.unwrap();

        assert!(outcome.profile.is_none());
        assert!(outcome.context_link.is_none());
        assert!(!summary.completed.load(Ordering::SeqCst));
        assert!(contexts.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_context_link_started_for_task() {
        let connector = Arc::new(StubConnector::returning(vec![identified()]));
        let contexts = Arc::new(StubContexts::default());
        let svc = service(connector, contexts.clone(), Arc::default());

        let outcome = svc
            .lookup(&LookupRequest::by_phone("+1").with_task_sid("WT42"))
            .await
            .unwrap();

        let link = outcome.context_link.expect("link should be started");
        let link = link.wait().await.unwrap();
        assert_eq!(link.task_sid, "WT42");
        let created = contexts.created.lock().unwrap();
        assert_eq!(created[0].attributes.profile_connect_sid, "MP_identified");
        assert_eq!(created[0].attributes.connector_name, "cfg_test");
    }

    #[tokio::test]
    async fn test_save_to_context_false_skips_link() {
        let connector = Arc::new(StubConnector::returning(vec![identified()]));
        let contexts = Arc::new(StubContexts::default());
        let svc = service(connector, contexts.clone(), Arc::default());

        let request = LookupRequest {
            save_to_context: false,
            ..LookupRequest::by_phone("+1").with_task_sid("WT42")
        };
        let outcome = svc.lookup(&request).await.unwrap();

        assert!(outcome.context_link.is_none());
        assert!(contexts.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_summary_is_awaited() {
        let connector = Arc::new(StubConnector::returning(vec![identified()]));
        let summary = Arc::new(SlowSummary::default());
        let svc = service(connector, Arc::default(), summary.clone());

        let request = LookupRequest {
            post_summary: true,
            ..LookupRequest::by_phone("+1")
        };
        svc.lookup(&request).await.unwrap();

        assert!(summary.completed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_lookup_returns_before_context_link_completes() {
        let connector = Arc::new(StubConnector::returning(vec![identified()]));
        let contexts = Arc::new(GatedContexts::default());
        let svc = ProfileLookupService::new(
            connector,
            contexts.clone(),
            Arc::new(SlowSummary::default()),
            AttributeKeys::default(),
        );

        let outcome = svc
            .lookup(&LookupRequest::by_phone("+1").with_task_sid("WT7"))
            .await
            .unwrap();

        assert_eq!(outcome.profile.as_ref().unwrap().sid, "MP_identified");
        let link = outcome.context_link.unwrap();
        tokio::task::yield_now().await;
        assert!(!link.is_finished());
        assert_eq!(contexts.created.load(Ordering::SeqCst), 0);

        contexts.release.notify_one();
        let link = link.wait().await.unwrap();
        assert_eq!(link.context_sid, "HX_gated");
        assert_eq!(link.task_sid, "WT7");
        assert_eq!(contexts.created.load(Ordering::SeqCst), 1);
    }
}
