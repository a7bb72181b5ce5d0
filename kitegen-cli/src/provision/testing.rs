//! In-memory fakes of the remote services for provisioning tests

use async_trait::async_trait;
use kitegen_client::{BuildService, ClientError, SourceHost};
use kitegen_core::domain::pipeline::Pipeline;
use kitegen_core::domain::protection::{BranchProtection, RequiredStatusChecks};
use kitegen_core::dto::pipeline::CreatePipeline;
use kitegen_core::dto::protection::UpdateRequiredStatusChecks;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Ordered record of every remote call, shared by both fakes
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

#[derive(Clone)]
pub struct FakeBuildService {
    calls: CallLog,
    fail_create: Option<u16>,
    fail_webhook: Option<u16>,
    pub requests: Arc<Mutex<Vec<CreatePipeline>>>,
}

impl FakeBuildService {
    pub fn new(calls: &CallLog) -> Self {
        Self {
            calls: calls.clone(),
            fail_create: None,
            fail_webhook: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing_create(mut self, status: u16) -> Self {
        self.fail_create = Some(status);
        self
    }

    pub fn failing_webhook(mut self, status: u16) -> Self {
        self.fail_webhook = Some(status);
        self
    }
}

#[async_trait]
impl BuildService for FakeBuildService {
    async fn create_pipeline(
        &self,
        org: &str,
        req: &CreatePipeline,
    ) -> kitegen_client::Result<Pipeline> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("create_pipeline {}/{}", org, req.name));
        self.requests.lock().unwrap().push(req.clone());

        if let Some(status) = self.fail_create {
            return Err(ClientError::api_error(status, "pipeline rejected"));
        }

        Ok(Pipeline {
            id: Uuid::new_v4(),
            name: req.name.clone(),
            slug: req.name.clone(),
            repository: Some(req.repository.clone()),
            web_url: None,
            default_branch: Some(req.default_branch.clone()),
            created_at: None,
        })
    }

    async fn add_webhook(&self, org: &str, pipeline: &str) -> kitegen_client::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("add_webhook {}/{}", org, pipeline));

        match self.fail_webhook {
            Some(status) => Err(ClientError::api_error(status, "webhook rejected")),
            None => Ok(()),
        }
    }
}

#[derive(Clone)]
pub struct FakeSourceHost {
    calls: CallLog,
    protection: Option<BranchProtection>,
    fail_get: Option<u16>,
    fail_update: Option<u16>,
    pub updates: Arc<Mutex<Vec<UpdateRequiredStatusChecks>>>,
}

impl FakeSourceHost {
    /// Branch protected with the given required contexts
    pub fn protected(calls: &CallLog, contexts: &[&str]) -> Self {
        Self::with_protection(
            calls,
            Some(BranchProtection {
                url: None,
                required_status_checks: Some(RequiredStatusChecks {
                    strict: true,
                    contexts: contexts.iter().map(|c| c.to_string()).collect(),
                }),
            }),
        )
    }

    /// Branch without any protection record
    pub fn unprotected(calls: &CallLog) -> Self {
        Self::with_protection(calls, None)
    }

    /// Branch protected by reviews only, no status check section
    pub fn without_status_checks(calls: &CallLog) -> Self {
        Self::with_protection(calls, Some(BranchProtection::default()))
    }

    fn with_protection(calls: &CallLog, protection: Option<BranchProtection>) -> Self {
        Self {
            calls: calls.clone(),
            protection,
            fail_get: None,
            fail_update: None,
            updates: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing_get(mut self, status: u16) -> Self {
        self.fail_get = Some(status);
        self
    }

    pub fn failing_update(mut self, status: u16) -> Self {
        self.fail_update = Some(status);
        self
    }
}

#[async_trait]
impl SourceHost for FakeSourceHost {
    async fn get_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> kitegen_client::Result<BranchProtection> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("get_branch_protection {}/{}@{}", owner, repo, branch));

        if let Some(status) = self.fail_get {
            return Err(ClientError::api_error(status, "protection unreadable"));
        }

        self.protection
            .clone()
            .ok_or_else(|| ClientError::NotFound(format!("{}/{} on {}", owner, repo, branch)))
    }

    async fn update_required_status_checks(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        update: &UpdateRequiredStatusChecks,
    ) -> kitegen_client::Result<RequiredStatusChecks> {
        self.calls.lock().unwrap().push(format!(
            "update_required_status_checks {}/{}@{}",
            owner, repo, branch
        ));
        self.updates.lock().unwrap().push(update.clone());

        if let Some(status) = self.fail_update {
            return Err(ClientError::api_error(status, "update rejected"));
        }

        Ok(RequiredStatusChecks {
            strict: true,
            contexts: update.contexts.clone(),
        })
    }
}
