//! Pipeline registration
//!
//! Creates the build service pipeline for a project and registers its
//! source host webhook.

use kitegen_client::BuildService;
use kitegen_core::domain::pipeline::Pipeline;
use kitegen_core::dto::pipeline::CreatePipeline;
use kitegen_core::types::{ProjectName, ProvisionTarget};
use tracing::info;

use super::error::{ProvisionError, Result};

/// Create the pipeline for a project, then attach its webhook
///
/// The webhook is only requested once creation succeeded. A creation failure
/// is wrapped with context; a webhook failure is returned as the client
/// reported it. Nothing is undone when the webhook call fails, so the
/// pipeline stays registered.
pub async fn register_pipeline<B>(
    build: &B,
    target: &ProvisionTarget,
    name: &ProjectName,
) -> Result<Pipeline>
where
    B: BuildService + ?Sized,
{
    let req = CreatePipeline::for_project(target, name);

    let pipeline = build
        .create_pipeline(&target.build_org, &req)
        .await
        .map_err(ProvisionError::CreatePipeline)?;

    info!(
        "Pipeline created: {}/{} ({})",
        target.build_org, pipeline.slug, pipeline.id
    );

    build
        .add_webhook(&target.build_org, name.as_str())
        .await
        .map_err(ProvisionError::AttachWebhook)?;

    info!("Webhook attached to {}/{}", target.build_org, name);

    Ok(pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provision::testing::{FakeBuildService, call_log, calls};
    use pretty_assertions::assert_eq;

    fn foo() -> ProjectName {
        ProjectName::parse("foo").unwrap()
    }

    #[tokio::test]
    async fn test_register_creates_then_attaches_webhook() {
        let log = call_log();
        let build = FakeBuildService::new(&log);

        let pipeline = register_pipeline(&build, &ProvisionTarget::default(), &foo())
            .await
            .unwrap();

        assert_eq!(pipeline.name, "foo");
        assert_eq!(
            calls(&log),
            vec![
                "create_pipeline bluecore-inc/foo",
                "add_webhook bluecore-inc/foo",
            ]
        );

        let requests = build.requests.lock().unwrap();
        assert_eq!(requests[0].repository, "git@github.com:TriggerMail/foo.git");
        assert_eq!(requests[0].provider_settings.repository, "TriggerMail/foo");
    }

    #[tokio::test]
    async fn test_create_failure_skips_webhook() {
        let log = call_log();
        let build = FakeBuildService::new(&log).failing_create(422);

        let err = register_pipeline(&build, &ProvisionTarget::default(), &foo())
            .await
            .unwrap_err();

        assert!(matches!(err, ProvisionError::CreatePipeline(_)));
        assert!(err.to_string().starts_with("could not create pipeline: "));
        assert_eq!(calls(&log), vec!["create_pipeline bluecore-inc/foo"]);
    }

    #[tokio::test]
    async fn test_webhook_failure_is_not_wrapped() {
        let log = call_log();
        let build = FakeBuildService::new(&log).failing_webhook(500);

        let err = register_pipeline(&build, &ProvisionTarget::default(), &foo())
            .await
            .unwrap_err();

        assert!(matches!(err, ProvisionError::AttachWebhook(_)));
        assert_eq!(err.to_string(), "API error (status 500): webhook rejected");
    }

    #[tokio::test]
    async fn test_register_uses_configured_org() {
        let log = call_log();
        let build = FakeBuildService::new(&log);
        let target = ProvisionTarget {
            build_org: "acme".to_string(),
            ..ProvisionTarget::default()
        };

        register_pipeline(&build, &target, &foo()).await.unwrap();

        assert_eq!(
            calls(&log),
            vec!["create_pipeline acme/foo", "add_webhook acme/foo"]
        );
    }
}
