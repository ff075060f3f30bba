//! Orchestration of a single transform invocation
//!
//! The invoker is handed everything it touches: the selection arrives in an
//! explicit request object and the subprocess and picker sit behind traits,
//! so the whole flow runs in tests without an editor or an external tool.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::interaction::UserInteraction;
use crate::transform::encode::escape_literal;
use crate::transform::post_edit::PostEditAction;
use crate::transform::runner::TransformRunner;

/// One captured editor selection plus an optional preselected transform.
#[derive(Debug, Clone)]
pub struct TransformRequest {
    pub selection: String,
    pub transform: Option<String>,
}

/// The replacement text for the selection the request carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutcome {
    pub transform: String,
    pub replacement: String,
}

pub struct TransformInvoker {
    runner: Arc<dyn TransformRunner>,
    interaction: Arc<dyn UserInteraction>,
    post_edit: PostEditAction,
    in_flight: AtomicBool,
}

impl TransformInvoker {
    pub fn new(
        runner: Arc<dyn TransformRunner>,
        interaction: Arc<dyn UserInteraction>,
        post_edit: PostEditAction,
    ) -> Self {
        Self {
            runner,
            interaction,
            post_edit,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Run the full flow: discover, pick, encode, invoke, reconcile.
    ///
    /// Every error aborts the invocation before anything is produced; a
    /// second call while one is active is rejected with [`Error::Busy`].
    pub async fn apply(&self, request: TransformRequest) -> Result<TransformOutcome> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::Busy);
        }

        let result = self.apply_inner(request).await;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn apply_inner(&self, request: TransformRequest) -> Result<TransformOutcome> {
        if request.selection.is_empty() {
            return Err(Error::EmptySelection);
        }

        let names = self.runner.list_transforms().await?;
        if names.is_empty() {
            return Err(Error::NoTransforms);
        }

        let transform = match request.transform {
            Some(name) => {
                if !names.contains(&name) {
                    return Err(Error::UnknownTransform(name));
                }
                name
            }
            None => self
                .interaction
                .select_transform(&names)
                .await?
                .ok_or(Error::Cancelled)?,
        };

        tracing::debug!("Applying transform '{}'", transform);

        let encoded = escape_literal(&request.selection);
        let raw = self.runner.run_transform(&transform, &encoded).await?;

        // Reconcile: trim surrounding whitespace, nothing else. An empty
        // result is a legal replacement.
        let trimmed = raw.trim();
        let replacement = self.post_edit.apply(trimmed, &request.selection);

        Ok(TransformOutcome {
            transform,
            replacement,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::mocks::MockUserInteraction;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    struct StubRunner {
        transforms: Vec<String>,
        output: String,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl StubRunner {
        fn new(transforms: &[&str], output: &str) -> Self {
            Self {
                transforms: transforms.iter().map(|s| s.to_string()).collect(),
                output: output.to_string(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TransformRunner for StubRunner {
        async fn list_transforms(&self) -> Result<Vec<String>> {
            Ok(self.transforms.clone())
        }

        async fn run_transform(&self, id: &str, text: &str) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((id.to_string(), text.to_string()));
            Ok(self.output.clone())
        }
    }

    fn invoker(runner: Arc<StubRunner>, interaction: Arc<MockUserInteraction>) -> TransformInvoker {
        TransformInvoker::new(runner, interaction, PostEditAction::None)
    }

    fn request(selection: &str, transform: Option<&str>) -> TransformRequest {
        TransformRequest {
            selection: selection.to_string(),
            transform: transform.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_empty_selection_aborts_before_any_subprocess() {
        let runner = Arc::new(StubRunner::new(&["pipe_case"], "out"));
        let interaction = Arc::new(MockUserInteraction::new());
        let invoker = invoker(runner.clone(), interaction.clone());

        let err = invoker.apply(request("", None)).await.unwrap_err();

        assert!(matches!(err, Error::EmptySelection));
        assert!(runner.calls().is_empty());
        assert!(interaction.get_messages().is_empty());
    }

    #[tokio::test]
    async fn test_cancellation_runs_no_transform() {
        let runner = Arc::new(StubRunner::new(&["pipe_case", "camel_case"], "out"));
        let interaction = Arc::new(MockUserInteraction::new());
        interaction.add_selection(None);
        let invoker = invoker(runner.clone(), interaction);

        let err = invoker.apply(request("text", None)).await.unwrap_err();

        assert!(matches!(err, Error::Cancelled));
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_picked_transform_receives_encoded_selection() {
        let runner = Arc::new(StubRunner::new(&["pipe_case"], "out"));
        let interaction = Arc::new(MockUserInteraction::new());
        interaction.add_selection(Some("pipe_case".to_string()));
        let invoker = invoker(runner.clone(), interaction);

        invoker
            .apply(request("say \"hi\" #{name}", None))
            .await
            .unwrap();

        assert_eq!(
            runner.calls(),
            vec![(
                "pipe_case".to_string(),
                "say \\\"hi\\\" \\#{name}".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_preselected_transform_skips_picker() {
        let runner = Arc::new(StubRunner::new(&["pipe_case"], "out"));
        let interaction = Arc::new(MockUserInteraction::new());
        let invoker = invoker(runner.clone(), interaction.clone());

        let outcome = invoker
            .apply(request("text", Some("pipe_case")))
            .await
            .unwrap();

        assert_eq!(outcome.transform, "pipe_case");
        assert!(interaction.get_messages().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_preselected_transform() {
        let runner = Arc::new(StubRunner::new(&["pipe_case"], "out"));
        let interaction = Arc::new(MockUserInteraction::new());
        let invoker = invoker(runner.clone(), interaction);

        let err = invoker
            .apply(request("text", Some("no_such")))
            .await
            .unwrap_err();

        match err {
            Error::UnknownTransform(name) => assert_eq!(name, "no_such"),
            other => panic!("Expected UnknownTransform, got {other:?}"),
        }
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_transform_set() {
        let runner = Arc::new(StubRunner::new(&[], "out"));
        let interaction = Arc::new(MockUserInteraction::new());
        let invoker = invoker(runner, interaction);

        let err = invoker.apply(request("text", None)).await.unwrap_err();
        assert!(matches!(err, Error::NoTransforms));
    }

    #[tokio::test]
    async fn test_output_is_trimmed() {
        let runner = Arc::new(StubRunner::new(&["pipe_case"], "  result\n"));
        let interaction = Arc::new(MockUserInteraction::new());
        let invoker = invoker(runner, interaction);

        let outcome = invoker
            .apply(request("text", Some("pipe_case")))
            .await
            .unwrap();

        assert_eq!(outcome.replacement, "result");
    }

    #[tokio::test]
    async fn test_empty_output_is_a_legal_replacement() {
        let runner = Arc::new(StubRunner::new(&["pipe_case"], "\n  \n"));
        let interaction = Arc::new(MockUserInteraction::new());
        let invoker = invoker(runner, interaction);

        let outcome = invoker
            .apply(request("text", Some("pipe_case")))
            .await
            .unwrap();

        assert_eq!(outcome.replacement, "");
    }

    #[tokio::test]
    async fn test_post_edit_reindents_replacement() {
        let runner = Arc::new(StubRunner::new(&["pipe_case"], "a\nb\n"));
        let interaction = Arc::new(MockUserInteraction::new());
        let invoker = TransformInvoker::new(runner, interaction, PostEditAction::Reindent);

        let outcome = invoker
            .apply(request("    selected", Some("pipe_case")))
            .await
            .unwrap();

        assert_eq!(outcome.replacement, "    a\n    b");
    }

    struct BlockingRunner {
        entered: Arc<Notify>,
        proceed: Arc<Notify>,
    }

    #[async_trait]
    impl TransformRunner for BlockingRunner {
        async fn list_transforms(&self) -> Result<Vec<String>> {
            Ok(vec!["pipe_case".to_string()])
        }

        async fn run_transform(&self, _id: &str, _text: &str) -> Result<String> {
            self.entered.notify_one();
            self.proceed.notified().await;
            Ok("done".to_string())
        }
    }

    #[tokio::test]
    async fn test_second_concurrent_apply_is_rejected() {
        let entered = Arc::new(Notify::new());
        let proceed = Arc::new(Notify::new());
        let runner = Arc::new(BlockingRunner {
            entered: entered.clone(),
            proceed: proceed.clone(),
        });
        let interaction = Arc::new(MockUserInteraction::new());
        let invoker = Arc::new(TransformInvoker::new(
            runner,
            interaction,
            PostEditAction::None,
        ));

        let first = tokio::spawn({
            let invoker = Arc::clone(&invoker);
            async move { invoker.apply(request("text", Some("pipe_case"))).await }
        });

        entered.notified().await;

        let err = invoker
            .apply(request("text", Some("pipe_case")))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Busy));

        proceed.notify_one();
        let outcome = first.await.unwrap().unwrap();
        assert_eq!(outcome.replacement, "done");
    }
}
