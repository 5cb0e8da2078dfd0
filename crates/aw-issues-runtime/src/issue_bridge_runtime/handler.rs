use std::path::{Path, PathBuf};
use std::sync::Arc;

use aw_issues::event_kinds::{EventKind, MissingDataRenderer, MissingToolRenderer};
use aw_issues::event_message::EventMessage;
use aw_issues::issue_render::WorkflowRunView;
use aw_issues::item_renderer::{decode_items, ItemRenderer};
use aw_issues::sanitize::ContentSanitizer;
use tracing::{info, warn};

use super::process_result::ProcessResult;
use super::reconcile::{ReconcileRequest, Reconciler};
use super::runtime_config::{ResolvedRuntimeConfig, RuntimeConfig};
use super::tracker::IssueTracker;

#[derive(Debug, Clone)]
/// Static wiring for one event kind.
pub struct HandlerOptions<R: ItemRenderer> {
    /// Identifier used in logs, e.g. `missing_tool`.
    pub handler_type: String,
    pub default_title_prefix: String,
    /// Message field holding the reported items.
    pub items_field: String,
    pub template_path: PathBuf,
    /// Template placeholder receiving the rendered item list.
    pub items_placeholder: String,
    pub renderer: R,
}

impl<R: ItemRenderer> HandlerOptions<R> {
    fn for_event_kind(kind: EventKind, template_dir: &Path, renderer: R) -> Self {
        Self {
            handler_type: kind.handler_type().to_string(),
            default_title_prefix: kind.default_title_prefix().to_string(),
            items_field: kind.items_field().to_string(),
            template_path: template_dir.join(kind.template_file_name()),
            items_placeholder: kind.items_placeholder().to_string(),
            renderer,
        }
    }
}

impl HandlerOptions<MissingToolRenderer> {
    pub fn missing_tool(template_dir: &Path) -> Self {
        Self::for_event_kind(EventKind::MissingTool, template_dir, MissingToolRenderer)
    }
}

impl HandlerOptions<MissingDataRenderer> {
    pub fn missing_data(template_dir: &Path) -> Self {
        Self::for_event_kind(EventKind::MissingData, template_dir, MissingDataRenderer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Per-execution cap on processed messages. Never reset.
pub struct ThrottleCounter {
    processed: u32,
    max_count: u32,
}

impl ThrottleCounter {
    pub fn new(max_count: u32) -> Self {
        Self {
            processed: 0,
            max_count,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.processed >= self.max_count
    }

    pub fn record(&mut self) {
        self.processed = self.processed.saturating_add(1);
    }

    pub fn processed(&self) -> u32 {
        self.processed
    }

    pub fn max_count(&self) -> u32 {
        self.max_count
    }
}

#[derive(Debug, Clone)]
/// Immutable builder binding one event kind's rendering into message handlers.
pub struct HandlerFactory<R: ItemRenderer> {
    options: Arc<HandlerOptions<R>>,
}

impl<R: ItemRenderer> HandlerFactory<R> {
    pub fn new(options: HandlerOptions<R>) -> Self {
        Self {
            options: Arc::new(options),
        }
    }

    pub fn options(&self) -> &HandlerOptions<R> {
        &self.options
    }

    /// Create the handler for one execution with a fresh throttle counter.
    pub fn build(
        &self,
        config: &RuntimeConfig,
        tracker: Arc<dyn IssueTracker>,
        sanitizer: Arc<dyn ContentSanitizer>,
    ) -> MessageHandler<R> {
        let settings = config.resolve(&self.options.default_title_prefix);
        info!(
            handler = %self.options.handler_type,
            title_prefix = %settings.title_prefix,
            labels = ?settings.labels,
            max_count = settings.max_count,
            "configured event handler"
        );
        MessageHandler {
            throttle: ThrottleCounter::new(settings.max_count),
            options: Arc::clone(&self.options),
            settings,
            tracker,
            sanitizer,
        }
    }
}

/// Per-execution message handler owning the throttle counter.
///
/// `handle` takes `&mut self`, so one handler processes its batch strictly in order.
pub struct MessageHandler<R: ItemRenderer> {
    options: Arc<HandlerOptions<R>>,
    settings: ResolvedRuntimeConfig,
    throttle: ThrottleCounter,
    tracker: Arc<dyn IssueTracker>,
    sanitizer: Arc<dyn ContentSanitizer>,
}

impl<R: ItemRenderer> MessageHandler<R> {
    pub fn settings(&self) -> &ResolvedRuntimeConfig {
        &self.settings
    }

    pub fn throttle(&self) -> ThrottleCounter {
        self.throttle
    }

    pub async fn handle(&mut self, message: &EventMessage) -> ProcessResult {
        let options = Arc::clone(&self.options);
        let handler_type = options.handler_type.as_str();

        if self.throttle.is_exhausted() {
            let max_count = self.throttle.max_count();
            warn!(
                handler = handler_type,
                max_count, "max count reached, skipping event message"
            );
            return ProcessResult::failed(format!(
                "Max count of {max_count} reached, skipping {handler_type} message"
            ));
        }
        // Invalid messages still consume a slot.
        self.throttle.record();

        let Some(workflow_name) = message.workflow_name() else {
            warn!(handler = handler_type, "event message missing workflow_name");
            return ProcessResult::failed("Missing required field: workflow_name");
        };
        let items_field = options.items_field.as_str();
        let Some(raw_items) = message.items(items_field) else {
            warn!(
                handler = handler_type,
                items_field, "event message missing items"
            );
            return ProcessResult::failed(format!("Missing or empty {items_field} array"));
        };
        let items = match decode_items::<R>(items_field, raw_items) {
            Ok(items) => items,
            Err(error) => {
                warn!(handler = handler_type, error = %error, "event message items invalid");
                return ProcessResult::failed(error);
            }
        };

        info!(
            handler = handler_type,
            workflow = workflow_name,
            items = items.len(),
            "reconciling event message"
        );
        let reconciler = Reconciler {
            handler_type,
            tracker: self.tracker.as_ref(),
            sanitizer: self.sanitizer.as_ref(),
            renderer: &options.renderer,
            template_path: options.template_path.as_path(),
            items_placeholder: options.items_placeholder.as_str(),
        };
        reconciler
            .reconcile(ReconcileRequest {
                title_prefix: &self.settings.title_prefix,
                labels: &self.settings.labels,
                run: WorkflowRunView {
                    workflow_name,
                    workflow_source: message.workflow_source(),
                    workflow_source_url: message.workflow_source_url(),
                    run_url: message.run_url(),
                },
                items: &items,
            })
            .await
    }
}
