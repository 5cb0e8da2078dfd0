use aw_issues::event_message::EventMessage;
use aw_issues::item_renderer::ItemRenderer;
use serde::Serialize;
use tracing::info;

use super::handler::MessageHandler;
use super::process_result::{IssueAction, ProcessResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Results of one execution's batch, in message order.
pub struct BatchSummary {
    pub created: usize,
    pub updated: usize,
    pub failed: usize,
    pub results: Vec<ProcessResult>,
}

impl BatchSummary {
    fn record(&mut self, result: ProcessResult) {
        match result.action() {
            Some(IssueAction::Created) => self.created += 1,
            Some(IssueAction::Updated) => self.updated += 1,
            None => self.failed += 1,
        }
        self.results.push(result);
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Feed `messages` through `handler` one at a time.
pub async fn process_batch<R, I>(handler: &mut MessageHandler<R>, messages: I) -> BatchSummary
where
    R: ItemRenderer,
    I: IntoIterator<Item = EventMessage>,
{
    let mut summary = BatchSummary::default();
    for message in messages {
        let result = handler.handle(&message).await;
        summary.record(result);
    }
    info!(
        created = summary.created,
        updated = summary.updated,
        failed = summary.failed,
        "processed event message batch"
    );
    summary
}
