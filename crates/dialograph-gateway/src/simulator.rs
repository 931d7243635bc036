use futures::future::BoxFuture;

use dialograph_core::conversation::{ConversationalState, Scenario};
use dialograph_core::error::Result;
use dialograph_core::traits::ConversationSimulator;

/// Simulator used when no conversation engine is attached: the scenario is
/// returned exactly as stored, statuses included.
pub struct PassthroughSimulator;

impl ConversationSimulator for PassthroughSimulator {
    fn simulate(
        &self,
        scenario: Scenario,
        _state: &ConversationalState,
    ) -> BoxFuture<'_, Result<Scenario>> {
        Box::pin(async move { Ok(scenario) })
    }
}
