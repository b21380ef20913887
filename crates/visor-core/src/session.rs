//! Sequential driver that runs each effect inline.
//!
//! Suited to one-shot commands and tests; interactive front-ends that need
//! requests to overlap drive [`Screen`] with their own runtime instead.

use crate::effect::{Effect, run_effect};
use crate::gateway::RecordGateway;
use crate::screen::Screen;

/// A [`Screen`] paired with the gateway that feeds it.
pub struct Session<G> {
    gateway: G,
    screen: Screen,
}

impl<G> Session<G>
where
    G: RecordGateway,
{
    /// Wrap `gateway` with an empty screen.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            screen: Screen::new(),
        }
    }

    /// Current screen state.
    pub const fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Mutable screen state for local-only operations (search, drafts).
    pub const fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Gateway used by this session.
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Fetch the record list and replace the held collection.
    pub async fn refresh(&mut self) {
        let effect = self.screen.begin_refresh();
        self.run(effect).await;
    }

    /// Save the current draft; a no-op when not editing or already saving.
    pub async fn save(&mut self) {
        if let Some(effect) = self.screen.begin_save() {
            self.run(effect).await;
        }
    }

    /// Open the reader for `id` and wait for the transcript.
    pub async fn open_reader(&mut self, id: &str) {
        if let Some(effect) = self.screen.open_reader(id) {
            self.run(effect).await;
        }
    }

    async fn run(&mut self, effect: Effect) {
        let completion = run_effect(&self.gateway, effect).await;
        self.screen.apply(completion);
    }
}
