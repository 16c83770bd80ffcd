//! Dialogue state machine on top of the integration client
//!
//! At most one request is in flight at a time. While a request is pending the
//! director reports busy and refuses new work; the caller polls once per frame
//! and applies whatever outcome comes back.

use townsfolk_core::EntityId;
use townsfolk_integration::{
    DialogueBackend, DialogueRequest, HttpDialogueApi, IntegrationClient, IntegrationError,
    PendingRequest,
};
use tracing::{debug, warn};

use crate::entity::Entity;

/// Why an NPC is being asked to speak
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueKind {
    /// The player just walked up
    Greet,
    /// The player addressed the NPC directly
    Respond { player_text: String },
}

impl DialogueKind {
    /// Prompt text sent to the service for `npc_name`
    pub fn build_prompt(&self, npc_name: &str) -> String {
        match self {
            DialogueKind::Greet => format!(
                "You are {}, a pixel citizen in a neon-lit town. Greet the player shortly (max 8 words).",
                npc_name
            ),
            DialogueKind::Respond { player_text } => format!(
                "You are {}, a pixel citizen. Player says: \"{}\". Respond shortly (max 12 words).",
                npc_name, player_text
            ),
        }
    }
}

/// Result of a finished request
#[derive(Debug)]
pub enum DialogueOutcome {
    Fulfilled {
        npc_id: EntityId,
        npc_name: String,
        text: String,
    },
    Failed {
        npc_id: EntityId,
        npc_name: String,
        error: IntegrationError,
    },
}

enum DialogueState {
    Idle,
    Requesting {
        npc_id: EntityId,
        npc_name: String,
        pending: PendingRequest<String>,
    },
}

/// Owns the integration client and the single in-flight request
pub struct DialogueDirector<B: DialogueBackend = HttpDialogueApi> {
    client: IntegrationClient<B>,
    state: DialogueState,
}

impl<B: DialogueBackend> DialogueDirector<B> {
    pub fn new(client: IntegrationClient<B>) -> Self {
        Self {
            client,
            state: DialogueState::Idle,
        }
    }

    /// Ask `npc` to speak. Returns false without doing anything while another
    /// request is outstanding.
    pub fn request(&mut self, npc: &Entity, kind: DialogueKind) -> bool {
        if self.is_busy() {
            debug!(npc = %npc.name, ?kind, "Dialogue busy, request ignored");
            return false;
        }

        let request = DialogueRequest {
            prompt: kind.build_prompt(&npc.name),
            npc_name: npc.name.clone(),
        };
        debug!(npc = %npc.name, ?kind, "Dialogue request sent");

        self.state = DialogueState::Requesting {
            npc_id: npc.id,
            npc_name: npc.name.clone(),
            pending: self.client.send_dialogue(request),
        };
        true
    }

    /// Non-blocking check for a finished request. Clears the busy state
    /// whether the request succeeded or not.
    pub fn poll(&mut self) -> Option<DialogueOutcome> {
        let DialogueState::Requesting { pending, .. } = &self.state else {
            return None;
        };
        let result = pending.try_recv()?;

        let DialogueState::Requesting { npc_id, npc_name, .. } =
            std::mem::replace(&mut self.state, DialogueState::Idle)
        else {
            return None;
        };

        Some(match result {
            Ok(text) => DialogueOutcome::Fulfilled {
                npc_id,
                npc_name,
                text,
            },
            Err(error) => {
                warn!(npc = %npc_name, "Dialogue request failed: {}", error);
                DialogueOutcome::Failed {
                    npc_id,
                    npc_name,
                    error,
                }
            }
        })
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, DialogueState::Requesting { .. })
    }

    /// NPC currently being asked, if any
    pub fn speaking(&self) -> Option<EntityId> {
        match &self.state {
            DialogueState::Requesting { npc_id, .. } => Some(*npc_id),
            DialogueState::Idle => None,
        }
    }

    pub fn is_online(&self) -> bool {
        self.client.is_online()
    }

    pub fn client(&self) -> &IntegrationClient<B> {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use std::future::Future;
    use std::time::{Duration, Instant};
    use townsfolk_core::Color;

    struct Scripted(Result<&'static str, ()>);

    impl DialogueBackend for Scripted {
        fn complete(
            &self,
            _request: DialogueRequest,
        ) -> impl Future<Output = Result<String, IntegrationError>> + Send {
            let result = self
                .0
                .map(str::to_string)
                .map_err(|_| IntegrationError::ServerError {
                    status: 500,
                    message: "boom".into(),
                });
            async move { result }
        }
    }

    fn settle<B: DialogueBackend>(director: &mut DialogueDirector<B>) -> DialogueOutcome {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(outcome) = director.poll() {
                return outcome;
            }
            assert!(Instant::now() < deadline, "dialogue never settled");
            std::thread::sleep(Duration::from_millis(2));
        }
    }

    fn eliza() -> Entity {
        Entity::npc(EntityId::npc(2), "Eliza", Vec2::new(22.0, 12.0), Color::WHITE)
    }

    #[test]
    fn test_greeting_prompt() {
        assert_eq!(
            DialogueKind::Greet.build_prompt("Byron"),
            "You are Byron, a pixel citizen in a neon-lit town. Greet the player shortly (max 8 words)."
        );
    }

    #[test]
    fn test_directed_prompt_quotes_player_text() {
        let kind = DialogueKind::Respond {
            player_text: "Nice hat".into(),
        };
        assert_eq!(
            kind.build_prompt("Lola"),
            "You are Lola, a pixel citizen. Player says: \"Nice hat\". Respond shortly (max 12 words)."
        );
    }

    #[test]
    fn test_busy_until_polled() {
        let client = IntegrationClient::with_backend(Scripted(Ok("Hi there."))).unwrap();
        let mut director = DialogueDirector::new(client);
        assert!(!director.is_busy());

        assert!(director.request(&eliza(), DialogueKind::Greet));
        assert!(director.is_busy());
        assert_eq!(director.speaking(), Some(EntityId::npc(2)));
        assert!(!director.request(&eliza(), DialogueKind::Greet));

        match settle(&mut director) {
            DialogueOutcome::Fulfilled { npc_id, text, .. } => {
                assert_eq!(npc_id, EntityId::npc(2));
                assert_eq!(text, "Hi there.");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(!director.is_busy());
        assert!(director.poll().is_none());
    }

    #[test]
    fn test_failure_releases_busy() {
        let client = IntegrationClient::with_backend(Scripted(Err(()))).unwrap();
        let mut director = DialogueDirector::new(client);

        director.request(&eliza(), DialogueKind::Greet);
        assert!(matches!(settle(&mut director), DialogueOutcome::Failed { .. }));
        assert!(!director.is_busy());
        assert!(director.request(&eliza(), DialogueKind::Greet));
    }
}
