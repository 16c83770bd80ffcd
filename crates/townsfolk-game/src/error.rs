use thiserror::Error;
use townsfolk_core::EntityId;

/// Rejected command-surface calls. Nothing is mutated when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("No entity with id {0}")]
    UnknownEntity(EntityId),

    #[error("Entity {0} is not an NPC")]
    NotAnNpc(EntityId),

    #[error("Message is empty")]
    EmptyMessage,
}

/// Problems with the initial entity list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("Roster has no player entity")]
    NoPlayer,

    #[error("Roster has more than one player entity")]
    MultiplePlayers,

    #[error("Duplicate entity id {0}")]
    DuplicateId(EntityId),
}
