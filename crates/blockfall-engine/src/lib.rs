pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece colliding when moving active piece")]
pub struct PieceCollisionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("spawned piece collides with locked cells")]
pub struct TopOutError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum IntentError {
    #[display("game is not running")]
    NotRunning,
    #[display("piece colliding when applying intent")]
    Collision(PieceCollisionError),
}

impl From<PieceCollisionError> for IntentError {
    fn from(err: PieceCollisionError) -> Self {
        IntentError::Collision(err)
    }
}
