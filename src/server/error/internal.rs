use thiserror::Error;

/// Internal issues indicating unexpected stored data or possible bugs.
///
/// All variants result in a 500 Internal Server Error with a generic message
/// returned to the client.
#[derive(Error, Debug)]
pub enum InternalError {
    /// A `game_session.status` column holds a value outside the lifecycle states.
    #[error("Unknown session status '{0}' stored in database")]
    UnknownSessionStatus(String),

    /// A `campaign_player.status` column holds a value other than INVITED/JOINED.
    #[error("Unknown campaign player status '{0}' stored in database")]
    UnknownPlayerStatus(String),
}

/// Lets repositories surface conversion failures through their `DbErr` results.
impl From<InternalError> for sea_orm::DbErr {
    fn from(err: InternalError) -> Self {
        sea_orm::DbErr::Type(err.to_string())
    }
}
