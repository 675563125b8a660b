//! Game rooms and the messages exchanged with their players.

mod request;
mod response;
#[allow(clippy::module_inception)]
mod room;
mod room_state_response;

pub use request::ClientMessage;
pub use response::ServerMessage;
pub use room::{AppliedMove, Room, RoomId};
pub use room_state_response::RoomStateResponse;
