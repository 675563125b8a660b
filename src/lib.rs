//! Two-player matchmaking and move relay for the 米-pattern three-in-a-row
//! board game, served over WebSockets.

pub mod board;
pub mod config;
pub mod connection;
pub mod error;
pub mod orchestrator;
pub mod room;
pub mod server;

pub use board::{legal_targets, winning_line, Board, PlayerMark};
pub use config::ServerConfig;
pub use error::MoveError;
pub use orchestrator::{ConnectionState, Orchestrator};
pub use server::{start_server, AppState, ConnectionId};
