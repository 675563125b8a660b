//! Matchmaking queue, room table and move routing.
//!
//! [`Orchestrator`] is plain synchronous state. The server wraps one instance
//! in a mutex so every inbound event (join, leave, move, disconnect) runs as a
//! single critical section. Outbound messages go onto each connection's
//! unbounded channel and never block.

use std::collections::{HashMap, VecDeque};

use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::board::{Line, PlayerMark};
use crate::error::MoveError;
use crate::room::{AppliedMove, ClientMessage, Room, RoomId, RoomStateResponse, ServerMessage};
use crate::server::ConnectionId;

/// Where a connection currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Idle,
    Queued,
    InRoom { room: RoomId, side: PlayerMark },
}

#[derive(Debug, Default)]
pub struct Orchestrator {
    connections: HashMap<ConnectionId, mpsc::UnboundedSender<ServerMessage>>,
    queue: VecDeque<ConnectionId>,
    rooms: HashMap<RoomId, Room>,
    // connection -> room it is seated in
    seated: HashMap<ConnectionId, RoomId>,
    next_connection_id: ConnectionId,
    next_room_id: u64,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self {
            next_room_id: 1,
            ..Default::default()
        }
    }

    /// Records the outbound channel of a freshly accepted connection and
    /// hands back its id.
    pub fn register(&mut self, tx: mpsc::UnboundedSender<ServerMessage>) -> ConnectionId {
        let id = self.next_connection_id;
        self.next_connection_id = self.next_connection_id.wrapping_add(1);
        self.connections.insert(id, tx);
        debug!(connection_id = id, "Connection registered");
        id
    }

    /// Routes one parsed client message.
    pub fn handle_message(&mut self, connection_id: ConnectionId, message: ClientMessage) {
        match message {
            ClientMessage::Join => self.enqueue(connection_id),
            ClientMessage::Leave => self.dequeue(connection_id),
            ClientMessage::Move { room, from, to } => {
                if let Err(err) = self.apply_move(&room, connection_id, from, to) {
                    debug!(connection_id, room = %room, from, to, error = %err, "Move rejected");
                    if let Some(reason) = err.reply_reason() {
                        self.send(connection_id, ServerMessage::Error { reason });
                    }
                }
            }
        }
    }

    /// Puts a connection in the waiting queue, then pairs whoever is waiting.
    /// Seated connections are ignored.
    #[instrument(skip(self))]
    pub fn enqueue(&mut self, connection_id: ConnectionId) {
        if self.seated.contains_key(&connection_id) {
            debug!("Join ignored, connection already in a room");
            return;
        }
        if !self.queue.contains(&connection_id) {
            self.queue.push_back(connection_id);
            info!(queue_len = self.queue.len(), "Connection queued");
        }
        self.send(connection_id, ServerMessage::Queued);
        self.pair_waiting();
    }

    /// Removes a connection from the waiting queue. No-op if absent.
    #[instrument(skip(self))]
    pub fn dequeue(&mut self, connection_id: ConnectionId) {
        if let Some(pos) = self.queue.iter().position(|&cid| cid == connection_id) {
            self.queue.remove(pos);
            debug!("Connection left the queue");
        }
    }

    /// Opens rooms for the oldest waiting pairs, first joiner as `X`.
    fn pair_waiting(&mut self) {
        while self.queue.len() >= 2 {
            let (Some(seat_x), Some(seat_o)) = (self.queue.pop_front(), self.queue.pop_front())
            else {
                break;
            };

            let room_id = self.next_room_id.to_string();
            self.next_room_id += 1;

            let room = Room::new(room_id.clone(), seat_x, seat_o);
            info!(room = %room_id, seat_x, seat_o, "Room created");

            for (connection_id, side) in [(seat_x, PlayerMark::X), (seat_o, PlayerMark::O)] {
                self.seated.insert(connection_id, room_id.clone());
                self.send(
                    connection_id,
                    ServerMessage::Start(RoomStateResponse {
                        room: room_id.clone(),
                        side,
                        board: *room.board(),
                        turn: room.turn(),
                    }),
                );
            }
            self.rooms.insert(room_id, room);
        }
    }

    /// Validates and applies a move, then tells both seats about it.
    ///
    /// On a win the room is announced over and closed; otherwise the new turn
    /// is announced. A rejection changes nothing and sends nothing; the caller
    /// decides whether to reply.
    #[instrument(skip(self))]
    pub fn apply_move(
        &mut self,
        room_id: &str,
        connection_id: ConnectionId,
        from: usize,
        to: usize,
    ) -> Result<AppliedMove, MoveError> {
        let room = self.rooms.get_mut(room_id).ok_or(MoveError::UnknownRoom)?;
        let applied = room.apply_move(connection_id, from, to)?;
        let seats = room.seats();
        let turn = room.turn();

        self.broadcast(
            seats,
            ServerMessage::OpponentMove {
                from: applied.from,
                to: applied.to,
                side: applied.side,
            },
        );

        match applied.winning_line {
            Some(line) => self.finish(room_id, applied.side, line),
            None => self.broadcast(seats, ServerMessage::Turn { turn }),
        }

        Ok(applied)
    }

    fn finish(&mut self, room_id: &str, winner: PlayerMark, line: Line) {
        if let Some(room) = self.close_room(room_id) {
            info!(room = %room_id, ?winner, ?line, "Game over");
            self.broadcast(room.seats(), ServerMessage::GameOver { winner, line });
        }
    }

    /// Cleans up after a closed connection: leaves the queue, and if seated,
    /// tells the opponent and closes the room. Safe to call more than once.
    #[instrument(skip(self))]
    pub fn handle_disconnect(&mut self, connection_id: ConnectionId) {
        self.dequeue(connection_id);
        self.connections.remove(&connection_id);

        let Some(room_id) = self.seated.get(&connection_id).cloned() else {
            return;
        };
        if let Some(room) = self.close_room(&room_id) {
            info!(room = %room_id, "Player left, room closed");
            if let Some(opponent) = room.opponent_of(connection_id) {
                self.send(opponent, ServerMessage::OpponentLeft);
            }
        }
    }

    /// Drops a room and returns both its seats to idle.
    fn close_room(&mut self, room_id: &str) -> Option<Room> {
        let room = self.rooms.remove(room_id)?;
        for cid in room.seats() {
            self.seated.remove(&cid);
        }
        Some(room)
    }

    pub fn connection_state(&self, connection_id: ConnectionId) -> ConnectionState {
        if let Some(room_id) = self.seated.get(&connection_id) {
            if let Some(side) = self
                .rooms
                .get(room_id)
                .and_then(|room| room.side_of(connection_id))
            {
                return ConnectionState::InRoom {
                    room: room_id.clone(),
                    side,
                };
            }
        }
        if self.queue.contains(&connection_id) {
            ConnectionState::Queued
        } else {
            ConnectionState::Idle
        }
    }

    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Waiting connections, oldest first.
    pub fn waiting(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.queue.iter().copied()
    }

    fn broadcast(&self, seats: [ConnectionId; 2], message: ServerMessage) {
        for cid in seats {
            self.send(cid, message.clone());
        }
    }

    /// Delivers to a live connection. Closed or unknown connections are
    /// skipped; their own disconnect event does the cleanup.
    fn send(&self, connection_id: ConnectionId, message: ServerMessage) {
        match self.connections.get(&connection_id) {
            Some(tx) => {
                if tx.send(message).is_err() {
                    debug!(connection_id, "Outbound channel closed, message dropped");
                }
            }
            None => debug!(connection_id, "No such connection, message dropped"),
        }
    }
}
