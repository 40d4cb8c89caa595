use crate::engine::bot::{self, BotDifficulty};
use crate::engine::events::GameEvent;
use crate::engine::game::{GameState, SEATS};
use crate::engine::rules::{Team, TiedHandRule};
use crate::table::events::{ClientMessage, ServerMessage, TableSnapshot};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info};

#[derive(Debug)]
pub enum TableEvent {
    PlayerJoined(String, mpsc::Sender<ServerMessage>),
    PlayerLeft(String),
    PlayerCommand(String, ClientMessage),
}

/// Delay before a scheduled bot move, so play remains followable.
const BOT_DELAY_MS: u64 = 25;

/// One running match. The table owns the game state and serializes every
/// command through its event channel; connections only ever talk to it
/// through `TableEvent`s.
pub struct Table {
    pub id: String,
    pub game: GameState,
    pub seats: [String; SEATS],
    pub player_channels: HashMap<String, mpsc::Sender<ServerMessage>>,
    pub receiver: mpsc::Receiver<TableEvent>,
    pub sender: mpsc::Sender<TableEvent>,
}

impl Table {
    pub fn new(
        id: String,
        seats: [String; SEATS],
        tie_rule: TiedHandRule,
        receiver: mpsc::Receiver<TableEvent>,
        sender: mpsc::Sender<TableEvent>,
    ) -> Self {
        let mut game = GameState::new(seats.clone(), tie_rule);
        game.start_hand();

        Self {
            id,
            game,
            seats,
            player_channels: HashMap::new(),
            receiver,
            sender,
        }
    }

    /// Runs the match to completion and returns the final state.
    pub async fn run(mut self) -> GameState {
        info!(table = %self.id, players = ?self.seats, "table started");
        self.check_bot_turn();

        while let Some(event) = self.receiver.recv().await {
            match event {
                TableEvent::PlayerJoined(player_id, sender) => {
                    info!(table = %self.id, player = %player_id, "player joined");
                    let _ = sender
                        .send(ServerMessage::MatchFound {
                            table_id: self.id.clone(),
                            players: self.seats.to_vec(),
                        })
                        .await;
                    self.player_channels.insert(player_id, sender);
                    self.broadcast(&[]).await;
                }
                TableEvent::PlayerLeft(player_id) => {
                    info!(table = %self.id, player = %player_id, "player left");
                    self.player_channels.remove(&player_id);
                }
                TableEvent::PlayerCommand(player_id, message) => {
                    self.handle_command(&player_id, message).await;
                }
            }

            if self.game.winner.is_some() {
                break;
            }
            self.check_bot_turn();
        }

        info!(
            table = %self.id,
            scores = ?self.game.scores,
            winner = ?self.game.winner,
            "table finished"
        );
        self.game
    }

    async fn handle_command(&mut self, player_id: &str, message: ClientMessage) {
        let Some(seat) = self.game.seat_of(player_id) else {
            self.send_error(player_id, "not seated at this table").await;
            return;
        };
        let team = Team::of_seat(seat);

        let result = match message {
            ClientMessage::PlayCard { card } => self.game.play_card(seat, card),
            ClientMessage::RequestRaise => self.game.request_raise(team),
            ClientMessage::RespondRaise { accept } => self.game.respond_raise(team, accept),
            ClientMessage::RespondHandOfEleven { accept } => {
                self.game.respond_hand_of_eleven(team, accept)
            }
        };

        match result {
            Ok(events) => {
                debug!(table = %self.id, player = %player_id, ?message, "command applied");
                self.broadcast(&events).await;
            }
            Err(err) => {
                debug!(table = %self.id, player = %player_id, %err, "command rejected");
                self.send_error(player_id, &err.to_string()).await;
            }
        }
    }

    /// Schedules a move whenever the seat being waited on belongs to a bot.
    /// The bot decides against a clone of the current state; a command that
    /// goes stale is simply rejected and the next event reschedules it.
    fn check_bot_turn(&self) {
        let Some(seat) = bot::seat_to_act(&self.game) else {
            return;
        };
        let player = &self.game.players[seat];
        if !player.is_bot {
            return;
        }

        let difficulty = BotDifficulty::from_id(&player.id);
        let player_id = player.id.clone();
        let game = self.game.clone();
        let sender = self.sender.clone();

        tokio::spawn(async move {
            tokio::time::sleep(tokio::time::Duration::from_millis(BOT_DELAY_MS)).await;
            if let Some(message) = bot::play_bot_turn(&game, &player_id, difficulty) {
                let _ = sender
                    .send(TableEvent::PlayerCommand(player_id, message))
                    .await;
            }
        });
    }

    async fn send_error(&self, player_id: &str, message: &str) {
        if let Some(sender) = self.player_channels.get(player_id) {
            let _ = sender
                .send(ServerMessage::Error {
                    message: message.to_string(),
                })
                .await;
        }
    }

    async fn broadcast(&self, events: &[GameEvent]) {
        for (player_id, sender) in &self.player_channels {
            let message = ServerMessage::Update {
                events: events.to_vec(),
                state: TableSnapshot::for_player(&self.game, player_id),
            };
            let _ = sender.send(message).await;
        }
    }
}
