pub mod engine;
pub mod table;

use engine::rules::TiedHandRule;
use table::events::ServerMessage;
use table::table::{Table, TableEvent};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let table_id = uuid::Uuid::new_v4().to_string();
    let seats = ["bot_hard_1", "bot_medium_2", "bot_easy_3", "bot_4"].map(String::from);

    let (sender, receiver) = mpsc::channel(64);
    let table = Table::new(
        table_id,
        seats,
        TiedHandRule::OverallDraw,
        receiver,
        sender.clone(),
    );

    // An observer seat: sees public state only and prints the event stream.
    let (observer_tx, mut observer_rx) = mpsc::channel(256);
    let _ = sender
        .send(TableEvent::PlayerJoined("observer".to_string(), observer_tx))
        .await;
    tokio::spawn(async move {
        while let Some(message) = observer_rx.recv().await {
            if let ServerMessage::Update { events, .. } = message {
                for event in events {
                    if let Ok(line) = serde_json::to_string(&event) {
                        println!("{line}");
                    }
                }
            }
        }
    });

    let game = table.run().await;
    info!(
        scores = ?game.scores,
        winner = ?game.winner,
        hands = game.history.len(),
        "match complete"
    );
}
