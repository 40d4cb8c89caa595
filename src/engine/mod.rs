pub mod bot;
pub mod card;
pub mod deck;
pub mod error;
pub mod events;
pub mod game;
pub mod rules;
pub mod wager;
