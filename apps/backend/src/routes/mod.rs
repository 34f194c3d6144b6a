pub mod decks;
