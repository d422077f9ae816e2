mod interaction;

pub use interaction::InteractionState;
