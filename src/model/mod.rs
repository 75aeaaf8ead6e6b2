pub mod adapter;
pub mod item;

pub use adapter::{Envelope, normalize_date};
pub use item::{Guest, GuestId, Party, PartyFields, PartyId, Rsvp};
