//! Card-level data structures: cards, hands and the shoe.

pub use self::{card::*, hand::*, shoe::*};

pub(crate) mod card;
pub(crate) mod hand;
pub(crate) mod shoe;
