//! Domain entities: the Property → Advertisement → Reservation chain

pub mod advertisement;
pub mod property;
pub mod reservation;

pub use advertisement::{Advertisement, Platform};
pub use property::Property;
pub use reservation::Reservation;
