//! Vimshottari dasha timeline engine.
//!
//! Resolves the dasha balance at birth from the Moon's nakshatra position,
//! lays out the Mahadasha sequence, subdivides it into Antardashas and
//! Pratyantardashas, and answers "what is active now" queries.
//!
//! Instants are Julian Dates (UTC) throughout. Conversion to and from
//! zoned calendar values lives in `kaal_time`.

pub mod dasha;
pub mod error;
pub mod graha;
pub mod nakshatra;
pub mod store;
pub mod timeline;

pub use dasha::{
    ActiveChain, DAYS_PER_YEAR, DEFAULT_HORIZON_YEARS, DashaBalance, DashaLevel, DashaPeriod,
    DashaSnapshot, MAX_HORIZON_YEARS, VIMSHOTTARI_SEQUENCE, VIMSHOTTARI_TOTAL_YEARS,
    nakshatra_birth_balance, vimshottari_snapshot, vimshottari_years,
};
pub use error::DashaError;
pub use graha::{ALL_GRAHAS, Graha};
pub use nakshatra::{ALL_NAKSHATRAS_27, BirthMoonPosition, NAKSHATRA_SPAN_27, Nakshatra};
pub use store::TimelineStore;
pub use timeline::{Timeline, TimelineRequest, TimelineView, generate_timeline};
