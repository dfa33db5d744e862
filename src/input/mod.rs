pub mod driver;
pub mod events;
pub mod state;

// Re-export the essential types
pub use driver::PointerDriver;
pub use events::{PointerEvent, PointerPosition, ScrollDirection};
pub use state::{
    parse_map_state, try_parse_map_state, UrlSource, UrlStateReader, ViewportState,
    ViewportStateReader,
};
