pub mod controller;
pub mod filters;
pub mod locate;
pub mod markers;

pub use controller::{ControllerError, FetchTicket, MapController, SearchMode, ViewState};
pub use filters::{visible_pois, TypeFilters};
pub use locate::{FixedLocator, GeolocationError, Locator};
pub use markers::{AnchorMarker, Bounds, PoiMarker, Popup, Viewport};
