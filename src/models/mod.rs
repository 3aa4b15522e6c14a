pub mod itinerary;
pub mod saved_itinerary;
pub mod trip;
