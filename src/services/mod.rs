pub mod completion_service;
pub mod itinerary_normalizer;
pub mod itinerary_service;
