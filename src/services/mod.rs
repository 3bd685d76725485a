pub mod odometer_service;
pub mod output_service;
pub mod price_service;
pub mod render_service;
