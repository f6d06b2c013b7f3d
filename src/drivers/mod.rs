pub mod servo;
pub mod ws2812;
