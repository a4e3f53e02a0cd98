mod align;
pub use align::align;

mod score;
pub use score::score;
