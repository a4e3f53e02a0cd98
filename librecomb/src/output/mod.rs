pub mod output_json;
pub mod output_standard;

pub use output_json::write_json_output;
pub use output_standard::write_standard_output;
